//! Operator-facing facade over the simulation core.
//!
//! The controller owns the state, the playback scheduler, and the request
//! dispatcher; the presentation layer holds one instance, forwards intents,
//! and calls [`SimulationController::poll`] every frame. All state mutation
//! happens on the thread driving `poll`.

use std::sync::Arc;
use std::time::Instant;

use crate::dispatch::OracleRequests;
use crate::grid::Coord;
use crate::oracle::RouteOracle;
use crate::playback::PlaybackScheduler;
use crate::reroute;
use crate::scenario::ScenarioKind;
use crate::state::{PlaybackSpeed, RoutingMode, SimulationState};

pub struct SimulationController {
    state: SimulationState,
    playback: PlaybackScheduler,
    requests: OracleRequests,
}

impl SimulationController {
    pub fn new(oracle: Arc<dyn RouteOracle>) -> Self {
        Self {
            state: SimulationState::new(),
            playback: PlaybackScheduler::new(),
            requests: OracleRequests::new(oracle),
        }
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Intents issued but not yet answered, for the presentation layer.
    pub fn requests_inflight(&self) -> usize {
        self.requests.inflight()
    }

    /// Fetch the initial route for the configured mode.
    pub fn bootstrap(&mut self) {
        self.requests.request_route(self.state.mode(), None);
    }

    /// Apply completed oracle replies, then advance playback. Replies drain
    /// first so a route install always wins over a tick in the same frame.
    pub fn poll(&mut self, now: Instant) {
        self.requests.drain(&mut self.state);
        self.playback.poll(&mut self.state, now);
    }

    pub fn start(&mut self, now: Instant) -> bool {
        self.playback.start(&mut self.state, now)
    }

    pub fn pause(&mut self) {
        self.playback.pause(&mut self.state);
    }

    /// Switch routing strategy and refetch a fresh route from the start.
    pub fn select_mode(&mut self, mode: RoutingMode) {
        if self.state.mode() == mode {
            return;
        }
        self.state.set_mode(mode);
        self.requests.request_route(mode, None);
    }

    /// Change playback speed; a running timer restarts under the new period.
    pub fn select_speed(&mut self, speed: PlaybackSpeed, now: Instant) {
        if self.state.speed() == speed {
            return;
        }
        self.state.set_speed(speed);
        self.playback.reschedule(&self.state, now);
    }

    /// Flip the occupancy of `cell` and re-plan from the vehicle's current
    /// position. Start and destination cells are rejected before any request
    /// is issued.
    pub fn toggle_cell(&mut self, cell: Coord) {
        if !reroute::toggle_allowed(&self.state, cell) {
            self.state
                .set_last_error(format!("cell {cell} cannot be toggled"));
            return;
        }
        let anchor = self.state.current_position();
        self.requests.request_reroute(self.state.mode(), cell, anchor);
    }

    pub fn load_scenario(&mut self, kind: ScenarioKind) {
        self.requests.request_scenario(kind);
    }
}
