//! Sequenced background requests against the route oracle.
//!
//! Oracle round-trips run on worker threads so the operator surface never
//! blocks; replies come back over a channel tagged with the sequence number
//! assigned at issue time. [`OracleRequests::drain`] applies them on the one
//! thread that owns [`SimulationState`], and discards any install that a
//! newer reply has already superseded, so installs land in issuance order no
//! matter how the network reorders completions.

use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use std::thread;

use log::warn;

use crate::grid::{Coord, Grid};
use crate::oracle::{OracleError, RouteOracle, RoutePlan};
use crate::scenario::ScenarioKind;
use crate::state::{RoutingMode, SimulationState};

#[derive(Debug)]
pub(crate) enum OracleReply {
    /// Plain route query (bootstrap or mode change).
    Route(Result<RoutePlan, OracleError>),
    /// Obstacle toggle with its follow-up anchored route query. `route` is
    /// present only when the toggle itself landed.
    ObstacleToggle {
        cell: Coord,
        toggled: Result<(), OracleError>,
        route: Option<Result<RoutePlan, OracleError>>,
    },
    Scenario {
        kind: ScenarioKind,
        outcome: Result<Grid, OracleError>,
    },
}

#[derive(Debug)]
pub(crate) struct TaggedReply {
    pub(crate) seq: u64,
    pub(crate) reply: OracleReply,
}

/// Issues oracle intents on worker threads and applies their replies under
/// the last-writer-wins sequencing rule.
pub struct OracleRequests {
    oracle: Arc<dyn RouteOracle>,
    sender: Sender<TaggedReply>,
    receiver: Receiver<TaggedReply>,
    next_seq: u64,
    last_applied: u64,
    inflight: usize,
}

impl OracleRequests {
    pub fn new(oracle: Arc<dyn RouteOracle>) -> Self {
        let (sender, receiver) = channel();
        Self {
            oracle,
            sender,
            receiver,
            next_seq: 0,
            last_applied: 0,
            inflight: 0,
        }
    }

    /// Number of intents issued but not yet drained.
    pub fn inflight(&self) -> usize {
        self.inflight
    }

    fn issue(&mut self) -> (u64, Sender<TaggedReply>, Arc<dyn RouteOracle>) {
        self.next_seq += 1;
        self.inflight += 1;
        (self.next_seq, self.sender.clone(), Arc::clone(&self.oracle))
    }

    /// Query a fresh route; `anchor` re-plans from the vehicle position.
    pub fn request_route(&mut self, mode: RoutingMode, anchor: Option<Coord>) {
        let (seq, sender, oracle) = self.issue();
        thread::spawn(move || {
            let reply = OracleReply::Route(oracle.request_route(mode, anchor));
            let _ = sender.send(TaggedReply { seq, reply });
        });
    }

    /// Toggle `cell` and, if the flip lands, refetch a route anchored at
    /// `anchor`. Both exchanges share one worker so the toggle always
    /// completes before the refetch is issued.
    pub fn request_reroute(&mut self, mode: RoutingMode, cell: Coord, anchor: Option<Coord>) {
        let (seq, sender, oracle) = self.issue();
        thread::spawn(move || {
            let toggled = oracle.toggle_obstacle(cell);
            let route = toggled
                .is_ok()
                .then(|| oracle.request_route(mode, anchor));
            let reply = OracleReply::ObstacleToggle {
                cell,
                toggled,
                route,
            };
            let _ = sender.send(TaggedReply { seq, reply });
        });
    }

    pub fn request_scenario(&mut self, kind: ScenarioKind) {
        let (seq, sender, oracle) = self.issue();
        thread::spawn(move || {
            let outcome = oracle.load_scenario(kind.wire_name());
            let _ = sender.send(TaggedReply { seq, reply: OracleReply::Scenario { kind, outcome } });
        });
    }

    /// Apply every reply received so far. Must run on the single thread that
    /// owns `state`.
    pub fn drain(&mut self, state: &mut SimulationState) {
        while let Ok(tagged) = self.receiver.try_recv() {
            self.inflight = self.inflight.saturating_sub(1);
            self.apply(state, tagged);
        }
    }

    fn apply(&mut self, state: &mut SimulationState, tagged: TaggedReply) {
        let TaggedReply { seq, reply } = tagged;
        match reply {
            OracleReply::Route(result) => match result {
                Ok(plan) => {
                    self.install_plan(state, seq, plan);
                }
                Err(error) => self.surface_error(state, seq, &error),
            },
            OracleReply::ObstacleToggle {
                cell,
                toggled,
                route,
            } => self.apply_reroute(state, seq, cell, toggled, route),
            OracleReply::Scenario { kind, outcome } => {
                self.apply_scenario(state, seq, kind, outcome)
            }
        }
    }

    /// True when `seq` is newer than every install applied so far.
    pub(crate) fn is_fresh(&self, seq: u64) -> bool {
        seq > self.last_applied
    }

    pub(crate) fn mark_applied(&mut self, seq: u64) {
        self.last_applied = seq;
    }

    /// Install a grid/route pair unless a newer reply already landed.
    /// Returns whether the plan was installed.
    pub(crate) fn install_plan(
        &mut self,
        state: &mut SimulationState,
        seq: u64,
        plan: RoutePlan,
    ) -> bool {
        if !self.is_fresh(seq) {
            warn!(
                "discarding stale route install (seq {seq} <= {})",
                self.last_applied
            );
            return false;
        }
        state.install_route(plan.grid, plan.route);
        state.clear_last_error();
        self.mark_applied(seq);
        true
    }

    /// Surface a failed exchange unless a newer intent already owns the
    /// operator's attention.
    pub(crate) fn surface_error(
        &mut self,
        state: &mut SimulationState,
        seq: u64,
        error: &OracleError,
    ) {
        if self.is_fresh(seq) {
            state.set_last_error(error.to_string());
        } else {
            warn!("discarding stale oracle failure (seq {seq}): {error}");
        }
    }
}
