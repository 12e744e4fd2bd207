#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use skyroute_core::controller::SimulationController;
use skyroute_core::grid::{Coord, Grid, GRID_SIZE};
use skyroute_core::oracle::{OracleError, RouteOracle, RoutePlan};
use skyroute_core::state::RoutingMode;

type RouteHandler =
    Box<dyn Fn(RoutingMode, Option<Coord>) -> (Duration, Result<RoutePlan, String>) + Send>;

/// In-memory oracle double with scripted answers and per-reply latency.
///
/// The latency sleep happens outside the script lock, so two concurrent
/// requests really can complete out of issuance order.
pub struct ScriptedOracle {
    route_handler: Mutex<RouteHandler>,
    toggle_result: Mutex<Result<(), String>>,
    scenario_result: Mutex<Result<Grid, String>>,
    seen_anchors: Mutex<Vec<Option<Coord>>>,
    seen_toggles: Mutex<Vec<Coord>>,
    seen_scenarios: Mutex<Vec<String>>,
}

impl ScriptedOracle {
    /// Answers every route query instantly with a five-step route starting
    /// at the anchor (or the grid start), over an open 15x15 grid.
    pub fn new() -> Self {
        Self {
            route_handler: Mutex::new(Box::new(|_, anchor| {
                let from = anchor.unwrap_or(Coord::new(0, 0));
                (Duration::ZERO, Ok(line_plan(from, 5)))
            })),
            toggle_result: Mutex::new(Ok(())),
            scenario_result: Mutex::new(Ok(Grid::empty(GRID_SIZE))),
            seen_anchors: Mutex::new(Vec::new()),
            seen_toggles: Mutex::new(Vec::new()),
            seen_scenarios: Mutex::new(Vec::new()),
        }
    }

    pub fn set_route_handler(
        &self,
        handler: impl Fn(RoutingMode, Option<Coord>) -> (Duration, Result<RoutePlan, String>)
            + Send
            + 'static,
    ) {
        *self.route_handler.lock().unwrap() = Box::new(handler);
    }

    pub fn set_toggle_result(&self, result: Result<(), String>) {
        *self.toggle_result.lock().unwrap() = result;
    }

    pub fn set_scenario_result(&self, result: Result<Grid, String>) {
        *self.scenario_result.lock().unwrap() = result;
    }

    pub fn anchors(&self) -> Vec<Option<Coord>> {
        self.seen_anchors.lock().unwrap().clone()
    }

    pub fn toggles(&self) -> Vec<Coord> {
        self.seen_toggles.lock().unwrap().clone()
    }

    pub fn scenarios(&self) -> Vec<String> {
        self.seen_scenarios.lock().unwrap().clone()
    }
}

impl RouteOracle for ScriptedOracle {
    fn request_route(
        &self,
        mode: RoutingMode,
        anchor: Option<Coord>,
    ) -> Result<RoutePlan, OracleError> {
        self.seen_anchors.lock().unwrap().push(anchor);
        let (delay, result) = {
            let handler = self.route_handler.lock().unwrap();
            (*handler)(mode, anchor)
        };
        thread::sleep(delay);
        result.map_err(OracleError::Rejected)
    }

    fn toggle_obstacle(&self, cell: Coord) -> Result<(), OracleError> {
        self.seen_toggles.lock().unwrap().push(cell);
        self.toggle_result
            .lock()
            .unwrap()
            .clone()
            .map_err(OracleError::Rejected)
    }

    fn load_scenario(&self, name: &str) -> Result<Grid, OracleError> {
        self.seen_scenarios.lock().unwrap().push(name.to_string());
        self.scenario_result
            .lock()
            .unwrap()
            .clone()
            .map_err(OracleError::Rejected)
    }
}

/// Straight route of `len` cells starting at `from`, stepping along the row.
pub fn line_plan(from: Coord, len: usize) -> RoutePlan {
    RoutePlan {
        grid: Grid::empty(GRID_SIZE),
        route: (0..len).map(|i| Coord::new(from.x, from.y + i)).collect(),
    }
}

pub fn controller_with(oracle: &Arc<ScriptedOracle>) -> SimulationController {
    SimulationController::new(Arc::clone(oracle) as Arc<dyn RouteOracle>)
}

/// Poll with a frozen playback clock until every in-flight reply has been
/// applied. Playback deadlines sit in the future relative to `frozen_now`,
/// so only reply application runs here, never ticks.
pub fn settle(controller: &mut SimulationController, frozen_now: Instant) {
    let give_up = Instant::now() + Duration::from_secs(5);
    while controller.requests_inflight() > 0 {
        assert!(Instant::now() < give_up, "oracle replies never settled");
        controller.poll(frozen_now);
        thread::sleep(Duration::from_millis(2));
    }
    controller.poll(frozen_now);
}
