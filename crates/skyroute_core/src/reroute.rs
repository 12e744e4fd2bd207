//! Obstacle-toggle intents and the re-plan pipeline they trigger.
//!
//! A toggle flips the cell on the oracle first, then refetches a route
//! anchored at the vehicle position captured when the operator clicked. The
//! two exchanges share one worker thread (see
//! [`OracleRequests::request_reroute`]), so the order of steps is fixed even
//! under latency.

use log::warn;

use crate::dispatch::OracleRequests;
use crate::grid::Coord;
use crate::oracle::{OracleError, RoutePlan};
use crate::state::SimulationState;

/// Guard applied before a toggle intent reaches the oracle: the fixed start
/// and destination cells are never toggled, and clicks outside the grid are
/// ignored.
pub fn toggle_allowed(state: &SimulationState, cell: Coord) -> bool {
    let grid = state.grid();
    grid.in_bounds(cell) && cell != grid.start() && cell != grid.destination()
}

impl OracleRequests {
    pub(crate) fn apply_reroute(
        &mut self,
        state: &mut SimulationState,
        seq: u64,
        cell: Coord,
        toggled: Result<(), OracleError>,
        route: Option<Result<RoutePlan, OracleError>>,
    ) {
        if let Err(error) = toggled {
            // A failed flip aborts the whole intent: no counter movement,
            // no route change.
            self.surface_error(state, seq, &error);
            return;
        }

        // The obstacle really changed on the oracle, so the re-plan counts
        // even if its route reply ends up superseded below.
        state.increment_reroute_count();

        match route {
            Some(Ok(plan)) => {
                self.install_plan(state, seq, plan);
            }
            Some(Err(error)) => self.surface_error(state, seq, &error),
            None => warn!("toggle of {cell} landed without a route refresh"),
        }
    }
}
