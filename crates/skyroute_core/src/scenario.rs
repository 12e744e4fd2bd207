//! Named preset layouts and their load semantics.
//!
//! Loading a scenario swaps the whole grid, invalidates the active route,
//! stops playback, and rewinds the re-route counter. A failed load changes
//! nothing.

use log::warn;

use crate::dispatch::OracleRequests;
use crate::grid::Grid;
use crate::oracle::OracleError;
use crate::state::SimulationState;

/// Preset obstacle layouts known to the oracle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioKind {
    Urban,
    Dense,
    Open,
}

impl ScenarioKind {
    pub const ALL: [ScenarioKind; 3] = [ScenarioKind::Urban, ScenarioKind::Dense, ScenarioKind::Open];

    /// The `name` field of a `/scenario` request body.
    pub fn wire_name(self) -> &'static str {
        match self {
            ScenarioKind::Urban => "urban",
            ScenarioKind::Dense => "dense",
            ScenarioKind::Open => "open",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ScenarioKind::Urban => "Urban",
            ScenarioKind::Dense => "Dense",
            ScenarioKind::Open => "Open",
        }
    }
}

impl OracleRequests {
    pub(crate) fn apply_scenario(
        &mut self,
        state: &mut SimulationState,
        seq: u64,
        kind: ScenarioKind,
        outcome: Result<Grid, OracleError>,
    ) {
        let grid = match outcome {
            Ok(grid) => grid,
            Err(error) => {
                self.surface_error(state, seq, &error);
                return;
            }
        };
        if !self.is_fresh(seq) {
            warn!(
                "discarding stale scenario install '{}' (seq {seq})",
                kind.wire_name()
            );
            return;
        }

        state.set_grid(grid);
        state.clear_route();
        // Stop playback so a live timer can never tick against the cleared
        // route; the scheduler drops its deadline on the next poll.
        state.set_running(false);
        state.reset_reroute_count();
        state.clear_last_error();
        self.mark_applied(seq);
    }
}
