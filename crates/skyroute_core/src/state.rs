//! Authoritative in-memory model of the running simulation.
//!
//! One `SimulationState` instance is owned by the controller and passed by
//! reference to the scheduler and the reply-application code; every change
//! goes through the atomic operations below so readers always observe a
//! consistent grid/route/cursor triple.

use std::time::Duration;

use crate::grid::{Coord, Grid, GRID_SIZE};

/// Routing strategy, forwarded opaquely to the oracle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutingMode {
    Shortest,
    Safe,
    Fast,
}

impl RoutingMode {
    pub const ALL: [RoutingMode; 3] = [RoutingMode::Shortest, RoutingMode::Safe, RoutingMode::Fast];

    /// The `mode` field of a `/route` request body.
    pub fn wire_name(self) -> &'static str {
        match self {
            RoutingMode::Shortest => "shortest",
            RoutingMode::Safe => "safe",
            RoutingMode::Fast => "fast",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RoutingMode::Shortest => "Shortest",
            RoutingMode::Safe => "Safe",
            RoutingMode::Fast => "Fast",
        }
    }
}

/// Playback interval between cursor steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackSpeed {
    Slow,
    Medium,
    Fast,
}

impl PlaybackSpeed {
    pub const ALL: [PlaybackSpeed; 3] =
        [PlaybackSpeed::Slow, PlaybackSpeed::Medium, PlaybackSpeed::Fast];

    pub fn interval_ms(self) -> u64 {
        match self {
            PlaybackSpeed::Slow => 800,
            PlaybackSpeed::Medium => 400,
            PlaybackSpeed::Fast => 200,
        }
    }

    pub fn interval(self) -> Duration {
        Duration::from_millis(self.interval_ms())
    }

    pub fn label(self) -> &'static str {
        match self {
            PlaybackSpeed::Slow => "Slow",
            PlaybackSpeed::Medium => "Medium",
            PlaybackSpeed::Fast => "Fast",
        }
    }

    /// Reverse lookup for slider-style inputs. Unknown values map to `None`.
    pub fn from_interval_ms(ms: u64) -> Option<Self> {
        Self::ALL.into_iter().find(|speed| speed.interval_ms() == ms)
    }
}

/// Derived playback status. Never stored; always computed from the cursor,
/// route, and running flag so there is no second invariant to keep in sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Idle,
    Running,
    Paused,
    Completed,
}

/// Grid, active route, playback cursor, and operator-facing counters.
#[derive(Debug)]
pub struct SimulationState {
    grid: Grid,
    route: Vec<Coord>,
    cursor: usize,
    running: bool,
    mode: RoutingMode,
    speed: PlaybackSpeed,
    reroute_count: u32,
    last_error: Option<String>,
}

impl SimulationState {
    pub fn new() -> Self {
        Self {
            grid: Grid::empty(GRID_SIZE),
            route: Vec::new(),
            cursor: 0,
            running: false,
            mode: RoutingMode::Shortest,
            speed: PlaybackSpeed::Medium,
            reroute_count: 0,
            last_error: None,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn route(&self) -> &[Coord] {
        &self.route
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The vehicle's position on the active route, if any.
    pub fn current_position(&self) -> Option<Coord> {
        self.route.get(self.cursor).copied()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn mode(&self) -> RoutingMode {
        self.mode
    }

    pub fn speed(&self) -> PlaybackSpeed {
        self.speed
    }

    pub fn reroute_count(&self) -> u32 {
        self.reroute_count
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn run_status(&self) -> RunStatus {
        if self.running {
            RunStatus::Running
        } else if self.cursor > 0 && self.cursor + 1 == self.route.len() {
            RunStatus::Completed
        } else if self.cursor == 0 {
            RunStatus::Idle
        } else {
            RunStatus::Paused
        }
    }

    /// Replace the grid and route as one pair. The cursor resets to the
    /// route start; the running flag is left to the caller.
    pub fn install_route(&mut self, grid: Grid, route: Vec<Coord>) {
        self.grid = grid;
        self.route = route;
        self.cursor = 0;
    }

    /// Replace the grid alone, leaving the route untouched.
    pub fn set_grid(&mut self, grid: Grid) {
        self.grid = grid;
    }

    /// Drop the active route and rewind the cursor.
    pub fn clear_route(&mut self) {
        self.route.clear();
        self.cursor = 0;
    }

    /// Move the cursor one step along the route. Returns `false` when the
    /// cursor is already at the final waypoint (or there is no route).
    pub fn advance_cursor(&mut self) -> bool {
        if self.cursor + 1 < self.route.len() {
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    pub fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    pub fn set_mode(&mut self, mode: RoutingMode) {
        self.mode = mode;
    }

    pub fn set_speed(&mut self, speed: PlaybackSpeed) {
        self.speed = speed;
    }

    pub fn increment_reroute_count(&mut self) {
        self.reroute_count = self.reroute_count.saturating_add(1);
    }

    pub fn reset_reroute_count(&mut self) {
        self.reroute_count = 0;
    }

    pub fn set_last_error(&mut self, message: impl Into<String>) {
        self.last_error = Some(message.into());
    }

    pub fn clear_last_error(&mut self) {
        self.last_error = None;
    }
}

impl Default for SimulationState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route_of(len: usize) -> Vec<Coord> {
        (0..len).map(|y| Coord::new(0, y)).collect()
    }

    #[test]
    fn install_route_resets_cursor() {
        let mut state = SimulationState::new();
        state.install_route(Grid::empty(GRID_SIZE), route_of(5));
        state.advance_cursor();
        state.advance_cursor();
        assert_eq!(state.cursor(), 2);

        state.install_route(Grid::empty(GRID_SIZE), route_of(3));
        assert_eq!(state.cursor(), 0);
        assert_eq!(state.route().len(), 3);
    }

    #[test]
    fn cursor_never_passes_the_final_waypoint() {
        let mut state = SimulationState::new();
        state.install_route(Grid::empty(GRID_SIZE), route_of(3));
        assert!(state.advance_cursor());
        assert!(state.advance_cursor());
        assert!(!state.advance_cursor());
        assert_eq!(state.cursor(), 2);
    }

    #[test]
    fn advance_on_empty_route_is_a_no_op() {
        let mut state = SimulationState::new();
        assert!(!state.advance_cursor());
        assert_eq!(state.cursor(), 0);
    }

    #[test]
    fn status_is_derived_from_cursor_route_and_running() {
        let mut state = SimulationState::new();
        assert_eq!(state.run_status(), RunStatus::Idle);

        state.install_route(Grid::empty(GRID_SIZE), route_of(3));
        state.set_running(true);
        assert_eq!(state.run_status(), RunStatus::Running);

        state.advance_cursor();
        state.set_running(false);
        assert_eq!(state.run_status(), RunStatus::Paused);

        state.advance_cursor();
        assert_eq!(state.run_status(), RunStatus::Completed);

        state.install_route(Grid::empty(GRID_SIZE), route_of(4));
        assert_eq!(state.run_status(), RunStatus::Idle);
    }

    #[test]
    fn reroute_counter_increments_and_resets() {
        let mut state = SimulationState::new();
        state.increment_reroute_count();
        state.increment_reroute_count();
        assert_eq!(state.reroute_count(), 2);
        state.reset_reroute_count();
        assert_eq!(state.reroute_count(), 0);
    }

    #[test]
    fn speed_lookup_from_slider_values() {
        assert_eq!(PlaybackSpeed::from_interval_ms(800), Some(PlaybackSpeed::Slow));
        assert_eq!(PlaybackSpeed::from_interval_ms(400), Some(PlaybackSpeed::Medium));
        assert_eq!(PlaybackSpeed::from_interval_ms(200), Some(PlaybackSpeed::Fast));
        assert_eq!(PlaybackSpeed::from_interval_ms(300), None);
    }
}
