//! Periodic stepper that advances the playback cursor.
//!
//! The scheduler holds only the next tick deadline; every public method takes
//! an explicit `now` so the UI can drive it from its frame loop and tests can
//! drive it with synthetic time. Cursor and running flag live in
//! [`SimulationState`]; the scheduler has no failure modes of its own.

use std::time::Instant;

use crate::state::{RunStatus, SimulationState};

#[derive(Debug, Default)]
pub struct PlaybackScheduler {
    deadline: Option<Instant>,
}

impl PlaybackScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin ticking. Only Idle/Paused states with a non-empty route can
    /// start; a completed run stays terminal until a new route is installed.
    /// Returns whether playback actually started.
    pub fn start(&mut self, state: &mut SimulationState, now: Instant) -> bool {
        match state.run_status() {
            RunStatus::Idle | RunStatus::Paused => {}
            RunStatus::Running | RunStatus::Completed => return false,
        }
        if state.route().is_empty() {
            state.set_last_error("cannot start playback without a route");
            return false;
        }
        state.set_running(true);
        self.deadline = Some(now + state.speed().interval());
        true
    }

    /// Stop ticking without touching the cursor. Outstanding oracle requests
    /// are unaffected; only the timer is cancelled.
    pub fn pause(&mut self, state: &mut SimulationState) {
        state.set_running(false);
        self.deadline = None;
    }

    /// Restart the timer under the currently configured speed. Called when
    /// the operator changes speed while playback is running.
    pub fn reschedule(&mut self, state: &SimulationState, now: Instant) {
        if state.is_running() {
            self.deadline = Some(now + state.speed().interval());
        }
    }

    /// Advance the cursor once per elapsed period. Reaching the final
    /// waypoint clears the running flag, which makes the derived status
    /// Completed and stops further ticking.
    pub fn poll(&mut self, state: &mut SimulationState, now: Instant) {
        if !state.is_running() {
            // An external stop (pause, scenario load) cancels the timer here.
            self.deadline = None;
            return;
        }
        let mut deadline = self.deadline.unwrap_or(now);
        while state.is_running() && now >= deadline {
            step(state);
            deadline += state.speed().interval();
        }
        self.deadline = state.is_running().then_some(deadline);
    }
}

fn step(state: &mut SimulationState) {
    let moved = state.advance_cursor();
    let at_end = state.cursor() + 1 >= state.route().len();
    if !moved || at_end {
        state.set_running(false);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::grid::{Coord, Grid, GRID_SIZE};
    use crate::state::{PlaybackSpeed, RunStatus};

    fn state_with_route(len: usize) -> SimulationState {
        let mut state = SimulationState::new();
        let route = (0..len).map(|y| Coord::new(0, y)).collect();
        state.install_route(Grid::empty(GRID_SIZE), route);
        state
    }

    #[test]
    fn start_requires_a_route() {
        let mut scheduler = PlaybackScheduler::new();
        let mut state = SimulationState::new();
        assert!(!scheduler.start(&mut state, Instant::now()));
        assert!(!state.is_running());
        assert!(state.last_error().is_some());
    }

    #[test]
    fn ticks_advance_cursor_until_completed() {
        let mut scheduler = PlaybackScheduler::new();
        let mut state = state_with_route(3);
        state.set_speed(PlaybackSpeed::Fast);
        let t0 = Instant::now();
        assert!(scheduler.start(&mut state, t0));

        scheduler.poll(&mut state, t0 + Duration::from_millis(199));
        assert_eq!(state.cursor(), 0);

        scheduler.poll(&mut state, t0 + Duration::from_millis(200));
        assert_eq!(state.cursor(), 1);
        assert_eq!(state.run_status(), RunStatus::Running);

        scheduler.poll(&mut state, t0 + Duration::from_millis(400));
        assert_eq!(state.cursor(), 2);
        assert_eq!(state.run_status(), RunStatus::Completed);

        // Terminal: far-future polls change nothing.
        scheduler.poll(&mut state, t0 + Duration::from_secs(60));
        assert_eq!(state.cursor(), 2);
        assert_eq!(state.run_status(), RunStatus::Completed);
    }

    #[test]
    fn missed_periods_are_caught_up_in_one_poll() {
        let mut scheduler = PlaybackScheduler::new();
        let mut state = state_with_route(10);
        state.set_speed(PlaybackSpeed::Fast);
        let t0 = Instant::now();
        scheduler.start(&mut state, t0);

        scheduler.poll(&mut state, t0 + Duration::from_millis(650));
        assert_eq!(state.cursor(), 3);
    }

    #[test]
    fn pause_cancels_timer_without_moving_cursor() {
        let mut scheduler = PlaybackScheduler::new();
        let mut state = state_with_route(5);
        let t0 = Instant::now();
        scheduler.start(&mut state, t0);
        let deadline = t0 + state.speed().interval();
        scheduler.poll(&mut state, deadline);
        assert_eq!(state.cursor(), 1);

        scheduler.pause(&mut state);
        assert_eq!(state.run_status(), RunStatus::Paused);
        scheduler.poll(&mut state, t0 + Duration::from_secs(10));
        assert_eq!(state.cursor(), 1);
    }

    #[test]
    fn speed_change_restarts_the_period() {
        let mut scheduler = PlaybackScheduler::new();
        let mut state = state_with_route(5);
        state.set_speed(PlaybackSpeed::Slow);
        let t0 = Instant::now();
        scheduler.start(&mut state, t0);

        // 300ms in, switch to Fast: next tick lands 200ms later, not at the
        // original 800ms deadline.
        let t1 = t0 + Duration::from_millis(300);
        state.set_speed(PlaybackSpeed::Fast);
        scheduler.reschedule(&state, t1);

        scheduler.poll(&mut state, t1 + Duration::from_millis(199));
        assert_eq!(state.cursor(), 0);
        scheduler.poll(&mut state, t1 + Duration::from_millis(200));
        assert_eq!(state.cursor(), 1);
    }

    #[test]
    fn start_is_terminal_after_completion() {
        let mut scheduler = PlaybackScheduler::new();
        let mut state = state_with_route(2);
        let t0 = Instant::now();
        scheduler.start(&mut state, t0);
        let deadline = t0 + state.speed().interval();
        scheduler.poll(&mut state, deadline);
        assert_eq!(state.run_status(), RunStatus::Completed);

        assert!(!scheduler.start(&mut state, t0 + Duration::from_secs(1)));
        assert_eq!(state.run_status(), RunStatus::Completed);
    }

    #[test]
    fn install_while_running_keeps_ticking_on_the_new_route() {
        let mut scheduler = PlaybackScheduler::new();
        let mut state = state_with_route(5);
        state.set_speed(PlaybackSpeed::Fast);
        let t0 = Instant::now();
        scheduler.start(&mut state, t0);
        scheduler.poll(&mut state, t0 + Duration::from_millis(200));
        assert_eq!(state.cursor(), 1);

        let replacement = (0..4).map(|x| Coord::new(x, 0)).collect();
        state.install_route(Grid::empty(GRID_SIZE), replacement);
        assert_eq!(state.cursor(), 0);
        assert!(state.is_running());

        scheduler.poll(&mut state, t0 + Duration::from_millis(400));
        assert_eq!(state.cursor(), 1);
        assert_eq!(state.route()[1], Coord::new(1, 0));
    }
}
