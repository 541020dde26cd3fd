//! Direction input reconciliation
//!
//! Every input source funnels through [`InputReconciler::request_direction`].
//! Accepted requests overwrite the single pending-direction slot, so the last
//! accepted request before a tick decides that tick's move. Rejected requests
//! are dropped without touching the state.

use super::grid::Direction;
use super::state::GameState;

/// Result of a direction request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputVerdict {
    Accepted,
    /// Game idle, paused or over
    NotRunning,
    /// Arrived within the minimum interval of the last accepted request
    RateLimited,
    /// Points straight back along the committed heading
    Reversal,
}

impl InputVerdict {
    pub fn accepted(&self) -> bool {
        *self == InputVerdict::Accepted
    }
}

/// Gatekeeper between raw input events and the pending-direction slot
#[derive(Debug, Clone)]
pub struct InputReconciler {
    min_interval_ms: f64,
    last_accepted_ms: Option<f64>,
}

impl InputReconciler {
    pub fn new(min_interval_ms: u32) -> Self {
        Self {
            min_interval_ms: f64::from(min_interval_ms),
            last_accepted_ms: None,
        }
    }

    /// Validate `candidate` and buffer it as the next tick's direction.
    ///
    /// `now_ms` is a host timestamp in milliseconds; only differences matter.
    pub fn request_direction(
        &mut self,
        state: &mut GameState,
        candidate: Direction,
        now_ms: f64,
    ) -> InputVerdict {
        let verdict = self.check(state, candidate, now_ms);
        if verdict.accepted() {
            state.pending_direction = candidate;
            self.last_accepted_ms = Some(now_ms);
        } else {
            log::trace!("Dropped {} input: {:?}", candidate.as_str(), verdict);
        }
        verdict
    }

    fn check(&self, state: &GameState, candidate: Direction, now_ms: f64) -> InputVerdict {
        if !state.phase.is_running() {
            return InputVerdict::NotRunning;
        }
        if let Some(last) = self.last_accepted_ms {
            if now_ms - last < self.min_interval_ms {
                return InputVerdict::RateLimited;
            }
        }
        // Compared against the committed heading, not the pending one: two quick
        // turns inside one tick can never fold the head back onto the neck
        if candidate.is_reversal_of(state.current_direction) {
            return InputVerdict::Reversal;
        }
        InputVerdict::Accepted
    }

    /// Forget the last accepted timestamp (new run)
    pub fn reset(&mut self) {
        self.last_accepted_ms = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::state::GamePhase;
    use glam::IVec2;

    fn running_state() -> GameState {
        let mut state = GameState::new(&Settings::default(), 11).unwrap();
        state.phase = GamePhase::Running;
        state
    }

    #[test]
    fn test_reversal_rejected() {
        let mut state = running_state();
        let mut input = InputReconciler::new(50);
        assert_eq!(
            input.request_direction(&mut state, Direction::Left, 1000.0),
            InputVerdict::Reversal
        );
        assert_eq!(state.pending_direction, Direction::Right);
    }

    #[test]
    fn test_rejected_request_does_not_consume_interval() {
        let mut state = running_state();
        let mut input = InputReconciler::new(50);
        input.request_direction(&mut state, Direction::Left, 1000.0);
        assert!(input.request_direction(&mut state, Direction::Up, 1010.0).accepted());
    }

    #[test]
    fn test_rate_limit_keeps_first() {
        let mut state = running_state();
        let mut input = InputReconciler::new(50);
        assert!(input.request_direction(&mut state, Direction::Up, 1000.0).accepted());
        assert_eq!(
            input.request_direction(&mut state, Direction::Down, 1049.0),
            InputVerdict::RateLimited
        );
        assert_eq!(state.pending_direction, Direction::Up);

        // Interval elapsed
        assert!(input.request_direction(&mut state, Direction::Down, 1050.0).accepted());
        assert_eq!(state.pending_direction, Direction::Down);
    }

    #[test]
    fn test_dropped_when_not_running() {
        let mut input = InputReconciler::new(0);
        let mut state = GameState::new(&Settings::default(), 11).unwrap();
        for phase in [GamePhase::Idle, GamePhase::Paused, GamePhase::Ended] {
            state.phase = phase;
            assert_eq!(
                input.request_direction(&mut state, Direction::Up, 0.0),
                InputVerdict::NotRunning
            );
            assert_eq!(state.pending_direction, Direction::Right);
        }
    }

    #[test]
    fn test_reversal_checked_against_committed_heading() {
        let mut state = running_state();
        let mut input = InputReconciler::new(0);
        // Pending Up does not make Left legal while the snake still heads Right
        assert!(input.request_direction(&mut state, Direction::Up, 0.0).accepted());
        assert_eq!(
            input.request_direction(&mut state, Direction::Left, 1.0),
            InputVerdict::Reversal
        );
        assert_eq!(state.pending_direction, Direction::Up);
        // Down replaces the pending Up since it is perpendicular to committed Right
        assert!(input.request_direction(&mut state, Direction::Down, 2.0).accepted());
        assert_eq!(state.pending_direction, Direction::Down);
    }

    #[test]
    fn test_same_direction_accepted() {
        let mut state = running_state();
        let mut input = InputReconciler::new(50);
        assert!(input.request_direction(&mut state, Direction::Right, 0.0).accepted());
    }

    #[test]
    fn test_heading_up_rejects_down() {
        let mut state = running_state();
        state.place_snake(
            [IVec2::new(5, 5), IVec2::new(5, 6), IVec2::new(5, 7)],
            Direction::Up,
        );
        let mut input = InputReconciler::new(50);
        assert_eq!(
            input.request_direction(&mut state, Direction::Down, 0.0),
            InputVerdict::Reversal
        );
        assert_eq!(state.pending_direction, Direction::Up);
    }

    #[test]
    fn test_reset_clears_interval() {
        let mut state = running_state();
        let mut input = InputReconciler::new(1000);
        assert!(input.request_direction(&mut state, Direction::Up, 0.0).accepted());
        input.reset();
        assert!(input.request_direction(&mut state, Direction::Down, 1.0).accepted());
    }
}
