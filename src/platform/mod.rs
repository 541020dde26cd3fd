//! Platform abstraction layer
//!
//! The simulation never owns a timer or a screen. Hosts provide:
//! - A periodic tick source (`Clock`)
//! - A view of the state after each change (`Renderer`)
//! - Raw input events, mapped to directions by `input`

pub mod input;

pub use input::{ButtonPad, InputSource, Keyboard, Swipe, SwipeEvent};

use crate::sim::GameState;

/// Periodic tick source driven by the host
pub trait Clock {
    /// Begin calling back every `period_ms`. Restarting replaces any running timer.
    fn start(&mut self, period_ms: u32);
    /// Stop calling back. Must be immediate and safe to call when already stopped.
    fn stop(&mut self);
    fn is_running(&self) -> bool;
}

/// Receives a read-only view after every tick and reset
pub trait Renderer {
    fn render(&mut self, state: &GameState);
}

/// Clock whose ticks are delivered by hand (tests, headless runs)
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    period_ms: Option<u32>,
    pub starts: u32,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Period of the running timer, if any
    pub fn period_ms(&self) -> Option<u32> {
        self.period_ms
    }
}

impl Clock for ManualClock {
    fn start(&mut self, period_ms: u32) {
        self.period_ms = Some(period_ms);
        self.starts += 1;
    }

    fn stop(&mut self) {
        self.period_ms = None;
    }

    fn is_running(&self) -> bool {
        self.period_ms.is_some()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_stop_is_idempotent() {
        let mut clock = ManualClock::new();
        clock.stop();
        assert!(!clock.is_running());

        clock.start(100);
        clock.stop();
        clock.stop();
        assert!(!clock.is_running());
        assert_eq!(clock.period_ms(), None);
        assert_eq!(clock.starts, 1);
    }

    #[test]
    fn test_manual_clock_restart_replaces_period() {
        let mut clock = ManualClock::new();
        clock.start(100);
        clock.start(70);
        assert_eq!(clock.period_ms(), Some(70));
    }
}
