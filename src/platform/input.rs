//! Input sources
//!
//! Each source turns its own raw events into a [`Direction`]. None of them
//! validate anything; that is the reconciler's job.

use glam::Vec2;

use crate::consts::SWIPE_THRESHOLD_MAX;
use crate::sim::Direction;

/// Maps a raw host event to a direction request
pub trait InputSource {
    type Event: ?Sized;

    /// Direction requested by `event`, if it is a directional event at all
    fn direction_for(&mut self, event: &Self::Event) -> Option<Direction>;

    /// Short name for logs
    fn name(&self) -> &'static str;
}

/// WASD (any case) and arrow keys, by `KeyboardEvent.key` value
#[derive(Debug, Clone, Copy, Default)]
pub struct Keyboard;

impl InputSource for Keyboard {
    type Event = str;

    fn direction_for(&mut self, key: &str) -> Option<Direction> {
        match key {
            "ArrowUp" => Some(Direction::Up),
            "ArrowDown" => Some(Direction::Down),
            "ArrowLeft" => Some(Direction::Left),
            "ArrowRight" => Some(Direction::Right),
            _ => match key.to_lowercase().as_str() {
                "w" => Some(Direction::Up),
                "s" => Some(Direction::Down),
                "a" => Some(Direction::Left),
                "d" => Some(Direction::Right),
                _ => None,
            },
        }
    }

    fn name(&self) -> &'static str {
        "keyboard"
    }
}

/// On-screen arrow buttons, by their `data-direction` attribute
#[derive(Debug, Clone, Copy, Default)]
pub struct ButtonPad;

impl InputSource for ButtonPad {
    type Event = str;

    fn direction_for(&mut self, attr: &str) -> Option<Direction> {
        Direction::ALL.into_iter().find(|d| d.as_str() == attr)
    }

    fn name(&self) -> &'static str {
        "buttons"
    }
}

/// Touch phases a swipe is built from (client coordinates, px)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SwipeEvent {
    Start(Vec2),
    End(Vec2),
}

/// Swipe detector: the dominant axis of start→end picks the direction
#[derive(Debug, Clone)]
pub struct Swipe {
    threshold: f32,
    start: Option<Vec2>,
}

impl Swipe {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            start: None,
        }
    }

    /// Threshold for a square canvas of `canvas_size` px
    pub fn for_canvas(canvas_size: f32) -> Self {
        Self::new(swipe_threshold(canvas_size))
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }
}

/// Minimum travel for a swipe to count: a tenth of the canvas, capped
pub fn swipe_threshold(canvas_size: f32) -> f32 {
    (canvas_size / 10.0).min(SWIPE_THRESHOLD_MAX)
}

impl InputSource for Swipe {
    type Event = SwipeEvent;

    fn direction_for(&mut self, event: &SwipeEvent) -> Option<Direction> {
        match *event {
            SwipeEvent::Start(pos) => {
                self.start = Some(pos);
                None
            }
            SwipeEvent::End(pos) => {
                let delta = pos - self.start.take()?;
                if delta.x.abs() > delta.y.abs() {
                    if delta.x < -self.threshold {
                        Some(Direction::Left)
                    } else if delta.x > self.threshold {
                        Some(Direction::Right)
                    } else {
                        None
                    }
                } else if delta.y < -self.threshold {
                    Some(Direction::Up)
                } else if delta.y > self.threshold {
                    Some(Direction::Down)
                } else {
                    None
                }
            }
        }
    }

    fn name(&self) -> &'static str {
        "swipe"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyboard_mapping() {
        let mut kb = Keyboard;
        assert_eq!(kb.direction_for("ArrowUp"), Some(Direction::Up));
        assert_eq!(kb.direction_for("W"), Some(Direction::Up));
        assert_eq!(kb.direction_for("a"), Some(Direction::Left));
        assert_eq!(kb.direction_for("D"), Some(Direction::Right));
        assert_eq!(kb.direction_for("s"), Some(Direction::Down));
        assert_eq!(kb.direction_for("Escape"), None);
        assert_eq!(kb.direction_for("arrowup"), None);
    }

    #[test]
    fn test_button_mapping() {
        let mut pad = ButtonPad;
        assert_eq!(pad.direction_for("left"), Some(Direction::Left));
        assert_eq!(pad.direction_for("down"), Some(Direction::Down));
        assert_eq!(pad.direction_for("diagonal"), None);
    }

    #[test]
    fn test_swipe_threshold_caps_at_50() {
        assert_eq!(swipe_threshold(300.0), 30.0);
        assert_eq!(swipe_threshold(500.0), 50.0);
        assert_eq!(swipe_threshold(900.0), 50.0);
    }

    #[test]
    fn test_swipe_dominant_axis() {
        let mut swipe = Swipe::new(30.0);
        assert_eq!(swipe.direction_for(&SwipeEvent::Start(Vec2::new(100.0, 100.0))), None);
        assert_eq!(
            swipe.direction_for(&SwipeEvent::End(Vec2::new(40.0, 120.0))),
            Some(Direction::Left)
        );

        swipe.direction_for(&SwipeEvent::Start(Vec2::new(100.0, 100.0)));
        assert_eq!(
            swipe.direction_for(&SwipeEvent::End(Vec2::new(110.0, 20.0))),
            Some(Direction::Up)
        );
    }

    #[test]
    fn test_short_swipe_ignored() {
        let mut swipe = Swipe::new(30.0);
        swipe.direction_for(&SwipeEvent::Start(Vec2::ZERO));
        assert_eq!(swipe.direction_for(&SwipeEvent::End(Vec2::new(20.0, 5.0))), None);
    }

    #[test]
    fn test_end_without_start_ignored() {
        let mut swipe = Swipe::new(30.0);
        assert_eq!(swipe.direction_for(&SwipeEvent::End(Vec2::new(200.0, 0.0))), None);
    }
}
