//! Snake Arcade - A grid snake game with a fixed-tick core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, input reconciliation)
//! - `game`: Session lifecycle bound to host clock and renderer
//! - `platform`: Host collaborator traits and input sources
//! - `settings`: Board size, speed and input pacing

pub mod error;
pub mod game;
pub mod platform;
pub mod settings;
pub mod sim;

pub use error::ConfigError;
pub use game::Game;
pub use settings::{Settings, SpeedPreset};

/// Game configuration constants
pub mod consts {
    /// Default board is square, 20 cells a side
    pub const DEFAULT_GRID_SIZE: u32 = 20;
    /// Default tick period (ms)
    pub const DEFAULT_TICK_MS: u32 = 100;
    /// Direction requests closer than this are dropped (ms)
    pub const DEFAULT_MIN_INPUT_INTERVAL_MS: u32 = 50;
    /// Points per food
    pub const FOOD_REWARD: u64 = 10;
    /// Upper bound on swipe travel needed to register (px)
    pub const SWIPE_THRESHOLD_MAX: f32 = 50.0;
}

/// Format whole seconds as `MM:SS` (minutes keep counting past 99)
pub fn format_time(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
