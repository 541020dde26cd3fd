//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One cell per tick
//! - Seeded RNG only
//! - No rendering, timers or platform dependencies

pub mod grid;
pub mod input;
pub mod state;
pub mod tick;

pub use grid::{Direction, Grid, Position};
pub use input::{InputReconciler, InputVerdict};
pub use state::{GamePhase, GameState};
pub use tick::{Collision, TickOutcome, generate_food, tick};
