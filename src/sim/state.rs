//! Game state and core simulation types
//!
//! Everything a tick reads or writes lives here.

use std::collections::VecDeque;

use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::grid::{Direction, Grid, Position};
use super::tick::generate_food;
use crate::error::ConfigError;
use crate::settings::Settings;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Board laid out, waiting for start
    #[default]
    Idle,
    /// Clock running, input accepted
    Running,
    /// Clock suspended
    Paused,
    /// Snake hit a wall or itself
    Ended,
}

impl GamePhase {
    pub fn is_running(&self) -> bool {
        *self == GamePhase::Running
    }
}

/// Complete game state (deterministic given its seed and inputs)
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub(crate) seed: u64,
    /// Board bounds
    pub(crate) grid: Grid,
    /// Points per food
    pub(crate) food_reward: u64,
    /// Tick period the elapsed clock is measured in (ms)
    pub(crate) tick_ms: u32,
    /// Body cells, head first
    pub(crate) snake: VecDeque<Position>,
    pub(crate) food: Position,
    /// Direction applied on the most recent tick
    pub(crate) current_direction: Direction,
    /// Direction to commit on the next tick
    pub(crate) pending_direction: Direction,
    pub(crate) phase: GamePhase,
    pub(crate) score: u64,
    /// Ticks that moved the snake
    pub(crate) time_ticks: u64,
    /// Food placement RNG
    #[serde(skip)]
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Lay out a fresh board: one segment at the center heading right
    pub fn new(settings: &Settings, seed: u64) -> Result<Self, ConfigError> {
        settings.validate()?;
        let grid = Grid::new(
            i32::try_from(settings.grid_width)
                .map_err(|_| ConfigError::GridTooLarge(settings.grid_width))?,
            i32::try_from(settings.grid_height)
                .map_err(|_| ConfigError::GridTooLarge(settings.grid_height))?,
        );

        let mut state = Self {
            seed,
            grid,
            food_reward: settings.food_reward,
            tick_ms: settings.tick_ms,
            snake: VecDeque::from([grid.center()]),
            food: grid.center(),
            current_direction: Direction::Right,
            pending_direction: Direction::Right,
            phase: GamePhase::Idle,
            score: 0,
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
        };

        // Validated boards always have a free cell next to a single segment
        if let Some(food) = generate_food(&mut state) {
            state.food = food;
        }

        Ok(state)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    /// Body cells, head first (never empty)
    pub fn snake(&self) -> &VecDeque<Position> {
        &self.snake
    }

    pub fn food(&self) -> Position {
        self.food
    }

    /// Direction applied on the most recent tick
    pub fn current_direction(&self) -> Direction {
        self.current_direction
    }

    /// Direction the next tick will commit
    pub fn pending_direction(&self) -> Direction {
        self.pending_direction
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    pub fn head(&self) -> Position {
        self.snake[0]
    }

    pub fn len(&self) -> usize {
        self.snake.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snake.is_empty()
    }

    pub fn occupies(&self, pos: Position) -> bool {
        self.snake.contains(&pos)
    }

    /// Elapsed play time (ms); frozen while paused or ended
    pub fn elapsed_ms(&self) -> u64 {
        self.time_ticks * u64::from(self.tick_ms)
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_ms() / 1000
    }

    /// Seed for the run that follows this one
    pub(crate) fn next_seed(&mut self) -> u64 {
        self.rng.next_u64()
    }

    /// Replace the body (head first) and heading to stage a scenario.
    /// Callers pass a non-empty, in-bounds body without repeats.
    pub(crate) fn place_snake(&mut self, segments: impl IntoIterator<Item = Position>, heading: Direction) {
        self.snake = segments.into_iter().collect();
        self.current_direction = heading;
        self.pending_direction = heading;
    }

    /// JSON snapshot for hosts that draw the HUD themselves
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::IVec2;

    #[test]
    fn test_new_state_layout() {
        let state = GameState::new(&Settings::default(), 7).unwrap();
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.snake, VecDeque::from([IVec2::new(10, 10)]));
        assert_eq!(state.current_direction, Direction::Right);
        assert_eq!(state.pending_direction, Direction::Right);
        assert_eq!(state.score, 0);
        assert_eq!(state.elapsed_ms(), 0);
        assert!(state.grid.contains(state.food));
        assert!(!state.occupies(state.food));
    }

    #[test]
    fn test_same_seed_same_food() {
        let a = GameState::new(&Settings::default(), 42).unwrap();
        let b = GameState::new(&Settings::default(), 42).unwrap();
        assert_eq!(a.food, b.food);
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let settings = Settings {
            grid_height: 0,
            ..Default::default()
        };
        assert!(GameState::new(&settings, 1).is_err());
    }

    #[test]
    fn test_two_cell_board_places_food_beside_snake() {
        let settings = Settings {
            grid_width: 2,
            grid_height: 1,
            ..Default::default()
        };
        let state = GameState::new(&settings, 3).unwrap();
        assert_eq!(state.head(), IVec2::new(1, 0));
        assert_eq!(state.food, IVec2::new(0, 0));
    }

    #[test]
    fn test_json_snapshot_has_core_fields() {
        let state = GameState::new(&Settings::default(), 9).unwrap();
        let json: serde_json::Value = serde_json::from_str(&state.to_json().unwrap()).unwrap();
        assert_eq!(json["score"], 0);
        assert_eq!(json["phase"], "Idle");
        assert_eq!(json["snake"][0], serde_json::json!([10, 10]));
        assert!(json.get("rng").is_none());
    }

    #[test]
    fn test_read_only_view_matches_state() {
        let mut state = GameState::new(&Settings::default(), 21).unwrap();
        state.place_snake([IVec2::new(5, 5), IVec2::new(5, 6)], Direction::Up);
        assert_eq!(state.snake().len(), 2);
        assert_eq!(state.head(), IVec2::new(5, 5));
        assert_eq!(state.current_direction(), Direction::Up);
        assert_eq!(state.pending_direction(), Direction::Up);
        assert_eq!(state.phase(), GamePhase::Idle);
        assert_eq!(state.seed(), 21);
        assert_eq!(state.grid(), Grid::new(20, 20));
        assert!(!state.occupies(state.food()));
        assert_eq!(state.score(), 0);
        assert_eq!(state.time_ticks(), 0);
    }
}
