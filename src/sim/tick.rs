//! Fixed timestep simulation tick
//!
//! Advances the snake exactly one cell per call.

use rand::Rng;

use super::grid::Position;
use super::state::{GamePhase, GameState};

/// Rejection-sampling attempts before falling back to a free-cell scan
const FOOD_SAMPLE_ATTEMPTS: usize = 64;

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    Wall,
    Body,
}

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not running; nothing changed
    Idle,
    /// Moved one cell
    Moved,
    /// Moved onto food and grew
    Ate,
    /// Run ended on a collision, state frozen at the pre-move body
    Collided(Collision),
    /// Grew into the last free cell; nowhere left for food
    BoardFull,
}

impl TickOutcome {
    pub fn ended(&self) -> bool {
        matches!(self, TickOutcome::Collided(_) | TickOutcome::BoardFull)
    }
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState) -> TickOutcome {
    if state.phase != GamePhase::Running {
        return TickOutcome::Idle;
    }

    // Commit the buffered turn
    state.current_direction = state.pending_direction;
    let new_head = state.head() + state.current_direction.delta();

    if !state.grid.contains(new_head) {
        log::info!("Hit wall at {:?}, final score {}", new_head, state.score);
        state.phase = GamePhase::Ended;
        return TickOutcome::Collided(Collision::Wall);
    }

    // Checked before the tail moves: stepping into the current tail cell is fatal
    if state.occupies(new_head) {
        log::info!("Hit own body at {:?}, final score {}", new_head, state.score);
        state.phase = GamePhase::Ended;
        return TickOutcome::Collided(Collision::Body);
    }

    state.snake.push_front(new_head);
    state.time_ticks += 1;
    log::trace!("Tick {}: head {:?}", state.time_ticks, new_head);

    if new_head != state.food {
        state.snake.pop_back();
        return TickOutcome::Moved;
    }

    state.score += state.food_reward;
    match generate_food(state) {
        Some(food) => {
            state.food = food;
            TickOutcome::Ate
        }
        None => {
            log::info!("Board full at length {}, final score {}", state.len(), state.score);
            state.phase = GamePhase::Ended;
            TickOutcome::BoardFull
        }
    }
}

/// Pick a random cell not covered by the snake, or `None` if the board is full
pub fn generate_food(state: &mut GameState) -> Option<Position> {
    if state.len() >= state.grid.cell_count() {
        return None;
    }

    let (width, height) = (state.grid.width, state.grid.height);
    for _ in 0..FOOD_SAMPLE_ATTEMPTS {
        let candidate = Position::new(
            state.rng.random_range(0..width),
            state.rng.random_range(0..height),
        );
        if !state.occupies(candidate) {
            log::debug!("Food placed at {:?}", candidate);
            return Some(candidate);
        }
    }

    // Crowded board: choose uniformly among the remaining free cells
    let free: Vec<Position> = state.grid.cells().filter(|c| !state.occupies(*c)).collect();
    let food = free[state.rng.random_range(0..free.len())];
    log::debug!("Food placed at {:?} ({} free cells)", food, free.len());
    Some(food)
}
