//! Game session
//!
//! Owns the simulation state and wires it to the host's clock and renderer.
//! Lifecycle calls from the wrong phase are ignored and return `false`.

use crate::error::ConfigError;
use crate::platform::{Clock, InputSource, Renderer};
use crate::settings::Settings;
use crate::sim::{Direction, GamePhase, GameState, InputReconciler, InputVerdict, TickOutcome, tick};

pub struct Game<C: Clock, R: Renderer> {
    settings: Settings,
    state: GameState,
    input: InputReconciler,
    clock: C,
    renderer: R,
}

impl<C: Clock, R: Renderer> Game<C, R> {
    /// Build an idle game and draw the opening board
    pub fn new(settings: Settings, seed: u64, clock: C, renderer: R) -> Result<Self, ConfigError> {
        let state = GameState::new(&settings, seed)?;
        let input = InputReconciler::new(settings.min_input_interval_ms);
        let mut game = Self {
            settings,
            state,
            input,
            clock,
            renderer,
        };
        log::info!(
            "Game ready: {}x{} grid, {} ms tick, seed {}",
            game.state.grid.width,
            game.state.grid.height,
            game.settings.tick_ms,
            seed
        );
        game.renderer.render(&game.state);
        Ok(game)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Begin a run. From `Ended` this lays out a fresh board first.
    pub fn start(&mut self) -> bool {
        match self.state.phase {
            GamePhase::Idle => {}
            GamePhase::Ended => self.reset(),
            phase => {
                log::debug!("start ignored while {:?}", phase);
                return false;
            }
        }
        self.state.phase = GamePhase::Running;
        self.clock.start(self.settings.tick_ms);
        log::info!("Game started (seed {})", self.state.seed);
        true
    }

    pub fn pause(&mut self) -> bool {
        if self.state.phase != GamePhase::Running {
            log::debug!("pause ignored while {:?}", self.state.phase);
            return false;
        }
        self.clock.stop();
        self.state.phase = GamePhase::Paused;
        log::info!("Game paused");
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.state.phase != GamePhase::Paused {
            log::debug!("resume ignored while {:?}", self.state.phase);
            return false;
        }
        self.state.phase = GamePhase::Running;
        self.clock.start(self.settings.tick_ms);
        log::info!("Game resumed");
        true
    }

    /// Stop the clock and lay out a fresh idle board (valid from any phase)
    pub fn reset(&mut self) {
        self.clock.stop();
        let seed = self.state.next_seed();
        // Settings were validated when this game was built
        if let Ok(state) = GameState::new(&self.settings, seed) {
            self.state = state;
        }
        self.input.reset();
        log::info!("Game reset (seed {})", seed);
        self.renderer.render(&self.state);
    }

    /// Buffer a direction for the next tick
    pub fn request_direction(&mut self, direction: Direction, now_ms: f64) -> InputVerdict {
        self.input.request_direction(&mut self.state, direction, now_ms)
    }

    /// Map a raw event through `source` and request its direction, if any
    pub fn handle_input<S: InputSource>(
        &mut self,
        source: &mut S,
        event: &S::Event,
        now_ms: f64,
    ) -> Option<InputVerdict> {
        let direction = source.direction_for(event)?;
        log::trace!("{} requested {}", source.name(), direction.as_str());
        Some(self.request_direction(direction, now_ms))
    }

    /// Clock callback: advance one step and redraw
    pub fn on_tick(&mut self) -> TickOutcome {
        let outcome = tick(&mut self.state);
        if outcome == TickOutcome::Idle {
            return outcome;
        }
        if outcome.ended() {
            self.clock.stop();
            log::info!(
                "Game over: {:?}, score {}, time {}",
                outcome,
                self.state.score,
                crate::format_time(self.state.elapsed_secs())
            );
        }
        self.renderer.render(&self.state);
        outcome
    }
}
