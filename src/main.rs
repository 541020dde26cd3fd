//! Snake Arcade entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, Document, Element, HtmlCanvasElement, KeyboardEvent, TouchEvent};

    use snake_arcade::platform::{ButtonPad, Clock, Keyboard, Renderer, Swipe, SwipeEvent};
    use snake_arcade::sim::{GamePhase, GameState};
    use snake_arcade::{Game, Settings, format_time};

    type SharedGame = Rc<RefCell<Game<IntervalClock, CanvasRenderer>>>;

    /// `setInterval`-backed tick source
    struct IntervalClock {
        /// Filled in once the game exists (the callback needs the game)
        callback: Rc<RefCell<Option<js_sys::Function>>>,
        handle: Option<i32>,
    }

    impl Clock for IntervalClock {
        fn start(&mut self, period_ms: u32) {
            self.stop();
            let Some(window) = web_sys::window() else {
                return;
            };
            let callback = self.callback.borrow();
            let Some(callback) = callback.as_ref() else {
                log::warn!("Tick callback not bound yet");
                return;
            };
            let timeout = i32::try_from(period_ms).unwrap_or(i32::MAX);
            match window.set_interval_with_callback_and_timeout_and_arguments_0(callback, timeout) {
                Ok(handle) => self.handle = Some(handle),
                Err(e) => log::error!("setInterval failed: {:?}", e),
            }
        }

        fn stop(&mut self) {
            if let Some(handle) = self.handle.take() {
                if let Some(window) = web_sys::window() {
                    window.clear_interval_with_handle(handle);
                }
            }
        }

        fn is_running(&self) -> bool {
            self.handle.is_some()
        }
    }

    /// Canvas 2D board plus DOM HUD
    struct CanvasRenderer {
        ctx: CanvasRenderingContext2d,
        document: Document,
        size: f64,
    }

    impl CanvasRenderer {
        fn draw_grid(&self, state: &GameState, cell: f64) {
            self.ctx.set_fill_style_str("#1a1a1a");
            self.ctx.fill_rect(0.0, 0.0, self.size, self.size);

            self.ctx.set_stroke_style_str("#333");
            self.ctx.set_line_width(0.5);
            for i in 0..=state.grid().width.max(state.grid().height) {
                let pos = f64::from(i) * cell;
                self.ctx.begin_path();
                self.ctx.move_to(pos, 0.0);
                self.ctx.line_to(pos, self.size);
                self.ctx.stroke();

                self.ctx.begin_path();
                self.ctx.move_to(0.0, pos);
                self.ctx.line_to(self.size, pos);
                self.ctx.stroke();
            }
        }

        fn draw_snake(&self, state: &GameState, cell: f64) {
            for (i, seg) in state.snake().iter().enumerate() {
                let (x, y) = (f64::from(seg.x) * cell, f64::from(seg.y) * cell);
                self.ctx.set_fill_style_str(if i == 0 { "#00ff00" } else { "#00cc00" });
                self.ctx.fill_rect(x + 1.0, y + 1.0, cell - 2.0, cell - 2.0);
            }

            // Eyes on head
            let head = state.head();
            let (x, y) = (f64::from(head.x) * cell, f64::from(head.y) * cell);
            let eye = (cell / 10.0).floor().max(1.0);
            let offset = (cell / 3.0).floor();
            self.ctx.set_fill_style_str("white");
            for ex in [x + offset, x + cell - offset] {
                self.ctx.begin_path();
                let _ = self.ctx.arc(ex, y + offset, eye, 0.0, std::f64::consts::TAU);
                self.ctx.fill();
            }
        }

        fn draw_food(&self, state: &GameState, cell: f64) {
            let cx = f64::from(state.food().x) * cell + cell / 2.0;
            let cy = f64::from(state.food().y) * cell + cell / 2.0;

            self.ctx.set_fill_style_str("#ff0000");
            self.ctx.begin_path();
            let _ = self.ctx.arc(cx, cy, (cell / 2.0 - 2.0).max(1.0), 0.0, std::f64::consts::TAU);
            self.ctx.fill();

            self.ctx.set_stroke_style_str("#ffff00");
            self.ctx.set_line_width(2.0);
            self.ctx.begin_path();
            let _ = self.ctx.arc(cx, cy, (cell / 2.0 - 4.0).max(1.0), 0.0, std::f64::consts::TAU);
            self.ctx.stroke();
        }

        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.document.get_element_by_id(id) {
                el.set_text_content(Some(text));
            }
        }

        fn set_enabled(&self, id: &str, enabled: bool) {
            if let Some(el) = self.document.get_element_by_id(id) {
                let _ = if enabled {
                    el.remove_attribute("disabled")
                } else {
                    el.set_attribute("disabled", "")
                };
            }
        }

        fn update_hud(&self, state: &GameState) {
            let time = format_time(state.elapsed_secs());
            self.set_text("score", &state.score().to_string());
            self.set_text("timer", &time);

            let phase = state.phase();
            self.set_enabled("startBtn", matches!(phase, GamePhase::Idle | GamePhase::Ended));
            self.set_enabled("pauseBtn", phase == GamePhase::Running);
            self.set_enabled("resumeBtn", phase == GamePhase::Paused);

            if phase == GamePhase::Ended {
                self.set_text("finalScore", &state.score().to_string());
                self.set_text("finalTime", &time);
                set_hidden(&self.document, "gameOverModal", false);
            }
        }
    }

    impl Renderer for CanvasRenderer {
        fn render(&mut self, state: &GameState) {
            let cell = (self.size / f64::from(state.grid().width.max(state.grid().height))).floor();
            self.draw_grid(state, cell);
            self.draw_snake(state, cell);
            self.draw_food(state, cell);
            self.update_hud(state);
        }
    }

    fn set_hidden(document: &Document, id: &str, hidden: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let classes = el.class_list();
            let _ = if hidden {
                classes.add_1("hidden")
            } else {
                classes.remove_1("hidden")
            };
        }
    }

    /// Monotonic input timestamp (ms); wall-clock jumps must not stall the rate limiter
    fn now_ms() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or_else(js_sys::Date::now)
    }

    /// Square canvas that fits the viewport (200..=500 px)
    fn fit_canvas(window: &web_sys::Window, canvas: &HtmlCanvasElement) -> f64 {
        let inner = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(500.0);
        let max_w = (inner(window.inner_width()) - 40.0).min(500.0).max(200.0);
        let max_h = (inner(window.inner_height()) * 0.6).min(500.0).max(200.0);
        let size = max_w.min(max_h).floor();
        canvas.set_width(size as u32);
        canvas.set_height(size as u32);
        log::info!("Canvas set to {}x{}", size, size);
        size
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Logger init failed: {}", e).into());
        }

        log::info!("Snake Arcade starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or("no canvas")?
            .dyn_into()?;
        let size = fit_canvas(&window, &canvas);
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;

        let callback = Rc::new(RefCell::new(None));
        let clock = IntervalClock {
            callback: callback.clone(),
            handle: None,
        };
        let renderer = CanvasRenderer {
            ctx,
            document: document.clone(),
            size,
        };

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let game: SharedGame = Rc::new(RefCell::new(
            Game::new(settings, seed, clock, renderer).map_err(|e| JsValue::from_str(&e.to_string()))?,
        ));

        // Bind the tick callback now that the game exists
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut()>::new(move || {
                game.borrow_mut().on_tick();
            });
            *callback.borrow_mut() = Some(closure.as_ref().unchecked_ref::<js_sys::Function>().clone());
            closure.forget();
        }

        setup_input_handlers(&document, size, game.clone())?;
        setup_lifecycle_buttons(&document, game.clone());
        setup_auto_pause(&document, game);

        log::info!("Snake Arcade ready!");
        Ok(())
    }

    fn setup_input_handlers(document: &Document, canvas_size: f64, game: SharedGame) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;

        // Keyboard (WASD + arrows)
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                let handled = game
                    .borrow_mut()
                    .handle_input(&mut Keyboard, key.as_str(), now_ms());
                if handled.is_some() {
                    event.prevent_default();
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // On-screen arrow buttons
        let buttons = document.query_selector_all(".mobile-btn")?;
        for i in 0..buttons.length() {
            let Some(button) = buttons.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
                continue;
            };
            let Some(dir) = button.get_attribute("data-direction") else {
                continue;
            };
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::MouseEvent| {
                event.prevent_default();
                game.borrow_mut()
                    .handle_input(&mut ButtonPad, dir.as_str(), now_ms());
            });
            button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Swipes anywhere on the page
        let swipe = Rc::new(RefCell::new(Swipe::for_canvas(canvas_size as f32)));
        for (name, is_start) in [("touchstart", true), ("touchend", false)] {
            let game = game.clone();
            let swipe = swipe.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                let Some(touch) = event.changed_touches().get(0) else {
                    return;
                };
                let pos = Vec2::new(touch.client_x() as f32, touch.client_y() as f32);
                let swipe_event = if is_start {
                    SwipeEvent::Start(pos)
                } else {
                    SwipeEvent::End(pos)
                };
                game.borrow_mut().handle_input(
                    &mut *swipe.borrow_mut(),
                    &swipe_event,
                    now_ms(),
                );
            });
            document.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn on_click(document: &Document, id: &str, mut handler: impl FnMut() + 'static) {
        let Some(btn) = document.get_element_by_id(id) else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| handler());
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_lifecycle_buttons(document: &Document, game: SharedGame) {
        {
            let game = game.clone();
            on_click(document, "startBtn", move || {
                game.borrow_mut().start();
            });
        }
        {
            let game = game.clone();
            on_click(document, "pauseBtn", move || {
                game.borrow_mut().pause();
            });
        }
        {
            let game = game.clone();
            on_click(document, "resumeBtn", move || {
                game.borrow_mut().resume();
            });
        }
        {
            let game = game.clone();
            let doc = document.clone();
            on_click(document, "resetBtn", move || {
                game.borrow_mut().reset();
                set_hidden(&doc, "gameOverModal", true);
            });
        }
        {
            let doc = document.clone();
            on_click(document, "playAgainBtn", move || {
                set_hidden(&doc, "gameOverModal", true);
                game.borrow_mut().start();
            });
        }
        {
            let doc = document.clone();
            on_click(document, "closeModalBtn", move || {
                set_hidden(&doc, "gameOverModal", true);
            });
        }
    }

    fn setup_auto_pause(document: &Document, game: SharedGame) {
        let document_clone = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if document_clone.visibility_state() == web_sys::VisibilityState::Hidden
                && game.borrow_mut().pause()
            {
                log::info!("Auto-paused (tab hidden)");
            }
        });
        let _ = document.add_event_listener_with_callback(
            "visibilitychange",
            closure.as_ref().unchecked_ref(),
        );
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::Path;

    use snake_arcade::platform::{Clock, ManualClock, Renderer};
    use snake_arcade::sim::{Direction, GameState};
    use snake_arcade::{ConfigError, Game, Settings, format_time};

    /// Hard stop for the headless run
    const MAX_TICKS: u64 = 10_000;

    /// Logs each frame and keeps the latest board as text
    #[derive(Default)]
    struct TextRenderer {
        board: String,
    }

    impl Renderer for TextRenderer {
        fn render(&mut self, state: &GameState) {
            log::debug!(
                "[{}] score {} len {} head {:?}",
                format_time(state.elapsed_secs()),
                state.score(),
                state.len(),
                state.head()
            );
            self.board = state
                .grid()
                .cells()
                .map(|cell| {
                    let glyph = if cell == state.head() {
                        '@'
                    } else if state.occupies(cell) {
                        'o'
                    } else if cell == state.food() {
                        '*'
                    } else {
                        '.'
                    };
                    if cell.x == state.grid().width - 1 {
                        format!("{glyph}\n")
                    } else {
                        glyph.to_string()
                    }
                })
                .collect();
        }
    }

    /// Greedy demo input: the safe turn that closes the distance to food
    fn steer(state: &GameState) -> Direction {
        Direction::ALL
            .into_iter()
            .filter(|d| !d.is_reversal_of(state.current_direction()))
            .filter(|d| {
                let next = state.head() + d.delta();
                state.grid().contains(next) && !state.occupies(next)
            })
            .min_by_key(|d| {
                let to_food = state.food() - (state.head() + d.delta());
                to_food.x.abs() + to_food.y.abs()
            })
            .unwrap_or(state.current_direction())
    }

    pub fn run() -> Result<(), ConfigError> {
        let mut args = std::env::args().skip(1);
        let settings = match args.next() {
            Some(path) => Settings::load_from(Path::new(&path))?,
            None => Settings::default(),
        };
        let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(0x5eed);

        let tick_ms = f64::from(settings.tick_ms);
        let mut game = Game::new(settings, seed, ManualClock::new(), TextRenderer::default())?;
        game.start();

        let mut ticks = 0;
        while game.clock().is_running() && ticks < MAX_TICKS {
            let now = ticks as f64 * tick_ms;
            let direction = steer(game.state());
            game.request_direction(direction, now);
            game.on_tick();
            ticks += 1;
        }

        let state = game.state();
        println!("{}", game.renderer().board);
        println!(
            "Phase {:?} | score {} | length {} | time {}",
            state.phase(),
            state.score(),
            state.len(),
            format_time(state.elapsed_secs())
        );
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Snake Arcade (native) starting...");
    log::info!("Native mode runs a headless demo - run with `trunk serve` for the web version");

    if let Err(e) = native::run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
