//! Drift Rocks entry point
//!
//! Handles platform-specific initialization and runs the game loop.
//! - wasm32: canvas 2D renderer driven by `requestAnimationFrame`
//! - native: headless scripted run that logs events and prints the final frame

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, FocusEvent, HtmlCanvasElement, KeyboardEvent};

    use drift_rocks::platform::{FrameClock, Key, KeyboardState};
    use drift_rocks::sim::{GameEvent, GameState, tick};
    use drift_rocks::{Renderer, Snapshot, Tuning};
    use glam::Vec2;

    const BACKGROUND_COLOR: &str = "black";
    const SHOT_COLOR: &str = "green";
    const SHIP_COLOR: &str = "blue";
    const ROCK_COLOR: &str = "red";
    const TEXT_COLOR: &str = "white";

    struct CanvasRenderer {
        ctx: CanvasRenderingContext2d,
    }

    impl CanvasRenderer {
        fn fill_circle(&self, center: Vec2, radius: f32) {
            self.ctx.begin_path();
            let arc = self.ctx.arc(
                center.x as f64,
                center.y as f64,
                radius as f64,
                0.0,
                std::f64::consts::TAU,
            );
            if arc.is_ok() {
                self.ctx.fill();
            }
        }
    }

    impl Renderer for CanvasRenderer {
        fn render(&mut self, snapshot: &Snapshot) {
            let ctx = &self.ctx;
            let (w, h) = (snapshot.width as f64, snapshot.height as f64);

            ctx.set_fill_style_str(BACKGROUND_COLOR);
            ctx.fill_rect(0.0, 0.0, w, h);

            ctx.set_fill_style_str(SHOT_COLOR);
            for &pos in &snapshot.projectiles {
                self.fill_circle(pos, snapshot.shot_radius);
            }

            let [nose, starboard, port] = snapshot.ship_shape().points();
            ctx.set_fill_style_str(SHIP_COLOR);
            ctx.begin_path();
            ctx.move_to(nose.x as f64, nose.y as f64);
            ctx.line_to(starboard.x as f64, starboard.y as f64);
            ctx.line_to(port.x as f64, port.y as f64);
            ctx.close_path();
            ctx.fill();

            ctx.set_fill_style_str(ROCK_COLOR);
            for &pos in &snapshot.obstacles {
                self.fill_circle(pos, snapshot.obstacle_radius);
            }

            if let Some(prompt) = snapshot.prompt() {
                ctx.set_fill_style_str(TEXT_COLOR);
                ctx.set_font("24px sans-serif");
                ctx.set_text_align("center");
                let _ = ctx.fill_text(&prompt, w / 2.0, h / 2.0 - 60.0);
            }
        }
    }

    /// Game instance holding all state
    struct Game {
        state: GameState,
        keys: KeyboardState,
        clock: FrameClock,
        renderer: CanvasRenderer,
    }

    impl Game {
        /// Advance one frame and draw it
        fn frame(&mut self, time: f64) {
            let dt = self.clock.tick(time);
            let intent = self.keys.intent();
            tick(&mut self.state, &intent, dt);

            for event in &self.state.events {
                match event {
                    GameEvent::LevelStarted { level } => log::info!("Level {} live", level),
                    GameEvent::ObstacleDestroyed { .. } => log::info!(
                        "Rock destroyed, {} left",
                        self.state.obstacles.len()
                    ),
                    GameEvent::ShotFired { .. } => {}
                }
            }

            let snapshot = self.state.snapshot();
            self.renderer.render(&snapshot);
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Drift Rocks starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let body = document.body().ok_or("no body")?;

        let tuning = Tuning::default();

        let canvas: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
        canvas.set_width(tuning.plane_width as u32);
        canvas.set_height(tuning.plane_height as u32);
        body.append_child(&canvas)?;

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;

        let seed = js_sys::Date::now() as u64;
        let state = GameState::new(seed, tuning).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let game = Rc::new(RefCell::new(Game {
            state,
            keys: KeyboardState::new(),
            clock: FrameClock::new(),
            renderer: CanvasRenderer { ctx },
        }));

        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(&window, game.clone())?;

        // Start game loop
        request_animation_frame(game);

        log::info!("Drift Rocks running!");
        Ok(())
    }

    fn setup_input_handlers(
        window: &web_sys::Window,
        game: Rc<RefCell<Game>>,
    ) -> Result<(), JsValue> {
        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = Key::from_code(&event.key()) {
                    // Keep arrows/space from scrolling the page
                    event.prevent_default();
                    game.borrow_mut().keys.key_down(key);
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Key up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = Key::from_code(&event.key()) {
                    game.borrow_mut().keys.key_up(key);
                }
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Window blur: key-up events go elsewhere, so drop held keys
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: FocusEvent| {
                game.borrow_mut().keys.clear();
                log::info!("Focus lost, controls released");
            });
            window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            log::error!("No window for animation frame");
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        game.borrow_mut().frame(time);
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use drift_rocks::consts::FRAME_DT;
    use drift_rocks::platform::{FrameClock, Key, KeyboardState};
    use drift_rocks::sim::{GameEvent, GameState, tick};
    use drift_rocks::{Renderer, Snapshot, Tuning, TuningError};

    /// Environment variable overriding the run seed
    pub const SEED_ENV: &str = "DRIFT_ROCKS_SEED";
    const DEFAULT_SEED: u64 = 12345;
    /// 60 seconds at 60 Hz
    const DEMO_FRAMES: u32 = 3600;

    /// Logs a one-line summary once per simulated second and keeps the last frame
    #[derive(Default)]
    struct TraceRenderer {
        frames: u64,
        last: Option<Snapshot>,
    }

    impl Renderer for TraceRenderer {
        fn render(&mut self, snapshot: &Snapshot) {
            if self.frames % 60 == 0 {
                log::debug!(
                    "frame {}: ship ({:.0}, {:.0}) heading {:.2}, {} shots, {} rocks",
                    self.frames,
                    snapshot.ship.pos.x,
                    snapshot.ship.pos.y,
                    snapshot.ship.heading,
                    snapshot.projectiles.len(),
                    snapshot.obstacles.len()
                );
            }
            self.frames += 1;
            self.last = Some(snapshot.clone());
        }
    }

    /// Scripted key presses: a short burn, then sweep left while firing
    fn autopilot(frame: u32, keys: &mut KeyboardState) {
        if frame == 0 {
            keys.key_down(Key::Up);
            keys.key_down(Key::Space);
        }
        if frame == 20 {
            keys.key_up(Key::Up);
        }
        if frame % 90 == 30 {
            keys.key_down(Key::Left);
        }
        if frame % 90 == 75 {
            keys.key_up(Key::Left);
        }
    }

    fn seed_from_env() -> u64 {
        match std::env::var(SEED_ENV) {
            Ok(value) => value.parse().unwrap_or_else(|_| {
                log::warn!("Ignoring {}={:?}: not a u64", SEED_ENV, value);
                DEFAULT_SEED
            }),
            Err(_) => DEFAULT_SEED,
        }
    }

    pub fn run() -> Result<(), TuningError> {
        let tuning = Tuning::from_env();
        let seed = seed_from_env();
        let mut state = GameState::new(seed, tuning)?;
        let mut keys = KeyboardState::new();
        let mut clock = FrameClock::new();
        let mut renderer = TraceRenderer::default();

        log::info!("Game initialized with seed: {}", seed);

        let mut shots = 0u32;
        let mut hits = 0u32;
        // The clock reports 0 on its first reading; prime it one frame back
        clock.tick(-(FRAME_DT as f64) * 1000.0);

        for frame in 0..DEMO_FRAMES {
            autopilot(frame, &mut keys);
            let dt = clock.tick(frame as f64 * FRAME_DT as f64 * 1000.0);
            tick(&mut state, &keys.intent(), dt);

            for event in &state.events {
                match event {
                    GameEvent::LevelStarted { level } => log::info!("Level {} live", level),
                    GameEvent::ShotFired { .. } => shots += 1,
                    GameEvent::ObstacleDestroyed { pos } => {
                        hits += 1;
                        log::info!(
                            "t={:.2}s rock destroyed at ({:.0}, {:.0}), {} left",
                            state.time,
                            pos.x,
                            pos.y,
                            state.obstacles.len()
                        );
                    }
                }
            }

            renderer.render(&state.snapshot());

            if state.is_cleared() {
                break;
            }
        }

        log::info!(
            "Run finished after {:.2}s: {} shots, {} hits, {} rocks left",
            state.time,
            shots,
            hits,
            state.obstacles.len()
        );

        if let Some(snapshot) = renderer.last {
            match serde_json::to_string_pretty(&snapshot) {
                Ok(json) => println!("{json}"),
                Err(err) => log::error!("Could not encode final frame: {}", err),
            }
        }

        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Drift Rocks (native, headless) starting...");
    log::info!("Browser version: build for wasm32 and serve with `trunk serve`");

    if let Err(err) = headless::run() {
        log::error!("{}", err);
        std::process::exit(1);
    }
}
