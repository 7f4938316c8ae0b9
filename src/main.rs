//! Turret Range entry point
//!
//! In the browser this wires a `<canvas>` and keyboard/mouse events to the
//! session. Natively it runs a headless autopilot session and prints a summary.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use turret_range::Settings;
    use turret_range::input::{Autopilot, InputController, InputEvent, Key};
    use turret_range::renderer::CanvasSurface;
    use turret_range::sim::{Clock, SimulationSession};

    /// Game instance holding all state
    struct Game {
        session: SimulationSession,
        clock: Clock,
        input: InputController,
        autopilot: Option<Autopilot>,
        autopilot_fire_every: u32,
        surface: CanvasSurface,
        last_time: f64,
    }

    impl Game {
        fn handle(&mut self, event: InputEvent) {
            self.input.handle(&event, &mut self.session);
        }

        fn toggle_autopilot(&mut self) {
            self.autopilot = match self.autopilot {
                Some(_) => None,
                None => Some(Autopilot::new(self.autopilot_fire_every)),
            };
            log::info!("Autopilot: {}", self.autopilot.is_some());
        }

        /// Feed the whole host delta to the clock; the autopilot acts once per tick
        fn update(&mut self, time: f64) {
            let elapsed = if self.last_time > 0.0 {
                time - self.last_time
            } else {
                0.0
            };
            self.last_time = time;

            let autopilot = &mut self.autopilot;
            self.clock
                .advance_with(&mut self.session, &mut self.surface, elapsed, |session| {
                    if let Some(pilot) = autopilot.as_mut() {
                        pilot.update(session);
                    }
                });
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Turret Range starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let settings = Settings {
            arena_width: canvas.width() as f32,
            arena_height: canvas.height() as f32,
            seed: js_sys::Date::now() as u64,
            ..Settings::default()
        };
        let mut session = match SimulationSession::new(&settings) {
            Ok(session) => session,
            Err(e) => {
                log::error!("Cannot start session: {}", e);
                return;
            }
        };
        let clock = match Clock::new(settings.tick_period_ms, settings.spawn_interval_ms) {
            Ok(clock) => clock,
            Err(e) => {
                log::error!("Cannot start clock: {}", e);
                return;
            }
        };
        clock.start(&mut session);

        let game = Rc::new(RefCell::new(Game {
            session,
            clock,
            input: InputController::from_settings(&settings),
            autopilot: settings
                .autopilot
                .then(|| Autopilot::new(settings.autopilot_fire_every)),
            autopilot_fire_every: settings.autopilot_fire_every,
            surface: CanvasSurface::new(canvas.clone(), ctx),
            last_time: 0.0,
        }));

        setup_input_handlers(&canvas, game.clone());
        request_animation_frame(game);

        log::info!("Turret Range running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        // Key down (repeats while held)
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                if event.code() == "KeyI" && !event.repeat() {
                    g.toggle_autopilot();
                }
                g.handle(InputEvent::KeyDown(Key::from_code(&event.code())));
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut()
                    .handle(InputEvent::KeyUp(Key::from_code(&event.code())));
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse move - absolute aim
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                game.borrow_mut().handle(InputEvent::PointerMove {
                    x: event.offset_x() as f32,
                    y: event.offset_y() as f32,
                });
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse down - one shot per press
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                game.borrow_mut().handle(InputEvent::PointerDown {
                    buttons: event.buttons(),
                });
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        game.borrow_mut().update(time);
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;

    use turret_range::input::Autopilot;
    use turret_range::renderer::CommandBuffer;
    use turret_range::sim::{Clock, SimulationSession};
    use turret_range::{Result, Settings};

    /// Command-line options: `[settings.json] [--seconds N] [--frame]`
    #[derive(Debug, Default)]
    struct Options {
        settings: Option<PathBuf>,
        seconds: Option<u64>,
        print_frame: bool,
    }

    impl Options {
        fn parse(mut args: impl Iterator<Item = String>) -> Self {
            let mut options = Options::default();
            while let Some(arg) = args.next() {
                match arg.as_str() {
                    "--frame" => options.print_frame = true,
                    "--seconds" => options.seconds = args.next().and_then(|s| s.parse().ok()),
                    _ => options.settings = Some(PathBuf::from(arg)),
                }
            }
            options
        }
    }

    /// Ticks in a run of `seconds`; absurd durations saturate
    fn tick_count(seconds: u64, tick_period_ms: u64) -> u64 {
        seconds.saturating_mul(1000) / tick_period_ms.max(1)
    }

    pub fn run() -> Result<()> {
        let options = Options::parse(std::env::args().skip(1));
        let settings = match &options.settings {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };
        if !settings.autopilot {
            log::info!("Headless run has no player input, using autopilot");
        }

        let mut session = SimulationSession::new(&settings)?;
        let mut clock = Clock::new(settings.tick_period_ms, settings.spawn_interval_ms)?;
        let mut pilot = Autopilot::new(settings.autopilot_fire_every);
        let mut surface = CommandBuffer::new();

        let seconds = options.seconds.unwrap_or(30);
        let steps = tick_count(seconds, settings.tick_period_ms);
        log::info!("Running {} s ({} ticks)", seconds, steps);

        clock.start(&mut session);
        let mut fired = 0u32;
        let mut expired = 0u32;
        for _ in 0..steps {
            let report = clock.advance_with(
                &mut session,
                &mut surface,
                settings.tick_period_ms as f64,
                |session| {
                    if pilot.update(session).is_some() {
                        fired += 1;
                    }
                },
            );
            expired += report.expired;
        }

        log::info!(
            "Done: {} ticks, {} shots, {} misses, {} live targets",
            session.time_ticks,
            fired,
            expired,
            session.targets.len()
        );
        println!("Score: {}", session.player.score);

        if options.print_frame {
            match serde_json::to_string_pretty(&surface.commands) {
                Ok(json) => println!("{}", json),
                Err(e) => log::warn!("Cannot serialize frame: {}", e),
            }
        }
        Ok(())
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Turret Range (headless) starting...");

    if let Err(e) = headless::run() {
        log::error!("{}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
