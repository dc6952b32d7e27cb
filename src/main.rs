//! Tomo entry point
//!
//! On the web: binds the engine to `#canvas`, the keyboard, and the
//! animation-frame loop. Natively: plays a scripted headless session.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{FocusEvent, HtmlCanvasElement, KeyboardEvent};

    use tomo::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
    use tomo::renderer::CanvasSurface;
    use tomo::{Engine, Settings, TickStatus};

    /// Host-side state around the engine
    struct Game {
        engine: Engine,
        /// Window lost focus; frames are not ticked
        paused: bool,
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Tomo starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or_else(|| JsValue::from_str("no #canvas element"))?
            .dyn_into()?;

        // Logical resolution; CSS scales it for display
        canvas.set_width(SCREEN_WIDTH as u32);
        canvas.set_height(SCREEN_HEIGHT as u32);

        let surface = CanvasSurface::from_canvas(&canvas)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let mut engine =
            Engine::new(Settings::load()).map_err(|e| JsValue::from_str(&e.to_string()))?;
        engine.set_surface(Some(Box::new(surface)));
        engine.start();

        let game = Rc::new(RefCell::new(Game {
            engine,
            paused: false,
        }));

        setup_keyboard(game.clone())?;
        setup_auto_pause(game.clone())?;

        request_animation_frame(game);
        log::info!("Tomo running!");
        Ok(())
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if game.borrow_mut().engine.on_key_down(&event.key()) {
                    event.prevent_default();
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if game.borrow_mut().engine.on_key_up(&event.key()) {
                    event.prevent_default();
                }
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;

        // Window blur (click outside, tab switch)
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: FocusEvent| {
                let mut g = game.borrow_mut();
                g.paused = true;
                // Key-ups are lost while unfocused
                g.engine.clear_input();
                log::info!("Paused (window blur)");
            });
            window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: FocusEvent| {
                game.borrow_mut().paused = false;
                log::info!("Resumed (window focus)");
            });
            window.add_event_listener_with_callback("focus", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        let status = {
            let mut g = game.borrow_mut();
            if g.paused {
                TickStatus::Running
            } else {
                g.engine.tick()
            }
        };

        match status {
            TickStatus::Running => request_animation_frame(game),
            TickStatus::Stopped => log::info!("Tomo stopped"),
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Tomo (native) starting...");
    log::info!("Native mode runs a headless demo - build for wasm32 to play in a browser");

    if let Err(err) = headless::run() {
        log::error!("Headless demo failed: {err}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Scripted session against a recording surface and a stepped clock
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use tomo::renderer::RecordingSurface;
    use tomo::{Clock, Engine, EngineError, Screen, Settings, TickStatus};

    /// Frames before the demo gives up
    const MAX_FRAMES: u64 = 20_000;

    #[derive(Clone, Default)]
    struct SteppedClock(Rc<Cell<f64>>);

    impl Clock for SteppedClock {
        fn now_ms(&self) -> f64 {
            self.0.get()
        }
    }

    pub fn run() -> Result<(), EngineError> {
        let settings = Settings::load();
        let interval = settings.frame_interval_ms();

        let clock = SteppedClock::default();
        let mut engine = Engine::with_clock(settings, Box::new(clock.clone()))?;
        let surface = Rc::new(RefCell::new(RecordingSurface::new()));
        engine.set_surface(Some(Box::new(surface.clone())));
        engine.start();

        engine.on_key_down("Enter");
        engine.on_key_up("Enter");

        let mut ticks = 0u64;
        while engine.frame_count() < MAX_FRAMES {
            clock.0.set(clock.0.get() + interval);
            ticks += 1;

            // Sweep back and forth while holding fire
            let sweep = (engine.frame_count() / 90) % 2 == 0;
            script_keys(&mut engine, sweep);

            if engine.tick() == TickStatus::Stopped || engine.screen() == Screen::GameOver {
                break;
            }
            surface.borrow_mut().clear_commands();
        }

        let world = engine.world();
        log::info!(
            "Demo finished after {} frames ({} ticks): level {}, score {}, theme {}",
            engine.frame_count(),
            ticks,
            world.level,
            world.score,
            world.theme.name
        );
        println!(
            "level {} score {} ({:?})",
            world.level,
            world.score,
            engine.screen()
        );
        Ok(())
    }

    fn script_keys(engine: &mut Engine, sweep_right: bool) {
        // Keys held through a screen change stay dead until released
        if engine.screen() != Screen::Playing {
            for key in [" ", "ArrowLeft", "ArrowRight"] {
                engine.on_key_up(key);
            }
            return;
        }
        engine.on_key_down(" ");
        if sweep_right {
            engine.on_key_up("ArrowLeft");
            engine.on_key_down("ArrowRight");
        } else {
            engine.on_key_up("ArrowRight");
            engine.on_key_down("ArrowLeft");
        }
    }
}
