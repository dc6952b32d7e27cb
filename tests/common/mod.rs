//! Shared helpers for engine integration tests

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tomo::renderer::RecordingSurface;
use tomo::{Clock, Engine, Settings};

/// Clock the test moves by hand
#[derive(Clone, Default)]
pub struct ManualClock(Rc<Cell<f64>>);

impl ManualClock {
    pub fn set(&self, ms: f64) {
        self.0.set(ms);
    }

    pub fn advance(&self, ms: f64) {
        self.0.set(self.0.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.0.get()
    }
}

pub fn seeded_settings() -> Settings {
    Settings {
        seed: Some(2024),
        ..Default::default()
    }
}

/// Engine with a manual clock and a shared recording surface, already started
pub fn engine_with_surface() -> (Engine, ManualClock, Rc<RefCell<RecordingSurface>>) {
    let clock = ManualClock::default();
    let mut engine = Engine::with_clock(seeded_settings(), Box::new(clock.clone()))
        .expect("default settings are valid");
    let surface = Rc::new(RefCell::new(RecordingSurface::new()));
    engine.set_surface(Some(Box::new(surface.clone())));
    engine.start();
    (engine, clock, surface)
}

/// Press and release a key, then run one frame
pub fn tap(engine: &mut Engine, key: &str) {
    engine.on_key_down(key);
    engine.on_key_up(key);
    engine.step();
}

/// From the main menu straight into a game
pub fn start_game(engine: &mut Engine) {
    tap(engine, "Enter");
}
