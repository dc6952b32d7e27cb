//! Game loop and screen state machine
//!
//! The host forwards key events and calls `tick` once per animation frame.
//! The engine throttles to the configured frame rate, advances the active
//! screen, and draws it to the attached surface.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::error::EngineError;
use crate::input::{InputLatch, Key};
use crate::renderer::{
    STAR_COUNT, Starfield, Surface, draw_game_over, draw_level_transition, draw_menu,
    draw_skin_menu, draw_world,
};
use crate::settings::Settings;
use crate::sim::levels::{LevelDeck, LevelTheme};
use crate::sim::tick::{FrameOutcome, TickInput, advance};
use crate::sim::WorldState;

/// Millisecond time source
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// Wall clock of the host platform
#[derive(Debug, Clone)]
pub struct SystemClock {
    #[cfg(not(target_arch = "wasm32"))]
    origin: std::time::Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            #[cfg(not(target_arch = "wasm32"))]
            origin: std::time::Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    #[cfg(target_arch = "wasm32")]
    fn now_ms(&self) -> f64 {
        js_sys::Date::now()
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Result of a `tick`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickStatus {
    Running,
    /// Quit was chosen; the host should stop its loop
    Stopped,
}

/// Main menu entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    StartGame,
    ChooseColor,
    Quit,
}

impl MenuOption {
    pub const ALL: [MenuOption; 3] = [
        MenuOption::StartGame,
        MenuOption::ChooseColor,
        MenuOption::Quit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MenuOption::StartGame => "Start Game",
            MenuOption::ChooseColor => "Choose Color",
            MenuOption::Quit => "Quit",
        }
    }
}

/// Active screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu { selected: usize },
    SkinMenu { selected: usize },
    Playing,
    LevelTransition { remaining: u32 },
    GameOver,
}

/// The engine: owns the world, the input latch, and the drawing surface
pub struct Engine {
    settings: Settings,
    clock: Box<dyn Clock>,
    surface: Option<Box<dyn Surface>>,
    input: InputLatch,
    screen: Screen,
    world: WorldState,
    deck: LevelDeck,
    rng: Pcg32,
    stars: Starfield,
    skin: usize,
    /// Baseline of the frame throttle; `None` until `start`
    last_frame: Option<f64>,
    frame: u64,
    stopped: bool,
}

impl Engine {
    pub fn new(settings: Settings) -> Result<Self, EngineError> {
        Self::with_clock(settings, Box::new(SystemClock::new()))
    }

    pub fn with_clock(settings: Settings, clock: Box<dyn Clock>) -> Result<Self, EngineError> {
        settings.validate()?;
        let seed = settings.seed.unwrap_or_else(|| clock.now_ms().to_bits() ^ rand::random::<u64>());
        let mut rng = Pcg32::seed_from_u64(seed);
        let deck = LevelDeck::standard(rng.random());
        let stars = if settings.show_stars {
            Starfield::new(STAR_COUNT, &mut rng)
        } else {
            Starfield::empty()
        };
        let skin = settings.skin;
        let world = WorldState::new(settings.palette[skin].color, settings.boss_frequency);
        log::info!("Engine created (seed {seed}, {} fps)", settings.fps);

        Ok(Self {
            settings,
            clock,
            surface: None,
            input: InputLatch::new(),
            screen: Screen::Menu { selected: 0 },
            world,
            deck,
            rng,
            stars,
            skin,
            last_frame: None,
            frame: 0,
            stopped: false,
        })
    }

    /// Replace the standard theme catalog
    pub fn with_themes(mut self, themes: Vec<LevelTheme>) -> Result<Self, EngineError> {
        self.deck = LevelDeck::with_themes(themes, self.rng.random())?;
        Ok(self)
    }

    /// Attach, swap, or detach the drawing surface
    pub fn set_surface(&mut self, surface: Option<Box<dyn Surface>>) {
        self.surface = surface;
    }

    pub fn has_surface(&self) -> bool {
        self.surface.is_some()
    }

    /// Arm the frame throttle
    pub fn start(&mut self) {
        self.last_frame = Some(self.clock.now_ms());
        log::info!("Engine started");
    }

    /// Host frame callback
    pub fn tick(&mut self) -> TickStatus {
        let now = self.clock.now_ms();
        self.tick_at(now)
    }

    /// Host frame callback against an explicit timestamp
    pub fn tick_at(&mut self, now_ms: f64) -> TickStatus {
        if self.stopped {
            return TickStatus::Stopped;
        }
        if self.surface.is_none() {
            return TickStatus::Running;
        }
        let Some(last) = self.last_frame else {
            return TickStatus::Running;
        };

        let interval = self.settings.frame_interval_ms();
        let elapsed = now_ms - last;
        if elapsed < interval {
            return TickStatus::Running;
        }
        // Throttle only: drop the remainder, never catch up
        self.last_frame = Some(now_ms - elapsed % interval);
        self.step()
    }

    /// Process exactly one frame, then draw it
    pub fn step(&mut self) -> TickStatus {
        if self.stopped {
            return TickStatus::Stopped;
        }
        self.frame += 1;
        self.stars.advance();

        let status = match self.screen {
            Screen::Menu { selected } => self.update_menu(selected),
            Screen::SkinMenu { selected } => self.update_skin_menu(selected),
            Screen::Playing => self.update_playing(),
            Screen::LevelTransition { remaining } => self.update_transition(remaining),
            Screen::GameOver => self.update_game_over(),
        };
        if status == TickStatus::Stopped {
            self.stopped = true;
            return status;
        }

        self.render();
        status
    }

    pub fn on_key_down(&mut self, key: &str) -> bool {
        self.input.on_key_down(key)
    }

    pub fn on_key_up(&mut self, key: &str) -> bool {
        self.input.on_key_up(key)
    }

    /// Forget all held and pending keys (the host lost focus)
    pub fn clear_input(&mut self) {
        self.input.reset();
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn world(&self) -> &WorldState {
        &self.world
    }

    /// Direct world access for tests and debugging
    pub fn world_mut(&mut self) -> &mut WorldState {
        &mut self.world
    }

    /// Index of the selected skin in the palette
    pub fn skin(&self) -> usize {
        self.skin
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    fn update_menu(&mut self, selected: usize) -> TickStatus {
        let count = MenuOption::ALL.len();
        let mut selected = selected % count;
        if self.input.consume_key(Key::Up) {
            selected = (selected + count - 1) % count;
        }
        if self.input.consume_key(Key::Down) {
            selected = (selected + 1) % count;
        }
        self.screen = Screen::Menu { selected };

        if self.input.consume_key(Key::Confirm) {
            match MenuOption::ALL[selected] {
                MenuOption::StartGame => self.start_game(),
                MenuOption::ChooseColor => {
                    self.input.clear_keys();
                    self.screen = Screen::SkinMenu {
                        selected: self.skin,
                    };
                }
                MenuOption::Quit => {
                    log::info!("Quit chosen, stopping");
                    return TickStatus::Stopped;
                }
            }
        }
        TickStatus::Running
    }

    fn update_skin_menu(&mut self, selected: usize) -> TickStatus {
        let count = self.settings.palette.len();
        let mut selected = selected % count;
        if self.input.consume_key(Key::Left) | self.input.consume_key(Key::Up) {
            selected = (selected + count - 1) % count;
        }
        if self.input.consume_key(Key::Right) | self.input.consume_key(Key::Down) {
            selected = (selected + 1) % count;
        }

        if self.input.consume_key(Key::Confirm) {
            self.skin = selected;
            self.settings.skin = selected;
            self.settings.save();
            log::info!("Skin set to {}", self.settings.palette[selected].name);
            self.input.clear_keys();
            self.screen = Screen::Menu { selected: 0 };
        } else {
            self.screen = Screen::SkinMenu { selected };
        }
        TickStatus::Running
    }

    fn update_playing(&mut self) -> TickStatus {
        let input = TickInput {
            left: self.input.is_pressed(Key::Left),
            right: self.input.is_pressed(Key::Right),
            fire: self.input.is_pressed(Key::Fire),
            toggle_fast_fire: self.input.consume_key(Key::FastFire),
            nuke: self.input.consume_key(Key::Nuke),
        };

        match advance(&mut self.world, &input, &mut self.rng) {
            FrameOutcome::Continue => {}
            FrameOutcome::LevelCleared => {
                let theme = self.deck.next();
                self.world.advance_level(theme);
                log::info!("Level {} begins: {}", self.world.level, theme.name);
                self.input.clear_keys();
                self.screen = Screen::LevelTransition {
                    remaining: self.settings.transition_frames,
                };
            }
            FrameOutcome::GameOver => {
                log::info!(
                    "Game over on level {} with score {}",
                    self.world.level,
                    self.world.score
                );
                self.input.clear_keys();
                self.screen = Screen::GameOver;
            }
        }
        TickStatus::Running
    }

    fn update_transition(&mut self, remaining: u32) -> TickStatus {
        let remaining = remaining.saturating_sub(1);
        if remaining == 0 {
            self.input.clear_keys();
            self.screen = Screen::Playing;
        } else {
            self.screen = Screen::LevelTransition { remaining };
        }
        TickStatus::Running
    }

    fn update_game_over(&mut self) -> TickStatus {
        if self.input.consume_key(Key::Fire) {
            log::info!("Restarting");
            self.start_game();
        }
        TickStatus::Running
    }

    /// Fresh world on the Tutorial level
    fn start_game(&mut self) {
        let color = self.settings.palette[self.skin].color;
        self.world = WorldState::new(color, self.settings.boss_frequency);
        self.deck.reset();
        self.input.clear_keys();
        self.screen = Screen::Playing;
        log::info!("Game started");
    }

    fn render(&mut self) {
        let Some(surface) = self.surface.as_deref_mut() else {
            return;
        };
        let result = match self.screen {
            Screen::Menu { selected } => draw_menu(surface, &self.stars, selected, self.frame),
            Screen::SkinMenu { selected } => {
                draw_skin_menu(surface, &self.stars, &self.settings.palette, selected)
            }
            Screen::Playing => draw_world(surface, &self.world, &self.stars, self.frame),
            Screen::LevelTransition { remaining } => draw_level_transition(
                surface,
                &self.world,
                remaining,
                self.settings.transition_frames,
                self.frame,
            ),
            Screen::GameOver => draw_game_over(surface, &self.world, self.frame),
        };
        if let Err(err) = result {
            log::debug!("Dropped frame {}: {err}", self.frame);
        }
    }
}
