//! Tomo - a frame-driven arcade shooter engine
//!
//! Core modules:
//! - `sim`: Simulation (entities, collisions, level mechanics, world state)
//! - `engine`: Screen state machine and frame throttle driven by the host
//! - `input`: Level- and edge-triggered key latch
//! - `renderer`: Drawing-surface contract and pure draw functions
//! - `settings`: Engine configuration

pub mod engine;
pub mod error;
pub mod input;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use engine::{Clock, Engine, Screen, SystemClock, TickStatus};
pub use error::{EngineError, MechanicError, SettingsError, SurfaceError};
pub use input::{InputLatch, Key};
pub use settings::{Settings, Skin};

/// Game configuration constants
pub mod consts {
    /// Logical canvas resolution (the host scales for display)
    pub const SCREEN_WIDTH: f32 = 1000.0;
    pub const SCREEN_HEIGHT: f32 = 700.0;

    /// Default simulation rate (frames per second)
    pub const DEFAULT_FPS: u32 = 60;

    /// Player defaults
    pub const PLAYER_WIDTH: f32 = 50.0;
    pub const PLAYER_SIZE_HEIGHT: f32 = 50.0;
    /// Row the player sits on; also the defensive line enemies must not reach
    pub const PLAYER_HEIGHT: f32 = SCREEN_HEIGHT - 150.0;
    pub const PLAYER_SPEED: f32 = 12.0;
    /// Horizontal margin the player may not cross
    pub const PLAYER_MARGIN: f32 = 20.0;

    /// Enemy swarm layout
    pub const ENEMY_WIDTH: f32 = 55.0;
    pub const ENEMY_HEIGHT: f32 = 40.0;
    pub const ENEMIES_PER_ROW: usize = 8;
    pub const ENEMY_ROWS: usize = 3;
    pub const ENEMY_GRID_X: f32 = 80.0;
    pub const ENEMY_GRID_Y: f32 = 60.0;
    pub const ENEMY_SPACING_X: f32 = 100.0;
    pub const ENEMY_SPACING_Y: f32 = 60.0;
    /// Vertical drop when the swarm bounces off a wall
    pub const ENEMY_DESCENT: f32 = 20.0;
    pub const ENEMY_MAX_SPEED: f32 = 4.0;

    /// Boss defaults
    pub const BOSS_WIDTH: f32 = 200.0;
    pub const BOSS_HEIGHT: f32 = 60.0;
    pub const BOSS_SPAWN_Y: f32 = 60.0;
    pub const BOSS_BASE_HEALTH: i32 = 20;
    pub const BOSS_BASE_SPEED: f32 = 3.0;
    pub const BOSS_MAX_SPEED: f32 = 8.0;
    /// Percent chance per frame that the boss lunges downward
    pub const BOSS_DESCENT_CHANCE: u32 = 1;
    pub const BOSS_DESCENT: f32 = 20.0;

    /// Bullet defaults
    pub const BULLET_WIDTH: f32 = 5.0;
    pub const BULLET_HEIGHT: f32 = 10.0;
    pub const PLAYER_BULLET_DY: f32 = -10.0;
    pub const HAZARD_BULLET_DY: f32 = 6.0;

    /// Scoring
    pub const ENEMY_HIT_SCORE: i64 = 10;
    pub const HOMING_KILL_SCORE: i64 = 20;
    pub const SCORE_PICKUP_BONUS: i64 = 50;
    pub const METEOR_PENALTY: i64 = 50;
    pub const BOMB_PENALTY: i64 = 30;
    pub const ACID_PENALTY: i64 = 20;
    pub const MINE_PENALTY: i64 = 40;
    pub const LASER_PENALTY: i64 = 35;
    pub const LIGHTNING_PENALTY: i64 = 25;

    /// Levels
    pub const DEFAULT_BOSS_FREQUENCY: u32 = 5;
    pub const LEVEL_TRANSITION_FRAMES: u32 = 180;
}

/// Axis-aligned rectangle in logical canvas coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Strict overlap test; rectangles that only share an edge do not intersect
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        sim::collision::aabb(
            self.x,
            self.y,
            self.width,
            self.height,
            other.x,
            other.y,
            other.width,
            other.height,
        )
    }

    #[inline]
    pub fn center(&self) -> glam::Vec2 {
        glam::Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// Clamp a player x coordinate to the playable band
#[inline]
pub fn clamp_player_x(x: f32, width: f32) -> f32 {
    use consts::{PLAYER_MARGIN, SCREEN_WIDTH};
    x.clamp(PLAYER_MARGIN, SCREEN_WIDTH - width - PLAYER_MARGIN)
}
