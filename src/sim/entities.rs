//! Entity types and their factories
//!
//! Factories are pure: fixed sizes and defaults live here, level scaling is
//! applied by the caller.

use serde::{Deserialize, Serialize};

use crate::Rect;
use crate::consts::*;
use crate::renderer::Color;

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub x: f32,
    /// Pinned to `PLAYER_HEIGHT`
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub color: Color,
    pub speed: f32,
    /// Removes the one-bullet-on-screen limit
    pub fast_fire: bool,
    /// Initialized but never consulted: nukes are unlimited
    pub nuke_available: bool,
}

impl Player {
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Move horizontally, staying inside the playable band
    pub fn move_by(&mut self, dx: f32) {
        self.x = crate::clamp_player_x(self.x + dx, self.width);
    }

    /// Put the ship back in the middle (hazard knock-back)
    pub fn recenter(&mut self) {
        self.x = (SCREEN_WIDTH - self.width) / 2.0;
    }
}

/// A swarm enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    /// -1 (left) or +1 (right)
    pub direction: f32,
}

impl Enemy {
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// The boss of every Nth level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boss {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub health: i32,
    pub max_health: i32,
    pub speed: f32,
    pub direction: f32,
}

impl Boss {
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Remaining health as a 0-1 fraction (clamped for display)
    pub fn health_fraction(&self) -> f32 {
        if self.max_health <= 0 {
            return 0.0;
        }
        (self.health.max(0) as f32 / self.max_health as f32).clamp(0.0, 1.0)
    }
}

/// Who fired a bullet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BulletOwner {
    /// Player shot; subject to the single-shot gate
    Player,
    /// Friendly fire from turrets; scores like a player shot
    Ally,
    /// Falling projectile that hurts the player
    Hazard,
}

/// A projectile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Vertical velocity; negative moves up
    pub dy: f32,
    pub owner: BulletOwner,
}

impl Bullet {
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Moving up and able to damage the swarm
    #[inline]
    pub fn is_friendly(&self) -> bool {
        self.dy < 0.0 && self.owner != BulletOwner::Hazard
    }

    /// Counts against the single-shot gate
    #[inline]
    pub fn is_player_shot(&self) -> bool {
        self.dy < 0.0 && self.owner == BulletOwner::Player
    }

    #[inline]
    pub fn out_of_bounds(&self) -> bool {
        self.y < 0.0 || self.y > SCREEN_HEIGHT
    }
}

pub fn create_player(color: Color) -> Player {
    Player {
        x: (SCREEN_WIDTH - PLAYER_WIDTH) / 2.0,
        y: PLAYER_HEIGHT,
        width: PLAYER_WIDTH,
        height: PLAYER_SIZE_HEIGHT,
        color,
        speed: PLAYER_SPEED,
        fast_fire: false,
        nuke_available: true,
    }
}

pub fn create_enemy(x: f32, y: f32) -> Enemy {
    Enemy {
        x,
        y,
        width: ENEMY_WIDTH,
        height: ENEMY_HEIGHT,
        speed: 1.0,
        direction: 1.0,
    }
}

/// Build the 8x3 starting grid
pub fn create_initial_enemies() -> Vec<Enemy> {
    let mut enemies = Vec::with_capacity(ENEMIES_PER_ROW * ENEMY_ROWS);
    for row in 0..ENEMY_ROWS {
        for col in 0..ENEMIES_PER_ROW {
            let x = ENEMY_GRID_X + col as f32 * ENEMY_SPACING_X;
            let y = ENEMY_GRID_Y + row as f32 * ENEMY_SPACING_Y;
            enemies.push(create_enemy(x, y));
        }
    }
    enemies
}

/// Boss with placeholder stats; the caller sets health and speed from the level
pub fn create_boss(x: f32, y: f32) -> Boss {
    Boss {
        x,
        y,
        width: BOSS_WIDTH,
        height: BOSS_HEIGHT,
        health: BOSS_BASE_HEALTH,
        max_health: BOSS_BASE_HEALTH,
        speed: BOSS_BASE_SPEED,
        direction: 1.0,
    }
}

pub fn create_bullet(x: f32, y: f32, dy: f32, owner: BulletOwner) -> Bullet {
    Bullet {
        x,
        y,
        width: BULLET_WIDTH,
        height: BULLET_HEIGHT,
        dy,
        owner,
    }
}
