//! World state
//!
//! The single mutable aggregate for a playing session. Built fresh on every
//! new game and restart; `advance_level` carries the score into the next level.

use serde::Serialize;

use super::entities::{Boss, Bullet, Enemy, Player, create_boss, create_initial_enemies, create_player};
use super::levels::{LevelTheme, TUTORIAL};
use super::objects::{DynamicObject, ObjectKind};
use crate::consts::*;
use crate::renderer::Color;

/// Swarm speed for a level (capped)
pub fn swarm_speed(level: u32) -> f32 {
    (1.0 + level.saturating_sub(1) as f32 * 0.15).min(ENEMY_MAX_SPEED)
}

/// Boss health for a level
pub fn boss_health(level: u32, boss_frequency: u32) -> i32 {
    BOSS_BASE_HEALTH + 5 * (level / boss_frequency.max(1)) as i32
}

/// Boss speed for a level (capped)
pub fn boss_speed(level: u32, boss_frequency: u32) -> f32 {
    (BOSS_BASE_SPEED + (level / boss_frequency.max(1)) as f32).min(BOSS_MAX_SPEED)
}

/// Complete state of a playing session
#[derive(Debug, Clone, Serialize)]
pub struct WorldState {
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub boss: Option<Boss>,
    pub bullets: Vec<Bullet>,
    pub objects: Vec<DynamicObject>,
    /// May go negative
    pub score: i64,
    /// 1-based
    pub level: u32,
    /// Every Nth level is a boss level
    pub boss_frequency: u32,
    /// Latched until restart
    pub game_over: bool,
    /// Active theme; its mechanics run every frame
    #[serde(skip)]
    pub theme: LevelTheme,
    pub level_summary: String,
    /// Swarm size at level start, for the progress bar
    pub initial_enemy_count: usize,
}

impl WorldState {
    /// Fresh session on level 1 with the Tutorial theme
    pub fn new(player_color: Color, boss_frequency: u32) -> Self {
        let mut world = Self {
            player: create_player(player_color),
            enemies: Vec::new(),
            boss: None,
            bullets: Vec::new(),
            objects: Vec::new(),
            score: 0,
            level: 1,
            boss_frequency: boss_frequency.max(1),
            game_over: false,
            theme: TUTORIAL,
            level_summary: TUTORIAL.summary.to_string(),
            initial_enemy_count: 0,
        };
        world.seed_enemies();
        world
    }

    /// Move to the next level under `theme`, keeping the score
    pub fn advance_level(&mut self, theme: LevelTheme) {
        self.objects.clear();
        self.bullets.clear();
        self.boss = None;
        self.level += 1;
        self.theme = theme;
        self.level_summary = theme.summary.to_string();
        self.seed_enemies();
    }

    /// Replace the swarm with a fresh grid at this level's speed
    fn seed_enemies(&mut self) {
        let speed = swarm_speed(self.level);
        self.enemies = create_initial_enemies();
        for enemy in &mut self.enemies {
            enemy.speed = speed;
        }
        self.initial_enemy_count = self.enemies.len();
    }

    pub fn is_boss_level(&self) -> bool {
        self.level % self.boss_frequency == 0
    }

    /// Replace the swarm with a level-scaled boss
    pub fn spawn_boss(&mut self) {
        let mut boss = create_boss((SCREEN_WIDTH - BOSS_WIDTH) / 2.0, BOSS_SPAWN_Y);
        boss.health = boss_health(self.level, self.boss_frequency);
        boss.max_health = boss.health;
        boss.speed = boss_speed(self.level, self.boss_frequency);
        log::info!("Boss spawned on level {} with {} health", self.level, boss.health);
        self.enemies.clear();
        self.boss = Some(boss);
    }

    /// Any time warp is up; the swarm moves at half speed
    pub fn time_warp_active(&self) -> bool {
        self.objects
            .iter()
            .any(|o| matches!(o.kind, ObjectKind::TimeWarp { .. }))
    }

    /// A player shot is still travelling upward
    pub fn player_shot_in_flight(&self) -> bool {
        self.bullets.iter().any(Bullet::is_player_shot)
    }

    /// Fraction of the level left: boss health, or remaining swarm
    pub fn progress_remaining(&self) -> f32 {
        match &self.boss {
            Some(boss) => boss.health_fraction(),
            None if self.initial_enemy_count == 0 => 0.0,
            None => (self.enemies.len() as f32 / self.initial_enemy_count as f32).clamp(0.0, 1.0),
        }
    }
}
