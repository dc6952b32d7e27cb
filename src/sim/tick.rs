//! Play tick
//!
//! One frame of the playing screen, in a fixed order: boss spawn, input,
//! toggles, bullets, boss or swarm, dynamic objects, theme mechanics.

use rand::Rng;

use super::collision::{bullet_boss, bullet_enemy};
use super::entities::{BulletOwner, create_bullet};
use super::objects::update_objects;
use super::state::WorldState;
use crate::consts::*;

/// Swarm speed multiplier while a time warp is up
pub const TIME_WARP_PACE: f32 = 0.5;

/// Input commands for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Held movement
    pub left: bool,
    pub right: bool,
    /// Held fire
    pub fire: bool,
    /// Edge-triggered: flip fast fire
    pub toggle_fast_fire: bool,
    /// Edge-triggered: clear the swarm
    pub nuke: bool,
}

/// What the engine should do after this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Continue,
    LevelCleared,
    GameOver,
}

/// Advance the playing world by one frame
pub fn advance<R: Rng + ?Sized>(
    world: &mut WorldState,
    input: &TickInput,
    rng: &mut R,
) -> FrameOutcome {
    if world.game_over {
        return FrameOutcome::GameOver;
    }

    if world.is_boss_level() && world.boss.is_none() && !world.enemies.is_empty() {
        world.spawn_boss();
    }

    // Level-triggered input
    if input.left {
        world.player.move_by(-world.player.speed);
    }
    if input.right {
        world.player.move_by(world.player.speed);
    }
    if input.fire {
        try_fire(world);
    }

    // Edge-triggered toggles
    if input.toggle_fast_fire {
        world.player.fast_fire = !world.player.fast_fire;
    }
    if input.nuke {
        trigger_nuke(world);
    }

    advance_bullets(world);

    let cleared = if world.boss.is_some() {
        update_boss(world, rng)
    } else {
        update_swarm(world)
    };
    if cleared {
        return FrameOutcome::LevelCleared;
    }

    update_objects(world);

    let theme = world.theme;
    for mechanic in theme.mechanics {
        if let Err(err) = mechanic.apply(world, rng) {
            log::debug!("skipping {:?} mechanic: {err}", mechanic.kind);
        }
    }

    if world.game_over {
        FrameOutcome::GameOver
    } else {
        FrameOutcome::Continue
    }
}

/// Fire from the top center of the ship, honoring the single-shot gate.
/// Returns whether a bullet was spawned.
pub fn try_fire(world: &mut WorldState) -> bool {
    if !world.player.fast_fire && world.player_shot_in_flight() {
        return false;
    }
    let player = &world.player;
    let x = player.x + player.width / 2.0 - BULLET_WIDTH / 2.0;
    let y = player.y - BULLET_HEIGHT;
    world
        .bullets
        .push(create_bullet(x, y, PLAYER_BULLET_DY, BulletOwner::Player));
    true
}

/// Wipe out the whole swarm. Unlimited: `nuke_available` is never consulted.
pub fn trigger_nuke(world: &mut WorldState) {
    if !world.enemies.is_empty() {
        log::info!("Nuke cleared {} enemies", world.enemies.len());
    }
    world.enemies.clear();
}

/// Move bullets, drop the ones that left the screen, and resolve hazard hits
fn advance_bullets(world: &mut WorldState) {
    for bullet in &mut world.bullets {
        bullet.y += bullet.dy;
    }
    world.bullets.retain(|b| !b.out_of_bounds());

    let player = world.player.rect();
    let before = world.bullets.len();
    world
        .bullets
        .retain(|b| !(b.owner == BulletOwner::Hazard && b.rect().intersects(&player)));
    let hits = before - world.bullets.len();
    if hits > 0 {
        world.score -= BOMB_PENALTY * hits as i64;
        world.player.recenter();
    }
}

/// Returns true once the swarm is gone
fn update_swarm(world: &mut WorldState) -> bool {
    if world.enemies.is_empty() {
        return true;
    }

    let pace = if world.time_warp_active() { TIME_WARP_PACE } else { 1.0 };
    let hits_wall = world.enemies.iter().any(|e| {
        let next = e.x + e.speed * pace * e.direction;
        next < 0.0 || next + e.width > SCREEN_WIDTH
    });
    for enemy in &mut world.enemies {
        if hits_wall {
            enemy.direction = -enemy.direction;
            enemy.y += ENEMY_DESCENT;
        } else {
            enemy.x += enemy.speed * pace * enemy.direction;
        }
    }

    if world.enemies.iter().any(|e| e.y + e.height >= PLAYER_HEIGHT) {
        if !world.game_over {
            log::info!("Swarm reached the defensive line on level {}", world.level);
        }
        world.game_over = true;
    }

    // Each friendly bullet takes out at most one enemy
    let mut i = 0;
    while i < world.bullets.len() {
        let bullet = &world.bullets[i];
        let target = if bullet.is_friendly() {
            world.enemies.iter().position(|e| bullet_enemy(bullet, e))
        } else {
            None
        };
        match target {
            Some(index) => {
                world.enemies.remove(index);
                world.bullets.remove(i);
                world.score += ENEMY_HIT_SCORE;
            }
            None => i += 1,
        }
    }
    false
}

/// Returns true once the boss is dead
fn update_boss<R: Rng + ?Sized>(world: &mut WorldState, rng: &mut R) -> bool {
    let Some(boss) = world.boss.as_mut() else {
        return false;
    };
    if boss.health <= 0 {
        return true;
    }

    let next = boss.x + boss.speed * boss.direction;
    if next < 0.0 || next + boss.width > SCREEN_WIDTH {
        boss.direction = -boss.direction;
    } else {
        boss.x = next;
    }
    if rng.random_range(0..100) < BOSS_DESCENT_CHANCE {
        boss.y += BOSS_DESCENT;
    }

    if boss.y + boss.height >= PLAYER_HEIGHT {
        if !world.game_over {
            log::info!("Boss reached the defensive line on level {}", world.level);
        }
        world.game_over = true;
    }

    let mut hits = 0;
    world.bullets.retain(|b| {
        let hit = b.is_friendly() && bullet_boss(b, boss);
        if hit {
            hits += 1;
        }
        !hit
    });
    boss.health -= hits;
    world.score += ENEMY_HIT_SCORE * hits as i64;
    false
}
