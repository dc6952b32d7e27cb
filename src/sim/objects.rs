//! Dynamic objects spawned by level mechanics
//!
//! Every object carries its own mechanic-private state in an `ObjectKind`
//! payload. `update` mutates the world and reports whether the object is
//! still alive; `draw` only reads.

use serde::{Deserialize, Serialize};

use super::collision::within_radius;
use super::entities::{BulletOwner, create_bullet, create_enemy};
use super::state::WorldState;
use crate::Rect;
use crate::consts::*;
use crate::error::{MechanicError, SurfaceError};
use crate::renderer::{Color, Surface};

/// Bullets closer than this to a mine's center set it off
pub const MINE_TRIGGER_RADIUS: f32 = 40.0;
/// Frames between bomber drops
pub const BOMBER_DROP_INTERVAL: u32 = 50;
/// Frames between turret shots
pub const TURRET_FIRE_INTERVAL: u32 = 40;
/// Range within which a gravity well bends bullets
pub const GRAVITY_WELL_RANGE: f32 = 220.0;

/// Whether an object survives the frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectStatus {
    Alive,
    Expired,
}

/// Per-mechanic payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ObjectKind {
    PowerUp { speed: f32 },
    ScorePickup { speed: f32 },
    Meteor { speed: f32, drift: f32 },
    AcidDrop { speed: f32 },
    Mine { speed: f32 },
    /// Signed horizontal speed
    Bomber { speed: f32, cooldown: u32 },
    LaserSweep { speed: f32, hit_player: bool },
    LightningStrike { warning: u32, strike: u32, hit_player: bool },
    GravityWell { timer: u32, strength: f32 },
    BlackHole { timer: u32, radius: f32 },
    MagneticField { timer: u32, polarity: f32 },
    WarpPortal { timer: u32, exit_x: f32, exit_y: f32 },
    FogOfWar { timer: u32 },
    TimeWarp { timer: u32 },
    TurretAlly { timer: u32, cooldown: u32 },
    HomingMissile { speed: f32 },
    DropPod { speed: f32, land_y: f32 },
    MovingObstacle { timer: u32, speed: f32, min_x: f32, max_x: f32 },
    SolarFlare { timer: u32, duration: u32 },
}

impl ObjectKind {
    pub fn name(&self) -> &'static str {
        match self {
            ObjectKind::PowerUp { .. } => "power-up",
            ObjectKind::ScorePickup { .. } => "score pickup",
            ObjectKind::Meteor { .. } => "meteor",
            ObjectKind::AcidDrop { .. } => "acid drop",
            ObjectKind::Mine { .. } => "mine",
            ObjectKind::Bomber { .. } => "bomber",
            ObjectKind::LaserSweep { .. } => "laser sweep",
            ObjectKind::LightningStrike { .. } => "lightning strike",
            ObjectKind::GravityWell { .. } => "gravity well",
            ObjectKind::BlackHole { .. } => "black hole",
            ObjectKind::MagneticField { .. } => "magnetic field",
            ObjectKind::WarpPortal { .. } => "warp portal",
            ObjectKind::FogOfWar { .. } => "fog of war",
            ObjectKind::TimeWarp { .. } => "time warp",
            ObjectKind::TurretAlly { .. } => "turret",
            ObjectKind::HomingMissile { .. } => "homing missile",
            ObjectKind::DropPod { .. } => "drop pod",
            ObjectKind::MovingObstacle { .. } => "moving obstacle",
            ObjectKind::SolarFlare { .. } => "solar flare",
        }
    }
}

/// A mechanic-owned entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DynamicObject {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub kind: ObjectKind,
}

/// Count down a lifetime timer; expired once it hits zero
#[inline]
fn tick_timer(timer: &mut u32) -> ObjectStatus {
    *timer = timer.saturating_sub(1);
    if *timer == 0 {
        ObjectStatus::Expired
    } else {
        ObjectStatus::Alive
    }
}

impl DynamicObject {
    pub fn new(x: f32, y: f32, width: f32, height: f32, kind: ObjectKind) -> Self {
        Self {
            x,
            y,
            width,
            height,
            kind,
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    #[inline]
    fn below_screen(&self) -> bool {
        self.y > SCREEN_HEIGHT
    }

    #[inline]
    fn off_sides(&self) -> bool {
        self.x > SCREEN_WIDTH || self.x + self.width < 0.0
    }

    /// Advance one frame against the world
    pub fn update(&mut self, world: &mut WorldState) -> Result<ObjectStatus, MechanicError> {
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(MechanicError::NonFinite(self.kind.name()));
        }
        let status = self.apply(world);
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(MechanicError::NonFinite(self.kind.name()));
        }
        Ok(status)
    }

    fn apply(&mut self, world: &mut WorldState) -> ObjectStatus {
        let rect = self.rect();
        let player = world.player.rect();

        match &mut self.kind {
            ObjectKind::PowerUp { speed } => {
                self.y += *speed;
                if self.rect().intersects(&player) {
                    world.player.fast_fire = true;
                    return ObjectStatus::Expired;
                }
                if self.below_screen() {
                    return ObjectStatus::Expired;
                }
            }

            ObjectKind::ScorePickup { speed } => {
                self.y += *speed;
                if self.rect().intersects(&player) {
                    world.score += SCORE_PICKUP_BONUS;
                    return ObjectStatus::Expired;
                }
                if self.below_screen() {
                    return ObjectStatus::Expired;
                }
            }

            ObjectKind::Meteor { speed, drift } => {
                self.y += *speed;
                self.x += *drift;
                if self.rect().intersects(&player) {
                    world.score -= METEOR_PENALTY;
                    world.player.recenter();
                    return ObjectStatus::Expired;
                }
                if self.below_screen() || self.off_sides() {
                    return ObjectStatus::Expired;
                }
            }

            ObjectKind::AcidDrop { speed } => {
                self.y += *speed;
                if self.rect().intersects(&player) {
                    world.score -= ACID_PENALTY;
                    return ObjectStatus::Expired;
                }
                if self.below_screen() {
                    return ObjectStatus::Expired;
                }
            }

            ObjectKind::Mine { speed } => {
                self.y += *speed;
                let center = self.rect().center();
                let before = world.bullets.len();
                world.bullets.retain(|b| {
                    let c = b.rect().center();
                    !(b.is_friendly()
                        && within_radius(c.x, c.y, center.x, center.y, MINE_TRIGGER_RADIUS))
                });
                if world.bullets.len() != before {
                    return ObjectStatus::Expired;
                }
                if self.rect().intersects(&player) {
                    world.score -= MINE_PENALTY;
                    return ObjectStatus::Expired;
                }
                if self.below_screen() {
                    return ObjectStatus::Expired;
                }
            }

            ObjectKind::Bomber { speed, cooldown } => {
                self.x += *speed;
                *cooldown = cooldown.saturating_sub(1);
                if *cooldown == 0 {
                    *cooldown = BOMBER_DROP_INTERVAL;
                    let bx = self.x + self.width / 2.0 - BULLET_WIDTH / 2.0;
                    let by = self.y + self.height;
                    world
                        .bullets
                        .push(create_bullet(bx, by, HAZARD_BULLET_DY, BulletOwner::Hazard));
                }
                // Entered from one side, leaves by the other
                let leaving = if *speed > 0.0 {
                    self.x > SCREEN_WIDTH
                } else {
                    self.x + self.width < 0.0
                };
                if leaving {
                    return ObjectStatus::Expired;
                }
            }

            ObjectKind::LaserSweep { speed, hit_player } => {
                self.x += *speed;
                let beam = Rect::new(self.x, self.y, self.width, self.height);
                world
                    .bullets
                    .retain(|b| !(b.dy < 0.0 && b.rect().intersects(&beam)));
                if !*hit_player && beam.intersects(&player) {
                    *hit_player = true;
                    world.score -= LASER_PENALTY;
                    world.player.recenter();
                }
                let leaving = if *speed > 0.0 {
                    self.x > SCREEN_WIDTH
                } else {
                    self.x + self.width < 0.0
                };
                if leaving {
                    return ObjectStatus::Expired;
                }
            }

            ObjectKind::LightningStrike {
                warning,
                strike,
                hit_player,
            } => {
                if *warning > 0 {
                    *warning -= 1;
                } else if *strike > 0 {
                    *strike -= 1;
                    if !*hit_player && rect.intersects(&player) {
                        *hit_player = true;
                        world.score -= LIGHTNING_PENALTY;
                    }
                } else {
                    return ObjectStatus::Expired;
                }
            }

            ObjectKind::GravityWell { timer, strength } => {
                let center = rect.center();
                for bullet in world.bullets.iter_mut().filter(|b| b.is_friendly()) {
                    let pos = bullet.rect().center();
                    if pos.distance(center) <= GRAVITY_WELL_RANGE {
                        let pull = (center - pos).normalize_or_zero() * *strength;
                        bullet.x += pull.x;
                    }
                }
                return tick_timer(timer);
            }

            ObjectKind::BlackHole { timer, radius } => {
                let center = rect.center();
                let radius = *radius;
                world.bullets.retain(|b| {
                    let c = b.rect().center();
                    !within_radius(c.x, c.y, center.x, center.y, radius)
                });
                let player_center = player.center().x;
                if (center.x - player_center).abs() > 1.0 {
                    world.player.move_by((center.x - player_center).signum());
                }
                return tick_timer(timer);
            }

            ObjectKind::MagneticField { timer, polarity } => {
                for enemy in &mut world.enemies {
                    enemy.x = (enemy.x + *polarity * 0.5).clamp(0.0, SCREEN_WIDTH - enemy.width);
                }
                for bullet in world.bullets.iter_mut().filter(|b| b.is_friendly()) {
                    bullet.x += *polarity * 1.5;
                }
                return tick_timer(timer);
            }

            ObjectKind::WarpPortal {
                timer,
                exit_x,
                exit_y,
            } => {
                for bullet in world.bullets.iter_mut() {
                    if bullet.is_friendly() && bullet.rect().intersects(&rect) {
                        bullet.x = *exit_x;
                        bullet.y = *exit_y;
                    }
                }
                return tick_timer(timer);
            }

            ObjectKind::FogOfWar { timer } => {
                return tick_timer(timer);
            }

            // The swarm reads `WorldState::time_warp_active`; overlapping warps do not stack
            ObjectKind::TimeWarp { timer } => {
                return tick_timer(timer);
            }

            ObjectKind::TurretAlly { timer, cooldown } => {
                *cooldown = cooldown.saturating_sub(1);
                if *cooldown == 0 {
                    *cooldown = TURRET_FIRE_INTERVAL;
                    let bx = self.x + self.width / 2.0 - BULLET_WIDTH / 2.0;
                    let by = self.y - BULLET_HEIGHT;
                    world
                        .bullets
                        .push(create_bullet(bx, by, PLAYER_BULLET_DY, BulletOwner::Ally));
                }
                return tick_timer(timer);
            }

            ObjectKind::HomingMissile { speed } => {
                let pos = rect.center();
                let target = world
                    .enemies
                    .iter()
                    .enumerate()
                    .map(|(i, e)| (i, e.rect().center().distance(pos)))
                    .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
                    .map(|(i, _)| i);

                match target {
                    Some(index) => {
                        let aim = world.enemies[index].rect().center();
                        let step = (aim - pos).normalize_or_zero() * *speed;
                        self.x += step.x;
                        self.y += step.y;
                        if self.rect().intersects(&world.enemies[index].rect()) {
                            world.enemies.remove(index);
                            world.score += HOMING_KILL_SCORE;
                            return ObjectStatus::Expired;
                        }
                    }
                    None => {
                        self.y -= *speed;
                        if self.y + self.height < 0.0 {
                            return ObjectStatus::Expired;
                        }
                    }
                }
            }

            ObjectKind::DropPod { speed, land_y } => {
                self.y += *speed;
                if self.y >= *land_y {
                    // Only join a swarm that still exists
                    if world.boss.is_none() {
                        if let Some(leader) = world.enemies.first() {
                            let mut enemy = create_enemy(self.x, *land_y);
                            enemy.speed = leader.speed;
                            enemy.direction = leader.direction;
                            world.enemies.push(enemy);
                        }
                    }
                    return ObjectStatus::Expired;
                }
            }

            ObjectKind::MovingObstacle {
                timer,
                speed,
                min_x,
                max_x,
            } => {
                let next = self.x + *speed;
                if next < *min_x || next + self.width > *max_x {
                    *speed = -*speed;
                } else {
                    self.x = next;
                }
                let block = Rect::new(self.x, self.y, self.width, self.height);
                world
                    .bullets
                    .retain(|b| !(b.is_friendly() && b.rect().intersects(&block)));
                return tick_timer(timer);
            }

            ObjectKind::SolarFlare { timer, .. } => {
                return tick_timer(timer);
            }
        }

        ObjectStatus::Alive
    }

    /// Draw the object. Reads only; `player` is used by view-dependent effects.
    pub fn draw(&self, surface: &mut dyn Surface, player: Rect, frame: u64) -> Result<(), SurfaceError> {
        let rect = self.rect();
        let center = rect.center();
        let pulse = ((frame as f32) * 0.15).sin() * 0.5 + 0.5;

        match &self.kind {
            ObjectKind::PowerUp { .. } => {
                surface.fill_rect(rect, Color::rgb(40, 220, 120))?;
                surface.fill_rect(
                    Rect::new(center.x - 3.0, self.y + 5.0, 6.0, self.height - 10.0),
                    Color::WHITE,
                )?;
                surface.fill_rect(
                    Rect::new(self.x + 5.0, center.y - 3.0, self.width - 10.0, 6.0),
                    Color::WHITE,
                )?;
            }

            ObjectKind::ScorePickup { .. } => {
                surface.fill_circle(center.x, center.y, self.width / 2.0, Color::rgb(255, 210, 40))?;
                surface.fill_circle(center.x, center.y, self.width / 4.0, Color::rgb(255, 240, 150))?;
            }

            ObjectKind::Meteor { .. } => {
                surface.fill_circle(center.x, center.y, self.width / 2.0, Color::rgb(130, 90, 60))?;
                surface.fill_circle(
                    center.x - self.width * 0.15,
                    center.y - self.height * 0.1,
                    self.width * 0.12,
                    Color::rgb(90, 60, 40),
                )?;
                surface.fill_circle(
                    center.x,
                    self.y - 6.0,
                    self.width * 0.3,
                    Color::rgba(255, 140, 0, 0.5),
                )?;
            }

            ObjectKind::AcidDrop { .. } => {
                surface.fill_rect(rect, Color::rgb(150, 255, 60))?;
            }

            ObjectKind::Mine { .. } => {
                surface.fill_circle(center.x, center.y, self.width / 2.0, Color::rgb(70, 70, 80))?;
                surface.fill_circle(
                    center.x,
                    center.y,
                    4.0,
                    Color::rgb(255, 40, 40).with_alpha(0.4 + 0.6 * pulse),
                )?;
            }

            ObjectKind::Bomber { .. } => {
                surface.fill_rect(rect, Color::rgb(120, 120, 140))?;
                surface.fill_rect(
                    Rect::new(center.x - 10.0, self.y - 6.0, 20.0, self.height + 12.0),
                    Color::rgb(90, 90, 110),
                )?;
            }

            ObjectKind::LaserSweep { .. } => {
                surface.fill_rect(
                    Rect::new(self.x - 4.0, self.y, self.width + 8.0, self.height),
                    Color::rgba(255, 30, 30, 0.25),
                )?;
                surface.fill_rect(rect, Color::rgb(255, 60, 60))?;
            }

            ObjectKind::LightningStrike { warning, .. } => {
                if *warning > 0 {
                    surface.fill_rect(rect, Color::rgba(255, 255, 120, 0.1 + 0.2 * pulse))?;
                } else {
                    surface.fill_rect(rect, Color::rgba(255, 255, 200, 0.9))?;
                    surface.fill_rect(
                        Rect::new(center.x - 3.0, self.y, 6.0, self.height),
                        Color::WHITE,
                    )?;
                }
            }

            ObjectKind::GravityWell { .. } => {
                surface.fill_circle(center.x, center.y, GRAVITY_WELL_RANGE * 0.25, Color::rgba(120, 80, 255, 0.2))?;
                surface.fill_circle(center.x, center.y, self.width / 2.0, Color::rgb(120, 80, 255))?;
            }

            ObjectKind::BlackHole { radius, .. } => {
                surface.fill_circle(center.x, center.y, *radius, Color::rgba(80, 0, 120, 0.35))?;
                surface.fill_circle(center.x, center.y, self.width / 2.0, Color::BLACK)?;
            }

            ObjectKind::MagneticField { polarity, .. } => {
                let color = if *polarity > 0.0 {
                    Color::rgba(255, 80, 80, 0.08)
                } else {
                    Color::rgba(80, 120, 255, 0.08)
                };
                surface.fill_rect(Rect::new(0.0, 0.0, SCREEN_WIDTH, PLAYER_HEIGHT), color)?;
                let arrow = if *polarity > 0.0 { ">>>" } else { "<<<" };
                surface.fill_text(
                    arrow,
                    SCREEN_WIDTH / 2.0,
                    PLAYER_HEIGHT - 20.0,
                    crate::renderer::TextStyle::centered(24.0),
                    color.with_alpha(0.6),
                )?;
            }

            ObjectKind::WarpPortal { exit_x, exit_y, .. } => {
                surface.stroke_rect(rect, Color::rgb(0, 255, 255), 3.0)?;
                surface.stroke_rect(
                    Rect::new(*exit_x - 10.0, *exit_y, 25.0, 10.0),
                    Color::rgb(255, 0, 255),
                    2.0,
                )?;
            }

            ObjectKind::FogOfWar { .. } => {
                // Dark everywhere except a window around the player
                let fog = Color::rgba(10, 10, 20, 0.85);
                let pad = 120.0;
                let left = (player.x - pad).max(0.0);
                let right = (player.x + player.width + pad).min(SCREEN_WIDTH);
                let top = (player.y - pad * 1.5).max(0.0);
                surface.fill_rect(Rect::new(0.0, 0.0, SCREEN_WIDTH, top), fog)?;
                surface.fill_rect(Rect::new(0.0, top, left, SCREEN_HEIGHT - top), fog)?;
                surface.fill_rect(Rect::new(right, top, SCREEN_WIDTH - right, SCREEN_HEIGHT - top), fog)?;
            }

            ObjectKind::TimeWarp { timer } => {
                let alpha = (*timer as f32 / 240.0).min(1.0) * 0.12;
                surface.fill_rect(
                    Rect::new(0.0, 0.0, SCREEN_WIDTH, SCREEN_HEIGHT),
                    Color::rgba(80, 200, 255, alpha),
                )?;
            }

            ObjectKind::TurretAlly { .. } => {
                surface.fill_rect(rect, Color::rgb(60, 160, 255))?;
                surface.fill_rect(
                    Rect::new(center.x - 3.0, self.y - 12.0, 6.0, 12.0),
                    Color::rgb(200, 230, 255),
                )?;
            }

            ObjectKind::HomingMissile { .. } => {
                surface.fill_rect(rect, Color::rgb(255, 150, 0))?;
                surface.fill_circle(center.x, self.y + self.height, 4.0, Color::rgba(255, 230, 100, pulse))?;
            }

            ObjectKind::DropPod { .. } => {
                surface.stroke_rect(rect, Color::rgb(255, 90, 90), 2.0)?;
                surface.fill_rect(
                    Rect::new(self.x + 10.0, self.y + 10.0, self.width - 20.0, self.height - 20.0),
                    Color::rgba(255, 90, 90, 0.5),
                )?;
            }

            ObjectKind::MovingObstacle { .. } => {
                surface.fill_rect(rect, Color::rgb(160, 160, 170))?;
                surface.stroke_rect(rect, Color::rgb(230, 230, 240), 2.0)?;
            }

            ObjectKind::SolarFlare { timer, duration } => {
                // Bright peak in the middle of the flare's life
                let t = 1.0 - *timer as f32 / (*duration).max(1) as f32;
                let intensity = (t * std::f32::consts::PI).sin();
                surface.fill_rect(
                    Rect::new(0.0, 0.0, SCREEN_WIDTH, SCREEN_HEIGHT),
                    Color::rgba(255, 240, 180, 0.75 * intensity),
                )?;
            }
        }
        Ok(())
    }
}

/// Run every object's update. Failing objects are kept and skipped for the
/// frame; expired ones are dropped.
pub fn update_objects(world: &mut WorldState) {
    let mut objects = std::mem::take(&mut world.objects);
    objects.retain_mut(|object| match object.update(world) {
        Ok(ObjectStatus::Alive) => true,
        Ok(ObjectStatus::Expired) => false,
        Err(err) => {
            log::debug!("skipping object update: {err}");
            true
        }
    });
    // Anything pushed by updates this frame lands after the survivors
    objects.append(&mut world.objects);
    world.objects = objects;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entities::{create_enemy, create_bullet};

    fn world() -> WorldState {
        let mut world = WorldState::new(Color::WHITE, DEFAULT_BOSS_FREQUENCY);
        world.enemies.clear();
        world
    }

    fn above_player(world: &WorldState, width: f32, height: f32, kind: ObjectKind) -> DynamicObject {
        let p = world.player.rect();
        DynamicObject::new(p.x + 5.0, p.y - height + 1.0, width, height, kind)
    }

    #[test]
    fn test_power_up_grants_fast_fire() {
        let mut world = world();
        let obj = above_player(&world, 30.0, 30.0, ObjectKind::PowerUp { speed: 3.0 });
        world.objects.push(obj);
        update_objects(&mut world);
        assert!(world.player.fast_fire);
        assert!(world.objects.is_empty());
    }

    #[test]
    fn test_score_pickup_and_hazard_amounts() {
        let mut world = world();
        let kinds = [
            (ObjectKind::ScorePickup { speed: 3.0 }, SCORE_PICKUP_BONUS),
            (ObjectKind::Meteor { speed: 4.0, drift: 0.0 }, -METEOR_PENALTY),
            (ObjectKind::AcidDrop { speed: 8.0 }, -ACID_PENALTY),
            (ObjectKind::Mine { speed: 0.8 }, -MINE_PENALTY),
        ];
        let mut expected = 0;
        for (kind, delta) in kinds {
            let obj = above_player(&world, 20.0, 20.0, kind);
            world.objects.push(obj);
            update_objects(&mut world);
            expected += delta;
            assert_eq!(world.score, expected);
            assert!(world.objects.is_empty());
        }
        assert_eq!(expected, 50 - 50 - 20 - 40);
    }

    #[test]
    fn test_meteor_recenters_player() {
        let mut world = world();
        world.player.x = 100.0;
        let obj = above_player(&world, 40.0, 40.0, ObjectKind::Meteor { speed: 4.0, drift: 0.0 });
        world.objects.push(obj);
        update_objects(&mut world);
        assert_eq!(world.player.x, (SCREEN_WIDTH - world.player.width) / 2.0);
    }

    #[test]
    fn test_falling_objects_expire_below_screen() {
        let mut world = world();
        world.player.x = 20.0;
        world
            .objects
            .push(DynamicObject::new(800.0, SCREEN_HEIGHT - 1.0, 20.0, 20.0, ObjectKind::AcidDrop { speed: 5.0 }));
        update_objects(&mut world);
        assert!(world.objects.is_empty());
        assert_eq!(world.score, 0);
    }

    #[test]
    fn test_mine_destroys_nearby_bullet() {
        let mut world = world();
        world
            .objects
            .push(DynamicObject::new(300.0, 300.0, 28.0, 28.0, ObjectKind::Mine { speed: 0.0 }));
        world.bullets.push(create_bullet(312.0, 340.0, -10.0, BulletOwner::Player));
        world.bullets.push(create_bullet(700.0, 340.0, -10.0, BulletOwner::Player));
        update_objects(&mut world);
        assert_eq!(world.bullets.len(), 1);
        assert!(world.objects.is_empty());
    }

    #[test]
    fn test_bomber_drops_hazard_bullets() {
        let mut world = world();
        world.objects.push(DynamicObject::new(
            100.0,
            20.0,
            80.0,
            30.0,
            ObjectKind::Bomber { speed: 3.0, cooldown: 1 },
        ));
        update_objects(&mut world);
        assert_eq!(world.bullets.len(), 1);
        assert_eq!(world.bullets[0].owner, BulletOwner::Hazard);
        assert!(world.bullets[0].dy > 0.0);
        assert_eq!(world.objects.len(), 1);
    }

    #[test]
    fn test_laser_hits_player_once() {
        let mut world = world();
        let p = world.player.rect();
        world.objects.push(DynamicObject::new(
            p.x + 10.0,
            0.0,
            8.0,
            SCREEN_HEIGHT,
            ObjectKind::LaserSweep { speed: 0.0, hit_player: false },
        ));
        update_objects(&mut world);
        // Player was recentered, which is still inside the beam's column
        world.player.x = p.x;
        update_objects(&mut world);
        assert_eq!(world.score, -LASER_PENALTY);
    }

    #[test]
    fn test_lightning_warns_then_strikes() {
        let mut world = world();
        let p = world.player.rect();
        world.objects.push(DynamicObject::new(
            p.x,
            0.0,
            40.0,
            SCREEN_HEIGHT,
            ObjectKind::LightningStrike { warning: 2, strike: 2, hit_player: false },
        ));
        update_objects(&mut world);
        update_objects(&mut world);
        assert_eq!(world.score, 0);
        update_objects(&mut world);
        assert_eq!(world.score, -LIGHTNING_PENALTY);
        update_objects(&mut world);
        update_objects(&mut world);
        assert!(world.objects.is_empty());
        assert_eq!(world.score, -LIGHTNING_PENALTY);
    }

    #[test]
    fn test_field_effects_expire_on_timer() {
        let mut world = world();
        world
            .objects
            .push(DynamicObject::new(0.0, 0.0, SCREEN_WIDTH, SCREEN_HEIGHT, ObjectKind::FogOfWar { timer: 3 }));
        update_objects(&mut world);
        update_objects(&mut world);
        assert_eq!(world.objects.len(), 1);
        update_objects(&mut world);
        assert!(world.objects.is_empty());
    }

    #[test]
    fn test_black_hole_swallows_bullets() {
        let mut world = world();
        world.objects.push(DynamicObject::new(
            400.0,
            300.0,
            50.0,
            50.0,
            ObjectKind::BlackHole { timer: 100, radius: 45.0 },
        ));
        world.bullets.push(create_bullet(420.0, 320.0, -10.0, BulletOwner::Player));
        world.bullets.push(create_bullet(420.0, 320.0, 6.0, BulletOwner::Hazard));
        world.bullets.push(create_bullet(100.0, 320.0, -10.0, BulletOwner::Player));
        update_objects(&mut world);
        assert_eq!(world.bullets.len(), 1);
        assert_eq!(world.bullets[0].x, 100.0);
    }

    #[test]
    fn test_warp_portal_teleports_bullets() {
        let mut world = world();
        world.objects.push(DynamicObject::new(
            400.0,
            450.0,
            70.0,
            20.0,
            ObjectKind::WarpPortal { timer: 100, exit_x: 100.0, exit_y: 200.0 },
        ));
        world.bullets.push(create_bullet(420.0, 455.0, -10.0, BulletOwner::Player));
        update_objects(&mut world);
        assert_eq!((world.bullets[0].x, world.bullets[0].y), (100.0, 200.0));
    }

    #[test]
    fn test_turret_fires_ally_bullets() {
        let mut world = world();
        world.objects.push(DynamicObject::new(
            300.0,
            620.0,
            30.0,
            30.0,
            ObjectKind::TurretAlly { timer: 100, cooldown: 1 },
        ));
        update_objects(&mut world);
        assert_eq!(world.bullets.len(), 1);
        assert_eq!(world.bullets[0].owner, BulletOwner::Ally);
        assert!(!world.bullets[0].is_player_shot());
    }

    #[test]
    fn test_homing_missile_kills_nearest_enemy() {
        let mut world = world();
        world.enemies.push(create_enemy(100.0, 100.0));
        world.enemies.push(create_enemy(500.0, 400.0));
        world.objects.push(DynamicObject::new(
            510.0,
            460.0,
            10.0,
            20.0,
            ObjectKind::HomingMissile { speed: 6.0 },
        ));
        for _ in 0..30 {
            update_objects(&mut world);
        }
        assert_eq!(world.enemies.len(), 1);
        assert_eq!(world.enemies[0].x, 100.0);
        assert_eq!(world.score, HOMING_KILL_SCORE);
        assert!(world.objects.is_empty());
    }

    #[test]
    fn test_homing_missile_without_targets_flies_off() {
        let mut world = world();
        world.objects.push(DynamicObject::new(
            500.0,
            10.0,
            10.0,
            20.0,
            ObjectKind::HomingMissile { speed: 6.0 },
        ));
        for _ in 0..6 {
            update_objects(&mut world);
        }
        assert!(world.objects.is_empty());
    }

    #[test]
    fn test_drop_pod_joins_swarm() {
        let mut world = world();
        let mut leader = create_enemy(100.0, 60.0);
        leader.direction = -1.0;
        leader.speed = 2.0;
        world.enemies.push(leader);
        world.objects.push(DynamicObject::new(
            600.0,
            55.0,
            55.0,
            40.0,
            ObjectKind::DropPod { speed: 5.0, land_y: 60.0 },
        ));
        update_objects(&mut world);
        assert_eq!(world.enemies.len(), 2);
        assert_eq!(world.enemies[1].direction, -1.0);
        assert_eq!(world.enemies[1].speed, 2.0);
    }

    #[test]
    fn test_obstacle_bounces_and_blocks() {
        let mut world = world();
        world.objects.push(DynamicObject::new(
            0.0,
            300.0,
            120.0,
            20.0,
            ObjectKind::MovingObstacle { timer: 100, speed: -2.0, min_x: 0.0, max_x: SCREEN_WIDTH },
        ));
        world.bullets.push(create_bullet(10.0, 305.0, -10.0, BulletOwner::Player));
        update_objects(&mut world);
        assert!(world.bullets.is_empty());
        match world.objects[0].kind {
            ObjectKind::MovingObstacle { speed, .. } => assert_eq!(speed, 2.0),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_non_finite_object_is_kept_and_skipped() {
        let mut world = world();
        world
            .objects
            .push(DynamicObject::new(f32::NAN, 0.0, 10.0, 10.0, ObjectKind::AcidDrop { speed: 1.0 }));
        update_objects(&mut world);
        assert_eq!(world.objects.len(), 1);
        let err = world.objects[0].clone().update(&mut world).unwrap_err();
        assert_eq!(err, MechanicError::NonFinite("acid drop"));
    }

    #[test]
    fn test_non_finite_object_has_no_side_effects() {
        let mut world = world();
        world.objects.push(DynamicObject::new(
            f32::NAN,
            620.0,
            30.0,
            30.0,
            ObjectKind::TurretAlly { timer: 100, cooldown: 1 },
        ));
        update_objects(&mut world);
        assert!(world.bullets.is_empty());
        assert_eq!(world.objects.len(), 1);
        match world.objects[0].kind {
            ObjectKind::TurretAlly { timer, cooldown } => assert_eq!((timer, cooldown), (100, 1)),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_time_warp_only_counts_down() {
        let mut world = world();
        world.enemies.push(create_enemy(300.0, 100.0));
        world
            .objects
            .push(DynamicObject::new(0.0, 0.0, SCREEN_WIDTH, SCREEN_HEIGHT, ObjectKind::TimeWarp { timer: 2 }));
        update_objects(&mut world);
        assert_eq!(world.enemies[0].x, 300.0);
        assert!(world.time_warp_active());
        update_objects(&mut world);
        assert!(!world.time_warp_active());
    }
}
