//! Level mechanic library
//!
//! A mechanic is a per-frame Bernoulli trial that, on success, spawns one
//! dynamic object. Themes compose mechanics by listing several in order.

use rand::Rng;

use super::objects::{DynamicObject, ObjectKind};
use super::state::WorldState;
use crate::consts::*;
use crate::error::MechanicError;

/// Denominator for `Mechanic::chance` (chance is in tenths of a percent)
pub const CHANCE_DENOMINATOR: u32 = 1000;

/// Patrol band for moving obstacles
pub const OBSTACLE_MIN_X: f32 = 0.0;
pub const OBSTACLE_MAX_X: f32 = SCREEN_WIDTH;

/// Frames a lightning column warns before it strikes
pub const LIGHTNING_WARNING_FRAMES: u32 = 60;
pub const LIGHTNING_STRIKE_FRAMES: u32 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MechanicKind {
    PowerUp,
    ScorePickup,
    MeteorShower,
    AcidRain,
    Minefield,
    EnemyBomber,
    LaserSweep,
    LightningStrike,
    GravityWell,
    BlackHole,
    MagneticField,
    WarpPortal,
    FogOfWar,
    TimeWarp,
    TurretAlly,
    HomingMissile,
    Reinforcements,
    MovingObstacle,
    SolarFlare,
}

impl MechanicKind {
    pub const ALL: [MechanicKind; 19] = [
        MechanicKind::PowerUp,
        MechanicKind::ScorePickup,
        MechanicKind::MeteorShower,
        MechanicKind::AcidRain,
        MechanicKind::Minefield,
        MechanicKind::EnemyBomber,
        MechanicKind::LaserSweep,
        MechanicKind::LightningStrike,
        MechanicKind::GravityWell,
        MechanicKind::BlackHole,
        MechanicKind::MagneticField,
        MechanicKind::WarpPortal,
        MechanicKind::FogOfWar,
        MechanicKind::TimeWarp,
        MechanicKind::TurretAlly,
        MechanicKind::HomingMissile,
        MechanicKind::Reinforcements,
        MechanicKind::MovingObstacle,
        MechanicKind::SolarFlare,
    ];
}

/// One stochastic spawner inside a theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mechanic {
    pub kind: MechanicKind,
    /// Spawn chance per frame, out of `CHANCE_DENOMINATOR`
    pub chance: u32,
}

impl Mechanic {
    pub const fn new(kind: MechanicKind, chance: u32) -> Self {
        Self { kind, chance }
    }

    /// Roll once for this frame; on success push the spawned object.
    /// Returns whether something was spawned.
    pub fn apply<R: Rng + ?Sized>(
        &self,
        world: &mut WorldState,
        rng: &mut R,
    ) -> Result<bool, MechanicError> {
        if self.chance > CHANCE_DENOMINATOR {
            return Err(MechanicError::InvalidChance {
                chance: self.chance,
                denominator: CHANCE_DENOMINATOR,
            });
        }
        if rng.random_range(0..CHANCE_DENOMINATOR) >= self.chance {
            return Ok(false);
        }
        match spawn(self.kind, world, rng) {
            Some(object) => {
                world.objects.push(object);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// Build the object a mechanic spawns, or `None` when the world has nothing
/// for it to act on
pub fn spawn<R: Rng + ?Sized>(
    kind: MechanicKind,
    world: &WorldState,
    rng: &mut R,
) -> Option<DynamicObject> {
    let object = match kind {
        MechanicKind::PowerUp => DynamicObject::new(
            random_x(rng, 30.0),
            -30.0,
            30.0,
            30.0,
            ObjectKind::PowerUp { speed: 3.0 },
        ),
        MechanicKind::ScorePickup => DynamicObject::new(
            random_x(rng, 25.0),
            -25.0,
            25.0,
            25.0,
            ObjectKind::ScorePickup { speed: 3.5 },
        ),
        MechanicKind::MeteorShower => DynamicObject::new(
            random_x(rng, 40.0),
            -40.0,
            40.0,
            40.0,
            ObjectKind::Meteor {
                speed: rng.random_range(4.0..7.0),
                drift: rng.random_range(-1.5..1.5),
            },
        ),
        MechanicKind::AcidRain => DynamicObject::new(
            random_x(rng, 6.0),
            -14.0,
            6.0,
            14.0,
            ObjectKind::AcidDrop {
                speed: rng.random_range(8.0..11.0),
            },
        ),
        MechanicKind::Minefield => DynamicObject::new(
            random_x(rng, 28.0),
            -28.0,
            28.0,
            28.0,
            ObjectKind::Mine { speed: 0.8 },
        ),
        MechanicKind::EnemyBomber => {
            let (x, speed) = if rng.random_bool(0.5) {
                (-80.0, 3.0)
            } else {
                (SCREEN_WIDTH, -3.0)
            };
            DynamicObject::new(x, 20.0, 80.0, 30.0, ObjectKind::Bomber { speed, cooldown: 30 })
        }
        MechanicKind::LaserSweep => {
            let (x, speed) = if rng.random_bool(0.5) {
                (-8.0, 4.0)
            } else {
                (SCREEN_WIDTH, -4.0)
            };
            DynamicObject::new(
                x,
                0.0,
                8.0,
                SCREEN_HEIGHT,
                ObjectKind::LaserSweep {
                    speed,
                    hit_player: false,
                },
            )
        }
        MechanicKind::LightningStrike => DynamicObject::new(
            random_x(rng, 40.0),
            0.0,
            40.0,
            SCREEN_HEIGHT,
            ObjectKind::LightningStrike {
                warning: LIGHTNING_WARNING_FRAMES,
                strike: LIGHTNING_STRIKE_FRAMES,
                hit_player: false,
            },
        ),
        MechanicKind::GravityWell => DynamicObject::new(
            rng.random_range(100.0..SCREEN_WIDTH - 160.0),
            rng.random_range(200.0..450.0),
            60.0,
            60.0,
            ObjectKind::GravityWell {
                timer: 300,
                strength: 1.5,
            },
        ),
        MechanicKind::BlackHole => DynamicObject::new(
            rng.random_range(100.0..SCREEN_WIDTH - 150.0),
            rng.random_range(200.0..420.0),
            50.0,
            50.0,
            ObjectKind::BlackHole {
                timer: 360,
                radius: 45.0,
            },
        ),
        MechanicKind::MagneticField => DynamicObject::new(
            0.0,
            0.0,
            SCREEN_WIDTH,
            PLAYER_HEIGHT,
            ObjectKind::MagneticField {
                timer: 240,
                polarity: if rng.random_bool(0.5) { 1.0 } else { -1.0 },
            },
        ),
        MechanicKind::WarpPortal => DynamicObject::new(
            random_x(rng, 70.0),
            rng.random_range(400.0..480.0),
            70.0,
            20.0,
            ObjectKind::WarpPortal {
                timer: 420,
                exit_x: random_x(rng, BULLET_WIDTH),
                exit_y: rng.random_range(150.0..250.0),
            },
        ),
        MechanicKind::FogOfWar => DynamicObject::new(
            0.0,
            0.0,
            SCREEN_WIDTH,
            SCREEN_HEIGHT,
            ObjectKind::FogOfWar { timer: 300 },
        ),
        MechanicKind::TimeWarp => DynamicObject::new(
            0.0,
            0.0,
            SCREEN_WIDTH,
            SCREEN_HEIGHT,
            ObjectKind::TimeWarp { timer: 240 },
        ),
        MechanicKind::TurretAlly => DynamicObject::new(
            random_x(rng, 30.0),
            PLAYER_HEIGHT + PLAYER_SIZE_HEIGHT + 20.0,
            30.0,
            30.0,
            ObjectKind::TurretAlly {
                timer: 600,
                cooldown: 1,
            },
        ),
        MechanicKind::HomingMissile => {
            let player = world.player.rect();
            DynamicObject::new(
                player.center().x - 5.0,
                player.y - 20.0,
                10.0,
                20.0,
                ObjectKind::HomingMissile { speed: 6.0 },
            )
        }
        MechanicKind::Reinforcements => {
            if world.enemies.is_empty() || world.boss.is_some() {
                return None;
            }
            DynamicObject::new(
                random_x(rng, ENEMY_WIDTH),
                -ENEMY_HEIGHT,
                ENEMY_WIDTH,
                ENEMY_HEIGHT,
                ObjectKind::DropPod {
                    speed: 2.0,
                    land_y: ENEMY_GRID_Y,
                },
            )
        }
        MechanicKind::MovingObstacle => {
            let speed = rng.random_range(2.0..4.0);
            DynamicObject::new(
                rng.random_range(OBSTACLE_MIN_X..OBSTACLE_MAX_X - 120.0),
                rng.random_range(250.0..420.0),
                120.0,
                20.0,
                ObjectKind::MovingObstacle {
                    timer: 600,
                    speed: if rng.random_bool(0.5) { speed } else { -speed },
                    min_x: OBSTACLE_MIN_X,
                    max_x: OBSTACLE_MAX_X,
                },
            )
        }
        MechanicKind::SolarFlare => DynamicObject::new(
            0.0,
            0.0,
            SCREEN_WIDTH,
            SCREEN_HEIGHT,
            ObjectKind::SolarFlare {
                timer: 180,
                duration: 180,
            },
        ),
    };
    Some(object)
}

/// Random left edge that keeps an object of `width` inside the side margins
fn random_x<R: Rng + ?Sized>(rng: &mut R, width: f32) -> f32 {
    rng.random_range(PLAYER_MARGIN..SCREEN_WIDTH - width - PLAYER_MARGIN)
}
