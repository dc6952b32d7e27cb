//! Simulation module
//!
//! All gameplay logic lives here. Nothing in this module draws or talks to
//! the host; randomness comes from a caller-supplied seeded RNG.

pub mod collision;
pub mod entities;
pub mod levels;
pub mod mechanics;
pub mod objects;
pub mod state;
pub mod tick;

pub use collision::{aabb, bullet_boss, bullet_enemy};
pub use entities::{
    Boss, Bullet, BulletOwner, Enemy, Player, create_boss, create_bullet, create_enemy,
    create_initial_enemies, create_player,
};
pub use levels::{LevelDeck, LevelTheme, THEMES, TUTORIAL};
pub use mechanics::{CHANCE_DENOMINATOR, Mechanic, MechanicKind};
pub use objects::{DynamicObject, ObjectKind, ObjectStatus};
pub use state::WorldState;
pub use tick::{FrameOutcome, TickInput, advance, trigger_nuke};
