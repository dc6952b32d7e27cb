//! Collision detection
//!
//! Everything in Tomo is an axis-aligned box, so a single overlap test covers
//! bullets, the swarm, the boss, and every mechanic's own shapes.

use super::entities::{Boss, Bullet, Enemy};

/// Rectangle overlap test
///
/// Strict inequalities: boxes that only share an edge do not collide.
#[inline]
#[allow(clippy::too_many_arguments)]
pub fn aabb(ax: f32, ay: f32, aw: f32, ah: f32, bx: f32, by: f32, bw: f32, bh: f32) -> bool {
    ax < bx + bw && ax + aw > bx && ay < by + bh && ay + ah > by
}

/// Check a bullet against a swarm enemy
#[inline]
pub fn bullet_enemy(bullet: &Bullet, enemy: &Enemy) -> bool {
    bullet.rect().intersects(&enemy.rect())
}

/// Check a bullet against the boss
#[inline]
pub fn bullet_boss(bullet: &Bullet, boss: &Boss) -> bool {
    bullet.rect().intersects(&boss.rect())
}

/// Check whether a point lies within `radius` of a center (used by proximity mechanics)
#[inline]
pub fn within_radius(px: f32, py: f32, cx: f32, cy: f32, radius: f32) -> bool {
    let (dx, dy) = (px - cx, py - cy);
    dx * dx + dy * dy <= radius * radius
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entities::{BulletOwner, create_boss, create_bullet, create_enemy};
    use proptest::prelude::*;

    #[test]
    fn test_overlap() {
        assert!(aabb(0.0, 0.0, 10.0, 10.0, 5.0, 5.0, 10.0, 10.0));
        assert!(aabb(0.0, 0.0, 10.0, 10.0, 2.0, 2.0, 2.0, 2.0)); // contained
        assert!(!aabb(0.0, 0.0, 10.0, 10.0, 20.0, 0.0, 10.0, 10.0));
    }

    #[test]
    fn test_shared_edge_is_not_a_collision() {
        // Right edge of A == left edge of B
        assert!(!aabb(0.0, 0.0, 10.0, 10.0, 10.0, 0.0, 10.0, 10.0));
        // Bottom edge of A == top edge of B
        assert!(!aabb(0.0, 0.0, 10.0, 10.0, 0.0, 10.0, 10.0, 10.0));
        // Corner touch
        assert!(!aabb(0.0, 0.0, 10.0, 10.0, 10.0, 10.0, 5.0, 5.0));
    }

    #[test]
    fn test_bullet_enemy() {
        let enemy = create_enemy(100.0, 100.0);
        let hit = create_bullet(120.0, 130.0, -10.0, BulletOwner::Player);
        let miss = create_bullet(300.0, 130.0, -10.0, BulletOwner::Player);
        assert!(bullet_enemy(&hit, &enemy));
        assert!(!bullet_enemy(&miss, &enemy));
    }

    #[test]
    fn test_bullet_boss() {
        let boss = create_boss(400.0, 60.0);
        let hit = create_bullet(500.0, 100.0, -10.0, BulletOwner::Player);
        // Bullet top sits exactly on the boss bottom edge
        let touching = create_bullet(500.0, 120.0, -10.0, BulletOwner::Player);
        assert!(bullet_boss(&hit, &boss));
        assert!(!bullet_boss(&touching, &boss));
    }

    #[test]
    fn test_within_radius() {
        assert!(within_radius(3.0, 4.0, 0.0, 0.0, 5.0));
        assert!(!within_radius(3.0, 4.1, 0.0, 0.0, 5.0));
    }

    fn rect() -> impl Strategy<Value = (f32, f32, f32, f32)> {
        (-500.0f32..1500.0, -500.0f32..1200.0, 0.5f32..300.0, 0.5f32..300.0)
    }

    proptest! {
        #[test]
        fn prop_aabb_is_symmetric(a in rect(), b in rect()) {
            prop_assert_eq!(
                aabb(a.0, a.1, a.2, a.3, b.0, b.1, b.2, b.3),
                aabb(b.0, b.1, b.2, b.3, a.0, a.1, a.2, a.3)
            );
        }

        #[test]
        fn prop_edge_adjacent_never_collides(a in rect(), h in 0.5f32..300.0, dy in -200.0f32..200.0) {
            // B starts exactly where A ends horizontally
            let bx = a.0 + a.2;
            prop_assert!(!aabb(a.0, a.1, a.2, a.3, bx, a.1 + dy, 10.0, h));
        }

        #[test]
        fn prop_separated_never_collides(a in rect(), gap in 0.1f32..500.0) {
            let by = a.1 + a.3 + gap;
            prop_assert!(!aabb(a.0, a.1, a.2, a.3, a.0, by, a.2, a.3));
        }
    }
}
