//! Scrolling star background

use rand::Rng;

use super::surface::{Color, Surface};
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::error::SurfaceError;

pub const STAR_COUNT: usize = 120;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub x: f32,
    pub y: f32,
    pub speed: f32,
    pub size: f32,
    pub brightness: f32,
}

/// Seeded star field. The engine advances it; drawing only reads it.
#[derive(Debug, Clone, Default)]
pub struct Starfield {
    stars: Vec<Star>,
}

impl Starfield {
    pub fn new<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Self {
        let stars = (0..count)
            .map(|_| {
                // Bigger stars are closer, so they move faster
                let depth: f32 = rng.random_range(0.2..1.0);
                Star {
                    x: rng.random_range(0.0..SCREEN_WIDTH),
                    y: rng.random_range(0.0..SCREEN_HEIGHT),
                    speed: 0.3 + depth * 1.5,
                    size: 0.5 + depth * 1.5,
                    brightness: 0.3 + depth * 0.7,
                }
            })
            .collect();
        Self { stars }
    }

    /// No stars (background disabled)
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn advance(&mut self) {
        for star in &mut self.stars {
            star.y += star.speed;
            if star.y > SCREEN_HEIGHT {
                star.y -= SCREEN_HEIGHT;
            }
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface) -> Result<(), SurfaceError> {
        for star in &self.stars {
            surface.fill_circle(
                star.x,
                star.y,
                star.size,
                Color::WHITE.with_alpha(star.brightness),
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_seeded_and_wrapping() {
        let mut a = Starfield::new(STAR_COUNT, &mut Pcg32::seed_from_u64(3));
        let b = Starfield::new(STAR_COUNT, &mut Pcg32::seed_from_u64(3));
        assert_eq!(a.stars(), b.stars());
        for _ in 0..5000 {
            a.advance();
        }
        assert!(a.stars().iter().all(|s| s.y >= 0.0 && s.y <= SCREEN_HEIGHT));
    }
}
