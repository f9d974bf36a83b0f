//! Transient cosmetic effects, advanced once per tick.
//!
//! Wall-hit sparks live in a single arena with per-particle expiry instead of
//! self-rescheduling render callbacks, so the core stays renderer-free and
//! effect timing is testable without a wall clock.

use glam::Vec3;
use rand::Rng;
use rand_pcg::Pcg32;

/// Particles spawned per wall contact
pub const WALL_HIT_PARTICLES: usize = 5;

/// Arena cap; oldest particles are dropped first when full
pub const MAX_PARTICLES: usize = 120;

/// Motion and fade rate, the original per-frame steps expressed per second
const FADE_PER_SECOND: f32 = 1.2;

/// A single spark for the scene sink to draw
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub pos: Vec3,
    pub vel: Vec3,
    pub opacity: f32,
}

/// Active cosmetic particles
#[derive(Debug, Clone, Default)]
pub struct Effects {
    pub particles: Vec<Particle>,
}

impl Effects {
    /// Spawn a burst of sparks at a wall contact point
    pub fn spawn_wall_hit(&mut self, point: Vec3, rng: &mut Pcg32) {
        for _ in 0..WALL_HIT_PARTICLES {
            if self.particles.len() >= MAX_PARTICLES {
                self.particles.remove(0);
            }
            self.particles.push(Particle {
                pos: point,
                vel: Vec3::new(
                    rng.random_range(-1.0..1.0),
                    rng.random_range(0.0..2.0),
                    rng.random_range(-1.0..1.0),
                ),
                opacity: 0.5,
            });
        }
    }

    /// Advance and retire expired particles
    pub fn update(&mut self, dt: f32) {
        for p in &mut self.particles {
            p.pos += p.vel * FADE_PER_SECOND * dt;
            p.opacity -= FADE_PER_SECOND * dt;
        }
        self.particles.retain(|p| p.opacity > 0.0);
    }
}
