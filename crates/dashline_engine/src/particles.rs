//! Pooled particle effects.
//!
//! The emitter owns a fixed pool and reuses slots round-robin, so emitting
//! never allocates. Randomness comes from a seeded `ChaCha8Rng`: the same
//! seed and the same calls always give the same particles, and cloning the
//! emitter clones the generator state with it.

use std::f32::consts::TAU;

use dashline_foundation::Timestep;
use glam::{Vec2, Vec3, Vec4};
use log::warn;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::render::{DrawCommand, DrawList};

/// Default pool size.
pub const DEFAULT_POOL_SIZE: usize = 1000;

/// What to emit.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ParticleProps {
    /// Spawn point.
    pub position: Vec3,
    /// Base velocity.
    pub velocity: Vec2,
    /// Random spread applied to each velocity axis.
    pub velocity_variation: Vec2,
    /// Color at birth.
    pub color_begin: Vec4,
    /// Color at death.
    pub color_end: Vec4,
    /// Size at birth.
    pub size_begin: f32,
    /// Size at death.
    pub size_end: f32,
    /// Random spread applied to the birth size.
    pub size_variation: f32,
    /// Seconds a particle lives.
    pub lifetime: f32,
}

impl Default for ParticleProps {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            velocity: Vec2::ZERO,
            velocity_variation: Vec2::new(3.0, 1.0),
            color_begin: Vec4::new(254.0 / 255.0, 212.0 / 255.0, 123.0 / 255.0, 1.0),
            color_end: Vec4::new(254.0 / 255.0, 109.0 / 255.0, 41.0 / 255.0, 1.0),
            size_begin: 0.5,
            size_end: 0.0,
            size_variation: 0.3,
            lifetime: 1.0,
        }
    }
}

#[derive(Copy, Clone, Debug, Default)]
struct Particle {
    position: Vec3,
    velocity: Vec2,
    color_begin: Vec4,
    color_end: Vec4,
    rotation: f32,
    size_begin: f32,
    size_end: f32,
    lifetime: f32,
    life_remaining: f32,
    active: bool,
}

impl Particle {
    /// 1.0 at birth, 0.0 at death.
    fn life(&self) -> f32 {
        if self.lifetime > 0.0 {
            (self.life_remaining / self.lifetime).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

/// Fixed-size particle pool.
#[derive(Clone, Debug)]
pub struct ParticleEmitter {
    pool: Vec<Particle>,
    /// Next slot to overwrite; walks downwards.
    next: usize,
    rng: ChaCha8Rng,
}

impl Default for ParticleEmitter {
    fn default() -> Self {
        Self::new(DEFAULT_POOL_SIZE, 0)
    }
}

impl ParticleEmitter {
    /// Creates an emitter with `pool_size` slots and a fixed seed.
    #[must_use]
    pub fn new(pool_size: usize, seed: u64) -> Self {
        Self {
            pool: vec![Particle::default(); pool_size],
            next: pool_size.saturating_sub(1),
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Spawns one particle, recycling the oldest slot.
    pub fn emit(&mut self, props: &ParticleProps) {
        if self.pool.is_empty() {
            warn!("particle pool is empty, dropping emission");
            return;
        }

        let spread = |rng: &mut ChaCha8Rng| rng.gen_range(-0.5f32..0.5);
        let velocity = props.velocity
            + props.velocity_variation * Vec2::new(spread(&mut self.rng), spread(&mut self.rng));
        let size_begin = props.size_begin + props.size_variation * spread(&mut self.rng);
        let rotation = self.rng.gen_range(0.0..TAU);

        self.pool[self.next] = Particle {
            position: props.position,
            velocity,
            color_begin: props.color_begin,
            color_end: props.color_end,
            rotation,
            size_begin,
            size_end: props.size_end,
            lifetime: props.lifetime,
            life_remaining: props.lifetime,
            active: true,
        };

        self.next = self.next.checked_sub(1).unwrap_or(self.pool.len() - 1);
    }

    /// Spawns `count` particles with the same props.
    pub fn burst(&mut self, props: &ParticleProps, count: usize) {
        for _ in 0..count {
            self.emit(props);
        }
    }

    /// Ages and moves every live particle.
    pub fn on_update(&mut self, ts: Timestep) {
        let dt = ts.seconds();
        for particle in self.pool.iter_mut().filter(|p| p.active) {
            if particle.life_remaining <= 0.0 {
                particle.active = false;
                continue;
            }
            particle.life_remaining -= dt;
            particle.position += (particle.velocity * dt).extend(0.0);
            particle.rotation += 0.01 * dt;
        }
    }

    /// Appends a quad per live particle, fading color and size with age.
    pub fn draw(&self, list: &mut DrawList) {
        list.extend(self.pool.iter().filter(|p| p.active).map(|particle| {
            let life = particle.life();
            let size = particle.size_end + (particle.size_begin - particle.size_end) * life;
            DrawCommand::RotatedQuad {
                position: particle.position,
                size: Vec2::splat(size),
                rotation: particle.rotation.to_degrees(),
                color: particle.color_end.lerp(particle.color_begin, life),
            }
        }));
    }

    /// Kills every particle.
    pub fn clear(&mut self) {
        for particle in &mut self.pool {
            particle.active = false;
        }
    }

    /// Returns the number of live particles.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.pool.iter().filter(|p| p.active).count()
    }

    /// Returns the pool size.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.pool.len()
    }
}
