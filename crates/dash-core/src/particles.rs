//! Particle pool: typed bursts, per-frame integration and packing into a
//! reusable instance buffer for a single instanced draw.

use crate::constants::*;
use crate::math::{random_between_with, Positioned};
use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::VecDeque;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum ParticleKind {
    Sparkle = 0,
    Leaf = 1,
    Dust = 2,
    #[default]
    Default = 3,
}

impl ParticleKind {
    /// Map a host-side type tag; anything unknown falls back to `Default`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "sparkle" => Self::Sparkle,
            "leaf" => Self::Leaf,
            "dust" => Self::Dust,
            _ => Self::Default,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Sparkle => "sparkle",
            Self::Leaf => "leaf",
            Self::Dust => "dust",
            Self::Default => "default",
        }
    }

    pub const fn recipe(self) -> BurstRecipe {
        match self {
            Self::Sparkle => BurstRecipe {
                spread_xz: 1.0,
                vy_min: 1.0,
                vy_max: 3.0,
                life: 1.0,
                color: COLOR_GOLD,
                size: 0.1,
            },
            Self::Leaf => BurstRecipe {
                spread_xz: 0.25,
                vy_min: -0.5,
                vy_max: 0.0,
                life: 3.0,
                color: COLOR_BROWN,
                size: 0.2,
            },
            Self::Dust => BurstRecipe {
                spread_xz: 0.1,
                vy_min: 0.0,
                vy_max: 0.1,
                life: 2.0,
                color: COLOR_WHITE,
                size: 0.05,
            },
            Self::Default => BurstRecipe {
                spread_xz: 0.5,
                vy_min: 0.0,
                vy_max: 1.0,
                life: 1.0,
                color: COLOR_WHITE,
                size: 0.1,
            },
        }
    }

    /// Leaf and dust drift down; sparkles keep their launch velocity.
    #[inline]
    pub const fn has_gravity(self) -> bool {
        matches!(self, Self::Leaf | Self::Dust)
    }
}

/// Initial distribution for one particle type. Horizontal velocity is
/// uniform in `[-spread_xz, spread_xz)` on x and z.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BurstRecipe {
    pub spread_xz: f32,
    pub vy_min: f32,
    pub vy_max: f32,
    pub life: f32,
    pub color: [f32; 3],
    pub size: f32,
}

#[derive(Clone, Debug)]
pub struct Particle {
    pub position: Vec3,
    pub velocity: Vec3,
    pub life: f32,
    pub max_life: f32,
    pub color: [f32; 3],
    pub size: f32,
    pub rotation: f32,
    pub rotation_speed: f32,
    pub kind: ParticleKind,
}

impl Particle {
    /// Fraction of life remaining, used as render opacity.
    #[inline]
    pub fn opacity(&self) -> f32 {
        if self.max_life <= 0.0 {
            0.0
        } else {
            (self.life / self.max_life).clamp(0.0, 1.0)
        }
    }
}

impl Positioned for Particle {
    #[inline]
    fn position(&self) -> Vec3 {
        self.position
    }
}

/// GPU instance data, 48 bytes (3 rows of vec4).
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct ParticleInstance {
    pub pos_size: [f32; 4],      // xyz = position, w = size
    pub color: [f32; 4],         // rgb, a = remaining life fraction
    pub rotation_kind: [f32; 4], // x = rotation, y = kind, zw unused
}

impl ParticleInstance {
    pub fn from_particle(p: &Particle) -> Self {
        Self {
            pos_size: [p.position.x, p.position.y, p.position.z, p.size],
            color: [p.color[0], p.color[1], p.color[2], p.opacity()],
            rotation_kind: [p.rotation, p.kind as u8 as f32, 0.0, 0.0],
        }
    }
}

/// Scene capability: receives every live particle in one instanced batch.
pub trait ParticleScene {
    fn draw_particles(&mut self, instances: &[ParticleInstance]);
}

pub struct ParticlePool {
    particles: VecDeque<Particle>,
    max_particles: usize,
    instances: Vec<ParticleInstance>,
    evicted: u64,
    rng: StdRng,
}

impl ParticlePool {
    pub fn new(max_particles: usize) -> Self {
        Self::with_rng(max_particles, StdRng::from_entropy())
    }

    pub fn with_seed(max_particles: usize, seed: u64) -> Self {
        Self::with_rng(max_particles, StdRng::seed_from_u64(seed))
    }

    fn with_rng(max_particles: usize, rng: StdRng) -> Self {
        Self {
            particles: VecDeque::with_capacity(max_particles),
            max_particles,
            instances: Vec::with_capacity(max_particles),
            evicted: 0,
            rng,
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn max_particles(&self) -> usize {
        self.max_particles
    }

    /// Particles dropped to make room for newer ones since creation.
    pub fn evicted(&self) -> u64 {
        self.evicted
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    /// Append `count` particles of `kind` at `position`. When the pool is
    /// full the oldest particles are evicted first.
    pub fn emit(&mut self, position: Vec3, count: usize, kind: ParticleKind) {
        if self.max_particles == 0 {
            return;
        }
        let recipe = kind.recipe();
        // Only the newest `max_particles` of a huge burst could survive anyway.
        let count = count.min(self.max_particles);
        for _ in 0..count {
            if self.particles.len() >= self.max_particles {
                self.particles.pop_front();
                self.evicted += 1;
            }
            let particle = self.spawn(position, kind, &recipe);
            self.particles.push_back(particle);
        }
    }

    fn spawn(&mut self, position: Vec3, kind: ParticleKind, recipe: &BurstRecipe) -> Particle {
        let rng = &mut self.rng;
        let velocity = Vec3::new(
            random_between_with(rng, -recipe.spread_xz, recipe.spread_xz),
            random_between_with(rng, recipe.vy_min, recipe.vy_max),
            random_between_with(rng, -recipe.spread_xz, recipe.spread_xz),
        );
        Particle {
            position,
            velocity,
            life: recipe.life,
            max_life: recipe.life,
            color: recipe.color,
            size: recipe.size,
            rotation: random_between_with(rng, 0.0, std::f32::consts::TAU),
            rotation_speed: random_between_with(rng, -PARTICLE_SPIN_MAX, PARTICLE_SPIN_MAX),
            kind,
        }
    }

    /// Integrate every particle by `dt` seconds and drop the expired ones.
    pub fn update(&mut self, dt: f32) {
        self.particles.retain_mut(|p| {
            p.position += p.velocity * dt;
            p.rotation += p.rotation_speed * dt;
            p.life -= dt;
            if p.kind.has_gravity() {
                p.velocity.y -= PARTICLE_GRAVITY * dt;
            }
            p.life > 0.0
        });
    }

    /// Pack live particles into the reused instance buffer and return it.
    pub fn instances(&mut self) -> &[ParticleInstance] {
        self.instances.clear();
        self.instances
            .extend(self.particles.iter().map(ParticleInstance::from_particle));
        &self.instances
    }

    pub fn render(&mut self, scene: &mut impl ParticleScene) {
        let instances = self.instances();
        scene.draw_particles(instances);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn particle_instance_layout() {
        assert_eq!(std::mem::size_of::<ParticleInstance>(), 48);
        assert_eq!(std::mem::align_of::<ParticleInstance>(), 4);
    }

    #[test]
    fn unknown_kind_name_falls_back_to_default() {
        assert_eq!(ParticleKind::from_name("confetti"), ParticleKind::Default);
        assert_eq!(ParticleKind::from_name("leaf"), ParticleKind::Leaf);
        assert_eq!(ParticleKind::Dust.name(), "dust");
    }
}
