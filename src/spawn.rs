//! Seeded placement of food particles.
//!
//! The same seed always produces the same field, which keeps screenshots and
//! tests stable. The window seeds from the system clock.

use std::f32::consts::TAU;

use glam::{Vec2, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::field::{FieldConfig, FoodParticle, ParticleId};

/// Random source for particle homes, float speeds and phases.
pub struct Spawner {
    rng: StdRng,
    texture_count: usize,
}

impl Spawner {
    /// `texture_count` of zero is treated as one.
    pub fn new(seed: u64, texture_count: usize) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            texture_count: texture_count.max(1),
        }
    }

    pub fn texture_count(&self) -> usize {
        self.texture_count
    }

    /// Random f32 in `min..max`; returns `min` for an empty range.
    #[inline]
    pub fn random_range(&mut self, min: f32, max: f32) -> f32 {
        if max <= min {
            return min;
        }
        self.rng.gen_range(min..max)
    }

    /// Random point in the field's travel box.
    pub fn random_home(&mut self, config: &FieldConfig) -> Vec3 {
        let half = config.travel_extents();
        Vec3::new(
            self.random_range(-half.x, half.x),
            self.random_range(-half.y, half.y),
            self.random_range(-config.depth, config.depth),
        )
    }

    /// Particle number `index`. Textures cycle in index order.
    pub fn spawn(&mut self, index: usize, config: &FieldConfig) -> FoodParticle {
        FoodParticle {
            id: ParticleId(index as u32),
            base: self.random_home(config),
            displacement: Vec2::ZERO,
            velocity: Vec2::ZERO,
            speed: self.random_range(config.float_speed_min, config.float_speed_max),
            phase: self.random_range(0.0, TAU),
            texture: index % self.texture_count,
        }
    }
}

/// Seed derived from the current time, 42 if the clock is before the epoch.
pub fn entropy_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(42)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_field() {
        let config = FieldConfig::default();
        let mut a = Spawner::new(7, 3);
        let mut b = Spawner::new(7, 3);
        for i in 0..9 {
            assert_eq!(a.spawn(i, &config), b.spawn(i, &config));
        }
    }

    #[test]
    fn test_spawn_within_bounds() {
        let config = FieldConfig::default();
        let mut spawner = Spawner::new(99, 3);
        for i in 0..30 {
            let p = spawner.spawn(i, &config);
            assert!(p.base.x.abs() <= config.half_width);
            assert!(p.base.y.abs() <= config.half_height);
            assert!(p.base.z.abs() <= config.depth);
            assert!(p.speed >= config.float_speed_min && p.speed < config.float_speed_max);
            assert!(p.phase >= 0.0 && p.phase < TAU);
        }
    }

    #[test]
    fn test_textures_cycle() {
        let config = FieldConfig::default();
        let mut spawner = Spawner::new(1, 3);
        let slots: Vec<usize> = (0..6).map(|i| spawner.spawn(i, &config).texture).collect();
        assert_eq!(slots, vec![0, 1, 2, 0, 1, 2]);
    }

    #[test]
    fn test_zero_textures_and_empty_range() {
        let mut spawner = Spawner::new(1, 0);
        assert_eq!(spawner.texture_count(), 1);
        assert_eq!(spawner.random_range(2.0, 2.0), 2.0);
    }
}
