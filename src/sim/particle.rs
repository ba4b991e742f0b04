//! Trail particles
//!
//! Short-lived points a body drops behind it every tick. They drift, shrink
//! and fade; nothing collides with them.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::body::BodyColor;
use crate::config::ParticleConfig;

/// A decaying trail point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    /// Fixed at spawn
    pub vel: Vec2,
    /// Owner's color at spawn time
    pub color: BodyColor,
    /// 1.0 at spawn, expired at 0.0
    pub life: f32,
    pub size: f32,
    /// Ticks advanced since spawn
    pub age: u32,
}

impl Particle {
    pub fn new(pos: Vec2, vel: Vec2, size: f32, color: BodyColor) -> Self {
        Self {
            pos,
            vel,
            color,
            life: 1.0,
            size,
            age: 0,
        }
    }

    /// Spawn a particle at `pos` with randomized size and drift
    pub fn spawn<R: Rng + ?Sized>(
        pos: Vec2,
        color: BodyColor,
        config: &ParticleConfig,
        rng: &mut R,
    ) -> Self {
        let [size_lo, size_hi] = config.size_range;
        let [dx_lo, dx_hi] = config.drift_x;
        let [dy_lo, dy_hi] = config.drift_y;

        let size = rng.random_range(size_lo..size_hi);
        let vel = Vec2::new(rng.random_range(dx_lo..dx_hi), rng.random_range(dy_lo..dy_hi));
        Self::new(pos, vel, size, color)
    }

    /// Move one tick, fade and shrink
    pub fn advance(&mut self, config: &ParticleConfig) {
        self.pos += self.vel;
        self.age += 1;
        self.life = config.life_after(self.age);
        if self.size > config.min_size {
            self.size = (self.size - config.shrink).max(config.min_size);
        }
    }

    #[inline]
    pub fn is_expired(&self) -> bool {
        self.life <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn particle(size: f32) -> Particle {
        Particle::new(Vec2::new(100.0, 100.0), Vec2::new(0.25, 0.75), size, BodyColor::White)
    }

    #[test]
    fn test_expires_after_exactly_fifty_advances() {
        let config = ParticleConfig::default();
        let mut p = particle(3.0);

        for tick in 1..=49 {
            p.advance(&config);
            assert!(!p.is_expired(), "expired early at tick {}", tick);
        }
        p.advance(&config);
        assert!(p.is_expired());
        assert_eq!(p.age, 50);
    }

    #[test]
    fn test_life_strictly_decreases() {
        let config = ParticleConfig::default();
        let mut p = particle(3.0);
        let mut last = p.life;
        while !p.is_expired() {
            p.advance(&config);
            assert!(p.life < last);
            last = p.life;
        }
    }

    #[test]
    fn test_size_floor() {
        let config = ParticleConfig::default();
        // 0.25 would overshoot to 0.15 without the floor
        let mut p = particle(0.25);
        p.advance(&config);
        assert_eq!(p.size, 0.2);

        let mut p = particle(4.99);
        for _ in 0..200 {
            p.advance(&config);
            assert!(p.size >= 0.2);
        }
        assert_eq!(p.size, 0.2);
    }

    #[test]
    fn test_position_drifts_by_velocity() {
        let config = ParticleConfig::default();
        let mut p = particle(3.0);
        p.advance(&config);
        p.advance(&config);
        assert!((p.pos.x - 100.5).abs() < 0.0001);
        assert!((p.pos.y - 101.5).abs() < 0.0001);
    }

    #[test]
    fn test_spawn_ranges() {
        let config = ParticleConfig::default();
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..500 {
            let p = Particle::spawn(Vec2::new(10.0, 20.0), BodyColor::Red, &config, &mut rng);
            assert!((2.0..5.0).contains(&p.size));
            assert!((-0.5..0.5).contains(&p.vel.x));
            assert!((0.5..1.0).contains(&p.vel.y));
            assert_eq!(p.life, 1.0);
            assert_eq!(p.color, BodyColor::Red);
        }
    }
}
