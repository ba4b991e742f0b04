//! Moving circular bodies
//!
//! A body integrates its own motion, bounces off the arena walls and owns the
//! trail particles it leaves behind.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::particle::Particle;
use crate::Arena;
use crate::config::{ParticleConfig, ParticleSpawn, SimConfig, SpeedPolicy};

/// Body palette; the color selects the speed tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyColor {
    Red,
    Blue,
    Green,
    Orange,
    White,
    Purple,
    Yellow,
    Cyan,
    Magenta,
}

impl BodyColor {
    pub const ALL: [BodyColor; 9] = [
        BodyColor::Red,
        BodyColor::Blue,
        BodyColor::Green,
        BodyColor::Orange,
        BodyColor::White,
        BodyColor::Purple,
        BodyColor::Yellow,
        BodyColor::Cyan,
        BodyColor::Magenta,
    ];

    /// CSS color name
    pub fn as_str(&self) -> &'static str {
        match self {
            BodyColor::Red => "red",
            BodyColor::Blue => "blue",
            BodyColor::Green => "green",
            BodyColor::Orange => "orange",
            BodyColor::White => "white",
            BodyColor::Purple => "purple",
            BodyColor::Yellow => "yellow",
            BodyColor::Cyan => "cyan",
            BodyColor::Magenta => "magenta",
        }
    }

    /// Linear RGB matching the CSS named color
    pub fn rgb(&self) -> [f32; 3] {
        match self {
            BodyColor::Red => [1.0, 0.0, 0.0],
            BodyColor::Blue => [0.0, 0.0, 1.0],
            BodyColor::Green => [0.0, 0.5, 0.0],
            BodyColor::Orange => [1.0, 0.647, 0.0],
            BodyColor::White => [1.0, 1.0, 1.0],
            BodyColor::Purple => [0.5, 0.0, 0.5],
            BodyColor::Yellow => [1.0, 1.0, 0.0],
            BodyColor::Cyan => [0.0, 1.0, 1.0],
            BodyColor::Magenta => [1.0, 0.0, 1.0],
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|c| *c == self).unwrap_or(0)
    }

    /// Uniformly random palette color other than `self`
    pub fn random_other<R: Rng + ?Sized>(self, rng: &mut R) -> Self {
        let current = self.index();
        let mut next = rng.random_range(0..Self::ALL.len() - 1);
        if next >= current {
            next += 1;
        }
        Self::ALL[next]
    }
}

/// A moving ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: BodyColor,
    /// Takes part in periodic color changes
    #[serde(default)]
    pub cycles_color: bool,
    /// Trail, oldest first (draw order only)
    #[serde(skip)]
    pub particles: Vec<Particle>,
}

impl Body {
    pub fn new(id: u32, pos: Vec2, radius: f32, color: BodyColor) -> Self {
        Self {
            id,
            pos,
            vel: Vec2::ZERO,
            radius,
            color,
            cycles_color: false,
            particles: Vec::new(),
        }
    }

    /// Create a body and launch it according to its color's speed tier
    pub fn spawn<R: Rng + ?Sized>(
        id: u32,
        pos: Vec2,
        radius: f32,
        color: BodyColor,
        policy: &SpeedPolicy,
        rng: &mut R,
    ) -> Self {
        let mut body = Self::new(id, pos, radius, color);
        body.launch(policy, rng);
        body
    }

    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }

    /// Pick a random launch velocity for the current color
    pub fn launch<R: Rng + ?Sized>(&mut self, policy: &SpeedPolicy, rng: &mut R) {
        let scale = policy.launch_scale(self.color);
        self.vel = Vec2::new(
            (rng.random::<f32>() - 0.5) * scale,
            (rng.random::<f32>() - 0.5) * scale,
        );
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// |dx| + |dy|, used by the burst spawn policy
    #[inline]
    pub fn manhattan_speed(&self) -> f32 {
        self.vel.x.abs() + self.vel.y.abs()
    }

    /// Rescale velocity after the color changed from `previous`
    ///
    /// Direction is preserved. A body at rest has no direction and keeps
    /// its zero velocity.
    pub fn retune_for_color(&mut self, previous: BodyColor, policy: &SpeedPolicy) {
        let Some(target) = policy.retune_speed(previous, self.color) else {
            return;
        };
        let speed = self.speed();
        if speed == 0.0 {
            return;
        }
        self.vel = self.vel / speed * target;
    }

    /// Switch to a different random color and retune; returns the old color
    pub fn change_color<R: Rng + ?Sized>(
        &mut self,
        policy: &SpeedPolicy,
        rng: &mut R,
    ) -> BodyColor {
        let previous = self.color;
        self.color = previous.random_other(rng);
        self.retune_for_color(previous, policy);
        log::debug!(
            "Body {} changed {} -> {} (speed {:.2})",
            self.id,
            previous.as_str(),
            self.color.as_str(),
            self.speed()
        );
        previous
    }

    /// Advance position one tick, bouncing off the arena walls
    ///
    /// Each axis is resolved on its own against the candidate position.
    pub fn integrate(&mut self, arena: &Arena, restitution: f32) {
        let next = self.pos + self.vel;
        let (x, vx) = bounce_axis(next.x, self.vel.x, self.radius, arena.width, restitution);
        let (y, vy) = bounce_axis(next.y, self.vel.y, self.radius, arena.height, restitution);
        self.pos = Vec2::new(x, y);
        self.vel = Vec2::new(vx, vy);
    }

    /// Drop this tick's batch of trail particles at the current position
    pub fn spawn_particles<R: Rng + ?Sized>(
        &mut self,
        spawn: &ParticleSpawn,
        config: &ParticleConfig,
        rng: &mut R,
    ) {
        let count = spawn.count(self.manhattan_speed());
        for _ in 0..count {
            self.particles.push(Particle::spawn(self.pos, self.color, config, rng));
        }
    }

    /// Advance every particle and drop the expired ones
    pub fn age_particles(&mut self, config: &ParticleConfig) {
        for particle in self.particles.iter_mut() {
            particle.advance(config);
        }
        self.particles.retain(|p| !p.is_expired());
    }

    /// One tick: move, emit, age
    pub fn update<R: Rng + ?Sized>(&mut self, config: &SimConfig, rng: &mut R) {
        self.integrate(&config.arena, config.wall_restitution);
        self.spawn_particles(&config.particle_spawn, &config.particles, rng);
        self.age_particles(&config.particles);
    }
}

/// Resolve one axis against the `[radius, extent - radius]` band
#[inline]
fn bounce_axis(next: f32, vel: f32, radius: f32, extent: f32, restitution: f32) -> (f32, f32) {
    if next < radius {
        (radius, vel.abs() * restitution)
    } else if next > extent - radius {
        (extent - radius, -vel.abs() * restitution)
    } else {
        (next, vel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Preset;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn body_at(x: f32, y: f32, vel: Vec2) -> Body {
        Body::new(1, Vec2::new(x, y), 20.0, BodyColor::White).with_velocity(vel)
    }

    #[test]
    fn test_integrate_free_flight() {
        let arena = Arena::default();
        let mut body = body_at(400.0, 300.0, Vec2::new(2.0, -1.0));
        body.integrate(&arena, 0.85);
        assert_eq!(body.pos, Vec2::new(402.0, 299.0));
        assert_eq!(body.vel, Vec2::new(2.0, -1.0));
    }

    #[test]
    fn test_wall_bounce_loses_energy() {
        let arena = Arena::default();

        // Right wall
        let mut body = body_at(778.0, 300.0, Vec2::new(4.0, 0.0));
        body.integrate(&arena, 0.85);
        assert_eq!(body.pos.x, 780.0);
        assert!((body.vel.x - (-3.4)).abs() < 0.0001);

        // Left wall
        let mut body = body_at(21.0, 300.0, Vec2::new(-4.0, 0.0));
        body.integrate(&arena, 0.85);
        assert_eq!(body.pos.x, 20.0);
        assert!((body.vel.x - 3.4).abs() < 0.0001);

        // Floor
        let mut body = body_at(400.0, 579.0, Vec2::new(0.0, 2.0));
        body.integrate(&arena, 0.85);
        assert_eq!(body.pos.y, 580.0);
        assert!((body.vel.y - (-1.7)).abs() < 0.0001);
    }

    #[test]
    fn test_axes_bounce_independently() {
        let arena = Arena::default();
        // Heading into the top-left corner: both axes bounce in the same tick
        let mut body = body_at(21.0, 21.0, Vec2::new(-3.0, -3.0));
        body.integrate(&arena, 0.85);
        assert_eq!(body.pos, Vec2::new(20.0, 20.0));
        assert!(body.vel.x > 0.0 && body.vel.y > 0.0);

        // Only x hits the wall; y moves freely
        let mut body = body_at(21.0, 300.0, Vec2::new(-3.0, 5.0));
        body.integrate(&arena, 0.85);
        assert_eq!(body.pos, Vec2::new(20.0, 305.0));
        assert_eq!(body.vel.y, 5.0);
    }

    #[test]
    fn test_retune_entering_and_leaving_purple() {
        let policy = SpeedPolicy::default();

        let mut body = body_at(400.0, 300.0, Vec2::new(3.0, 4.0));
        body.color = BodyColor::Purple;
        body.retune_for_color(BodyColor::Red, &policy);
        assert!((body.speed() - 8.0).abs() < 0.0001);
        assert!((body.vel.x - 4.8).abs() < 0.0001);
        assert!((body.vel.y - 6.4).abs() < 0.0001);

        body.color = BodyColor::Green;
        body.retune_for_color(BodyColor::Purple, &policy);
        assert!((body.speed() - 4.0).abs() < 0.0001);
        assert!((body.vel.x - 2.4).abs() < 0.0001);
    }

    #[test]
    fn test_retune_other_colors_keeps_velocity() {
        let policy = SpeedPolicy::default();
        let mut body = body_at(400.0, 300.0, Vec2::new(1.0, -2.0));
        body.color = BodyColor::Cyan;
        body.retune_for_color(BodyColor::Orange, &policy);
        assert_eq!(body.vel, Vec2::new(1.0, -2.0));
    }

    #[test]
    fn test_retune_at_rest_is_noop() {
        let policy = SpeedPolicy::default();
        let mut body = body_at(400.0, 300.0, Vec2::ZERO);
        body.color = BodyColor::Purple;
        body.retune_for_color(BodyColor::Red, &policy);
        assert_eq!(body.vel, Vec2::ZERO);
        assert!(!body.vel.x.is_nan());
    }

    #[test]
    fn test_change_color_always_differs() {
        let policy = SpeedPolicy::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut body = body_at(400.0, 300.0, Vec2::new(1.0, 1.0));
        for _ in 0..100 {
            let previous = body.change_color(&policy, &mut rng);
            assert_ne!(previous, body.color);
            if body.color == BodyColor::Purple {
                assert!((body.speed() - 8.0).abs() < 0.001);
            } else if previous == BodyColor::Purple {
                assert!((body.speed() - 4.0).abs() < 0.001);
            }
        }
    }

    #[test]
    fn test_random_other_covers_palette() {
        let mut rng = Pcg32::seed_from_u64(11);
        let mut seen = std::collections::BTreeSet::new();
        for _ in 0..500 {
            let c = BodyColor::White.random_other(&mut rng);
            assert_ne!(c, BodyColor::White);
            seen.insert(c);
        }
        assert_eq!(seen.len(), BodyColor::ALL.len() - 1);
    }

    #[test]
    fn test_launch_respects_speed_tier() {
        let policy = SpeedPolicy::default();
        let mut rng = Pcg32::seed_from_u64(5);
        for _ in 0..200 {
            let pos = Vec2::new(100.0, 100.0);
            let white = Body::spawn(1, pos, 20.0, BodyColor::White, &policy, &mut rng);
            assert!(white.vel.x.abs() <= 1.5 && white.vel.y.abs() <= 1.5);
            let purple = Body::spawn(2, pos, 20.0, BodyColor::Purple, &policy, &mut rng);
            assert!(purple.vel.x.abs() <= 2.25 && purple.vel.y.abs() <= 2.25);
        }
    }

    #[test]
    fn test_burst_spawns_more_particles() {
        let config = ParticleConfig::default();
        let spawn = ParticleSpawn::burst();
        let mut rng = Pcg32::seed_from_u64(1);

        let mut slow = body_at(400.0, 300.0, Vec2::new(2.0, 2.0));
        slow.spawn_particles(&spawn, &config, &mut rng);
        assert_eq!(slow.particles.len(), 3);

        let mut fast = body_at(400.0, 300.0, Vec2::new(4.0, -2.0));
        fast.spawn_particles(&spawn, &config, &mut rng);
        assert_eq!(fast.particles.len(), 6);
        assert!(fast.particles.iter().all(|p| p.pos == fast.pos));
    }

    #[test]
    fn test_particles_reach_steady_state() {
        let config = SimConfig::from_preset(Preset::Volleyball);
        let mut rng = Pcg32::seed_from_u64(9);
        let mut body = body_at(400.0, 300.0, Vec2::new(1.0, 0.5));

        for _ in 0..49 {
            body.update(&config, &mut rng);
        }
        // Nothing has expired yet: 49 ticks of 3 particles each
        assert_eq!(body.particles.len(), 147);

        for _ in 0..200 {
            body.update(&config, &mut rng);
            assert_eq!(body.particles.len(), 147);
        }
        assert!(body.particles.len() as u32 <= config.steady_state_particles_per_body().unwrap());
    }

    proptest! {
        #[test]
        fn prop_integrate_keeps_body_inside(
            x in -50.0f32..850.0,
            y in -50.0f32..650.0,
            vx in -30.0f32..30.0,
            vy in -30.0f32..30.0,
            radius in 1.0f32..100.0,
        ) {
            let arena = Arena::default();
            let mut body = Body::new(1, Vec2::new(x, y), radius, BodyColor::Red)
                .with_velocity(Vec2::new(vx, vy));
            for _ in 0..20 {
                body.integrate(&arena, 0.85);
                prop_assert!(arena.contains_circle(body.pos, body.radius));
            }
        }

        #[test]
        fn prop_wall_bounce_never_amplifies(
            vx in -30.0f32..30.0,
            vy in -30.0f32..30.0,
        ) {
            let arena = Arena::default();
            let mut body = body_at(400.0, 300.0, Vec2::new(vx, vy));
            for _ in 0..100 {
                let before = body.vel;
                body.integrate(&arena, 0.85);
                for (b, a) in [(before.x, body.vel.x), (before.y, body.vel.y)] {
                    prop_assert!(a == b || (a.abs() - b.abs() * 0.85).abs() < 1e-6);
                    prop_assert!(a.abs() <= b.abs());
                }
            }
        }
    }
}
