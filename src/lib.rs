//! Volley Sim - bouncing balls with elastic collisions and particle trails
//!
//! Core modules:
//! - `sim`: Physics engine (bodies, particles, collisions, tick loop)
//! - `config`: Data-driven engine parameters and presets
//! - `render`: Read-only draw list built from simulation state
//! - `error`: Configuration errors

pub mod config;
pub mod error;
pub mod render;
pub mod sim;

pub use config::{Preset, SimConfig};
pub use error::ConfigError;

use glam::Vec2;

/// Simulation configuration constants
pub mod consts {
    /// Nominal tick length; physics constants are tuned per tick at this rate
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum ticks per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Arena dimensions
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Body defaults
    pub const BODY_RADIUS: f32 = 20.0;
    pub const BASE_SPEED: f32 = 3.0;
    pub const PURPLE_SPEED_MULTIPLIER: f32 = 1.5;
    /// Speed after turning purple
    pub const BOOST_SPEED: f32 = 8.0;
    /// Speed after leaving purple
    pub const RELEASE_SPEED: f32 = 4.0;

    /// Energy kept on a wall bounce
    pub const WALL_RESTITUTION: f32 = 0.85;
    /// Energy kept along the normal of a body-body collision
    pub const COLLISION_RESTITUTION: f32 = 0.85;
    /// Overlap tolerated before positional correction kicks in
    pub const CORRECTION_SLOP: f32 = 0.01;
    /// Fraction of the remaining overlap removed per collision
    pub const CORRECTION_PERCENT: f32 = 0.8;

    /// Particle defaults
    pub const PARTICLES_PER_TICK: u32 = 3;
    pub const BURST_PARTICLES_PER_TICK: u32 = 6;
    /// |dx| + |dy| above which a body emits a burst
    pub const BURST_SPEED_THRESHOLD: f32 = 5.0;
    pub const PARTICLE_LIFE_DECAY: f32 = 0.02;
    pub const PARTICLE_SHRINK: f32 = 0.1;
    pub const PARTICLE_MIN_SIZE: f32 = 0.2;
    /// Longest particle life a config may ask for (one minute of ticks)
    pub const MAX_PARTICLE_LIFETIME_TICKS: u32 = 3600;
}

/// Axis-aligned arena the bodies live in, origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Default for Arena {
    fn default() -> Self {
        Self::new(consts::ARENA_WIDTH, consts::ARENA_HEIGHT)
    }
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// True if a circle of `radius` at `center` lies fully inside the arena
    pub fn contains_circle(&self, center: Vec2, radius: f32) -> bool {
        center.x >= radius
            && center.x <= self.width - radius
            && center.y >= radius
            && center.y <= self.height - radius
    }

    /// Whether a circle of `radius` can fit at all
    pub fn fits(&self, radius: f32) -> bool {
        radius * 2.0 <= self.width && radius * 2.0 <= self.height
    }
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}
