//! Engine parameters and presets
//!
//! Every tunable of the simulation lives in [`SimConfig`]. The historical
//! variants of the engine (volleyball court, purple rush, flat speed) are
//! just [`Preset`]s over the same struct. Configs can also be loaded from a
//! JSON file.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::Arena;
use crate::consts::*;
use crate::error::ConfigError;
use crate::sim::{BodyColor, CollisionParams};

/// Named configuration presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Preset {
    /// Five white volleyballs and four green balls on sand
    #[default]
    Volleyball,
    /// Mixed palette, color cycling, particle bursts on fast bodies
    PurpleRush,
    /// Flat base speed for every color
    Uniform,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Preset::Volleyball, Preset::PurpleRush, Preset::Uniform];

    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::Volleyball => "volleyball",
            Preset::PurpleRush => "purple-rush",
            Preset::Uniform => "uniform",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "volleyball" | "volley" => Some(Preset::Volleyball),
            "purple-rush" | "purple_rush" | "purple" => Some(Preset::PurpleRush),
            "uniform" | "flat" => Some(Preset::Uniform),
            _ => None,
        }
    }

    pub fn config(&self) -> SimConfig {
        SimConfig::from_preset(*self)
    }
}

/// How a body's launch speed and color-change retune are derived
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeedPolicy {
    /// Launch velocity per axis is `(u - 0.5) * base_speed * multiplier`
    pub base_speed: f32,
    /// Per-color launch multiplier; colors not listed use 1.0
    #[serde(default)]
    pub color_multipliers: BTreeMap<BodyColor, f32>,
    /// Color whose bodies run at `boost_speed` after a color change
    pub boost_color: BodyColor,
    pub boost_speed: f32,
    /// Speed a body drops to when it stops being `boost_color`
    pub release_speed: f32,
}

impl Default for SpeedPolicy {
    fn default() -> Self {
        let mut color_multipliers = BTreeMap::new();
        color_multipliers.insert(BodyColor::Purple, PURPLE_SPEED_MULTIPLIER);
        Self {
            base_speed: BASE_SPEED,
            color_multipliers,
            boost_color: BodyColor::Purple,
            boost_speed: BOOST_SPEED,
            release_speed: RELEASE_SPEED,
        }
    }
}

impl SpeedPolicy {
    /// Same base speed for every color
    pub fn uniform(base_speed: f32) -> Self {
        Self {
            base_speed,
            color_multipliers: BTreeMap::new(),
            ..Self::default()
        }
    }

    pub fn multiplier(&self, color: BodyColor) -> f32 {
        self.color_multipliers.get(&color).copied().unwrap_or(1.0)
    }

    /// Full launch span for one axis
    pub fn launch_scale(&self, color: BodyColor) -> f32 {
        self.base_speed * self.multiplier(color)
    }

    /// Target speed after switching from `previous` to `next`, if it changes
    pub fn retune_speed(&self, previous: BodyColor, next: BodyColor) -> Option<f32> {
        if next == self.boost_color {
            Some(self.boost_speed)
        } else if previous == self.boost_color {
            Some(self.release_speed)
        } else {
            None
        }
    }
}

/// Number of trail particles a body emits per tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum ParticleSpawn {
    /// Constant count every tick
    Flat { count: u32 },
    /// `burst` particles while |dx| + |dy| exceeds `speed_threshold`, else `base`
    Burst {
        base: u32,
        burst: u32,
        speed_threshold: f32,
    },
}

impl Default for ParticleSpawn {
    fn default() -> Self {
        ParticleSpawn::Flat {
            count: PARTICLES_PER_TICK,
        }
    }
}

impl ParticleSpawn {
    pub fn burst() -> Self {
        ParticleSpawn::Burst {
            base: PARTICLES_PER_TICK,
            burst: BURST_PARTICLES_PER_TICK,
            speed_threshold: BURST_SPEED_THRESHOLD,
        }
    }

    /// Particles to emit this tick for a body moving with `manhattan_speed`
    pub fn count(&self, manhattan_speed: f32) -> u32 {
        match *self {
            ParticleSpawn::Flat { count } => count,
            ParticleSpawn::Burst {
                base,
                burst,
                speed_threshold,
            } => {
                if manhattan_speed > speed_threshold {
                    burst
                } else {
                    base
                }
            }
        }
    }

    /// Upper bound on emitted particles per tick
    pub fn max_count(&self) -> u32 {
        match *self {
            ParticleSpawn::Flat { count } => count,
            ParticleSpawn::Burst { base, burst, .. } => base.max(burst),
        }
    }
}

/// Trail particle shape and decay
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleConfig {
    /// Initial size, uniform in `[min, max)`
    pub size_range: [f32; 2],
    /// Horizontal drift, uniform in `[min, max)`
    pub drift_x: [f32; 2],
    /// Vertical drift, uniform in `[min, max)` (positive is down-screen)
    pub drift_y: [f32; 2],
    /// Life lost per tick
    pub life_decay: f32,
    /// Size lost per tick until `min_size`
    pub shrink: f32,
    pub min_size: f32,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            size_range: [2.0, 5.0],
            drift_x: [-0.5, 0.5],
            drift_y: [0.5, 1.0],
            life_decay: PARTICLE_LIFE_DECAY,
            shrink: PARTICLE_SHRINK,
            min_size: PARTICLE_MIN_SIZE,
        }
    }
}

impl ParticleConfig {
    /// Remaining life after `age` ticks
    ///
    /// Recomputed from the age instead of accumulated so that a decay which
    /// divides 1.0 expires on exactly the expected tick.
    #[inline]
    pub fn life_after(&self, age: u32) -> f32 {
        (1.0 - age as f32 * self.life_decay).max(0.0)
    }

    /// Ticks from spawn to expiry
    ///
    /// `None` when particles would outlive [`MAX_PARTICLE_LIFETIME_TICKS`].
    pub fn lifetime_ticks(&self) -> Option<u32> {
        if !(self.life_decay > 0.0)
            || self.life_after(MAX_PARTICLE_LIFETIME_TICKS) > 0.0
        {
            return None;
        }
        let estimate = (1.0 / self.life_decay).floor() as u32;
        let mut ticks = estimate.clamp(1, MAX_PARTICLE_LIFETIME_TICKS);
        while self.life_after(ticks) > 0.0 {
            ticks += 1;
        }
        while ticks > 1 && self.life_after(ticks - 1) <= 0.0 {
            ticks -= 1;
        }
        Some(ticks)
    }
}

/// Group of bodies created at startup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodySpawn {
    pub color: BodyColor,
    pub count: u32,
    #[serde(default = "default_radius")]
    pub radius: f32,
    /// Whether these bodies take part in periodic color changes
    #[serde(default)]
    pub cycles_color: bool,
}

fn default_radius() -> f32 {
    BODY_RADIUS
}

impl BodySpawn {
    pub fn new(color: BodyColor, count: u32) -> Self {
        Self {
            color,
            count,
            radius: BODY_RADIUS,
            cycles_color: false,
        }
    }

    pub fn cycling(mut self) -> Self {
        self.cycles_color = true;
        self
    }
}

/// How the render pass decorates a body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SeamStyle {
    /// White ball with six curved seams, gray trails
    #[default]
    Volleyball,
    /// Solid disc in the body color, trails in the body color
    Plain,
}

/// Complete engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    #[serde(default)]
    pub arena: Arena,
    /// RNG seed; the binary derives one from the clock when absent
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub speed: SpeedPolicy,
    #[serde(default)]
    pub particle_spawn: ParticleSpawn,
    #[serde(default)]
    pub particles: ParticleConfig,
    #[serde(default = "default_wall_restitution")]
    pub wall_restitution: f32,
    #[serde(default)]
    pub collision: CollisionParams,
    /// Bodies created at startup, in order
    pub roster: Vec<BodySpawn>,
    /// Ticks between color changes for cycling bodies (None = never)
    #[serde(default)]
    pub color_change_interval: Option<u32>,
    #[serde(default)]
    pub seam_style: SeamStyle,
}

fn default_wall_restitution() -> f32 {
    WALL_RESTITUTION
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::from_preset(Preset::default())
    }
}

impl SimConfig {
    pub fn from_preset(preset: Preset) -> Self {
        let base = Self {
            arena: Arena::default(),
            seed: None,
            speed: SpeedPolicy::default(),
            particle_spawn: ParticleSpawn::default(),
            particles: ParticleConfig::default(),
            wall_restitution: WALL_RESTITUTION,
            collision: CollisionParams::default(),
            roster: Vec::new(),
            color_change_interval: None,
            seam_style: SeamStyle::Volleyball,
        };

        match preset {
            Preset::Volleyball => Self {
                roster: vec![
                    BodySpawn::new(BodyColor::White, 5),
                    BodySpawn::new(BodyColor::Green, 4),
                ],
                ..base
            },
            Preset::PurpleRush => Self {
                particle_spawn: ParticleSpawn::burst(),
                roster: [
                    BodyColor::Red,
                    BodyColor::Blue,
                    BodyColor::Green,
                    BodyColor::Orange,
                    BodyColor::Purple,
                    BodyColor::Yellow,
                    BodyColor::Cyan,
                ]
                .into_iter()
                .map(|color| BodySpawn::new(color, 1).cycling())
                .collect(),
                // Three seconds at 60 Hz
                color_change_interval: Some(180),
                seam_style: SeamStyle::Plain,
                ..base
            },
            Preset::Uniform => Self {
                speed: SpeedPolicy::uniform(4.5),
                roster: vec![
                    BodySpawn::new(BodyColor::Red, 3),
                    BodySpawn::new(BodyColor::Blue, 3),
                    BodySpawn::new(BodyColor::Magenta, 3),
                ],
                seam_style: SeamStyle::Plain,
                ..base
            },
        }
    }

    /// Total number of bodies the roster creates
    pub fn body_count(&self) -> usize {
        self.roster.iter().map(|s| s.count as usize).sum()
    }

    /// Expected live particles per body once spawn and decay balance out
    ///
    /// `None` when the particle lifetime is unbounded or the product does
    /// not fit in a `u32`.
    pub fn steady_state_particles_per_body(&self) -> Option<u32> {
        self.particles
            .lifetime_ticks()
            .and_then(|ticks| self.particle_spawn.max_count().checked_mul(ticks))
    }

    /// Check that the config describes a simulation that can run
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Invalid(msg));

        if !(self.arena.width > 0.0 && self.arena.height > 0.0)
            || !self.arena.width.is_finite()
            || !self.arena.height.is_finite()
        {
            return invalid(format!(
                "arena must be positive and finite, got {}x{}",
                self.arena.width, self.arena.height
            ));
        }

        for spawn in &self.roster {
            if !(spawn.radius > 0.0) || !spawn.radius.is_finite() {
                return invalid(format!(
                    "{} bodies need a positive radius, got {}",
                    spawn.color.as_str(),
                    spawn.radius
                ));
            }
            if !self.arena.fits(spawn.radius) {
                return invalid(format!(
                    "radius {} does not fit in a {}x{} arena",
                    spawn.radius, self.arena.width, self.arena.height
                ));
            }
        }

        for (name, value) in [
            ("wall_restitution", self.wall_restitution),
            ("collision.restitution", self.collision.restitution),
            ("collision.percent", self.collision.percent),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return invalid(format!("{name} must be within [0, 1], got {value}"));
            }
        }
        if !(self.collision.slop >= 0.0) {
            return invalid(format!("collision.slop must be >= 0, got {}", self.collision.slop));
        }

        let speeds = [
            self.speed.base_speed,
            self.speed.boost_speed,
            self.speed.release_speed,
        ];
        if speeds.iter().any(|s| !s.is_finite() || *s < 0.0)
            || self.speed.color_multipliers.values().any(|m| !m.is_finite())
        {
            return invalid("speeds and multipliers must be finite and non-negative".into());
        }

        let p = &self.particles;
        if !(p.life_decay > 0.0 && p.life_decay <= 1.0) {
            return invalid(format!("particles.life_decay must be in (0, 1], got {}", p.life_decay));
        }
        if p.lifetime_ticks().is_none() {
            return invalid(format!(
                "particles.life_decay {} keeps particles alive longer than {} ticks",
                p.life_decay, MAX_PARTICLE_LIFETIME_TICKS
            ));
        }
        if self.steady_state_particles_per_body().is_none() {
            return invalid(format!(
                "particle_spawn emits up to {} per tick, too many to bound",
                self.particle_spawn.max_count()
            ));
        }
        for (name, [lo, hi]) in [
            ("size_range", p.size_range),
            ("drift_x", p.drift_x),
            ("drift_y", p.drift_y),
        ] {
            if !(lo < hi) {
                return invalid(format!("particles.{name} must satisfy min < max, got [{lo}, {hi})"));
            }
        }
        if !(p.min_size >= 0.0) || !(p.shrink >= 0.0) {
            return invalid("particles.min_size and particles.shrink must be >= 0".into());
        }

        if self.color_change_interval == Some(0) {
            return invalid("color_change_interval must be at least 1 tick".into());
        }

        Ok(())
    }

    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!(
            "Loaded config from {} ({} bodies)",
            path.display(),
            config.body_count()
        );
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
