//! Simulation state
//!
//! The ordered body list plus everything a tick needs: config, RNG and the
//! tick counter.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use super::body::{Body, BodyColor};
use crate::config::SimConfig;

/// Complete simulation state
#[derive(Debug, Clone, Serialize)]
pub struct SimState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub config: SimConfig,
    /// Ticks simulated so far
    pub time_ticks: u64,
    /// Bodies in update/collision order
    pub bodies: Vec<Body>,
    #[serde(skip)]
    pub(crate) rng: Pcg32,
    next_id: u32,
}

impl SimState {
    /// Create a state and spawn the config's roster
    ///
    /// Bodies are placed uniformly inside the arena; overlaps at startup are
    /// left for the collision pass to push apart.
    pub fn new(config: SimConfig, seed: u64) -> Self {
        let mut state = Self::empty(config, seed);

        let roster = state.config.roster.clone();
        for spawn in &roster {
            for _ in 0..spawn.count {
                state.spawn_body(spawn.color, spawn.radius, spawn.cycles_color);
            }
        }

        log::info!(
            "Simulation created: {} bodies in {}x{} arena (seed {})",
            state.bodies.len(),
            state.config.arena.width,
            state.config.arena.height,
            seed
        );
        state
    }

    /// Create a state with no bodies
    pub fn empty(config: SimConfig, seed: u64) -> Self {
        Self {
            seed,
            config,
            time_ticks: 0,
            bodies: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Create a state from hand-placed bodies (scenarios, tests)
    pub fn with_bodies(config: SimConfig, seed: u64, bodies: Vec<Body>) -> Self {
        let mut state = Self::empty(config, seed);
        state.next_id = bodies.iter().map(|b| b.id).max().unwrap_or(0) + 1;
        state.bodies = bodies;
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Spawn a body at a random position fully inside the arena
    pub fn spawn_body(&mut self, color: BodyColor, radius: f32, cycles_color: bool) -> u32 {
        let id = self.next_entity_id();
        let arena = self.config.arena;
        let pos = Vec2::new(
            self.rng.random::<f32>() * (arena.width - radius * 2.0) + radius,
            self.rng.random::<f32>() * (arena.height - radius * 2.0) + radius,
        );
        let mut body = Body::spawn(id, pos, radius, color, &self.config.speed, &mut self.rng);
        body.cycles_color = cycles_color;
        self.bodies.push(body);
        id
    }

    pub fn body(&self, id: u32) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id == id)
    }

    /// Live trail particles across all bodies
    pub fn particle_count(&self) -> usize {
        self.bodies.iter().map(|b| b.particles.len()).sum()
    }

    /// Sum of body speeds, for diagnostics
    pub fn total_speed(&self) -> f32 {
        self.bodies.iter().map(|b| b.speed()).sum()
    }

    /// Bodies as JSON (particles are omitted)
    pub fn snapshot_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
