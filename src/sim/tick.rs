//! Fixed-step simulation tick
//!
//! One tick moves every body (walls and trails included), then checks every
//! unordered pair of bodies for a collision. Collisions are resolved on the
//! already-moved positions; there is no swept test, so very fast bodies can
//! tunnel through each other.

use super::collision::resolve;
use super::state::SimState;

/// Counters from a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickStats {
    /// Pairs that received an impulse
    pub collisions: u32,
    /// Bodies that switched color this tick
    pub color_changes: u32,
    /// Live particles after the tick
    pub particles: usize,
}

/// Advance the simulation by one tick
pub fn tick(state: &mut SimState) -> TickStats {
    state.time_ticks += 1;

    let color_changes = cycle_colors(state);
    step_bodies(state);
    let collisions = resolve_collisions(state);

    TickStats {
        collisions,
        color_changes,
        particles: state.particle_count(),
    }
}

/// Periodic color change for bodies that cycle
pub fn cycle_colors(state: &mut SimState) -> u32 {
    let Some(interval) = state.config.color_change_interval else {
        return 0;
    };
    if interval == 0 || state.time_ticks % interval as u64 != 0 {
        return 0;
    }

    let SimState {
        bodies,
        config,
        rng,
        ..
    } = state;

    let mut changed = 0;
    for body in bodies.iter_mut().filter(|b| b.cycles_color) {
        body.change_color(&config.speed, rng);
        changed += 1;
    }
    changed
}

/// Update every body in array order
pub fn step_bodies(state: &mut SimState) {
    let SimState {
        bodies,
        config,
        rng,
        ..
    } = state;

    for body in bodies.iter_mut() {
        body.update(config, rng);
    }
}

/// Run the collision resolver over every unordered pair, lexicographically
pub fn resolve_collisions(state: &mut SimState) -> u32 {
    let params = state.config.collision;
    let bodies = &mut state.bodies;
    let mut collisions = 0;

    for i in 0..bodies.len() {
        let (head, tail) = bodies.split_at_mut(i + 1);
        let a = &mut head[i];
        for b in tail.iter_mut() {
            if resolve(a, b, &params).is_resolved() {
                collisions += 1;
            }
        }
    }

    collisions
}
