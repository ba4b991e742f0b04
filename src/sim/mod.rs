//! Physics simulation module
//!
//! All motion and collision logic lives here. Nothing in this module draws:
//! - Bodies integrate, bounce off walls and own their trail particles
//! - Collisions are brute-force over every unordered pair
//! - One tick runs to completion; pacing belongs to the caller

pub mod body;
pub mod collision;
pub mod particle;
pub mod state;
pub mod tick;

pub use body::{Body, BodyColor};
pub use collision::{CollisionOutcome, CollisionParams, Contact, resolve};
pub use particle::Particle;
pub use state::SimState;
pub use tick::{TickStats, cycle_colors, resolve_collisions, step_bodies, tick};
