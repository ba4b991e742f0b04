//! Body-body collision detection and response
//!
//! Equal-mass elastic collisions between circles: an impulse along the
//! contact normal, followed by a soft positional correction so resting
//! contacts do not sink into each other.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::Body;
use crate::consts::{COLLISION_RESTITUTION, CORRECTION_PERCENT, CORRECTION_SLOP};

/// Collision response tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CollisionParams {
    /// Fraction of normal relative velocity kept after impact
    pub restitution: f32,
    /// Penetration ignored by positional correction
    pub slop: f32,
    /// Fraction of remaining penetration removed (split between both bodies)
    pub percent: f32,
}

impl Default for CollisionParams {
    fn default() -> Self {
        Self {
            restitution: COLLISION_RESTITUTION,
            slop: CORRECTION_SLOP,
            percent: CORRECTION_PERCENT,
        }
    }
}

/// Details of a resolved collision
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Unit normal pointing from `b` toward `a`
    pub normal: Vec2,
    /// Overlap depth before correction
    pub penetration: f32,
    /// Velocity change applied to `a` (`b` received the negation)
    pub impulse: Vec2,
    /// Displacement applied to `a` (`b` received the negation)
    pub correction: Vec2,
}

/// What `resolve` did with a pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CollisionOutcome {
    /// Circles do not overlap
    Apart,
    /// Centers coincide, so there is no normal to push along
    Coincident,
    /// Overlapping but already moving apart
    Separating,
    Resolved(Contact),
}

impl CollisionOutcome {
    pub fn is_resolved(&self) -> bool {
        matches!(self, CollisionOutcome::Resolved(_))
    }

    pub fn contact(&self) -> Option<&Contact> {
        match self {
            CollisionOutcome::Resolved(contact) => Some(contact),
            _ => None,
        }
    }
}

/// Resolve a collision between two bodies in place
pub fn resolve(a: &mut Body, b: &mut Body, params: &CollisionParams) -> CollisionOutcome {
    let d = a.pos - b.pos;
    let distance = d.length();
    let radii = a.radius + b.radius;

    if distance >= radii {
        return CollisionOutcome::Apart;
    }
    if distance == 0.0 {
        return CollisionOutcome::Coincident;
    }

    let normal = d / distance;
    let vn = (a.vel - b.vel).dot(normal);

    // Resolving a separating pair would glue the bodies together
    if vn > 0.0 {
        return CollisionOutcome::Separating;
    }

    let j = -(1.0 + params.restitution) * vn;
    let impulse = normal * j;
    a.vel += impulse;
    b.vel -= impulse;

    let penetration = radii - distance;
    let correction = normal * ((penetration - params.slop).max(0.0) * params.percent / 2.0);
    a.pos += correction;
    b.pos -= correction;

    CollisionOutcome::Resolved(Contact {
        normal,
        penetration,
        impulse,
        correction,
    })
}
