//! Draw list generation
//!
//! Turns a [`SimState`] into a flat triangle list. This pass only reads the
//! state; all mutation happens in [`crate::sim::tick`]. Whatever consumes the
//! vertices (GPU, software rasterizer, test) owns the actual drawing.

pub mod shapes;
pub mod vertex;

pub use vertex::{Vertex, as_bytes};

use glam::Vec2;

use crate::config::SeamStyle;
use crate::sim::{Body, SimState};
use vertex::{colors, opaque};

/// Tessellation settings
#[derive(Debug, Clone, Copy)]
pub struct FrameStyle {
    pub body_segments: u32,
    pub particle_segments: u32,
    pub seam_samples: u32,
    pub outline_width: f32,
    pub seam_width: f32,
}

impl Default for FrameStyle {
    fn default() -> Self {
        Self {
            body_segments: 32,
            particle_segments: 8,
            seam_samples: 12,
            outline_width: 1.0,
            seam_width: 1.5,
        }
    }
}

/// Build the draw list for the current state
///
/// Order: translucent background, then per body its trail followed by the
/// ball itself, so each ball sits on top of its own trail.
pub fn build_frame(state: &SimState, style: &FrameStyle) -> Vec<Vertex> {
    let seams = state.config.seam_style;
    let mut vertices = shapes::rect(Vec2::ZERO, state.config.arena.size(), colors::BACKGROUND);

    for body in &state.bodies {
        body_trail(&mut vertices, body, seams, style);
        body_disc(&mut vertices, body, seams, style);
    }

    vertices
}

fn body_trail(out: &mut Vec<Vertex>, body: &Body, seams: SeamStyle, style: &FrameStyle) {
    for particle in &body.particles {
        let rgb = match seams {
            SeamStyle::Volleyball => colors::TRAIL,
            SeamStyle::Plain => particle.color.rgb(),
        };
        out.extend(shapes::trail_particle(particle, rgb, style.particle_segments));
    }
}

fn body_disc(out: &mut Vec<Vertex>, body: &Body, seams: SeamStyle, style: &FrameStyle) {
    let fill = match seams {
        SeamStyle::Volleyball => colors::BALL,
        SeamStyle::Plain => opaque(body.color.rgb()),
    };
    out.extend(shapes::circle(body.pos, body.radius, fill, style.body_segments));
    out.extend(shapes::ring(
        body.pos,
        body.radius - style.outline_width,
        body.radius,
        colors::SEAM,
        style.body_segments,
    ));

    if seams == SeamStyle::Volleyball {
        out.extend(shapes::volleyball_seams(
            body.pos,
            body.radius,
            style.seam_width,
            style.seam_samples,
        ));
    }
}
