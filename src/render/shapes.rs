//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::{FRAC_PI_3, PI};

use super::vertex::{Vertex, colors, with_alpha};
use crate::polar_to_cartesian;
use crate::sim::Particle;

/// Number of curved seams on a volleyball
pub const SEAM_COUNT: u32 = 6;

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;
        let p1 = center + polar_to_cartesian(radius, theta1);
        let p2 = center + polar_to_cartesian(radius, theta2);

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(p1.x, p1.y, color));
        vertices.push(Vertex::new(p2.x, p2.y, color));
    }

    vertices
}

/// Generate vertices for a ring (circle outline of a given width)
pub fn ring(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 6) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        let inner1 = center + polar_to_cartesian(inner_radius, theta1);
        let outer1 = center + polar_to_cartesian(outer_radius, theta1);
        let inner2 = center + polar_to_cartesian(inner_radius, theta2);
        let outer2 = center + polar_to_cartesian(outer_radius, theta2);

        // Two triangles per segment
        vertices.push(Vertex::new(inner1.x, inner1.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(inner2.x, inner2.y, color));

        vertices.push(Vertex::new(inner2.x, inner2.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(outer2.x, outer2.y, color));
    }

    vertices
}

/// Generate vertices for an axis-aligned rectangle
pub fn rect(min: Vec2, max: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    vec![
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
    ]
}

/// Generate a thick line through `points` as one quad per segment
pub fn polyline(points: &[Vec2], width: f32, color: [f32; 4]) -> Vec<Vertex> {
    if points.len() < 2 {
        return Vec::new();
    }

    let half = width / 2.0;
    let mut vertices = Vec::with_capacity((points.len() - 1) * 6);

    for pair in points.windows(2) {
        let (p1, p2) = (pair[0], pair[1]);
        let dir = (p2 - p1).normalize_or_zero();
        // Perpendicular for width
        let perp = Vec2::new(-dir.y, dir.x) * half;

        let v1a = p1 + perp;
        let v1b = p1 - perp;
        let v2a = p2 + perp;
        let v2b = p2 - perp;

        vertices.push(Vertex::new(v1a.x, v1a.y, color));
        vertices.push(Vertex::new(v1b.x, v1b.y, color));
        vertices.push(Vertex::new(v2a.x, v2a.y, color));

        vertices.push(Vertex::new(v2a.x, v2a.y, color));
        vertices.push(Vertex::new(v1b.x, v1b.y, color));
        vertices.push(Vertex::new(v2b.x, v2b.y, color));
    }

    vertices
}

/// Point on a cubic Bézier curve at `t` in [0, 1]
#[inline]
pub fn cubic_bezier(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2, t: f32) -> Vec2 {
    let u = 1.0 - t;
    p0 * (u * u * u) + p1 * (3.0 * u * u * t) + p2 * (3.0 * u * t * t) + p3 * (t * t * t)
}

/// Sample the curved seams of a volleyball centered at `center`
///
/// Each seam bows from the top of the ball to the bottom through
/// `(r/2, -r/2)` and `(r/2, r/2)`, and the pattern is rotated in 60° steps.
pub fn volleyball_seam_paths(center: Vec2, radius: f32, samples: u32) -> Vec<Vec<Vec2>> {
    let p0 = Vec2::new(0.0, -radius);
    let c1 = Vec2::new(radius * 0.5, -radius * 0.5);
    let c2 = Vec2::new(radius * 0.5, radius * 0.5);
    let p3 = Vec2::new(0.0, radius);

    (1..=SEAM_COUNT)
        .map(|i| {
            let rotation = Vec2::from_angle(i as f32 * FRAC_PI_3);
            (0..=samples)
                .map(|s| {
                    let t = s as f32 / samples as f32;
                    center + rotation.rotate(cubic_bezier(p0, c1, c2, p3, t))
                })
                .collect()
        })
        .collect()
}

/// Generate vertices for the volleyball seam pattern
pub fn volleyball_seams(center: Vec2, radius: f32, width: f32, samples: u32) -> Vec<Vertex> {
    volleyball_seam_paths(center, radius, samples)
        .iter()
        .flat_map(|path| polyline(path, width, colors::SEAM))
        .collect()
}

/// Generate vertices for a trail particle, faded by its remaining life
pub fn trail_particle(particle: &Particle, rgb: [f32; 3], segments: u32) -> Vec<Vertex> {
    let color = with_alpha(rgb, particle.life * 0.3);
    circle(particle.pos, particle.size, color, segments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::BodyColor;

    #[test]
    fn test_circle_vertex_count_and_extent() {
        let center = Vec2::new(50.0, 50.0);
        let verts = circle(center, 10.0, colors::BALL, 16);
        assert_eq!(verts.len(), 48);
        for v in &verts {
            let p = Vec2::from(v.position);
            assert!(p.distance(center) <= 10.0 + 0.001);
        }
    }

    #[test]
    fn test_bezier_endpoints() {
        let a = Vec2::new(0.0, -1.0);
        let d = Vec2::new(0.0, 1.0);
        let b = Vec2::new(0.5, -0.5);
        let c = Vec2::new(0.5, 0.5);
        assert_eq!(cubic_bezier(a, b, c, d, 0.0), a);
        assert_eq!(cubic_bezier(a, b, c, d, 1.0), d);
        // Symmetric control points put the midpoint on the x axis
        let mid = cubic_bezier(a, b, c, d, 0.5);
        assert!((mid.x - 0.375).abs() < 0.0001);
        assert!(mid.y.abs() < 0.0001);
    }

    #[test]
    fn test_seams_stay_on_ball() {
        let center = Vec2::new(100.0, 100.0);
        let paths = volleyball_seam_paths(center, 20.0, 8);
        assert_eq!(paths.len(), SEAM_COUNT as usize);
        for path in &paths {
            assert_eq!(path.len(), 9);
            for p in path {
                assert!(p.distance(center) <= 20.0 + 0.001);
            }
            // Every seam runs pole to pole
            assert!((path[0].distance(center) - 20.0).abs() < 0.001);
            assert!((path[8].distance(center) - 20.0).abs() < 0.001);
        }
    }

    #[test]
    fn test_polyline_degenerate() {
        assert!(polyline(&[Vec2::ZERO], 1.0, colors::SEAM).is_empty());
        let verts = polyline(&[Vec2::ZERO, Vec2::ZERO], 1.0, colors::SEAM);
        assert!(verts.iter().all(|v| v.position[0].is_finite()));
    }

    #[test]
    fn test_trail_alpha_follows_life() {
        let mut particle = Particle::new(Vec2::new(5.0, 5.0), Vec2::ZERO, 3.0, BodyColor::White);
        let fresh = trail_particle(&particle, colors::TRAIL, 6);
        assert!((fresh[0].color[3] - 0.3).abs() < 0.0001);

        particle.life = 0.5;
        let faded = trail_particle(&particle, colors::TRAIL, 6);
        assert!((faded[0].color[3] - 0.15).abs() < 0.0001);
    }
}
