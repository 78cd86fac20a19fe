//! Tapered, faceted line tool.
//!
//! The stroke is cut into facets along the start-end chord. Each facet is a
//! quad spanning two cross-section edges; the edge vectors are interpolated
//! between the start and end sample orientation (pen azimuth, or the normal
//! of the chord when the device reports none) and shrink towards both ends.
//! The rake texture replaces every facet by a row of thin tines.

use super::{Brush, StrokeInput, Texture, ToolGeometry};
use crate::draw::Shape;
use crate::input::PointerSample;
use crate::util::{Point, map_range};
use std::f64::consts::{FRAC_PI_2, PI};

const MIN_FACETS: f64 = 2.0;
const MAX_FACETS: f64 = 24.0;
const RAKE_TINES: usize = 4;
/// Share of a tine slot that is actually filled
const TINE_FILL: f64 = 0.6;

pub(super) struct SharpLine;

/// Number of facets for a brush of `size` pixels.
pub(crate) fn facet_count(size: f64) -> usize {
    (size / 25.0).round().clamp(MIN_FACETS, MAX_FACETS) as usize
}

/// Cross-section taper at chord position `t` in `[0, 1]`.
fn taper(t: f64) -> f64 {
    0.2 + 0.8 * (PI * t).sin()
}

/// Half-edge vector of a sample: oriented along the azimuth when present,
/// otherwise perpendicular to the chord, scaled by pressure.
fn edge_vector(sample: &PointerSample, chord_angle: f64, half_width: f64) -> Point {
    let angle = sample.angle.unwrap_or(chord_angle + FRAC_PI_2);
    let scale = sample
        .pressure
        .map(|p| map_range(p, 0.0, 0.2, 0.3, 1.0, true))
        .unwrap_or(1.0);
    let (sin, cos) = angle.sin_cos();
    Point::new(cos * half_width * scale, sin * half_width * scale)
}

fn scaled(v: Point, factor: f64) -> Point {
    Point::new(v.x * factor, v.y * factor)
}

fn shifted(p: Point, v: Point, factor: f64) -> Point {
    p.offset(v.x * factor, v.y * factor)
}

impl ToolGeometry for SharpLine {
    fn generate(&self, stroke: &StrokeInput<'_>, brush: &Brush<'_>) -> Vec<Shape> {
        let (Some(start), Some(end)) = (stroke.start, stroke.end) else {
            return Vec::new();
        };
        let (a, b) = (start.position, end.position);
        if a.distance(b) < f64::EPSILON {
            return Vec::new();
        }

        let size = brush.size();
        let chord_angle = a.angle_to(b);
        let start_edge = edge_vector(start, chord_angle, size / 2.0);
        let end_edge = edge_vector(end, chord_angle, size / 2.0);
        let facets = facet_count(size);

        // cross-section (centre, half edge) at every facet boundary
        let sections: Vec<(Point, Point)> = (0..=facets)
            .map(|i| {
                let t = i as f64 / facets as f64;
                (a.lerp(b, t), scaled(start_edge.lerp(end_edge, t), taper(t)))
            })
            .collect();

        let rake = brush.texture() == Some(Texture::Rake);
        let mut shapes = Vec::with_capacity(if rake { facets * RAKE_TINES } else { facets });

        for (i, pair) in sections.windows(2).enumerate() {
            let (c0, e0) = pair[0];
            let (c1, e1) = pair[1];
            if rake {
                let slot = 2.0 / RAKE_TINES as f64;
                let half = slot * TINE_FILL / 2.0;
                for j in 0..RAKE_TINES {
                    let mid = -1.0 + slot * (j as f64 + 0.5);
                    shapes.push(Shape::polygon(
                        vec![
                            shifted(c0, e0, mid - half),
                            shifted(c0, e0, mid + half),
                            shifted(c1, e1, mid + half),
                            shifted(c1, e1, mid - half),
                        ],
                        brush.color((i + 7 * j) as f64),
                    ));
                }
            } else {
                shapes.push(Shape::polygon(
                    vec![
                        shifted(c0, e0, -1.0),
                        shifted(c0, e0, 1.0),
                        shifted(c1, e1, 1.0),
                        shifted(c1, e1, -1.0),
                    ],
                    brush.color(i as f64),
                ));
            }
        }
        shapes
    }
}
