//! Filled polygon tools built from the whole recorded path.

use super::{Brush, StrokeInput, ToolGeometry};
use crate::draw::Shape;
use crate::util::Point;

fn chord_seed(p: Point) -> f64 {
    p.x * p.y
}

/// Triangle through start, end and the point of the path that bulges furthest.
pub(super) struct Triangle;

impl ToolGeometry for Triangle {
    fn generate(&self, stroke: &StrokeInput<'_>, brush: &Brush<'_>) -> Vec<Shape> {
        let (Some(start), Some(end)) = (stroke.start, stroke.end) else {
            return Vec::new();
        };
        if stroke.path.len() < 2 {
            return Vec::new();
        }
        let (a, b) = (start.position, end.position);

        let apex = stroke
            .interior()
            .iter()
            .map(|sample| sample.position)
            .max_by(|p, q| {
                let score = |pt: &Point| pt.distance(a) + pt.distance(b);
                score(p).total_cmp(&score(q))
            })
            .unwrap_or_else(|| fallback_apex(a, b, brush.size()));

        vec![Shape::polygon(vec![a, apex, b], brush.color(chord_seed(a)))]
    }
}

/// Apex used when the path has no interior points: half a brush width off the
/// chord midpoint, or straight up for a zero-length chord.
fn fallback_apex(a: Point, b: Point, size: f64) -> Point {
    let mid = a.lerp(b, 0.5);
    let length = a.distance(b);
    if length < f64::EPSILON {
        return mid.offset(0.0, -size / 2.0);
    }
    let normal = Point::new(-(b.y - a.y) / length, (b.x - a.x) / length);
    mid.offset(normal.x * size / 2.0, normal.y * size / 2.0)
}

/// Literal trace of the gesture, closed by the renderer. Needs at least one
/// interior sample to enclose anything.
pub(super) struct Lasso;

impl ToolGeometry for Lasso {
    fn generate(&self, stroke: &StrokeInput<'_>, brush: &Brush<'_>) -> Vec<Shape> {
        let (Some(start), Some(end)) = (stroke.start, stroke.end) else {
            return Vec::new();
        };
        let interior = stroke.interior();
        if interior.is_empty() {
            return Vec::new();
        }

        let mut points = Vec::with_capacity(interior.len() + 2);
        points.push(start.position);
        points.extend(interior.iter().map(|sample| sample.position));
        points.push(end.position);
        vec![Shape::polygon(points, brush.color(chord_seed(start.position)))]
    }
}

/// The path profile plus its reflection about the start-end chord.
pub(super) struct Mirror;

impl ToolGeometry for Mirror {
    fn generate(&self, stroke: &StrokeInput<'_>, brush: &Brush<'_>) -> Vec<Shape> {
        let (Some(start), Some(end)) = (stroke.start, stroke.end) else {
            return Vec::new();
        };
        let (a, b) = (start.position, end.position);
        let length = a.distance(b);
        let interior = stroke.interior();
        if length < f64::EPSILON || interior.is_empty() {
            return Vec::new();
        }

        // chord-aligned frame: u along the chord, n its left-hand normal
        let u = Point::new((b.x - a.x) / length, (b.y - a.y) / length);
        let n = Point::new(-u.y, u.x);

        let mut profile = Vec::with_capacity(interior.len() + 2);
        let mut reflected = Vec::with_capacity(interior.len() + 2);
        profile.push(a);
        reflected.push(a);
        for sample in interior {
            let v = Point::new(sample.position.x - a.x, sample.position.y - a.y);
            let base = v.x * u.x + v.y * u.y;
            let height = v.x * n.x + v.y * n.y;
            profile.push(a.offset(u.x * base + n.x * height, u.y * base + n.y * height));
            reflected.push(a.offset(u.x * base - n.x * height, u.y * base - n.y * height));
        }
        profile.push(b);
        reflected.push(b);

        vec![
            Shape::polygon(profile, brush.color(chord_seed(a))),
            Shape::polygon(reflected, brush.color(chord_seed(b))),
        ]
    }
}
