//! Renderer-agnostic shape descriptions produced by tools and the overlay.

use super::color::Oklch;
use crate::util::Point;

/// Geometry of a single filled or stroked primitive.
///
/// Coordinates are canvas pixels; rotations are radians, clockwise because
/// the y axis grows downwards.
#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    /// Filled rectangle with rounded corners, rotated around its centre
    RoundedRect {
        center: Point,
        width: f64,
        height: f64,
        corner_radius: f64,
        rotation: f64,
    },
    /// Filled circle
    Circle { center: Point, radius: f64 },
    /// Stroked segment with round caps
    Line { from: Point, to: Point, width: f64 },
    /// Filled polygon; the last point connects back to the first
    Polygon { points: Vec<Point> },
    /// Filled pie slice from `start` to `stop` radians
    Arc {
        center: Point,
        radius: f64,
        start: f64,
        stop: f64,
    },
}

impl Geometry {
    /// Returns the same geometry moved by `(dx, dy)`.
    pub fn translated(&self, dx: f64, dy: f64) -> Geometry {
        match self {
            Geometry::RoundedRect {
                center,
                width,
                height,
                corner_radius,
                rotation,
            } => Geometry::RoundedRect {
                center: center.offset(dx, dy),
                width: *width,
                height: *height,
                corner_radius: *corner_radius,
                rotation: *rotation,
            },
            Geometry::Circle { center, radius } => Geometry::Circle {
                center: center.offset(dx, dy),
                radius: *radius,
            },
            Geometry::Line { from, to, width } => Geometry::Line {
                from: from.offset(dx, dy),
                to: to.offset(dx, dy),
                width: *width,
            },
            Geometry::Polygon { points } => Geometry::Polygon {
                points: points.iter().map(|p| p.offset(dx, dy)).collect(),
            },
            Geometry::Arc {
                center,
                radius,
                start,
                stop,
            } => Geometry::Arc {
                center: center.offset(dx, dy),
                radius: *radius,
                start: *start,
                stop: *stop,
            },
        }
    }

    /// Approximate equality, for comparing regenerated geometry.
    pub fn approx_eq(&self, other: &Geometry, tolerance: f64) -> bool {
        let close = |a: f64, b: f64| (a - b).abs() <= tolerance;
        let close_pt = |a: &Point, b: &Point| close(a.x, b.x) && close(a.y, b.y);
        match (self, other) {
            (
                Geometry::RoundedRect {
                    center: c1,
                    width: w1,
                    height: h1,
                    corner_radius: r1,
                    rotation: a1,
                },
                Geometry::RoundedRect {
                    center: c2,
                    width: w2,
                    height: h2,
                    corner_radius: r2,
                    rotation: a2,
                },
            ) => close_pt(c1, c2) && close(*w1, *w2) && close(*h1, *h2) && close(*r1, *r2) && close(*a1, *a2),
            (
                Geometry::Circle {
                    center: c1,
                    radius: r1,
                },
                Geometry::Circle {
                    center: c2,
                    radius: r2,
                },
            ) => close_pt(c1, c2) && close(*r1, *r2),
            (
                Geometry::Line {
                    from: f1,
                    to: t1,
                    width: w1,
                },
                Geometry::Line {
                    from: f2,
                    to: t2,
                    width: w2,
                },
            ) => close_pt(f1, f2) && close_pt(t1, t2) && close(*w1, *w2),
            (Geometry::Polygon { points: p1 }, Geometry::Polygon { points: p2 }) => {
                p1.len() == p2.len() && p1.iter().zip(p2).all(|(a, b)| close_pt(a, b))
            }
            (
                Geometry::Arc {
                    center: c1,
                    radius: r1,
                    start: s1,
                    stop: e1,
                },
                Geometry::Arc {
                    center: c2,
                    radius: r2,
                    start: s2,
                    stop: e2,
                },
            ) => close_pt(c1, c2) && close(*r1, *r2) && close(*s1, *s2) && close(*e1, *e2),
            _ => false,
        }
    }
}

/// A primitive plus the working-space colour it is filled or stroked with.
#[derive(Clone, Debug, PartialEq)]
pub struct Shape {
    pub geometry: Geometry,
    pub color: Oklch,
}

impl Shape {
    pub fn new(geometry: Geometry, color: Oklch) -> Self {
        Self { geometry, color }
    }

    pub fn polygon(points: Vec<Point>, color: Oklch) -> Self {
        Self::new(Geometry::Polygon { points }, color)
    }

    pub fn line(from: Point, to: Point, width: f64, color: Oklch) -> Self {
        Self::new(Geometry::Line { from, to, width }, color)
    }

    pub fn circle(center: Point, radius: f64, color: Oklch) -> Self {
        Self::new(Geometry::Circle { center, radius }, color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INK: Oklch = Oklch::new(0.5, 0.1, 200.0);

    #[test]
    fn translation_moves_every_vertex() {
        let shape = Shape::polygon(
            vec![Point::new(0.0, 0.0), Point::new(4.0, 0.0), Point::new(0.0, 3.0)],
            INK,
        );
        let moved = shape.geometry.translated(10.0, -2.0);
        assert_eq!(
            moved,
            Geometry::Polygon {
                points: vec![
                    Point::new(10.0, -2.0),
                    Point::new(14.0, -2.0),
                    Point::new(10.0, 1.0)
                ]
            }
        );
    }

    #[test]
    fn approx_eq_rejects_different_variants() {
        let circle = Geometry::Circle {
            center: Point::new(1.0, 1.0),
            radius: 2.0,
        };
        let line = Geometry::Line {
            from: Point::new(1.0, 1.0),
            to: Point::new(1.0, 1.0),
            width: 2.0,
        };
        assert!(circle.approx_eq(&circle.translated(1e-12, 0.0), 1e-9));
        assert!(!circle.approx_eq(&line, 1e-9));
    }
}
