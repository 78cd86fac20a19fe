//! Stamp tool: one footprint per pointer sample.

use super::{Accumulation, Brush, StrokeInput, Texture, ToolGeometry};
use crate::draw::{Geometry, Shape};
use crate::util::{Point, map_range};
use std::f64::consts::FRAC_PI_2;

pub(super) struct Stamp;

impl ToolGeometry for Stamp {
    fn generate(&self, stroke: &StrokeInput<'_>, brush: &Brush<'_>) -> Vec<Shape> {
        let (Some(_), Some(end)) = (stroke.start, stroke.end) else {
            return Vec::new();
        };
        stamp_shapes(
            end.position,
            brush.size(),
            end.angle,
            end.pressure,
            brush.texture().unwrap_or(Texture::Rounded),
            brush,
        )
    }

    fn accumulation(&self) -> Accumulation {
        Accumulation::PerSample
    }
}

/// Number of rake sub-marks for a footprint of `size` pixels.
pub(crate) fn rake_count(size: f64) -> usize {
    (3.0 + size / 100.0).floor().clamp(3.0, 9.0) as usize
}

/// Builds a single stamp footprint centred on `center`.
///
/// The footprint is rotated to the pen azimuth (`angle - π/2`) when one is
/// reported. Rounded stamps narrow with pressure; rake stamps pull their
/// sub-marks closer together as pressure rises.
pub fn stamp_shapes(
    center: Point,
    size: f64,
    angle: Option<f64>,
    pressure: Option<f64>,
    texture: Texture,
    brush: &Brush<'_>,
) -> Vec<Shape> {
    let rotation = angle.map(|a| a - FRAC_PI_2).unwrap_or(0.0);
    let height = size;

    match texture {
        Texture::Rounded => {
            let width = match (angle, pressure) {
                (Some(_), Some(p)) => size * map_range(p, 0.0, 0.2, 0.1, 0.9, true),
                (Some(_), None) => size * 0.7,
                (None, _) => size,
            };
            vec![Shape::new(
                Geometry::RoundedRect {
                    center,
                    width,
                    height,
                    corner_radius: size / 4.0,
                    rotation,
                },
                brush.color(center.x + center.y),
            )]
        }
        Texture::Rake => {
            let count = rake_count(size);
            let gap = pressure
                .map(|p| map_range(p, 0.0, 0.2, 3.0, 0.0, true))
                .unwrap_or(1.0);
            let diameter = height / ((count - 1) as f64 * gap + count as f64);
            let angle_seed = angle.map(|a| (a * 6.0).round()).unwrap_or(0.0);

            (0..count)
                .map(|i| {
                    let local_y = -height / 2.0 + diameter / 2.0 + i as f64 * diameter * (1.0 + gap);
                    let offset = Point::new(0.0, local_y).rotated(rotation);
                    Shape::circle(
                        center.offset(offset.x, offset.y),
                        diameter / 2.0,
                        brush.color(i as f64 + angle_seed),
                    )
                })
                .collect()
        }
    }
}
