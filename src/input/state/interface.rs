//! Interface layer: transient overlay rebuilt on every frame.

use super::PaintState;
use super::mapper::RadialQuadrant;
use crate::draw::{Geometry, Oklch, Shape};
use crate::input::mode::Mode;
use crate::input::params::{CHROMA_MAX, NOISE_MAX, ReferenceSnapshot, SIZE_MAX, SIZE_MIN};
use crate::tools::{Texture, Tool, stamp_shapes};
use crate::util::{Point, ease_in_circ, lerp, map_range};
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, TAU};

const HUE_SEGMENTS: usize = 36;
const GRADIENT_STEPS: usize = 20;
const VARIATION_SLICES: usize = 32;
const INDICATOR_SIZE: f64 = 40.0;
const INDICATOR_SPOT: Point = Point::new(40.0, 40.0);

/// Black or white, whichever reads better over `color`.
fn contrast(color: Oklch) -> Oklch {
    if color.luminance > 0.6 {
        Oklch::new(0.0, 0.0, 0.0)
    } else {
        Oklch::new(1.0, 0.0, 0.0)
    }
}

fn crosshair(at: Point, size: f64, color: Oklch) -> [Shape; 2] {
    [
        Shape::line(at.offset(-size, 0.0), at.offset(size, 0.0), 2.0, color),
        Shape::line(at.offset(0.0, -size), at.offset(0.0, size), 2.0, color),
    ]
}

/// Line drawn as short segments blending between two colours.
fn gradient_line(from: Point, to: Point, start: Oklch, end: Oklch, width: f64) -> Vec<Shape> {
    (0..GRADIENT_STEPS)
        .map(|i| {
            let t0 = i as f64 / GRADIENT_STEPS as f64;
            let t1 = (i + 1) as f64 / GRADIENT_STEPS as f64;
            let mid = (t0 + t1) / 2.0;
            let color = Oklch::new(
                lerp(start.luminance, end.luminance, mid),
                lerp(start.chroma, end.chroma, mid),
                lerp(start.hue, end.hue, mid),
            );
            Shape::line(from.lerp(to, t0), from.lerp(to, t1), width, color)
        })
        .collect()
}

fn arc(center: Point, radius: f64, start: f64, stop: f64, color: Oklch) -> Shape {
    Shape::new(
        Geometry::Arc {
            center,
            radius,
            start,
            stop,
        },
        color,
    )
}

impl PaintState {
    pub(crate) fn rebuild_interface(&mut self) {
        let mut shapes = Vec::new();
        let pointer = self.pointer.position;
        let background = self.compositor.committed().background;

        match (self.mode, self.snapshot) {
            (Mode::Draw, _) => {
                let hovering = !self.context.device_family.is_touch()
                    && !self.context.pointer_down
                    && self.edit.is_none();
                if hovering && self.params.tool == Tool::Stamp {
                    shapes.extend(self.stamp_preview(pointer, self.params.eased_size()));
                }
            }
            (Mode::Eyedropper, _) => {
                shapes.push(Shape::circle(pointer, 24.0, self.params.color()));
                shapes.extend(crosshair(pointer, 12.0, contrast(self.params.color())));
            }
            (Mode::LumaChromaAdjust, Some(snapshot)) => {
                shapes.extend(self.luma_chroma_gadget(&snapshot));
                shapes.extend(crosshair(pointer, 10.0, contrast(self.params.color())));
            }
            (Mode::HueAdjust, Some(snapshot)) => {
                shapes.extend(self.hue_gadget(&snapshot));
                shapes.extend(self.variation_pie(pointer));
            }
            (Mode::SizeAdjust, Some(snapshot)) => {
                shapes.extend(self.size_gadget(&snapshot, background));
            }
            (Mode::PhoneRadialMenu, _) => {
                shapes.extend(self.radial_gadget());
            }
            // first frame of an adjustment mode, nothing armed yet
            _ => {}
        }

        shapes.extend(self.tool_indicator(background));
        self.compositor.set_interface(shapes);
    }

    fn stamp_preview(&self, at: Point, size: f64) -> Vec<Shape> {
        let brush = self.brush();
        stamp_shapes(
            at,
            size,
            None,
            None,
            brush.texture().unwrap_or(Texture::Rounded),
            &brush,
        )
    }

    /// Corner swatch showing the current tool in the current colour.
    fn tool_indicator(&self, background: Oklch) -> Vec<Shape> {
        let mut shapes = vec![Shape::circle(
            INDICATOR_SPOT,
            INDICATOR_SIZE * 0.75,
            contrast(background),
        )];
        let color = self.params.color();
        let half = INDICATOR_SIZE / 2.0;
        let (a, b) = (INDICATOR_SPOT.offset(-half, half), INDICATOR_SPOT.offset(half, -half));
        match self.params.tool {
            Tool::Stamp => shapes.extend(self.stamp_preview(INDICATOR_SPOT, INDICATOR_SIZE)),
            Tool::RoundLine | Tool::FanLine => shapes.push(Shape::line(a, b, 8.0, color)),
            Tool::SharpLine => shapes.push(Shape::polygon(
                vec![a, INDICATOR_SPOT.offset(-4.0, -4.0), b, INDICATOR_SPOT.offset(4.0, 4.0)],
                color,
            )),
            Tool::Triangle => shapes.push(Shape::polygon(
                vec![a, INDICATOR_SPOT.offset(0.0, -half), b],
                color,
            )),
            Tool::Lasso | Tool::Mirror => shapes.push(Shape::polygon(
                vec![a, INDICATOR_SPOT.offset(-half, -half), b, INDICATOR_SPOT.offset(half, half)],
                color,
            )),
        }
        shapes
    }

    /// Box whose edges show the reachable chroma/luminance range.
    fn luma_chroma_gadget(&self, snapshot: &ReferenceSnapshot) -> Vec<Shape> {
        let range = self.gadget_radius() * 2.0;
        let hue = snapshot.hue;
        let left = snapshot.anchor.x - range * (snapshot.chroma / CHROMA_MAX);
        let bottom = snapshot.anchor.y + range * snapshot.luminance;
        let (right, top) = (left + range, bottom - range);

        let color = |luminance, chroma| Oklch::new(luminance, chroma, hue);
        let mut shapes = Vec::with_capacity(GRADIENT_STEPS * 4);
        shapes.extend(gradient_line(
            Point::new(left, bottom),
            Point::new(right, bottom),
            color(0.0, 0.0),
            color(0.0, CHROMA_MAX),
            6.0,
        ));
        shapes.extend(gradient_line(
            Point::new(left, top),
            Point::new(right, top),
            color(1.0, 0.0),
            color(1.0, CHROMA_MAX),
            6.0,
        ));
        shapes.extend(gradient_line(
            Point::new(left, bottom),
            Point::new(left, top),
            color(0.0, 0.0),
            color(1.0, 0.0),
            6.0,
        ));
        shapes.extend(gradient_line(
            Point::new(right, bottom),
            Point::new(right, top),
            color(0.0, CHROMA_MAX),
            color(1.0, CHROMA_MAX),
            6.0,
        ));
        shapes
    }

    /// Hue ring around the disc the hue mapper measures against.
    fn hue_gadget(&self, snapshot: &ReferenceSnapshot) -> Vec<Shape> {
        let radius = self.gadget_radius();
        let start_angle = TAU * (snapshot.hue / 360.0) - FRAC_PI_2;
        let start_radius = radius * (1.0 - snapshot.noise / NOISE_MAX);
        let (sin, cos) = start_angle.sin_cos();
        let center = snapshot.anchor.offset(-cos * start_radius, -sin * start_radius);

        let step = TAU / HUE_SEGMENTS as f64;
        let mut shapes: Vec<Shape> = (0..HUE_SEGMENTS)
            .map(|i| {
                let start = i as f64 * step - FRAC_PI_2;
                let hue = (i as f64 + 0.5) * 360.0 / HUE_SEGMENTS as f64;
                arc(
                    center,
                    radius,
                    start,
                    start + step,
                    Oklch::new(self.params.luminance(), self.params.chroma(), hue),
                )
            })
            .collect();
        shapes.push(Shape::circle(center, 4.0, contrast(self.params.color())));
        shapes
    }

    /// Pie of jittered colours around the pointer, previewing the variation.
    fn variation_pie(&self, at: Point) -> Vec<Shape> {
        let radius = (self.gadget_radius() / 3.0).max(8.0);
        let step = TAU / VARIATION_SLICES as f64;
        let brush = self.brush();
        (0..VARIATION_SLICES)
            .map(|i| {
                let start = i as f64 * step;
                arc(at, radius, start, start + step, brush.color(i as f64))
            })
            .collect()
    }

    /// Size scale with markers plus a live footprint at the anchor.
    fn size_gadget(&self, snapshot: &ReferenceSnapshot, background: Oklch) -> Vec<Shape> {
        let range = self.gadget_radius() * 2.0;
        let start = map_range(snapshot.size, SIZE_MIN, SIZE_MAX, 0.0, 1.0, false);
        let bottom = snapshot.anchor.y + range * start;
        let x = snapshot.anchor.x;
        let ink = contrast(background);

        let mut shapes = vec![Shape::line(
            Point::new(x, bottom),
            Point::new(x, bottom - range),
            2.0,
            ink,
        )];
        for marker in [SIZE_MIN, 100.0, 200.0, 300.0, 400.0, 500.0, SIZE_MAX] {
            let y = bottom - range * map_range(marker, SIZE_MIN, SIZE_MAX, 0.0, 1.0, false);
            shapes.push(Shape::line(Point::new(x - 6.0, y), Point::new(x + 6.0, y), 2.0, ink));
        }
        let eased = ease_in_circ(self.params.size(), SIZE_MIN, SIZE_MAX);
        shapes.extend(self.stamp_preview(snapshot.anchor, eased));
        shapes
    }

    /// Four quadrants around the viewport centre; the locked one stands out.
    fn radial_gadget(&self) -> Vec<Shape> {
        let center = self.viewport_center();
        let radius = self.gadget_radius();
        let locked = self.radial.map(|drag| drag.quadrant);
        let p = &self.params;

        RadialQuadrant::ALL
            .iter()
            .map(|&quadrant| {
                let mid = quadrant.center_angle();
                let color = match quadrant {
                    RadialQuadrant::Hue => Oklch::new(0.7, 0.2, p.hue()),
                    RadialQuadrant::Noise => Oklch::new(0.7, 0.2, p.hue() + p.noise() / 2.0),
                    RadialQuadrant::Chroma => Oklch::new(p.luminance(), p.chroma(), p.hue()),
                    RadialQuadrant::Luminance => Oklch::new(p.luminance(), 0.0, 0.0),
                };
                let scale = if locked == Some(quadrant) { 1.25 } else { 1.0 };
                arc(center, radius * scale, mid - FRAC_PI_4, mid + FRAC_PI_4, color)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gradient_line_is_continuous() {
        let shapes = gradient_line(
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Oklch::new(0.0, 0.0, 0.0),
            Oklch::new(1.0, 0.0, 0.0),
            4.0,
        );
        assert_eq!(shapes.len(), GRADIENT_STEPS);
        for pair in shapes.windows(2) {
            match (&pair[0].geometry, &pair[1].geometry) {
                (Geometry::Line { to, .. }, Geometry::Line { from, .. }) => {
                    assert!((to.x - from.x).abs() < 1e-9);
                }
                other => panic!("unexpected geometry {other:?}"),
            }
            assert!(pair[0].color.luminance < pair[1].color.luminance);
        }
    }

    #[test]
    fn contrast_flips_on_light_colours() {
        assert_eq!(contrast(Oklch::new(0.9, 0.0, 0.0)).luminance, 0.0);
        assert_eq!(contrast(Oklch::new(0.1, 0.0, 0.0)).luminance, 1.0);
    }
}
