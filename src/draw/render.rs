//! Surface capability and shape dispatch.
//!
//! Layers hold renderer-agnostic [`Shape`]s; anything that can fill the
//! handful of primitives below (and answer a pixel query) can display them.

use super::color::{Color, ColorSpace};
use super::frame::Frame;
use super::shape::{Geometry, Shape};
use crate::util::Point;

/// Primitive drawing operations plus a pixel-sample query.
pub trait Surface {
    /// Paints the whole surface with an opaque colour.
    fn fill_background(&mut self, color: Color);

    fn fill_polygon(&mut self, points: &[Point], color: Color);

    fn fill_rounded_rect(
        &mut self,
        center: Point,
        width: f64,
        height: f64,
        corner_radius: f64,
        rotation: f64,
        color: Color,
    );

    fn fill_circle(&mut self, center: Point, radius: f64, color: Color);

    /// Strokes a segment with round caps.
    fn stroke_line(&mut self, from: Point, to: Point, width: f64, color: Color);

    /// Fills a pie slice between two angles (radians).
    fn fill_arc(&mut self, center: Point, radius: f64, start: f64, stop: f64, color: Color);

    /// Returns the colour at `(x, y)`, or `None` outside the surface.
    fn sample(&mut self, x: f64, y: f64) -> Option<Color>;
}

/// Renders all shapes in order (first shape = bottom).
pub fn render_shapes<'a, I>(surface: &mut dyn Surface, shapes: I, space: &dyn ColorSpace)
where
    I: IntoIterator<Item = &'a Shape>,
{
    for shape in shapes {
        render_shape(surface, shape, space);
    }
}

/// Renders a single shape, converting its colour for display.
pub fn render_shape(surface: &mut dyn Surface, shape: &Shape, space: &dyn ColorSpace) {
    let color = space.to_display(shape.color);
    match &shape.geometry {
        Geometry::RoundedRect {
            center,
            width,
            height,
            corner_radius,
            rotation,
        } => surface.fill_rounded_rect(*center, *width, *height, *corner_radius, *rotation, color),
        Geometry::Circle { center, radius } => surface.fill_circle(*center, *radius, color),
        Geometry::Line { from, to, width } => surface.stroke_line(*from, *to, *width, color),
        Geometry::Polygon { points } => {
            if points.len() >= 3 {
                surface.fill_polygon(points, color);
            }
        }
        Geometry::Arc {
            center,
            radius,
            start,
            stop,
        } => surface.fill_arc(*center, *radius, *start, *stop, color),
    }
}

/// Paints the frame background followed by every committed stroke.
pub fn render_frame(surface: &mut dyn Surface, frame: &Frame, space: &dyn ColorSpace) {
    surface.fill_background(space.to_display(frame.background));
    render_shapes(surface, frame.shapes(), space);
}
