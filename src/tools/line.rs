//! Constant-width line tools.

use super::{Accumulation, Brush, StrokeInput, ToolGeometry};
use crate::draw::Shape;

/// One segment from the stroke start to its current end.
///
/// Regenerated on every sample, so the live preview follows the pointer and
/// only the final segment reaches Committed.
pub(super) struct RoundLine;

impl ToolGeometry for RoundLine {
    fn generate(&self, stroke: &StrokeInput<'_>, brush: &Brush<'_>) -> Vec<Shape> {
        let (Some(start), Some(end)) = (stroke.start, stroke.end) else {
            return Vec::new();
        };
        let seed = start.position.x * start.position.y;
        vec![Shape::line(start.position, end.position, brush.size(), brush.color(seed))]
    }
}

/// A new segment from the start to every sample, leaving a fan of lines.
pub(super) struct FanLine;

impl ToolGeometry for FanLine {
    fn generate(&self, stroke: &StrokeInput<'_>, brush: &Brush<'_>) -> Vec<Shape> {
        let (Some(start), Some(end)) = (stroke.start, stroke.end) else {
            return Vec::new();
        };
        // each spoke gets its own colour variation
        let seed = end.position.x * end.position.y;
        vec![Shape::line(start.position, end.position, brush.size(), brush.color(seed))]
    }

    fn accumulation(&self) -> Accumulation {
        Accumulation::PerSample
    }
}
