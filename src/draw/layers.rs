//! Three-layer compositor: Committed, Pending and Interface.
//!
//! - Committed persists across strokes and only changes through a full merge
//!   of Pending or an explicit clear-with-colour.
//! - Pending holds the stroke that is being drawn or edited.
//! - Interface is rebuilt every frame and never persisted.

use super::color::{Color, ColorSpace, Oklch};
use super::frame::{Frame, Stroke};
use super::render::{Surface, render_frame, render_shapes};
use super::shape::Shape;
use super::surface::CairoSurface;

pub struct Compositor {
    committed: Frame,
    pending: Vec<Shape>,
    interface: Vec<Shape>,
    /// Number of Pending -> Committed merges so far
    merge_count: usize,
    width: i32,
    height: i32,
    /// Raster of the committed layer used for pixel sampling
    raster: Option<CairoSurface>,
}

impl Compositor {
    pub fn new(background: Oklch, width: i32, height: i32) -> Self {
        Self {
            committed: Frame::new(background),
            pending: Vec::new(),
            interface: Vec::new(),
            merge_count: 0,
            width,
            height,
            raster: None,
        }
    }

    pub fn committed(&self) -> &Frame {
        &self.committed
    }

    pub fn pending(&self) -> &[Shape] {
        &self.pending
    }

    pub fn interface(&self) -> &[Shape] {
        &self.interface
    }

    pub fn merge_count(&self) -> usize {
        self.merge_count
    }

    pub fn size(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    pub fn resize(&mut self, width: i32, height: i32) {
        if (width, height) != (self.width, self.height) {
            self.width = width;
            self.height = height;
            self.raster = None;
        }
    }

    /// Appends marks to Pending without touching what is already there.
    pub fn extend_pending(&mut self, shapes: Vec<Shape>) {
        self.pending.extend(shapes);
    }

    /// Clears Pending and redraws it from scratch.
    pub fn replace_pending(&mut self, shapes: Vec<Shape>) {
        self.pending = shapes;
    }

    pub fn clear_pending(&mut self) {
        self.pending.clear();
    }

    /// Moves all of Pending into Committed as one stroke group.
    ///
    /// Returns `false` when Pending was empty (nothing merged).
    pub fn merge_pending(&mut self) -> bool {
        let shapes = std::mem::take(&mut self.pending);
        if !self.committed.push_stroke(shapes) {
            return false;
        }
        self.merge_count += 1;
        self.raster = None;
        log::debug!(
            "Merged pending stroke into committed layer ({} strokes)",
            self.committed.stroke_count()
        );
        true
    }

    /// Removes the most recent committed stroke group.
    pub fn lift_last_stroke(&mut self) -> Option<Stroke> {
        let stroke = self.committed.undo()?;
        self.raster = None;
        Some(stroke)
    }

    /// Puts a previously lifted stroke group back on top of Committed.
    pub fn restore_stroke(&mut self, stroke: Stroke) {
        if self.committed.push_stroke(stroke.shapes) {
            self.raster = None;
        }
    }

    /// Wipes Committed with a new background colour and drops Pending.
    pub fn clear_with(&mut self, background: Oklch) {
        self.committed.clear_with(background);
        self.pending.clear();
        self.raster = None;
    }

    /// Replaces the transient overlay for this frame.
    pub fn set_interface(&mut self, shapes: Vec<Shape>) {
        self.interface = shapes;
    }

    /// Samples the displayed colour of the committed layer at `(x, y)`.
    pub fn sample_committed(&mut self, x: f64, y: f64, space: &dyn ColorSpace) -> Option<Color> {
        if self.raster.is_none() {
            match CairoSurface::new(self.width, self.height) {
                Ok(mut surface) => {
                    render_frame(&mut surface, &self.committed, space);
                    self.raster = Some(surface);
                }
                Err(err) => {
                    log::warn!("Unable to rasterise committed layer for sampling: {err}");
                    return None;
                }
            }
        }
        self.raster.as_mut()?.sample(x, y)
    }

    /// Draws Committed, then Pending, then Interface.
    pub fn render(&self, surface: &mut dyn Surface, space: &dyn ColorSpace) {
        render_frame(surface, &self.committed, space);
        render_shapes(surface, &self.pending, space);
        render_shapes(surface, &self.interface, space);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::OklabSpace;
    use crate::draw::render::recording::{Op, RecordingSurface};
    use crate::util::Point;

    const BG: Oklch = Oklch::new(0.8, 0.0, 0.0);
    const INK: Oklch = Oklch::new(0.3, 0.2, 250.0);

    fn dot(x: f64) -> Shape {
        Shape::circle(Point::new(x, 10.0), 4.0, INK)
    }

    #[test]
    fn merging_empty_pending_is_not_counted() {
        let mut compositor = Compositor::new(BG, 100, 100);
        assert!(!compositor.merge_pending());
        assert_eq!(compositor.merge_count(), 0);
    }

    #[test]
    fn merge_moves_pending_into_one_group() {
        let mut compositor = Compositor::new(BG, 100, 100);
        compositor.extend_pending(vec![dot(1.0)]);
        compositor.extend_pending(vec![dot(2.0)]);
        assert!(compositor.merge_pending());
        assert!(compositor.pending().is_empty());
        assert_eq!(compositor.committed().stroke_count(), 1);
        assert_eq!(compositor.committed().shapes().count(), 2);
        assert_eq!(compositor.merge_count(), 1);
    }

    #[test]
    fn render_orders_layers() {
        let mut compositor = Compositor::new(BG, 100, 100);
        compositor.extend_pending(vec![dot(1.0)]);
        compositor.set_interface(vec![Shape::line(
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            2.0,
            INK,
        )]);

        let mut surface = RecordingSurface::default();
        compositor.render(&mut surface, &OklabSpace);
        assert_eq!(surface.ops, vec![Op::Background, Op::Circle, Op::Line]);
    }

    #[test]
    fn sampling_sees_merged_strokes() {
        let space = OklabSpace;
        let mut compositor = Compositor::new(Oklch::new(1.0, 0.0, 0.0), 40, 40);
        let before = compositor.sample_committed(20.0, 20.0, &space).expect("in bounds");
        assert!(before.r > 0.95);

        compositor.extend_pending(vec![Shape::circle(
            Point::new(20.0, 20.0),
            8.0,
            Oklch::new(0.0, 0.0, 0.0),
        )]);
        compositor.merge_pending();
        let after = compositor.sample_committed(20.0, 20.0, &space).expect("in bounds");
        assert!(after.r < 0.05);
    }
}
