//! Frame container holding the committed artwork as stroke groups.

use super::color::Oklch;
use super::shape::Shape;

/// All shapes produced by one committed stroke, in draw order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stroke {
    pub shapes: Vec<Shape>,
}

/// Container for the committed artwork.
///
/// Keeps the background colour plus one [`Stroke`] group per commit, so the
/// most recent stroke can be lifted back out for editing or undo.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Background fill painted underneath every stroke
    pub background: Oklch,
    /// Stroke groups in draw order (first = bottom layer, last = top layer)
    pub strokes: Vec<Stroke>,
}

impl Frame {
    /// Creates a new empty frame filled with `background`.
    pub fn new(background: Oklch) -> Self {
        Self {
            background,
            strokes: Vec::new(),
        }
    }

    /// Drops every stroke and repaints the background with `background`.
    pub fn clear_with(&mut self, background: Oklch) {
        self.background = background;
        self.strokes.clear();
    }

    /// Appends a stroke group on top of existing strokes.
    ///
    /// Returns `false` (and stores nothing) when `shapes` is empty.
    pub fn push_stroke(&mut self, shapes: Vec<Shape>) -> bool {
        if shapes.is_empty() {
            return false;
        }
        self.strokes.push(Stroke { shapes });
        true
    }

    /// Removes and returns the most recently added stroke, if any.
    pub fn undo(&mut self) -> Option<Stroke> {
        self.strokes.pop()
    }

    /// Iterates every shape in draw order.
    pub fn shapes(&self) -> impl Iterator<Item = &Shape> {
        self.strokes.iter().flat_map(|stroke| stroke.shapes.iter())
    }

    pub fn stroke_count(&self) -> usize {
        self.strokes.len()
    }
}
