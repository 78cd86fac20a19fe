//! Tool catalog and geometry generators.
//!
//! Every tool turns (start sample, end sample, recorded path, brush) into a
//! list of [`Shape`]s. Generators are pure: no pixel I/O, no engine state,
//! and a missing start/end simply yields nothing.

pub mod catalog;
mod line;
mod polygon;
mod sharp;
mod stamp;

pub use catalog::{TOOL_PRESETS, Texture, Tool, ToolDefinition, preset_by_label, preset_index};
pub use stamp::stamp_shapes;

use crate::draw::{NoiseTable, Oklch, Shape};
use crate::input::PointerSample;
use crate::input::params::BrushParameters;

/// Inputs describing one stroke (or the part of it recorded so far).
#[derive(Debug, Clone, Copy)]
pub struct StrokeInput<'a> {
    pub start: Option<&'a PointerSample>,
    pub end: Option<&'a PointerSample>,
    /// Every recorded sample, first = start, last = end
    pub path: &'a [PointerSample],
}

impl<'a> StrokeInput<'a> {
    pub fn new(
        start: Option<&'a PointerSample>,
        end: Option<&'a PointerSample>,
        path: &'a [PointerSample],
    ) -> Self {
        Self { start, end, path }
    }

    /// Samples strictly between the first and last recorded ones.
    pub fn interior(&self) -> &'a [PointerSample] {
        if self.path.len() < 3 {
            &[]
        } else {
            &self.path[1..self.path.len() - 1]
        }
    }
}

/// Brush state a generator reads: parameters plus the jitter table.
#[derive(Debug, Clone, Copy)]
pub struct Brush<'a> {
    pub params: &'a BrushParameters,
    pub noise: &'a NoiseTable,
}

impl Brush<'_> {
    pub fn color(&self, seed: f64) -> Oklch {
        self.params.jittered_color(self.noise, seed)
    }

    pub fn size(&self) -> f64 {
        self.params.eased_size()
    }

    pub fn texture(&self) -> Option<Texture> {
        self.params.texture
    }
}

/// When a tool's marks reach the Pending layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accumulation {
    /// New marks are appended on every pointer sample
    PerSample,
    /// Pending is regenerated from the whole stroke on every sample
    WholeStroke,
}

/// Geometry algorithm of one tool.
pub trait ToolGeometry: Sync {
    fn generate(&self, stroke: &StrokeInput<'_>, brush: &Brush<'_>) -> Vec<Shape>;

    fn accumulation(&self) -> Accumulation {
        Accumulation::WholeStroke
    }
}

impl Tool {
    /// Returns the geometry generator implementing this tool.
    pub fn geometry(self) -> &'static dyn ToolGeometry {
        match self {
            Tool::Stamp => &stamp::Stamp,
            Tool::RoundLine => &line::RoundLine,
            Tool::FanLine => &line::FanLine,
            Tool::SharpLine => &sharp::SharpLine,
            Tool::Triangle => &polygon::Triangle,
            Tool::Lasso => &polygon::Lasso,
            Tool::Mirror => &polygon::Mirror,
        }
    }
}

/// Regenerates the complete Pending content of a recorded stroke.
///
/// Per-sample tools are replayed prefix by prefix so the result matches what
/// live drawing accumulated; whole-stroke tools are generated once.
pub fn replay(
    geometry: &dyn ToolGeometry,
    origin: Option<&PointerSample>,
    path: &[PointerSample],
    brush: &Brush<'_>,
) -> Vec<Shape> {
    if origin.is_none() || path.is_empty() {
        return Vec::new();
    }
    match geometry.accumulation() {
        Accumulation::PerSample => (1..=path.len())
            .flat_map(|n| {
                let prefix = &path[..n];
                geometry.generate(&StrokeInput::new(origin, prefix.last(), prefix), brush)
            })
            .collect(),
        Accumulation::WholeStroke => {
            geometry.generate(&StrokeInput::new(origin, path.last(), path), brush)
        }
    }
}
