//! Colour, shape and layer types (Cairo-backed rasterisation).
//!
//! This module defines the core drawing types:
//! - [`Oklch`] / [`Color`]: working colour space and displayable RGBA
//! - [`NoiseTable`]: seeded per-mark hue jitter
//! - [`Shape`]: renderer-agnostic primitives emitted by tools
//! - [`Compositor`]: the Committed / Pending / Interface layer stack
//! - [`Surface`]: the drawing capability layers render through

pub mod color;
pub mod export;
pub mod frame;
pub mod layers;
pub mod noise;
pub mod render;
pub mod shape;
pub mod surface;

// Re-export commonly used types at module level
pub use color::{Color, ColorSpace, OklabSpace, Oklch, SampledColor};
pub use export::{ExportError, write_png};
pub use frame::{Frame, Stroke};
pub use layers::Compositor;
pub use noise::NoiseTable;
pub use render::{Surface, render_frame, render_shape, render_shapes};
pub use shape::{Geometry, Shape};
pub use surface::CairoSurface;
