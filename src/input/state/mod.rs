mod actions;
mod core;
mod frame;
mod interface;
mod mapper;
mod stroke;
#[cfg(test)]
mod tests;

pub use core::{EngineSettings, PaintState};
pub use mapper::{RadialDrag, RadialQuadrant};
pub use stroke::StrokeRecording;
