//! Library exports for the drawlab painting engine.
//!
//! The engine is headless: hosts feed raw device events and key presses into
//! [`PaintState`] and render its [`draw::Compositor`] through any
//! [`draw::Surface`]. The `drawlab` binary is one such host.

pub mod config;
pub mod draw;
pub mod input;
pub mod tools;
pub mod util;

pub use config::Config;
pub use input::PaintState;
