//! Configuration type definitions.

use crate::draw::Oklch;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Canvas settings.
///
/// The viewport size is only used by headless runs; an interactive front end
/// resizes the engine to its window.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CanvasConfig {
    /// Initial background colour in the working space
    #[serde(default = "default_background")]
    pub background: Oklch,

    /// Viewport width in pixels (valid range: 16 - 8192)
    #[serde(default = "default_width")]
    pub width: i32,

    /// Viewport height in pixels (valid range: 16 - 8192)
    #[serde(default = "default_height")]
    pub height: i32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            background: default_background(),
            width: default_width(),
            height: default_height(),
        }
    }
}

/// Initial brush state.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct BrushConfig {
    /// Hue in degrees (wrapped into 0 - 360)
    #[serde(default)]
    pub hue: f64,

    /// Chroma (valid range: 0.0 - 0.5)
    #[serde(default = "default_chroma")]
    pub chroma: f64,

    /// Luminance (valid range: 0.0 - 1.0)
    #[serde(default = "default_luminance")]
    pub luminance: f64,

    /// Brush size in pixels before easing (valid range: 4 - 600)
    #[serde(default = "default_size")]
    pub size: f64,

    /// Hue jitter amount in degrees (valid range: 0 - 360)
    #[serde(default = "default_noise")]
    pub noise: f64,

    /// Menu label of the starting tool preset (e.g. "Rounded", "Sharp Rake")
    #[serde(default = "default_tool")]
    pub tool: String,
}

impl Default for BrushConfig {
    fn default() -> Self {
        Self {
            hue: 0.0,
            chroma: default_chroma(),
            luminance: default_luminance(),
            size: default_size(),
            noise: default_noise(),
            tool: default_tool(),
        }
    }
}

/// Gesture recognition tuning.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GesturesConfig {
    /// Travel in pixels separating a tap from a drag (valid range: 1 - 100)
    #[serde(default = "default_tap_travel")]
    pub tap_travel_threshold: f64,

    /// Number of pages cycled by finger taps, Draw included (valid range: 2 - 4)
    #[serde(default = "default_page_count")]
    pub page_count: usize,

    /// Gadget radius = min(width, height) / divisor (valid range: 2 - 32)
    #[serde(default = "default_gadget_divisor")]
    pub gadget_radius_divisor: f64,

    /// Viewports whose short side is below this use the radial menu
    #[serde(default = "default_phone_side")]
    pub phone_max_short_side: f64,
}

impl Default for GesturesConfig {
    fn default() -> Self {
        Self {
            tap_travel_threshold: default_tap_travel(),
            page_count: default_page_count(),
            gadget_radius_divisor: default_gadget_divisor(),
            phone_max_short_side: default_phone_side(),
        }
    }
}

/// Hue jitter table.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct NoiseConfig {
    /// Seed of the jitter table; equal seeds give identical artwork
    #[serde(default)]
    pub seed: u64,

    /// Number of entries (valid range: 1 - 4096)
    #[serde(default = "default_table_size")]
    pub table_size: usize,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            table_size: default_table_size(),
        }
    }
}

/// Where saved PNGs go.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct OutputConfig {
    /// Directory for saved canvases (supports `~/`)
    #[serde(default = "default_save_directory")]
    pub save_directory: String,

    /// Filename template with chrono format specifiers
    #[serde(default = "default_filename_template")]
    pub filename_template: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            save_directory: default_save_directory(),
            filename_template: default_filename_template(),
        }
    }
}

// =============================================================================
// Defaults
// =============================================================================

fn default_background() -> Oklch {
    Oklch::new(0.8, 0.0, 0.0)
}

fn default_width() -> i32 {
    1280
}

fn default_height() -> i32 {
    800
}

fn default_chroma() -> f64 {
    0.2
}

fn default_luminance() -> f64 {
    0.7
}

fn default_size() -> f64 {
    200.0
}

fn default_noise() -> f64 {
    80.0
}

fn default_tool() -> String {
    "Rounded".to_string()
}

fn default_tap_travel() -> f64 {
    10.0
}

fn default_page_count() -> usize {
    4
}

fn default_gadget_divisor() -> f64 {
    8.0
}

fn default_phone_side() -> f64 {
    600.0
}

fn default_table_size() -> usize {
    128
}

fn default_save_directory() -> String {
    "~/Pictures/Drawlab".to_string()
}

fn default_filename_template() -> String {
    "drawlab-canvas_%Y-%m-%d_%H%M%S".to_string()
}
