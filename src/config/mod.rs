//! Configuration file support for drawlab.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/drawlab/config.toml`. Settings include the canvas background,
//! the starting brush, gesture tuning, the hue jitter table, keybindings and where saved
//! canvases are written.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod keybindings;
pub mod types;

// Re-export commonly used types at module level
pub use keybindings::{Action, KeyBinding, KeybindingsConfig};
pub use types::{BrushConfig, CanvasConfig, GesturesConfig, NoiseConfig, OutputConfig};

use crate::tools::preset_by_label;
use anyhow::{Context, Result};
use log::{debug, info, warn};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure containing all user settings.
///
/// All fields have sensible defaults and will use those if not specified in the config file.
///
/// # Example TOML
/// ```toml
/// [canvas]
/// background = { luminance = 0.2, chroma = 0.02, hue = 250.0 }
///
/// [brush]
/// size = 120.0
/// tool = "Sharp Rake"
///
/// [gestures]
/// tap_travel_threshold = 12.0
///
/// [noise]
/// seed = 7
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    #[serde(default)]
    pub canvas: CanvasConfig,

    #[serde(default)]
    pub brush: BrushConfig,

    #[serde(default)]
    pub gestures: GesturesConfig,

    #[serde(default)]
    pub noise: NoiseConfig,

    #[serde(default)]
    pub keybindings: KeybindingsConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

fn clamp_f64(value: &mut f64, min: f64, max: f64, name: &str) {
    if !(min..=max).contains(value) {
        warn!("Invalid {name} {value:.3}, clamping to {min}-{max} range");
        *value = if value.is_nan() { min } else { value.clamp(min, max) };
    }
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value and a warning is logged.
    pub fn validate_and_clamp(&mut self) {
        let bg = &mut self.canvas.background;
        clamp_f64(&mut bg.luminance, 0.0, 1.0, "canvas.background.luminance");
        clamp_f64(&mut bg.chroma, 0.0, 0.5, "canvas.background.chroma");
        if !(0.0..360.0).contains(&bg.hue) {
            let wrapped = crate::util::wrap_degrees(if bg.hue.is_finite() { bg.hue } else { 0.0 });
            warn!("canvas.background.hue {:.1} wrapped to {wrapped:.1}", bg.hue);
            bg.hue = wrapped;
        }

        for (value, name) in [
            (&mut self.canvas.width, "canvas.width"),
            (&mut self.canvas.height, "canvas.height"),
        ] {
            if !(16..=8192).contains(value) {
                warn!("Invalid {name} {value}, clamping to 16-8192 range");
                *value = (*value).clamp(16, 8192);
            }
        }

        clamp_f64(&mut self.brush.chroma, 0.0, 0.5, "brush.chroma");
        clamp_f64(&mut self.brush.luminance, 0.0, 1.0, "brush.luminance");
        clamp_f64(&mut self.brush.size, 4.0, 600.0, "brush.size");
        clamp_f64(&mut self.brush.noise, 0.0, 360.0, "brush.noise");
        if !self.brush.hue.is_finite() {
            warn!("Invalid brush.hue, falling back to 0");
            self.brush.hue = 0.0;
        }
        if preset_by_label(&self.brush.tool).is_none() {
            warn!(
                "Unknown brush.tool '{}', falling back to 'Rounded'",
                self.brush.tool
            );
            self.brush.tool = "Rounded".to_string();
        }

        clamp_f64(
            &mut self.gestures.tap_travel_threshold,
            1.0,
            100.0,
            "gestures.tap_travel_threshold",
        );
        clamp_f64(
            &mut self.gestures.gadget_radius_divisor,
            2.0,
            32.0,
            "gestures.gadget_radius_divisor",
        );
        if !(2..=4).contains(&self.gestures.page_count) {
            warn!(
                "Invalid gestures.page_count {}, clamping to 2-4 range",
                self.gestures.page_count
            );
            self.gestures.page_count = self.gestures.page_count.clamp(2, 4);
        }
        if !self.gestures.phone_max_short_side.is_finite() || self.gestures.phone_max_short_side < 0.0
        {
            warn!(
                "Invalid gestures.phone_max_short_side {}, using 600",
                self.gestures.phone_max_short_side
            );
            self.gestures.phone_max_short_side = 600.0;
        }

        if !(1..=4096).contains(&self.noise.table_size) {
            warn!(
                "Invalid noise.table_size {}, clamping to 1-4096 range",
                self.noise.table_size
            );
            self.noise.table_size = self.noise.table_size.clamp(1, 4096);
        }
    }

    /// Returns the path to the configuration file (`~/.config/drawlab/config.toml`).
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("drawlab");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default location, or returns defaults if not found.
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Loads and validates configuration from an explicit file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or contains invalid TOML.
    pub fn load_from(path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        config.validate_and_clamp();

        info!("Loaded config from {}", path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// JSON schema of the configuration file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_documented_values() {
        let config = Config::default();
        assert_eq!(config.brush.size, 200.0);
        assert_eq!(config.brush.noise, 80.0);
        assert_eq!(config.gestures.page_count, 4);
        assert_eq!(config.gestures.tap_travel_threshold, 10.0);
        assert_eq!(config.noise.table_size, 128);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let mut config: Config = toml::from_str(
            r#"
            [brush]
            chroma = 3.0
            size = 1.0
            tool = "Airbrush"

            [gestures]
            page_count = 9

            [canvas.background]
            luminance = 0.1
            chroma = 0.0
            hue = -90.0
            "#,
        )
        .unwrap();
        config.validate_and_clamp();

        assert_eq!(config.brush.chroma, 0.5);
        assert_eq!(config.brush.size, 4.0);
        assert_eq!(config.brush.tool, "Rounded");
        assert_eq!(config.gestures.page_count, 4);
        assert_eq!(config.canvas.background.hue, 270.0);
    }

    #[test]
    fn load_from_reads_partial_files() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[noise]\nseed = 42").unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.noise.seed, 42);
        assert_eq!(config.noise.table_size, 128);
        assert_eq!(config.brush.tool, "Rounded");
    }

    #[test]
    fn load_from_reports_parse_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[brush\nsize = ").unwrap();
        let err = Config::load_from(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse config"));
    }

    #[test]
    fn schema_lists_sections() {
        let schema = serde_json::to_string(&Config::json_schema()).unwrap();
        assert!(schema.contains("gestures"));
        assert!(schema.contains("tap_travel_threshold"));
    }
}
