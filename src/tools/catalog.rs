//! Tool selection and the static preset catalog.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Drawing tool selection.
///
/// The active tool determines what geometry a recorded stroke turns into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum Tool {
    /// Discrete marks stamped at every pointer sample
    Stamp,
    /// One constant-width segment from start to end, committed on release
    RoundLine,
    /// A segment from start to the current point on every sample
    FanLine,
    /// Tapered segment built from faceted trapezoids
    SharpLine,
    /// Triangle through start, end and the widest bulge of the path
    Triangle,
    /// Filled trace of the whole gesture
    Lasso,
    /// Path profile mirrored about the start-end chord
    Mirror,
}

/// Texture variant for tools that support one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum Texture {
    /// Single solid footprint
    Rounded,
    /// Several smaller sub-marks spread across the footprint
    Rake,
}

/// Menu entry pairing a tool with its texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolDefinition {
    pub tool: Tool,
    pub texture: Option<Texture>,
    pub menu_label: &'static str,
}

pub const TOOL_PRESETS: [ToolDefinition; 9] = [
    ToolDefinition {
        tool: Tool::Stamp,
        texture: Some(Texture::Rounded),
        menu_label: "Rounded",
    },
    ToolDefinition {
        tool: Tool::Stamp,
        texture: Some(Texture::Rake),
        menu_label: "Rake",
    },
    ToolDefinition {
        tool: Tool::RoundLine,
        texture: None,
        menu_label: "Line",
    },
    ToolDefinition {
        tool: Tool::FanLine,
        texture: None,
        menu_label: "Fan",
    },
    ToolDefinition {
        tool: Tool::SharpLine,
        texture: None,
        menu_label: "Sharp",
    },
    ToolDefinition {
        tool: Tool::SharpLine,
        texture: Some(Texture::Rake),
        menu_label: "Sharp Rake",
    },
    ToolDefinition {
        tool: Tool::Triangle,
        texture: None,
        menu_label: "Triangle",
    },
    ToolDefinition {
        tool: Tool::Lasso,
        texture: None,
        menu_label: "Lasso",
    },
    ToolDefinition {
        tool: Tool::Mirror,
        texture: None,
        menu_label: "Mirror",
    },
];

/// Looks up a preset by its menu label (case-insensitive).
pub fn preset_by_label(label: &str) -> Option<&'static ToolDefinition> {
    TOOL_PRESETS
        .iter()
        .find(|preset| preset.menu_label.eq_ignore_ascii_case(label))
}

/// Index of the preset matching `tool` + `texture`, if it is in the catalog.
pub fn preset_index(tool: Tool, texture: Option<Texture>) -> Option<usize> {
    TOOL_PRESETS
        .iter()
        .position(|preset| preset.tool == tool && preset.texture == texture)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_resolve_case_insensitively() {
        let preset = preset_by_label("sharp rake").expect("preset");
        assert_eq!(preset.tool, Tool::SharpLine);
        assert_eq!(preset.texture, Some(Texture::Rake));
        assert!(preset_by_label("airbrush").is_none());
    }

    #[test]
    fn every_preset_is_unique() {
        for (i, preset) in TOOL_PRESETS.iter().enumerate() {
            assert_eq!(preset_index(preset.tool, preset.texture), Some(i));
        }
    }
}
