//! Keybinding configuration types and parsing.
//!
//! Keys either trigger a one-shot action or, for the mode keys, select an
//! adjustment mode while held.

use crate::input::Key;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// All possible actions that can be bound to keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    // Held mode keys
    HoldLumaChroma,
    HoldHue,
    HoldSize,
    HoldEyedropper,

    // One-shot actions
    Undo,
    ClearCanvas,
    ToggleEdit,
    Save,
    NextTool,
}

impl Action {
    /// Whether the action is active only while its key is held.
    pub fn is_held(self) -> bool {
        matches!(
            self,
            Action::HoldLumaChroma | Action::HoldHue | Action::HoldSize | Action::HoldEyedropper
        )
    }
}

/// A single keybinding: one key, compared case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub key: String,
}

impl KeyBinding {
    /// Parse a keybinding string like "z" or "Escape".
    pub fn parse(s: &str) -> Result<Self, String> {
        let s = s.trim();
        if s.is_empty() {
            return Err("Empty keybinding string".to_string());
        }
        if s.chars().count() > 1 && !s.eq_ignore_ascii_case("escape") {
            return Err(format!("Unsupported key: {s}"));
        }
        Ok(Self {
            key: s.to_lowercase(),
        })
    }

    /// The binding a pressed key would match, if it can be bound at all.
    pub fn from_key(key: Key) -> Option<Self> {
        match key {
            Key::Char(c) => Some(Self {
                key: c.to_lowercase().collect(),
            }),
            Key::Escape => Some(Self {
                key: "escape".to_string(),
            }),
            Key::Unknown => None,
        }
    }
}

/// Configuration for all keybindings.
///
/// Each action can have multiple keybindings:
/// ```toml
/// [keybindings]
/// undo = ["z", "Escape"]
/// hold_hue = ["2"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct KeybindingsConfig {
    #[serde(default = "default_hold_luma_chroma")]
    pub hold_luma_chroma: Vec<String>,

    #[serde(default = "default_hold_hue")]
    pub hold_hue: Vec<String>,

    #[serde(default = "default_hold_size")]
    pub hold_size: Vec<String>,

    #[serde(default = "default_hold_eyedropper")]
    pub hold_eyedropper: Vec<String>,

    #[serde(default = "default_undo")]
    pub undo: Vec<String>,

    #[serde(default = "default_clear_canvas")]
    pub clear_canvas: Vec<String>,

    #[serde(default = "default_toggle_edit")]
    pub toggle_edit: Vec<String>,

    #[serde(default = "default_save")]
    pub save: Vec<String>,

    #[serde(default = "default_next_tool")]
    pub next_tool: Vec<String>,
}

impl Default for KeybindingsConfig {
    fn default() -> Self {
        Self {
            hold_luma_chroma: default_hold_luma_chroma(),
            hold_hue: default_hold_hue(),
            hold_size: default_hold_size(),
            hold_eyedropper: default_hold_eyedropper(),
            undo: default_undo(),
            clear_canvas: default_clear_canvas(),
            toggle_edit: default_toggle_edit(),
            save: default_save(),
            next_tool: default_next_tool(),
        }
    }
}

impl KeybindingsConfig {
    /// Build a lookup map from keybindings to actions.
    /// Returns an error if any keybinding string is invalid or if duplicates are detected.
    pub fn build_action_map(&self) -> Result<HashMap<KeyBinding, Action>, String> {
        let mut map = HashMap::new();

        let groups: [(&[String], Action); 9] = [
            (&self.hold_luma_chroma, Action::HoldLumaChroma),
            (&self.hold_hue, Action::HoldHue),
            (&self.hold_size, Action::HoldSize),
            (&self.hold_eyedropper, Action::HoldEyedropper),
            (&self.undo, Action::Undo),
            (&self.clear_canvas, Action::ClearCanvas),
            (&self.toggle_edit, Action::ToggleEdit),
            (&self.save, Action::Save),
            (&self.next_tool, Action::NextTool),
        ];

        for (bindings, action) in groups {
            for binding_str in bindings {
                let binding = KeyBinding::parse(binding_str)?;
                if let Some(existing_action) = map.insert(binding, action) {
                    return Err(format!(
                        "Duplicate keybinding '{}' assigned to both {:?} and {:?}",
                        binding_str, existing_action, action
                    ));
                }
            }
        }

        Ok(map)
    }
}

// =============================================================================
// Default keybinding functions
// =============================================================================

fn default_hold_luma_chroma() -> Vec<String> {
    vec!["1".to_string()]
}

fn default_hold_hue() -> Vec<String> {
    vec!["2".to_string()]
}

fn default_hold_size() -> Vec<String> {
    vec!["3".to_string()]
}

fn default_hold_eyedropper() -> Vec<String> {
    vec!["4".to_string()]
}

fn default_undo() -> Vec<String> {
    vec!["z".to_string()]
}

fn default_clear_canvas() -> Vec<String> {
    vec!["c".to_string()]
}

fn default_toggle_edit() -> Vec<String> {
    vec!["e".to_string()]
}

fn default_save() -> Vec<String> {
    vec!["s".to_string()]
}

fn default_next_tool() -> Vec<String> {
    vec!["t".to_string()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_key() {
        let binding = KeyBinding::parse("Z").unwrap();
        assert_eq!(binding.key, "z");
    }

    #[test]
    fn test_parse_escape() {
        let binding = KeyBinding::parse(" Escape ").unwrap();
        assert_eq!(Some(binding), KeyBinding::from_key(Key::Escape));
    }

    #[test]
    fn test_parse_rejects_words() {
        assert!(KeyBinding::parse("Ctrl+Z").is_err());
        assert!(KeyBinding::parse("").is_err());
    }

    #[test]
    fn test_build_action_map() {
        let map = KeybindingsConfig::default().build_action_map().unwrap();
        let lookup = |c| map.get(&KeyBinding::from_key(Key::Char(c)).unwrap()).copied();
        assert_eq!(lookup('2'), Some(Action::HoldHue));
        assert_eq!(lookup('Z'), Some(Action::Undo));
        assert_eq!(lookup('q'), None);
    }

    #[test]
    fn test_duplicate_keybinding_detection() {
        let config = KeybindingsConfig {
            save: vec!["z".to_string()],
            ..KeybindingsConfig::default()
        };
        let err = config.build_action_map().unwrap_err();
        assert!(err.contains("Duplicate keybinding"));
    }
}
