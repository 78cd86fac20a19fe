//! Replay scripts: JSON lists of input steps driven through the engine.

use anyhow::{Context, Result, anyhow};
use drawlab::PaintState;
use drawlab::config::Action;
use drawlab::input::{EventKind, Key, RawEvent};
use drawlab::tools::preset_by_label;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// One scripted input step.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// A raw device event, exactly as a platform layer would deliver it
    Event(RawEvent),
    /// Shorthand for a single-contact mouse event
    Mouse { kind: EventKind, x: f64, y: f64 },
    KeyPress(Key),
    KeyRelease(Key),
    Action(Action),
    /// Selects a catalog preset by menu label
    Tool(String),
    Resize { width: i32, height: i32 },
}

/// Summary of a replay run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReplayStats {
    pub steps: usize,
    pub dropped_events: usize,
}

pub fn load(path: &Path) -> Result<Vec<Step>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read script {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse script {}", path.display()))
}

/// Feeds every step to `state` in order.
///
/// # Errors
/// Fails on a `tool` step naming a preset that does not exist.
pub fn replay(state: &mut PaintState, steps: &[Step]) -> Result<ReplayStats> {
    let mut stats = ReplayStats::default();
    for step in steps {
        stats.steps += 1;
        match step {
            Step::Event(event) => {
                if !state.handle_event(event) {
                    stats.dropped_events += 1;
                }
            }
            Step::Mouse { kind, x, y } => {
                if !state.handle_event(&RawEvent::mouse(*kind, *x, *y)) {
                    stats.dropped_events += 1;
                }
            }
            Step::KeyPress(key) => state.on_key_press(*key),
            Step::KeyRelease(key) => state.on_key_release(*key),
            Step::Action(action) => state.handle_action(*action),
            Step::Tool(label) => {
                let preset =
                    preset_by_label(label).ok_or_else(|| anyhow!("Unknown tool preset '{label}'"))?;
                state.select_tool(preset.tool, preset.texture);
            }
            Step::Resize { width, height } => state.resize(*width, *height),
        }
    }
    Ok(stats)
}
