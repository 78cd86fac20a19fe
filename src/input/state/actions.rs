use crate::config::{Action, KeyBinding};
use crate::draw::export::{ensure_directory_exists, generate_filename};
use crate::draw::{ExportError, Oklch, write_png};
use crate::input::events::Key;
use crate::tools::{TOOL_PRESETS, Texture, Tool, preset_index};
use log::{debug, error, info};
use std::path::{Path, PathBuf};

use super::PaintState;

/// Minimum luminance gap kept between brush and background after a clear.
const CLEAR_CONTRAST: f64 = 0.05;

impl PaintState {
    /// Processes a key press event.
    ///
    /// Mode keys are tracked as held; every other bound key runs its action
    /// once. Unbound keys are ignored.
    pub fn on_key_press(&mut self, key: Key) {
        let Some(action) = KeyBinding::from_key(key).and_then(|b| self.find_action(&b)) else {
            return;
        };
        if action.is_held() {
            self.set_held(action, true);
            self.refresh();
        } else {
            self.handle_action(action);
        }
    }

    /// Processes a key release event.
    pub fn on_key_release(&mut self, key: Key) {
        let Some(action) = KeyBinding::from_key(key).and_then(|b| self.find_action(&b)) else {
            return;
        };
        if action.is_held() {
            self.set_held(action, false);
            self.refresh();
        }
    }

    /// Releases every held mode key, e.g. when the host window loses focus
    /// and key-up events will never arrive.
    pub fn on_focus_lost(&mut self) {
        if self.held.any() {
            debug!("Focus lost; releasing held mode keys");
            self.held.release_all();
            self.refresh();
        }
    }

    fn set_held(&mut self, action: Action, down: bool) {
        match action {
            Action::HoldLumaChroma => self.held.luma_chroma = down,
            Action::HoldHue => self.held.hue = down,
            Action::HoldSize => self.held.size = down,
            Action::HoldEyedropper => self.held.eyedropper = down,
            _ => {}
        }
    }

    /// Runs a one-shot action.
    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Undo => self.undo(),
            Action::ClearCanvas => self.clear(),
            Action::ToggleEdit => self.toggle_edit(),
            Action::NextTool => self.next_tool(),
            Action::Save => {
                if let Err(err) = self.save(None) {
                    error!("Failed to save canvas: {err}");
                }
            }
            Action::HoldLumaChroma
            | Action::HoldHue
            | Action::HoldSize
            | Action::HoldEyedropper => {
                debug!("{action:?} only works as a held key");
            }
        }
    }

    /// Switches tool and texture.
    ///
    /// While editing, the edit is cancelled: the original stroke is restored
    /// and the recording is discarded rather than re-rendered with the new tool.
    pub fn select_tool(&mut self, tool: Tool, texture: Option<Texture>) {
        if self.edit.is_some() {
            self.cancel_edit();
            self.recording.clear();
            self.last_commit_from_recording = false;
        }
        self.params.tool = tool;
        self.params.texture = texture;
        info!("Tool: {tool:?} ({texture:?})");
        self.refresh();
    }

    /// Cycles to the next catalog preset.
    pub fn next_tool(&mut self) {
        let next = preset_index(self.params.tool, self.params.texture)
            .map(|i| (i + 1) % TOOL_PRESETS.len())
            .unwrap_or(0);
        let preset = TOOL_PRESETS[next];
        self.select_tool(preset.tool, preset.texture);
    }

    /// Aborts the current or just-finished stroke.
    ///
    /// Cancels an edit in progress; otherwise removes the committed group
    /// produced from the current recording. The recording and Pending are
    /// always cleared.
    pub fn undo(&mut self) {
        if self.edit.is_some() {
            self.cancel_edit();
        } else if !self.recording.is_empty() && self.last_commit_from_recording {
            self.compositor.lift_last_stroke();
            info!("Undid last stroke");
        }
        self.stroke_active = false;
        self.last_commit_from_recording = false;
        self.recording.clear();
        self.compositor.clear_pending();
        self.refresh();
    }

    /// Fills the canvas with the brush colour and takes the old background
    /// as the new brush colour.
    pub fn clear(&mut self) {
        self.edit = None;
        self.stroke_active = false;
        self.last_commit_from_recording = false;
        // the wiped stroke must not come back through Edit
        self.recording.clear();

        let background = self.compositor.committed().background;
        let brush = self.params.color();
        self.compositor.clear_with(brush);
        self.params.set_color(background);

        // keep the new brush visible against the new background
        if (self.params.luminance() - brush.luminance).abs() < CLEAR_CONTRAST {
            let nudged = if brush.luminance > 0.5 {
                brush.luminance - CLEAR_CONTRAST
            } else {
                brush.luminance + CLEAR_CONTRAST
            };
            self.params.set_luminance(nudged);
        }
        info!(
            "Canvas cleared to L{:.2} C{:.2} H{:.0}",
            brush.luminance, brush.chroma, brush.hue
        );
        self.refresh();
    }

    /// Enters Edit mode on the last stroke, or commits the edit.
    pub fn toggle_edit(&mut self) {
        if self.edit.is_some() {
            self.leave_edit();
        } else {
            self.enter_edit();
        }
        self.refresh();
    }

    /// Writes the committed layer to a PNG file.
    ///
    /// Without an explicit path the file goes to the configured save
    /// directory with a timestamped name.
    pub fn save(&mut self, path: Option<&Path>) -> Result<PathBuf, ExportError> {
        let target = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let directory = ensure_directory_exists(&self.default_save_directory())?;
                directory.join(generate_filename(&self.settings.filename_template, "png"))
            }
        };
        let (width, height) = self.compositor.size();
        write_png(
            self.compositor.committed(),
            self.color_space.as_ref(),
            width,
            height,
            &target,
        )
    }

    /// Replaces the brush colour, e.g. from an external colour picker.
    pub fn set_brush_color(&mut self, color: Oklch) {
        self.params.set_color(color);
        self.refresh();
    }
}
