//! Engine state shared by every frame.

use super::mapper::RadialDrag;
use super::stroke::{EditSession, StrokeRecording};
use crate::config::{Action, Config, KeyBinding};
use crate::draw::{ColorSpace, Compositor, NoiseTable, OklabSpace, Oklch};
use crate::input::events::PointerSample;
use crate::input::mode::{Mode, TapPager};
use crate::input::modifiers::HeldModes;
use crate::input::normalizer::{DeviceFamily, GestureContext, InputNormalizer};
use crate::input::params::{BrushParameters, ReferenceSnapshot};
use crate::tools::{Brush, Texture, Tool, preset_by_label};
use anyhow::{Result, anyhow};
use std::collections::HashMap;
use std::path::PathBuf;

/// Tunables copied out of the configuration at start-up.
#[derive(Debug, Clone)]
pub struct EngineSettings {
    /// Gadget radius = min(width, height) / divisor
    pub gadget_radius_divisor: f64,
    /// Viewports with a shorter side than this get the radial menu
    pub phone_max_short_side: f64,
    pub save_directory: String,
    pub filename_template: String,
}

impl Default for EngineSettings {
    fn default() -> Self {
        let config = Config::default();
        Self::from_config(&config)
    }
}

impl EngineSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            gadget_radius_divisor: config.gestures.gadget_radius_divisor,
            phone_max_short_side: config.gestures.phone_max_short_side,
            save_directory: config.output.save_directory.clone(),
            filename_template: config.output.filename_template.clone(),
        }
    }
}

/// The painting engine.
///
/// One `PaintState` owns every piece of mutable state (brush, recording,
/// layers, gesture bookkeeping). Each raw event runs exactly one frame to
/// completion via [`PaintState::handle_event`]; key presses and actions also
/// run a frame so the interface and mode stay current.
pub struct PaintState {
    /// Current brush settings
    pub(crate) params: BrushParameters,
    /// Baseline of the active adjustment gesture
    pub(crate) snapshot: Option<ReferenceSnapshot>,
    /// Samples of the current or most recent stroke
    pub(crate) recording: StrokeRecording,
    /// Present while the last stroke is being edited
    pub(crate) edit: Option<EditSession>,
    pub(crate) compositor: Compositor,
    pub(crate) normalizer: InputNormalizer,
    pub(crate) pager: TapPager,
    /// Mode keys currently held
    pub(crate) held: HeldModes,
    pub(crate) noise: NoiseTable,
    pub(crate) color_space: Box<dyn ColorSpace>,
    /// Mode evaluated by the previous frame
    pub(crate) mode: Mode,
    /// Gesture context of the previous frame
    pub(crate) context: GestureContext,
    /// Pointer sample of the previous frame
    pub(crate) pointer: PointerSample,
    /// Locked quadrant of the phone radial menu while dragging
    pub(crate) radial: Option<RadialDrag>,
    /// A stroke is being recorded (pointer down in Draw)
    pub(crate) stroke_active: bool,
    /// The top committed stroke group was produced from `recording`
    pub(crate) last_commit_from_recording: bool,
    pub(crate) settings: EngineSettings,
    /// Keybinding action map for efficient lookup
    action_map: HashMap<KeyBinding, Action>,
    /// Whether the display needs to be redrawn
    pub needs_redraw: bool,
}

impl PaintState {
    /// Creates an engine with explicit parts.
    ///
    /// Most callers want [`PaintState::from_config`]; this constructor lets
    /// tests and embedders inject their own noise table and colour space.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        params: BrushParameters,
        background: Oklch,
        viewport: (i32, i32),
        noise: NoiseTable,
        color_space: Box<dyn ColorSpace>,
        normalizer: InputNormalizer,
        pager: TapPager,
        settings: EngineSettings,
        action_map: HashMap<KeyBinding, Action>,
    ) -> Self {
        Self {
            params,
            snapshot: None,
            recording: StrokeRecording::new(),
            edit: None,
            compositor: Compositor::new(background, viewport.0, viewport.1),
            normalizer,
            pager,
            held: HeldModes::new(),
            noise,
            color_space,
            mode: Mode::Draw,
            context: GestureContext::idle(DeviceFamily::Mouse),
            // gadgets armed before any motion open mid-canvas
            pointer: PointerSample::at(f64::from(viewport.0) / 2.0, f64::from(viewport.1) / 2.0),
            radial: None,
            stroke_active: false,
            last_commit_from_recording: false,
            settings,
            action_map,
            needs_redraw: true,
        }
    }

    /// Builds the engine from a validated configuration.
    ///
    /// # Errors
    /// Returns an error when the keybinding table is invalid.
    pub fn from_config(config: &Config) -> Result<Self> {
        let action_map = config
            .keybindings
            .build_action_map()
            .map_err(|err| anyhow!("Invalid keybindings: {err}"))?;

        let (tool, texture) = preset_by_label(&config.brush.tool)
            .map(|preset| (preset.tool, preset.texture))
            .unwrap_or((Tool::Stamp, Some(Texture::Rounded)));
        let brush = &config.brush;
        let params = BrushParameters::new(
            Oklch::new(brush.luminance, brush.chroma, brush.hue),
            brush.size,
            brush.noise,
            tool,
            texture,
        );

        Ok(Self::new(
            params,
            config.canvas.background,
            (config.canvas.width, config.canvas.height),
            NoiseTable::seeded(config.noise.seed, config.noise.table_size),
            Box::new(OklabSpace),
            InputNormalizer::new(config.gestures.tap_travel_threshold),
            TapPager::new(config.gestures.page_count, config.gestures.tap_travel_threshold),
            EngineSettings::from_config(config),
            action_map,
        ))
    }

    pub fn params(&self) -> &BrushParameters {
        &self.params
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn snapshot(&self) -> Option<&ReferenceSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn recording(&self) -> &StrokeRecording {
        &self.recording
    }

    pub fn compositor(&self) -> &Compositor {
        &self.compositor
    }

    pub fn color_space(&self) -> &dyn ColorSpace {
        self.color_space.as_ref()
    }

    pub fn is_editing(&self) -> bool {
        self.edit.is_some()
    }

    pub fn device_family(&self) -> Option<DeviceFamily> {
        self.normalizer.family()
    }

    pub fn page(&self) -> usize {
        self.pager.page()
    }

    /// Looks up the action bound to a key.
    pub(crate) fn find_action(&self, binding: &KeyBinding) -> Option<Action> {
        self.action_map.get(binding).copied()
    }

    /// Updates the viewport after the host surface changed size.
    pub fn resize(&mut self, width: i32, height: i32) {
        self.compositor.resize(width, height);
        self.needs_redraw = true;
    }

    /// Reach of the adjustment gadgets in pixels.
    pub fn gadget_radius(&self) -> f64 {
        let (w, h) = self.compositor.size();
        f64::from(w.min(h)) / self.settings.gadget_radius_divisor
    }

    /// Whether the viewport is phone-shaped.
    pub fn is_phone(&self) -> bool {
        let (w, h) = self.compositor.size();
        f64::from(w.min(h)) < self.settings.phone_max_short_side
    }

    pub(crate) fn brush(&self) -> Brush<'_> {
        Brush {
            params: &self.params,
            noise: &self.noise,
        }
    }

    pub(crate) fn default_save_directory(&self) -> PathBuf {
        crate::draw::export::expand_tilde(&self.settings.save_directory)
    }
}
