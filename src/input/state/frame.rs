//! Per-frame pipeline: normalise, classify, map or record, composite.

use super::PaintState;
use crate::input::events::{PointerSample, RawEvent};
use crate::input::mode::{Mode, ModeInputs, Transition, transition};
use crate::input::normalizer::GestureContext;
use log::{debug, info};

impl PaintState {
    /// Processes one raw device event as a complete frame.
    ///
    /// Returns `false` when the event was dropped by the normalizer (it came
    /// from the device family that is not driving this session).
    pub fn handle_event(&mut self, event: &RawEvent) -> bool {
        let Some(input) = self.normalizer.normalize(event) else {
            return false;
        };
        self.pager.observe(&input.context, &input.sample);
        self.run_frame(input.sample, input.context);
        true
    }

    /// Re-runs a frame with the last pointer sample and no new gesture edges.
    ///
    /// Used after key presses and actions so mode and overlay stay current.
    pub fn refresh(&mut self) {
        let context = self.context.settled();
        self.run_frame(self.pointer, context);
    }

    fn run_frame(&mut self, sample: PointerSample, context: GestureContext) {
        let inputs = ModeInputs {
            held: self.held,
            page: self.pager.page(),
            phone: self.is_phone(),
        };
        let step = transition(self.mode, &inputs);
        if step.changed() {
            self.on_mode_change(step);
        }

        match self.mode {
            Mode::Draw => self.draw_frame(&sample, &context),
            Mode::Eyedropper => self.eyedropper_frame(&sample, &context),
            _ => self.adjust_frame(&sample, &context),
        }

        // an edit is re-rendered every frame, including after brush changes
        if self.edit.is_some() {
            self.regenerate_edit();
        }

        self.pointer = sample;
        self.context = context;
        self.rebuild_interface();
        self.needs_redraw = true;
    }

    fn on_mode_change(&mut self, step: Transition) {
        info!("Mode {} -> {}", step.from.label(), step.to.label());

        if step.from == Mode::Draw && self.stroke_active {
            self.finish_stroke();
        }
        // any partially applied drag simply keeps its last value
        self.snapshot = None;
        self.radial = None;

        if step.to == Mode::Eyedropper {
            if self.edit.is_some() {
                self.leave_edit();
            } else if !self.compositor.pending().is_empty() {
                self.compositor.merge_pending();
            }
        }
        self.mode = step.to;
    }

    fn draw_frame(&mut self, sample: &PointerSample, context: &GestureContext) {
        if self.edit.is_some() {
            if context.dragging() {
                let dx = sample.position.x - self.pointer.position.x;
                let dy = sample.position.y - self.pointer.position.y;
                self.recording.translate(dx, dy);
            }
            return;
        }

        if context.pointer_pressed() {
            self.begin_stroke(sample);
        } else if context.dragging() && self.stroke_active {
            self.extend_stroke(sample);
        } else if context.pointer_released() && self.stroke_active {
            // the stroke ends where the pointer was lifted
            let last = self.recording.samples().last().map(|s| s.position);
            if last != Some(sample.position) {
                self.extend_stroke(sample);
            }
            self.finish_stroke();
        }
    }

    fn eyedropper_frame(&mut self, sample: &PointerSample, context: &GestureContext) {
        // touch devices only pick while touching; a mouse picks on hover
        if context.device_family.is_touch() && !context.pointer_down {
            return;
        }
        self.pick_color(sample.position);
    }

    fn adjust_frame(&mut self, sample: &PointerSample, context: &GestureContext) {
        if self.snapshot.is_none() {
            self.arm(sample);
            return;
        }

        if context.device_family.is_touch() {
            if context.pointer_pressed() {
                debug!("Re-arming {} at pointer-down", self.mode.label());
                self.radial = None;
                self.arm(sample);
                return;
            }
            if !context.pointer_down {
                self.radial = None;
                return;
            }
        }

        self.map_parameters(sample, context);
    }
}
