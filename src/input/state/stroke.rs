//! Stroke Recorder and Editor.

use super::PaintState;
use crate::draw::{Shape, Stroke};
use crate::input::events::PointerSample;
use crate::tools::{Accumulation, StrokeInput, replay};
use log::{debug, info};

/// Samples of one stroke, from pointer-down to pointer-up.
///
/// Kept after the stroke is committed so Edit mode can work on it; cleared
/// by undo, by a tool switch while editing, or when the next stroke starts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StrokeRecording {
    origin: Option<PointerSample>,
    samples: Vec<PointerSample>,
}

impl StrokeRecording {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new recording at `origin`, dropping the previous one.
    pub fn begin(&mut self, origin: PointerSample) {
        self.origin = Some(origin);
        self.samples.clear();
        self.samples.push(origin);
    }

    pub fn push(&mut self, sample: PointerSample) {
        self.samples.push(sample);
    }

    pub fn clear(&mut self) {
        self.origin = None;
        self.samples.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn origin(&self) -> Option<&PointerSample> {
        self.origin.as_ref()
    }

    pub fn samples(&self) -> &[PointerSample] {
        &self.samples
    }

    /// Moves the origin and every sample by `(dx, dy)`.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        if let Some(origin) = self.origin.as_mut() {
            *origin = origin.translated(dx, dy);
        }
        for sample in &mut self.samples {
            *sample = sample.translated(dx, dy);
        }
    }
}

/// Bookkeeping for an Edit session.
#[derive(Debug)]
pub(crate) struct EditSession {
    /// Committed group lifted out when editing started
    pub(crate) original: Option<Stroke>,
}

impl PaintState {
    /// Marks for the newest sample only (per-sample tools).
    fn latest_marks(&self) -> Vec<Shape> {
        let samples = self.recording.samples();
        self.params.tool.geometry().generate(
            &StrokeInput::new(self.recording.origin(), samples.last(), samples),
            &self.brush(),
        )
    }

    /// Complete geometry of the recorded stroke.
    pub(crate) fn replay_recording(&self) -> Vec<Shape> {
        replay(
            self.params.tool.geometry(),
            self.recording.origin(),
            self.recording.samples(),
            &self.brush(),
        )
    }

    fn update_pending(&mut self) {
        match self.params.tool.geometry().accumulation() {
            Accumulation::PerSample => {
                let marks = self.latest_marks();
                self.compositor.extend_pending(marks);
            }
            Accumulation::WholeStroke => {
                let shapes = self.replay_recording();
                self.compositor.replace_pending(shapes);
            }
        }
    }

    pub(crate) fn begin_stroke(&mut self, sample: &PointerSample) {
        self.recording.begin(*sample);
        self.stroke_active = true;
        self.last_commit_from_recording = false;
        self.compositor.clear_pending();
        self.update_pending();
        debug!(
            "Stroke started at ({:.1}, {:.1}) with {:?}",
            sample.position.x, sample.position.y, self.params.tool
        );
    }

    pub(crate) fn extend_stroke(&mut self, sample: &PointerSample) {
        self.recording.push(*sample);
        self.update_pending();
    }

    /// Generates the final geometry and merges it into Committed.
    pub(crate) fn finish_stroke(&mut self) {
        if !self.stroke_active {
            return;
        }
        self.stroke_active = false;

        if self.params.tool.geometry().accumulation() == Accumulation::WholeStroke {
            let shapes = self.replay_recording();
            self.compositor.replace_pending(shapes);
        }
        self.last_commit_from_recording = self.compositor.merge_pending();
        if self.last_commit_from_recording {
            info!("Stroke committed ({} samples)", self.recording.len());
        } else {
            debug!("Stroke produced no geometry; nothing committed");
        }
    }

    /// Lifts the last stroke back into Pending for editing.
    ///
    /// Refused (returns `false`) while a stroke is in progress or when there
    /// is no recording to edit.
    pub(crate) fn enter_edit(&mut self) -> bool {
        if self.edit.is_some() {
            return true;
        }
        if self.stroke_active || self.recording.is_empty() {
            debug!("Edit requested with nothing to edit; ignoring");
            return false;
        }

        let original = if self.last_commit_from_recording {
            self.compositor.lift_last_stroke()
        } else {
            None
        };
        self.last_commit_from_recording = false;
        self.edit = Some(EditSession { original });
        self.regenerate_edit();
        info!("Editing last stroke ({} samples)", self.recording.len());
        true
    }

    /// Commits the edited stroke.
    pub(crate) fn leave_edit(&mut self) {
        if self.edit.take().is_some() {
            self.regenerate_edit();
            self.last_commit_from_recording = self.compositor.merge_pending();
            info!("Edit committed");
        }
    }

    /// Abandons the edit and puts the original stroke back.
    pub(crate) fn cancel_edit(&mut self) {
        if let Some(session) = self.edit.take() {
            self.compositor.clear_pending();
            self.last_commit_from_recording = match session.original {
                Some(stroke) => {
                    self.compositor.restore_stroke(stroke);
                    true
                }
                None => false,
            };
            info!("Edit cancelled");
        }
    }

    /// Redraws Pending from the (possibly translated) recording.
    pub(crate) fn regenerate_edit(&mut self) {
        let shapes = self.replay_recording();
        self.compositor.replace_pending(shapes);
    }
}
