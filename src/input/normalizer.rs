//! Input Normalizer: raw mouse/touch events to one pointer sample per frame.
//!
//! The normalizer owns all cross-event bookkeeping (ongoing contacts, device
//! latching, tap counting) and hands the engine a fresh [`GestureContext`]
//! for every event. The engine never inspects raw contacts itself.
//!
//! Device rules:
//! - The first event latches the device family. A touch session upgrades to
//!   [`DeviceFamily::Pen`] the first time a stylus contact shows up. Events
//!   from the other family (mouse during a touch session or vice versa) are
//!   dropped.
//! - Pen sessions: the stylus is the pointer; fingers only count towards
//!   taps, and every finger landing reports the increase in finger count.
//! - Touch-only sessions: the first finger of a sequence becomes the pointer
//!   once it has travelled the tap threshold while alone. A sequence that
//!   ends without that promotion is a tap worth its peak finger count.

use super::events::{Contact, EventKind, EventSource, PointerSample, RawEvent};
use crate::util::Point;
use log::{debug, info};

/// Default travel (px) separating a tap from a drag.
pub const DEFAULT_TAP_TRAVEL: f64 = 10.0;

/// Kind of device driving the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceFamily {
    Mouse,
    /// Touch screen used with fingers only
    Touch,
    /// Touch screen with a stylus
    Pen,
}

impl DeviceFamily {
    /// Whether the session uses a touch screen (with or without stylus).
    pub fn is_touch(self) -> bool {
        !matches!(self, DeviceFamily::Mouse)
    }
}

/// Per-frame gesture summary.
///
/// Recomputed for every event; only `device_family` carries over between
/// frames (it is latched by the normalizer).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureContext {
    /// Fingers on the glass that are not acting as the pointer
    pub active_finger_count: usize,
    pub device_family: DeviceFamily,
    pub pointer_down: bool,
    /// `pointer_down` of the previous frame
    pub was_pointer_down: bool,
    /// Tap reported by this event: the number of pages to advance
    pub tap: Option<usize>,
}

impl GestureContext {
    pub fn idle(device_family: DeviceFamily) -> Self {
        Self {
            active_finger_count: 0,
            device_family,
            pointer_down: false,
            was_pointer_down: false,
            tap: None,
        }
    }

    pub fn pointer_pressed(&self) -> bool {
        self.pointer_down && !self.was_pointer_down
    }

    pub fn pointer_released(&self) -> bool {
        !self.pointer_down && self.was_pointer_down
    }

    pub fn dragging(&self) -> bool {
        self.pointer_down && self.was_pointer_down
    }

    /// The same context one frame later with nothing new happening.
    pub fn settled(&self) -> Self {
        Self {
            was_pointer_down: self.pointer_down,
            tap: None,
            ..*self
        }
    }
}

/// Output of one normalised event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedInput {
    pub sample: PointerSample,
    pub context: GestureContext,
}

/// First finger of a touch-only sequence, waiting to become the pointer.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    id: u64,
    origin: Point,
    promoted: bool,
}

pub struct InputNormalizer {
    family: Option<DeviceFamily>,
    contacts: Vec<Contact>,
    candidate: Option<Candidate>,
    /// Highest simultaneous finger count of the current touch sequence
    peak_fingers: usize,
    /// Whether the current sequence produced a pointer (so it is not a tap)
    sequence_drew: bool,
    tap_travel: f64,
    last_sample: PointerSample,
    pointer_down: bool,
}

impl Default for InputNormalizer {
    fn default() -> Self {
        Self::new(DEFAULT_TAP_TRAVEL)
    }
}

impl InputNormalizer {
    pub fn new(tap_travel: f64) -> Self {
        Self {
            family: None,
            contacts: Vec::new(),
            candidate: None,
            peak_fingers: 0,
            sequence_drew: false,
            tap_travel,
            last_sample: PointerSample::at(0.0, 0.0),
            pointer_down: false,
        }
    }

    /// Latched device family, if any event has been seen yet.
    pub fn family(&self) -> Option<DeviceFamily> {
        self.family
    }

    pub fn last_sample(&self) -> PointerSample {
        self.last_sample
    }

    /// Converts one raw event into a sample plus gesture context.
    ///
    /// Returns `None` when the event belongs to the device family that was
    /// not latched for this session.
    pub fn normalize(&mut self, event: &RawEvent) -> Option<NormalizedInput> {
        let family = self.latch(event)?;
        let was_pointer_down = self.pointer_down;

        let (sample, fingers, tap) = match family {
            DeviceFamily::Mouse => self.mouse(event),
            DeviceFamily::Pen => self.pen(event),
            DeviceFamily::Touch => self.touch(event),
        };

        self.last_sample = sample;
        Some(NormalizedInput {
            sample,
            context: GestureContext {
                active_finger_count: fingers,
                device_family: family,
                pointer_down: self.pointer_down,
                was_pointer_down,
                tap,
            },
        })
    }

    fn latch(&mut self, event: &RawEvent) -> Option<DeviceFamily> {
        let has_stylus = event.contacts.iter().any(|c| c.stylus);
        match (self.family, event.source) {
            (None, EventSource::Mouse) => {
                info!("Input device latched: mouse");
                self.family = Some(DeviceFamily::Mouse);
            }
            (None, EventSource::Touch) => {
                let family = if has_stylus {
                    DeviceFamily::Pen
                } else {
                    DeviceFamily::Touch
                };
                info!("Input device latched: {family:?}");
                self.family = Some(family);
            }
            (Some(DeviceFamily::Touch), EventSource::Touch) if has_stylus => {
                info!("Stylus detected; switching to pen input");
                // a finger that was drawing hands over to the stylus
                if self.candidate.is_some_and(|c| c.promoted) {
                    self.pointer_down = false;
                }
                self.candidate = None;
                self.family = Some(DeviceFamily::Pen);
            }
            (Some(DeviceFamily::Mouse), EventSource::Touch)
            | (Some(DeviceFamily::Touch | DeviceFamily::Pen), EventSource::Mouse) => {
                debug!(
                    "Dropping {:?} event from {:?} during a {:?} session",
                    event.kind, event.source, self.family
                );
                return None;
            }
            _ => {}
        }
        self.family
    }

    fn mouse(&mut self, event: &RawEvent) -> (PointerSample, usize, Option<usize>) {
        match event.kind {
            EventKind::Start => self.pointer_down = true,
            EventKind::End | EventKind::Cancel => self.pointer_down = false,
            EventKind::Move => {}
        }
        let sample = event
            .contacts
            .first()
            .map(|c| sample_from(c, event.kind))
            .unwrap_or(PointerSample {
                kind: event.kind,
                ..self.last_sample
            });
        (sample, 0, None)
    }

    /// Applies the changed contacts to the ongoing set and returns how many
    /// contacts there were before.
    fn track_contacts(&mut self, event: &RawEvent) -> usize {
        let before = self.contacts.len();
        match event.kind {
            EventKind::Start | EventKind::Move => {
                for contact in &event.contacts {
                    match self.contacts.iter_mut().find(|c| c.id == contact.id) {
                        Some(existing) => *existing = *contact,
                        None if event.kind == EventKind::Start => self.contacts.push(*contact),
                        None => {}
                    }
                }
            }
            EventKind::End => {
                self.contacts
                    .retain(|c| !event.contacts.iter().any(|gone| gone.id == c.id));
            }
            EventKind::Cancel => {
                if event.contacts.is_empty() {
                    self.contacts.clear();
                } else {
                    self.contacts
                        .retain(|c| !event.contacts.iter().any(|gone| gone.id == c.id));
                }
            }
        }
        before
    }

    fn pen(&mut self, event: &RawEvent) -> (PointerSample, usize, Option<usize>) {
        let fingers_before = self.contacts.iter().filter(|c| !c.stylus).count();
        self.track_contacts(event);
        let fingers = self.contacts.iter().filter(|c| !c.stylus).count();

        let stylus = self.contacts.iter().find(|c| c.stylus).copied();
        self.pointer_down = stylus.is_some();

        let sample = match stylus {
            Some(contact) => sample_from(&contact, event.kind),
            // stylus lifted: report its last position
            None => event
                .contacts
                .iter()
                .find(|c| c.stylus)
                .map(|c| sample_from(c, event.kind))
                .unwrap_or(PointerSample {
                    kind: event.kind,
                    ..self.last_sample
                }),
        };

        let tap = (event.kind == EventKind::Start && fingers > fingers_before)
            .then(|| fingers - fingers_before);
        (sample, fingers, tap)
    }

    fn touch(&mut self, event: &RawEvent) -> (PointerSample, usize, Option<usize>) {
        let before = self.track_contacts(event);
        let count = self.contacts.len();

        if before == 0 && count > 0 {
            // new sequence
            self.peak_fingers = 0;
            self.sequence_drew = false;
            self.candidate = self.contacts.first().map(|c| Candidate {
                id: c.id,
                origin: c.position(),
                promoted: false,
            });
        }
        self.peak_fingers = self.peak_fingers.max(count);

        let mut sample = PointerSample {
            kind: event.kind,
            ..self.last_sample
        };

        if let Some(mut candidate) = self.candidate {
            match self.contacts.iter().find(|c| c.id == candidate.id).copied() {
                Some(contact) => {
                    if !candidate.promoted
                        && count == 1
                        && contact.position().distance(candidate.origin) >= self.tap_travel
                    {
                        debug!("Finger {} promoted to pointer", contact.id);
                        candidate.promoted = true;
                        self.sequence_drew = true;
                    }
                    if !candidate.promoted && count > 1 {
                        // a second finger turns the sequence into a tap
                        self.candidate = None;
                    } else {
                        self.candidate = Some(candidate);
                    }
                    if candidate.promoted {
                        sample = sample_from(&contact, event.kind);
                    }
                }
                None => {
                    if candidate.promoted
                        && let Some(lifted) = event.contacts.iter().find(|c| c.id == candidate.id)
                    {
                        sample = sample_from(lifted, event.kind);
                    }
                    self.candidate = None;
                }
            }
        }

        self.pointer_down = self.candidate.is_some_and(|c| c.promoted);
        let fingers = count - usize::from(self.pointer_down);

        let tap = if count == 0 && before > 0 && !self.sequence_drew {
            let peak = self.peak_fingers;
            self.peak_fingers = 0;
            debug!("Tap with {peak} finger(s)");
            Some(peak)
        } else {
            None
        };
        (sample, fingers, tap)
    }
}

fn sample_from(contact: &Contact, kind: EventKind) -> PointerSample {
    PointerSample {
        position: contact.position(),
        angle: contact.angle,
        pressure: contact.pressure,
        kind,
    }
}
