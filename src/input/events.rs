//! Raw device events and the canonical pointer sample.

use crate::util::Point;
use serde::{Deserialize, Serialize};

/// Generic key representation for cross-backend compatibility.
///
/// Backend implementations map their native key codes to these generic
/// key values for unified input handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Key {
    /// Regular character key (a-z, 0-9, symbols)
    Char(char),
    /// Escape key
    Escape,
    /// Unmapped or unrecognized key
    Unknown,
}

/// Where a raw event came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventSource {
    Mouse,
    /// Touch screen; individual contacts may be fingers or a stylus
    Touch,
}

/// Phase of a raw event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventKind {
    Start,
    Move,
    End,
    Cancel,
}

/// One contact record carried by a raw event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(default)]
    pub id: u64,
    pub x: f64,
    pub y: f64,
    /// Device-normalised force (roughly 0.0 - 0.2 for a stylus)
    #[serde(default)]
    pub pressure: Option<f64>,
    /// Azimuth angle in radians
    #[serde(default)]
    pub angle: Option<f64>,
    /// Whether this contact is a stylus tip rather than a finger
    #[serde(default)]
    pub stylus: bool,
}

impl Contact {
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// A raw pointer/touch event as delivered by the platform layer.
///
/// For touch events `contacts` lists the contacts that changed, like
/// `changedTouches` in a browser; mouse events carry a single contact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawEvent {
    pub source: EventSource,
    pub kind: EventKind,
    pub contacts: Vec<Contact>,
}

impl RawEvent {
    pub fn mouse(kind: EventKind, x: f64, y: f64) -> Self {
        Self {
            source: EventSource::Mouse,
            kind,
            contacts: vec![Contact {
                id: 0,
                x,
                y,
                pressure: None,
                angle: None,
                stylus: false,
            }],
        }
    }

    pub fn touch(kind: EventKind, contacts: Vec<Contact>) -> Self {
        Self {
            source: EventSource::Touch,
            kind,
            contacts,
        }
    }
}

/// Canonical pointer sample produced once per event by the normalizer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub position: Point,
    /// Azimuth angle in radians, when the device reports one
    pub angle: Option<f64>,
    /// Normalised pressure, when the device reports one
    pub pressure: Option<f64>,
    pub kind: EventKind,
}

impl PointerSample {
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            position: Point::new(x, y),
            angle: None,
            pressure: None,
            kind: EventKind::Move,
        }
    }

    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self {
            position: self.position.offset(dx, dy),
            ..*self
        }
    }
}
