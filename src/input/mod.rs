//! Input handling and the per-frame painting engine.
//!
//! Raw mouse/touch events are normalised into one pointer sample per frame,
//! the mode is classified from held keys and the tap page, and
//! [`PaintState`] maps, records or picks accordingly.

pub mod events;
pub mod mode;
pub mod modifiers;
pub mod normalizer;
pub mod params;
pub mod state;

// Re-export commonly used types at module level
pub use events::{Contact, EventKind, EventSource, Key, PointerSample, RawEvent};
pub use mode::Mode;
pub use modifiers::HeldModes;
pub use normalizer::{DeviceFamily, GestureContext, InputNormalizer};
pub use state::PaintState;
