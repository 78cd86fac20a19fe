//! Held mode-key tracking.

/// Which mode keys are currently held.
///
/// Desktop sessions pick adjustment modes by holding a key; the flags are
/// cleared individually on release.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldModes {
    /// Luminance/chroma box (default key `1`)
    pub luma_chroma: bool,
    /// Hue ring (default key `2`)
    pub hue: bool,
    /// Size scale (default key `3`)
    pub size: bool,
    /// Colour picker (default key `4`)
    pub eyedropper: bool,
}

impl HeldModes {
    /// Creates a new instance with all keys released.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any mode key is held.
    pub fn any(&self) -> bool {
        self.luma_chroma || self.hue || self.size || self.eyedropper
    }

    pub fn release_all(&mut self) {
        *self = Self::default();
    }
}
