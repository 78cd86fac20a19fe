//! Brush parameters and the reference snapshot used by adjustment gestures.

use crate::draw::{NoiseTable, Oklch};
use crate::tools::{Texture, Tool};
use crate::util::{Point, ease_in_circ, ease_out_cubic, lerp, wrap_degrees};

pub const CHROMA_MAX: f64 = 0.5;
pub const SIZE_MIN: f64 = 4.0;
pub const SIZE_MAX: f64 = 600.0;
pub const NOISE_MAX: f64 = 360.0;

/// Current brush settings.
///
/// Every field stays inside its closed range: setters clamp, hue wraps.
#[derive(Debug, Clone, PartialEq)]
pub struct BrushParameters {
    hue: f64,
    chroma: f64,
    luminance: f64,
    size: f64,
    noise: f64,
    pub tool: Tool,
    pub texture: Option<Texture>,
}

impl BrushParameters {
    pub fn new(color: Oklch, size: f64, noise: f64, tool: Tool, texture: Option<Texture>) -> Self {
        let mut params = Self {
            hue: 0.0,
            chroma: 0.0,
            luminance: 0.0,
            size: SIZE_MIN,
            noise: 0.0,
            tool,
            texture,
        };
        params.set_color(color);
        params.set_size(size);
        params.set_noise(noise);
        params
    }

    pub fn hue(&self) -> f64 {
        self.hue
    }

    pub fn chroma(&self) -> f64 {
        self.chroma
    }

    pub fn luminance(&self) -> f64 {
        self.luminance
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    /// Hue jitter amount ("var"), 0 - 360.
    pub fn noise(&self) -> f64 {
        self.noise
    }

    pub fn set_hue(&mut self, hue: f64) {
        if hue.is_finite() {
            self.hue = wrap_degrees(hue);
        }
    }

    pub fn set_chroma(&mut self, chroma: f64) {
        if chroma.is_finite() {
            self.chroma = chroma.clamp(0.0, CHROMA_MAX);
        }
    }

    pub fn set_luminance(&mut self, luminance: f64) {
        if luminance.is_finite() {
            self.luminance = luminance.clamp(0.0, 1.0);
        }
    }

    pub fn set_size(&mut self, size: f64) {
        if size.is_finite() {
            self.size = size.clamp(SIZE_MIN, SIZE_MAX);
        }
    }

    pub fn set_noise(&mut self, noise: f64) {
        if noise.is_finite() {
            self.noise = noise.clamp(0.0, NOISE_MAX);
        }
    }

    pub fn set_color(&mut self, color: Oklch) {
        self.set_hue(color.hue);
        self.set_chroma(color.chroma);
        self.set_luminance(color.luminance);
    }

    /// The unjittered brush colour.
    pub fn color(&self) -> Oklch {
        Oklch::new(self.luminance, self.chroma, self.hue)
    }

    /// Brush size after the circular ease-in response curve.
    pub fn eased_size(&self) -> f64 {
        ease_in_circ(self.size, SIZE_MIN, SIZE_MAX)
    }

    /// Effective hue jitter.
    ///
    /// Low chroma uses the raw amount; high chroma follows the eased curve,
    /// since hue shifts are far more visible on saturated colours.
    pub fn eased_noise(&self) -> f64 {
        lerp(
            self.noise,
            ease_in_circ(self.noise, 0.0, NOISE_MAX),
            ease_out_cubic(self.chroma * 2.0),
        )
    }

    /// Brush colour with the hue offset picked from `table` by `seed`.
    pub fn jittered_color(&self, table: &NoiseTable, seed: f64) -> Oklch {
        Oklch::new(
            self.luminance,
            self.chroma,
            wrap_degrees(self.hue + table.value(seed) * self.eased_noise()),
        )
    }
}

/// Baseline captured when an adjustment gesture is armed.
///
/// Exists exactly while an adjustment mode is active; deltas are measured
/// from `anchor` and applied on top of the captured values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceSnapshot {
    pub anchor: Point,
    pub hue: f64,
    pub chroma: f64,
    pub luminance: f64,
    pub size: f64,
    pub noise: f64,
}

impl ReferenceSnapshot {
    pub fn capture(anchor: Point, params: &BrushParameters) -> Self {
        Self {
            anchor,
            hue: params.hue,
            chroma: params.chroma,
            luminance: params.luminance,
            size: params.size,
            noise: params.noise,
        }
    }

    pub fn color(&self) -> Oklch {
        Oklch::new(self.luminance, self.chroma, self.hue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> BrushParameters {
        BrushParameters::new(
            Oklch::new(0.7, 0.2, 0.0),
            200.0,
            80.0,
            Tool::Stamp,
            Some(Texture::Rounded),
        )
    }

    #[test]
    fn setters_clamp_and_wrap() {
        let mut p = params();
        p.set_hue(-30.0);
        p.set_chroma(2.0);
        p.set_luminance(-1.0);
        p.set_size(1000.0);
        p.set_noise(-5.0);
        assert_eq!(p.hue(), 330.0);
        assert_eq!(p.chroma(), CHROMA_MAX);
        assert_eq!(p.luminance(), 0.0);
        assert_eq!(p.size(), SIZE_MAX);
        assert_eq!(p.noise(), 0.0);
    }

    #[test]
    fn non_finite_values_are_ignored() {
        let mut p = params();
        p.set_hue(f64::NAN);
        p.set_size(f64::INFINITY);
        assert_eq!(p.hue(), 0.0);
        assert_eq!(p.size(), 200.0);
    }

    #[test]
    fn jitter_is_deterministic() {
        let table = NoiseTable::seeded(42, 128);
        let p = params();
        let a = p.jittered_color(&table, 12_345.0);
        let b = p.jittered_color(&table, 12_345.0);
        assert_eq!(a, b);
        assert!((0.0..360.0).contains(&a.hue));
    }

    #[test]
    fn zero_noise_means_no_jitter() {
        let table = NoiseTable::seeded(42, 128);
        let mut p = params();
        p.set_noise(0.0);
        p.set_hue(123.0);
        assert_eq!(p.jittered_color(&table, 7.0).hue, 123.0);
    }
}
