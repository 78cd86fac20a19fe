//! Working colour space (OKLCH) and its conversion to displayable RGBA.

use crate::util::wrap_degrees;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Chroma below which a sampled colour is treated as grey (hue undefined).
pub const ACHROMATIC_CHROMA: f64 = 1e-4;

/// Represents an RGBA color with floating-point components.
///
/// All components are in the range 0.0 (minimum) to 1.0 (maximum).
///
/// # Examples
///
/// ```
/// use drawlab::draw::Color;
/// let red = Color { r: 1.0, g: 0.0, b: 0.0, a: 1.0 };
/// let semi_transparent_blue = Color { r: 0.0, g: 0.0, b: 1.0, a: 0.5 };
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red component (0.0 = no red, 1.0 = full red)
    pub r: f64,
    /// Green component (0.0 = no green, 1.0 = full green)
    pub g: f64,
    /// Blue component (0.0 = no blue, 1.0 = full blue)
    pub b: f64,
    /// Alpha/transparency (0.0 = fully transparent, 1.0 = fully opaque)
    pub a: f64,
}

impl Color {
    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Formats the colour as `#rrggbb` (alpha ignored).
    pub fn to_hex(&self) -> String {
        let channel = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02x}{:02x}{:02x}",
            channel(self.r),
            channel(self.g),
            channel(self.b)
        )
    }
}

/// Predefined white color (R=1.0, G=1.0, B=1.0)
pub const WHITE: Color = Color {
    r: 1.0,
    g: 1.0,
    b: 1.0,
    a: 1.0,
};

/// Predefined black color (R=0.0, G=0.0, B=0.0)
pub const BLACK: Color = Color {
    r: 0.0,
    g: 0.0,
    b: 0.0,
    a: 1.0,
};

/// A colour in the perceptual working space.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Oklch {
    /// Perceived lightness, 0.0 - 1.0
    pub luminance: f64,
    /// Colourfulness, 0.0 - 0.5 for brush colours
    pub chroma: f64,
    /// Hue angle in degrees, 0.0 - 360.0
    pub hue: f64,
}

impl Oklch {
    pub const fn new(luminance: f64, chroma: f64, hue: f64) -> Self {
        Self {
            luminance,
            chroma,
            hue,
        }
    }
}

/// Result of converting a displayable colour back into the working space.
///
/// `hue` is `None` for achromatic samples, where the angle carries no meaning.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SampledColor {
    pub luminance: f64,
    pub chroma: f64,
    pub hue: Option<f64>,
}

/// Conversion between the working colour space and displayable colour.
pub trait ColorSpace {
    /// Converts a working-space colour to an opaque displayable colour.
    fn to_display(&self, color: Oklch) -> Color;

    /// Converts a displayable colour (e.g. a sampled pixel) to the working space.
    fn from_display(&self, color: Color) -> SampledColor;
}

/// OKLCH <-> sRGB conversion using the Oklab matrices.
///
/// Out-of-gamut colours are clipped per channel.
#[derive(Debug, Default, Clone, Copy)]
pub struct OklabSpace;

impl ColorSpace for OklabSpace {
    fn to_display(&self, color: Oklch) -> Color {
        let hue = color.hue.to_radians();
        let a = color.chroma * hue.cos();
        let b = color.chroma * hue.sin();
        let lum = color.luminance;

        let l_ = lum + 0.396_337_777_4 * a + 0.215_803_757_3 * b;
        let m_ = lum - 0.105_561_345_8 * a - 0.063_854_172_8 * b;
        let s_ = lum - 0.089_484_177_5 * a - 1.291_485_548_0 * b;

        let l = l_ * l_ * l_;
        let m = m_ * m_ * m_;
        let s = s_ * s_ * s_;

        let r = 4.076_741_662_1 * l - 3.307_711_591_3 * m + 0.230_969_929_2 * s;
        let g = -1.268_438_004_6 * l + 2.609_757_401_1 * m - 0.341_319_396_5 * s;
        let bl = -0.004_196_086_3 * l - 0.703_418_614_7 * m + 1.707_614_701_0 * s;

        Color {
            r: encode_srgb(r),
            g: encode_srgb(g),
            b: encode_srgb(bl),
            a: 1.0,
        }
    }

    fn from_display(&self, color: Color) -> SampledColor {
        let r = decode_srgb(color.r);
        let g = decode_srgb(color.g);
        let b = decode_srgb(color.b);

        let l = 0.412_221_470_8 * r + 0.536_332_536_3 * g + 0.051_445_992_9 * b;
        let m = 0.211_903_498_2 * r + 0.680_699_545_1 * g + 0.107_396_956_6 * b;
        let s = 0.088_302_461_9 * r + 0.281_718_837_6 * g + 0.629_978_700_5 * b;

        let l_ = l.cbrt();
        let m_ = m.cbrt();
        let s_ = s.cbrt();

        let lum = 0.210_454_255_3 * l_ + 0.793_617_785_0 * m_ - 0.004_072_046_8 * s_;
        let ok_a = 1.977_998_495_1 * l_ - 2.428_592_205_0 * m_ + 0.450_593_709_9 * s_;
        let ok_b = 0.025_904_037_1 * l_ + 0.782_771_766_2 * m_ - 0.808_675_766_0 * s_;

        let chroma = ok_a.hypot(ok_b);
        let hue = if chroma < ACHROMATIC_CHROMA {
            None
        } else {
            Some(wrap_degrees(ok_b.atan2(ok_a).to_degrees()))
        };

        SampledColor {
            luminance: lum.clamp(0.0, 1.0),
            chroma,
            hue,
        }
    }
}

fn encode_srgb(linear: f64) -> f64 {
    let encoded = if linear <= 0.003_130_8 {
        12.92 * linear
    } else {
        1.055 * linear.powf(1.0 / 2.4) - 0.055
    };
    encoded.clamp(0.0, 1.0)
}

fn decode_srgb(encoded: f64) -> f64 {
    let encoded = encoded.clamp(0.0, 1.0);
    if encoded <= 0.040_45 {
        encoded / 12.92
    } else {
        ((encoded + 0.055) / 1.055).powf(2.4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn white_and_black_map_to_extremes() {
        let space = OklabSpace;
        let white = space.to_display(Oklch::new(1.0, 0.0, 0.0));
        assert!((white.r - 1.0).abs() < 1e-3 && (white.b - 1.0).abs() < 1e-3);
        let black = space.to_display(Oklch::new(0.0, 0.0, 120.0));
        assert_eq!(black.to_hex(), "#000000");
    }

    #[test]
    fn grey_sample_has_no_hue() {
        let sampled = OklabSpace.from_display(Color::new(0.5, 0.5, 0.5, 1.0));
        assert!(sampled.hue.is_none());
        assert!(sampled.luminance > 0.5 && sampled.luminance < 0.7);
    }

    #[test]
    fn in_gamut_colour_survives_conversion() {
        let space = OklabSpace;
        let original = Oklch::new(0.7, 0.1, 40.0);
        let sampled = space.from_display(space.to_display(original));
        assert!((sampled.luminance - 0.7).abs() < 1e-3);
        assert!((sampled.chroma - 0.1).abs() < 1e-3);
        assert!((sampled.hue.expect("chromatic") - 40.0).abs() < 0.5);
    }
}
