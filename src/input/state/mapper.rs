//! Parameter Mapper: pointer deltas to brush parameters.
//!
//! Every mapping is anchored so that a zero delta from the snapshot anchor
//! reproduces the snapshot values exactly, and every output goes through the
//! clamping setters of [`BrushParameters`](crate::input::params::BrushParameters).

use super::PaintState;
use crate::draw::Oklch;
use crate::input::events::PointerSample;
use crate::input::mode::Mode;
use crate::input::normalizer::GestureContext;
use crate::input::params::{CHROMA_MAX, NOISE_MAX, ReferenceSnapshot, SIZE_MAX, SIZE_MIN};
use crate::util::{Point, map_range, wrap_angle_delta, wrap_degrees};
use log::debug;
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI, TAU};

/// Chroma and luminance for a pointer position: x drives chroma, -y luminance.
pub(crate) fn luma_chroma(snapshot: &ReferenceSnapshot, pointer: Point, radius: f64) -> (f64, f64) {
    let range = radius * 2.0;
    let dx = pointer.x - snapshot.anchor.x;
    let dy = pointer.y - snapshot.anchor.y;
    let chroma = map_range(
        dx + range * (snapshot.chroma / CHROMA_MAX),
        0.0,
        range,
        0.0,
        CHROMA_MAX,
        true,
    );
    let luminance = map_range(-dy + range * snapshot.luminance, 0.0, range, 0.0, 1.0, true);
    (chroma, luminance)
}

/// Hue and noise for a pointer position on the hue disc.
///
/// The disc centre is placed so the anchor sits at angle `hue` and distance
/// `radius * (1 - noise / 360)` from it.
pub(crate) fn hue_noise(snapshot: &ReferenceSnapshot, pointer: Point, radius: f64) -> (f64, f64) {
    let start_angle = TAU * (snapshot.hue / 360.0) - FRAC_PI_2;
    let start_radius = radius * (1.0 - snapshot.noise / NOISE_MAX);
    let (sin, cos) = start_angle.sin_cos();
    let center = snapshot.anchor.offset(-cos * start_radius, -sin * start_radius);

    let distance = center.distance(pointer);
    let hue = if distance < 1e-9 {
        // the angle is meaningless at the exact centre
        snapshot.hue
    } else {
        wrap_degrees(center.angle_to(pointer).to_degrees() + 90.0)
    };
    let noise = if radius > 0.0 {
        (1.0 - distance.clamp(0.0, radius) / radius) * NOISE_MAX
    } else {
        snapshot.noise
    };
    (hue, noise)
}

/// Brush size for a pointer position: -y drives size.
pub(crate) fn size(snapshot: &ReferenceSnapshot, pointer: Point, radius: f64) -> f64 {
    let range = radius * 2.0;
    let dy = pointer.y - snapshot.anchor.y;
    let start = map_range(snapshot.size, SIZE_MIN, SIZE_MAX, 0.0, 1.0, false);
    map_range(-dy + range * start, 0.0, range, SIZE_MIN, SIZE_MAX, true)
}

/// Parameter driven by one quadrant of the phone radial menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RadialQuadrant {
    /// Top
    Hue,
    /// Right
    Noise,
    /// Bottom
    Chroma,
    /// Left
    Luminance,
}

impl RadialQuadrant {
    pub const ALL: [RadialQuadrant; 4] = [
        RadialQuadrant::Hue,
        RadialQuadrant::Noise,
        RadialQuadrant::Chroma,
        RadialQuadrant::Luminance,
    ];

    /// Quadrant containing `angle` (radians, screen coordinates).
    pub fn from_angle(angle: f64) -> Self {
        // 0 = straight up, clockwise
        let turn = (angle + FRAC_PI_2 + FRAC_PI_4).rem_euclid(TAU);
        match (turn / FRAC_PI_2) as usize {
            0 => RadialQuadrant::Hue,
            1 => RadialQuadrant::Noise,
            2 => RadialQuadrant::Chroma,
            _ => RadialQuadrant::Luminance,
        }
    }

    /// Angle (radians) of the quadrant's centre line.
    pub fn center_angle(self) -> f64 {
        match self {
            RadialQuadrant::Hue => -FRAC_PI_2,
            RadialQuadrant::Noise => 0.0,
            RadialQuadrant::Chroma => FRAC_PI_2,
            RadialQuadrant::Luminance => PI,
        }
    }
}

/// Radial menu drag, locked to the quadrant chosen on its first frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadialDrag {
    pub quadrant: RadialQuadrant,
    last_angle: f64,
    /// Accumulated dial position in `[0, 2π]` for the clamped parameters
    dial: f64,
}

impl PaintState {
    /// Captures the reference snapshot at `sample`.
    pub(crate) fn arm(&mut self, sample: &PointerSample) {
        self.snapshot = Some(ReferenceSnapshot::capture(sample.position, &self.params));
        debug!(
            "Armed {} at ({:.1}, {:.1})",
            self.mode.label(),
            sample.position.x,
            sample.position.y
        );
    }

    pub fn viewport_center(&self) -> Point {
        let (w, h) = self.compositor.size();
        Point::new(f64::from(w) / 2.0, f64::from(h) / 2.0)
    }

    pub(crate) fn map_parameters(&mut self, sample: &PointerSample, context: &GestureContext) {
        let Some(snapshot) = self.snapshot else {
            return;
        };
        let radius = self.gadget_radius();
        let pointer = sample.position;

        match self.mode {
            Mode::LumaChromaAdjust => {
                let (chroma, luminance) = luma_chroma(&snapshot, pointer, radius);
                self.params.set_chroma(chroma);
                self.params.set_luminance(luminance);
            }
            Mode::HueAdjust => {
                let (hue, noise) = hue_noise(&snapshot, pointer, radius);
                self.params.set_hue(hue);
                self.params.set_noise(noise);
            }
            Mode::SizeAdjust => {
                self.params.set_size(size(&snapshot, pointer, radius));
            }
            Mode::PhoneRadialMenu => {
                if context.pointer_down {
                    self.map_radial(pointer);
                }
            }
            Mode::Draw | Mode::Eyedropper => {}
        }
    }

    fn map_radial(&mut self, pointer: Point) {
        let angle = self.viewport_center().angle_to(pointer);

        let Some(drag) = self.radial.as_mut() else {
            let quadrant = RadialQuadrant::from_angle(angle);
            let dial = match quadrant {
                RadialQuadrant::Hue => 0.0,
                RadialQuadrant::Noise => self.params.noise() / NOISE_MAX * TAU,
                RadialQuadrant::Chroma => self.params.chroma() / CHROMA_MAX * TAU,
                RadialQuadrant::Luminance => self.params.luminance() * TAU,
            };
            debug!("Radial menu locked to {quadrant:?}");
            self.radial = Some(RadialDrag {
                quadrant,
                last_angle: angle,
                dial,
            });
            return;
        };

        let delta = wrap_angle_delta(angle - drag.last_angle);
        drag.last_angle = angle;
        if drag.quadrant == RadialQuadrant::Hue {
            self.params.set_hue(self.params.hue() + delta.to_degrees());
            return;
        }

        drag.dial = (drag.dial + delta).clamp(0.0, TAU);
        let fraction = drag.dial / TAU;
        match drag.quadrant {
            RadialQuadrant::Noise => self.params.set_noise(fraction * NOISE_MAX),
            RadialQuadrant::Chroma => self.params.set_chroma(fraction * CHROMA_MAX),
            RadialQuadrant::Luminance => self.params.set_luminance(fraction),
            RadialQuadrant::Hue => {}
        }
    }

    /// Picks the committed colour under `position` into the brush.
    ///
    /// Achromatic samples keep the current hue.
    pub(crate) fn pick_color(&mut self, position: Point) {
        let Some(display) =
            self.compositor
                .sample_committed(position.x, position.y, self.color_space.as_ref())
        else {
            return;
        };
        let sampled = self.color_space.from_display(display);
        let hue = sampled.hue.unwrap_or(self.params.hue());
        self.params
            .set_color(Oklch::new(sampled.luminance, sampled.chroma, hue));
    }
}
