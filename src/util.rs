//! Utility functions for geometry, range mapping, and easing curves.
//!
//! This module provides:
//! - [`Point`], the 2D coordinate type shared by input, tools and shapes
//! - Linear range mapping with optional clamping
//! - The easing curves used for eased brush size and hue jitter

use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

// ============================================================================
// Points
// ============================================================================

/// A position on the canvas in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn offset(self, dx: f64, dy: f64) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }

    /// Angle of the vector from `self` to `other` in radians (y grows downwards).
    pub fn angle_to(self, other: Point) -> f64 {
        (other.y - self.y).atan2(other.x - self.x)
    }

    pub fn lerp(self, other: Point, t: f64) -> Point {
        Point::new(lerp(self.x, other.x, t), lerp(self.y, other.y, t))
    }

    /// Rotates the point around the origin by `angle` radians.
    pub fn rotated(self, angle: f64) -> Point {
        let (sin, cos) = angle.sin_cos();
        Point::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }
}

// ============================================================================
// Range Mapping
// ============================================================================

pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Re-maps `value` from `[in_min, in_max]` into `[out_min, out_max]`.
///
/// With `clamp` set, the result is constrained to the output range (which may
/// be descending, e.g. `3.0..0.0`). A zero-width input range maps to `out_min`.
pub fn map_range(value: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64, clamp: bool) -> f64 {
    let span = in_max - in_min;
    if span == 0.0 {
        return out_min;
    }
    let mapped = out_min + (value - in_min) / span * (out_max - out_min);
    if clamp {
        let (lo, hi) = if out_min <= out_max {
            (out_min, out_max)
        } else {
            (out_max, out_min)
        };
        mapped.clamp(lo, hi)
    } else {
        mapped
    }
}

/// Wraps an angle in degrees into `[0, 360)`.
pub fn wrap_degrees(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can return 360.0 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Wraps an angle difference in radians into `(-π, π]`.
pub fn wrap_angle_delta(delta: f64) -> f64 {
    let wrapped = (delta + std::f64::consts::PI).rem_euclid(TAU) - std::f64::consts::PI;
    if wrapped <= -std::f64::consts::PI {
        wrapped + TAU
    } else {
        wrapped
    }
}

// ============================================================================
// Easing
// ============================================================================

/// Circular ease-in over `[from, to]`.
///
/// Values near `from` change slowly, which gives fine control at small brush
/// sizes. Inputs are clamped into the range first.
pub fn ease_in_circ(value: f64, from: f64, to: f64) -> f64 {
    let span = to - from;
    if span == 0.0 {
        return from;
    }
    let t = ((value - from) / span).clamp(0.0, 1.0);
    (1.0 - (1.0 - t * t).sqrt()) * span + from
}

pub fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}
