//! Mode Classifier.
//!
//! The active [`Mode`] is never stored as independent state: it is derived
//! each frame from the held mode keys, the tap page counter and the viewport
//! shape. [`transition`] compares that result with the previous frame's mode
//! so the engine can run entry/exit side effects.

use super::modifiers::HeldModes;
use super::normalizer::{DEFAULT_TAP_TRAVEL, GestureContext};
use super::events::PointerSample;
use crate::util::Point;
use log::debug;

/// Default number of pages cycled by taps (Draw + three adjustment pages).
pub const DEFAULT_PAGE_COUNT: usize = 4;

/// What the pointer does this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Draw,
    Eyedropper,
    HueAdjust,
    LumaChromaAdjust,
    SizeAdjust,
    /// Four-quadrant radial adjuster for narrow (phone) viewports
    PhoneRadialMenu,
}

impl Mode {
    /// Adjustment modes own a reference snapshot while active.
    pub fn is_adjustment(self) -> bool {
        matches!(
            self,
            Mode::HueAdjust | Mode::LumaChromaAdjust | Mode::SizeAdjust | Mode::PhoneRadialMenu
        )
    }

    pub fn label(self) -> &'static str {
        match self {
            Mode::Draw => "draw",
            Mode::Eyedropper => "eyedropper",
            Mode::HueAdjust => "hue",
            Mode::LumaChromaAdjust => "luminance/chroma",
            Mode::SizeAdjust => "size",
            Mode::PhoneRadialMenu => "radial menu",
        }
    }
}

/// Everything the classifier looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeInputs {
    pub held: HeldModes,
    pub page: usize,
    /// Viewport is phone-shaped (short side below the configured limit)
    pub phone: bool,
}

/// Maps the current inputs to exactly one mode.
///
/// Held keys win over the page counter, checked in key order 1, 2, 3, 4.
pub fn classify(inputs: &ModeInputs) -> Mode {
    let held = inputs.held;
    if held.luma_chroma {
        return Mode::LumaChromaAdjust;
    }
    if held.hue {
        return Mode::HueAdjust;
    }
    if held.size {
        return Mode::SizeAdjust;
    }
    if held.eyedropper {
        return Mode::Eyedropper;
    }

    match inputs.page {
        1 if inputs.phone => Mode::PhoneRadialMenu,
        1 => Mode::LumaChromaAdjust,
        2 => Mode::HueAdjust,
        3 => Mode::SizeAdjust,
        _ => Mode::Draw,
    }
}

/// Result of evaluating the classifier against the previous frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: Mode,
    pub to: Mode,
}

impl Transition {
    pub fn changed(&self) -> bool {
        self.from != self.to
    }

    /// An adjustment mode was entered this frame.
    pub fn entered_adjustment(&self) -> bool {
        self.changed() && self.to.is_adjustment()
    }
}

/// Pure transition function: previous mode + inputs -> next mode.
pub fn transition(previous: Mode, inputs: &ModeInputs) -> Transition {
    Transition {
        from: previous,
        to: classify(inputs),
    }
}

/// Page counter advanced by finger taps.
///
/// Taps add pages and wrap to Draw once the counter reaches `page_count`.
/// Lifting the pointer after a real drag returns to Draw; a short "fat tap"
/// (travel below the threshold) keeps the current page open.
#[derive(Debug, Clone)]
pub struct TapPager {
    page: usize,
    page_count: usize,
    travel_threshold: f64,
    stroke_start: Option<Point>,
    travel: f64,
}

impl Default for TapPager {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_COUNT, DEFAULT_TAP_TRAVEL)
    }
}

impl TapPager {
    pub fn new(page_count: usize, travel_threshold: f64) -> Self {
        Self {
            page: 0,
            page_count: page_count.max(1),
            travel_threshold,
            stroke_start: None,
            travel: 0.0,
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// Feeds one frame of gesture state into the counter.
    pub fn observe(&mut self, context: &GestureContext, sample: &PointerSample) {
        if let Some(fingers) = context.tap {
            let next = self.page + fingers;
            self.page = if next >= self.page_count { 0 } else { next };
            debug!("Tap with {fingers} finger(s): page {}", self.page);
        }

        if context.pointer_pressed() {
            self.stroke_start = Some(sample.position);
            self.travel = 0.0;
        }
        if context.pointer_down
            && let Some(start) = self.stroke_start
        {
            self.travel = self.travel.max(start.distance(sample.position));
        }
        if context.pointer_released() {
            if let Some(start) = self.stroke_start.take() {
                self.travel = self.travel.max(start.distance(sample.position));
            }
            if self.page > 0 && self.travel >= self.travel_threshold {
                debug!("Drag of {:.1}px ended; back to draw page", self.travel);
                self.page = 0;
            }
            self.travel = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::normalizer::DeviceFamily;

    fn inputs(page: usize, phone: bool) -> ModeInputs {
        ModeInputs {
            held: HeldModes::new(),
            page,
            phone,
        }
    }

    fn context(pointer_down: bool, was_pointer_down: bool, tap: Option<usize>) -> GestureContext {
        GestureContext {
            active_finger_count: 0,
            device_family: DeviceFamily::Pen,
            pointer_down,
            was_pointer_down,
            tap,
        }
    }

    #[test]
    fn pages_map_to_modes() {
        assert_eq!(classify(&inputs(0, false)), Mode::Draw);
        assert_eq!(classify(&inputs(1, false)), Mode::LumaChromaAdjust);
        assert_eq!(classify(&inputs(1, true)), Mode::PhoneRadialMenu);
        assert_eq!(classify(&inputs(2, true)), Mode::HueAdjust);
        assert_eq!(classify(&inputs(3, false)), Mode::SizeAdjust);
    }

    #[test]
    fn held_keys_take_priority_over_pages() {
        let mut held = HeldModes::new();
        held.eyedropper = true;
        let with_page = ModeInputs {
            held,
            page: 2,
            phone: false,
        };
        assert_eq!(classify(&with_page), Mode::Eyedropper);

        held.hue = true;
        assert_eq!(classify(&ModeInputs { held, ..with_page }), Mode::HueAdjust);
    }

    #[test]
    fn transition_reports_adjustment_entry() {
        let t = transition(Mode::Draw, &inputs(3, false));
        assert!(t.entered_adjustment());
        assert!(!transition(Mode::SizeAdjust, &inputs(3, false)).changed());
    }

    #[test]
    fn taps_advance_and_wrap() {
        let mut pager = TapPager::default();
        let sample = PointerSample::at(0.0, 0.0);
        pager.observe(&context(false, false, Some(2)), &sample);
        assert_eq!(pager.page(), 2);
        pager.observe(&context(false, false, Some(1)), &sample);
        assert_eq!(pager.page(), 3);
        pager.observe(&context(false, false, Some(1)), &sample);
        assert_eq!(pager.page(), 0);
    }

    #[test]
    fn fat_tap_holds_page_and_drag_resets_it() {
        let mut pager = TapPager::new(4, 10.0);
        pager.observe(&context(false, false, Some(1)), &PointerSample::at(0.0, 0.0));

        pager.observe(&context(true, false, None), &PointerSample::at(50.0, 50.0));
        pager.observe(&context(false, true, None), &PointerSample::at(53.0, 52.0));
        assert_eq!(pager.page(), 1);

        pager.observe(&context(true, false, None), &PointerSample::at(50.0, 50.0));
        pager.observe(&context(true, true, None), &PointerSample::at(90.0, 50.0));
        pager.observe(&context(false, true, None), &PointerSample::at(90.0, 50.0));
        assert_eq!(pager.page(), 0);
    }
}
