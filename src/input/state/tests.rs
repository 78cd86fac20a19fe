use super::*;
use crate::config::Config;
use crate::draw::{Geometry, Oklch};
use crate::input::events::{Contact, EventKind, Key, RawEvent};
use crate::input::mode::Mode;
use crate::input::params::{SIZE_MAX, SIZE_MIN};
use crate::tools::{Texture, Tool};
use crate::util::Point;

fn create_test_state() -> PaintState {
    PaintState::from_config(&Config::default()).unwrap()
}

fn mouse(state: &mut PaintState, kind: EventKind, x: f64, y: f64) {
    assert!(state.handle_event(&RawEvent::mouse(kind, x, y)));
}

fn drag(state: &mut PaintState, points: &[(f64, f64)]) {
    let (first, rest) = points.split_first().unwrap();
    mouse(state, EventKind::Start, first.0, first.1);
    for &(x, y) in rest {
        mouse(state, EventKind::Move, x, y);
    }
    let last = points.last().unwrap();
    mouse(state, EventKind::End, last.0, last.1);
}

fn finger(id: u64, x: f64, y: f64) -> Contact {
    Contact {
        id,
        x,
        y,
        pressure: None,
        angle: None,
        stylus: false,
    }
}

fn touch(state: &mut PaintState, kind: EventKind, contacts: Vec<Contact>) {
    assert!(state.handle_event(&RawEvent::touch(kind, contacts)));
}

fn first_line(state: &PaintState) -> (Point, Point) {
    let shape = state
        .compositor()
        .committed()
        .shapes()
        .next()
        .expect("a committed shape");
    match shape.geometry {
        Geometry::Line { from, to, .. } => (from, to),
        ref other => panic!("expected a line, got {other:?}"),
    }
}

fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn stamp_stroke_commits_exactly_once() {
    let mut state = create_test_state();
    assert_eq!(state.params().tool, Tool::Stamp);

    mouse(&mut state, EventKind::Start, 100.0, 100.0);
    assert_eq!(state.compositor().pending().len(), 1);
    mouse(&mut state, EventKind::Move, 150.0, 120.0);
    assert_eq!(state.compositor().pending().len(), 2);
    assert_eq!(state.compositor().merge_count(), 0);

    mouse(&mut state, EventKind::End, 150.0, 120.0);
    assert_eq!(state.compositor().merge_count(), 1);
    assert!(state.compositor().pending().is_empty());
    assert_eq!(state.compositor().committed().stroke_count(), 1);
    assert_eq!(state.recording().len(), 2);
}

#[test]
fn hovering_mouse_does_not_draw() {
    let mut state = create_test_state();
    mouse(&mut state, EventKind::Move, 40.0, 40.0);
    mouse(&mut state, EventKind::Move, 90.0, 60.0);
    assert!(state.compositor().pending().is_empty());
    assert_eq!(state.compositor().merge_count(), 0);
    assert!(!state.compositor().interface().is_empty());
}

#[test]
fn line_ends_where_the_pointer_lifts() {
    let mut state = create_test_state();
    state.select_tool(Tool::RoundLine, None);
    mouse(&mut state, EventKind::Start, 100.0, 100.0);
    mouse(&mut state, EventKind::Move, 150.0, 100.0);
    mouse(&mut state, EventKind::End, 300.0, 100.0);

    assert_eq!(state.compositor().committed().stroke_count(), 1);
    assert_eq!(state.recording().len(), 3);
    assert_eq!(first_line(&state), (Point::new(100.0, 100.0), Point::new(300.0, 100.0)));
}

#[test]
fn hue_adjust_at_zero_delta_keeps_values() {
    let mut state = create_test_state();
    state.set_brush_color(Oklch::new(0.7, 0.2, 300.0));
    mouse(&mut state, EventKind::Move, 300.0, 300.0);

    state.on_key_press(Key::Char('2'));
    assert_eq!(state.mode(), Mode::HueAdjust);
    assert!(state.snapshot().is_some());

    mouse(&mut state, EventKind::Move, 300.0, 300.0);
    assert_close(state.params().hue(), 300.0, 1e-6);
    assert_close(state.params().noise(), 80.0, 1e-6);

    state.on_key_release(Key::Char('2'));
    assert_eq!(state.mode(), Mode::Draw);
    assert!(state.snapshot().is_none());
}

#[test]
fn adjustment_round_trip_restores_parameters() {
    let mut state = create_test_state();
    mouse(&mut state, EventKind::Move, 300.0, 300.0);
    let before = state.params().clone();

    state.on_key_press(Key::Char('1'));
    state.on_key_release(Key::Char('1'));
    assert_eq!(state.params(), &before);

    state.on_key_press(Key::Char('1'));
    mouse(&mut state, EventKind::Move, 330.0, 260.0);
    assert!(state.params().chroma() > before.chroma());
    assert!(state.params().luminance() > before.luminance());
    mouse(&mut state, EventKind::Move, 300.0, 300.0);
    state.on_key_release(Key::Char('1'));

    assert_close(state.params().chroma(), before.chroma(), 1e-9);
    assert_close(state.params().luminance(), before.luminance(), 1e-9);
}

#[test]
fn size_adjust_clamps_far_drags() {
    let mut state = create_test_state();
    mouse(&mut state, EventKind::Move, 300.0, 300.0);
    state.on_key_press(Key::Char('3'));

    mouse(&mut state, EventKind::Move, 300.0, -100_000.0);
    assert_eq!(state.params().size(), SIZE_MAX);
    mouse(&mut state, EventKind::Move, 300.0, 100_000.0);
    assert_eq!(state.params().size(), SIZE_MIN);
}

#[test]
fn held_keys_prefer_luma_chroma() {
    let mut state = create_test_state();
    state.on_key_press(Key::Char('3'));
    state.on_key_press(Key::Char('1'));
    assert_eq!(state.mode(), Mode::LumaChromaAdjust);
    state.on_key_release(Key::Char('1'));
    assert_eq!(state.mode(), Mode::SizeAdjust);
}

#[test]
fn gadget_armed_before_motion_opens_mid_canvas() {
    let mut state = create_test_state();
    state.on_key_press(Key::Char('1'));
    assert_eq!(state.mode(), Mode::LumaChromaAdjust);
    let snapshot = state.snapshot().expect("armed snapshot");
    assert_eq!(snapshot.anchor, Point::new(640.0, 400.0));
}

#[test]
fn focus_loss_releases_held_keys() {
    let mut state = create_test_state();
    state.on_key_press(Key::Char('2'));
    assert_eq!(state.mode(), Mode::HueAdjust);
    state.on_focus_lost();
    assert_eq!(state.mode(), Mode::Draw);
    assert!(state.snapshot().is_none());
}

#[test]
fn edit_translates_the_last_stroke() {
    let mut state = create_test_state();
    state.select_tool(Tool::RoundLine, None);
    drag(&mut state, &[(100.0, 100.0), (200.0, 100.0)]);
    assert_eq!(state.compositor().committed().stroke_count(), 1);

    state.on_key_press(Key::Char('e'));
    assert!(state.is_editing());
    assert_eq!(state.compositor().committed().stroke_count(), 0);
    assert!(!state.compositor().pending().is_empty());

    drag(&mut state, &[(300.0, 300.0), (310.0, 305.0)]);
    state.on_key_press(Key::Char('e'));
    assert!(!state.is_editing());
    assert_eq!(state.compositor().committed().stroke_count(), 1);
    assert!(state.compositor().pending().is_empty());

    let (from, to) = first_line(&state);
    assert_eq!(from, Point::new(110.0, 105.0));
    assert_eq!(to, Point::new(210.0, 105.0));
}

#[test]
fn edit_without_a_stroke_is_ignored() {
    let mut state = create_test_state();
    state.toggle_edit();
    assert!(!state.is_editing());
}

#[test]
fn edit_after_clear_has_nothing_to_edit() {
    let mut state = create_test_state();
    state.select_tool(Tool::RoundLine, None);
    drag(&mut state, &[(100.0, 100.0), (200.0, 100.0)]);
    state.clear();
    assert!(state.recording().is_empty());

    state.toggle_edit();
    assert!(!state.is_editing());
    assert!(state.compositor().pending().is_empty());
    assert_eq!(state.compositor().committed().stroke_count(), 0);
}

#[test]
fn undo_lifts_the_last_stroke() {
    let mut state = create_test_state();
    drag(&mut state, &[(10.0, 10.0), (60.0, 60.0)]);
    drag(&mut state, &[(300.0, 10.0), (350.0, 60.0)]);
    assert_eq!(state.compositor().committed().stroke_count(), 2);

    state.on_key_press(Key::Char('z'));
    assert_eq!(state.compositor().committed().stroke_count(), 1);
    assert!(state.recording().is_empty());

    // nothing recorded any more, so a second undo keeps the older stroke
    state.undo();
    assert_eq!(state.compositor().committed().stroke_count(), 1);
}

#[test]
fn undo_while_editing_restores_the_original() {
    let mut state = create_test_state();
    state.select_tool(Tool::RoundLine, None);
    drag(&mut state, &[(100.0, 100.0), (200.0, 100.0)]);
    state.toggle_edit();
    drag(&mut state, &[(0.0, 0.0), (50.0, 50.0)]);

    state.undo();
    assert!(!state.is_editing());
    assert!(state.compositor().pending().is_empty());
    assert_eq!(first_line(&state).0, Point::new(100.0, 100.0));
}

#[test]
fn tool_switch_cancels_edit() {
    let mut state = create_test_state();
    state.select_tool(Tool::RoundLine, None);
    drag(&mut state, &[(100.0, 100.0), (200.0, 100.0)]);
    state.toggle_edit();
    drag(&mut state, &[(0.0, 0.0), (40.0, 0.0)]);

    state.select_tool(Tool::Stamp, Some(Texture::Rake));
    assert!(!state.is_editing());
    assert!(state.recording().is_empty());
    assert_eq!(state.compositor().committed().stroke_count(), 1);
    assert_eq!(first_line(&state), (Point::new(100.0, 100.0), Point::new(200.0, 100.0)));
}

#[test]
fn eyedropper_keeps_hue_on_grey() {
    let mut state = create_test_state();
    state.set_brush_color(Oklch::new(0.3, 0.2, 123.0));
    mouse(&mut state, EventKind::Move, 20.0, 20.0);

    state.on_key_press(Key::Char('4'));
    assert_eq!(state.mode(), Mode::Eyedropper);
    mouse(&mut state, EventKind::Move, 640.0, 400.0);

    let params = state.params();
    assert_close(params.luminance(), 0.8, 0.01);
    assert!(params.chroma() < 0.01);
    assert_eq!(params.hue(), 123.0);
}

#[test]
fn eyedropper_picks_a_fresh_stroke() {
    let mut state = create_test_state();
    state.params.set_noise(0.0);
    state.set_brush_color(Oklch::new(0.6, 0.15, 30.0));
    drag(&mut state, &[(300.0, 300.0)]);
    assert_eq!(state.compositor().committed().stroke_count(), 1);

    // move the brush elsewhere so the pick has to come from the raster
    state.set_brush_color(Oklch::new(0.3, 0.05, 250.0));
    state.on_key_press(Key::Char('4'));
    assert_eq!(state.mode(), Mode::Eyedropper);

    let params = state.params();
    assert_close(params.luminance(), 0.6, 0.01);
    assert_close(params.chroma(), 0.15, 0.01);
    assert_close(params.hue(), 30.0, 2.0);
}

#[test]
fn eyedropper_entry_merges_pending_edit() {
    let mut state = create_test_state();
    state.select_tool(Tool::RoundLine, None);
    drag(&mut state, &[(100.0, 100.0), (200.0, 100.0)]);
    state.toggle_edit();
    let merges = state.compositor().merge_count();

    state.on_key_press(Key::Char('4'));
    assert!(!state.is_editing());
    assert!(state.compositor().pending().is_empty());
    assert_eq!(state.compositor().merge_count(), merges + 1);
}

#[test]
fn touch_taps_page_through_modes() {
    let mut state = create_test_state();
    touch(&mut state, EventKind::Start, vec![finger(1, 50.0, 50.0)]);
    touch(&mut state, EventKind::Start, vec![finger(2, 80.0, 50.0)]);
    touch(&mut state, EventKind::End, vec![finger(1, 50.0, 50.0), finger(2, 80.0, 50.0)]);
    assert_eq!(state.page(), 2);
    assert_eq!(state.mode(), Mode::HueAdjust);

    touch(&mut state, EventKind::Start, vec![finger(3, 60.0, 60.0)]);
    touch(&mut state, EventKind::End, vec![finger(3, 60.0, 60.0)]);
    assert_eq!(state.mode(), Mode::SizeAdjust);

    touch(&mut state, EventKind::Start, vec![finger(4, 60.0, 60.0)]);
    touch(&mut state, EventKind::End, vec![finger(4, 60.0, 60.0)]);
    assert_eq!(state.page(), 0);
    assert_eq!(state.mode(), Mode::Draw);
}

#[test]
fn touch_drag_paints_without_paging() {
    let mut state = create_test_state();
    touch(&mut state, EventKind::Start, vec![finger(1, 100.0, 100.0)]);
    touch(&mut state, EventKind::Move, vec![finger(1, 130.0, 100.0)]);
    touch(&mut state, EventKind::Move, vec![finger(1, 160.0, 110.0)]);
    touch(&mut state, EventKind::End, vec![finger(1, 160.0, 110.0)]);
    assert_eq!(state.page(), 0);
    assert_eq!(state.compositor().merge_count(), 1);
}

#[test]
fn radial_menu_locks_first_quadrant() {
    let mut state = create_test_state();
    state.resize(400, 700);
    assert!(state.is_phone());

    touch(&mut state, EventKind::Start, vec![finger(1, 200.0, 500.0)]);
    touch(&mut state, EventKind::End, vec![finger(1, 200.0, 500.0)]);
    assert_eq!(state.mode(), Mode::PhoneRadialMenu);
    let hue = state.params().hue();
    let luminance = state.params().luminance();

    // straight up from the centre (200, 350): the hue quadrant
    touch(&mut state, EventKind::Start, vec![finger(2, 200.0, 250.0)]);
    touch(&mut state, EventKind::Move, vec![finger(2, 200.0, 230.0)]);
    touch(&mut state, EventKind::Move, vec![finger(2, 210.0, 230.0)]);
    assert_eq!(state.radial.map(|drag| drag.quadrant), Some(RadialQuadrant::Hue));

    // sweeping into the luminance quadrant keeps driving hue
    touch(&mut state, EventKind::Move, vec![finger(2, 50.0, 350.0)]);
    assert_eq!(state.radial.map(|drag| drag.quadrant), Some(RadialQuadrant::Hue));
    assert_ne!(state.params().hue(), hue);
    assert_eq!(state.params().luminance(), luminance);

    touch(&mut state, EventKind::End, vec![finger(2, 50.0, 350.0)]);
    assert_eq!(state.mode(), Mode::Draw);
    assert_eq!(state.compositor().merge_count(), 0);
}

#[test]
fn foreign_device_events_are_dropped() {
    let mut state = create_test_state();
    mouse(&mut state, EventKind::Move, 10.0, 10.0);
    let dropped = state.handle_event(&RawEvent::touch(
        EventKind::Start,
        vec![finger(1, 100.0, 100.0)],
    ));
    assert!(!dropped);
    assert!(state.compositor().pending().is_empty());
}

#[test]
fn clear_swaps_brush_and_background() {
    let mut state = create_test_state();
    drag(&mut state, &[(10.0, 10.0), (60.0, 60.0)]);
    let brush = state.params().color();

    state.on_key_press(Key::Char('c'));
    let committed = state.compositor().committed();
    assert_eq!(committed.stroke_count(), 0);
    assert_eq!(committed.background, brush);
    assert_close(state.params().luminance(), 0.8, 1e-9);
    assert_eq!(state.params().chroma(), 0.0);
}

#[test]
fn clear_nudges_brush_away_from_similar_background() {
    let mut state = create_test_state();
    state.set_brush_color(Oklch::new(0.82, 0.1, 40.0));
    state.clear();
    assert_close(state.params().luminance(), 0.77, 1e-9);
}

#[test]
fn next_tool_cycles_the_catalog() {
    let mut state = create_test_state();
    state.on_key_press(Key::Char('t'));
    assert_eq!(state.params().tool, Tool::Stamp);
    assert_eq!(state.params().texture, Some(Texture::Rake));
    state.next_tool();
    assert_eq!(state.params().tool, Tool::RoundLine);
}

#[test]
fn save_writes_a_png() {
    let mut state = create_test_state();
    drag(&mut state, &[(10.0, 10.0), (60.0, 60.0)]);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("canvas.png");
    let written = state.save(Some(&path)).unwrap();
    assert_eq!(written, path);
    assert!(std::fs::metadata(&path).unwrap().len() > 0);
}
