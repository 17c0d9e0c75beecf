use super::*;

// =============================================================
// InputState
// =============================================================

#[test]
fn input_state_default_is_idle() {
    assert_eq!(InputState::default(), InputState::Idle);
    assert!(!InputState::default().is_panning());
}

#[test]
fn panning_reports_is_panning() {
    let state = InputState::Panning { last_screen: Point::new(1.0, 2.0), source: PointerSource::Mouse };
    assert!(state.is_panning());
}

// =============================================================
// Button / PointerSource
// =============================================================

#[test]
fn button_variants_distinct() {
    assert_ne!(Button::Primary, Button::Middle);
    assert_ne!(Button::Primary, Button::Secondary);
    assert_ne!(Button::Middle, Button::Secondary);
}

#[test]
fn pointer_source_debug_format() {
    assert_eq!(format!("{:?}", PointerSource::Touch), "Touch");
}

// =============================================================
// single_touch
// =============================================================

#[test]
fn single_touch_with_one_finger() {
    assert_eq!(single_touch(&[Point::new(3.0, 4.0)]), Some(Point::new(3.0, 4.0)));
}

#[test]
fn single_touch_ignores_empty_list() {
    assert_eq!(single_touch(&[]), None);
}

#[test]
fn single_touch_ignores_multi_touch() {
    assert_eq!(single_touch(&[Point::new(0.0, 0.0), Point::new(5.0, 5.0)]), None);
}
