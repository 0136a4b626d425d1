#![allow(clippy::float_cmp)]

use super::*;

fn item() -> Draggable {
    Draggable::new(Tag::new("t1", "Interior", "interior"))
}

#[test]
fn new_item_rests_at_identity() {
    let d = item();
    assert_eq!(d.phase(), ItemPhase::Rest);
    assert_eq!(d.transform(), Transform::IDENTITY);
    assert_eq!(d.style().opacity, 1.0);
    assert_eq!(d.style().transition_ms, None);
}

#[test]
fn track_ignored_unless_active() {
    let mut d = item();
    d.track(Offset { dx: 10.0, dy: 10.0 });
    assert_eq!(d.transform(), Transform::IDENTITY);
}

#[test]
fn active_item_follows_pointer_at_half_opacity() {
    let mut d = item();
    d.begin();
    d.track(Offset { dx: 42.0, dy: -7.0 });
    let style = d.style();
    assert_eq!(style.transform, Transform { x: 42.0, y: -7.0 });
    assert_eq!(style.opacity, 0.5);
}

#[test]
fn rejected_drop_returns_with_transition() {
    let mut d = item();
    d.begin();
    d.track(Offset { dx: 30.0, dy: 30.0 });
    d.settle(false);
    assert_eq!(d.phase(), ItemPhase::Returning);
    assert_eq!(d.transform(), Transform::IDENTITY);
    assert_eq!(d.style().transition_ms, Some(250));

    d.finish_return();
    assert_eq!(d.phase(), ItemPhase::Rest);
    assert_eq!(d.style().transition_ms, None);
}

#[test]
fn accepted_drop_snaps_without_transition() {
    let mut d = item();
    d.begin();
    d.track(Offset { dx: 30.0, dy: 30.0 });
    d.settle(true);
    assert_eq!(d.phase(), ItemPhase::Rest);
    assert_eq!(d.transform(), Transform::IDENTITY);
    assert_eq!(d.style().transition_ms, None);
}

#[test]
fn css_transform_string() {
    assert_eq!(Transform { x: 3.0, y: -4.5 }.to_css(), "translate3d(3px, -4.5px, 0)");
}

#[test]
fn style_round_trips_through_json() {
    let mut d = item();
    d.begin();
    d.track(Offset { dx: 1.0, dy: 2.0 });
    let json = serde_json::to_string(&d.style()).unwrap();
    let back: ItemStyle = serde_json::from_str(&json).unwrap();
    assert_eq!(back, d.style());
}
