use uuid::Uuid;

use super::*;
use crate::geom::Direction;

fn anchor() -> Anchor {
    Anchor { direction: Direction::Right, position: Point::new(10.0, 5.0) }
}

#[test]
fn default_state_is_idle() {
    let state = InteractionState::default();
    assert!(state.is_idle());
    assert_eq!(state.target(), None);
    assert_eq!(state.name(), "idle");
}

#[test]
fn creating_has_no_target() {
    let state = InteractionState::Creating { start: Point::new(1.0, 2.0) };
    assert!(state.is_creating());
    assert!(!state.is_idle());
    assert_eq!(state.target(), None);
}

#[test]
fn edit_gestures_expose_their_target() {
    let id = Uuid::new_v4();
    let states = [
        InteractionState::Moving { rect_id: id, start: Point::default() },
        InteractionState::Resizing { rect_id: id, anchor: anchor() },
        InteractionState::Rotating { rect_id: id, anchor: anchor(), pivot: Point::default() },
    ];
    for state in states {
        assert_eq!(state.target(), Some(id), "{}", state.name());
    }
    assert!(states[1].is_resizing());
    assert!(!states[2].is_resizing());
}

#[test]
fn pointer_event_constructors() {
    let p = Point::new(3.0, 4.0);
    assert_eq!(PointerEvent::on_image(p), PointerEvent { position: p, over_canvas: true, over_image: true });
    assert!(!PointerEvent::off_image(p).over_image);
    assert!(PointerEvent::off_image(p).over_canvas);
    assert!(!PointerEvent::outside(p).over_canvas);
}

#[test]
fn pointer_event_flags_default_to_true() {
    let e: PointerEvent = serde_json::from_str(r#"{"position":{"x":1,"y":2}}"#).unwrap();
    assert_eq!(e, PointerEvent::on_image(Point::new(1.0, 2.0)));
}

#[test]
fn cursor_hint_default_shows_native_pointer() {
    let hint = CursorHint::default();
    assert_eq!(hint.style, CursorStyle::Default);
    assert!(!hint.hide_native);
}

#[test]
fn cursor_and_rejection_serde_names() {
    assert_eq!(serde_json::to_string(&CursorStyle::CancelOverlay).unwrap(), "\"cancel_overlay\"");
    assert_eq!(serde_json::to_string(&CreateRejection::ZeroSize).unwrap(), "\"zero_size\"");
}
