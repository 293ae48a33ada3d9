use uuid::Uuid;

use super::*;
use crate::doc::LabelStatus;
use crate::geom::Direction;

const HOVER: f64 = 20.0;

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn identity_viewport() -> Viewport {
    Viewport::new(Rect::new(0.0, 0.0, 400.0, 300.0), 400.0, 300.0)
}

fn image_with(rects: Vec<LabelRect>) -> ImageAnnotations {
    ImageAnnotations { id: Uuid::new_v4(), width: 400.0, height: 300.0, label_rects: rects }
}

fn label_rect(x: f64, y: f64, w: f64, h: f64) -> LabelRect {
    LabelRect::new(Rect::new(x, y, w, h), None)
}

// =============================================================
// Bands
// =============================================================

#[test]
fn interior_band_is_inset_by_half_hover() {
    let r = Rect::new(0.0, 0.0, 100.0, 100.0);
    assert!(in_interior(&r, pt(50.0, 50.0), HOVER));
    assert!(in_interior(&r, pt(10.0, 10.0), HOVER));
    assert!(!in_interior(&r, pt(9.0, 50.0), HOVER));
    assert!(!in_interior(&r, pt(50.0, 95.0), HOVER));
}

#[test]
fn edge_band_straddles_the_outline() {
    let r = Rect::new(0.0, 0.0, 100.0, 100.0);
    assert!(in_edge_band(&r, pt(0.0, 50.0), HOVER));
    assert!(in_edge_band(&r, pt(-10.0, 50.0), HOVER));
    assert!(in_edge_band(&r, pt(9.0, 50.0), HOVER));
    assert!(!in_edge_band(&r, pt(-11.0, 50.0), HOVER));
    assert!(!in_edge_band(&r, pt(50.0, 50.0), HOVER));
}

#[test]
fn bands_are_disjoint() {
    let r = Rect::new(0.0, 0.0, 100.0, 60.0);
    for x in (-20..=120).step_by(5) {
        for y in (-20..=80).step_by(5) {
            let p = pt(f64::from(x), f64::from(y));
            assert!(!(in_interior(&r, p, HOVER) && in_edge_band(&r, p, HOVER)), "{p:?}");
        }
    }
}

#[test]
fn tiny_rect_has_no_interior() {
    let r = Rect::new(0.0, 0.0, 10.0, 10.0);
    assert!(!in_interior(&r, pt(5.0, 5.0), HOVER));
    assert!(in_edge_band(&r, pt(5.0, 5.0), HOVER));
}

// =============================================================
// Anchors
// =============================================================

#[test]
fn anchor_at_corner() {
    let r = Rect::new(0.0, 0.0, 100.0, 100.0);
    let a = anchor_at(&r, pt(98.0, 103.0), HOVER).unwrap();
    assert_eq!(a.direction, Direction::BottomRight);
}

#[test]
fn anchor_at_top_center_is_rotation_handle() {
    let r = Rect::new(0.0, 0.0, 100.0, 100.0);
    let a = anchor_at(&r, pt(50.0, -5.0), HOVER).unwrap();
    assert!(a.direction.is_rotation_handle());
}

#[test]
fn anchor_at_misses_edge_between_anchors() {
    let r = Rect::new(0.0, 0.0, 100.0, 100.0);
    assert!(anchor_at(&r, pt(25.0, 0.0), HOVER).is_none());
}

#[test]
fn anchor_at_first_in_order_wins_on_overlap() {
    // 10x10 rect: every hover box overlaps the top-left one at the center.
    let r = Rect::new(0.0, 0.0, 10.0, 10.0);
    let a = anchor_at(&r, pt(5.0, 5.0), HOVER).unwrap();
    assert_eq!(a.direction, Direction::TopLeft);
}

// =============================================================
// Precedence
// =============================================================

#[test]
fn collection_order_breaks_ties() {
    let a = label_rect(0.0, 0.0, 100.0, 100.0);
    let b = label_rect(0.0, 0.0, 100.0, 100.0);
    let a_id = a.id;
    let image = image_with(vec![a, b]);
    let hit = rect_under(&image, None, &identity_viewport(), pt(50.0, 50.0), HOVER, Band::Interior);
    assert_eq!(hit.map(|r| r.id), Some(a_id));
}

#[test]
fn active_rect_wins_over_collection_order() {
    let a = label_rect(0.0, 0.0, 100.0, 100.0);
    let b = label_rect(0.0, 0.0, 100.0, 100.0);
    let b_id = b.id;
    let image = image_with(vec![a, b]);
    let hit = rect_under(&image, Some(b_id), &identity_viewport(), pt(50.0, 50.0), HOVER, Band::Interior);
    assert_eq!(hit.map(|r| r.id), Some(b_id));
}

#[test]
fn invisible_rects_are_never_hit() {
    let mut a = label_rect(0.0, 0.0, 100.0, 100.0);
    a.is_visible = false;
    let a_id = a.id;
    let image = image_with(vec![a]);
    let vp = identity_viewport();
    assert!(rect_under(&image, Some(a_id), &vp, pt(50.0, 50.0), HOVER, Band::Interior).is_none());
    assert!(rect_under(&image, Some(a_id), &vp, pt(0.0, 50.0), HOVER, Band::Edge).is_none());
}

#[test]
fn invisible_active_falls_back_to_collection() {
    let mut a = label_rect(0.0, 0.0, 100.0, 100.0);
    a.is_visible = false;
    let b = label_rect(0.0, 0.0, 100.0, 100.0);
    let (a_id, b_id) = (a.id, b.id);
    let image = image_with(vec![a, b]);
    let hit = rect_under(&image, Some(a_id), &identity_viewport(), pt(50.0, 50.0), HOVER, Band::Interior);
    assert_eq!(hit.map(|r| r.id), Some(b_id));
}

#[test]
fn draft_rects_are_still_hit() {
    let mut a = label_rect(0.0, 0.0, 100.0, 100.0);
    a.status = LabelStatus::Draft;
    let a_id = a.id;
    let image = image_with(vec![a]);
    let hit = rect_under(&image, None, &identity_viewport(), pt(50.0, 50.0), HOVER, Band::Interior);
    assert_eq!(hit.map(|r| r.id), Some(a_id));
}

#[test]
fn hit_testing_runs_in_viewport_space() {
    // Content rect {0,0,100,100} drawn at half scale, offset (200,100).
    let a = label_rect(0.0, 0.0, 100.0, 100.0);
    let a_id = a.id;
    let image = image_with(vec![a]);
    let vp = Viewport::new(Rect::new(200.0, 100.0, 200.0, 150.0), 400.0, 300.0);

    let center = rect_under(&image, None, &vp, pt(225.0, 125.0), HOVER, Band::Interior);
    assert_eq!(center.map(|r| r.id), Some(a_id));
    let content_center = rect_under(&image, None, &vp, pt(50.0, 50.0), HOVER, Band::Interior);
    assert!(content_center.is_none());
    let edge = rect_under(&image, None, &vp, pt(250.0, 125.0), HOVER, Band::Edge);
    assert_eq!(edge.map(|r| r.id), Some(a_id));
}

#[test]
fn candidates_skip_missing_active_id() {
    let a = label_rect(0.0, 0.0, 10.0, 10.0);
    let a_id = a.id;
    let image = image_with(vec![a]);
    let ids: Vec<_> = candidates(&image, Some(Uuid::new_v4())).map(|r| r.id).collect();
    assert_eq!(ids, vec![a_id]);
}
