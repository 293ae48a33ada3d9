//! Hit-testing in viewport space.
//!
//! A rect has two pointer zones. The interior band is the rect shrunk by half
//! the hover size on each side; grabbing it moves the rect. The edge band is
//! the frame between the rect grown by half the hover size and the interior
//! band; anchors live there. Both zones use the unrotated extents.
//!
//! Precedence: the active rect is tested first, then the rest in collection
//! order. Invisible rects are never hit.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::doc::{ImageAnnotations, LabelRect, RectId};
use crate::geom::{self, Anchor, Point, Rect};
use crate::viewport::Viewport;

/// Which pointer zone of a rect to test against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    Interior,
    Edge,
}

#[must_use]
pub fn in_interior(rect: &Rect, point: Point, hover_size: f64) -> bool {
    let half = hover_size / 2.0;
    geom::point_in_rect(&geom::expand(rect, -half, -half), point)
}

#[must_use]
pub fn in_edge_band(rect: &Rect, point: Point, hover_size: f64) -> bool {
    let half = hover_size / 2.0;
    geom::point_in_rect(&geom::expand(rect, half, half), point) && !in_interior(rect, point, hover_size)
}

#[must_use]
pub fn in_band(rect: &Rect, point: Point, hover_size: f64, band: Band) -> bool {
    match band {
        Band::Interior => in_interior(rect, point, hover_size),
        Band::Edge => in_edge_band(rect, point, hover_size),
    }
}

/// The first anchor of `rect` whose `hover_size` box contains `point`.
#[must_use]
pub fn anchor_at(rect: &Rect, point: Point, hover_size: f64) -> Option<Anchor> {
    geom::anchors_for_rect(rect).into_iter().find(|anchor| {
        let hover_box = geom::rect_with_center_and_size(anchor.position, hover_size, hover_size, 0.0);
        geom::point_in_rect(&hover_box, point)
    })
}

/// Visible rects in hit-test order: the active one first, then collection order.
pub fn candidates(image: &ImageAnnotations, active_id: Option<RectId>) -> impl Iterator<Item = &LabelRect> {
    let active = active_id.and_then(|id| image.rect(&id)).filter(|r| r.is_visible);
    let rest = image
        .label_rects
        .iter()
        .filter(move |r| r.is_visible && Some(r.id) != active_id);
    active.into_iter().chain(rest)
}

/// The first rect whose `band` contains the viewport-space `point`.
#[must_use]
pub fn rect_under<'a>(
    image: &'a ImageAnnotations,
    active_id: Option<RectId>,
    viewport: &Viewport,
    point: Point,
    hover_size: f64,
    band: Band,
) -> Option<&'a LabelRect> {
    candidates(image, active_id).find(|r| in_band(&viewport.rect_to_viewport(&r.rect), point, hover_size, band))
}
