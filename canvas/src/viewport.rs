//! Content-space ↔ viewport-space conversion.
//!
//! Content space is the image's native pixel grid; viewport space is where the
//! image is drawn on screen after zoom and pan. Stored rects are always in
//! content space. Edits are computed on a "working rect": the content rect
//! scaled to viewport units but left relative to the image origin.

#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use serde::{Deserialize, Serialize};

use crate::geom::{self, Point, Rect};

/// Map a content-space rect into viewport space.
#[must_use]
pub fn rect_to_viewport(rect: &Rect, origin: Point, scale: f64) -> Rect {
    geom::translate(&geom::scale(rect, scale), origin)
}

/// Map a viewport-space rect back into content space.
#[must_use]
pub fn rect_to_content(rect: &Rect, origin: Point, scale: f64) -> Rect {
    geom::scale(&geom::translate(rect, Point::default() - origin), 1.0 / scale)
}

#[must_use]
pub fn point_to_viewport(point: Point, origin: Point, scale: f64) -> Point {
    point * scale + origin
}

#[must_use]
pub fn point_to_content(point: Point, origin: Point, scale: f64) -> Point {
    (point - origin) * (1.0 / scale)
}

/// Clamp `point` onto `bounds` per axis. Points already inside are returned
/// unchanged.
#[must_use]
pub fn snap_to_bounds(point: Point, bounds: &Rect) -> Point {
    if geom::point_in_rect(bounds, point) {
        return point;
    }
    let max_x = bounds.x + bounds.width;
    let max_y = bounds.y + bounds.height;
    Point::new(point.x.max(bounds.x).min(max_x), point.y.max(bounds.y).min(max_y))
}

/// Where the active image sits on screen, plus its native size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// The displayed image in viewport space.
    pub image_rect: Rect,
    /// Native image width in content pixels.
    pub content_width: f64,
    /// Native image height in content pixels.
    pub content_height: f64,
}

impl Viewport {
    #[must_use]
    pub fn new(image_rect: Rect, content_width: f64, content_height: f64) -> Self {
        Self { image_rect, content_width, content_height }
    }

    #[must_use]
    pub fn origin(&self) -> Point {
        self.image_rect.origin()
    }

    #[must_use]
    pub fn image_rect(&self) -> Rect {
        self.image_rect
    }

    /// Viewport pixels per content pixel. `1.0` until the content size is known.
    #[must_use]
    pub fn scale(&self) -> f64 {
        if self.content_width > 0.0 { self.image_rect.width / self.content_width } else { 1.0 }
    }

    #[must_use]
    pub fn rect_to_viewport(&self, rect: &Rect) -> Rect {
        rect_to_viewport(rect, self.origin(), self.scale())
    }

    #[must_use]
    pub fn rect_to_content(&self, rect: &Rect) -> Rect {
        rect_to_content(rect, self.origin(), self.scale())
    }

    /// Scale `rect` into viewport units without moving it onto the image.
    #[must_use]
    pub fn rect_relative(&self, rect: &Rect) -> Rect {
        geom::scale(rect, self.scale())
    }

    /// Inverse of [`Viewport::rect_relative`].
    #[must_use]
    pub fn relative_to_content(&self, rect: &Rect) -> Rect {
        geom::scale(rect, 1.0 / self.scale())
    }

    #[must_use]
    pub fn point_to_content(&self, point: Point) -> Point {
        point_to_content(point, self.origin(), self.scale())
    }

    /// Clamp a viewport point onto the displayed image.
    #[must_use]
    pub fn snap(&self, point: Point) -> Point {
        snap_to_bounds(point, &self.image_rect)
    }

    /// Both the displayed and native sizes are finite and positive, so the
    /// scale and its inverse are finite.
    #[must_use]
    pub fn is_usable(&self) -> bool {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        positive(self.image_rect.width)
            && positive(self.image_rect.height)
            && positive(self.content_width)
            && positive(self.content_height)
            && self.image_rect.x.is_finite()
            && self.image_rect.y.is_finite()
    }

    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        geom::point_in_rect(&self.image_rect, point)
    }
}
