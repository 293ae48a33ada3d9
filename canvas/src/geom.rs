//! Geometry kernel: pure functions over points and rectangles.
//!
//! Nothing in this module knows about viewports, stores or gestures. Every
//! function takes values and returns values, so the same helpers drive both the
//! live preview and the commit on pointer release.

#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

use std::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};

use crate::consts::FRAC_PI_2;

/// A point in either content or viewport space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, other: Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, factor: f64) -> Point {
        Point::new(self.x * factor, self.y * factor)
    }
}

/// A rectangle with a rotation about its center.
///
/// `x`/`y` is the top-left corner of the unrotated rect. `rotation` is in
/// radians and is never normalized, so repeated rotations accumulate.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub rotation: f64,
}

impl Rect {
    /// An axis-aligned rect.
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height, rotation: 0.0 }
    }

    #[must_use]
    pub fn with_rotation(self, rotation: f64) -> Self {
        Self { rotation, ..self }
    }

    #[must_use]
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Width over height. `None` for a zero-height rect.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn ratio(&self) -> Option<f64> {
        if self.height == 0.0 { None } else { Some(self.width / self.height) }
    }

    /// Corners of the unrotated rect, clockwise from top-left.
    #[must_use]
    pub fn vertices(&self) -> [Point; 4] {
        [
            Point::new(self.x, self.y),
            Point::new(self.x + self.width, self.y),
            Point::new(self.x + self.width, self.y + self.height),
            Point::new(self.x, self.y + self.height),
        ]
    }
}

/// Handle positions around a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
    TopLeft,
}

impl Direction {
    /// The top-center anchor rotates the rect instead of resizing it.
    #[must_use]
    pub fn is_rotation_handle(self) -> bool {
        self == Direction::Top
    }
}

/// A handle on a rect: its direction and its (rotated) position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    pub direction: Direction,
    pub position: Point,
}

/// Inclusive bounds test against the unrotated rect.
#[must_use]
pub fn point_in_rect(rect: &Rect, point: Point) -> bool {
    rect.x <= point.x
        && rect.x + rect.width >= point.x
        && rect.y <= point.y
        && rect.y + rect.height >= point.y
}

/// Axis-aligned overlap test on the unrotated extents of `a` and `b`.
///
/// Touching edges count as overlapping. Rotation is ignored: two rotated
/// rects whose bounding boxes overlap are reported as overlapping even when
/// their outlines do not intersect. Callers rely on this behavior for the
/// create-time overlap check, so it must not be replaced by an exact test.
#[must_use]
pub fn rects_overlap(a: &Rect, b: &Rect) -> bool {
    let (a_min_x, a_max_x) = min_max(a.x, a.x + a.width);
    let (a_min_y, a_max_y) = min_max(a.y, a.y + a.height);
    let (b_min_x, b_max_x) = min_max(b.x, b.x + b.width);
    let (b_min_y, b_max_y) = min_max(b.y, b.y + b.height);
    !(b_min_x > a_max_x || b_max_x < a_min_x || b_min_y > a_max_y || b_max_y < a_min_y)
}

fn min_max(a: f64, b: f64) -> (f64, f64) {
    if a < b { (a, b) } else { (b, a) }
}

/// Grow `rect` by `dx` on the left and right and `dy` on the top and bottom.
/// Negative values shrink it. The result is axis-aligned.
#[must_use]
pub fn expand(rect: &Rect, dx: f64, dy: f64) -> Rect {
    Rect::new(rect.x - dx, rect.y - dy, rect.width + 2.0 * dx, rect.height + 2.0 * dy)
}

/// Rotate `point` about `center` by `angle` radians.
#[must_use]
pub fn rotate_point(point: Point, center: Point, angle: f64) -> Point {
    let (sin, cos) = angle.sin_cos();
    let dx = point.x - center.x;
    let dy = point.y - center.y;
    Point::new(dx * cos - dy * sin + center.x, dx * sin + dy * cos + center.y)
}

/// The eight anchors of `rect`, rotated about its center.
///
/// Order is fixed: top-left, top, top-right, left, right, bottom-left, bottom,
/// bottom-right. Hit-testing walks this order, so the first anchor wins when
/// hover boxes overlap on tiny rects.
#[must_use]
pub fn anchors_for_rect(rect: &Rect) -> [Anchor; 8] {
    let center = rect.center();
    let left = rect.x;
    let mid_x = rect.x + 0.5 * rect.width;
    let right = rect.x + rect.width;
    let top = rect.y;
    let mid_y = rect.y + 0.5 * rect.height;
    let bottom = rect.y + rect.height;

    let at = |direction, x, y| Anchor {
        direction,
        position: rotate_point(Point::new(x, y), center, rect.rotation),
    };

    [
        at(Direction::TopLeft, left, top),
        at(Direction::Top, mid_x, top),
        at(Direction::TopRight, right, top),
        at(Direction::Left, left, mid_y),
        at(Direction::Right, right, mid_y),
        at(Direction::BottomLeft, left, bottom),
        at(Direction::Bottom, mid_x, bottom),
        at(Direction::BottomRight, right, bottom),
    ]
}

/// Drag the `direction` handle of `rect` by `delta`, then normalize so neither
/// extent is negative. The edge opposite the dragged handle stays put.
#[must_use]
pub fn resize_by_anchor(rect: &Rect, direction: Direction, delta: Point) -> Rect {
    let mut r = *rect;
    match direction {
        Direction::Top => {
            r.y += delta.y;
            r.height -= delta.y;
        }
        Direction::TopRight => {
            r.width += delta.x;
            r.y += delta.y;
            r.height -= delta.y;
        }
        Direction::Right => {
            r.width += delta.x;
        }
        Direction::BottomRight => {
            r.width += delta.x;
            r.height += delta.y;
        }
        Direction::Bottom => {
            r.height += delta.y;
        }
        Direction::BottomLeft => {
            r.x += delta.x;
            r.width -= delta.x;
            r.height += delta.y;
        }
        Direction::Left => {
            r.x += delta.x;
            r.width -= delta.x;
        }
        Direction::TopLeft => {
            r.x += delta.x;
            r.width -= delta.x;
            r.y += delta.y;
            r.height -= delta.y;
        }
    }

    if r.width < 0.0 {
        r.x += r.width;
        r.width = -r.width;
    }
    if r.height < 0.0 {
        r.y += r.height;
        r.height = -r.height;
    }
    r
}

#[must_use]
pub fn translate(rect: &Rect, delta: Point) -> Rect {
    Rect { x: rect.x + delta.x, y: rect.y + delta.y, ..*rect }
}

/// Multiply position and size by `factor`. Rotation is kept.
#[must_use]
pub fn scale(rect: &Rect, factor: f64) -> Rect {
    Rect {
        x: rect.x * factor,
        y: rect.y * factor,
        width: rect.width * factor,
        height: rect.height * factor,
        rotation: rect.rotation,
    }
}

/// Angle of the vector `pivot → pointer`, measured from the vertical.
///
/// Computed as `atan(dy / dx) - π/2`. A vertical vector (`dx == 0`) uses
/// `±π/2` for the arctangent, signed like `dy`; a zero-length vector uses `0`.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn rotation_delta_from_pivot(pointer: Point, pivot: Point) -> f64 {
    let dx = pointer.x - pivot.x;
    let dy = pointer.y - pivot.y;
    let theta = if dx == 0.0 {
        if dy > 0.0 {
            FRAC_PI_2
        } else if dy < 0.0 {
            -FRAC_PI_2
        } else {
            0.0
        }
    } else {
        (dy / dx).atan()
    };
    theta - FRAC_PI_2
}

/// The axis-aligned rect spanned by two opposite corners, in either order.
#[must_use]
pub fn rect_from_corners(a: Point, b: Point) -> Rect {
    let (min_x, max_x) = min_max(a.x, b.x);
    let (min_y, max_y) = min_max(a.y, b.y);
    Rect::new(min_x, min_y, max_x - min_x, max_y - min_y)
}

/// A `width × height` rect centered on `center`.
#[must_use]
pub fn rect_with_center_and_size(center: Point, width: f64, height: f64, rotation: f64) -> Rect {
    Rect { x: center.x - 0.5 * width, y: center.y - 0.5 * height, width, height, rotation }
}
