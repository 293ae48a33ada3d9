//! Scene building: turns store, viewport and gesture state into draw commands.
//!
//! Nothing here touches the browser. [`draw`] returns a [`Scene`] that
//! [`crate::paint`] replays onto a 2D context, and that tests and the replay
//! tool inspect directly. The stored rects are only read; an in-progress
//! gesture is previewed with [`crate::engine::apply_gesture`], the same
//! function pointer-up commits with.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use serde::Serialize;

use crate::doc::{AnnotationStore, LabelNameId, LabelRect};
use crate::engine::apply_gesture;
use crate::geom::{self, Point, Rect};
use crate::hit::{self, Band};
use crate::input::{CursorHint, CursorStyle, InteractionState, PointerEvent};
use crate::settings::EngineSettings;
use crate::viewport::Viewport;

/// An RGB color parsed from `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Parse `#RRGGBB` (case-insensitive). Anything else is `None`.
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16);
        match (channel(0), channel(2), channel(4)) {
            (Ok(r), Ok(g), Ok(b)) => Some(Self { r, g, b }),
            _ => None,
        }
    }

    /// CSS `rgba()` string with the given alpha.
    #[must_use]
    pub fn to_css(self, alpha: f64) -> String {
        format!("rgba({}, {}, {}, {alpha})", self.r, self.g, self.b)
    }
}

/// One primitive for the painter. Rects are in viewport space and are
/// rotated about their center by `rect.rotation`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    FillRect { rect: Rect, color: String },
    StrokeRect { rect: Rect, color: String, thickness: f64 },
}

/// Everything needed to paint one frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Scene {
    /// In paint order.
    pub commands: Vec<DrawCommand>,
    pub cursor: CursorHint,
}

/// Align a rect's edges to pixel centers so 1px lines stay crisp.
#[must_use]
pub fn between_pixels(rect: &Rect) -> Rect {
    let x = rect.x.floor() + 0.5;
    let y = rect.y.floor() + 0.5;
    let right = (rect.x + rect.width).floor() + 0.5;
    let bottom = (rect.y + rect.height).floor() + 0.5;
    Rect { x, y, width: right - x, height: bottom - y, rotation: rect.rotation }
}

/// Outline color for a rect: its label's color when labelled, otherwise the
/// active or inactive default.
///
/// A label without an explicit color takes the palette entry at its position
/// in the label list.
#[must_use]
pub fn line_color(
    store: &impl AnnotationStore,
    settings: &EngineSettings,
    label_id: Option<LabelNameId>,
    as_active: bool,
) -> String {
    let labelled = label_id.and_then(|id| store.label_names().iter().enumerate().find(|(_, name)| name.id == id));
    if let Some((index, name)) = labelled {
        if let Some(color) = &name.color {
            return color.clone();
        }
        let palette = &settings.label_colors;
        if let Some(color) = palette.get(index % palette.len().max(1)) {
            return color.clone();
        }
    }
    if as_active { settings.active_line_color.clone() } else { settings.inactive_line_color.clone() }
}

/// Build the draw commands and cursor for the current state.
///
/// Visible rects are drawn in collection order, except the active accepted
/// rect, which is drawn last with its gesture preview and anchor handles. A
/// create drag adds an outline from its start to the snapped pointer.
#[must_use]
pub fn draw(
    store: &impl AnnotationStore,
    viewport: Option<&Viewport>,
    state: &InteractionState,
    pointer: Option<PointerEvent>,
    settings: &EngineSettings,
) -> Scene {
    let cursor = cursor_hint(store, viewport, state, pointer, settings);
    let mut commands = Vec::new();
    let (Some(viewport), Some(image)) = (viewport, store.active_image()) else {
        return Scene { commands, cursor };
    };

    let active_id = store.active_rect_id();
    let highlighted_id = store.highlighted_rect_id();
    let end = pointer.map(|p| viewport.snap(p.position));

    let mut active: Option<&LabelRect> = None;
    for label_rect in image.label_rects.iter().filter(|r| r.is_visible) {
        if label_rect.is_accepted() && Some(label_rect.id) == active_id {
            active = Some(label_rect);
            continue;
        }
        let as_active = label_rect.is_accepted() && Some(label_rect.id) == highlighted_id;
        let color = line_color(store, settings, label_rect.label_id, as_active);
        push_rect(&mut commands, &viewport.rect_to_viewport(&label_rect.rect), &color, settings);
    }

    if let Some(label_rect) = active {
        let working = viewport.rect_relative(&label_rect.rect);
        let preview = match end {
            Some(end) if state.target() == Some(label_rect.id) => {
                apply_gesture(state, &working, end, viewport.origin())
            }
            _ => working,
        };
        let on_screen = geom::translate(&preview, viewport.origin());
        let color = line_color(store, settings, label_rect.label_id, true);
        push_rect(&mut commands, &on_screen, &color, settings);
        push_anchor_handles(&mut commands, &on_screen, settings);
    }

    if let (InteractionState::Creating { start }, Some(end)) = (state, end) {
        commands.push(DrawCommand::StrokeRect {
            rect: between_pixels(&geom::rect_from_corners(*start, end)),
            color: line_color(store, settings, None, true),
            thickness: settings.line_thickness,
        });
    }

    Scene { commands, cursor }
}

fn push_rect(commands: &mut Vec<DrawCommand>, on_screen: &Rect, line: &str, settings: &EngineSettings) {
    let rect = between_pixels(on_screen);
    let fill = Color::from_hex(line).map_or_else(|| line.to_owned(), |c| c.to_css(settings.fill_alpha));
    commands.push(DrawCommand::FillRect { rect, color: fill });
    commands.push(DrawCommand::StrokeRect { rect, color: line.to_owned(), thickness: settings.line_thickness });
}

fn push_anchor_handles(commands: &mut Vec<DrawCommand>, on_screen: &Rect, settings: &EngineSettings) {
    for anchor in geom::anchors_for_rect(on_screen) {
        let handle =
            geom::rect_with_center_and_size(anchor.position, settings.anchor_size, settings.anchor_size, on_screen.rotation);
        commands.push(DrawCommand::FillRect { rect: between_pixels(&handle), color: settings.anchor_color.clone() });
    }
}

/// Cursor for `pointer` given the current gesture.
///
/// Over an accepted rect's anchor, or while resizing, the cursor is a move
/// cursor. Elsewhere on the canvas the native pointer is hidden and the host
/// draws the custom one: a move cursor while a create drag is off the image,
/// the default over the image, and a cancel overlay over the letterbox.
#[must_use]
pub fn cursor_hint(
    store: &impl AnnotationStore,
    viewport: Option<&Viewport>,
    state: &InteractionState,
    pointer: Option<PointerEvent>,
    settings: &EngineSettings,
) -> CursorHint {
    let Some(event) = pointer else {
        return CursorHint::default();
    };
    let over_anchor =
        viewport.is_some_and(|vp| accepted_anchor_under(store, vp, event.position, settings.anchor_hover_size));
    if over_anchor || state.is_resizing() {
        return CursorHint::new(CursorStyle::Move, event.over_canvas);
    }
    if !event.over_canvas {
        return CursorHint::default();
    }
    let style = if state.is_creating() && !event.over_image {
        CursorStyle::Move
    } else if event.over_image {
        CursorStyle::Default
    } else {
        CursorStyle::CancelOverlay
    };
    CursorHint::new(style, true)
}

fn accepted_anchor_under(store: &impl AnnotationStore, viewport: &Viewport, point: Point, hover_size: f64) -> bool {
    let Some(image) = store.active_image() else {
        return false;
    };
    hit::rect_under(image, store.active_rect_id(), viewport, point, hover_size, Band::Edge)
        .filter(|r| r.is_accepted())
        .is_some_and(|r| hit::anchor_at(&viewport.rect_to_viewport(&r.rect), point, hover_size).is_some())
}
