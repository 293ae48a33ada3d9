use tracing::{debug, warn};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::doc::{AnnotationStore, ImageId, LabelRect, MemoryStore, RectId, StoreError};
use crate::geom::{self, Anchor, Point, Rect};
use crate::hit::{self, Band};
use crate::input::{CreateRejection, CursorHint, InteractionState, PointerEvent};
use crate::paint;
use crate::render::{self, Scene};
use crate::settings::EngineSettings;
use crate::viewport::Viewport;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// A rect was appended to the image's collection.
    RectCreated { image_id: ImageId, rect: LabelRect },
    /// A rect's geometry was replaced. `rect` is in content space.
    RectUpdated { image_id: ImageId, id: RectId, rect: Rect },
    ActiveChanged(Option<RectId>),
    HighlightChanged(Option<RectId>),
    CreateRejected { reason: CreateRejection },
    SetCursor(CursorHint),
    /// Pan/zoom must be suspended while `true`.
    SetViewportActionsDisabled(bool),
    RenderNeeded,
}

/// What a pointer-down landed on.
enum Grab {
    Move(RectId),
    Resize(RectId, Anchor),
    Rotate(RectId, Anchor, Point),
    Activate(RectId),
    Create,
    Nothing,
}

/// Apply the in-flight gesture to a working rect.
///
/// `working` is the target rect at viewport scale, relative to the image
/// origin; `end` is the snapped pointer in viewport space. Pointer-up commits
/// exactly this value, and the renderer previews it.
#[must_use]
pub fn apply_gesture(state: &InteractionState, working: &Rect, end: Point, origin: Point) -> Rect {
    match *state {
        InteractionState::Idle | InteractionState::Creating { .. } => *working,
        InteractionState::Moving { start, .. } => geom::translate(working, end - start),
        InteractionState::Resizing { anchor, .. } => {
            geom::resize_by_anchor(working, anchor.direction, end - (anchor.position + origin))
        }
        InteractionState::Rotating { pivot, .. } => {
            working.with_rotation(working.rotation + geom::rotation_delta_from_pivot(end, pivot))
        }
    }
}

/// Core engine state: all logic that doesn't depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
pub struct EngineCore<S> {
    pub store: S,
    /// Where the active image is drawn. Without it nothing can be hit or created.
    pub viewport: Option<Viewport>,
    pub settings: EngineSettings,
    pub state: InteractionState,
    /// Last pointer sample seen by any handler.
    pub pointer: Option<PointerEvent>,
}

impl<S: AnnotationStore> EngineCore<S> {
    #[must_use]
    pub fn new(store: S, settings: EngineSettings) -> Self {
        Self { store, viewport: None, settings, state: InteractionState::Idle, pointer: None }
    }

    // --- Data inputs ---

    /// Replace the viewport. A degenerate one (zero or non-finite size) is
    /// refused and clears the current viewport, so nothing is hit or committed
    /// until a usable one arrives.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        if !viewport.is_usable() {
            warn!(?viewport, "degenerate viewport refused; clearing");
            self.clear_viewport();
            return;
        }
        self.viewport = Some(viewport);
    }

    pub fn clear_viewport(&mut self) {
        self.viewport = None;
    }

    /// Cancel any gesture without committing.
    pub fn reset(&mut self) -> Vec<Action> {
        if !self.state.is_idle() {
            debug!(state = self.state.name(), "gesture cancelled");
        }
        self.state = InteractionState::Idle;
        vec![Action::SetViewportActionsDisabled(false), Action::RenderNeeded]
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, event: PointerEvent) -> Vec<Action> {
        self.pointer = Some(event);
        if !self.state.is_idle() {
            warn!(state = self.state.name(), "pointer down during a gesture; resetting");
            return self.reset();
        }
        let mut actions = Vec::new();
        if !event.over_canvas {
            return actions;
        }
        let Some(viewport) = self.viewport else {
            return actions;
        };

        match self.grab_at(&viewport, event) {
            // Raw position: a rect may overhang the image and be grabbed there.
            Grab::Move(id) => {
                self.activate(Some(id), &mut actions);
                self.begin(InteractionState::Moving { rect_id: id, start: event.position }, &mut actions);
            }
            Grab::Resize(id, anchor) => {
                self.activate(Some(id), &mut actions);
                self.begin(InteractionState::Resizing { rect_id: id, anchor }, &mut actions);
            }
            Grab::Rotate(id, anchor, pivot) => {
                self.activate(Some(id), &mut actions);
                self.begin(InteractionState::Rotating { rect_id: id, anchor, pivot }, &mut actions);
            }
            Grab::Activate(id) => {
                self.activate(Some(id), &mut actions);
                actions.push(Action::RenderNeeded);
            }
            Grab::Create => {
                let start = viewport.snap(event.position);
                self.activate(None, &mut actions);
                self.begin(InteractionState::Creating { start }, &mut actions);
            }
            Grab::Nothing => {}
        }
        actions
    }

    pub fn on_pointer_move(&mut self, event: PointerEvent) -> Vec<Action> {
        self.pointer = Some(event);
        let mut actions = Vec::new();
        if let Some(viewport) = self.viewport {
            if !self.state.is_idle() {
                actions.push(Action::RenderNeeded);
            } else if event.over_image {
                let hovered = self.rect_under(&viewport, event.position, Band::Edge).map(|r| r.id);
                if hovered != self.store.highlighted_rect_id() {
                    self.store.set_highlighted(hovered);
                    actions.push(Action::HighlightChanged(hovered));
                    actions.push(Action::RenderNeeded);
                }
            }
        }
        actions.push(Action::SetCursor(self.cursor()));
        actions
    }

    pub fn on_pointer_up(&mut self, event: PointerEvent) -> Vec<Action> {
        self.pointer = Some(event);
        let state = std::mem::take(&mut self.state);
        let mut actions = Vec::new();

        match self.viewport {
            Some(viewport) => {
                let end = viewport.snap(event.position);
                match state {
                    InteractionState::Idle => {}
                    InteractionState::Creating { start } => self.commit_create(&viewport, start, end, &mut actions),
                    InteractionState::Moving { rect_id, .. }
                    | InteractionState::Resizing { rect_id, .. }
                    | InteractionState::Rotating { rect_id, .. } => {
                        self.commit_edit(&viewport, &state, rect_id, end, &mut actions);
                    }
                }
            }
            None if !state.is_idle() => warn!(state = state.name(), "pointer up without a viewport; gesture dropped"),
            None => {}
        }

        actions.push(Action::SetViewportActionsDisabled(false));
        actions.push(Action::RenderNeeded);
        actions.push(Action::SetCursor(self.cursor()));
        actions
    }

    // --- Queries ---

    /// Cursor for the last pointer position.
    #[must_use]
    pub fn cursor(&self) -> CursorHint {
        render::cursor_hint(&self.store, self.viewport.as_ref(), &self.state, self.pointer, &self.settings)
    }

    /// Build the draw commands for the current state.
    #[must_use]
    pub fn scene(&self) -> Scene {
        render::draw(&self.store, self.viewport.as_ref(), &self.state, self.pointer, &self.settings)
    }

    // --- Internals ---

    fn rect_under(&self, viewport: &Viewport, point: Point, band: Band) -> Option<&LabelRect> {
        let image = self.store.active_image()?;
        hit::rect_under(image, self.store.active_rect_id(), viewport, point, self.settings.anchor_hover_size, band)
    }

    fn grab_at(&self, viewport: &Viewport, event: PointerEvent) -> Grab {
        let point = event.position;
        if let Some(rect) = self.rect_under(viewport, point, Band::Interior) {
            return Grab::Move(rect.id);
        }
        let Some(rect) = self.rect_under(viewport, point, Band::Edge) else {
            return if event.over_image { Grab::Create } else { Grab::Nothing };
        };

        if rect.is_accepted() {
            let on_screen = viewport.rect_to_viewport(&rect.rect);
            if let Some(hit) = hit::anchor_at(&on_screen, point, self.settings.anchor_hover_size) {
                let anchor = Anchor { direction: hit.direction, position: hit.position - viewport.origin() };
                if anchor.direction.is_rotation_handle() {
                    let pivot = hit.position + Point::new(0.0, on_screen.height / 2.0);
                    return Grab::Rotate(rect.id, anchor, pivot);
                }
                return Grab::Resize(rect.id, anchor);
            }
        }

        if let Some(id) = self.store.highlighted_rect_id() {
            Grab::Activate(id)
        } else if event.over_image {
            Grab::Create
        } else {
            Grab::Nothing
        }
    }

    fn activate(&mut self, id: Option<RectId>, actions: &mut Vec<Action>) {
        if self.store.active_rect_id() != id {
            self.store.set_active(id);
            actions.push(Action::ActiveChanged(id));
        }
    }

    fn begin(&mut self, state: InteractionState, actions: &mut Vec<Action>) {
        debug!(state = state.name(), target = ?state.target(), "gesture started");
        self.state = state;
        actions.push(Action::SetViewportActionsDisabled(true));
        actions.push(Action::RenderNeeded);
    }

    fn commit_create(&mut self, viewport: &Viewport, start: Point, end: Point, actions: &mut Vec<Action>) {
        if start == end {
            debug!("create discarded: zero size");
            actions.push(Action::CreateRejected { reason: CreateRejection::ZeroSize });
            return;
        }
        let rect = viewport.rect_to_content(&geom::rect_from_corners(start, end));
        let Some(image) = self.store.active_image() else {
            warn!("create dropped: no active image");
            return;
        };
        if image.label_rects.iter().any(|existing| geom::rects_overlap(&existing.rect, &rect)) {
            debug!(?rect, "create discarded: overlaps an existing rect");
            actions.push(Action::CreateRejected { reason: CreateRejection::Overlap });
            return;
        }

        let image_id = image.id;
        let label_rect = LabelRect::new(rect, self.store.active_label_name_id());
        let id = label_rect.id;
        match self.store.create_rect(image_id, label_rect.clone()) {
            Ok(()) => {
                debug!(%id, ?rect, "rect created");
                actions.push(Action::RectCreated { image_id, rect: label_rect });
                self.activate(Some(id), actions);
            }
            Err(err) => log_store_error(&err, id),
        }
    }

    fn commit_edit(
        &mut self,
        viewport: &Viewport,
        state: &InteractionState,
        rect_id: RectId,
        end: Point,
        actions: &mut Vec<Action>,
    ) {
        let Some(image) = self.store.active_image() else {
            warn!(%rect_id, "commit dropped: no active image");
            return;
        };
        let image_id = image.id;
        let Some(target) = image.rect(&rect_id) else {
            warn!(%rect_id, "commit dropped: rect no longer exists");
            return;
        };

        let working = viewport.rect_relative(&target.rect);
        let next = viewport.relative_to_content(&apply_gesture(state, &working, end, viewport.origin()));
        match self.store.commit_rect(image_id, rect_id, next) {
            Ok(()) => {
                debug!(%rect_id, state = state.name(), rect = ?next, "rect committed");
                actions.push(Action::RectUpdated { image_id, id: rect_id, rect: next });
            }
            Err(err) => log_store_error(&err, rect_id),
        }
    }
}

impl EngineCore<MemoryStore> {
    /// Cancel any gesture, then switch the active image.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ImageIndexOutOfRange`] for a bad index. The
    /// gesture is cancelled either way.
    pub fn set_active_image(&mut self, index: usize) -> Result<Vec<Action>, StoreError> {
        let mut actions = self.reset();
        self.store.set_active_image(index)?;
        actions.push(Action::ActiveChanged(None));
        actions.push(Action::HighlightChanged(None));
        Ok(actions)
    }
}

impl Default for EngineCore<MemoryStore> {
    fn default() -> Self {
        Self::new(MemoryStore::new(), EngineSettings::default())
    }
}

fn log_store_error(err: &StoreError, rect_id: RectId) {
    warn!(%err, %rect_id, "store rejected write");
}

/// The full canvas engine. Wraps `EngineCore` and owns the browser canvas element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    pub core: EngineCore<MemoryStore>,
    width_css: f64,
    height_css: f64,
    dpr: f64,
}

impl Engine {
    /// Create a new engine bound to the given canvas element.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement, store: MemoryStore, settings: EngineSettings) -> Self {
        let width_css = f64::from(canvas.width());
        let height_css = f64::from(canvas.height());
        Self { canvas, core: EngineCore::new(store, settings), width_css, height_css, dpr: 1.0 }
    }

    // --- Viewport ---

    /// Update canvas dimensions (CSS pixels) and device pixel ratio.
    pub fn set_canvas_size(&mut self, width_css: f64, height_css: f64, dpr: f64) {
        self.width_css = width_css;
        self.height_css = height_css;
        self.dpr = dpr;
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.core.set_viewport(viewport);
    }

    // --- Delegated input events ---

    pub fn on_pointer_down(&mut self, event: PointerEvent) -> Vec<Action> {
        self.core.on_pointer_down(event)
    }

    pub fn on_pointer_move(&mut self, event: PointerEvent) -> Vec<Action> {
        self.core.on_pointer_move(event)
    }

    pub fn on_pointer_up(&mut self, event: PointerEvent) -> Vec<Action> {
        self.core.on_pointer_up(event)
    }

    pub fn reset(&mut self) -> Vec<Action> {
        self.core.reset()
    }

    /// # Errors
    ///
    /// See [`EngineCore::set_active_image`].
    pub fn set_active_image(&mut self, index: usize) -> Result<Vec<Action>, StoreError> {
        self.core.set_active_image(index)
    }

    // --- Render ---

    /// Draw the current state to the canvas.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the 2D context is unavailable or a `Canvas2D` call fails.
    pub fn render(&self) -> Result<(), JsValue> {
        let ctx = self
            .canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| JsValue::from_str("context is not a CanvasRenderingContext2d"))?;
        paint::paint(&ctx, &self.core.scene(), self.width_css, self.height_css, self.dpr)
    }

    // --- Delegated queries ---

    #[must_use]
    pub fn cursor(&self) -> CursorHint {
        self.core.cursor()
    }

    #[must_use]
    pub fn store(&self) -> &MemoryStore {
        &self.core.store
    }
}
