//! Interactive rectangle transform engine for image annotation.
//!
//! The engine turns a stream of pointer events over a displayed image into
//! committed rectangle edits: create, move, resize and rotate. It owns only the
//! transient gesture state; the annotation collections live behind the
//! [`doc::AnnotationStore`] port so the engine can run against any host store
//! (and against [`doc::MemoryStore`] in tests and the replay tool).
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`geom`] | Pure point/rect math: containment, overlap, anchors, resize, rotation |
//! | [`viewport`] | Content-space ↔ viewport-space conversion and pointer snapping |
//! | [`doc`] | Label rects, per-image collections and the store port |
//! | [`hit`] | Interior/edge band and anchor hit-testing with explicit precedence |
//! | [`input`] | Pointer events, cursor hints and the gesture state machine |
//! | [`engine`] | Testable [`engine::EngineCore`] plus the browser-bound [`engine::Engine`] |
//! | [`render`] | Pure scene building: draw commands and cursor hint |
//! | [`paint`] | Paints a scene onto a `CanvasRenderingContext2d` |
//! | [`settings`] | Tunable sizes, tolerances and colors |
//! | [`consts`] | Shared numeric defaults |

pub mod consts;
pub mod doc;
pub mod engine;
pub mod geom;
pub mod hit;
pub mod input;
pub mod paint;
pub mod render;
pub mod settings;
pub mod viewport;
