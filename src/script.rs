//! Pointer scripts: JSON-lines event streams replayed against an engine.
//!
//! One event per line, tagged by `type`:
//!
//! ```text
//! {"type":"down","position":{"x":10,"y":10}}
//! {"type":"move","position":{"x":60,"y":40},"over_image":false}
//! {"type":"up","position":{"x":60,"y":40}}
//! ```
//!
//! Blank lines and lines starting with `#` are skipped.

#[cfg(test)]
#[path = "script_test.rs"]
mod script_test;

use std::io::BufRead;

use rect_canvas::doc::MemoryStore;
use rect_canvas::engine::{Action, EngineCore};
use rect_canvas::input::PointerEvent;
use rect_canvas::viewport::Viewport;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ReplayError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScriptEvent {
    Down(PointerEvent),
    Move(PointerEvent),
    Up(PointerEvent),
    /// Abandon any gesture in progress.
    Reset,
    /// The image was panned, zoomed or the canvas resized.
    Viewport(Viewport),
    ActiveImage { index: usize },
}

/// Parse a script. Line numbers in errors are 1-based.
///
/// # Errors
///
/// Fails on the first line that cannot be read or parsed.
pub fn parse_script(reader: impl BufRead) -> Result<Vec<ScriptEvent>, ReplayError> {
    let mut events = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| ReplayError::Io { path: format!("<events line {}>", i + 1), source })?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let event = serde_json::from_str(trimmed).map_err(|source| ReplayError::Event { line: i + 1, source })?;
        events.push(event);
    }
    Ok(events)
}

/// Feed `events` to `core` in order and collect every action it returns.
///
/// # Errors
///
/// Fails if an `active_image` event names an image the store does not hold.
pub fn replay(core: &mut EngineCore<MemoryStore>, events: &[ScriptEvent]) -> Result<Vec<Action>, ReplayError> {
    let mut all = Vec::new();
    for (index, event) in events.iter().enumerate() {
        let actions = match event {
            ScriptEvent::Down(e) => core.on_pointer_down(*e),
            ScriptEvent::Move(e) => core.on_pointer_move(*e),
            ScriptEvent::Up(e) => core.on_pointer_up(*e),
            ScriptEvent::Reset => core.reset(),
            ScriptEvent::Viewport(viewport) => {
                core.set_viewport(*viewport);
                Vec::new()
            }
            ScriptEvent::ActiveImage { index: image } => {
                core.set_active_image(*image).map_err(|source| ReplayError::Store { index, source })?
            }
        };
        for action in &actions {
            debug!(index, ?action, "action");
        }
        all.extend(actions);
    }
    Ok(all)
}
