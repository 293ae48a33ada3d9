//! Painting: replays a [`Scene`] onto a 2D context.
//!
//! This module is the only place that touches [`web_sys::CanvasRenderingContext2d`].
//! It holds no state and makes no decisions; everything it draws was decided
//! by [`crate::render::draw`].
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`crate::engine::Engine::render`]) handles the result.

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::geom::Rect;
use crate::render::{DrawCommand, Scene};

/// Clear the canvas and draw every command in order.
///
/// `width_css` and `height_css` are in CSS pixels. `dpr` is the device pixel ratio.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails (e.g. invalid context state).
pub fn paint(
    ctx: &CanvasRenderingContext2d,
    scene: &Scene,
    width_css: f64,
    height_css: f64,
    dpr: f64,
) -> Result<(), JsValue> {
    ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)?;
    ctx.clear_rect(0.0, 0.0, width_css, height_css);

    for command in &scene.commands {
        match command {
            DrawCommand::FillRect { rect, color } => {
                ctx.save();
                translate_and_rotate(ctx, rect)?;
                ctx.set_fill_style_str(color);
                ctx.fill_rect(-rect.width / 2.0, -rect.height / 2.0, rect.width, rect.height);
                ctx.restore();
            }
            DrawCommand::StrokeRect { rect, color, thickness } => {
                ctx.save();
                translate_and_rotate(ctx, rect)?;
                ctx.set_stroke_style_str(color);
                ctx.set_line_width(*thickness);
                ctx.stroke_rect(-rect.width / 2.0, -rect.height / 2.0, rect.width, rect.height);
                ctx.restore();
            }
        }
    }
    Ok(())
}

/// Move the origin to the rect center and apply its rotation (radians).
fn translate_and_rotate(ctx: &CanvasRenderingContext2d, rect: &Rect) -> Result<(), JsValue> {
    let center = rect.center();
    ctx.translate(center.x, center.y)?;
    ctx.rotate(rect.rotation)?;
    Ok(())
}
