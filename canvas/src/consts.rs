//! Shared numeric constants for the canvas crate.

// ── Math ────────────────────────────────────────────────────────

/// π / 2 (90°): offset between the x-axis and the vertical rotation reference.
pub const FRAC_PI_2: f64 = std::f64::consts::FRAC_PI_2;

// ── Hit-testing ─────────────────────────────────────────────────

/// Side length of a drawn anchor handle, in screen pixels.
pub const ANCHOR_SIZE_PX: f64 = 8.0;

/// Side length of the box around an anchor that counts as "on the handle", in
/// screen pixels. Half of it is also the thickness of each side of the edge band.
pub const ANCHOR_HOVER_SIZE_PX: f64 = 20.0;

// ── Drawing ─────────────────────────────────────────────────────

/// Outline thickness for label rects, in screen pixels.
pub const LINE_THICKNESS_PX: f64 = 2.0;

/// Opacity of the rect fill relative to its line color.
pub const FILL_ALPHA: f64 = 0.2;

/// Outline color for active (or highlighted) rects without a label.
pub const ACTIVE_LINE_COLOR: &str = "#FFFFFF";

/// Outline color for inactive rects without a label.
pub const INACTIVE_LINE_COLOR: &str = "#FFFF00";

/// Fill color of anchor handles on the active rect.
pub const ANCHOR_COLOR: &str = "#FFFFFF";

/// Default per-label palette.
pub const LABEL_COLORS: [&str; 8] = [
    "#FF3838", "#FF9D97", "#FF701F", "#FFB21D", "#CFD231", "#48F90A", "#92CC17", "#3DDB86",
];
