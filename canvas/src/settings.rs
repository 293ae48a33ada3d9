//! Engine tunables: handle sizes, hit tolerances and colors.
//!
//! Defaults come from [`crate::consts`]. Hosts can override any subset from
//! JSON; missing keys keep their defaults.

#[cfg(test)]
#[path = "settings_test.rs"]
mod settings_test;

use serde::{Deserialize, Serialize};

use crate::consts::{
    ACTIVE_LINE_COLOR, ANCHOR_COLOR, ANCHOR_HOVER_SIZE_PX, ANCHOR_SIZE_PX, FILL_ALPHA, INACTIVE_LINE_COLOR, LABEL_COLORS,
    LINE_THICKNESS_PX,
};
use crate::render::Color;

/// Errors from loading or validating [`EngineSettings`].
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },
    #[error("fill_alpha must be within [0, 1], got {0}")]
    AlphaOutOfRange(f64),
    #[error("{field} is not a #RRGGBB color: {value:?}")]
    BadColor { field: &'static str, value: String },
    #[error("label_colors must not be empty")]
    EmptyPalette,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Side of a drawn anchor handle, in viewport pixels.
    pub anchor_size: f64,
    /// Side of an anchor's hover box and twice the edge band thickness.
    pub anchor_hover_size: f64,
    pub line_thickness: f64,
    pub fill_alpha: f64,
    pub active_line_color: String,
    pub inactive_line_color: String,
    pub anchor_color: String,
    /// Palette indexed by label name position.
    pub label_colors: Vec<String>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            anchor_size: ANCHOR_SIZE_PX,
            anchor_hover_size: ANCHOR_HOVER_SIZE_PX,
            line_thickness: LINE_THICKNESS_PX,
            fill_alpha: FILL_ALPHA,
            active_line_color: ACTIVE_LINE_COLOR.to_owned(),
            inactive_line_color: INACTIVE_LINE_COLOR.to_owned(),
            anchor_color: ANCHOR_COLOR.to_owned(),
            label_colors: LABEL_COLORS.iter().map(|c| (*c).to_owned()).collect(),
        }
    }
}

impl EngineSettings {
    /// Parse settings from JSON and validate them.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] if the JSON is malformed or a value is invalid.
    pub fn from_json_str(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check sizes, alpha, and colors.
    ///
    /// # Errors
    ///
    /// Returns the first invalid value found.
    pub fn validate(&self) -> Result<(), SettingsError> {
        for (field, value) in [
            ("anchor_size", self.anchor_size),
            ("anchor_hover_size", self.anchor_hover_size),
            ("line_thickness", self.line_thickness),
        ] {
            if value.is_nan() || value <= 0.0 {
                return Err(SettingsError::NonPositive { field, value });
            }
        }
        if !(0.0..=1.0).contains(&self.fill_alpha) {
            return Err(SettingsError::AlphaOutOfRange(self.fill_alpha));
        }
        for (field, value) in [
            ("active_line_color", &self.active_line_color),
            ("inactive_line_color", &self.inactive_line_color),
            ("anchor_color", &self.anchor_color),
        ] {
            check_color(field, value)?;
        }
        if self.label_colors.is_empty() {
            return Err(SettingsError::EmptyPalette);
        }
        for value in &self.label_colors {
            check_color("label_colors", value)?;
        }
        Ok(())
    }
}

fn check_color(field: &'static str, value: &str) -> Result<(), SettingsError> {
    match Color::from_hex(value) {
        Some(_) => Ok(()),
        None => Err(SettingsError::BadColor { field, value: value.to_owned() }),
    }
}
