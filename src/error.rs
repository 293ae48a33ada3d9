//! Errors for the replay tool. Every variant names the input it came from.

use rect_canvas::doc::StoreError;
use rect_canvas::settings::SettingsError;

#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid scene {path}: {source}")]
    Scene {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid event on line {line}: {source}")]
    Event {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid settings: {0}")]
    Settings(#[from] SettingsError),
    #[error("event {index} rejected by store: {source}")]
    Store {
        index: usize,
        #[source]
        source: StoreError,
    },
    #[error("failed to encode output: {0}")]
    Output(#[from] serde_json::Error),
}
