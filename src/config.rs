//! Replay configuration.
//!
//! DESIGN
//! ======
//! Paths arrive from clap (flags with `RECTEDIT_*` env fallbacks, see
//! `main.rs`). This module only resolves them into loaded values so the
//! loading rules can be tested without a process boundary.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use rect_canvas::settings::EngineSettings;

use crate::error::ReplayError;
use crate::scene::SceneFile;

/// Where the pointer script is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventSource {
    Stdin,
    File(PathBuf),
}

impl EventSource {
    /// `-` means stdin; anything else is a path.
    #[must_use]
    pub fn parse(arg: &str) -> Self {
        if arg == "-" { Self::Stdin } else { Self::File(PathBuf::from(arg)) }
    }
}

#[derive(Debug, Clone)]
pub struct ReplayConfig {
    pub scene: PathBuf,
    pub events: EventSource,
    pub settings: Option<PathBuf>,
}

impl ReplayConfig {
    /// # Errors
    ///
    /// Fails if the scene file cannot be read or is not a valid scene.
    pub fn load_scene(&self) -> Result<SceneFile, ReplayError> {
        let text = read_file(&self.scene)?;
        serde_json::from_str(&text).map_err(|source| ReplayError::Scene { path: display(&self.scene), source })
    }

    /// Engine settings from the settings file, or the defaults when none is given.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or holds invalid settings.
    pub fn load_settings(&self) -> Result<EngineSettings, ReplayError> {
        match &self.settings {
            Some(path) => Ok(EngineSettings::from_json_str(&read_file(path)?)?),
            None => Ok(EngineSettings::default()),
        }
    }

    /// # Errors
    ///
    /// Fails if the event file cannot be opened.
    pub fn open_events(&self) -> Result<Box<dyn BufRead>, ReplayError> {
        match &self.events {
            EventSource::Stdin => Ok(Box::new(BufReader::new(io::stdin()))),
            EventSource::File(path) => {
                let file = File::open(path).map_err(|source| ReplayError::Io { path: display(path), source })?;
                Ok(Box::new(BufReader::new(file)))
            }
        }
    }
}

fn read_file(path: &Path) -> Result<String, ReplayError> {
    fs::read_to_string(path).map_err(|source| ReplayError::Io { path: display(path), source })
}

fn display(path: &Path) -> String {
    path.display().to_string()
}
