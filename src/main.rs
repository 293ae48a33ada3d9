//! rectedit: headless driver for the rect-canvas engine.
//!
//! DESIGN
//! ======
//! Loads a scene (annotation store plus viewport), replays a JSON-lines
//! pointer script through `EngineCore`, and prints JSON to stdout: the
//! updated scene for `replay`, or the final frame's draw commands for
//! `render`. Logs go to stderr so stdout stays machine-readable.

mod config;
mod error;
mod scene;
mod script;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rect_canvas::engine::{Action, EngineCore};
use serde::Serialize;

use crate::config::{EventSource, ReplayConfig};
use crate::error::ReplayError;
use crate::scene::SceneFile;

#[derive(Parser, Debug)]
#[command(name = "rectedit", about = "Replay pointer scripts against a rect annotation scene")]
struct Cli {
    /// Scene JSON: `{"store": ..., "viewport": ...}`.
    #[arg(long, env = "RECTEDIT_SCENE")]
    scene: PathBuf,

    /// JSON-lines pointer script, or `-` for stdin.
    #[arg(long, env = "RECTEDIT_EVENTS", default_value = "-")]
    events: String,

    /// Engine settings JSON. Defaults apply when omitted.
    #[arg(long, env = "RECTEDIT_SETTINGS")]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the scene after the script ran.
    Replay,
    /// Print the draw commands and cursor for the last frame.
    Render,
}

fn main() -> Result<(), ReplayError> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let config = ReplayConfig { scene: cli.scene, events: EventSource::parse(&cli.events), settings: cli.settings };

    let scene = config.load_scene()?;
    let settings = config.load_settings()?;
    let events = script::parse_script(config.open_events()?)?;

    let viewport = scene.viewport_or_identity();
    let mut core = EngineCore::new(scene.store, settings);
    if let Some(viewport) = viewport {
        core.set_viewport(viewport);
    }

    let actions = script::replay(&mut core, &events)?;
    let created = actions.iter().filter(|a| matches!(a, Action::RectCreated { .. })).count();
    let updated = actions.iter().filter(|a| matches!(a, Action::RectUpdated { .. })).count();
    let rejected = actions.iter().filter(|a| matches!(a, Action::CreateRejected { .. })).count();
    tracing::info!(events = events.len(), created, updated, rejected, state = core.state.name(), "replay finished");

    match cli.command {
        Command::Replay => print_json(&SceneFile { viewport: core.viewport, store: core.store }),
        Command::Render => print_json(&core.scene()),
    }
}

fn print_json(value: &impl Serialize) -> Result<(), ReplayError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
