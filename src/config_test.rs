#![allow(clippy::float_cmp)]

use std::io::Read;

use uuid::Uuid;

use super::*;

/// Write `contents` to a fresh file under the system temp dir.
fn temp_file(contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("rectedit-{}.json", Uuid::new_v4()));
    fs::write(&path, contents).unwrap();
    path
}

fn config(scene: PathBuf) -> ReplayConfig {
    ReplayConfig { scene, events: EventSource::Stdin, settings: None }
}

#[test]
fn dash_means_stdin() {
    assert_eq!(EventSource::parse("-"), EventSource::Stdin);
    assert_eq!(EventSource::parse("events.jsonl"), EventSource::File(PathBuf::from("events.jsonl")));
}

#[test]
fn load_scene_reads_store() {
    let path = temp_file(r#"{"store":{"images":[],"first_label_created":true}}"#);
    let scene = config(path.clone()).load_scene().unwrap();
    assert!(scene.store.first_label_created);
    fs::remove_file(path).unwrap();
}

#[test]
fn missing_scene_is_io_error() {
    let path = std::env::temp_dir().join(format!("rectedit-missing-{}.json", Uuid::new_v4()));
    let err = config(path).load_scene().unwrap_err();
    assert!(matches!(err, ReplayError::Io { .. }));
}

#[test]
fn malformed_scene_names_the_file() {
    let path = temp_file("{ nope");
    let err = config(path.clone()).load_scene().unwrap_err();
    assert!(matches!(err, ReplayError::Scene { .. }));
    assert!(err.to_string().contains(&path.display().to_string()));
    fs::remove_file(path).unwrap();
}

#[test]
fn settings_default_without_file() {
    let settings = config(PathBuf::from("unused.json")).load_settings().unwrap();
    assert_eq!(settings, EngineSettings::default());
}

#[test]
fn settings_file_is_validated() {
    let good = temp_file(r#"{"anchor_hover_size": 12}"#);
    let bad = temp_file(r#"{"fill_alpha": 3}"#);

    let mut cfg = config(PathBuf::from("unused.json"));
    cfg.settings = Some(good.clone());
    assert_eq!(cfg.load_settings().unwrap().anchor_hover_size, 12.0);

    cfg.settings = Some(bad.clone());
    assert!(matches!(cfg.load_settings().unwrap_err(), ReplayError::Settings(_)));

    fs::remove_file(good).unwrap();
    fs::remove_file(bad).unwrap();
}

#[test]
fn open_events_reads_file() {
    let path = temp_file("{\"type\":\"reset\"}\n");
    let mut cfg = config(PathBuf::from("unused.json"));
    cfg.events = EventSource::File(path.clone());

    let mut text = String::new();
    cfg.open_events().unwrap().read_to_string(&mut text).unwrap();
    assert_eq!(text, "{\"type\":\"reset\"}\n");
    fs::remove_file(path).unwrap();
}

#[test]
fn open_missing_events_is_io_error() {
    let mut cfg = config(PathBuf::from("unused.json"));
    cfg.events = EventSource::File(std::env::temp_dir().join(format!("rectedit-none-{}", Uuid::new_v4())));
    assert!(matches!(cfg.open_events().map(|_| ()).unwrap_err(), ReplayError::Io { .. }));
}
