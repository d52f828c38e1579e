#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::fs;
use std::path::{Path, PathBuf};

use serial_test::serial;
use tempfile::TempDir;

use super::*;

fn write_config(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("config.toml");
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn defaults_without_path() {
    let cfg = Config::load_from(None);
    assert_eq!(cfg, Config::default());
    assert_eq!(cfg.search_base_url, DEFAULT_SEARCH_URL);
    assert_eq!(cfg.export_file, PathBuf::from("dork_history.txt"));
    assert!(cfg.history_path.is_none());
}

#[test]
fn missing_file_gives_defaults() {
    let dir = TempDir::new().unwrap();
    let cfg = Config::load_from(Some(dir.path().join("nope.toml").as_path()));
    assert_eq!(cfg, Config::default());
}

#[test]
fn full_file_overrides_everything() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
[history]
path = "/data/dorks.json"
export_file = "out.txt"

[search]
base_url = "https://search.example/find"
"#,
    );
    let cfg = Config::load_from(Some(path.as_path()));
    assert_eq!(cfg.history_path, Some(PathBuf::from("/data/dorks.json")));
    assert_eq!(cfg.export_file, PathBuf::from("out.txt"));
    assert_eq!(cfg.search_base_url, "https://search.example/find");
}

#[test]
fn partial_file_keeps_other_defaults() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[search]\nbase_url = \"https://x.test/s\"\n");
    let cfg = Config::load_from(Some(path.as_path()));
    assert_eq!(cfg.search_base_url, "https://x.test/s");
    assert_eq!(cfg.export_file, PathBuf::from("dork_history.txt"));
    assert!(cfg.history_path.is_none());
}

#[test]
fn invalid_toml_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[history\npath = ");
    assert_eq!(Config::load_from(Some(path.as_path())), Config::default());
}

#[test]
fn unknown_key_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[history]\nretention = 3\n");
    assert_eq!(Config::load_from(Some(path.as_path())), Config::default());
}

#[test]
fn read_config_file_reports_parse_errors_with_path() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "not = [valid");
    let err = read_config_file(&path).err().expect("parse error");
    assert!(format!("{err:#}").contains("config.toml"));
}

// --- history_file ---

#[test]
fn explicit_history_path_wins() {
    let cfg = Config {
        history_path: Some(PathBuf::from("/from/config.json")),
        ..Config::default()
    };
    assert_eq!(
        cfg.history_file(Some(Path::new("/from/flag.json"))),
        Some(PathBuf::from("/from/flag.json"))
    );
}

#[test]
fn config_history_path_beats_default() {
    let cfg = Config {
        history_path: Some(PathBuf::from("/from/config.json")),
        ..Config::default()
    };
    assert_eq!(
        cfg.history_file(None),
        Some(PathBuf::from("/from/config.json"))
    );
}

#[test]
#[serial]
fn default_history_path_uses_gdork_home() {
    // SAFETY: test-only env mutation; #[serial] prevents races.
    unsafe { std::env::set_var(crate::paths::HOME_ENV, "/home/test/gdork") };
    let path = Config::default().history_file(None);
    unsafe { std::env::remove_var(crate::paths::HOME_ENV) };
    assert_eq!(path, Some(PathBuf::from("/home/test/gdork/history.json")));
}
