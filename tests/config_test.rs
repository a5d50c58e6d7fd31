//! Configuration loading tests
//!
//! Tests that reader configuration loads correctly and that missing or
//! out-of-range settings fall back to unset.

use saycmd::config::Config;
use std::io::Write;

#[test]
fn test_config_loads_successfully() {
    // Load or create config in the home directory
    let config = Config::load().expect("Failed to load config");

    // Test that config path is available
    assert!(config.path().to_str().unwrap().contains(".saycmd.cfg"));

    // Settings are all optional; just verify the accessors work
    let _ = config.voice();
    let _ = config.rate();
    let _ = config.volume();
}

#[test]
fn test_first_load_creates_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fresh.cfg");
    assert!(!path.exists());

    let config = Config::load_from(&path).expect("Failed to create config");
    assert!(path.exists());
    assert_eq!(config.voice(), None);
}

#[test]
fn test_configured_baseline_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("set.cfg");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "[speech]").unwrap();
    writeln!(file, "voice=David").unwrap();
    writeln!(file, "rate=65").unwrap();
    writeln!(file, "volume=80").unwrap();
    drop(file);

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.voice(), Some("David".to_string()));
    assert_eq!(config.rate(), Some(65));
    assert_eq!(config.volume(), Some(80));
}

#[test]
fn test_malformed_config_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.cfg");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "[speech").unwrap();
    drop(file);

    assert!(Config::load_from(&path).is_err());
}
