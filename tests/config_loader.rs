use std::fs;
use std::time::Duration;

use framebind::config::{Config, ConfigError, MAX_FPS};
use tempfile::TempDir;

fn write_config(content: &str) -> (TempDir, std::path::PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("config.toml");
    fs::write(&path, content).expect("Failed to write config");
    (temp_dir, path)
}

/// Test that Config::default() produces the documented values.
#[test]
fn test_config_default_values() {
    let config = Config::default();

    assert_eq!(config.frames.fps, 60);
    assert_eq!(config.logging.level, "info");
    assert!(config.logging.file.is_none());

    assert_eq!(config.host.tag(), "x-counter");
    assert_eq!(config.host.attribute("start"), Some("0"));
    assert_eq!(config.host.attribute("step"), Some("1"));
}

#[test]
fn test_config_path_ends_with_expected() {
    let path = Config::config_path();
    assert!(path.ends_with("framebind/config.toml"));
}

/// A missing file is not an error.
#[test]
fn test_missing_file_yields_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::load_from(&temp_dir.path().join("absent.toml")).unwrap();
    assert_eq!(config.frames.fps, 60);
}

#[test]
fn test_partial_file_keeps_other_defaults() {
    let (_dir, path) = write_config(
        r#"
[frames]
fps = 30
"#,
    );

    let config = Config::load_from(&path).unwrap();

    assert_eq!(config.frames.fps, 30);
    assert_eq!(config.frames.interval(), Duration::from_micros(33_333));
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.host.attribute("step"), Some("1"));
}

#[test]
fn test_full_file_round_trips_host_attributes() {
    let (_dir, path) = write_config(
        r#"
[frames]
fps = 120

[logging]
level = "framebind=trace"
file = "/tmp/framebind.log"

[host]
tag = "x-clicker"

[host.attributes]
start = "-3"
step = "5"
"#,
    );

    let config = Config::load_from(&path).unwrap();

    assert_eq!(config.frames.fps, 120);
    assert_eq!(config.logging.level, "framebind=trace");
    assert_eq!(
        config.logging.file.as_deref(),
        Some(std::path::Path::new("/tmp/framebind.log"))
    );
    assert_eq!(config.host.tag(), "x-clicker");
    assert_eq!(config.host.parse_attribute::<i64>("start"), Some(-3));
    assert_eq!(config.host.parse_attribute::<i64>("step"), Some(5));
}

#[test]
fn test_malformed_toml_is_a_parse_error() {
    let (_dir, path) = write_config("[frames\nfps = 30");

    match Config::load_from(&path) {
        Err(ConfigError::Parse { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("Expected Parse, got {:?}", other),
    }
}

#[test]
fn test_validation_rejects_out_of_range_fps() {
    for fps in [0, MAX_FPS + 1] {
        let mut config = Config::default();
        config.frames.fps = fps;

        match config.validate() {
            Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, "frames.fps"),
            other => panic!("Expected Invalid for {fps}, got {:?}", other),
        }
    }
}

#[test]
fn test_validation_rejects_bad_log_level() {
    let (_dir, path) = write_config(
        r#"
[logging]
level = "framebind=loudest"
"#,
    );

    match Config::load_from(&path) {
        Err(err @ ConfigError::Invalid { .. }) => {
            assert_eq!(err.to_string().split(':').next(), Some("invalid logging.level"));
        }
        other => panic!("Expected Invalid, got {:?}", other),
    }
}
