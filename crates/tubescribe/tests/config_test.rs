//! Tests for configuration loading.

use std::io::Write;
use tubescribe::{ObservabilityConfig, TubescribeConfig};

#[test]
fn test_bundled_defaults() {
    let config = TubescribeConfig::bundled().expect("bundled config parses");

    assert_eq!(config.server().name(), "tubescribe");
    assert!(*config.cache().single_flight());
    assert_eq!(*config.entitlement().recording().max_retries(), 3);
    assert_eq!(*config.entitlement().recording().initial_backoff_ms(), 200);
    assert_eq!(*config.entitlement().recording().max_backoff_ms(), 5_000);
    assert_eq!(
        config
            .entitlement()
            .feature_names()
            .get("generate-image")
            .map(String::as_str),
        Some("image generation")
    );
    assert_eq!(config.logging().level(), "info");
    assert!(!*config.logging().json());
}

#[test]
fn test_from_file_fills_missing_sections() {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("temp file");
    writeln!(
        file,
        r#"
[cache]
single_flight = false

[entitlement.recording]
max_retries = 7

[logging]
json = true
"#
    )
    .expect("write config");

    let config = TubescribeConfig::from_file(file.path()).expect("config parses");

    assert!(!*config.cache().single_flight());
    assert_eq!(*config.entitlement().recording().max_retries(), 7);
    assert_eq!(*config.entitlement().recording().initial_backoff_ms(), 200);
    assert!(*config.logging().json());
    assert_eq!(config.logging().level(), "info");
    assert_eq!(config.server().name(), "tubescribe");
}

#[test]
fn test_from_file_missing_is_config_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = TubescribeConfig::from_file(dir.path().join("absent.toml"))
        .expect_err("missing file");

    assert!(err.to_string().contains("Failed to read configuration"));
}

#[test]
fn test_from_file_bad_type_is_config_error() {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("temp file");
    writeln!(file, "[cache]\nsingle_flight = \"sometimes\"").expect("write config");

    let err = TubescribeConfig::from_file(file.path()).expect_err("bad type");

    assert!(err.to_string().contains("Failed to parse configuration"));
}

#[test]
fn test_load_layers_bundled_defaults() {
    // User files and environment may add to this, but the bundled layer
    // guarantees a complete configuration
    let config = TubescribeConfig::load().expect("layered config");
    assert!(!config.server().name().is_empty());
}

#[test]
fn test_observability_config_from_logging() {
    let config = TubescribeConfig::bundled().expect("bundled config parses");
    let obs = ObservabilityConfig::from_logging("tubescribe", config.logging());

    assert_eq!(obs.service_name, "tubescribe");
    assert_eq!(obs.log_level, "info");
    assert!(!obs.json_logs);
}
