//! Tests for declarative TOML configuration.

use mtlog::{Config, Level};

#[test]
fn empty_document_yields_defaults() {
    let config = Config::from_toml("").unwrap();
    assert_eq!(config.parse_level().unwrap(), Level::Information);
    assert!(config.console.enabled);
    assert!(!config.console.stdout);
    assert!(config.selflog.target.is_empty());
    assert_eq!(config.type_name.cache_size, None);
}

#[test]
fn partial_document_overrides_only_named_keys() {
    let config = Config::from_toml(
        r#"
        [general]
        level = "debug"

        [capture]
        max_depth = 2
        "#,
    )
    .unwrap();
    assert_eq!(config.parse_level().unwrap(), Level::Debug);
    assert_eq!(config.capture.max_depth, 2);
    // Untouched sections keep their defaults.
    assert!(config.console.enabled);
    assert_eq!(config.capture.max_collection_len, 100);
}

#[test]
fn level_aliases_parse() {
    for (text, level) in [
        ("info", Level::Information),
        ("warn", Level::Warning),
        ("trace", Level::Verbose),
        ("fatal", Level::Fatal),
    ] {
        let config =
            Config::from_toml(&format!("[general]\nlevel = \"{text}\"")).unwrap();
        assert_eq!(config.parse_level().unwrap(), level);
    }
}

#[test]
fn unknown_level_fails_at_build() {
    let config = Config::from_toml("[general]\nlevel = \"loud\"").unwrap();
    assert!(config.build_logger().is_err());
}

#[test]
fn invalid_toml_is_a_parse_error() {
    assert!(Config::from_toml("general = [").is_err());
}

#[test]
fn built_logger_honors_configured_minimum() {
    let config = Config::from_toml(
        r#"
        [general]
        level = "warning"

        [console]
        enabled = false
        "#,
    )
    .unwrap();
    let logger = config.build_logger().unwrap();
    assert_eq!(logger.minimum_level(), Level::Warning);
    assert!(!logger.is_enabled(Level::Information));
}

#[test]
fn enricher_toggles_are_applied() {
    let config = Config::from_toml(
        r#"
        [console]
        enabled = false

        [enrich]
        machine_name = true
        process_info = true
        "#,
    )
    .unwrap();
    // Builds without error; enrichment itself is covered by pipeline tests.
    assert!(config.build_logger().is_ok());
}

#[test]
fn type_name_cache_size_is_applied() {
    let config = Config::from_toml(
        r#"
        [console]
        enabled = false

        [type_name]
        cache_size = 512
        "#,
    )
    .unwrap();
    assert_eq!(config.type_name.cache_size, Some(512));
    let _ = config.build_logger().unwrap();
    assert_eq!(mtlog::typename::type_name_cache_capacity(), 512);
}

#[test]
fn zero_capture_depth_is_rejected_at_build() {
    let config = Config::from_toml("[capture]\nmax_depth = 0").unwrap();
    assert!(config.build_logger().is_err());
}
