//! Tests for config functionality.

use crate::config::Config;
use crate::error::SetupError;
use tempfile::TempDir;

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.dsub_command, "dsub");
    assert_eq!(config.zones, "us-central1-*");
    assert_eq!(config.remote_prefix, "dsub/py");
    assert_eq!(config.boot_disk_size, None);
    assert_eq!(config.disk_size, None);
    assert!(config.events_log);
}

#[test]
fn test_parse_minimal_yaml() {
    let config = Config::from_yaml("").unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_parse_partial_yaml() {
    let yaml = r#"
zones: "us-east1-*"
disk_size: 200
"#;
    let config = Config::from_yaml(yaml).unwrap();

    assert_eq!(config.zones, "us-east1-*");
    assert_eq!(config.disk_size, Some(200));

    assert_eq!(config.dsub_command, "dsub");
    assert_eq!(config.remote_prefix, "dsub/py");
}

#[test]
fn test_parse_full_yaml() {
    let yaml = r#"
dsub_command: "python -m dsub"
zones: "europe-west1-*"
boot_disk_size: 20
disk_size: 100
remote_prefix: "ci/dsub"
events_log: false
"#;
    let config = Config::from_yaml(yaml).unwrap();

    assert_eq!(config.dsub_command, "python -m dsub");
    assert_eq!(config.zones, "europe-west1-*");
    assert_eq!(config.boot_disk_size, Some(20));
    assert_eq!(config.disk_size, Some(100));
    assert_eq!(config.remote_prefix, "ci/dsub");
    assert!(!config.events_log);
}

#[test]
fn test_parse_yaml_with_unknown_fields() {
    let yaml = r#"
zones: "us-west1-*"
future_setting: true
nested:
  key: value
"#;
    let config = Config::from_yaml(yaml).unwrap();
    assert_eq!(config.zones, "us-west1-*");
}

#[test]
fn test_parse_invalid_yaml() {
    let err = Config::from_yaml("disk_size: [not, a, number]").unwrap_err();
    assert!(matches!(err, SetupError::ConfigError(_)));
    assert!(err.to_string().contains("failed to parse config YAML"));
}

#[test]
fn test_validate_empty_command() {
    let err = Config::from_yaml("dsub_command: \"  \"").unwrap_err();
    assert!(err.to_string().contains("dsub_command"));
}

#[test]
fn test_validate_empty_zones() {
    let err = Config::from_yaml("zones: \"\"").unwrap_err();
    assert!(err.to_string().contains("zones"));
}

#[test]
fn test_validate_remote_prefix_slashes() {
    let err = Config::from_yaml("remote_prefix: \"/dsub/py/\"").unwrap_err();
    assert!(err.to_string().contains("Use 'dsub/py' instead"));

    let err = Config::from_yaml("remote_prefix: \"\"").unwrap_err();
    assert!(err.to_string().contains("remote_prefix must not be empty"));
}

#[test]
fn test_validate_zero_disk_size() {
    let err = Config::from_yaml("boot_disk_size: 0").unwrap_err();
    assert!(err.to_string().contains("boot_disk_size must be greater than 0"));

    let err = Config::from_yaml("disk_size: 0").unwrap_err();
    assert!(err.to_string().contains("disk_size must be greater than 0"));
}

#[test]
fn test_to_yaml_round_trip() {
    let config = Config {
        disk_size: Some(50),
        ..Config::default()
    };
    let yaml = config.to_yaml().unwrap();

    assert!(yaml.contains("disk_size: 50"));
    assert!(!yaml.contains("boot_disk_size"));
    assert_eq!(Config::from_yaml(&yaml).unwrap(), config);
}

#[test]
fn test_config_load_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("dsub-e2e.yaml");
    std::fs::write(&path, "zones: \"asia-east1-*\"\n").unwrap();

    let config = Config::load(&path).unwrap();
    assert_eq!(config.zones, "asia-east1-*");
}

#[test]
fn test_config_load_missing_file() {
    let err = Config::load("/nonexistent/dsub-e2e.yaml").unwrap_err();
    assert!(matches!(err, SetupError::ConfigError(_)));
}

#[test]
fn test_resolve_explicit_path_must_exist() {
    let temp_dir = TempDir::new().unwrap();
    let err = Config::resolve(Some(&temp_dir.path().join("missing.yaml"))).unwrap_err();
    assert!(err.to_string().contains("failed to read config file"));
}
