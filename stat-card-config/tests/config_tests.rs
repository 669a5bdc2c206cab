//! Integration tests for stat-card-config loading and validation.

use stat_card_config::{Config, ConfigError, LogLevel};

#[test]
fn test_partial_yaml_keeps_defaults() {
    let yaml = "font_host: https://cards.example.com\nfetch_timeout_secs: 3\n";
    let config = Config::from_yaml(yaml).expect("parse partial config");

    assert_eq!(config.font_host, "https://cards.example.com");
    assert_eq!(config.fetch_timeout_secs, 3);
    assert_eq!(config.max_bundle_bytes, 20 * 1024 * 1024);
    assert_eq!(config.user_agent, "stat-card");
    assert!(config.language_fonts.is_empty());
}

#[test]
fn test_language_fonts_and_log_level() {
    let yaml = r#"
log_level: debug
language_fonts:
  zh:
    - NotoSansSC
  symbol:
    - Noto Sans Symbols
    - Noto Sans Symbols 2
  unknown: []
"#;
    let config = Config::from_yaml(yaml).expect("parse config");

    assert_eq!(config.log_level, LogLevel::Debug);
    assert_eq!(config.log_level.to_level_filter(), log::LevelFilter::Debug);
    assert_eq!(config.language_fonts["zh"], vec!["NotoSansSC".to_string()]);
    assert_eq!(config.language_fonts["symbol"].len(), 2);
    assert!(config.language_fonts["unknown"].is_empty());
}

#[test]
fn test_invalid_yaml_is_parse_error() {
    let err = Config::from_yaml("fetch_timeout_secs: [not, a, number]").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
    assert!(err.to_string().contains("YAML parse error"));
}

#[test]
fn test_unknown_log_level_is_parse_error() {
    assert!(Config::from_yaml("log_level: verbose").is_err());
}

#[test]
fn test_load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "font_host: http://127.0.0.1:8080\nmax_bundle_bytes: 1024\n").unwrap();

    let config = Config::load_from(&path).expect("load config");
    assert_eq!(config.max_bundle_bytes, 1024);
    assert!(config.font_host.starts_with("http"));
}

#[test]
fn test_load_from_rejects_invalid_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "max_bundle_bytes: 0\n").unwrap();

    let err = Config::load_from(&path).unwrap_err();
    let cfg_err = err
        .downcast_ref::<ConfigError>()
        .expect("typed config error");
    assert!(matches!(cfg_err, ConfigError::Validation(_)));
}

#[test]
fn test_load_from_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Config::load_from(&dir.path().join("absent.yaml")).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::Io(_))
    ));
}

#[test]
fn test_config_path_layout() {
    let path = Config::config_path();
    assert!(path.ends_with("config.yaml"));
    assert_eq!(path.parent(), Some(Config::config_dir().as_path()));
}
