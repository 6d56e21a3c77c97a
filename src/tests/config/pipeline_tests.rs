use crate::config::{AcquireConfig, ConfigError, HttpConfig};

#[test]
fn http_config_defaults() {
    let http = HttpConfig::default();
    assert!(http.proxy);
    assert_eq!(http.timeout_secs, Some(30));
    assert!(http.user_agent.as_deref().is_some_and(|a| a.starts_with("sourcewalk/")));
}

#[test]
fn unknown_extension_is_rejected() {
    match AcquireConfig::from_str_with_extension("", "ini") {
        Err(ConfigError::UnsupportedExtension(ext)) => assert_eq!(ext, "ini"),
        other => panic!("expected UnsupportedExtension, got: {other:?}"),
    }
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("absent.yaml");
    match AcquireConfig::from_path(&path) {
        Err(ConfigError::Io { path: p, .. }) => assert!(p.ends_with("absent.yaml")),
        other => panic!("expected Io error, got: {other:?}"),
    }
}

#[cfg(feature = "yaml")]
#[test]
fn yaml_config_parses_every_section() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("acquire.yaml");
    std::fs::write(
        &path,
        r#"
sources:
  - source: ./data
    pattern: '.*\.csv'
  - source: https://example.com/archive.zip
verbose: true
error_policy: fast_fail
strategies: [zip, plaintext]
http:
  timeout_secs: 5
  proxy: false
"#,
    )
    .expect("write config");

    let config = AcquireConfig::from_path(&path).expect("valid yaml");
    assert_eq!(config.sources.len(), 2);
    assert_eq!(config.sources[0].pattern.as_deref(), Some(r".*\.csv"));
    assert_eq!(config.sources[1].pattern, None);
    assert!(config.verbose);
    assert_eq!(config.error_policy.as_deref(), Some("fast_fail"));
    assert_eq!(
        config.strategies,
        Some(vec!["zip".to_string(), "plaintext".to_string()])
    );
    assert_eq!(config.http.timeout_secs, Some(5));
    assert!(!config.http.proxy);
    assert_eq!(config.http.user_agent, HttpConfig::default().user_agent);
}

#[cfg(feature = "yaml")]
#[test]
fn yaml_config_defaults_missing_sections() {
    let config = AcquireConfig::from_str_with_extension("sources: []\n", "yml").expect("valid yaml");
    assert!(config.sources.is_empty());
    assert!(!config.verbose);
    assert!(config.http.proxy);
}

#[cfg(feature = "yaml")]
#[test]
fn malformed_yaml_is_a_parse_error() {
    match AcquireConfig::from_str_with_extension("sources: {", "yaml") {
        Err(ConfigError::Parse(_)) => {}
        other => panic!("expected Parse error, got: {other:?}"),
    }
}

#[cfg(feature = "json")]
#[test]
fn json_config_parses() {
    let config = AcquireConfig::from_str_with_extension(
        r#"{"sources": [{"source": "a.zip", "pattern": "x"}], "error_policy": "accumulate"}"#,
        "json",
    )
    .expect("valid json");
    assert_eq!(config.sources[0].source, "a.zip");
    assert_eq!(config.error_policy.as_deref(), Some("accumulate"));
}

#[cfg(feature = "toml")]
#[test]
fn toml_config_parses() {
    let config = AcquireConfig::from_str_with_extension(
        "verbose = true\n\n[[sources]]\nsource = \"logs/\"\npattern = '.*\\.log'\n\n[http]\nproxy = false\n",
        "toml",
    )
    .expect("valid toml");
    assert!(config.verbose);
    assert_eq!(config.sources[0].pattern.as_deref(), Some(r".*\.log"));
    assert!(!config.http.proxy);
}
