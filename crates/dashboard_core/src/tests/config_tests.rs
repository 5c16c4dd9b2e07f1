use super::*;

use std::{
    collections::HashMap,
    env, fs,
    path::PathBuf,
    time::{SystemTime, UNIX_EPOCH},
};

fn temp_settings_file(label: &str, contents: &str) -> (PathBuf, PathBuf) {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();

    let temp_root = env::temp_dir().join(format!("pos_dashboard_{label}_{suffix}"));
    fs::create_dir_all(&temp_root).expect("temp root");
    let path = temp_root.join(SETTINGS_FILE);
    fs::write(&path, contents).expect("write settings");
    (temp_root, path)
}

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn extracts_origin_without_path_or_default_port() {
    assert_eq!(
        extract_origin("https://api.example.com:443/api/v1").unwrap(),
        "https://api.example.com"
    );
    assert_eq!(
        extract_origin("http://localhost:8000/api").unwrap(),
        "http://localhost:8000"
    );
}

#[test]
fn relative_base_url_is_rejected() {
    assert!(matches!(
        extract_origin("/api"),
        Err(ConfigError::InvalidBaseUrl { .. })
    ));
}

#[test]
fn opaque_origin_is_rejected() {
    assert_eq!(
        extract_origin("file:///srv/api"),
        Err(ConfigError::OpaqueOrigin {
            raw: "file:///srv/api".into()
        })
    );
}

#[test]
fn malformed_base_url_degrades_to_no_origin() {
    let config = ApiConfig::from_base_url(Some("not a url"));
    assert_eq!(config.base_url(), Some("not a url"));
    assert_eq!(config.origin(), None);
}

#[test]
fn blank_base_url_is_unconfigured() {
    assert_eq!(ApiConfig::from_base_url(Some("   ")), ApiConfig::unconfigured());
    assert_eq!(ApiConfig::from_base_url(None), ApiConfig::unconfigured());
}

#[test]
fn missing_settings_file_yields_defaults() {
    let settings = load_settings_from(Path::new("/nonexistent/dashboard.toml"), env_from(&[]));
    assert_eq!(settings, Settings::default());
}

#[test]
fn env_overrides_settings_file() {
    let (temp_root, path) = temp_settings_file("env_override", "api_base = \"https://file.example.com/api\"\n");

    let from_file = load_settings_from(&path, env_from(&[]));
    assert_eq!(
        from_file.api_base.as_deref(),
        Some("https://file.example.com/api")
    );

    let overridden = load_settings_from(
        &path,
        env_from(&[
            ("API_BASE", "https://env.example.com"),
            ("APP__API_BASE", "https://app.example.com/api"),
        ]),
    );
    assert_eq!(
        overridden.api_base.as_deref(),
        Some("https://app.example.com/api")
    );

    fs::remove_dir_all(temp_root).expect("cleanup");
}

#[test]
fn unparsable_settings_file_is_ignored() {
    let (temp_root, path) = temp_settings_file("unparsable", "api_base = [1, 2");

    let settings = load_settings_from(&path, env_from(&[("API_BASE", "http://localhost:8000")]));
    assert_eq!(settings.api_base.as_deref(), Some("http://localhost:8000"));

    fs::remove_dir_all(temp_root).expect("cleanup");
}

#[test]
fn settings_feed_api_config_origin() {
    let settings = load_settings_from(
        Path::new("/nonexistent/dashboard.toml"),
        env_from(&[("API_BASE", "https://api.example.com/api")]),
    );
    let config = ApiConfig::from_settings(&settings);
    assert_eq!(config.origin(), Some("https://api.example.com"));
}
