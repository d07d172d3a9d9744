use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn parse_markup_version_current() {
    assert_eq!(
        parse_markup_version("current").unwrap(),
        MarkupVersion::Current
    );
}

#[test]
fn parse_markup_version_legacy_case_insensitive() {
    assert_eq!(
        parse_markup_version("Legacy").unwrap(),
        MarkupVersion::Legacy
    );
}

#[test]
fn parse_markup_version_unknown_fails() {
    let err = parse_markup_version("v3").unwrap_err();
    assert!(
        matches!(
            err,
            ConfigError::InvalidEnvVar { ref var, .. } if var == "BIZSCOUT_MARKUP_VERSION"
        )
    );
}

#[test]
fn build_app_config_succeeds_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert!(cfg.api_key.is_none());
    assert_eq!(cfg.api_base_url, "https://api.yelp.com/v3/");
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.request_timeout_secs, 30);
    assert_eq!(cfg.user_agent, "bizscout/0.1 (listing-extractor)");
    assert_eq!(cfg.browser_timeout_secs, 90);
    assert!(cfg.browser_headless);
    assert!(cfg.chrome_path.is_none());
    assert_eq!(cfg.markup_version, MarkupVersion::Current);
}

#[test]
fn build_app_config_reads_api_key() {
    let mut map = HashMap::new();
    map.insert("KEY", "secret-token");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.api_key.as_deref(), Some("secret-token"));
}

#[test]
fn build_app_config_treats_blank_api_key_as_unset() {
    let mut map = HashMap::new();
    map.insert("KEY", "   ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.api_key.is_none());
}

#[test]
fn debug_output_redacts_api_key() {
    let mut map = HashMap::new();
    map.insert("KEY", "secret-token");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(!rendered.contains("secret-token"));
    assert!(rendered.contains("[redacted]"));
}

#[test]
fn request_timeout_override() {
    let mut map = HashMap::new();
    map.insert("BIZSCOUT_REQUEST_TIMEOUT_SECS", "5");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.request_timeout_secs, 5);
}

#[test]
fn request_timeout_invalid() {
    let mut map = HashMap::new();
    map.insert("BIZSCOUT_REQUEST_TIMEOUT_SECS", "not-a-number");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(
            result,
            Err(ConfigError::InvalidEnvVar { ref var, .. })
                if var == "BIZSCOUT_REQUEST_TIMEOUT_SECS"
        ),
        "expected InvalidEnvVar(BIZSCOUT_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn browser_timeout_invalid() {
    let mut map = HashMap::new();
    map.insert("BIZSCOUT_BROWSER_TIMEOUT_SECS", "-1");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(
            result,
            Err(ConfigError::InvalidEnvVar { ref var, .. })
                if var == "BIZSCOUT_BROWSER_TIMEOUT_SECS"
        ),
        "expected InvalidEnvVar(BIZSCOUT_BROWSER_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn browser_headless_accepts_false() {
    let mut map = HashMap::new();
    map.insert("BIZSCOUT_BROWSER_HEADLESS", "false");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(!cfg.browser_headless);
}

#[test]
fn browser_headless_rejects_garbage() {
    let mut map = HashMap::new();
    map.insert("BIZSCOUT_BROWSER_HEADLESS", "maybe");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(
            result,
            Err(ConfigError::InvalidEnvVar { ref var, .. })
                if var == "BIZSCOUT_BROWSER_HEADLESS"
        ),
        "expected InvalidEnvVar(BIZSCOUT_BROWSER_HEADLESS), got: {result:?}"
    );
}

#[test]
fn chrome_path_override() {
    let mut map = HashMap::new();
    map.insert("BIZSCOUT_CHROME_PATH", "/usr/bin/chromium");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.chrome_path.as_deref(), Some("/usr/bin/chromium"));
}

#[test]
fn markup_version_override() {
    let mut map = HashMap::new();
    map.insert("BIZSCOUT_MARKUP_VERSION", "legacy");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.markup_version, MarkupVersion::Legacy);
}
