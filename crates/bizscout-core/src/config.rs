use crate::app_config::AppConfig;
use crate::markup::MarkupVersion;
use crate::ConfigError;

/// Name of the environment variable holding the Yelp API credential.
pub const API_KEY_VAR: &str = "KEY";

const DEFAULT_API_BASE_URL: &str = "https://api.yelp.com/v3/";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a plain
/// `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var).ok().filter(|v| !v.trim().is_empty())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_bool = |var: &str, default: &str| -> Result<bool, ConfigError> {
        let raw = or_default(var, default);
        match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            other => Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("expected a boolean, got '{other}'"),
            }),
        }
    };

    // An empty KEY is treated the same as an unset one.
    let api_key = optional(API_KEY_VAR);
    let api_base_url = or_default("BIZSCOUT_API_BASE_URL", DEFAULT_API_BASE_URL);
    let log_level = or_default("BIZSCOUT_LOG_LEVEL", "info");
    let request_timeout_secs = parse_u64("BIZSCOUT_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("BIZSCOUT_USER_AGENT", "bizscout/0.1 (listing-extractor)");
    let browser_timeout_secs = parse_u64("BIZSCOUT_BROWSER_TIMEOUT_SECS", "90")?;
    let browser_headless = parse_bool("BIZSCOUT_BROWSER_HEADLESS", "true")?;
    let chrome_path = optional("BIZSCOUT_CHROME_PATH");
    let markup_version = parse_markup_version(&or_default("BIZSCOUT_MARKUP_VERSION", "current"))?;

    Ok(AppConfig {
        api_key,
        api_base_url,
        log_level,
        request_timeout_secs,
        user_agent,
        browser_timeout_secs,
        browser_headless,
        chrome_path,
        markup_version,
    })
}

/// Parse a string into a `MarkupVersion` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for anything other than `current` or `legacy`.
fn parse_markup_version(s: &str) -> Result<MarkupVersion, ConfigError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "current" => Ok(MarkupVersion::Current),
        "legacy" => Ok(MarkupVersion::Legacy),
        other => Err(ConfigError::InvalidEnvVar {
            var: "BIZSCOUT_MARKUP_VERSION".to_string(),
            reason: format!("unknown markup version '{other}' (expected current|legacy)"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
