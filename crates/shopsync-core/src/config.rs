use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
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
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function,
/// so parsing can be tested against a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    // Blank values count as missing: an empty token in `.env` is a typo, not a credential.
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let store = require("SHOPIFY_STORE")?;
    let access_token = require("SHOPIFY_ACCESS_TOKEN")?;
    let api_version = or_default("SHOPIFY_API_VERSION", "2024-10");
    if api_version.trim().is_empty() {
        return Err(ConfigError::InvalidEnvVar {
            var: "SHOPIFY_API_VERSION".to_string(),
            reason: "must not be empty".to_string(),
        });
    }

    let log_level = or_default("SHOPSYNC_LOG_LEVEL", "info");
    let row_delay_ms = parse_u64("SHOPSYNC_ROW_DELAY_MS", "700")?;
    let error_cooldown_ms = parse_u64("SHOPSYNC_ERROR_COOLDOWN_MS", "2000")?;

    Ok(AppConfig {
        store,
        access_token,
        api_version: api_version.trim().to_string(),
        log_level,
        row_delay_ms,
        error_cooldown_ms,
    })
}
