use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value fails to parse. All variables are
/// optional; missing ones fall back to defaults.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for
/// testing or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if a value fails to parse.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual
/// environment so it can be tested with a pure `HashMap` lookup — no
/// `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_bool = |var: &str, default: &str| -> Result<bool, ConfigError> {
        let raw = or_default(var, default);
        match raw.as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            other => Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("expected true/false, got \"{other}\""),
            }),
        }
    };

    let env = parse_environment(&or_default("POLICYSCOUT_ENV", "development"));
    let log_level = or_default("POLICYSCOUT_LOG_LEVEL", "info");
    let user_agent = or_default(
        "POLICYSCOUT_USER_AGENT",
        "policyscout/0.1 (privacy-policy discovery)",
    );

    let request_timeout_secs = parse_u64("POLICYSCOUT_REQUEST_TIMEOUT_SECS", "15")?;
    let probe_timeout_secs = parse_u64("POLICYSCOUT_PROBE_TIMEOUT_SECS", "8")?;
    let max_pages = parse_usize("POLICYSCOUT_MAX_PAGES", "50")?;
    let max_depth = parse_usize("POLICYSCOUT_MAX_DEPTH", "3")?;
    let links_per_page = parse_usize("POLICYSCOUT_LINKS_PER_PAGE", "10")?;
    let request_delay_ms = parse_u64("POLICYSCOUT_REQUEST_DELAY_MS", "300")?;
    let batch_size = parse_usize("POLICYSCOUT_BATCH_SIZE", "3")?;
    let batch_delay_ms = parse_u64("POLICYSCOUT_BATCH_DELAY_MS", "1000")?;
    let stop_after_404s = parse_bool("POLICYSCOUT_STOP_AFTER_404S", "false")?;

    Ok(AppConfig {
        env,
        log_level,
        user_agent,
        request_timeout_secs,
        probe_timeout_secs,
        max_pages,
        max_depth,
        links_per_page,
        request_delay_ms,
        batch_size,
        batch_delay_ms,
        stop_after_404s,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}
