use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to a value that does not parse.
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
/// Returns `ConfigError` if a variable is set to a value that does not parse.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        or_default(var, default)
            .parse::<SocketAddr>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_bool = |var: &str, default: &str| -> Result<bool, ConfigError> {
        let raw = or_default(var, default);
        match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            other => Err(invalid(var, format!("expected a boolean, got \"{other}\""))),
        }
    };

    let env = parse_environment(&or_default("DPA_ENV", "development"))?;
    let bind_addr = parse_addr("DPA_BIND_ADDR", "0.0.0.0:5000")?;
    let log_level = or_default("DPA_LOG_LEVEL", "info");
    let cors_origins = parse_list(&or_default("DPA_CORS_ORIGINS", ""));
    let rate_limit_per_minute = parse_usize("DPA_RATE_LIMIT_PER_MINUTE", "120")?;
    if rate_limit_per_minute == 0 {
        return Err(invalid(
            "DPA_RATE_LIMIT_PER_MINUTE",
            "must be greater than zero".to_string(),
        ));
    }

    let scraper_request_timeout_secs = parse_u64("DPA_SCRAPER_REQUEST_TIMEOUT_SECS", "10")?;
    let scraper_user_agent = or_default("DPA_SCRAPER_USER_AGENT", DEFAULT_USER_AGENT);
    let scraper_max_retries = parse_u32("DPA_SCRAPER_MAX_RETRIES", "2")?;
    let scraper_retry_backoff_base_ms = parse_u64("DPA_SCRAPER_RETRY_BACKOFF_BASE_MS", "500")?;

    let search_enabled = parse_bool("DPA_SEARCH_ENABLED", "true")?;
    let search_base_url = or_default("DPA_SEARCH_BASE_URL", "https://www.bing.com")
        .trim_end_matches('/')
        .to_string();
    let search_inter_request_delay_ms = parse_u64("DPA_SEARCH_INTER_REQUEST_DELAY_MS", "1000")?;

    let profile_scraping_enabled = parse_bool("DPA_PROFILE_SCRAPING_ENABLED", "false")?;
    let profile_base_url = or_default("DPA_PROFILE_BASE_URL", "https://www.instagram.com")
        .trim_end_matches('/')
        .to_string();

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        cors_origins,
        rate_limit_per_minute,
        scraper_request_timeout_secs,
        scraper_user_agent,
        scraper_max_retries,
        scraper_retry_backoff_base_ms,
        search_enabled,
        search_base_url,
        search_inter_request_delay_ms,
        profile_scraping_enabled,
        profile_base_url,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "DPA_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

/// Split a comma-separated list, dropping blank entries.
fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
