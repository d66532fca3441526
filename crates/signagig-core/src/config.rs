use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Default number of recent offers loaded into the in-memory catalog.
pub const DEFAULT_OFFER_FETCH_LIMIT: i64 = 50;

/// Upper bound for `SIGNAGIG_OFFER_FETCH_LIMIT`; every request works over at most this many offers.
pub const MAX_OFFER_FETCH_LIMIT: i64 = 200;

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

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

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

    let database_url = require("DATABASE_URL")?;
    let env = parse_environment(&or_default("SIGNAGIG_ENV", "development"))?;

    let bind_addr = parse_addr("SIGNAGIG_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("SIGNAGIG_LOG_LEVEL", "info");
    let offers_path = PathBuf::from(or_default("SIGNAGIG_OFFERS_PATH", "./config/offers.yaml"));

    let offer_fetch_limit = parse_u32(
        "SIGNAGIG_OFFER_FETCH_LIMIT",
        &DEFAULT_OFFER_FETCH_LIMIT.to_string(),
    )?;
    if offer_fetch_limit == 0 || i64::from(offer_fetch_limit) > MAX_OFFER_FETCH_LIMIT {
        return Err(invalid(
            "SIGNAGIG_OFFER_FETCH_LIMIT",
            format!("must be between 1 and {MAX_OFFER_FETCH_LIMIT}"),
        ));
    }

    let db_max_connections = parse_u32("SIGNAGIG_DB_MAX_CONNECTIONS", "10")?;
    let db_min_connections = parse_u32("SIGNAGIG_DB_MIN_CONNECTIONS", "1")?;
    let db_acquire_timeout_secs = parse_u64("SIGNAGIG_DB_ACQUIRE_TIMEOUT_SECS", "10")?;

    Ok(AppConfig {
        database_url,
        env,
        bind_addr,
        log_level,
        offers_path,
        offer_fetch_limit: i64::from(offer_fetch_limit),
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SIGNAGIG_ENV".to_string(),
            reason: format!("expected development, test, or production; got '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
