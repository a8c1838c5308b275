use std::str::FromStr;

use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    pub window_secs: u64,
    pub max_requests: usize,
    pub login_max_requests: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub db_max_connections: u32,
    pub db_acquire_timeout_secs: u64,
    pub rate_limit: RateLimitConfig,
    /// Take the caller address from `X-Forwarded-For` when set.
    pub trust_proxy: bool,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let rate_limit = RateLimitConfig {
            window_secs: env_or("RATE_LIMIT_WINDOW_SECS", 15 * 60)?,
            max_requests: env_or("RATE_LIMIT_MAX_REQUESTS", 100)?,
            login_max_requests: env_or("LOGIN_RATE_LIMIT_MAX_REQUESTS", 5)?,
        };
        Ok(Self {
            database_url,
            host: std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env_or("APP_PORT", 8080)?,
            db_max_connections: env_or("DB_MAX_CONNECTIONS", 10)?,
            db_acquire_timeout_secs: env_or("DB_ACQUIRE_TIMEOUT_SECS", 5)?,
            rate_limit,
            trust_proxy: env_or("TRUST_PROXY", false)?,
        })
    }
}

/// Parse an optional env var, falling back to `default` when unset.
fn env_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("invalid value for {key}: {raw:?}")),
        Err(_) => Ok(default),
    }
}
