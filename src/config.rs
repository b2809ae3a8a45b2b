use std::env;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

pub const DEFAULT_PLACES_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place";
pub const DEFAULT_ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com";
pub const DEFAULT_ANTHROPIC_MODEL: &str = "claude-sonnet-4-20250514";

#[derive(Debug, Clone)]
pub struct Config {
    pub google_api_key: Option<String>,
    pub anthropic_api_key: Option<String>,
    pub database_url: Option<String>,
    pub service_port: u16,
    pub service_host: String,
    pub static_dir: String,
    pub places_base_url: String,
    pub anthropic_base_url: String,
    pub anthropic_model: String,
    pub review_max_tokens: u32,
    pub review_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup.
    ///
    /// Empty values are treated the same as unset ones, so `KEY=` in a `.env`
    /// file disables the corresponding feature instead of configuring a blank key.
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let service_port = parse_or(&get, "PORT", 10000u16)
            .context("PORT must be a valid port number (0-65535)")?;

        let review_max_tokens = parse_or(&get, "REVIEW_MAX_TOKENS", 4096u32)
            .context("REVIEW_MAX_TOKENS must be a positive integer")?;

        let review_timeout_secs = parse_or(&get, "REVIEW_TIMEOUT_SECS", 120u64)
            .context("REVIEW_TIMEOUT_SECS must be a whole number of seconds")?;

        Ok(Config {
            google_api_key: get("GOOGLE_PLACES_API_KEY"),
            anthropic_api_key: get("ANTHROPIC_API_KEY"),
            database_url: get("DATABASE_URL"),
            service_port,
            service_host: get("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            static_dir: get("STATIC_DIR").unwrap_or_else(|| "static".to_string()),
            places_base_url: get("GOOGLE_PLACES_BASE_URL")
                .unwrap_or_else(|| DEFAULT_PLACES_BASE_URL.to_string()),
            anthropic_base_url: get("ANTHROPIC_BASE_URL")
                .unwrap_or_else(|| DEFAULT_ANTHROPIC_BASE_URL.to_string()),
            anthropic_model: get("ANTHROPIC_MODEL")
                .unwrap_or_else(|| DEFAULT_ANTHROPIC_MODEL.to_string()),
            review_max_tokens,
            review_timeout: Duration::from_secs(review_timeout_secs),
        })
    }

    pub fn log_startup(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Google Places key: {}", configured(&self.google_api_key));
        tracing::info!("  Anthropic key: {}", configured(&self.anthropic_api_key));
        tracing::info!(
            "  Database: {}",
            if self.database_url.is_some() { "configured" } else { "disabled (no DATABASE_URL)" }
        );
        tracing::info!("  Review model: {} (max_tokens {})", self.anthropic_model, self.review_max_tokens);
        tracing::info!("  Static assets: {}", self.static_dir);
        tracing::info!("  Service listening on: {}:{}", self.service_host, self.service_port);
    }
}

fn configured(value: &Option<String>) -> &'static str {
    if value.is_some() { "configured" } else { "not set" }
}

fn parse_or<T, G>(get: &G, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("invalid value for {}: '{}'", key, raw)),
        None => Ok(default),
    }
}
