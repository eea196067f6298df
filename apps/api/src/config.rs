use anyhow::{bail, Context, Result};

use crate::discovery::engine::DEFAULT_MAX_ATTEMPTS;

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub catalog_base_url: String,
    pub covers_base_url: String,
    pub catalog_timeout_secs: u64,
    /// Upper bound on catalog samples per discovery request.
    pub discovery_max_attempts: u32,
    pub default_genre: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let discovery_max_attempts =
            optional_env("DISCOVERY_MAX_ATTEMPTS", &DEFAULT_MAX_ATTEMPTS.to_string())
                .parse::<u32>()
                .context("DISCOVERY_MAX_ATTEMPTS must be a positive integer")?;
        if discovery_max_attempts == 0 {
            bail!("DISCOVERY_MAX_ATTEMPTS must be at least 1");
        }

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            catalog_base_url: optional_env("CATALOG_BASE_URL", "https://openlibrary.org"),
            covers_base_url: optional_env("COVERS_BASE_URL", "https://covers.openlibrary.org"),
            catalog_timeout_secs: optional_env("CATALOG_TIMEOUT_SECS", "10")
                .parse::<u64>()
                .context("CATALOG_TIMEOUT_SECS must be a number of seconds")?,
            discovery_max_attempts,
            default_genre: optional_env("DEFAULT_GENRE", "Science Fiction"),
            port: optional_env("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: optional_env("RUST_LOG", "info"),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
