use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub anthropic_api_key: String,
    pub port: u16,
    pub rust_log: String,
    /// Pause between consecutive successful auto-apply submissions.
    pub auto_apply_delay_secs: u64,
    /// Whether a failed submission also consumes the pacing delay.
    pub auto_apply_delay_after_failure: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            auto_apply_delay_secs: std::env::var("AUTO_APPLY_DELAY_SECS")
                .unwrap_or_else(|_| "60".to_string())
                .parse::<u64>()
                .context("AUTO_APPLY_DELAY_SECS must be a number of seconds")?,
            auto_apply_delay_after_failure: std::env::var("AUTO_APPLY_DELAY_AFTER_FAILURE")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
