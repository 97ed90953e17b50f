use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
///
/// The API credential is deliberately optional at startup: its absence is
/// reported per-request as a 500 (`Clé API manquante`) instead of refusing to
/// boot, so the rest of the surface (health, validation) stays observable.
#[derive(Debug, Clone)]
pub struct Config {
    pub claude_api_key: Option<String>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            claude_api_key: std::env::var("CLAUDE_API_KEY")
                .ok()
                .filter(|k| !k.is_empty()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}
