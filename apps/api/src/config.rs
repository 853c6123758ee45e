use anyhow::{Context, Result};

const DEFAULT_KEYWORD_SERVICE_URL: &str = "https://mlmkey-ehnc.onrender.com";
const DEFAULT_COURSE_SERVICE_URL: &str = "https://mlm-vrqj.onrender.com";

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub gemini_api_key: String,
    /// Base URL of the keyword-extraction model service.
    pub keyword_service_url: String,
    /// Base URL of the course recommendation service.
    pub course_service_url: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            gemini_api_key: require_env("GEMINI_API_KEY")?,
            keyword_service_url: optional_env("KEYWORD_SERVICE_URL", DEFAULT_KEYWORD_SERVICE_URL),
            course_service_url: optional_env("COURSE_SERVICE_URL", DEFAULT_COURSE_SERVICE_URL),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .map(|v| v.trim_end_matches('/').to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}
