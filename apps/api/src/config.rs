use std::path::PathBuf;

use anyhow::{Context, Result};

const DEFAULT_AI_API_URL: &str = "https://api.perplexity.ai/chat/completions";
const DEFAULT_AI_MODEL: &str = "sonar";

/// Application configuration loaded from environment variables.
/// Every value has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Directory where rendered résumés are written for download.
    pub export_dir: PathBuf,
    pub max_upload_bytes: usize,
    pub fetch_timeout_secs: u64,
    /// AI features are disabled when this is `None`.
    pub ai_api_key: Option<String>,
    pub ai_api_url: String,
    pub ai_model: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let max_upload_mb: usize = parse_env("MAX_UPLOAD_MB", 10)?;

        Ok(Config {
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            export_dir: std::env::var("EXPORT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("uploads/optimized")),
            max_upload_bytes: max_upload_mb * 1024 * 1024,
            fetch_timeout_secs: parse_env("FETCH_TIMEOUT_SECS", 10)?,
            ai_api_key: std::env::var("PERPLEXITY_API_KEY")
                .ok()
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty()),
            ai_api_url: std::env::var("AI_API_URL")
                .unwrap_or_else(|_| DEFAULT_AI_API_URL.to_string()),
            ai_model: std::env::var("AI_MODEL").unwrap_or_else(|_| DEFAULT_AI_MODEL.to_string()),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            export_dir: PathBuf::from("uploads/optimized"),
            max_upload_bytes: 10 * 1024 * 1024,
            fetch_timeout_secs: 10,
            ai_api_key: None,
            ai_api_url: DEFAULT_AI_API_URL.to_string(),
            ai_model: DEFAULT_AI_MODEL.to_string(),
        }
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw}")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_has_ai_disabled() {
        let config = Config::default();
        assert!(config.ai_api_key.is_none());
        assert_eq!(config.max_upload_bytes, 10 * 1024 * 1024);
        assert_eq!(config.ai_model, "sonar");
    }

    #[test]
    fn test_parse_env_falls_back_to_default_when_unset() {
        let value: u16 = parse_env("ATS_TEST_UNSET_VARIABLE_XYZ", 4242).unwrap();
        assert_eq!(value, 4242);
    }
}
