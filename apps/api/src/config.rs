use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub redis_url: String,
    pub gemini_api_key: String,
    pub port: u16,
    pub rust_log: String,
    /// Max AI-backed requests per user within one rate-limit window.
    pub ai_rate_limit_max: u64,
    pub ai_rate_limit_window_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            redis_url: require_env("REDIS_URL")?,
            gemini_api_key: require_env("GEMINI_API_KEY")?,
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            ai_rate_limit_max: parse_env("AI_RATE_LIMIT_MAX", 20)?,
            ai_rate_limit_window_secs: parse_env("AI_RATE_LIMIT_WINDOW_SECS", 3600)?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_defaults_when_unset() {
        assert_eq!(parse_env::<u64>("ANALYZER_TEST_UNSET_LIMIT", 20).unwrap(), 20);
    }

    #[test]
    fn test_parse_env_reads_and_rejects() {
        std::env::set_var("ANALYZER_TEST_PORT", "9090");
        assert_eq!(parse_env::<u16>("ANALYZER_TEST_PORT", 8080).unwrap(), 9090);

        std::env::set_var("ANALYZER_TEST_BAD_PORT", "eighty");
        assert!(parse_env::<u16>("ANALYZER_TEST_BAD_PORT", 8080).is_err());
    }

    #[test]
    fn test_require_env_names_missing_key() {
        let err = require_env("ANALYZER_TEST_MISSING_KEY").unwrap_err();
        assert!(err.to_string().contains("ANALYZER_TEST_MISSING_KEY"));
    }
}
