use anyhow::{Context, Result};

const DEFAULT_COMPLETION_API_URL: &str = "https://api.perplexity.ai/chat/completions";
const DEFAULT_COMPLETION_MODEL: &str = "sonar";
const MIN_TIMEOUT_SECS: u64 = 30;
const MAX_TIMEOUT_SECS: u64 = 45;

/// Application configuration loaded from environment variables.
/// Read once at startup and handed to the rest of the app through `AppState`.
#[derive(Debug, Clone)]
pub struct Config {
    /// Optional at startup; searches fail with a 500 until it is set.
    pub completion_api_key: Option<String>,
    pub completion_api_url: String,
    pub completion_model: String,
    pub completion_timeout_secs: u64,
    pub app_env: String,
    pub port: u16,
    pub rust_log: String,
    /// Empty means permissive CORS.
    pub allowed_origins: Vec<String>,
    pub rate_limit_max_requests: usize,
    pub rate_limit_window_secs: u64,
    /// Key rate limiting on the first `X-Forwarded-For` hop instead of the
    /// socket peer. Only safe behind a proxy that overwrites the header.
    pub trust_proxy_headers: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            completion_api_key: optional_env("COMPLETION_API_KEY"),
            completion_api_url: optional_env("COMPLETION_API_URL")
                .unwrap_or_else(|| DEFAULT_COMPLETION_API_URL.to_string()),
            completion_model: optional_env("COMPLETION_MODEL")
                .unwrap_or_else(|| DEFAULT_COMPLETION_MODEL.to_string()),
            completion_timeout_secs: parse_env("COMPLETION_TIMEOUT_SECS", MAX_TIMEOUT_SECS)?
                .clamp(MIN_TIMEOUT_SECS, MAX_TIMEOUT_SECS),
            app_env: optional_env("APP_ENV").unwrap_or_else(|| "development".to_string()),
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            allowed_origins: parse_origins(&std::env::var("ALLOWED_ORIGINS").unwrap_or_default()),
            rate_limit_max_requests: parse_env("RATE_LIMIT_MAX_REQUESTS", 100)?,
            rate_limit_window_secs: parse_env("RATE_LIMIT_WINDOW_SECS", 900)?,
            trust_proxy_headers: parse_env("TRUST_PROXY_HEADERS", false)?,
        })
    }

    pub fn is_production(&self) -> bool {
        self.app_env.eq_ignore_ascii_case("production")
    }
}

/// Unset and blank variables are both treated as absent.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        None => Ok(default),
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
impl Config {
    /// Development config with a dummy key, for handler tests.
    pub fn for_tests() -> Self {
        Config {
            completion_api_key: Some("test-key".to_string()),
            completion_api_url: DEFAULT_COMPLETION_API_URL.to_string(),
            completion_model: DEFAULT_COMPLETION_MODEL.to_string(),
            completion_timeout_secs: MAX_TIMEOUT_SECS,
            app_env: "development".to_string(),
            port: 0,
            rust_log: "debug".to_string(),
            allowed_origins: Vec::new(),
            rate_limit_max_requests: 100,
            rate_limit_window_secs: 900,
            trust_proxy_headers: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins_splits_and_trims() {
        assert_eq!(
            parse_origins(" https://a.in, ,https://b.in "),
            vec!["https://a.in".to_string(), "https://b.in".to_string()]
        );
        assert!(parse_origins("").is_empty());
    }

    #[test]
    fn test_is_production_ignores_case() {
        let mut config = Config::for_tests();
        assert!(!config.is_production());
        config.app_env = "Production".to_string();
        assert!(config.is_production());
    }
}
