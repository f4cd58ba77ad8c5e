use std::time::Duration;

/// Default list endpoint when nothing is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8080/api/logs";

const ENV_API_URL: &str = "LOGHUB_API_URL";
const ENV_API_KEY: &str = "LOGHUB_API_KEY";

/// Connection settings for the LogHub API, resolved once at startup.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Base URL of the log list endpoint.
    pub base_url: String,
    /// Static credential attached to every request. Empty means no header.
    pub api_key: String,
    /// Transport-level request timeout.
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            api_key: String::new(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl ApiConfig {
    /// Resolve configuration from the environment. CLI flags override the
    /// result afterwards.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var(ENV_API_URL) {
            if !url.is_empty() {
                config.base_url = url;
            }
        }
        if let Ok(key) = std::env::var(ENV_API_KEY) {
            config.api_key = key;
        }
        config
    }
}
