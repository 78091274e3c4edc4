use std::env;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // Verdict service
    pub anthropic_api_key: String,
    pub verdict_model: String,

    // Community platform
    pub reddit_base_url: String,
    pub request_timeout_secs: u64,

    // Client-side throttling
    pub search_rate_per_sec: f64,
    pub search_burst: u32,
}

impl Config {
    /// Load configuration from environment variables.
    /// Panics with a clear message if required vars are missing.
    pub fn from_env() -> Self {
        Self {
            anthropic_api_key: required_env("ANTHROPIC_API_KEY"),
            verdict_model: env::var("VERDICT_MODEL")
                .unwrap_or_else(|_| "claude-haiku-4-5-20251001".to_string()),
            reddit_base_url: env::var("REDDIT_BASE_URL")
                .unwrap_or_else(|_| "https://www.reddit.com".to_string()),
            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .expect("REQUEST_TIMEOUT_SECS must be a number"),
            search_rate_per_sec: env::var("SEARCH_RATE_PER_SEC")
                .unwrap_or_else(|_| "1.0".to_string())
                .parse()
                .expect("SEARCH_RATE_PER_SEC must be a number"),
            search_burst: env::var("SEARCH_BURST")
                .unwrap_or_else(|_| "1".to_string())
                .parse()
                .expect("SEARCH_BURST must be a number"),
        }
    }

    /// Log the loaded configuration without leaking the API key.
    pub fn log_redacted(&self) {
        tracing::info!(
            verdict_model = %self.verdict_model,
            reddit_base_url = %self.reddit_base_url,
            request_timeout_secs = self.request_timeout_secs,
            search_rate_per_sec = self.search_rate_per_sec,
            search_burst = self.search_burst,
            "Config loaded"
        );
    }
}

fn required_env(key: &str) -> String {
    env::var(key).unwrap_or_else(|_| panic!("{key} environment variable is required"))
}
