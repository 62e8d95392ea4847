use std::env;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bearer token for the search API.
    pub api_token: String,
    /// Override for the API base URL; the client default applies when unset.
    pub base_url: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    /// Panics with a clear message if required vars are missing.
    pub fn from_env() -> Self {
        Self {
            api_token: required_env("IMPRESSO_API_TOKEN"),
            base_url: env::var("IMPRESSO_BASE_URL").ok(),
        }
    }

    /// Log the loaded configuration without exposing the token.
    pub fn log_redacted(&self) {
        tracing::info!(
            base_url = self.base_url.as_deref().unwrap_or("(default)"),
            token_chars = self.api_token.len(),
            "Config loaded"
        );
    }
}

fn required_env(key: &str) -> String {
    env::var(key).unwrap_or_else(|_| panic!("{key} environment variable is required"))
}
