use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Runtime settings shared by the server and the CLI.
///
/// Every field has a default; see [`crate::config::load_app_config`] for the
/// environment variable behind each one.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Allowed CORS origins. Empty means any origin.
    pub cors_origins: Vec<String>,
    pub rate_limit_per_minute: usize,
    pub scraper_request_timeout_secs: u64,
    pub scraper_user_agent: String,
    pub scraper_max_retries: u32,
    pub scraper_retry_backoff_base_ms: u64,
    pub search_enabled: bool,
    pub search_base_url: String,
    pub search_inter_request_delay_ms: u64,
    /// Profile scraping is administratively off unless explicitly enabled.
    pub profile_scraping_enabled: bool,
    pub profile_base_url: String,
}
