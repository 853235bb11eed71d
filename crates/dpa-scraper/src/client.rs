use std::time::Duration;

use dpa_core::AppConfig;
use reqwest::{Client, Response, StatusCode};

use crate::error::ScraperError;

/// Connection, retry and identity settings shared by every extractor.
#[derive(Debug, Clone)]
pub struct HttpSettings {
    pub timeout_secs: u64,
    pub user_agent: String,
    /// Additional attempts after the first failure, for retriable errors only.
    pub max_retries: u32,
    /// Base delay for exponential back-off: `backoff_base_ms * 2^(n-1)`.
    pub backoff_base_ms: u64,
}

impl HttpSettings {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            timeout_secs: config.scraper_request_timeout_secs,
            user_agent: config.scraper_user_agent.clone(),
            max_retries: config.scraper_max_retries,
            backoff_base_ms: config.scraper_retry_backoff_base_ms,
        }
    }

    /// Builds a `reqwest::Client` with the configured timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the client cannot be constructed
    /// (e.g. invalid TLS config).
    pub fn build_client(&self) -> Result<Client, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(self.timeout_secs))
            .connect_timeout(Duration::from_secs(self.timeout_secs.min(10)))
            .user_agent(&self.user_agent)
            .build()?;
        Ok(client)
    }
}

/// Prefix bare hosts with `https://`, as users often type `example.com`.
#[must_use]
pub fn normalize_url(input: &str) -> String {
    let trimmed = input.trim();
    let lower = trimmed.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    }
}

/// Host of `url` without a leading `www.`, lowercased.
#[must_use]
pub fn domain_of(url: &str) -> Option<String> {
    let parsed = reqwest::Url::parse(&normalize_url(url)).ok()?;
    let host = parsed.host_str()?.to_ascii_lowercase();
    Some(host.strip_prefix("www.").unwrap_or(&host).to_string())
}

/// Maps a 429 response to [`ScraperError::RateLimited`], reading `Retry-After`.
pub(crate) fn rate_limited(response: &Response, url: &str) -> ScraperError {
    let retry_after_secs = response
        .headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(60);
    ScraperError::RateLimited {
        domain: domain_of(url).unwrap_or_else(|| url.to_owned()),
        retry_after_secs,
    }
}

/// GET `url` and return the body, treating any non-2xx status as an error.
///
/// # Errors
///
/// - [`ScraperError::RateLimited`] on HTTP 429.
/// - [`ScraperError::NotFound`] on HTTP 404.
/// - [`ScraperError::UnexpectedStatus`] on any other non-2xx status.
/// - [`ScraperError::Http`] on network or body-read failure.
pub(crate) async fn get_text(client: &Client, url: &str) -> Result<String, ScraperError> {
    let response = client.get(url).send().await?;
    let status = response.status();

    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(rate_limited(&response, url));
    }
    if status == StatusCode::NOT_FOUND {
        return Err(ScraperError::NotFound {
            url: url.to_owned(),
        });
    }
    if !status.is_success() {
        return Err(ScraperError::UnexpectedStatus {
            status: status.as_u16(),
            url: url.to_owned(),
        });
    }

    Ok(response.text().await?)
}
