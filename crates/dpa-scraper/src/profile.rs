//! Profile attribute extractor.
//!
//! Profile automation is off by default; [`fetcher_from_config`] picks the
//! [`DisabledProfileFetcher`] unless it is explicitly enabled.

use std::sync::{Arc, LazyLock};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dpa_core::{is_valid_username, parse_count, AppConfig, ProfileCapture, ProfileRecord};
use regex::Regex;
use reqwest::{Client, Url};

use crate::client::{get_text, HttpSettings};
use crate::error::ScraperError;
use crate::html;
use crate::retry::retry_with_backoff;

static COUNT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(\d[\d.,]*\s*(?:k|m|mi|mil|mn|million|thousand)?)\s+(followers|seguidores|following|seguindo|posts|publicações)",
    )
    .expect("valid regex")
});
static QUOTED_BIO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?s):\s*[“"](.+)[”"]\s*$"#).expect("valid regex"));
static TAKEN_AT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""taken_at(?:_timestamp)?"\s*:\s*(\d{9,11})"#).expect("valid regex"));
static TIME_DATETIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)<time\b[^>]*\bdatetime\s*=\s*"([^"]+)""#).expect("valid regex"));

/// First path segments that are site sections, not profiles.
const RESERVED_PATHS: &[&str] = &["explore", "accounts", "p", "reel", "stories", "direct"];

/// Avatar URLs containing any of these are platform placeholders.
const DEFAULT_AVATAR_MARKERS: &[&str] = &["default", "anonymous", "avatar"];

/// Markers that settle the account type on their own.
const BUSINESS_FLAGS: &[&str] = &[
    "\"is_business_account\":true",
    "\"is_professional_account\":true",
];

/// Weaker hints; two or more mark a business account.
const BUSINESS_HINTS: &[&str] = &[
    "business_category_name",
    "category_name",
    "business_email",
    "business_phone_number",
    "business_address_json",
    "conta comercial",
    "business account",
    "entrar em contato",
];

/// Source of profile captures for one handle or profile URL.
#[async_trait]
pub trait ProfileFetcher: Send + Sync {
    /// Capture the profile behind `input`. Never fails: problems are
    /// reported as [`ProfileCapture::Unavailable`].
    async fn fetch(&self, input: &str) -> ProfileCapture;
}

/// Returns the disabled placeholder without touching the network.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledProfileFetcher;

#[async_trait]
impl ProfileFetcher for DisabledProfileFetcher {
    async fn fetch(&self, input: &str) -> ProfileCapture {
        let handle = extract_handle(input).unwrap_or_else(|| input.trim().to_string());
        ProfileCapture::disabled(handle)
    }
}

/// Reads the public profile page and extracts what its metadata exposes.
pub struct HttpProfileFetcher {
    client: Client,
    settings: HttpSettings,
    base_url: String,
}

impl HttpProfileFetcher {
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the HTTP client cannot be built.
    pub fn new(settings: HttpSettings, base_url: impl Into<String>) -> Result<Self, ScraperError> {
        let client = settings.build_client()?;
        Ok(Self {
            client,
            settings,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    async fn capture(&self, input: &str) -> Result<ProfileRecord, ScraperError> {
        let handle = extract_handle(input).ok_or_else(|| ScraperError::InvalidHandle {
            input: input.to_string(),
        })?;
        let url = format!("{}/{handle}/", self.base_url);
        let body = retry_with_backoff(
            self.settings.max_retries,
            self.settings.backoff_base_ms,
            || get_text(&self.client, &url),
        )
        .await?;
        Ok(parse_profile(&url, &handle, &body))
    }
}

#[async_trait]
impl ProfileFetcher for HttpProfileFetcher {
    async fn fetch(&self, input: &str) -> ProfileCapture {
        match self.capture(input).await {
            Ok(record) => {
                tracing::debug!(
                    handle = record.username.as_deref().unwrap_or_default(),
                    followers = ?record.followers,
                    "profile captured"
                );
                ProfileCapture::Profile(record)
            }
            Err(e) => {
                tracing::warn!(input, error = %e, "profile capture failed");
                ProfileCapture::Unavailable {
                    handle: extract_handle(input).unwrap_or_else(|| input.trim().to_string()),
                    reason: e.to_string(),
                }
            }
        }
    }
}

/// Pick the fetcher the configuration asks for.
///
/// # Errors
///
/// Returns [`ScraperError::Http`] if profile scraping is enabled and the
/// HTTP client cannot be built.
pub fn fetcher_from_config(config: &AppConfig) -> Result<Arc<dyn ProfileFetcher>, ScraperError> {
    if config.profile_scraping_enabled {
        let fetcher =
            HttpProfileFetcher::new(HttpSettings::from_config(config), config.profile_base_url.clone())?;
        Ok(Arc::new(fetcher))
    } else {
        Ok(Arc::new(DisabledProfileFetcher))
    }
}

/// Handle from a profile URL (`https://www.instagram.com/acme/`), an
/// `@acme` mention or a bare `acme`.
///
/// Returns `None` when the result is not a plausible username.
#[must_use]
pub fn extract_handle(input: &str) -> Option<String> {
    let input = input.trim();
    let candidate = if input.contains('/') {
        let with_scheme = if input.contains("://") {
            input.to_string()
        } else {
            format!("https://{input}")
        };
        let url = Url::parse(&with_scheme).ok()?;
        let first = url.path_segments()?.find(|s| !s.is_empty())?;
        if RESERVED_PATHS.contains(&first.to_lowercase().as_str()) {
            return None;
        }
        first.to_string()
    } else {
        input.to_string()
    };
    let candidate = candidate.strip_prefix('@').unwrap_or(&candidate).to_string();
    is_valid_username(&candidate).then_some(candidate)
}

/// Extract profile facts from the page HTML already in hand.
#[must_use]
pub fn parse_profile(url: &str, handle: &str, body: &str) -> ProfileRecord {
    let descriptions: Vec<String> = [
        html::meta_content(body, "property", "og:description"),
        html::meta_content(body, "name", "description"),
    ]
    .into_iter()
    .flatten()
    .collect();

    let mut record = ProfileRecord {
        url: url.to_string(),
        username: Some(handle.to_string()),
        followers: None,
        following: None,
        posts_count: None,
        last_post_date: last_post_date(body),
        bio: None,
        has_profile_picture: has_custom_avatar(body),
        is_business_account: is_business(body),
    };

    for description in &descriptions {
        for caps in COUNT_RE.captures_iter(description) {
            let count = parse_count(&caps[1]);
            match caps[2].to_lowercase().as_str() {
                "followers" | "seguidores" => record.followers = record.followers.or(count),
                "following" | "seguindo" => record.following = record.following.or(count),
                _ => record.posts_count = record.posts_count.or(count),
            }
        }
        if record.bio.is_none() {
            record.bio = QUOTED_BIO_RE
                .captures(description)
                .map(|caps| caps[1].trim().to_string())
                .filter(|bio| !bio.is_empty());
        }
    }

    record
}

fn has_custom_avatar(body: &str) -> bool {
    html::meta_content(body, "property", "og:image").is_some_and(|src| {
        let src = src.to_lowercase();
        !DEFAULT_AVATAR_MARKERS.iter().any(|m| src.contains(m))
    })
}

fn is_business(body: &str) -> bool {
    let lowered = body.to_lowercase().replace("\": ", "\":");
    if BUSINESS_FLAGS.iter().any(|flag| lowered.contains(flag)) {
        return true;
    }
    BUSINESS_HINTS
        .iter()
        .filter(|hint| lowered.contains(*hint))
        .count()
        >= 2
}

/// Most recent post time found in embedded JSON or `<time datetime>` tags.
fn last_post_date(body: &str) -> Option<DateTime<Utc>> {
    let from_json = TAKEN_AT_RE
        .captures_iter(body)
        .filter_map(|caps| caps[1].parse::<i64>().ok())
        .filter_map(|secs| DateTime::from_timestamp(secs, 0));
    let from_tags = TIME_DATETIME_RE
        .captures_iter(body)
        .filter_map(|caps| DateTime::parse_from_rfc3339(&caps[1]).ok())
        .map(|dt| dt.with_timezone(&Utc));
    from_json.chain(from_tags).max()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROFILE_HTML: &str = r#"<html><head>
<meta property="og:description" content="12.5K Followers, 310 Following, 1,204 Posts - See Instagram photos and videos from Pousada Mar Azul (@pousadamarazul)">
<meta name="description" content="12.5K Followers, 310 Following, 1,204 Posts - Pousada Mar Azul (@pousadamarazul) on Instagram: &quot;Pousada pé na areia em Ubatuba. Reservas pelo link.&quot;">
<meta property="og:image" content="https://cdn.example/p/mar-azul-640.jpg">
</head><body><script>{"is_business_account": true, "edge_owner_to_timeline_media":{"edges":[{"node":{"taken_at_timestamp":1760000000}},{"node":{"taken_at_timestamp":1750000000}}]}}</script></body></html>"#;

    #[test]
    fn extract_handle_from_url() {
        assert_eq!(
            extract_handle("https://www.instagram.com/pousadamarazul/").as_deref(),
            Some("pousadamarazul")
        );
        assert_eq!(
            extract_handle("instagram.com/pousada.mar_azul?hl=pt").as_deref(),
            Some("pousada.mar_azul")
        );
    }

    #[test]
    fn extract_handle_from_mention() {
        assert_eq!(extract_handle(" @acme ").as_deref(), Some("acme"));
        assert_eq!(extract_handle("acme").as_deref(), Some("acme"));
    }

    #[test]
    fn extract_handle_rejects_ui_paths_and_garbage() {
        assert_eq!(extract_handle("https://www.instagram.com/explore/"), None);
        assert_eq!(extract_handle("not a handle"), None);
        assert_eq!(extract_handle(""), None);
    }

    #[test]
    fn parses_counts_from_og_description() {
        let record = parse_profile("https://ig.example/pousadamarazul/", "pousadamarazul", PROFILE_HTML);
        assert_eq!(record.followers, Some(12_500));
        assert_eq!(record.following, Some(310));
        assert_eq!(record.posts_count, Some(1204));
        assert_eq!(record.username.as_deref(), Some("pousadamarazul"));
    }

    #[test]
    fn bio_comes_from_quoted_description() {
        let record = parse_profile("u", "pousadamarazul", PROFILE_HTML);
        assert_eq!(
            record.bio.as_deref(),
            Some("Pousada pé na areia em Ubatuba. Reservas pelo link.")
        );
    }

    #[test]
    fn avatar_business_and_last_post() {
        let record = parse_profile("u", "pousadamarazul", PROFILE_HTML);
        assert!(record.has_profile_picture);
        assert!(record.is_business_account);
        assert_eq!(
            record.last_post_date,
            DateTime::from_timestamp(1_760_000_000, 0)
        );
    }

    #[test]
    fn bare_page_yields_empty_record() {
        let record = parse_profile("u", "acme", "<html><body>Log in</body></html>");
        assert_eq!(record.followers, None);
        assert_eq!(record.bio, None);
        assert!(!record.has_profile_picture);
        assert!(!record.is_business_account);
        assert!(!record.has_recent_activity());
    }

    #[test]
    fn placeholder_avatar_is_not_custom() {
        let body = r#"<meta property="og:image" content="https://cdn.example/default_avatar.png">"#;
        assert!(!has_custom_avatar(body));
    }

    #[test]
    fn single_business_hint_is_not_enough() {
        assert!(!is_business("<p>category_name</p>"));
        assert!(is_business("<p>category_name business_email</p>"));
    }

    #[tokio::test]
    async fn disabled_fetcher_returns_placeholder() {
        let capture = DisabledProfileFetcher
            .fetch("https://www.instagram.com/acme/")
            .await;
        assert_eq!(capture, ProfileCapture::disabled("acme"));
    }
}
