//! Page attribute extractor: fetches one URL and reads the facts the scorer
//! and report need from its HTML.

use std::collections::BTreeMap;
use std::sync::LazyLock;
use std::time::Instant;

use dpa_core::{AttributeRecord, ImageRef, LinkRef};
use regex::Regex;
use reqwest::{Client, StatusCode, Url};

use crate::client::{domain_of, normalize_url, rate_limited, HttpSettings};
use crate::error::ScraperError;
use crate::html;
use crate::retry::retry_with_backoff;

/// Substrings (matched against lowercased markup and headers) that identify a
/// CMS or storefront. Checked in order.
const PLATFORM_INDICATORS: &[(&str, &[&str])] = &[
    ("WordPress", &["wp-content", "wp-includes", "wordpress"]),
    ("Shopify", &["cdn.shopify.com", "myshopify.com", "shopify"]),
    ("Magento", &["mage/cookies.js", "skin/frontend", "magento"]),
    ("Joomla", &["/media/jui/", "option=com_", "joomla"]),
    ("Drupal", &["sites/default/files", "misc/drupal.js", "drupal"]),
    ("Wix", &["static.wixstatic.com", "wix.com"]),
    ("Squarespace", &["static1.squarespace.com", "squarespace"]),
];

const ANALYTICS_INDICATORS: &[&str] = &[
    "google-analytics.com",
    "googletagmanager.com",
    "gtag(",
    "ga('create'",
    "gtm-",
];

/// Platform name to hosts whose links count as a profile on that platform.
const SOCIAL_HOSTS: &[(&str, &[&str])] = &[
    ("facebook", &["facebook.com", "fb.com"]),
    ("instagram", &["instagram.com"]),
    ("twitter", &["twitter.com", "x.com"]),
    ("linkedin", &["linkedin.com"]),
    ("youtube", &["youtube.com", "youtu.be"]),
    ("whatsapp", &["whatsapp.com", "wa.me"]),
];

const AGENCY_KEYWORDS: &[&str] = &["agencia", "agência", "agency", "desenvolvedor", "developer", "webdesign"];

/// Longest developer credit kept; longer matches are footer prose.
const MAX_DEVELOPER_CHARS: usize = 80;

static DEVELOPER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:desenvolvido por|developed by|powered by|created by|criado por)\s*:?\s*([^|©]+)")
        .expect("valid developer regex")
});

/// Fetches pages and turns them into [`AttributeRecord`]s.
pub struct PageClient {
    client: Client,
    settings: HttpSettings,
}

struct RawPage {
    status: u16,
    headers: String,
    body: String,
    bytes: usize,
}

impl PageClient {
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the HTTP client cannot be built.
    pub fn new(settings: HttpSettings) -> Result<Self, ScraperError> {
        let client = settings.build_client()?;
        Ok(Self { client, settings })
    }

    /// Fetch `url` and extract its attributes.
    ///
    /// Never fails: a fetch that does not complete after retries yields
    /// [`AttributeRecord::failed`]. Non-2xx responses are still parsed and
    /// their status recorded.
    pub async fn fetch(&self, url: &str) -> AttributeRecord {
        let url = normalize_url(url);
        if let Err(reason) = Url::parse(&url) {
            return AttributeRecord::failed(url, format!("invalid URL: {reason}"));
        }

        let started = Instant::now();
        let result = retry_with_backoff(
            self.settings.max_retries,
            self.settings.backoff_base_ms,
            || self.fetch_raw(&url),
        )
        .await;
        let elapsed = started.elapsed().as_secs_f64();

        match result {
            Ok(raw) => {
                let mut record = parse_page(&url, &raw.body, &raw.headers);
                record.status_code = Some(raw.status);
                record.load_time_secs = Some((elapsed * 100.0).round() / 100.0);
                #[allow(clippy::cast_precision_loss)]
                let kb = raw.bytes as f64 / 1024.0;
                record.page_size_kb = Some((kb * 100.0).round() / 100.0);
                tracing::debug!(
                    url = %url,
                    status = raw.status,
                    load_time_secs = elapsed,
                    "fetched page"
                );
                record
            }
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "page fetch failed");
                AttributeRecord::failed(url, format!("could not reach the site: {e}"))
            }
        }
    }

    async fn fetch_raw(&self, url: &str) -> Result<RawPage, ScraperError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(rate_limited(&response, url));
        }
        let headers = response
            .headers()
            .iter()
            .map(|(k, v)| format!("{}: {}", k.as_str(), v.to_str().unwrap_or_default()))
            .collect::<Vec<_>>()
            .join("\n");
        let bytes = response.bytes().await?;
        Ok(RawPage {
            status: status.as_u16(),
            headers,
            bytes: bytes.len(),
            body: String::from_utf8_lossy(&bytes).into_owned(),
        })
    }
}

/// Extract page facts from HTML already in hand.
///
/// `header_blob` is the response headers as `name: value` lines; it feeds
/// platform detection (e.g. `x-powered-by`).
#[must_use]
pub fn parse_page(url: &str, body: &str, header_blob: &str) -> AttributeRecord {
    let mut record = AttributeRecord::new(url);
    let lowered = body.to_lowercase();
    let base = Url::parse(url).ok();
    let own_domain = domain_of(url);

    record.title = html::title(body);
    record.description = html::meta_content(body, "name", "description");
    record.platform = detect_platform(&lowered, &header_blob.to_lowercase());
    record.developer = detect_developer(body);
    record.has_analytics = ANALYTICS_INDICATORS.iter().any(|i| lowered.contains(i));

    record.images = html::IMG_TAG_RE
        .find_iter(body)
        .map(|m| ImageRef {
            has_alt: html::attr(m.as_str(), "alt").is_some(),
        })
        .collect();

    let mut social_links = BTreeMap::new();
    let mut links = Vec::new();
    for caps in html::ANCHOR_RE.captures_iter(body) {
        let Some(href) = html::attr(&caps[1], "href") else {
            continue;
        };
        let Some(resolved) = resolve_link(base.as_ref(), &href) else {
            continue;
        };
        let host = resolved
            .host_str()
            .map(|h| h.trim_start_matches("www.").to_ascii_lowercase());
        links.push(LinkRef {
            is_external: host.as_deref() != own_domain.as_deref(),
        });
        if let Some(platform) = host.as_deref().and_then(social_platform) {
            social_links
                .entry(platform.to_string())
                .or_insert_with(|| resolved.to_string());
        }
    }
    record.links = links;
    record.social_links = social_links;
    record
}

fn resolve_link(base: Option<&Url>, href: &str) -> Option<Url> {
    let lower = href.to_ascii_lowercase();
    if lower.starts_with('#')
        || lower.starts_with("mailto:")
        || lower.starts_with("tel:")
        || lower.starts_with("javascript:")
    {
        return None;
    }
    let resolved = match base {
        Some(base) => base.join(href).ok()?,
        None => Url::parse(href).ok()?,
    };
    matches!(resolved.scheme(), "http" | "https").then_some(resolved)
}

fn social_platform(host: &str) -> Option<&'static str> {
    SOCIAL_HOSTS.iter().find_map(|(platform, hosts)| {
        hosts
            .iter()
            .any(|h| host == *h || host.ends_with(&format!(".{h}")))
            .then_some(*platform)
    })
}

fn detect_platform(lowered_body: &str, lowered_headers: &str) -> Option<String> {
    PLATFORM_INDICATORS
        .iter()
        .find(|(_, indicators)| {
            indicators
                .iter()
                .any(|i| lowered_body.contains(i) || lowered_headers.contains(i))
        })
        .map(|(name, _)| (*name).to_string())
}

/// Footer credit first, then `<meta name="generator">`, then agency links.
fn detect_developer(body: &str) -> Option<String> {
    let from_footer = html::FOOTER_RE.captures(body).and_then(|caps| {
        let text = html::strip_tags(&caps[1]);
        let credit = DEVELOPER_RE.captures(&text)?;
        let name = credit[1].trim().trim_end_matches(['.', ',', '-']).trim();
        (!name.is_empty() && name.chars().count() <= MAX_DEVELOPER_CHARS)
            .then(|| name.to_string())
    });
    if from_footer.is_some() {
        return from_footer;
    }

    if let Some(generator) = html::meta_content(body, "name", "generator") {
        return Some(generator);
    }

    html::ANCHOR_RE.captures_iter(body).find_map(|caps| {
        let href = html::attr(&caps[1], "href").unwrap_or_default().to_lowercase();
        let text = html::strip_tags(&caps[2]);
        let lowered = text.to_lowercase();
        let hit = AGENCY_KEYWORDS
            .iter()
            .any(|kw| href.contains(kw) || lowered.contains(kw));
        (hit && !text.is_empty()).then_some(text)
    })
}

#[cfg(test)]
#[path = "page_test.rs"]
mod tests;
