use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Snapshot of one page fetch, normalized into the facts the scorer reads.
///
/// Built either by the page extractor from a successful response or by
/// [`AttributeRecord::failed`]. A record carrying `error_message` never has
/// status, timing, or content fields populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeRecord {
    pub url: String,
    #[serde(default)]
    pub status_code: Option<u16>,
    #[serde(default)]
    pub load_time_secs: Option<f64>,
    #[serde(default)]
    pub has_ssl: bool,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub images: Vec<ImageRef>,
    #[serde(default)]
    pub links: Vec<LinkRef>,
    /// CMS or storefront detected from markup, e.g. `"WordPress"`.
    #[serde(default)]
    pub platform: Option<String>,
    /// Agency or developer credited in the footer or generator tag.
    #[serde(default)]
    pub developer: Option<String>,
    /// Social platform name to the first profile URL linked from the page.
    #[serde(default)]
    pub social_links: BTreeMap<String, String>,
    #[serde(default)]
    pub has_analytics: bool,
    #[serde(default)]
    pub page_size_kb: Option<f64>,
    #[serde(default)]
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    pub has_alt: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRef {
    pub is_external: bool,
}

impl AttributeRecord {
    /// An empty successful record for `url`; the extractor fills in the rest.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        let url = url.into();
        let has_ssl = is_https(&url);
        Self {
            url,
            status_code: None,
            load_time_secs: None,
            has_ssl,
            title: None,
            description: None,
            images: Vec::new(),
            links: Vec::new(),
            platform: None,
            developer: None,
            social_links: BTreeMap::new(),
            has_analytics: false,
            page_size_kb: None,
            error_message: None,
        }
    }

    /// A record for a fetch that did not complete.
    ///
    /// Only the URL, the scheme-derived SSL flag and the error message are
    /// kept.
    #[must_use]
    pub fn failed(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_message: Some(message.into()),
            ..Self::new(url)
        }
    }

    #[must_use]
    pub fn is_failed(&self) -> bool {
        self.error_message.is_some()
    }

    /// Title length in characters. An empty title counts as absent.
    #[must_use]
    pub fn title_len(&self) -> Option<usize> {
        non_empty_len(self.title.as_deref())
    }

    /// Meta description length in characters. An empty description counts as absent.
    #[must_use]
    pub fn description_len(&self) -> Option<usize> {
        non_empty_len(self.description.as_deref())
    }

    #[must_use]
    pub fn missing_alt_count(&self) -> usize {
        self.images.iter().filter(|i| !i.has_alt).count()
    }

    #[must_use]
    pub fn external_link_count(&self) -> usize {
        self.links.iter().filter(|l| l.is_external).count()
    }

    #[must_use]
    pub fn internal_link_count(&self) -> usize {
        self.links.len() - self.external_link_count()
    }
}

fn non_empty_len(value: Option<&str>) -> Option<usize> {
    value
        .map(|s| s.chars().count())
        .filter(|&len| len > 0)
}

fn is_https(url: &str) -> bool {
    url.get(..8)
        .is_some_and(|scheme| scheme.eq_ignore_ascii_case("https://"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_record_keeps_only_url_ssl_and_message() {
        let record = AttributeRecord::failed("https://example.com", "connection refused");
        assert!(record.is_failed());
        assert!(record.has_ssl);
        assert_eq!(record.error_message.as_deref(), Some("connection refused"));
        assert!(record.status_code.is_none());
        assert!(record.load_time_secs.is_none());
        assert!(record.title.is_none());
        assert!(record.images.is_empty());
        assert!(record.links.is_empty());
    }

    #[test]
    fn failed_http_record_has_no_ssl() {
        let record = AttributeRecord::failed("http://example.com", "timeout");
        assert!(!record.has_ssl);
    }

    #[test]
    fn lengths_count_characters_not_bytes() {
        let mut record = AttributeRecord::new("https://example.com");
        record.title = Some("Café à vista".to_string());
        assert_eq!(record.title_len(), Some(12));
    }

    #[test]
    fn empty_strings_count_as_absent() {
        let mut record = AttributeRecord::new("https://example.com");
        record.title = Some(String::new());
        record.description = Some(String::new());
        assert_eq!(record.title_len(), None);
        assert_eq!(record.description_len(), None);
    }

    #[test]
    fn link_and_image_counts() {
        let mut record = AttributeRecord::new("https://example.com");
        record.images = vec![
            ImageRef { has_alt: true },
            ImageRef { has_alt: false },
            ImageRef { has_alt: false },
        ];
        record.links = vec![
            LinkRef { is_external: true },
            LinkRef { is_external: false },
        ];
        assert_eq!(record.missing_alt_count(), 2);
        assert_eq!(record.external_link_count(), 1);
        assert_eq!(record.internal_link_count(), 1);
    }

    #[test]
    fn deserializes_minimal_json() {
        let record: AttributeRecord =
            serde_json::from_str(r#"{"url":"https://example.com","title":"Home"}"#).unwrap();
        assert_eq!(record.title.as_deref(), Some("Home"));
        assert!(record.images.is_empty());
        assert!(!record.is_failed());
    }
}
