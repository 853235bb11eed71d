use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Outcome of one search category.
///
/// A category that could not be collected carries the reason instead of
/// failing the whole analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Signal<T> {
    Found(T),
    Unavailable { reason: String },
}

impl<T> Signal<T> {
    #[must_use]
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Signal::Unavailable {
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn found(&self) -> Option<&T> {
        match self {
            Signal::Found(value) => Some(value),
            Signal::Unavailable { .. } => None,
        }
    }
}

/// One search result entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snippet {
    pub title: String,
    pub url: String,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeoFindings {
    /// Results returned for a `site:` query on the domain.
    pub indexed_pages: usize,
    pub snippets: Vec<Snippet>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SocialFindings {
    /// Platform name to result URLs mentioning the business there.
    pub platforms: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdFindings {
    pub snippets: Vec<Snippet>,
}

impl AdFindings {
    #[must_use]
    pub fn has_ads(&self) -> bool {
        !self.snippets.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewFindings {
    pub snippets: Vec<Snippet>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Competitor {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketFindings {
    pub competitors: Vec<Competitor>,
}

/// Search-derived presence indicators for one domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchSignals {
    pub domain: String,
    pub seo: Signal<SeoFindings>,
    pub social: Signal<SocialFindings>,
    pub ads: Signal<AdFindings>,
    pub reputation: Signal<ReviewFindings>,
    pub market: Signal<MarketFindings>,
}

impl SearchSignals {
    /// Signals with every category marked unavailable for the same reason.
    #[must_use]
    pub fn unavailable(domain: impl Into<String>, reason: &str) -> Self {
        Self {
            domain: domain.into(),
            seo: Signal::unavailable(reason),
            social: Signal::unavailable(reason),
            ads: Signal::unavailable(reason),
            reputation: Signal::unavailable(reason),
            market: Signal::unavailable(reason),
        }
    }
}
