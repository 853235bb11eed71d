//! Runs the page, search and profile extractors for one site concurrently.

use std::sync::Arc;

use dpa_core::{AppConfig, AttributeRecord, ProfileCapture, SearchSignals};

use crate::client::HttpSettings;
use crate::error::ScraperError;
use crate::page::PageClient;
use crate::profile::{fetcher_from_config, ProfileFetcher};
use crate::search::SearchClient;

/// What to gather for one analysis.
#[derive(Debug, Clone, Copy)]
pub struct CollectRequest<'a> {
    pub website_url: &'a str,
    /// Ignored when search is disabled in configuration.
    pub include_search: bool,
    /// Profile handle or URL; no profile section without it.
    pub profile: Option<&'a str>,
}

/// Raw extractor output, ready for scoring and report assembly.
#[derive(Debug, Clone)]
pub struct Collected {
    pub record: AttributeRecord,
    pub search: Option<SearchSignals>,
    pub profile: Option<ProfileCapture>,
}

/// Holds one client per extractor; cheap to share behind an `Arc`.
pub struct Collector {
    page: PageClient,
    search: Option<SearchClient>,
    profile: Arc<dyn ProfileFetcher>,
}

impl Collector {
    #[must_use]
    pub fn new(
        page: PageClient,
        search: Option<SearchClient>,
        profile: Arc<dyn ProfileFetcher>,
    ) -> Self {
        Self {
            page,
            search,
            profile,
        }
    }

    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if any HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, ScraperError> {
        let page = PageClient::new(HttpSettings::from_config(config))?;
        let search = if config.search_enabled {
            Some(SearchClient::from_config(config)?)
        } else {
            None
        };
        Ok(Self::new(page, search, fetcher_from_config(config)?))
    }

    /// Run the requested extractors. Never fails; each source degrades on
    /// its own.
    pub async fn collect(&self, request: CollectRequest<'_>) -> Collected {
        let search_client = self.search.as_ref().filter(|_| request.include_search);

        let (record, search, profile) = tokio::join!(
            self.page.fetch(request.website_url),
            async {
                match search_client {
                    Some(client) => Some(client.collect(request.website_url).await),
                    None => None,
                }
            },
            async {
                match request.profile {
                    Some(input) => Some(self.profile.fetch(input).await),
                    None => None,
                }
            },
        );

        tracing::info!(
            url = request.website_url,
            failed = record.is_failed(),
            search = search.is_some(),
            profile = profile.is_some(),
            "collection finished"
        );
        Collected {
            record,
            search,
            profile,
        }
    }
}
