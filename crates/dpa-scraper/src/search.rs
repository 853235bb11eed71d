//! Search presence extractor.
//!
//! Runs query families against a search engine's RSS result feed and
//! groups the results into per-category signals. Each category succeeds or
//! fails on its own.

use std::collections::{BTreeMap, HashSet};
use std::time::Duration;

use dpa_core::{
    AdFindings, AppConfig, Competitor, MarketFindings, ReviewFindings, SearchSignals, SeoFindings,
    Signal, Snippet, SocialFindings,
};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use reqwest::Client;

use crate::client::{domain_of, get_text, HttpSettings};
use crate::error::ScraperError;
use crate::retry::retry_with_backoff;
use crate::rss;

/// Results kept per query.
const MAX_RESULTS_PER_QUERY: usize = 20;
const MAX_COMPETITORS: usize = 10;

pub const SOCIAL_PLATFORMS: &[&str] = &["instagram", "facebook", "youtube", "linkedin", "twitter"];

const SEO_TERMS: &[&str] = &["seo", "otimização", "optimization", "ranking", "busca", "search"];
const AD_TERMS: &[&str] = &["anúncio", "ads", "publicidade", "advertising", "marketing", "sponsored"];
const REVIEW_TERMS: &[&str] = &["avaliação", "review", "experiência", "experience", "opinião", "opinion"];

/// Queries search feeds for one domain at a time.
pub struct SearchClient {
    client: Client,
    settings: HttpSettings,
    base_url: String,
    inter_request_delay: Duration,
}

/// Tracks requests within one `collect` call so the inter-request delay is
/// applied between queries but not before the first.
struct Session<'a> {
    search: &'a SearchClient,
    issued: usize,
}

impl SearchClient {
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the HTTP client cannot be built.
    pub fn new(
        settings: HttpSettings,
        base_url: impl Into<String>,
        inter_request_delay_ms: u64,
    ) -> Result<Self, ScraperError> {
        let client = settings.build_client()?;
        Ok(Self {
            client,
            settings,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            inter_request_delay: Duration::from_millis(inter_request_delay_ms),
        })
    }

    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, ScraperError> {
        Self::new(
            HttpSettings::from_config(config),
            config.search_base_url.clone(),
            config.search_inter_request_delay_ms,
        )
    }

    fn feed_url(&self, query: &str) -> String {
        let encoded = utf8_percent_encode(query, NON_ALPHANUMERIC);
        format!("{}/search?format=rss&q={encoded}", self.base_url)
    }

    /// Collect every category for the site at `url`.
    ///
    /// An unparseable URL marks every category unavailable.
    pub async fn collect(&self, url: &str) -> SearchSignals {
        let Some(domain) = domain_of(url) else {
            tracing::warn!(url, "search skipped: no domain in URL");
            return SearchSignals::unavailable(url, "no domain could be extracted from the URL");
        };

        let mut session = Session {
            search: self,
            issued: 0,
        };

        let seo = settle("seo", &domain, session.seo(&domain).await);
        let social = settle("social", &domain, session.social(&domain).await);
        let ads = settle("ads", &domain, session.ads(&domain).await);
        let reputation = settle("reputation", &domain, session.reviews(&domain).await);
        let market = settle("market", &domain, session.competitors(&domain).await);

        tracing::info!(domain, queries = session.issued, "search signals collected");
        SearchSignals {
            domain,
            seo,
            social,
            ads,
            reputation,
            market,
        }
    }
}

fn settle<T>(category: &str, domain: &str, result: Result<T, ScraperError>) -> Signal<T> {
    match result {
        Ok(found) => Signal::Found(found),
        Err(e) => {
            tracing::warn!(
                domain,
                source = category,
                error = %e,
                "search category unavailable"
            );
            Signal::unavailable(e.to_string())
        }
    }
}

impl Session<'_> {
    async fn query(&mut self, query: &str) -> Result<Vec<Snippet>, ScraperError> {
        if self.issued > 0 && !self.search.inter_request_delay.is_zero() {
            tokio::time::sleep(self.search.inter_request_delay).await;
        }
        self.issued += 1;

        let url = self.search.feed_url(query);
        let client = &self.search.client;
        let body = retry_with_backoff(
            self.search.settings.max_retries,
            self.search.settings.backoff_base_ms,
            || get_text(client, &url),
        )
        .await?;
        rss::parse_items(&body, query, MAX_RESULTS_PER_QUERY)
    }

    /// Run each query and keep results matching `keep`, deduplicated by URL.
    async fn gather(
        &mut self,
        queries: &[String],
        keep: impl Fn(&Snippet) -> bool,
    ) -> Result<Vec<Snippet>, ScraperError> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for query in queries {
            for snippet in self.query(query).await? {
                if keep(&snippet) && seen.insert(snippet.url.clone()) {
                    out.push(snippet);
                }
            }
        }
        Ok(out)
    }

    async fn seo(&mut self, domain: &str) -> Result<SeoFindings, ScraperError> {
        let indexed_pages = self.query(&format!("site:{domain}")).await?.len();
        let snippets = self
            .gather(
                &[
                    format!("\"{domain}\" SEO"),
                    format!("\"{domain}\" ranking"),
                ],
                |s| mentions_any(s, SEO_TERMS),
            )
            .await?;
        Ok(SeoFindings {
            indexed_pages,
            snippets,
        })
    }

    async fn social(&mut self, domain: &str) -> Result<SocialFindings, ScraperError> {
        let mut platforms = BTreeMap::new();
        for platform in SOCIAL_PLATFORMS {
            let results = self
                .query(&format!("site:{platform}.com \"{}\"", brand_stem(domain)))
                .await?;
            let links: Vec<String> = results
                .into_iter()
                .map(|s| s.url)
                .filter(|u| u.to_lowercase().contains(platform))
                .collect();
            platforms.insert((*platform).to_string(), links);
        }
        Ok(SocialFindings { platforms })
    }

    async fn ads(&mut self, domain: &str) -> Result<AdFindings, ScraperError> {
        let snippets = self
            .gather(
                &[
                    format!("\"{domain}\" Google Ads"),
                    format!("\"{domain}\" anúncio"),
                ],
                |s| mentions_any(s, AD_TERMS),
            )
            .await?;
        Ok(AdFindings { snippets })
    }

    async fn reviews(&mut self, domain: &str) -> Result<ReviewFindings, ScraperError> {
        let snippets = self
            .gather(
                &[
                    format!("\"{domain}\" review"),
                    format!("\"{domain}\" avaliação"),
                ],
                |s| mentions_any(s, REVIEW_TERMS),
            )
            .await?;
        Ok(ReviewFindings { snippets })
    }

    async fn competitors(&mut self, domain: &str) -> Result<MarketFindings, ScraperError> {
        let results = self
            .query(&format!("{} alternatives -site:{domain}", brand_stem(domain)))
            .await?;
        let mut seen_hosts = HashSet::new();
        let competitors = results
            .into_iter()
            .filter_map(|s| {
                let host = domain_of(&s.url)?;
                let own = host == domain || host.ends_with(&format!(".{domain}"));
                (!own && seen_hosts.insert(host)).then_some(Competitor {
                    name: s.title,
                    url: s.url,
                })
            })
            .take(MAX_COMPETITORS)
            .collect();
        Ok(MarketFindings { competitors })
    }
}

fn mentions_any(snippet: &Snippet, terms: &[&str]) -> bool {
    let haystack = format!("{} {}", snippet.title, snippet.text).to_lowercase();
    terms.iter().any(|t| haystack.contains(t))
}

/// First label of the domain, e.g. `"pousadamarazul"` for `pousadamarazul.com.br`.
fn brand_stem(domain: &str) -> &str {
    domain.split('.').next().unwrap_or(domain)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brand_stem_takes_first_label() {
        assert_eq!(brand_stem("pousadamarazul.com.br"), "pousadamarazul");
        assert_eq!(brand_stem("localhost"), "localhost");
    }

    #[test]
    fn mentions_any_checks_title_and_text() {
        let snippet = Snippet {
            title: "Great REVIEW".to_string(),
            url: "https://x.example".to_string(),
            text: String::new(),
        };
        assert!(mentions_any(&snippet, REVIEW_TERMS));
        assert!(!mentions_any(&snippet, AD_TERMS));
    }

    #[test]
    fn feed_url_percent_encodes_query() {
        let client = SearchClient::new(
            HttpSettings {
                timeout_secs: 5,
                user_agent: "test".to_string(),
                max_retries: 0,
                backoff_base_ms: 0,
            },
            "https://search.example/",
            0,
        )
        .unwrap();
        assert_eq!(
            client.feed_url("site:acme.com"),
            "https://search.example/search?format=rss&q=site%3Aacme%2Ecom"
        );
    }
}
