//! Extractors that gather raw page, search and profile signals over HTTP.

pub mod client;
pub mod collect;
pub mod error;
mod html;
pub mod page;
pub mod profile;
mod retry;
mod rss;
pub mod search;

pub use client::{domain_of, normalize_url, HttpSettings};
pub use collect::{CollectRequest, Collected, Collector};
pub use error::ScraperError;
pub use page::{parse_page, PageClient};
pub use profile::{
    extract_handle, fetcher_from_config, parse_profile, DisabledProfileFetcher,
    HttpProfileFetcher, ProfileFetcher,
};
pub use search::SearchClient;
