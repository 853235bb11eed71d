//! Shared data model, configuration and text rules for digital presence analysis.

pub mod app_config;
pub mod config;
pub mod counts;
pub mod narrative;
pub mod page;
pub mod profile;
pub mod score;
pub mod search;
pub mod validate;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use counts::{format_count, parse_count};
pub use narrative::{NarrativeReport, NarrativeSection, SectionKind};
pub use page::{AttributeRecord, ImageRef, LinkRef};
pub use profile::{ProfileCapture, ProfileRecord};
pub use score::{ScoreDetails, ScoreReport, ScoreStatus};
pub use search::{
    AdFindings, Competitor, MarketFindings, ReviewFindings, SearchSignals, SeoFindings, Signal,
    Snippet, SocialFindings,
};
pub use validate::{is_valid_bio, is_valid_username};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
