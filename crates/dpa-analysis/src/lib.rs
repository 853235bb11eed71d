//! Scoring and report assembly for digital presence analysis.
//!
//! Everything here is synchronous and pure: a page record goes through the
//! rule table in [`rules`] to produce a [`dpa_core::ScoreReport`], and
//! [`report::assemble`] narrates it together with any search and profile
//! signals.

pub mod actions;
pub mod analysis;
pub mod report;
pub mod rules;
pub mod scorer;
pub mod sentiment;

pub use actions::{detect_business_type, priority_actions, BusinessType, PriorityAction};
pub use analysis::{analyze, Analysis, WebsiteAnalysis};
pub use report::{assemble, flatten, CALL_TO_ACTION};
pub use scorer::score;
pub use sentiment::{tally, Sentiment, SentimentTally};
