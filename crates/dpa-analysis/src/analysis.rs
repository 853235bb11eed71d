//! One full analysis from collected signals: score, actions, business type
//! and the narrated report.

use dpa_core::{AttributeRecord, NarrativeReport, ProfileCapture, ScoreReport, SearchSignals};
use serde::Serialize;

use crate::actions::{detect_business_type, priority_actions, BusinessType, PriorityAction};
use crate::report::assemble;
use crate::scorer::score;

#[derive(Debug, Clone, Serialize)]
pub struct WebsiteAnalysis {
    pub record: AttributeRecord,
    pub score: ScoreReport,
    pub priority_actions: Vec<PriorityAction>,
    pub business_type: BusinessType,
}

/// Everything the front ends return for one site.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub website: WebsiteAnalysis,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<SearchSignals>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<ProfileCapture>,
    pub report: NarrativeReport,
}

/// Score the page record and narrate it with whatever search and profile
/// signals were collected. Pure; no I/O.
#[must_use]
pub fn analyze(
    record: AttributeRecord,
    search: Option<SearchSignals>,
    profile: Option<ProfileCapture>,
) -> Analysis {
    let score = score(Some(&record));
    let report = assemble(&record, &score, search.as_ref(), profile.as_ref());
    let priority_actions = priority_actions(&record);
    let business_type = detect_business_type(record.title.as_deref(), record.description.as_deref());

    Analysis {
        website: WebsiteAnalysis {
            record,
            score,
            priority_actions,
            business_type,
        },
        search,
        profile,
        report,
    }
}
