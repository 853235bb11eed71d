use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Platform,
    ScoreSummary,
    Improvements,
    MarketingNeeds,
    SearchPresence,
    SearchStrategies,
    Profile,
}

/// A titled block of report lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarrativeSection {
    pub kind: SectionKind,
    pub title: String,
    pub lines: Vec<String>,
}

/// Assembled report: the structured sections plus the flattened CRM text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarrativeReport {
    pub sections: Vec<NarrativeSection>,
    pub text: String,
}

impl NarrativeReport {
    #[must_use]
    pub fn section(&self, kind: SectionKind) -> Option<&NarrativeSection> {
        self.sections.iter().find(|s| s.kind == kind)
    }
}
