//! Report assembly: turns a scored page plus optional search and profile
//! signals into titled sections and the flattened CRM text.

mod profile;
mod render;
mod search;
mod website;

use dpa_core::{
    AttributeRecord, NarrativeReport, NarrativeSection, ProfileCapture, ScoreReport, SearchSignals,
};

pub use profile::NO_RECENT_ACTIVITY;
pub use render::{render_section, LineItem, EMPTY_SECTION_LINE};
pub use search::{MAX_STRATEGIES_PER_GROUP, MIN_SOCIAL_PLATFORMS, NOT_EVALUATED};

/// Closing sentence appended to every CRM text.
pub const CALL_TO_ACTION: &str = "In our meeting we will deliver a more complete diagnosis \
and a personalized proposal to reach new results.";

/// Build the full report. Pure; no I/O.
#[must_use]
pub fn assemble(
    website: &AttributeRecord,
    score: &ScoreReport,
    search: Option<&SearchSignals>,
    profile: Option<&ProfileCapture>,
) -> NarrativeReport {
    let mut sections = vec![
        website::platform_section(website),
        website::score_section(score),
        website::improvements_section(website),
        website::marketing_section(),
    ];
    if let Some(signals) = search {
        sections.push(search::presence_section(signals));
        sections.push(search::strategies_section(signals));
    }
    if let Some(capture) = profile {
        sections.push(profile::profile_section(capture));
    }

    let text = flatten(&sections);
    NarrativeReport { sections, text }
}

/// Join sections into CRM text: title, blank line, then each line followed by
/// a blank line. The call to action closes the text.
#[must_use]
pub fn flatten(sections: &[NarrativeSection]) -> String {
    let mut out: Vec<&str> = Vec::new();
    for section in sections {
        out.push(&section.title);
        out.push("");
        for line in &section.lines {
            out.push(line);
            out.push("");
        }
    }
    out.push(CALL_TO_ACTION);
    out.join("\n")
}

#[cfg(test)]
mod tests;
