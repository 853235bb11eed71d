//! Page scoring: folds the rule table into a bounded score.

use dpa_core::{AttributeRecord, ScoreDetails, ScoreReport, ScoreStatus};

use crate::rules::{Rule, BASE_SCORE, RULES};

pub const FAILURE_INSIGHT: &str = "analysis not possible";
pub const FAILURE_RECOMMENDATION: &str = "verify the URL is correct and reachable";

/// Running total while the rule table is folded.
struct Accumulator {
    score: i32,
    insights: Vec<String>,
    recommendations: Vec<String>,
}

impl Accumulator {
    fn new() -> Self {
        Self {
            score: BASE_SCORE,
            insights: Vec::new(),
            recommendations: Vec::new(),
        }
    }

    fn apply(mut self, rule: &Rule, record: &AttributeRecord) -> Self {
        self.score += rule.delta.value(record);
        self.insights.push(rule.insight.render(record));
        if let Some(rec) = rule.recommendation {
            self.recommendations.push(rec.to_string());
        }
        self
    }

    fn finish(self, details: ScoreDetails) -> ScoreReport {
        ScoreReport {
            score: u8::try_from(self.score.clamp(0, 100)).unwrap_or_default(),
            status: ScoreStatus::Completed,
            insights: self.insights,
            recommendations: self.recommendations,
            details,
        }
    }
}

/// Score one page.
///
/// A missing record, or one carrying an error message, yields the fixed
/// failure report with score 0 and no rule evaluated.
#[must_use]
pub fn score(record: Option<&AttributeRecord>) -> ScoreReport {
    match record {
        Some(record) if !record.is_failed() => RULES
            .iter()
            .filter(|rule| (rule.applies)(record))
            .fold(Accumulator::new(), |acc, rule| acc.apply(rule, record))
            .finish(details(record)),
        _ => failure_report(),
    }
}

#[must_use]
pub fn failure_report() -> ScoreReport {
    ScoreReport {
        score: 0,
        status: ScoreStatus::Error,
        insights: vec![FAILURE_INSIGHT.to_string()],
        recommendations: vec![FAILURE_RECOMMENDATION.to_string()],
        details: ScoreDetails::default(),
    }
}

fn details(record: &AttributeRecord) -> ScoreDetails {
    ScoreDetails {
        title_length: record.title_len().unwrap_or(0),
        description_length: record.description_len().unwrap_or(0),
        images_count: record.images.len(),
        links_count: record.links.len(),
    }
}

#[cfg(test)]
#[path = "scorer_test.rs"]
mod tests;
