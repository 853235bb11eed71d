//! Declarative scoring rules for a fetched page.
//!
//! Each rule pairs a predicate over an [`AttributeRecord`] with a score
//! delta, an insight and an optional recommendation. The table is evaluated
//! top to bottom; rules within one group have mutually exclusive predicates.

use dpa_core::AttributeRecord;

// ---------------------------------------------------------------------------
// Thresholds
// ---------------------------------------------------------------------------

/// Starting score before any rule fires.
pub const BASE_SCORE: i32 = 50;

pub const TITLE_MIN_CHARS: usize = 30;
pub const TITLE_MAX_CHARS: usize = 60;
pub const DESCRIPTION_MIN_CHARS: usize = 120;
pub const DESCRIPTION_MAX_CHARS: usize = 160;

/// Penalty per image without alt text, and the most it may subtract.
pub const MISSING_ALT_WEIGHT: i32 = -2;
pub const MISSING_ALT_CAP: i32 = 10;
/// Bonus per external link, and the most it may add.
pub const EXTERNAL_LINK_WEIGHT: i32 = 1;
pub const EXTERNAL_LINK_CAP: i32 = 5;

const _: () = assert!(
    TITLE_MIN_CHARS < TITLE_MAX_CHARS && DESCRIPTION_MIN_CHARS < DESCRIPTION_MAX_CHARS,
    "length bands must be non-empty"
);

// ---------------------------------------------------------------------------
// Rule shape
// ---------------------------------------------------------------------------

pub type Predicate = fn(&AttributeRecord) -> bool;
pub type Counter = fn(&AttributeRecord) -> usize;

/// Score contribution of a rule that fired.
#[derive(Clone, Copy)]
pub enum Delta {
    Fixed(i32),
    /// `count * weight`, bounded to `[-cap, cap]`.
    PerItem { count: Counter, weight: i32, cap: i32 },
}

impl Delta {
    #[must_use]
    pub fn value(&self, record: &AttributeRecord) -> i32 {
        match *self {
            Delta::Fixed(v) => v,
            Delta::PerItem { count, weight, cap } => {
                let n = i32::try_from(count(record)).unwrap_or(i32::MAX);
                n.saturating_mul(weight).clamp(-cap, cap)
            }
        }
    }
}

/// Insight text of a rule that fired.
#[derive(Clone, Copy)]
pub enum Insight {
    Fixed(&'static str),
    /// Rendered as `"<count> <label>"`.
    Counted { count: Counter, label: &'static str },
}

impl Insight {
    #[must_use]
    pub fn render(&self, record: &AttributeRecord) -> String {
        match *self {
            Insight::Fixed(text) => text.to_string(),
            Insight::Counted { count, label } => format!("{} {label}", count(record)),
        }
    }
}

#[derive(Clone, Copy)]
pub struct Rule {
    pub id: &'static str,
    pub applies: Predicate,
    pub delta: Delta,
    pub insight: Insight,
    pub recommendation: Option<&'static str>,
}

// ---------------------------------------------------------------------------
// Predicates
// ---------------------------------------------------------------------------

fn title_missing(r: &AttributeRecord) -> bool {
    r.title_len().is_none()
}

fn title_too_long(r: &AttributeRecord) -> bool {
    r.title_len().is_some_and(|n| n > TITLE_MAX_CHARS)
}

fn title_too_short(r: &AttributeRecord) -> bool {
    r.title_len().is_some_and(|n| n < TITLE_MIN_CHARS)
}

fn title_adequate(r: &AttributeRecord) -> bool {
    r.title_len()
        .is_some_and(|n| (TITLE_MIN_CHARS..=TITLE_MAX_CHARS).contains(&n))
}

fn description_missing(r: &AttributeRecord) -> bool {
    r.description_len().is_none()
}

fn description_too_long(r: &AttributeRecord) -> bool {
    r.description_len().is_some_and(|n| n > DESCRIPTION_MAX_CHARS)
}

fn description_too_short(r: &AttributeRecord) -> bool {
    r.description_len().is_some_and(|n| n < DESCRIPTION_MIN_CHARS)
}

fn description_adequate(r: &AttributeRecord) -> bool {
    r.description_len()
        .is_some_and(|n| (DESCRIPTION_MIN_CHARS..=DESCRIPTION_MAX_CHARS).contains(&n))
}

fn missing_alt(r: &AttributeRecord) -> usize {
    r.missing_alt_count()
}

fn has_missing_alt(r: &AttributeRecord) -> bool {
    r.missing_alt_count() > 0
}

fn all_images_have_alt(r: &AttributeRecord) -> bool {
    !r.images.is_empty() && r.missing_alt_count() == 0
}

fn external_links(r: &AttributeRecord) -> usize {
    r.external_link_count()
}

fn has_external_links(r: &AttributeRecord) -> bool {
    r.external_link_count() > 0
}

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

/// Every page rule, in evaluation order.
pub const RULES: &[Rule] = &[
    Rule {
        id: "title_missing",
        applies: title_missing,
        delta: Delta::Fixed(-15),
        insight: Insight::Fixed("title missing"),
        recommendation: Some("add descriptive title"),
    },
    Rule {
        id: "title_too_long",
        applies: title_too_long,
        delta: Delta::Fixed(-5),
        insight: Insight::Fixed("title too long"),
        recommendation: Some("shorten below 60 chars"),
    },
    Rule {
        id: "title_too_short",
        applies: title_too_short,
        delta: Delta::Fixed(-3),
        insight: Insight::Fixed("title too short"),
        recommendation: Some("expand title"),
    },
    Rule {
        id: "title_adequate",
        applies: title_adequate,
        delta: Delta::Fixed(10),
        insight: Insight::Fixed("title length adequate"),
        recommendation: None,
    },
    Rule {
        id: "description_missing",
        applies: description_missing,
        delta: Delta::Fixed(-10),
        insight: Insight::Fixed("description missing"),
        recommendation: Some("add attractive meta description"),
    },
    Rule {
        id: "description_too_long",
        applies: description_too_long,
        delta: Delta::Fixed(-5),
        insight: Insight::Fixed("description too long"),
        recommendation: Some("shorten description below 160 chars"),
    },
    Rule {
        id: "description_too_short",
        applies: description_too_short,
        delta: Delta::Fixed(-3),
        insight: Insight::Fixed("description too short"),
        recommendation: Some("expand description"),
    },
    Rule {
        id: "description_adequate",
        applies: description_adequate,
        delta: Delta::Fixed(10),
        insight: Insight::Fixed("description length adequate"),
        recommendation: None,
    },
    Rule {
        id: "images_missing_alt",
        applies: has_missing_alt,
        delta: Delta::PerItem {
            count: missing_alt,
            weight: MISSING_ALT_WEIGHT,
            cap: MISSING_ALT_CAP,
        },
        insight: Insight::Counted {
            count: missing_alt,
            label: "images without alt text",
        },
        recommendation: Some("add alt text to all images"),
    },
    Rule {
        id: "images_all_alt",
        applies: all_images_have_alt,
        delta: Delta::Fixed(5),
        insight: Insight::Fixed("all images have alt text"),
        recommendation: None,
    },
    Rule {
        id: "external_links",
        applies: has_external_links,
        delta: Delta::PerItem {
            count: external_links,
            weight: EXTERNAL_LINK_WEIGHT,
            cap: EXTERNAL_LINK_CAP,
        },
        insight: Insight::Counted {
            count: external_links,
            label: "external links found",
        },
        recommendation: None,
    },
];

#[cfg(test)]
mod tests {
    use dpa_core::{ImageRef, LinkRef};

    use super::*;

    fn record_with_title(len: usize) -> AttributeRecord {
        let mut r = AttributeRecord::new("https://example.com");
        r.title = Some("t".repeat(len));
        r
    }

    fn fired(record: &AttributeRecord) -> Vec<&'static str> {
        RULES
            .iter()
            .filter(|rule| (rule.applies)(record))
            .map(|rule| rule.id)
            .collect()
    }

    #[test]
    fn rule_ids_are_unique() {
        let mut ids: Vec<_> = RULES.iter().map(|r| r.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), RULES.len());
    }

    #[test]
    fn title_rules_are_mutually_exclusive() {
        for len in [0, 1, 29, 30, 45, 60, 61, 200] {
            let record = record_with_title(len);
            let title_rules: Vec<_> = fired(&record)
                .into_iter()
                .filter(|id| id.starts_with("title_"))
                .collect();
            assert_eq!(title_rules.len(), 1, "len {len} fired {title_rules:?}");
        }
    }

    #[test]
    fn title_band_is_closed_at_both_ends() {
        assert!(fired(&record_with_title(30)).contains(&"title_adequate"));
        assert!(fired(&record_with_title(60)).contains(&"title_adequate"));
        assert!(fired(&record_with_title(29)).contains(&"title_too_short"));
        assert!(fired(&record_with_title(61)).contains(&"title_too_long"));
    }

    #[test]
    fn per_item_delta_is_capped() {
        let mut record = AttributeRecord::new("https://example.com");
        record.images = vec![ImageRef { has_alt: false }; 3];
        let penalty = Delta::PerItem {
            count: missing_alt,
            weight: MISSING_ALT_WEIGHT,
            cap: MISSING_ALT_CAP,
        };
        assert_eq!(penalty.value(&record), -6);

        record.images = vec![ImageRef { has_alt: false }; 10];
        assert_eq!(penalty.value(&record), -10);

        record.links = vec![LinkRef { is_external: true }; 7];
        let bonus = Delta::PerItem {
            count: external_links,
            weight: EXTERNAL_LINK_WEIGHT,
            cap: EXTERNAL_LINK_CAP,
        };
        assert_eq!(bonus.value(&record), 5);
    }

    #[test]
    fn counted_insight_renders_count_then_label() {
        let mut record = AttributeRecord::new("https://example.com");
        record.links = vec![LinkRef { is_external: true }; 2];
        let insight = Insight::Counted {
            count: external_links,
            label: "external links found",
        };
        assert_eq!(insight.render(&record), "2 external links found");
    }

    #[test]
    fn no_images_fires_no_image_rule() {
        let record = AttributeRecord::new("https://example.com");
        assert!(!fired(&record).iter().any(|id| id.starts_with("images_")));
    }
}
