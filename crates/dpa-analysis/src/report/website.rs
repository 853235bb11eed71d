//! Sections narrated from the page record and its score.

use dpa_core::{AttributeRecord, NarrativeSection, ScoreReport, SectionKind};

use super::render::{render_section, LineItem};
use crate::actions::is_slow;

pub const PERFORMANCE_ITEM: &str = "Performance optimization: load time is above the recommended 3 seconds. \
Optimize images, enable caching and minify assets to improve user experience and search ranking.";
pub const SEO_CONTENT_ITEM: &str = "SEO optimization: apply technical and content SEO. \
Build an editorial calendar around the keywords that matter to the business, refine titles and meta descriptions, \
and publish content that answers the audience's questions.";
pub const CRO_ITEM: &str = "Conversion rate optimization (CRO): review the conversion funnel for friction points. \
Make calls to action more prominent, simplify forms and create landing pages for each campaign.";
pub const UX_ITEM: &str = "User experience (UX): improve navigation and add more engaging visual content. \
Add chat, customer testimonials and social proof to build trust and lift conversion.";
pub const PAID_SEARCH_ITEM: &str = "Paid search: no paid ads were found for the business name. \
Intermediaries and aggregators can capture customers who are already searching for the business.";
pub const DIGITAL_PRESENCE_ITEM: &str = "Digital presence: the overall digital footprint shows room for a more \
integrated digital marketing strategy.";

pub(super) fn platform_section(record: &AttributeRecord) -> NarrativeSection {
    let status = if record.status_code == Some(200) {
        Some("the site is active and operational".to_string())
    } else {
        record
            .status_code
            .map(|code| format!("could not be confirmed (HTTP {code})"))
    };
    let ssl = if record.has_ssl {
        "SSL certificate (HTTPS) in place"
    } else {
        "no SSL certificate, a security concern"
    };

    let mut items = vec![
        LineItem::labeled("Platform", record.platform.clone(), "platform not identified"),
        LineItem::labeled("Developer", record.developer.clone(), "not identified"),
        LineItem::labeled("Operational status", status, "could not be confirmed"),
        LineItem::labeled("Security", Some(ssl.to_string()), ""),
    ];
    if let Some(error) = &record.error_message {
        items.push(LineItem::labeled("Fetch error", Some(error.clone()), ""));
    }
    render_section(
        SectionKind::Platform,
        format!("Website analysis: {}", record.url),
        &items,
    )
}

pub(super) fn score_section(score: &ScoreReport) -> NarrativeSection {
    let mut items = vec![LineItem::labeled(
        "Site score",
        Some(format!("{}/100", score.score)),
        "",
    )];
    items.extend(score.insights.iter().map(LineItem::bullet));
    items.extend(
        score
            .recommendations
            .iter()
            .map(|rec| LineItem::labeled("Recommendation", Some(rec.clone()), "")),
    );
    render_section(SectionKind::ScoreSummary, "Score summary", &items)
}

pub(super) fn improvements_section(record: &AttributeRecord) -> NarrativeSection {
    let first = if is_slow(record) {
        PERFORMANCE_ITEM
    } else {
        SEO_CONTENT_ITEM
    };
    let items = [
        LineItem::text(first),
        LineItem::text(CRO_ITEM),
        LineItem::text(UX_ITEM),
    ];
    render_section(SectionKind::Improvements, "Improvement opportunities", &items)
}

pub(super) fn marketing_section() -> NarrativeSection {
    let items = [
        LineItem::text(PAID_SEARCH_ITEM),
        LineItem::text(DIGITAL_PRESENCE_ITEM),
    ];
    render_section(SectionKind::MarketingNeeds, "Marketing needs", &items)
}
