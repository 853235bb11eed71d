//! Sections narrated from search-derived signals.

use dpa_core::{NarrativeSection, SearchSignals, SectionKind, Signal};

use super::render::{render_section, LineItem};
use crate::sentiment::tally;

pub const NOT_EVALUATED: &str = "could not be evaluated";

/// Fewer platforms than this is called out as limited social presence.
pub const MIN_SOCIAL_PLATFORMS: usize = 2;
pub const MAX_STRATEGIES_PER_GROUP: usize = 3;

const SEO_STRATEGIES: &[&str] = &[
    "Run a local SEO strategy for the business's region",
    "Build an editorial calendar around the main services",
    "Improve page speed and the mobile experience",
    "Add structured data (schema markup) for the business",
];
const MARKETING_STRATEGIES: &[&str] = &[
    "Create an Instagram profile with attractive visual content",
    "Run Google Ads campaigns on the business name",
    "Set up remarketing campaigns",
    "Invest in content marketing",
];
const WEBSITE_STRATEGIES: &[&str] = &[
    "Make the main calls to action stand out",
    "Add more visual content such as videos",
    "Offer online chat",
    "Create campaign-specific landing pages",
];

fn signal_value<T>(signal: &Signal<T>, describe: impl FnOnce(&T) -> String) -> Option<String> {
    signal.found().map(describe)
}

pub(super) fn presence_section(signals: &SearchSignals) -> NarrativeSection {
    let seo = signal_value(&signals.seo, |seo| {
        format!(
            "{} indexed pages found; improvement opportunities in local search, content and technical structure",
            seo.indexed_pages
        )
    });

    let social = signal_value(&signals.social, |social| {
        let platforms: Vec<&str> = social
            .platforms
            .iter()
            .filter(|(_, links)| !links.is_empty())
            .map(|(name, _)| name.as_str())
            .collect();
        match (platforms.len() < MIN_SOCIAL_PLATFORMS, platforms.is_empty()) {
            (true, true) => "limited social presence".to_string(),
            (true, false) => format!("limited social presence (found: {})", platforms.join(", ")),
            (false, _) => format!("platforms found: {}", platforms.join(", ")),
        }
    });

    let ads = signal_value(&signals.ads, |ads| {
        if ads.has_ads() {
            format!("paid advertising detected ({} results)", ads.snippets.len())
        } else {
            "low advertising presence detected".to_string()
        }
    });

    let reputation = signal_value(&signals.reputation, |reviews| {
        if reviews.snippets.is_empty() {
            return "few reviews found online".to_string();
        }
        let sentiment = tally(reviews.snippets.iter().map(|s| s.text.as_str())).verdict();
        format!(
            "{} reviews found (sentiment: {sentiment})",
            reviews.snippets.len()
        )
    });

    let competitors = signal_value(&signals.market, |market| {
        format!("{} competitors identified", market.competitors.len())
    });

    let items = [
        LineItem::labeled("SEO status", seo, NOT_EVALUATED),
        LineItem::labeled("Social presence", social, NOT_EVALUATED),
        LineItem::labeled("Advertising", ads, NOT_EVALUATED),
        LineItem::labeled("Online reputation", reputation, NOT_EVALUATED),
        LineItem::labeled("Market", competitors, NOT_EVALUATED),
    ];
    render_section(
        SectionKind::SearchPresence,
        format!("Search presence: {}", signals.domain),
        &items,
    )
}

pub(super) fn strategies_section(signals: &SearchSignals) -> NarrativeSection {
    let has_instagram = signals.social.found().is_some_and(|social| {
        social
            .platforms
            .get("instagram")
            .is_some_and(|links| !links.is_empty())
    });

    let marketing = MARKETING_STRATEGIES
        .iter()
        .filter(|s| !(has_instagram && s.contains("Instagram")));

    let groups: [(&str, Vec<&&str>); 3] = [
        ("SEO and online visibility", SEO_STRATEGIES.iter().collect()),
        ("Digital marketing", marketing.collect()),
        ("Website improvements", WEBSITE_STRATEGIES.iter().collect()),
    ];

    let mut items = Vec::new();
    for (heading, strategies) in groups {
        items.push(LineItem::text(format!("{heading}:")));
        items.extend(
            strategies
                .into_iter()
                .take(MAX_STRATEGIES_PER_GROUP)
                .map(|s| LineItem::bullet(*s)),
        );
    }
    render_section(SectionKind::SearchStrategies, "Search strategies", &items)
}
