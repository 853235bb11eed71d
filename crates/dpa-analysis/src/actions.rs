//! Rule-based priority actions and business-type detection for a page.

use dpa_core::AttributeRecord;
use serde::{Deserialize, Serialize};

/// Load time above which a page is considered slow, in seconds.
pub const SLOW_LOAD_SECS: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Performance,
    Security,
    Seo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Critical,
    High,
    Medium,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityAction {
    pub kind: ActionKind,
    pub priority: Priority,
    pub title: String,
    pub description: String,
}

impl PriorityAction {
    fn new(kind: ActionKind, priority: Priority, title: &str, description: &str) -> Self {
        Self {
            kind,
            priority,
            title: title.to_string(),
            description: description.to_string(),
        }
    }
}

/// Technical fixes worth raising first, derived from page facts.
///
/// Failed fetches produce no actions.
#[must_use]
pub fn priority_actions(record: &AttributeRecord) -> Vec<PriorityAction> {
    if record.is_failed() {
        return Vec::new();
    }

    let mut actions = Vec::new();
    if is_slow(record) {
        actions.push(PriorityAction::new(
            ActionKind::Performance,
            Priority::High,
            "Performance optimization",
            "Page load time is high. Optimize images and enable caching.",
        ));
    }
    if !record.has_ssl {
        actions.push(PriorityAction::new(
            ActionKind::Security,
            Priority::Critical,
            "Enable SSL",
            "Site is served without an SSL certificate. Install one urgently.",
        ));
    }
    if record.description_len().is_none() {
        actions.push(PriorityAction::new(
            ActionKind::Seo,
            Priority::Medium,
            "Meta description",
            "Add meta descriptions to improve search visibility.",
        ));
    }
    actions
}

pub(crate) fn is_slow(record: &AttributeRecord) -> bool {
    record.load_time_secs.is_some_and(|t| t > SLOW_LOAD_SECS)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BusinessType {
    Hospitality,
    Restaurant,
    Ecommerce,
    Services,
    Health,
    Education,
    General,
}

/// Keyword buckets, checked in order; the first bucket with a hit wins.
const BUSINESS_KEYWORDS: &[(BusinessType, &[&str])] = &[
    (
        BusinessType::Hospitality,
        &["hotel", "pousada", "resort", "hospedagem", "reserva", "booking"],
    ),
    (
        BusinessType::Restaurant,
        &["restaurante", "restaurant", "cardápio", "menu", "delivery", "comida"],
    ),
    (
        BusinessType::Ecommerce,
        &["loja", "shop", "store", "comprar", "carrinho", "produto", "preço"],
    ),
    (
        BusinessType::Services,
        &["serviços", "services", "consultoria", "consulting", "atendimento"],
    ),
    (
        BusinessType::Health,
        &["clínica", "clinic", "médico", "saúde", "health", "tratamento"],
    ),
    (
        BusinessType::Education,
        &["curso", "course", "escola", "school", "ensino", "educação", "aula"],
    ),
];

/// Classify a business from its page title and any other page text.
#[must_use]
pub fn detect_business_type(title: Option<&str>, content_hint: Option<&str>) -> BusinessType {
    let haystack = format!(
        "{} {}",
        title.unwrap_or_default(),
        content_hint.unwrap_or_default()
    )
    .to_lowercase();

    BUSINESS_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| haystack.contains(kw)))
        .map_or(BusinessType::General, |(kind, _)| *kind)
}
