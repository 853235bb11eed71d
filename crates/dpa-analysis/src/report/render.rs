use dpa_core::{NarrativeSection, SectionKind};

/// Shown when a section would otherwise have no lines.
pub const EMPTY_SECTION_LINE: &str = "not available";

/// One report line: an optional label, a value, and what to say when the
/// value is absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    pub label: Option<&'static str>,
    pub value: Option<String>,
    pub fallback: &'static str,
}

impl LineItem {
    /// A bare line of text.
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self {
            label: None,
            value: Some(value.into()),
            fallback: EMPTY_SECTION_LINE,
        }
    }

    /// `"<label>: <value>"`, or `"<label>: <fallback>"` when `value` is `None`.
    #[must_use]
    pub fn labeled(label: &'static str, value: Option<String>, fallback: &'static str) -> Self {
        Self {
            label: Some(label),
            value,
            fallback,
        }
    }

    /// A bullet under a group heading.
    #[must_use]
    pub fn bullet(value: impl Into<String>) -> Self {
        Self::text(format!("• {}", value.into()))
    }

    #[must_use]
    pub fn render(&self) -> String {
        let body = self.value.as_deref().unwrap_or(self.fallback);
        match self.label {
            Some(label) => format!("{label}: {body}"),
            None => body.to_string(),
        }
    }
}

/// Render typed line items into a section. Never yields an empty section.
#[must_use]
pub fn render_section(
    kind: SectionKind,
    title: impl Into<String>,
    items: &[LineItem],
) -> NarrativeSection {
    let mut lines: Vec<String> = items.iter().map(LineItem::render).collect();
    if lines.is_empty() {
        lines.push(EMPTY_SECTION_LINE.to_string());
    }
    NarrativeSection {
        kind,
        title: title.into(),
        lines,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labeled_value_renders_with_label() {
        let item = LineItem::labeled("Platform", Some("WordPress".to_string()), "x");
        assert_eq!(item.render(), "Platform: WordPress");
    }

    #[test]
    fn absent_value_renders_fallback() {
        let item = LineItem::labeled("Platform", None, "platform not identified");
        assert_eq!(item.render(), "Platform: platform not identified");
    }

    #[test]
    fn bullet_is_prefixed() {
        assert_eq!(LineItem::bullet("do this").render(), "• do this");
    }

    #[test]
    fn empty_section_gets_placeholder_line() {
        let section = render_section(SectionKind::Profile, "Profile", &[]);
        assert_eq!(section.lines, vec![EMPTY_SECTION_LINE.to_string()]);
    }
}
