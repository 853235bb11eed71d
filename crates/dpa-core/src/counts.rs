//! Human-formatted follower/post counts, in both directions.

use std::sync::LazyLock;

use regex::Regex;

static SUFFIXED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+(?:[.,]\d+)?)\s*([a-zõã]+)").expect("valid count regex")
});
static THOUSANDS_COMMA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,3}(,\d{3})+$").expect("valid count regex"));
static THOUSANDS_DOT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,3}(\.\d{3})+$").expect("valid count regex"));

/// Parse a count as shown on profile pages: `"1.2K"`, `"3,4 mi"`, `"2M"`,
/// `"1,234"`, `"1.234 followers"`.
///
/// Returns `None` for empty or unparseable text.
#[must_use]
pub fn parse_count(text: &str) -> Option<u64> {
    let text = text.trim().to_lowercase();
    if text.is_empty() {
        return None;
    }

    if let Some(caps) = SUFFIXED_RE.captures(&text) {
        if let Some(multiplier) = suffix_multiplier(&caps[2]) {
            let number: f64 = caps[1].replace(',', ".").parse().ok()?;
            return Some(scale(number, multiplier));
        }
    }

    let digits: String = text
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.' || *c == ',')
        .collect();
    let digits = digits.trim_end_matches(['.', ',']);
    if digits.is_empty() {
        return None;
    }
    let plain = if THOUSANDS_COMMA_RE.is_match(digits) {
        digits.replace(',', "")
    } else if THOUSANDS_DOT_RE.is_match(digits) {
        digits.replace('.', "")
    } else {
        digits.to_string()
    };
    plain.parse().ok()
}

fn suffix_multiplier(suffix: &str) -> Option<f64> {
    match suffix {
        "k" | "mil" | "thousand" => Some(1_000.0),
        "m" | "mi" | "mn" | "million" | "milhão" | "milhões" => Some(1_000_000.0),
        _ => None,
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn scale(number: f64, multiplier: f64) -> u64 {
    (number * multiplier).round() as u64
}

/// Format a count for display: `1.2M`, `3.4K`, or the plain number.
/// Missing counts render as `N/A`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_count(count: Option<u64>) -> String {
    match count {
        None => "N/A".to_string(),
        Some(n) if n >= 1_000_000 => format!("{:.1}M", n as f64 / 1_000_000.0),
        Some(n) if n >= 1_000 => format!("{:.1}K", n as f64 / 1_000.0),
        Some(n) => n.to_string(),
    }
}
