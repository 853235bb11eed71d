//! Regex-based tag and attribute extraction.
//!
//! Pages are read as flat text; these helpers pull out the handful of tags
//! the extractors need without building a DOM.

use std::sync::LazyLock;

use regex::Regex;

pub(crate) static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<title\b[^>]*>(.*?)</title>").expect("valid regex"));
pub(crate) static META_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<meta\b[^>]*>").expect("valid regex"));
pub(crate) static IMG_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<img\b[^>]*>").expect("valid regex"));
pub(crate) static ANCHOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<a\b([^>]*)>(.*?)</a>").expect("valid regex"));
pub(crate) static FOOTER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<footer\b[^>]*>(.*?)</footer>").expect("valid regex"));
static ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)([A-Za-z_:][-A-Za-z0-9_:.]*)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#)
        .expect("valid attr regex")
});
static SCRIPT_STYLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<(script|style)\b[^>]*>.*?</(script|style)>").expect("valid regex")
});

/// Value of attribute `name` on a single tag, entity-decoded and trimmed.
/// Empty values count as absent.
pub(crate) fn attr(tag: &str, name: &str) -> Option<String> {
    ATTR_RE.captures_iter(tag).find_map(|caps| {
        if !caps[1].eq_ignore_ascii_case(name) {
            return None;
        }
        let raw = caps
            .get(2)
            .or_else(|| caps.get(3))
            .or_else(|| caps.get(4))
            .map_or("", |m| m.as_str());
        let value = decode_entities(raw.trim());
        (!value.is_empty()).then_some(value)
    })
}

/// `content` of the first `<meta>` whose `key_attr` equals `key_value`.
pub(crate) fn meta_content(html: &str, key_attr: &str, key_value: &str) -> Option<String> {
    META_TAG_RE.find_iter(html).find_map(|m| {
        let tag = m.as_str();
        let key = attr(tag, key_attr)?;
        if key.eq_ignore_ascii_case(key_value) {
            attr(tag, "content")
        } else {
            None
        }
    })
}

/// Text of the `<title>` element, whitespace-normalized.
pub(crate) fn title(html: &str) -> Option<String> {
    let caps = TITLE_RE.captures(html)?;
    let text = strip_tags(&caps[1]);
    (!text.is_empty()).then_some(text)
}

/// Drop tags, scripts and styles; collapse whitespace; decode common entities.
pub(crate) fn strip_tags(html: &str) -> String {
    let without_code = SCRIPT_STYLE_RE.replace_all(html, " ");
    let mut out = String::with_capacity(without_code.len());
    let mut in_tag = false;
    for ch in without_code.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => {
                in_tag = false;
                out.push(' ');
            }
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    decode_entities(&out.split_whitespace().collect::<Vec<_>>().join(" "))
}

pub(crate) fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    text.replace("&nbsp;", " ")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}
