//! RSS result-feed parsing.

use dpa_core::Snippet;
use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::ScraperError;
use crate::html::strip_tags;

/// Parse `<item>` entries into [`Snippet`]s, stopping after `max_items`.
///
/// Items without a title or link are skipped. HTML in descriptions is
/// stripped.
pub(crate) fn parse_items(
    xml: &str,
    context: &str,
    max_items: usize,
) -> Result<Vec<Snippet>, ScraperError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut items = Vec::new();
    let mut in_item = false;
    let mut current_tag = String::new();
    let mut title = String::new();
    let mut link = String::new();
    let mut description = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                if name == "item" {
                    in_item = true;
                    title.clear();
                    link.clear();
                    description.clear();
                }
                current_tag = name;
            }
            Ok(Event::End(e)) => {
                if e.name().as_ref() == b"item" && in_item {
                    in_item = false;
                    if !title.is_empty() && !link.is_empty() {
                        items.push(Snippet {
                            title: title.clone(),
                            url: link.clone(),
                            text: strip_tags(&description),
                        });
                        if items.len() >= max_items {
                            break;
                        }
                    }
                }
                current_tag.clear();
            }
            Ok(Event::Text(e)) => {
                if in_item {
                    let text = e.unescape().unwrap_or_default().into_owned();
                    append_field(&current_tag, &text, &mut title, &mut link, &mut description);
                }
            }
            Ok(Event::CData(e)) => {
                if in_item {
                    let text = String::from_utf8_lossy(e.as_ref()).into_owned();
                    append_field(&current_tag, &text, &mut title, &mut link, &mut description);
                }
            }
            Ok(Event::Eof) => break,
            Err(source) => {
                return Err(ScraperError::Xml {
                    context: context.to_owned(),
                    source,
                })
            }
            _ => {}
        }
    }

    Ok(items)
}

fn append_field(
    tag: &str,
    text: &str,
    title: &mut String,
    link: &mut String,
    description: &mut String,
) {
    let target = match tag {
        "title" => title,
        "link" => link,
        "description" => description,
        _ => return,
    };
    if !target.is_empty() {
        target.push(' ');
    }
    target.push_str(text.trim());
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<rss version="2.0"><channel>
  <title>Search results</title>
  <item>
    <title>Pousada Mar Azul - Reviews</title>
    <link>https://reviews.example.org/mar-azul</link>
    <description>Excellent stay &amp; friendly staff</description>
  </item>
  <item>
    <title>No link here</title>
    <description>skipped</description>
  </item>
  <item>
    <title><![CDATA[Mar Azul on <b>Instagram</b>]]></title>
    <link>https://www.instagram.com/pousadamarazul/</link>
    <description><![CDATA[<p>Photos and <b>videos</b></p>]]></description>
  </item>
</channel></rss>"#;

    #[test]
    fn parses_items_with_title_and_link() {
        let items = parse_items(FEED, "test", 10).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "Pousada Mar Azul - Reviews");
        assert_eq!(items[0].url, "https://reviews.example.org/mar-azul");
        assert_eq!(items[0].text, "Excellent stay & friendly staff");
        assert_eq!(items[1].url, "https://www.instagram.com/pousadamarazul/");
        assert_eq!(items[1].text, "Photos and videos");
    }

    #[test]
    fn stops_at_max_items() {
        let items = parse_items(FEED, "test", 1).unwrap();
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn channel_title_is_not_an_item() {
        let items = parse_items(FEED, "test", 10).unwrap();
        assert!(items.iter().all(|i| i.title != "Search results"));
    }

    #[test]
    fn malformed_xml_is_an_error() {
        let result = parse_items("<rss><channel><item><title>x</item>", "test", 10);
        assert!(matches!(result, Err(ScraperError::Xml { .. })));
    }

    #[test]
    fn empty_feed_has_no_items() {
        let items = parse_items("<rss><channel></channel></rss>", "test", 10).unwrap();
        assert!(items.is_empty());
    }
}
