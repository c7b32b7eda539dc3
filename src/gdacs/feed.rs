use crate::domain::GeoPoint;
use crate::hazards::FeedEntry;
use quick_xml::NsReader;
use quick_xml::events::Event;
use quick_xml::name::{Namespace, ResolveResult};
use thiserror::Error;
use tracing::warn;

const GEORSS_NAMESPACE: &[u8] = b"http://www.georss.org/georss";

#[derive(Clone, Copy, Debug, PartialEq)]
enum Field {
    Title,
    Point,
}

struct PartialEntry {
    depth: usize,
    title: String,
    point: String,
    has_point: bool,
}

impl PartialEntry {
    fn at(depth: usize) -> Self {
        PartialEntry {
            depth,
            title: String::new(),
            point: String::new(),
            has_point: false,
        }
    }

    fn push(&mut self, field: Field, text: &str) {
        match field {
            Field::Title => self.title.push_str(text),
            Field::Point => {
                self.has_point = true;
                self.point.push_str(text);
            }
        }
    }

    fn finish(self) -> FeedEntry {
        let point = if self.has_point { parse_point(&self.point) } else { None };
        if self.has_point && point.is_none() {
            warn!(title = self.title, "⚠️ Ignoring malformed GeoRSS point '{}'", self.point);
        }

        FeedEntry {
            title: self.title.trim().to_string(),
            point,
        }
    }
}

/// Parses the `item`s of a GeoRSS feed, wherever they are nested.
///
/// Only the direct `title` and `georss:point` children of an item are read. The document must have a root
/// element and close every element it opens.
pub fn parse_feed(xml: &str) -> Result<Vec<FeedEntry>, FeedError> {
    let mut reader = NsReader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut entries = Vec::new();
    let mut current: Option<PartialEntry> = None;
    let mut field: Option<Field> = None;
    let mut depth = 0;
    let mut has_root = false;

    loop {
        match reader.read_resolved_event()? {
            (namespace, Event::Start(e)) => {
                depth += 1;
                has_root = true;
                field = None;
                if let Some(entry) = current.as_ref() {
                    if depth == entry.depth + 1 {
                        field = item_field(&namespace, e.local_name().as_ref());
                    }
                } else if e.local_name().as_ref() == b"item" {
                    current = Some(PartialEntry::at(depth));
                }
            }
            (_, Event::Empty(_)) => {
                has_root = true;
                field = None;
            }
            (_, Event::Text(text)) => {
                if let (Some(entry), Some(field)) = (current.as_mut(), field) {
                    entry.push(field, &text.unescape()?);
                }
            }
            (_, Event::CData(data)) => {
                if let (Some(entry), Some(field)) = (current.as_mut(), field) {
                    entry.push(field, &String::from_utf8_lossy(&data.into_inner()));
                }
            }
            (_, Event::End(_)) => {
                if current.as_ref().is_some_and(|entry| entry.depth == depth) {
                    if let Some(entry) = current.take() {
                        entries.push(entry.finish());
                    }
                }
                depth = depth.saturating_sub(1);
                field = None;
            }
            (_, Event::Eof) if !has_root => return Err(FeedError::NoRootElement),
            (_, Event::Eof) if depth > 0 => return Err(FeedError::Truncated(depth)),
            (_, Event::Eof) => break,
            _ => {}
        }
    }

    Ok(entries)
}

#[derive(Error, Debug)]
pub enum FeedError {
    #[error("invalid xml: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("the feed has no root element")]
    NoRootElement,
    #[error("the feed ends with {0} unclosed element(s)")]
    Truncated(usize),
}

fn item_field(namespace: &ResolveResult, local_name: &[u8]) -> Option<Field> {
    match (namespace, local_name) {
        (ResolveResult::Unbound, b"title") => Some(Field::Title),
        (ResolveResult::Bound(Namespace(ns)), b"point") if *ns == GEORSS_NAMESPACE => Some(Field::Point),
        _ => None,
    }
}

/// Parses a GeoRSS `"lat lon"` pair.
pub fn parse_point(text: &str) -> Option<GeoPoint> {
    let mut parts = text.split_whitespace().map(str::parse::<f64>);
    let latitude = parts.next()?.ok()?;
    let longitude = parts.next()?.ok()?;

    if parts.next().is_some() || !latitude.is_finite() || !longitude.is_finite() {
        return None;
    }
    Some(GeoPoint::new(latitude, longitude))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn parse_feed_reads_titles_and_points() -> Result<(), FeedError> {
        let entries = parse_feed(include_str!("../../tests/resources/gdacs_feed.xml"))?;

        assert_eq!(
            entries,
            vec![
                FeedEntry {
                    title: "Red flood alert in India".to_string(),
                    point: Some(GeoPoint::new(31.11, 77.11)),
                },
                FeedEntry {
                    title: "Orange earthquake alert (Magnitude 6.1M) in Japan".to_string(),
                    point: Some(GeoPoint::new(35.6, 139.7)),
                },
                FeedEntry {
                    title: "Orange drought alert in Kenya & Somalia".to_string(),
                    point: None,
                },
            ]
        );
        Ok(())
    }

    #[test]
    fn parse_feed_ignores_the_channel_title() -> Result<(), FeedError> {
        let xml = r#"<rss><channel><title>GDACS</title></channel></rss>"#;

        assert_eq!(parse_feed(xml)?, vec![]);
        Ok(())
    }

    #[test]
    fn parse_feed_requires_the_georss_namespace() -> Result<(), FeedError> {
        let xml = r#"<rss xmlns:other="http://example.com/other"><channel><item>
            <title>Cyclone</title><other:point>19.8 85.8</other:point>
        </item></channel></rss>"#;

        let entries = parse_feed(xml)?;

        assert_eq!(entries[0].point, None);
        Ok(())
    }

    #[test]
    fn parse_feed_keeps_an_entry_with_a_malformed_point() -> Result<(), FeedError> {
        let xml = r#"<rss xmlns:georss="http://www.georss.org/georss"><channel><item>
            <title><![CDATA[Wildfire]]></title><georss:point>north east</georss:point>
        </item></channel></rss>"#;

        let entries = parse_feed(xml)?;

        assert_eq!(
            entries,
            vec![FeedEntry {
                title: "Wildfire".to_string(),
                point: None
            }]
        );
        Ok(())
    }

    #[test]
    fn parse_feed_rejects_malformed_xml() {
        let result = parse_feed("<rss><channel><item><title>Flood</item></channel></rss>");

        assert!(result.is_err(), "expected an error, got {:?}", result);
    }

    #[test]
    fn parse_feed_rejects_a_body_without_xml() {
        let result = parse_feed("Service temporarily unavailable");

        assert!(matches!(result, Err(FeedError::NoRootElement)), "expected no root element, got {:?}", result);
    }

    #[test]
    fn parse_feed_rejects_a_truncated_document() {
        let xml = r#"<rss xmlns:georss="http://www.georss.org/georss"><channel>
            <item><title>Flood</title><georss:point>31.11 77.11</georss:point></item>
            <item><title>Cyclone</title>"#;

        let result = parse_feed(xml);

        assert!(matches!(result, Err(FeedError::Truncated(3))), "expected a truncated feed, got {:?}", result);
    }

    #[test]
    fn parse_feed_accepts_an_empty_root() -> Result<(), FeedError> {
        assert_eq!(parse_feed("<rss/>")?, vec![]);
        Ok(())
    }

    #[test]
    fn parse_feed_only_reads_direct_children_of_an_item() -> Result<(), FeedError> {
        let xml = r#"<rss xmlns:georss="http://www.georss.org/georss"><channel><item>
            <title>Flood</title>
            <image><title>Logo</title><georss:point>1.0 2.0</georss:point></image>
            <georss:point>31.11 77.11</georss:point>
        </item></channel></rss>"#;

        let entries = parse_feed(xml)?;

        assert_eq!(
            entries,
            vec![FeedEntry {
                title: "Flood".to_string(),
                point: Some(GeoPoint::new(31.11, 77.11)),
            }]
        );
        Ok(())
    }

    #[rstest]
    #[case::simple("31.11 77.11", Some(GeoPoint::new(31.11, 77.11)))]
    #[case::extra_whitespace("  -12.5\t130.25 \n", Some(GeoPoint::new(-12.5, 130.25)))]
    #[case::single_value("31.11", None)]
    #[case::three_values("31.11 77.11 12", None)]
    #[case::not_a_number("lat lon", None)]
    #[case::not_finite("NaN 77.11", None)]
    #[case::empty("", None)]
    fn parse_point_reads_a_latitude_longitude_pair(#[case] text: &str, #[case] expected: Option<GeoPoint>) {
        assert_eq!(parse_point(text), expected);
    }
}
