//! RSS 2.0 feed document generation.
//!
//! Every station becomes one feed item so podcast clients list the whole set
//! as episodes of a single subscription. Serialization goes through the
//! quick-xml serde serializer; `@`-prefixed fields become attributes.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::Result;
use crate::models::{FeedConfig, StationRecord};

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;
const ITUNES_XMLNS: &str = "http://www.itunes.com/dtds/podcast-1.0.dtd";
const STREAM_MIME_TYPE: &str = "audio/mpeg";

/// Continuous live streams carry a fixed zero duration.
const CONTINUOUS_STREAM_DURATION: &str = "00:00:00";

/// RFC 2822 date layout used by RSS `pubDate`.
const PUB_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S +0000";

/// A complete RSS document.
#[derive(Debug, Serialize)]
#[serde(rename = "rss")]
pub struct RssDocument {
    #[serde(rename = "@version")]
    pub version: String,

    #[serde(rename = "@xmlns:itunes")]
    pub xmlns_itunes: String,

    pub channel: Channel,
}

/// Feed-level header plus the station items.
#[derive(Debug, Serialize)]
pub struct Channel {
    pub title: String,
    pub description: String,
    pub link: String,
    pub language: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ChannelImage>,

    #[serde(rename = "item")]
    pub items: Vec<Item>,
}

/// Optional channel-level image block.
#[derive(Debug, Serialize)]
pub struct ChannelImage {
    pub url: String,
    pub title: String,
    pub link: String,
}

/// One station rendered as a feed entry.
#[derive(Debug, Serialize)]
pub struct Item {
    pub title: String,
    pub description: String,
    pub link: String,

    /// Stable identifier: the stream URL verbatim
    pub guid: String,

    #[serde(rename = "pubDate")]
    pub pub_date: String,

    #[serde(rename = "itunes:duration")]
    pub duration: String,

    #[serde(rename = "itunes:explicit")]
    pub explicit: String,

    #[serde(rename = "itunes:image", skip_serializing_if = "Option::is_none")]
    pub image: Option<ItunesImage>,

    pub enclosure: Enclosure,
}

/// Entry-level image reference.
#[derive(Debug, Serialize)]
pub struct ItunesImage {
    #[serde(rename = "@href")]
    pub href: String,
}

/// Media reference pointing at the stream URL.
#[derive(Debug, Serialize)]
pub struct Enclosure {
    #[serde(rename = "@url")]
    pub url: String,

    #[serde(rename = "@type")]
    pub mime_type: String,

    #[serde(rename = "@length")]
    pub length: String,
}

/// Build the feed document for a station sequence.
///
/// The timestamp is captured once per document build and shared by every
/// item's `pubDate`.
pub fn build_feed(
    stations: &[StationRecord],
    config: &FeedConfig,
    built_at: DateTime<Utc>,
) -> RssDocument {
    let pub_date = built_at.format(PUB_DATE_FORMAT).to_string();

    let items = stations
        .iter()
        .map(|station| Item {
            title: station.name.clone(),
            description: format!("Live stream for {}", station.name),
            link: station.stream_url.clone(),
            guid: station.stream_url.clone(),
            pub_date: pub_date.clone(),
            duration: CONTINUOUS_STREAM_DURATION.to_string(),
            explicit: "no".to_string(),
            image: (!station.logo_url.is_empty()).then(|| ItunesImage {
                href: station.logo_url.clone(),
            }),
            enclosure: Enclosure {
                url: station.stream_url.clone(),
                mime_type: STREAM_MIME_TYPE.to_string(),
                length: "0".to_string(),
            },
        })
        .collect();

    RssDocument {
        version: "2.0".to_string(),
        xmlns_itunes: ITUNES_XMLNS.to_string(),
        channel: Channel {
            title: config.title.clone(),
            description: config.description.clone(),
            link: config.link.clone(),
            language: config.language.clone(),
            image: config.image.as_ref().map(|url| ChannelImage {
                url: url.clone(),
                title: config.title.clone(),
                link: config.link.clone(),
            }),
            items,
        },
    }
}

/// Serialize a feed document to pretty-printed XML with a declaration.
pub fn render_feed(document: &RssDocument) -> Result<String> {
    let mut body = String::new();
    let mut serializer = quick_xml::se::Serializer::new(&mut body);
    serializer.indent(' ', 2);
    document.serialize(serializer)?;
    Ok(format!("{XML_DECLARATION}\n{body}\n"))
}
