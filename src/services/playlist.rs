//! Extended-M3U playlist parsing.
//!
//! The format is a strict two-line grammar: an `#EXTINF:` metadata line
//! followed, possibly after blank or comment lines, by a URL line. The parser
//! is a fold over lines threading an explicit two-state machine; a metadata
//! line never followed by a URL is silently dropped.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::StationRecord;

const METADATA_MARKER: &str = "#EXTINF:";

static TVG_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"tvg-name="([^"]*)""#).expect("valid regex"));
static TVG_LOGO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"tvg-logo="([^"]*)""#).expect("valid regex"));
static TVG_COUNTRY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"tvg-country="([^"]*)""#).expect("valid regex"));
static GROUP_TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"group-title="([^"]*)""#).expect("valid regex"));

/// Station metadata waiting for its URL line.
#[derive(Debug, Clone)]
struct PendingStation {
    name: String,
    tvg_name: Option<String>,
    logo: Option<String>,
    group: Option<String>,
    country: Option<String>,
}

impl PendingStation {
    fn finalize(self, url: &str) -> StationRecord {
        StationRecord {
            name: self.name,
            tvg_name: self.tvg_name,
            logo_url: self.logo.unwrap_or_default(),
            group: self.group,
            country: self.country,
            stream_url: url.to_string(),
        }
    }
}

/// Parser state: either looking for a metadata line, or holding one and
/// looking for its URL.
enum ParserState {
    AwaitingMetadata,
    AwaitingUrl(PendingStation),
}

/// Parse playlist text into station records, preserving playlist order.
pub fn parse_playlist(content: &str) -> Vec<StationRecord> {
    let (stations, _) = content.lines().fold(
        (Vec::new(), ParserState::AwaitingMetadata),
        |(mut stations, state), raw_line| {
            let line = raw_line.trim();

            let next = if let Some(rest) = line.strip_prefix(METADATA_MARKER) {
                // A new metadata line always starts a fresh pending station;
                // an unterminated previous one is dropped here.
                match parse_metadata(rest) {
                    Some(pending) => ParserState::AwaitingUrl(pending),
                    None => ParserState::AwaitingMetadata,
                }
            } else if !line.is_empty() && !line.starts_with('#') {
                match state {
                    ParserState::AwaitingUrl(pending) => {
                        stations.push(pending.finalize(line));
                        ParserState::AwaitingMetadata
                    }
                    ParserState::AwaitingMetadata => ParserState::AwaitingMetadata,
                }
            } else {
                state
            };

            (stations, next)
        },
    );
    stations
}

/// Parse the remainder of an `#EXTINF:` line into pending station metadata.
///
/// The line splits on the first comma into an attributes segment and a name
/// segment; each quoted attribute is optional and matched independently.
fn parse_metadata(rest: &str) -> Option<PendingStation> {
    let (attributes, name) = rest.split_once(',')?;

    let capture = |re: &Regex| {
        re.captures(attributes)
            .map(|caps| caps[1].to_string())
    };

    Some(PendingStation {
        name: name.trim().to_string(),
        tvg_name: capture(&TVG_NAME_RE),
        logo: capture(&TVG_LOGO_RE),
        group: capture(&GROUP_TITLE_RE),
        country: capture(&TVG_COUNTRY_RE),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_metadata_url_pairs() {
        let content = "#EXTM3U\n\
                       #EXTINF:-1 tvg-name=\"RadioA\" tvg-logo=\"http://l.example/a.png\" group-title=\"Pop\",Radio A\n\
                       http://stream.example/a.mp3\n\
                       #EXTINF:-1,Radio B\n\
                       http://stream.example/b.aac\n";
        let stations = parse_playlist(content);
        assert_eq!(stations.len(), 2);

        assert_eq!(stations[0].name, "Radio A");
        assert_eq!(stations[0].tvg_name.as_deref(), Some("RadioA"));
        assert_eq!(stations[0].logo_url, "http://l.example/a.png");
        assert_eq!(stations[0].group.as_deref(), Some("Pop"));
        assert_eq!(stations[0].stream_url, "http://stream.example/a.mp3");

        assert_eq!(stations[1].name, "Radio B");
        assert_eq!(stations[1].tvg_name, None);
        assert_eq!(stations[1].logo_url, "");
    }

    #[test]
    fn preserves_playlist_order_and_duplicates() {
        let content = "#EXTINF:-1,First\nhttp://s.example/dup\n\
                       #EXTINF:-1,Second\nhttp://s.example/dup\n";
        let stations = parse_playlist(content);
        assert_eq!(stations.len(), 2);
        assert_eq!(stations[0].name, "First");
        assert_eq!(stations[1].name, "Second");
    }

    #[test]
    fn blank_and_comment_lines_between_pair_are_skipped() {
        let content = "#EXTINF:-1,Radio A\n\n# a comment\nhttp://stream.example/a\n";
        let stations = parse_playlist(content);
        assert_eq!(stations.len(), 1);
        assert_eq!(stations[0].stream_url, "http://stream.example/a");
    }

    #[test]
    fn unterminated_metadata_is_dropped() {
        let content = "#EXTINF:-1,No Url At All\n";
        assert!(parse_playlist(content).is_empty());
    }

    #[test]
    fn metadata_line_replaces_pending_station() {
        let content = "#EXTINF:-1,Replaced\n\
                       #EXTINF:-1,Kept\n\
                       http://stream.example/kept\n";
        let stations = parse_playlist(content);
        assert_eq!(stations.len(), 1);
        assert_eq!(stations[0].name, "Kept");
    }

    #[test]
    fn url_without_metadata_is_ignored() {
        let content = "http://stream.example/orphan\n#EXTINF:-1,Radio A\nhttp://stream.example/a\n";
        let stations = parse_playlist(content);
        assert_eq!(stations.len(), 1);
        assert_eq!(stations[0].name, "Radio A");
    }

    #[test]
    fn record_count_equals_pair_count() {
        let content = "#EXTINF:-1,One\nhttp://s.example/1\n\
                       #EXTINF:-1,Dropped\n\
                       #EXTINF:-1,Two\nhttp://s.example/2\n\
                       http://s.example/orphan\n\
                       #EXTINF:-1,Three\nhttp://s.example/3\n";
        assert_eq!(parse_playlist(content).len(), 3);
    }

    #[test]
    fn country_attribute_is_kept_raw() {
        let content = "#EXTINF:-1 tvg-country=\"FR\" group-title=\"News\",Radio X\n\
                       http://example.com/stream.mp3\n";
        let stations = parse_playlist(content);
        assert_eq!(stations[0].country.as_deref(), Some("FR"));
        assert_eq!(stations[0].group.as_deref(), Some("News"));
        assert_eq!(stations[0].stream_url, "http://example.com/stream.mp3");
    }
}
