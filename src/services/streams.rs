//! Stream candidate discovery, quality estimation, and best-stream selection.
//!
//! Candidate URLs are pulled out of raw page text by an ordered list of
//! independent matchers, so patterns can be added or removed without touching
//! the selection control flow.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::models::StreamOption;

/// Characters stripped from the end of a matched URL.
const TRAILING_PUNCTUATION: [char; 4] = ['.', ',', ';', ')'];

/// Number of characters of context kept on each side of a URL.
const CONTEXT_RADIUS: usize = 100;

static BITRATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+)\s*k?bps").expect("valid regex"));

/// A named, independent pattern for discovering stream URLs in page text.
pub struct StreamMatcher {
    pub name: &'static str,
    regex: Regex,
}

impl StreamMatcher {
    fn new(name: &'static str, pattern: &str) -> Self {
        Self {
            name,
            regex: Regex::new(pattern).expect("valid stream pattern"),
        }
    }

    /// All URL matches of this pattern, in order of appearance.
    pub fn find_all<'t>(&self, text: &'t str) -> Vec<&'t str> {
        self.regex.find_iter(text).map(|m| m.as_str()).collect()
    }
}

/// The default matcher list: explicit mp3 URLs, explicit aac URLs, URLs with
/// stream-like path segments, and URLs with an explicit port.
pub fn default_matchers() -> Vec<StreamMatcher> {
    vec![
        StreamMatcher::new("mp3", r#"(?i)https?://[^\s<>"]+\.mp3[^\s<>"]*"#),
        StreamMatcher::new("aac", r#"(?i)https?://[^\s<>"]+\.aac[^\s<>"]*"#),
        StreamMatcher::new(
            "keyword-path",
            r#"(?i)https?://[^\s<>"]+/[^\s<>"]*(?:stream|radio|live)[^\s<>"]*"#,
        ),
        StreamMatcher::new("explicit-port", r#"(?i)https?://[^\s<>"]+:\d+[^\s<>"]*"#),
    ]
}

/// Discover stream options in raw page text.
///
/// Matches from every matcher are unioned and deduplicated in first-seen
/// order. Each surviving URL is trimmed of trailing punctuation, checked
/// against the denylist, and paired with its surrounding context and an
/// estimated bitrate.
pub fn collect_stream_options(
    text: &str,
    matchers: &[StreamMatcher],
    denylist: &[String],
) -> Vec<StreamOption> {
    let mut seen = HashSet::new();
    let mut raw_urls = Vec::new();
    for matcher in matchers {
        for url in matcher.find_all(text) {
            if seen.insert(url) {
                raw_urls.push(url);
            }
        }
    }

    let mut options = Vec::new();
    for raw in raw_urls {
        let url = raw.trim_end_matches(TRAILING_PUNCTUATION);
        let lowered = url.to_lowercase();
        if denylist.iter().any(|entry| lowered.contains(entry)) {
            continue;
        }

        let context = context_window(text, url, CONTEXT_RADIUS);
        let bitrate_kbps = estimate_bitrate(&context);
        options.push(StreamOption {
            url: url.to_string(),
            context,
            bitrate_kbps,
        });
    }
    options
}

/// Estimate a bitrate in kbps from the text surrounding a stream URL.
///
/// An embedded value such as `192kbps` or `128 kbps` wins; otherwise the
/// format named in the text decides the default (mp3 128, aac 96, else 64).
pub fn estimate_bitrate(context: &str) -> u32 {
    if let Some(caps) = BITRATE_RE.captures(context) {
        if let Ok(bitrate) = caps[1].parse::<u32>() {
            return bitrate;
        }
    }

    let lowered = context.to_lowercase();
    if lowered.contains("mp3") {
        128
    } else if lowered.contains("aac") {
        96
    } else {
        64
    }
}

/// Select the best stream from a list of options.
///
/// An empty list yields `None`; a singleton is returned unconditionally.
/// Otherwise the highest-scoring option wins, ties going to the earlier one.
/// Format preference (mp3 over aac over anything else) dominates bitrate.
pub fn select_best_stream(options: &[StreamOption]) -> Option<&StreamOption> {
    match options {
        [] => None,
        [only] => Some(only),
        _ => {
            let mut best = &options[0];
            let mut best_score = stream_score(best);
            for option in &options[1..] {
                let score = stream_score(option);
                if score > best_score {
                    best = option;
                    best_score = score;
                }
            }
            Some(best)
        }
    }
}

/// Score one option: format bonus plus bitrate.
///
/// The 500-point gaps between format tiers exceed any realistic bitrate
/// difference, so the format decides first and bitrate breaks ties within a
/// tier.
fn stream_score(option: &StreamOption) -> u32 {
    let url = option.url.to_lowercase();
    let context = option.context.to_lowercase();

    let format_bonus = if url.contains(".mp3") || context.contains("mp3") {
        1000
    } else if url.contains(".aac") || context.contains("aac") {
        500
    } else {
        100
    };

    format_bonus + option.bitrate_kbps
}

/// Up to `radius` characters of text on each side of `needle`, trimmed.
///
/// Returns an empty string when the needle is not present. Slicing is
/// char-boundary safe for multi-byte text.
fn context_window(text: &str, needle: &str, radius: usize) -> String {
    let Some(pos) = text.find(needle) else {
        return String::new();
    };
    let end = pos + needle.len();

    let before: usize = text[..pos]
        .chars()
        .rev()
        .take(radius)
        .map(char::len_utf8)
        .sum();
    let after: usize = text[end..].chars().take(radius).map(char::len_utf8).sum();

    text[pos - before..end + after].trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option(url: &str, context: &str, bitrate_kbps: u32) -> StreamOption {
        StreamOption {
            url: url.to_string(),
            context: context.to_string(),
            bitrate_kbps,
        }
    }

    #[test]
    fn bitrate_from_embedded_value() {
        assert_eq!(estimate_bitrate("high quality 192kbps stream"), 192);
        assert_eq!(estimate_bitrate("flux 128 kbps mp3"), 128);
        assert_eq!(estimate_bitrate("Stream 96KBPS aac"), 96);
    }

    #[test]
    fn bitrate_format_defaults() {
        assert_eq!(estimate_bitrate("an MP3 stream"), 128);
        assert_eq!(estimate_bitrate("aac direct"), 96);
        assert_eq!(estimate_bitrate("just a link"), 64);
        assert_eq!(estimate_bitrate(""), 64);
    }

    #[test]
    fn bitrate_overflow_falls_back_to_defaults() {
        assert_eq!(estimate_bitrate("99999999999999999999kbps mp3"), 128);
    }

    #[test]
    fn select_empty_and_singleton() {
        assert!(select_best_stream(&[]).is_none());

        // A singleton is returned even when it would score worst.
        let only = vec![option("http://a.example/stream", "", 0)];
        assert_eq!(select_best_stream(&only), Some(&only[0]));
    }

    #[test]
    fn select_prefers_mp3_over_higher_bitrate_aac() {
        let options = vec![
            option("http://a.example/high.aac", "320kbps", 320),
            option("http://a.example/low.mp3", "64kbps", 64),
        ];
        let best = select_best_stream(&options).unwrap();
        assert_eq!(best.url, "http://a.example/low.mp3");
    }

    #[test]
    fn select_prefers_higher_bitrate_within_tier() {
        let options = vec![
            option("http://a.example/one.mp3", "128kbps", 128),
            option("http://a.example/two.mp3", "192kbps", 192),
        ];
        let best = select_best_stream(&options).unwrap();
        assert_eq!(best.url, "http://a.example/two.mp3");
    }

    #[test]
    fn select_breaks_ties_by_first_encountered() {
        let options = vec![
            option("http://a.example/first.mp3", "", 128),
            option("http://a.example/second.mp3", "", 128),
        ];
        let best = select_best_stream(&options).unwrap();
        assert_eq!(best.url, "http://a.example/first.mp3");
    }

    #[test]
    fn selected_score_is_maximal() {
        let options = vec![
            option("http://a.example/radio", "", 64),
            option("http://a.example/x.aac", "96kbps", 96),
            option("http://a.example/y.mp3", "128kbps", 128),
            option("http://a.example:8000/live", "320kbps", 320),
        ];
        let best = select_best_stream(&options).unwrap();
        let best_score = stream_score(best);
        for other in &options {
            assert!(best_score >= stream_score(other));
        }
    }

    #[test]
    fn collect_finds_and_dedupes_urls() {
        let text = "Flux MP3: http://radio.example/live.mp3 et encore \
                    http://radio.example/live.mp3 plus http://radio.example:8000/live";
        let options = collect_stream_options(text, &default_matchers(), &[]);
        let urls: Vec<_> = options.iter().map(|o| o.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "http://radio.example/live.mp3",
                "http://radio.example:8000/live"
            ]
        );
    }

    #[test]
    fn collect_trims_trailing_punctuation() {
        let text = "Ecoutez (http://radio.example/stream.mp3).";
        let options = collect_stream_options(text, &default_matchers(), &[]);
        assert_eq!(options[0].url, "http://radio.example/stream.mp3");
    }

    #[test]
    fn collect_applies_denylist() {
        let denylist = vec!["youtube".to_string(), "facebook".to_string()];
        let text = "http://youtube.com/live/abc et http://radio.example/live.mp3";
        let options = collect_stream_options(text, &default_matchers(), &denylist);
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].url, "http://radio.example/live.mp3");
    }

    #[test]
    fn collect_extracts_context_bitrate() {
        let text = "Flux direct 192kbps: http://radio.example/stream.mp3 en continu";
        let options = collect_stream_options(text, &default_matchers(), &[]);
        assert_eq!(options[0].bitrate_kbps, 192);
    }

    #[test]
    fn context_window_is_char_boundary_safe() {
        let padding = "é".repeat(150);
        let text = format!("{padding} http://radio.example/live.mp3 {padding}");
        let context = context_window(&text, "http://radio.example/live.mp3", 100);
        assert!(context.contains("http://radio.example/live.mp3"));
        assert!(context.chars().count() <= 100 * 2 + "http://radio.example/live.mp3".len());
    }
}
