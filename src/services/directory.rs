//! Directory scraping service.
//!
//! Walks the directory listing page for detail-page links, then extracts one
//! radio candidate per detail page: name, title, description, logo, and the
//! best stream discovered in the raw page text.

use std::collections::HashSet;
use std::time::Duration;

use reqwest::Client;
use scraper::{Html, Selector};

use crate::error::Result;
use crate::models::{DirectoryConfig, HttpConfig, RadioCandidate, SelectedStream};
use crate::services::streams::{self, StreamMatcher};
use crate::utils::{get_domain, http::fetch_page, resolve, title_case};

/// Headings longer than this are notice text, not a station title.
const MAX_HEADING_CHARS: usize = 100;

/// Paragraphs at or below this length carry no useful description.
const MIN_PARAGRAPH_CHARS: usize = 20;

const IMAGE_EXTENSIONS: [&str; 4] = [".png", ".jpg", ".jpeg", ".gif"];

/// Service for scraping radio stations from the directory site.
pub struct DirectoryScraper<'a> {
    client: &'a Client,
    config: DirectoryConfig,
    matchers: Vec<StreamMatcher>,
    request_delay: Duration,
}

impl<'a> DirectoryScraper<'a> {
    /// Create a new directory scraper with the default stream matchers.
    pub fn new(client: &'a Client, config: &DirectoryConfig, http: &HttpConfig) -> Self {
        Self {
            client,
            config: config.clone(),
            matchers: streams::default_matchers(),
            request_delay: Duration::from_millis(http.request_delay_ms),
        }
    }

    /// Fetch the listing page and process every discovered detail page
    /// sequentially, sleeping between requests.
    ///
    /// Only candidates with a selected stream are retained; fetch failures
    /// are logged and skipped, never fatal to the batch.
    pub async fn scrape_all(&self) -> Result<Vec<RadioCandidate>> {
        let document = match fetch_page(self.client, &self.config.base_url).await {
            Ok(doc) => doc,
            Err(e) => {
                log::error!(
                    "Failed to fetch directory listing {}: {}",
                    self.config.base_url,
                    e
                );
                return Ok(Vec::new());
            }
        };

        let links = extract_station_links(&document, &self.config);
        log::info!("Found {} radio links", links.len());

        let mut candidates = Vec::new();
        for (index, link) in links.iter().enumerate() {
            log::info!("Processing radio {}/{}: {}", index + 1, links.len(), link);

            match self.extract_station(link).await {
                Ok(candidate) if candidate.has_stream() => {
                    log::info!("Successfully extracted: {}", candidate.name);
                    candidates.push(candidate);
                }
                Ok(_) => log::warn!("No stream found for: {}", link),
                Err(e) => log::warn!("Failed to process {}: {}", link, e),
            }

            if !self.request_delay.is_zero() {
                tokio::time::sleep(self.request_delay).await;
            }
        }

        Ok(candidates)
    }

    /// Fetch one detail page and extract its radio candidate.
    pub async fn extract_station(&self, page_url: &str) -> Result<RadioCandidate> {
        let document = fetch_page(self.client, page_url).await?;
        Ok(self.extract_from_document(&document, page_url))
    }

    /// Extract a radio candidate from already-parsed detail-page markup.
    pub fn extract_from_document(&self, document: &Html, page_url: &str) -> RadioCandidate {
        // Joined with a space so URLs in adjacent text nodes stay separated.
        let text = document
            .root_element()
            .text()
            .collect::<Vec<_>>()
            .join(" ");
        let streams =
            streams::collect_stream_options(&text, &self.matchers, &self.config.denylist);
        let selected = streams::select_best_stream(&streams).map(|best| SelectedStream {
            url: best.url.clone(),
            bitrate_kbps: best.bitrate_kbps,
        });

        if let Some(ref stream) = selected {
            log::debug!("Selected best stream: {}", stream.quality_label());
        }

        RadioCandidate {
            page_url: page_url.to_string(),
            name: station_name_from_url(page_url, &self.config.link_marker),
            title: extract_title(document),
            description: extract_description(document),
            logo_url: extract_logo(document, page_url),
            streams,
            selected,
        }
    }
}

/// Extract detail-page links from the listing page markup.
///
/// An href qualifies when it contains the configured marker substring and
/// resolves to the configured host. Duplicates are suppressed, first-seen
/// order preserved.
pub fn extract_station_links(document: &Html, config: &DirectoryConfig) -> Vec<String> {
    let link_selector = Selector::parse("a[href]").unwrap();

    let mut seen = HashSet::new();
    let mut links = Vec::new();
    for element in document.select(&link_selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        if !href.contains(&config.link_marker) {
            continue;
        }
        let Some(full_url) = resolve(&config.base_url, href) else {
            continue;
        };
        if get_domain(&full_url).as_deref() != Some(config.host.as_str()) {
            continue;
        }
        if seen.insert(full_url.clone()) {
            links.push(full_url);
        }
    }
    links
}

/// Canonical station name from the detail-page URL: the marker path segment
/// with the marker prefix and file extension stripped, separators spaced,
/// title-cased.
fn station_name_from_url(page_url: &str, marker: &str) -> String {
    page_url
        .split('/')
        .find(|segment| segment.contains(marker))
        .map(|segment| {
            let cleaned = segment
                .replace(marker, "")
                .replace(".html", "")
                .replace('-', " ");
            title_case(&cleaned)
        })
        .unwrap_or_default()
}

/// Page title, overridden by the first reasonably short heading.
fn extract_title(document: &Html) -> String {
    let title_selector = Selector::parse("title").unwrap();
    let mut title = document
        .select(&title_selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .unwrap_or_default();

    let heading_selector = Selector::parse("h1, h2, h3").unwrap();
    for heading in document.select(&heading_selector) {
        let text: String = heading.text().collect();
        let trimmed = text.trim();
        if !trimmed.is_empty() && trimmed.chars().count() < MAX_HEADING_CHARS {
            title = trimmed.to_string();
            break;
        }
    }
    title
}

/// First two substantial paragraphs, space-joined.
fn extract_description(document: &Html) -> String {
    let paragraph_selector = Selector::parse("p").unwrap();

    let mut parts = Vec::new();
    for paragraph in document.select(&paragraph_selector) {
        let text: String = paragraph.text().collect();
        let trimmed = text.trim();
        if trimmed.chars().count() > MIN_PARAGRAPH_CHARS && !trimmed.starts_with("http") {
            parts.push(trimmed.to_string());
            if parts.len() == 2 {
                break;
            }
        }
    }
    parts.join(" ")
}

/// First image that looks like a station logo, resolved absolute; empty
/// string when none is found.
fn extract_logo(document: &Html, page_url: &str) -> String {
    let img_selector = Selector::parse("img").unwrap();

    for img in document.select(&img_selector) {
        let src = img.value().attr("src").unwrap_or("");
        if src.is_empty() {
            continue;
        }
        let alt = img.value().attr("alt").unwrap_or("").to_lowercase();
        if alt.contains("logo")
            || alt.contains("radio")
            || IMAGE_EXTENSIONS.iter().any(|ext| src.ends_with(ext))
        {
            return resolve(page_url, src).unwrap_or_else(|| src.to_string());
        }
    }
    String::new()
}
