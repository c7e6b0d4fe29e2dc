//! HTML parser for extracting page metadata, text, and links
//!
//! This module turns raw HTML into the pieces the analyzer scores and the
//! engine crawls:
//! - Page title (from <title>)
//! - Favicon URL (from <link rel="...icon...">)
//! - Visible body text, whitespace-normalized
//! - Outbound absolute HTTP(S) links

use scraper::{Html, Selector};
use url::Url;

/// Extracted information from an HTML page
#[derive(Debug, Clone)]
pub struct ParsedPage {
    /// The page title (from <title> tag)
    pub title: Option<String>,

    /// The favicon URL, resolved against the page URL
    pub favicon: Option<String>,

    /// Visible body text, nodes joined with single spaces
    pub body_text: String,

    /// Outbound links (absolute URLs)
    pub links: Vec<String>,
}

/// Parses HTML content and extracts metadata, text, and links
///
/// # Link Extraction Rules
///
/// Only `<a href="...">` values that already start with `http` are kept and
/// resolved against `base_url` (a no-op for absolute URLs). Relative hrefs
/// are dropped, matching the reference crawler's behavior; same-site relative
/// links are therefore never discovered.
///
/// # Arguments
///
/// * `html` - The HTML content to parse
/// * `base_url` - The page's own URL, used to resolve the favicon href
///
/// # Example
///
/// ```
/// use lantern::crawler::parse_page;
/// use url::Url;
///
/// let html = r#"<html><head><title>Test</title></head><body>Hello</body></html>"#;
/// let base_url = Url::parse("https://example.com/").unwrap();
/// let parsed = parse_page(html, &base_url);
/// assert_eq!(parsed.title, Some("Test".to_string()));
/// assert_eq!(parsed.body_text, "Hello");
/// ```
pub fn parse_page(html: &str, base_url: &Url) -> ParsedPage {
    let document = Html::parse_document(html);

    ParsedPage {
        title: extract_title(&document),
        favicon: extract_favicon(&document, base_url),
        body_text: extract_body_text(&document),
        links: extract_links(&document, base_url),
    }
}

/// Extracts the page title from the HTML document
fn extract_title(document: &Html) -> Option<String> {
    let title_selector = Selector::parse("title").ok()?;

    document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Extracts the favicon URL from the HTML document
///
/// Scans `<link>` elements for one whose `rel` attribute (a space-separated
/// token list) has a token containing "icon" case-insensitively, and resolves
/// its `href` against the page URL. The first matching element wins.
fn extract_favicon(document: &Html, base_url: &Url) -> Option<String> {
    let link_selector = Selector::parse("link[rel][href]").ok()?;

    for element in document.select(&link_selector) {
        let rel = element.value().attr("rel")?;

        let is_icon = rel
            .split_whitespace()
            .any(|token| token.to_ascii_lowercase().contains("icon"));
        if !is_icon {
            continue;
        }

        if let Some(href) = element.value().attr("href") {
            if let Ok(resolved) = base_url.join(href.trim()) {
                return Some(resolved.to_string());
            }
        }
    }

    None
}

/// Extracts the visible body text from the HTML document
///
/// Text nodes under <body> are whitespace-normalized and joined with single
/// spaces.
fn extract_body_text(document: &Html) -> String {
    let body_selector = match Selector::parse("body") {
        Ok(s) => s,
        Err(_) => return String::new(),
    };

    document
        .select(&body_selector)
        .next()
        .map(|body| {
            body.text()
                .flat_map(|fragment| fragment.split_whitespace())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .unwrap_or_default()
}

/// Extracts outbound links from the HTML document
fn extract_links(document: &Html, base_url: &Url) -> Vec<String> {
    let mut links = Vec::new();

    if let Ok(a_selector) = Selector::parse("a[href]") {
        for element in document.select(&a_selector) {
            if let Some(href) = element.value().attr("href") {
                if let Some(absolute_url) = resolve_link(href, base_url) {
                    links.push(absolute_url);
                }
            }
        }
    }

    links
}

/// Resolves an anchor href to a crawlable absolute URL
///
/// Returns None unless the href already starts with "http": relative hrefs
/// are dropped (reference behavior). Resolution against the base URL is kept
/// for exactness even though it is a no-op for absolute URLs.
fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if !href.starts_with("http") {
        return None;
    }

    match base_url.join(href) {
        Ok(absolute_url) => {
            if absolute_url.scheme() == "http" || absolute_url.scheme() == "https" {
                Some(absolute_url.to_string())
            } else {
                None
            }
        }
        Err(_) => None,
    }
}
