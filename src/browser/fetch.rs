// SPDX-License-Identifier: MIT

use crate::browser::{PageRenderer, PageSnapshot, Viewport};
use crate::core::error::ToolError;
use async_trait::async_trait;
use reqwest::Client;
use std::time::{Duration, Instant};
use url::Url;

/// HTTP-based page renderer.
///
/// Fetches the document, measures wall-clock load time, and scans the markup
/// for the counts the analysis tools need. Scripts are not executed.
pub struct HttpRenderer {
    client: Client,
}

impl HttpRenderer {
    pub fn new(timeout: Duration) -> Result<Self, ToolError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageRenderer for HttpRenderer {
    async fn render(&self, url: &str, viewport: Viewport) -> Result<PageSnapshot, ToolError> {
        let parsed = Url::parse(url).map_err(|e| ToolError::InvalidArgs(format!("invalid URL '{}': {}", url, e)))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(ToolError::InvalidArgs(format!(
                "unsupported URL scheme '{}'",
                parsed.scheme()
            )));
        }

        let started = Instant::now();
        let resp = self.client.get(parsed).send().await?;
        if !resp.status().is_success() {
            return Err(ToolError::api(
                "page fetch",
                format!("{} returned status {}", url, resp.status()),
            ));
        }
        let html = resp.text().await?;
        let load_time_ms = started.elapsed().as_millis() as u64;

        log::debug!("Fetched {} ({} bytes in {}ms)", url, html.len(), load_time_ms);

        Ok(inspect_markup(url, viewport, load_time_ms, &html))
    }
}

/// Derive inspection counts from raw markup.
pub fn inspect_markup(url: &str, viewport: Viewport, load_time_ms: u64, html: &str) -> PageSnapshot {
    let lower = html.to_ascii_lowercase();

    PageSnapshot {
        url: url.to_string(),
        title: extract_title(html).unwrap_or_default(),
        viewport,
        load_time_ms,
        elements: count_open_tags(&lower),
        images: count_occurrences(&lower, "<img"),
        images_with_alt: count_images_with_alt(&lower),
        scripts: count_occurrences(&lower, "<script"),
        stylesheets: count_stylesheet_links(&lower),
        aria_labels: count_occurrences(&lower, "aria-label="),
        html_bytes: html.len(),
    }
}

fn extract_title(html: &str) -> Option<String> {
    let lower = html.to_ascii_lowercase();
    let open = lower.find("<title")?;
    let start = lower[open..].find('>').map(|i| open + i + 1)?;
    let end = lower[start..].find("</title>").map(|i| start + i)?;
    Some(html[start..end].trim().to_string())
}

/// Rough element count: opening tags, excluding closers, comments, and
/// declarations. A DOM walk would be exact; for scoring, tag starts suffice.
fn count_open_tags(lower: &str) -> u64 {
    let bytes = lower.as_bytes();
    let mut count = 0u64;
    for (i, &b) in bytes.iter().enumerate() {
        if b == b'<' {
            match bytes.get(i + 1) {
                Some(c) if c.is_ascii_alphabetic() => count += 1,
                _ => {}
            }
        }
    }
    count
}

fn count_occurrences(lower: &str, needle: &str) -> u64 {
    lower.matches(needle).count() as u64
}

fn count_images_with_alt(lower: &str) -> u64 {
    let mut count = 0u64;
    let mut rest = lower;
    while let Some(start) = rest.find("<img") {
        let tag_body = &rest[start..];
        let end = tag_body.find('>').unwrap_or(tag_body.len());
        if tag_body[..end].contains("alt=") {
            count += 1;
        }
        rest = &rest[start + 4..];
    }
    count
}

fn count_stylesheet_links(lower: &str) -> u64 {
    let mut count = 0u64;
    let mut rest = lower;
    while let Some(start) = rest.find("<link") {
        let tag_body = &rest[start..];
        let end = tag_body.find('>').unwrap_or(tag_body.len());
        if tag_body[..end].contains("stylesheet") {
            count += 1;
        }
        rest = &rest[start + 5..];
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <title> Vendoora | Home </title>
  <link rel="stylesheet" href="/main.css">
  <link rel="icon" href="/favicon.ico">
  <script src="/app.js"></script>
</head>
<body>
  <div class="hero">
    <img src="/logo.png" alt="Vendoora logo">
    <img src="/banner.png">
    <button aria-label="Open menu">Menu</button>
  </div>
</body>
</html>"#;

    #[test]
    fn test_extract_title() {
        assert_eq!(
            extract_title(SAMPLE).unwrap(),
            "Vendoora | Home".to_string()
        );
        assert!(extract_title("<html><body></body></html>").is_none());
    }

    #[test]
    fn test_inspect_markup_counts() {
        let snapshot = inspect_markup("https://vendoora.example", Viewport::default(), 120, SAMPLE);

        assert_eq!(snapshot.images, 2);
        assert_eq!(snapshot.images_with_alt, 1);
        assert_eq!(snapshot.scripts, 1);
        assert_eq!(snapshot.stylesheets, 1);
        assert_eq!(snapshot.aria_labels, 1);
        assert_eq!(snapshot.load_time_ms, 120);
        assert!(snapshot.elements > 8);
    }

    #[test]
    fn test_closing_tags_not_counted_as_elements() {
        assert_eq!(count_open_tags("<div></div><p></p>"), 2);
        assert_eq!(count_open_tags("<!-- comment --><!doctype html>"), 0);
    }

    #[test]
    fn test_stylesheet_links_distinguished_from_other_links() {
        let html = r#"<link rel="icon" href="x"><link rel="stylesheet" href="y">"#;
        assert_eq!(count_stylesheet_links(html), 1);
    }
}
