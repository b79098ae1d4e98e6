//! Page fetching for link submissions.
//!
//! A single GET, no link following. The HTML is reduced to a title and the
//! visible body text.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;
use tracing::{debug, warn};

pub mod cache;

pub use cache::{CachedFetcher, ContentCache};

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";
const NO_TITLE: &str = "No title found";
/// Elements whose text never reaches the extracted body.
const EXCLUDED_ELEMENTS: [&str; 6] = ["script", "style", "noscript", "iframe", "svg", "template"];

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {0}")]
    Status(u16),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    pub title: String,
    pub text: String,
}

#[async_trait]
pub trait ContentFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError>;
}

pub struct HttpContentFetcher {
    client: Client,
}

impl HttpContentFetcher {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ContentFetcher for HttpContentFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Fetching {url} returned {status}");
            return Err(FetchError::Status(status.as_u16()));
        }

        let html = response.text().await?;
        let page = extract_page(&html);
        debug!(
            "Fetched {url}: title={:?}, {} chars of text",
            page.title,
            page.text.chars().count()
        );
        Ok(page)
    }
}

/// Reduces an HTML document to its title and visible body text.
pub fn extract_page(html: &str) -> FetchedPage {
    let document = Html::parse_document(html);

    let title = Selector::parse("title")
        .ok()
        .and_then(|selector| {
            document
                .select(&selector)
                .next()
                .map(|el| el.text().collect::<String>().trim().to_string())
        })
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| NO_TITLE.to_string());

    let body = Selector::parse("body")
        .ok()
        .and_then(|selector| document.select(&selector).next())
        .unwrap_or_else(|| document.root_element());

    let mut lines = Vec::new();
    collect_text(body, &mut lines);

    FetchedPage {
        title,
        text: lines.join("\n"),
    }
}

fn collect_text(element: ElementRef<'_>, lines: &mut Vec<String>) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            let text = text.trim();
            if !text.is_empty() {
                lines.push(text.to_string());
            }
        } else if let Some(child) = ElementRef::wrap(child) {
            if !EXCLUDED_ELEMENTS.contains(&child.value().name()) {
                collect_text(child, lines);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_page_reads_title_and_visible_text() {
        let html = r#"<html><head><title> Vaga: Motorista </title>
            <style>body { color: red; }</style></head>
            <body>
              <h1>Motorista para Joanesburgo</h1>
              <script>var tracking = 1;</script>
              <p>Salário de 50.000 MT.   </p>
              <noscript>Ative o JavaScript</noscript>
              <div><span>Contato:</span> <b>WhatsApp</b></div>
            </body></html>"#;
        let page = extract_page(html);
        assert_eq!(page.title, "Vaga: Motorista");
        assert_eq!(
            page.text,
            "Motorista para Joanesburgo\nSalário de 50.000 MT.\nContato:\nWhatsApp"
        );
    }

    #[test]
    fn test_extract_page_without_title() {
        let page = extract_page("<html><body><p>Olá</p></body></html>");
        assert_eq!(page.title, NO_TITLE);
        assert_eq!(page.text, "Olá");
    }

    #[test]
    fn test_extract_page_empty_document() {
        let page = extract_page("");
        assert_eq!(page.title, NO_TITLE);
        assert!(page.text.is_empty());
    }
}
