//! Client for the external web-scraping service.
//!
//! The scraper captures a URL and returns cleaned body HTML plus paired
//! desktop/mobile screenshots. Transport and decoding failures surface as a
//! typed `ScrapeError`; diagnostic text the upstream service embeds in the
//! HTML field is deliberately passed through untouched — the validation gate
//! owns that judgement.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use bytes::Bytes;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::models::context::ScrapedContext;

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("scraper request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("scraper returned status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("scraper returned an invalid screenshot encoding: {0}")]
    Decode(#[from] base64::DecodeError),
}

/// Seam for the scraping collaborator so pipeline flows can be exercised
/// against a stub in tests.
#[async_trait]
pub trait Scraper: Send + Sync {
    async fn scrape(&self, url: &str) -> Result<ScrapedContext, ScrapeError>;
}

#[derive(Debug, Serialize)]
struct ScrapeRequest<'a> {
    url: &'a str,
}

#[derive(Debug, Deserialize)]
struct ScrapeResponse {
    simplified_html: String,
    desktop_screenshot_base64: String,
    mobile_screenshot_base64: String,
}

/// HTTP client for the scraping service configured via `SCRAPER_URL`.
#[derive(Clone)]
pub struct HttpScraper {
    client: Client,
    endpoint: String,
}

impl HttpScraper {
    pub fn new(endpoint: String) -> Self {
        Self {
            // Headless capture of heavy pages routinely takes tens of seconds.
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(180))
                .build()
                .expect("Failed to build HTTP client"),
            endpoint,
        }
    }
}

#[async_trait]
impl Scraper for HttpScraper {
    async fn scrape(&self, url: &str) -> Result<ScrapedContext, ScrapeError> {
        debug!("Requesting scrape of {url}");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&ScrapeRequest { url })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ScrapeError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let decoded: ScrapeResponse = response.json().await?;
        decode_context(url, decoded)
    }
}

/// Decodes the wire response into an owned `ScrapedContext`.
fn decode_context(url: &str, response: ScrapeResponse) -> Result<ScrapedContext, ScrapeError> {
    Ok(ScrapedContext {
        original_url: url.to_string(),
        simplified_html: response.simplified_html,
        desktop_screenshot: Bytes::from(BASE64.decode(response.desktop_screenshot_base64)?),
        mobile_screenshot: Bytes::from(BASE64.decode(response.mobile_screenshot_base64)?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_context_decodes_screenshots() {
        let response = ScrapeResponse {
            simplified_html: "<body><h1>Hello</h1></body>".to_string(),
            desktop_screenshot_base64: BASE64.encode(b"desktop-png"),
            mobile_screenshot_base64: BASE64.encode(b"mobile-png"),
        };
        let context = decode_context("https://example.com", response).unwrap();
        assert_eq!(context.original_url, "https://example.com");
        assert_eq!(&context.desktop_screenshot[..], b"desktop-png");
        assert_eq!(&context.mobile_screenshot[..], b"mobile-png");
    }

    #[test]
    fn test_decode_context_rejects_bad_base64() {
        let response = ScrapeResponse {
            simplified_html: "<body></body>".to_string(),
            desktop_screenshot_base64: "not!!base64".to_string(),
            mobile_screenshot_base64: String::new(),
        };
        let err = decode_context("https://example.com", response).unwrap_err();
        assert!(matches!(err, ScrapeError::Decode(_)));
    }

    #[test]
    fn test_scrape_response_wire_shape() {
        let json = r#"{
            "simplified_html": "<body></body>",
            "desktop_screenshot_base64": "",
            "mobile_screenshot_base64": ""
        }"#;
        let response: ScrapeResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.simplified_html, "<body></body>");
    }
}
