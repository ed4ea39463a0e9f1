//! Clone-and-save flow: scrape → validate → generate → write to the local
//! clone directory.

use std::path::Path;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::config::Config;
use crate::errors::AppError;
use crate::llm_client::{GenerationParams, LlmClient};
use crate::models::artifact::Artifact;
use crate::pipeline::assembler::clone_segments;
use crate::pipeline::validation::validate;
use crate::scraper::Scraper;

/// Runs the clone flow for one URL and returns the saved artifact.
///
/// When cloning is disabled via config, the generation step is skipped and a
/// placeholder document naming the target URL is written instead.
pub async fn clone_website(
    scraper: &dyn Scraper,
    llm: &LlmClient,
    config: &Config,
    url: &str,
) -> Result<Artifact, AppError> {
    info!("Step 1: scraping {url} for cloning");
    let context = scraper.scrape(url).await?;
    validate(&context)?;

    let html = if config.enable_llm_cloning {
        info!("Step 2: generating clone document");
        let segments = clone_segments(&context);
        let result = llm.generate(&segments, GenerationParams::html()).await?;
        if result.text.is_empty() {
            // Still saved; the caller sees the empty document in the gallery.
            warn!("Model returned an effectively empty clone document for {url}");
        }
        result.text
    } else {
        info!("Cloning is disabled; writing a placeholder document for {url}");
        placeholder_document(url)
    };

    let filename = clone_filename(url, Utc::now());
    write_clone(&config.generated_html_dir, &filename, &html).await?;

    let view_link = format!(
        "{}/clones/{}",
        config.public_base_url.trim_end_matches('/'),
        filename
    );

    Ok(Artifact {
        message: if config.enable_llm_cloning {
            "Website cloned and HTML saved.".to_string()
        } else {
            "Placeholder HTML generated.".to_string()
        },
        file_path: Path::new(&config.generated_html_dir)
            .join(&filename)
            .display()
            .to_string(),
        view_link,
    })
}

async fn write_clone(dir: &str, filename: &str, html: &str) -> Result<(), AppError> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| AppError::Storage(format!("Failed to create {dir}: {e}")))?;

    let path = Path::new(dir).join(filename);
    tokio::fs::write(&path, html)
        .await
        .map_err(|e| AppError::Storage(format!("Failed to write {}: {e}", path.display())))?;

    info!("Saved cloned HTML to {}", path.display());
    Ok(())
}

/// Derives the deterministic clone filename:
/// `clone_{sanitized_host}_{YYYYMMDD_HHMMSS}.html`.
pub fn clone_filename(url: &str, timestamp: DateTime<Utc>) -> String {
    format!(
        "clone_{}_{}.html",
        sanitize_host(url),
        timestamp.format("%Y%m%d_%H%M%S")
    )
}

/// Extracts the host portion of a URL (text after the last `//` up to the
/// next `/`) and replaces `.` and `:` with `_`. Case is preserved.
fn sanitize_host(url: &str) -> String {
    let after_scheme = url.rsplit("//").next().unwrap_or(url);
    let host = after_scheme.split('/').next().unwrap_or(after_scheme);
    host.replace(['.', ':'], "_")
}

fn placeholder_document(url: &str) -> String {
    format!(
        "<html><body><h1>Placeholder for {url}</h1><p>LLM cloning is currently disabled.</p></body></html>"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bytes::Bytes;
    use chrono::TimeZone;

    use crate::models::context::ScrapedContext;
    use crate::scraper::ScrapeError;

    #[test]
    fn test_sanitize_host_replaces_dots() {
        assert_eq!(sanitize_host("https://www.example.com/pricing"), "www_example_com");
    }

    #[test]
    fn test_sanitize_host_replaces_port_colon() {
        assert_eq!(sanitize_host("http://localhost:3000/"), "localhost_3000");
    }

    #[test]
    fn test_sanitize_host_preserves_case() {
        assert_eq!(sanitize_host("https://Example.COM"), "Example_COM");
    }

    #[test]
    fn test_sanitize_host_without_scheme() {
        assert_eq!(sanitize_host("example.com/about"), "example_com");
    }

    #[test]
    fn test_clone_filename_is_deterministic() {
        let timestamp = Utc.with_ymd_and_hms(2025, 6, 5, 18, 33, 43).unwrap();
        assert_eq!(
            clone_filename("https://www.olacabs.com", timestamp),
            "clone_www_olacabs_com_20250605_183343.html"
        );
    }

    #[test]
    fn test_placeholder_document_names_url() {
        let doc = placeholder_document("https://example.com");
        assert!(doc.contains("https://example.com"));
        assert!(doc.starts_with("<html>"));
    }

    struct StubScraper {
        html: String,
    }

    #[async_trait]
    impl Scraper for StubScraper {
        async fn scrape(&self, url: &str) -> Result<ScrapedContext, ScrapeError> {
            Ok(ScrapedContext {
                original_url: url.to_string(),
                simplified_html: self.html.clone(),
                desktop_screenshot: Bytes::from_static(b"d"),
                mobile_screenshot: Bytes::from_static(b"m"),
            })
        }
    }

    fn test_config(dir: &str) -> Config {
        Config {
            scraper_url: "http://scraper.test".to_string(),
            gemini_api_key: "test-key".to_string(),
            s3_bucket: "bucket".to_string(),
            s3_endpoint: "http://s3.test".to_string(),
            s3_public_url: "http://s3.test/bucket".to_string(),
            aws_access_key_id: "id".to_string(),
            aws_secret_access_key: "secret".to_string(),
            generated_html_dir: dir.to_string(),
            public_base_url: "http://localhost:8080".to_string(),
            enable_llm_cloning: false,
            port: 8080,
            rust_log: "info".to_string(),
        }
    }

    #[tokio::test]
    async fn test_clone_flow_with_cloning_disabled_writes_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path().to_str().unwrap());
        let scraper = StubScraper {
            html: "<body><h1>Reference</h1><p>Plenty of scraped content here.</p></body>"
                .to_string(),
        };
        let llm = LlmClient::new("test-key".to_string());

        let artifact = clone_website(&scraper, &llm, &config, "https://www.example.com")
            .await
            .unwrap();

        assert!(artifact.file_path.contains("clone_www_example_com_"));
        assert!(artifact.view_link.starts_with("http://localhost:8080/clones/clone_"));
        assert_eq!(artifact.message, "Placeholder HTML generated.");

        let saved = std::fs::read_to_string(&artifact.file_path).unwrap();
        assert!(saved.contains("Placeholder for https://www.example.com"));
    }

    #[tokio::test]
    async fn test_clone_flow_rejects_failed_scrape_before_generation() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path().to_str().unwrap());
        let scraper = StubScraper {
            html: "Scraping failed: navigation timeout".to_string(),
        };
        let llm = LlmClient::new("test-key".to_string());

        let err = clone_website(&scraper, &llm, &config, "https://www.example.com")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::UnprocessableEntity(_)));

        // nothing persisted on failure
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_clone_flow_rejects_crash_marker() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path().to_str().unwrap());
        let scraper = StubScraper {
            html: "<body>Application error: a client-side exception has occurred</body>"
                .to_string(),
        };
        let llm = LlmClient::new("test-key".to_string());

        let err = clone_website(&scraper, &llm, &config, "https://spa.example.com")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::UnprocessableEntity(_)));
    }
}
