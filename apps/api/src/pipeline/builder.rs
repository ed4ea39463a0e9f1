//! Build-portfolio flow: scrape reference → validate → parse resume →
//! generate portfolio → upload to object storage.

use aws_sdk_s3::Client as S3Client;
use chrono::{DateTime, Utc};
use tracing::info;

use crate::config::Config;
use crate::errors::AppError;
use crate::llm_client::{GenerationParams, LlmClient};
use crate::models::artifact::Artifact;
use crate::pipeline::assembler::portfolio_segments;
use crate::pipeline::resume_parser::parse_resume;
use crate::pipeline::validation::validate;
use crate::scraper::Scraper;
use crate::storage::{public_view_url, upload_portfolio};

/// Runs the full portfolio-build flow and returns the deployed artifact.
///
/// Linear, fail-fast: any failed step aborts the run and nothing partial is
/// persisted.
pub async fn build_portfolio(
    scraper: &dyn Scraper,
    llm: &LlmClient,
    s3: &S3Client,
    config: &Config,
    reference_url: &str,
    resume_text: &str,
) -> Result<Artifact, AppError> {
    info!("Step 1: scraping reference URL {reference_url}");
    let context = scraper.scrape(reference_url).await?;
    validate(&context)?;

    info!("Step 2: parsing resume text");
    let profile = parse_resume(llm, resume_text).await?;

    info!("Step 3: generating portfolio HTML");
    // Pretty-printed so the profile reads cleanly inside the prompt.
    let profile_json = serde_json::to_string_pretty(&profile)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize profile: {e}")))?;
    let segments = portfolio_segments(&context, &profile_json);
    let result = llm.generate(&segments, GenerationParams::html()).await?;

    if result.text.trim().is_empty() {
        return Err(AppError::Llm(
            "Model generated a blank portfolio document".to_string(),
        ));
    }

    let key = portfolio_key(profile.name.as_deref(), Utc::now());
    upload_portfolio(s3, &config.s3_bucket, &key, &result.text).await?;

    Ok(Artifact {
        message: "Portfolio built and deployed successfully.".to_string(),
        file_path: format!("s3://{}/{}", config.s3_bucket, key),
        view_link: public_view_url(&config.s3_public_url, &key),
    })
}

/// Derives the storage key for a deployed portfolio from the profile's name
/// (lower-cased, spaces to underscores) and a timestamp.
pub fn portfolio_key(name: Option<&str>, timestamp: DateTime<Utc>) -> String {
    let slug = name
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or("portfolio")
        .to_lowercase()
        .replace(' ', "_");

    format!(
        "portfolios/{slug}_portfolio_{}.html",
        timestamp.format("%Y%m%d_%H%M%S")
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
    fn test_portfolio_key_slugs_name() {
        let timestamp = Utc.with_ymd_and_hms(2025, 6, 5, 19, 30, 6).unwrap();
        assert_eq!(
            portfolio_key(Some("Jane Q Smith"), timestamp),
            "portfolios/jane_q_smith_portfolio_20250605_193006.html"
        );
    }

    #[test]
    fn test_portfolio_key_without_name_falls_back() {
        let timestamp = Utc.with_ymd_and_hms(2025, 6, 5, 19, 30, 6).unwrap();
        assert_eq!(
            portfolio_key(None, timestamp),
            "portfolios/portfolio_portfolio_20250605_193006.html"
        );
        assert_eq!(
            portfolio_key(Some("   "), timestamp),
            "portfolios/portfolio_portfolio_20250605_193006.html"
        );
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

    fn test_config() -> Config {
        Config {
            scraper_url: "http://scraper.test".to_string(),
            gemini_api_key: "test-key".to_string(),
            s3_bucket: "portfolios-bucket".to_string(),
            s3_endpoint: "http://s3.test".to_string(),
            s3_public_url: "http://s3.test/portfolios-bucket".to_string(),
            aws_access_key_id: "id".to_string(),
            aws_secret_access_key: "secret".to_string(),
            generated_html_dir: "generated_clones".to_string(),
            public_base_url: "http://localhost:8080".to_string(),
            enable_llm_cloning: true,
            port: 8080,
            rust_log: "info".to_string(),
        }
    }

    fn offline_s3_client() -> S3Client {
        // Never sends a request in these tests — the flow aborts earlier.
        let conf = aws_sdk_s3::Config::builder()
            .behavior_version(aws_sdk_s3::config::BehaviorVersion::latest())
            .build();
        S3Client::from_conf(conf)
    }

    #[tokio::test]
    async fn test_build_flow_aborts_on_crash_marker_before_generation() {
        let scraper = StubScraper {
            html: "<div>Application error: a client-side exception has occurred</div>"
                .to_string(),
        };
        let llm = LlmClient::new("test-key".to_string());
        let config = test_config();

        let err = build_portfolio(
            &scraper,
            &llm,
            &offline_s3_client(),
            &config,
            "https://broken.example.com",
            "John Doe, Software Engineer",
        )
        .await
        .unwrap_err();

        // Aborts at the validation gate: no model call, no storage write.
        assert!(matches!(err, AppError::UnprocessableEntity(_)));
        assert!(err.to_string().contains("client-side error"));
    }

    #[tokio::test]
    async fn test_build_flow_aborts_on_empty_shell() {
        let scraper = StubScraper {
            html: r#"<div id="root"></div>"#.to_string(),
        };
        let llm = LlmClient::new("test-key".to_string());
        let config = test_config();

        let err = build_portfolio(
            &scraper,
            &llm,
            &offline_s3_client(),
            &config,
            "https://spa.example.com",
            "John Doe, Software Engineer",
        )
        .await
        .unwrap_err();

        assert!(matches!(err, AppError::UnprocessableEntity(_)));
    }
}
