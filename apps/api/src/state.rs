use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::scraper::Scraper;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable scraping collaborator; swapped for a stub in tests.
    pub scraper: Arc<dyn Scraper>,
    pub llm: LlmClient,
    pub s3: S3Client,
    pub config: Config,
}
