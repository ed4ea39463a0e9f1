//! Axum route handlers for the generation pipeline.
//! Thin: request validation and re-encoding only; the flows do the work.

use axum::{extract::State, Json};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::artifact::Artifact;
use crate::pipeline::builder::build_portfolio;
use crate::pipeline::cloner::clone_website;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct UrlRequest {
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct PortfolioBuildRequest {
    pub reference_url: String,
    pub resume_text: String,
}

#[derive(Debug, Serialize)]
pub struct ScrapedContextResponse {
    pub original_url: String,
    pub simplified_html: String,
    pub desktop_screenshot_base64: String,
    pub mobile_screenshot_base64: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/scrape-context
///
/// Scrapes a URL and returns the cleaned context without generating anything.
/// Useful for previewing what the pipeline would work from.
pub async fn handle_scrape_context(
    State(state): State<AppState>,
    Json(request): Json<UrlRequest>,
) -> Result<Json<ScrapedContextResponse>, AppError> {
    if request.url.trim().is_empty() {
        return Err(AppError::Validation("url cannot be empty".to_string()));
    }

    let context = state.scraper.scrape(&request.url).await?;

    Ok(Json(ScrapedContextResponse {
        original_url: context.original_url,
        simplified_html: context.simplified_html,
        desktop_screenshot_base64: BASE64.encode(&context.desktop_screenshot),
        mobile_screenshot_base64: BASE64.encode(&context.mobile_screenshot),
    }))
}

/// POST /api/v1/clone
///
/// Full clone flow: scrape → validate → generate → save locally.
pub async fn handle_clone(
    State(state): State<AppState>,
    Json(request): Json<UrlRequest>,
) -> Result<Json<Artifact>, AppError> {
    if request.url.trim().is_empty() {
        return Err(AppError::Validation("url cannot be empty".to_string()));
    }

    let artifact = clone_website(
        state.scraper.as_ref(),
        &state.llm,
        &state.config,
        &request.url,
    )
    .await?;

    Ok(Json(artifact))
}

/// POST /api/v1/portfolio
///
/// Full build flow: scrape reference → validate → parse resume → generate →
/// deploy to object storage.
pub async fn handle_build_portfolio(
    State(state): State<AppState>,
    Json(request): Json<PortfolioBuildRequest>,
) -> Result<Json<Artifact>, AppError> {
    if request.reference_url.trim().is_empty() {
        return Err(AppError::Validation(
            "reference_url cannot be empty".to_string(),
        ));
    }
    if request.resume_text.trim().is_empty() {
        return Err(AppError::Validation(
            "resume_text cannot be empty".to_string(),
        ));
    }

    let artifact = build_portfolio(
        state.scraper.as_ref(),
        &state.llm,
        &state.s3,
        &state.config,
        &request.reference_url,
        &request.resume_text,
    )
    .await?;

    Ok(Json(artifact))
}
