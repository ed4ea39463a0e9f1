//! Resume-parse flow — turns free-text resume content into a structured
//! `ResumeProfile` via a deterministic, JSON-constrained generation.

use tracing::info;

use crate::errors::AppError;
use crate::llm_client::LlmClient;
use crate::models::portfolio::ResumeProfile;
use crate::pipeline::assembler::resume_parse_segments;

/// Parses raw resume text into a `ResumeProfile`.
///
/// A profile that recovered neither a name nor any experience entry is
/// rejected here — it must never reach the portfolio-build generation.
pub async fn parse_resume(llm: &LlmClient, resume_text: &str) -> Result<ResumeProfile, AppError> {
    info!("Parsing resume text ({} chars)", resume_text.len());

    let segments = resume_parse_segments(resume_text);
    let profile: ResumeProfile = llm.generate_json(&segments).await?;

    if !profile.is_substantive() {
        return Err(AppError::UnprocessableEntity(
            "Failed to parse the resume text into a usable format. Make sure it contains at least a name or work experience.".to_string(),
        ));
    }

    info!(
        "Parsed resume for {} ({} experience entries, {} skills)",
        profile.name.as_deref().unwrap_or("<unnamed>"),
        profile.experience.len(),
        profile.skills.len()
    );

    Ok(profile)
}
