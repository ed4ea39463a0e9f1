/// LLM Client — the single point of entry for all Gemini API calls in Vitrine.
///
/// ARCHITECTURAL RULE: No other module may call the model API directly.
/// All generation requests MUST go through this module, which owns prompt
/// part encoding, generation parameters, the retry/backoff policy, and
/// fence stripping of the returned text.
///
/// Model: gemini-2.5-pro (hardcoded — do not make configurable to prevent drift)
use std::sync::OnceLock;
use std::time::Duration;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use bytes::Bytes;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
/// The model used for all generation calls in Vitrine.
/// This is intentionally hardcoded to prevent accidental drift.
pub const MODEL: &str = "gemini-2.5-pro";
/// The model's known output limit for single-document HTML generations.
const MAX_OUTPUT_TOKENS: u32 = 65_000;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("model resource exhausted after {attempts} attempts")]
    ResourceExhausted { attempts: u32 },

    #[error("model response contained no usable candidate or content")]
    EmptyResponse,

    #[error("model returned malformed JSON: {0}")]
    MalformedOutput(serde_json::Error),
}

/// One ordered piece of a multi-part prompt: either text or raw PNG bytes.
#[derive(Debug, Clone)]
pub enum Segment {
    Text(String),
    Image(Bytes),
}

/// Sampling and output parameters for one generation call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    pub temperature: f32,
    pub top_p: Option<f32>,
    pub top_k: Option<u32>,
    pub max_output_tokens: Option<u32>,
    pub expect_json: bool,
}

impl GenerationParams {
    /// Parameters for the HTML-producing tasks (clone, portfolio build).
    pub fn html() -> Self {
        Self {
            temperature: 0.2,
            top_p: Some(0.95),
            top_k: Some(40),
            max_output_tokens: Some(MAX_OUTPUT_TOKENS),
            expect_json: false,
        }
    }

    /// Parameters for resume parsing: deterministic, JSON-constrained output,
    /// no sampling overrides.
    pub fn json() -> Self {
        Self {
            temperature: 0.0,
            top_p: None,
            top_k: None,
            max_output_tokens: None,
            expect_json: true,
        }
    }
}

/// How the model stopped, mapped once at the provider boundary.
/// Provider constants never leak past this module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishStatus {
    Complete,
    Truncated,
    Other,
}

/// Normalized output of one generation call: fence-stripped, trimmed text
/// plus how the model stopped. Truncation is flagged, not an error.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub text: String,
    pub finish: FinishStatus,
}

/// Bounded exponential backoff applied only to resource-exhaustion failures.
/// The delay computation is pure; sleeping happens at the call site.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Additional attempts after the first.
    pub max_retries: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            base_delay: Duration::from_secs(5),
        }
    }
}

impl RetryPolicy {
    /// Total attempts including the first.
    pub fn attempts(&self) -> u32 {
        self.max_retries + 1
    }

    /// Delay before re-attempting after failed attempt `attempt` (0-based):
    /// base_delay × 2^attempt.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay * 2u32.pow(attempt)
    }
}

// ── Wire types (Gemini generateContent REST surface) ────────────────────────

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    role: &'static str,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part {
    Text {
        text: String,
    },
    Inline {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

#[derive(Debug, Serialize)]
struct InlineData {
    #[serde(rename = "mimeType")]
    mime_type: &'static str,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_k: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
    response_mime_type: &'static str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    prompt_token_count: Option<u32>,
    candidates_token_count: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorEnvelope {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

// ── Client ──────────────────────────────────────────────────────────────────

/// Shared HTTP client, initialized once per process on first use.
/// Concurrent first calls race benignly: every racer converges on the same
/// initialized client.
static HTTP: OnceLock<Client> = OnceLock::new();

fn http_client() -> &'static Client {
    HTTP.get_or_init(|| {
        // Single-document generations near the output limit can run for minutes.
        Client::builder()
            .timeout(Duration::from_secs(300))
            .build()
            .expect("Failed to build HTTP client")
    })
}

/// The single generation client used by all pipeline flows.
#[derive(Clone)]
pub struct LlmClient {
    api_key: String,
    retry: RetryPolicy,
}

impl LlmClient {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            retry: RetryPolicy::default(),
        }
    }

    /// Runs one generation call over an ordered segment sequence.
    ///
    /// Retries only on the provider's resource-exhaustion signal (HTTP 429),
    /// with exponential backoff per `RetryPolicy`. Every other provider error
    /// is terminal immediately. Truncation by the output-token limit is
    /// returned as success with `FinishStatus::Truncated`.
    pub async fn generate(
        &self,
        segments: &[Segment],
        params: GenerationParams,
    ) -> Result<GenerationResult, LlmError> {
        let url = format!("{GEMINI_API_URL}/{MODEL}:generateContent");
        let body = build_request(segments, params);
        let attempts = self.retry.attempts();

        for attempt in 0..attempts {
            if attempt > 0 {
                let delay = self.retry.delay_for(attempt - 1);
                warn!(
                    "Model resource exhausted; retrying in {}s (attempt {}/{})",
                    delay.as_secs(),
                    attempt + 1,
                    attempts
                );
                tokio::time::sleep(delay).await;
            }

            let response = http_client()
                .post(&url)
                .query(&[("key", self.api_key.as_str())])
                .json(&body)
                .send()
                .await?;

            let status = response.status();

            if status.as_u16() == 429 {
                let detail = response.text().await.unwrap_or_default();
                warn!("Model returned RESOURCE_EXHAUSTED: {detail}");
                continue;
            }

            if !status.is_success() {
                let raw = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<GeminiErrorEnvelope>(&raw)
                    .map(|e| e.error.message)
                    .unwrap_or(raw);
                return Err(LlmError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let decoded: GenerateContentResponse = response.json().await?;
            return extract_result(decoded, params.expect_json);
        }

        Err(LlmError::ResourceExhausted { attempts })
    }

    /// Runs a JSON-constrained generation and deserializes the stripped text.
    /// A parse failure is terminal — the model violated its output contract.
    pub async fn generate_json<T: DeserializeOwned>(
        &self,
        segments: &[Segment],
    ) -> Result<T, LlmError> {
        let result = self.generate(segments, GenerationParams::json()).await?;
        serde_json::from_str(&result.text).map_err(LlmError::MalformedOutput)
    }
}

fn build_request(segments: &[Segment], params: GenerationParams) -> GenerateContentRequest {
    let parts = segments
        .iter()
        .map(|segment| match segment {
            Segment::Text(text) => Part::Text { text: text.clone() },
            Segment::Image(bytes) => Part::Inline {
                inline_data: InlineData {
                    mime_type: "image/png",
                    data: BASE64.encode(bytes),
                },
            },
        })
        .collect();

    GenerateContentRequest {
        contents: vec![Content {
            role: "user",
            parts,
        }],
        generation_config: GenerationConfig {
            temperature: params.temperature,
            top_p: params.top_p,
            top_k: params.top_k,
            max_output_tokens: params.max_output_tokens,
            response_mime_type: if params.expect_json {
                "application/json"
            } else {
                "text/plain"
            },
        },
    }
}

/// Normalizes a decoded provider response into a `GenerationResult`.
fn extract_result(
    response: GenerateContentResponse,
    expect_json: bool,
) -> Result<GenerationResult, LlmError> {
    if let Some(usage) = &response.usage_metadata {
        debug!(
            "Generation usage: prompt_tokens={:?}, output_tokens={:?}",
            usage.prompt_token_count, usage.candidates_token_count
        );
    }

    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or(LlmError::EmptyResponse)?;

    let finish = map_finish_reason(candidate.finish_reason.as_deref());
    if finish == FinishStatus::Truncated {
        warn!("Model output was truncated by the output token limit");
    }

    let content = candidate.content.ok_or(LlmError::EmptyResponse)?;
    if content.parts.is_empty() {
        return Err(LlmError::EmptyResponse);
    }

    let raw: String = content
        .parts
        .into_iter()
        .filter_map(|part| part.text)
        .collect();

    let tag = if expect_json { "json" } else { "html" };
    let text = strip_fences(&raw, tag).to_string();

    if text.is_empty() && finish == FinishStatus::Complete {
        // Contract violation on the model's side; callers decide how to react.
        warn!("Model stopped naturally but produced an empty document after fence stripping");
    }

    Ok(GenerationResult { text, finish })
}

/// Maps the provider's finish reason string into the closed `FinishStatus`
/// enum, exactly once at this boundary.
fn map_finish_reason(reason: Option<&str>) -> FinishStatus {
    match reason {
        Some("STOP") => FinishStatus::Complete,
        Some("MAX_TOKENS") => FinishStatus::Truncated,
        _ => FinishStatus::Other,
    }
}

/// Strips a leading ```` ```<tag> ```` (or bare ```` ``` ````) fence and a
/// trailing ```` ``` ```` fence, then trims. Idempotent on fence-free input.
fn strip_fences<'a>(text: &'a str, tag: &str) -> &'a str {
    let mut text = text.trim();
    if let Some(rest) = text.strip_prefix("```") {
        text = rest.strip_prefix(tag).unwrap_or(rest).trim_start();
    }
    if let Some(rest) = text.strip_suffix("```") {
        text = rest.trim_end();
    }
    text.trim()
}
