use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Panics at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub scraper_url: String,
    pub gemini_api_key: String,
    pub s3_bucket: String,
    pub s3_endpoint: String,
    /// Public base URL under which uploaded portfolios are reachable.
    /// The storage key is appended directly, so for MinIO this includes the bucket.
    pub s3_public_url: String,
    pub aws_access_key_id: String,
    pub aws_secret_access_key: String,
    /// Directory where cloned documents are written and served from.
    pub generated_html_dir: String,
    /// Base URL of this service, used to build clone view links.
    pub public_base_url: String,
    /// When false, the clone flow writes a placeholder document instead of
    /// calling the model.
    pub enable_llm_cloning: bool,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            scraper_url: require_env("SCRAPER_URL")?,
            gemini_api_key: require_env("GEMINI_API_KEY")?,
            s3_bucket: require_env("S3_BUCKET")?,
            s3_endpoint: require_env("S3_ENDPOINT")?,
            s3_public_url: require_env("S3_PUBLIC_URL")?,
            aws_access_key_id: require_env("AWS_ACCESS_KEY_ID")?,
            aws_secret_access_key: require_env("AWS_SECRET_ACCESS_KEY")?,
            generated_html_dir: std::env::var("GENERATED_HTML_DIR")
                .unwrap_or_else(|_| "generated_clones".to_string()),
            public_base_url: std::env::var("PUBLIC_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8080".to_string()),
            enable_llm_cloning: parse_bool_env("ENABLE_LLM_CLONING", true),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_bool_env(key: &str, default: bool) -> bool {
    match std::env::var(key) {
        Ok(v) => !matches!(v.to_lowercase().as_str(), "false" | "0" | "no"),
        Err(_) => default,
    }
}
