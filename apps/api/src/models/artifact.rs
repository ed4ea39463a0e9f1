use serde::Serialize;

/// The final product of a persisting pipeline run: where the generated
/// document landed and where it can be viewed. Write-once, created only
/// after every generation step has succeeded.
#[derive(Debug, Clone, Serialize)]
pub struct Artifact {
    pub message: String,
    /// Local filesystem path (clone flow) or `s3://bucket/key` URI (portfolio flow).
    pub file_path: String,
    /// Public URL at which the document is viewable.
    pub view_link: String,
}
