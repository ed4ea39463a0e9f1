//! Object-storage persistence for generated portfolio documents.

use aws_sdk_s3::{primitives::ByteStream, Client as S3Client};
use tracing::info;

use crate::errors::AppError;

/// Uploads a generated document under `key`. Write-once per call; the bucket
/// is expected to be publicly readable.
pub async fn upload_portfolio(
    s3: &S3Client,
    bucket: &str,
    key: &str,
    html: &str,
) -> Result<(), AppError> {
    s3.put_object()
        .bucket(bucket)
        .key(key)
        .body(ByteStream::from(html.as_bytes().to_vec()))
        .content_type("text/html")
        .send()
        .await
        .map_err(|e| AppError::Storage(format!("S3 upload failed: {e}")))?;

    info!("Uploaded portfolio to s3://{bucket}/{key}");
    Ok(())
}

/// Public URL at which an uploaded key is viewable.
pub fn public_view_url(public_base: &str, key: &str) -> String {
    format!("{}/{}", public_base.trim_end_matches('/'), key)
}
