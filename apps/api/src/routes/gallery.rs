//! Curated gallery of previously generated clones.
//!
//! The item list is static seed data; any listed file missing from the clone
//! directory gets a placeholder document written in its place so the gallery
//! never serves dead links.

use std::path::Path;

use axum::{extract::State, Json};
use serde::Serialize;
use tracing::warn;

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Clone, Serialize)]
pub struct GalleryItem {
    pub id: &'static str,
    pub filename: &'static str,
    pub view_link: String,
    pub category: &'static str,
    pub title: &'static str,
    pub description: Option<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct GalleryResponse {
    pub items: Vec<GalleryItem>,
}

/// (category, id, filename, title, description)
const GALLERY_SEED: &[(&str, &str, &str, &str, &str)] = &[
    (
        "Landing Pages",
        "ola",
        "clone_www_olacabs_com_20250605_183343.html",
        "Ola Cabs",
        "Ride Hailing Service",
    ),
    (
        "Landing Pages",
        "wix",
        "clone_www_wix_com_20250605_190834.html",
        "Wix.com",
        "Website Builder",
    ),
    (
        "Landing Pages",
        "wordpress",
        "clone_wordpress_com_20250605_222253.html",
        "WordPress.com",
        "Blogging Platform",
    ),
    (
        "Portfolio Websites",
        "simplegreet",
        "clone_simple-greetings-1748253405653_vercel_app_20250605_193006.html",
        "Simple Greetings",
        "Portfolio Example",
    ),
    (
        "Ecommerce Sites",
        "uber",
        "clone_www_uber_com_20250605_175014.html",
        "Uber.com",
        "Ride & Delivery",
    ),
];

/// GET /api/v1/gallery
pub async fn handle_gallery(
    State(state): State<AppState>,
) -> Result<Json<GalleryResponse>, AppError> {
    let mut items = Vec::with_capacity(GALLERY_SEED.len());

    for &(category, id, filename, title, description) in GALLERY_SEED {
        ensure_placeholder(&state.config.generated_html_dir, filename, title).await;
        items.push(GalleryItem {
            id,
            filename,
            view_link: format!(
                "{}/clones/{}",
                state.config.public_base_url.trim_end_matches('/'),
                filename
            ),
            category,
            title,
            description: Some(description),
        });
    }

    Ok(Json(GalleryResponse { items }))
}

/// Writes a placeholder document for a missing gallery file. Best-effort:
/// a failure is logged and the item is still listed.
async fn ensure_placeholder(dir: &str, filename: &str, title: &str) {
    let path = Path::new(dir).join(filename);
    if path.exists() {
        return;
    }

    warn!("Gallery item file missing, creating placeholder for {filename}");
    let body = format!(
        "<html><body><h1>Placeholder for {title}</h1><p>File: {filename}</p></body></html>"
    );
    if tokio::fs::create_dir_all(dir).await.is_err()
        || tokio::fs::write(&path, body).await.is_err()
    {
        warn!("Could not create placeholder for {filename}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ensure_placeholder_writes_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let dir_str = dir.path().to_str().unwrap();

        ensure_placeholder(dir_str, "clone_test_site.html", "Test Site").await;

        let content =
            std::fs::read_to_string(dir.path().join("clone_test_site.html")).unwrap();
        assert!(content.contains("Placeholder for Test Site"));
    }

    #[tokio::test]
    async fn test_ensure_placeholder_leaves_existing_file_alone() {
        let dir = tempfile::tempdir().unwrap();
        let dir_str = dir.path().to_str().unwrap();
        let path = dir.path().join("clone_existing.html");
        std::fs::write(&path, "<html>original</html>").unwrap();

        ensure_placeholder(dir_str, "clone_existing.html", "Existing").await;

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "<html>original</html>"
        );
    }

    #[test]
    fn test_gallery_seed_filenames_are_unique() {
        let mut names: Vec<_> = GALLERY_SEED.iter().map(|e| e.2).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), GALLERY_SEED.len());
    }
}
