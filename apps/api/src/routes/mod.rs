pub mod gallery;
pub mod health;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::services::ServeDir;

use crate::pipeline::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let clones = ServeDir::new(&state.config.generated_html_dir);

    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/scrape-context",
            post(handlers::handle_scrape_context),
        )
        .route("/api/v1/clone", post(handlers::handle_clone))
        .route("/api/v1/portfolio", post(handlers::handle_build_portfolio))
        .route("/api/v1/gallery", get(gallery::handle_gallery))
        .nest_service("/clones", clones)
        .with_state(state)
}
