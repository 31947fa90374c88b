//! Assembles the Axum [`Router`] from the handler modules.

use axum::{extract::DefaultBodyLimit, routing::post, Router};
use tower_http::trace::TraceLayer;

use crate::{
    config::ServerConfig,
    handlers::{export, import, validate, AppState},
};

/// Build the complete application router.
pub fn build_router(config: ServerConfig) -> Router {
    let body_limit = config.max_upload_bytes;
    let state = AppState { config };

    Router::new()
        .route("/export/rdf", post(export::rdf))
        .route("/export/xml", post(export::xml))
        .route("/import/rdf", post(import::rdf))
        .route("/import/xml", post(import::xml))
        .route("/validate", post(validate::validate))
        .with_state(state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
}
