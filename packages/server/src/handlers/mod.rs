//! HTTP request handlers for the diagram endpoints.
//!
//! Handlers are async functions that receive Axum extractors and return
//! `Result<impl IntoResponse, AppError>`. The codec and validator calls they
//! make are synchronous and touch no shared state.

pub mod export;
pub mod import;
pub mod validate;

use crate::config::ServerConfig;

/// Shared application state threaded through all Axum handlers via [`axum::extract::State`].
#[derive(Clone)]
pub struct AppState {
    pub config: ServerConfig,
}
