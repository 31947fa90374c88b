//! `wam-server`: HTTP export, import, and validation for WAM diagrams.
//!
//! # Quick start
//!
//! ```sh
//! # Default port, lenient RDF import:
//! wam-server
//!
//! # Custom bind address, strict RDF import:
//! WAM_BIND=127.0.0.1:8080 WAM_RDF_STRICT=true wam-server
//! ```
//!
//! # Environment variables
//!
//! See [`wam_server::ServerConfig`] for the full list.

use wam_server::{build_router, ServerConfig};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wam_server=info,tower_http=debug".into()),
        )
        .init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("invalid configuration: {e}");
            std::process::exit(2);
        }
    };

    tracing::info!(
        "rdf import: strict = {}, type_from_class = {}; upload limit {} bytes",
        config.decode.strict,
        config.decode.type_from_class,
        config.max_upload_bytes
    );

    let bind_addr = config.bind_addr;
    let app = build_router(config);

    tracing::info!("listening on {bind_addr}");
    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {bind_addr}: {e}"));

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("server error: {e}");
        std::process::exit(1);
    }
}
