//! Shared helpers for the WAM conformance test suite.
//!
//! Provides [`spawn_server`], which binds a `TcpListener` on an ephemeral
//! port, serves the real router on it, and returns the base URL so tests
//! talk to the service over real TCP and HTTP.

use wam_server::{build_router, ServerConfig};

/// Start an ephemeral in-process server with the default configuration.
///
/// See [`spawn_server_with`].
pub async fn spawn_server() -> String {
    spawn_server_with(ServerConfig::default()).await
}

/// Start an ephemeral in-process server and return its base URL.
///
/// The server runs in a background `tokio` task and is bound to an
/// OS-assigned port on `127.0.0.1`, e.g. `http://127.0.0.1:51234`. The
/// `bind_addr` in `config` is overwritten with the actual address.
///
/// # Panics
///
/// Panics if the TCP listener cannot be bound or the server fails to start.
pub async fn spawn_server_with(mut config: ServerConfig) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("get local addr");
    config.bind_addr = addr;

    let router = build_router(config);
    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("conformance server error");
    });

    format!("http://{addr}")
}
