//! Export handlers: `POST /export/rdf` and `POST /export/xml`.

use axum::{extract::rejection::JsonRejection, Json};
use wam::Format;
use wam_api::{error::codes, DiagramResponse, ExportRequest};

use crate::error::AppError;

/// `POST /export/rdf`
pub async fn rdf(
    payload: Result<Json<ExportRequest>, JsonRejection>,
) -> Result<Json<DiagramResponse>, AppError> {
    export(payload, Format::Rdf)
}

/// `POST /export/xml`
pub async fn xml(
    payload: Result<Json<ExportRequest>, JsonRejection>,
) -> Result<Json<DiagramResponse>, AppError> {
    export(payload, Format::Xml)
}

/// Encode the request's `data` graph. A body without `data` is a `400`;
/// encoding itself cannot fail.
fn export(
    payload: Result<Json<ExportRequest>, JsonRejection>,
    format: Format,
) -> Result<Json<DiagramResponse>, AppError> {
    let Json(request) = payload?;
    let graph = request.data.ok_or_else(|| {
        AppError::bad_request(codes::MISSING_DATA, "request body has no `data` field")
    })?;

    let diagram = wam::export(&graph, format);
    tracing::info!(
        "export/{format}: {} nodes, {} edges, {} bytes",
        graph.nodes.len(),
        graph.edges.len(),
        diagram.len()
    );
    Ok(Json(DiagramResponse { diagram }))
}
