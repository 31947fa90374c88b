//! Import handlers: `POST /import/rdf` and `POST /import/xml`.
//!
//! The document may arrive as a `multipart/form-data` upload or as the raw
//! request body. For uploads the field named `file` wins, then the first
//! field carrying a filename, then the first field.

use axum::{
    extract::{FromRequest, Multipart, Request, State},
    http::header,
    Json,
};
use wam::Format;
use wam_api::{error::codes, ImportResponse};

use super::AppState;
use crate::error::AppError;

/// `POST /import/rdf`
pub async fn rdf(
    State(state): State<AppState>,
    request: Request,
) -> Result<Json<ImportResponse>, AppError> {
    import(state, request, Format::Rdf).await
}

/// `POST /import/xml`
pub async fn xml(
    State(state): State<AppState>,
    request: Request,
) -> Result<Json<ImportResponse>, AppError> {
    import(state, request, Format::Xml).await
}

async fn import(
    state: AppState,
    request: Request,
    format: Format,
) -> Result<Json<ImportResponse>, AppError> {
    let text = document_text(request, &state).await?;
    if text.trim().is_empty() {
        return Err(AppError::bad_request(
            codes::EMPTY_DOCUMENT,
            "request carried no diagram content",
        ));
    }

    let graph = wam::import(&text, format, &state.config.decode)?;
    tracing::info!(
        "import/{format}: {} bytes -> {} nodes, {} edges",
        text.len(),
        graph.nodes.len(),
        graph.edges.len()
    );
    Ok(Json(graph))
}

async fn document_text(request: Request, state: &AppState) -> Result<String, AppError> {
    let is_multipart = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("multipart/form-data"));

    if !is_multipart {
        return Ok(String::from_request(request, state).await?);
    }

    let mut multipart = Multipart::from_request(request, state).await?;
    let (mut first, mut uploaded) = (None, None);
    while let Some(field) = multipart.next_field().await? {
        let named_file = field.name() == Some("file");
        let has_filename = field.file_name().is_some();
        if !named_file && (uploaded.is_some() || (first.is_some() && !has_filename)) {
            continue;
        }
        let text = field.text().await?;
        if named_file {
            return Ok(text);
        }
        if has_filename {
            uploaded = Some(text);
        } else {
            first = Some(text);
        }
    }
    Ok(uploaded.or(first).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use wam::{Graph, NodeKind};
    use wam_api::ErrorResponse;

    use super::*;
    use crate::config::ServerConfig;
    use crate::handlers::test_support::{build_app, post_text, send};
    use crate::router::build_router;

    const BOUNDARY: &str = "wamtestboundary";

    fn multipart(uri: &str, parts: &[(&str, Option<&str>, &str)]) -> Request<Body> {
        let mut body = String::new();
        for (name, filename, content) in parts {
            body.push_str(&format!("--{BOUNDARY}\r\n"));
            match filename {
                Some(f) => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{name}\"; filename=\"{f}\"\r\n\
                     Content-Type: application/octet-stream\r\n\r\n"
                )),
                None => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{name}\"\r\n\r\n"
                )),
            }
            body.push_str(content);
            body.push_str("\r\n");
        }
        body.push_str(&format!("--{BOUNDARY}--\r\n"));
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    const RDF: &str = "node:serviceNode_1 a wam:ServiceNode ;\n    wam:id \"serviceNode_1\" ;\n    \
                       wam:x \"5\"^^xsd:decimal\n.\n";

    const XML: &str = "<Diagram><Nodes><Node id=\"db\" type=\"datasetNode\"/></Nodes><Edges/></Diagram>";

    #[tokio::test]
    async fn import_rdf_from_plain_body() {
        let (status, graph): (_, Graph) = send(build_app(), post_text("/import/rdf", RDF)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(graph.nodes[0].id, "serviceNode_1");
        assert_eq!(graph.nodes[0].kind, NodeKind::Service);
        assert_eq!(graph.nodes[0].position.x, 5.0);
    }

    #[tokio::test]
    async fn import_xml_prefers_file_field() {
        let req = multipart(
            "/import/xml",
            &[("comment", None, "ignored"), ("upload", Some("d.xml"), XML)],
        );
        let (status, graph): (_, Graph) = send(build_app(), req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(graph.nodes[0].kind, NodeKind::Dataset);
    }

    #[tokio::test]
    async fn import_uses_first_field_without_filename() {
        let req = multipart("/import/rdf", &[("diagram", None, RDF)]);
        let (status, graph): (_, Graph) = send(build_app(), req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(graph.nodes.len(), 1);
    }

    #[tokio::test]
    async fn empty_body_is_bad_request() {
        let (status, body): (_, ErrorResponse) =
            send(build_app(), post_text("/import/rdf", "  \n")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.code, codes::EMPTY_DOCUMENT);
    }

    #[tokio::test]
    async fn malformed_xml_is_bad_request() {
        let (status, body): (_, ErrorResponse) =
            send(build_app(), post_text("/import/xml", "<Diagram><Nodes/></Diagram>")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.code, codes::MALFORMED_DOCUMENT);
        assert!(body.error.contains("Edges"));
    }

    #[tokio::test]
    async fn strict_config_rejects_unknown_triples() {
        let mut config = ServerConfig::default();
        config.decode.strict = true;
        let doc = "<urn:x> <urn:y> \"z\" .\n";
        let (status, body): (_, ErrorResponse) =
            send(build_router(config), post_text("/import/rdf", doc)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.code, codes::MALFORMED_DOCUMENT);

        let (status, _): (_, Graph) = send(build_app(), post_text("/import/rdf", doc)).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn oversized_body_is_rejected() {
        let config = ServerConfig {
            max_upload_bytes: 16,
            ..ServerConfig::default()
        };
        let (status, body): (_, ErrorResponse) =
            send(build_router(config), post_text("/import/rdf", RDF)).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body.code, codes::PAYLOAD_TOO_LARGE);
    }
}
