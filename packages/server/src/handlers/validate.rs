//! Validation handler: `POST /validate`.

use axum::{extract::rejection::JsonRejection, Json};
use wam::validate as check;
use wam_api::{ValidateRequest, ValidateResponse};

use crate::error::AppError;

/// `POST /validate`
///
/// Always `200` once the body parses as a graph: rule violations are data,
/// not errors.
pub async fn validate(
    payload: Result<Json<ValidateRequest>, JsonRejection>,
) -> Result<Json<ValidateResponse>, AppError> {
    let Json(graph) = payload?;
    let report = check(&graph);
    tracing::info!(
        "validate: {} nodes, {} edges, {} violations",
        graph.nodes.len(),
        graph.edges.len(),
        report.len()
    );
    Ok(Json(report.into()))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use super::*;
    use crate::handlers::test_support::{build_app, post_json, send};

    fn realm_nodes() -> serde_json::Value {
        json!([
            { "id": "r1", "type": "securityRealmNode", "position": { "x": 0, "y": 0 } },
            { "id": "a1", "type": "applicationNode", "position": { "x": 0, "y": 0 }, "parentId": "r1" },
            { "id": "s1", "type": "serviceNode", "position": { "x": 0, "y": 0 }, "parentId": "r1" }
        ])
    }

    #[tokio::test]
    async fn valid_diagram_has_no_errors() {
        let body = json!({
            "nodes": realm_nodes(),
            "edges": [{ "id": "e1", "source": "a1", "target": "s1", "type": "invocation" }]
        });
        let (status, resp): (_, serde_json::Value) =
            send(build_app(), post_json("/validate", body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(resp, json!({ "errors": [] }));
    }

    #[tokio::test]
    async fn invocation_from_realm_is_reported() {
        let body = json!({
            "nodes": realm_nodes(),
            "edges": [{ "id": "e1", "source": "r1", "target": "s1", "type": "invocation" }]
        });
        let (status, resp): (_, ValidateResponse) =
            send(build_app(), post_json("/validate", body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(resp.errors.len(), 1);
        assert_eq!(resp.source_ids(), ["e1"]);
    }

    #[tokio::test]
    async fn untyped_node_and_unnamed_edge_reach_the_validator() {
        let body = json!({
            "nodes": [{ "id": "n1", "position": { "x": 0, "y": 0 } }],
            "edges": [
                { "source": "n1", "target": "n1" },
                { "source": "n1", "target": "ghost" }
            ]
        });
        let (status, resp): (_, ValidateResponse) =
            send(build_app(), post_json("/validate", body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(resp.errors, ["source or target node not found for edge ``"]);
        assert_eq!(resp.source_ids(), [""]);
    }

    #[tokio::test]
    async fn empty_object_is_an_empty_graph() {
        let (status, resp): (_, ValidateResponse) =
            send(build_app(), post_json("/validate", json!({}))).await;
        assert_eq!(status, StatusCode::OK);
        assert!(resp.is_valid());
    }
}
