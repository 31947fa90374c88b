//! Export and import bodies.

use serde::{Deserialize, Serialize};

use wam::Graph;

/// The request body for `POST /export/{format}`.
///
/// `data` is optional on the wire so that a missing graph can be answered
/// with a `400` carrying an [`ErrorResponse`](crate::ErrorResponse) instead of
/// a generic JSON rejection.
///
/// ```json
/// { "data": { "nodes": [ ... ], "edges": [ ... ] } }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ExportRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Graph>,
}

impl ExportRequest {
    pub fn new(graph: Graph) -> Self {
        Self { data: Some(graph) }
    }
}

/// The response body for a successful export: the encoded document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiagramResponse {
    pub diagram: String,
}

/// The response body for a successful `POST /import/{format}` is the decoded
/// [`Graph`] itself.
pub type ImportResponse = Graph;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn export_request_without_data() {
        let req: ExportRequest = serde_json::from_value(json!({})).unwrap();
        assert_eq!(req.data, None);
    }

    #[test]
    fn export_request_with_graph() {
        let req: ExportRequest = serde_json::from_value(json!({
            "data": {
                "nodes": [{ "id": "r1", "type": "securityRealmNode", "position": { "x": 0, "y": 0 } }],
                "edges": []
            }
        }))
        .unwrap();
        let graph = req.data.unwrap();
        assert_eq!(graph.nodes[0].id, "r1");
        assert!(graph.nodes[0].kind.is_security_realm());
    }
}
