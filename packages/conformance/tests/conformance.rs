//! End-to-end conformance tests for the WAM diagram HTTP API.
//!
//! Each test spawns an ephemeral in-process server (real TCP, real HTTP) via
//! [`wam_conformance::spawn_server`] and exercises the API surface with a
//! `reqwest` HTTP client.
//!
//! # Coverage
//!
//! | Test | Endpoint |
//! |------|----------|
//! | `export_rdf_returns_turtle_document` | `POST /export/rdf` |
//! | `export_xml_returns_diagram_document` | `POST /export/xml` |
//! | `export_without_data_returns_400` | `POST /export/*` |
//! | `export_invalid_json_returns_400` | `POST /export/*` |
//! | `import_rdf_plain_body` | `POST /import/rdf` |
//! | `import_xml_multipart_file` | `POST /import/xml` |
//! | `import_empty_body_returns_400` | `POST /import/*` |
//! | `import_malformed_xml_returns_400` | `POST /import/xml` |
//! | `import_strict_server_rejects_garbage` | `POST /import/rdf` |
//! | `xml_round_trip_through_the_api` | export then import |
//! | `rdf_round_trip_keeps_ids_and_positions` | export then import |
//! | `validate_valid_diagram` | `POST /validate` |
//! | `validate_invocation_from_realm` | `POST /validate` |
//! | `validate_empty_realm_and_idp_edges` | `POST /validate` |
//! | `validate_accepts_untyped_nodes_and_unnamed_edges` | `POST /validate` |
//! | `validate_non_json_returns_400` | `POST /validate` |
//! | `unknown_route_returns_404` | any |

use reqwest::multipart;
use serde_json::{json, Value};
use wam::DecodeOptions;
use wam_api::{error::codes, ErrorResponse, ValidateResponse};
use wam_conformance::{spawn_server, spawn_server_with};
use wam_server::ServerConfig;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn make_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(5))
        .build()
        .unwrap()
}

/// The realm / application / service diagram used throughout.
fn sample_graph(edge_source: &str) -> Value {
    json!({
        "nodes": [
            {"id": "r1", "type": "securityRealmNode", "position": {"x": 0, "y": 0},
             "data": {"label": "Corporate"}},
            {"id": "a1", "type": "applicationNode", "position": {"x": 40, "y": 60},
             "parentId": "r1", "extent": "parent", "data": {"label": "Portal", "owner": "ops"}},
            {"id": "s1", "type": "serviceNode", "position": {"x": 220, "y": 60},
             "width": 150, "height": 80, "parentId": "r1", "extent": "parent",
             "data": {"label": "Billing", "cost": 12}}
        ],
        "edges": [
            {"id": "e1", "source": edge_source, "target": "s1", "type": "invocation"}
        ]
    })
}

async fn post_json(base: &str, path: &str, body: &Value) -> reqwest::Response {
    make_client()
        .post(format!("{base}{path}"))
        .json(body)
        .send()
        .await
        .unwrap()
}

async fn post_text(base: &str, path: &str, body: &str) -> reqwest::Response {
    make_client()
        .post(format!("{base}{path}"))
        .header("content-type", "text/plain")
        .body(body.to_string())
        .send()
        .await
        .unwrap()
}

async fn export(base: &str, format: &str, graph: &Value) -> String {
    let resp = post_json(base, &format!("/export/{format}"), &json!({ "data": graph })).await;
    assert_eq!(resp.status(), 200, "export/{format} should return 200");
    let body: Value = resp.json().await.unwrap();
    body["diagram"].as_str().expect("diagram string").to_string()
}

async fn error_code(resp: reqwest::Response) -> String {
    let body: ErrorResponse = resp.json().await.expect("error body is an ErrorResponse");
    assert!(!body.error.is_empty(), "error body carries a message");
    body.code
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

#[tokio::test]
async fn export_rdf_returns_turtle_document() {
    let base = spawn_server().await;
    let doc = export(&base, "rdf", &sample_graph("a1")).await;

    assert!(doc.starts_with("@prefix"), "RDF starts with its prefix preamble");
    assert!(doc.contains("node:a1 wam:invokes node:s1"));
    assert!(doc.contains("wam:label \"Billing\""));
}

#[tokio::test]
async fn export_xml_returns_diagram_document() {
    let base = spawn_server().await;
    let doc = export(&base, "xml", &sample_graph("a1")).await;

    assert!(doc.contains("<Diagram>"));
    assert!(doc.contains("<Node id=\"s1\" type=\"serviceNode\">"));
    assert!(doc.contains("<Size width=\"150\" height=\"80\"/>"));
    assert!(doc.contains("<Edge id=\"e1\" type=\"invocation\">"));
}

#[tokio::test]
async fn export_without_data_returns_400() {
    let base = spawn_server().await;
    for format in ["rdf", "xml"] {
        let resp = post_json(&base, &format!("/export/{format}"), &json!({})).await;
        assert_eq!(resp.status(), 400);
        assert_eq!(error_code(resp).await, codes::MISSING_DATA);
    }
}

#[tokio::test]
async fn export_invalid_json_returns_400() {
    let base = spawn_server().await;
    let resp = make_client()
        .post(format!("{base}/export/rdf"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    assert_eq!(error_code(resp).await, codes::INVALID_JSON);
}

// ---------------------------------------------------------------------------
// Import
// ---------------------------------------------------------------------------

#[tokio::test]
async fn import_rdf_plain_body() {
    let base = spawn_server().await;
    let doc = "node:serviceNode_7 wam:id \"serviceNode_7\" ;\n    wam:x 10 ;\n    wam:y 20 .\n";

    let resp = post_text(&base, "/import/rdf", doc).await;
    assert_eq!(resp.status(), 200);
    let graph: Value = resp.json().await.unwrap();
    assert_eq!(graph["nodes"][0]["id"], "serviceNode_7");
    assert_eq!(graph["nodes"][0]["type"], "serviceNode");
    assert_eq!(graph["nodes"][0]["position"]["x"], 10.0);
    assert_eq!(graph["edges"], json!([]));
}

#[tokio::test]
async fn import_xml_multipart_file() {
    let base = spawn_server().await;
    let doc = "<Diagram><Nodes><Node id=\"d1\" type=\"datasetNode\"><Label>Lake</Label></Node></Nodes><Edges/></Diagram>";

    let form = multipart::Form::new()
        .text("comment", "ignored")
        .part("file", multipart::Part::text(doc).file_name("diagram.xml"));
    let resp = make_client()
        .post(format!("{base}/import/xml"))
        .multipart(form)
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    let graph: Value = resp.json().await.unwrap();
    assert_eq!(graph["nodes"][0]["id"], "d1");
    assert_eq!(graph["nodes"][0]["type"], "datasetNode");
    assert_eq!(graph["nodes"][0]["data"]["label"], "Lake");
}

#[tokio::test]
async fn import_empty_body_returns_400() {
    let base = spawn_server().await;
    for format in ["rdf", "xml"] {
        let resp = post_text(&base, &format!("/import/{format}"), "  \n").await;
        assert_eq!(resp.status(), 400, "import/{format}");
        assert_eq!(error_code(resp).await, codes::EMPTY_DOCUMENT);
    }
}

#[tokio::test]
async fn import_malformed_xml_returns_400() {
    let base = spawn_server().await;

    let resp = post_text(&base, "/import/xml", "<Diagram><Nodes></Edges>").await;
    assert_eq!(resp.status(), 400);
    assert_eq!(error_code(resp).await, codes::MALFORMED_DOCUMENT);

    let resp = post_text(&base, "/import/xml", "<Diagram><Nodes/></Diagram>").await;
    assert_eq!(resp.status(), 400, "a document without <Edges> is malformed");
}

#[tokio::test]
async fn import_strict_server_rejects_garbage() {
    let doc = "this is not turtle\n";

    let lenient = spawn_server().await;
    let resp = post_text(&lenient, "/import/rdf", doc).await;
    assert_eq!(resp.status(), 200, "lenient decoding skips unreadable lines");

    let strict = spawn_server_with(ServerConfig {
        decode: DecodeOptions::strict(),
        ..ServerConfig::default()
    })
    .await;
    let resp = post_text(&strict, "/import/rdf", doc).await;
    assert_eq!(resp.status(), 400);
    assert_eq!(error_code(resp).await, codes::MALFORMED_DOCUMENT);
}

// ---------------------------------------------------------------------------
// Round trips
// ---------------------------------------------------------------------------

#[tokio::test]
async fn xml_round_trip_through_the_api() {
    let base = spawn_server().await;
    let original = sample_graph("a1");
    let doc = export(&base, "xml", &original).await;

    let resp = post_text(&base, "/import/xml", &doc).await;
    assert_eq!(resp.status(), 200);
    let back: Value = resp.json().await.unwrap();

    let before: Vec<wam::Node> = serde_json::from_value(original["nodes"].clone()).unwrap();
    let after: Vec<wam::Node> = serde_json::from_value(back["nodes"].clone()).unwrap();
    assert_eq!(after, before);
    assert_eq!(back["edges"][0]["type"], "invocation");
}

#[tokio::test]
async fn rdf_round_trip_keeps_ids_and_positions() {
    let base = spawn_server().await;
    let original = sample_graph("a1");
    let doc = export(&base, "rdf", &original).await;

    let resp = post_text(&base, "/import/rdf", &doc).await;
    assert_eq!(resp.status(), 200);
    let back: Value = resp.json().await.unwrap();

    for i in 0..3 {
        assert_eq!(back["nodes"][i]["id"], original["nodes"][i]["id"]);
        for axis in ["x", "y"] {
            assert_eq!(
                back["nodes"][i]["position"][axis].as_f64(),
                original["nodes"][i]["position"][axis].as_f64(),
            );
        }
    }
    assert_eq!(back["edges"][0]["source"], "a1");
    assert_eq!(back["edges"][0]["target"], "s1");
}

// ---------------------------------------------------------------------------
// Validate
// ---------------------------------------------------------------------------

#[tokio::test]
async fn validate_valid_diagram() {
    let base = spawn_server().await;
    let resp = post_json(&base, "/validate", &sample_graph("a1")).await;

    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "errors": [] }));
}

#[tokio::test]
async fn validate_invocation_from_realm() {
    let base = spawn_server().await;
    let resp = post_json(&base, "/validate", &sample_graph("r1")).await;

    assert_eq!(resp.status(), 200);
    let body: ValidateResponse = resp.json().await.unwrap();
    assert_eq!(body.errors.len(), 1);
    assert!(body.errors[0].contains("e1"));
    assert_eq!(body.source_ids(), ["e1"]);
}

#[tokio::test]
async fn validate_empty_realm_and_idp_edges() {
    let base = spawn_server().await;
    let graph = json!({
        "nodes": [
            {"id": "r1", "type": "securityRealmNode", "position": {"x": 0, "y": 0}, "data": {}},
            {"id": "app", "type": "applicationNode", "position": {"x": 0, "y": 0}, "data": {}},
            {"id": "idp", "type": "identityProviderNode", "position": {"x": 0, "y": 0}, "data": {}}
        ],
        "edges": [
            {"id": "e1", "source": "app", "target": "idp"}
        ]
    });
    let resp = post_json(&base, "/validate", &graph).await;
    assert_eq!(resp.status(), 200);

    let body: ValidateResponse = resp.json().await.unwrap();
    let sources = body.source_ids();
    assert!(sources.contains(&"r1"), "empty realm is reported");
    assert!(sources.contains(&"idp"), "identity provider with an edge is reported");
    assert_eq!(body.errors.len(), sources.len());
}

#[tokio::test]
async fn validate_accepts_untyped_nodes_and_unnamed_edges() {
    let base = spawn_server().await;
    let graph = json!({
        "nodes": [{"id": "n1", "position": {"x": 0, "y": 0}}],
        "edges": [{"source": "n1", "target": "n1"}]
    });
    let resp = post_json(&base, "/validate", &graph).await;
    assert_eq!(resp.status(), 200);
    let body: ValidateResponse = resp.json().await.unwrap();
    assert!(body.is_valid());
}

#[tokio::test]
async fn validate_non_json_returns_400() {
    let base = spawn_server().await;
    let resp = make_client()
        .post(format!("{base}/validate"))
        .header("content-type", "application/json")
        .body("nodes: []")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let base = spawn_server().await;
    let resp = post_json(&base, "/export/json", &json!({ "data": {} })).await;
    assert_eq!(resp.status(), 404);
}
