//! wasm-bindgen-test integration tests for the WAM WASM bindings.
//!
//! Run with:
//!   wasm-pack test packages/wasm --node
//!
//! These tests compile to WASM and execute in a Node.js process, verifying
//! the exported API surface works end-to-end in a JavaScript host.

use wasm_bindgen_test::*;

// Configure all tests in this file to run in Node.js (no browser required).
wasm_bindgen_test_configure!(run_in_node_experimental);

use serde_json::Value;
use wam_wasm::{export_rdf, export_xml, import_rdf, import_xml, render, validate};

const GRAPH: &str = r#"{
  "nodes": [
    {"id": "securityRealmNode_1", "type": "securityRealmNode", "position": {"x": 0, "y": 0},
     "data": {"label": "Corporate"}},
    {"id": "applicationNode_1", "type": "applicationNode", "position": {"x": 40, "y": 60},
     "parentId": "securityRealmNode_1", "extent": "parent", "data": {"label": "Portal"}},
    {"id": "serviceNode_1", "type": "serviceNode", "position": {"x": 200, "y": 60},
     "parentId": "securityRealmNode_1", "extent": "parent", "data": {"label": "Billing"}}
  ],
  "edges": [
    {"id": "e1", "source": "applicationNode_1", "target": "serviceNode_1", "type": "invocation"}
  ]
}"#;

fn parse(json: &str) -> Value {
    serde_json::from_str(json).expect("binding output should be JSON")
}

// ---------------------------------------------------------------------------
// exportRdf() / importRdf()
// ---------------------------------------------------------------------------

#[wasm_bindgen_test]
fn rdf_round_trip_preserves_structure() {
    let turtle = export_rdf(GRAPH).expect("valid graph should export");
    assert!(turtle.contains("node:applicationNode_1 wam:invokes node:serviceNode_1"));

    let back = parse(&import_rdf(&turtle, None).expect("exported RDF should import"));
    assert_eq!(back["nodes"].as_array().unwrap().len(), 3);
    assert_eq!(back["nodes"][1]["parentId"], "securityRealmNode_1");
    assert_eq!(back["edges"][0]["type"], "invocation");
}

#[wasm_bindgen_test]
fn export_rdf_invalid_json_returns_err() {
    assert!(export_rdf("not json at all").is_err());
}

#[wasm_bindgen_test]
fn import_rdf_empty_document_returns_err() {
    assert!(import_rdf("   \n", None).is_err());
}

#[wasm_bindgen_test]
fn import_rdf_options_select_class_typing() {
    let doc = "node:portal a wam:ApplicationNode ;\n    wam:id \"portal\" .\n";

    let guessed = parse(&import_rdf(doc, None).unwrap());
    assert_eq!(guessed["nodes"][0]["type"], "portal");

    let typed = parse(&import_rdf(doc, Some(r#"{"typeFromClass": true}"#.into())).unwrap());
    assert_eq!(typed["nodes"][0]["type"], "applicationNode");
}

#[wasm_bindgen_test]
fn import_rdf_strict_rejects_garbage() {
    let doc = "this is not turtle\n";
    let lenient = parse(&import_rdf(doc, None).expect("lenient import skips garbage"));
    assert_eq!(lenient["nodes"], Value::Array(vec![]));
    assert!(import_rdf(doc, Some(r#"{"strict": true}"#.into())).is_err());
}

#[wasm_bindgen_test]
fn import_rdf_invalid_options_returns_err() {
    assert!(import_rdf("node:a wam:id \"a\" .", Some("{".into())).is_err());
}

// ---------------------------------------------------------------------------
// exportXml() / importXml()
// ---------------------------------------------------------------------------

#[wasm_bindgen_test]
fn xml_round_trip_preserves_structure() {
    let xml = export_xml(GRAPH).expect("valid graph should export");
    assert!(xml.contains("<Node id=\"serviceNode_1\" type=\"serviceNode\">"));

    let back = parse(&import_xml(&xml).expect("exported XML should import"));
    assert_eq!(back["nodes"][2]["data"]["label"], "Billing");
    assert_eq!(back["nodes"][1]["position"]["x"], 40.0);
    assert_eq!(back["edges"][0]["source"], "applicationNode_1");
}

#[wasm_bindgen_test]
fn import_xml_without_containers_returns_err() {
    assert!(import_xml("<Diagram/>").is_err());
    assert!(import_xml("<Diagram><Nodes>").is_err());
}

// ---------------------------------------------------------------------------
// validate()
// ---------------------------------------------------------------------------

#[wasm_bindgen_test]
fn validate_valid_graph_has_no_errors() {
    let report = parse(&validate(GRAPH).unwrap());
    assert_eq!(report["errors"], Value::Array(vec![]));
}

#[wasm_bindgen_test]
fn validate_empty_realm_reports_it() {
    let graph = r#"{"nodes":[{"id":"r1","type":"securityRealmNode","position":{"x":0,"y":0},"data":{}}],"edges":[]}"#;
    let report = parse(&validate(graph).unwrap());
    assert_eq!(report["errors"].as_array().unwrap().len(), 1);
    assert_eq!(report["sources"][0]["id"], "r1");
}

#[wasm_bindgen_test]
fn validate_invalid_json_returns_err() {
    assert!(validate("[1, 2]").is_err());
}

// ---------------------------------------------------------------------------
// render()
// ---------------------------------------------------------------------------

#[wasm_bindgen_test]
fn render_groups_nodes_by_realm() {
    let text = render(GRAPH).unwrap();
    assert!(text.starts_with("WAM Diagram  3 nodes, 1 edge\n"));
    assert!(text.contains("REALM Corporate [securityRealmNode_1]"));
    assert!(text.contains("applicationNode_1 → serviceNode_1  invocation [e1]"));
}
