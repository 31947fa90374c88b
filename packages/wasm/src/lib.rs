//! WebAssembly bindings for the WAM diagram codecs and validator.
//!
//! Lets the browser editor export, import and validate diagrams without a
//! server round trip. Compile with `wasm-pack build` to produce an npm-ready
//! package. Graphs cross the boundary as JSON strings in the same shape the
//! HTTP API uses (`{ nodes, edges, viewport? }`).
//!
//! ```js
//! import init, { exportRdf, importXml, validate, render } from './wam_wasm.js';
//! await init();
//!
//! const turtle = exportRdf(JSON.stringify(graph));
//! const graph2 = JSON.parse(importXml(xmlText));
//! const { errors, sources } = JSON.parse(validate(JSON.stringify(graph2)));
//! ```

use wasm_bindgen::prelude::*;
use wam::{DecodeOptions, Format, Graph};

/// One-time initialisation called at the start of every exported function.
///
/// Installs the `console_error_panic_hook` when the feature is enabled so
/// that Rust panics are forwarded to the browser console as readable errors
/// rather than appearing as generic "unreachable" WASM traps.
fn setup() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Encode a Graph JSON string as an RDF document.
///
/// Throws a string error if `graph_json` is not a valid graph.
#[wasm_bindgen(js_name = exportRdf)]
pub fn export_rdf(graph_json: &str) -> Result<String, JsValue> {
    setup();
    Ok(wam::export(&parse_graph(graph_json)?, Format::Rdf))
}

/// Encode a Graph JSON string as an XML document.
#[wasm_bindgen(js_name = exportXml)]
pub fn export_xml(graph_json: &str) -> Result<String, JsValue> {
    setup();
    Ok(wam::export(&parse_graph(graph_json)?, Format::Xml))
}

/// Decode an RDF document and return the graph as a JSON string.
///
/// `options` is an optional JSON object:
///
/// ```json
/// { "strict": true, "typeFromClass": true }
/// ```
///
/// Throws a string error if the document is empty, or on the first problem
/// when `strict` is set.
#[wasm_bindgen(js_name = importRdf)]
pub fn import_rdf(text: &str, options: Option<String>) -> Result<String, JsValue> {
    setup();
    let options = match options {
        Some(json) => parse_options(&json)?,
        None => DecodeOptions::default(),
    };
    let graph = wam::import(text, Format::Rdf, &options).map_err(to_js)?;
    to_json(&graph)
}

/// Decode an XML document and return the graph as a JSON string.
///
/// Throws a string error if the document is not well-formed or lacks its
/// `<Nodes>`/`<Edges>` containers.
#[wasm_bindgen(js_name = importXml)]
pub fn import_xml(text: &str) -> Result<String, JsValue> {
    setup();
    let graph = wam::import(text, Format::Xml, &DecodeOptions::default()).map_err(to_js)?;
    to_json(&graph)
}

/// Validate a Graph JSON string.
///
/// Returns `{ "errors": [...], "sources": [...] }` as a JSON string. Rule
/// violations are data; this only throws when the input is not a graph.
#[wasm_bindgen]
pub fn validate(graph_json: &str) -> Result<String, JsValue> {
    setup();
    let report = wam::validate(&parse_graph(graph_json)?);
    to_json(&report)
}

/// Render a Graph JSON string as human-readable text.
#[wasm_bindgen]
pub fn render(graph_json: &str) -> Result<String, JsValue> {
    setup();
    Ok(wam::render::render_graph(&parse_graph(graph_json)?))
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn parse_graph(json: &str) -> Result<Graph, JsValue> {
    serde_json::from_str(json).map_err(|e| JsValue::from_str(&format!("parse error: {e}")))
}

fn parse_options(json: &str) -> Result<DecodeOptions, JsValue> {
    let opts: serde_json::Value = serde_json::from_str(json)
        .map_err(|e| JsValue::from_str(&format!("options parse error: {e}")))?;
    let flag = |key: &str| opts.get(key).and_then(|v| v.as_bool()).unwrap_or(false);
    Ok(DecodeOptions {
        strict: flag("strict"),
        type_from_class: flag("typeFromClass"),
    })
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn to_js(e: wam::CodecError) -> JsValue {
    JsValue::from_str(&e.to_string())
}
