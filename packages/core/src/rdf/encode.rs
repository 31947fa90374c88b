use std::collections::HashSet;

use serde_json::Value;

use super::vocab::{self, encode_local, EDGE_RESERVED, MARKER_PREFIX, NODE_RESERVED, STYLE_PREFIX};
use crate::graph::Graph;
use crate::scalar::format_number;
use crate::types::{Edge, EdgeKind, Node};

/// Serialise `graph` as an RDF document.
///
/// Never fails. Optional fields that are absent simply produce no line, and
/// edges without a source, target, or type are left out.
pub fn encode(graph: &Graph) -> String {
    let mut out = String::new();
    for (label, ns) in vocab::PREFIXES {
        out.push_str(&format!("@prefix {label}: <{ns}> .\n"));
    }

    for node in &graph.nodes {
        out.push('\n');
        node_block(node).write(&mut out);
    }

    let mut minted = HashSet::new();
    for edge in &graph.edges {
        let Some(kind) = edge.kind.as_ref() else {
            tracing::debug!("rdf: edge {} has no type, not exported", edge.id);
            continue;
        };
        if edge.source.is_empty() || edge.target.is_empty() {
            tracing::debug!("rdf: edge {} is missing an endpoint, not exported", edge.id);
            continue;
        }
        let local = mint_edge_name(&mut minted, &edge.id);
        let (class, functional) = vocab::edge_terms(kind);

        out.push('\n');
        edge_block(edge, &local, class).write(&mut out);

        let mut link = Block::new(node_ref(&edge.source));
        link.push(&format!("wam:{functional}"), node_ref(&edge.target));
        link.write(&mut out);
    }

    out
}

fn node_block(node: &Node) -> Block {
    let mut block = Block::new(node_ref(&node.id));
    block.push("a", format!("wam:{}", node.kind.class_name()));
    block.push("wam:label", string_literal(node.display_label()));
    block.push("wam:id", string_literal(&node.id));
    block.push("wam:x", decimal(node.position.x));
    block.push("wam:y", decimal(node.position.y));
    if let Some(w) = node.width {
        block.push("wam:width", decimal(w));
    }
    if let Some(h) = node.height {
        block.push("wam:height", decimal(h));
    }

    let extra = node.data.extra.iter().map(|(k, v)| (k.as_str(), v.clone()));
    for (key, value) in node.data.recognized_entries().into_iter().chain(extra) {
        if NODE_RESERVED.contains(&key) {
            tracing::debug!("rdf: node {} data key {key:?} clashes with a structural predicate", node.id);
            continue;
        }
        if let Some(object) = value_literal(&value) {
            block.push(&format!("wam:{}", encode_local(key)), object);
        }
    }

    if let Some(parent) = &node.parent_id {
        block.push("wam:parent", node_ref(parent));
        block.push(
            "wam:extent",
            string_literal(node.extent.as_deref().unwrap_or("parent")),
        );
    }
    block
}

fn edge_block(edge: &Edge, local: &str, class: &str) -> Block {
    let mut block = Block::new(format!("edge:{local}"));
    block.push("a", format!("wam:{class}"));
    block.push("wam:id", string_literal(&edge.id));
    block.push("wam:source", node_ref(&edge.source));
    block.push("wam:target", node_ref(&edge.target));
    if let Some(h) = &edge.source_handle {
        block.push("wam:sourceHandle", string_literal(h));
    }
    if let Some(h) = &edge.target_handle {
        block.push("wam:targetHandle", string_literal(h));
    }
    for (prefix, attrs) in [(STYLE_PREFIX, &edge.style), (MARKER_PREFIX, &edge.marker_end)] {
        for (key, value) in attrs.iter().flatten() {
            if let Some(object) = value_literal(value) {
                block.push(&format!("wam:{prefix}{}", encode_local(key)), object);
            }
        }
    }
    for (key, value) in &edge.data.extra {
        let key = key.as_str();
        if EDGE_RESERVED.contains(&key)
            || key.starts_with(STYLE_PREFIX)
            || key.starts_with(MARKER_PREFIX)
        {
            tracing::debug!("rdf: edge {} data key {key:?} clashes with a structural predicate", edge.id);
            continue;
        }
        if let Some(object) = value_literal(value) {
            block.push(&format!("wam:{}", encode_local(key)), object);
        }
    }
    block
}

/// `edge:` local name for `id`: every non-alphanumeric character becomes
/// `_`, and a numeric suffix keeps names unique within one document.
fn mint_edge_name(minted: &mut HashSet<String>, id: &str) -> String {
    let base: String = id
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    let mut name = base.clone();
    let mut n = 2;
    while !minted.insert(name.clone()) {
        name = format!("{base}_{n}");
        n += 1;
    }
    name
}

fn node_ref(id: &str) -> String {
    format!("node:{}", encode_local(id))
}

fn decimal(n: f64) -> String {
    format!("\"{}\"^^xsd:decimal", format_number(n))
}

fn string_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Numbers are tagged `xsd:decimal`; everything else is a plain string.
/// Nested arrays and objects are written as their JSON text.
fn value_literal(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Number(n) => Some(format!("\"{n}\"^^xsd:decimal")),
        Value::String(s) => Some(string_literal(s)),
        other => Some(string_literal(&other.to_string())),
    }
}

/// One subject with its predicate-object lines, terminated by a lone `.`.
struct Block {
    subject: String,
    lines: Vec<String>,
}

impl Block {
    fn new(subject: String) -> Self {
        Self {
            subject,
            lines: Vec::new(),
        }
    }

    fn push(&mut self, predicate: &str, object: String) {
        self.lines.push(format!("{predicate} {object}"));
    }

    fn write(self, out: &mut String) {
        out.push_str(&self.subject);
        for (i, line) in self.lines.iter().enumerate() {
            out.push_str(if i == 0 { " " } else { " ;\n    " });
            out.push_str(line);
        }
        out.push_str("\n.\n");
    }
}
