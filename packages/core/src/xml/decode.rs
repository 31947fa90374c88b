use serde_json::Value;

use super::tree::XmlElement;
use super::{
    MalformedDocumentError, ATTRIBUTE, DATA, DIAGRAM, EDGE, EDGES, EXTENT, EXTRA, LABEL, MARKER_END,
    NODE, NODES, PARENT_ID, POSITION, SIZE, SOURCE, SOURCE_HANDLE, STYLE, TARGET, TARGET_HANDLE,
    VIEWPORT,
};
use crate::graph::Graph;
use crate::scalar::{decapitalize, infer_scalar, parse_leading_int};
use crate::types::{Attributes, Edge, EdgeKind, Node, NodeKind, Position, Viewport};

/// Parse a `<Diagram>` document into a [`Graph`].
///
/// The root element may have any name, but it must contain `<Nodes>` and
/// `<Edges>`. Unknown elements inside a node or edge are ignored.
pub fn decode(text: &str) -> Result<Graph, MalformedDocumentError> {
    let root = XmlElement::parse(text)?;
    if root.name != DIAGRAM {
        tracing::debug!("xml: root element is <{}>, expected <{DIAGRAM}>", root.name);
    }
    let nodes = root
        .child(NODES)
        .ok_or(MalformedDocumentError::MissingContainer(NODES))?;
    let edges = root
        .child(EDGES)
        .ok_or(MalformedDocumentError::MissingContainer(EDGES))?;

    Ok(Graph {
        nodes: nodes.children_named(NODE).map(decode_node).collect(),
        edges: edges.children_named(EDGE).map(decode_edge).collect(),
        viewport: root.child(VIEWPORT).map(|vp| Viewport {
            x: float_attr(vp, "x"),
            y: float_attr(vp, "y"),
            zoom: float_attr(vp, "zoom"),
        }),
    })
}

fn decode_node(el: &XmlElement) -> Node {
    let mut node = Node::new(
        el.attr("id").unwrap_or_default(),
        NodeKind::from(el.attr("type").unwrap_or_default()),
    );

    node.data.label = el.child_text(LABEL).map(str::to_string);
    if let Some(pos) = el.child(POSITION) {
        node.position = Position::new(
            int_attr(pos, "x").unwrap_or_default(),
            int_attr(pos, "y").unwrap_or_default(),
        );
    }
    if let Some(size) = el.child(SIZE) {
        node.width = int_attr(size, "width");
        node.height = int_attr(size, "height");
    }
    node.parent_id = el.child_text(PARENT_ID).map(str::to_string);
    node.extent = el.child_text(EXTENT).map(str::to_string);

    if let Some(data) = el.child(DATA) {
        for entry in entries(data) {
            if entry.nested {
                node.data.extra.insert(entry.key, entry.value);
            } else {
                node.data.insert(&entry.key, entry.value);
            }
        }
    }
    node
}

fn decode_edge(el: &XmlElement) -> Edge {
    let kind = el
        .attr("type")
        .filter(|t| !t.is_empty())
        .map(EdgeKind::from);
    let mut edge = Edge::new(
        el.attr("id").unwrap_or_default(),
        el.child_text(SOURCE).unwrap_or_default(),
        el.child_text(TARGET).unwrap_or_default(),
        kind,
    );
    edge.source_handle = el.child_text(SOURCE_HANDLE).map(str::to_string);
    edge.target_handle = el.child_text(TARGET_HANDLE).map(str::to_string);
    edge.style = el.child(STYLE).map(attributes);
    edge.marker_end = el.child(MARKER_END).map(attributes);
    if let Some(data) = el.child(DATA) {
        edge.data.extra = attributes(data);
    }
    edge
}

struct Entry {
    key: String,
    value: Value,
    /// Came from inside an `<Extra>` element.
    nested: bool,
}

/// Walk the children of a `<Data>`-like element. An `<Extra>` child
/// contributes its own children instead, one level down.
fn entries(container: &XmlElement) -> Vec<Entry> {
    let mut out = Vec::new();
    for child in &container.children {
        if child.name == EXTRA {
            out.extend(child.children.iter().filter_map(|c| entry(c, true)));
        } else if let Some(e) = entry(child, false) {
            out.push(e);
        }
    }
    out
}

fn entry(el: &XmlElement, nested: bool) -> Option<Entry> {
    let key = if el.name == ATTRIBUTE {
        match el.attr("key") {
            Some(k) => k.to_string(),
            None => {
                tracing::debug!("xml: <{ATTRIBUTE}> without a key, ignored");
                return None;
            }
        }
    } else {
        decapitalize(&el.name)
    };
    Some(Entry {
        key,
        value: infer_scalar(&el.text),
        nested,
    })
}

fn attributes(container: &XmlElement) -> Attributes {
    entries(container)
        .into_iter()
        .map(|e| (e.key, e.value))
        .collect()
}

fn int_attr(el: &XmlElement, key: &str) -> Option<f64> {
    el.attr(key).and_then(parse_leading_int).map(|n| n as f64)
}

fn float_attr(el: &XmlElement, key: &str) -> f64 {
    el.attr(key)
        .and_then(|v| v.trim().parse::<f64>().ok())
        .unwrap_or_default()
}
