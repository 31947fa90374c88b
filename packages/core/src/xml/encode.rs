use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use super::tree::XmlElement;
use super::{
    ATTRIBUTE, DATA, DIAGRAM, EDGE, EDGES, EXTENT, EXTRA, LABEL, MARKER_END, NODE, NODES, PARENT_ID,
    POSITION, SIZE, SOURCE, SOURCE_HANDLE, STYLE, TARGET, TARGET_HANDLE, VIEWPORT,
};
use crate::graph::Graph;
use crate::scalar::{capitalize, decapitalize, format_number, scalar_text};
use crate::types::{Attributes, Edge, Node, NodeData};

/// `^[A-Za-z_][A-Za-z0-9._-]*$`
static XML_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9._-]*$").expect("invalid XML name regex")
});

/// Serialise `graph` as a `<Diagram>` document. Never fails.
pub fn encode(graph: &Graph) -> String {
    let mut root = XmlElement::new(DIAGRAM);

    let mut nodes = XmlElement::new(NODES);
    for node in &graph.nodes {
        nodes.push(node_element(node));
    }
    root.push(nodes);

    let mut edges = XmlElement::new(EDGES);
    for edge in &graph.edges {
        edges.push(edge_element(edge));
    }
    root.push(edges);

    if let Some(vp) = &graph.viewport {
        root.push(
            XmlElement::new(VIEWPORT)
                .with_attr("x", format_number(vp.x))
                .with_attr("y", format_number(vp.y))
                .with_attr("zoom", format_number(vp.zoom)),
        );
    }

    root.to_document()
}

fn node_element(node: &Node) -> XmlElement {
    let mut el = XmlElement::new(NODE)
        .with_attr("id", &node.id)
        .with_attr("type", node.kind.as_str());

    if let Some(label) = &node.data.label {
        el.push(XmlElement::new(LABEL).with_text(label));
    }
    el.push(
        XmlElement::new(POSITION)
            .with_attr("x", format_number(node.position.x))
            .with_attr("y", format_number(node.position.y)),
    );
    if node.width.is_some() || node.height.is_some() {
        let mut size = XmlElement::new(SIZE);
        if let Some(w) = node.width {
            size = size.with_attr("width", format_number(w));
        }
        if let Some(h) = node.height {
            size = size.with_attr("height", format_number(h));
        }
        el.push(size);
    }
    if let Some(parent) = &node.parent_id {
        el.push(XmlElement::new(PARENT_ID).with_text(parent));
    }
    if let Some(extent) = &node.extent {
        el.push(XmlElement::new(EXTENT).with_text(extent));
    }

    let mut data = XmlElement::new(DATA);
    for (key, value) in node.data.recognized_entries() {
        if let Some(child) = entry_element(&node.id, key, &value) {
            data.push(child);
        }
    }
    // Extra keys that would read back as a recognised field go one level
    // down, inside <Extra>.
    let mut shadowed = XmlElement::new(EXTRA);
    for (key, value) in &node.data.extra {
        let Some(child) = entry_element(&node.id, key, value) else {
            continue;
        };
        if shadows_recognized(key) {
            shadowed.push(child);
        } else {
            data.push(child);
        }
    }
    if !shadowed.children.is_empty() {
        data.push(shadowed);
    }
    if !data.children.is_empty() {
        el.push(data);
    }
    el
}

fn edge_element(edge: &Edge) -> XmlElement {
    let mut el = XmlElement::new(EDGE).with_attr("id", &edge.id);
    if let Some(kind) = &edge.kind {
        el = el.with_attr("type", kind.as_str());
    }

    el.push(XmlElement::new(SOURCE).with_text(&edge.source));
    el.push(XmlElement::new(TARGET).with_text(&edge.target));
    if let Some(h) = &edge.source_handle {
        el.push(XmlElement::new(SOURCE_HANDLE).with_text(h));
    }
    if let Some(h) = &edge.target_handle {
        el.push(XmlElement::new(TARGET_HANDLE).with_text(h));
    }
    if let Some(style) = &edge.style {
        el.push(map_element(STYLE, &edge.id, style));
    }
    if let Some(marker) = &edge.marker_end {
        el.push(map_element(MARKER_END, &edge.id, marker));
    }
    if !edge.data.is_empty() {
        el.push(map_element(DATA, &edge.id, &edge.data.extra));
    }
    el
}

fn map_element(name: &str, owner: &str, attrs: &Attributes) -> XmlElement {
    let mut el = XmlElement::new(name);
    for (key, value) in attrs {
        if let Some(child) = entry_element(owner, key, value) {
            el.push(child);
        }
    }
    el
}

/// One attribute as a child element, or `None` for values with no scalar
/// text form.
fn entry_element(owner: &str, key: &str, value: &Value) -> Option<XmlElement> {
    let Some(text) = scalar_text(value) else {
        tracing::debug!("xml: {owner}: attribute {key:?} is not a scalar, not exported");
        return None;
    };
    let tag = capitalize(key);
    let el = if is_plain_tag(&tag) {
        XmlElement::new(tag)
    } else {
        XmlElement::new(ATTRIBUTE).with_attr("key", key)
    };
    Some(el.with_text(text))
}

/// Whether an extra `key` decodes to the same name as a typed data field.
fn shadows_recognized(key: &str) -> bool {
    let decoded = decapitalize(&capitalize(key));
    NodeData::RECOGNIZED.contains(&decoded.as_str())
}

/// Whether `tag` can stand as an element name without being confused with
/// the schema's own structure.
fn is_plain_tag(tag: &str) -> bool {
    XML_NAME_RE.is_match(tag)
        && !tag.to_ascii_lowercase().starts_with("xml")
        && tag != EXTRA
        && tag != ATTRIBUTE
}
