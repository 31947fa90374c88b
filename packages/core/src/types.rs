//! Core data types for WAM diagrams.
//!
//! This module defines the JSON shapes exchanged with the diagram editor:
//! [`Node`], [`Edge`], their kinds ([`NodeKind`], [`EdgeKind`]), and the open
//! attribute bags ([`NodeData`], [`EdgeData`]). Field names serialise in
//! camelCase exactly as the editor produces them.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// An ordered, string-keyed bag of arbitrary JSON values.
///
/// Used for `data.extra`, edge `style` and `markerEnd`. Ordering is by key so
/// that encoders produce stable output.
pub type Attributes = BTreeMap<String, Value>;

/// The role a node plays in a WAM diagram.
///
/// Serialises as its camelCase wire string (e.g. `"securityRealmNode"`).
/// Unknown strings are kept verbatim in [`NodeKind::Other`] so they
/// round-trip instead of collapsing to a default.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum NodeKind {
    Application,
    Service,
    DataProvider,
    Dataset,
    ProcessUnit,
    AiProcess,
    /// A container node; other nodes nest inside it via `parentId`.
    SecurityRealm,
    IdentityProvider,
    Other(String),
}

impl NodeKind {
    /// All known kinds, in declaration order.
    pub const KNOWN: [NodeKind; 8] = [
        NodeKind::Application,
        NodeKind::Service,
        NodeKind::DataProvider,
        NodeKind::Dataset,
        NodeKind::ProcessUnit,
        NodeKind::AiProcess,
        NodeKind::SecurityRealm,
        NodeKind::IdentityProvider,
    ];

    /// The wire-format string, e.g. `"applicationNode"`.
    pub fn as_str(&self) -> &str {
        match self {
            NodeKind::Application => "applicationNode",
            NodeKind::Service => "serviceNode",
            NodeKind::DataProvider => "dataProviderNode",
            NodeKind::Dataset => "datasetNode",
            NodeKind::ProcessUnit => "processUnitNode",
            NodeKind::AiProcess => "aiProcessNode",
            NodeKind::SecurityRealm => "securityRealmNode",
            NodeKind::IdentityProvider => "identityProviderNode",
            NodeKind::Other(s) => s,
        }
    }

    /// The RDF class name: the wire string with its first letter capitalised
    /// (`applicationNode` → `ApplicationNode`).
    pub fn class_name(&self) -> String {
        crate::scalar::capitalize(self.as_str())
    }

    pub fn is_security_realm(&self) -> bool {
        matches!(self, NodeKind::SecurityRealm)
    }

    pub fn is_identity_provider(&self) -> bool {
        matches!(self, NodeKind::IdentityProvider)
    }
}

impl From<&str> for NodeKind {
    fn from(s: &str) -> Self {
        NodeKind::KNOWN
            .iter()
            .find(|k| k.as_str() == s)
            .cloned()
            .unwrap_or_else(|| NodeKind::Other(s.to_string()))
    }
}

impl From<String> for NodeKind {
    fn from(s: String) -> Self {
        NodeKind::from(s.as_str())
    }
}

impl From<NodeKind> for String {
    fn from(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The relationship an edge expresses.
///
/// An edge with no kind at all is a generic, untyped connection; see
/// [`Edge::kind`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum EdgeKind {
    /// One component calls another.
    Invocation,
    /// One security realm trusts another.
    Trust,
    /// A component reads from or writes to a data or processing node.
    Legacy,
    Other(String),
}

impl EdgeKind {
    pub fn as_str(&self) -> &str {
        match self {
            EdgeKind::Invocation => "invocation",
            EdgeKind::Trust => "trust",
            EdgeKind::Legacy => "legacy",
            EdgeKind::Other(s) => s,
        }
    }
}

impl From<&str> for EdgeKind {
    fn from(s: &str) -> Self {
        match s {
            "invocation" => EdgeKind::Invocation,
            "trust" => EdgeKind::Trust,
            "legacy" => EdgeKind::Legacy,
            other => EdgeKind::Other(other.to_string()),
        }
    }
}

impl From<String> for EdgeKind {
    fn from(s: String) -> Self {
        EdgeKind::from(s.as_str())
    }
}

impl From<EdgeKind> for String {
    fn from(kind: EdgeKind) -> Self {
        match kind {
            EdgeKind::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Cosmetic canvas state. Carried through codecs, never validated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub x: f64,
    pub y: f64,
    pub zoom: f64,
}

/// The attribute bag of a node.
///
/// The recognised keys are typed fields; everything else lives in `extra`.
/// When deserialising, unrecognised keys found directly under `data` are
/// folded into `extra` so the recognised/extra split holds from the start.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawNodeData")]
pub struct NodeData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Free-form sub-type shown by the editor (e.g. `"REST API"`). Not the
    /// node's [`NodeKind`].
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<Value>,

    #[serde(default, skip_serializing_if = "Attributes::is_empty")]
    pub extra: Attributes,
}

impl NodeData {
    /// Keys with a dedicated field, in the order encoders write them.
    pub const RECOGNIZED: [&'static str; 4] = ["label", "name", "type", "cost"];

    pub fn labeled(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Self::default()
        }
    }

    /// The recognised fields other than `label`, as `(key, value)` pairs.
    pub fn recognized_entries(&self) -> Vec<(&'static str, Value)> {
        let mut out = Vec::new();
        if let Some(name) = &self.name {
            out.push(("name", Value::String(name.clone())));
        }
        if let Some(kind) = &self.kind {
            out.push(("type", Value::String(kind.clone())));
        }
        if let Some(cost) = &self.cost {
            out.push(("cost", cost.clone()));
        }
        out
    }

    /// Store `value` under `key`, routing recognised keys to their field and
    /// everything else to `extra`.
    pub fn insert(&mut self, key: &str, value: Value) {
        match key {
            "label" => self.label = Some(value_to_string(value)),
            "name" => self.name = Some(value_to_string(value)),
            "type" => self.kind = Some(value_to_string(value)),
            "cost" => self.cost = Some(value),
            _ => {
                self.extra.insert(key.to_string(), value);
            }
        }
    }
}

#[derive(Deserialize)]
struct RawNodeData {
    label: Option<String>,
    name: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    cost: Option<Value>,
    #[serde(default)]
    extra: Attributes,
    #[serde(flatten)]
    rest: Attributes,
}

impl From<RawNodeData> for NodeData {
    fn from(raw: RawNodeData) -> Self {
        let mut extra = raw.extra;
        for (k, v) in raw.rest {
            extra.entry(k).or_insert(v);
        }
        Self {
            label: raw.label,
            name: raw.name,
            kind: raw.kind,
            cost: raw.cost,
            extra,
        }
    }
}

/// The attribute bag of an edge. Edges have no recognised keys; every
/// attribute lives in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawEdgeData")]
pub struct EdgeData {
    #[serde(default, skip_serializing_if = "Attributes::is_empty")]
    pub extra: Attributes,
}

impl EdgeData {
    pub fn is_empty(&self) -> bool {
        self.extra.is_empty()
    }
}

#[derive(Deserialize)]
struct RawEdgeData {
    #[serde(default)]
    extra: Attributes,
    #[serde(flatten)]
    rest: Attributes,
}

impl From<RawEdgeData> for EdgeData {
    fn from(raw: RawEdgeData) -> Self {
        let mut extra = raw.extra;
        for (k, v) in raw.rest {
            extra.entry(k).or_insert(v);
        }
        Self { extra }
    }
}

impl Default for NodeKind {
    fn default() -> Self {
        NodeKind::Other(String::new())
    }
}

/// A graph vertex.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    /// Unique within its graph.
    #[serde(default)]
    pub id: String,

    /// An empty [`NodeKind::Other`] when the input names no type.
    #[serde(rename = "type", default)]
    pub kind: NodeKind,

    /// Relative to the parent when `parent_id` is set.
    #[serde(default)]
    pub position: Position,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,

    /// Id of the containing security realm.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,

    /// `"parent"` when the node is confined to its parent's bounds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extent: Option<String>,

    #[serde(default)]
    pub data: NodeData,
}

impl Node {
    /// A node at the origin with no size, parent, or attributes.
    pub fn new(id: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            kind,
            position: Position::default(),
            width: None,
            height: None,
            parent_id: None,
            extent: None,
            data: NodeData::default(),
        }
    }

    /// Place this node inside `parent`, setting the `"parent"` extent marker.
    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent_id = Some(parent.into());
        self.extent = Some("parent".into());
        self
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.position = Position::new(x, y);
        self
    }

    pub fn sized(mut self, width: f64, height: f64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// The label shown for this node: `data.label`, else the kind, else the id.
    pub fn display_label(&self) -> &str {
        match self.data.label.as_deref() {
            Some(l) if !l.is_empty() => l,
            _ if !self.kind.as_str().is_empty() => self.kind.as_str(),
            _ => &self.id,
        }
    }
}

/// A directed relationship between two node ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    #[serde(default)]
    pub id: String,

    /// Source node id. Empty when the editor sent none.
    #[serde(default)]
    pub source: String,

    #[serde(default)]
    pub target: String,

    /// `None` for a generic, untyped edge.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<EdgeKind>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_handle: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_handle: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<Attributes>,

    /// Arrow metadata. A bare string is accepted and read as `{ "type": .. }`.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_marker"
    )]
    pub marker_end: Option<Attributes>,

    #[serde(default, skip_serializing_if = "EdgeData::is_empty")]
    pub data: EdgeData,
}

impl Edge {
    pub fn new(
        id: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
        kind: Option<EdgeKind>,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            kind,
            source_handle: None,
            target_handle: None,
            style: None,
            marker_end: None,
            data: EdgeData::default(),
        }
    }
}

fn deserialize_marker<'de, D>(deserializer: D) -> Result<Option<Attributes>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Marker {
        Named(String),
        Detailed(Attributes),
    }

    Ok(match Option::<Marker>::deserialize(deserializer)? {
        None => None,
        Some(Marker::Named(name)) => {
            let mut attrs = Attributes::new();
            attrs.insert("type".into(), Value::String(name));
            Some(attrs)
        }
        Some(Marker::Detailed(attrs)) => Some(attrs),
    })
}

/// Either half of a graph; the offending element of a validation finding.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Element {
    Node(Node),
    Edge(Edge),
}

impl Element {
    pub fn id(&self) -> &str {
        match self {
            Element::Node(n) => &n.id,
            Element::Edge(e) => &e.id,
        }
    }
}

fn value_to_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

// --- tests -------------------------------------------------------------------
