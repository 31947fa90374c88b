use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::{Edge, Node, NodeKind, Viewport};

/// A WAM diagram: typed nodes, typed edges, and an optional viewport.
///
/// The graph is plain data. Every codec and validation call builds its own
/// graph and owns it; nothing here is shared or cached between calls.
///
/// Node order carries no meaning beyond a convention that a realm is listed
/// before the nodes it contains. Encoders preserve whatever order they are
/// given.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    #[serde(default)]
    pub nodes: Vec<Node>,

    #[serde(default)]
    pub edges: Vec<Edge>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewport: Option<Viewport>,
}

impl Graph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self {
            nodes,
            edges,
            viewport: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    /// Retrieve a node by id. The first match wins if ids repeat.
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Index of nodes by id, for callers doing many lookups.
    pub fn node_index(&self) -> HashMap<&str, &Node> {
        let mut index = HashMap::with_capacity(self.nodes.len());
        for n in &self.nodes {
            index.entry(n.id.as_str()).or_insert(n);
        }
        index
    }

    /// Nodes whose `parentId` is `parent_id`, in list order.
    pub fn children<'a>(&'a self, parent_id: &'a str) -> impl Iterator<Item = &'a Node> + 'a {
        self.nodes
            .iter()
            .filter(move |n| n.parent_id.as_deref() == Some(parent_id))
    }

    /// Edges with `node_id` as source or target.
    pub fn incident_edges<'a>(&'a self, node_id: &'a str) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges
            .iter()
            .filter(move |e| e.source == node_id || e.target == node_id)
    }

    pub fn nodes_of_kind<'a>(&'a self, kind: &'a NodeKind) -> impl Iterator<Item = &'a Node> + 'a {
        self.nodes.iter().filter(move |n| &n.kind == kind)
    }
}

// --- tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EdgeKind;

    fn sample() -> Graph {
        Graph::from_parts(
            vec![
                Node::new("r1", NodeKind::SecurityRealm),
                Node::new("a1", NodeKind::Application).with_parent("r1"),
                Node::new("s1", NodeKind::Service).with_parent("r1"),
                Node::new("d1", NodeKind::Dataset),
            ],
            vec![
                Edge::new("e1", "a1", "s1", Some(EdgeKind::Invocation)),
                Edge::new("e2", "s1", "d1", Some(EdgeKind::Legacy)),
            ],
        )
    }

    #[test]
    fn lookup_by_id() {
        let g = sample();
        assert_eq!(g.node("s1").map(|n| &n.kind), Some(&NodeKind::Service));
        assert!(g.node("missing").is_none());
        assert_eq!(g.node_index().len(), 4);
    }

    #[test]
    fn children_of_realm() {
        let g = sample();
        let ids: Vec<&str> = g.children("r1").map(|n| n.id.as_str()).collect();
        assert_eq!(ids, ["a1", "s1"]);
        assert_eq!(g.children("d1").count(), 0);
    }

    #[test]
    fn incident_edges_cover_both_ends() {
        let g = sample();
        let ids: Vec<&str> = g.incident_edges("s1").map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["e1", "e2"]);
        assert_eq!(g.nodes_of_kind(&NodeKind::Dataset).count(), 1);
    }

    #[test]
    fn json_without_edges_or_viewport() {
        let g: Graph =
            serde_json::from_str(r#"{"nodes":[{"id":"a","type":"applicationNode"}]}"#).unwrap();
        assert_eq!(g.nodes.len(), 1);
        assert!(g.edges.is_empty());
        assert!(g.viewport.is_none());
    }
}
