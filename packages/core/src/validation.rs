//! Structural rules that make a WAM diagram well-formed.
//!
//! [`validate`] never fails. Every broken rule becomes a [`Violation`] in the
//! returned [`ValidationReport`], paired with the node or edge to highlight.
//! Rules are evaluated in three passes and their findings accumulate:
//!
//! 1. realm containment, in node order;
//! 2. edge checks (endpoints, trust, invocation, legacy, identity-provider
//!    isolation), in edge order;
//! 3. nesting checks on `parentId`, in node order.

use serde::Serialize;
use thiserror::Error;

use crate::graph::Graph;
use crate::types::{Edge, EdgeKind, Element, Node, NodeKind};

/// A single broken rule. `Display` is the human-readable message.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Violation {
    #[error("invalid security realm `{0}`: a security realm must contain at least one node")]
    EmptyRealm(String),

    #[error("source or target node not found for edge `{0}`")]
    MissingEndpoint(String),

    #[error(
        "invalid trust relationship on edge `{edge}`: trust edges must connect two \
         security realms, got {from} -> {to}"
    )]
    InvalidTrust {
        edge: String,
        from: NodeKind,
        to: NodeKind,
    },

    #[error(
        "invalid invocation on edge `{edge}`: only applications and services may invoke \
         a service, got {from} -> {to}"
    )]
    InvalidInvocation {
        edge: String,
        from: NodeKind,
        to: NodeKind,
    },

    #[error(
        "invalid legacy connection on edge `{edge}`: legacy edges must go from an \
         application or service to a data provider, dataset, process unit or AI process, \
         got {from} -> {to}"
    )]
    InvalidLegacy {
        edge: String,
        from: NodeKind,
        to: NodeKind,
    },

    #[error("identity provider `{node}` must not have edges, found edge `{edge}`")]
    ConnectedIdentityProvider { node: String, edge: String },

    #[error("node `{node}` has parent `{parent}`, which is not an existing security realm")]
    InvalidParent { node: String, parent: String },

    #[error("security realm `{0}` must not be nested inside another node")]
    NestedRealm(String),
}

/// The outcome of [`validate`].
///
/// Serialises as `{ "errors": [..], "sources": [..] }`, where `errors[i]` is
/// the message for `sources[i]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub sources: Vec<Element>,
    #[serde(skip)]
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    fn push(&mut self, violation: Violation, source: Element) {
        self.errors.push(violation.to_string());
        self.sources.push(source);
        self.violations.push(violation);
    }
}

/// Check every structural rule against `graph`.
///
/// Dangling edges, empty graphs, and unknown node kinds are all accepted as
/// input; they only ever produce findings.
pub fn validate(graph: &Graph) -> ValidationReport {
    let mut report = ValidationReport::default();
    let index = graph.node_index();

    // Pass 1: realm containment.
    for realm in graph.nodes.iter().filter(|n| n.kind.is_security_realm()) {
        let contains_other = graph
            .nodes
            .iter()
            .any(|n| n.id != realm.id && n.parent_id.as_deref() == Some(realm.id.as_str()));
        if !contains_other {
            report.push(
                Violation::EmptyRealm(realm.id.clone()),
                Element::Node(realm.clone()),
            );
        }
    }

    // Pass 2: edges.
    for edge in &graph.edges {
        let (Some(source), Some(target)) = (
            index.get(edge.source.as_str()).copied(),
            index.get(edge.target.as_str()).copied(),
        ) else {
            report.push(
                Violation::MissingEndpoint(edge.id.clone()),
                Element::Edge(edge.clone()),
            );
            continue;
        };

        if let Some(violation) = check_edge_kind(edge, source, target) {
            report.push(violation, Element::Edge(edge.clone()));
        }

        // A self-loop names the same provider twice; report it once.
        let endpoints = if edge.source == edge.target {
            vec![source]
        } else {
            vec![source, target]
        };
        for idp in endpoints.into_iter().filter(|n| n.kind.is_identity_provider()) {
            report.push(
                Violation::ConnectedIdentityProvider {
                    node: idp.id.clone(),
                    edge: edge.id.clone(),
                },
                Element::Node(idp.clone()),
            );
        }
    }

    // Pass 3: nesting.
    for node in &graph.nodes {
        let Some(parent_id) = node.parent_id.as_deref() else {
            continue;
        };
        if node.kind.is_security_realm() {
            report.push(
                Violation::NestedRealm(node.id.clone()),
                Element::Node(node.clone()),
            );
            continue;
        }
        let parent_is_realm = index
            .get(parent_id)
            .is_some_and(|p| p.kind.is_security_realm());
        if !parent_is_realm {
            report.push(
                Violation::InvalidParent {
                    node: node.id.clone(),
                    parent: parent_id.to_string(),
                },
                Element::Node(node.clone()),
            );
        }
    }

    report
}

// --- helpers -----------------------------------------------------------------

fn check_edge_kind(edge: &Edge, source: &Node, target: &Node) -> Option<Violation> {
    use NodeKind::*;

    let legal = match edge.kind.as_ref()? {
        EdgeKind::Trust => source.kind == SecurityRealm && target.kind == SecurityRealm,
        EdgeKind::Invocation => {
            matches!(source.kind, Application | Service) && target.kind == Service
        }
        EdgeKind::Legacy => {
            matches!(source.kind, Application | Service)
                && matches!(target.kind, DataProvider | Dataset | ProcessUnit | AiProcess)
        }
        EdgeKind::Other(_) => true,
    };
    if legal {
        return None;
    }

    let (edge_id, from, to) = (edge.id.clone(), source.kind.clone(), target.kind.clone());
    Some(match edge.kind.as_ref()? {
        EdgeKind::Trust => Violation::InvalidTrust {
            edge: edge_id,
            from,
            to,
        },
        EdgeKind::Invocation => Violation::InvalidInvocation {
            edge: edge_id,
            from,
            to,
        },
        _ => Violation::InvalidLegacy {
            edge: edge_id,
            from,
            to,
        },
    })
}

// --- tests -------------------------------------------------------------------
