//! Interchange codecs and validation for WAM (Workflow and Access Model)
//! diagrams.
//!
//! A WAM diagram is a typed graph of security realms, applications,
//! services, data stores and identity providers, connected by trust,
//! invocation and legacy edges. This crate is the foundation for the
//! `wam-server` HTTP service, the `wamctl` CLI, and the `wam-wasm`
//! WebAssembly bindings.
//!
//! # Crate layout
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`types`] | Nodes, edges and their attribute bags: [`Node`], [`Edge`], [`NodeKind`], [`EdgeKind`] |
//! | [`graph`] | The [`Graph`] container and its query helpers |
//! | [`rdf`] | Turtle-style triple notation: [`rdf::encode`], [`rdf::decode`] |
//! | [`xml`] | Element-based XML schema: [`xml::encode`], [`xml::decode`] |
//! | [`codec`] | Format dispatch over both codecs |
//! | [`validation`] | Structural rules via [`validate`] |
//! | [`render`] | Plain-text rendering of graphs and reports |
//!
//! # Quick start
//!
//! ```rust
//! use wam::{validate, Edge, EdgeKind, Graph, Node, NodeKind};
//!
//! let graph = Graph::from_parts(
//!     vec![
//!         Node::new("r1", NodeKind::SecurityRealm),
//!         Node::new("a1", NodeKind::Application).with_parent("r1"),
//!         Node::new("s1", NodeKind::Service).with_parent("r1"),
//!     ],
//!     vec![Edge::new("e1", "a1", "s1", Some(EdgeKind::Invocation))],
//! );
//!
//! assert!(validate(&graph).is_valid());
//!
//! let turtle = wam::rdf::encode(&graph);
//! assert!(turtle.contains("node:a1 wam:invokes node:s1"));
//! ```

pub mod codec;
pub mod graph;
pub mod rdf;
pub mod render;
pub mod scalar;
pub mod types;
pub mod validation;
pub mod xml;

pub use codec::{export, import, CodecError, Format};
pub use graph::Graph;
pub use rdf::{DecodeOptions, RdfError};
pub use types::{
    Attributes, Edge, EdgeData, EdgeKind, Element, Node, NodeData, NodeKind, Position, Viewport,
};
pub use validation::{validate, ValidationReport, Violation};
pub use xml::MalformedDocumentError;
