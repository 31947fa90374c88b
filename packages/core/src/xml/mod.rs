//! XML element schema for WAM diagrams.
//!
//! ```text
//! <?xml version="1.0" encoding="UTF-8"?>
//! <Diagram>
//!   <Nodes>
//!     <Node id="a1" type="applicationNode">
//!       <Label>Portal</Label>
//!       <Position x="40" y="60"/>
//!       <ParentId>r1</ParentId>
//!       <Extent>parent</Extent>
//!       <Data>
//!         <Cost>12</Cost>
//!         <Owner>team-a</Owner>
//!       </Data>
//!     </Node>
//!   </Nodes>
//!   <Edges>
//!     <Edge id="e1" type="invocation">
//!       <Source>a1</Source>
//!       <Target>s1</Target>
//!       <MarkerEnd>
//!         <Type>arrowclosed</Type>
//!       </MarkerEnd>
//!     </Edge>
//!   </Edges>
//! </Diagram>
//! ```
//!
//! Attribute keys become element names with the first letter capitalised.
//! Keys that would not make a valid element name are written as
//! `<Attribute key="...">` instead.

mod decode;
mod encode;
pub mod tree;

use quick_xml::events::attributes::AttrError;
use thiserror::Error;

pub use decode::decode;
pub use encode::encode;
pub use tree::XmlElement;

/// The document could not be read as a WAM diagram.
#[derive(Debug, Error)]
pub enum MalformedDocumentError {
    #[error("XML syntax error: {0}")]
    Syntax(#[from] quick_xml::Error),

    #[error("XML attribute error: {0}")]
    Attribute(#[from] AttrError),

    #[error("document is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("unexpected end of document inside <{0}>")]
    UnexpectedEof(String),

    #[error("document has no root element")]
    Empty,

    #[error("document has more than one root element")]
    MultipleRoots,

    #[error("missing <{0}> element")]
    MissingContainer(&'static str),
}

// Element names used by the schema.
pub(crate) const DIAGRAM: &str = "Diagram";
pub(crate) const NODES: &str = "Nodes";
pub(crate) const EDGES: &str = "Edges";
pub(crate) const NODE: &str = "Node";
pub(crate) const EDGE: &str = "Edge";
pub(crate) const LABEL: &str = "Label";
pub(crate) const POSITION: &str = "Position";
pub(crate) const SIZE: &str = "Size";
pub(crate) const PARENT_ID: &str = "ParentId";
pub(crate) const EXTENT: &str = "Extent";
pub(crate) const DATA: &str = "Data";
pub(crate) const EXTRA: &str = "Extra";
pub(crate) const ATTRIBUTE: &str = "Attribute";
pub(crate) const SOURCE: &str = "Source";
pub(crate) const TARGET: &str = "Target";
pub(crate) const SOURCE_HANDLE: &str = "SourceHandle";
pub(crate) const TARGET_HANDLE: &str = "TargetHandle";
pub(crate) const STYLE: &str = "Style";
pub(crate) const MARKER_END: &str = "MarkerEnd";
pub(crate) const VIEWPORT: &str = "Viewport";
