//! RDF triple notation for WAM diagrams.
//!
//! [`encode`] writes a Turtle-style document: a four-prefix preamble, one
//! block per node, then per edge one block for the edge resource followed by
//! a *functional triple* relating the two node resources directly
//! (`node:a1 wam:invokes node:s1`). Every block ends with a line holding a
//! single `.`.
//!
//! [`decode`] reads such documents back with a small hand-written lexer and
//! parser. See [`DecodeOptions`] for how forgiving it is.
//!
//! ```text
//! @prefix wam: <http://example.org/wam#> .
//! @prefix node: <http://example.org/wam/node/> .
//! @prefix edge: <http://example.org/wam/edge/> .
//! @prefix xsd: <http://www.w3.org/2001/XMLSchema#> .
//!
//! node:a1 a wam:ApplicationNode ;
//!     wam:label "Portal" ;
//!     wam:id "a1" ;
//!     wam:x "40"^^xsd:decimal ;
//!     wam:y "60"^^xsd:decimal ;
//!     wam:parent node:r1 ;
//!     wam:extent "parent"
//! .
//! ```

mod decode;
mod encode;
pub mod lexer;
pub mod parser;
pub mod vocab;

use thiserror::Error;

pub use decode::{decode, decode_with};
pub use encode::encode;

/// Errors returned by the RDF decoder.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RdfError {
    #[error("RDF document is empty")]
    EmptyDocument,

    #[error("syntax error on line {line}: {message}")]
    Syntax { line: usize, message: String },

    #[error("unrecognised triple on line {line}: <{subject}> <{predicate}>")]
    UnknownTriple {
        line: usize,
        subject: String,
        predicate: String,
    },
}

/// How the decoder treats input it does not fully understand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Fail on the first syntax error or unrecognised triple instead of
    /// skipping it.
    pub strict: bool,

    /// Take each node's type from its `a wam:<Class>` triple.
    ///
    /// Off by default: the type is then guessed from the leading letters of
    /// the node id (`serviceNode_3` → `serviceNode`), which is how documents
    /// have always been read. Ids that do not start with their type name
    /// therefore come back with a different type.
    pub type_from_class: bool,
}

impl DecodeOptions {
    pub fn strict() -> Self {
        Self {
            strict: true,
            ..Self::default()
        }
    }
}
