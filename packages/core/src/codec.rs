//! One entry point for both interchange formats.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use thiserror::Error;

use crate::graph::Graph;
use crate::rdf::{self, DecodeOptions, RdfError};
use crate::xml::{self, MalformedDocumentError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Rdf,
    Xml,
}

impl Format {
    pub fn as_str(self) -> &'static str {
        match self {
            Format::Rdf => "rdf",
            Format::Xml => "xml",
        }
    }

    pub fn media_type(self) -> &'static str {
        match self {
            Format::Rdf => "text/turtle",
            Format::Xml => "application/xml",
        }
    }

    /// Guess the format from a file name: `.ttl`, `.rdf`, `.turtle`, `.xml`.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse().ok())
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Format {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rdf" | "ttl" | "turtle" => Ok(Format::Rdf),
            "xml" => Ok(Format::Xml),
            _ => Err(CodecError::UnknownFormat(s.to_string())),
        }
    }
}

#[derive(Debug, Error)]
pub enum CodecError {
    #[error(transparent)]
    Rdf(#[from] RdfError),

    #[error("malformed XML document: {0}")]
    Xml(#[from] MalformedDocumentError),

    #[error("unknown format `{0}` (expected `rdf` or `xml`)")]
    UnknownFormat(String),
}

/// Encode `graph` in `format`. Never fails.
pub fn export(graph: &Graph, format: Format) -> String {
    match format {
        Format::Rdf => rdf::encode(graph),
        Format::Xml => xml::encode(graph),
    }
}

/// Decode `text` written in `format`. `options` only affect RDF.
pub fn import(text: &str, format: Format, options: &DecodeOptions) -> Result<Graph, CodecError> {
    let graph = match format {
        Format::Rdf => rdf::decode_with(text, options)?,
        Format::Xml => xml::decode(text)?,
    };
    Ok(graph)
}
