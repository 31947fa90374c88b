//! The fixed RDF vocabulary used for WAM diagrams.

use crate::types::EdgeKind;

pub const WAM_NS: &str = "http://example.org/wam#";
pub const NODE_NS: &str = "http://example.org/wam/node/";
pub const EDGE_NS: &str = "http://example.org/wam/edge/";
pub const XSD_NS: &str = "http://www.w3.org/2001/XMLSchema#";
pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";

/// `(label, namespace)` pairs written at the top of every document, and the
/// prefixes a decoder knows before reading any `@prefix` line.
pub const PREFIXES: [(&str, &str); 4] = [
    ("wam", WAM_NS),
    ("node", NODE_NS),
    ("edge", EDGE_NS),
    ("xsd", XSD_NS),
];

pub const XSD_DECIMAL: &str = "http://www.w3.org/2001/XMLSchema#decimal";
pub const XSD_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";
pub const XSD_DOUBLE: &str = "http://www.w3.org/2001/XMLSchema#double";
pub const XSD_BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";

// Local names under `wam:`.
pub const LABEL: &str = "label";
pub const ID: &str = "id";
pub const X: &str = "x";
pub const Y: &str = "y";
pub const WIDTH: &str = "width";
pub const HEIGHT: &str = "height";
pub const PARENT: &str = "parent";
pub const EXTENT: &str = "extent";
pub const SOURCE: &str = "source";
pub const TARGET: &str = "target";
pub const SOURCE_HANDLE: &str = "sourceHandle";
pub const TARGET_HANDLE: &str = "targetHandle";
pub const STYLE_PREFIX: &str = "style_";
pub const MARKER_PREFIX: &str = "markerEnd_";

/// Predicates a node's data keys may not reuse.
pub const NODE_RESERVED: [&str; 8] = [LABEL, ID, X, Y, WIDTH, HEIGHT, PARENT, EXTENT];

/// Predicates an edge's data keys may not reuse.
pub const EDGE_RESERVED: [&str; 5] = [ID, SOURCE, TARGET, SOURCE_HANDLE, TARGET_HANDLE];

/// Node attributes kept at the top level of `data` (or in typed fields) by
/// the decoder; everything else goes to `extra`.
pub const COMMON_ATTRIBUTES: [&str; 9] =
    ["x", "y", "width", "height", "extent", "label", "name", "type", "cost"];

/// Suffix stripped from an edge class name to recover the edge type.
pub const EDGE_CLASS_SUFFIX: &str = "Edge";

/// The RDF class and functional predicate for an edge kind.
pub fn edge_terms(kind: &EdgeKind) -> (&'static str, &'static str) {
    match kind {
        EdgeKind::Trust => ("TrustEdge", "trusts"),
        EdgeKind::Invocation => ("InvocationEdge", "invokes"),
        EdgeKind::Legacy => ("LegacyEdge", "legacyConnectsTo"),
        EdgeKind::Other(_) => ("Edge", "connectsTo"),
    }
}

/// Predicates that relate two node resources directly.
pub const FUNCTIONAL: [&str; 4] = ["trusts", "invokes", "legacyConnectsTo", "connectsTo"];

/// Percent-encode `raw` into a safe local name: only ASCII letters, digits,
/// `_` and `-` survive unescaped.
pub fn encode_local(raw: &str) -> String {
    urlencoding::encode(raw)
        .replace('.', "%2E")
        .replace('~', "%7E")
}

/// Reverse of [`encode_local`]. Falls back to the raw text when the escapes
/// do not form valid UTF-8.
pub fn decode_local(local: &str) -> String {
    urlencoding::decode(local)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| local.to_string())
}
