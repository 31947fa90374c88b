use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use super::parser::{self, Literal, Term, Triple};
use super::vocab::{
    self, decode_local, EDGE_NS, NODE_NS, RDF_TYPE, WAM_NS, XSD_BOOLEAN, XSD_DECIMAL,
    XSD_DOUBLE, XSD_INTEGER,
};
use super::{DecodeOptions, RdfError};
use crate::graph::Graph;
use crate::scalar::{decapitalize, number_value, parse_leading_int};
use crate::types::{Attributes, Edge, EdgeData, EdgeKind, Node, NodeData, NodeKind, Position};

/// `^[A-Za-z]+`
static LEADING_ALPHA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]+").expect("invalid leading-alpha regex"));

/// Decode an RDF document with the default, lenient [`DecodeOptions`].
pub fn decode(text: &str) -> Result<Graph, RdfError> {
    decode_with(text, &DecodeOptions::default())
}

/// Decode an RDF document into a [`Graph`].
///
/// Triples are grouped by subject. Subjects under the `node:` namespace
/// become nodes, subjects under `edge:` become edges, in the order they first
/// appear. Functional triples are recognised and skipped: the edge resources
/// already carry the same information.
///
/// Fails with [`RdfError::EmptyDocument`] on blank input. Other failures only
/// occur with [`DecodeOptions::strict`] set.
pub fn decode_with(text: &str, options: &DecodeOptions) -> Result<Graph, RdfError> {
    if text.trim().is_empty() {
        return Err(RdfError::EmptyDocument);
    }
    let triples = parser::parse(text, options.strict)?;

    let mut order: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, Vec<&Triple>> = HashMap::new();
    for t in &triples {
        groups
            .entry(t.subject.as_str())
            .or_insert_with(|| {
                order.push(t.subject.as_str());
                Vec::new()
            })
            .push(t);
    }

    let mut graph = Graph::new();
    for subject in order {
        let group = &groups[subject];
        if let Some(local) = subject.strip_prefix(NODE_NS) {
            if let Some(node) = decode_node(local, group, options)? {
                graph.nodes.push(node);
            }
        } else if let Some(local) = subject.strip_prefix(EDGE_NS) {
            graph.edges.push(decode_edge(local, group, options)?);
        } else {
            for t in group {
                unknown(t, options)?;
            }
        }
    }

    tracing::debug!(
        "rdf: decoded {} nodes and {} edges from {} triples",
        graph.nodes.len(),
        graph.edges.len(),
        triples.len()
    );
    Ok(graph)
}

/// Build a node from its triples. `None` when the subject only appears in
/// functional triples.
fn decode_node(
    local: &str,
    triples: &[&Triple],
    options: &DecodeOptions,
) -> Result<Option<Node>, RdfError> {
    let mut seen = false;
    let mut id = None;
    let mut class = None;
    let (mut x, mut y, mut width, mut height) = (None, None, None, None);
    let mut parent_id = None;
    let mut extent = None;
    let mut data = NodeData::default();

    for t in triples {
        if t.predicate == RDF_TYPE {
            seen = true;
            if let Term::Iri(iri) = &t.object {
                class = iri.strip_prefix(WAM_NS).map(str::to_string);
            }
            continue;
        }
        let Some(name) = t.predicate.strip_prefix(WAM_NS) else {
            unknown(t, options)?;
            continue;
        };
        // Relationship triples link two nodes; a literal under the same
        // predicate is an ordinary attribute.
        if vocab::FUNCTIONAL.contains(&name) && matches!(t.object, Term::Iri(_)) {
            continue;
        }
        seen = true;

        match (name, &t.object) {
            (vocab::PARENT, Term::Iri(iri)) => parent_id = Some(node_id_of(iri)),
            (_, Term::Iri(_)) => unknown(t, options)?,
            (vocab::ID, Term::Literal(l)) => id = Some(l.lexical.clone()),
            (vocab::LABEL, Term::Literal(l)) => data.label = Some(l.lexical.clone()),
            (vocab::X, Term::Literal(l)) => x = parse_leading_int(&l.lexical),
            (vocab::Y, Term::Literal(l)) => y = parse_leading_int(&l.lexical),
            (vocab::WIDTH, Term::Literal(l)) => width = parse_leading_int(&l.lexical),
            (vocab::HEIGHT, Term::Literal(l)) => height = parse_leading_int(&l.lexical),
            (vocab::EXTENT, Term::Literal(l)) => extent = Some(l.lexical.clone()),
            (vocab::PARENT, Term::Literal(l)) => parent_id = Some(l.lexical.clone()),
            (key, Term::Literal(l)) => data.insert(&decode_local(key), literal_value(l)),
        }
    }

    if !seen {
        return Ok(None);
    }

    let id = id.unwrap_or_else(|| decode_local(local));
    let kind = match class.filter(|_| options.type_from_class) {
        Some(class) => NodeKind::from(decapitalize(&class)),
        None => kind_from_id(&id),
    };
    Ok(Some(Node {
        kind,
        position: Position::new(
            x.unwrap_or_default() as f64,
            y.unwrap_or_default() as f64,
        ),
        width: width.map(|w| w as f64),
        height: height.map(|h| h as f64),
        parent_id,
        extent,
        data,
        id,
    }))
}

fn decode_edge(local: &str, triples: &[&Triple], options: &DecodeOptions) -> Result<Edge, RdfError> {
    let mut edge = Edge::new(decode_local(local), "", "", None);
    let mut style = Attributes::new();
    let mut marker = Attributes::new();
    let mut extra = Attributes::new();

    for t in triples {
        if t.predicate == RDF_TYPE {
            if let Term::Iri(iri) = &t.object {
                edge.kind = iri.strip_prefix(WAM_NS).and_then(kind_from_class);
            }
            continue;
        }
        let Some(name) = t.predicate.strip_prefix(WAM_NS) else {
            unknown(t, options)?;
            continue;
        };

        match (name, &t.object) {
            (vocab::SOURCE, Term::Iri(iri)) => edge.source = node_id_of(iri),
            (vocab::TARGET, Term::Iri(iri)) => edge.target = node_id_of(iri),
            (_, Term::Iri(_)) => unknown(t, options)?,
            (vocab::ID, Term::Literal(l)) => edge.id = l.lexical.clone(),
            (vocab::SOURCE, Term::Literal(l)) => edge.source = l.lexical.clone(),
            (vocab::TARGET, Term::Literal(l)) => edge.target = l.lexical.clone(),
            (vocab::SOURCE_HANDLE, Term::Literal(l)) => edge.source_handle = Some(l.lexical.clone()),
            (vocab::TARGET_HANDLE, Term::Literal(l)) => edge.target_handle = Some(l.lexical.clone()),
            (key, Term::Literal(l)) => {
                let (bucket, key) = if let Some(k) = key.strip_prefix(vocab::STYLE_PREFIX) {
                    (&mut style, k)
                } else if let Some(k) = key.strip_prefix(vocab::MARKER_PREFIX) {
                    (&mut marker, k)
                } else {
                    (&mut extra, key)
                };
                bucket.insert(decode_local(key), literal_value(l));
            }
        }
    }

    edge.style = (!style.is_empty()).then_some(style);
    edge.marker_end = (!marker.is_empty()).then_some(marker);
    edge.data = EdgeData { extra };
    Ok(edge)
}

/// Best guess at a node type from its id: the leading run of letters.
fn kind_from_id(id: &str) -> NodeKind {
    match LEADING_ALPHA_RE.find(id) {
        Some(m) => NodeKind::from(m.as_str()),
        None => NodeKind::Other("default".into()),
    }
}

/// `TrustEdge` → `trust`; the bare `Edge` class means an untyped edge.
fn kind_from_class(class: &str) -> Option<EdgeKind> {
    let lower = class.to_lowercase();
    let suffix = vocab::EDGE_CLASS_SUFFIX.to_lowercase();
    let name = lower.strip_suffix(suffix.as_str()).unwrap_or(&lower);
    (!name.is_empty()).then(|| EdgeKind::from(name))
}

fn node_id_of(iri: &str) -> String {
    match iri.strip_prefix(NODE_NS) {
        Some(local) => decode_local(local),
        None => iri.to_string(),
    }
}

fn literal_value(literal: &Literal) -> Value {
    let numeric = matches!(
        literal.datatype.as_deref(),
        Some(XSD_DECIMAL | XSD_INTEGER | XSD_DOUBLE)
    );
    if numeric {
        if let Some(n) = number_value(&literal.lexical) {
            return n;
        }
    }
    if literal.datatype.as_deref() == Some(XSD_BOOLEAN) {
        match literal.lexical.as_str() {
            "true" => return Value::Bool(true),
            "false" => return Value::Bool(false),
            _ => {}
        }
    }
    Value::String(literal.lexical.clone())
}

fn unknown(t: &Triple, options: &DecodeOptions) -> Result<(), RdfError> {
    if options.strict {
        return Err(RdfError::UnknownTriple {
            line: t.line,
            subject: t.subject.clone(),
            predicate: t.predicate.clone(),
        });
    }
    tracing::debug!(
        "rdf: ignoring triple on line {}: <{}> <{}>",
        t.line,
        t.subject,
        t.predicate
    );
    Ok(())
}

// --- tests -------------------------------------------------------------------
