//! Human-readable text rendering of [`Graph`]s and [`ValidationReport`]s.
//!
//! The output is stable plain text for terminals and logs. It is not an
//! interchange format; use [`crate::rdf`] or [`crate::xml`] for that.

use crate::graph::Graph;
use crate::types::Node;
use crate::validation::ValidationReport;

/// Render a [`Graph`] as a summary grouped by security realm.
///
/// ```text
/// WAM Diagram  3 nodes, 1 edge
/// ────────────────────────────
///
/// REALM Corporate [r1]
///   applicationNode  Portal [a1]
///   serviceNode  Billing [s1]
///
/// EDGES (1)
///   a1 → s1  invocation [e1]
/// ```
pub fn render_graph(graph: &Graph) -> String {
    let header = format!(
        "WAM Diagram  {} node{}, {} edge{}",
        graph.nodes.len(),
        plural(graph.nodes.len()),
        graph.edges.len(),
        plural(graph.edges.len()),
    );
    let rule = "─".repeat(header.chars().count());
    let mut out = format!("{header}\n{rule}\n");

    for realm in graph.nodes.iter().filter(|n| n.kind.is_security_realm()) {
        out.push('\n');
        out.push_str(&format!("REALM {} [{}]\n", realm.display_label(), realm.id));
        let mut any = false;
        for child in graph.children(&realm.id) {
            out.push_str(&node_line(child));
            any = true;
        }
        if !any {
            out.push_str("  (empty)\n");
        }
    }

    // Unparented non-realm nodes, plus nodes whose parent is not a realm.
    let loose: Vec<&Node> = graph
        .nodes
        .iter()
        .filter(|n| !n.kind.is_security_realm())
        .filter(|n| match &n.parent_id {
            None => true,
            Some(p) => !graph.node(p).is_some_and(|p| p.kind.is_security_realm()),
        })
        .collect();
    if !loose.is_empty() {
        out.push('\n');
        out.push_str(&format!("UNCONTAINED ({})\n", loose.len()));
        for n in loose {
            out.push_str(&node_line(n));
        }
    }

    if !graph.edges.is_empty() {
        out.push('\n');
        out.push_str(&format!("EDGES ({})\n", graph.edges.len()));
        for e in &graph.edges {
            let kind = e.kind.as_ref().map(|k| k.as_str()).unwrap_or("edge");
            out.push_str(&format!("  {} → {}  {} [{}]\n", e.source, e.target, kind, e.id));
        }
    }

    out
}

/// Render a [`ValidationReport`]: `valid`, or one numbered line per error.
pub fn render_report(report: &ValidationReport) -> String {
    if report.is_valid() {
        return "valid\n".to_string();
    }
    let mut out = format!(
        "{} error{}\n",
        report.errors.len(),
        plural(report.errors.len())
    );
    for (i, error) in report.errors.iter().enumerate() {
        out.push_str(&format!("  {}. {}\n", i + 1, error));
    }
    out
}

// --- helpers -----------------------------------------------------------------

fn node_line(node: &Node) -> String {
    format!("  {}  {} [{}]\n", node.kind, node.display_label(), node.id)
}

fn plural(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

// --- tests -------------------------------------------------------------------
