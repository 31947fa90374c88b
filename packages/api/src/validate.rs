//! Validation bodies.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use wam::{Graph, ValidationReport};

/// The request body for `POST /validate` is a bare [`Graph`]
/// (`{ nodes, edges, viewport? }`).
pub type ValidateRequest = Graph;

/// The response body for `POST /validate`.
///
/// `errors[i]` describes `sources[i]`, the offending node or edge as it was
/// submitted. `sources` is left out when there are no errors:
///
/// ```json
/// { "errors": [] }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ValidateResponse {
    pub errors: Vec<String>,

    /// Kept as raw JSON: a node and an edge are not reliably told apart
    /// once serialised.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<Value>,
}

impl ValidateResponse {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Ids of the offending elements, in report order.
    pub fn source_ids(&self) -> Vec<&str> {
        self.sources
            .iter()
            .filter_map(|s| s.get("id").and_then(Value::as_str))
            .collect()
    }
}

impl From<ValidationReport> for ValidateResponse {
    fn from(report: ValidationReport) -> Self {
        Self {
            sources: report
                .sources
                .iter()
                .map(|s| serde_json::to_value(s).unwrap_or(Value::Null))
                .collect(),
            errors: report.errors,
        }
    }
}
