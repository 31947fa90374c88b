//! Request and response types for the WAM diagram HTTP API.
//!
//! Shared by `wam-server` and by anything that talks to it, such as the
//! end-to-end tests in `wam-conformance`.
//!
//! # Endpoints covered
//!
//! | Method | Path | Type |
//! |--------|------|------|
//! | POST | `/export/rdf` | [`ExportRequest`] → [`DiagramResponse`] |
//! | POST | `/export/xml` | [`ExportRequest`] → [`DiagramResponse`] |
//! | POST | `/import/rdf` | RDF text (multipart or plain body) → [`ImportResponse`] |
//! | POST | `/import/xml` | XML text (multipart or plain body) → [`ImportResponse`] |
//! | POST | `/validate` | [`ValidateRequest`] → [`ValidateResponse`] |
//!
//! Every error response carries an [`ErrorResponse`] body.

pub mod diagram;
pub mod error;
pub mod validate;

pub use diagram::{DiagramResponse, ExportRequest, ImportResponse};
pub use error::ErrorResponse;
pub use validate::{ValidateRequest, ValidateResponse};
