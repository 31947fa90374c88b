//! Application-level error type returned by handlers.
//!
//! All variants serialise to the [`ErrorResponse`] JSON format and map to
//! the appropriate HTTP status code.

use axum::{
    extract::multipart::{MultipartError, MultipartRejection},
    extract::rejection::{JsonRejection, StringRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use wam::{CodecError, RdfError};
use wam_api::{error::codes, ErrorResponse};

/// An error that a handler can return; converts directly to an HTTP response.
#[derive(Debug)]
pub enum AppError {
    BadRequest { code: &'static str, message: String },
    PayloadTooLarge(String),
    Internal(String),
}

impl AppError {
    pub fn bad_request(code: &'static str, message: impl Into<String>) -> Self {
        AppError::BadRequest {
            code,
            message: message.into(),
        }
    }

    /// Classify an axum extractor rejection by its status code.
    fn from_rejection(status: StatusCode, message: String, code: &'static str) -> Self {
        if status == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge(message)
        } else if status.is_server_error() {
            AppError::Internal(message)
        } else {
            AppError::BadRequest { code, message }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::BadRequest { code, message } => (StatusCode::BAD_REQUEST, code, message),
            AppError::PayloadTooLarge(msg) => {
                (StatusCode::PAYLOAD_TOO_LARGE, codes::PAYLOAD_TOO_LARGE, msg)
            }
            AppError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, codes::INTERNAL_ERROR, msg)
            }
        };
        if status.is_server_error() {
            tracing::error!("{code}: {message}");
        } else {
            tracing::warn!("request rejected ({code}): {message}");
        }
        let body = ErrorResponse::new(code, message);
        (status, Json(body)).into_response()
    }
}

impl From<CodecError> for AppError {
    fn from(e: CodecError) -> Self {
        let code = match &e {
            CodecError::Rdf(RdfError::EmptyDocument) => codes::EMPTY_DOCUMENT,
            CodecError::UnknownFormat(_) => codes::INVALID_PARAMETER,
            CodecError::Rdf(_) | CodecError::Xml(_) => codes::MALFORMED_DOCUMENT,
        };
        AppError::bad_request(code, e.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(e: JsonRejection) -> Self {
        AppError::from_rejection(e.status(), e.body_text(), codes::INVALID_JSON)
    }
}

impl From<StringRejection> for AppError {
    fn from(e: StringRejection) -> Self {
        AppError::from_rejection(e.status(), e.body_text(), codes::MALFORMED_DOCUMENT)
    }
}

impl From<MultipartRejection> for AppError {
    fn from(e: MultipartRejection) -> Self {
        AppError::from_rejection(e.status(), e.body_text(), codes::MALFORMED_DOCUMENT)
    }
}

impl From<MultipartError> for AppError {
    fn from(e: MultipartError) -> Self {
        AppError::from_rejection(e.status(), e.body_text(), codes::MALFORMED_DOCUMENT)
    }
}
