//! Error types for the ingestion service

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Result type alias for ingestion operations
pub type Result<T> = std::result::Result<T, Error>;

/// Body of the 400 returned for non-JSON requests
pub const NOT_JSON_MESSAGE: &str = "This server only accepts json please parse json";

/// Body of the generic 404 returned when the pipeline produced nothing
pub const CANT_EXTRACT_MESSAGE: &str = "Can't extract data from the URL";

/// Ingestion service errors
#[derive(Debug, Error)]
pub enum Error {
    /// Remote fetch failed (connection error or unexpected status)
    #[error("network error: {0}")]
    Network(String),

    /// Source could not be parsed as a URL
    #[error("invalid url '{0}'")]
    InvalidUrl(String),

    /// Remote fetch exceeded the configured timeout
    #[error("fetch timed out: {0}")]
    Timeout(String),

    /// Local source path does not exist
    #[error("file not found: {0}")]
    NotFound(String),

    /// Extension maps to no known document kind
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Input bytes could not be decoded (bad encoding, empty/malformed data)
    #[error("failed to decode '{source_name}': {message}")]
    Decode { source_name: String, message: String },

    /// Document parsing failed
    #[error("failed to parse '{source_name}': {message}")]
    Parse { source_name: String, message: String },

    /// Blob storage client error
    #[error("storage error: {0}")]
    Storage(String),

    /// Request body was not JSON
    #[error("request body is not json")]
    NotJson,

    /// Required request field missing or empty
    #[error("missing field: {0}")]
    MissingField(&'static str),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a decode error
    pub fn decode(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            source_name: source_name.into(),
            message: message.into(),
        }
    }

    /// Create a parse error
    pub fn parse(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            source_name: source_name.into(),
            message: message.into(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Error::NotJson => (StatusCode::BAD_REQUEST, NOT_JSON_MESSAGE.to_string()),
            Error::MissingField(field) => {
                (StatusCode::BAD_REQUEST, format!("Missing field: {}", field))
            }
            Error::Config(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
            Error::Io(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
            // The client never learns why the pipeline failed; the kind is
            // logged at the failure site.
            _ => (StatusCode::NOT_FOUND, CANT_EXTRACT_MESSAGE.to_string()),
        };

        let body = Json(json!({ "error": message }));

        (status, body).into_response()
    }
}
