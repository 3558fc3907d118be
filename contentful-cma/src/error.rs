//! Management API error types.

use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Result type for management API operations.
pub type CmaResult<T> = Result<T, CmaError>;

/// Errors that can occur while talking to the management API.
#[derive(Debug, Error)]
pub enum CmaError {
    /// The response body (or an item inside it) did not have the expected shape.
    #[error("decode error: {0}")]
    Decode(String),

    /// The version precondition was rejected; the stored document moved on.
    #[error("version conflict: {0}")]
    Conflict(ApiError),

    #[error("not found: {0}")]
    NotFound(ApiError),

    #[error("unauthorized: {0}")]
    Unauthorized(ApiError),

    /// Server-side schema validation failed. Field-level detail is kept in
    /// [`ApiError::details`].
    #[error("rejected by server validation: {0}")]
    ValidationRejected(ApiError),

    #[error("API request failed: {0}")]
    Api(ApiError),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("operation cancelled")]
    Cancelled,

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl CmaError {
    /// Maps a non-2xx response onto the matching variant.
    pub fn from_api(error: ApiError) -> Self {
        match error.status {
            401 | 403 => CmaError::Unauthorized(error),
            404 => CmaError::NotFound(error),
            409 => CmaError::Conflict(error),
            422 => CmaError::ValidationRejected(error),
            _ => CmaError::Api(error),
        }
    }

    /// Returns true if the server rejected a stale version.
    pub fn is_conflict(&self) -> bool {
        matches!(self, CmaError::Conflict(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, CmaError::NotFound(_))
    }

    /// The underlying API error, for variants produced from an HTTP response.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            CmaError::Conflict(e)
            | CmaError::NotFound(e)
            | CmaError::Unauthorized(e)
            | CmaError::ValidationRejected(e)
            | CmaError::Api(e) => Some(e),
            _ => None,
        }
    }

    /// HTTP status of the response that caused this error, if any.
    pub fn status(&self) -> Option<u16> {
        self.api_error().map(|e| e.status)
    }
}

impl From<serde_json::Error> for CmaError {
    fn from(err: serde_json::Error) -> Self {
        CmaError::Decode(err.to_string())
    }
}

impl From<contentful_model::Error> for CmaError {
    fn from(err: contentful_model::Error) -> Self {
        CmaError::Decode(err.to_string())
    }
}

/// A non-2xx answer from the API.
///
/// Built from the error document when the body is one, otherwise the raw body
/// text becomes the message.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    pub status: u16,
    /// `sys.id` of the error document, e.g. `VersionMismatch`.
    pub error_id: Option<String>,
    pub message: String,
    pub details: Option<Value>,
    pub request_id: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorDocument {
    #[serde(default)]
    sys: Option<ErrorSys>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    details: Option<Value>,
    #[serde(default)]
    request_id: Option<String>,
}

#[derive(Deserialize)]
struct ErrorSys {
    #[serde(default)]
    id: Option<String>,
}

impl ApiError {
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        match serde_json::from_slice::<ErrorDocument>(body) {
            Ok(doc) => Self {
                status,
                error_id: doc.sys.and_then(|s| s.id),
                message: doc.message.unwrap_or_default(),
                details: doc.details,
                request_id: doc.request_id,
            },
            Err(_) => Self {
                status,
                error_id: None,
                message: String::from_utf8_lossy(body).into_owned(),
                details: None,
                request_id: None,
            },
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(id) = &self.error_id {
            write!(f, " {id}")?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        Ok(())
    }
}
