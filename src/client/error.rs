//! Client Error Types

use thiserror::Error;

use crate::models::ShapeError;

/// Errors that can occur when reading from the analytics API.
///
/// The `Display` text is what a view shows in its error state, so the
/// status variant prints the message alone.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The HTTP client could not be built
    #[error("Client setup failed: {0}")]
    Setup(String),

    /// Connection refused, DNS failure, reset mid-body
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timeout")]
    Timeout,

    /// Non-success status; `message` is the API's `detail` or a
    /// per-resource fallback
    #[error("{message}")]
    Status { status: u16, message: String },

    /// Body was not valid JSON or did not match the expected type
    #[error("Invalid response: {0}")]
    Decode(String),

    /// Detail payload fit neither accepted shape
    #[error(transparent)]
    Shape(#[from] ShapeError),
}

impl ClientError {
    pub(crate) fn from_reqwest(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ClientError::Timeout
        } else if e.is_decode() {
            ClientError::Decode(e.to_string())
        } else {
            ClientError::Network(e.to_string())
        }
    }

    /// HTTP status for status failures
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_displays_message_only() {
        let err = ClientError::Status {
            status: 404,
            message: "Customer not found".to_string(),
        };
        assert_eq!(err.to_string(), "Customer not found");
        assert_eq!(err.status(), Some(404));
        assert_eq!(ClientError::Timeout.status(), None);
    }

    #[test]
    fn test_shape_error_is_transparent() {
        let err: ClientError = ShapeError::Unrecognized { entity: "Product" }.into();
        assert_eq!(
            err.to_string(),
            "Product data not available in expected format"
        );
    }
}
