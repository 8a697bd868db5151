//! Error types for the gateway client.
//!
//! # Design
//! Three failure classes reach callers: no response was obtained
//! (`Transport`, `Timeout`), a response was obtained with a non-2xx status
//! (`Status`), or a 2xx body did not match the expected envelope (`Decode`).
//! Low-level `*_api` methods only ever produce the first class; the status
//! and decode variants come from the high-level methods.

use std::time::Duration;

use thiserror::Error;

/// Errors returned by gateway resource clients.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// The gateway could not be reached (connection refused, DNS failure,
    /// connection dropped while reading).
    #[error("transport error: {0}")]
    Transport(String),

    /// The configured timeout elapsed before a full response arrived.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// The gateway answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// A 2xx response body could not be decoded into the expected type.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// The request payload could not be serialized to JSON.
    #[error("failed to serialize request: {0}")]
    Serialization(String),
}

impl GatewayError {
    /// True when no response was obtained from the gateway.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Timeout(_))
    }

    /// The HTTP status carried by a `Status` error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_exposes_code() {
        let err = GatewayError::Status {
            status: 404,
            body: "operation not found".to_string(),
        };
        assert_eq!(err.status(), Some(404));
        assert!(err.is_not_found());
        assert!(!err.is_transport());
        assert_eq!(err.to_string(), "HTTP 404: operation not found");
    }

    #[test]
    fn timeout_counts_as_transport_failure() {
        let err = GatewayError::Timeout(Duration::from_millis(250));
        assert!(err.is_transport());
        assert_eq!(err.status(), None);
    }

    #[test]
    fn decode_error_has_no_status() {
        let err = GatewayError::Decode("expected value".to_string());
        assert_eq!(err.status(), None);
        assert!(!err.is_not_found());
    }
}
