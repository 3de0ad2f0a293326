//! Error types for the todo store client.
//!
//! Callers surface failures to users as a single message string, so every
//! variant's `Display` output is written to stand alone.

use thiserror::Error;

/// Errors that can occur when calling the remote todo store
#[derive(Debug, Error)]
pub enum ApiError {
    /// No response was received (connection refused, DNS failure, timeout)
    #[error("No response received: {0}")]
    Transport(String),

    /// The server answered with a non-2xx status
    #[error("API error (status {status}): {body}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Raw response body, for debugging
        body: String,
    },

    /// The request could not be constructed
    #[error("Request setup failed: {0}")]
    RequestSetup(String),

    /// The response body could not be parsed into the expected shape
    #[error("Response parsing failed: {0}")]
    Decode(String),

    /// Caller-side guard tripped before any request was made
    ///
    /// These indicate direct misuse of the layer (missing identifier, blank
    /// title) and are unreachable through the application's own flows.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl ApiError {
    /// Normalize a transport-level failure from `reqwest`
    ///
    /// Builder-stage failures never left the process and map to
    /// [`ApiError::RequestSetup`]; everything else means no usable response
    /// arrived.
    pub(crate) fn from_transport(err: &reqwest::Error) -> Self {
        if err.is_builder() {
            Self::RequestSetup(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_a_single_message() {
        let err = ApiError::Api {
            status: 500,
            body: "internal error".to_string(),
        };
        assert_eq!(err.to_string(), "API error (status 500): internal error");

        let err = ApiError::InvalidArgument("todo id is required".to_string());
        assert_eq!(err.to_string(), "Invalid argument: todo id is required");
    }
}
