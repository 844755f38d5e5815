//! Error types for the crawl inspection front end.
//!
//! # Error Hierarchy
//!
//! - [`ValidationError`] - Operator input that cannot be submitted. Blocks the
//!   submission; no request is ever issued.
//! - [`FetchError`] - Backend failure (HTTP status, transport, undecodable
//!   body). Non-fatal: caught at the store/card boundary and rendered as an
//!   error presentation. Never retried automatically.
//!
//! An empty successful response is not an error. It becomes the `ReadyEmpty`
//! presentation (see [`crate::view_state::Presentation`]).
//!
//! Fatal errors (terminal I/O, configuration, logging) live next to the code
//! that raises them and propagate to `main` with `?`.

use thiserror::Error;

/// Submitted query text that fails validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Domain search with nothing left after trimming.
    #[error("Enter a domain name to search")]
    EmptyDomain,
}

/// Failure of a single backend request.
///
/// Carries enough of the response to render a dedicated error message. The
/// payload is cloned into state, so the type is `Clone` and comparable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Backend answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Response body (may be empty).
        body: String,
    },

    /// Request never produced a response (connection refused, timeout, DNS).
    #[error("Request failed: {0}")]
    Transport(String),

    /// Response arrived but its body did not match the expected shape.
    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl FetchError {
    /// HTTP status code, if the backend answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Http { status, .. } => Some(*status),
            FetchError::Transport(_) | FetchError::Decode(_) => None,
        }
    }

    /// Message shown to the operator in place of the requested data.
    pub fn user_message(&self) -> String {
        match self {
            FetchError::Http { status: 404, .. } => {
                "Nothing was found for this request (404).".to_string()
            }
            FetchError::Http { status: 400, body } if body.trim().is_empty() => {
                "The backend rejected the request (400).".to_string()
            }
            FetchError::Http { status: 400, body } => {
                format!("The backend rejected the request (400): {}", body.trim())
            }
            FetchError::Http { status, .. } if *status >= 500 => {
                format!("The backend failed to answer ({status}). Try again later.")
            }
            FetchError::Http { status, body } if body.trim().is_empty() => {
                format!("Request failed with status {status}.")
            }
            FetchError::Http { status, body } => {
                format!("Request failed with status {status}: {}", body.trim())
            }
            FetchError::Transport(detail) => format!("Could not reach the backend: {detail}"),
            FetchError::Decode(detail) => format!("The backend sent an unexpected answer: {detail}"),
        }
    }
}
