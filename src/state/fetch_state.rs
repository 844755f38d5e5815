//! Request/response state shared by the timeline store and the detail cards.

use crate::model::{FetchError, FetchToken};

/// Lifecycle of one fetched value.
///
/// Sum type enforces exactly one state at a time. `Ready` and `Failed` are
/// replaced wholesale by the next accepted response; nothing is merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchState<T> {
    /// Nothing requested yet.
    Idle,
    /// Waiting for the response carrying `token`.
    Fetching {
        /// Only a response with this token may resolve the fetch.
        token: FetchToken,
    },
    /// Last accepted response succeeded.
    Ready(T),
    /// Last accepted response failed. No partial data is kept.
    Failed(FetchError),
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        FetchState::Idle
    }
}

impl<T> FetchState<T> {
    /// Start waiting for `token`, superseding any earlier fetch.
    pub fn begin(&mut self, token: FetchToken) {
        *self = FetchState::Fetching { token };
    }

    /// Resolve the pending fetch if `token` is the one being waited for.
    ///
    /// Returns `true` if the result was applied. Results for any other token
    /// (superseded or unknown) are dropped and leave the state untouched.
    pub fn resolve(&mut self, token: FetchToken, result: Result<T, FetchError>) -> bool {
        if self.pending_token() != Some(token) {
            return false;
        }
        *self = match result {
            Ok(value) => FetchState::Ready(value),
            Err(error) => FetchState::Failed(error),
        };
        true
    }

    /// Token currently waited for, if any.
    pub fn pending_token(&self) -> Option<FetchToken> {
        match self {
            FetchState::Fetching { token } => Some(*token),
            _ => None,
        }
    }

    /// A fetch is in flight.
    pub fn is_fetching(&self) -> bool {
        matches!(self, FetchState::Fetching { .. })
    }

    /// Value of the last successful fetch, if that is the current state.
    pub fn ready(&self) -> Option<&T> {
        match self {
            FetchState::Ready(value) => Some(value),
            _ => None,
        }
    }

    /// Error of the last failed fetch, if that is the current state.
    pub fn error(&self) -> Option<&FetchError> {
        match self {
            FetchState::Failed(error) => Some(error),
            _ => None,
        }
    }
}
