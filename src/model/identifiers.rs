//! Core identifier newtypes.
//!
//! Visit identifiers are opaque to the front end: whatever the operator types
//! (after normalization) or the backend returns is carried verbatim.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier of one recorded crawl attempt.
///
/// No validation happens here. An id that does not exist is reported by the
/// detail fetch, not rejected at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VisitId(String);

impl VisitId {
    /// Wrap a raw visit identifier.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VisitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for VisitId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

/// Generation number identifying one issued fetch.
///
/// Tokens are handed out by a [`TokenIssuer`] and only compared against tokens
/// from the same issuer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FetchToken(u64);

impl FetchToken {
    /// Raw generation number (for logging).
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for FetchToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic source of [`FetchToken`]s.
#[derive(Debug, Clone, Default)]
pub struct TokenIssuer {
    next: u64,
}

impl TokenIssuer {
    /// Create an issuer starting at generation 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next token. Every call returns a token distinct from all
    /// previously issued ones.
    pub fn issue(&mut self) -> FetchToken {
        let token = FetchToken(self.next);
        self.next += 1;
        token
    }
}

// ===== Tests =====

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visit_id_is_carried_verbatim() {
        let id = VisitId::new("6c4f2e1a-0000-4b9e-9d3c-9f1e2d3c4b5a");
        assert_eq!(id.as_str(), "6c4f2e1a-0000-4b9e-9d3c-9f1e2d3c4b5a");
        assert_eq!(id.to_string(), "6c4f2e1a-0000-4b9e-9d3c-9f1e2d3c4b5a");
    }

    #[test]
    fn visit_id_accepts_empty_string() {
        let id = VisitId::new("");
        assert_eq!(id.as_str(), "");
    }

    #[test]
    fn visit_id_deserializes_from_plain_string() {
        let id: VisitId = serde_json::from_str("\"abc\"").unwrap();
        assert_eq!(id, VisitId::from("abc"));
    }

    #[test]
    fn issuer_hands_out_increasing_distinct_tokens() {
        let mut issuer = TokenIssuer::new();
        let first = issuer.issue();
        let second = issuer.issue();
        let third = issuer.issue();

        assert_ne!(first, second);
        assert_ne!(second, third);
        assert!(first < second && second < third);
        assert_eq!(first.get(), 0);
        assert_eq!(third.to_string(), "#2");
    }
}
