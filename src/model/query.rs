//! Committed search queries.

use crate::model::ValidationError;

/// What the query text identifies.
///
/// A closed enumeration so further lookup modes can be added without
/// flipping boolean polarity anywhere.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum QueryMode {
    /// Search visit history by full domain name.
    #[default]
    DomainSearch,
    /// Jump straight to one visit by its identifier.
    VisitIdLookup,
}

impl QueryMode {
    /// The other mode.
    pub fn toggled(self) -> Self {
        match self {
            QueryMode::DomainSearch => QueryMode::VisitIdLookup,
            QueryMode::VisitIdLookup => QueryMode::DomainSearch,
        }
    }

    /// Field label.
    pub fn label(self) -> &'static str {
        match self {
            QueryMode::DomainSearch => "Domain name",
            QueryMode::VisitIdLookup => "Visit Id",
        }
    }

    /// Placeholder shown while the field is empty.
    pub fn placeholder(self) -> &'static str {
        match self {
            QueryMode::DomainSearch => "Enter full domain name",
            QueryMode::VisitIdLookup => "Enter exact visit Id",
        }
    }

    /// Name of the submit action.
    pub fn action(self) -> &'static str {
        match self {
            QueryMode::DomainSearch => "Search",
            QueryMode::VisitIdLookup => "Go",
        }
    }

    /// Hint for switching to the other mode.
    pub fn switch_hint(self) -> &'static str {
        match self {
            QueryMode::DomainSearch => "Change to find by visit Id",
            QueryMode::VisitIdLookup => "Change to search by domain",
        }
    }
}

/// Normalized, submitted query.
///
/// Text is trimmed and lower-cased. A domain search never holds empty text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    mode: QueryMode,
    text: String,
}

impl Query {
    /// Smart constructor: normalizes `raw` and validates it for `mode`.
    pub fn new(mode: QueryMode, raw: &str) -> Result<Self, ValidationError> {
        let text = normalize(raw);
        if mode == QueryMode::DomainSearch && text.is_empty() {
            return Err(ValidationError::EmptyDomain);
        }
        Ok(Self { mode, text })
    }

    /// Mode the query was submitted in.
    pub fn mode(&self) -> QueryMode {
        self.mode
    }

    /// Normalized text.
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Trim surrounding whitespace and lower-case.
pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}
