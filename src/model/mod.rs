//! Domain model types (pure).
//!
//! All types in this module are pure data; constructors enforce their
//! invariants.

pub mod error;
pub mod identifiers;
pub mod key_action;
pub mod query;
pub mod record;
pub mod visit;

// Re-export for convenience
pub use error::{FetchError, ValidationError};
pub use identifiers::{FetchToken, TokenIssuer, VisitId};
pub use key_action::KeyAction;
pub use query::{Query, QueryMode};
pub use record::{CategorySummary, GeoAnnotation, RawRecord, ResponseEntry};
pub use visit::{CrawlStatus, CrawlType, Page, VisitSummary};
