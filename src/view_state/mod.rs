//! View-state layer - pure derivations the renderer draws from.
//!
//! # Module Structure
//!
//! - `grouping`: GroupedView - DNS records grouped by key, borrowed from the raw list
//! - `presentation`: Presentation - which of the five panel states to draw

pub mod grouping;
pub mod presentation;

pub use grouping::{group, GroupedView, RecordGroup};
pub use presentation::Presentation;
