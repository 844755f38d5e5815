//! UI state machine (pure).
//!
//! All state transitions are pure in-memory updates testable without TUI.
//! Transitions that need data return [`FetchRequest`]s; responses come back
//! through [`AppState::apply_outcome`].
//!
//! [`FetchRequest`]: crate::backend::FetchRequest

pub mod app_state;
pub mod detail;
pub mod fetch_state;
pub mod paged_store;
pub mod query_input;
pub mod session_slots;

// Re-export for convenience
pub use app_state::{AppState, Focus, Screen};
pub use detail::DetailView;
pub use fetch_state::FetchState;
pub use paged_store::PagedResultStore;
pub use query_input::QueryInput;
pub use session_slots::SessionSlots;
