//! Application state and transitions.
//!
//! AppState is the root state type containing all UI state.
//! All state transitions are pure: they mutate in-memory state and return the
//! fetches to perform, never performing I/O themselves.

use crate::backend::{FetchOutcome, FetchRequest};
use crate::model::{KeyAction, Query, QueryMode, TokenIssuer, VisitId};
use crate::state::{DetailView, PagedResultStore, QueryInput};
use tracing::{debug, info};

// ===== Focus / Screen =====

/// Where key presses go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// Keys edit the query bar.
    #[default]
    Input,
    /// Keys navigate the current screen.
    Content,
}

/// Which screen is shown below the query bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    /// Paged visit history of the committed domain.
    #[default]
    Timeline,
    /// Crawl results of one visit.
    Detail,
}

// ===== AppState =====

/// Application state. Pure data, no side effects.
///
/// # State Machine
///
/// - **Focus**: `Input ⇄ Content` (submit or Esc leaves the input, `/`
///   returns to it)
/// - **Screen**: `Timeline → Detail` on opening a visit (from a row or a
///   visit-id query), `Detail → Timeline` on back or on a domain search
///
/// Leaving the timeline for a row parks its page; coming back resumes it.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Query bar.
    pub input: QueryInput,

    /// Which part of the UI has keyboard focus.
    pub focus: Focus,

    screen: Screen,

    /// Last submitted query. Owned here until replaced.
    query: Option<Query>,

    timeline: PagedResultStore,

    /// Present while the detail screen is shown.
    detail: Option<DetailView>,

    /// Shared by every detail view, so reopening a visit never repeats a
    /// token still in flight.
    detail_tokens: TokenIssuer,

    /// Highlighted timeline row. Always within the current page's items.
    selected_row: usize,

    /// Whether the help overlay is currently visible.
    pub help_visible: bool,
}

impl AppState {
    /// Empty state: timeline screen, input focused, nothing searched.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current screen.
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Last submitted query.
    pub fn query(&self) -> Option<&Query> {
        self.query.as_ref()
    }

    /// Timeline store.
    pub fn timeline(&self) -> &PagedResultStore {
        &self.timeline
    }

    /// Detail view, while the detail screen is shown.
    pub fn detail(&self) -> Option<&DetailView> {
        self.detail.as_ref()
    }

    /// Highlighted timeline row.
    pub fn selected_row(&self) -> usize {
        self.selected_row
    }

    /// Some accepted request has not been answered yet.
    pub fn is_loading(&self) -> bool {
        self.timeline.state().is_fetching()
            || self.detail.as_ref().is_some_and(DetailView::is_loading)
    }

    // ===== Query =====

    /// Submit the query bar.
    ///
    /// A validation failure stays on the input for display and issues
    /// nothing.
    pub fn submit_input(&mut self) -> Vec<FetchRequest> {
        match self.input.submit() {
            Ok(query) => self.submit_query(query),
            Err(error) => {
                debug!(%error, "Query rejected");
                Vec::new()
            }
        }
    }

    /// Act on a validated query.
    ///
    /// Domain searches commit and show the timeline; visit-id lookups open
    /// the detail screen directly, without checking the visit exists.
    pub fn submit_query(&mut self, query: Query) -> Vec<FetchRequest> {
        info!(mode = ?query.mode(), text = query.text(), "Query submitted");
        self.focus = Focus::Content;
        let requests = match query.mode() {
            QueryMode::DomainSearch => {
                self.screen = Screen::Timeline;
                self.detail = None;
                self.selected_row = 0;
                self.timeline.commit_search(query.text()).into_iter().collect()
            }
            QueryMode::VisitIdLookup => self.show_visit(VisitId::new(query.text())),
        };
        self.query = Some(query);
        requests
    }

    // ===== Navigation =====

    /// Open the highlighted timeline row, parking the current page.
    pub fn open_selected(&mut self) -> Vec<FetchRequest> {
        if self.screen != Screen::Timeline {
            return Vec::new();
        }
        let Some(visit_id) = self
            .timeline
            .state()
            .ready()
            .and_then(|page| page.items().get(self.selected_row))
            .map(|visit| visit.visit_id.clone())
        else {
            return Vec::new();
        };
        self.timeline.park();
        self.show_visit(visit_id)
    }

    /// Leave the detail screen and resume the timeline.
    pub fn back(&mut self) -> Vec<FetchRequest> {
        if self.screen != Screen::Detail {
            return Vec::new();
        }
        self.screen = Screen::Timeline;
        self.detail = None;
        self.selected_row = 0;
        self.timeline.resume().into_iter().collect()
    }

    fn show_visit(&mut self, visit_id: VisitId) -> Vec<FetchRequest> {
        let (view, requests) = DetailView::open(visit_id, &mut self.detail_tokens);
        self.detail = Some(view);
        self.screen = Screen::Detail;
        requests
    }

    /// Move the row highlight down, clamped to the page.
    pub fn select_next_row(&mut self) {
        let len = self.row_count();
        if len > 0 {
            self.selected_row = (self.selected_row + 1).min(len - 1);
        }
    }

    /// Move the row highlight up, clamped at 0.
    pub fn select_prev_row(&mut self) {
        self.selected_row = self.selected_row.saturating_sub(1);
    }

    fn row_count(&self) -> usize {
        self.timeline
            .state()
            .ready()
            .map_or(0, |page| page.items().len())
    }

    // ===== Actions =====

    /// Apply a content-focus action. Returns the fetches it needs.
    ///
    /// [`KeyAction::Quit`] is handled by the event loop and is a no-op here.
    pub fn handle_action(&mut self, action: KeyAction) -> Vec<FetchRequest> {
        match action {
            KeyAction::FocusInput => {
                self.focus = Focus::Input;
                Vec::new()
            }
            KeyAction::ToggleMode => {
                self.input.toggle_mode();
                Vec::new()
            }
            KeyAction::Help => {
                self.help_visible = !self.help_visible;
                Vec::new()
            }
            KeyAction::Quit => Vec::new(),
            _ => match self.screen {
                Screen::Timeline => self.handle_timeline_action(action),
                Screen::Detail => self.handle_detail_action(action),
            },
        }
    }

    fn handle_timeline_action(&mut self, action: KeyAction) -> Vec<FetchRequest> {
        let request = match action {
            KeyAction::NextPage => self.timeline.next(),
            KeyAction::PrevPage => self.timeline.prev(),
            KeyAction::FirstPage => self.timeline.first(),
            KeyAction::LastPage => self.timeline.last(),
            KeyAction::Refresh => self.timeline.refresh(),
            KeyAction::MoveDown => {
                self.select_next_row();
                None
            }
            KeyAction::MoveUp => {
                self.select_prev_row();
                None
            }
            KeyAction::Open => return self.open_selected(),
            _ => None,
        };
        request.into_iter().collect()
    }

    fn handle_detail_action(&mut self, action: KeyAction) -> Vec<FetchRequest> {
        if action == KeyAction::Back {
            return self.back();
        }
        let Some(detail) = self.detail.as_mut() else {
            return Vec::new();
        };
        match action {
            KeyAction::ToggleExpand => {
                detail.toggle_expanded();
            }
            KeyAction::MoveDown => detail.scroll_down(),
            KeyAction::MoveUp => detail.scroll_up(),
            KeyAction::Refresh => return detail.refresh(&mut self.detail_tokens),
            _ => {}
        }
        Vec::new()
    }

    // ===== Responses =====

    /// Route a completed fetch to its owner. Stale outcomes are dropped.
    pub fn apply_outcome(&mut self, outcome: FetchOutcome) {
        match outcome {
            FetchOutcome::Visits { token, result } => {
                if self.timeline.apply(token, result) {
                    self.selected_row = 0;
                }
            }
            FetchOutcome::Detail {
                token,
                visit_id,
                category,
                result,
            } => match self.detail.as_mut() {
                Some(detail) => {
                    detail.apply(token, &visit_id, category, result);
                }
                None => debug!(%token, %visit_id, "Dropping detail response, no detail open"),
            },
        }
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "app_state_tests.rs"]
mod tests;
