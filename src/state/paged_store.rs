//! Paged visit timeline for the committed domain search.
//!
//! The store owns the session slots, the current page index and the fetch
//! state of the timeline. Every transition that needs data returns the
//! [`FetchRequest`] to dispatch; responses come back through [`apply`].
//!
//! [`apply`]: PagedResultStore::apply

use crate::backend::FetchRequest;
use crate::model::{FetchError, FetchToken, Page, TokenIssuer};
use crate::state::{FetchState, SessionSlots};
use tracing::{debug, info, warn};

/// Timeline fetch state plus paging position.
#[derive(Debug, Clone, Default)]
pub struct PagedResultStore {
    slots: SessionSlots,
    page_index: u32,
    /// Total page count of the last accepted page.
    known_total_pages: Option<u32>,
    state: FetchState<Page>,
    issuer: TokenIssuer,
}

impl PagedResultStore {
    /// Store with no committed search.
    pub fn new() -> Self {
        Self::default()
    }

    /// Committed domain, if any.
    pub fn domain(&self) -> Option<&str> {
        self.slots.committed_search()
    }

    /// Fetch state of the current page.
    pub fn state(&self) -> &FetchState<Page> {
        &self.state
    }

    /// Page index of the current (or in-flight) page.
    pub fn page_index(&self) -> u32 {
        self.page_index
    }

    /// Total pages reported by the last accepted page.
    pub fn known_total_pages(&self) -> Option<u32> {
        self.known_total_pages
    }

    /// A previous page can be requested.
    pub fn has_previous(&self) -> bool {
        self.domain().is_some() && self.page_index > 0
    }

    /// A next page can be requested.
    pub fn has_next(&self) -> bool {
        self.domain().is_some()
            && self
                .known_total_pages
                .is_some_and(|total| u64::from(self.page_index) + 1 < u64::from(total))
    }

    /// Commit `domain` as the search and fetch its first page.
    ///
    /// Clears the saved page so a fresh search always starts at page 0.
    pub fn commit_search(&mut self, domain: &str) -> Option<FetchRequest> {
        info!(domain, "Committing domain search");
        self.slots.commit_search(domain);
        self.slots.clear_saved_page();
        self.page_index = 0;
        self.known_total_pages = None;
        self.begin_fetch()
    }

    /// Fetch page `page_index`. Not validated against the page count.
    pub fn go_to(&mut self, page_index: u32) -> Option<FetchRequest> {
        self.domain()?;
        self.page_index = page_index;
        self.begin_fetch()
    }

    /// Fetch the next page if one exists.
    pub fn next(&mut self) -> Option<FetchRequest> {
        if !self.has_next() {
            return None;
        }
        self.go_to(self.page_index + 1)
    }

    /// Fetch the previous page if one exists.
    pub fn prev(&mut self) -> Option<FetchRequest> {
        if !self.has_previous() {
            return None;
        }
        self.go_to(self.page_index - 1)
    }

    /// Fetch page 0.
    pub fn first(&mut self) -> Option<FetchRequest> {
        self.go_to(0)
    }

    /// Fetch the last page. Requires a known, non-zero page count.
    pub fn last(&mut self) -> Option<FetchRequest> {
        let total = self.known_total_pages.filter(|total| *total > 0)?;
        self.go_to(total - 1)
    }

    /// Re-fetch the current page.
    pub fn refresh(&mut self) -> Option<FetchRequest> {
        self.begin_fetch()
    }

    /// Remember the current page before leaving the timeline.
    pub fn park(&mut self) {
        if self.domain().is_some() {
            debug!(page = self.page_index, "Parking timeline page");
            self.slots.save_page(self.page_index);
        }
    }

    /// Return to the timeline: fetch the parked page, or page 0 if none.
    ///
    /// The parked page stays in its slot until a fetch succeeds.
    pub fn resume(&mut self) -> Option<FetchRequest> {
        self.domain()?;
        self.page_index = self.slots.saved_page().unwrap_or(0);
        self.begin_fetch()
    }

    /// Apply a timeline response.
    ///
    /// Returns `true` if `token` was current and the state changed. Stale
    /// responses are dropped without touching the state.
    pub fn apply(&mut self, token: FetchToken, result: Result<Page, FetchError>) -> bool {
        if let Err(error) = &result {
            if self.state.pending_token() == Some(token) {
                warn!(%token, %error, "Timeline fetch failed");
            }
        }

        if !self.state.resolve(token, result) {
            debug!(%token, current = ?self.state.pending_token(), "Dropping stale timeline response");
            return false;
        }

        if let Some(page) = self.state.ready() {
            debug!(
                %token,
                page = page.page_index(),
                total_pages = page.total_pages(),
                items = page.items().len(),
                "Timeline page ready"
            );
            self.known_total_pages = Some(page.total_pages());
            self.slots.clear_saved_page();
        }
        true
    }

    fn begin_fetch(&mut self) -> Option<FetchRequest> {
        let domain = self.slots.committed_search()?.to_string();
        let token = self.issuer.issue();
        self.state.begin(token);
        Some(FetchRequest::Visits {
            token,
            domain,
            page: self.page_index,
        })
    }

    #[cfg(test)]
    pub(crate) fn slots_mut(&mut self) -> &mut SessionSlots {
        &mut self.slots
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "paged_store_tests.rs"]
mod tests;
