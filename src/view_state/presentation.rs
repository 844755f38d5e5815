//! What each panel should show, derived from its fetch state.

use crate::model::{CategorySummary, FetchError, Page, RawRecord};
use crate::state::{FetchState, PagedResultStore};

/// Exactly one presentation per panel at any time.
#[derive(Debug, PartialEq, Eq)]
pub enum Presentation<'a, T> {
    /// No query has been committed.
    NoQueryYet,
    /// A fetch is in flight.
    Searching,
    /// The last fetch failed.
    Error(&'a FetchError),
    /// The last fetch succeeded with nothing to show.
    ReadyEmpty,
    /// The last fetch succeeded with data.
    ReadyWithData(&'a T),
}

impl<T> Clone for Presentation<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Presentation<'_, T> {}

/// Derive a presentation from a fetch state and an emptiness test.
///
/// `Idle` means nothing was asked for yet and maps to `NoQueryYet`.
pub fn present<'a, T>(
    state: &'a FetchState<T>,
    is_empty: impl Fn(&T) -> bool,
) -> Presentation<'a, T> {
    match state {
        FetchState::Idle => Presentation::NoQueryYet,
        FetchState::Fetching { .. } => Presentation::Searching,
        FetchState::Failed(error) => Presentation::Error(error),
        FetchState::Ready(value) if is_empty(value) => Presentation::ReadyEmpty,
        FetchState::Ready(value) => Presentation::ReadyWithData(value),
    }
}

/// Timeline panel: empty when the page has no visits.
pub fn timeline(store: &PagedResultStore) -> Presentation<'_, Page> {
    if store.domain().is_none() {
        return Presentation::NoQueryYet;
    }
    present(store.state(), Page::is_empty)
}

/// DNS card: empty when no records were returned.
pub fn dns_card(state: &FetchState<Vec<RawRecord>>) -> Presentation<'_, Vec<RawRecord>> {
    present(state, Vec::is_empty)
}

/// Summary card: empty when no fields were returned.
pub fn summary_card(state: &FetchState<CategorySummary>) -> Presentation<'_, CategorySummary> {
    present(state, CategorySummary::is_empty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::FetchRequest;
    use crate::model::{CrawlStatus, VisitId, VisitSummary};

    fn token_of(request: Option<FetchRequest>) -> crate::model::FetchToken {
        request.map(|r| r.token()).unwrap()
    }

    fn summaries(count: usize) -> Vec<VisitSummary> {
        (0..count)
            .map(|i| VisitSummary {
                visit_id: VisitId::new(format!("v-{i}")),
                timestamp: None,
                crawl_status: CrawlStatus::default(),
            })
            .collect()
    }

    #[test]
    fn timeline_without_query_is_no_query_yet() {
        let store = PagedResultStore::new();
        assert_eq!(timeline(&store), Presentation::NoQueryYet);
    }

    #[test]
    fn timeline_while_fetching_is_searching() {
        let mut store = PagedResultStore::new();
        store.commit_search("example.com");
        assert_eq!(timeline(&store), Presentation::Searching);
    }

    #[test]
    fn timeline_with_items_is_ready_with_data() {
        let mut store = PagedResultStore::new();
        let token = token_of(store.commit_search("example.com"));
        store.apply(token, Ok(Page::new(summaries(3), 0, 2, 25)));

        match timeline(&store) {
            Presentation::ReadyWithData(page) => {
                assert_eq!(page.items().len(), 3);
                assert!(page.has_next());
                assert!(!page.has_previous());
            }
            other => panic!("Expected data, got {:?}", other),
        }
    }

    #[test]
    fn timeline_with_no_items_is_ready_empty() {
        let mut store = PagedResultStore::new();
        let token = token_of(store.commit_search("example.com"));
        store.apply(token, Ok(Page::new(vec![], 0, 0, 0)));
        assert_eq!(timeline(&store), Presentation::ReadyEmpty);
    }

    #[test]
    fn timeline_failure_is_error() {
        let mut store = PagedResultStore::new();
        let token = token_of(store.commit_search("example.com"));
        let error = FetchError::Http {
            status: 404,
            body: String::new(),
        };
        store.apply(token, Err(error.clone()));
        assert_eq!(timeline(&store), Presentation::Error(&error));
    }

    #[test]
    fn empty_dns_list_is_ready_empty() {
        let state = FetchState::Ready(Vec::new());
        assert_eq!(dns_card(&state), Presentation::ReadyEmpty);
    }

    #[test]
    fn summary_with_fields_is_ready_with_data() {
        let summary = CategorySummary {
            fields: vec![("ok".to_string(), "true".to_string())],
        };
        let state = FetchState::Ready(summary.clone());
        assert_eq!(summary_card(&state), Presentation::ReadyWithData(&summary));
    }

    #[test]
    fn idle_card_is_no_query_yet() {
        let state: FetchState<CategorySummary> = FetchState::Idle;
        assert_eq!(summary_card(&state), Presentation::NoQueryYet);
    }
}
