//! Crawl inspection backend (impure shell).
//!
//! The backend is a black box reached through the [`Backend`] trait:
//! - [`HttpBackend`] talks to the HTTP API
//! - [`FetchDispatcher`] runs backend calls off the UI thread and hands the
//!   results back as token-tagged [`FetchOutcome`]s
//!
//! State never calls the backend directly. It emits [`FetchRequest`]s, the
//! event loop dispatches them, and outcomes flow back into state.

use crate::model::{
    CategorySummary, CrawlType, FetchError, FetchToken, Page, RawRecord, VisitId,
};

pub mod dispatcher;
pub mod http;
mod wire;

pub use dispatcher::FetchDispatcher;
pub use http::{BackendError, HttpBackend};

/// Logical operations consumed from the crawl inspection API.
///
/// Implementations block; callers run them on worker threads.
pub trait Backend: Send + Sync {
    /// One page of visits for a domain.
    ///
    /// `page` is not validated; out-of-range pages are the backend's call.
    fn search_visits_by_domain(&self, domain: &str, page: u32) -> Result<Page, FetchError>;

    /// Crawl results of one category for one visit.
    fn get_visit_detail_records(
        &self,
        visit_id: &VisitId,
        category: CrawlType,
    ) -> Result<DetailPayload, FetchError>;
}

/// Result body of a detail fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailPayload {
    /// DNS requests of the visit.
    Dns(Vec<RawRecord>),
    /// Summary fields of a non-DNS crawl.
    Summary(CategorySummary),
}

/// A fetch that state wants performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchRequest {
    /// Timeline page for a domain.
    Visits {
        /// Token the response must carry to be applied.
        token: FetchToken,
        /// Normalized domain name.
        domain: String,
        /// Zero-based page index.
        page: u32,
    },
    /// One detail card of a visit.
    Detail {
        /// Token the response must carry to be applied.
        token: FetchToken,
        /// Visit to fetch.
        visit_id: VisitId,
        /// Card category.
        category: CrawlType,
    },
}

impl FetchRequest {
    /// Token the request was issued with.
    pub fn token(&self) -> FetchToken {
        match self {
            FetchRequest::Visits { token, .. } | FetchRequest::Detail { token, .. } => *token,
        }
    }

    /// Perform the request against `backend`, blocking until it completes.
    ///
    /// Errors are captured in the outcome; this never fails.
    pub fn execute(self, backend: &dyn Backend) -> FetchOutcome {
        match self {
            FetchRequest::Visits {
                token,
                domain,
                page,
            } => FetchOutcome::Visits {
                token,
                result: backend.search_visits_by_domain(&domain, page),
            },
            FetchRequest::Detail {
                token,
                visit_id,
                category,
            } => {
                let result = backend.get_visit_detail_records(&visit_id, category);
                FetchOutcome::Detail {
                    token,
                    visit_id,
                    category,
                    result,
                }
            }
        }
    }

    /// Outcome reporting `error` for this request without running it.
    pub fn fail(self, error: FetchError) -> FetchOutcome {
        match self {
            FetchRequest::Visits { token, .. } => FetchOutcome::Visits {
                token,
                result: Err(error),
            },
            FetchRequest::Detail {
                token,
                visit_id,
                category,
            } => FetchOutcome::Detail {
                token,
                visit_id,
                category,
                result: Err(error),
            },
        }
    }
}

/// A completed fetch, tagged with the token it was issued with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Timeline page response.
    Visits {
        /// Token of the originating request.
        token: FetchToken,
        /// Page or failure.
        result: Result<Page, FetchError>,
    },
    /// Detail card response.
    Detail {
        /// Token of the originating request.
        token: FetchToken,
        /// Visit the card belongs to.
        visit_id: VisitId,
        /// Card category.
        category: CrawlType,
        /// Payload or failure.
        result: Result<DetailPayload, FetchError>,
    },
}

impl FetchOutcome {
    /// Token of the originating request.
    pub fn token(&self) -> FetchToken {
        match self {
            FetchOutcome::Visits { token, .. } | FetchOutcome::Detail { token, .. } => *token,
        }
    }
}
