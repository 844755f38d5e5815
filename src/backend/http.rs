//! HTTP implementation of the crawl inspection backend.

use super::wire::{self, DnsRequestsDto, VisitPageDto};
use super::{Backend, DetailPayload};
use crate::model::{CrawlType, FetchError, Page, VisitId};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

/// Errors constructing an [`HttpBackend`].
#[derive(Debug, Error)]
pub enum BackendError {
    /// Base URL is malformed or cannot carry path segments.
    #[error("Invalid API URL {url:?}: {reason}")]
    InvalidUrl {
        /// URL as configured.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// HTTP client could not be built (TLS backend initialization).
    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Blocking HTTP client for the crawl inspection API.
///
/// Every call blocks the calling thread; run it through
/// [`super::FetchDispatcher`] from the UI.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    base: Url,
    client: reqwest::blocking::Client,
}

impl HttpBackend {
    /// Create a backend for the API rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::InvalidUrl` if `base_url` is not an http(s) URL
    /// that can carry path segments, `BackendError::Client` if the client
    /// cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, BackendError> {
        let base = Url::parse(base_url).map_err(|e| BackendError::InvalidUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        if base.cannot_be_a_base() || !matches!(base.scheme(), "http" | "https") {
            return Err(BackendError::InvalidUrl {
                url: base_url.to_string(),
                reason: "expected an http or https URL".to_string(),
            });
        }

        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("crawlview/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { base, client })
    }

    /// Build an endpoint URL below the base. Segments are percent-encoded.
    fn endpoint(&self, segments: &[&str], query: &[(&str, &str)]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        url
    }

    /// GET `url` and decode the JSON body.
    fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, FetchError> {
        debug!(%url, "GET");

        let response = self.client.get(url.clone()).send().map_err(|e| {
            warn!(%url, error = %e, "Request failed");
            FetchError::Transport(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            warn!(%url, status = status.as_u16(), "Backend returned error status");
            return Err(FetchError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let text = response
            .text()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        serde_json::from_str(&text).map_err(|e| {
            warn!(%url, error = %e, "Undecodable response body");
            FetchError::Decode(e.to_string())
        })
    }
}

/// Repository collection holding a category's results.
pub(crate) fn collection_for(category: CrawlType) -> &'static str {
    match category {
        CrawlType::Dns => "requests",
        CrawlType::Content => "contentCrawlResults",
        CrawlType::Smtp => "smtpVisits",
        CrawlType::Fingerprint => "wappalyzerResults",
    }
}

impl Backend for HttpBackend {
    fn search_visits_by_domain(&self, domain: &str, page: u32) -> Result<Page, FetchError> {
        let page_param = page.to_string();
        let url = self.endpoint(&["find-visits", domain], &[("page", &page_param)]);
        let dto: VisitPageDto = self.get_json(url)?;
        Ok(dto.into_page(page))
    }

    fn get_visit_detail_records(
        &self,
        visit_id: &VisitId,
        category: CrawlType,
    ) -> Result<DetailPayload, FetchError> {
        let url = self.endpoint(
            &[collection_for(category), "search", "findByVisitId"],
            &[("visitId", visit_id.as_str())],
        );

        match category {
            CrawlType::Dns => {
                let dto: DnsRequestsDto = self.get_json(url)?;
                Ok(DetailPayload::Dns(dto.into_records()))
            }
            CrawlType::Content | CrawlType::Smtp | CrawlType::Fingerprint => {
                let body: serde_json::Value = self.get_json(url)?;
                Ok(DetailPayload::Summary(wire::summarize(&body)))
            }
        }
    }
}
