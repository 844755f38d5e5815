//! Detail screen state for one visit.
//!
//! Four cards (DNS plus one summary card per other crawl type), each with its
//! own fetch token so they load and fail independently.

use crate::backend::{DetailPayload, FetchRequest};
use crate::model::{
    CategorySummary, CrawlType, FetchError, FetchToken, RawRecord, TokenIssuer, VisitId,
};
use crate::state::FetchState;
use tracing::{debug, warn};

/// Cards of the detail screen.
#[derive(Debug, Clone)]
pub struct DetailView {
    visit_id: VisitId,
    dns: FetchState<Vec<RawRecord>>,
    content: FetchState<CategorySummary>,
    smtp: FetchState<CategorySummary>,
    fingerprint: FetchState<CategorySummary>,
    /// "More info" toggle of the DNS card.
    expanded: bool,
    /// Vertical scroll offset of the detail screen.
    scroll: u16,
}

impl DetailView {
    /// Open `visit_id` and request every card.
    ///
    /// `issuer` must outlive the view so a reopened visit never reuses the
    /// tokens of an earlier view.
    pub fn open(visit_id: VisitId, issuer: &mut TokenIssuer) -> (Self, Vec<FetchRequest>) {
        let mut view = Self {
            visit_id,
            dns: FetchState::Idle,
            content: FetchState::Idle,
            smtp: FetchState::Idle,
            fingerprint: FetchState::Idle,
            expanded: false,
            scroll: 0,
        };
        let requests = view.refresh(issuer);
        (view, requests)
    }

    /// Visit shown by this view.
    pub fn visit_id(&self) -> &VisitId {
        &self.visit_id
    }

    /// Re-request every card. Toggle and scroll are kept.
    pub fn refresh(&mut self, issuer: &mut TokenIssuer) -> Vec<FetchRequest> {
        debug!(visit_id = %self.visit_id, "Requesting visit detail");
        CrawlType::ALL
            .into_iter()
            .map(|category| {
                let token = issuer.issue();
                match category {
                    CrawlType::Dns => self.dns.begin(token),
                    CrawlType::Content => self.content.begin(token),
                    CrawlType::Smtp => self.smtp.begin(token),
                    CrawlType::Fingerprint => self.fingerprint.begin(token),
                }
                FetchRequest::Detail {
                    token,
                    visit_id: self.visit_id.clone(),
                    category,
                }
            })
            .collect()
    }

    /// Apply one card response.
    ///
    /// Responses for another visit, a superseded token, or with a payload
    /// that does not fit the card are dropped; a mismatched payload turns
    /// into a decode failure of that card. Returns `true` if a card changed.
    pub fn apply(
        &mut self,
        token: FetchToken,
        visit_id: &VisitId,
        category: CrawlType,
        result: Result<DetailPayload, FetchError>,
    ) -> bool {
        if visit_id != &self.visit_id {
            debug!(%token, %visit_id, current = %self.visit_id, "Dropping response for another visit");
            return false;
        }
        let failure = result.as_ref().err().map(ToString::to_string);

        let applied = match category {
            CrawlType::Dns => {
                let records = result.and_then(|payload| match payload {
                    DetailPayload::Dns(records) => Ok(records),
                    DetailPayload::Summary(_) => Err(mismatch(category)),
                });
                self.dns.resolve(token, records)
            }
            _ => {
                let summary = result.and_then(|payload| match payload {
                    DetailPayload::Summary(summary) => Ok(summary),
                    DetailPayload::Dns(_) => Err(mismatch(category)),
                });
                match self.summary_mut(category) {
                    Some(card) => card.resolve(token, summary),
                    None => false,
                }
            }
        };

        match (applied, failure) {
            (false, _) => debug!(%token, ?category, "Dropping stale detail response"),
            (true, Some(error)) => warn!(%token, %visit_id, ?category, error, "Detail fetch failed"),
            (true, None) => {}
        }
        applied
    }

    /// DNS card state.
    pub fn dns(&self) -> &FetchState<Vec<RawRecord>> {
        &self.dns
    }

    /// Summary card state. `None` for [`CrawlType::Dns`].
    pub fn summary(&self, category: CrawlType) -> Option<&FetchState<CategorySummary>> {
        match category {
            CrawlType::Dns => None,
            CrawlType::Content => Some(&self.content),
            CrawlType::Smtp => Some(&self.smtp),
            CrawlType::Fingerprint => Some(&self.fingerprint),
        }
    }

    fn summary_mut(&mut self, category: CrawlType) -> Option<&mut FetchState<CategorySummary>> {
        match category {
            CrawlType::Dns => None,
            CrawlType::Content => Some(&mut self.content),
            CrawlType::Smtp => Some(&mut self.smtp),
            CrawlType::Fingerprint => Some(&mut self.fingerprint),
        }
    }

    /// Any card still waiting for its response.
    pub fn is_loading(&self) -> bool {
        self.dns.is_fetching()
            || [&self.content, &self.smtp, &self.fingerprint]
                .iter()
                .any(|card| card.is_fetching())
    }

    /// "More info" is shown on the DNS card.
    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// The "more info" toggle is offered: DNS records are loaded and non-empty.
    pub fn can_expand(&self) -> bool {
        self.dns.ready().is_some_and(|records| !records.is_empty())
    }

    /// Flip "more info" if it is offered. Returns the new value.
    pub fn toggle_expanded(&mut self) -> bool {
        if self.can_expand() {
            self.expanded = !self.expanded;
        }
        self.expanded
    }

    /// Current scroll offset.
    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    /// Scroll down one line.
    pub fn scroll_down(&mut self) {
        self.scroll = self.scroll.saturating_add(1);
    }

    /// Scroll up one line.
    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }
}

fn mismatch(category: CrawlType) -> FetchError {
    FetchError::Decode(format!("unexpected payload for {} results", category.label()))
}
