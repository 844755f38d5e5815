//! Visit timeline types: one row per crawl attempt, one page per fetch.

use crate::model::VisitId;
use chrono::{DateTime, Utc};

// ===== CrawlType =====

/// Sub-crawls performed for every visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrawlType {
    /// Content crawl ("muppets").
    Content,
    /// DNS crawl.
    Dns,
    /// SMTP crawl.
    Smtp,
    /// Technology fingerprinting ("wappalyzer").
    Fingerprint,
}

impl CrawlType {
    /// All crawl types in display order.
    pub const ALL: [CrawlType; 4] = [
        CrawlType::Content,
        CrawlType::Dns,
        CrawlType::Smtp,
        CrawlType::Fingerprint,
    ];

    /// Column heading for the timeline table.
    pub fn label(self) -> &'static str {
        match self {
            CrawlType::Content => "Content",
            CrawlType::Dns => "DNS",
            CrawlType::Smtp => "SMTP",
            CrawlType::Fingerprint => "Wappalyzer",
        }
    }
}

// ===== CrawlStatus =====

/// Completion flag per crawl type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrawlStatus {
    /// Content crawl finished.
    pub content: bool,
    /// DNS crawl finished.
    pub dns: bool,
    /// SMTP crawl finished.
    pub smtp: bool,
    /// Fingerprint crawl finished.
    pub fingerprint: bool,
}

impl CrawlStatus {
    /// Look up the flag for one crawl type.
    pub fn get(&self, crawl: CrawlType) -> bool {
        match crawl {
            CrawlType::Content => self.content,
            CrawlType::Dns => self.dns,
            CrawlType::Smtp => self.smtp,
            CrawlType::Fingerprint => self.fingerprint,
        }
    }
}

// ===== VisitSummary =====

/// One row of the visit timeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitSummary {
    /// Visit identifier (link target for the detail screen).
    pub visit_id: VisitId,
    /// When the visit was requested, if the backend knows.
    pub timestamp: Option<DateTime<Utc>>,
    /// Which sub-crawls completed.
    pub crawl_status: CrawlStatus,
}

// ===== Page =====

/// One page of visit summaries.
///
/// `has_previous`/`has_next` are derived from `page_index` and `total_pages`
/// at construction, so the paging invariant holds for every value of this
/// type:
///
/// - `has_previous == (page_index > 0)`
/// - `has_next == (page_index < total_pages - 1)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    items: Vec<VisitSummary>,
    page_index: u32,
    total_pages: u32,
    total_records: u64,
    has_previous: bool,
    has_next: bool,
}

impl Page {
    /// Build a page, deriving the navigation flags.
    pub fn new(
        items: Vec<VisitSummary>,
        page_index: u32,
        total_pages: u32,
        total_records: u64,
    ) -> Self {
        Self {
            items,
            page_index,
            total_pages,
            total_records,
            has_previous: page_index > 0,
            has_next: u64::from(page_index) + 1 < u64::from(total_pages),
        }
    }

    /// Visit summaries in backend order.
    pub fn items(&self) -> &[VisitSummary] {
        &self.items
    }

    /// Zero-based index of this page.
    pub fn page_index(&self) -> u32 {
        self.page_index
    }

    /// Number of pages for the query.
    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Number of visits for the query across all pages.
    pub fn total_records(&self) -> u64 {
        self.total_records
    }

    /// A previous page exists.
    pub fn has_previous(&self) -> bool {
        self.has_previous
    }

    /// A next page exists.
    pub fn has_next(&self) -> bool {
        self.has_next
    }

    /// The page holds no visits.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
