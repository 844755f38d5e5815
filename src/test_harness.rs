//! Acceptance test harness for TUI testing
//!
//! Wraps `TuiApp<TestBackend>` with a scripted crawl backend so tests can
//! drive the app with key presses and assert on state and rendered output.

use crate::backend::{Backend, DetailPayload, FetchDispatcher};
use crate::model::{
    CategorySummary, CrawlStatus, CrawlType, FetchError, GeoAnnotation, Page, Query, RawRecord,
    ResponseEntry, VisitId, VisitSummary,
};
use crate::state::AppState;
use crate::view::{TuiApp, TuiError};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Convert a ratatui buffer to a string representation.
///
/// Captures the visual output character by character, preserving layout.
/// Empty lines are removed.
pub(crate) fn buffer_to_string(buffer: &ratatui::buffer::Buffer) -> String {
    let area = buffer.area();
    let mut lines = Vec::new();

    for y in area.top()..area.bottom() {
        let mut line = String::new();
        for x in area.left()..area.right() {
            line.push_str(buffer[(x, y)].symbol());
        }
        let trimmed = line.trim_end();
        if !trimmed.is_empty() {
            lines.push(trimmed.to_string());
        }
    }

    lines.join("\n")
}

/// In-memory backend with a fixed number of pages per domain.
///
/// Visit ids are `visit-{page}-{row}`. Domains listed in `missing` answer
/// 404; visit ids starting with `missing` answer 404 for every card.
pub(crate) struct ScriptedBackend {
    per_page: usize,
    total_pages: u32,
    missing: Vec<String>,
    /// Every `(domain, page)` searched, in call order.
    pub(crate) searches: Mutex<Vec<(String, u32)>>,
}

impl ScriptedBackend {
    /// `total_pages` pages of `per_page` visits for every domain.
    pub(crate) fn with_visits(per_page: usize, total_pages: u32) -> Self {
        Self {
            per_page,
            total_pages,
            missing: Vec::new(),
            searches: Mutex::new(Vec::new()),
        }
    }

    /// Make `domain` answer 404.
    pub(crate) fn missing_domain(mut self, domain: &str) -> Self {
        self.missing.push(domain.to_string());
        self
    }

    fn not_found() -> FetchError {
        FetchError::Http {
            status: 404,
            body: "not found".to_string(),
        }
    }
}

impl Backend for ScriptedBackend {
    fn search_visits_by_domain(&self, domain: &str, page: u32) -> Result<Page, FetchError> {
        if let Ok(mut searches) = self.searches.lock() {
            searches.push((domain.to_string(), page));
        }
        if self.missing.iter().any(|m| m == domain) {
            return Err(Self::not_found());
        }
        if page >= self.total_pages {
            return Ok(Page::new(
                Vec::new(),
                page,
                self.total_pages,
                (self.per_page as u64) * u64::from(self.total_pages),
            ));
        }

        let items = (0..self.per_page)
            .map(|row| VisitSummary {
                visit_id: VisitId::new(format!("visit-{page}-{row}")),
                timestamp: None,
                crawl_status: CrawlStatus {
                    content: true,
                    dns: row % 2 == 0,
                    smtp: false,
                    fingerprint: true,
                },
            })
            .collect();

        Ok(Page::new(
            items,
            page,
            self.total_pages,
            (self.per_page as u64) * u64::from(self.total_pages),
        ))
    }

    fn get_visit_detail_records(
        &self,
        visit_id: &VisitId,
        category: CrawlType,
    ) -> Result<DetailPayload, FetchError> {
        if visit_id.as_str().starts_with("missing") {
            return Err(Self::not_found());
        }

        Ok(match category {
            CrawlType::Dns => DetailPayload::Dns(vec![
                RawRecord {
                    group_key: "A".to_string(),
                    record_type: "A".to_string(),
                    responses: vec![ResponseEntry {
                        record_data: "1.2.3.4".to_string(),
                        geo_annotations: vec![GeoAnnotation {
                            ip: "1.2.3.4".to_string(),
                            ip_version: "4".to_string(),
                            country: "NL".to_string(),
                            asn: "1136".to_string(),
                            asn_organisation: "KPN".to_string(),
                        }],
                    }],
                    rcode: Some(0),
                    ok: Some(true),
                    ..RawRecord::default()
                },
                RawRecord {
                    group_key: "@".to_string(),
                    record_type: "MX".to_string(),
                    responses: vec![ResponseEntry {
                        record_data: "10 mail.example.com.".to_string(),
                        geo_annotations: Vec::new(),
                    }],
                    ..RawRecord::default()
                },
            ]),
            _ => DetailPayload::Summary(CategorySummary {
                fields: vec![("status".to_string(), "200".to_string())],
            }),
        })
    }
}

/// Test harness for acceptance testing
pub struct AcceptanceTestHarness {
    app: TuiApp<TestBackend>,
    running: bool,
}

impl AcceptanceTestHarness {
    /// Harness over `backend` with a 100x30 terminal.
    pub(crate) fn new(backend: ScriptedBackend) -> Result<Self, TuiError> {
        Self::with_size(Arc::new(backend), 100, 30)
    }

    /// Harness over `backend` with a custom terminal size.
    pub(crate) fn with_size(
        backend: Arc<dyn Backend>,
        width: u16,
        height: u16,
    ) -> Result<Self, TuiError> {
        let terminal = Terminal::new(TestBackend::new(width, height))?;
        let dispatcher = FetchDispatcher::new(backend);
        Ok(Self {
            app: TuiApp::new_for_test(terminal, dispatcher),
            running: true,
        })
    }

    /// Send a single key without modifiers.
    ///
    /// Returns true if the app quit as a result of this key.
    pub fn send_key(&mut self, key: KeyCode) -> bool {
        self.send_key_with_mods(key, KeyModifiers::NONE)
    }

    /// Send key with modifiers (e.g., Ctrl+C)
    pub fn send_key_with_mods(&mut self, key: KeyCode, mods: KeyModifiers) -> bool {
        if !self.running {
            return true;
        }

        let quit = self.app.handle_key_test(KeyEvent::new(key, mods));
        if quit {
            self.running = false;
        }
        quit
    }

    /// Type text one character at a time.
    pub fn type_text(&mut self, text: &str) {
        for ch in text.chars() {
            if self.send_key(KeyCode::Char(ch)) {
                break;
            }
        }
    }

    /// Type `text` into the query bar and submit it, then wait for answers.
    pub fn search(&mut self, text: &str) {
        self.type_text(text);
        self.send_key(KeyCode::Enter);
        self.settle();
    }

    /// Start the app with a query, as `--domain`/`--visit` do.
    pub(crate) fn start_with(&mut self, query: Query) {
        self.app.start_with_test(query);
        self.settle();
    }

    /// Wait until every accepted request has been answered.
    pub fn settle(&mut self) {
        self.app.settle(Duration::from_secs(5));
    }

    /// Access app state for assertions
    pub fn state(&self) -> &AppState {
        self.app.app_state()
    }

    /// Whether the app is still running (hasn't quit)
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Render the current frame to a string
    ///
    /// # Panics
    /// Panics if rendering fails (should never happen with TestBackend)
    pub fn render_to_string(&mut self) -> String {
        self.app
            .render_test()
            .expect("Rendering should succeed in test harness");
        buffer_to_string(self.app.terminal().backend().buffer())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::QueryMode;
    use crate::state::Screen;

    fn harness() -> AcceptanceTestHarness {
        AcceptanceTestHarness::new(ScriptedBackend::with_visits(4, 3).missing_domain("gone.example"))
            .unwrap()
    }

    #[test]
    fn search_then_browse_pages() {
        let mut h = harness();
        h.search("example.com");

        let output = h.render_to_string();
        assert!(output.contains("Number of records: 12"));
        assert!(output.contains("visit-0-3"));

        h.send_key(KeyCode::End);
        h.settle();
        assert_eq!(h.state().timeline().page_index(), 2);
        assert!(h.render_to_string().contains("visit-2-0"));
    }

    #[test]
    fn missing_domain_shows_error() {
        let mut h = harness();
        h.search("gone.example");

        assert!(h.state().timeline().state().error().is_some());
        assert!(h.render_to_string().contains("Nothing was found"));
    }

    #[test]
    fn detail_more_info_shows_grouped_records() {
        let mut h = harness();
        h.search("example.com");
        h.send_key(KeyCode::Enter);
        h.settle();
        assert_eq!(h.state().screen(), Screen::Detail);

        let collapsed = h.render_to_string();
        assert!(collapsed.contains("Visit visit-0-0"));
        assert!(!collapsed.contains("KPN"));

        h.send_key(KeyCode::Char(' '));
        let expanded = h.render_to_string();
        assert!(expanded.contains("KPN"));
        assert!(expanded.contains("mail.example.com."));
    }

    #[test]
    fn visit_lookup_of_missing_id_reports_per_card() {
        let mut h = harness();
        h.start_with(Query::new(QueryMode::VisitIdLookup, "missing-1").unwrap());

        let detail = h.state().detail().expect("detail open");
        assert!(detail.dns().error().is_some());
        assert!(h.render_to_string().contains("Visit missing-1"));
    }

    #[test]
    fn back_resumes_saved_page() {
        let mut h = harness();
        h.search("example.com");
        h.send_key(KeyCode::Char('n'));
        h.settle();
        h.send_key(KeyCode::Enter);
        h.settle();
        h.send_key(KeyCode::Esc);
        h.settle();

        assert_eq!(h.state().screen(), Screen::Timeline);
        assert_eq!(h.state().timeline().page_index(), 1);
    }

    #[test]
    fn back_refetches_the_parked_page() {
        let backend = Arc::new(ScriptedBackend::with_visits(2, 3));
        let mut h = AcceptanceTestHarness::with_size(backend.clone(), 100, 30).unwrap();
        h.search("example.com");
        h.send_key(KeyCode::Char('n'));
        h.settle();
        h.send_key(KeyCode::Enter);
        h.settle();
        h.send_key(KeyCode::Char('b'));
        h.settle();

        let searches = backend.searches.lock().unwrap().clone();
        let pages: Vec<u32> = searches.iter().map(|(_, page)| *page).collect();
        assert_eq!(pages, vec![0, 1, 1]);
        assert!(searches.iter().all(|(domain, _)| domain == "example.com"));
    }

    #[test]
    fn quit_stops_the_harness() {
        let mut h = harness();
        h.send_key(KeyCode::Esc);
        assert!(h.send_key(KeyCode::Char('q')));
        assert!(!h.is_running());
        assert!(h.send_key(KeyCode::Char('j')), "Keys after quit report quit");
    }
}
