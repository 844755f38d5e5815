//! Timeline panel: visits of the committed domain, one page at a time.

use crate::model::{CrawlType, Page, VisitSummary};
use crate::state::AppState;
use crate::view::constants::{
    CRAWL_TIME_COLUMN_WIDTH, MAX_PAGE_BUTTONS, PAGER_HEIGHT, STATUS_COLUMN_WIDTH,
    TIMELINE_HEADER_HEIGHT, TIMELINE_TIME_FORMAT, VISIT_ID_COLUMN_WIDTH,
};
use crate::view::helpers::truncate_to_width;
use crate::view::styles::Palette;
use crate::view_state::{presentation, Presentation};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table, TableState},
    Frame,
};

/// Render the timeline panel for the current state.
pub fn render_timeline(frame: &mut Frame, area: Rect, state: &AppState, palette: &Palette) {
    let store = state.timeline();
    match presentation::timeline(store) {
        Presentation::NoQueryYet => message(frame, area, "Enter a search to begin.", palette.muted),
        Presentation::Searching => message(frame, area, "Searching ...", palette.heading),
        Presentation::Error(error) => message(frame, area, &error.user_message(), palette.error),
        Presentation::ReadyEmpty => {
            let domain = store.domain().unwrap_or_default();
            message(
                frame,
                area,
                &format!("No visits found for {domain}."),
                palette.muted,
            );
        }
        Presentation::ReadyWithData(page) => render_page(
            frame,
            area,
            store.domain().unwrap_or_default(),
            page,
            state.selected_row(),
            palette,
        ),
    }
}

fn message(frame: &mut Frame, area: Rect, text: &str, style: ratatui::style::Style) {
    frame.render_widget(Paragraph::new(Line::from(Span::styled(text.to_string(), style))), area);
}

fn render_page(
    frame: &mut Frame,
    area: Rect,
    domain: &str,
    page: &Page,
    selected: usize,
    palette: &Palette,
) {
    let [header_area, table_area, pager_area] = Layout::vertical([
        Constraint::Length(TIMELINE_HEADER_HEIGHT),
        Constraint::Min(0),
        Constraint::Length(PAGER_HEIGHT),
    ])
    .areas(area);

    let header = vec![
        Line::from(Span::styled(domain.to_string(), palette.heading)),
        Line::from(format!("Number of records: {}", page.total_records())),
    ];
    frame.render_widget(Paragraph::new(header), header_area);

    let mut table_state = TableState::default().with_selected(Some(selected));
    frame.render_stateful_widget(visit_table(page, palette), table_area, &mut table_state);

    frame.render_widget(Paragraph::new(pager_line(page, palette)), pager_area);
}

fn visit_table<'a>(page: &'a Page, palette: &Palette) -> Table<'a> {
    let mut columns = vec![Cell::from("Visit id"), Cell::from("Crawl time")];
    columns.extend(CrawlType::ALL.iter().map(|crawl| Cell::from(crawl.label())));
    let header = Row::new(columns).style(palette.heading);

    let rows = page.items().iter().map(|visit| visit_row(visit, palette));

    let mut widths = vec![
        Constraint::Length(VISIT_ID_COLUMN_WIDTH),
        Constraint::Length(CRAWL_TIME_COLUMN_WIDTH),
    ];
    widths.extend(CrawlType::ALL.iter().map(|_| Constraint::Length(STATUS_COLUMN_WIDTH)));

    Table::new(rows, widths)
        .header(header)
        .column_spacing(1)
        .row_highlight_style(palette.selected)
}

fn visit_row<'a>(visit: &'a VisitSummary, palette: &Palette) -> Row<'a> {
    let mut cells = vec![
        Cell::from(truncate_to_width(
            visit.visit_id.as_str(),
            usize::from(VISIT_ID_COLUMN_WIDTH),
        )),
        Cell::from(format_crawl_time(visit)),
    ];
    cells.extend(CrawlType::ALL.iter().map(|crawl| {
        if visit.crawl_status.get(*crawl) {
            Cell::from(Span::styled("✓", palette.success))
        } else {
            Cell::from(Span::styled("✗", palette.failure))
        }
    }));
    Row::new(cells)
}

/// Crawl time in local display format, blank when unknown.
pub(crate) fn format_crawl_time(visit: &VisitSummary) -> String {
    visit
        .timestamp
        .map(|ts| ts.format(TIMELINE_TIME_FORMAT).to_string())
        .unwrap_or_default()
}

/// Paging controls: first, prev, a window of page numbers, next, last.
///
/// Unavailable controls are dimmed, the current page is highlighted.
pub(crate) fn pager_line<'a>(page: &Page, palette: &Palette) -> Line<'a> {
    let control = |label: &'static str, enabled: bool| {
        Span::styled(label, if enabled { palette.key } else { palette.muted })
    };

    let mut spans = vec![
        control("⇤ first", page.total_pages() > 0),
        Span::raw("  "),
        control("‹ prev", page.has_previous()),
        Span::raw("  "),
    ];

    let (start, end) = page_window(page.page_index(), page.total_pages());
    if start > 0 {
        spans.push(Span::styled("… ", palette.muted));
    }
    for index in start..end {
        let label = format!("{}", index + 1);
        if index == page.page_index() {
            spans.push(Span::styled(label, palette.selected));
        } else {
            spans.push(Span::raw(label));
        }
        spans.push(Span::raw(" "));
    }
    if end < page.total_pages() {
        spans.push(Span::styled("… ", palette.muted));
    }

    spans.extend([
        Span::raw(" "),
        control("next ›", page.has_next()),
        Span::raw("  "),
        control("last ⇥", page.total_pages() > 0),
    ]);
    Line::from(spans)
}

/// Half-open range of page indices to show as buttons, centred on `current`.
pub(crate) fn page_window(current: u32, total: u32) -> (u32, u32) {
    if total <= MAX_PAGE_BUTTONS {
        return (0, total);
    }
    let half = MAX_PAGE_BUTTONS / 2;
    let start = current.saturating_sub(half).min(total - MAX_PAGE_BUTTONS);
    (start, start + MAX_PAGE_BUTTONS)
}
