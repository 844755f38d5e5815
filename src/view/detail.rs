//! Detail panel: DNS card plus one summary card per other crawl type.

use crate::model::{CategorySummary, CrawlType, GeoAnnotation, RawRecord};
use crate::state::DetailView;
use crate::view::constants::DETAIL_TIME_FORMAT;
use crate::view::helpers::{empty_line, key_value_line};
use crate::view::styles::Palette;
use crate::view_state::{group, presentation, Presentation};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const NO_DATA: &str = "No data for this visit.";
const LOADING: &str = "Loading ...";

/// Render the detail screen for `view`.
pub fn render_detail(frame: &mut Frame, area: Rect, view: &DetailView, palette: &Palette) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.accent)
        .title(Span::styled(
            format!(" Visit {} ", view.visit_id()),
            palette.accent,
        ));

    let paragraph = Paragraph::new(detail_lines(view, palette))
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((view.scroll(), 0));
    frame.render_widget(paragraph, area);
}

/// All lines of the detail screen, top to bottom.
pub(crate) fn detail_lines(view: &DetailView, palette: &Palette) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    lines.push(Line::from(Span::styled("DNS crawl", palette.heading)));
    dns_card_lines(view, palette, &mut lines);

    for category in CrawlType::ALL {
        let Some(card) = view.summary(category) else {
            continue;
        };
        lines.push(empty_line());
        lines.push(Line::from(Span::styled(card_title(category), palette.heading)));
        match presentation::summary_card(card) {
            Presentation::NoQueryYet | Presentation::Searching => {
                lines.push(Line::from(Span::styled(LOADING, palette.muted)))
            }
            Presentation::Error(error) => {
                lines.push(Line::from(Span::styled(error.user_message(), palette.error)))
            }
            Presentation::ReadyEmpty => lines.push(Line::from(NO_DATA)),
            Presentation::ReadyWithData(summary) => summary_lines(summary, palette, &mut lines),
        }
    }

    lines
}

fn card_title(category: CrawlType) -> &'static str {
    match category {
        CrawlType::Content => "Content crawl",
        CrawlType::Dns => "DNS crawl",
        CrawlType::Smtp => "SMTP crawl",
        CrawlType::Fingerprint => "Wappalyzer",
    }
}

fn dns_card_lines(view: &DetailView, palette: &Palette, lines: &mut Vec<Line<'static>>) {
    let records = match presentation::dns_card(view.dns()) {
        Presentation::NoQueryYet | Presentation::Searching => {
            lines.push(Line::from(Span::styled(LOADING, palette.muted)));
            return;
        }
        Presentation::Error(error) => {
            lines.push(Line::from(Span::styled(error.user_message(), palette.error)));
            return;
        }
        Presentation::ReadyEmpty => {
            lines.push(Line::from(NO_DATA));
            return;
        }
        Presentation::ReadyWithData(records) => records,
    };

    // Request summary comes from the first record
    if let Some(first) = records.first() {
        request_summary_lines(first, palette, lines);
    }

    let toggle = if view.is_expanded() { "less info" } else { "more info" };
    lines.push(Line::from(vec![
        Span::styled("Record data and Geo IP's: ", palette.heading),
        Span::styled("[Space] ", palette.key),
        Span::raw(toggle),
    ]));

    if view.is_expanded() {
        record_lines(records, palette, lines);
    }
}

fn request_summary_lines(first: &RawRecord, palette: &Palette, lines: &mut Vec<Line<'static>>) {
    let rcode = first.rcode.map(|code| code.to_string()).unwrap_or_default();
    lines.push(key_value_line("rcode", &rcode, palette.heading));

    let ok = match first.ok {
        Some(true) => Span::styled("✓", palette.success),
        Some(false) => Span::styled("✗", palette.failure),
        None => Span::raw(""),
    };
    lines.push(Line::from(vec![Span::styled("OK: ", palette.heading), ok]));

    lines.push(Line::from(vec![
        Span::styled("Problem: ", palette.heading),
        Span::styled(first.problem.clone().unwrap_or_default(), palette.error),
    ]));

    let crawled = first
        .crawl_timestamp
        .map(|ts| ts.format(DETAIL_TIME_FORMAT).to_string())
        .unwrap_or_default();
    lines.push(key_value_line("Crawl timestamp", &crawled, palette.heading));
}

/// Grouped records. A/AAAA record data is left out; their geo data stands in.
fn record_lines(records: &[RawRecord], palette: &Palette, lines: &mut Vec<Line<'static>>) {
    let grouped = group(records);
    if grouped.is_empty() {
        lines.push(Line::from(NO_DATA));
        return;
    }
    for record_group in grouped.groups() {
        lines.push(empty_line());
        lines.push(Line::from(Span::styled(
            record_group.key.to_string(),
            palette.accent,
        )));
        for record in &record_group.records {
            lines.push(Line::from(format!("  {}", record.record_type)));
            for response in &record.responses {
                if record.shows_record_data() {
                    lines.push(Line::from(format!("    • {}", response.record_data)));
                }
                for geo in &response.geo_annotations {
                    geo_lines(geo, palette.muted, lines);
                }
            }
        }
    }
}

fn geo_lines(geo: &GeoAnnotation, label_style: Style, lines: &mut Vec<Line<'static>>) {
    for (label, value) in [
        ("IP", &geo.ip),
        ("IP version", &geo.ip_version),
        ("Country", &geo.country),
        ("ASN", &geo.asn),
        ("ASN Organisation", &geo.asn_organisation),
    ] {
        let mut line = key_value_line(label, value, label_style);
        line.spans.insert(0, Span::raw("      "));
        lines.push(line);
    }
}

fn summary_lines(summary: &CategorySummary, palette: &Palette, lines: &mut Vec<Line<'static>>) {
    for (name, value) in &summary.fields {
        lines.push(key_value_line(name, value, palette.heading));
    }
}
