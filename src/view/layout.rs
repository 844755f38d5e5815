//! Screen layout: query bar, current screen, status bar, help overlay.
//!
//! Pure layout logic - splits the frame and delegates to the panel renderers.

use crate::state::{AppState, Focus, Screen};
use crate::view::constants::{QUERY_BAR_HEIGHT, STATUS_BAR_HEIGHT};
use crate::view::styles::Palette;
use crate::view::{detail, help, timeline, QueryBar};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Render the whole screen for `state`.
pub fn render_layout(frame: &mut Frame, state: &AppState, palette: &Palette) {
    let [query_area, content_area, status_area] = Layout::vertical([
        Constraint::Length(QUERY_BAR_HEIGHT),
        Constraint::Min(0),
        Constraint::Length(STATUS_BAR_HEIGHT),
    ])
    .areas(frame.area());

    frame.render_widget(
        QueryBar::new(&state.input, state.focus == Focus::Input, palette),
        query_area,
    );

    match (state.screen(), state.detail()) {
        (Screen::Detail, Some(view)) => detail::render_detail(frame, content_area, view, palette),
        _ => timeline::render_timeline(frame, content_area, state, palette),
    }

    render_status_bar(frame, status_area, state, palette);

    if state.help_visible {
        help::render_help_overlay(frame, palette);
    }
}

/// Render the one-line key hint bar for the current screen and focus.
fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState, palette: &Palette) {
    let hints: &[(&str, &str)] = match (state.focus, state.screen()) {
        (Focus::Input, _) => &[("Enter", "submit"), ("Tab", "mode"), ("Esc", "leave input")],
        (Focus::Content, Screen::Timeline) => &[
            ("j/k", "select"),
            ("Enter", "open"),
            ("n/p", "page"),
            ("r", "refresh"),
            ("/", "search"),
            ("?", "help"),
            ("q", "quit"),
        ],
        (Focus::Content, Screen::Detail) => &[
            ("Space", "more info"),
            ("j/k", "scroll"),
            ("b", "back"),
            ("r", "refresh"),
            ("?", "help"),
            ("q", "quit"),
        ],
    };

    let mut spans = Vec::with_capacity(hints.len() * 2);
    for (key, label) in hints {
        spans.push(Span::styled(format!(" {key}"), palette.key));
        spans.push(Span::styled(format!(" {label} "), palette.muted));
    }
    if state.is_loading() {
        spans.push(Span::styled(" ⟳ loading", palette.accent));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
#[path = "layout_tests.rs"]
mod tests;
