//! Query bar widget: mode label, text input, submit hint.

use crate::state::QueryInput;
use crate::view::styles::Palette;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use unicode_width::UnicodeWidthChar;

/// Query bar widget.
///
/// Shows the placeholder while the input is empty and the cursor only when
/// focused. A validation failure replaces the bottom border hint.
pub struct QueryBar<'a> {
    input: &'a QueryInput,
    focused: bool,
    palette: &'a Palette,
}

impl<'a> QueryBar<'a> {
    /// Create new QueryBar widget.
    pub fn new(input: &'a QueryInput, focused: bool, palette: &'a Palette) -> Self {
        Self {
            input,
            focused,
            palette,
        }
    }

    fn input_line(&self, width: usize) -> Line<'a> {
        let text = self.input.text();
        if text.is_empty() {
            let mut spans = Vec::new();
            if self.focused {
                spans.push(Span::styled(" ", self.palette.selected));
            }
            spans.push(Span::styled(self.input.mode().placeholder(), self.palette.muted));
            return Line::from(spans);
        }

        let chars: Vec<char> = text.chars().collect();
        let cursor = self.input.cursor().min(chars.len());
        let start = scroll_start(&chars, cursor, width);

        if !self.focused {
            return Line::from(chars[start..].iter().collect::<String>());
        }

        let before: String = chars[start..cursor].iter().collect();
        let (at, after) = match chars.get(cursor) {
            Some(ch) => (ch.to_string(), chars[cursor + 1..].iter().collect()),
            None => (" ".to_string(), String::new()),
        };
        Line::from(vec![
            Span::raw(before),
            Span::styled(at, self.palette.selected),
            Span::raw(after),
        ])
    }
}

impl Widget for QueryBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mode = self.input.mode();
        let border = if self.focused {
            self.palette.accent
        } else {
            self.palette.muted
        };

        let hint = match self.input.validation() {
            Some(error) => Line::from(Span::styled(format!(" {error} "), self.palette.error)),
            None => Line::from(vec![
                Span::styled(" Enter", self.palette.key),
                Span::styled(format!(" {}  ", mode.action()), self.palette.muted),
                Span::styled("Tab", self.palette.key),
                Span::styled(format!(" {} ", mode.switch_hint()), self.palette.muted),
            ]),
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(Span::styled(format!(" {} ", mode.label()), self.palette.accent))
            .title_bottom(hint.right_aligned());

        let inner_width = usize::from(area.width.saturating_sub(2));
        Paragraph::new(self.input_line(inner_width))
            .block(block)
            .render(area, buf);
    }
}

/// First char to draw so the cursor stays within `width` columns.
fn scroll_start(chars: &[char], cursor: usize, width: usize) -> usize {
    // One column is reserved for the cursor cell past the end
    let budget = width.saturating_sub(1);
    let mut used = 0;
    let mut start = cursor;
    while start > 0 {
        let w = chars[start - 1].width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        start -= 1;
    }
    start
}
