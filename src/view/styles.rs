//! Colour palette for all widgets.
//!
//! Colours can be switched off entirely; emphasis that carries meaning
//! (selection, headings) survives as modifiers.

use ratatui::style::{Color, Modifier, Style};

// ===== ColorConfig =====

/// Configuration for color output.
///
/// Determines whether colors should be enabled or disabled based on:
/// - `--no-color` CLI flag
/// - `NO_COLOR` environment variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Create a ColorConfig from CLI args and environment.
    ///
    /// Priority (first match wins):
    /// 1. `--no-color` flag (disables colors)
    /// 2. `NO_COLOR` env var (any value disables colors)
    /// 3. Default: colors enabled
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        let enabled = !no_color_flag && std::env::var_os("NO_COLOR").is_none();
        Self { enabled }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

// ===== Palette =====

/// Styles shared by every widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Titles and the focused border.
    pub accent: Style,
    /// Section headings inside panels.
    pub heading: Style,
    /// Placeholders, disabled controls, hints.
    pub muted: Style,
    /// Error messages.
    pub error: Style,
    /// Completed crawl mark.
    pub success: Style,
    /// Failed crawl mark.
    pub failure: Style,
    /// Key names in hints and help.
    pub key: Style,
    /// Highlighted row or current page.
    pub selected: Style,
}

impl Palette {
    /// Palette for `config`.
    pub fn new(config: ColorConfig) -> Self {
        let heading = Style::default().add_modifier(Modifier::BOLD);
        let selected = Style::default().add_modifier(Modifier::REVERSED);
        if config.colors_enabled() {
            Self {
                accent: Style::default().fg(Color::Cyan),
                heading: heading.fg(Color::Magenta),
                muted: Style::default().fg(Color::DarkGray),
                error: Style::default().fg(Color::Red),
                success: Style::default().fg(Color::Green),
                failure: Style::default().fg(Color::Red),
                key: Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
                selected,
            }
        } else {
            Self {
                accent: Style::default(),
                heading,
                muted: Style::default(),
                error: Style::default(),
                success: Style::default(),
                failure: Style::default(),
                key: Style::default().add_modifier(Modifier::BOLD),
                selected,
            }
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(ColorConfig::default())
    }
}

// ===== Tests =====
