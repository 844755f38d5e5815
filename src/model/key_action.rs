//! Domain-level keyboard actions independent of key bindings.

/// Domain-level actions that can be mapped to configurable key bindings.
///
/// These represent user intent, not specific keys. The mapping from
/// crossterm::event::KeyEvent to KeyAction is handled by KeyBindings.
/// Query text editing is not an action: while the query bar has focus,
/// printable keys go straight to the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    // Query bar
    /// Move keyboard focus into the query bar. Default: /
    FocusInput,
    /// Switch between domain search and visit-id lookup. Default: m
    ToggleMode,

    // Timeline paging
    /// Fetch the next page. Default: n/→
    NextPage,
    /// Fetch the previous page. Default: p/←
    PrevPage,
    /// Fetch the first page. Default: g/Home
    FirstPage,
    /// Fetch the last page. Default: G/End
    LastPage,

    // Selection and scrolling
    /// Select the next timeline row, or scroll the detail screen down. Default: j/↓
    MoveDown,
    /// Select the previous timeline row, or scroll the detail screen up. Default: k/↑
    MoveUp,

    // Screens
    /// Open the selected visit's detail screen. Default: Enter
    Open,
    /// Return from the detail screen to the timeline. Default: Esc/b
    Back,
    /// Toggle the DNS card's "more info" section. Default: Space/e
    ToggleExpand,

    // Application
    /// Re-fetch whatever the current screen shows. Default: r
    Refresh,
    /// Show help overlay with keyboard shortcuts. Default: ?
    Help,
    /// Exit the application. Default: q/Ctrl+c
    Quit,
}
