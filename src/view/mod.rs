//! TUI rendering and terminal management (impure shell)

pub mod constants;
mod detail;
mod help;
mod helpers;
mod layout;
mod query_bar;
mod styles;
mod timeline;

pub use help::render_help_overlay;
pub use helpers::{empty_line, key_value_line, truncate_to_width};
pub use layout::render_layout;
pub use query_bar::QueryBar;
pub use styles::{ColorConfig, Palette};

use crate::backend::{Backend, FetchDispatcher, FetchRequest};
use crate::config::keybindings::KeyBindings;
use crate::model::{KeyAction, Query};
use crate::state::{AppState, Focus, QueryInput};
use crossterm::{
    ExecutableCommand,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    terminal: Terminal<B>,
    app_state: AppState,
    dispatcher: FetchDispatcher,
    key_bindings: KeyBindings,
    palette: Palette,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen
    pub fn new(dispatcher: FetchDispatcher, palette: Palette) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;

        Ok(Self {
            terminal,
            app_state: AppState::new(),
            dispatcher,
            key_bindings: KeyBindings::default(),
            palette,
        })
    }

    /// Run the main event loop
    ///
    /// Returns when user quits (q or Ctrl+C). Redraws on input, on resize,
    /// and when fetch outcomes arrive; otherwise idles on the poll timeout.
    pub fn run(&mut self) -> Result<(), TuiError> {
        // Upper bound on how long a finished fetch waits to be shown
        const TICK: Duration = Duration::from_millis(100);

        self.draw()?;

        loop {
            if event::poll(TICK)? {
                match event::read()? {
                    // Release/repeat events arrive on terminals with the
                    // kitty protocol; only presses act
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        if self.handle_key(key) {
                            return Ok(());
                        }
                        self.draw()?;
                    }
                    Event::Resize(_, _) => self.draw()?,
                    _ => {}
                }
            }

            if self.apply_outcomes() {
                self.draw()?;
            }
        }
    }
}

impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    /// Handle a single keyboard event
    ///
    /// Returns true if app should quit
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        // Ctrl+C always quits, whatever has focus
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        // Help overlay swallows everything except its own dismissal and quit
        if self.app_state.help_visible {
            match key.code {
                KeyCode::Esc | KeyCode::Char('?') => self.app_state.help_visible = false,
                KeyCode::Char('q') => return true,
                _ => {}
            }
            return false;
        }

        if self.app_state.focus == Focus::Input {
            self.handle_input_key(key);
            return false;
        }

        let Some(action) = self.key_bindings.get(key) else {
            return false;
        };
        if action == KeyAction::Quit {
            return true;
        }

        let requests = self.app_state.handle_action(action);
        self.dispatch(requests);
        false
    }

    /// Keys while the query bar has focus: text editing plus submit.
    fn handle_input_key(&mut self, key: KeyEvent) {
        let typing = !key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
        match key.code {
            KeyCode::Char(ch) if typing => self.app_state.input.insert_char(ch),
            KeyCode::Backspace => self.app_state.input.backspace(),
            KeyCode::Left => self.app_state.input.cursor_left(),
            KeyCode::Right => self.app_state.input.cursor_right(),
            KeyCode::Tab => self.app_state.input.toggle_mode(),
            KeyCode::Esc => self.app_state.focus = Focus::Content,
            KeyCode::Enter => {
                let requests = self.app_state.submit_input();
                self.dispatch(requests);
            }
            _ => {}
        }
    }

    /// Start a query before the first key press (`--domain`, `--visit`).
    fn start_with(&mut self, query: Query) {
        info!(mode = ?query.mode(), text = query.text(), "Starting with query");
        self.app_state.input = QueryInput::with_text(query.mode(), query.text());
        let requests = self.app_state.submit_query(query);
        self.dispatch(requests);
    }

    fn dispatch(&self, requests: Vec<FetchRequest>) {
        if !requests.is_empty() {
            debug!(count = requests.len(), "Dispatching requests");
        }
        self.dispatcher.dispatch_all(requests);
    }

    /// Apply every outcome that has arrived. Returns true if any did.
    fn apply_outcomes(&mut self) -> bool {
        let outcomes = self.dispatcher.drain();
        let arrived = !outcomes.is_empty();
        for outcome in outcomes {
            self.app_state.apply_outcome(outcome);
        }
        arrived
    }

    /// Render the current frame
    fn draw(&mut self) -> Result<(), TuiError> {
        let state = &self.app_state;
        let palette = &self.palette;
        self.terminal.draw(|frame| {
            layout::render_layout(frame, state, palette);
        })?;
        Ok(())
    }
}

// ===== Test Helpers =====
//
// Only for tests within the crate. DO NOT use these in production code.

#[cfg(test)]
#[allow(dead_code)] // Not all helpers used in every test module
impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    /// Create TuiApp around an existing terminal (test-only constructor)
    pub(crate) fn new_for_test(terminal: Terminal<B>, dispatcher: FetchDispatcher) -> Self {
        Self {
            terminal,
            app_state: AppState::new(),
            dispatcher,
            key_bindings: KeyBindings::default(),
            palette: Palette::default(),
        }
    }

    /// Get reference to app state (test-only accessor)
    pub(crate) fn app_state(&self) -> &AppState {
        &self.app_state
    }

    /// Handle a single keyboard event (test-only accessor)
    ///
    /// Returns true if app should quit.
    pub(crate) fn handle_key_test(&mut self, key: KeyEvent) -> bool {
        self.handle_key(key)
    }

    /// Start with a query (test-only accessor)
    pub(crate) fn start_with_test(&mut self, query: Query) {
        self.start_with(query);
    }

    /// Apply outcomes until nothing accepted is still in flight.
    ///
    /// Gives up after `timeout` without a new outcome.
    pub(crate) fn settle(&mut self, timeout: Duration) {
        while self.app_state.is_loading() {
            match self.dispatcher.recv_timeout(timeout) {
                Some(outcome) => self.app_state.apply_outcome(outcome),
                None => break,
            }
        }
    }

    /// Render the current frame (test-only accessor)
    pub(crate) fn render_test(&mut self) -> Result<(), TuiError> {
        self.draw()
    }

    /// Get reference to terminal (test-only accessor)
    pub(crate) fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }
}

/// Startup options for the TUI.
///
/// Bridges the CLI (parsed in main.rs) and the rendering layer.
#[derive(Debug, Clone, Default)]
pub struct StartupOptions {
    /// Query submitted before the first key press.
    pub initial_query: Option<Query>,
    /// Whether to render in color.
    pub color: ColorConfig,
}

/// Initialize and run the TUI application against `backend`.
///
/// This is the main entry point for the TUI. It handles terminal
/// setup, runs the event loop, and ensures cleanup on exit.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run_with_backend(backend: Arc<dyn Backend>, options: StartupOptions) -> Result<(), TuiError> {
    let dispatcher = FetchDispatcher::new(backend);
    let mut app = TuiApp::new(dispatcher, Palette::new(options.color))?;

    if let Some(query) = options.initial_query {
        app.start_with(query);
    }

    // Run the app and ensure cleanup happens even on error
    let result = app.run();
    restore_terminal()?;
    result
}

/// Restore terminal to normal state
///
/// Disables raw mode and leaves alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::QueryMode;
    use crate::state::Screen;
    use crate::test_harness::{ScriptedBackend, buffer_to_string};
    use ratatui::backend::TestBackend;

    const SETTLE: Duration = Duration::from_secs(5);

    fn create_test_app() -> TuiApp<TestBackend> {
        let terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();
        let dispatcher = FetchDispatcher::new(Arc::new(ScriptedBackend::with_visits(3, 2)));
        TuiApp::new_for_test(terminal, dispatcher)
    }

    fn press(app: &mut TuiApp<TestBackend>, code: KeyCode) -> bool {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(app: &mut TuiApp<TestBackend>, text: &str) {
        for ch in text.chars() {
            press(app, KeyCode::Char(ch));
        }
    }

    #[test]
    fn tui_error_from_io_error() {
        let io_err = io::Error::other("test error");
        let tui_err: TuiError = io_err.into();
        assert!(matches!(tui_err, TuiError::Io(_)));
    }

    #[test]
    fn q_in_input_types_instead_of_quitting() {
        let mut app = create_test_app();
        assert!(!press(&mut app, KeyCode::Char('q')));
        assert_eq!(app.app_state.input.text(), "q");
    }

    #[test]
    fn q_quits_once_input_is_left() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.app_state.focus, Focus::Content);
        assert!(press(&mut app, KeyCode::Char('q')), "'q' should trigger quit");
    }

    #[test]
    fn ctrl_c_quits_from_input() {
        let mut app = create_test_app();
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(app.handle_key(key), "Ctrl+C should always quit");
    }

    #[test]
    fn unbound_key_is_ignored() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::Esc);
        assert!(!press(&mut app, KeyCode::Char('z')));
    }

    #[test]
    fn tab_toggles_mode_and_editing_keys_edit() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.app_state.input.mode(), QueryMode::VisitIdLookup);

        type_text(&mut app, "abc");
        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.app_state.input.text(), "ac");
        press(&mut app, KeyCode::Right);
        assert_eq!(app.app_state.input.cursor(), 2);
    }

    #[test]
    fn ctrl_modified_chars_do_not_type() {
        let mut app = create_test_app();
        app.handle_key(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL));
        assert_eq!(app.app_state.input.text(), "");
    }

    #[test]
    fn enter_submits_search_and_results_arrive() {
        let mut app = create_test_app();
        type_text(&mut app, "Example.COM");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.app_state.focus, Focus::Content);
        assert_eq!(app.app_state.timeline().domain(), Some("example.com"));

        app.settle(SETTLE);
        let page = app.app_state.timeline().state().ready().expect("page ready");
        assert_eq!(page.items().len(), 3);
        assert!(app.app_state.timeline().has_next());
    }

    #[test]
    fn paging_keys_fetch_next_page() {
        let mut app = create_test_app();
        type_text(&mut app, "example.com");
        press(&mut app, KeyCode::Enter);
        app.settle(SETTLE);

        press(&mut app, KeyCode::Char('n'));
        app.settle(SETTLE);
        assert_eq!(app.app_state.timeline().page_index(), 1);
        assert!(!app.app_state.timeline().has_next());

        press(&mut app, KeyCode::Char('g'));
        app.settle(SETTLE);
        assert_eq!(app.app_state.timeline().page_index(), 0);
    }

    #[test]
    fn open_and_back_round_trip_keeps_page() {
        let mut app = create_test_app();
        type_text(&mut app, "example.com");
        press(&mut app, KeyCode::Enter);
        app.settle(SETTLE);
        press(&mut app, KeyCode::Char('n'));
        app.settle(SETTLE);

        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.app_state.screen(), Screen::Detail);
        app.settle(SETTLE);
        assert!(app.app_state.detail().unwrap().dns().ready().is_some());

        press(&mut app, KeyCode::Char('b'));
        assert_eq!(app.app_state.screen(), Screen::Timeline);
        app.settle(SETTLE);
        assert_eq!(app.app_state.timeline().page_index(), 1);
    }

    #[test]
    fn help_overlay_swallows_keys_until_closed() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Char('?'));
        assert!(app.app_state.help_visible);

        press(&mut app, KeyCode::Char('/'));
        assert_eq!(app.app_state.focus, Focus::Content, "Keys are swallowed");

        press(&mut app, KeyCode::Esc);
        assert!(!app.app_state.help_visible);
    }

    #[test]
    fn q_quits_while_help_is_open() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Char('?'));
        assert!(press(&mut app, KeyCode::Char('q')));
    }

    #[test]
    fn start_with_visit_query_opens_detail_and_fills_input() {
        let mut app = create_test_app();
        let query = Query::new(QueryMode::VisitIdLookup, "v-7").unwrap();
        app.start_with(query);

        assert_eq!(app.app_state.screen(), Screen::Detail);
        assert_eq!(app.app_state.input.text(), "v-7");
        assert_eq!(app.app_state.input.mode(), QueryMode::VisitIdLookup);
    }

    #[test]
    fn apply_outcomes_reports_arrivals() {
        let mut app = create_test_app();
        assert!(!app.apply_outcomes());

        type_text(&mut app, "example.com");
        press(&mut app, KeyCode::Enter);

        let deadline = std::time::Instant::now() + SETTLE;
        let mut arrived = false;
        while !arrived && std::time::Instant::now() < deadline {
            arrived = app.apply_outcomes();
            std::thread::sleep(Duration::from_millis(5));
        }
        assert!(arrived);
        assert!(!app.app_state.is_loading());
    }

    #[test]
    fn draw_renders_timeline() {
        let mut app = create_test_app();
        type_text(&mut app, "example.com");
        press(&mut app, KeyCode::Enter);
        app.settle(SETTLE);

        app.draw().unwrap();
        let output = buffer_to_string(app.terminal.backend().buffer());
        assert!(output.contains("Number of records"));
        assert!(output.contains("visit-0-0"));
    }
}
