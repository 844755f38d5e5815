//! Keyboard bindings configuration.

use crate::model::key_action::KeyAction;
use crossterm::event::KeyEvent;
use std::collections::HashMap;

/// Maps keyboard events to domain actions.
///
/// Only consulted while the content has focus; in the query bar printable
/// keys edit the text instead.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyEvent, KeyAction>,
}

impl KeyBindings {
    /// Look up the action for a key event.
    pub fn get(&self, key: KeyEvent) -> Option<KeyAction> {
        self.bindings.get(&key).copied()
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        use crossterm::event::{KeyCode, KeyModifiers};

        let mut bindings = HashMap::new();
        let mut bind = |code: KeyCode, modifiers: KeyModifiers, action: KeyAction| {
            bindings.insert(KeyEvent::new(code, modifiers), action);
        };

        // Query bar
        bind(KeyCode::Char('/'), KeyModifiers::NONE, KeyAction::FocusInput);
        bind(KeyCode::Char('m'), KeyModifiers::NONE, KeyAction::ToggleMode);

        // Paging
        bind(KeyCode::Char('n'), KeyModifiers::NONE, KeyAction::NextPage);
        bind(KeyCode::Right, KeyModifiers::NONE, KeyAction::NextPage);
        bind(KeyCode::Char('p'), KeyModifiers::NONE, KeyAction::PrevPage);
        bind(KeyCode::Left, KeyModifiers::NONE, KeyAction::PrevPage);
        bind(KeyCode::Char('g'), KeyModifiers::NONE, KeyAction::FirstPage);
        bind(KeyCode::Home, KeyModifiers::NONE, KeyAction::FirstPage);
        bind(KeyCode::Char('G'), KeyModifiers::SHIFT, KeyAction::LastPage);
        bind(KeyCode::End, KeyModifiers::NONE, KeyAction::LastPage);

        // Vim-style and arrow selection
        bind(KeyCode::Char('j'), KeyModifiers::NONE, KeyAction::MoveDown);
        bind(KeyCode::Down, KeyModifiers::NONE, KeyAction::MoveDown);
        bind(KeyCode::Char('k'), KeyModifiers::NONE, KeyAction::MoveUp);
        bind(KeyCode::Up, KeyModifiers::NONE, KeyAction::MoveUp);

        // Screens
        bind(KeyCode::Enter, KeyModifiers::NONE, KeyAction::Open);
        bind(KeyCode::Esc, KeyModifiers::NONE, KeyAction::Back);
        bind(KeyCode::Char('b'), KeyModifiers::NONE, KeyAction::Back);
        bind(KeyCode::Char(' '), KeyModifiers::NONE, KeyAction::ToggleExpand);
        bind(KeyCode::Char('e'), KeyModifiers::NONE, KeyAction::ToggleExpand);

        // Application controls
        bind(KeyCode::Char('r'), KeyModifiers::NONE, KeyAction::Refresh);
        bind(KeyCode::Char('?'), KeyModifiers::NONE, KeyAction::Help);
        bind(KeyCode::Char('q'), KeyModifiers::NONE, KeyAction::Quit);
        bind(KeyCode::Char('c'), KeyModifiers::CONTROL, KeyAction::Quit);

        Self { bindings }
    }
}
