use crossterm::event::{KeyCode, KeyEvent as CrosstermKeyEvent, KeyModifiers};

/// Terminal-agnostic key representation.
///
/// Input handling and tests work in terms of this enum so they never
/// depend on crossterm directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Esc,
    Tab,
    BackTab,
    Backspace,
    Up,
    Down,
    Left,
    Right,
    PageUp,
    PageDown,
}

/// Ctrl is the only modifier with a meaning here: it lets quit, tab
/// switching and the language toggle work while a text field is
/// swallowing plain characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub ctrl: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::default(),
        }
    }

    pub fn with_ctrl(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers { ctrl: true },
        }
    }
}

impl From<KeyCode> for Key {
    fn from(code: KeyCode) -> Self {
        match code {
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Enter => Key::Enter,
            KeyCode::Esc => Key::Esc,
            KeyCode::Tab => Key::Tab,
            KeyCode::BackTab => Key::BackTab,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::PageUp => Key::PageUp,
            KeyCode::PageDown => Key::PageDown,
            // Anything unmapped becomes a null char no binding matches
            _ => Key::Char('\0'),
        }
    }
}

impl From<CrosstermKeyEvent> for KeyEvent {
    fn from(event: CrosstermKeyEvent) -> Self {
        Self {
            key: Key::from(event.code),
            modifiers: Modifiers {
                ctrl: event.modifiers.contains(KeyModifiers::CONTROL),
            },
        }
    }
}
