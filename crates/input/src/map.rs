//! Key mapping from terminal events to controller buttons.

use crate::types::Buttons;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map a key to the controller buttons it stands for (empty if unbound).
pub fn map_key(key: KeyEvent) -> Buttons {
    match key.code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Buttons::UP,
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Buttons::DOWN,
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Buttons::LEFT,
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Buttons::RIGHT,

        KeyCode::Char(' ') => Buttons::Y,
        KeyCode::Enter => Buttons::START,
        KeyCode::Tab => Buttons::SELECT,
        KeyCode::Char('j') | KeyCode::Char('J') => Buttons::B,
        KeyCode::Char('k') | KeyCode::Char('K') => Buttons::A,
        KeyCode::Char('e') | KeyCode::Char('E') => Buttons::RB,
        KeyCode::Char('q') if key.modifiers.contains(KeyModifiers::ALT) => Buttons::LB,

        _ => Buttons::empty(),
    }
}

/// Check if key should quit the demo.
pub fn should_quit(key: KeyEvent) -> bool {
    (matches!(key.code, KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q'))
        && !key.modifiers.contains(KeyModifiers::ALT))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
