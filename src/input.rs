use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::snake::Direction;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Steer(Direction),
    Start,
    TogglePause,
    Quit,
    None,
}

pub fn is_ctrl_c(ev: &KeyEvent) -> bool {
    ev.modifiers.contains(KeyModifiers::CONTROL) && ev.code == KeyCode::Char('c')
}

pub fn map_key(ev: &KeyEvent) -> KeyAction {
    // Windows reports releases too
    if ev.kind == KeyEventKind::Release {
        return KeyAction::None;
    }

    if is_ctrl_c(ev) {
        return KeyAction::Quit;
    }

    match ev.code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => KeyAction::Steer(Direction::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => KeyAction::Steer(Direction::Down),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => KeyAction::Steer(Direction::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => KeyAction::Steer(Direction::Right),
        KeyCode::Enter | KeyCode::Char(' ') => KeyAction::Start,
        KeyCode::Esc => KeyAction::TogglePause,
        KeyCode::Char('q') | KeyCode::Char('Q') => KeyAction::Quit,
        _ => KeyAction::None,
    }
}
