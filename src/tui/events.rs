use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// User actions from keyboard events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    /// Esc: cancel keyword entry, clear search, or quit when nothing is active
    Cancel,
    MoveUp,
    MoveDown,
    PageUp,
    PageDown,
    Submit,
    BeginKeyword,
    RemoveKeyword,
    CycleSort,
    Reload,
    CopyToClipboard,
    ToggleFocus,
    Input(char),
    DeleteChar,
    None,
}

/// Poll for keyboard events and convert to actions
pub fn poll_event(timeout: Duration) -> anyhow::Result<Action> {
    if event::poll(timeout)?
        && let Event::Key(key) = event::read()?
        && key.kind != KeyEventKind::Release
    {
        return Ok(key_to_action(key));
    }
    Ok(Action::None)
}

fn key_to_action(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,
        (KeyCode::Esc, _) => Action::Cancel,

        // Navigation (Vim/Emacs style)
        (KeyCode::Char('p'), KeyModifiers::CONTROL) => Action::MoveUp,
        (KeyCode::Char('n'), KeyModifiers::CONTROL) => Action::MoveDown,
        (KeyCode::Up, _) => Action::MoveUp,
        (KeyCode::Down, _) => Action::MoveDown,
        (KeyCode::PageUp, _) => Action::PageUp,
        (KeyCode::PageDown, _) => Action::PageDown,
        (KeyCode::Tab, _) => Action::ToggleFocus,

        // Query controls
        (KeyCode::Enter, _) => Action::Submit,
        (KeyCode::Char('k'), KeyModifiers::CONTROL) => Action::BeginKeyword,
        (KeyCode::Char('x'), KeyModifiers::CONTROL) => Action::RemoveKeyword,
        (KeyCode::Char('s'), KeyModifiers::CONTROL) => Action::CycleSort,
        (KeyCode::Char('r'), KeyModifiers::CONTROL) => Action::Reload,
        (KeyCode::Char('y'), KeyModifiers::CONTROL) => Action::CopyToClipboard,

        // Text input
        (KeyCode::Char(c), KeyModifiers::NONE) | (KeyCode::Char(c), KeyModifiers::SHIFT) => {
            Action::Input(c)
        }
        (KeyCode::Backspace, _) => Action::DeleteChar,

        _ => Action::None,
    }
}
