//! Key mapping from terminal events to engine intents, by game phase.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::types::{GamePhase, Intent};

/// Map a key press to an intent, given the current phase.
pub fn map_key(phase: GamePhase, key: KeyEvent) -> Option<Intent> {
    match phase {
        GamePhase::Menu => match key.code {
            KeyCode::Char(' ') | KeyCode::Enter => Some(Intent::StartGame),
            KeyCode::Char('q') | KeyCode::Char('Q') => Some(Intent::Quit),
            _ => None,
        },
        GamePhase::Playing => match key.code {
            KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('a')
            | KeyCode::Char('A') => Some(Intent::MoveLeft),
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Char('d')
            | KeyCode::Char('D') => Some(Intent::MoveRight),
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Char('s')
            | KeyCode::Char('S') => Some(Intent::SoftDrop),
            KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') | KeyCode::Char('w')
            | KeyCode::Char('W') => Some(Intent::Rotate),
            KeyCode::Char(' ') => Some(Intent::HardDrop),
            KeyCode::Char('c') | KeyCode::Char('C') => Some(Intent::Hold),
            KeyCode::Char('p') | KeyCode::Char('P') => Some(Intent::Pause),
            _ => None,
        },
        GamePhase::Paused => match key.code {
            KeyCode::Char('p') | KeyCode::Char('P') => Some(Intent::Resume),
            _ => None,
        },
        GamePhase::GameOver => match key.code {
            KeyCode::Char('r') | KeyCode::Char('R') => Some(Intent::RestartGame),
            KeyCode::Char('q') | KeyCode::Char('Q') => Some(Intent::Quit),
            _ => None,
        },
    }
}

/// Check if the key should quit the program regardless of phase.
pub fn should_quit(key: KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}
