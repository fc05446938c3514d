use crossterm::event::KeyCode;

use crate::game::Action;

/// Game keys. Letters match either case.
pub fn action_for(code: KeyCode) -> Option<Action> {
    match code {
        KeyCode::F(3) => Some(Action::ToggleDebug),
        KeyCode::Esc => Some(Action::Quit),
        KeyCode::Left => Some(Action::Left),
        KeyCode::Right => Some(Action::Right),
        KeyCode::Down => Some(Action::SoftDrop),
        KeyCode::Up => Some(Action::RotateCw),
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'j' => Some(Action::Left),
            'k' => Some(Action::Right),
            'd' | 'x' => Some(Action::RotateCw),
            's' | 'z' => Some(Action::RotateCcw),
            'f' | ' ' => Some(Action::HardDrop),
            _ => None,
        },
        _ => None,
    }
}
