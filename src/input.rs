use macroquad::prelude::*;

use crate::game::Direction;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Steer(Direction),
    Quit,
}

const KEYS: [KeyCode; 5] = [
    KeyCode::Escape,
    KeyCode::Up,
    KeyCode::Down,
    KeyCode::Left,
    KeyCode::Right,
];

pub fn command_for(key: KeyCode) -> Option<Command> {
    match key {
        KeyCode::Escape => Some(Command::Quit),
        KeyCode::Up => Some(Command::Steer(Direction::Up)),
        KeyCode::Down => Some(Command::Steer(Direction::Down)),
        KeyCode::Left => Some(Command::Steer(Direction::Left)),
        KeyCode::Right => Some(Command::Steer(Direction::Right)),
        _ => None,
    }
}

/// Commands for keys that went down since the last frame, Escape first.
pub fn poll() -> Vec<Command> {
    KEYS.iter()
        .filter(|key| is_key_pressed(**key))
        .filter_map(|key| command_for(*key))
        .collect()
}
