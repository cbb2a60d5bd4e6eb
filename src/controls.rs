use crate::snake::Direction::{self, *};
use crate::term::Key;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Steer(Direction),
    Quit,
}

impl Command {
    /// Anything that is not a movement key, `q` or Ctrl+C maps to `None`.
    pub fn from_key(key: Key) -> Option<Command> {
        match key {
            Key::Interrupt => Some(Command::Quit),
            Key::Char(ch) => match ch.to_ascii_lowercase() {
                'w' => Some(Command::Steer(Up)),
                's' => Some(Command::Steer(Down)),
                'a' => Some(Command::Steer(Left)),
                'd' => Some(Command::Steer(Right)),
                'q' => Some(Command::Quit),
                _ => None,
            },
        }
    }
}
