//! Keyboard commands.
//!
//! | Key          | Command                  |
//! |--------------|--------------------------|
//! | `r`          | reset                    |
//! | space        | start sorting            |
//! | `a` / `d`    | ascending / descending   |
//! | `1` `2` `3`  | insertion, bubble, selection |
//! | `q`, Esc     | quit                     |

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::driver::{Command, InputSource};
use crate::engine::Algorithm;
use crate::error::SortResult;

/// Map a key to a driver command.
#[must_use]
pub fn command_for_key(code: KeyCode) -> Option<Command> {
    match code {
        KeyCode::Esc => Some(Command::Quit),
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'q' => Some(Command::Quit),
            'r' => Some(Command::Reset),
            ' ' => Some(Command::StartSort),
            'a' => Some(Command::SetAscending),
            'd' => Some(Command::SetDescending),
            other => Algorithm::from_key(other).map(Command::SelectAlgorithm),
        },
        _ => None,
    }
}

/// Map a key event, honoring Ctrl-C and ignoring releases.
#[must_use]
pub fn command_for_event(key: KeyEvent) -> Option<Command> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return (key.code == KeyCode::Char('c')).then_some(Command::Quit);
    }
    command_for_key(key.code)
}

/// Input source reading the terminal's key events.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeyboardInput;

impl InputSource for KeyboardInput {
    fn poll(&mut self, timeout: Duration) -> SortResult<Vec<Command>> {
        let mut commands = Vec::new();
        let mut wait = timeout;
        while event::poll(wait)? {
            if let Event::Key(key) = event::read()? {
                commands.extend(command_for_event(key));
            }
            // Drain whatever else is queued without waiting again.
            wait = Duration::ZERO;
        }
        Ok(commands)
    }
}
