//! Key mapping from keyboard names and terminal lines to input events.

use crate::input::{Action, InputEvent, Token};
use thiserror::Error;

/// Map a keyboard key name (as reported by a key-down event) to an event.
///
/// Digits, `. + - * / % ( )` append; `Enter` and `=` commit; `Backspace`
/// deletes; `c`/`C` clears. Anything else is ignored.
pub fn from_key_name(key: &str) -> Option<InputEvent> {
    match key {
        "Enter" | "=" => Some(Action::Equals.into()),
        "Backspace" => Some(Action::Delete.into()),
        _ => {
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => from_char(c),
                _ => None,
            }
        }
    }
}

fn from_char(c: char) -> Option<InputEvent> {
    match c {
        '=' => Some(Action::Equals.into()),
        'c' | 'C' => Some(Action::Clear.into()),
        c => Token::new(c).map(InputEvent::from),
    }
}

/// One line typed into the terminal front-end.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LineCommand {
    Events(Vec<InputEvent>),
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyError {
    #[error("unknown command ':{0}'")]
    UnknownCommand(String),

    #[error(":{0} needs a history index")]
    MissingIndex(&'static str),

    #[error("'{0}' is not a history index")]
    BadIndex(String),
}

/// Parse a terminal line.
///
/// Each character is a key press, and an empty line is `Enter`. Lines
/// starting with `:` are commands: `:load N`, `:rm N`, `:wipe` (clear
/// history), `:back` (backspace), `:quit`.
pub fn parse_line(line: &str) -> Result<LineCommand, KeyError> {
    let line = line.trim();

    if let Some(command) = line.strip_prefix(':') {
        return parse_command(command);
    }

    if line.is_empty() {
        return Ok(LineCommand::Events(vec![Action::Equals.into()]));
    }

    let events = line
        .chars()
        .filter(|c| !c.is_whitespace())
        .filter_map(from_char)
        .collect();
    Ok(LineCommand::Events(events))
}

fn parse_command(command: &str) -> Result<LineCommand, KeyError> {
    let mut parts = command.split_whitespace();
    let name = parts.next().unwrap_or_default();

    let event = match name {
        "q" | "quit" => return Ok(LineCommand::Quit),
        "back" => Action::Delete.into(),
        "wipe" => InputEvent::ClearHistory,
        "load" => InputEvent::LoadHistory(parse_index("load", parts.next())?),
        "rm" => InputEvent::DeleteHistory(parse_index("rm", parts.next())?),
        other => return Err(KeyError::UnknownCommand(other.to_string())),
    };

    Ok(LineCommand::Events(vec![event]))
}

fn parse_index(command: &'static str, arg: Option<&str>) -> Result<usize, KeyError> {
    let arg = arg.ok_or(KeyError::MissingIndex(command))?;
    arg.parse().map_err(|_| KeyError::BadIndex(arg.to_string()))
}
