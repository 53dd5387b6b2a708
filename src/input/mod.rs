//! Input events and the editing state machine.

mod accumulator;

pub use accumulator::{Accumulator, CommitOutcome, DisplayState, ERROR_DISPLAY, EditState, ZERO};

/// A literal character the user can append to the expression.
///
/// Only digits, `.`, `+ - * /`, parentheses and `%` are representable, so
/// edits never put letters into the expression.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Token(char);

impl Token {
    pub const DECIMAL_POINT: Token = Token('.');

    pub fn new(c: char) -> Option<Self> {
        let valid = c.is_ascii_digit()
            || c == '.'
            || c == '%'
            || is_operator(c)
            || c == '('
            || c == ')';
        valid.then_some(Self(c))
    }

    pub fn as_char(self) -> char {
        self.0
    }

    pub fn is_decimal_point(self) -> bool {
        self.0 == '.'
    }
}

/// Control keys on the keypad.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    Clear,
    Delete,
    Equals,
}

/// Everything the controller reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Token(Token),
    Control(Action),
    /// Replay the history entry at this chronological index.
    LoadHistory(usize),
    DeleteHistory(usize),
    ClearHistory,
}

impl From<Token> for InputEvent {
    fn from(token: Token) -> Self {
        Self::Token(token)
    }
}

impl From<Action> for InputEvent {
    fn from(action: Action) -> Self {
        Self::Control(action)
    }
}

fn is_operator(c: char) -> bool {
    matches!(c, '+' | '-' | '*' | '/')
}

/// Characters that end a numeral when scanning backwards.
pub(crate) fn is_numeral_boundary(c: char) -> bool {
    is_operator(c) || matches!(c, '(' | ')' | '%')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_accepts_keypad_chars() {
        for c in "0123456789.+-*/()%".chars() {
            assert_eq!(Token::new(c).map(Token::as_char), Some(c));
        }
    }

    #[test]
    fn test_token_rejects_everything_else() {
        for c in ['a', 'e', 'X', ' ', '=', '^', '٣', ','] {
            assert_eq!(Token::new(c), None, "accepted {:?}", c);
        }
    }
}
