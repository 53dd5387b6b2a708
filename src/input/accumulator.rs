//! Editing state machine for the expression line.
//!
//! Holds the expression being typed and the result shown under it. Every
//! edit recomputes a live preview; a commit either yields a history entry
//! or switches to the error-flash state until [`Accumulator::expire_error_flash`]
//! is called.

use super::{Token, is_numeral_boundary};
use crate::calculator::{EvalError, evaluate, format_number};
use crate::history::HistoryEntry;
use tracing::debug;

/// Result shown when there is nothing to evaluate.
pub const ZERO: &str = "0";

/// Result shown while a failed commit is flashing.
pub const ERROR_DISPLAY: &str = "Error";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EditState {
    /// The expression may be incomplete; the preview may be empty.
    #[default]
    Editing,
    /// A commit failed and the result shows [`ERROR_DISPLAY`].
    ErrorFlash,
}

/// What the display should show.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayState {
    pub expression: String,
    /// Evaluated value, `"0"`, `"Error"`, or empty when the expression
    /// does not evaluate yet.
    pub preview: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CommitOutcome {
    /// Nothing to commit.
    Empty,
    Failed(EvalError),
    Committed(HistoryEntry),
}

#[derive(Clone, Debug)]
pub struct Accumulator {
    expression: String,
    result: String,
    state: EditState,
}

impl Default for Accumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Accumulator {
    pub fn new() -> Self {
        Self {
            expression: String::new(),
            result: ZERO.to_string(),
            state: EditState::Editing,
        }
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn result(&self) -> &str {
        &self.result
    }

    pub fn state(&self) -> EditState {
        self.state
    }

    pub fn display(&self) -> DisplayState {
        DisplayState {
            expression: self.expression.clone(),
            preview: self.result.clone(),
        }
    }

    /// Append a token and refresh the preview.
    ///
    /// A decimal point is ignored when the trailing numeral already has
    /// one. Returns whether the expression changed.
    pub fn append_token(&mut self, token: Token) -> bool {
        if token.is_decimal_point() && trailing_numeral(&self.expression).contains('.') {
            debug!(expression = %self.expression, "ignoring second decimal point");
            return false;
        }

        self.expression.push(token.as_char());
        self.result = preview(&self.expression);
        self.state = EditState::Editing;
        true
    }

    pub fn clear(&mut self) {
        self.expression.clear();
        self.result = ZERO.to_string();
        self.state = EditState::Editing;
    }

    /// Drop the last character. Returns `false` (and changes nothing) when
    /// the expression is already empty.
    pub fn delete_last(&mut self) -> bool {
        if self.expression.pop().is_none() {
            return false;
        }

        self.result = if self.expression.is_empty() {
            ZERO.to_string()
        } else {
            preview(&self.expression)
        };
        self.state = EditState::Editing;
        true
    }

    /// Evaluate the whole expression.
    ///
    /// On success the result replaces the expression so the next edit
    /// continues from it. On failure the expression is kept and the state
    /// switches to [`EditState::ErrorFlash`].
    pub fn commit(&mut self) -> CommitOutcome {
        if self.expression.is_empty() {
            return CommitOutcome::Empty;
        }

        match evaluate(&self.expression) {
            Ok(value) => {
                let result = format_number(value);
                let expression = std::mem::replace(&mut self.expression, result.clone());
                self.result = result.clone();
                self.state = EditState::Editing;
                CommitOutcome::Committed(HistoryEntry::new(expression, result))
            }
            Err(err) => {
                debug!(expression = %self.expression, error = %err, "commit failed");
                self.result = ERROR_DISPLAY.to_string();
                self.state = EditState::ErrorFlash;
                CommitOutcome::Failed(err)
            }
        }
    }

    /// End an error flash: the result goes back to `"0"`, the expression
    /// stays. Does nothing outside the error-flash state.
    pub fn expire_error_flash(&mut self) -> bool {
        if self.state != EditState::ErrorFlash {
            return false;
        }
        self.result = ZERO.to_string();
        self.state = EditState::Editing;
        true
    }

    /// Put a past calculation back on the display.
    pub fn load(&mut self, entry: &HistoryEntry) {
        self.expression = entry.expression().to_string();
        self.result = entry.result().to_string();
        self.state = EditState::Editing;
    }
}

/// Text after the last operator, parenthesis or percent sign.
fn trailing_numeral(expression: &str) -> &str {
    match expression.rfind(is_numeral_boundary) {
        Some(idx) => &expression[idx + 1..],
        None => expression,
    }
}

fn preview(expression: &str) -> String {
    evaluate(expression)
        .map(format_number)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_keys(acc: &mut Accumulator, keys: &str) {
        for c in keys.chars() {
            acc.append_token(Token::new(c).unwrap());
        }
    }

    #[test]
    fn test_initial_state() {
        let acc = Accumulator::new();
        assert_eq!(acc.expression(), "");
        assert_eq!(acc.result(), "0");
        assert_eq!(acc.state(), EditState::Editing);
    }

    #[test]
    fn test_live_preview() {
        let mut acc = Accumulator::new();
        type_keys(&mut acc, "12+");
        assert_eq!(acc.result(), "");

        type_keys(&mut acc, "8");
        assert_eq!(
            acc.display(),
            DisplayState {
                expression: "12+8".to_string(),
                preview: "20".to_string(),
            }
        );
    }

    #[test]
    fn test_decimal_guard_per_numeral() {
        let mut acc = Accumulator::new();
        type_keys(&mut acc, "3.5+2");

        assert!(acc.append_token(Token::DECIMAL_POINT));
        assert_eq!(acc.expression(), "3.5+2.");

        assert!(!acc.append_token(Token::DECIMAL_POINT));
        assert_eq!(acc.expression(), "3.5+2.");
        assert_eq!(acc.result(), "5.5");
    }

    #[test]
    fn test_decimal_guard_after_paren_and_percent() {
        let mut acc = Accumulator::new();
        type_keys(&mut acc, "1.5*(");
        assert!(acc.append_token(Token::DECIMAL_POINT));

        let mut acc = Accumulator::new();
        type_keys(&mut acc, "2.5%");
        assert!(acc.append_token(Token::DECIMAL_POINT));
    }

    #[test]
    fn test_clear() {
        let mut acc = Accumulator::new();
        type_keys(&mut acc, "7*6");
        acc.clear();
        assert_eq!(acc.expression(), "");
        assert_eq!(acc.result(), "0");
    }

    #[test]
    fn test_delete_last() {
        let mut acc = Accumulator::new();
        type_keys(&mut acc, "9+1");

        assert!(acc.delete_last());
        assert_eq!(acc.expression(), "9+");
        assert_eq!(acc.result(), "");

        assert!(acc.delete_last());
        assert_eq!(acc.result(), "9");

        assert!(acc.delete_last());
        assert_eq!(acc.expression(), "");
        assert_eq!(acc.result(), "0");
    }

    #[test]
    fn test_delete_on_empty_is_noop() {
        let mut acc = Accumulator::new();
        let before = acc.display();

        assert!(!acc.delete_last());
        assert_eq!(acc.display(), before);
        assert_eq!(acc.state(), EditState::Editing);
    }

    #[test]
    fn test_commit_success_chains() {
        let mut acc = Accumulator::new();
        type_keys(&mut acc, "12+8");

        assert_eq!(
            acc.commit(),
            CommitOutcome::Committed(HistoryEntry::new("12+8", "20"))
        );
        assert_eq!(acc.result(), "20");
        assert_eq!(acc.expression(), "20");

        type_keys(&mut acc, "*2");
        assert_eq!(acc.result(), "40");
    }

    #[test]
    fn test_commit_percent() {
        let mut acc = Accumulator::new();
        type_keys(&mut acc, "50%");
        assert!(matches!(acc.commit(), CommitOutcome::Committed(_)));
        assert_eq!(acc.result(), "0.5");
    }

    #[test]
    fn test_commit_empty() {
        let mut acc = Accumulator::new();
        assert_eq!(acc.commit(), CommitOutcome::Empty);
        assert_eq!(acc.result(), "0");
    }

    #[test]
    fn test_commit_failure_flashes() {
        let mut acc = Accumulator::new();
        type_keys(&mut acc, "5/0");

        assert_eq!(acc.commit(), CommitOutcome::Failed(EvalError::Math));
        assert_eq!(acc.result(), ERROR_DISPLAY);
        assert_eq!(acc.state(), EditState::ErrorFlash);

        assert!(acc.expire_error_flash());
        assert_eq!(acc.result(), "0");
        assert_eq!(acc.expression(), "5/0");
        assert_eq!(acc.state(), EditState::Editing);
    }

    #[test]
    fn test_stale_expiry_does_not_clobber() {
        let mut acc = Accumulator::new();
        type_keys(&mut acc, "5/0");
        acc.commit();

        type_keys(&mut acc, "+1");
        assert!(!acc.expire_error_flash());
        assert_eq!(acc.expression(), "5/0+1");
    }

    #[test]
    fn test_load_entry() {
        let mut acc = Accumulator::new();
        type_keys(&mut acc, "1/0");
        acc.commit();

        acc.load(&HistoryEntry::new("6*7", "42"));
        assert_eq!(acc.expression(), "6*7");
        assert_eq!(acc.result(), "42");
        assert_eq!(acc.state(), EditState::Editing);
    }
}
