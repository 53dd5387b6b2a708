//! Textual pre-processing applied before parsing.
//!
//! Percent literals are rewritten into divisions and any remaining letter
//! rejects the expression.

use lazy_static::lazy_static;
use regex::Regex;
use std::borrow::Cow;

lazy_static! {
    /// A decimal numeral immediately followed by `%`, e.g. `50%` or `12.5%`.
    static ref PERCENT_LITERAL: Regex = Regex::new(
        r"([0-9]+(?:\.[0-9]+)?)%"
    ).unwrap();

    static ref ASCII_LETTER: Regex = Regex::new(r"[a-zA-Z]").unwrap();
}

/// Rewrite every `N%` into `(N/100)`.
///
/// Applied textually wherever the pattern occurs, so `(50%+25%)` becomes
/// `((50/100)+(25/100))`. A `%` that does not directly follow a numeral is
/// left in place for the parser to reject.
pub fn rewrite_percent(input: &str) -> Cow<'_, str> {
    PERCENT_LITERAL.replace_all(input, "(${1}/100)")
}

/// Return the first ASCII letter in `input`, if any.
pub fn find_letter(input: &str) -> Option<char> {
    ASCII_LETTER
        .find(input)
        .and_then(|m| m.as_str().chars().next())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_rewrite() {
        assert_eq!(rewrite_percent("50%"), "(50/100)");
        assert_eq!(rewrite_percent("12.5%"), "(12.5/100)");
        assert_eq!(rewrite_percent("200*15%"), "200*(15/100)");
        assert_eq!(rewrite_percent("(50%+25%)"), "((50/100)+(25/100))");
    }

    #[test]
    fn test_percent_without_numeral_untouched() {
        assert_eq!(rewrite_percent("(2+3)%"), "(2+3)%");
        assert_eq!(rewrite_percent("5.%"), "5.%");
        assert!(matches!(rewrite_percent("1+2"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_letter_detection() {
        assert_eq!(find_letter("1+2"), None);
        assert_eq!(find_letter("1e+21"), Some('e'));
        assert_eq!(find_letter("alert(1)"), Some('a'));
        assert_eq!(find_letter("2*X"), Some('X'));
    }
}
