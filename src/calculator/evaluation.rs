//! Expression evaluation and result formatting.
//!
//! Wraps the sanitizer and parser to provide a simple interface for turning
//! keypad input into a number, and formats numbers the way the display
//! shows them.

use super::error::EvalError;
use super::{parser, sanitize};
use tracing::trace;

/// Evaluate a raw expression string.
///
/// Percent literals are rewritten first, letters are rejected, and the
/// remainder is parsed as `+ - * /` arithmetic with parentheses.
/// Non-finite results (division by zero) are reported as [`EvalError::Math`].
pub fn evaluate(raw: &str) -> Result<f64, EvalError> {
    let sanitized = sanitize::rewrite_percent(raw);

    if let Some(ch) = sanitize::find_letter(&sanitized) {
        return Err(EvalError::InvalidCharacter(ch));
    }

    let value = parser::parse(&sanitized)?.eval();
    trace!(expression = raw, value, "evaluated");

    if !value.is_finite() {
        return Err(EvalError::Math);
    }

    Ok(value)
}

/// Format a number in its default string form.
///
/// Shortest round-trip decimal with no rounding, so float artifacts such as
/// `0.30000000000000004` are kept. Magnitudes of at least `1e21` or below
/// `1e-6` switch to exponent form (`1e+21`, `1e-7`). Negative zero prints
/// as `0`.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        let msg = if value.is_sign_positive() {
            "Infinity"
        } else {
            "-Infinity"
        };
        return msg.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return value.to_string();
    }

    let formatted = format!("{:e}", value);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => formatted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::ParseError;

    #[test]
    fn test_basic_evaluation() {
        assert_eq!(evaluate("12+8"), Ok(20.0));
        assert_eq!(evaluate("2+3*4"), Ok(14.0));
        assert_eq!(evaluate("(2+3)*4"), Ok(20.0));
        assert_eq!(evaluate("10/4"), Ok(2.5));
    }

    #[test]
    fn test_percent_matches_division() {
        for n in ["0", "5", "50", "100", "12.5", "0.25", "1234.5678"] {
            let percent = evaluate(&format!("{}%", n));
            let division = evaluate(&format!("({}/100)", n));
            assert_eq!(percent, division, "percent mismatch for {}", n);
        }
        assert_eq!(evaluate("50%"), Ok(0.5));
        assert_eq!(evaluate("200*15%"), Ok(30.0));
    }

    #[test]
    fn test_letters_rejected() {
        for input in ["a", "1+x", "Math.PI", "alert(1)", "1e5", "2*Z%"] {
            assert!(
                matches!(evaluate(input), Err(EvalError::InvalidCharacter(_))),
                "expected InvalidCharacter for {}",
                input
            );
        }
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(evaluate("1/0"), Err(EvalError::Math));
        assert_eq!(evaluate("-1/0"), Err(EvalError::Math));
        assert_eq!(evaluate("0/0"), Err(EvalError::Math));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(evaluate(""), Err(EvalError::Parse(ParseError::Empty)));
        assert!(matches!(evaluate("5+"), Err(EvalError::Parse(_))));
        assert!(matches!(evaluate("(2+3)%"), Err(EvalError::Parse(_))));
        assert!(matches!(evaluate("1.2.3"), Err(EvalError::Parse(_))));
    }

    #[test]
    fn test_format_integers_and_decimals() {
        assert_eq!(format_number(20.0), "20");
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(-2.25), "-2.25");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(1e20), "100000000000000000000");
    }

    #[test]
    fn test_format_keeps_float_artifacts() {
        let value = evaluate("0.1+0.2").unwrap();
        assert_eq!(format_number(value), "0.30000000000000004");
    }

    #[test]
    fn test_format_exponent_form() {
        assert_eq!(format_number(1e21), "1e+21");
        assert_eq!(format_number(-2.5e22), "-2.5e+22");
        assert_eq!(format_number(1e-7), "1e-7");
        assert_eq!(format_number(0.000001), "0.000001");
    }

    #[test]
    fn test_format_non_finite() {
        assert_eq!(format_number(f64::INFINITY), "Infinity");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(format_number(f64::NAN), "NaN");
    }
}
