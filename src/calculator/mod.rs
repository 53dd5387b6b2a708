//! Calculator module for evaluating arithmetic expressions.
//!
//! This module provides functionality to:
//! - Rewrite percent literals and reject letters before parsing
//! - Parse and evaluate `+ - * /` expressions with parentheses
//! - Format results for display

mod error;
mod evaluation;
mod parser;
mod sanitize;

pub use error::{EvalError, ParseError};
pub use evaluation::{evaluate, format_number};
