//! A keypad arithmetic calculator with a live preview and persisted history.
//!
//! The [`controller::Controller`] owns the editing state and the history log;
//! rendering and persistence are supplied through the
//! [`render::RenderSink`] and [`history::HistoryStore`] traits.

pub mod calculator;
pub mod config;
pub mod controller;
pub mod history;
pub mod input;
pub mod keys;
pub mod render;

pub use calculator::{EvalError, ParseError, evaluate, format_number};
pub use config::Config;
pub use controller::Controller;
pub use history::{HistoryEntry, HistoryLog, HistoryStore, JsonFileStore, MemoryStore};
pub use input::{Accumulator, Action, InputEvent, Token};
pub use render::{RenderSink, TerminalRenderer};
