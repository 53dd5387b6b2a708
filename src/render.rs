//! Render sinks: where the controller sends what should be on screen.

use crate::history::HistoryEntry;
use std::io::{self, Write};
use tracing::warn;

/// Receives display and history updates from the controller.
pub trait RenderSink {
    /// Show the expression line and the result line.
    fn render_display(&mut self, expression: &str, result: &str);

    /// Show the history list. `entries` is oldest first.
    fn render_history(&mut self, entries: &[HistoryEntry]);
}

/// Plain-text renderer for a terminal or any other writer.
pub struct TerminalRenderer<W: Write> {
    out: W,
}

impl TerminalRenderer<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_display(&mut self, expression: &str, result: &str) -> io::Result<()> {
        // Keep the expression line even when empty so the layout doesn't jump.
        let expression = if expression.is_empty() { " " } else { expression };
        writeln!(self.out, "  {}", expression)?;
        writeln!(self.out, "= {}", result)?;
        self.out.flush()
    }

    fn write_history(&mut self, entries: &[HistoryEntry]) -> io::Result<()> {
        writeln!(self.out, "-- history --")?;
        if entries.is_empty() {
            writeln!(self.out, "No calculations yet.")?;
        }
        // Newest first, numbered by chronological index for :load / :rm.
        for (idx, entry) in entries.iter().enumerate().rev() {
            writeln!(
                self.out,
                "[{}] {} = {}",
                idx,
                entry.expression(),
                entry.result()
            )?;
        }
        self.out.flush()
    }
}

impl<W: Write> RenderSink for TerminalRenderer<W> {
    fn render_display(&mut self, expression: &str, result: &str) {
        if let Err(err) = self.write_display(expression, result) {
            warn!(error = %err, "failed to render display");
        }
    }

    fn render_history(&mut self, entries: &[HistoryEntry]) {
        if let Err(err) = self.write_history(entries) {
            warn!(error = %err, "failed to render history");
        }
    }
}
