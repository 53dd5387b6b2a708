//! The controller owns all calculator state and wires it to the outside.
//!
//! Input events go in through [`Controller::handle`] (or the async
//! [`Controller::run`] loop); display and history updates come out through a
//! [`RenderSink`], and the history log is persisted through a
//! [`HistoryStore`] after every change.
//!
//! A failed commit shows "Error" until a deadline owned by the controller
//! passes. Every transition that changes the display drops that deadline,
//! and the accumulator ignores expiry outside the error-flash state, so a
//! stale reset can never overwrite newer input.

use crate::config::Config;
use crate::history::{HistoryError, HistoryLog, HistoryStore};
use crate::input::{Accumulator, Action, CommitOutcome, InputEvent};
use crate::render::RenderSink;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, info, warn};

pub struct Controller<S, R> {
    accumulator: Accumulator,
    history: HistoryLog,
    store: S,
    sink: R,
    flash_delay: Duration,
    flash_deadline: Option<Instant>,
}

impl<S: HistoryStore, R: RenderSink> Controller<S, R> {
    /// Create a controller, loading the history from `store`.
    pub fn new(store: S, sink: R, config: &Config) -> Self {
        let history = HistoryLog::from_entries(store.load(), config.history_limit);
        debug!(entries = history.len(), "history loaded");

        Self {
            accumulator: Accumulator::new(),
            history,
            store,
            sink,
            flash_delay: config.error_flash_delay(),
            flash_deadline: None,
        }
    }

    pub fn accumulator(&self) -> &Accumulator {
        &self.accumulator
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn sink(&self) -> &R {
        &self.sink
    }

    /// When the pending error flash ends, if one is showing.
    pub fn flash_deadline(&self) -> Option<Instant> {
        self.flash_deadline
    }

    /// Render the display and the history.
    pub fn render_all(&mut self) {
        self.render_display();
        self.render_history();
    }

    /// Apply one input event at time `now`.
    ///
    /// Only persistence failures are returned; the in-memory state is
    /// already updated and rendered when that happens.
    pub fn handle(&mut self, event: InputEvent, now: Instant) -> Result<(), HistoryError> {
        match event {
            InputEvent::Token(token) => {
                if self.accumulator.append_token(token) {
                    self.settle();
                }
            }
            InputEvent::Control(Action::Clear) => {
                self.accumulator.clear();
                self.settle();
            }
            InputEvent::Control(Action::Delete) => {
                if self.accumulator.delete_last() {
                    self.settle();
                }
            }
            InputEvent::Control(Action::Equals) => return self.commit(now),
            InputEvent::LoadHistory(index) => match self.history.get(index).cloned() {
                Some(entry) => {
                    self.accumulator.load(&entry);
                    self.settle();
                }
                None => debug!(index, "no history entry to load"),
            },
            InputEvent::DeleteHistory(index) => {
                if self.history.delete_at(index).is_none() {
                    debug!(index, "no history entry to delete");
                    return Ok(());
                }
                self.render_history();
                return self.persist();
            }
            InputEvent::ClearHistory => {
                self.history.clear();
                info!("history cleared");
                self.render_history();
                return self.persist();
            }
        }
        Ok(())
    }

    /// End the error flash if its deadline has passed.
    pub fn poll(&mut self, now: Instant) {
        if let Some(deadline) = self.flash_deadline
            && deadline <= now
        {
            self.expire_flash();
        }
    }

    /// Process events until the channel closes, expiring error flashes on
    /// time. Returns the controller so callers can inspect its final state.
    pub async fn run(mut self, mut events: mpsc::Receiver<InputEvent>) -> Self {
        self.render_all();

        loop {
            let deadline = self.flash_deadline;
            tokio::select! {
                event = events.recv() => {
                    let Some(event) = event else { break };
                    if let Err(err) = self.handle(event, Instant::now()) {
                        warn!(error = %err, "failed to persist history");
                    }
                }
                () = wait_until(deadline) => self.expire_flash(),
            }
        }

        debug!("input closed, controller stopping");
        self
    }

    fn commit(&mut self, now: Instant) -> Result<(), HistoryError> {
        match self.accumulator.commit() {
            CommitOutcome::Empty => Ok(()),
            CommitOutcome::Failed(_) => {
                self.flash_deadline = Some(now + self.flash_delay);
                self.render_display();
                Ok(())
            }
            CommitOutcome::Committed(entry) => {
                debug!(expression = entry.expression(), result = entry.result(), "committed");
                self.flash_deadline = None;
                self.history.append(entry);
                self.render_history();
                self.render_display();
                self.persist()
            }
        }
    }

    fn expire_flash(&mut self) {
        self.flash_deadline = None;
        if self.accumulator.expire_error_flash() {
            self.render_display();
        }
    }

    /// Drop any pending flash and show the new display.
    fn settle(&mut self) {
        self.flash_deadline = None;
        self.render_display();
    }

    fn render_display(&mut self) {
        self.sink
            .render_display(self.accumulator.expression(), self.accumulator.result());
    }

    fn render_history(&mut self) {
        self.sink.render_history(self.history.list());
    }

    fn persist(&mut self) -> Result<(), HistoryError> {
        self.store.save(self.history.list())
    }
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
