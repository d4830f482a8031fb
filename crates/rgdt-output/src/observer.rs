//! `SimOutputObserver<W>`: bridges `SimObserver` to an `OutputWriter`.

use rgdt_core::{SimConfig, Tick};
use rgdt_fleet::StepEvent;
use rgdt_sim::{Scenario, SimObserver};

use crate::row::{BotSummaryRow, StepRow, TickSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes step rows, tick summaries and final bot
/// summaries to any [`OutputWriter`] backend.
///
/// Steps are buffered for the current tick and flushed at tick end.  Errors
/// from the writer are stored internally because `SimObserver` methods have
/// no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    config:     SimConfig,
    pending:    Vec<StepRow>,
    finished:   bool,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    /// Create an observer backed by `writer`.  `config` is used to derive
    /// distances in the bot summaries.
    pub fn new(writer: W, config: &SimConfig) -> Self {
        Self {
            writer,
            config:     config.clone(),
            pending:    Vec::new(),
            finished:   false,
            last_error: None,
        }
    }

    /// Write bot summaries for `scenario` and close the writer.
    ///
    /// Called automatically from `on_sim_end`.  Call it directly when a run
    /// stops with an error and the partial results should still be written.
    /// Only the first call has any effect.
    pub fn finish(&mut self, scenario: &Scenario) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        let rows: Vec<BotSummaryRow> = scenario
            .bot_stats(&self.config)
            .iter()
            .map(BotSummaryRow::from)
            .collect();
        self.writer.write_bot_summaries(&rows)?;
        self.writer.finish()
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_step(&mut self, tick: Tick, step: &StepEvent) {
        self.pending.push(StepRow::from_event(tick.0, step));
    }

    fn on_tick_end(&mut self, tick: Tick, remaining: usize) {
        let row = TickSummaryRow {
            tick:      tick.0,
            moves:     self.pending.len() as u64,
            remaining: remaining as u64,
        };
        let mut result = self.writer.write_tick_summary(&row);
        if result.is_ok() && !self.pending.is_empty() {
            result = self.writer.write_steps(&self.pending);
        }
        self.pending.clear();
        self.store_err(result);
    }

    fn on_sim_end(&mut self, _final_tick: Tick, scenario: &Scenario) {
        let result = self.finish(scenario);
        self.store_err(result);
    }
}
