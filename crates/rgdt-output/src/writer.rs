//! The `OutputWriter` trait implemented by all backend writers.

use crate::{BotSummaryRow, OutputResult, StepRow, TickSummaryRow};

/// Trait implemented by output backends.
///
/// Errors are stored by the observer and retrieved with
/// [`SimOutputObserver::take_error`][crate::SimOutputObserver::take_error].
pub trait OutputWriter {
    /// Write a batch of step rows.
    fn write_steps(&mut self, rows: &[StepRow]) -> OutputResult<()>;

    /// Write one tick summary row.
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Write the final per-bot rows.
    fn write_bot_summaries(&mut self, rows: &[BotSummaryRow]) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
