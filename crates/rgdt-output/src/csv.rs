//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `steps.csv`
//! - `tick_summaries.csv`
//! - `bot_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{BotSummaryRow, OutputResult, StepRow, TickSummaryRow};

/// Writes simulation output to three CSV files.
pub struct CsvWriter {
    steps:     Writer<File>,
    summaries: Writer<File>,
    bots:      Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Create `dir` if needed, open the three CSV files, and write the header
    /// rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;

        let mut steps = Writer::from_path(dir.join("steps.csv"))?;
        steps.write_record(["tick", "bot_id", "from_node", "to_node", "way_id", "cost_hours"])?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record(["tick", "moves", "remaining"])?;

        let mut bots = Writer::from_path(dir.join("bot_summaries.csv"))?;
        bots.write_record(["bot_id", "final_node", "accumulated_cost_hours", "deliveries", "distance_km"])?;

        Ok(Self { steps, summaries, bots, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_steps(&mut self, rows: &[StepRow]) -> OutputResult<()> {
        for row in rows {
            self.steps.write_record(&[
                row.tick.to_string(),
                row.bot_id.to_string(),
                row.from_node.to_string(),
                row.to_node.to_string(),
                row.way_id.to_string(),
                row.cost_hours.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.moves.to_string(),
            row.remaining.to_string(),
        ])?;
        Ok(())
    }

    fn write_bot_summaries(&mut self, rows: &[BotSummaryRow]) -> OutputResult<()> {
        for row in rows {
            self.bots.write_record(&[
                row.bot_id.to_string(),
                row.final_node.to_string(),
                row.accumulated_cost_hours.to_string(),
                row.deliveries.to_string(),
                row.distance_km.to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.steps.flush()?;
        self.summaries.flush()?;
        self.bots.flush()?;
        Ok(())
    }
}
