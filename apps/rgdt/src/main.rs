//! rgdt: run a delivery fleet scenario from the command line.
//!
//! ```text
//! rgdt term city            # reads city.xml + city.json
//! rgdt term city -o out/    # also writes CSV step logs to out/
//! ```
//!
//! Set `RUST_LOG=debug` to see every claim, pick-up, delivery and step.

mod files;

#[cfg(test)]
mod tests;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use rgdt_core::{BotId, PackageId, SimConfig, Tick};
use rgdt_fleet::{GreedyNearest, StepEvent};
use rgdt_output::{CsvWriter, OutputError, OutputWriter, SimOutputObserver};
use rgdt_sim::{Scenario, SimBuilder, SimObserver};
use rgdt_spatial::DijkstraRouter;

// ── Command line ──────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "rgdt", version, about = "Shortest delivery routes for a fleet of bots")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a scenario and print the per-bot report.
    Term {
        /// Scenario base name: `<scenario>.xml` and `<scenario>.json` must exist.
        scenario: PathBuf,

        /// Write steps.csv, tick_summaries.csv and bot_summaries.csv here.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

// ── Observer wrapper to count events ─────────────────────────────────────────

struct CountingObserver<W: OutputWriter> {
    inner:      Option<SimOutputObserver<W>>,
    steps:      usize,
    deliveries: usize,
    ticks:      u64,
}

impl<W: OutputWriter> CountingObserver<W> {
    fn new(inner: Option<SimOutputObserver<W>>) -> Self {
        Self { inner, steps: 0, deliveries: 0, ticks: 0 }
    }
}

impl<W: OutputWriter> SimObserver for CountingObserver<W> {
    fn on_step(&mut self, tick: Tick, step: &StepEvent) {
        self.steps += 1;
        if let Some(inner) = &mut self.inner {
            inner.on_step(tick, step);
        }
    }

    fn on_delivery(&mut self, _tick: Tick, _bot: BotId, _package: PackageId) {
        self.deliveries += 1;
    }

    fn on_tick_end(&mut self, tick: Tick, remaining: usize) {
        self.ticks += 1;
        tracing::debug!(%tick, remaining, "tick done");
        if let Some(inner) = &mut self.inner {
            inner.on_tick_end(tick, remaining);
        }
    }

    fn on_sim_end(&mut self, final_tick: Tick, scenario: &Scenario) {
        if let Some(inner) = &mut self.inner {
            inner.on_sim_end(final_tick, scenario);
        }
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Term { scenario, output } => run_term(&scenario, output.as_deref()),
    }
}

fn run_term(base: &Path, output: Option<&Path>) -> Result<()> {
    // 1. Load the fleet (and its config) and the road network.
    let loaded = files::load(base)?;
    info!(
        nodes    = loaded.network.node_count(),
        ways     = loaded.network.way_count(),
        bots     = loaded.fleet.bots.len(),
        packages = loaded.fleet.packages.len(),
        "scenario loaded"
    );

    // 2. Build sim.
    let config = loaded.config;
    let mut sim = SimBuilder::new(config.clone(), loaded.network, GreedyNearest, DijkstraRouter)
        .fleet(loaded.fleet)
        .build()?;

    // 3. Set up output.
    let inner = match output {
        Some(dir) => Some(SimOutputObserver::new(CsvWriter::new(dir)?, &config)),
        None => None,
    };
    let mut obs = CountingObserver::new(inner);

    // 4. Run.
    let t0 = Instant::now();
    let outcome = sim.run(&mut obs);
    let elapsed = t0.elapsed();

    if let Some(inner) = &mut obs.inner {
        for e in flush_output(inner, &sim.scenario) {
            eprintln!("output error: {e}");
        }
    }

    // 5. Report.
    match &outcome {
        Ok(_)  => println!("Simulation complete."),
        Err(e) => println!("Simulation stopped: {e}"),
    }
    println!(
        "{} ticks, {} steps, {} deliveries in {:.3} s",
        obs.ticks,
        obs.steps,
        obs.deliveries,
        elapsed.as_secs_f64()
    );
    println!();
    print_report(&sim.scenario, &config);

    outcome?;
    Ok(())
}

/// Close the CSV output and collect every write error.
///
/// A failed run never reaches `on_sim_end`, so the bot summaries are written
/// here.  Errors are returned rather than raised so the report still prints.
fn flush_output<W: OutputWriter>(out: &mut SimOutputObserver<W>, scenario: &Scenario) -> Vec<OutputError> {
    let mut errors = Vec::new();
    if let Err(e) = out.finish(scenario) {
        errors.push(e);
    }
    errors.extend(out.take_error());
    errors
}

fn print_report(scenario: &Scenario, config: &SimConfig) {
    println!("{:<8} {:<12} {:>12} {:>11} {:>14}", "Bot", "Node", "Cost (h)", "Deliveries", "Distance (km)");
    println!("{}", "-".repeat(61));
    for s in scenario.bot_stats(config) {
        println!(
            "{:<8} {:<12} {:>12.4} {:>11} {:>14.3}",
            s.bot.0, s.location.0, s.accumulated_cost, s.deliveries, s.distance_km,
        );
    }
}
