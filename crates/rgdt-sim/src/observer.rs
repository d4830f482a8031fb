//! Simulation observer trait for progress reporting and data collection.

use rgdt_core::{BotId, PackageId, Tick};
use rgdt_fleet::StepEvent;

use crate::Scenario;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: step logger
///
/// ```rust,ignore
/// struct StepPrinter;
///
/// impl SimObserver for StepPrinter {
///     fn on_step(&mut self, tick: Tick, step: &StepEvent) {
///         println!("{tick}: {} {} -> {}", step.bot, step.from, step.to);
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any bot acts.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// A bot reserved an unmoved package.
    fn on_claim(&mut self, _tick: Tick, _bot: BotId, _package: PackageId) {}

    /// A bot loaded a package at its source.
    fn on_pickup(&mut self, _tick: Tick, _bot: BotId, _package: PackageId) {}

    /// A bot dropped a package at its destination.
    fn on_delivery(&mut self, _tick: Tick, _bot: BotId, _package: PackageId) {}

    /// A bot crossed one way.
    fn on_step(&mut self, _tick: Tick, _step: &StepEvent) {}

    /// A bot had no reachable work this tick.
    fn on_idle(&mut self, _tick: Tick, _bot: BotId) {}

    /// Called at the end of each tick with the number of undelivered packages.
    fn on_tick_end(&mut self, _tick: Tick, _remaining: usize) {}

    /// Called once after the last package is delivered.
    fn on_sim_end(&mut self, _final_tick: Tick, _scenario: &Scenario) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
