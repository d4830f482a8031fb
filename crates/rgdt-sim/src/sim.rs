//! The `Sim` struct and its tick loop.

use tracing::{debug, info, warn};

use rgdt_core::{SimConfig, Tick};
use rgdt_fleet::{DispatchPolicy, Movement, RouteContext, calculate_destination, step_towards};
use rgdt_spatial::Router;

use crate::{Scenario, SimError, SimObserver, SimResult};

// ── Per-tick summary ──────────────────────────────────────────────────────────

/// What happened during one call to [`Sim::step_tick`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    pub tick:      Tick,
    /// Bots that crossed a way.
    pub moves:     usize,
    /// Bots already standing on their target.
    pub holding:   usize,
    /// Bots with no reachable work.
    pub idle:      usize,
    pub claimed:   usize,
    pub picked_up: usize,
    pub delivered: usize,
}

impl TickReport {
    fn new(tick: Tick) -> Self {
        Self { tick, ..Self::default() }
    }

    /// `true` if the tick changed nothing: no bot moved and no package
    /// changed state.  Repeating such a tick cannot make progress.
    pub fn is_stalled(&self) -> bool {
        self.moves == 0 && self.claimed == 0 && self.picked_up == 0 && self.delivered == 0
    }
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// Each tick visits every bot once, in ascending `BotId` order:
///
/// 1. [`calculate_destination`]: drop off, pick up, choose a target, claim it.
/// 2. [`step_towards`]: cross one way toward the target, if there is one.
///
/// A bot's turn finishes before the next bot starts, so a bot earlier in the
/// order wins any package both would claim in the same tick.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<P: DispatchPolicy, R: Router> {
    /// Speed, handling time and tick limit.
    pub config: SimConfig,

    /// The next tick to run.
    pub clock: Tick,

    /// Network, bots, packages and path cache.
    pub scenario: Scenario,

    /// Chooses each bot's target.
    pub policy: P,

    /// Shortest-path backend behind the path cache.
    pub router: R,
}

impl<P: DispatchPolicy, R: Router> Sim<P, R> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run until every package is delivered.  Returns the tick count.
    ///
    /// # Errors
    ///
    /// [`SimError::NoReachableWork`] when a whole tick passes with no movement
    /// and no package state change while packages remain.
    /// [`SimError::TickLimitExceeded`] when `config.max_ticks` ticks have run
    /// without completing.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<Tick> {
        while !self.scenario.complete() {
            if self.clock.0 >= self.config.max_ticks {
                let remaining = self.scenario.remaining();
                warn!(limit = self.config.max_ticks, remaining, "tick limit reached");
                return Err(SimError::TickLimitExceeded { limit: self.config.max_ticks, remaining });
            }

            let report = self.step_tick(observer)?;
            if report.is_stalled() && !self.scenario.complete() {
                let remaining = self.scenario.remaining();
                warn!(tick = %report.tick, remaining, "no bot can make progress");
                return Err(SimError::NoReachableWork { tick: report.tick, remaining });
            }
        }

        info!(
            ticks      = self.clock.0,
            deliveries = self.scenario.total_deliveries(),
            cached     = self.scenario.cache.len(),
            "all packages delivered"
        );
        observer.on_sim_end(self.clock, &self.scenario);
        Ok(self.clock)
    }

    /// Run at most `n` ticks, stopping early once every package is delivered.
    ///
    /// Neither stall detection nor the tick limit apply.  Useful for tests and
    /// incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            if self.scenario.complete() {
                break;
            }
            self.step_tick(observer)?;
        }
        Ok(())
    }

    /// Run a single tick over every bot and advance the clock.
    pub fn step_tick<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<TickReport> {
        let now = self.clock;
        observer.on_tick_start(now);
        let mut report = TickReport::new(now);

        // Explicit field borrows so the borrow checker sees disjoint access.
        let Scenario { network, bots, packages, cache } = &mut self.scenario;
        let policy = &self.policy;
        let router = &self.router;
        let config = &self.config;

        for bot in bots.iter_mut() {
            let mut ctx = RouteContext::new(network, router, cache);
            let decision = calculate_destination(bot, packages, &mut ctx, policy, config)?;

            for &p in &decision.delivered {
                observer.on_delivery(now, bot.id, p);
            }
            for &p in &decision.picked_up {
                observer.on_pickup(now, bot.id, p);
            }
            if let Some(p) = decision.claimed {
                observer.on_claim(now, bot.id, p);
            }
            report.delivered += decision.delivered.len();
            report.picked_up += decision.picked_up.len();
            report.claimed   += usize::from(decision.claimed.is_some());

            match decision.target {
                None => {
                    debug!(bot = %bot.id, node = %bot.location, "idle");
                    report.idle += 1;
                    observer.on_idle(now, bot.id);
                }
                Some(target) => match step_towards(bot, target.node, &mut ctx)? {
                    Movement::Moved(step) => {
                        report.moves += 1;
                        observer.on_step(now, &step);
                    }
                    Movement::Holding => report.holding += 1,
                    Movement::Stuck => {
                        warn!(bot = %bot.id, node = %bot.location, target = %target.node, "no way leads toward target");
                        report.idle += 1;
                        observer.on_idle(now, bot.id);
                    }
                },
            }

            debug_assert!(
                bot.carrying.len() <= bot.capacity as usize,
                "{} carries {} packages with capacity {}",
                bot.id,
                bot.carrying.len(),
                bot.capacity,
            );
        }

        observer.on_tick_end(now, self.scenario.remaining());
        self.clock = now.next();
        Ok(report)
    }

    /// Convenience accessor for the scenario's completion state.
    pub fn is_complete(&self) -> bool {
        self.scenario.complete()
    }
}
