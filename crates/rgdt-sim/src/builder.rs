//! Fluent builder for constructing a [`Sim`].

use rgdt_core::{SimConfig, Tick};
use rgdt_fleet::{Bot, DispatchPolicy, Fleet, Package};
use rgdt_spatial::{RoadNetwork, Router};

use crate::{Scenario, Sim, SimError, SimResult};

/// Fluent builder for [`Sim<P, R>`].
///
/// # Required inputs
///
/// - [`SimConfig`]: bot speed, delivery handling time, tick limit
/// - [`RoadNetwork`]: built with the same bot speed as the config
/// - `P: DispatchPolicy`: target selection (e.g. [`rgdt_fleet::GreedyNearest`])
/// - `R: Router`: the routing algorithm (e.g. [`rgdt_spatial::DijkstraRouter`])
///
/// # Optional inputs (have defaults)
///
/// | Method          | Default      |
/// |-----------------|--------------|
/// | `.bots(v)`      | No bots      |
/// | `.packages(v)`  | No packages  |
/// | `.fleet(f)`     | Sets both    |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config, network, GreedyNearest, DijkstraRouter)
///     .fleet(fleet)
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<P: DispatchPolicy, R: Router> {
    config:   SimConfig,
    network:  RoadNetwork,
    bots:     Vec<Bot>,
    packages: Vec<Package>,
    policy:   P,
    router:   R,
}

impl<P: DispatchPolicy, R: Router> SimBuilder<P, R> {
    /// Create a builder with all required inputs.
    pub fn new(config: SimConfig, network: RoadNetwork, policy: P, router: R) -> Self {
        Self {
            config,
            network,
            bots:     Vec::new(),
            packages: Vec::new(),
            policy,
            router,
        }
    }

    /// Supply the bots.  Ids must equal list positions.
    pub fn bots(mut self, bots: Vec<Bot>) -> Self {
        self.bots = bots;
        self
    }

    /// Supply the packages.  Ids must equal list positions.
    pub fn packages(mut self, packages: Vec<Package>) -> Self {
        self.packages = packages;
        self
    }

    /// Supply bots and packages from a loaded fleet file.
    ///
    /// The fleet's own `config`, if any, is ignored here; resolve it with
    /// [`Fleet::config_or`] before calling [`SimBuilder::new`].
    pub fn fleet(self, fleet: Fleet) -> Self {
        self.bots(fleet.bots).packages(fleet.packages)
    }

    /// Validate the config and scenario and return a ready-to-run [`Sim`].
    ///
    /// The network must have been built with the config's bot speed, since
    /// reported distances are derived from cost and speed.
    pub fn build(self) -> SimResult<Sim<P, R>> {
        self.config.validate()?;
        if self.network.bot_speed_kmph() != self.config.bot_speed_kmph {
            return Err(SimError::SpeedMismatch {
                config:  self.config.bot_speed_kmph,
                network: self.network.bot_speed_kmph(),
            });
        }
        let scenario = Scenario::new(self.network, self.bots, self.packages)?;

        Ok(Sim {
            config:   self.config,
            clock:    Tick::ZERO,
            scenario,
            policy:   self.policy,
            router:   self.router,
        })
    }
}
