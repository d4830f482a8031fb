//! The owning aggregate of everything a run mutates.

use rgdt_core::{BotId, NodeId, PackageId, SimConfig};
use rgdt_fleet::{Bot, BotStats, Fleet, Package};
use rgdt_spatial::{PathCache, RoadNetwork};

use crate::{SimError, SimResult};

/// Road network, bots, packages, and the path cache, owned together.
///
/// Bots and packages are stored in id order so `BotId::index()` and
/// `PackageId::index()` address them directly.  Cross references between the
/// two are ids only.  The network is never mutated once the scenario exists,
/// which is what lets the path cache live for the whole run.
#[derive(Debug)]
pub struct Scenario {
    pub network:  RoadNetwork,
    pub bots:     Vec<Bot>,
    pub packages: Vec<Package>,
    pub cache:    PathCache,
}

impl Scenario {
    /// Validate ids and node references and assemble a scenario.
    ///
    /// # Errors
    ///
    /// [`SimError::IdMismatch`] if a bot or package id differs from its
    /// position; [`SimError::UnknownNode`] if a bot location or package
    /// endpoint is not in `network`.
    pub fn new(network: RoadNetwork, bots: Vec<Bot>, packages: Vec<Package>) -> SimResult<Self> {
        for (i, bot) in bots.iter().enumerate() {
            if bot.id.index() != i {
                return Err(SimError::IdMismatch { what: "bot", index: i, got: bot.id.0 });
            }
            check_node(&network, "bot", i, bot.location)?;
        }
        for (i, pkg) in packages.iter().enumerate() {
            if pkg.id.index() != i {
                return Err(SimError::IdMismatch { what: "package", index: i, got: pkg.id.0 });
            }
            check_node(&network, "package source", i, pkg.source)?;
            check_node(&network, "package destination", i, pkg.destination)?;
        }
        Ok(Self { network, bots, packages, cache: PathCache::new() })
    }

    /// Shorthand for [`Scenario::new`] with a loaded [`Fleet`].
    pub fn from_fleet(network: RoadNetwork, fleet: Fleet) -> SimResult<Self> {
        Self::new(network, fleet.bots, fleet.packages)
    }

    /// `true` once every package is delivered.  Vacuously true with no packages.
    pub fn complete(&self) -> bool {
        self.packages.iter().all(Package::is_delivered)
    }

    /// Number of packages not yet delivered.
    pub fn remaining(&self) -> usize {
        self.packages.iter().filter(|p| !p.is_delivered()).count()
    }

    pub fn bot(&self, id: BotId) -> Option<&Bot> {
        self.bots.get(id.index())
    }

    pub fn package(&self, id: PackageId) -> Option<&Package> {
        self.packages.get(id.index())
    }

    /// Per-bot final statistics, in bot order.
    pub fn bot_stats(&self, config: &SimConfig) -> Vec<BotStats> {
        self.bots.iter().map(|b| b.stats(config)).collect()
    }

    /// Total delivery count across all bots.
    pub fn total_deliveries(&self) -> u32 {
        self.bots.iter().map(|b| b.num_deliveries).sum()
    }
}

fn check_node(network: &RoadNetwork, what: &'static str, index: usize, node: NodeId) -> SimResult<()> {
    if network.contains(node) {
        Ok(())
    } else {
        Err(SimError::UnknownNode { what, index, node })
    }
}
