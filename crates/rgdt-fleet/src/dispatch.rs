//! The per-tick bot decision: unload, load, pick a target, claim it.

use tracing::debug;

use rgdt_core::{PackageId, SimConfig};
use rgdt_spatial::Router;

use crate::bot::package_mut;
use crate::{Bot, DispatchPolicy, FleetResult, Package, PackageState, RouteContext, Target};

/// Everything one call to [`calculate_destination`] did.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Decision {
    /// Packages delivered at the bot's current node.
    pub delivered: Vec<PackageId>,
    /// Packages loaded at the bot's current node.
    pub picked_up: Vec<PackageId>,
    /// Where to go next.  `None` means the bot has no reachable work.
    pub target:    Option<Target>,
    /// Set when the chosen target was unmoved and has just been claimed.
    pub claimed:   Option<PackageId>,
}

impl Decision {
    /// `true` if any package changed state during this decision.
    pub fn changed_packages(&self) -> bool {
        !self.delivered.is_empty() || !self.picked_up.is_empty() || self.claimed.is_some()
    }
}

/// Run one bot's decision for this tick.
///
/// In order: deliver carried packages due at the current node, load
/// collectable packages at the current node while capacity remains, select
/// the nearest reachable candidate with `policy`, and claim it if it is still
/// unmoved.
///
/// # Errors
///
/// Routing errors (the bot stands on a node missing from the network) and
/// package lifecycle violations, which indicate corrupted state.
pub fn calculate_destination<P, R>(
    bot:      &mut Bot,
    packages: &mut [Package],
    ctx:      &mut RouteContext<'_, R>,
    policy:   &P,
    config:   &SimConfig,
) -> FleetResult<Decision>
where
    P: DispatchPolicy + ?Sized,
    R: Router + ?Sized,
{
    let delivered = bot.drop_off(packages, config)?;
    let picked_up = bot.pick_up(packages)?;

    let target = {
        let dists = ctx.distances_from(bot.location)?;
        policy.select_target(bot, packages, dists)
    };

    let mut claimed = None;
    if let Some(t) = target {
        let pkg = package_mut(packages, t.package)?;
        if pkg.state == PackageState::Unmoved {
            pkg.claim(bot.id)?;
            claimed = Some(pkg.id);
            debug!(bot = %bot.id, package = %pkg.id, node = %t.node, "claimed");
        }
    }

    Ok(Decision { delivered, picked_up, target, claimed })
}
