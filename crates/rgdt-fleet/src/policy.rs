//! Target selection.

use rgdt_core::{NodeId, PackageId};
use rgdt_spatial::DistanceTable;

use crate::{Bot, Package};

/// Why a bot is heading for a node.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TargetKind {
    /// Go to the package's source and load it.
    Pickup,
    /// Go to the package's destination and deliver it.
    Dropoff,
}

/// The node a bot travels toward this tick, and the package that justifies it.
///
/// `node` and `distance` always describe the same candidate.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Target {
    pub node:     NodeId,
    pub package:  PackageId,
    pub kind:     TargetKind,
    /// Shortest-path cost from the bot's location to `node`, in hours.
    pub distance: f64,
}

/// Chooses where a bot should go next.
///
/// Implementations must be deterministic for a given input and must never
/// return a target at infinite distance.
pub trait DispatchPolicy: Send + Sync + 'static {
    /// `dists` holds shortest-path costs from `bot.location`.  Returns `None`
    /// when the bot has no reachable work.
    fn select_target(&self, bot: &Bot, packages: &[Package], dists: &DistanceTable) -> Option<Target>;
}

/// Nearest reachable candidate wins.
///
/// Candidates are packages the bot could still collect (unmoved, or claimed
/// by this bot, while it has spare capacity) measured to their source, and
/// packages the bot carries measured to their destination.  Ties go to the
/// lower package id.
#[derive(Copy, Clone, Debug, Default)]
pub struct GreedyNearest;

impl DispatchPolicy for GreedyNearest {
    fn select_target(&self, bot: &Bot, packages: &[Package], dists: &DistanceTable) -> Option<Target> {
        let can_load = bot.has_capacity();
        let mut best: Option<Target> = None;

        for pkg in packages {
            let (node, kind) = if can_load && pkg.is_available_to(bot.id) {
                (pkg.source, TargetKind::Pickup)
            } else if pkg.is_carried_by(bot.id) {
                (pkg.destination, TargetKind::Dropoff)
            } else {
                continue;
            };

            let distance = dists.get(node);
            if !distance.is_finite() {
                continue;
            }
            if best.is_none_or(|b| distance < b.distance) {
                best = Some(Target { node, package: pkg.id, kind, distance });
            }
        }
        best
    }
}
