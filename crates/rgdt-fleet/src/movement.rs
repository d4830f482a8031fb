//! One-edge movement toward a target node.

use tracing::debug;

use rgdt_core::{BotId, NodeId, WayId};
use rgdt_spatial::Router;

use crate::{Bot, FleetResult, RouteContext};

/// A single way traversal, emitted once per moving bot per tick.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StepEvent {
    pub bot:  BotId,
    pub from: NodeId,
    pub to:   NodeId,
    pub way:  WayId,
    /// Travel time of the way, in hours.
    pub cost: f64,
}

/// Outcome of [`step_towards`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Movement {
    /// The bot crossed one way.
    Moved(StepEvent),
    /// The bot already stands on the target.
    Holding,
    /// No neighbor has a finite distance to the target.
    Stuck,
}

impl Movement {
    pub fn step(&self) -> Option<&StepEvent> {
        match self {
            Movement::Moved(ev) => Some(ev),
            _ => None,
        }
    }
}

/// Move `bot` across exactly one way toward `target`.
///
/// Uses the cached table of distances *from* `target` (ways are undirected,
/// so these equal distances *to* it) and takes the incident way whose far end
/// is closest to the target.  Ties on distance go to the cheaper way, then to
/// the neighbour fewer ways from the target, then to the way registered
/// first.  The way's cost is added to the bot's accumulated cost.
///
/// Each step strictly lowers the bot's `(distance, hops)` to a reachable
/// target.
pub fn step_towards<R: Router + ?Sized>(
    bot:    &mut Bot,
    target: NodeId,
    ctx:    &mut RouteContext<'_, R>,
) -> FleetResult<Movement> {
    if bot.location == target {
        return Ok(Movement::Holding);
    }

    let network = ctx.network;
    let dists = ctx.distances_from(target)?;

    // (distance, way cost, hops, way, neighbour)
    let mut best: Option<(f64, f64, u32, WayId, NodeId)> = None;
    for (way, next) in network.neighbors(bot.location) {
        let Some(hops) = dists.hops(next) else {
            continue;
        };
        let d = dists.get(next);
        let better = match best {
            None => true,
            Some((bd, bc, bh, _, _)) => {
                d < bd || (d == bd && (way.cost < bc || (way.cost == bc && hops < bh)))
            }
        };
        if better {
            best = Some((d, way.cost, hops, way.id, next));
        }
    }

    let Some((_, cost, _, way, to)) = best else {
        return Ok(Movement::Stuck);
    };

    let from = bot.location;
    bot.location = to;
    bot.accumulated_cost += cost;
    debug!(bot = %bot.id, %from, %to, cost, "step");

    Ok(Movement::Moved(StepEvent { bot: bot.id, from, to, way, cost }))
}
