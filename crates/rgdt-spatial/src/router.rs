//! Shortest-path trait and default Dijkstra implementation.
//!
//! # Pluggability
//!
//! Callers compute distances through the [`Router`] trait, so a different
//! search (A*, contraction hierarchies) can be swapped in without touching
//! the dispatch logic.  The default [`DijkstraRouter`] is single-source and
//! returns a complete [`DistanceTable`].
//!
//! # Cost units
//!
//! All costs are travel times in **hours** (`f64`).  Unreachable nodes have
//! distance `f64::INFINITY`.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use rgdt_core::NodeId;

use crate::network::RoadNetwork;
use crate::{NodeMap, SpatialResult};

// ── DistanceTable ─────────────────────────────────────────────────────────────

/// Shortest travel time from one source node to every node in the network.
///
/// Because ways are undirected, the same table also gives the distance from
/// every node *to* the source.
///
/// Alongside each distance the table keeps the number of ways on the path
/// that achieves it, taking the fewest ways among equal-cost paths.  Zero-cost
/// ways leave distances flat, and hop counts break those ties.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceTable {
    source: NodeId,
    dist:   NodeMap<(f64, u32)>,
}

impl DistanceTable {
    pub fn source(&self) -> NodeId {
        self.source
    }

    /// Distance in hours from the source to `node`.
    ///
    /// Returns `f64::INFINITY` for unreachable nodes and for ids that are not
    /// part of the network.
    #[inline]
    pub fn get(&self, node: NodeId) -> f64 {
        self.dist.get(&node).map_or(f64::INFINITY, |&(d, _)| d)
    }

    /// Ways on the shortest path from the source to `node`, or `None` if it
    /// is unreachable.
    #[inline]
    pub fn hops(&self, node: NodeId) -> Option<u32> {
        self.dist
            .get(&node)
            .filter(|(d, _)| d.is_finite())
            .map(|&(_, h)| h)
    }

    #[inline]
    pub fn is_reachable(&self, node: NodeId) -> bool {
        self.get(node).is_finite()
    }

    /// Number of entries (equals the network's node count).
    pub fn len(&self) -> usize {
        self.dist.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dist.is_empty()
    }

    /// `(node, distance)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, f64)> + '_ {
        self.dist.iter().map(|(&n, &(d, _))| (n, d))
    }
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable single-source shortest-path engine.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync` so a scenario can be handed to
/// another thread together with its router.
pub trait Router: Send + Sync {
    /// Distances from `source` to every node of `network`.
    ///
    /// # Errors
    ///
    /// [`SpatialError::NodeNotFound`][crate::SpatialError::NodeNotFound] if
    /// `source` is not in the network.
    fn shortest_paths(&self, network: &RoadNetwork, source: NodeId) -> SpatialResult<DistanceTable>;
}

// ── DijkstraRouter ────────────────────────────────────────────────────────────

/// Standard Dijkstra's algorithm with a binary heap, O(E log V).
///
/// Nodes are marked finished when popped; ways leading to finished nodes are
/// not relaxed.  Parallel ways are all relaxed, so the cheapest one wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct DijkstraRouter;

impl Router for DijkstraRouter {
    fn shortest_paths(&self, network: &RoadNetwork, source: NodeId) -> SpatialResult<DistanceTable> {
        dijkstra(network, source)
    }
}

// ── Dijkstra internals ────────────────────────────────────────────────────────

/// Heap entry ordered so that `BinaryHeap` (a max-heap) pops the smallest
/// `(cost, hops)` first.  Slot is a final key so ordering is total.
#[derive(Copy, Clone, Debug)]
struct QueueEntry {
    cost: f64,
    hops: u32,
    slot: u32,
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.hops.cmp(&self.hops))
            .then_with(|| other.slot.cmp(&self.slot))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueEntry {}

fn dijkstra(network: &RoadNetwork, source: NodeId) -> SpatialResult<DistanceTable> {
    let src = network.require(source)?;

    let n = network.node_count();
    let mut dist     = vec![f64::INFINITY; n];
    let mut hops     = vec![u32::MAX; n];
    let mut finished = vec![false; n];

    dist[src] = 0.0;
    hops[src] = 0;

    let mut heap = BinaryHeap::with_capacity(n);
    heap.push(QueueEntry { cost: 0.0, hops: 0, slot: src as u32 });

    while let Some(QueueEntry { cost, hops: h, slot }) = heap.pop() {
        let slot = slot as usize;
        if finished[slot] {
            continue;
        }
        finished[slot] = true;

        let here = network.nodes[slot].id;
        for way in network.incident_at(slot) {
            // Every way endpoint was resolved by the builder.
            let Some(next) = network.slot(way.other_end(here)) else {
                continue;
            };
            if finished[next] {
                continue;
            }

            let candidate = cost + way.cost;
            let candidate_hops = h + 1;
            if candidate < dist[next] || (candidate == dist[next] && candidate_hops < hops[next]) {
                dist[next] = candidate;
                hops[next] = candidate_hops;
                heap.push(QueueEntry { cost: candidate, hops: candidate_hops, slot: next as u32 });
            }
        }
    }

    let mut table: NodeMap<(f64, u32)> = NodeMap::default();
    table.reserve(n);
    for ((node, d), h) in network.nodes.iter().zip(dist).zip(hops) {
        table.insert(node.id, (d, h));
    }

    Ok(DistanceTable { source, dist: table })
}
