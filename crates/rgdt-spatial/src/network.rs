//! Road network representation and builder.
//!
//! # Data layout
//!
//! Nodes live in a flat `Vec<Node>`; each node's position in that vector is
//! its *slot*.  External `NodeId`s are resolved to slots through a hash map
//! once per lookup, after which all traversal is index arithmetic.
//!
//! Ways are **undirected**.  Incidence uses **Compressed Sparse Row (CSR)**
//! format: the ways touching slot `s` are
//!
//! ```text
//! incident[ incident_start[s] .. incident_start[s+1] ]
//! ```
//!
//! where each entry is an index into `ways`.  Within a node, ways keep the
//! order in which they were added to the builder, so neighbour iteration is
//! deterministic.

use rgdt_core::{GeoPoint, NodeId, WayId};

use crate::{NodeMap, SpatialError, SpatialResult};

// ── Node / Way ────────────────────────────────────────────────────────────────

/// A location in the road network.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Node {
    pub id:  NodeId,
    pub pos: GeoPoint,
}

/// An undirected road segment with a traversal cost in hours.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Way {
    pub id:   WayId,
    pub ends: (NodeId, NodeId),
    /// Travel time in hours.  Always finite and non-negative.
    pub cost: f64,
}

impl Way {
    /// The endpoint opposite `from`.  For a self-loop this is `from` itself.
    #[inline]
    pub fn other_end(&self, from: NodeId) -> NodeId {
        if self.ends.0 == from { self.ends.1 } else { self.ends.0 }
    }

    #[inline]
    pub fn touches(&self, node: NodeId) -> bool {
        self.ends.0 == node || self.ends.1 == node
    }
}

// ── RoadNetwork ───────────────────────────────────────────────────────────────

/// Undirected road graph in CSR form.
///
/// Immutable once built; use [`RoadNetworkBuilder`] to construct one.
#[derive(Debug)]
pub struct RoadNetwork {
    /// All nodes, indexed by slot.
    pub nodes: Vec<Node>,

    /// All ways, in insertion order.
    pub ways: Vec<Way>,

    /// `NodeId` → slot.
    slots: NodeMap<u32>,

    /// CSR row pointer.  Length = `node_count + 1`.
    incident_start: Vec<u32>,

    /// Way indices grouped by slot.
    incident: Vec<u32>,

    /// Speed the geometric way costs were derived from.
    bot_speed_kmph: f64,
}

impl RoadNetwork {
    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn way_count(&self) -> usize {
        self.ways.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Bot speed (km/h) used to turn way lengths into hours.
    pub fn bot_speed_kmph(&self) -> f64 {
        self.bot_speed_kmph
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    /// Dense slot of `node`, or `None` if it is not part of the network.
    #[inline]
    pub fn slot(&self, node: NodeId) -> Option<usize> {
        self.slots.get(&node).map(|&s| s as usize)
    }

    #[inline]
    pub fn contains(&self, node: NodeId) -> bool {
        self.slots.contains_key(&node)
    }

    pub fn node(&self, node: NodeId) -> Option<&Node> {
        self.slot(node).map(|s| &self.nodes[s])
    }

    /// Like [`slot`](Self::slot) but returns [`SpatialError::NodeNotFound`].
    pub fn require(&self, node: NodeId) -> SpatialResult<usize> {
        self.slot(node).ok_or(SpatialError::NodeNotFound(node))
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// Ways incident to the node at `slot`, in insertion order.
    #[inline]
    pub fn incident_at(&self, slot: usize) -> impl Iterator<Item = &Way> + '_ {
        let start = self.incident_start[slot] as usize;
        let end   = self.incident_start[slot + 1] as usize;
        self.incident[start..end].iter().map(|&w| &self.ways[w as usize])
    }

    /// Ways incident to `node`.  Empty for unknown nodes.
    pub fn incident_ways(&self, node: NodeId) -> impl Iterator<Item = &Way> + '_ {
        let range = match self.slot(node) {
            Some(s) => self.incident_start[s] as usize..self.incident_start[s + 1] as usize,
            None    => 0..0,
        };
        self.incident[range].iter().map(|&w| &self.ways[w as usize])
    }

    /// `(way, neighbour)` pairs reachable in one step from `node`.
    pub fn neighbors(&self, node: NodeId) -> impl Iterator<Item = (&Way, NodeId)> + '_ {
        self.incident_ways(node).map(move |w| (w, w.other_end(node)))
    }

    /// Number of ways touching `node`.
    pub fn degree(&self, node: NodeId) -> usize {
        match self.slot(node) {
            Some(s) => (self.incident_start[s + 1] - self.incident_start[s]) as usize,
            None    => 0,
        }
    }
}

// ── RoadNetworkBuilder ────────────────────────────────────────────────────────

/// Construct a [`RoadNetwork`] incrementally, then call [`build`](Self::build).
///
/// Nodes and ways may be added in any order; endpoint validation happens in
/// `build()`.  Ways added with [`add_way`](Self::add_way) get their cost from
/// the haversine length of the segment divided by the bot speed.
///
/// # Example
///
/// ```
/// use rgdt_core::{GeoPoint, NodeId, WayId};
/// use rgdt_spatial::RoadNetworkBuilder;
///
/// let mut b = RoadNetworkBuilder::new(40.0);
/// b.add_node(NodeId(1), GeoPoint::new(51.50, -0.12));
/// b.add_node(NodeId(2), GeoPoint::new(51.51, -0.12));
/// b.add_way(WayId(10), NodeId(1), NodeId(2));
/// let net = b.build().unwrap();
/// assert_eq!(net.node_count(), 2);
/// assert_eq!(net.degree(NodeId(1)), 1);
/// ```
pub struct RoadNetworkBuilder {
    bot_speed_kmph: f64,
    nodes:          Vec<Node>,
    raw_ways:       Vec<RawWay>,
}

struct RawWay {
    id:   WayId,
    a:    NodeId,
    b:    NodeId,
    /// `None` → derive from geometry at build time.
    cost: Option<f64>,
}

impl RoadNetworkBuilder {
    /// Start a builder whose geometric way costs assume `bot_speed_kmph`.
    pub fn new(bot_speed_kmph: f64) -> Self {
        Self { bot_speed_kmph, nodes: Vec::new(), raw_ways: Vec::new() }
    }

    /// Add a node at `pos`.
    pub fn add_node(&mut self, id: NodeId, pos: GeoPoint) -> &mut Self {
        self.nodes.push(Node { id, pos });
        self
    }

    /// Add an undirected way whose cost is `haversine(a, b) / bot_speed`.
    pub fn add_way(&mut self, id: WayId, a: NodeId, b: NodeId) -> &mut Self {
        self.raw_ways.push(RawWay { id, a, b, cost: None });
        self
    }

    /// Add an undirected way with an explicit cost in hours.
    pub fn add_way_with_cost(&mut self, id: WayId, a: NodeId, b: NodeId, cost: f64) -> &mut Self {
        self.raw_ways.push(RawWay { id, a, b, cost: Some(cost) });
        self
    }

    /// Validate and consume the builder.
    ///
    /// # Errors
    ///
    /// - [`SpatialError::InvalidSpeed`] if the bot speed is not positive.
    /// - [`SpatialError::MalformedGraph`] for duplicate node ids, non-finite
    ///   coordinates, ways referencing unknown nodes, or invalid explicit
    ///   costs.
    pub fn build(self) -> SpatialResult<RoadNetwork> {
        if !(self.bot_speed_kmph.is_finite() && self.bot_speed_kmph > 0.0) {
            return Err(SpatialError::InvalidSpeed(self.bot_speed_kmph));
        }

        let node_count = self.nodes.len();
        let mut slots: NodeMap<u32> = NodeMap::default();
        slots.reserve(node_count);

        for (slot, node) in self.nodes.iter().enumerate() {
            if !node.pos.is_finite() {
                return Err(SpatialError::MalformedGraph(format!(
                    "node {} has non-finite coordinates {}",
                    node.id, node.pos
                )));
            }
            if slots.insert(node.id, slot as u32).is_some() {
                return Err(SpatialError::MalformedGraph(format!(
                    "node {} defined more than once",
                    node.id
                )));
            }
        }

        // Resolve endpoints and costs.
        let mut ways: Vec<Way> = Vec::with_capacity(self.raw_ways.len());
        let mut ends: Vec<(u32, u32)> = Vec::with_capacity(self.raw_ways.len());

        for raw in &self.raw_ways {
            let lookup = |n: NodeId| {
                slots.get(&n).copied().ok_or_else(|| {
                    SpatialError::MalformedGraph(format!(
                        "way {} references unknown node {}",
                        raw.id, n
                    ))
                })
            };
            let sa = lookup(raw.a)?;
            let sb = lookup(raw.b)?;

            let cost = match raw.cost {
                Some(c) if c.is_finite() && c >= 0.0 => c,
                Some(c) => {
                    return Err(SpatialError::MalformedGraph(format!(
                        "way {} has invalid cost {c}",
                        raw.id
                    )));
                }
                None => self.nodes[sa as usize]
                    .pos
                    .travel_hours(self.nodes[sb as usize].pos, self.bot_speed_kmph),
            };

            ways.push(Way { id: raw.id, ends: (raw.a, raw.b), cost });
            ends.push((sa, sb));
        }

        // Build CSR: count incidences per slot, prefix-sum, then fill in
        // insertion order.  A self-loop is registered once.
        let mut incident_start = vec![0u32; node_count + 1];
        for &(sa, sb) in &ends {
            incident_start[sa as usize + 1] += 1;
            if sb != sa {
                incident_start[sb as usize + 1] += 1;
            }
        }
        for i in 1..=node_count {
            incident_start[i] += incident_start[i - 1];
        }

        let mut cursor: Vec<u32> = incident_start[..node_count].to_vec();
        let mut incident = vec![0u32; incident_start[node_count] as usize];
        for (w, &(sa, sb)) in ends.iter().enumerate() {
            incident[cursor[sa as usize] as usize] = w as u32;
            cursor[sa as usize] += 1;
            if sb != sa {
                incident[cursor[sb as usize] as usize] = w as u32;
                cursor[sb as usize] += 1;
            }
        }

        Ok(RoadNetwork {
            nodes: self.nodes,
            ways,
            slots,
            incident_start,
            incident,
            bot_speed_kmph: self.bot_speed_kmph,
        })
    }
}
