//! Memoized single-source distance tables.
//!
//! Graph topology and way costs never change after the network is built, so
//! a table computed for a source node is valid for the lifetime of the
//! scenario and is never invalidated.  Population is insert-if-absent: a
//! second request for the same source returns the stored table untouched.

use std::collections::hash_map::Entry;

use tracing::trace;

use rgdt_core::NodeId;

use crate::{DistanceTable, NodeMap, RoadNetwork, Router, SpatialResult};

/// Distance tables keyed by source node, plus hit/miss counters.
#[derive(Debug, Default)]
pub struct PathCache {
    tables: NodeMap<DistanceTable>,
    hits:   u64,
    misses: u64,
}

impl PathCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the table for `source`, computing it with `router` on first use.
    ///
    /// # Errors
    ///
    /// Propagates the router's error (unknown source node).  Nothing is
    /// cached on error.
    pub fn get_or_compute<R: Router + ?Sized>(
        &mut self,
        router:  &R,
        network: &RoadNetwork,
        source:  NodeId,
    ) -> SpatialResult<&DistanceTable> {
        match self.tables.entry(source) {
            Entry::Occupied(entry) => {
                self.hits += 1;
                Ok(entry.into_mut())
            }
            Entry::Vacant(slot) => {
                let table = router.shortest_paths(network, source)?;
                self.misses += 1;
                trace!(%source, cached = self.misses, "path cache miss");
                Ok(slot.insert(table))
            }
        }
    }

    /// The table for `source` if it has already been computed.
    pub fn get(&self, source: NodeId) -> Option<&DistanceTable> {
        self.tables.get(&source)
    }

    pub fn contains(&self, source: NodeId) -> bool {
        self.tables.contains_key(&source)
    }

    /// Number of cached sources.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Lookups answered from the cache.
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Lookups that ran a shortest-path search.
    pub fn misses(&self) -> u64 {
        self.misses
    }
}
