//! Routing state lent to the per-bot decision functions.

use rgdt_core::NodeId;
use rgdt_spatial::{DistanceTable, PathCache, RoadNetwork, Router, SpatialResult};

/// The immutable graph, the shortest-path backend, and the mutable path cache,
/// borrowed together for one bot's turn.
///
/// `RouteContext` is rebuilt by rgdt-sim for each bot.  The cache is the only
/// mutable piece: distance tables are computed lazily on first lookup and
/// then reused for the rest of the run.
pub struct RouteContext<'a, R: Router + ?Sized> {
    pub network: &'a RoadNetwork,
    pub router:  &'a R,
    pub cache:   &'a mut PathCache,
}

impl<'a, R: Router + ?Sized> RouteContext<'a, R> {
    #[inline]
    pub fn new(network: &'a RoadNetwork, router: &'a R, cache: &'a mut PathCache) -> Self {
        Self { network, router, cache }
    }

    /// Shortest-path distances from `source` to every node, cached.
    pub fn distances_from(&mut self, source: NodeId) -> SpatialResult<&DistanceTable> {
        self.cache.get_or_compute(self.router, self.network, source)
    }
}
