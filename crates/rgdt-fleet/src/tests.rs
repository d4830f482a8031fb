//! Unit tests for rgdt-fleet.

#[cfg(test)]
mod helpers {
    use rgdt_core::{BotId, GeoPoint, NodeId, PackageId, WayId};
    use rgdt_spatial::{RoadNetwork, RoadNetworkBuilder};

    use crate::{Bot, Package};

    /// `1 ──1.0── 2 ──1.0── 3`, plus an isolated node 9.
    pub fn path_network() -> RoadNetwork {
        let mut b = RoadNetworkBuilder::new(40.0);
        for (id, lon) in [(1, 0.0), (2, 0.01), (3, 0.02), (9, 1.0)] {
            b.add_node(NodeId(id), GeoPoint::new(0.0, lon));
        }
        b.add_way_with_cost(WayId(12), NodeId(1), NodeId(2), 1.0);
        b.add_way_with_cost(WayId(23), NodeId(2), NodeId(3), 1.0);
        b.build().unwrap()
    }

    /// `1 ── 2 ── 3 ── 4`, all on one spot, so every way costs nothing.
    pub fn flat_chain() -> RoadNetwork {
        let mut b = RoadNetworkBuilder::new(40.0);
        for id in [1, 2, 3, 4] {
            b.add_node(NodeId(id), GeoPoint::new(30.0, -88.0));
        }
        b.add_way(WayId(12), NodeId(1), NodeId(2));
        b.add_way(WayId(23), NodeId(2), NodeId(3));
        b.add_way(WayId(34), NodeId(3), NodeId(4));
        b.build().unwrap()
    }

    /// Square where both neighbors of 1 are equally far from 3:
    ///
    /// ```text
    ///   1 ──0.5── 2
    ///   │         │
    ///  1.5       1.0
    ///   │         │
    ///   4 ──1.0── 3
    /// ```
    pub fn square_network() -> RoadNetwork {
        let mut b = RoadNetworkBuilder::new(40.0);
        for (id, lat, lon) in [(1, 0.0, 0.0), (2, 0.0, 0.01), (3, 0.01, 0.01), (4, 0.01, 0.0)] {
            b.add_node(NodeId(id), GeoPoint::new(lat, lon));
        }
        b.add_way_with_cost(WayId(12), NodeId(1), NodeId(2), 0.5);
        b.add_way_with_cost(WayId(23), NodeId(2), NodeId(3), 1.0);
        b.add_way_with_cost(WayId(34), NodeId(3), NodeId(4), 1.0);
        b.add_way_with_cost(WayId(41), NodeId(4), NodeId(1), 1.5);
        b.build().unwrap()
    }

    pub fn bot(id: u32, at: u64, capacity: u32) -> Bot {
        Bot::new(BotId(id), NodeId(at), capacity)
    }

    pub fn package(id: u32, source: u64, destination: u64) -> Package {
        Package::new(PackageId(id), NodeId(source), NodeId(destination))
    }
}

// ── Package lifecycle ─────────────────────────────────────────────────────────

#[cfg(test)]
mod package {
    use rgdt_core::BotId;

    use super::helpers::package;
    use crate::{FleetError, PackageState};

    #[test]
    fn states_are_ordered() {
        assert!(PackageState::Unmoved < PackageState::Claimed);
        assert!(PackageState::Claimed < PackageState::PickedUp);
        assert!(PackageState::PickedUp < PackageState::Delivered);
    }

    #[test]
    fn full_lifecycle() {
        let mut p = package(0, 1, 2);
        p.claim(BotId(0)).unwrap();
        assert_eq!(p.state, PackageState::Claimed);
        assert_eq!(p.claimed_by, Some(BotId(0)));
        p.pick_up(BotId(0)).unwrap();
        assert!(p.is_carried_by(BotId(0)));
        p.deliver(BotId(0)).unwrap();
        assert!(p.is_delivered());
    }

    #[test]
    fn pick_up_unclaimed_skips_claim() {
        let mut p = package(0, 1, 2);
        p.pick_up(BotId(3)).unwrap();
        assert_eq!(p.state, PackageState::PickedUp);
        assert_eq!(p.claimed_by, Some(BotId(3)));
    }

    #[test]
    fn claimed_package_is_reserved() {
        let mut p = package(0, 1, 2);
        p.claim(BotId(0)).unwrap();
        assert!(p.is_available_to(BotId(0)));
        assert!(!p.is_available_to(BotId(1)));
        assert!(matches!(
            p.pick_up(BotId(1)),
            Err(FleetError::IllegalTransition { from: PackageState::Claimed, to: PackageState::PickedUp, .. })
        ));
        assert!(p.claim(BotId(1)).is_err());
    }

    #[test]
    fn delivered_never_regresses() {
        let mut p = package(0, 1, 2);
        p.pick_up(BotId(0)).unwrap();
        p.deliver(BotId(0)).unwrap();
        assert!(p.claim(BotId(0)).is_err());
        assert!(p.pick_up(BotId(0)).is_err());
        assert!(p.deliver(BotId(0)).is_err());
        assert_eq!(p.state, PackageState::Delivered);
    }

    #[test]
    fn only_carrier_delivers() {
        let mut p = package(0, 1, 2);
        p.pick_up(BotId(0)).unwrap();
        assert!(p.deliver(BotId(1)).is_err());
        assert_eq!(p.state, PackageState::PickedUp);
    }

    #[test]
    fn cannot_deliver_unpicked() {
        let mut p = package(0, 1, 2);
        assert!(p.deliver(BotId(0)).is_err());
    }
}

// ── Bot ───────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod bot {
    use rgdt_core::{NodeId, PackageId, SimConfig};

    use super::helpers::{bot, package};
    use crate::{FleetError, PackageState};

    #[test]
    fn load_respects_capacity() {
        let mut b = bot(0, 1, 1);
        b.load(PackageId(0)).unwrap();
        assert!(!b.has_capacity());
        assert!(matches!(b.load(PackageId(1)), Err(FleetError::CapacityExceeded { capacity: 1, .. })));
        assert_eq!(b.carrying.len(), 1);
    }

    #[test]
    fn unload_missing_is_false() {
        let mut b = bot(0, 1, 2);
        b.load(PackageId(4)).unwrap();
        assert!(!b.unload(PackageId(5)));
        assert!(b.unload(PackageId(4)));
        assert!(b.carrying.is_empty());
    }

    #[test]
    fn pick_up_stops_at_capacity() {
        let mut b = bot(0, 1, 2);
        let mut pkgs = vec![package(0, 1, 2), package(1, 1, 3), package(2, 1, 3)];
        let loaded = b.pick_up(&mut pkgs).unwrap();
        assert_eq!(loaded, vec![PackageId(0), PackageId(1)]);
        assert_eq!(pkgs[2].state, PackageState::Unmoved);
        assert_eq!(b.spare_capacity(), 0);
    }

    #[test]
    fn pick_up_ignores_packages_claimed_by_others() {
        let mut b = bot(1, 1, 2);
        let mut pkgs = vec![package(0, 1, 2)];
        pkgs[0].claim(rgdt_core::BotId(0)).unwrap();
        assert!(b.pick_up(&mut pkgs).unwrap().is_empty());
        assert_eq!(pkgs[0].claimed_by, Some(rgdt_core::BotId(0)));
    }

    #[test]
    fn drop_off_adds_handling_time() {
        let cfg = SimConfig::default();
        let mut b = bot(0, 1, 2);
        let mut pkgs = vec![package(0, 1, 2), package(1, 1, 3)];
        b.pick_up(&mut pkgs).unwrap();

        b.location = NodeId(2);
        let delivered = b.drop_off(&mut pkgs, &cfg).unwrap();
        assert_eq!(delivered, vec![PackageId(0)]);
        assert_eq!(b.num_deliveries, 1);
        assert_eq!(b.accumulated_cost, cfg.delivery_time_hours);
        assert_eq!(b.carrying, vec![PackageId(1)]);
        assert!(pkgs[0].is_delivered());
    }

    #[test]
    fn stats_derive_distance() {
        let cfg = SimConfig::default();
        let mut b = bot(0, 1, 1);
        b.accumulated_cost = 4.0;
        b.num_deliveries = 1;
        let s = b.stats(&cfg);
        assert_eq!(s.distance_km, (4.0 - cfg.delivery_time_hours) * cfg.bot_speed_kmph);
        assert_eq!(s.deliveries, 1);
    }
}

// ── Target selection ──────────────────────────────────────────────────────────

#[cfg(test)]
mod policy {
    use rgdt_core::{BotId, NodeId, PackageId};
    use rgdt_spatial::{DijkstraRouter, Router};

    use super::helpers::{bot, package, path_network};
    use crate::{DispatchPolicy, GreedyNearest, TargetKind};

    #[test]
    fn nearest_pickup_wins() {
        let net = path_network();
        let dists = DijkstraRouter.shortest_paths(&net, NodeId(1)).unwrap();
        let b = bot(0, 1, 1);
        let pkgs = vec![package(0, 3, 1), package(1, 2, 1)];

        let t = GreedyNearest.select_target(&b, &pkgs, &dists).unwrap();
        assert_eq!(t.package, PackageId(1));
        assert_eq!(t.node, NodeId(2));
        assert_eq!(t.kind, TargetKind::Pickup);
        assert_eq!(t.distance, 1.0);
    }

    #[test]
    fn tie_keeps_lower_package() {
        let net = path_network();
        let dists = DijkstraRouter.shortest_paths(&net, NodeId(2)).unwrap();
        let b = bot(0, 2, 1);
        let pkgs = vec![package(0, 3, 2), package(1, 1, 2)];

        let t = GreedyNearest.select_target(&b, &pkgs, &dists).unwrap();
        assert_eq!(t.package, PackageId(0));
    }

    #[test]
    fn full_bot_only_considers_dropoffs() {
        let net = path_network();
        let dists = DijkstraRouter.shortest_paths(&net, NodeId(1)).unwrap();
        let mut b = bot(0, 1, 1);
        let mut pkgs = vec![package(0, 1, 3), package(1, 2, 1)];
        b.pick_up(&mut pkgs).unwrap();

        let t = GreedyNearest.select_target(&b, &pkgs, &dists).unwrap();
        assert_eq!(t.package, PackageId(0));
        assert_eq!(t.kind, TargetKind::Dropoff);
        assert_eq!(t.node, NodeId(3));
        assert_eq!(t.distance, 2.0);
    }

    #[test]
    fn no_candidates_is_none() {
        let net = path_network();
        let dists = DijkstraRouter.shortest_paths(&net, NodeId(1)).unwrap();
        let b = bot(1, 1, 1);
        let mut pkgs = vec![package(0, 2, 3)];
        pkgs[0].claim(BotId(0)).unwrap();

        assert!(GreedyNearest.select_target(&b, &pkgs, &dists).is_none());
        assert!(GreedyNearest.select_target(&b, &[], &dists).is_none());
    }

    #[test]
    fn unreachable_candidates_are_skipped() {
        let net = path_network();
        let dists = DijkstraRouter.shortest_paths(&net, NodeId(1)).unwrap();
        let b = bot(0, 1, 1);
        let pkgs = vec![package(0, 9, 1), package(1, 3, 1)];

        let t = GreedyNearest.select_target(&b, &pkgs, &dists).unwrap();
        assert_eq!(t.package, PackageId(1));

        let only_unreachable = vec![package(0, 9, 1)];
        assert!(GreedyNearest.select_target(&b, &only_unreachable, &dists).is_none());
    }
}

// ── calculate_destination ─────────────────────────────────────────────────────

#[cfg(test)]
mod dispatch {
    use rgdt_core::{BotId, NodeId, PackageId, SimConfig};
    use rgdt_spatial::{DijkstraRouter, PathCache};

    use super::helpers::{bot, package, path_network};
    use crate::{GreedyNearest, PackageState, RouteContext, TargetKind, calculate_destination};

    #[test]
    fn picks_up_then_targets_destination() {
        let net = path_network();
        let mut cache = PathCache::new();
        let mut ctx = RouteContext::new(&net, &DijkstraRouter, &mut cache);
        let cfg = SimConfig::default();

        let mut b = bot(0, 1, 1);
        let mut pkgs = vec![package(0, 1, 3)];
        let d = calculate_destination(&mut b, &mut pkgs, &mut ctx, &GreedyNearest, &cfg).unwrap();

        assert_eq!(d.picked_up, vec![PackageId(0)]);
        assert!(d.delivered.is_empty());
        assert_eq!(d.claimed, None);
        let t = d.target.unwrap();
        assert_eq!(t.node, NodeId(3));
        assert_eq!(t.kind, TargetKind::Dropoff);
        assert_eq!(pkgs[0].state, PackageState::PickedUp);
    }

    #[test]
    fn claims_remote_package() {
        let net = path_network();
        let mut cache = PathCache::new();
        let mut ctx = RouteContext::new(&net, &DijkstraRouter, &mut cache);
        let cfg = SimConfig::default();

        let mut b = bot(0, 1, 1);
        let mut pkgs = vec![package(0, 3, 1)];
        let d = calculate_destination(&mut b, &mut pkgs, &mut ctx, &GreedyNearest, &cfg).unwrap();

        assert_eq!(d.claimed, Some(PackageId(0)));
        assert_eq!(pkgs[0].state, PackageState::Claimed);
        assert_eq!(pkgs[0].claimed_by, Some(BotId(0)));
        assert!(d.changed_packages());
    }

    #[test]
    fn second_bot_gets_no_target() {
        let net = path_network();
        let mut cache = PathCache::new();
        let cfg = SimConfig::default();
        let mut bots = vec![bot(0, 1, 1), bot(1, 1, 1)];
        let mut pkgs = vec![package(0, 1, 2)];

        for b in &mut bots {
            let mut ctx = RouteContext::new(&net, &DijkstraRouter, &mut cache);
            calculate_destination(b, &mut pkgs, &mut ctx, &GreedyNearest, &cfg).unwrap();
        }
        assert_eq!(pkgs[0].claimed_by, Some(BotId(0)));
        assert!(bots[1].carrying.is_empty());

        let mut ctx = RouteContext::new(&net, &DijkstraRouter, &mut cache);
        let d = calculate_destination(&mut bots[1], &mut pkgs, &mut ctx, &GreedyNearest, &cfg).unwrap();
        assert!(d.target.is_none());
        assert!(!d.changed_packages());
    }

    #[test]
    fn delivers_before_choosing() {
        let net = path_network();
        let mut cache = PathCache::new();
        let mut ctx = RouteContext::new(&net, &DijkstraRouter, &mut cache);
        let cfg = SimConfig::default();

        let mut b = bot(0, 1, 1);
        let mut pkgs = vec![package(0, 1, 2), package(1, 2, 3)];
        b.pick_up(&mut pkgs).unwrap();
        b.location = NodeId(2);

        let d = calculate_destination(&mut b, &mut pkgs, &mut ctx, &GreedyNearest, &cfg).unwrap();
        assert_eq!(d.delivered, vec![PackageId(0)]);
        // Freed capacity is used immediately at the same node.
        assert_eq!(d.picked_up, vec![PackageId(1)]);
        assert_eq!(d.target.unwrap().node, NodeId(3));
    }

    #[test]
    fn reuses_cached_tables() {
        let net = path_network();
        let mut cache = PathCache::new();
        let cfg = SimConfig::default();
        let mut b = bot(0, 1, 1);
        let mut pkgs = vec![package(0, 3, 1)];

        for _ in 0..3 {
            let mut ctx = RouteContext::new(&net, &DijkstraRouter, &mut cache);
            calculate_destination(&mut b, &mut pkgs, &mut ctx, &GreedyNearest, &cfg).unwrap();
        }
        assert_eq!(cache.misses(), 1);
        assert_eq!(cache.hits(), 2);
    }
}

// ── step_towards ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod movement {
    use rgdt_core::{NodeId, WayId};
    use rgdt_spatial::{DijkstraRouter, PathCache};

    use super::helpers::{bot, flat_chain, path_network, square_network};
    use crate::{Movement, RouteContext, step_towards};

    #[test]
    fn moves_one_way_at_a_time() {
        let net = path_network();
        let mut cache = PathCache::new();
        let mut ctx = RouteContext::new(&net, &DijkstraRouter, &mut cache);
        let mut b = bot(0, 1, 1);

        let m = step_towards(&mut b, NodeId(3), &mut ctx).unwrap();
        let ev = *m.step().unwrap();
        assert_eq!((ev.from, ev.to, ev.way, ev.cost), (NodeId(1), NodeId(2), WayId(12), 1.0));
        assert_eq!(b.location, NodeId(2));
        assert_eq!(b.accumulated_cost, 1.0);

        step_towards(&mut b, NodeId(3), &mut ctx).unwrap();
        assert_eq!(b.location, NodeId(3));
        assert_eq!(b.accumulated_cost, 2.0);
    }

    #[test]
    fn at_target_holds() {
        let net = path_network();
        let mut cache = PathCache::new();
        let mut ctx = RouteContext::new(&net, &DijkstraRouter, &mut cache);
        let mut b = bot(0, 2, 1);

        assert_eq!(step_towards(&mut b, NodeId(2), &mut ctx).unwrap(), Movement::Holding);
        assert_eq!(b.accumulated_cost, 0.0);
    }

    #[test]
    fn unreachable_target_is_stuck() {
        let net = path_network();
        let mut cache = PathCache::new();
        let mut ctx = RouteContext::new(&net, &DijkstraRouter, &mut cache);
        let mut b = bot(0, 1, 1);

        assert_eq!(step_towards(&mut b, NodeId(9), &mut ctx).unwrap(), Movement::Stuck);
        assert_eq!(b.location, NodeId(1));
    }

    #[test]
    fn equal_neighbors_prefer_cheaper_way() {
        let net = square_network();
        let mut cache = PathCache::new();
        let mut ctx = RouteContext::new(&net, &DijkstraRouter, &mut cache);
        let mut b = bot(0, 1, 1);

        // Both neighbors are 1.0 from node 3; way 1-2 costs 0.5, way 4-1 costs 1.5.
        let m = step_towards(&mut b, NodeId(3), &mut ctx).unwrap();
        assert_eq!(m.step().unwrap().to, NodeId(2));
        assert_eq!(b.accumulated_cost, 0.5);
    }

    #[test]
    fn zero_cost_chain_advances_every_step() {
        let net = flat_chain();
        let mut cache = PathCache::new();
        let mut ctx = RouteContext::new(&net, &DijkstraRouter, &mut cache);
        let mut b = bot(0, 1, 1);

        // From 2, way 1-2 comes first and ties on distance and cost; hops send the bot on to 3.
        let mut path = Vec::new();
        while let Movement::Moved(ev) = step_towards(&mut b, NodeId(4), &mut ctx).unwrap() {
            path.push(ev.to);
            assert!(path.len() <= 3, "wandered: {path:?}");
        }
        assert_eq!(path, [NodeId(2), NodeId(3), NodeId(4)]);
        assert_eq!(b.accumulated_cost, 0.0);
    }

    #[test]
    fn unknown_target_errors() {
        let net = path_network();
        let mut cache = PathCache::new();
        let mut ctx = RouteContext::new(&net, &DijkstraRouter, &mut cache);
        let mut b = bot(0, 1, 1);

        assert!(step_towards(&mut b, NodeId(404), &mut ctx).is_err());
    }
}

// ── Loader ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader {
    use std::io::Write;

    use rgdt_core::{BotId, NodeId, PackageId, SimConfig};

    use crate::{FleetError, load_fleet_json, load_fleet_str};

    const FLEET: &str = r#"{
        "bots":     [ { "location": 1, "capacity": 2 }, { "location": 5, "capacity": 1 } ],
        "packages": [ { "source": 1, "destination": 3 } ]
    }"#;

    #[test]
    fn assigns_ids_in_order() {
        let f = load_fleet_str(FLEET).unwrap();
        assert_eq!(f.bots.len(), 2);
        assert_eq!(f.bots[1].id, BotId(1));
        assert_eq!(f.bots[1].location, NodeId(5));
        assert_eq!(f.bots[0].capacity, 2);
        assert_eq!(f.packages[0].id, PackageId(0));
        assert_eq!(f.packages[0].destination, NodeId(3));
        assert!(f.config.is_none());
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let json = r#"{ "bots": [], "packages": [], "config": { "bot_speed_kmph": 25.0 } }"#;
        let f = load_fleet_str(json).unwrap();
        let cfg = f.config_or(SimConfig::default());
        assert_eq!(cfg.bot_speed_kmph, 25.0);
        assert_eq!(cfg.max_ticks, SimConfig::default().max_ticks);
    }

    #[test]
    fn invalid_config_rejected() {
        let json = r#"{ "bots": [], "packages": [], "config": { "bot_speed_kmph": 0.0 } }"#;
        assert!(matches!(load_fleet_str(json), Err(FleetError::Core(_))));
    }

    #[test]
    fn zero_capacity_rejected() {
        let json = r#"{ "bots": [ { "location": 1, "capacity": 0 } ], "packages": [] }"#;
        assert!(matches!(load_fleet_str(json), Err(FleetError::Parse(_))));
    }

    #[test]
    fn malformed_json_is_parse_error() {
        assert!(matches!(load_fleet_str("{ \"bots\": "), Err(FleetError::Parse(_))));
    }

    #[test]
    fn reads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(FLEET.as_bytes()).unwrap();
        let f = load_fleet_json(file.path()).unwrap();
        assert_eq!(f.bots.len(), 2);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(load_fleet_json(&dir.path().join("nope.json")), Err(FleetError::Io(_))));
    }
}
