//! `rgdt-spatial`: road network, shortest paths, and the path cache.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`network`] | `RoadNetwork` (nodes + CSR incidence), `RoadNetworkBuilder` |
//! | [`router`]  | `Router` trait, `DistanceTable`, `DijkstraRouter`           |
//! | [`cache`]   | `PathCache`: memoized distance tables keyed by source       |
//! | [`xml`]     | `load_network_xml` (feature = `"xml"` only)                 |
//! | [`error`]   | `SpatialError`, `SpatialResult<T>`                          |
//!
//! # Feature flags
//!
//! | Flag      | Effect                                                     |
//! |-----------|------------------------------------------------------------|
//! | `xml`     | Enables XML network loading via the `quick-xml` crate.     |
//! | `fx-hash` | Uses `rustc-hash` for node-keyed maps.                     |
//! | `serde`   | Derives `Serialize`/`Deserialize` on core types.           |

pub mod cache;
pub mod error;
pub mod network;
pub mod router;

#[cfg(feature = "xml")]
pub mod xml;


pub use cache::PathCache;
pub use error::{SpatialError, SpatialResult};
pub use network::{Node, RoadNetwork, RoadNetworkBuilder, Way};
pub use router::{DijkstraRouter, DistanceTable, Router};

/// Map keyed by `NodeId`.  FxHash with the `fx-hash` feature, SipHash
/// otherwise.
#[cfg(feature = "fx-hash")]
pub type NodeMap<V> = rustc_hash::FxHashMap<rgdt_core::NodeId, V>;

/// Map keyed by `NodeId`.  FxHash with the `fx-hash` feature, SipHash
/// otherwise.
#[cfg(not(feature = "fx-hash"))]
pub type NodeMap<V> = std::collections::HashMap<rgdt_core::NodeId, V>;
