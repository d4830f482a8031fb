//! `rgdt-core`: foundational types for the `rgdt` delivery fleet simulator.
//!
//! This crate is a dependency of every other `rgdt-*` crate.  It has no
//! `rgdt-*` dependencies and minimal external ones (only `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `NodeId`, `WayId`, `BotId`, `PackageId`               |
//! | [`geo`]         | `GeoPoint`, haversine distance in kilometres          |
//! | [`time`]        | `Tick`                                                |
//! | [`config`]      | `SimConfig` (bot speed, delivery handling, tick cap)  |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::SimConfig;
pub use error::{CoreError, CoreResult};
pub use geo::GeoPoint;
pub use ids::{BotId, NodeId, PackageId, WayId};
pub use time::Tick;
