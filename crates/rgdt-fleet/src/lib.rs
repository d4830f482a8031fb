//! `rgdt-fleet`: delivery bots, packages, and the per-tick bot decision.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                       |
//! |--------------|----------------------------------------------------------------|
//! | [`package`]  | `Package`, `PackageState`: the package lifecycle               |
//! | [`bot`]      | `Bot`, `BotStats`: carried set, capacity, accumulated cost     |
//! | [`context`]  | `RouteContext<'a, R>`: network + router + path cache borrow    |
//! | [`policy`]   | `DispatchPolicy` trait, `Target`, `GreedyNearest`              |
//! | [`dispatch`] | `calculate_destination`: drop-off, pick-up, target, claim      |
//! | [`movement`] | `step_towards`: advance one way toward a target                |
//! | [`loader`]   | JSON bot/package loader                                        |
//! | [`error`]    | `FleetError`, `FleetResult<T>`                                 |
//!
//! # Design notes
//!
//! Bots and packages live in flat `Vec`s indexed by `BotId` / `PackageId`.
//! Cross references are ids, never shared pointers: a package records the
//! id of the bot that claimed or carries it, and a bot's carried set is a
//! list of package ids.  The caller (rgdt-sim) owns both collections and
//! lends them to one bot at a time with disjoint borrows.

pub mod bot;
pub mod context;
pub mod dispatch;
pub mod error;
pub mod loader;
pub mod movement;
pub mod package;
pub mod policy;

#[cfg(test)]
mod tests;

pub use bot::{Bot, BotStats};
pub use context::RouteContext;
pub use dispatch::{Decision, calculate_destination};
pub use error::{FleetError, FleetResult};
pub use loader::{Fleet, load_fleet_json, load_fleet_reader, load_fleet_str};
pub use movement::{Movement, StepEvent, step_towards};
pub use package::{Package, PackageState};
pub use policy::{DispatchPolicy, GreedyNearest, Target, TargetKind};
