//! `rgdt-sim`: the scenario aggregate and the tick loop.
//!
//! # Tick loop
//!
//! ```text
//! until every package is delivered:
//!   for bot in ascending BotId order:
//!     ① Decide: deliver due packages, load packages at this node,
//!                pick the nearest reachable target, claim it.
//!     ② Move:   cross one way toward the target (or idle / hold).
//!   stop with NoReachableWork if nothing moved and nothing changed;
//!   stop with TickLimitExceeded after config.max_ticks ticks.
//! ```
//!
//! # Cargo features
//!
//! | Feature   | Effect                                                 |
//! |-----------|--------------------------------------------------------|
//! | `fx-hash` | FxHash for node-keyed maps in rgdt-spatial.            |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use rgdt_core::SimConfig;
//! use rgdt_fleet::GreedyNearest;
//! use rgdt_sim::{NoopObserver, SimBuilder};
//! use rgdt_spatial::DijkstraRouter;
//!
//! let mut sim = SimBuilder::new(SimConfig::default(), network, GreedyNearest, DijkstraRouter)
//!     .fleet(fleet)
//!     .build()?;
//! let ticks = sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod scenario;
pub mod sim;


pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use scenario::Scenario;
pub use sim::{Sim, TickReport};
