use rgdt_core::{CoreError, NodeId, Tick};
use rgdt_fleet::FleetError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(#[from] CoreError),

    #[error("road network was built for {network} km/h but the config says {config} km/h")]
    SpeedMismatch { config: f64, network: f64 },

    #[error("{what} {index} refers to node {node}, which is not in the road network")]
    UnknownNode {
        what:  &'static str,
        index: usize,
        node:  NodeId,
    },

    #[error("{what} at position {index} has id {got}; ids must be assigned in list order")]
    IdMismatch {
        what:  &'static str,
        index: usize,
        got:   u32,
    },

    #[error("no bot can make progress at {tick}; {remaining} package(s) undelivered")]
    NoReachableWork { tick: Tick, remaining: usize },

    #[error("tick limit {limit} reached with {remaining} package(s) undelivered")]
    TickLimitExceeded { limit: u64, remaining: usize },

    #[error("fleet error: {0}")]
    Fleet(#[from] FleetError),
}

pub type SimResult<T> = Result<T, SimError>;
