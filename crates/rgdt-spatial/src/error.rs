//! Spatial-subsystem error type.

use thiserror::Error;

use rgdt_core::NodeId;

/// Errors produced by `rgdt-spatial`.
#[derive(Debug, Error)]
pub enum SpatialError {
    /// The graph description is unusable: a way references an unknown node,
    /// a node lacks coordinates, ids collide, or a cost is invalid.
    #[error("malformed graph: {0}")]
    MalformedGraph(String),

    #[error("node {0} not found in network")]
    NodeNotFound(NodeId),

    #[error("bot speed must be a positive number of km/h, got {0}")]
    InvalidSpeed(f64),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "xml")]
    #[error("XML parse error: {0}")]
    Xml(String),
}

pub type SpatialResult<T> = Result<T, SpatialError>;
