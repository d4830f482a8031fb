use rgdt_core::{BotId, CoreError, PackageId};
use rgdt_spatial::SpatialError;
use thiserror::Error;

use crate::PackageState;

#[derive(Debug, Error)]
pub enum FleetError {
    #[error("package {package} cannot move from {from:?} to {to:?} for bot {bot}")]
    IllegalTransition {
        package: PackageId,
        bot:     BotId,
        from:    PackageState,
        to:      PackageState,
    },

    #[error("bot {bot} is full (capacity {capacity})")]
    CapacityExceeded { bot: BotId, capacity: u32 },

    #[error("fleet parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("routing failed: {0}")]
    Routing(#[from] SpatialError),
}

pub type FleetResult<T> = Result<T, FleetError>;
