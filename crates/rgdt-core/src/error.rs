//! Shared error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]`.

use thiserror::Error;

use crate::PackageId;

/// The base error type shared by every `rgdt-*` crate.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("package {0} not found")]
    PackageNotFound(PackageId),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `rgdt-core`.
pub type CoreResult<T> = Result<T, CoreError>;
