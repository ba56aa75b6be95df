//! Fluid property errors.

use pgc_core::PgcError;
use thiserror::Error;

/// Result type for fluid operations.
pub type FluidResult<T> = Result<T, FluidError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FluidError {
    /// Non-physical values (negative density, cp, etc.).
    #[error("Non-physical value for {what}")]
    NonPhysical { what: &'static str },

    /// Temperature outside the correlation envelope.
    #[error("Value out of range for {what}: {value:.2} K")]
    OutOfRange { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Unknown fluid: {name}")]
    UnknownFluid { name: String },
}

impl From<FluidError> for PgcError {
    fn from(err: FluidError) -> Self {
        match err {
            FluidError::NonPhysical { what } => PgcError::Invariant { what },
            FluidError::OutOfRange { what, .. } => PgcError::InvalidArg { what },
            FluidError::InvalidArg { what } => PgcError::InvalidArg { what },
            FluidError::UnknownFluid { .. } => PgcError::InvalidArg {
                what: "unknown fluid",
            },
        }
    }
}
