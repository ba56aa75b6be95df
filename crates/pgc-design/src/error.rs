//! Error types for design-point calculations.

use pgc_components::ComponentError;
use pgc_core::PgcError;
use pgc_fluids::FluidError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DesignError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Non-physical design point: {what}")]
    NonPhysical { what: &'static str },

    #[error("Fluid error: {0}")]
    Fluid(#[from] FluidError),

    #[error("Component error: {0}")]
    Component(#[from] ComponentError),
}

pub type DesignResult<T> = Result<T, DesignError>;

impl From<DesignError> for PgcError {
    fn from(e: DesignError) -> Self {
        match e {
            DesignError::InvalidArg { what } => PgcError::InvalidArg { what },
            DesignError::NonPhysical { what } => PgcError::Invariant { what },
            DesignError::Fluid(e) => e.into(),
            DesignError::Component(e) => e.into(),
        }
    }
}
