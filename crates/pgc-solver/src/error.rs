//! Error types for solver operations.

use pgc_components::ComponentError;
use pgc_core::error::PgcError;
use pgc_fluids::FluidError;
use thiserror::Error;

/// Errors that can occur while solving the algebraic plant equations.
#[derive(Error, Debug)]
pub enum SolverError {
    #[error("Problem setup error: {what}")]
    ProblemSetup { what: String },

    #[error("Convergence failed: {what}")]
    ConvergenceFailed { what: String },

    #[error("Component error: {0}")]
    Component(#[from] ComponentError),

    #[error("Fluid error: {0}")]
    Fluid(#[from] FluidError),

    #[error("Numeric error: {what}")]
    Numeric { what: String },
}

pub type SolverResult<T> = Result<T, SolverError>;

impl From<SolverError> for PgcError {
    fn from(e: SolverError) -> Self {
        match e {
            SolverError::ProblemSetup { .. } => PgcError::InvalidArg {
                what: "problem setup",
            },
            SolverError::ConvergenceFailed { .. } => PgcError::Invariant {
                what: "convergence failed",
            },
            SolverError::Component(e) => e.into(),
            SolverError::Fluid(e) => e.into(),
            SolverError::Numeric { .. } => PgcError::Invariant {
                what: "numeric error",
            },
        }
    }
}
