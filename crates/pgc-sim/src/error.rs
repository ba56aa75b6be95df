//! Error types for simulation operations.

use thiserror::Error;

/// Errors encountered during transient simulation.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Non-physical condition: {what}")]
    NonPhysical { what: &'static str },

    #[error("Convergence failed at t = {t_s:.0} s: {what}")]
    ConvergenceFailed { t_s: f64, what: String },

    #[error("Backend error: {message}")]
    Backend { message: String },
}

pub type SimResult<T> = Result<T, SimError>;

impl From<pgc_solver::SolverError> for SimError {
    fn from(e: pgc_solver::SolverError) -> Self {
        SimError::Backend {
            message: e.to_string(),
        }
    }
}

impl From<pgc_fluids::FluidError> for SimError {
    fn from(e: pgc_fluids::FluidError) -> Self {
        SimError::Backend {
            message: e.to_string(),
        }
    }
}

impl From<pgc_components::ComponentError> for SimError {
    fn from(e: pgc_components::ComponentError) -> Self {
        SimError::Backend {
            message: e.to_string(),
        }
    }
}

impl From<pgc_core::PgcError> for SimError {
    fn from(e: pgc_core::PgcError) -> Self {
        SimError::Backend {
            message: e.to_string(),
        }
    }
}
