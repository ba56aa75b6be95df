//! Error types for component operations.

use pgc_core::error::PgcError;
use pgc_fluids::FluidError;
use thiserror::Error;

/// Errors that can occur during component calculations.
#[derive(Error, Debug, Clone)]
pub enum ComponentError {
    #[error("Non-physical value: {what}")]
    NonPhysical { what: &'static str },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Unknown TEG module: {name}")]
    UnknownModule { name: String },

    #[error("Backend error: {message}")]
    Backend { message: String },
}

pub type ComponentResult<T> = Result<T, ComponentError>;

impl From<FluidError> for ComponentError {
    fn from(e: FluidError) -> Self {
        ComponentError::Backend {
            message: format!("Fluid model error: {}", e),
        }
    }
}

impl From<PgcError> for ComponentError {
    fn from(e: PgcError) -> Self {
        match e {
            PgcError::NonFinite { what, .. } => ComponentError::NonPhysical { what },
            PgcError::InvalidArg { what } => ComponentError::InvalidArg { what },
            PgcError::Invariant { what } => ComponentError::NonPhysical { what },
        }
    }
}

impl From<ComponentError> for PgcError {
    fn from(e: ComponentError) -> Self {
        match e {
            ComponentError::NonPhysical { what } => PgcError::InvalidArg { what },
            ComponentError::InvalidArg { what } => PgcError::InvalidArg { what },
            ComponentError::UnknownModule { .. } => PgcError::InvalidArg {
                what: "unknown TEG module",
            },
            ComponentError::Backend { message: _ } => PgcError::InvalidArg {
                what: "backend error",
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ComponentError::NonPhysical { what: "density" };
        assert!(err.to_string().contains("density"));
    }

    #[test]
    fn error_conversion() {
        let comp_err = ComponentError::InvalidArg { what: "test" };
        let core_err: PgcError = comp_err.into();
        assert!(matches!(core_err, PgcError::InvalidArg { .. }));

        let fluid_err = FluidError::NonPhysical { what: "cp" };
        let comp_err: ComponentError = fluid_err.into();
        assert!(comp_err.to_string().contains("Fluid model error"));
    }
}
