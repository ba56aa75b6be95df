//! Error types for the pgc-app service layer.

use std::path::PathBuf;

/// Application error type that wraps errors from the backend crates and
/// gives the CLI one error interface.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Plant file error: {0}")]
    Project(String),

    #[error("Plant file already exists: {path}")]
    PlantFileExists { path: PathBuf },

    #[error("Plant validation failed: {0}")]
    Validation(String),

    #[error("Plant compilation failed: {0}")]
    Compile(String),

    #[error("Design error: {0}")]
    Design(String),

    #[error("Solver error: {0}")]
    Solver(String),

    #[error("Simulation error: {0}")]
    Simulation(String),

    #[error("Results error: {0}")]
    Results(String),

    #[error("Run not found: {0}")]
    RunNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for pgc-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<pgc_project::ProjectError> for AppError {
    fn from(err: pgc_project::ProjectError) -> Self {
        match err {
            pgc_project::ProjectError::Validation(e) => AppError::Validation(e.to_string()),
            other => AppError::Project(other.to_string()),
        }
    }
}

impl From<pgc_project::ValidationError> for AppError {
    fn from(err: pgc_project::ValidationError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<pgc_components::ComponentError> for AppError {
    fn from(err: pgc_components::ComponentError) -> Self {
        AppError::Compile(err.to_string())
    }
}

impl From<pgc_fluids::FluidError> for AppError {
    fn from(err: pgc_fluids::FluidError) -> Self {
        AppError::Compile(err.to_string())
    }
}

impl From<pgc_design::DesignError> for AppError {
    fn from(err: pgc_design::DesignError) -> Self {
        AppError::Design(err.to_string())
    }
}

impl From<pgc_solver::SolverError> for AppError {
    fn from(err: pgc_solver::SolverError) -> Self {
        AppError::Solver(err.to_string())
    }
}

impl From<pgc_sim::SimError> for AppError {
    fn from(err: pgc_sim::SimError) -> Self {
        AppError::Simulation(err.to_string())
    }
}

impl From<pgc_results::ResultsError> for AppError {
    fn from(err: pgc_results::ResultsError) -> Self {
        match err {
            pgc_results::ResultsError::RunNotFound { run_id } => AppError::RunNotFound(run_id),
            other => AppError::Results(other.to_string()),
        }
    }
}
