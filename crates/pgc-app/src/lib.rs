//! Shared application service layer for the PGC plant simulator.
//!
//! Centralizes plant file handling, runtime compilation, cached transient
//! runs, result queries, design-point sizing and sweeps for the CLI.

pub mod design_service;
pub mod error;
pub mod progress;
pub mod project_service;
pub mod query;
pub mod run_service;
pub mod runtime_compile;
pub mod sweep_service;

// Re-export key types for convenience
pub use design_service::{DesignRequest, design_point, size_targets};
pub use error::{AppError, AppResult};
pub use progress::{RunProgressEvent, RunStage, TransientProgress};
pub use project_service::{
    PlantSummary, init_plant, load_plant, save_plant, summarize_plant, validate_plant,
};
pub use query::{RunSummary, extract_series, get_run_summary, list_variables};
pub use run_service::{
    RunOptions, RunRequest, RunResponse, RunTimingSummary, ensure_run, ensure_run_with_progress,
    list_runs, load_run, simulate_plant,
};
pub use runtime_compile::{build_components, compile_plant, sim_options};
pub use sweep_service::{
    DesignSweepRow, PlantSweepRow, closest_to_target, design_sweep, evaluate_design_cell,
    plant_sweep,
};
