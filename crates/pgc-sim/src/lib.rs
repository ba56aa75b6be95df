//! Transient simulation of the PGC thermoelectric plant.
//!
//! Provides:
//! - Fixed-step RK4 and forward Euler integration of a `TransientModel`
//! - The composed two-loop plant with a Newton solve of the TEG stack
//!   and cold loop closure at every evaluation
//! - Soil temperature and run-total energy states
//! - Recorded snapshots and whole-run summaries

pub mod error;
pub mod integrator;
pub mod model;
pub mod plant;
pub mod sim;
pub mod snapshot;

// Internal modules
mod stack;

// Re-exports for public API
pub use error::{SimError, SimResult};
pub use integrator::{ForwardEuler, Integrator, RK4};
pub use model::TransientModel;
pub use plant::{PlantComponents, PlantPoint, PlantState, PlantSystem};
pub use sim::{IntegratorType, SimOptions, SimProgress, SimRecord, run_sim, run_sim_with_progress};
pub use snapshot::{PlantSnapshot, PlantTrace, TraceSummary};
