//! Plant file loading, saving, validation, and introspection.

use std::path::Path;

use pgc_project::{PlantFile, RejectionDef};
use tracing::info;

use crate::error::{AppError, AppResult};

/// Summary of a plant file for listing.
#[derive(Debug, Clone)]
pub struct PlantSummary {
    pub name: String,
    pub fuel_mcf_per_day: f64,
    pub setpoint_k: f64,
    pub teg_module: String,
    pub teg_count: usize,
    pub rejection: String,
    pub duration_days: f64,
    pub dt_s: f64,
}

/// Load a plant file (YAML or JSON by extension) and validate it.
pub fn load_plant(path: &Path) -> AppResult<PlantFile> {
    Ok(pgc_project::load_plant(path)?)
}

/// Validate and save a plant file.
pub fn save_plant(path: &Path, plant: &PlantFile) -> AppResult<()> {
    Ok(pgc_project::save_plant(path, plant)?)
}

pub fn validate_plant(plant: &PlantFile) -> AppResult<()> {
    Ok(pgc_project::validate_plant_file(plant)?)
}

/// Write the reference plant to a new file.
pub fn init_plant(path: &Path, name: &str) -> AppResult<PlantFile> {
    if path.exists() {
        return Err(AppError::PlantFileExists {
            path: path.to_path_buf(),
        });
    }
    let plant = PlantFile::reference(name);
    save_plant(path, &plant)?;
    info!(path = %path.display(), "wrote reference plant");
    Ok(plant)
}

pub fn summarize_plant(plant: &PlantFile) -> PlantSummary {
    let rejection = match &plant.rejection {
        RejectionDef::GroundLoop {
            borehole_count,
            depth_m,
            ..
        } => format!("ground loop, {borehole_count} x {depth_m} m"),
        RejectionDef::DryCooler { ua_w_per_k, .. } => format!("dry cooler, UA {ua_w_per_k} W/K"),
    };
    PlantSummary {
        name: plant.name.clone(),
        fuel_mcf_per_day: plant.burner.fuel_mcf_per_day,
        setpoint_k: plant.burner.setpoint_k,
        teg_module: plant.teg.module.clone(),
        teg_count: plant.teg.count,
        rejection,
        duration_days: plant.simulation.duration_days,
        dt_s: plant.simulation.dt_s,
    }
}
