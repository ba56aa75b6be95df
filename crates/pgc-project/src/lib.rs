//! pgc-project: plant file format and validation.

pub mod schema;
pub mod validate;

pub use schema::*;
pub use validate::{ValidationError, validate_plant_file};

use std::path::Path;

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn load_yaml(path: &Path) -> ProjectResult<PlantFile> {
    let content = std::fs::read_to_string(path)?;
    let plant: PlantFile = serde_yaml::from_str(&content)?;
    validate_plant_file(&plant)?;
    Ok(plant)
}

pub fn save_yaml(path: &Path, plant: &PlantFile) -> ProjectResult<()> {
    validate_plant_file(plant)?;
    let content = serde_yaml::to_string(plant)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &Path) -> ProjectResult<PlantFile> {
    let content = std::fs::read_to_string(path)?;
    let plant: PlantFile = serde_json::from_str(&content)?;
    validate_plant_file(&plant)?;
    Ok(plant)
}

pub fn save_json(path: &Path, plant: &PlantFile) -> ProjectResult<()> {
    validate_plant_file(plant)?;
    let content = serde_json::to_string_pretty(plant)?;
    std::fs::write(path, content)?;
    Ok(())
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Load a plant file, choosing JSON or YAML by extension.
pub fn load_plant(path: &Path) -> ProjectResult<PlantFile> {
    if is_json(path) {
        load_json(path)
    } else {
        load_yaml(path)
    }
}

/// Save a plant file, choosing JSON or YAML by extension.
pub fn save_plant(path: &Path, plant: &PlantFile) -> ProjectResult<()> {
    if is_json(path) {
        save_json(path, plant)
    } else {
        save_yaml(path, plant)
    }
}
