//! Content-based hashing for run IDs.

use pgc_project::PlantFile;
use sha2::{Digest, Sha256};

pub fn compute_run_id(
    plant: &PlantFile,
    run_type: &crate::types::RunType,
    solver_version: &str,
) -> String {
    let mut hasher = Sha256::new();

    let plant_json = serde_json::to_string(plant).unwrap_or_default();
    hasher.update(plant_json.as_bytes());

    let run_type_json = serde_json::to_string(run_type).unwrap_or_default();
    hasher.update(run_type_json.as_bytes());

    hasher.update(solver_version.as_bytes());

    let result = hasher.finalize();
    format!("{:x}", result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RunType;

    fn hourly_year() -> RunType {
        RunType::Transient {
            dt_s: 3600.0,
            t_end_s: 3.1536e7,
            steps: 8760,
            record_every: 1,
            integrator: "rk4".to_string(),
        }
    }

    #[test]
    fn hash_stability() {
        let plant = PlantFile::reference("Test");
        let hash1 = compute_run_id(&plant, &hourly_year(), "v1");
        let hash2 = compute_run_id(&plant, &hourly_year(), "v1");
        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), 64);
    }

    #[test]
    fn hash_differs_for_different_inputs() {
        let plant1 = PlantFile::reference("Test");
        let mut plant2 = PlantFile::reference("Test");
        plant2.burner.fuel_mcf_per_day = 21.0;

        let hash1 = compute_run_id(&plant1, &hourly_year(), "v1");
        let hash2 = compute_run_id(&plant2, &hourly_year(), "v1");
        assert_ne!(hash1, hash2);

        let hash3 = compute_run_id(&plant1, &hourly_year(), "v2");
        assert_ne!(hash1, hash3);
    }
}
