//! Plant file validation.

use crate::schema::{LATEST_VERSION, LoopDef, MAX_STEPS, PlantFile, RejectionDef};
use pgc_components::lookup_module;
use pgc_fluids::FluidKind;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unknown {kind}: {name}")]
    UnknownName { kind: String, name: String },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

fn invalid(field: &str, value: impl ToString, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn positive(field: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, value, "must be positive"))
    }
}

fn non_negative(field: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, value, "must be non-negative"))
    }
}

fn fraction(field: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(invalid(field, value, "must be in (0, 1]"))
    }
}

pub fn validate_plant_file(plant: &PlantFile) -> Result<(), ValidationError> {
    if plant.version == 0 || plant.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: plant.version,
        });
    }

    non_negative("burner.fuel_mcf_per_day", plant.burner.fuel_mcf_per_day)?;
    fraction("burner.efficiency", plant.burner.efficiency)?;
    positive("burner.setpoint_k", plant.burner.setpoint_k)?;

    validate_loop("hot_loop", &plant.hot_loop)?;
    validate_loop("cold_loop", &plant.cold_loop)?;

    lookup_module(&plant.teg.module).map_err(|_| ValidationError::UnknownName {
        kind: "TEG module".to_string(),
        name: plant.teg.module.clone(),
    })?;
    if plant.teg.count == 0 {
        return Err(invalid("teg.count", 0, "must be positive"));
    }
    positive(
        "teg.hot_hx_ua_per_unit_w_per_k",
        plant.teg.hot_hx_ua_per_unit_w_per_k,
    )?;
    positive(
        "teg.cold_hx_ua_per_unit_w_per_k",
        plant.teg.cold_hx_ua_per_unit_w_per_k,
    )?;

    validate_rejection(&plant.rejection)?;

    let sim = &plant.simulation;
    positive("simulation.dt_s", sim.dt_s)?;
    positive("simulation.duration_days", sim.duration_days)?;
    if sim.record_every == 0 {
        return Err(invalid("simulation.record_every", 0, "must be positive"));
    }
    if sim.dt_s > sim.duration_days * 86_400.0 {
        return Err(invalid(
            "simulation.dt_s",
            sim.dt_s,
            "longer than the simulated duration",
        ));
    }
    if sim.planned_steps() > MAX_STEPS as f64 {
        return Err(invalid(
            "simulation.dt_s",
            sim.dt_s,
            &format!("needs more than {MAX_STEPS} steps for the duration"),
        ));
    }
    positive("simulation.cold_supply_guess_k", sim.cold_supply_guess_k)?;
    if sim.cold_supply_guess_k >= plant.burner.setpoint_k {
        return Err(invalid(
            "simulation.cold_supply_guess_k",
            sim.cold_supply_guess_k,
            "must be below the burner set point",
        ));
    }

    Ok(())
}

fn validate_loop(name: &str, def: &LoopDef) -> Result<(), ValidationError> {
    FluidKind::parse(&def.fluid).map_err(|_| ValidationError::UnknownName {
        kind: format!("{name} fluid"),
        name: def.fluid.clone(),
    })?;
    positive(&format!("{name}.pipe_length_m"), def.pipe_length_m)?;
    positive(&format!("{name}.pipe_diameter_m"), def.pipe_diameter_m)?;
    non_negative(&format!("{name}.pipe_u_w_per_m2k"), def.pipe_u_w_per_m2k)?;
    positive(&format!("{name}.pipe_ambient_k"), def.pipe_ambient_k)?;
    positive(&format!("{name}.mass_flow_kg_s"), def.mass_flow_kg_s)?;
    non_negative(&format!("{name}.pump_delta_p_pa"), def.pump_delta_p_pa)?;
    fraction(&format!("{name}.pump_efficiency"), def.pump_efficiency)?;
    Ok(())
}

fn validate_rejection(def: &RejectionDef) -> Result<(), ValidationError> {
    match def {
        RejectionDef::GroundLoop {
            borehole_count,
            depth_m,
            resistance_m_k_per_w,
            influence_radius_m,
            soil_heat_capacity_j_per_m3k,
            undisturbed_k,
            recharge_w_per_k,
        } => {
            if *borehole_count == 0 {
                return Err(invalid("rejection.borehole_count", 0, "must be positive"));
            }
            positive("rejection.depth_m", *depth_m)?;
            positive("rejection.resistance_m_k_per_w", *resistance_m_k_per_w)?;
            positive("rejection.influence_radius_m", *influence_radius_m)?;
            positive(
                "rejection.soil_heat_capacity_j_per_m3k",
                *soil_heat_capacity_j_per_m3k,
            )?;
            positive("rejection.undisturbed_k", *undisturbed_k)?;
            if let Some(g) = recharge_w_per_k {
                non_negative("rejection.recharge_w_per_k", *g)?;
            }
        }
        RejectionDef::DryCooler {
            ua_w_per_k,
            ambient_mean_k,
            ambient_amplitude_k,
            peak_day,
            fan_power_per_watt,
        } => {
            positive("rejection.ua_w_per_k", *ua_w_per_k)?;
            positive("rejection.ambient_mean_k", *ambient_mean_k)?;
            non_negative("rejection.ambient_amplitude_k", *ambient_amplitude_k)?;
            if ambient_amplitude_k >= ambient_mean_k {
                return Err(invalid(
                    "rejection.ambient_amplitude_k",
                    ambient_amplitude_k,
                    "exceeds the mean temperature",
                ));
            }
            if !peak_day.is_finite() {
                return Err(invalid("rejection.peak_day", peak_day, "must be finite"));
            }
            non_negative("rejection.fan_power_per_watt", *fan_power_per_watt)?;
        }
    }
    Ok(())
}
