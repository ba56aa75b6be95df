//! Build runtime plant models from a plant file.

use pgc_components::{
    Burner, DryCooler, GroundLoop, HeatExchanger, HeatRejection, Pipe, Pump, TegArray,
    lookup_module,
};
use pgc_core::units::constants::SECONDS_PER_DAY;
use pgc_core::units::{k, kgps, m, pa};
use pgc_fluids::FluidKind;
use pgc_project::{IntegratorDef, LoopDef, MAX_STEPS, PlantFile, RejectionDef, SimulationDef};
use pgc_sim::{IntegratorType, PlantComponents, PlantSystem, SimOptions};

use crate::error::AppResult;

/// Compile a plant file into a ready-to-run plant.
pub fn compile_plant(plant: &PlantFile) -> AppResult<PlantSystem> {
    let parts = build_components(plant)?;
    Ok(PlantSystem::new(parts)?)
}

pub fn build_components(plant: &PlantFile) -> AppResult<PlantComponents> {
    let b = &plant.burner;
    let burner = Burner::new(
        "burner".to_string(),
        b.fuel_mcf_per_day,
        b.efficiency,
        k(b.setpoint_k),
    )?;

    let (hot_pipe, hot_pump, hot_fluid) = build_loop("hot", &plant.hot_loop)?;
    let (cold_pipe, cold_pump, cold_fluid) = build_loop("cold", &plant.cold_loop)?;

    let module = lookup_module(&plant.teg.module)?;
    let n = plant.teg.count;
    let teg = TegArray::from_module("teg_array".to_string(), module, n)?;
    let hot_hx = HeatExchanger::new(
        "hot_hx".to_string(),
        plant.teg.hot_hx_ua_per_unit_w_per_k,
        n,
    )?;
    let cold_hx = HeatExchanger::new(
        "cold_hx".to_string(),
        plant.teg.cold_hx_ua_per_unit_w_per_k,
        n,
    )?;

    Ok(PlantComponents {
        burner,
        hot_pipe,
        hot_hx,
        hot_pump,
        hot_fluid,
        teg,
        cold_hx,
        cold_pipe,
        rejection: build_rejection(&plant.rejection)?,
        cold_pump,
        cold_fluid,
        cold_supply_guess: k(plant.simulation.cold_supply_guess_k),
    })
}

fn build_loop(prefix: &str, def: &LoopDef) -> AppResult<(Pipe, Pump, FluidKind)> {
    let fluid = FluidKind::parse(&def.fluid)?;
    let pipe = Pipe::new(
        format!("{prefix}_pipe"),
        m(def.pipe_length_m),
        m(def.pipe_diameter_m),
        def.pipe_u_w_per_m2k,
        k(def.pipe_ambient_k),
    )?;
    let pump = Pump::new(
        format!("{prefix}_pump"),
        kgps(def.mass_flow_kg_s),
        pa(def.pump_delta_p_pa),
        def.pump_efficiency,
    )?;
    Ok((pipe, pump, fluid))
}

pub fn build_rejection(def: &RejectionDef) -> AppResult<HeatRejection> {
    let rejection = match def {
        RejectionDef::GroundLoop {
            borehole_count,
            depth_m,
            resistance_m_k_per_w,
            influence_radius_m,
            soil_heat_capacity_j_per_m3k,
            undisturbed_k,
            recharge_w_per_k,
        } => HeatRejection::GroundLoop(GroundLoop::new(
            "ground_loop".to_string(),
            *borehole_count,
            m(*depth_m),
            *resistance_m_k_per_w,
            m(*influence_radius_m),
            *soil_heat_capacity_j_per_m3k,
            k(*undisturbed_k),
            *recharge_w_per_k,
        )?),
        RejectionDef::DryCooler {
            ua_w_per_k,
            ambient_mean_k,
            ambient_amplitude_k,
            peak_day,
            fan_power_per_watt,
        } => HeatRejection::DryCooler(DryCooler::new(
            "dry_cooler".to_string(),
            *ua_w_per_k,
            k(*ambient_mean_k),
            *ambient_amplitude_k,
            *peak_day,
            *fan_power_per_watt,
        )?),
    };
    Ok(rejection)
}

/// Integration options for a simulation section.
pub fn sim_options(def: &SimulationDef) -> SimOptions {
    SimOptions {
        dt: def.dt_s,
        t_end: def.duration_days * SECONDS_PER_DAY,
        max_steps: MAX_STEPS,
        record_every: def.record_every,
        integrator: match def.integrator {
            IntegratorDef::Rk4 => IntegratorType::RK4,
            IntegratorDef::ForwardEuler => IntegratorType::ForwardEuler,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_file_compiles_to_reference_plant() {
        let plant = PlantFile::reference("ref");
        let parts = build_components(&plant).unwrap();
        let reference = PlantComponents::reference().unwrap();

        assert_eq!(parts.teg.unit_count, reference.teg.unit_count);
        assert_eq!(parts.hot_hx.ua(), reference.hot_hx.ua());
        assert_eq!(parts.burner.thermal_power(), reference.burner.thermal_power());
        assert_eq!(
            parts.rejection.initial_soil_temperature(),
            reference.rejection.initial_soil_temperature()
        );
        assert_eq!(parts.cold_pump.mass_flow, reference.cold_pump.mass_flow);
    }

    #[test]
    fn dry_cooler_section_builds_dry_cooler() {
        let mut plant = PlantFile::reference("dry");
        plant.rejection = RejectionDef::default_dry_cooler();
        let parts = build_components(&plant).unwrap();
        assert!(matches!(parts.rejection, HeatRejection::DryCooler(_)));
    }

    #[test]
    fn simulation_section_maps_to_options() {
        let def = SimulationDef {
            dt_s: 600.0,
            duration_days: 2.0,
            record_every: 6,
            integrator: IntegratorDef::ForwardEuler,
            cold_supply_guess_k: 310.0,
        };
        let opts = sim_options(&def);
        assert_eq!(opts.dt, 600.0);
        assert_eq!(opts.t_end, 172_800.0);
        assert_eq!(opts.record_every, 6);
        assert_eq!(opts.integrator, IntegratorType::ForwardEuler);
        assert_eq!(opts.planned_steps(), 288);
        assert_eq!(opts.max_steps, MAX_STEPS);
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn oversized_plan_fails_instead_of_truncating() {
        let def = SimulationDef {
            dt_s: 1.0,
            duration_days: 30.0,
            ..SimulationDef::default()
        };
        let opts = sim_options(&def);
        assert_eq!(opts.planned_steps(), 2_592_000);
        assert!(opts.validate().is_err());
    }
}
