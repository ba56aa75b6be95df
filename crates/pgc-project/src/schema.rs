//! Plant file schema.
//!
//! Every section defaults to the reference plant, so a file only needs the
//! fields it changes:
//!
//! ```yaml
//! version: 1
//! name: Wellpad 7
//! burner:
//!   fuel_mcf_per_day: 25.0
//! rejection:
//!   type: DryCooler
//!   ua_w_per_k: 12000.0
//! ```

use serde::{Deserialize, Serialize};

pub const LATEST_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlantFile {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub burner: BurnerDef,
    #[serde(default)]
    pub hot_loop: LoopDef,
    #[serde(default)]
    pub cold_loop: LoopDef,
    #[serde(default)]
    pub teg: TegDef,
    #[serde(default)]
    pub rejection: RejectionDef,
    #[serde(default)]
    pub simulation: SimulationDef,
}

impl PlantFile {
    /// The reference plant under a new name.
    pub fn reference(name: impl Into<String>) -> Self {
        Self {
            version: LATEST_VERSION,
            name: name.into(),
            burner: BurnerDef::default(),
            hot_loop: LoopDef::default(),
            cold_loop: LoopDef::default(),
            teg: TegDef::default(),
            rejection: RejectionDef::default(),
            simulation: SimulationDef::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BurnerDef {
    pub fuel_mcf_per_day: f64,
    pub efficiency: f64,
    /// Hot loop supply temperature the burner holds
    pub setpoint_k: f64,
}

impl Default for BurnerDef {
    fn default() -> Self {
        Self {
            fuel_mcf_per_day: 20.0,
            efficiency: 0.88,
            setpoint_k: 473.15,
        }
    }
}

/// One fluid loop: its fluid, the run of pipe and the circulating pump.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoopDef {
    pub fluid: String,
    pub pipe_length_m: f64,
    pub pipe_diameter_m: f64,
    /// Pipe wall heat-loss coefficient (W/m^2/K)
    pub pipe_u_w_per_m2k: f64,
    pub pipe_ambient_k: f64,
    pub mass_flow_kg_s: f64,
    pub pump_delta_p_pa: f64,
    pub pump_efficiency: f64,
}

impl Default for LoopDef {
    fn default() -> Self {
        Self {
            fluid: "water_glycol".to_string(),
            pipe_length_m: 30.0,
            pipe_diameter_m: 0.038,
            pipe_u_w_per_m2k: 0.5,
            pipe_ambient_k: 293.15,
            mass_flow_kg_s: 4.0,
            pump_delta_p_pa: 150_000.0,
            pump_efficiency: 0.65,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TegDef {
    /// Catalog key of the module (`marlow`, `thermonamic`, `alphabet`)
    pub module: String,
    pub count: usize,
    pub hot_hx_ua_per_unit_w_per_k: f64,
    pub cold_hx_ua_per_unit_w_per_k: f64,
}

impl Default for TegDef {
    fn default() -> Self {
        Self {
            module: "marlow".to_string(),
            count: 1620,
            hot_hx_ua_per_unit_w_per_k: 8.0,
            cold_hx_ua_per_unit_w_per_k: 8.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum RejectionDef {
    GroundLoop {
        #[serde(default = "default_borehole_count")]
        borehole_count: usize,
        #[serde(default = "default_borehole_depth_m")]
        depth_m: f64,
        /// Borehole thermal resistance per metre (m K/W)
        #[serde(default = "default_borehole_resistance")]
        resistance_m_k_per_w: f64,
        #[serde(default = "default_influence_radius_m")]
        influence_radius_m: f64,
        /// Volumetric heat capacity of the soil (J/m^3/K)
        #[serde(default = "default_soil_heat_capacity")]
        soil_heat_capacity_j_per_m3k: f64,
        #[serde(default = "default_undisturbed_k")]
        undisturbed_k: f64,
        /// Conductance back to the undisturbed far field (W/K)
        #[serde(default, skip_serializing_if = "Option::is_none")]
        recharge_w_per_k: Option<f64>,
    },
    DryCooler {
        #[serde(default = "default_dry_cooler_ua")]
        ua_w_per_k: f64,
        #[serde(default = "default_ambient_mean_k")]
        ambient_mean_k: f64,
        #[serde(default = "default_ambient_amplitude_k")]
        ambient_amplitude_k: f64,
        /// Day of year with the warmest air
        #[serde(default = "default_peak_day")]
        peak_day: f64,
        #[serde(default = "default_fan_power_per_watt")]
        fan_power_per_watt: f64,
    },
}

impl Default for RejectionDef {
    fn default() -> Self {
        RejectionDef::GroundLoop {
            borehole_count: default_borehole_count(),
            depth_m: default_borehole_depth_m(),
            resistance_m_k_per_w: default_borehole_resistance(),
            influence_radius_m: default_influence_radius_m(),
            soil_heat_capacity_j_per_m3k: default_soil_heat_capacity(),
            undisturbed_k: default_undisturbed_k(),
            recharge_w_per_k: None,
        }
    }
}

impl RejectionDef {
    pub fn default_dry_cooler() -> Self {
        RejectionDef::DryCooler {
            ua_w_per_k: default_dry_cooler_ua(),
            ambient_mean_k: default_ambient_mean_k(),
            ambient_amplitude_k: default_ambient_amplitude_k(),
            peak_day: default_peak_day(),
            fan_power_per_watt: default_fan_power_per_watt(),
        }
    }
}

fn default_borehole_count() -> usize {
    21
}

fn default_borehole_depth_m() -> f64 {
    150.0
}

fn default_borehole_resistance() -> f64 {
    0.2
}

fn default_influence_radius_m() -> f64 {
    3.0
}

fn default_soil_heat_capacity() -> f64 {
    2.2e6
}

fn default_undisturbed_k() -> f64 {
    285.15
}

fn default_dry_cooler_ua() -> f64 {
    10_000.0
}

fn default_ambient_mean_k() -> f64 {
    288.15
}

fn default_ambient_amplitude_k() -> f64 {
    10.0
}

fn default_peak_day() -> f64 {
    200.0
}

fn default_fan_power_per_watt() -> f64 {
    0.015
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum IntegratorDef {
    #[default]
    Rk4,
    ForwardEuler,
}

/// Largest number of time steps one run may take.
pub const MAX_STEPS: usize = 1_000_000;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimulationDef {
    pub dt_s: f64,
    pub duration_days: f64,
    pub record_every: usize,
    pub integrator: IntegratorDef,
    /// Starting guess for the cold supply temperature
    pub cold_supply_guess_k: f64,
}

impl Default for SimulationDef {
    fn default() -> Self {
        Self {
            dt_s: 3600.0,
            duration_days: 365.0,
            record_every: 1,
            integrator: IntegratorDef::Rk4,
            cold_supply_guess_k: 313.15,
        }
    }
}

impl SimulationDef {
    /// Steps needed to cover the duration, the last one possibly short.
    pub fn planned_steps(&self) -> f64 {
        (self.duration_days * 86_400.0 / self.dt_s).ceil()
    }
}
