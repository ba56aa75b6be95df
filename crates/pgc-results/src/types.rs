//! Result data types.

use serde::{Deserialize, Serialize};

pub type RunId = String;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunManifest {
    pub run_id: RunId,
    pub plant_name: String,
    pub timestamp: String,
    pub run_type: RunType,
    pub solver_version: String,
}

impl RunManifest {
    /// Manifest stamped with the current UTC time.
    pub fn new(
        run_id: RunId,
        plant_name: impl Into<String>,
        run_type: RunType,
        solver_version: impl Into<String>,
    ) -> Self {
        Self {
            run_id,
            plant_name: plant_name.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            run_type,
            solver_version: solver_version.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum RunType {
    Transient {
        dt_s: f64,
        t_end_s: f64,
        steps: usize,
        record_every: usize,
        integrator: String,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimeseriesRecord {
    pub time_s: f64,
    pub temperatures: TemperatureSnapshot,
    pub heat_flows: HeatFlowSnapshot,
    pub electrical: ElectricalSnapshot,
    pub performance: PerformanceSnapshot,
}

/// Loop and stack temperatures (K).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct TemperatureSnapshot {
    pub hot_supply_k: f64,
    pub hot_hx_inlet_k: f64,
    pub hot_return_k: f64,
    pub teg_hot_face_k: f64,
    pub teg_cold_face_k: f64,
    pub cold_supply_k: f64,
    pub cold_hx_outlet_k: f64,
    pub cold_return_k: f64,
    pub soil_k: f64,
    pub sink_k: f64,
}

/// Thermal power through each stage (W).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct HeatFlowSnapshot {
    pub fuel_power_w: f64,
    pub burner_thermal_w: f64,
    pub burner_duty_w: f64,
    pub firing_margin_w: f64,
    pub hot_pipe_loss_w: f64,
    pub teg_heat_in_w: f64,
    pub teg_heat_out_w: f64,
    pub cold_pipe_loss_w: f64,
    pub heat_rejected_w: f64,
}

/// Generation and parasitic loads (W).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ElectricalSnapshot {
    pub teg_power_w: f64,
    pub hot_pump_w: f64,
    pub cold_pump_w: f64,
    pub fan_w: f64,
    pub net_power_w: f64,
    pub net_after_fans_w: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PerformanceSnapshot {
    pub teg_efficiency: f64,
    pub cop: f64,
    pub efficiency: f64,
    #[serde(default)]
    pub over_temperature: bool,
}

/// Names accepted by [`TimeseriesRecord::value`], in CSV column order.
pub const VARIABLES: &[&str] = &[
    "hot_supply_k",
    "hot_hx_inlet_k",
    "hot_return_k",
    "teg_hot_face_k",
    "teg_cold_face_k",
    "cold_supply_k",
    "cold_hx_outlet_k",
    "cold_return_k",
    "soil_k",
    "sink_k",
    "fuel_power_w",
    "burner_thermal_w",
    "burner_duty_w",
    "firing_margin_w",
    "hot_pipe_loss_w",
    "teg_heat_in_w",
    "teg_heat_out_w",
    "cold_pipe_loss_w",
    "heat_rejected_w",
    "teg_power_w",
    "hot_pump_w",
    "cold_pump_w",
    "fan_w",
    "net_power_w",
    "net_after_fans_w",
    "teg_efficiency",
    "cop",
    "efficiency",
];

impl TimeseriesRecord {
    /// Look up one recorded variable by name.
    pub fn value(&self, name: &str) -> Option<f64> {
        let t = &self.temperatures;
        let q = &self.heat_flows;
        let e = &self.electrical;
        let p = &self.performance;
        let v = match name {
            "time_s" => self.time_s,
            "hot_supply_k" => t.hot_supply_k,
            "hot_hx_inlet_k" => t.hot_hx_inlet_k,
            "hot_return_k" => t.hot_return_k,
            "teg_hot_face_k" => t.teg_hot_face_k,
            "teg_cold_face_k" => t.teg_cold_face_k,
            "cold_supply_k" => t.cold_supply_k,
            "cold_hx_outlet_k" => t.cold_hx_outlet_k,
            "cold_return_k" => t.cold_return_k,
            "soil_k" => t.soil_k,
            "sink_k" => t.sink_k,
            "fuel_power_w" => q.fuel_power_w,
            "burner_thermal_w" => q.burner_thermal_w,
            "burner_duty_w" => q.burner_duty_w,
            "firing_margin_w" => q.firing_margin_w,
            "hot_pipe_loss_w" => q.hot_pipe_loss_w,
            "teg_heat_in_w" => q.teg_heat_in_w,
            "teg_heat_out_w" => q.teg_heat_out_w,
            "cold_pipe_loss_w" => q.cold_pipe_loss_w,
            "heat_rejected_w" => q.heat_rejected_w,
            "teg_power_w" => e.teg_power_w,
            "hot_pump_w" => e.hot_pump_w,
            "cold_pump_w" => e.cold_pump_w,
            "fan_w" => e.fan_w,
            "net_power_w" => e.net_power_w,
            "net_after_fans_w" => e.net_after_fans_w,
            "teg_efficiency" => p.teg_efficiency,
            "cop" => p.cop,
            "efficiency" => p.efficiency,
            _ => return None,
        };
        Some(v)
    }
}
