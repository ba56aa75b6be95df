//! Recorded plant outputs.

use crate::plant::PlantState;

/// Plant outputs at one recorded instant. Temperatures in K, powers in W.
#[derive(Clone, Debug, PartialEq)]
pub struct PlantSnapshot {
    pub time_s: f64,
    // Hot loop
    pub hot_supply_k: f64,
    pub hot_hx_inlet_k: f64,
    pub hot_return_k: f64,
    // Stack
    pub teg_hot_face_k: f64,
    pub teg_cold_face_k: f64,
    // Cold loop
    pub cold_supply_k: f64,
    pub cold_hx_outlet_k: f64,
    pub cold_return_k: f64,
    pub soil_k: f64,
    /// Soil or air temperature the cold loop rejects to
    pub sink_k: f64,
    // Energy flows
    pub fuel_power_w: f64,
    pub burner_thermal_w: f64,
    pub burner_duty_w: f64,
    pub firing_margin_w: f64,
    pub hot_pipe_loss_w: f64,
    pub teg_heat_in_w: f64,
    pub teg_heat_out_w: f64,
    pub cold_pipe_loss_w: f64,
    pub heat_rejected_w: f64,
    // Electrical
    pub teg_power_w: f64,
    pub hot_pump_w: f64,
    pub cold_pump_w: f64,
    pub fan_w: f64,
    /// TEG output minus both pumps
    pub net_power_w: f64,
    pub net_after_fans_w: f64,
    // Ratios
    pub teg_efficiency: f64,
    /// TEG output over fuel power
    pub cop: f64,
    /// Net output over fuel power
    pub efficiency: f64,
    pub over_temperature: bool,
    pub solver_iterations: usize,
}

/// Recorded run of the plant.
#[derive(Clone, Debug)]
pub struct PlantTrace {
    pub snapshots: Vec<PlantSnapshot>,
    pub final_state: PlantState,
}

/// Whole-run totals.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TraceSummary {
    pub duration_s: f64,
    pub records: usize,
    /// Integrated net output (J)
    pub net_energy_j: f64,
    /// Integrated heat to the sink (J)
    pub rejected_energy_j: f64,
    pub mean_net_power_w: f64,
    pub mean_efficiency: f64,
    pub initial_soil_k: f64,
    pub final_soil_k: f64,
    pub peak_hot_face_k: f64,
    pub over_temperature_records: usize,
    pub firing_deficit_records: usize,
}

impl TraceSummary {
    pub fn soil_drift_k(&self) -> f64 {
        self.final_soil_k - self.initial_soil_k
    }

    pub fn net_energy_kwh(&self) -> f64 {
        self.net_energy_j / 3.6e6
    }
}

impl PlantTrace {
    pub fn summary(&self) -> TraceSummary {
        let records = self.snapshots.len();
        let duration_s = self.snapshots.last().map_or(0.0, |s| s.time_s);
        let net_energy_j = self.final_state.net_energy_j;

        let mean_net_power_w = if duration_s > 0.0 {
            net_energy_j / duration_s
        } else {
            self.snapshots.first().map_or(0.0, |s| s.net_power_w)
        };
        let mean_efficiency = if records > 0 {
            self.snapshots.iter().map(|s| s.efficiency).sum::<f64>() / records as f64
        } else {
            0.0
        };

        TraceSummary {
            duration_s,
            records,
            net_energy_j,
            rejected_energy_j: self.final_state.rejected_energy_j,
            mean_net_power_w,
            mean_efficiency,
            initial_soil_k: self.snapshots.first().map_or(0.0, |s| s.soil_k),
            final_soil_k: self.final_state.soil_temperature_k,
            peak_hot_face_k: self
                .snapshots
                .iter()
                .map(|s| s.teg_hot_face_k)
                .fold(f64::NEG_INFINITY, f64::max),
            over_temperature_records: self.snapshots.iter().filter(|s| s.over_temperature).count(),
            firing_deficit_records: self
                .snapshots
                .iter()
                .filter(|s| s.firing_margin_w < 0.0)
                .count(),
        }
    }

    /// Time series of one output.
    pub fn series(&self, f: impl Fn(&PlantSnapshot) -> f64) -> Vec<(f64, f64)> {
        self.snapshots.iter().map(|s| (s.time_s, f(s))).collect()
    }
}
