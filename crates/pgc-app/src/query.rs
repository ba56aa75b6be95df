//! Query helpers for extracting data from loaded runs.

use pgc_results::{TimeseriesRecord, VARIABLES};

use crate::error::{AppError, AppResult};

/// Summary of a run's time range and energy totals.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub time_range: (f64, f64),
    pub record_count: usize,
    /// Net electrical energy over the recorded span (kWh)
    pub net_energy_kwh: f64,
    pub mean_net_power_w: f64,
    pub min_net_power_w: f64,
    pub max_net_power_w: f64,
    pub heat_rejected_kwh: f64,
    pub initial_soil_k: f64,
    pub final_soil_k: f64,
    pub peak_hot_face_k: f64,
    pub over_temperature_records: usize,
}

impl RunSummary {
    pub fn soil_drift_k(&self) -> f64 {
        self.final_soil_k - self.initial_soil_k
    }
}

/// Trapezoidal integral of a variable over the recorded times.
fn integrate(records: &[TimeseriesRecord], f: impl Fn(&TimeseriesRecord) -> f64) -> f64 {
    records
        .windows(2)
        .map(|w| 0.5 * (f(&w[0]) + f(&w[1])) * (w[1].time_s - w[0].time_s))
        .sum()
}

/// Get run summary from timeseries records.
pub fn get_run_summary(records: &[TimeseriesRecord]) -> AppResult<RunSummary> {
    let (Some(first), Some(last)) = (records.first(), records.last()) else {
        return Err(AppError::InvalidInput("No records in run".to_string()));
    };

    let span = last.time_s - first.time_s;
    let net_energy_j = integrate(records, |r| r.electrical.net_power_w);
    let mean_net_power_w = if span > 0.0 {
        net_energy_j / span
    } else {
        first.electrical.net_power_w
    };

    let net = records.iter().map(|r| r.electrical.net_power_w);
    let min_net_power_w = net.clone().fold(f64::INFINITY, f64::min);
    let max_net_power_w = net.fold(f64::NEG_INFINITY, f64::max);

    Ok(RunSummary {
        time_range: (first.time_s, last.time_s),
        record_count: records.len(),
        net_energy_kwh: net_energy_j / 3.6e6,
        mean_net_power_w,
        min_net_power_w,
        max_net_power_w,
        heat_rejected_kwh: integrate(records, |r| r.heat_flows.heat_rejected_w) / 3.6e6,
        initial_soil_k: first.temperatures.soil_k,
        final_soil_k: last.temperatures.soil_k,
        peak_hot_face_k: records
            .iter()
            .map(|r| r.temperatures.teg_hot_face_k)
            .fold(f64::NEG_INFINITY, f64::max),
        over_temperature_records: records
            .iter()
            .filter(|r| r.performance.over_temperature)
            .count(),
    })
}

/// All variable names a run can be queried for.
pub fn list_variables() -> &'static [&'static str] {
    VARIABLES
}

/// Extract the time series of one variable.
pub fn extract_series(records: &[TimeseriesRecord], variable: &str) -> AppResult<Vec<(f64, f64)>> {
    if !VARIABLES.contains(&variable) {
        return Err(AppError::InvalidInput(format!(
            "Unknown variable: {}",
            variable
        )));
    }

    Ok(records
        .iter()
        .filter_map(|r| r.value(variable).map(|v| (r.time_s, v)))
        .collect())
}
