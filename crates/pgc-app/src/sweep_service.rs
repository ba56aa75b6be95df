//! Parameter sweeps over design points and full plant runs.

use pgc_components::DeliveryChain;
use pgc_design::{FuelBalance, Scenario, round_to_boards, run_design};
use pgc_project::PlantFile;
use rayon::prelude::*;
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::run_service;

/// One design sweep cell.
#[derive(Debug, Clone, PartialEq)]
pub struct DesignSweepRow {
    pub scenario: &'static str,
    pub teg_count: usize,
    pub gross_kw: f64,
    pub net_kw: f64,
    pub mcf_per_day: f64,
    pub hot_gpm: f64,
    pub heat_rejection_kw: f64,
    pub boreholes: usize,
    /// Fuel cost per net kWh, one entry per gas price
    pub cost_per_kwh: Vec<f64>,
}

pub fn evaluate_design_cell(
    scenario: &Scenario,
    teg_count: usize,
    chain: &DeliveryChain,
    prices: &[f64],
) -> AppResult<DesignSweepRow> {
    let cfg = scenario.config(round_to_boards(teg_count))?;
    let point = run_design(&cfg)?;
    let balance = FuelBalance::from_design(&point, chain, prices);
    Ok(DesignSweepRow {
        scenario: scenario.label,
        teg_count: point.teg_count,
        gross_kw: balance.gross_kw,
        net_kw: balance.net_kw,
        mcf_per_day: balance.mcf_per_day,
        hot_gpm: balance.hot_gpm,
        heat_rejection_kw: balance.heat_rejection_kw,
        boreholes: balance.boreholes(),
        cost_per_kwh: balance.costs.iter().map(|c| c.cost_per_kwh).collect(),
    })
}

/// Every scenario at every array size, in scenario-major order.
pub fn design_sweep(
    scenarios: &[Scenario],
    teg_counts: &[usize],
    chain: &DeliveryChain,
    prices: &[f64],
    parallelize: bool,
) -> AppResult<Vec<DesignSweepRow>> {
    let cells: Vec<(&Scenario, usize)> = scenarios
        .iter()
        .flat_map(|s| teg_counts.iter().map(move |&n| (s, n)))
        .collect();
    info!(cells = cells.len(), parallelize, "starting design sweep");

    let eval = |&(s, n): &(&Scenario, usize)| evaluate_design_cell(s, n, chain, prices);
    let rows: AppResult<Vec<_>> = if parallelize {
        cells.par_iter().map(eval).collect()
    } else {
        cells.iter().map(eval).collect()
    };

    info!("design sweep finished");
    rows
}

/// Row of `scenario` whose net output is closest to `target_kw`.
pub fn closest_to_target<'a>(
    rows: &'a [DesignSweepRow],
    scenario: &str,
    target_kw: f64,
) -> Option<&'a DesignSweepRow> {
    rows.iter()
        .filter(|r| r.scenario == scenario)
        .min_by(|a, b| {
            (a.net_kw - target_kw)
                .abs()
                .total_cmp(&(b.net_kw - target_kw).abs())
        })
}

/// Whole-run outcome of one plant variant.
#[derive(Debug, Clone, PartialEq)]
pub struct PlantSweepRow {
    pub teg_count: usize,
    pub net_energy_kwh: f64,
    pub mean_net_power_w: f64,
    pub final_soil_k: f64,
    pub soil_drift_k: f64,
    pub peak_hot_face_k: f64,
    pub over_temperature_records: usize,
}

fn run_plant_variant(base: &PlantFile, teg_count: usize) -> AppResult<PlantSweepRow> {
    if teg_count == 0 {
        return Err(AppError::InvalidInput(
            "TEG count must be positive".to_string(),
        ));
    }
    let mut plant = base.clone();
    plant.teg.count = teg_count;
    let summary = run_service::simulate_plant(&plant)?.summary();
    Ok(PlantSweepRow {
        teg_count,
        net_energy_kwh: summary.net_energy_kwh(),
        mean_net_power_w: summary.mean_net_power_w,
        final_soil_k: summary.final_soil_k,
        soil_drift_k: summary.soil_drift_k(),
        peak_hot_face_k: summary.peak_hot_face_k,
        over_temperature_records: summary.over_temperature_records,
    })
}

/// Simulate the plant once per TEG count.
pub fn plant_sweep(
    base: &PlantFile,
    teg_counts: &[usize],
    parallelize: bool,
) -> AppResult<Vec<PlantSweepRow>> {
    info!(
        plant = %base.name,
        variants = teg_counts.len(),
        parallelize,
        "starting plant sweep"
    );
    let rows: AppResult<Vec<_>> = if parallelize {
        teg_counts
            .par_iter()
            .map(|&n| run_plant_variant(base, n))
            .collect()
    } else {
        teg_counts
            .iter()
            .map(|&n| run_plant_variant(base, n))
            .collect()
    };
    info!("plant sweep finished");
    rows
}
