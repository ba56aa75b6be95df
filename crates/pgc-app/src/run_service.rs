//! Run execution and caching service.

use std::path::Path;
use std::time::Instant;

use pgc_project::{PlantFile, RejectionDef};
use pgc_results::{
    ElectricalSnapshot, HeatFlowSnapshot, PerformanceSnapshot, RunManifest, RunStore, RunType,
    TemperatureSnapshot, TimeseriesRecord,
};
use pgc_sim::{IntegratorType, PlantSnapshot, PlantTrace, SimOptions, SimProgress};
use tracing::{debug, info, warn};

use crate::error::{AppError, AppResult};
use crate::progress::{RunProgressEvent, RunStage, TransientProgress};
use crate::project_service;
use crate::runtime_compile;

/// Options for running simulations.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub use_cache: bool,
    pub solver_version: String,
    /// Replaces the plant file's step
    pub dt_s: Option<f64>,
    /// Replaces the plant file's duration
    pub duration_days: Option<f64>,
    pub fuel_mcf_per_day: Option<f64>,
    pub teg_count: Option<usize>,
    /// Only valid for a ground-loop plant
    pub borehole_count: Option<usize>,
    pub hot_setpoint_k: Option<f64>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            use_cache: true,
            solver_version: env!("CARGO_PKG_VERSION").to_string(),
            dt_s: None,
            duration_days: None,
            fuel_mcf_per_day: None,
            teg_count: None,
            borehole_count: None,
            hot_setpoint_k: None,
        }
    }
}

/// Request to execute a run.
pub struct RunRequest<'a> {
    pub plant_path: &'a Path,
    pub options: RunOptions,
}

/// Concise timing and execution summary for a run.
#[derive(Debug, Clone, Default)]
pub struct RunTimingSummary {
    pub compile_time_s: f64,
    pub solve_time_s: f64,
    pub save_time_s: f64,
    pub load_cache_time_s: f64,
    pub total_time_s: f64,
    pub transient_steps: usize,
    pub records: usize,
    pub newton_iterations: usize,
}

/// Response from a run execution.
#[derive(Debug, Clone)]
pub struct RunResponse {
    pub run_id: String,
    pub manifest: RunManifest,
    pub loaded_from_cache: bool,
    pub timing: RunTimingSummary,
}

fn emit_progress(
    progress_cb: &mut Option<&mut dyn FnMut(RunProgressEvent)>,
    stage: RunStage,
    started: Instant,
    message: Option<String>,
    transient: Option<TransientProgress>,
) {
    if let Some(cb) = progress_cb.as_deref_mut() {
        cb(RunProgressEvent {
            stage,
            elapsed_wall_s: started.elapsed().as_secs_f64(),
            message,
            transient,
        });
    }
}

/// Plant file with the run's overrides applied.
pub fn effective_plant(plant: &PlantFile, options: &RunOptions) -> AppResult<PlantFile> {
    let mut plant = plant.clone();
    if let Some(dt_s) = options.dt_s {
        plant.simulation.dt_s = dt_s;
    }
    if let Some(days) = options.duration_days {
        plant.simulation.duration_days = days;
    }
    if let Some(mcf) = options.fuel_mcf_per_day {
        plant.burner.fuel_mcf_per_day = mcf;
    }
    if let Some(setpoint_k) = options.hot_setpoint_k {
        plant.burner.setpoint_k = setpoint_k;
    }
    if let Some(count) = options.teg_count {
        plant.teg.count = count;
    }
    if let Some(count) = options.borehole_count {
        match &mut plant.rejection {
            RejectionDef::GroundLoop { borehole_count, .. } => *borehole_count = count,
            RejectionDef::DryCooler { .. } => {
                return Err(AppError::InvalidInput(
                    "borehole count given for a dry-cooler plant".to_string(),
                ));
            }
        }
    }
    project_service::validate_plant(&plant)?;
    Ok(plant)
}

fn run_type_for(opts: &SimOptions) -> RunType {
    RunType::Transient {
        dt_s: opts.dt,
        t_end_s: opts.t_end,
        steps: opts.planned_steps(),
        record_every: opts.record_every,
        integrator: match opts.integrator {
            IntegratorType::RK4 => "rk4".to_string(),
            IntegratorType::ForwardEuler => "forward_euler".to_string(),
        },
    }
}

/// Execute or load a run based on request.
pub fn ensure_run(request: &RunRequest) -> AppResult<RunResponse> {
    ensure_run_with_progress(request, None)
}

/// Execute or load a run and stream progress events.
pub fn ensure_run_with_progress(
    request: &RunRequest,
    mut progress_cb: Option<&mut dyn FnMut(RunProgressEvent)>,
) -> AppResult<RunResponse> {
    let started = Instant::now();
    let mut timing = RunTimingSummary::default();

    emit_progress(
        &mut progress_cb,
        RunStage::LoadingPlant,
        started,
        Some("Loading plant".to_string()),
        None,
    );

    let plant = project_service::load_plant(request.plant_path)?;
    let plant = effective_plant(&plant, &request.options)?;
    let opts = runtime_compile::sim_options(&plant.simulation);

    emit_progress(
        &mut progress_cb,
        RunStage::CheckingCache,
        started,
        Some("Checking run cache".to_string()),
        None,
    );

    let run_type = run_type_for(&opts);
    let run_id =
        pgc_results::compute_run_id(&plant, &run_type, &request.options.solver_version);
    let store = RunStore::for_plant(request.plant_path)?;

    if request.options.use_cache && store.has_run(&run_id) {
        emit_progress(
            &mut progress_cb,
            RunStage::LoadingCachedResult,
            started,
            Some("Loading cached run".to_string()),
            None,
        );

        let load_started = Instant::now();
        match store.load_manifest(&run_id) {
            Ok(manifest) => {
                timing.load_cache_time_s = load_started.elapsed().as_secs_f64();
                timing.total_time_s = started.elapsed().as_secs_f64();
                debug!(run_id = %run_id, "run cache hit");

                emit_progress(
                    &mut progress_cb,
                    RunStage::Completed,
                    started,
                    Some("Loaded cached run".to_string()),
                    None,
                );

                return Ok(RunResponse {
                    run_id,
                    manifest,
                    loaded_from_cache: true,
                    timing,
                });
            }
            Err(e) => {
                warn!(run_id = %run_id, error = %e, "discarding unreadable cached run");
            }
        }
    }

    emit_progress(
        &mut progress_cb,
        RunStage::CompilingPlant,
        started,
        Some("Compiling plant".to_string()),
        None,
    );

    let compile_started = Instant::now();
    let mut system = runtime_compile::compile_plant(&plant)?;
    timing.compile_time_s = compile_started.elapsed().as_secs_f64();

    emit_progress(
        &mut progress_cb,
        RunStage::RunningTransient,
        started,
        Some("Running transient simulation".to_string()),
        Some(TransientProgress {
            t_end_s: opts.t_end,
            total_steps: opts.planned_steps(),
            ..Default::default()
        }),
    );

    let solve_started = Instant::now();
    let trace = {
        let mut on_step = |p: SimProgress| {
            emit_progress(
                &mut progress_cb,
                RunStage::RunningTransient,
                started,
                None,
                Some(TransientProgress {
                    sim_time_s: p.t,
                    t_end_s: p.t_end,
                    fraction_complete: p.fraction_complete(),
                    step: p.step,
                    total_steps: p.total_steps,
                }),
            );
        };
        system.simulate(&opts, Some(&mut on_step))?
    };
    timing.solve_time_s = solve_started.elapsed().as_secs_f64();
    timing.transient_steps = opts.planned_steps();
    timing.records = trace.snapshots.len();
    timing.newton_iterations = trace.snapshots.iter().map(|s| s.solver_iterations).sum();

    emit_progress(
        &mut progress_cb,
        RunStage::SavingResults,
        started,
        Some("Saving run output".to_string()),
        None,
    );

    let save_started = Instant::now();
    let manifest = RunManifest::new(
        run_id.clone(),
        plant.name.clone(),
        run_type,
        request.options.solver_version.clone(),
    );
    store.save_run(&manifest, &trace_to_records(&trace))?;
    timing.save_time_s = save_started.elapsed().as_secs_f64();
    timing.total_time_s = started.elapsed().as_secs_f64();

    info!(
        run_id = %run_id,
        records = timing.records,
        total_time_s = timing.total_time_s,
        "run saved"
    );

    emit_progress(
        &mut progress_cb,
        RunStage::Completed,
        started,
        Some("Run completed".to_string()),
        None,
    );

    Ok(RunResponse {
        run_id,
        manifest,
        loaded_from_cache: false,
        timing,
    })
}

/// Simulate a plant file without touching the run cache.
pub fn simulate_plant(plant: &PlantFile) -> AppResult<PlantTrace> {
    project_service::validate_plant(plant)?;
    let mut system = runtime_compile::compile_plant(plant)?;
    let opts = runtime_compile::sim_options(&plant.simulation);
    Ok(system.simulate(&opts, None)?)
}

pub fn snapshot_to_record(s: &PlantSnapshot) -> TimeseriesRecord {
    TimeseriesRecord {
        time_s: s.time_s,
        temperatures: TemperatureSnapshot {
            hot_supply_k: s.hot_supply_k,
            hot_hx_inlet_k: s.hot_hx_inlet_k,
            hot_return_k: s.hot_return_k,
            teg_hot_face_k: s.teg_hot_face_k,
            teg_cold_face_k: s.teg_cold_face_k,
            cold_supply_k: s.cold_supply_k,
            cold_hx_outlet_k: s.cold_hx_outlet_k,
            cold_return_k: s.cold_return_k,
            soil_k: s.soil_k,
            sink_k: s.sink_k,
        },
        heat_flows: HeatFlowSnapshot {
            fuel_power_w: s.fuel_power_w,
            burner_thermal_w: s.burner_thermal_w,
            burner_duty_w: s.burner_duty_w,
            firing_margin_w: s.firing_margin_w,
            hot_pipe_loss_w: s.hot_pipe_loss_w,
            teg_heat_in_w: s.teg_heat_in_w,
            teg_heat_out_w: s.teg_heat_out_w,
            cold_pipe_loss_w: s.cold_pipe_loss_w,
            heat_rejected_w: s.heat_rejected_w,
        },
        electrical: ElectricalSnapshot {
            teg_power_w: s.teg_power_w,
            hot_pump_w: s.hot_pump_w,
            cold_pump_w: s.cold_pump_w,
            fan_w: s.fan_w,
            net_power_w: s.net_power_w,
            net_after_fans_w: s.net_after_fans_w,
        },
        performance: PerformanceSnapshot {
            teg_efficiency: s.teg_efficiency,
            cop: s.cop,
            efficiency: s.efficiency,
            over_temperature: s.over_temperature,
        },
    }
}

pub fn trace_to_records(trace: &PlantTrace) -> Vec<TimeseriesRecord> {
    trace.snapshots.iter().map(snapshot_to_record).collect()
}

/// List runs of a plant, most recent first.
pub fn list_runs(plant_path: &Path) -> AppResult<Vec<RunManifest>> {
    let plant = project_service::load_plant(plant_path)?;
    let store = RunStore::for_plant(plant_path)?;

    let mut runs = store.list_runs(&plant.name)?;
    runs.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    Ok(runs)
}

/// Load a specific run.
pub fn load_run(
    plant_path: &Path,
    run_id: &str,
) -> AppResult<(RunManifest, Vec<TimeseriesRecord>)> {
    let store = RunStore::for_plant(plant_path)?;

    let manifest = store.load_manifest(run_id)?;
    let records = store.load_timeseries(run_id)?;

    Ok((manifest, records))
}
