//! Integration tests for run progress and timing reporting.

use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use pgc_app::{
    RunOptions, RunProgressEvent, RunRequest, RunStage, ensure_run_with_progress, init_plant,
};

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    dir.push(format!("{}_{}", prefix, nanos));
    fs::create_dir_all(&dir).expect("failed to create temp dir");
    dir
}

fn collect_events(request: &RunRequest<'_>) -> (pgc_app::RunResponse, Vec<RunProgressEvent>) {
    let mut events = Vec::new();
    let response = ensure_run_with_progress(request, Some(&mut |event| events.push(event)))
        .expect("run with progress should succeed");
    (response, events)
}

#[test]
fn transient_progress_and_timing_are_reported() {
    let dir = unique_temp_dir("pgc_app_progress");
    let plant_path = dir.join("plant.yaml");
    init_plant(&plant_path, "progress").expect("init failed");

    let request = RunRequest {
        plant_path: &plant_path,
        options: RunOptions {
            use_cache: false,
            dt_s: Some(6.0 * 3600.0),
            duration_days: Some(1.0),
            ..RunOptions::default()
        },
    };

    let (response, events) = collect_events(&request);

    assert!(!response.loaded_from_cache);
    assert!(
        events.iter().any(|e| e.stage == RunStage::CompilingPlant),
        "expected compile stage event"
    );
    let fractions: Vec<f64> = events
        .iter()
        .filter_map(|e| e.transient.as_ref())
        .map(|t| t.fraction_complete)
        .collect();
    assert!(fractions.windows(2).all(|w| w[1] >= w[0]));
    assert_eq!(fractions.last().copied(), Some(1.0));
    assert_eq!(events.last().map(|e| e.stage.clone()), Some(RunStage::Completed));

    assert!(response.timing.total_time_s > 0.0);
    assert!(response.timing.solve_time_s > 0.0);
    assert_eq!(response.timing.transient_steps, 4);
    assert_eq!(response.timing.records, 5);
    assert!(response.timing.newton_iterations > 0);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn cached_run_skips_simulation_stages() {
    let dir = unique_temp_dir("pgc_app_progress_cache");
    let plant_path = dir.join("plant.yaml");
    init_plant(&plant_path, "cached").expect("init failed");

    let request = RunRequest {
        plant_path: &plant_path,
        options: RunOptions {
            dt_s: Some(6.0 * 3600.0),
            duration_days: Some(1.0),
            ..RunOptions::default()
        },
    };
    let _ = collect_events(&request);
    let (response, events) = collect_events(&request);

    assert!(response.loaded_from_cache);
    assert!(events.iter().any(|e| e.stage == RunStage::LoadingCachedResult));
    assert!(!events.iter().any(|e| e.stage == RunStage::RunningTransient));

    let _ = fs::remove_dir_all(&dir);
}
