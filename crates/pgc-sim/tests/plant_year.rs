//! Whole-plant runs over shortened horizons.

use pgc_components::DryCooler;
use pgc_core::units::k;
use pgc_sim::{IntegratorType, PlantComponents, PlantSystem, SimError, SimOptions};

const DAY: f64 = 86_400.0;

fn options(days: f64, dt_hours: f64) -> SimOptions {
    SimOptions {
        dt: dt_hours * 3600.0,
        t_end: days * DAY,
        ..SimOptions::default()
    }
}

#[test]
fn net_power_is_teg_minus_pumps_at_every_record() {
    let mut plant = PlantSystem::reference().unwrap();
    let trace = plant.simulate(&options(5.0, 6.0), None).unwrap();

    assert_eq!(trace.snapshots.len(), 21);
    for snap in &trace.snapshots {
        assert_eq!(
            snap.net_power_w,
            snap.teg_power_w - (snap.hot_pump_w + snap.cold_pump_w)
        );
        assert!(snap.teg_power_w > 0.0);
        assert!(snap.teg_hot_face_k > snap.teg_cold_face_k);
    }
}

#[test]
fn soil_warms_monotonically_under_ground_loop() {
    let mut plant = PlantSystem::reference().unwrap();
    let trace = plant.simulate(&options(30.0, 12.0), None).unwrap();

    let soil = trace.series(|s| s.soil_k);
    for pair in soil.windows(2) {
        assert!(pair[1].1 >= pair[0].1);
    }
    let summary = trace.summary();
    assert!(summary.soil_drift_k() > 0.0);
    assert!(summary.rejected_energy_j > 0.0);
    assert_eq!(summary.duration_s, 30.0 * DAY);
}

#[test]
fn warmer_soil_lowers_output() {
    let mut plant = PlantSystem::reference().unwrap();
    let trace = plant.simulate(&options(60.0, 24.0), None).unwrap();
    let first = trace.snapshots.first().unwrap();
    let last = trace.snapshots.last().unwrap();
    assert!(last.cold_supply_k > first.cold_supply_k);
    assert!(last.teg_power_w < first.teg_power_w);
}

#[test]
fn repeated_runs_are_identical() {
    let opts = options(3.0, 4.0);
    let mut plant = PlantSystem::reference().unwrap();
    let a = plant.simulate(&opts, None).unwrap();
    let b = plant.simulate(&opts, None).unwrap();
    assert_eq!(a.snapshots, b.snapshots);
    assert_eq!(a.final_state, b.final_state);

    let mut fresh = PlantSystem::reference().unwrap();
    let c = fresh.simulate(&opts, None).unwrap();
    assert_eq!(a.snapshots, c.snapshots);
}

#[test]
fn net_energy_matches_mean_power() {
    let mut plant = PlantSystem::reference().unwrap();
    let trace = plant.simulate(&options(2.0, 1.0), None).unwrap();
    let summary = trace.summary();

    let first = trace.snapshots[0].net_power_w;
    let last = trace.snapshots.last().unwrap().net_power_w;
    let (lo, hi) = (first.min(last), first.max(last));
    assert!(summary.mean_net_power_w >= lo - 1.0 && summary.mean_net_power_w <= hi + 1.0);
    assert!((summary.net_energy_kwh() - summary.mean_net_power_w * 2.0 * 24.0 / 1000.0).abs() < 1e-6);
}

#[test]
fn dry_cooler_keeps_soil_fixed_and_draws_fans() {
    let cooler = DryCooler::new("dry_cooler".into(), 10_000.0, k(288.15), 10.0, 200.0, 0.015)
        .unwrap();
    let parts = PlantComponents::reference().unwrap().with_dry_cooler(cooler);
    let mut plant = PlantSystem::new(parts).unwrap();
    let trace = plant.simulate(&options(10.0, 6.0), None).unwrap();

    for snap in &trace.snapshots {
        assert_eq!(snap.soil_k, 288.15);
        assert!(snap.fan_w > 0.0);
        assert!((snap.fan_w - 0.015 * snap.heat_rejected_w).abs() < 1e-9);
        assert!(snap.net_after_fans_w < snap.net_power_w);
    }
}

#[test]
fn euler_tracks_rk4_on_slow_soil() {
    let mut rk4 = PlantSystem::reference().unwrap();
    let a = rk4.simulate(&options(20.0, 6.0), None).unwrap();

    let mut euler = PlantSystem::reference().unwrap();
    let opts = SimOptions {
        integrator: IntegratorType::ForwardEuler,
        ..options(20.0, 6.0)
    };
    let b = euler.simulate(&opts, None).unwrap();

    let (sa, sb) = (a.summary(), b.summary());
    assert!((sa.final_soil_k - sb.final_soil_k).abs() < 0.05);
    assert!((sa.net_energy_j - sb.net_energy_j).abs() / sa.net_energy_j.abs() < 1e-2);
}

#[test]
fn progress_reaches_completion() {
    let mut plant = PlantSystem::reference().unwrap();
    let mut last = 0.0;
    let mut calls = 0;
    let mut cb = |p: pgc_sim::SimProgress| {
        calls += 1;
        last = p.fraction_complete();
    };
    plant.simulate(&options(1.0, 6.0), Some(&mut cb)).unwrap();
    assert_eq!(calls, 4);
    assert_eq!(last, 1.0);
}

#[test]
fn invalid_step_is_rejected() {
    let mut plant = PlantSystem::reference().unwrap();
    let opts = SimOptions {
        dt: 0.0,
        ..SimOptions::default()
    };
    assert!(matches!(
        plant.simulate(&opts, None),
        Err(SimError::InvalidArg { .. })
    ));
}
