use pgc_app::{closest_to_target, design_sweep, plant_sweep};
use pgc_components::DeliveryChain;
use pgc_design::{DEFAULT_GAS_PRICES, SWEEP_SCENARIOS};
use pgc_project::PlantFile;

#[test]
fn parallel_design_sweep_equals_sequential() {
    let chain = DeliveryChain::default();
    let counts = [500, 1000, 2000];
    let par = design_sweep(&SWEEP_SCENARIOS, &counts, &chain, &DEFAULT_GAS_PRICES, true).unwrap();
    let seq = design_sweep(&SWEEP_SCENARIOS, &counts, &chain, &DEFAULT_GAS_PRICES, false).unwrap();

    assert_eq!(par.len(), SWEEP_SCENARIOS.len() * counts.len());
    assert_eq!(par, seq);

    for row in &par {
        assert_eq!(row.teg_count % 36, 0);
        assert_eq!(row.cost_per_kwh.len(), DEFAULT_GAS_PRICES.len());
        assert!(row.gross_kw > 0.0);
        assert!(row.boreholes as f64 >= row.heat_rejection_kw / 6.0);
    }
}

#[test]
fn closest_row_belongs_to_scenario() {
    let chain = DeliveryChain::default();
    let counts = [500, 1000, 2000, 4000];
    let rows = design_sweep(&SWEEP_SCENARIOS, &counts, &chain, &DEFAULT_GAS_PRICES, true).unwrap();

    let label = SWEEP_SCENARIOS[0].label;
    let best = closest_to_target(&rows, label, 2.0).unwrap();
    assert_eq!(best.scenario, label);
    for row in rows.iter().filter(|r| r.scenario == label) {
        assert!((best.net_kw - 2.0).abs() <= (row.net_kw - 2.0).abs());
    }
    assert!(closest_to_target(&rows, "no such scenario", 2.0).is_none());
}

#[test]
fn parallel_plant_sweep_equals_sequential() {
    let mut base = PlantFile::reference("sweep");
    base.simulation.dt_s = 6.0 * 3600.0;
    base.simulation.duration_days = 3.0;

    let counts = [810, 1620, 2430];
    let par = plant_sweep(&base, &counts, true).unwrap();
    let seq = plant_sweep(&base, &counts, false).unwrap();
    assert_eq!(par, seq);

    let counts_out: Vec<usize> = par.iter().map(|r| r.teg_count).collect();
    assert_eq!(counts_out, counts);
    for row in &par {
        assert!(row.soil_drift_k > 0.0);
        assert!(row.net_energy_kwh > 0.0);
    }
}

#[test]
fn zero_teg_variant_is_an_error() {
    let base = PlantFile::reference("sweep");
    assert!(plant_sweep(&base, &[0], false).is_err());
}
