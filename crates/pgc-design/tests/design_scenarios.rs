//! Design-point behaviour across the built-in scenarios.

use pgc_components::DeliveryChain;
use pgc_design::{
    DEFAULT_GAS_PRICES, FuelBalance, SWEEP_SCENARIOS, SWEEP_TEG_COUNTS, round_to_boards,
    run_design,
};
use proptest::prelude::*;

#[test]
fn sweep_grid_is_finite() {
    let chain = DeliveryChain::default();
    for sc in &SWEEP_SCENARIOS {
        for &n in &SWEEP_TEG_COUNTS {
            let cfg = sc.config(round_to_boards(n)).unwrap();
            let p = run_design(&cfg).unwrap();
            let b = FuelBalance::from_design(&p, &chain, &DEFAULT_GAS_PRICES);
            assert!(p.net_electrical_w.is_finite(), "{} @ {}", sc.label, n);
            assert!(b.mcf_per_day > 0.0);
            assert!(b.heat_rejection_kw > 0.0);
            assert!(p.teg_efficiency > 0.0 && p.teg_efficiency < 1.0);
        }
    }
}

#[test]
fn hotter_modules_produce_more_per_teg() {
    let bite = SWEEP_SCENARIOS[0].config(1008).unwrap();
    let pb = SWEEP_SCENARIOS[2].config(1008).unwrap();
    let p_bite = run_design(&bite).unwrap();
    let p_pb = run_design(&pb).unwrap();
    assert!(p_pb.power_per_teg_w > p_bite.power_per_teg_w);
}

proptest! {
    #[test]
    fn gross_output_grows_with_array(boards in 1usize..100) {
        let base = SWEEP_SCENARIOS[0].config(36).unwrap();
        let a = run_design(&base.with_teg_count(boards * 36)).unwrap();
        let b = run_design(&base.with_teg_count((boards + 1) * 36)).unwrap();
        prop_assert!(b.gross_electrical_w > a.gross_electrical_w);
        prop_assert!(b.total_heat_input_w > a.total_heat_input_w);
    }
}
