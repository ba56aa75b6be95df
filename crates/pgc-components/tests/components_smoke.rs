//! Integration tests for pgc-components with the loop fluid models.

use pgc_components::{
    DryCooler, FluidPort, GroundLoop, HeatExchanger, HeatRejection, Pipe, Pump, TegArray,
    TwoPortComponent, trace_leg,
};
use pgc_core::units::{k, kgps, m, pa, s};
use pgc_fluids::{FluidKind, ThermalOil, WaterGlycol};
use proptest::prelude::*;

fn between(x: f64, a: f64, b: f64) -> bool {
    x >= a.min(b) && x <= a.max(b)
}

proptest! {
    #[test]
    fn pipe_outlet_never_overshoots(
        mdot in 1e-6f64..50.0,
        t_in in 260.0f64..500.0,
        ambient in 250.0f64..320.0,
        u in 0.0f64..50.0,
        length in 1.0f64..500.0,
    ) {
        let pipe = Pipe::new("p".into(), m(length), m(0.05), u, k(ambient)).unwrap();
        let step = pipe.step(&WaterGlycol, FluidPort::new(k(t_in), kgps(mdot))).unwrap();
        prop_assert!(between(step.outlet.temperature.value, t_in, ambient));
        prop_assert_eq!(step.outlet.mass_flow.value, mdot);
    }

    #[test]
    fn exchanger_outlet_never_overshoots(
        mdot in 1e-6f64..50.0,
        t_in in 280.0f64..650.0,
        face in 280.0f64..650.0,
        ua_per_unit in 0.1f64..50.0,
        units in 1usize..10_000,
    ) {
        let hx = HeatExchanger::new("hx".into(), ua_per_unit, units).unwrap();
        let duty = hx.exchange(&ThermalOil, FluidPort::new(k(t_in), kgps(mdot)), k(face)).unwrap();
        prop_assert!(between(duty.outlet.temperature.value, t_in, face));
        prop_assert!(duty.effectiveness >= 0.0 && duty.effectiveness <= 1.0);
        // Heat sign follows the driving difference
        prop_assert!(duty.heat_to_face.value * (t_in - face) >= 0.0);
    }

    #[test]
    fn teg_output_bounded_by_heat_input(
        t_cold in 270.0f64..400.0,
        dt in -100.0f64..300.0,
        n in 1usize..5_000,
        r_th in 0.1f64..5.0,
        seebeck in 0.001f64..0.1,
        r_int in 0.1f64..5.0,
    ) {
        let t_hot = t_cold + dt;
        prop_assume!(t_hot > 1.0);
        let arr = TegArray::new("teg".into(), n, r_th, seebeck, r_int, k(700.0)).unwrap();
        let op = arr.evaluate(k(t_hot), k(t_cold)).unwrap();
        prop_assert!(op.power.value >= 0.0);
        if dt > 0.0 {
            prop_assert!(op.power.value < op.heat_in.value);
            prop_assert!(op.efficiency >= 0.0 && op.efficiency < 1.0);
        } else {
            prop_assert_eq!(op.power.value, 0.0);
            prop_assert_eq!(op.efficiency, 0.0);
        }
    }
}

#[test]
fn cold_return_leg_conserves_mass_and_energy() {
    let fluid = FluidKind::WaterGlycol.model();
    let cold_hx = HeatExchanger::new("cold_hx".into(), 8.0, 1620).unwrap();
    let cold_pipe = Pipe::new("cold_pipe".into(), m(30.0), m(0.038), 0.5, k(293.15)).unwrap();
    let rejector = HeatRejection::GroundLoop(
        GroundLoop::new(
            "ground".into(),
            21,
            m(150.0),
            0.2,
            m(3.0),
            2.2e6,
            k(285.15),
            None,
        )
        .unwrap(),
    );
    let pump = Pump::new("cold_pump".into(), kgps(4.0), pa(150_000.0), 0.65).unwrap();

    let facing = cold_hx.facing(k(320.0));
    let bound = rejector.at(s(0.0), k(285.15));
    let chain: [&dyn TwoPortComponent; 4] = [&facing, &cold_pipe, &bound, &pump];

    let supply = FluidPort::new(k(300.0), kgps(4.0));
    let leg = trace_leg(fluid, supply, &chain).unwrap();

    for step in &leg.steps {
        assert_eq!(step.outlet.mass_flow.value, 4.0);
    }
    let outlet = leg.outlet().unwrap();
    let enthalpy_change = 4.0 * 3400.0 * (outlet.temperature.value - 300.0);
    assert!((enthalpy_change - leg.total_heat_rate().value).abs() < 1e-6);
    assert!(leg.total_shaft_power().value > 0.0);
}

#[test]
fn dry_cooler_path_reports_fan_power() {
    let rejector = HeatRejection::DryCooler(
        DryCooler::new("dry".into(), 10_000.0, k(288.15), 12.0, 200.0, 0.015).unwrap(),
    );
    let r = rejector
        .reject(
            &WaterGlycol,
            FluidPort::new(k(320.0), kgps(4.0)),
            s(0.0),
            k(285.0),
        )
        .unwrap();
    assert!(r.heat_rejected.value > 0.0);
    assert!((r.fan_power.value - 0.015 * r.heat_rejected.value).abs() < 1e-9);
    assert_eq!(rejector.soil_rate(&r, k(285.0)), 0.0);
}
