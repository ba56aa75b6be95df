//! Therminol VP-1 thermal oil.

use crate::error::FluidResult;
use crate::model::validation::{validate_envelope, validate_props};
use crate::model::{FluidModel, FluidProps};
use pgc_core::units::constants::KELVIN_OFFSET;
use pgc_core::units::{Density, DynVisc, Temperature};
use uom::si::dynamic_viscosity::pascal_second;
use uom::si::mass_density::kilogram_per_cubic_meter;

/// Therminol VP-1 using linear/exponential fits from the technical bulletin.
///
/// ```text
/// rho = 1078 - 0.85 t            kg/m³
/// cp  = 1510 + 2.5 t             J/kg-K
/// mu  = 1e-3 exp(5.25 - 0.02 t)  Pa·s   (t > 20 C, else 4e-3), floor 2e-4
/// k   = max(0.137 - 5e-5 t, 0.08) W/m-K
/// ```
///
/// with `t` in Celsius. Fits are valid 12-400 C; the envelope is widened
/// slightly so cold starts and set point overshoot evaluate.
#[derive(Clone, Copy, Debug, Default)]
pub struct ThermalOil;

impl ThermalOil {
    const MIN_K: f64 = 263.15;
    const MAX_K: f64 = 698.15;

    fn viscosity(t_c: f64) -> f64 {
        let mu = if t_c > 20.0 {
            0.001 * (5.25 - 0.02 * t_c).exp()
        } else {
            0.004
        };
        mu.max(0.0002)
    }
}

impl FluidModel for ThermalOil {
    fn name(&self) -> &str {
        "Therminol VP-1"
    }

    fn props(&self, t: Temperature) -> FluidResult<FluidProps> {
        validate_envelope(t, Self::MIN_K, Self::MAX_K, "thermal oil temperature")?;
        let t_c = t.value - KELVIN_OFFSET;

        let props = FluidProps {
            t,
            rho: Density::new::<kilogram_per_cubic_meter>(1078.0 - 0.85 * t_c),
            cp: 1510.0 + 2.5 * t_c,
            mu: DynVisc::new::<pascal_second>(Self::viscosity(t_c)),
            k: (0.137 - 0.00005 * t_c).max(0.08),
        };
        validate_props(&props)?;
        Ok(props)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pgc_core::units::degc;
    use proptest::prelude::*;

    #[test]
    fn fits_at_300c() {
        let p = ThermalOil.props(degc(300.0)).unwrap();
        assert!((p.rho.value - 823.0).abs() < 1e-9);
        assert!((p.cp - 2260.0).abs() < 1e-9);
        assert!((p.k - 0.122).abs() < 1e-12);
        // exp(5.25 - 6.0) mPa·s
        assert!((p.mu.value - 0.001 * (-0.75f64).exp()).abs() < 1e-12);
    }

    #[test]
    fn viscosity_has_floor_and_cold_plateau() {
        assert_eq!(ThermalOil::viscosity(10.0), 0.004);
        assert_eq!(ThermalOil::viscosity(600.0), 0.0002);
    }

    proptest! {
        #[test]
        fn properties_positive_in_envelope(t_c in -10.0f64..425.0) {
            let p = ThermalOil.props(degc(t_c)).unwrap();
            prop_assert!(p.rho.value > 0.0);
            prop_assert!(p.cp > 0.0);
            prop_assert!(p.mu.value >= 0.0002);
            prop_assert!(p.k >= 0.08);
        }

        #[test]
        fn density_decreases_with_temperature(a in 0.0f64..400.0, b in 0.0f64..400.0) {
            prop_assume!(b - a > 1e-6);
            let pa = ThermalOil.props(degc(a)).unwrap();
            let pb = ThermalOil.props(degc(b)).unwrap();
            prop_assert!(pa.rho.value > pb.rho.value);
        }
    }
}
