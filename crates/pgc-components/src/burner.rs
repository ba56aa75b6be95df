//! Gas burner model.

use crate::common::{check_finite, check_positive};
use crate::error::{ComponentError, ComponentResult};
use crate::fuel;
use crate::ports::FluidPort;
use crate::traits::{PortStep, TwoPortComponent};
use pgc_core::units::{Power, Temperature, w};
use pgc_fluids::FluidModel;

/// Natural-gas burner heating the hot loop to a fixed set point.
///
/// ## Model
///
/// ```text
/// P_th  = mcf_per_day / 86400 * 1_020_000 BTU/McF * 1055.06 J/BTU * eta
/// T_out = T_set
/// duty  = mdot * cp * (T_set - T_return)
/// ```
///
/// The burner always fires at rated output. The duty is what the loop
/// actually absorbs to reach the set point; the difference is reported as
/// the firing margin and never fails a run.
#[derive(Clone, Debug)]
pub struct Burner {
    pub name: String,
    /// Fuel feed (McF/day)
    pub fuel_mcf_per_day: f64,
    /// Thermal efficiency (0 < eta <= 1)
    pub efficiency: f64,
    /// Hot loop supply set point
    pub setpoint: Temperature,
}

impl Burner {
    pub fn new(
        name: String,
        fuel_mcf_per_day: f64,
        efficiency: f64,
        setpoint: Temperature,
    ) -> ComponentResult<Self> {
        check_finite(fuel_mcf_per_day, "fuel flow")?;
        if fuel_mcf_per_day < 0.0 {
            return Err(ComponentError::InvalidArg {
                what: "fuel flow cannot be negative",
            });
        }
        if !efficiency.is_finite() || efficiency <= 0.0 || efficiency > 1.0 {
            return Err(ComponentError::InvalidArg {
                what: "burner efficiency must be in (0,1]",
            });
        }
        check_positive(setpoint.value, "burner set point must be positive")?;

        Ok(Self {
            name,
            fuel_mcf_per_day,
            efficiency,
            setpoint,
        })
    }

    /// Chemical power in the fuel feed.
    pub fn fuel_power(&self) -> Power {
        fuel::fuel_power(self.fuel_mcf_per_day)
    }

    /// Rated thermal output.
    pub fn thermal_power(&self) -> Power {
        self.fuel_power() * self.efficiency
    }

    /// Heat the returning stream absorbs to reach the set point.
    pub fn duty(&self, fluid: &dyn FluidModel, inlet: FluidPort) -> ComponentResult<Power> {
        let cp = fluid.cp(inlet.temperature)?;
        let duty = inlet.mass_flow.value * cp * (self.setpoint.value - inlet.temperature.value);
        check_finite(duty, "burner duty")?;
        Ok(w(duty))
    }

    /// Rated output minus duty; negative when the loop asks for more heat
    /// than the burner can supply.
    pub fn firing_margin(&self, fluid: &dyn FluidModel, inlet: FluidPort) -> ComponentResult<Power> {
        Ok(self.thermal_power() - self.duty(fluid, inlet)?)
    }
}

impl TwoPortComponent for Burner {
    fn name(&self) -> &str {
        &self.name
    }

    fn step(&self, fluid: &dyn FluidModel, inlet: FluidPort) -> ComponentResult<PortStep> {
        let duty = self.duty(fluid, inlet)?;
        Ok(PortStep {
            outlet: inlet.with_temperature(self.setpoint),
            heat_rate: duty,
            shaft_power: w(0.0),
            effectiveness: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pgc_core::units::{degc, k, kgps};
    use pgc_fluids::WaterGlycol;

    #[test]
    fn thermal_output_exact() {
        let burner = Burner::new("burner".into(), 20.0, 0.88, degc(200.0)).unwrap();
        let expected = 20.0 / 86400.0 * 1_020_000.0 * 1055.06 * 0.88;
        assert_eq!(burner.thermal_power().value, expected);
    }

    #[test]
    fn outlet_at_setpoint() {
        let burner = Burner::new("burner".into(), 20.0, 0.88, k(473.15)).unwrap();
        let step = burner
            .step(&WaterGlycol, FluidPort::new(k(463.15), kgps(4.0)))
            .unwrap();
        assert_eq!(step.outlet.temperature.value, 473.15);
        assert_eq!(step.outlet.mass_flow.value, 4.0);
        assert!((step.heat_rate.value - 4.0 * 3400.0 * 10.0).abs() < 1e-6);
    }

    #[test]
    fn margin_goes_negative_when_undersized() {
        let burner = Burner::new("burner".into(), 1.0, 0.88, k(473.15)).unwrap();
        let margin = burner
            .firing_margin(&WaterGlycol, FluidPort::new(k(400.0), kgps(4.0)))
            .unwrap();
        assert!(margin.value < 0.0);
    }

    #[test]
    fn invalid_parameters() {
        assert!(Burner::new("b".into(), -1.0, 0.88, k(473.15)).is_err());
        assert!(Burner::new("b".into(), 20.0, 1.2, k(473.15)).is_err());
        assert!(Burner::new("b".into(), 20.0, 0.88, k(0.0)).is_err());
    }
}
