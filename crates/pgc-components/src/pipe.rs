//! Insulated pipe run losing heat to ambient.

use crate::common::{check_positive, mean_temperature_exchange};
use crate::error::ComponentResult;
use crate::ports::FluidPort;
use crate::traits::{PortStep, TwoPortComponent};
use pgc_core::units::{Length, Temperature, k, w};
use pgc_fluids::FluidModel;
use std::f64::consts::PI;

/// Pipe run with insulation U-value referenced to the inner surface.
///
/// `UA = U * pi * D * L`, exchanged against a fixed ambient temperature with
/// the mean-temperature relation in [`mean_temperature_exchange`].
#[derive(Clone, Debug)]
pub struct Pipe {
    pub name: String,
    pub length: Length,
    pub diameter: Length,
    /// Insulation U-value (W/m²·K)
    pub u_value: f64,
    pub ambient: Temperature,
}

impl Pipe {
    pub fn new(
        name: String,
        length: Length,
        diameter: Length,
        u_value: f64,
        ambient: Temperature,
    ) -> ComponentResult<Self> {
        check_positive(length.value, "pipe length must be positive")?;
        check_positive(diameter.value, "pipe diameter must be positive")?;
        if !u_value.is_finite() || u_value < 0.0 {
            return Err(crate::ComponentError::InvalidArg {
                what: "pipe U-value must be non-negative",
            });
        }
        check_positive(ambient.value, "ambient temperature must be positive")?;

        Ok(Self {
            name,
            length,
            diameter,
            u_value,
            ambient,
        })
    }

    /// Loss conductance (W/K).
    pub fn ua(&self) -> f64 {
        self.u_value * PI * self.diameter.value * self.length.value
    }
}

impl TwoPortComponent for Pipe {
    fn name(&self) -> &str {
        &self.name
    }

    fn step(&self, fluid: &dyn FluidModel, inlet: FluidPort) -> ComponentResult<PortStep> {
        let cp = fluid.cp(inlet.temperature)?;
        let ex = mean_temperature_exchange(
            self.ua(),
            inlet.mass_flow.value,
            cp,
            inlet.temperature.value,
            self.ambient.value,
        )?;

        Ok(PortStep {
            outlet: inlet.with_temperature(k(ex.t_out)),
            heat_rate: w(-ex.heat),
            shaft_power: w(0.0),
            effectiveness: Some(ex.effectiveness),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pgc_core::units::{k, kgps, m};
    use pgc_fluids::WaterGlycol;

    fn hot_pipe() -> Pipe {
        Pipe::new("hot_pipe".into(), m(30.0), m(0.038), 0.5, k(293.15)).unwrap()
    }

    #[test]
    fn ua_from_geometry() {
        let pipe = hot_pipe();
        assert!((pipe.ua() - 0.5 * PI * 0.038 * 30.0).abs() < 1e-12);
    }

    #[test]
    fn hot_fluid_cools() {
        let pipe = hot_pipe();
        let step = pipe
            .step(&WaterGlycol, FluidPort::new(k(473.15), kgps(4.0)))
            .unwrap();
        assert!(step.outlet.temperature.value < 473.15);
        assert!(step.outlet.temperature.value > 293.15);
        assert!(step.heat_rate.value < 0.0);
        let balance = 4.0 * 3400.0 * (473.15 - step.outlet.temperature.value);
        assert!((balance + step.heat_rate.value).abs() < 1e-6);
    }

    #[test]
    fn invalid_geometry() {
        assert!(Pipe::new("p".into(), m(0.0), m(0.038), 0.5, k(293.15)).is_err());
        assert!(Pipe::new("p".into(), m(10.0), m(-0.1), 0.5, k(293.15)).is_err());
        assert!(Pipe::new("p".into(), m(10.0), m(0.038), -0.5, k(293.15)).is_err());
    }
}
