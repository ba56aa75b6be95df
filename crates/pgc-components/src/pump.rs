//! Circulation pump model.

use crate::common::{check_finite, check_positive};
use crate::error::{ComponentError, ComponentResult};
use crate::ports::FluidPort;
use crate::traits::{PortStep, TwoPortComponent};
use pgc_core::units::{MassRate, Power, Pressure, w};
use pgc_fluids::FluidModel;

/// Fixed-flow circulation pump.
///
/// ## Model
///
/// The pump sets the loop's design mass flow and supplies a fixed pressure
/// rise. It is treated as adiabatic: hydraulic work and motor losses are
/// not returned to the fluid.
///
/// ```text
/// P_shaft = mdot * delta_p / (rho * eta)
/// ```
///
/// ## Sign Conventions
///
/// - `shaft_power()` returns POSITIVE value (power consumed from shaft)
/// - Mass flow is positive in the direction of circulation
#[derive(Clone, Debug)]
pub struct Pump {
    pub name: String,
    /// Design mass flow
    pub mass_flow: MassRate,
    /// Pressure rise (Pa)
    pub delta_p: Pressure,
    /// Wire-to-water efficiency (0 < eta <= 1)
    pub eta: f64,
}

impl Pump {
    pub fn new(
        name: String,
        mass_flow: MassRate,
        delta_p: Pressure,
        eta: f64,
    ) -> ComponentResult<Self> {
        if eta <= 0.0 || eta > 1.0 || !eta.is_finite() {
            return Err(ComponentError::InvalidArg {
                what: "pump efficiency must be in (0,1]",
            });
        }
        check_positive(mass_flow.value, "pump mass flow must be positive")?;
        if !delta_p.value.is_finite() || delta_p.value < 0.0 {
            return Err(ComponentError::InvalidArg {
                what: "pump delta_p cannot be negative",
            });
        }

        Ok(Self {
            name,
            mass_flow,
            delta_p,
            eta,
        })
    }

    pub fn shaft_power(&self, fluid: &dyn FluidModel, inlet: FluidPort) -> ComponentResult<Power> {
        let mdot = inlet.mass_flow.value;
        if mdot.abs() < 1e-9 {
            return Ok(w(0.0));
        }

        let rho = fluid.rho(inlet.temperature)?;
        check_finite(rho.value, "inlet density")?;
        if rho.value <= 1e-6 {
            return Err(ComponentError::NonPhysical {
                what: "density too low for pump power calculation",
            });
        }

        Ok(w(mdot * self.delta_p.value / (rho.value * self.eta)))
    }
}

impl TwoPortComponent for Pump {
    fn name(&self) -> &str {
        &self.name
    }

    fn step(&self, fluid: &dyn FluidModel, inlet: FluidPort) -> ComponentResult<PortStep> {
        Ok(PortStep {
            shaft_power: self.shaft_power(fluid, inlet)?,
            ..PortStep::passthrough(inlet)
        })
    }
}
