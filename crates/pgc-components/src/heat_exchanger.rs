//! Fluid-to-TEG-face heat exchanger.

use crate::common::{check_finite, check_positive, mean_temperature_exchange};
use crate::error::ComponentResult;
use crate::ports::{FluidPort, HeatPort};
use crate::traits::{PortStep, TwoPortComponent};
use pgc_core::units::{Power, Temperature, k, w};
use pgc_fluids::FluidModel;

/// Finned exchanger coupling a loop stream to the TEG face.
///
/// The transfer area scales with the module count, so the total conductance
/// is `UA = ua_per_unit * unit_count`. Heat follows the mean fluid
/// temperature against the face temperature.
#[derive(Clone, Debug)]
pub struct HeatExchanger {
    pub name: String,
    /// Conductance per TEG cell (W/K)
    pub ua_per_unit: f64,
    pub unit_count: usize,
}

/// Exchanger operating point against a given face temperature.
#[derive(Clone, Copy, Debug)]
pub struct HxDuty {
    pub outlet: FluidPort,
    /// Heat from the fluid into the face (W); negative on the cold side.
    pub heat_to_face: Power,
    /// Exchanger-side face port; flow is positive into the exchanger.
    pub face_port: HeatPort,
    pub effectiveness: f64,
}

impl HeatExchanger {
    pub fn new(name: String, ua_per_unit: f64, unit_count: usize) -> ComponentResult<Self> {
        check_positive(ua_per_unit, "exchanger UA per unit must be positive")?;
        if unit_count == 0 {
            return Err(crate::ComponentError::InvalidArg {
                what: "exchanger unit count must be positive",
            });
        }
        Ok(Self {
            name,
            ua_per_unit,
            unit_count,
        })
    }

    /// Total conductance (W/K).
    pub fn ua(&self) -> f64 {
        self.ua_per_unit * self.unit_count as f64
    }

    pub fn exchange(
        &self,
        fluid: &dyn FluidModel,
        inlet: FluidPort,
        face: Temperature,
    ) -> ComponentResult<HxDuty> {
        check_finite(face.value, "face temperature")?;
        let cp = fluid.cp(inlet.temperature)?;
        let ex = mean_temperature_exchange(
            self.ua(),
            inlet.mass_flow.value,
            cp,
            inlet.temperature.value,
            face.value,
        )?;

        Ok(HxDuty {
            outlet: inlet.with_temperature(k(ex.t_out)),
            heat_to_face: w(ex.heat),
            face_port: HeatPort::new(face, w(-ex.heat)),
            effectiveness: ex.effectiveness,
        })
    }

    /// Bind the exchanger to a face temperature.
    pub fn facing(&self, face: Temperature) -> FacingExchanger<'_> {
        FacingExchanger { hx: self, face }
    }
}

/// Exchanger bound to a face temperature for one evaluation.
#[derive(Clone, Copy, Debug)]
pub struct FacingExchanger<'a> {
    hx: &'a HeatExchanger,
    face: Temperature,
}

impl TwoPortComponent for FacingExchanger<'_> {
    fn name(&self) -> &str {
        &self.hx.name
    }

    fn step(&self, fluid: &dyn FluidModel, inlet: FluidPort) -> ComponentResult<PortStep> {
        let duty = self.hx.exchange(fluid, inlet, self.face)?;
        Ok(PortStep {
            outlet: duty.outlet,
            heat_rate: -duty.heat_to_face,
            shaft_power: w(0.0),
            effectiveness: Some(duty.effectiveness),
        })
    }
}
