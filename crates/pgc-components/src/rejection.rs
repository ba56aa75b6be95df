//! Heat rejection path selection.

use crate::dry_cooler::DryCooler;
use crate::error::ComponentResult;
use crate::ground_loop::GroundLoop;
use crate::ports::FluidPort;
use crate::traits::{PortStep, TwoPortComponent};
use pgc_core::units::{Power, Temperature, Time};
use pgc_fluids::FluidModel;

/// Heat leaving the cold loop to its sink.
#[derive(Clone, Copy, Debug)]
pub struct Rejection {
    pub outlet: FluidPort,
    /// Heat leaving the fluid (W)
    pub heat_rejected: Power,
    /// Soil or air temperature the stream exchanged with
    pub sink_temperature: Temperature,
    /// Fan power, zero for the ground loop
    pub fan_power: Power,
    pub effectiveness: f64,
}

/// The cold loop's heat sink.
#[derive(Clone, Debug)]
pub enum HeatRejection {
    GroundLoop(GroundLoop),
    DryCooler(DryCooler),
}

impl HeatRejection {
    pub fn name(&self) -> &str {
        match self {
            HeatRejection::GroundLoop(g) => &g.name,
            HeatRejection::DryCooler(d) => &d.name,
        }
    }

    /// Reject heat at time `t`. `soil` is the current soil state and is
    /// ignored by the dry cooler.
    pub fn reject(
        &self,
        fluid: &dyn FluidModel,
        inlet: FluidPort,
        t: Time,
        soil: Temperature,
    ) -> ComponentResult<Rejection> {
        match self {
            HeatRejection::GroundLoop(g) => g.reject(fluid, inlet, soil),
            HeatRejection::DryCooler(d) => d.reject(fluid, inlet, t),
        }
    }

    /// Soil temperature rate (K/s); zero without a ground loop.
    pub fn soil_rate(&self, rejection: &Rejection, soil: Temperature) -> f64 {
        match self {
            HeatRejection::GroundLoop(g) => g.soil_rate(rejection.heat_rejected, soil),
            HeatRejection::DryCooler(_) => 0.0,
        }
    }

    /// Initial soil state. Dry-cooled plants carry the annual mean ambient
    /// so the state stays physical even though it never moves.
    pub fn initial_soil_temperature(&self) -> Temperature {
        match self {
            HeatRejection::GroundLoop(g) => g.undisturbed,
            HeatRejection::DryCooler(d) => d.ambient_mean,
        }
    }

    /// Bind to the current time and soil temperature.
    pub fn at(&self, t: Time, soil: Temperature) -> BoundRejection<'_> {
        BoundRejection {
            rejection: self,
            t,
            soil,
        }
    }
}

/// Rejector bound to one evaluation instant.
#[derive(Clone, Copy, Debug)]
pub struct BoundRejection<'a> {
    rejection: &'a HeatRejection,
    t: Time,
    soil: Temperature,
}

impl TwoPortComponent for BoundRejection<'_> {
    fn name(&self) -> &str {
        self.rejection.name()
    }

    fn step(&self, fluid: &dyn FluidModel, inlet: FluidPort) -> ComponentResult<PortStep> {
        let r = self.rejection.reject(fluid, inlet, self.t, self.soil)?;
        Ok(PortStep {
            outlet: r.outlet,
            heat_rate: -r.heat_rejected,
            shaft_power: r.fan_power,
            effectiveness: Some(r.effectiveness),
        })
    }
}
