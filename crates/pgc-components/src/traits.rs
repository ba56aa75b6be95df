//! Core traits for component models.

use crate::error::ComponentResult;
use crate::ports::FluidPort;
use pgc_core::units::{Power, w};
use pgc_fluids::FluidModel;

/// Outcome of pushing one fluid stream through a two-port component.
#[derive(Clone, Copy, Debug)]
pub struct PortStep {
    pub outlet: FluidPort,
    /// Heat added to the fluid (W); negative when the fluid loses heat.
    pub heat_rate: Power,
    /// Shaft power drawn from the electrical bus (W), pumps and fans.
    pub shaft_power: Power,
    /// Q / Q_max for heat-exchanging elements.
    pub effectiveness: Option<f64>,
}

impl PortStep {
    /// Adiabatic pass-through with no machinery.
    pub fn passthrough(inlet: FluidPort) -> Self {
        Self {
            outlet: inlet,
            heat_rate: w(0.0),
            shaft_power: w(0.0),
            effectiveness: None,
        }
    }
}

/// Trait for components that take an inlet stream to an outlet stream.
///
/// Components are deterministic functions of the inlet port and their fixed
/// parameters. Elements whose driving temperature changes during a run (heat
/// exchanger faces, soil, seasonal air) are bound to that temperature first
/// and the bound view implements this trait.
pub trait TwoPortComponent: Send + Sync {
    /// Component name for debugging and identification.
    fn name(&self) -> &str;

    /// Compute the outlet port, heat rate and shaft power for an inlet port.
    ///
    /// Mass flow passes through unchanged.
    fn step(&self, fluid: &dyn FluidModel, inlet: FluidPort) -> ComponentResult<PortStep>;
}

/// Outcome of tracing a stream through a chain of components.
#[derive(Clone, Debug)]
pub struct LegTrace {
    pub steps: Vec<PortStep>,
}

impl LegTrace {
    /// Port leaving the last component of the chain.
    pub fn outlet(&self) -> Option<FluidPort> {
        self.steps.last().map(|s| s.outlet)
    }

    pub fn total_heat_rate(&self) -> Power {
        self.steps
            .iter()
            .fold(w(0.0), |acc, s| acc + s.heat_rate)
    }

    pub fn total_shaft_power(&self) -> Power {
        self.steps
            .iter()
            .fold(w(0.0), |acc, s| acc + s.shaft_power)
    }
}

/// Push a stream through components in flow order.
pub fn trace_leg(
    fluid: &dyn FluidModel,
    inlet: FluidPort,
    chain: &[&dyn TwoPortComponent],
) -> ComponentResult<LegTrace> {
    let mut steps = Vec::with_capacity(chain.len());
    let mut port = inlet;
    for component in chain {
        let step = component.step(fluid, port)?;
        port = step.outlet;
        steps.push(step);
    }
    Ok(LegTrace { steps })
}
