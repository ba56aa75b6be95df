//! Fluid and heat connectors.
//!
//! A `FluidPort` carries mass flow in the direction of travel around its
//! loop; seen from the upstream side of a connection the same stream is
//! leaving, which `mirrored()` expresses with a sign flip. Connected ports
//! therefore sum to zero. `HeatPort` flow is positive into the component that
//! owns the port, with the same zero-sum rule across a thermal contact.

use pgc_core::units::{MassRate, Power, Temperature};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FluidPort {
    pub temperature: Temperature,
    pub mass_flow: MassRate,
}

impl FluidPort {
    pub fn new(temperature: Temperature, mass_flow: MassRate) -> Self {
        Self {
            temperature,
            mass_flow,
        }
    }

    /// Same stream viewed from the other side of the connection.
    pub fn mirrored(&self) -> Self {
        Self {
            temperature: self.temperature,
            mass_flow: -self.mass_flow,
        }
    }

    /// Same flow, new temperature.
    pub fn with_temperature(&self, temperature: Temperature) -> Self {
        Self {
            temperature,
            mass_flow: self.mass_flow,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeatPort {
    pub temperature: Temperature,
    pub heat_flow: Power,
}

impl HeatPort {
    pub fn new(temperature: Temperature, heat_flow: Power) -> Self {
        Self {
            temperature,
            heat_flow,
        }
    }

    pub fn mirrored(&self) -> Self {
        Self {
            temperature: self.temperature,
            heat_flow: -self.heat_flow,
        }
    }
}

/// Net mass flow into a junction (kg/s). Zero for a conserving connection.
pub fn junction_imbalance(ports: &[FluidPort]) -> f64 {
    ports.iter().map(|p| p.mass_flow.value).sum()
}

/// Net heat flow across a thermal contact (W). Zero when energy is conserved.
pub fn heat_imbalance(ports: &[HeatPort]) -> f64 {
    ports.iter().map(|p| p.heat_flow.value).sum()
}
