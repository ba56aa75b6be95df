//! Fluid property model trait and validation helpers.

use crate::error::{FluidError, FluidResult};
use pgc_core::units::{Density, DynVisc, Temperature};

/// Specific heat capacity [J/(kg·K)]
pub type SpecHeatCapacity = f64;

/// Thermal conductivity [W/(m·K)]
pub type ThermalConductivity = f64;

/// Transport and caloric properties at one temperature.
#[derive(Clone, Copy, Debug)]
pub struct FluidProps {
    /// Evaluation temperature [K]
    pub t: Temperature,
    /// Density [kg/m³]
    pub rho: Density,
    /// Specific heat capacity [J/(kg·K)]
    pub cp: SpecHeatCapacity,
    /// Dynamic viscosity [Pa·s]
    pub mu: DynVisc,
    /// Thermal conductivity [W/(m·K)]
    pub k: ThermalConductivity,
}

impl FluidProps {
    /// Prandtl number cp·mu/k.
    pub fn prandtl(&self) -> f64 {
        self.cp * self.mu.value / self.k
    }

    pub fn summary(&self) -> String {
        format!(
            "Props(T={:.1}K,ρ={:.1}kg/m³,cp={:.0}J/kg·K,μ={:.2e}Pa·s,k={:.3}W/m·K,Pr={:.2})",
            self.t.value,
            self.rho.value,
            self.cp,
            self.mu.value,
            self.k,
            self.prandtl()
        )
    }
}

/// Trait for liquid heat-transfer fluid models.
///
/// Loops are pumped liquids at near-constant pressure, so properties depend on
/// temperature only. Implementations must be thread-safe to support parallel
/// sweeps.
pub trait FluidModel: Send + Sync {
    /// Human-readable model name.
    fn name(&self) -> &str;

    /// Full property pack at temperature `t`.
    fn props(&self, t: Temperature) -> FluidResult<FluidProps>;

    fn rho(&self, t: Temperature) -> FluidResult<Density> {
        Ok(self.props(t)?.rho)
    }

    fn cp(&self, t: Temperature) -> FluidResult<SpecHeatCapacity> {
        Ok(self.props(t)?.cp)
    }
}

/// Validation helpers for fluid properties.
pub(crate) mod validation {
    use super::*;

    pub fn validate_temperature(t: Temperature) -> FluidResult<()> {
        if !t.value.is_finite() || t.value <= 0.0 {
            return Err(FluidError::NonPhysical {
                what: "temperature must be positive and finite",
            });
        }
        Ok(())
    }

    /// Reject temperatures outside a correlation envelope given in Kelvin.
    pub fn validate_envelope(
        t: Temperature,
        min_k: f64,
        max_k: f64,
        what: &'static str,
    ) -> FluidResult<()> {
        validate_temperature(t)?;
        if t.value < min_k || t.value > max_k {
            return Err(FluidError::OutOfRange {
                what,
                value: t.value,
            });
        }
        Ok(())
    }

    /// Ensure every property in the pack is positive and finite.
    pub fn validate_props(props: &FluidProps) -> FluidResult<()> {
        if !props.rho.value.is_finite() || props.rho.value <= 0.0 {
            return Err(FluidError::NonPhysical {
                what: "density must be positive and finite",
            });
        }
        if !props.cp.is_finite() || props.cp <= 0.0 {
            return Err(FluidError::NonPhysical {
                what: "cp must be positive and finite",
            });
        }
        if !props.mu.value.is_finite() || props.mu.value <= 0.0 {
            return Err(FluidError::NonPhysical {
                what: "viscosity must be positive and finite",
            });
        }
        if !props.k.is_finite() || props.k <= 0.0 {
            return Err(FluidError::NonPhysical {
                what: "conductivity must be positive and finite",
            });
        }
        Ok(())
    }
}
