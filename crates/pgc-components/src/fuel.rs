//! Natural gas energy conversions.
//!
//! Fuel is metered in McF (thousand cubic feet) per day and converted on a
//! higher-heating-value basis.

use crate::common::check_finite;
use crate::error::{ComponentError, ComponentResult};
use pgc_core::units::constants::{SECONDS_PER_DAY, SECONDS_PER_HOUR};
use pgc_core::units::{Power, w};

pub const BTU_PER_MCF: f64 = 1_020_000.0;
pub const J_PER_BTU: f64 = 1055.06;
pub const HOURS_PER_DAY: f64 = 24.0;

/// Default share of burner output lost in hot piping before the exchangers.
pub const DEFAULT_PIPE_LOSS_FRACTION: f64 = 0.05;

/// Thermal energy content of one McF in kWh.
pub fn kwh_thermal_per_mcf() -> f64 {
    BTU_PER_MCF * J_PER_BTU / (1000.0 * SECONDS_PER_HOUR)
}

/// Chemical power of a fuel stream (W).
pub fn fuel_power(mcf_per_day: f64) -> Power {
    w(mcf_per_day / SECONDS_PER_DAY * BTU_PER_MCF * J_PER_BTU)
}

/// Fuel rate (McF/day) carrying the given chemical power.
pub fn mcf_per_day_for(power: Power) -> f64 {
    power.value * SECONDS_PER_DAY / (BTU_PER_MCF * J_PER_BTU)
}

/// Burner plus hot piping as seen from the heat exchangers.
#[derive(Clone, Copy, Debug)]
pub struct DeliveryChain {
    pub burner_efficiency: f64,
    pub pipe_loss_fraction: f64,
}

impl Default for DeliveryChain {
    fn default() -> Self {
        Self {
            burner_efficiency: 0.88,
            pipe_loss_fraction: DEFAULT_PIPE_LOSS_FRACTION,
        }
    }
}

impl DeliveryChain {
    pub fn new(burner_efficiency: f64, pipe_loss_fraction: f64) -> ComponentResult<Self> {
        check_finite(burner_efficiency, "burner efficiency")?;
        check_finite(pipe_loss_fraction, "pipe loss fraction")?;
        if burner_efficiency <= 0.0 || burner_efficiency > 1.0 {
            return Err(ComponentError::InvalidArg {
                what: "burner efficiency must be in (0,1]",
            });
        }
        if !(0.0..1.0).contains(&pipe_loss_fraction) {
            return Err(ComponentError::InvalidArg {
                what: "pipe loss fraction must be in [0,1)",
            });
        }
        Ok(Self {
            burner_efficiency,
            pipe_loss_fraction,
        })
    }

    /// Fraction of fuel energy that reaches the hot exchangers.
    pub fn delivery_efficiency(&self) -> f64 {
        self.burner_efficiency * (1.0 - self.pipe_loss_fraction)
    }

    /// Fuel power needed to deliver `heat` to the exchangers.
    pub fn fuel_power_for(&self, heat: Power) -> Power {
        heat / self.delivery_efficiency()
    }

    /// Fuel rate (McF/day) needed to deliver `heat` to the exchangers.
    pub fn mcf_per_day_for(&self, heat: Power) -> f64 {
        mcf_per_day_for(self.fuel_power_for(heat))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kwh_per_mcf() {
        // 1.02e6 BTU * 1055.06 J/BTU / 3.6e6 J/kWh
        assert!((kwh_thermal_per_mcf() - 298.9337).abs() < 1e-3);
    }

    #[test]
    fn fuel_power_inverse() {
        let p = fuel_power(20.0);
        assert!((mcf_per_day_for(p) - 20.0).abs() < 1e-12);
    }

    #[test]
    fn delivery_efficiency_default() {
        let chain = DeliveryChain::default();
        assert!((chain.delivery_efficiency() - 0.836).abs() < 1e-12);
        assert!(DeliveryChain::new(0.0, 0.05).is_err());
        assert!(DeliveryChain::new(0.9, 1.0).is_err());
    }
}
