//! Common utilities for component calculations.

use crate::error::{ComponentError, ComponentResult};
use pgc_core::numeric::ensure_finite;

/// Small epsilon for mass flow rate (kg/s)
pub const EPSILON_MDOT: f64 = 1e-9;

/// Ensure a value is finite, returning ComponentError if not.
pub fn check_finite(value: f64, what: &'static str) -> ComponentResult<()> {
    ensure_finite(value, what).map_err(|_| ComponentError::NonPhysical { what })?;
    Ok(())
}

/// Ensure a construction parameter is finite and strictly positive.
pub fn check_positive(value: f64, what: &'static str) -> ComponentResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ComponentError::InvalidArg { what });
    }
    Ok(())
}

/// Clamp a value between min and max.
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Result of a fluid stream exchanging heat with a fixed reference temperature.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Exchange {
    /// Heat leaving the fluid toward the reference (W); negative when the
    /// fluid is heated.
    pub heat: f64,
    /// Outlet temperature (K)
    pub t_out: f64,
    /// Q / Q_max, in [0, 1]
    pub effectiveness: f64,
}

/// Heat exchange driven by the mean fluid temperature.
///
/// ```text
/// Q     = UA (T_mean - T_ref),  T_mean = (T_in + T_out) / 2
/// T_out = T_in - Q / (mdot cp)
/// ```
///
/// Eliminating `T_out` gives `Q = eff * C * (T_in - T_ref)` with
/// `eff = NTU / (1 + NTU/2)`. For `NTU > 2` the mean-temperature relation
/// would push the outlet past `T_ref`, so `eff` is clamped to 1 and the
/// outlet settles on the reference temperature instead.
///
/// Flow below `EPSILON_MDOT` is raised to it, so a stalled stream converges
/// on `T_ref` while carrying negligible heat.
pub fn mean_temperature_exchange(
    ua: f64,
    mdot: f64,
    cp: f64,
    t_in: f64,
    t_ref: f64,
) -> ComponentResult<Exchange> {
    check_finite(ua, "UA")?;
    check_finite(mdot, "mass flow")?;
    check_finite(cp, "cp")?;
    check_finite(t_in, "inlet temperature")?;
    check_finite(t_ref, "reference temperature")?;
    if ua < 0.0 {
        return Err(ComponentError::NonPhysical {
            what: "UA must be non-negative",
        });
    }
    if cp <= 0.0 {
        return Err(ComponentError::NonPhysical {
            what: "cp must be positive",
        });
    }

    let capacity_rate = mdot.max(EPSILON_MDOT) * cp;
    let ntu = ua / capacity_rate;
    let effectiveness = clamp(ntu / (1.0 + 0.5 * ntu), 0.0, 1.0);

    let heat = effectiveness * capacity_rate * (t_in - t_ref);
    let t_out = clamp(
        t_in - effectiveness * (t_in - t_ref),
        t_in.min(t_ref),
        t_in.max(t_ref),
    );

    Ok(Exchange {
        heat,
        t_out,
        effectiveness,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(5.0, 0.0, 10.0), 5.0);
        assert_eq!(clamp(-1.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp(11.0, 0.0, 10.0), 10.0);
    }

    #[test]
    fn test_check_finite() {
        assert!(check_finite(1.0, "test").is_ok());
        assert!(check_finite(f64::INFINITY, "test").is_err());
        assert!(check_finite(f64::NAN, "test").is_err());
    }

    #[test]
    fn exchange_energy_balance() {
        // NTU = 1 -> eff = 2/3
        let ex = mean_temperature_exchange(1000.0, 0.5, 2000.0, 400.0, 300.0).unwrap();
        assert!((ex.effectiveness - 2.0 / 3.0).abs() < 1e-12);
        let c = 0.5 * 2000.0;
        assert!((ex.heat - c * (400.0 - ex.t_out)).abs() < 1e-9);
        // Mean-temperature relation holds below the clamp
        let t_mean = 0.5 * (400.0 + ex.t_out);
        assert!((ex.heat - 1000.0 * (t_mean - 300.0)).abs() < 1e-9);
    }

    #[test]
    fn exchange_clamps_at_high_ntu() {
        let ex = mean_temperature_exchange(1e6, 0.1, 4000.0, 350.0, 290.0).unwrap();
        assert_eq!(ex.effectiveness, 1.0);
        assert_eq!(ex.t_out, 290.0);
    }

    #[test]
    fn exchange_zero_flow_is_guarded() {
        let ex = mean_temperature_exchange(50.0, 0.0, 3400.0, 350.0, 290.0).unwrap();
        assert!(ex.heat.is_finite());
        assert!(ex.heat.abs() < 1e-3);
        assert_eq!(ex.t_out, 290.0);
    }

    #[test]
    fn exchange_rejects_negative_ua() {
        assert!(mean_temperature_exchange(-1.0, 1.0, 3400.0, 350.0, 290.0).is_err());
    }
}
