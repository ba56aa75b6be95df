//! Forced-air dry cooler with seasonal ambient.

use crate::common::{check_finite, check_positive, mean_temperature_exchange};
use crate::error::{ComponentError, ComponentResult};
use crate::ports::FluidPort;
use crate::rejection::Rejection;
use pgc_core::units::constants::{DAYS_PER_YEAR, SECONDS_PER_DAY};
use pgc_core::units::{Power, Temperature, Time, k, w};
use pgc_fluids::FluidModel;
use std::f64::consts::PI;

/// Fan power per watt rejected (15 W per kW).
pub const DEFAULT_FAN_POWER_PER_WATT: f64 = 0.015;

/// Air-cooled rejector.
///
/// ```text
/// T_amb(t) = mean + amplitude * cos(2 pi (day(t) - peak_day) / 365)
/// Q        = mean-temperature exchange against T_amb(t)
/// P_fan    = fan_power_per_watt * max(Q, 0)
/// ```
#[derive(Clone, Debug)]
pub struct DryCooler {
    pub name: String,
    /// Coil conductance at design airflow (W/K)
    pub ua: f64,
    pub ambient_mean: Temperature,
    /// Seasonal swing about the mean (K)
    pub ambient_amplitude: f64,
    /// Day of year of the warmest ambient
    pub peak_day: f64,
    pub fan_power_per_watt: f64,
}

impl DryCooler {
    pub fn new(
        name: String,
        ua: f64,
        ambient_mean: Temperature,
        ambient_amplitude: f64,
        peak_day: f64,
        fan_power_per_watt: f64,
    ) -> ComponentResult<Self> {
        check_positive(ua, "dry cooler UA must be positive")?;
        check_positive(ambient_mean.value, "ambient temperature must be positive")?;
        if !ambient_amplitude.is_finite() || ambient_amplitude < 0.0 {
            return Err(ComponentError::InvalidArg {
                what: "ambient amplitude must be non-negative",
            });
        }
        if ambient_amplitude >= ambient_mean.value {
            return Err(ComponentError::InvalidArg {
                what: "ambient amplitude exceeds mean temperature",
            });
        }
        check_finite(peak_day, "peak day")?;
        if !fan_power_per_watt.is_finite() || fan_power_per_watt < 0.0 {
            return Err(ComponentError::InvalidArg {
                what: "fan power ratio must be non-negative",
            });
        }

        Ok(Self {
            name,
            ua,
            ambient_mean,
            ambient_amplitude,
            peak_day,
            fan_power_per_watt,
        })
    }

    /// Ambient air temperature at simulation time `t`.
    pub fn ambient(&self, t: Time) -> Temperature {
        let day = t.value / SECONDS_PER_DAY;
        let phase = 2.0 * PI * (day - self.peak_day) / DAYS_PER_YEAR;
        k(self.ambient_mean.value + self.ambient_amplitude * phase.cos())
    }

    pub fn fan_power(&self, heat_rejected: Power) -> Power {
        w(self.fan_power_per_watt * heat_rejected.value.max(0.0))
    }

    pub fn reject(
        &self,
        fluid: &dyn FluidModel,
        inlet: FluidPort,
        t: Time,
    ) -> ComponentResult<Rejection> {
        let ambient = self.ambient(t);
        let cp = fluid.cp(inlet.temperature)?;
        let ex = mean_temperature_exchange(
            self.ua,
            inlet.mass_flow.value,
            cp,
            inlet.temperature.value,
            ambient.value,
        )?;
        let heat_rejected = w(ex.heat);

        Ok(Rejection {
            outlet: inlet.with_temperature(k(ex.t_out)),
            heat_rejected,
            sink_temperature: ambient,
            fan_power: self.fan_power(heat_rejected),
            effectiveness: ex.effectiveness,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pgc_core::units::{kgps, s};
    use pgc_fluids::WaterGlycol;

    fn cooler() -> DryCooler {
        DryCooler::new(
            "dry".into(),
            10_000.0,
            k(288.15),
            12.0,
            200.0,
            DEFAULT_FAN_POWER_PER_WATT,
        )
        .unwrap()
    }

    #[test]
    fn ambient_peaks_on_peak_day() {
        let dc = cooler();
        let peak = dc.ambient(s(200.0 * SECONDS_PER_DAY));
        assert!((peak.value - 300.15).abs() < 1e-9);
        let trough = dc.ambient(s((200.0 - 182.5) * SECONDS_PER_DAY));
        assert!((trough.value - 276.15).abs() < 1e-9);
    }

    #[test]
    fn fan_power_scales_with_rejection() {
        let dc = cooler();
        assert!((dc.fan_power(w(100_000.0)).value - 1_500.0).abs() < 1e-9);
        assert_eq!(dc.fan_power(w(-5_000.0)).value, 0.0);
    }

    #[test]
    fn summer_rejects_less_than_winter() {
        let dc = cooler();
        let inlet = FluidPort::new(k(320.0), kgps(4.0));
        let summer = dc.reject(&WaterGlycol, inlet, s(200.0 * SECONDS_PER_DAY)).unwrap();
        let winter = dc.reject(&WaterGlycol, inlet, s(17.5 * SECONDS_PER_DAY)).unwrap();
        assert!(summer.heat_rejected.value < winter.heat_rejected.value);
        assert!(summer.fan_power.value > 0.0);
    }

    #[test]
    fn rejects_bad_amplitude() {
        assert!(DryCooler::new("d".into(), 1.0, k(288.0), -1.0, 0.0, 0.015).is_err());
        assert!(DryCooler::new("d".into(), 1.0, k(288.0), 300.0, 0.0, 0.015).is_err());
    }
}
