//! Vertical borehole field with a lumped soil temperature.

use crate::common::{check_finite, check_positive, mean_temperature_exchange};
use crate::error::{ComponentError, ComponentResult};
use crate::ports::FluidPort;
use crate::rejection::Rejection;
use pgc_core::units::{Length, Power, Temperature, k, w};
use pgc_fluids::FluidModel;
use std::f64::consts::PI;

/// Borehole ground loop.
///
/// ## Model
///
/// ```text
/// UA       = N * depth / r_b                 (W/K)
/// Q        = mean-temperature exchange against T_soil
/// C_soil   = N * pi * r_inf^2 * depth * rho_c (J/K)
/// dT_soil/dt = (Q - G_ff (T_soil - T_0)) / C_soil
/// ```
///
/// The far-field recharge conductance `G_ff` is optional. Without it the
/// field is a pure heat dump and the soil temperature rises monotonically
/// with the cumulative rejected energy.
#[derive(Clone, Debug)]
pub struct GroundLoop {
    pub name: String,
    pub borehole_count: usize,
    pub depth: Length,
    /// Borehole thermal resistance per metre of bore (m·K/W)
    pub resistance_per_m: f64,
    /// Radius of soil thermally coupled to each bore
    pub influence_radius: Length,
    /// Volumetric heat capacity of the soil (J/m³·K)
    pub soil_heat_capacity: f64,
    /// Undisturbed soil temperature, also the initial state
    pub undisturbed: Temperature,
    /// Conductance to the far field (W/K)
    pub recharge_conductance: Option<f64>,
}

impl GroundLoop {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: String,
        borehole_count: usize,
        depth: Length,
        resistance_per_m: f64,
        influence_radius: Length,
        soil_heat_capacity: f64,
        undisturbed: Temperature,
        recharge_conductance: Option<f64>,
    ) -> ComponentResult<Self> {
        if borehole_count == 0 {
            return Err(ComponentError::InvalidArg {
                what: "borehole count must be positive",
            });
        }
        check_positive(depth.value, "borehole depth must be positive")?;
        check_positive(resistance_per_m, "borehole resistance must be positive")?;
        check_positive(influence_radius.value, "influence radius must be positive")?;
        check_positive(soil_heat_capacity, "soil heat capacity must be positive")?;
        check_positive(undisturbed.value, "soil temperature must be positive")?;
        if let Some(g) = recharge_conductance
            && (!g.is_finite() || g < 0.0)
        {
            return Err(ComponentError::InvalidArg {
                what: "recharge conductance must be non-negative",
            });
        }

        Ok(Self {
            name,
            borehole_count,
            depth,
            resistance_per_m,
            influence_radius,
            soil_heat_capacity,
            undisturbed,
            recharge_conductance,
        })
    }

    /// Fluid-to-soil conductance of the whole field (W/K).
    pub fn ua(&self) -> f64 {
        self.borehole_count as f64 * self.depth.value / self.resistance_per_m
    }

    /// Effective thermal mass of the coupled soil (J/K).
    pub fn effective_heat_capacity(&self) -> f64 {
        let r = self.influence_radius.value;
        self.borehole_count as f64 * PI * r * r * self.depth.value * self.soil_heat_capacity
    }

    pub fn reject(
        &self,
        fluid: &dyn FluidModel,
        inlet: FluidPort,
        soil: Temperature,
    ) -> ComponentResult<Rejection> {
        check_finite(soil.value, "soil temperature")?;
        let cp = fluid.cp(inlet.temperature)?;
        let ex = mean_temperature_exchange(
            self.ua(),
            inlet.mass_flow.value,
            cp,
            inlet.temperature.value,
            soil.value,
        )?;

        Ok(Rejection {
            outlet: inlet.with_temperature(k(ex.t_out)),
            heat_rejected: w(ex.heat),
            sink_temperature: soil,
            fan_power: w(0.0),
            effectiveness: ex.effectiveness,
        })
    }

    /// Heat returned to the coupled soil volume from the far field (W).
    pub fn recharge(&self, soil: Temperature) -> Power {
        match self.recharge_conductance {
            Some(g) => w(g * (self.undisturbed.value - soil.value)),
            None => w(0.0),
        }
    }

    /// Soil temperature rate (K/s) for a given rejection.
    pub fn soil_rate(&self, heat_rejected: Power, soil: Temperature) -> f64 {
        (heat_rejected.value + self.recharge(soil).value) / self.effective_heat_capacity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pgc_core::units::{kgps, m};
    use pgc_fluids::WaterGlycol;

    fn field(recharge: Option<f64>) -> GroundLoop {
        GroundLoop::new(
            "ground".into(),
            21,
            m(150.0),
            0.2,
            m(3.0),
            2.2e6,
            k(285.15),
            recharge,
        )
        .unwrap()
    }

    #[test]
    fn conductance_and_capacity() {
        let g = field(None);
        assert!((g.ua() - 21.0 * 150.0 / 0.2).abs() < 1e-9);
        let expected = 21.0 * PI * 9.0 * 150.0 * 2.2e6;
        assert!((g.effective_heat_capacity() - expected).abs() / expected < 1e-12);
    }

    #[test]
    fn warm_fluid_heats_soil() {
        let g = field(None);
        let soil = k(285.15);
        let r = g
            .reject(&WaterGlycol, FluidPort::new(k(310.0), kgps(4.0)), soil)
            .unwrap();
        assert!(r.heat_rejected.value > 0.0);
        assert!(r.outlet.temperature.value < 310.0);
        assert!(r.outlet.temperature.value >= 285.15);
        assert!(g.soil_rate(r.heat_rejected, soil) > 0.0);
    }

    #[test]
    fn recharge_pulls_toward_undisturbed() {
        let g = field(Some(5_000.0));
        let warm = k(295.15);
        assert!(g.recharge(warm).value < 0.0);
        assert!(g.soil_rate(w(0.0), warm) < 0.0);
        assert_eq!(field(None).soil_rate(w(0.0), warm), 0.0);
    }

    #[test]
    fn invalid_field() {
        assert!(
            GroundLoop::new("g".into(), 0, m(150.0), 0.2, m(3.0), 2.2e6, k(285.0), None)
                .is_err()
        );
        assert!(
            GroundLoop::new("g".into(), 4, m(150.0), 0.2, m(3.0), 2.2e6, k(285.0), Some(-1.0))
                .is_err()
        );
    }
}
