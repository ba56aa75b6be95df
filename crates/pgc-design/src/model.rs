//! Steady design-point model of the TEG stack and its loops.
//!
//! Evaluates one operating point: the series resistance chain per TEG
//! (hot convection, hot interface, module, cold interface, cold convection)
//! between the two bulk fluid temperatures, the flows needed to carry that
//! heat at the target fluid temperature change, hydraulic losses and the
//! parasitic loads that come off the gross electrical output.

use crate::correlations::{
    DEFAULT_ROUGHNESS_M, darcy_pressure_drop, duct_pressure_drop, friction_factor,
    nusselt_dittus_boelter,
};
use crate::error::{DesignError, DesignResult};
use crate::geometry::HxGeometry;
use pgc_components::TegModule;
use pgc_components::teg::MARLOW_TG1_1008;
use pgc_core::units::constants::KELVIN_OFFSET;
use pgc_core::units::{Temperature, degc};
use pgc_fluids::{FluidKind, FluidProps};
use tracing::debug;

/// m³/s to US gallons per minute.
pub const GPM_PER_M3S: f64 = 15850.3;
/// TEGs served by one power-conditioning board.
pub const TEGS_PER_PCM: usize = 36;
/// PCM boards per controller node.
pub const PCMS_PER_NODE: usize = 3;
pub const PCM_POWER_W: f64 = 1.5;
pub const NODE_POWER_W: f64 = 3.0;
/// Dry cooler fan estimate, W per kW rejected.
pub const FAN_W_PER_KW: f64 = 15.0;
/// Manifold run allowed per tower (m)
pub const MANIFOLD_LENGTH_PER_TOWER_M: f64 = 2.0;
/// Cold loop pressure drop relative to the hot loop.
pub const COLD_DP_RATIO: f64 = 0.9;
/// Fixed-point passes on flow rate and convection.
const FLOW_PASSES: usize = 10;
/// Resistance used when convection vanishes (K/W)
const R_CONV_STAGNANT: f64 = 999.0;

/// Inputs to one design-point evaluation.
#[derive(Clone, Debug)]
pub struct DesignConfig {
    pub teg_count: usize,
    pub module: TegModule,
    pub hx: HxGeometry,
    pub hot_fluid: FluidKind,
    pub cold_fluid: FluidKind,
    /// Hot fluid temperature entering the exchangers
    pub hot_inlet: Temperature,
    /// Cold fluid temperature entering the exchangers
    pub cold_inlet: Temperature,
    /// Fluid temperature change across each exchanger (K)
    pub fluid_dt: f64,
    pub tegs_per_panel: usize,
    pub panels_per_tower: usize,
    pub pump_efficiency: f64,
    pub hot_pipe_length_m: f64,
    pub cold_pipe_length_m: f64,
    pub pipe_id_m: f64,
}

impl Default for DesignConfig {
    fn default() -> Self {
        Self::new(MARLOW_TG1_1008, 1620, degc(200.0), degc(40.0))
    }
}

impl DesignConfig {
    /// Reference geometry with fluids picked from the hot inlet temperature.
    pub fn new(
        module: TegModule,
        teg_count: usize,
        hot_inlet: Temperature,
        cold_inlet: Temperature,
    ) -> Self {
        let fluid = FluidKind::for_hot_temperature(hot_inlet);
        Self {
            teg_count,
            module,
            hx: HxGeometry::default(),
            hot_fluid: fluid,
            cold_fluid: fluid,
            hot_inlet,
            cold_inlet,
            fluid_dt: 10.0,
            tegs_per_panel: 16,
            panels_per_tower: 5,
            pump_efficiency: 0.65,
            hot_pipe_length_m: 30.0,
            cold_pipe_length_m: 30.0,
            pipe_id_m: 0.038,
        }
    }

    pub fn with_teg_count(&self, teg_count: usize) -> Self {
        Self {
            teg_count,
            ..self.clone()
        }
    }

    fn validate(&self) -> DesignResult<()> {
        if self.teg_count == 0 {
            return Err(DesignError::InvalidArg {
                what: "TEG count must be positive",
            });
        }
        if !self.hx.is_valid() {
            return Err(DesignError::InvalidArg {
                what: "exchanger geometry must be positive",
            });
        }
        if !self.fluid_dt.is_finite() || self.fluid_dt <= 0.0 {
            return Err(DesignError::InvalidArg {
                what: "fluid temperature change must be positive",
            });
        }
        if self.hot_inlet.value <= self.cold_inlet.value {
            return Err(DesignError::InvalidArg {
                what: "hot inlet must be above cold inlet",
            });
        }
        if self.pump_efficiency <= 0.0 || self.pump_efficiency > 1.0 {
            return Err(DesignError::InvalidArg {
                what: "pump efficiency must be in (0,1]",
            });
        }
        if self.tegs_per_panel == 0 || self.panels_per_tower == 0 {
            return Err(DesignError::InvalidArg {
                what: "panel layout must be positive",
            });
        }
        if self.pipe_id_m <= 0.0 || self.hot_pipe_length_m < 0.0 || self.cold_pipe_length_m < 0.0
        {
            return Err(DesignError::InvalidArg {
                what: "pipe dimensions must be positive",
            });
        }
        Ok(())
    }
}

/// Per-TEG thermal resistances (K/W).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ResistanceChain {
    pub hot_conv: f64,
    pub hot_tim: f64,
    pub teg: f64,
    pub cold_tim: f64,
    pub cold_conv: f64,
}

impl ResistanceChain {
    pub fn total(&self) -> f64 {
        self.hot_conv + self.hot_tim + self.teg + self.cold_tim + self.cold_conv
    }

    /// Share of the total drop that lands across the module.
    pub fn teg_fraction(&self) -> f64 {
        self.teg / self.total()
    }
}

/// Temperatures through one stack (C).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TemperatureProfile {
    pub hot_fluid_avg_c: f64,
    pub hot_fin_surface_c: f64,
    pub teg_hot_c: f64,
    pub teg_cold_c: f64,
    pub cold_fin_surface_c: f64,
    pub cold_fluid_avg_c: f64,
}

/// Hot- and cold-side flow figures.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FlowSummary {
    pub hot_vol_flow_m3s: f64,
    pub hot_gpm: f64,
    pub hot_channel_velocity_ms: f64,
    pub hot_reynolds: f64,
    pub hot_nusselt: f64,
    /// W/m²-K
    pub hot_h_conv: f64,
    pub cold_vol_flow_m3s: f64,
    pub cold_gpm: f64,
}

/// Hot-side pressure drop breakdown (Pa).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PressureDrops {
    pub hot_channel_pa: f64,
    pub hot_manifold_pa: f64,
    pub hot_pipe_pa: f64,
    pub cold_total_pa: f64,
}

impl PressureDrops {
    pub fn hot_total_pa(&self) -> f64 {
        self.hot_channel_pa + self.hot_manifold_pa + self.hot_pipe_pa
    }
}

/// Electrical loads taken off the gross output (W).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Parasitics {
    pub pump_hot_w: f64,
    pub pump_cold_w: f64,
    pub fan_w: f64,
    pub electronics_w: f64,
}

impl Parasitics {
    pub fn pumps_w(&self) -> f64 {
        self.pump_hot_w + self.pump_cold_w
    }

    pub fn total_w(&self) -> f64 {
        self.pumps_w() + self.fan_w + self.electronics_w
    }
}

/// Result of one design-point evaluation.
#[derive(Clone, Debug)]
pub struct DesignPoint {
    pub teg_count: usize,
    pub module_name: &'static str,
    pub hot_fluid_name: String,
    pub cold_fluid_name: String,
    pub dt_across_teg_c: f64,
    pub heat_per_teg_w: f64,
    pub power_per_teg_w: f64,
    pub teg_efficiency: f64,
    pub teg_voltage_v: f64,
    pub teg_current_a: f64,
    pub resistances: ResistanceChain,
    pub temperatures: TemperatureProfile,
    pub flows: FlowSummary,
    pub pressure: PressureDrops,
    pub parasitics: Parasitics,
    pub gross_electrical_w: f64,
    pub total_heat_input_w: f64,
    pub total_heat_rejection_w: f64,
    pub net_electrical_w: f64,
    pub parasitic_fraction: f64,
}

impl DesignPoint {
    pub fn net_electrical_kw(&self) -> f64 {
        self.net_electrical_w / 1000.0
    }
}

struct SideConvection {
    vol_flow: f64,
    velocity: f64,
    reynolds: f64,
    nusselt: f64,
    h: f64,
    r_conv: f64,
}

/// Convection on one side for a given per-TEG heat flow.
fn side_convection(
    props: &FluidProps,
    hx: &HxGeometry,
    teg_count: usize,
    total_heat: f64,
    fluid_dt: f64,
    heating: bool,
) -> SideConvection {
    let mass_flow = total_heat / (props.cp * fluid_dt);
    let vol_flow = mass_flow / props.rho.value;
    let velocity = vol_flow / teg_count as f64 / hx.total_flow_area();
    side_convection_at(props, hx, vol_flow, velocity, heating)
}

fn side_convection_at(
    props: &FluidProps,
    hx: &HxGeometry,
    vol_flow: f64,
    velocity: f64,
    heating: bool,
) -> SideConvection {
    let dh = hx.hydraulic_diameter();
    let reynolds = props.rho.value * velocity * dh / props.mu.value;
    let nusselt = nusselt_dittus_boelter(reynolds, props.prandtl(), heating);
    let h = nusselt * props.k / dh;
    let r_conv = if h > 0.0 {
        1.0 / (h * hx.wetted_area())
    } else {
        R_CONV_STAGNANT
    };
    SideConvection {
        vol_flow,
        velocity,
        reynolds,
        nusselt,
        h,
        r_conv,
    }
}

/// Evaluate a design point.
pub fn run_design(cfg: &DesignConfig) -> DesignResult<DesignPoint> {
    cfg.validate()?;
    let hx = &cfg.hx;
    let teg = &cfg.module;
    let n = cfg.teg_count;

    let hot_inlet_c = cfg.hot_inlet.value - KELVIN_OFFSET;
    let cold_inlet_c = cfg.cold_inlet.value - KELVIN_OFFSET;
    let t_hot_avg = hot_inlet_c - cfg.fluid_dt / 2.0;
    let t_cold_avg = cold_inlet_c + cfg.fluid_dt / 2.0;

    let hot_model = cfg.hot_fluid.model();
    let cold_model = cfg.cold_fluid.model();
    let hot = hot_model.props(degc(t_hot_avg))?;
    let cold = cold_model.props(degc(t_cold_avg))?;

    let dt_total = t_hot_avg - t_cold_avg;
    if dt_total <= 0.0 {
        return Err(DesignError::NonPhysical {
            what: "bulk fluid temperatures cross over",
        });
    }

    // First pass: about two thirds of the drop sits across the module.
    let q_est = dt_total / (teg.r_thermal * 1.5);
    let hot_side = side_convection(&hot, hx, n, q_est * n as f64, cfg.fluid_dt, false);
    // Cold side starts from the hot-side channel velocity.
    let cold_side = side_convection_at(&cold, hx, hot_side.vol_flow, hot_side.velocity, true);

    let mut chain = ResistanceChain {
        hot_conv: hot_side.r_conv,
        hot_tim: hx.hot_tim_resistance(),
        teg: teg.r_thermal,
        cold_tim: hx.cold_tim_resistance(),
        cold_conv: cold_side.r_conv,
    };

    let mut q_per_teg = q_est;
    let mut total_heat = q_est * n as f64;
    let mut hot_side = hot_side;
    let mut cold_side = cold_side;
    for _ in 0..FLOW_PASSES {
        q_per_teg = dt_total / chain.total();
        total_heat = q_per_teg * n as f64;
        hot_side = side_convection(&hot, hx, n, total_heat, cfg.fluid_dt, false);
        cold_side = side_convection(&cold, hx, n, total_heat, cfg.fluid_dt, true);
        chain.hot_conv = hot_side.r_conv;
        chain.cold_conv = cold_side.r_conv;
    }
    debug!(
        teg_count = n,
        q_per_teg_w = q_per_teg,
        r_total = chain.total(),
        "design point converged"
    );

    let hot_fin = t_hot_avg - q_per_teg * chain.hot_conv;
    let teg_hot = hot_fin - q_per_teg * chain.hot_tim;
    let teg_cold = teg_hot - q_per_teg * chain.teg;
    let cold_fin = teg_cold - q_per_teg * chain.cold_tim;
    let temperatures = TemperatureProfile {
        hot_fluid_avg_c: t_hot_avg,
        hot_fin_surface_c: hot_fin,
        teg_hot_c: teg_hot,
        teg_cold_c: teg_cold,
        cold_fin_surface_c: cold_fin,
        cold_fluid_avg_c: t_cold_avg,
    };

    let dt_teg = teg_hot - teg_cold;
    let unit = teg.unit_output(dt_teg);
    let gross = unit.power * n as f64;
    let rejection = total_heat - gross;

    let flows = FlowSummary {
        hot_vol_flow_m3s: hot_side.vol_flow,
        hot_gpm: hot_side.vol_flow * GPM_PER_M3S,
        hot_channel_velocity_ms: hot_side.velocity,
        hot_reynolds: hot_side.reynolds,
        hot_nusselt: hot_side.nusselt,
        hot_h_conv: hot_side.h,
        cold_vol_flow_m3s: cold_side.vol_flow,
        cold_gpm: cold_side.vol_flow * GPM_PER_M3S,
    };

    let dh = hx.hydraulic_diameter();
    let f_channel = friction_factor(hot_side.reynolds, DEFAULT_ROUGHNESS_M, dh);
    let hot_channel_pa = darcy_pressure_drop(
        f_channel,
        hx.channel_length_m,
        dh,
        hot.rho.value,
        hot_side.velocity,
    );
    let towers = (n / (cfg.tegs_per_panel * cfg.panels_per_tower)).max(1);
    let hot_manifold_pa = duct_pressure_drop(
        hot_side.vol_flow,
        hx.manifold_id_m,
        towers as f64 * MANIFOLD_LENGTH_PER_TOWER_M,
        hot.rho.value,
        hot.mu.value,
    );
    let hot_pipe_pa = duct_pressure_drop(
        hot_side.vol_flow,
        cfg.pipe_id_m,
        cfg.hot_pipe_length_m,
        hot.rho.value,
        hot.mu.value,
    );
    let mut pressure = PressureDrops {
        hot_channel_pa,
        hot_manifold_pa,
        hot_pipe_pa,
        cold_total_pa: 0.0,
    };
    pressure.cold_total_pa = pressure.hot_total_pa() * COLD_DP_RATIO;

    let pcms = (n / TEGS_PER_PCM).max(1);
    let nodes = (pcms / PCMS_PER_NODE).max(1);
    let parasitics = Parasitics {
        pump_hot_w: pressure.hot_total_pa() * hot_side.vol_flow / cfg.pump_efficiency,
        pump_cold_w: pressure.cold_total_pa * cold_side.vol_flow / cfg.pump_efficiency,
        fan_w: rejection / 1000.0 * FAN_W_PER_KW,
        electronics_w: pcms as f64 * PCM_POWER_W + nodes as f64 * NODE_POWER_W,
    };

    let net = gross - parasitics.total_w();
    let parasitic_fraction = if gross > 0.0 {
        parasitics.total_w() / gross
    } else {
        0.0
    };

    Ok(DesignPoint {
        teg_count: n,
        module_name: teg.name,
        hot_fluid_name: hot_model.name().to_string(),
        cold_fluid_name: cold_model.name().to_string(),
        dt_across_teg_c: dt_teg,
        heat_per_teg_w: q_per_teg,
        power_per_teg_w: unit.power,
        teg_efficiency: unit.efficiency,
        teg_voltage_v: unit.voltage,
        teg_current_a: unit.current,
        resistances: chain,
        temperatures,
        flows,
        pressure,
        parasitics,
        gross_electrical_w: gross,
        total_heat_input_w: total_heat,
        total_heat_rejection_w: rejection,
        net_electrical_w: net,
        parasitic_fraction,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pgc_components::teg::THERMONAMIC_PB12611;

    #[test]
    fn reference_point_balances() {
        let p = run_design(&DesignConfig::default()).unwrap();
        assert_eq!(p.teg_count, 1620);
        assert!(p.gross_electrical_w > 0.0);
        let balance = p.total_heat_input_w - p.gross_electrical_w - p.total_heat_rejection_w;
        assert!(balance.abs() < 1e-6);
        assert!(
            (p.net_electrical_w - (p.gross_electrical_w - p.parasitics.total_w())).abs() < 1e-9
        );
    }

    #[test]
    fn temperature_profile_descends() {
        let p = run_design(&DesignConfig::default()).unwrap();
        let t = p.temperatures;
        assert!(t.hot_fluid_avg_c > t.hot_fin_surface_c);
        assert!(t.hot_fin_surface_c > t.teg_hot_c);
        assert!(t.teg_hot_c > t.teg_cold_c);
        assert!(t.teg_cold_c > t.cold_fin_surface_c);
        assert!((t.teg_hot_c - t.teg_cold_c - p.heat_per_teg_w * p.resistances.teg).abs() < 1e-9);
    }

    #[test]
    fn resistance_chain_hand_check() {
        let p = run_design(&DesignConfig::default()).unwrap();
        let g = HxGeometry::default();
        assert_eq!(p.resistances.teg, 1.52);
        assert!((p.resistances.hot_tim - g.hot_tim_resistance()).abs() < 1e-15);
        assert!((p.resistances.cold_tim - g.cold_tim_resistance()).abs() < 1e-15);
        // Stack heat equals the bulk drop over the chain within the last pass
        let q = (p.temperatures.hot_fluid_avg_c - p.temperatures.cold_fluid_avg_c)
            / p.resistances.total();
        assert!((q - p.heat_per_teg_w).abs() / q < 1e-3);
    }

    #[test]
    fn electronics_load_counts_boards() {
        let p = run_design(&DesignConfig::default()).unwrap();
        // 45 PCMs, 15 nodes
        assert!((p.parasitics.electronics_w - (45.0 * 1.5 + 15.0 * 3.0)).abs() < 1e-12);
        assert!((p.pressure.cold_total_pa - 0.9 * p.pressure.hot_total_pa()).abs() < 1e-9);
    }

    #[test]
    fn hot_pbte_uses_thermal_oil() {
        let cfg = DesignConfig::new(THERMONAMIC_PB12611, 792, degc(350.0), degc(100.0));
        assert_eq!(cfg.hot_fluid, FluidKind::ThermalOil);
        let p = run_design(&cfg).unwrap();
        assert_eq!(p.hot_fluid_name, "Therminol VP-1");
        assert!(p.gross_electrical_w > 0.0);
    }

    #[test]
    fn rejects_inverted_temperatures() {
        let cfg = DesignConfig::new(MARLOW_TG1_1008, 100, degc(40.0), degc(200.0));
        assert!(matches!(
            run_design(&cfg),
            Err(DesignError::InvalidArg { .. })
        ));
    }

    #[test]
    fn rejects_zero_tegs() {
        let cfg = DesignConfig::default().with_teg_count(0);
        assert!(run_design(&cfg).is_err());
    }
}
