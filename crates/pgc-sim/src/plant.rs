//! The composed two-loop plant.
//!
//! ```text
//! hot loop:  burner -> hot pipe -> hot HX (-> TEG hot face) -> hot pump -> burner
//! cold loop: cold HX (<- TEG cold face) -> cold pipe -> rejector -> cold pump -> cold HX
//! ```
//!
//! Soil temperature is the only physical state. Cumulative rejected heat and
//! cumulative net electrical energy ride along as quadrature states so the
//! integrator produces run totals directly.

use crate::error::{SimError, SimResult};
use crate::model::TransientModel;
use crate::sim::{SimOptions, SimProgress, run_sim_with_progress};
use crate::snapshot::{PlantSnapshot, PlantTrace};
use crate::stack::StackProblem;
use nalgebra::DVector;
use pgc_components::teg::MARLOW_TG1_1008;
use pgc_components::{
    Burner, DryCooler, FluidPort, GroundLoop, HeatExchanger, HeatRejection, Pipe, Pump,
    Rejection, TegArray, TegOperatingPoint, TwoPortComponent, trace_leg,
};
use pgc_core::units::{Temperature, k, kgps, m, pa, s};
use pgc_fluids::FluidKind;
use pgc_solver::{NewtonConfig, SolverError};
use tracing::{debug, info, warn};

/// Integrated plant state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlantState {
    pub soil_temperature_k: f64,
    /// Cumulative heat rejected to the sink (J)
    pub rejected_energy_j: f64,
    /// Cumulative net electrical energy (J)
    pub net_energy_j: f64,
}

/// Everything the plant is built from.
#[derive(Clone, Debug)]
pub struct PlantComponents {
    pub burner: Burner,
    pub hot_pipe: Pipe,
    pub hot_hx: HeatExchanger,
    pub hot_pump: Pump,
    pub hot_fluid: FluidKind,
    pub teg: TegArray,
    pub cold_hx: HeatExchanger,
    pub cold_pipe: Pipe,
    pub rejection: HeatRejection,
    pub cold_pump: Pump,
    pub cold_fluid: FluidKind,
    /// Newton starting value for the cold supply temperature. The solved
    /// cold side follows from the rejection path, not from this value.
    pub cold_supply_guess: Temperature,
}

impl PlantComponents {
    /// Reference plant: 20 McF/day, 1620 Marlow modules, 21-bore ground loop.
    pub fn reference() -> SimResult<Self> {
        let teg_count = 1620;
        Ok(Self {
            burner: Burner::new("burner".into(), 20.0, 0.88, k(473.15))?,
            hot_pipe: Pipe::new("hot_pipe".into(), m(30.0), m(0.038), 0.5, k(293.15))?,
            hot_hx: HeatExchanger::new("hot_hx".into(), 8.0, teg_count)?,
            hot_pump: Pump::new("hot_pump".into(), kgps(4.0), pa(150_000.0), 0.65)?,
            hot_fluid: FluidKind::WaterGlycol,
            teg: TegArray::from_module("teg_array".into(), &MARLOW_TG1_1008, teg_count)?,
            cold_hx: HeatExchanger::new("cold_hx".into(), 8.0, teg_count)?,
            cold_pipe: Pipe::new("cold_pipe".into(), m(30.0), m(0.038), 0.5, k(293.15))?,
            rejection: HeatRejection::GroundLoop(GroundLoop::new(
                "ground_loop".into(),
                21,
                m(150.0),
                0.2,
                m(3.0),
                2.2e6,
                k(285.15),
                None,
            )?),
            cold_pump: Pump::new("cold_pump".into(), kgps(4.0), pa(150_000.0), 0.65)?,
            cold_fluid: FluidKind::WaterGlycol,
            cold_supply_guess: k(313.15),
        })
    }

    /// Same plant rejecting through a dry cooler.
    pub fn with_dry_cooler(self, cooler: DryCooler) -> Self {
        Self {
            rejection: HeatRejection::DryCooler(cooler),
            ..self
        }
    }
}

/// Solved operating point at one instant.
#[derive(Clone, Debug)]
pub struct PlantPoint {
    pub stack: [f64; 3],
    pub iterations: usize,
    pub hot_inlet: FluidPort,
    pub hot_return: FluidPort,
    pub cold_hx_outlet: FluidPort,
    pub cold_return: FluidPort,
    pub teg: TegOperatingPoint,
    pub rejection: Rejection,
    pub hot_pipe_loss_w: f64,
    pub cold_pipe_loss_w: f64,
    pub hot_pump_w: f64,
    pub cold_pump_w: f64,
    pub burner_duty_w: f64,
    pub soil_rate: f64,
}

impl PlantPoint {
    /// TEG output minus both pumps.
    pub fn net_power_w(&self) -> f64 {
        self.teg.power.value - (self.hot_pump_w + self.cold_pump_w)
    }
}

/// The composed plant model.
pub struct PlantSystem {
    parts: PlantComponents,
    newton: NewtonConfig,
    last_solution: Option<DVector<f64>>,
    warned_over_temperature: bool,
    warned_firing_margin: bool,
}

impl PlantSystem {
    pub fn new(parts: PlantComponents) -> SimResult<Self> {
        if parts.hot_hx.unit_count != parts.teg.unit_count
            || parts.cold_hx.unit_count != parts.teg.unit_count
        {
            return Err(SimError::InvalidArg {
                what: "exchanger unit counts must match the TEG array",
            });
        }
        let guess = parts.cold_supply_guess.value;
        if !guess.is_finite() || guess <= 0.0 {
            return Err(SimError::InvalidArg {
                what: "cold supply guess must be positive",
            });
        }
        Ok(Self {
            parts,
            newton: NewtonConfig::default(),
            last_solution: None,
            warned_over_temperature: false,
            warned_firing_margin: false,
        })
    }

    pub fn reference() -> SimResult<Self> {
        Self::new(PlantComponents::reference()?)
    }

    pub fn with_newton_config(mut self, config: NewtonConfig) -> Self {
        self.newton = config;
        self
    }

    pub fn components(&self) -> &PlantComponents {
        &self.parts
    }

    /// Forget the warm start and the once-per-run warnings.
    pub fn reset(&mut self) {
        self.last_solution = None;
        self.warned_over_temperature = false;
        self.warned_firing_margin = false;
    }

    /// Solve the plant at time `t_s` with the given soil temperature.
    pub fn solve_point(&mut self, t_s: f64, soil_k: f64) -> SimResult<PlantPoint> {
        let p = &self.parts;
        let hot_fluid = p.hot_fluid.model();
        let cold_fluid = p.cold_fluid.model();
        let t = s(t_s);
        let soil = k(soil_k);

        let hot_supply = FluidPort::new(p.burner.setpoint, p.hot_pump.mass_flow);
        let pipe_step = p.hot_pipe.step(hot_fluid, hot_supply)?;
        let hot_inlet = pipe_step.outlet;

        let problem = StackProblem {
            hot_fluid,
            cold_fluid,
            hot_hx: &p.hot_hx,
            teg: &p.teg,
            cold_hx: &p.cold_hx,
            cold_pipe: &p.cold_pipe,
            rejection: &p.rejection,
            cold_pump: &p.cold_pump,
            hot_inlet,
            t,
            soil,
        };
        let x0 = match &self.last_solution {
            Some(x) => x.clone(),
            None => problem.initial_guess(p.cold_supply_guess),
        };
        let solved = problem.solve(x0, &self.newton).map_err(|e| match e {
            SolverError::ConvergenceFailed { what } | SolverError::Numeric { what } => {
                SimError::ConvergenceFailed { t_s, what }
            }
            other => other.into(),
        })?;
        debug!(t_s, iterations = solved.iterations, "stack solved");

        let (t_hot_face, t_cold_face, t_cold_supply) =
            (k(solved.x[0]), k(solved.x[1]), k(solved.x[2]));
        let teg = p.teg.evaluate(t_hot_face, t_cold_face)?;

        // Hot leg from the exchanger inlet back to the burner
        let hot_hx = p.hot_hx.facing(t_hot_face);
        let hot_chain: [&dyn TwoPortComponent; 2] = [&hot_hx, &p.hot_pump];
        let hot_leg = trace_leg(hot_fluid, hot_inlet, &hot_chain)?;
        let hot_return = hot_leg.outlet().unwrap_or(hot_inlet);
        let burner_duty = p.burner.duty(hot_fluid, hot_return)?;

        // Cold leg from the supply round to the pump outlet
        let cold_supply = FluidPort::new(t_cold_supply, p.cold_pump.mass_flow);
        let cold_hx = p.cold_hx.facing(t_cold_face);
        let hx_step = cold_hx.step(cold_fluid, cold_supply)?;
        let cold_pipe_step = p.cold_pipe.step(cold_fluid, hx_step.outlet)?;
        let rejection = p
            .rejection
            .reject(cold_fluid, cold_pipe_step.outlet, t, soil)?;
        let cold_pump_w = p.cold_pump.shaft_power(cold_fluid, rejection.outlet)?.value;
        let soil_rate = p.rejection.soil_rate(&rejection, soil);

        let point = PlantPoint {
            stack: [solved.x[0], solved.x[1], solved.x[2]],
            iterations: solved.iterations,
            hot_inlet,
            hot_return,
            cold_hx_outlet: hx_step.outlet,
            cold_return: rejection.outlet,
            teg,
            rejection,
            hot_pipe_loss_w: -pipe_step.heat_rate.value,
            cold_pipe_loss_w: -cold_pipe_step.heat_rate.value,
            hot_pump_w: hot_leg.total_shaft_power().value,
            cold_pump_w,
            burner_duty_w: burner_duty.value,
            soil_rate,
        };

        self.last_solution = Some(solved.x);
        self.warn_once(t_s, &point);
        Ok(point)
    }

    fn warn_once(&mut self, t_s: f64, point: &PlantPoint) {
        if point.teg.over_temperature && !self.warned_over_temperature {
            self.warned_over_temperature = true;
            warn!(
                t_s,
                hot_face_k = point.stack[0],
                rating_k = self.parts.teg.max_hot.value,
                "TEG hot face above module rating"
            );
        }
        let margin = self.parts.burner.thermal_power().value - point.burner_duty_w;
        if margin < 0.0 && !self.warned_firing_margin {
            self.warned_firing_margin = true;
            warn!(
                t_s,
                margin_w = margin,
                "burner cannot hold the hot loop set point"
            );
        }
    }

    /// Solve and record all outputs at `(t, x)`.
    pub fn snapshot(&mut self, t_s: f64, x: &PlantState) -> SimResult<PlantSnapshot> {
        let point = self.solve_point(t_s, x.soil_temperature_k)?;
        let burner = &self.parts.burner;
        let fuel_power = burner.fuel_power().value;
        let thermal = burner.thermal_power().value;

        let teg_power = point.teg.power.value;
        let net_power = point.net_power_w();
        let fan = point.rejection.fan_power.value;
        let (cop, efficiency) = if fuel_power > 0.0 {
            (teg_power / fuel_power, net_power / fuel_power)
        } else {
            (0.0, 0.0)
        };

        Ok(PlantSnapshot {
            time_s: t_s,
            hot_supply_k: burner.setpoint.value,
            hot_hx_inlet_k: point.hot_inlet.temperature.value,
            hot_return_k: point.hot_return.temperature.value,
            teg_hot_face_k: point.stack[0],
            teg_cold_face_k: point.stack[1],
            cold_supply_k: point.stack[2],
            cold_hx_outlet_k: point.cold_hx_outlet.temperature.value,
            cold_return_k: point.cold_return.temperature.value,
            soil_k: x.soil_temperature_k,
            sink_k: point.rejection.sink_temperature.value,
            fuel_power_w: fuel_power,
            burner_thermal_w: thermal,
            burner_duty_w: point.burner_duty_w,
            firing_margin_w: thermal - point.burner_duty_w,
            hot_pipe_loss_w: point.hot_pipe_loss_w,
            teg_heat_in_w: point.teg.heat_in.value,
            teg_heat_out_w: point.teg.heat_out.value,
            cold_pipe_loss_w: point.cold_pipe_loss_w,
            heat_rejected_w: point.rejection.heat_rejected.value,
            teg_power_w: teg_power,
            hot_pump_w: point.hot_pump_w,
            cold_pump_w: point.cold_pump_w,
            fan_w: fan,
            net_power_w: net_power,
            net_after_fans_w: net_power - fan,
            teg_efficiency: point.teg.efficiency,
            cop,
            efficiency,
            over_temperature: point.teg.over_temperature,
            solver_iterations: point.iterations,
        })
    }

    /// Integrate the plant over the horizon and record snapshots.
    pub fn simulate(
        &mut self,
        opts: &SimOptions,
        progress: Option<&mut dyn FnMut(SimProgress)>,
    ) -> SimResult<PlantTrace> {
        self.reset();
        info!(
            t_end_s = opts.t_end,
            dt_s = opts.dt,
            integrator = ?opts.integrator,
            rejection = self.parts.rejection.name(),
            "starting plant simulation"
        );

        let record = run_sim_with_progress(self, opts, progress)?;

        let mut snapshots = Vec::with_capacity(record.t.len());
        for (t, x) in record.t.iter().zip(&record.x) {
            snapshots.push(self.snapshot(*t, x)?);
        }
        let final_state = record
            .x
            .last()
            .copied()
            .unwrap_or_else(|| self.initial_state());

        info!(
            records = snapshots.len(),
            final_soil_k = final_state.soil_temperature_k,
            net_energy_kwh = final_state.net_energy_j / 3.6e6,
            "plant simulation finished"
        );
        Ok(PlantTrace {
            snapshots,
            final_state,
        })
    }
}

impl TransientModel for PlantSystem {
    type State = PlantState;

    fn initial_state(&self) -> PlantState {
        PlantState {
            soil_temperature_k: self.parts.rejection.initial_soil_temperature().value,
            rejected_energy_j: 0.0,
            net_energy_j: 0.0,
        }
    }

    fn rhs(&mut self, t: f64, x: &PlantState) -> SimResult<PlantState> {
        if !x.soil_temperature_k.is_finite() {
            return Err(SimError::NonPhysical {
                what: "soil temperature is not finite",
            });
        }
        let point = self.solve_point(t, x.soil_temperature_k)?;
        Ok(PlantState {
            soil_temperature_k: point.soil_rate,
            rejected_energy_j: point.rejection.heat_rejected.value,
            net_energy_j: point.net_power_w(),
        })
    }

    fn add(&self, a: &PlantState, b: &PlantState) -> PlantState {
        PlantState {
            soil_temperature_k: a.soil_temperature_k + b.soil_temperature_k,
            rejected_energy_j: a.rejected_energy_j + b.rejected_energy_j,
            net_energy_j: a.net_energy_j + b.net_energy_j,
        }
    }

    fn scale(&self, a: &PlantState, scale: f64) -> PlantState {
        PlantState {
            soil_temperature_k: a.soil_temperature_k * scale,
            rejected_energy_j: a.rejected_energy_j * scale,
            net_energy_j: a.net_energy_j * scale,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_point_balances() {
        let mut plant = PlantSystem::reference().unwrap();
        let point = plant.solve_point(0.0, 285.15).unwrap();

        // Face balances hold at the solution
        let hot = plant
            .parts
            .hot_hx
            .exchange(
                plant.parts.hot_fluid.model(),
                point.hot_inlet,
                k(point.stack[0]),
            )
            .unwrap();
        assert!((hot.heat_to_face.value - point.teg.heat_in.value).abs() < 1e-3);
        // Cold loop closes on itself
        assert!((point.cold_return.temperature.value - point.stack[2]).abs() < 1e-6);

        // Temperatures ordered through the stack
        let [th, tc, tcs] = point.stack;
        assert!(point.hot_inlet.temperature.value > th);
        assert!(th > tc);
        assert!(tc > tcs);
        assert!(tcs > 285.15);
    }

    #[test]
    fn reference_output_is_positive() {
        let mut plant = PlantSystem::reference().unwrap();
        let state = plant.initial_state();
        let snap = plant.snapshot(0.0, &state).unwrap();
        assert!(snap.teg_power_w > 0.0);
        assert!(snap.teg_power_w < snap.teg_heat_in_w);
        assert!(snap.heat_rejected_w > 0.0);
        assert!(snap.hot_pump_w > 0.0 && snap.cold_pump_w > 0.0);
        assert_eq!(
            snap.net_power_w,
            snap.teg_power_w - (snap.hot_pump_w + snap.cold_pump_w)
        );
        assert_eq!(snap.fan_w, 0.0);
        assert!(!snap.over_temperature);
    }

    #[test]
    fn warm_start_reuses_solution() {
        let mut plant = PlantSystem::reference().unwrap();
        let first = plant.solve_point(0.0, 285.15).unwrap();
        let second = plant.solve_point(0.0, 285.15).unwrap();
        assert!(second.iterations <= first.iterations);
        assert!((second.stack[2] - first.stack[2]).abs() < 1e-6);
    }

    #[test]
    fn mismatched_exchanger_count_rejected() {
        let mut parts = PlantComponents::reference().unwrap();
        parts.hot_hx = HeatExchanger::new("hot_hx".into(), 8.0, 100).unwrap();
        assert!(matches!(
            PlantSystem::new(parts),
            Err(SimError::InvalidArg { .. })
        ));
    }

    #[test]
    fn soil_rate_tracks_rejection() {
        let mut plant = PlantSystem::reference().unwrap();
        let x = plant.initial_state();
        let dx = plant.rhs(0.0, &x).unwrap();
        assert!(dx.soil_temperature_k > 0.0);
        assert!(dx.rejected_energy_j > 0.0);
    }

    #[test]
    fn cold_pump_power_follows_pump_model() {
        let mut plant = PlantSystem::reference().unwrap();
        let point = plant.solve_point(0.0, 285.15).unwrap();
        let parts = plant.components();
        let expected = parts
            .cold_pump
            .shaft_power(parts.cold_fluid.model(), point.cold_return)
            .unwrap();
        assert!(point.cold_pump_w > 0.0);
        assert_eq!(point.cold_pump_w, expected.value);
    }

    #[test]
    fn cold_supply_guess_only_seeds_the_solve() {
        let solve_from = |guess_k: f64| {
            let mut parts = PlantComponents::reference().unwrap();
            parts.cold_supply_guess = k(guess_k);
            PlantSystem::new(parts).unwrap().solve_point(0.0, 285.15).unwrap()
        };
        let a = solve_from(295.0);
        let b = solve_from(340.0);
        assert!((a.stack[2] - b.stack[2]).abs() < 1e-6);
        assert!((a.net_power_w() - b.net_power_w()).abs() < 1e-3);

        let mut parts = PlantComponents::reference().unwrap();
        parts.cold_supply_guess = k(0.0);
        assert!(PlantSystem::new(parts).is_err());
    }
}
