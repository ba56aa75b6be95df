//! Coupled solve of the TEG stack and the cold loop closure.
//!
//! Unknowns are the TEG hot-face temperature, the TEG cold-face temperature
//! and the cold supply temperature entering the cold exchanger. The hot
//! exchanger inlet is fixed by the burner set point and the hot pipe.
//!
//! ```text
//! r1 = (Q_hx,hot  - q_in)            / UA_hot
//! r2 = (q_out     - Q_hx,cold->fluid) / UA_cold
//! r3 = T_cold,return - T_cold,supply
//! ```
//!
//! Residuals are scaled to kelvin so one tolerance covers all three.

use nalgebra::DVector;
use pgc_components::{FluidPort, HeatExchanger, HeatRejection, Pipe, Pump, TegArray, TwoPortComponent, trace_leg};
use pgc_core::units::{Temperature, Time, k};
use pgc_fluids::FluidModel;
use pgc_solver::{
    NewtonConfig, NewtonResult, SolverResult, finite_difference_jacobian_at, newton_solve,
};

/// Relative perturbation for the finite-difference Jacobian.
const FD_EPSILON: f64 = 1e-7;

/// Components and boundary values the stack equations close over.
pub(crate) struct StackProblem<'a> {
    pub hot_fluid: &'a dyn FluidModel,
    pub cold_fluid: &'a dyn FluidModel,
    pub hot_hx: &'a HeatExchanger,
    pub teg: &'a TegArray,
    pub cold_hx: &'a HeatExchanger,
    pub cold_pipe: &'a Pipe,
    pub rejection: &'a HeatRejection,
    pub cold_pump: &'a Pump,
    /// Hot stream entering the hot exchanger
    pub hot_inlet: FluidPort,
    pub t: Time,
    pub soil: Temperature,
}

impl StackProblem<'_> {
    pub fn residual(&self, x: &DVector<f64>) -> SolverResult<DVector<f64>> {
        let (t_hot_face, t_cold_face, t_cold_supply) = (k(x[0]), k(x[1]), k(x[2]));

        let hot = self.hot_hx.exchange(self.hot_fluid, self.hot_inlet, t_hot_face)?;
        let teg = self.teg.evaluate(t_hot_face, t_cold_face)?;

        let supply = FluidPort::new(t_cold_supply, self.cold_pump.mass_flow);
        let cold = self.cold_hx.exchange(self.cold_fluid, supply, t_cold_face)?;

        let bound = self.rejection.at(self.t, self.soil);
        let chain: [&dyn TwoPortComponent; 3] = [self.cold_pipe, &bound, self.cold_pump];
        let leg = trace_leg(self.cold_fluid, cold.outlet, &chain)?;
        let t_return = leg.outlet().map_or(cold.outlet.temperature, |p| p.temperature);

        Ok(DVector::from_vec(vec![
            (hot.heat_to_face - teg.heat_in).value / self.hot_hx.ua(),
            (teg.heat_out + cold.heat_to_face).value / self.cold_hx.ua(),
            t_return.value - t_cold_supply.value,
        ]))
    }

    /// Starting point when no previous solution is available.
    ///
    /// Splits the drop from the hot inlet to the cold guess by conductance,
    /// treating each exchanger as its full UA.
    pub fn initial_guess(&self, t_cold_supply: Temperature) -> DVector<f64> {
        let t_hot = self.hot_inlet.temperature.value;
        let t_cold = t_cold_supply.value;
        let r_hot = 1.0 / self.hot_hx.ua();
        let r_teg = 1.0 / self.teg.conductance();
        let r_cold = 1.0 / self.cold_hx.ua();
        let q = (t_hot - t_cold) / (r_hot + r_teg + r_cold);
        DVector::from_vec(vec![t_hot - q * r_hot, t_cold + q * r_cold, t_cold])
    }

    pub fn solve(&self, x0: DVector<f64>, config: &NewtonConfig) -> SolverResult<NewtonResult> {
        let residual = |x: &DVector<f64>| self.residual(x);
        let jacobian = |x: &DVector<f64>, r: &DVector<f64>| {
            finite_difference_jacobian_at(x, r, residual, FD_EPSILON)
        };
        newton_solve(x0, residual, jacobian, config)
    }
}
