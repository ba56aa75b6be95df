//! Fixed-step time integrators.

use crate::error::SimResult;
use crate::model::TransientModel;

/// Trait for time integrators.
pub trait Integrator {
    /// Advance state by one time step using the transient model.
    fn step<M: TransientModel>(
        &self,
        model: &mut M,
        t: f64,
        x: &M::State,
        dt: f64,
    ) -> SimResult<M::State>;
}

/// Classical RK4 (Runge-Kutta 4th order) integrator.
#[derive(Clone, Debug)]
pub struct RK4;

impl Integrator for RK4 {
    fn step<M: TransientModel>(
        &self,
        model: &mut M,
        t: f64,
        x: &M::State,
        dt: f64,
    ) -> SimResult<M::State> {
        let k1 = model.rhs(t, x)?;

        let x2 = model.add(x, &model.scale(&k1, 0.5 * dt));
        let k2 = model.rhs(t + 0.5 * dt, &x2)?;

        let x3 = model.add(x, &model.scale(&k2, 0.5 * dt));
        let k3 = model.rhs(t + 0.5 * dt, &x3)?;

        let x4 = model.add(x, &model.scale(&k3, dt));
        let k4 = model.rhs(t + dt, &x4)?;

        // Combine: x_new = x + (dt/6) * (k1 + 2*k2 + 2*k3 + k4)
        let k_sum = model.add(
            &model.add(&k1, &model.scale(&k2, 2.0)),
            &model.add(&model.scale(&k3, 2.0), &k4),
        );

        Ok(model.add(x, &model.scale(&k_sum, dt / 6.0)))
    }
}

/// Forward Euler (explicit, 1st order, fast for testing).
/// Calls rhs() once per step instead of 4 times (RK4).
#[derive(Clone, Debug)]
pub struct ForwardEuler;

impl Integrator for ForwardEuler {
    fn step<M: TransientModel>(
        &self,
        model: &mut M,
        t: f64,
        x: &M::State,
        dt: f64,
    ) -> SimResult<M::State> {
        let xdot = model.rhs(t, x)?;
        Ok(model.add(x, &model.scale(&xdot, dt)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// x' = -x
    struct Decay;

    impl TransientModel for Decay {
        type State = f64;

        fn initial_state(&self) -> f64 {
            1.0
        }

        fn rhs(&mut self, _t: f64, x: &f64) -> SimResult<f64> {
            Ok(-x)
        }

        fn add(&self, a: &f64, b: &f64) -> f64 {
            a + b
        }

        fn scale(&self, a: &f64, scale: f64) -> f64 {
            a * scale
        }
    }

    fn integrate<I: Integrator>(integrator: &I, dt: f64, steps: usize) -> f64 {
        let mut model = Decay;
        let mut x = model.initial_state();
        for i in 0..steps {
            x = integrator.step(&mut model, i as f64 * dt, &x, dt).unwrap();
        }
        x
    }

    #[test]
    fn rk4_exponential_decay() {
        let x = integrate(&RK4, 0.1, 10);
        assert!((x - (-1.0f64).exp()).abs() < 1e-6);
    }

    #[test]
    fn euler_exponential_decay() {
        let x = integrate(&ForwardEuler, 0.1, 10);
        assert!((x - 0.9f64.powi(10)).abs() < 1e-12);
        assert!((x - (-1.0f64).exp()).abs() < 0.02);
    }

    proptest! {
        #[test]
        fn decay_stays_bounded(dt in 1e-3f64..0.99, steps in 1usize..50) {
            for x in [integrate(&RK4, dt, steps), integrate(&ForwardEuler, dt, steps)] {
                prop_assert!(x > 0.0 && x < 1.0);
            }
        }
    }
}
