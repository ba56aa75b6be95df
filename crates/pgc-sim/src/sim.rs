//! Simulation runner and result recording.

use crate::error::{SimError, SimResult};
use crate::integrator::{ForwardEuler, Integrator, RK4};
use crate::model::TransientModel;
use pgc_core::units::constants::{SECONDS_PER_HOUR, SECONDS_PER_YEAR};

/// Integrator selection for simulation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IntegratorType {
    /// 4th-order Runge-Kutta (default, most accurate, 4 rhs calls per step).
    #[default]
    RK4,
    /// Forward Euler (1st-order, faster, 1 rhs call per step).
    ForwardEuler,
}

/// Options for simulation runs.
#[derive(Clone, Debug)]
pub struct SimOptions {
    /// Fixed time step (seconds)
    pub dt: f64,
    /// Final simulation time (seconds)
    pub t_end: f64,
    /// Largest step count a run may plan; longer plans are rejected
    pub max_steps: usize,
    /// Record every N-th step (decimation)
    pub record_every: usize,
    /// Integrator type (default: RK4)
    pub integrator: IntegratorType,
}

impl Default for SimOptions {
    fn default() -> Self {
        Self {
            dt: SECONDS_PER_HOUR,
            t_end: SECONDS_PER_YEAR,
            max_steps: 1_000_000,
            record_every: 1,
            integrator: IntegratorType::default(),
        }
    }
}

impl SimOptions {
    /// Steps needed to reach `t_end`.
    pub fn planned_steps(&self) -> usize {
        if self.t_end <= 0.0 {
            return 0;
        }
        (self.t_end / self.dt).ceil() as usize
    }

    pub fn validate(&self) -> SimResult<()> {
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(SimError::InvalidArg {
                what: "dt must be positive",
            });
        }
        if !self.t_end.is_finite() || self.t_end < 0.0 {
            return Err(SimError::InvalidArg {
                what: "t_end must be non-negative",
            });
        }
        if self.max_steps == 0 {
            return Err(SimError::InvalidArg {
                what: "max_steps must be positive",
            });
        }
        if self.record_every == 0 {
            return Err(SimError::InvalidArg {
                what: "record_every must be positive",
            });
        }
        if self.planned_steps() > self.max_steps {
            return Err(SimError::InvalidArg {
                what: "t_end / dt exceeds max_steps",
            });
        }
        Ok(())
    }
}

/// Record of simulation results.
#[derive(Clone, Debug)]
pub struct SimRecord<S> {
    /// Time points (seconds)
    pub t: Vec<f64>,
    /// State snapshots
    pub x: Vec<S>,
}

/// Progress reported after each completed step.
#[derive(Clone, Copy, Debug)]
pub struct SimProgress {
    pub step: usize,
    pub total_steps: usize,
    /// Simulation time reached (seconds)
    pub t: f64,
    pub t_end: f64,
}

impl SimProgress {
    pub fn fraction_complete(&self) -> f64 {
        if self.t_end > 0.0 {
            (self.t / self.t_end).clamp(0.0, 1.0)
        } else {
            1.0
        }
    }
}

/// Run a transient simulation with fixed steps.
pub fn run_sim<M: TransientModel>(
    model: &mut M,
    opts: &SimOptions,
) -> SimResult<SimRecord<M::State>> {
    run_sim_with_progress(model, opts, None)
}

/// Run a transient simulation and report progress after every step.
///
/// Step `i` starts at `i * dt`; the last step is shortened to land exactly
/// on `t_end`. The initial and final states are always recorded.
pub fn run_sim_with_progress<M: TransientModel>(
    model: &mut M,
    opts: &SimOptions,
    mut progress: Option<&mut dyn FnMut(SimProgress)>,
) -> SimResult<SimRecord<M::State>> {
    opts.validate()?;

    let total_steps = opts.planned_steps();
    let mut x = model.initial_state();

    let mut t_record = vec![0.0];
    let mut x_record = vec![x.clone()];

    for step in 0..total_steps {
        let t_start = step as f64 * opts.dt;
        let t_next = ((step + 1) as f64 * opts.dt).min(opts.t_end);
        let h = t_next - t_start;
        if h <= 0.0 {
            break;
        }

        // Integrate one step using selected integrator
        x = match opts.integrator {
            IntegratorType::RK4 => RK4.step(model, t_start, &x, h)?,
            IntegratorType::ForwardEuler => ForwardEuler.step(model, t_start, &x, h)?,
        };
        let t = t_next;

        let done = step + 1;
        if done % opts.record_every == 0 || done == total_steps {
            t_record.push(t);
            x_record.push(x.clone());
        }

        if let Some(cb) = progress.as_deref_mut() {
            cb(SimProgress {
                step: done,
                total_steps,
                t,
                t_end: opts.t_end,
            });
        }
    }

    Ok(SimRecord {
        t: t_record,
        x: x_record,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Growth {
        rate: f64,
        calls: usize,
    }

    impl TransientModel for Growth {
        type State = f64;

        fn initial_state(&self) -> f64 {
            1.0
        }

        fn rhs(&mut self, _t: f64, x: &f64) -> SimResult<f64> {
            self.calls += 1;
            Ok(self.rate * x)
        }

        fn add(&self, a: &f64, b: &f64) -> f64 {
            a + b
        }

        fn scale(&self, a: &f64, scale: f64) -> f64 {
            a * scale
        }
    }

    #[test]
    fn sim_options_defaults() {
        let opts = SimOptions::default();
        assert_eq!(opts.dt, 3600.0);
        assert_eq!(opts.t_end, 365.0 * 86400.0);
        assert_eq!(opts.record_every, 1);
        assert_eq!(opts.integrator, IntegratorType::RK4);
        assert_eq!(opts.planned_steps(), 8760);
    }

    #[test]
    fn sim_options_invalid() {
        let mut model = Growth {
            rate: 0.0,
            calls: 0,
        };
        let opts = SimOptions {
            dt: 0.0,
            ..SimOptions::default()
        };
        assert!(matches!(
            run_sim(&mut model, &opts),
            Err(SimError::InvalidArg { .. })
        ));
        let opts = SimOptions {
            record_every: 0,
            ..SimOptions::default()
        };
        assert!(run_sim(&mut model, &opts).is_err());
    }

    #[test]
    fn last_step_lands_on_t_end() {
        let mut model = Growth {
            rate: -1.0,
            calls: 0,
        };
        let opts = SimOptions {
            dt: 0.3,
            t_end: 1.0,
            max_steps: 100,
            record_every: 1,
            integrator: IntegratorType::ForwardEuler,
        };
        let rec = run_sim(&mut model, &opts).unwrap();
        assert_eq!(rec.t.len(), 5);
        assert_eq!(*rec.t.last().unwrap(), 1.0);
        assert_eq!(model.calls, 4);
        // 0.7^3 * 0.9
        assert!((rec.x[4] - 0.7f64.powi(3) * 0.9).abs() < 1e-12);
    }

    #[test]
    fn plan_beyond_max_steps_is_rejected() {
        let mut model = Growth {
            rate: 0.0,
            calls: 0,
        };
        let opts = SimOptions {
            dt: 1.0,
            t_end: 30.0 * 86_400.0,
            ..SimOptions::default()
        };
        assert_eq!(opts.planned_steps(), 2_592_000);
        assert!(matches!(
            run_sim(&mut model, &opts),
            Err(SimError::InvalidArg { .. })
        ));
        assert_eq!(model.calls, 0);
    }

    #[test]
    fn plan_at_max_steps_reaches_t_end() {
        let mut model = Growth {
            rate: 0.0,
            calls: 0,
        };
        let opts = SimOptions {
            dt: 0.5,
            t_end: 10.0,
            max_steps: 20,
            record_every: 1,
            integrator: IntegratorType::ForwardEuler,
        };
        let rec = run_sim(&mut model, &opts).unwrap();
        assert_eq!(*rec.t.last().unwrap(), 10.0);
        assert_eq!(model.calls, 20);

        let short = SimOptions {
            max_steps: 19,
            ..opts
        };
        assert!(run_sim(&mut model, &short).is_err());
    }

    #[test]
    fn decimation_keeps_final_state() {
        let mut model = Growth {
            rate: 0.0,
            calls: 0,
        };
        let opts = SimOptions {
            dt: 1.0,
            t_end: 10.0,
            max_steps: 100,
            record_every: 4,
            integrator: IntegratorType::RK4,
        };
        let rec = run_sim(&mut model, &opts).unwrap();
        assert_eq!(rec.t, vec![0.0, 4.0, 8.0, 10.0]);
    }

    #[test]
    fn zero_horizon_records_initial_state() {
        let mut model = Growth {
            rate: 1.0,
            calls: 0,
        };
        let opts = SimOptions {
            t_end: 0.0,
            ..SimOptions::default()
        };
        let rec = run_sim(&mut model, &opts).unwrap();
        assert_eq!(rec.t, vec![0.0]);
        assert_eq!(model.calls, 0);
    }

    #[test]
    fn progress_reaches_completion() {
        let mut model = Growth {
            rate: 0.1,
            calls: 0,
        };
        let opts = SimOptions {
            dt: 0.25,
            t_end: 1.0,
            ..SimOptions::default()
        };
        let mut seen = Vec::new();
        let mut cb = |p: SimProgress| seen.push(p);
        run_sim_with_progress(&mut model, &opts, Some(&mut cb)).unwrap();
        assert_eq!(seen.len(), 4);
        let last = seen.last().unwrap();
        assert_eq!(last.step, 4);
        assert_eq!(last.fraction_complete(), 1.0);
    }
}
