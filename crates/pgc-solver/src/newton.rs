//! Damped Newton solver with backtracking line search.

use crate::error::{SolverError, SolverResult};
use nalgebra::{DMatrix, DVector};
use tracing::debug;

/// Newton solver configuration.
#[derive(Clone, Debug)]
pub struct NewtonConfig {
    /// Maximum iterations
    pub max_iterations: usize,
    /// Absolute tolerance for residual norm
    pub abs_tol: f64,
    /// Relative tolerance for residual norm
    pub rel_tol: f64,
    /// Line search backtracking factor
    pub line_search_beta: f64,
    /// Maximum line search iterations
    pub max_line_search_iters: usize,
}

impl Default for NewtonConfig {
    fn default() -> Self {
        Self {
            max_iterations: 50,
            abs_tol: 1e-9,
            rel_tol: 1e-12,
            line_search_beta: 0.5,
            max_line_search_iters: 20,
        }
    }
}

/// Newton iteration result.
#[derive(Clone, Debug)]
pub struct NewtonResult {
    /// Solution vector
    pub x: DVector<f64>,
    /// Final residual norm
    pub residual_norm: f64,
    /// Number of iterations
    pub iterations: usize,
    /// Converged flag
    pub converged: bool,
}

/// Newton solver with line search.
///
/// A step is accepted once the residual norm decreases; after
/// `max_line_search_iters` halvings the shortest step is taken anyway.
pub fn newton_solve<F, J>(
    x0: DVector<f64>,
    residual_fn: F,
    jacobian_fn: J,
    config: &NewtonConfig,
) -> SolverResult<NewtonResult>
where
    F: Fn(&DVector<f64>) -> SolverResult<DVector<f64>>,
    J: Fn(&DVector<f64>, &DVector<f64>) -> SolverResult<DMatrix<f64>>,
{
    let mut x = x0;
    let mut r = residual_fn(&x)?;
    let mut r_norm = r.norm();
    let r0_norm = r_norm;

    if !r_norm.is_finite() {
        return Err(SolverError::Numeric {
            what: "non-finite residual at initial guess".to_string(),
        });
    }

    for iter in 0..config.max_iterations {
        if r_norm < config.abs_tol || r_norm < config.rel_tol * r0_norm {
            debug!(iterations = iter, residual = r_norm, "newton converged");
            return Ok(NewtonResult {
                x,
                residual_norm: r_norm,
                iterations: iter,
                converged: true,
            });
        }

        let jac = jacobian_fn(&x, &r)?;

        // Solve J * dx = -r
        let dx = jac
            .lu()
            .solve(&(-r.clone()))
            .ok_or_else(|| SolverError::Numeric {
                what: "Jacobian solve failed".to_string(),
            })?;

        let mut alpha = 1.0;
        let mut x_new = &x + alpha * &dx;
        let mut r_new = residual_fn(&x_new)?;
        let mut r_new_norm = r_new.norm();

        for _ in 0..config.max_line_search_iters {
            if r_new_norm.is_finite() && r_new_norm < r_norm {
                break;
            }

            // Backtrack
            alpha *= config.line_search_beta;
            x_new = &x + alpha * &dx;
            r_new = residual_fn(&x_new)?;
            r_new_norm = r_new.norm();
        }

        if !r_new_norm.is_finite() {
            return Err(SolverError::Numeric {
                what: format!("non-finite residual at iteration {}", iter),
            });
        }

        x = x_new;
        r = r_new;
        r_norm = r_new_norm;

        // Check for stagnation
        if alpha < 1e-10 {
            return Err(SolverError::ConvergenceFailed {
                what: format!("Line search stagnated at iteration {}", iter),
            });
        }
    }

    if r_norm < config.abs_tol || r_norm < config.rel_tol * r0_norm {
        return Ok(NewtonResult {
            x,
            residual_norm: r_norm,
            iterations: config.max_iterations,
            converged: true,
        });
    }

    Err(SolverError::ConvergenceFailed {
        what: format!(
            "Maximum iterations {} reached, residual = {}",
            config.max_iterations, r_norm
        ),
    })
}
