//! pgc-solver: nonlinear algebraic solve for the plant's coupled stack.
//!
//! Provides a damped Newton iteration with backtracking line search and
//! finite-difference Jacobians over `nalgebra` vectors. The plant model
//! poses its TEG face and cold-loop closure equations through these.

pub mod error;
pub mod jacobian;
pub mod newton;

pub use error::{SolverError, SolverResult};
pub use jacobian::{finite_difference_jacobian, finite_difference_jacobian_at};
pub use newton::{NewtonConfig, NewtonResult, newton_solve};
