//! pgc-core: shared foundation for the PGC plant simulator.
//!
//! Contains:
//! - units (uom SI types + constructors, plant time constants)
//! - numeric (Real + tolerances + float helpers)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

pub use error::{PgcError, PgcResult};
pub use numeric::*;
pub use units::*;
