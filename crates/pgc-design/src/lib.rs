//! pgc-design: steady design-point calculator for the TEG plant.
//!
//! Sizes the exchanger stack, flows, pumps and parasitic loads for a given
//! module type, array size and pair of loop temperatures, and works fuel
//! demand and cost back from a net output target.

pub mod correlations;
pub mod economics;
pub mod error;
pub mod geometry;
pub mod model;
pub mod scenarios;
pub mod sizing;

pub use economics::{DEFAULT_GAS_PRICES, FuelCost, fuel_costs};
pub use error::{DesignError, DesignResult};
pub use geometry::HxGeometry;
pub use model::{DesignConfig, DesignPoint, run_design};
pub use scenarios::{DEFAULT_TARGETS_KW, FUEL_SCENARIOS, SWEEP_SCENARIOS, SWEEP_TEG_COUNTS, Scenario};
pub use sizing::{FuelBalance, Sizing, boreholes_for, round_to_boards, size_for_target};
