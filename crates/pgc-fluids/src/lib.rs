//! pgc-fluids: heat-transfer fluid properties for the PGC plant.
//!
//! Provides:
//! - `FluidModel` trait returning a `FluidProps` pack at a temperature
//! - 50/50 water-glycol (constant properties at ~80 C bulk)
//! - Therminol VP-1 thermal oil (datasheet polynomial fits)
//! - `FluidKind` catalog with name parsing and hot-side auto-selection
//!
//! # Example
//!
//! ```
//! use pgc_fluids::{FluidKind, FluidModel};
//! use pgc_core::units::degc;
//!
//! let oil = FluidKind::for_hot_temperature(degc(350.0));
//! assert_eq!(oil, FluidKind::ThermalOil);
//!
//! let props = oil.model().props(degc(300.0)).unwrap();
//! println!("cp = {:.0} J/kg-K", props.cp);
//! ```

pub mod catalog;
pub mod error;
pub mod model;
pub mod thermal_oil;
pub mod water_glycol;

pub use catalog::{AUTO_SELECT_THRESHOLD_C, FluidKind};
pub use error::{FluidError, FluidResult};
pub use model::{FluidModel, FluidProps, SpecHeatCapacity, ThermalConductivity};
pub use thermal_oil::ThermalOil;
pub use water_glycol::WaterGlycol;
