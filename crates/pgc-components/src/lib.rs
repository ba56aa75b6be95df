//! pgc-components: component library for the PGC thermal plant.
//!
//! Provides models for each element of the two loops:
//! - Burner with fuel conversion and set point
//! - Insulated pipes
//! - Fluid-to-face heat exchangers
//! - TEG array at matched load, with the module catalog
//! - Ground loop and dry cooler rejection paths
//! - Fixed-flow pumps
//!
//! Stream elements implement `TwoPortComponent` and are deterministic
//! functions of their inlet port and parameters.
//!
//! # Example
//!
//! ```
//! use pgc_components::{FluidPort, Pipe, TwoPortComponent};
//! use pgc_core::units::{k, kgps, m};
//! use pgc_fluids::WaterGlycol;
//!
//! let pipe = Pipe::new("hot_pipe".into(), m(30.0), m(0.038), 0.5, k(293.15)).unwrap();
//! let step = pipe
//!     .step(&WaterGlycol, FluidPort::new(k(473.15), kgps(4.0)))
//!     .unwrap();
//! println!("Pipe loss: {:.1} W", -step.heat_rate.value);
//! ```

pub mod burner;
pub mod common;
pub mod dry_cooler;
pub mod error;
pub mod fuel;
pub mod ground_loop;
pub mod heat_exchanger;
pub mod pipe;
pub mod ports;
pub mod pump;
pub mod rejection;
pub mod teg;
pub mod traits;

// Re-exports
pub use burner::Burner;
pub use dry_cooler::DryCooler;
pub use error::{ComponentError, ComponentResult};
pub use fuel::DeliveryChain;
pub use ground_loop::GroundLoop;
pub use heat_exchanger::{FacingExchanger, HeatExchanger, HxDuty};
pub use pipe::Pipe;
pub use ports::{FluidPort, HeatPort};
pub use pump::Pump;
pub use rejection::{BoundRejection, HeatRejection, Rejection};
pub use teg::{TegArray, TegModule, TegOperatingPoint, TegUnitOutput, lookup_module};
pub use traits::{LegTrace, PortStep, TwoPortComponent, trace_leg};
