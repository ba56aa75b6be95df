//! 50/50 mono-ethylene glycol / water.

use crate::error::FluidResult;
use crate::model::validation::{validate_envelope, validate_props};
use crate::model::{FluidModel, FluidProps};
use pgc_core::units::{Density, DynVisc, Temperature};
use uom::si::dynamic_viscosity::pascal_second;
use uom::si::mass_density::kilogram_per_cubic_meter;

/// Pressurized 50/50 water-glycol with properties frozen at an ~80 C bulk
/// temperature.
///
/// Valid from the mixture freeze point (-35 C) to 250 C under loop pressure.
#[derive(Clone, Copy, Debug, Default)]
pub struct WaterGlycol;

impl WaterGlycol {
    pub const RHO: f64 = 1040.0;
    pub const CP: f64 = 3400.0;
    pub const MU: f64 = 0.0008;
    pub const K: f64 = 0.40;

    const MIN_K: f64 = 238.15;
    const MAX_K: f64 = 523.15;
}

impl FluidModel for WaterGlycol {
    fn name(&self) -> &str {
        "Water/Glycol 50/50"
    }

    fn props(&self, t: Temperature) -> FluidResult<FluidProps> {
        validate_envelope(t, Self::MIN_K, Self::MAX_K, "water-glycol temperature")?;
        let props = FluidProps {
            t,
            rho: Density::new::<kilogram_per_cubic_meter>(Self::RHO),
            cp: Self::CP,
            mu: DynVisc::new::<pascal_second>(Self::MU),
            k: Self::K,
        };
        validate_props(&props)?;
        Ok(props)
    }
}
