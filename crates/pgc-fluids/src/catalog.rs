//! Named fluid catalog.

use crate::error::{FluidError, FluidResult};
use crate::model::FluidModel;
use crate::thermal_oil::ThermalOil;
use crate::water_glycol::WaterGlycol;
use pgc_core::units::Temperature;
use pgc_core::units::constants::KELVIN_OFFSET;

/// Hot-side temperature above which water-glycol is replaced by thermal oil.
pub const AUTO_SELECT_THRESHOLD_C: f64 = 220.0;

static WATER_GLYCOL: WaterGlycol = WaterGlycol;
static THERMAL_OIL: ThermalOil = ThermalOil;

/// Loop fluids known to the plant model.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FluidKind {
    WaterGlycol,
    ThermalOil,
}

impl FluidKind {
    pub fn model(self) -> &'static dyn FluidModel {
        match self {
            FluidKind::WaterGlycol => &WATER_GLYCOL,
            FluidKind::ThermalOil => &THERMAL_OIL,
        }
    }

    /// Canonical key used in plant files.
    pub fn key(self) -> &'static str {
        match self {
            FluidKind::WaterGlycol => "water_glycol",
            FluidKind::ThermalOil => "thermal_oil",
        }
    }

    /// Parse a fluid key, accepting the common aliases.
    pub fn parse(name: &str) -> FluidResult<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "water_glycol" | "glycol" | "water" => Ok(FluidKind::WaterGlycol),
            "thermal_oil" | "therminol" | "vp1" => Ok(FluidKind::ThermalOil),
            _ => Err(FluidError::UnknownFluid {
                name: name.to_string(),
            }),
        }
    }

    /// Water-glycol up to 220 C hot-side, thermal oil above.
    pub fn for_hot_temperature(t_hot: Temperature) -> Self {
        if t_hot.value - KELVIN_OFFSET > AUTO_SELECT_THRESHOLD_C {
            FluidKind::ThermalOil
        } else {
            FluidKind::WaterGlycol
        }
    }
}

impl std::fmt::Display for FluidKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pgc_core::units::degc;

    #[test]
    fn parse_aliases() {
        assert_eq!(FluidKind::parse("glycol").unwrap(), FluidKind::WaterGlycol);
        assert_eq!(FluidKind::parse("Therminol").unwrap(), FluidKind::ThermalOil);
        assert!(FluidKind::parse("mercury").is_err());
    }

    #[test]
    fn key_roundtrip() {
        for kind in [FluidKind::WaterGlycol, FluidKind::ThermalOil] {
            assert_eq!(FluidKind::parse(kind.key()).unwrap(), kind);
        }
    }

    #[test]
    fn auto_select_threshold() {
        assert_eq!(
            FluidKind::for_hot_temperature(degc(200.0)),
            FluidKind::WaterGlycol
        );
        assert_eq!(
            FluidKind::for_hot_temperature(degc(320.0)),
            FluidKind::ThermalOil
        );
    }

    #[test]
    fn catalog_models_evaluate() {
        let t = degc(150.0);
        assert!(FluidKind::WaterGlycol.model().props(t).is_ok());
        assert!(FluidKind::ThermalOil.model().props(t).is_ok());
    }
}
