//! Named operating scenarios for fuel reports and sweeps.

use crate::error::DesignResult;
use crate::model::DesignConfig;
use pgc_components::lookup_module;
use pgc_core::units::degc;

/// Net output targets reported by default (kW).
pub const DEFAULT_TARGETS_KW: [f64; 3] = [10.0, 25.0, 50.0];

/// Array sizes covered by a design sweep, before board rounding.
pub const SWEEP_TEG_COUNTS: [usize; 10] = [500, 750, 1000, 1500, 2000, 3000, 4000, 5000, 6000, 8000];

/// One module type at one pair of exchanger inlet temperatures.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scenario {
    pub label: &'static str,
    pub teg_key: &'static str,
    pub hot_c: f64,
    pub cold_c: f64,
}

impl Scenario {
    pub fn config(&self, teg_count: usize) -> DesignResult<DesignConfig> {
        let module = lookup_module(self.teg_key)?;
        Ok(DesignConfig::new(
            *module,
            teg_count,
            degc(self.hot_c),
            degc(self.cold_c),
        ))
    }
}

/// Module comparison used by the fuel report.
pub const FUEL_SCENARIOS: [Scenario; 4] = [
    Scenario {
        label: "BiTe 200 C (Marlow)",
        teg_key: "marlow",
        hot_c: 200.0,
        cold_c: 40.0,
    },
    Scenario {
        label: "PbTe hybrid 350 C (Thermonamic)",
        teg_key: "thermonamic",
        hot_c: 350.0,
        cold_c: 100.0,
    },
    Scenario {
        label: "PbTe hybrid 320 C (Thermonamic, derated)",
        teg_key: "thermonamic",
        hot_c: 320.0,
        cold_c: 100.0,
    },
    Scenario {
        label: "Pb-enhanced Alphabet 400 C",
        teg_key: "alphabet",
        hot_c: 400.0,
        cold_c: 100.0,
    },
];

/// Scenarios swept across array sizes.
pub const SWEEP_SCENARIOS: [Scenario; 3] = [
    Scenario {
        label: "Marlow BiTe 200C",
        teg_key: "marlow",
        hot_c: 200.0,
        cold_c: 40.0,
    },
    Scenario {
        label: "Thermonamic PbTe 320C",
        teg_key: "thermonamic",
        hot_c: 320.0,
        cold_c: 100.0,
    },
    Scenario {
        label: "Alphabet Pb 400C",
        teg_key: "alphabet",
        hot_c: 400.0,
        cold_c: 100.0,
    },
];

/// Default cold inlet for a module when only the type is given.
pub fn default_temperatures(teg_key: &str) -> (f64, f64) {
    if teg_key.eq_ignore_ascii_case("marlow") {
        (200.0, 40.0)
    } else {
        (350.0, 100.0)
    }
}
