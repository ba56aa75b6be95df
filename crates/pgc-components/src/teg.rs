//! Thermoelectric generator modules and the parallel TEG array.

use crate::common::{check_finite, check_positive};
use crate::error::{ComponentError, ComponentResult};
use crate::ports::HeatPort;
use pgc_core::units::constants::KELVIN_OFFSET;
use pgc_core::units::{Power, Temperature, w};
use tracing::debug;

/// Datasheet description of one TEG module.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TegModule {
    /// Catalog key ("marlow", "thermonamic", "alphabet")
    pub key: &'static str,
    pub name: &'static str,
    /// Face width (m)
    pub width_m: f64,
    /// Face height (m)
    pub height_m: f64,
    /// Thermal resistance hot face to cold face (K/W)
    pub r_thermal: f64,
    /// Maximum continuous hot-face temperature (C)
    pub max_hot_c: f64,
    /// Seebeck coefficient (V/K)
    pub seebeck: f64,
    /// Internal resistance at the operating point (ohm)
    pub internal_resistance: f64,
}

pub const MARLOW_TG1_1008: TegModule = TegModule {
    key: "marlow",
    name: "Marlow TG1-1008 (BiTe)",
    width_m: 0.040,
    height_m: 0.040,
    r_thermal: 1.52,
    max_hot_c: 200.0,
    seebeck: 0.033,
    internal_resistance: 1.5,
};

pub const THERMONAMIC_PB12611: TegModule = TegModule {
    key: "thermonamic",
    name: "Thermonamic TEG1-PB-12611 (PbTe hybrid)",
    width_m: 0.056,
    height_m: 0.056,
    r_thermal: 0.95,
    max_hot_c: 360.0,
    seebeck: 0.029,
    internal_resistance: 0.97,
};

pub const ALPHABET_PB_ENHANCED: TegModule = TegModule {
    key: "alphabet",
    name: "Alphabet PowerCard Pb-enhanced (est.)",
    width_m: 0.040,
    height_m: 0.040,
    r_thermal: 1.10,
    max_hot_c: 400.0,
    seebeck: 0.035,
    internal_resistance: 1.2,
};

pub const TEG_CATALOG: [&TegModule; 3] =
    [&MARLOW_TG1_1008, &THERMONAMIC_PB12611, &ALPHABET_PB_ENHANCED];

/// Look up a module by catalog key.
pub fn lookup_module(key: &str) -> ComponentResult<&'static TegModule> {
    TEG_CATALOG
        .iter()
        .copied()
        .find(|m| m.key.eq_ignore_ascii_case(key.trim()))
        .ok_or_else(|| ComponentError::UnknownModule {
            name: key.to_string(),
        })
}

/// Matched-load operating point of a single module.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TegUnitOutput {
    pub open_circuit_voltage: f64,
    /// MPP voltage (V)
    pub voltage: f64,
    /// MPP current (A)
    pub current: f64,
    /// Electrical output (W)
    pub power: f64,
    /// Heat entering the hot face (W)
    pub heat_in: f64,
    /// Heat leaving the cold face (W)
    pub heat_out: f64,
    pub efficiency: f64,
}

/// Matched-load output for one module at `dt` across the stack.
///
/// ```text
/// V_oc = S dT,  V = V_oc / 2,  I = V_oc / (2 R_i),  P = V I
/// q_in = dT / R_th,  q_out = q_in - P,  eff = P / q_in
/// ```
///
/// `dt <= 0` produces no power; heat then flows backwards through the stack.
pub fn matched_load_output(
    dt: f64,
    r_thermal: f64,
    seebeck: f64,
    internal_resistance: f64,
) -> TegUnitOutput {
    let heat_in = dt / r_thermal;
    if dt <= 0.0 {
        return TegUnitOutput {
            heat_in,
            heat_out: heat_in,
            ..TegUnitOutput::default()
        };
    }

    let open_circuit_voltage = seebeck * dt;
    let voltage = open_circuit_voltage / 2.0;
    let current = open_circuit_voltage / (2.0 * internal_resistance);
    let power = voltage * current;
    let efficiency = if heat_in > 0.0 { power / heat_in } else { 0.0 };

    TegUnitOutput {
        open_circuit_voltage,
        voltage,
        current,
        power,
        heat_in,
        heat_out: heat_in - power,
        efficiency,
    }
}

impl TegModule {
    pub fn unit_output(&self, dt: f64) -> TegUnitOutput {
        matched_load_output(dt, self.r_thermal, self.seebeck, self.internal_resistance)
    }

    /// Face area (m²).
    pub fn face_area(&self) -> f64 {
        self.width_m * self.height_m
    }
}

/// Aggregate operating point of the array.
#[derive(Clone, Copy, Debug)]
pub struct TegOperatingPoint {
    pub per_unit: TegUnitOutput,
    /// Electrical output of the array
    pub power: Power,
    pub heat_in: Power,
    pub heat_out: Power,
    pub efficiency: f64,
    /// Hot-face port, flow positive into the array
    pub hot_port: HeatPort,
    /// Cold-face port, flow positive into the array (negative in operation)
    pub cold_port: HeatPort,
    pub over_temperature: bool,
}

/// N identical modules electrically at matched load and thermally in parallel.
#[derive(Clone, Debug)]
pub struct TegArray {
    pub name: String,
    pub unit_count: usize,
    /// Per-unit thermal resistance (K/W)
    pub r_thermal: f64,
    /// Seebeck coefficient (V/K)
    pub seebeck: f64,
    /// Internal resistance (ohm)
    pub internal_resistance: f64,
    /// Hot-face rating
    pub max_hot: Temperature,
}

impl TegArray {
    pub fn new(
        name: String,
        unit_count: usize,
        r_thermal: f64,
        seebeck: f64,
        internal_resistance: f64,
        max_hot: Temperature,
    ) -> ComponentResult<Self> {
        if unit_count == 0 {
            return Err(ComponentError::InvalidArg {
                what: "TEG count must be positive",
            });
        }
        check_positive(r_thermal, "TEG thermal resistance must be positive")?;
        check_positive(seebeck, "Seebeck coefficient must be positive")?;
        check_positive(internal_resistance, "TEG internal resistance must be positive")?;
        check_positive(max_hot.value, "TEG hot-face rating must be positive")?;

        Ok(Self {
            name,
            unit_count,
            r_thermal,
            seebeck,
            internal_resistance,
            max_hot,
        })
    }

    pub fn from_module(name: String, module: &TegModule, unit_count: usize) -> ComponentResult<Self> {
        Self::new(
            name,
            unit_count,
            module.r_thermal,
            module.seebeck,
            module.internal_resistance,
            pgc_core::units::k(module.max_hot_c + KELVIN_OFFSET),
        )
    }

    /// Array thermal conductance hot face to cold face (W/K).
    pub fn conductance(&self) -> f64 {
        self.unit_count as f64 / self.r_thermal
    }

    /// Evaluate the array at the given face temperatures.
    ///
    /// Electrical output is additionally capped at the Carnot limit
    /// `q_in (1 - T_c / T_h)`, which keeps output strictly below heat input
    /// for any parameter set.
    pub fn evaluate(&self, hot_face: Temperature, cold_face: Temperature) -> ComponentResult<TegOperatingPoint> {
        check_finite(hot_face.value, "TEG hot-face temperature")?;
        check_finite(cold_face.value, "TEG cold-face temperature")?;
        if hot_face.value <= 0.0 || cold_face.value <= 0.0 {
            return Err(ComponentError::NonPhysical {
                what: "TEG face temperatures must be positive",
            });
        }

        let dt = hot_face.value - cold_face.value;
        let mut per_unit =
            matched_load_output(dt, self.r_thermal, self.seebeck, self.internal_resistance);

        if dt > 0.0 {
            let carnot = per_unit.heat_in * dt / hot_face.value;
            if per_unit.power > carnot {
                per_unit.power = carnot;
                per_unit.heat_out = per_unit.heat_in - carnot;
                per_unit.efficiency = carnot / per_unit.heat_in;
            }
        }

        let n = self.unit_count as f64;
        let power = w(per_unit.power * n);
        let heat_in = w(per_unit.heat_in * n);
        let heat_out = w(per_unit.heat_out * n);

        let over_temperature = hot_face.value > self.max_hot.value;
        if over_temperature {
            debug!(
                array = %self.name,
                hot_face_k = hot_face.value,
                rating_k = self.max_hot.value,
                "TEG hot face above module rating"
            );
        }

        Ok(TegOperatingPoint {
            per_unit,
            power,
            heat_in,
            heat_out,
            efficiency: per_unit.efficiency,
            hot_port: HeatPort::new(hot_face, heat_in),
            cold_port: HeatPort::new(cold_face, -heat_out),
            over_temperature,
        })
    }
}
