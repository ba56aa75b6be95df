// pgc-core/src/units.rs

use uom::si::f64::{
    Area as UomArea, DynamicViscosity as UomDynamicViscosity, Energy as UomEnergy,
    Length as UomLength, MassDensity as UomMassDensity, MassRate as UomMassRate,
    Power as UomPower, Pressure as UomPressure, Ratio as UomRatio,
    TemperatureInterval as UomTemperatureInterval,
    ThermodynamicTemperature as UomThermodynamicTemperature, Time as UomTime,
    VolumeRate as UomVolumeRate,
};

// Public canonical unit types (SI, f64)
pub type Area = UomArea;
pub type DynVisc = UomDynamicViscosity;
pub type Energy = UomEnergy;
pub type Length = UomLength;
pub type Density = UomMassDensity;
pub type MassRate = UomMassRate;
pub type Power = UomPower;
pub type Pressure = UomPressure;
pub type Ratio = UomRatio;
pub type TempInterval = UomTemperatureInterval;
pub type Temperature = UomThermodynamicTemperature;
pub type Time = UomTime;
pub type VolumeRate = UomVolumeRate;

#[inline]
pub fn pa(v: f64) -> Pressure {
    use uom::si::pressure::pascal;
    Pressure::new::<pascal>(v)
}

#[inline]
pub fn k(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::kelvin;
    Temperature::new::<kelvin>(v)
}

/// Degrees Celsius to an absolute temperature.
#[inline]
pub fn degc(v: f64) -> Temperature {
    k(v + constants::KELVIN_OFFSET)
}

#[inline]
pub fn kgps(v: f64) -> MassRate {
    use uom::si::mass_rate::kilogram_per_second;
    MassRate::new::<kilogram_per_second>(v)
}

#[inline]
pub fn m(v: f64) -> Length {
    use uom::si::length::meter;
    Length::new::<meter>(v)
}

#[inline]
pub fn s(v: f64) -> Time {
    use uom::si::time::second;
    Time::new::<second>(v)
}

#[inline]
pub fn w(v: f64) -> Power {
    use uom::si::power::watt;
    Power::new::<watt>(v)
}

#[inline]
pub fn joules(v: f64) -> Energy {
    use uom::si::energy::joule;
    Energy::new::<joule>(v)
}

#[inline]
pub fn unitless(v: f64) -> Ratio {
    use uom::si::ratio::ratio;
    Ratio::new::<ratio>(v)
}

pub mod constants {
    pub const KELVIN_OFFSET: f64 = 273.15;
    pub const SECONDS_PER_HOUR: f64 = 3_600.0;
    pub const SECONDS_PER_DAY: f64 = 86_400.0;
    pub const DAYS_PER_YEAR: f64 = 365.0;
    pub const SECONDS_PER_YEAR: f64 = SECONDS_PER_DAY * DAYS_PER_YEAR;
}
