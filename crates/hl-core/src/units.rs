//! Unit handling for the SI energy balance. Everything else in heatload
//! works in plain imperial `f64`.

use uom::si::f64::{Length, TemperatureInterval};
use uom::si::{area::square_foot, length::foot, temperature_interval::degree_fahrenheit};

pub use uom::si::f64::{Area, Volume};

pub fn feet(v: f64) -> Length {
    Length::new::<foot>(v)
}

pub fn sq_ft(v: f64) -> Area {
    Area::new::<square_foot>(v)
}

/// A Fahrenheit temperature difference.
pub fn delta_f(v: f64) -> TemperatureInterval {
    TemperatureInterval::new::<degree_fahrenheit>(v)
}

/// Imperial building-science constants. R-values are ft²·°F·h/BTU.
pub mod constants {
    /// Average watts to BTU/hr, the only conversion internal gains use.
    pub const WATTS_TO_BTU_PER_HOUR: f64 = 3.412;

    /// BTU/hr to watts, for a measured HVAC rate.
    pub const BTU_PER_HOUR_TO_WATTS: f64 = 0.293_071;

    /// Imperial R to RSI (m²·K/W).
    pub const R_IMPERIAL_TO_SI: f64 = 0.1761;

    pub const HOURS_PER_DAY: f64 = 24.0;
}
