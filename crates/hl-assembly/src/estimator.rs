//! Existing-building R-value estimator.
//!
//! Back-calculates the R-value of one unknown component from a measured HVAC
//! rate. Everything that is not the target is charged a typical U-factor, the
//! space's air change rate is charged as infiltration, and whatever heat flow
//! remains is attributed to the target. Imperial inputs are converted to SI
//! with `uom`, the balance is done in W, and the result is reported in both
//! unit systems.

use crate::error::{AssemblyError, AssemblyResult};
use hl_core::constants::{BTU_PER_HOUR_TO_WATTS, R_IMPERIAL_TO_SI};
use hl_core::{Area, Volume, delta_f, feet, sq_ft};
use serde::{Deserialize, Serialize};
use uom::si::area::square_meter;
use uom::si::temperature_interval::kelvin;
use uom::si::volume::cubic_meter;

/// Typical U-factors charged to the non-target surfaces, W/m²K.
pub const U_WINDOWS_SI: f64 = 2.8;
pub const U_OTHER_WALLS_CEILINGS_SI: f64 = 0.5;
pub const U_FLOOR_SI: f64 = 0.3;

/// kg/m³
pub const AIR_DENSITY: f64 = 1.2;
/// J/(kg·K)
pub const AIR_SPECIFIC_HEAT: f64 = 1000.0;

const SECONDS_PER_HOUR: f64 = 3600.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HvacMode {
    #[default]
    Heating,
    Cooling,
}

/// Measured space, imperial units (ft, ft², °F, BTU/hr).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RValueInputs {
    pub space_length_ft: f64,
    pub space_width_ft: f64,
    pub space_height_ft: f64,
    pub indoor_air_f: f64,
    pub outdoor_air_f: f64,
    /// Steady HVAC output. The sign is taken from `hvac_mode`.
    pub hvac_btu_per_hr: f64,
    #[serde(default)]
    pub hvac_mode: HvacMode,
    pub target_area_ft2: f64,
    #[serde(default)]
    pub target_surface_indoor_f: Option<f64>,
    #[serde(default)]
    pub target_surface_outdoor_f: Option<f64>,
    pub air_changes_per_hour: f64,
    #[serde(default)]
    pub window_area_ft2: f64,
    #[serde(default)]
    pub other_area_ft2: f64,
    #[serde(default)]
    pub floor_area_ft2: f64,
}

/// Heat flows of the balance, W. Positive means leaving the space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HeatBalance {
    pub hvac_w: f64,
    pub windows_w: f64,
    pub other_w: f64,
    pub floor_w: f64,
    pub infiltration_w: f64,
    pub target_w: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RValueEstimate {
    /// Air-to-air R of the target, m²K/W.
    pub r_si_overall: f64,
    /// Air-to-air R of the target, ft²·°F·h/BTU.
    pub r_imperial_overall: f64,
    /// Surface-to-surface R, when both surface temperatures were measured.
    pub r_si_material: Option<f64>,
    pub r_imperial_material: Option<f64>,
    pub balance: HeatBalance,
}

fn check(value: f64, field: &'static str, allow_negative: bool) -> AssemblyResult<f64> {
    if !value.is_finite() {
        return Err(AssemblyError::invalid(field, format!("not a number: {value}")));
    }
    if !allow_negative && value < 0.0 {
        return Err(AssemblyError::invalid(field, format!("must be non-negative, got {value}")));
    }
    Ok(value)
}

pub fn estimate_r_value(inputs: &RValueInputs) -> AssemblyResult<RValueEstimate> {
    let length = check(inputs.space_length_ft, "space length", false)?;
    let width = check(inputs.space_width_ft, "space width", false)?;
    let height = check(inputs.space_height_ft, "space height", false)?;
    let indoor = check(inputs.indoor_air_f, "indoor air temperature", true)?;
    let outdoor = check(inputs.outdoor_air_f, "outdoor air temperature", true)?;
    let hvac = check(inputs.hvac_btu_per_hr, "HVAC rate", true)?;
    let target_area = check(inputs.target_area_ft2, "target area", false)?;
    let ach = check(inputs.air_changes_per_hour, "air changes per hour", false)?;
    let windows = check(inputs.window_area_ft2, "window area", false)?;
    let other = check(inputs.other_area_ft2, "other wall and ceiling area", false)?;
    let floor = check(inputs.floor_area_ft2, "floor area", false)?;

    if target_area == 0.0 {
        return Err(AssemblyError::invalid("target area", "cannot be zero"));
    }

    let surfaces = match (inputs.target_surface_indoor_f, inputs.target_surface_outdoor_f) {
        (Some(inner), Some(outer)) => Some((
            check(inner, "indoor surface temperature", true)?,
            check(outer, "outdoor surface temperature", true)?,
        )),
        (None, None) => None,
        _ => {
            return Err(AssemblyError::invalid(
                "surface temperatures",
                "provide both indoor and outdoor surface temperatures or neither",
            ));
        }
    };

    let delta_t = delta_f(indoor - outdoor).get::<kelvin>();
    if delta_t == 0.0 {
        return Err(AssemblyError::invalid(
            "air temperatures",
            "indoor and outdoor air temperatures cannot be equal",
        ));
    }

    let hvac_w = match inputs.hvac_mode {
        HvacMode::Heating => hvac.abs(),
        HvacMode::Cooling => -hvac.abs(),
    } * BTU_PER_HOUR_TO_WATTS;

    let m2 = |ft2: f64| -> f64 {
        let area: Area = sq_ft(ft2);
        area.get::<square_meter>()
    };
    let volume: Volume = feet(length) * feet(width) * feet(height);
    let volume_m3 = volume.get::<cubic_meter>();

    let windows_w = U_WINDOWS_SI * m2(windows) * delta_t;
    let other_w = U_OTHER_WALLS_CEILINGS_SI * m2(other) * delta_t;
    let floor_w = U_FLOOR_SI * m2(floor) * delta_t;
    let infiltration_w =
        volume_m3 * ach / SECONDS_PER_HOUR * AIR_DENSITY * AIR_SPECIFIC_HEAT * delta_t;

    let target_w = hvac_w - (windows_w + other_w + floor_w + infiltration_w);
    let flux = target_w / m2(target_area);
    if flux == 0.0 {
        return Err(AssemblyError::invalid(
            "HVAC rate",
            "no heat flow is left for the target component",
        ));
    }

    let r_si_overall = delta_t / flux;
    let r_si_material = surfaces.and_then(|(inner, outer)| {
        let surface_dt = delta_f(inner - outer).get::<kelvin>();
        (surface_dt != 0.0).then(|| surface_dt / flux)
    });

    let estimate = RValueEstimate {
        r_si_overall,
        r_imperial_overall: r_si_overall / R_IMPERIAL_TO_SI,
        r_si_material,
        r_imperial_material: r_si_material.map(|r| r / R_IMPERIAL_TO_SI),
        balance: HeatBalance {
            hvac_w,
            windows_w,
            other_w,
            floor_w,
            infiltration_w,
            target_w,
        },
    };

    if estimate.r_si_overall < 0.0 {
        tracing::warn!(
            r_si = estimate.r_si_overall,
            "estimated R is negative; the measured HVAC rate does not cover the other losses"
        );
    }

    Ok(estimate)
}
