//! Heat loss swept across outdoor temperature.

use crate::conditions::DesignConditions;
use crate::envelope::envelope_loss;
use crate::error::CalcResult;
use crate::scenario::Scenario;
use crate::shared::SharedInputs;
use hl_catalog::MaterialLibrary;
use serde::Serialize;

/// Spacing between sweep points, °F.
pub const CURVE_STEP_F: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LossPoint {
    pub outdoor_f: f64,
    /// Envelope loss at this outdoor temperature, BTU/hr.
    pub total: f64,
}

/// First and last outdoor temperature of the sweep, both on the 5 °F grid.
///
/// Covers at least 0..=60 °F, reaches 10 °F past the design outdoor
/// temperature on both sides, and spans from 30 °F below to 10 °F above
/// indoor.
pub fn curve_range(conditions: &DesignConditions) -> (f64, f64) {
    let low = 0.0_f64
        .min(conditions.outdoor_f - 10.0)
        .min(conditions.indoor_f - 30.0);
    let high = 60.0_f64
        .max(conditions.outdoor_f + 10.0)
        .max(conditions.indoor_f + 10.0);
    (
        (low / CURVE_STEP_F).floor() * CURVE_STEP_F,
        (high / CURVE_STEP_F).ceil() * CURVE_STEP_F,
    )
}

/// Envelope loss at every grid temperature in [`curve_range`], coldest first.
///
/// Only the outdoor temperature moves. The floor keeps its ground ΔT, so
/// once outdoor reaches indoor the curve flattens at the floor loss.
pub fn loss_curve(
    shared: &SharedInputs,
    scenario: &Scenario,
    library: &MaterialLibrary,
) -> CalcResult<Vec<LossPoint>> {
    shared.conditions.validate()?;
    let areas = shared.shape.surface_areas()?;
    let (start, end) = curve_range(&shared.conditions);
    let steps = ((end - start) / CURVE_STEP_F).round() as usize;
    (0..=steps)
        .map(|i| {
            let outdoor_f = start + i as f64 * CURVE_STEP_F;
            let conditions = DesignConditions {
                outdoor_f,
                ..shared.conditions
            };
            let loss = envelope_loss(&areas, &conditions, scenario, library)?;
            Ok(LossPoint {
                outdoor_f,
                total: loss.total,
            })
        })
        .collect()
}
