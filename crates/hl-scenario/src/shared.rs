//! Inputs shared by both scenarios: building shape and design conditions.

use crate::conditions::DesignConditions;
use crate::error::{CalcResult, ScenarioError};
use crate::geometry::BuildingShape;
use hl_core::ensure_finite;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SharedInputs {
    pub shape: BuildingShape,
    pub conditions: DesignConditions,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SharedField {
    Shape(BuildingShape),
    Length(f64),
    Width(f64),
    /// Wall height for rectangles, ridge height for A-frames.
    Height(f64),
    RoofPitch(f64),
    SpringWall(f64),
    IndoorTemp(f64),
    OutdoorTemp(f64),
    GroundTemp(f64),
}

/// Switch shape kind, keeping length and width. Other dimensions take the
/// usual starting values for that shape.
fn reshape(current: &BuildingShape, kind: &str) -> CalcResult<BuildingShape> {
    let length_ft = current.length_ft();
    let width_ft = current.width_ft();
    match kind.trim().to_ascii_lowercase().replace('-', "_").as_str() {
        "rectangle" => Ok(BuildingShape::Rectangle {
            length_ft,
            width_ft,
            height_ft: 8.0,
            roof_pitch: 4.0,
        }),
        "a_frame" => Ok(BuildingShape::AFrame {
            length_ft,
            width_ft,
            height_ft: 15.0,
        }),
        "gothic_arch" => Ok(BuildingShape::GothicArch {
            length_ft,
            width_ft,
            spring_wall_ft: 2.0,
        }),
        other => Err(ScenarioError::invalid(
            "shape",
            format!("expected rectangle, a_frame or gothic_arch, got {other:?}"),
        )),
    }
}

impl SharedField {
    pub fn parse(key: &str, raw: &str, current: &SharedInputs) -> CalcResult<Self> {
        let num = || {
            raw.trim()
                .parse::<f64>()
                .map_err(|_| ScenarioError::invalid(key, format!("not a number: {raw:?}")))
        };
        Ok(match key {
            "shape" => SharedField::Shape(reshape(&current.shape, raw)?),
            "length" => SharedField::Length(num()?),
            "width" => SharedField::Width(num()?),
            "height" => SharedField::Height(num()?),
            "roof_pitch" => SharedField::RoofPitch(num()?),
            "spring_wall" => SharedField::SpringWall(num()?),
            "indoor_temp" => SharedField::IndoorTemp(num()?),
            "outdoor_temp" => SharedField::OutdoorTemp(num()?),
            "ground_temp" => SharedField::GroundTemp(num()?),
            _ => return Err(ScenarioError::UnknownField { key: key.into() }),
        })
    }

    pub fn apply(self, shared: &mut SharedInputs) -> CalcResult<()> {
        let not_for_shape = |what: &str, shape: &BuildingShape| {
            ScenarioError::invalid(what, format!("does not apply to a {} building", shape.id()))
        };
        let current = shared.shape;
        match self {
            SharedField::Shape(shape) => shared.shape = shape,
            SharedField::Length(v) => match &mut shared.shape {
                BuildingShape::Rectangle { length_ft, .. }
                | BuildingShape::AFrame { length_ft, .. }
                | BuildingShape::GothicArch { length_ft, .. } => *length_ft = v,
            },
            SharedField::Width(v) => match &mut shared.shape {
                BuildingShape::Rectangle { width_ft, .. }
                | BuildingShape::AFrame { width_ft, .. }
                | BuildingShape::GothicArch { width_ft, .. } => *width_ft = v,
            },
            SharedField::Height(v) => match &mut shared.shape {
                BuildingShape::Rectangle { height_ft, .. }
                | BuildingShape::AFrame { height_ft, .. } => *height_ft = v,
                BuildingShape::GothicArch { .. } => {
                    return Err(not_for_shape("height", &current));
                }
            },
            SharedField::RoofPitch(v) => match &mut shared.shape {
                BuildingShape::Rectangle { roof_pitch, .. } => *roof_pitch = v,
                _ => return Err(not_for_shape("roof pitch", &current)),
            },
            SharedField::SpringWall(v) => match &mut shared.shape {
                BuildingShape::GothicArch { spring_wall_ft, .. } => *spring_wall_ft = v,
                _ => return Err(not_for_shape("spring wall", &current)),
            },
            SharedField::IndoorTemp(t) => {
                shared.conditions.indoor_f = ensure_finite(t, "indoor temperature")?;
            }
            SharedField::OutdoorTemp(t) => {
                shared.conditions.outdoor_f = ensure_finite(t, "outdoor temperature")?;
            }
            SharedField::GroundTemp(t) => {
                shared.conditions.ground_f = ensure_finite(t, "ground temperature")?;
            }
        }
        shared.shape.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reshape_keeps_footprint() {
        let shared = SharedInputs::default();
        let field = SharedField::parse("shape", "gothic-arch", &shared).unwrap();
        let mut next = shared;
        field.apply(&mut next).unwrap();
        assert_eq!(
            next.shape,
            BuildingShape::GothicArch {
                length_ft: 20.0,
                width_ft: 10.0,
                spring_wall_ft: 2.0
            }
        );
    }

    #[test]
    fn dimension_must_fit_shape() {
        let mut shared = SharedInputs::default();
        assert!(SharedField::SpringWall(3.0).apply(&mut shared).is_err());
        SharedField::RoofPitch(0.0).apply(&mut shared).unwrap();
        assert!(SharedField::Length(-4.0).apply(&mut shared).is_err());
    }
}
