//! Building shape → envelope surface areas, ft².

use crate::error::CalcResult;
use hl_core::ensure_non_negative;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum BuildingShape {
    /// Box with an optional gable roof. `roof_pitch` is rise per 12 in of run;
    /// zero means a flat roof.
    Rectangle {
        length_ft: f64,
        width_ft: f64,
        height_ft: f64,
        #[serde(default)]
        roof_pitch: f64,
    },
    /// Triangular section: the roof runs to the floor.
    AFrame {
        length_ft: f64,
        width_ft: f64,
        height_ft: f64,
    },
    /// Semicircular arch on short spring walls.
    GothicArch {
        length_ft: f64,
        width_ft: f64,
        spring_wall_ft: f64,
    },
}

impl Default for BuildingShape {
    fn default() -> Self {
        BuildingShape::Rectangle {
            length_ft: 20.0,
            width_ft: 10.0,
            height_ft: 8.0,
            roof_pitch: 4.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SurfaceAreas {
    pub wall: f64,
    pub roof: f64,
    pub floor: f64,
}

impl SurfaceAreas {
    /// Above-grade envelope (walls and roof).
    pub fn above_grade(&self) -> f64 {
        self.wall + self.roof
    }
}

impl BuildingShape {
    pub fn id(&self) -> &'static str {
        match self {
            BuildingShape::Rectangle { .. } => "rectangle",
            BuildingShape::AFrame { .. } => "a_frame",
            BuildingShape::GothicArch { .. } => "gothic_arch",
        }
    }

    pub fn length_ft(&self) -> f64 {
        match *self {
            BuildingShape::Rectangle { length_ft, .. }
            | BuildingShape::AFrame { length_ft, .. }
            | BuildingShape::GothicArch { length_ft, .. } => length_ft,
        }
    }

    pub fn width_ft(&self) -> f64 {
        match *self {
            BuildingShape::Rectangle { width_ft, .. }
            | BuildingShape::AFrame { width_ft, .. }
            | BuildingShape::GothicArch { width_ft, .. } => width_ft,
        }
    }

    pub fn validate(&self) -> CalcResult<()> {
        ensure_non_negative(self.length_ft(), "length")?;
        ensure_non_negative(self.width_ft(), "width")?;
        match *self {
            BuildingShape::Rectangle {
                height_ft,
                roof_pitch,
                ..
            } => {
                ensure_non_negative(height_ft, "height")?;
                ensure_non_negative(roof_pitch, "roof pitch")?;
            }
            BuildingShape::AFrame { height_ft, .. } => {
                ensure_non_negative(height_ft, "height")?;
            }
            BuildingShape::GothicArch { spring_wall_ft, .. } => {
                ensure_non_negative(spring_wall_ft, "spring wall height")?;
            }
        }
        Ok(())
    }

    pub fn surface_areas(&self) -> CalcResult<SurfaceAreas> {
        self.validate()?;
        let l = self.length_ft();
        let w = self.width_ft();
        let half = w / 2.0;

        let areas = match *self {
            BuildingShape::Rectangle {
                height_ft: h,
                roof_pitch,
                ..
            } => {
                let mut wall = 2.0 * l * h + 2.0 * w * h;
                let roof = if roof_pitch == 0.0 {
                    l * w
                } else {
                    let rise = half * roof_pitch / 12.0;
                    let slope = half.hypot(rise);
                    // Gable ends are wall.
                    wall += w * rise;
                    2.0 * l * slope
                };
                SurfaceAreas {
                    wall,
                    roof,
                    floor: l * w,
                }
            }
            BuildingShape::AFrame { height_ft: h, .. } => SurfaceAreas {
                // Two triangular ends.
                wall: w * h,
                roof: 2.0 * l * half.hypot(h),
                floor: l * w,
            },
            BuildingShape::GothicArch { spring_wall_ft, .. } => SurfaceAreas {
                wall: 2.0 * l * spring_wall_ft + PI * half * half,
                roof: l * PI * half,
                floor: l * w,
            },
        };
        Ok(areas)
    }
}
