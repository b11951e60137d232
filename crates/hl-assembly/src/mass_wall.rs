//! Solid walls: a structural material of given thickness plus continuous insulation.

use crate::error::{AssemblyError, AssemblyResult};
use crate::layered::check_amount;
use hl_catalog::{MaterialCategory, MaterialLibrary};
use hl_core::ensure_non_negative;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MassWall {
    /// Canonical id of a structural material.
    pub material: String,
    /// Wall thickness, in.
    pub thickness_in: f64,
    pub continuous_r: f64,
}

impl Default for MassWall {
    fn default() -> Self {
        Self {
            material: "Aircrete".to_string(),
            thickness_in: 8.0,
            continuous_r: 0.0,
        }
    }
}

impl MassWall {
    pub fn effective_r(&self, library: &MaterialLibrary) -> AssemblyResult<f64> {
        compute_mass_wall_r(self, library)
    }
}

pub fn compute_mass_wall_r(wall: &MassWall, library: &MaterialLibrary) -> AssemblyResult<f64> {
    let material = library.lookup(&wall.material)?;
    if material.category != MaterialCategory::Structural {
        return Err(AssemblyError::invalid(
            "mass material",
            format!("{} is not a structural material", material.id),
        ));
    }
    let thickness = check_amount(material.id, wall.thickness_in)?;
    let continuous_r = ensure_non_negative(wall.continuous_r, "continuous R")?;
    Ok(material.r_for_amount(thickness) + continuous_r)
}
