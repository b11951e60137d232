//! Stick-frame walls using the parallel-path method.

use crate::error::{AssemblyError, AssemblyResult};
use hl_catalog::{
    MaterialCategory, MaterialLibrary, StudMaterial, StudSize, StudSpacing,
    WOOD_STUD_R_PER_INCH, steel_cavity_correction,
};
use hl_core::ensure_non_negative;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StickFrame {
    pub stud_material: StudMaterial,
    pub stud_size: StudSize,
    pub stud_spacing: StudSpacing,
    /// Canonical id of a cavity-fill material.
    pub cavity_material: String,
    /// Continuous insulation outside the studs, added in series.
    pub continuous_r: f64,
}

impl Default for StickFrame {
    fn default() -> Self {
        Self {
            stud_material: StudMaterial::Wood,
            stud_size: StudSize::TwoByFour,
            stud_spacing: StudSpacing::Oc16,
            cavity_material: "Fiberglass Batt".to_string(),
            continuous_r: 0.0,
        }
    }
}

/// Intermediate values of a stick-frame calculation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StickFrameBreakdown {
    pub framing_fraction: f64,
    pub cavity_fraction: f64,
    pub stud_path_r: f64,
    pub cavity_path_r: f64,
    /// Parallel combination of the two paths.
    pub framed_layer_r: f64,
    pub continuous_r: f64,
    pub total_r: f64,
}

impl StickFrame {
    pub fn breakdown(&self, library: &MaterialLibrary) -> AssemblyResult<StickFrameBreakdown> {
        let material = library.lookup(&self.cavity_material)?;
        if material.category != MaterialCategory::CavityFill {
            return Err(AssemblyError::invalid(
                "cavity material",
                format!("{} is not a cavity-fill material", material.id),
            ));
        }
        let continuous_r = ensure_non_negative(self.continuous_r, "continuous R")?;

        let depth = self.stud_size.depth_in();
        let framing_fraction = self.stud_spacing.framing_fraction();
        let cavity_fraction = 1.0 - framing_fraction;

        let (stud_path_r, cavity_path_r) = match self.stud_material {
            StudMaterial::Wood => (depth * WOOD_STUD_R_PER_INCH, material.r_at_depth(depth)),
            StudMaterial::Steel => {
                // Correction covers the whole framed layer; the steel path carries the same R.
                let derated = material.r_at_depth(depth)
                    * steel_cavity_correction(self.stud_size, self.stud_spacing);
                (derated, derated)
            }
        };

        let framed_layer_r = parallel(framing_fraction, stud_path_r, cavity_fraction, cavity_path_r)?;

        Ok(StickFrameBreakdown {
            framing_fraction,
            cavity_fraction,
            stud_path_r,
            cavity_path_r,
            framed_layer_r,
            continuous_r,
            total_r: framed_layer_r + continuous_r,
        })
    }

    pub fn effective_r(&self, library: &MaterialLibrary) -> AssemblyResult<f64> {
        compute_stick_frame_r(self, library)
    }
}

fn parallel(ff: f64, r_stud: f64, cf: f64, r_cavity: f64) -> AssemblyResult<f64> {
    if r_stud <= 0.0 || r_cavity <= 0.0 {
        return Err(AssemblyError::invalid(
            "cavity material",
            "framed layer has no thermal resistance",
        ));
    }
    Ok(1.0 / (ff / r_stud + cf / r_cavity))
}

/// Effective R of a framed wall plus continuous insulation.
pub fn compute_stick_frame_r(frame: &StickFrame, library: &MaterialLibrary) -> AssemblyResult<f64> {
    frame.breakdown(library).map(|b| b.total_r)
}
