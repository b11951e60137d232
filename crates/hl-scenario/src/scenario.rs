//! One buildable scenario: envelope construction, openings, sealing and gains.

use crate::error::{CalcResult, ScenarioError};
use hl_assembly::{ElementAssembly, WallAssembly};
use hl_catalog::{InsulationPreset, MaterialLibrary};
use hl_core::ensure_non_negative;
use hl_gains::InternalGains;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AirSealing {
    #[default]
    Good,
    /// Adds a quarter of the conductive loss as infiltration.
    Poor,
}

impl AirSealing {
    pub const POOR_PENALTY: f64 = 0.25;

    pub fn penalty(self) -> f64 {
        match self {
            AirSealing::Good => 0.0,
            AirSealing::Poor => Self::POOR_PENALTY,
        }
    }
}

impl FromStr for AirSealing {
    type Err = ScenarioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "good" => Ok(AirSealing::Good),
            "poor" => Ok(AirSealing::Poor),
            other => Err(ScenarioError::invalid(
                "air sealing",
                format!("expected good or poor, got {other:?}"),
            )),
        }
    }
}

impl fmt::Display for AirSealing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AirSealing::Good => "good",
            AirSealing::Poor => "poor",
        })
    }
}

/// Windows or doors taken as one area with one U-factor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Opening {
    pub area_ft2: f64,
    pub u_factor: f64,
}

impl Opening {
    pub const DEFAULT_U: f64 = 0.30;

    pub fn validate(&self, what: &'static str) -> CalcResult<()> {
        ensure_non_negative(self.area_ft2, what)?;
        ensure_non_negative(self.u_factor, what)?;
        Ok(())
    }

    pub fn conductance(&self) -> f64 {
        self.area_ft2 * self.u_factor
    }
}

impl Default for Opening {
    fn default() -> Self {
        Self {
            area_ft2: 0.0,
            u_factor: Self::DEFAULT_U,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub wall: WallAssembly,
    pub roof: ElementAssembly,
    pub floor: ElementAssembly,
    pub windows: Opening,
    pub doors: Opening,
    pub air_sealing: AirSealing,
    pub gains: InternalGains,
}

impl Default for Scenario {
    fn default() -> Self {
        let mut scenario = Self {
            wall: WallAssembly::default(),
            roof: ElementAssembly::nominal(0.0),
            floor: ElementAssembly::nominal(0.0),
            windows: Opening::default(),
            doors: Opening::default(),
            air_sealing: AirSealing::Good,
            gains: InternalGains::new(),
        };
        scenario.apply_preset(InsulationPreset::CodeMin);
        scenario
    }
}

impl Scenario {
    /// Install a preset's wall selection and roof/floor ratings. Gains,
    /// openings and the mass-wall inputs are untouched.
    pub fn apply_preset(&mut self, preset: InsulationPreset) {
        let values = preset.values();
        self.wall.kind = hl_assembly::AssemblyKind::Stick;
        self.wall.stick.stud_material = values.wall.stud_material;
        self.wall.stick.stud_size = values.wall.stud_size;
        self.wall.stick.stud_spacing = values.wall.stud_spacing;
        self.wall.stick.cavity_material = values.wall.cavity_material.to_string();
        self.wall.stick.continuous_r = values.wall.continuous_r;
        self.roof = ElementAssembly::nominal(values.roof_r);
        self.floor = ElementAssembly::nominal(values.floor_r);
    }

    /// Effective R of wall, roof and floor.
    pub fn element_r_values(&self, library: &MaterialLibrary) -> CalcResult<(f64, f64, f64)> {
        let wall = self.wall.effective_r(library)?;
        if wall <= 0.0 {
            return Err(ScenarioError::invalid("wall", "effective R must be positive"));
        }
        let roof = self.roof.effective_r(library)?;
        let floor = self.floor.effective_r(library)?;
        self.windows.validate("window")?;
        self.doors.validate("door")?;
        Ok((wall, roof, floor))
    }
}
