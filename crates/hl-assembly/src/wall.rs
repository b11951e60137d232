//! Wall assembly: a stick-frame and a mass-wall input set, one of them active.

use crate::error::{AssemblyError, AssemblyResult};
use crate::mass_wall::MassWall;
use crate::stick_frame::StickFrame;
use hl_catalog::MaterialLibrary;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssemblyKind {
    #[default]
    Stick,
    Mass,
}

impl AssemblyKind {
    pub fn id(self) -> &'static str {
        match self {
            AssemblyKind::Stick => "stick",
            AssemblyKind::Mass => "mass",
        }
    }
}

impl FromStr for AssemblyKind {
    type Err = AssemblyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stick" | "stick_frame" => Ok(AssemblyKind::Stick),
            "mass" | "mass_wall" => Ok(AssemblyKind::Mass),
            other => Err(AssemblyError::invalid(
                "assembly type",
                format!("expected stick or mass, got {other:?}"),
            )),
        }
    }
}

impl fmt::Display for AssemblyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Both input sets are kept so switching back restores what the user entered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WallAssembly {
    pub kind: AssemblyKind,
    pub stick: StickFrame,
    pub mass: MassWall,
}

impl WallAssembly {
    pub fn effective_r(&self, library: &MaterialLibrary) -> AssemblyResult<f64> {
        match self.kind {
            AssemblyKind::Stick => self.stick.effective_r(library),
            AssemblyKind::Mass => self.mass.effective_r(library),
        }
    }
}
