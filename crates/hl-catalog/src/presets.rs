//! Whole-scenario insulation presets.

use crate::error::CatalogError;
use crate::framing::{StudMaterial, StudSize, StudSpacing};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsulationPreset {
    CodeMin,
    HighPerf,
    PassiveHouse,
    Uninsulated,
}

/// Stick-frame wall selection a preset installs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallPreset {
    pub stud_material: StudMaterial,
    pub stud_size: StudSize,
    pub stud_spacing: StudSpacing,
    /// Material library id of the cavity fill.
    pub cavity_material: &'static str,
    pub continuous_r: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PresetValues {
    pub wall: WallPreset,
    pub roof_r: f64,
    pub floor_r: f64,
}

impl InsulationPreset {
    pub const ALL: [InsulationPreset; 4] = [
        InsulationPreset::CodeMin,
        InsulationPreset::HighPerf,
        InsulationPreset::PassiveHouse,
        InsulationPreset::Uninsulated,
    ];

    pub fn id(self) -> &'static str {
        match self {
            InsulationPreset::CodeMin => "code_min",
            InsulationPreset::HighPerf => "high_perf",
            InsulationPreset::PassiveHouse => "passive_house",
            InsulationPreset::Uninsulated => "uninsulated",
        }
    }

    pub fn values(self) -> PresetValues {
        match self {
            InsulationPreset::CodeMin => PresetValues {
                wall: WallPreset {
                    stud_material: StudMaterial::Wood,
                    stud_size: StudSize::TwoByFour,
                    stud_spacing: StudSpacing::Oc16,
                    cavity_material: "Fiberglass Batt",
                    continuous_r: 0.0,
                },
                roof_r: 38.0,
                floor_r: 10.0,
            },
            InsulationPreset::HighPerf => PresetValues {
                wall: WallPreset {
                    stud_material: StudMaterial::Wood,
                    stud_size: StudSize::TwoBySix,
                    stud_spacing: StudSpacing::Oc16,
                    cavity_material: "Mineral Wool Batt",
                    continuous_r: 5.0,
                },
                roof_r: 50.0,
                floor_r: 20.0,
            },
            InsulationPreset::PassiveHouse => PresetValues {
                wall: WallPreset {
                    stud_material: StudMaterial::Wood,
                    stud_size: StudSize::TwoBySix,
                    stud_spacing: StudSpacing::Oc24,
                    cavity_material: "Mineral Wool Batt",
                    continuous_r: 12.0,
                },
                roof_r: 50.0,
                floor_r: 30.0,
            },
            InsulationPreset::Uninsulated => PresetValues {
                wall: WallPreset {
                    stud_material: StudMaterial::Wood,
                    stud_size: StudSize::TwoByFour,
                    stud_spacing: StudSpacing::Oc16,
                    cavity_material: "Air Gap (0.75in)",
                    continuous_r: 0.0,
                },
                roof_r: 4.0,
                floor_r: 1.0,
            },
        }
    }
}

impl FromStr for InsulationPreset {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InsulationPreset::ALL
            .into_iter()
            .find(|p| p.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CatalogError::UnknownOption {
                what: "insulation preset",
                value: s.to_string(),
            })
    }
}
