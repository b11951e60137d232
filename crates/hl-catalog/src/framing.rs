//! Stick-frame geometry and the steel-stud cavity correction table.

use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Actual width of a nominal 2x stud, in.
pub const STUD_WIDTH_IN: f64 = 1.5;

/// Softwood framing, ft²·°F·h/BTU per inch.
pub const WOOD_STUD_R_PER_INCH: f64 = 1.25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StudMaterial {
    #[default]
    Wood,
    Steel,
}

impl StudMaterial {
    pub fn id(self) -> &'static str {
        match self {
            StudMaterial::Wood => "wood",
            StudMaterial::Steel => "steel",
        }
    }
}

impl FromStr for StudMaterial {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wood" => Ok(StudMaterial::Wood),
            "steel" => Ok(StudMaterial::Steel),
            other => Err(CatalogError::UnknownOption {
                what: "stud material",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for StudMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StudSize {
    #[serde(rename = "2x4")]
    #[default]
    TwoByFour,
    #[serde(rename = "2x6")]
    TwoBySix,
    #[serde(rename = "2x8")]
    TwoByEight,
}

impl StudSize {
    pub const ALL: [StudSize; 3] = [StudSize::TwoByFour, StudSize::TwoBySix, StudSize::TwoByEight];

    /// Actual depth, which is also the cavity depth.
    pub fn depth_in(self) -> f64 {
        match self {
            StudSize::TwoByFour => 3.5,
            StudSize::TwoBySix => 5.5,
            StudSize::TwoByEight => 7.25,
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            StudSize::TwoByFour => "2x4",
            StudSize::TwoBySix => "2x6",
            StudSize::TwoByEight => "2x8",
        }
    }
}

impl FromStr for StudSize {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StudSize::ALL
            .into_iter()
            .find(|size| size.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CatalogError::UnknownOption {
                what: "stud size",
                value: s.to_string(),
            })
    }
}

impl fmt::Display for StudSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StudSpacing {
    #[serde(rename = "16")]
    #[default]
    Oc16,
    #[serde(rename = "24")]
    Oc24,
}

impl StudSpacing {
    pub const ALL: [StudSpacing; 2] = [StudSpacing::Oc16, StudSpacing::Oc24];

    pub fn on_center_in(self) -> f64 {
        match self {
            StudSpacing::Oc16 => 16.0,
            StudSpacing::Oc24 => 24.0,
        }
    }

    /// Share of wall area taken by studs: stud width over spacing.
    pub fn framing_fraction(self) -> f64 {
        STUD_WIDTH_IN / self.on_center_in()
    }

    pub fn id(self) -> &'static str {
        match self {
            StudSpacing::Oc16 => "16",
            StudSpacing::Oc24 => "24",
        }
    }
}

impl FromStr for StudSpacing {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_end_matches("oc").trim();
        StudSpacing::ALL
            .into_iter()
            .find(|spacing| spacing.id() == trimmed)
            .ok_or_else(|| CatalogError::UnknownOption {
                what: "stud spacing",
                value: s.to_string(),
            })
    }
}

impl fmt::Display for StudSpacing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} in o.c.", self.id())
    }
}

/// Fraction of nominal cavity R that survives in a steel-framed wall.
///
/// Empirical values in the style of ASHRAE 90.1 Table A9.2B (effective R of
/// the framed layer divided by the rated cavity R). Deeper studs bridge more;
/// wider spacing bridges less.
pub fn steel_cavity_correction(size: StudSize, spacing: StudSpacing) -> f64 {
    match (size, spacing) {
        (StudSize::TwoByFour, StudSpacing::Oc16) => 0.50,
        (StudSize::TwoByFour, StudSpacing::Oc24) => 0.60,
        (StudSize::TwoBySix, StudSpacing::Oc16) => 0.37,
        (StudSize::TwoBySix, StudSpacing::Oc24) => 0.45,
        (StudSize::TwoByEight, StudSpacing::Oc16) => 0.31,
        (StudSize::TwoByEight, StudSpacing::Oc24) => 0.38,
    }
}
