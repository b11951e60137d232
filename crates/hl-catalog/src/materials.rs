//! Material library: thermal properties keyed by stable identifiers.

use crate::error::{CatalogError, CatalogResult};
use serde::{Deserialize, Serialize};

/// Where a material sits in an envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialCategory {
    /// Fills the space between framing members; bridged by studs.
    CavityFill,
    /// Uninterrupted layer outside the framing.
    Continuous,
    /// Framing, sheathing and mass materials.
    Structural,
}

/// How a layer behaves in a stack beyond plain conduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerBehavior {
    Conductive,
    AirSpace,
    /// Reflective foil; only effective when it faces an air space.
    Radiant,
}

/// R-value basis, ft²·°F·h/BTU.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RBasis {
    PerInch(f64),
    /// Board products with a rated R per piece of the given thickness.
    Fixed { r: f64, piece_in: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub id: &'static str,
    pub display_name: &'static str,
    pub aliases: &'static [&'static str],
    pub category: MaterialCategory,
    pub behavior: LayerBehavior,
    pub r_basis: RBasis,
}

impl Material {
    /// Exact identifier match: canonical id or any alias, ASCII case-insensitive.
    pub fn matches_id(&self, id: &str) -> bool {
        let id = id.trim();
        self.id.eq_ignore_ascii_case(id)
            || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(id))
    }

    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.trim().to_ascii_lowercase();
        if query.is_empty() {
            return true;
        }

        self.id.to_ascii_lowercase().contains(&query)
            || self.display_name.to_ascii_lowercase().contains(&query)
            || self
                .aliases
                .iter()
                .any(|alias| alias.to_ascii_lowercase().contains(&query))
    }

    pub fn is_board(&self) -> bool {
        matches!(self.r_basis, RBasis::Fixed { .. })
    }

    /// Physical thickness of one layer, in.
    pub fn thickness_for_amount(&self, amount: f64) -> f64 {
        match self.r_basis {
            RBasis::PerInch(_) => amount,
            RBasis::Fixed { piece_in, .. } => piece_in * amount,
        }
    }

    /// R of one layer: thickness (in) for per-inch materials, piece count for boards.
    pub fn r_for_amount(&self, amount: f64) -> f64 {
        match self.r_basis {
            RBasis::PerInch(r) => r * amount,
            RBasis::Fixed { r, .. } => r * amount,
        }
    }

    /// R of a cavity of the given depth filled with this material.
    ///
    /// Board products keep their rated value regardless of depth.
    pub fn r_at_depth(&self, depth_in: f64) -> f64 {
        match self.r_basis {
            RBasis::PerInch(r) => r * depth_in,
            RBasis::Fixed { r, .. } => r,
        }
    }
}

const STANDARD_MATERIALS: [Material; 30] = [
    Material {
        id: "Fiberglass Batt",
        display_name: "Fiberglass Batt",
        aliases: &["fiberglass_batt", "fiberglass"],
        category: MaterialCategory::CavityFill,
        behavior: LayerBehavior::Conductive,
        r_basis: RBasis::PerInch(3.8),
    },
    Material {
        id: "Mineral Wool Batt",
        display_name: "Mineral Wool Batt",
        aliases: &["mineral_wool", "rockwool"],
        category: MaterialCategory::CavityFill,
        behavior: LayerBehavior::Conductive,
        r_basis: RBasis::PerInch(4.2),
    },
    Material {
        id: "Blown Cellulose",
        display_name: "Blown Cellulose",
        aliases: &["cellulose"],
        category: MaterialCategory::CavityFill,
        behavior: LayerBehavior::Conductive,
        r_basis: RBasis::PerInch(3.7),
    },
    Material {
        id: "Open-Cell Spray Foam",
        display_name: "Open-Cell Spray Foam",
        aliases: &["open_cell_foam", "ocsf"],
        category: MaterialCategory::CavityFill,
        behavior: LayerBehavior::Conductive,
        r_basis: RBasis::PerInch(3.6),
    },
    Material {
        id: "Closed-Cell Spray Foam",
        display_name: "Closed-Cell Spray Foam",
        aliases: &["closed_cell_foam", "ccsf"],
        category: MaterialCategory::CavityFill,
        behavior: LayerBehavior::Conductive,
        r_basis: RBasis::PerInch(6.5),
    },
    Material {
        id: "Denim Batt",
        display_name: "Recycled Denim Batt",
        aliases: &["denim"],
        category: MaterialCategory::CavityFill,
        behavior: LayerBehavior::Conductive,
        r_basis: RBasis::PerInch(3.5),
    },
    Material {
        id: "Sheep Wool Batt",
        display_name: "Sheep Wool Batt",
        aliases: &["sheep_wool"],
        category: MaterialCategory::CavityFill,
        behavior: LayerBehavior::Conductive,
        r_basis: RBasis::PerInch(3.6),
    },
    Material {
        id: "Air Gap (0.75in)",
        display_name: "Air Gap / Empty Cavity",
        aliases: &["air_gap", "none", "empty"],
        category: MaterialCategory::CavityFill,
        behavior: LayerBehavior::AirSpace,
        r_basis: RBasis::Fixed {
            r: 0.9,
            piece_in: 0.75,
        },
    },
    Material {
        id: "XPS Rigid Foam (0.5in)",
        display_name: "XPS Rigid Foam 1/2\"",
        aliases: &["xps_half"],
        category: MaterialCategory::Continuous,
        behavior: LayerBehavior::Conductive,
        r_basis: RBasis::Fixed {
            r: 2.5,
            piece_in: 0.5,
        },
    },
    Material {
        id: "XPS Rigid Foam (1in)",
        display_name: "XPS Rigid Foam 1\"",
        aliases: &["xps"],
        category: MaterialCategory::Continuous,
        behavior: LayerBehavior::Conductive,
        r_basis: RBasis::Fixed {
            r: 5.0,
            piece_in: 1.0,
        },
    },
    Material {
        id: "EPS Rigid Foam (1in)",
        display_name: "EPS Rigid Foam 1\"",
        aliases: &["eps"],
        category: MaterialCategory::Continuous,
        behavior: LayerBehavior::Conductive,
        r_basis: RBasis::Fixed {
            r: 4.0,
            piece_in: 1.0,
        },
    },
    Material {
        id: "Polyiso Board (1in)",
        display_name: "Polyiso Board 1\"",
        aliases: &["polyiso"],
        category: MaterialCategory::Continuous,
        behavior: LayerBehavior::Conductive,
        r_basis: RBasis::Fixed {
            r: 6.0,
            piece_in: 1.0,
        },
    },
    Material {
        id: "Mineral Wool Board (1in)",
        display_name: "Mineral Wool Board 1\"",
        aliases: &["mineral_wool_board"],
        category: MaterialCategory::Continuous,
        behavior: LayerBehavior::Conductive,
        r_basis: RBasis::Fixed {
            r: 4.2,
            piece_in: 1.0,
        },
    },
    Material {
        id: "Cork Board",
        display_name: "Expanded Cork Board",
        aliases: &["cork"],
        category: MaterialCategory::Continuous,
        behavior: LayerBehavior::Conductive,
        r_basis: RBasis::PerInch(3.6),
    },
    Material {
        id: "Reflectix Bubble Foil",
        display_name: "Bubble Foil Radiant Barrier",
        aliases: &["bubble_foil", "reflectix"],
        category: MaterialCategory::Continuous,
        behavior: LayerBehavior::Radiant,
        r_basis: RBasis::Fixed {
            r: 1.1,
            piece_in: 0.3,
        },
    },
    Material {
        id: "Woven Radiant Barrier",
        display_name: "Woven Radiant Barrier",
        aliases: &["woven_radiant", "radiant_barrier"],
        category: MaterialCategory::Continuous,
        behavior: LayerBehavior::Radiant,
        r_basis: RBasis::Fixed {
            r: 0.0,
            piece_in: 0.02,
        },
    },
    Material {
        id: "Softwood Lumber",
        display_name: "Softwood Lumber",
        aliases: &["wood", "softwood", "lumber"],
        category: MaterialCategory::Structural,
        behavior: LayerBehavior::Conductive,
        r_basis: RBasis::PerInch(1.25),
    },
    Material {
        id: "Plywood",
        display_name: "Plywood Sheathing",
        aliases: &["plywood"],
        category: MaterialCategory::Structural,
        behavior: LayerBehavior::Conductive,
        r_basis: RBasis::PerInch(1.25),
    },
    Material {
        id: "OSB",
        display_name: "Oriented Strand Board",
        aliases: &["osb"],
        category: MaterialCategory::Structural,
        behavior: LayerBehavior::Conductive,
        r_basis: RBasis::PerInch(1.4),
    },
    Material {
        id: "Drywall (0.5in)",
        display_name: "Gypsum Drywall 1/2\"",
        aliases: &["drywall", "gypsum"],
        category: MaterialCategory::Structural,
        behavior: LayerBehavior::Conductive,
        r_basis: RBasis::Fixed {
            r: 0.45,
            piece_in: 0.5,
        },
    },
    Material {
        id: "Aircrete",
        display_name: "Aircrete (Foamed Concrete)",
        aliases: &["aircrete", "foamcrete"],
        category: MaterialCategory::Structural,
        behavior: LayerBehavior::Conductive,
        r_basis: RBasis::PerInch(1.1),
    },
    Material {
        id: "CMU (Hollow)",
        display_name: "Hollow Concrete Block",
        aliases: &["cmu", "cinder_block"],
        category: MaterialCategory::Structural,
        behavior: LayerBehavior::Conductive,
        r_basis: RBasis::PerInch(0.14),
    },
    Material {
        id: "Poured Concrete",
        display_name: "Poured Concrete",
        aliases: &["concrete"],
        category: MaterialCategory::Structural,
        behavior: LayerBehavior::Conductive,
        r_basis: RBasis::PerInch(0.08),
    },
    Material {
        id: "Log (Softwood)",
        display_name: "Solid Softwood Log",
        aliases: &["log"],
        category: MaterialCategory::Structural,
        behavior: LayerBehavior::Conductive,
        r_basis: RBasis::PerInch(1.25),
    },
    Material {
        id: "Cob",
        display_name: "Cob",
        aliases: &["cob"],
        category: MaterialCategory::Structural,
        behavior: LayerBehavior::Conductive,
        r_basis: RBasis::PerInch(0.23),
    },
    Material {
        id: "Straw Bale",
        display_name: "Straw Bale",
        aliases: &["straw_bale", "straw"],
        category: MaterialCategory::Structural,
        behavior: LayerBehavior::Conductive,
        r_basis: RBasis::PerInch(1.45),
    },
    Material {
        id: "Rammed Earth",
        display_name: "Rammed Earth",
        aliases: &["rammed_earth"],
        category: MaterialCategory::Structural,
        behavior: LayerBehavior::Conductive,
        r_basis: RBasis::PerInch(0.25),
    },
    Material {
        id: "Hempcrete",
        display_name: "Hempcrete",
        aliases: &["hempcrete"],
        category: MaterialCategory::Structural,
        behavior: LayerBehavior::Conductive,
        r_basis: RBasis::PerInch(2.0),
    },
    Material {
        id: "Brick",
        display_name: "Common Brick",
        aliases: &["brick"],
        category: MaterialCategory::Structural,
        behavior: LayerBehavior::Conductive,
        r_basis: RBasis::PerInch(0.2),
    },
    Material {
        id: "Stone",
        display_name: "Stone Masonry",
        aliases: &["stone"],
        category: MaterialCategory::Structural,
        behavior: LayerBehavior::Conductive,
        r_basis: RBasis::PerInch(0.08),
    },
];

/// Read-only view over a material table.
#[derive(Debug, Clone, Copy)]
pub struct MaterialLibrary {
    entries: &'static [Material],
}

impl Default for MaterialLibrary {
    fn default() -> Self {
        Self::standard()
    }
}

impl MaterialLibrary {
    /// Library backed by a caller-provided static table (calibration data, tests).
    pub const fn from_table(entries: &'static [Material]) -> Self {
        Self { entries }
    }

    /// The table shipped with the application.
    pub const fn standard() -> Self {
        Self::from_table(&STANDARD_MATERIALS)
    }

    pub fn lookup(&self, id: &str) -> CatalogResult<&'static Material> {
        self.entries
            .iter()
            .find(|m| m.matches_id(id))
            .ok_or_else(|| CatalogError::UnknownMaterial { id: id.to_string() })
    }

    pub fn materials(&self) -> &'static [Material] {
        self.entries
    }

    pub fn filter(&self, query: &str) -> Vec<&'static Material> {
        self.entries
            .iter()
            .filter(|m| m.matches_query(query))
            .collect()
    }

    pub fn in_category(&self, category: MaterialCategory) -> Vec<&'static Material> {
        self.entries
            .iter()
            .filter(|m| m.category == category)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn identifiers_are_unique_case_insensitively() {
        let mut seen = HashSet::new();
        for m in MaterialLibrary::standard().materials() {
            for key in std::iter::once(m.id).chain(m.aliases.iter().copied()) {
                assert!(
                    seen.insert(key.to_ascii_lowercase()),
                    "duplicate identifier: {key}"
                );
            }
        }
    }

    #[test]
    fn lookup_by_canonical_id_and_alias() {
        let lib = MaterialLibrary::standard();
        let xps = lib.lookup("XPS Rigid Foam (0.5in)").unwrap();
        assert_eq!(
            xps.r_basis,
            RBasis::Fixed {
                r: 2.5,
                piece_in: 0.5
            }
        );
        assert_eq!(xps.category, MaterialCategory::Continuous);

        let batt = lib.lookup("fiberglass_batt").unwrap();
        assert_eq!(batt.id, "Fiberglass Batt");
        assert!(lib.lookup("FIBERGLASS BATT").is_ok());
    }

    #[test]
    fn unknown_material_is_an_error() {
        let err = MaterialLibrary::standard().lookup("Unobtainium").unwrap_err();
        assert_eq!(
            err,
            CatalogError::UnknownMaterial {
                id: "Unobtainium".to_string()
            }
        );
    }

    #[test]
    fn per_inch_and_board_r() {
        let lib = MaterialLibrary::standard();
        let batt = lib.lookup("Fiberglass Batt").unwrap();
        assert!((batt.r_for_amount(3.5) - 13.3).abs() < 1e-9);
        assert!((batt.r_at_depth(5.5) - 20.9).abs() < 1e-9);

        let board = lib.lookup("XPS Rigid Foam (1in)").unwrap();
        assert!(board.is_board());
        assert_eq!(board.r_for_amount(2.0), 10.0);
        assert_eq!(board.r_at_depth(5.5), 5.0);
        assert_eq!(board.thickness_for_amount(2.0), 2.0);
    }

    #[test]
    fn every_category_is_populated() {
        let lib = MaterialLibrary::standard();
        for cat in [
            MaterialCategory::CavityFill,
            MaterialCategory::Continuous,
            MaterialCategory::Structural,
        ] {
            assert!(!lib.in_category(cat).is_empty(), "{cat:?} is empty");
        }
    }

    #[test]
    fn search_finds_mass_materials() {
        let results = MaterialLibrary::standard().filter("crete");
        let ids: Vec<&str> = results.iter().map(|m| m.id).collect();
        assert!(ids.contains(&"Aircrete"));
        assert!(ids.contains(&"Hempcrete"));
    }
}
