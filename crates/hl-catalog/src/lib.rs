//! hl-catalog: static thermal data shipped with heatload.
//!
//! Provides:
//! - Material library (per-inch and fixed-R board products)
//! - Load catalog (occupants and fixed appliances with default draw and duty cycle)
//! - Framing tables (stud sizes, spacing, steel-stud cavity correction)
//! - Insulation presets
//!
//! Everything here is immutable. Identifiers are the contract surface for the
//! display layer and for persisted state, so they never change between versions.

pub mod error;
pub mod framing;
pub mod loads;
pub mod materials;
pub mod presets;

pub use error::{CatalogError, CatalogResult};
pub use framing::{
    STUD_WIDTH_IN, StudMaterial, StudSize, StudSpacing, WOOD_STUD_R_PER_INCH,
    steel_cavity_correction,
};
pub use loads::{
    LoadCatalogEntry, LoadCategory, filter_load_catalog, load_catalog, lookup_load,
};
pub use materials::{LayerBehavior, Material, MaterialCategory, MaterialLibrary, RBasis};
pub use presets::{InsulationPreset, PresetValues, WallPreset};
