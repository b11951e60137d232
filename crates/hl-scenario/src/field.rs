//! Per-scenario input fields and their string form.
//!
//! Keys are what the display layer sends. Catalog rows are addressed as
//! `load_quantity:<catalog id>`, `load_watts:<catalog id>` and
//! `load_duty:<catalog id>`.

use crate::error::{CalcResult, ScenarioError};
use crate::scenario::{AirSealing, Scenario};
use hl_assembly::{AssemblyKind, ElementAssembly};
use hl_catalog::{MaterialCategory, MaterialLibrary, StudMaterial, StudSize, StudSpacing};
use hl_core::{ensure_non_negative, ensure_positive};
use hl_gains::SourceField;

#[derive(Debug, Clone, PartialEq)]
pub enum ScenarioField {
    WallKind(AssemblyKind),
    StudMaterial(StudMaterial),
    StudSize(StudSize),
    StudSpacing(StudSpacing),
    CavityMaterial(String),
    StickContinuousR(f64),
    MassMaterial(String),
    MassThickness(f64),
    MassContinuousR(f64),
    RoofR(f64),
    FloorR(f64),
    Roof(ElementAssembly),
    Floor(ElementAssembly),
    WindowArea(f64),
    WindowU(f64),
    DoorArea(f64),
    DoorU(f64),
    AirSealing(AirSealing),
    LoadQuantity { catalog_id: String, quantity: u32 },
    CatalogOverride { catalog_id: String, field: SourceField },
}

fn parse_f64(key: &str, raw: &str) -> CalcResult<f64> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| ScenarioError::invalid(key, format!("not a number: {raw:?}")))
}

fn parse_u32(key: &str, raw: &str) -> CalcResult<u32> {
    raw.trim()
        .parse::<u32>()
        .map_err(|_| ScenarioError::invalid(key, format!("not a whole number: {raw:?}")))
}

impl ScenarioField {
    /// Coalescing key: two edits with the same key overwrite each other.
    pub fn key(&self) -> String {
        match self {
            ScenarioField::WallKind(_) => "wall_type".into(),
            ScenarioField::StudMaterial(_) => "stud_material".into(),
            ScenarioField::StudSize(_) => "stud_size".into(),
            ScenarioField::StudSpacing(_) => "stud_spacing".into(),
            ScenarioField::CavityMaterial(_) => "cavity_material".into(),
            ScenarioField::StickContinuousR(_) => "stick_continuous_r".into(),
            ScenarioField::MassMaterial(_) => "mass_material".into(),
            ScenarioField::MassThickness(_) => "mass_thickness".into(),
            ScenarioField::MassContinuousR(_) => "mass_continuous_r".into(),
            ScenarioField::RoofR(_) | ScenarioField::Roof(_) => "roof".into(),
            ScenarioField::FloorR(_) | ScenarioField::Floor(_) => "floor".into(),
            ScenarioField::WindowArea(_) => "window_area".into(),
            ScenarioField::WindowU(_) => "window_u".into(),
            ScenarioField::DoorArea(_) => "door_area".into(),
            ScenarioField::DoorU(_) => "door_u".into(),
            ScenarioField::AirSealing(_) => "air_sealing".into(),
            ScenarioField::LoadQuantity { catalog_id, .. } => format!("load_quantity:{catalog_id}"),
            ScenarioField::CatalogOverride { catalog_id, field } => {
                format!("load_{}:{catalog_id}", field.key())
            }
        }
    }

    pub fn parse(key: &str, raw: &str) -> CalcResult<Self> {
        if let Some((prefix, catalog_id)) = key.split_once(':') {
            let catalog_id = catalog_id.to_string();
            return match prefix {
                "load_quantity" => Ok(ScenarioField::LoadQuantity {
                    catalog_id,
                    quantity: parse_u32(key, raw)?,
                }),
                "load_watts" => Ok(ScenarioField::CatalogOverride {
                    catalog_id,
                    field: SourceField::Watts(parse_f64(key, raw)?),
                }),
                "load_duty" | "load_duty_hours" => Ok(ScenarioField::CatalogOverride {
                    catalog_id,
                    field: SourceField::DutyHours(parse_f64(key, raw)?),
                }),
                _ => Err(ScenarioError::UnknownField { key: key.into() }),
            };
        }

        let field = match key {
            "wall_type" => ScenarioField::WallKind(raw.parse()?),
            "stud_material" => ScenarioField::StudMaterial(raw.parse()?),
            "stud_size" => ScenarioField::StudSize(raw.parse()?),
            "stud_spacing" => ScenarioField::StudSpacing(raw.parse()?),
            "cavity_material" => ScenarioField::CavityMaterial(raw.trim().to_string()),
            "stick_continuous_r" => ScenarioField::StickContinuousR(parse_f64(key, raw)?),
            "mass_material" => ScenarioField::MassMaterial(raw.trim().to_string()),
            "mass_thickness" => ScenarioField::MassThickness(parse_f64(key, raw)?),
            "mass_continuous_r" => ScenarioField::MassContinuousR(parse_f64(key, raw)?),
            "roof_r" | "roof" => ScenarioField::RoofR(parse_f64(key, raw)?),
            "floor_r" | "floor" => ScenarioField::FloorR(parse_f64(key, raw)?),
            "window_area" => ScenarioField::WindowArea(parse_f64(key, raw)?),
            "window_u" => ScenarioField::WindowU(parse_f64(key, raw)?),
            "door_area" => ScenarioField::DoorArea(parse_f64(key, raw)?),
            "door_u" => ScenarioField::DoorU(parse_f64(key, raw)?),
            "air_sealing" => ScenarioField::AirSealing(raw.parse()?),
            _ => return Err(ScenarioError::UnknownField { key: key.into() }),
        };
        Ok(field)
    }

    /// Validate and write the value. On error `scenario` may be partially
    /// written, so callers apply to a scratch copy.
    pub fn apply(self, scenario: &mut Scenario, library: &MaterialLibrary) -> CalcResult<()> {
        match self {
            ScenarioField::WallKind(kind) => scenario.wall.kind = kind,
            ScenarioField::StudMaterial(m) => scenario.wall.stick.stud_material = m,
            ScenarioField::StudSize(s) => scenario.wall.stick.stud_size = s,
            ScenarioField::StudSpacing(s) => scenario.wall.stick.stud_spacing = s,
            ScenarioField::CavityMaterial(id) => {
                let material = library.lookup(&id)?;
                if material.category != MaterialCategory::CavityFill {
                    return Err(ScenarioError::invalid(
                        "cavity_material",
                        format!("{} is not a cavity-fill material", material.id),
                    ));
                }
                scenario.wall.stick.cavity_material = material.id.to_string();
            }
            ScenarioField::StickContinuousR(r) => {
                scenario.wall.stick.continuous_r = ensure_non_negative(r, "continuous R")?;
            }
            ScenarioField::MassMaterial(id) => {
                let material = library.lookup(&id)?;
                if material.category != MaterialCategory::Structural {
                    return Err(ScenarioError::invalid(
                        "mass_material",
                        format!("{} is not a structural material", material.id),
                    ));
                }
                scenario.wall.mass.material = material.id.to_string();
            }
            ScenarioField::MassThickness(t) => {
                scenario.wall.mass.thickness_in = ensure_positive(t, "mass wall thickness")?;
            }
            ScenarioField::MassContinuousR(r) => {
                scenario.wall.mass.continuous_r = ensure_non_negative(r, "continuous R")?;
            }
            ScenarioField::RoofR(r) => {
                scenario.roof = ElementAssembly::nominal(ensure_positive(r, "roof R")?);
            }
            ScenarioField::FloorR(r) => {
                scenario.floor = ElementAssembly::nominal(ensure_positive(r, "floor R")?);
            }
            ScenarioField::Roof(element) => {
                element.effective_r(library)?;
                scenario.roof = element;
            }
            ScenarioField::Floor(element) => {
                element.effective_r(library)?;
                scenario.floor = element;
            }
            ScenarioField::WindowArea(a) => {
                scenario.windows.area_ft2 = ensure_non_negative(a, "window area")?;
            }
            ScenarioField::WindowU(u) => {
                scenario.windows.u_factor = ensure_non_negative(u, "window U-factor")?;
            }
            ScenarioField::DoorArea(a) => {
                scenario.doors.area_ft2 = ensure_non_negative(a, "door area")?;
            }
            ScenarioField::DoorU(u) => {
                scenario.doors.u_factor = ensure_non_negative(u, "door U-factor")?;
            }
            ScenarioField::AirSealing(s) => scenario.air_sealing = s,
            ScenarioField::LoadQuantity {
                catalog_id,
                quantity,
            } => scenario.gains.set_quantity(&catalog_id, quantity)?,
            ScenarioField::CatalogOverride { catalog_id, field } => {
                scenario.gains.edit_catalog_row(&catalog_id, field)?
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_keys() {
        assert_eq!(
            ScenarioField::parse("stud_size", "2x6").unwrap(),
            ScenarioField::StudSize(StudSize::TwoBySix)
        );
        assert_eq!(
            ScenarioField::parse("window_area", " 50 ").unwrap(),
            ScenarioField::WindowArea(50.0)
        );
        assert_eq!(
            ScenarioField::parse("load_quantity:Adult Male", "2").unwrap(),
            ScenarioField::LoadQuantity {
                catalog_id: "Adult Male".into(),
                quantity: 2
            }
        );
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(matches!(
            ScenarioField::parse("window_area", "lots"),
            Err(ScenarioError::InvalidInput { .. })
        ));
        assert!(matches!(
            ScenarioField::parse("chimney", "1"),
            Err(ScenarioError::UnknownField { .. })
        ));
        assert!(ScenarioField::parse("load_quantity:Cat", "-1").is_err());
    }

    #[test]
    fn keys_coalesce_nominal_and_layered_roof() {
        let layered = ScenarioField::Roof(ElementAssembly::Layered {
            layers: Default::default(),
        });
        assert_eq!(ScenarioField::RoofR(30.0).key(), layered.key());
        assert_ne!(
            ScenarioField::parse("load_watts:Laptop", "50").unwrap().key(),
            ScenarioField::parse("load_duty:Laptop", "5").unwrap().key()
        );
    }

    #[test]
    fn apply_canonicalizes_materials_and_checks_category() {
        let lib = MaterialLibrary::standard();
        let mut s = Scenario::default();
        ScenarioField::CavityMaterial("rockwool".into())
            .apply(&mut s, &lib)
            .unwrap();
        assert_eq!(s.wall.stick.cavity_material, "Mineral Wool Batt");
        assert!(
            ScenarioField::CavityMaterial("Brick".into())
                .apply(&mut s, &lib)
                .is_err()
        );
        assert!(
            ScenarioField::MassMaterial("Denim Batt".into())
                .apply(&mut s, &lib)
                .is_err()
        );
        assert!(ScenarioField::RoofR(0.0).apply(&mut s, &lib).is_err());
        assert!(ScenarioField::WindowArea(-5.0).apply(&mut s, &lib).is_err());
    }
}
