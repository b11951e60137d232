//! YAML input files read by the command line.

use crate::error::{CliError, CliResult};
use hl_assembly::{ElementAssembly, Layer, LayeredAssembly, RValueInputs, WallAssembly};
use hl_catalog::{InsulationPreset, MaterialLibrary};
use hl_gains::CustomSourceDraft;
use hl_scenario::{AirSealing, Comparison, Opening, Scenario, SharedInputs, Slot};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

pub fn read_yaml<T: DeserializeOwned>(path: &Path) -> CliResult<T> {
    let text = fs::read_to_string(path).map_err(|source| CliError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    serde_yaml::from_str(&text).map_err(|source| CliError::Yaml {
        path: path.to_path_buf(),
        source,
    })
}

/// Shared inputs plus scenario A and an optional scenario B.
///
/// ```yaml
/// shared:
///   shape: { shape: rectangle, length_ft: 30, width_ft: 20, height_ft: 8, roof_pitch: 4 }
///   conditions: { indoor_f: 70, outdoor_f: 10, ground_f: 50 }
/// a:
///   preset: code_min
///   windows: { area_ft2: 40, u_factor: 0.3 }
///   loads: { Adult Male: 2, Laptop: 1 }
/// b:
///   preset: high_perf
///   fields: { stud_material: steel }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectFile {
    pub shared: SharedInputs,
    pub a: ScenarioConfig,
    /// Comparison is enabled when present.
    pub b: Option<ScenarioConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Applied first; every other entry overrides it.
    pub preset: Option<InsulationPreset>,
    pub wall: Option<WallAssembly>,
    pub roof: Option<ElementAssembly>,
    pub floor: Option<ElementAssembly>,
    pub windows: Option<Opening>,
    pub doors: Option<Opening>,
    pub air_sealing: Option<AirSealing>,
    /// Catalog id to quantity.
    pub loads: BTreeMap<String, u32>,
    pub custom_sources: Vec<CustomSourceConfig>,
    /// Raw field edits in the form the interactive front end sends,
    /// e.g. `stud_spacing: "24"` or `load_watts:Laptop: "45"`.
    pub fields: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CustomSourceConfig {
    pub name: Option<String>,
    pub watts: Option<f64>,
    pub duty_hours: Option<f64>,
    pub quantity: Option<u32>,
}

impl From<&CustomSourceConfig> for CustomSourceDraft {
    fn from(config: &CustomSourceConfig) -> Self {
        CustomSourceDraft {
            name: config.name.clone(),
            watts: config.watts,
            duty_hours: config.duty_hours,
            quantity: config.quantity,
        }
    }
}

impl ScenarioConfig {
    /// Build the structured part of the scenario. Raw `fields` are applied
    /// later through the comparison so they get the same validation as
    /// interactive edits.
    pub fn build(&self, library: &MaterialLibrary) -> CliResult<Scenario> {
        let mut scenario = Scenario::default();
        if let Some(preset) = self.preset {
            scenario.apply_preset(preset);
        }
        if let Some(wall) = &self.wall {
            let mut wall = wall.clone();
            wall.stick.cavity_material = library.lookup(&wall.stick.cavity_material)?.id.to_string();
            wall.mass.material = library.lookup(&wall.mass.material)?.id.to_string();
            scenario.wall = wall;
        }
        if let Some(roof) = &self.roof {
            scenario.roof = roof.clone();
        }
        if let Some(floor) = &self.floor {
            scenario.floor = floor.clone();
        }
        if let Some(windows) = self.windows {
            scenario.windows = windows;
        }
        if let Some(doors) = self.doors {
            scenario.doors = doors;
        }
        if let Some(sealing) = self.air_sealing {
            scenario.air_sealing = sealing;
        }
        for (catalog_id, quantity) in &self.loads {
            scenario.gains.set_quantity(catalog_id, *quantity)?;
        }
        for source in &self.custom_sources {
            scenario.gains.add_custom_source(source.into())?;
        }
        Ok(scenario)
    }
}

impl ProjectFile {
    pub fn load(path: &Path) -> CliResult<Self> {
        read_yaml(path)
    }

    pub fn into_comparison(self, library: MaterialLibrary) -> CliResult<Comparison> {
        let a = self.a.build(&library)?;
        let b = match &self.b {
            Some(config) => config.build(&library)?,
            None => Scenario::default(),
        };
        let mut comparison = Comparison::with_scenarios(library, self.shared, a, b)?;
        if self.b.is_some() {
            comparison.enable_comparison()?;
        }
        let configs = [(Slot::A, Some(&self.a)), (Slot::B, self.b.as_ref())];
        for (slot, config) in configs {
            let Some(config) = config else { continue };
            for (key, raw) in &config.fields {
                comparison.on_input_str(slot, key, raw)?;
            }
        }
        Ok(comparison)
    }
}

/// Layers listed outside-in.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StackFile {
    pub layers: Vec<Layer>,
}

impl StackFile {
    pub fn load(path: &Path) -> CliResult<Self> {
        read_yaml(path)
    }

    /// Re-add every layer so ids are canonicalized and amounts checked.
    pub fn into_assembly(self, library: &MaterialLibrary) -> CliResult<LayeredAssembly> {
        let mut assembly = LayeredAssembly::new();
        for layer in self.layers {
            assembly.add_layer(library, &layer.material_id, layer.amount)?;
        }
        Ok(assembly)
    }
}

pub fn load_estimate_inputs(path: &Path) -> CliResult<RValueInputs> {
    read_yaml(path)
}
