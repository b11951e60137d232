//! Persisted record schema (latest version).

use crate::migrate::LATEST_VERSION;
use crate::{PersistError, PersistResult};
use hl_assembly::WallAssembly;
use hl_catalog::LoadCategory;
use hl_gains::LoadSource;
use hl_scenario::ScenarioSnapshot;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomSourceRecord {
    pub name: String,
    pub watts: f64,
    pub duty_hours: f64,
    pub quantity: u32,
}

impl From<&LoadSource> for CustomSourceRecord {
    fn from(source: &LoadSource) -> Self {
        Self {
            name: source.name().to_string(),
            watts: source.watts(),
            duty_hours: source.duty_hours(),
            quantity: source.quantity(),
        }
    }
}

impl CustomSourceRecord {
    pub fn to_source(&self) -> PersistResult<LoadSource> {
        LoadSource::new(
            LoadCategory::Custom,
            self.name.clone(),
            self.watts,
            self.duty_hours,
            self.quantity,
        )
        .map_err(|e| PersistError::InvalidRecord {
            what: format!("custom source {:?}: {e}", self.name),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedState {
    pub version: u32,
    /// RFC 3339 write time.
    #[serde(default)]
    pub saved_at: Option<String>,
    /// Absent in records written before wall selections were stored.
    #[serde(default)]
    pub wall: Option<WallAssembly>,
    #[serde(default)]
    pub custom_sources: Vec<CustomSourceRecord>,
}

impl PersistedState {
    pub fn from_snapshot(snapshot: &ScenarioSnapshot) -> Self {
        Self {
            version: LATEST_VERSION,
            saved_at: Some(chrono::Utc::now().to_rfc3339()),
            wall: Some(snapshot.wall.clone()),
            custom_sources: snapshot
                .custom_sources
                .iter()
                .map(CustomSourceRecord::from)
                .collect(),
        }
    }

    /// Rebuild a snapshot. Missing wall selections fall back to `default_wall`.
    pub fn into_snapshot(self, default_wall: &WallAssembly) -> PersistResult<ScenarioSnapshot> {
        let custom_sources = self
            .custom_sources
            .iter()
            .map(CustomSourceRecord::to_source)
            .collect::<PersistResult<Vec<_>>>()?;
        Ok(ScenarioSnapshot {
            wall: self.wall.unwrap_or_else(|| default_wall.clone()),
            custom_sources,
        })
    }
}
