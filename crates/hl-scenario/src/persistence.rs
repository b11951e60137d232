//! Seam between the coordinator and whatever stores scenarios.

use crate::comparison::Slot;
use crate::scenario::Scenario;
use hl_assembly::WallAssembly;
use hl_gains::LoadSource;

/// Outcome of a write. Store failures never become calculation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveStatus {
    Saved,
    Unavailable(String),
}

impl SaveStatus {
    pub fn is_saved(&self) -> bool {
        matches!(self, SaveStatus::Saved)
    }
}

/// The user-authored part of a scenario that survives a reload.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScenarioSnapshot {
    pub wall: WallAssembly,
    pub custom_sources: Vec<LoadSource>,
}

impl ScenarioSnapshot {
    pub fn of(scenario: &Scenario) -> Self {
        Self {
            wall: scenario.wall.clone(),
            custom_sources: scenario.gains.custom_snapshot(),
        }
    }
}

pub trait ScenarioPersistence {
    fn save(&mut self, slot: Slot, snapshot: &ScenarioSnapshot) -> SaveStatus;

    /// `None` when nothing usable is stored.
    fn load(&mut self, slot: Slot) -> Option<ScenarioSnapshot>;
}
