//! Scenario-level save/load over a [`KeyValueStore`].

use crate::migrate::migrate_to_latest;
use crate::record::PersistedState;
use crate::store::KeyValueStore;
use crate::{PersistError, PersistResult};
use hl_assembly::WallAssembly;
use hl_scenario::{SaveStatus, ScenarioPersistence, ScenarioSnapshot, Slot};
use tracing::{debug, warn};

pub fn record_key(slot: Slot) -> &'static str {
    match slot {
        Slot::A => "heatload.scenario.a",
        Slot::B => "heatload.scenario.b",
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Loaded(PersistedState),
    /// Nothing stored, or nothing usable.
    Empty,
}

#[derive(Debug, Clone)]
pub struct PersistenceAdapter<S> {
    store: S,
}

impl<S: KeyValueStore> PersistenceAdapter<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    fn try_save(&mut self, slot: Slot, snapshot: &ScenarioSnapshot) -> PersistResult<()> {
        let state = PersistedState::from_snapshot(snapshot);
        let bytes = serde_json::to_vec_pretty(&state)?;
        self.store.set(record_key(slot), &bytes)
    }

    /// Overwrite the slot's record.
    pub fn save(&mut self, slot: Slot, snapshot: &ScenarioSnapshot) -> SaveStatus {
        match self.try_save(slot, snapshot) {
            Ok(()) => {
                debug!(%slot, sources = snapshot.custom_sources.len(), "scenario saved");
                SaveStatus::Saved
            }
            Err(err) => {
                warn!(%slot, error = %err, "scenario not saved; storage unavailable");
                SaveStatus::Unavailable(err.to_string())
            }
        }
    }

    fn try_load(&self, slot: Slot) -> PersistResult<Option<PersistedState>> {
        let Some(bytes) = self.store.get(record_key(slot))? else {
            return Ok(None);
        };
        let raw: serde_json::Value = serde_json::from_slice(&bytes)?;
        let state: PersistedState = serde_json::from_value(migrate_to_latest(raw)?)?;
        Ok(Some(state))
    }

    /// Read the slot's record. Anything unreadable is reported as `Empty`.
    pub fn load(&self, slot: Slot) -> LoadOutcome {
        match self.try_load(slot) {
            Ok(Some(state)) => LoadOutcome::Loaded(state),
            Ok(None) => LoadOutcome::Empty,
            Err(err) => {
                warn!(%slot, error = %err, "stored scenario unreadable; starting empty");
                LoadOutcome::Empty
            }
        }
    }

    /// Explicit user reset.
    pub fn clear(&mut self, slot: Slot) -> PersistResult<()> {
        self.store.clear(record_key(slot)).map_err(|err| {
            warn!(%slot, error = %err, "could not clear stored scenario");
            PersistError::Unavailable {
                reason: err.to_string(),
            }
        })
    }
}

impl<S: KeyValueStore> ScenarioPersistence for PersistenceAdapter<S> {
    fn save(&mut self, slot: Slot, snapshot: &ScenarioSnapshot) -> SaveStatus {
        PersistenceAdapter::save(self, slot, snapshot)
    }

    fn load(&mut self, slot: Slot) -> Option<ScenarioSnapshot> {
        let LoadOutcome::Loaded(state) = PersistenceAdapter::load(self, slot) else {
            return None;
        };
        state
            .into_snapshot(&WallAssembly::default())
            .inspect_err(|err| warn!(%slot, error = %err, "stored scenario rejected"))
            .ok()
    }
}
