use hl_assembly::AssemblyKind;
use hl_catalog::{MaterialLibrary, StudMaterial};
use hl_gains::{CustomSourceDraft, SourceField};
use hl_persist::{
    FileStore, KeyValueStore, LoadOutcome, MemoryStore, PersistError, PersistResult,
    PersistenceAdapter, SaveStatus, record_key,
};
use hl_scenario::{Comparison, ScenarioField, SharedInputs, Slot};

fn comparison() -> Comparison {
    Comparison::new(MaterialLibrary::standard(), SharedInputs::default()).unwrap()
}

fn stove() -> CustomSourceDraft {
    CustomSourceDraft {
        name: Some("Wood Stove".into()),
        watts: Some(5000.0),
        duty_hours: Some(4.0),
        quantity: None,
    }
}

/// A store whose every call fails.
struct BrokenStore;

impl KeyValueStore for BrokenStore {
    fn get(&self, _key: &str) -> PersistResult<Option<Vec<u8>>> {
        Err(PersistError::Unavailable {
            reason: "quota exceeded".into(),
        })
    }

    fn set(&mut self, _key: &str, _value: &[u8]) -> PersistResult<()> {
        Err(PersistError::Unavailable {
            reason: "quota exceeded".into(),
        })
    }

    fn clear(&mut self, _key: &str) -> PersistResult<()> {
        Err(PersistError::Unavailable {
            reason: "quota exceeded".into(),
        })
    }
}

#[test]
fn custom_sources_and_wall_survive_a_reload() {
    let mut adapter = PersistenceAdapter::new(MemoryStore::new());

    let mut before = comparison();
    before.add_custom_source(Slot::A, stove()).unwrap();
    let lamp = before
        .add_custom_source(Slot::A, CustomSourceDraft::default())
        .unwrap();
    before
        .edit_custom_source(Slot::A, lamp, SourceField::Name("Lamp".into()))
        .unwrap();
    before.move_custom_source(Slot::A, lamp, 0).unwrap();
    before
        .on_input_changed(Slot::A, ScenarioField::StudMaterial(StudMaterial::Steel))
        .unwrap();
    before
        .set_assembly_type(Slot::A, AssemblyKind::Mass)
        .unwrap();
    assert!(before.is_dirty(Slot::A));

    let statuses = before.persist_dirty(&mut adapter);
    assert_eq!(statuses, vec![(Slot::A, SaveStatus::Saved)]);
    assert!(!before.is_dirty(Slot::A));

    let mut after = comparison();
    let restored = after.restore(&mut adapter);
    assert_eq!(restored, vec![Slot::A]);
    assert_eq!(after.scenario(Slot::A).wall, before.scenario(Slot::A).wall);
    assert_eq!(
        after.scenario(Slot::A).gains.custom_snapshot(),
        before.scenario(Slot::A).gains.custom_snapshot()
    );
    let names: Vec<_> = after
        .scenario(Slot::A)
        .gains
        .custom_sources()
        .map(|(_, s)| s.name().to_string())
        .collect();
    assert_eq!(names, ["Lamp", "Wood Stove"]);
    assert_eq!(after.result(Slot::A), before.result(Slot::A));
}

#[test]
fn corrupt_record_loads_empty() {
    let mut store = MemoryStore::new();
    store.set(record_key(Slot::B), b"{not json").unwrap();
    let adapter = PersistenceAdapter::new(store);
    assert_eq!(adapter.load(Slot::B), LoadOutcome::Empty);
    assert_eq!(adapter.load(Slot::A), LoadOutcome::Empty);
}

#[test]
fn v1_record_is_migrated_on_load() {
    let mut store = MemoryStore::new();
    store
        .set(
            record_key(Slot::A),
            br#"{"version":1,"custom_sources":[{"name":"Heater","watts":1500,"duty":3,"qty":2}]}"#,
        )
        .unwrap();
    let mut adapter = PersistenceAdapter::new(store);

    let mut c = comparison();
    assert_eq!(c.restore(&mut adapter), vec![Slot::A]);
    let sources = c.scenario(Slot::A).gains.custom_snapshot();
    assert_eq!(sources.len(), 1);
    assert_eq!(sources[0].quantity(), 2);
    assert_eq!(sources[0].duty_hours(), 3.0);
}

#[test]
fn failing_store_never_breaks_calculation() {
    let mut adapter = PersistenceAdapter::new(BrokenStore);
    let mut c = comparison();
    c.add_custom_source(Slot::A, stove()).unwrap();

    let statuses = c.persist_dirty(&mut adapter);
    assert!(matches!(statuses[0], (Slot::A, SaveStatus::Unavailable(_))));
    assert!(c.is_dirty(Slot::A));
    assert!(c.result(Slot::A).is_some());

    assert_eq!(adapter.load(Slot::A), LoadOutcome::Empty);
    assert!(c.restore(&mut adapter).is_empty());
    assert!(adapter.clear(Slot::A).is_err());
}

#[test]
fn file_store_round_trip_and_clear() {
    let dir = std::env::temp_dir().join("hl_persist_round_trip");
    let _ = std::fs::remove_dir_all(&dir);
    let mut adapter = PersistenceAdapter::new(FileStore::new(dir.clone()).unwrap());

    let mut c = comparison();
    c.add_custom_source(Slot::B, stove()).unwrap();
    let statuses = c.persist_dirty(&mut adapter);
    assert_eq!(statuses, vec![(Slot::B, SaveStatus::Saved)]);
    assert!(dir.join("heatload.scenario.b.json").exists());

    match adapter.load(Slot::B) {
        LoadOutcome::Loaded(state) => {
            assert_eq!(state.custom_sources.len(), 1);
            assert!(state.saved_at.is_some());
        }
        LoadOutcome::Empty => panic!("expected a stored record"),
    }

    adapter.clear(Slot::B).unwrap();
    assert_eq!(adapter.load(Slot::B), LoadOutcome::Empty);
}
