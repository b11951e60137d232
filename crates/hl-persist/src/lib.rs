//! hl-persist: scenario records in a key-value store.
//!
//! One versioned JSON record per scenario, under `heatload.scenario.a` and
//! `heatload.scenario.b`. Store failures degrade to "not saved" and are
//! logged; they never reach the calculation.

pub mod adapter;
pub mod migrate;
pub mod record;
pub mod store;

pub use adapter::{LoadOutcome, PersistenceAdapter, record_key};
pub use hl_scenario::SaveStatus;
pub use migrate::{LATEST_VERSION, migrate_to_latest};
pub use record::{CustomSourceRecord, PersistedState};
pub use store::{FileStore, KeyValueStore, MemoryStore};

pub type PersistResult<T> = Result<T, PersistError>;

#[derive(thiserror::Error, Debug)]
pub enum PersistError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Storage unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("Invalid key: {key}")]
    InvalidKey { key: String },

    #[error("Migration failed: {what}")]
    Migration { what: String },

    #[error("Invalid record: {what}")]
    InvalidRecord { what: String },
}
