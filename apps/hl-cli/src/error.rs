//! Errors surfaced by the command line.

use hl_assembly::AssemblyError;
use hl_catalog::CatalogError;
use hl_gains::GainsError;
use hl_persist::PersistError;
use hl_scenario::{ScenarioError, Slot};
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Failed to read {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid YAML in {}: {source}", path.display())]
    Yaml {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Scenario(#[from] ScenarioError),

    #[error(transparent)]
    Assembly(#[from] AssemblyError),

    #[error(transparent)]
    Gains(#[from] GainsError),

    #[error("Storage error: {0}")]
    Persist(#[from] PersistError),

    #[error("Scenario {slot} was not saved: {reason}")]
    NotSaved { slot: Slot, reason: String },
}

pub type CliResult<T> = Result<T, CliError>;
