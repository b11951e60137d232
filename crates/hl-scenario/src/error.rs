//! Error types for scenario coordination.

use hl_assembly::AssemblyError;
use hl_catalog::CatalogError;
use hl_core::HlError;
use hl_gains::GainsError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScenarioError {
    #[error(transparent)]
    Assembly(#[from] AssemblyError),

    #[error(transparent)]
    Gains(#[from] GainsError),

    #[error("Invalid input for {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Unknown input field: {key}")]
    UnknownField { key: String },
}

/// `ScenarioResult` is the computed output; this alias is for fallible calls.
pub type CalcResult<T> = Result<T, ScenarioError>;

impl ScenarioError {
    pub(crate) fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ScenarioError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl From<CatalogError> for ScenarioError {
    fn from(e: CatalogError) -> Self {
        match e {
            CatalogError::UnknownMaterial { id } => {
                ScenarioError::Assembly(AssemblyError::UnknownMaterial { id })
            }
            CatalogError::UnknownLoad { id } => ScenarioError::Gains(GainsError::UnknownLoad { id }),
            CatalogError::UnknownOption { what, value } => {
                ScenarioError::invalid(what, format!("unknown option {value:?}"))
            }
        }
    }
}

impl From<HlError> for ScenarioError {
    fn from(e: HlError) -> Self {
        let field = match &e {
            HlError::NonFinite { what, .. }
            | HlError::Negative { what, .. }
            | HlError::InvalidArg { what } => *what,
        };
        ScenarioError::invalid(field, e.to_string())
    }
}
