use hl_catalog::CatalogError;
use hl_core::{HlError, SourceId};
use thiserror::Error;

pub type GainsResult<T> = Result<T, GainsError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GainsError {
    #[error("Unknown custom source: {id}")]
    UnknownSource { id: SourceId },

    #[error("Unknown load catalog entry: {id}")]
    UnknownLoad { id: String },

    #[error("Invalid input for {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    #[error("Source index out of range (index={index}, len={len})")]
    IndexOutOfRange { index: usize, len: usize },
}

impl From<CatalogError> for GainsError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::UnknownLoad { id } => GainsError::UnknownLoad { id },
            other => GainsError::InvalidInput {
                field: "catalog",
                reason: other.to_string(),
            },
        }
    }
}

impl From<HlError> for GainsError {
    fn from(err: HlError) -> Self {
        match err {
            HlError::NonFinite { what, .. }
            | HlError::Negative { what, .. }
            | HlError::InvalidArg { what } => GainsError::InvalidInput {
                field: what,
                reason: err.to_string(),
            },
        }
    }
}
