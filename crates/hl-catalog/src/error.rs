//! Catalog lookup errors.

use hl_core::HlError;
use thiserror::Error;

pub type CatalogResult<T> = Result<T, CatalogError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    /// No material has this canonical id or alias.
    #[error("Unknown material: {id}")]
    UnknownMaterial { id: String },

    /// No load catalog entry has this id.
    #[error("Unknown load source: {id}")]
    UnknownLoad { id: String },

    /// A selector value (stud size, spacing, preset...) that is not one of the known options.
    #[error("Unknown {what}: {value}")]
    UnknownOption { what: &'static str, value: String },
}

impl From<CatalogError> for HlError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::UnknownMaterial { .. } => HlError::InvalidArg {
                what: "unknown material",
            },
            CatalogError::UnknownLoad { .. } => HlError::InvalidArg {
                what: "unknown load source",
            },
            CatalogError::UnknownOption { what, .. } => HlError::InvalidArg { what },
        }
    }
}
