//! Assembly engine errors.

use hl_catalog::CatalogError;
use hl_core::HlError;
use thiserror::Error;

pub type AssemblyResult<T> = Result<T, AssemblyError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AssemblyError {
    #[error("Unknown material: {id}")]
    UnknownMaterial { id: String },

    /// Thickness or piece count that is zero, negative or not finite.
    #[error("Invalid thickness for {what}: {value}")]
    InvalidThickness { what: String, value: f64 },

    #[error("Layer index out of range (index={index}, len={len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Invalid input for {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },
}

impl AssemblyError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        AssemblyError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }
}

impl From<CatalogError> for AssemblyError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::UnknownMaterial { id } => AssemblyError::UnknownMaterial { id },
            other => AssemblyError::InvalidInput {
                field: "selection",
                reason: other.to_string(),
            },
        }
    }
}

impl From<HlError> for AssemblyError {
    fn from(err: HlError) -> Self {
        match err {
            HlError::NonFinite { what, .. }
            | HlError::Negative { what, .. }
            | HlError::InvalidArg { what } => AssemblyError::InvalidInput {
                field: what,
                reason: err.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_error_maps_to_unknown_material() {
        let err: AssemblyError = CatalogError::UnknownMaterial { id: "foo".into() }.into();
        assert_eq!(err, AssemblyError::UnknownMaterial { id: "foo".into() });
    }

    #[test]
    fn hl_error_keeps_field_name() {
        let err: AssemblyError = HlError::Negative {
            what: "continuous R",
            value: -1.0,
        }
        .into();
        assert!(matches!(
            err,
            AssemblyError::InvalidInput {
                field: "continuous R",
                ..
            }
        ));
        assert!(err.to_string().contains("continuous R"));
    }
}
