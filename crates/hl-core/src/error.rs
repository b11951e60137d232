use thiserror::Error;

/// Rejected numeric input. Each engine maps this onto its own `InvalidInput`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HlError {
    #[error("{what} must be a finite number, got {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("{what} must not be negative, got {value}")]
    Negative { what: &'static str, value: f64 },

    #[error("Invalid {what}")]
    InvalidArg { what: &'static str },
}
