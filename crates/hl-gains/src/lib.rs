//! hl-gains: internal heat gains from occupants, appliances and custom sources.
//!
//! Every path goes through [`average_power`] and [`to_heat_rate`], so the
//! catalog rows and custom sources are converted identically.

pub mod error;
pub mod gains;
pub mod source;

pub use error::{GainsError, GainsResult};
pub use gains::{
    CatalogRow, GainsSummary, InternalGains, category_subtotal, total_internal_gain,
};
pub use source::{
    CustomSourceDraft, LoadSource, SourceField, average_power, source_heat_rate, to_heat_rate,
};
