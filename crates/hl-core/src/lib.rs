//! hl-core: shared building blocks for heatload.
//!
//! - units: uom conversions for the SI energy balance plus imperial constants
//! - numeric: validation of user-entered numbers
//! - ids: custom-source identity

pub mod error;
pub mod ids;
pub mod numeric;
pub mod units;

pub use error::HlError;
pub use ids::{IdAllocator, SourceId};
pub use numeric::{ensure_finite, ensure_non_negative, ensure_positive};
pub use units::{Area, Volume, constants, delta_f, feet, sq_ft};
