//! hl-scenario: the A/B scenario coordinator.
//!
//! Ties the engines together for one building:
//! - geometry → surface areas, design conditions → temperature differences
//! - wall/roof/floor assemblies → R-values → envelope loss
//! - internal gains summary
//! - envelope loss swept across outdoor temperature
//! - a [`Comparison`] holding scenarios A and B with validated edits,
//!   debounced edits, recompute observers and persistence hooks

pub mod comparison;
pub mod conditions;
pub mod curve;
mod debounce;
pub mod envelope;
pub mod error;
pub mod field;
pub mod geometry;
pub mod persistence;
pub mod scenario;
pub mod shared;

pub use comparison::{Comparison, RecomputeObserver, ScenarioResult, Slot, compute_scenario};
pub use conditions::DesignConditions;
pub use curve::{CURVE_STEP_F, LossPoint, curve_range, loss_curve};
pub use envelope::{EnvelopeLoss, envelope_loss, net_areas};
pub use error::{CalcResult, ScenarioError};
pub use field::ScenarioField;
pub use geometry::{BuildingShape, SurfaceAreas};
pub use persistence::{SaveStatus, ScenarioPersistence, ScenarioSnapshot};
pub use scenario::{AirSealing, Opening, Scenario};
pub use shared::{SharedField, SharedInputs};
