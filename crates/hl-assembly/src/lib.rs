//! hl-assembly: effective R-values for building envelope elements.
//!
//! Provides:
//! - Layered assemblies (series resistances, order-independent)
//! - Stick-frame walls (parallel-path method with steel-stud correction)
//! - Mass walls (solid material plus continuous insulation)
//! - Wall and roof/floor element wrappers used by scenarios
//! - Stack analysis with air films and radiant barriers
//! - Existing-building R-value estimator
//!
//! All R-values are imperial, ft²·°F·h/BTU. Compute functions are pure: they
//! read the material library and the assembly and never mutate either.

pub mod element;
pub mod error;
pub mod estimator;
pub mod layered;
pub mod mass_wall;
pub mod stack;
pub mod stick_frame;
pub mod wall;

pub use element::ElementAssembly;
pub use error::{AssemblyError, AssemblyResult};
pub use estimator::{HeatBalance, HvacMode, RValueEstimate, RValueInputs, estimate_r_value};
pub use layered::{Layer, LayeredAssembly, compute_effective_r};
pub use mass_wall::{MassWall, compute_mass_wall_r};
pub use stack::{AIR_FILMS_R, LayerContribution, StackAnalysis, StackWarning, analyze_stack};
pub use stick_frame::{StickFrame, StickFrameBreakdown, compute_stick_frame_r};
pub use wall::{AssemblyKind, WallAssembly};

/// Thermal transmittance from resistance.
pub fn u_factor(r_value: f64) -> f64 {
    1.0 / r_value
}
