//! Roof and floor elements.

use crate::error::{AssemblyError, AssemblyResult};
use crate::layered::LayeredAssembly;
use hl_catalog::MaterialLibrary;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ElementAssembly {
    /// A rated R-value entered directly.
    Nominal { r_value: f64 },
    Layered { layers: LayeredAssembly },
}

impl ElementAssembly {
    pub fn nominal(r_value: f64) -> Self {
        ElementAssembly::Nominal { r_value }
    }

    /// Effective R. Must be strictly positive since losses divide by it.
    pub fn effective_r(&self, library: &MaterialLibrary) -> AssemblyResult<f64> {
        let r = match self {
            ElementAssembly::Nominal { r_value } => *r_value,
            ElementAssembly::Layered { layers } => layers.effective_r(library)?,
        };
        if r.is_finite() && r > 0.0 {
            Ok(r)
        } else {
            Err(AssemblyError::invalid(
                "element R-value",
                format!("must be a positive number, got {r}"),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nominal_and_layered() {
        let lib = MaterialLibrary::standard();
        assert_eq!(ElementAssembly::nominal(38.0).effective_r(&lib).unwrap(), 38.0);

        let mut layers = LayeredAssembly::new();
        layers.add_layer(&lib, "Blown Cellulose", 10.0).unwrap();
        let roof = ElementAssembly::Layered { layers };
        assert!((roof.effective_r(&lib).unwrap() - 37.0).abs() < 1e-9);
    }

    #[test]
    fn zero_r_rejected() {
        let lib = MaterialLibrary::standard();
        assert!(ElementAssembly::nominal(0.0).effective_r(&lib).is_err());
        let empty = ElementAssembly::Layered {
            layers: LayeredAssembly::new(),
        };
        assert!(empty.effective_r(&lib).is_err());
    }
}
