//! Design temperatures shared by both scenarios, °F.

use crate::error::CalcResult;
use hl_core::ensure_finite;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignConditions {
    pub indoor_f: f64,
    pub outdoor_f: f64,
    pub ground_f: f64,
}

impl Default for DesignConditions {
    fn default() -> Self {
        Self {
            indoor_f: 70.0,
            outdoor_f: 20.0,
            ground_f: 50.0,
        }
    }
}

impl DesignConditions {
    pub fn validate(&self) -> CalcResult<()> {
        ensure_finite(self.indoor_f, "indoor temperature")?;
        ensure_finite(self.outdoor_f, "outdoor temperature")?;
        ensure_finite(self.ground_f, "ground temperature")?;
        Ok(())
    }

    /// Indoor minus outdoor, never below zero.
    pub fn delta_t_air(&self) -> f64 {
        (self.indoor_f - self.outdoor_f).max(0.0)
    }

    /// Indoor minus ground, never below zero.
    pub fn delta_t_ground(&self) -> f64 {
        (self.indoor_f - self.ground_f).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deltas_clamp_at_zero() {
        let summer = DesignConditions {
            indoor_f: 72.0,
            outdoor_f: 95.0,
            ground_f: 60.0,
        };
        assert_eq!(summer.delta_t_air(), 0.0);
        assert_eq!(summer.delta_t_ground(), 12.0);
        assert!(
            DesignConditions {
                outdoor_f: f64::NAN,
                ..summer
            }
            .validate()
            .is_err()
        );
    }
}
