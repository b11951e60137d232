//! Layer-stack analysis with air films, air spaces and radiant barriers.
//!
//! A radiant layer only reflects when one of its neighbours is an air space.
//! Winter values assume heat flowing up, summer values heat flowing down.

use crate::error::AssemblyResult;
use crate::layered::{LayeredAssembly, check_amount};
use hl_catalog::{LayerBehavior, MaterialCategory, MaterialLibrary};
use std::fmt;

/// Interior plus exterior surface films.
pub const AIR_FILMS_R: f64 = 0.85;

/// Enclosed air space, regardless of its neighbours.
pub const AIR_SPACE_R: f64 = 0.9;

/// Active radiant barrier, heat flow up.
pub const RADIANT_WINTER_R: f64 = 5.0;

/// Active radiant barrier, heat flow down.
pub const RADIANT_SUMMER_R: f64 = 10.0;

#[derive(Debug, Clone, PartialEq)]
pub enum StackWarning {
    /// Radiant layer with no adjacent air space. `position` is 1-based.
    RadiantWithoutAirGap { position: usize },
    /// Fill and air spaces are thicker than the framing that holds them.
    Compression { fill_in: f64, framing_in: f64 },
}

impl fmt::Display for StackWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StackWarning::RadiantWithoutAirGap { position } => write!(
                f,
                "radiant layer at position {position} has no air gap and acts as a conductor only"
            ),
            StackWarning::Compression {
                fill_in,
                framing_in,
            } => write!(
                f,
                "insulation and air gaps ({fill_in:.2} in) are thicker than the framing ({framing_in:.2} in); compressed fill loses R-value"
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayerContribution {
    pub material_id: String,
    pub r_winter: f64,
    pub r_summer: f64,
    /// `Some` for radiant layers: whether an air space made them active.
    pub radiant_active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StackAnalysis {
    pub r_winter: f64,
    pub r_summer: f64,
    pub layers: Vec<LayerContribution>,
    pub warnings: Vec<StackWarning>,
}

pub fn analyze_stack(
    assembly: &LayeredAssembly,
    library: &MaterialLibrary,
) -> AssemblyResult<StackAnalysis> {
    let resolved = assembly
        .layers()
        .iter()
        .map(|layer| {
            let material = layer.material(library)?;
            let amount = check_amount(&layer.material_id, layer.amount)?;
            Ok((material, amount))
        })
        .collect::<AssemblyResult<Vec<_>>>()?;

    let is_air = |i: usize| {
        resolved
            .get(i)
            .is_some_and(|(m, _)| m.behavior == LayerBehavior::AirSpace)
    };

    let mut analysis = StackAnalysis {
        r_winter: AIR_FILMS_R,
        r_summer: AIR_FILMS_R,
        layers: Vec::with_capacity(resolved.len()),
        warnings: Vec::new(),
    };

    for (index, (material, amount)) in resolved.iter().enumerate() {
        let own_r = material.r_for_amount(*amount);
        let (r_winter, r_summer, radiant_active) = match material.behavior {
            LayerBehavior::Conductive => (own_r, own_r, None),
            LayerBehavior::AirSpace => (AIR_SPACE_R, AIR_SPACE_R, None),
            LayerBehavior::Radiant => {
                let faces_air = (index > 0 && is_air(index - 1)) || is_air(index + 1);
                if faces_air {
                    (RADIANT_WINTER_R, RADIANT_SUMMER_R, Some(true))
                } else {
                    analysis.warnings.push(StackWarning::RadiantWithoutAirGap {
                        position: index + 1,
                    });
                    (own_r, own_r, Some(false))
                }
            }
        };
        analysis.r_winter += r_winter;
        analysis.r_summer += r_summer;
        analysis.layers.push(LayerContribution {
            material_id: material.id.to_string(),
            r_winter,
            r_summer,
            radiant_active,
        });
    }

    let framing = resolved
        .iter()
        .find(|(m, _)| m.category == MaterialCategory::Structural);
    if let Some((structure, amount)) = framing {
        let framing_in = structure.thickness_for_amount(*amount);
        let fill_in: f64 = resolved
            .iter()
            .filter(|(m, _)| {
                m.category == MaterialCategory::CavityFill || m.behavior == LayerBehavior::AirSpace
            })
            .map(|(m, a)| m.thickness_for_amount(*a))
            .sum();
        if fill_in > framing_in {
            analysis.warnings.push(StackWarning::Compression {
                fill_in,
                framing_in,
            });
        }
    }

    tracing::debug!(
        layers = resolved.len(),
        r_winter = analysis.r_winter,
        r_summer = analysis.r_summer,
        warnings = analysis.warnings.len(),
        "stack analyzed"
    );

    Ok(analysis)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stack(layers: &[(&str, f64)]) -> LayeredAssembly {
        let lib = MaterialLibrary::standard();
        let mut s = LayeredAssembly::new();
        for (id, amount) in layers {
            s.add_layer(&lib, id, *amount).unwrap();
        }
        s
    }

    fn analyze(layers: &[(&str, f64)]) -> StackAnalysis {
        analyze_stack(&stack(layers), &MaterialLibrary::standard()).unwrap()
    }

    #[test]
    fn empty_stack_is_just_air_films() {
        let a = analyze(&[]);
        assert_eq!(a.r_winter, AIR_FILMS_R);
        assert_eq!(a.r_summer, AIR_FILMS_R);
        assert!(a.warnings.is_empty());
    }

    #[test]
    fn radiant_next_to_air_is_active() {
        let a = analyze(&[("Air Gap (0.75in)", 1.0), ("Reflectix Bubble Foil", 1.0)]);
        assert!((a.r_winter - (0.85 + 0.9 + 5.0)).abs() < 1e-9);
        assert!((a.r_summer - (0.85 + 0.9 + 10.0)).abs() < 1e-9);
        assert_eq!(a.layers[1].radiant_active, Some(true));
        assert!(a.warnings.is_empty());
    }

    #[test]
    fn radiant_without_air_conducts_and_warns() {
        let a = analyze(&[("Plywood", 0.5), ("Reflectix Bubble Foil", 1.0)]);
        let expected = 0.85 + 1.25 * 0.5 + 1.1;
        assert!((a.r_winter - expected).abs() < 1e-9);
        assert!((a.r_summer - expected).abs() < 1e-9);
        assert_eq!(
            a.warnings,
            vec![StackWarning::RadiantWithoutAirGap { position: 2 }]
        );
    }

    #[test]
    fn compression_warning_when_fill_exceeds_framing() {
        let a = analyze(&[("Softwood Lumber", 3.5), ("Fiberglass Batt", 5.5)]);
        assert!(a.warnings.iter().any(|w| matches!(
            w,
            StackWarning::Compression { fill_in, framing_in }
                if (*fill_in - 5.5).abs() < 1e-12 && (*framing_in - 3.5).abs() < 1e-12
        )));
    }

    #[test]
    fn no_compression_without_structure() {
        let a = analyze(&[("Fiberglass Batt", 12.0)]);
        assert!(a.warnings.is_empty());
    }

    #[test]
    fn fill_that_fits_does_not_warn() {
        let a = analyze(&[
            ("Softwood Lumber", 5.5),
            ("Mineral Wool Batt", 4.5),
            ("Air Gap (0.75in)", 1.0),
        ]);
        assert!(a.warnings.is_empty());
    }
}
