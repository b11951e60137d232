//! Layered assemblies: resistances in series.

use crate::error::{AssemblyError, AssemblyResult};
use hl_catalog::{Material, MaterialLibrary};
use serde::{Deserialize, Serialize};

/// One layer of a stack.
///
/// `amount` is a thickness in inches for per-inch materials and a piece count
/// for fixed-R board products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub material_id: String,
    pub amount: f64,
}

impl Layer {
    pub fn material(&self, library: &MaterialLibrary) -> AssemblyResult<&'static Material> {
        Ok(library.lookup(&self.material_id)?)
    }
}

/// Ordered layers. Order is for display; the R sum ignores it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayeredAssembly {
    layers: Vec<Layer>,
}

impl LayeredAssembly {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Append a layer. The stored id is the canonical one even when an alias
    /// was given.
    pub fn add_layer(
        &mut self,
        library: &MaterialLibrary,
        material_id: &str,
        amount: f64,
    ) -> AssemblyResult<()> {
        let material = library.lookup(material_id)?;
        check_amount(material_id, amount)?;
        self.layers.push(Layer {
            material_id: material.id.to_string(),
            amount,
        });
        Ok(())
    }

    pub fn remove_layer(&mut self, index: usize) -> AssemblyResult<Layer> {
        self.check_index(index)?;
        Ok(self.layers.remove(index))
    }

    /// Move the layer at `from` so that it ends up at `to`.
    pub fn move_layer(&mut self, from: usize, to: usize) -> AssemblyResult<()> {
        self.check_index(from)?;
        self.check_index(to)?;
        let layer = self.layers.remove(from);
        self.layers.insert(to, layer);
        Ok(())
    }

    pub fn effective_r(&self, library: &MaterialLibrary) -> AssemblyResult<f64> {
        compute_effective_r(self, library)
    }

    /// Re-validate every layer, e.g. after deserializing a stored stack.
    pub fn validate(&self, library: &MaterialLibrary) -> AssemblyResult<()> {
        for layer in &self.layers {
            layer.material(library)?;
            check_amount(&layer.material_id, layer.amount)?;
        }
        Ok(())
    }

    fn check_index(&self, index: usize) -> AssemblyResult<()> {
        if index < self.layers.len() {
            Ok(())
        } else {
            Err(AssemblyError::IndexOutOfRange {
                index,
                len: self.layers.len(),
            })
        }
    }
}

impl FromIterator<Layer> for LayeredAssembly {
    fn from_iter<T: IntoIterator<Item = Layer>>(iter: T) -> Self {
        Self {
            layers: iter.into_iter().collect(),
        }
    }
}

pub(crate) fn check_amount(material_id: &str, amount: f64) -> AssemblyResult<f64> {
    if amount.is_finite() && amount > 0.0 {
        Ok(amount)
    } else {
        Err(AssemblyError::InvalidThickness {
            what: material_id.to_string(),
            value: amount,
        })
    }
}

/// Series sum of every layer's R.
pub fn compute_effective_r(
    assembly: &LayeredAssembly,
    library: &MaterialLibrary,
) -> AssemblyResult<f64> {
    let mut total = 0.0;
    for layer in assembly.layers() {
        let material = layer.material(library)?;
        let amount = check_amount(&layer.material_id, layer.amount)?;
        total += material.r_for_amount(amount);
    }
    Ok(total)
}
