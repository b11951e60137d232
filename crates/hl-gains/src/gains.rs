//! Internal gains of one scenario: catalog rows plus a custom-source arena.

use crate::error::{GainsError, GainsResult};
use crate::source::{CustomSourceDraft, LoadSource, SourceField, source_heat_rate};
use hl_catalog::{LoadCategory, load_catalog, lookup_load};
use hl_core::{IdAllocator, SourceId};
use serde::Serialize;
use tracing::{debug, warn};

/// A catalog entry with the user's quantity and any watts/duty override.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogRow {
    pub catalog_id: &'static str,
    pub source: LoadSource,
}

/// Per-category subtotals and their sum, BTU/hr.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct GainsSummary {
    pub occupants: f64,
    pub fixed_appliances: f64,
    pub custom: f64,
    pub total: f64,
}

#[derive(Debug, Clone)]
pub struct InternalGains {
    catalog: Vec<CatalogRow>,
    custom: Vec<(SourceId, LoadSource)>,
    ids: IdAllocator,
}

impl Default for InternalGains {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for InternalGains {
    /// Ids are identity only; equality compares rows and custom sources in order.
    fn eq(&self, other: &Self) -> bool {
        self.catalog == other.catalog
            && self.custom.len() == other.custom.len()
            && self
                .custom
                .iter()
                .zip(&other.custom)
                .all(|((_, a), (_, b))| a == b)
    }
}

impl InternalGains {
    /// Every catalog entry at its default quantity, no custom sources.
    pub fn new() -> Self {
        let catalog = load_catalog()
            .iter()
            .filter_map(|entry| match LoadSource::from_catalog(entry) {
                Ok(source) => Some(CatalogRow {
                    catalog_id: entry.id,
                    source,
                }),
                Err(err) => {
                    warn!(catalog_id = entry.id, error = %err, "catalog load skipped");
                    None
                }
            })
            .collect();
        Self {
            catalog,
            custom: Vec::new(),
            ids: IdAllocator::new(),
        }
    }

    pub fn catalog_rows(&self) -> &[CatalogRow] {
        &self.catalog
    }

    pub fn custom_sources(&self) -> impl Iterator<Item = (SourceId, &LoadSource)> {
        self.custom.iter().map(|(id, s)| (*id, s))
    }

    pub fn custom_source(&self, id: SourceId) -> GainsResult<&LoadSource> {
        self.custom
            .iter()
            .find(|(sid, _)| *sid == id)
            .map(|(_, s)| s)
            .ok_or(GainsError::UnknownSource { id })
    }

    /// Every source that contributes, catalog rows first.
    pub fn sources(&self) -> impl Iterator<Item = &LoadSource> {
        self.catalog
            .iter()
            .map(|row| &row.source)
            .chain(self.custom.iter().map(|(_, s)| s))
    }

    fn row_mut(&mut self, catalog_id: &str) -> GainsResult<&mut CatalogRow> {
        let entry = lookup_load(catalog_id)?;
        self.catalog
            .iter_mut()
            .find(|row| row.catalog_id == entry.id)
            .ok_or_else(|| GainsError::UnknownLoad {
                id: catalog_id.to_string(),
            })
    }

    pub fn set_quantity(&mut self, catalog_id: &str, quantity: u32) -> GainsResult<()> {
        self.row_mut(catalog_id)?
            .source
            .apply(SourceField::Quantity(quantity))
    }

    /// Override watts, duty or quantity of a catalog row. Catalog names are fixed.
    pub fn edit_catalog_row(&mut self, catalog_id: &str, field: SourceField) -> GainsResult<()> {
        if matches!(field, SourceField::Name(_)) {
            return Err(GainsError::InvalidInput {
                field: "name",
                reason: "catalog entries cannot be renamed".to_string(),
            });
        }
        self.row_mut(catalog_id)?.source.apply(field)
    }

    pub fn add_custom_source(&mut self, draft: CustomSourceDraft) -> GainsResult<SourceId> {
        let source = draft.build()?;
        let id = self.ids.allocate();
        debug!(%id, name = source.name(), "custom source added");
        self.custom.push((id, source));
        Ok(id)
    }

    pub fn edit_custom_source(&mut self, id: SourceId, field: SourceField) -> GainsResult<()> {
        let (_, source) = self
            .custom
            .iter_mut()
            .find(|(sid, _)| *sid == id)
            .ok_or(GainsError::UnknownSource { id })?;
        source.apply(field)
    }

    pub fn remove_custom_source(&mut self, id: SourceId) -> GainsResult<LoadSource> {
        let index = self.position(id)?;
        let (_, source) = self.custom.remove(index);
        debug!(%id, name = source.name(), "custom source removed");
        Ok(source)
    }

    /// Move a custom source to `index` in the user's ordering.
    pub fn move_custom_source(&mut self, id: SourceId, index: usize) -> GainsResult<()> {
        let from = self.position(id)?;
        if index >= self.custom.len() {
            return Err(GainsError::IndexOutOfRange {
                index,
                len: self.custom.len(),
            });
        }
        let entry = self.custom.remove(from);
        self.custom.insert(index, entry);
        Ok(())
    }

    /// Replace all custom sources, e.g. from persisted state. Fresh ids are issued.
    pub fn replace_custom_sources(
        &mut self,
        sources: impl IntoIterator<Item = LoadSource>,
    ) -> Vec<SourceId> {
        self.custom.clear();
        sources
            .into_iter()
            .map(|source| {
                let id = self.ids.allocate();
                self.custom.push((id, source));
                id
            })
            .collect()
    }

    /// Custom sources in user order, without ids.
    pub fn custom_snapshot(&self) -> Vec<LoadSource> {
        self.custom.iter().map(|(_, s)| s.clone()).collect()
    }

    fn position(&self, id: SourceId) -> GainsResult<usize> {
        self.custom
            .iter()
            .position(|(sid, _)| *sid == id)
            .ok_or(GainsError::UnknownSource { id })
    }

    pub fn summary(&self) -> GainsSummary {
        let occupants = category_subtotal(self, LoadCategory::Occupant);
        let fixed_appliances = category_subtotal(self, LoadCategory::FixedAppliance);
        let custom = category_subtotal(self, LoadCategory::Custom);
        GainsSummary {
            occupants,
            fixed_appliances,
            custom,
            total: occupants + fixed_appliances + custom,
        }
    }
}

pub fn category_subtotal(gains: &InternalGains, category: LoadCategory) -> f64 {
    gains
        .sources()
        .filter(|s| s.category() == category)
        .fold(0.0, |total, source| total + source_heat_rate(source))
}

pub fn total_internal_gain(gains: &InternalGains) -> f64 {
    gains.summary().total
}
