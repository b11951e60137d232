//! Pending edits, coalesced per (slot, field key).

use crate::comparison::Slot;
use crate::field::ScenarioField;

#[derive(Debug, Clone)]
pub(crate) struct PendingEdit {
    pub slot: Slot,
    pub key: String,
    pub field: ScenarioField,
}

/// Last value wins per key; entries stay ordered by their latest write.
#[derive(Debug, Clone, Default)]
pub(crate) struct PendingEdits {
    edits: Vec<PendingEdit>,
}

impl PendingEdits {
    pub fn push(&mut self, slot: Slot, field: ScenarioField) {
        let key = field.key();
        self.edits.retain(|e| !(e.slot == slot && e.key == key));
        self.edits.push(PendingEdit { slot, key, field });
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    pub fn len(&self) -> usize {
        self.edits.len()
    }

    /// Pending fields of one slot, oldest write first.
    pub fn for_slot(&self, slot: Slot) -> impl Iterator<Item = &ScenarioField> {
        self.edits
            .iter()
            .filter(move |e| e.slot == slot)
            .map(|e| &e.field)
    }

    pub fn take_slot(&mut self, slot: Slot) -> Vec<ScenarioField> {
        let (taken, kept) = std::mem::take(&mut self.edits)
            .into_iter()
            .partition::<Vec<_>, _>(|e| e.slot == slot);
        self.edits = kept;
        taken.into_iter().map(|e| e.field).collect()
    }
}
