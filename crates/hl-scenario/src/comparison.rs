//! A/B comparison container and the recompute entry points.
//!
//! Every mutation is applied to a scratch copy, recomputed, and committed
//! only when the recompute succeeds. A scenario is computed from the shared
//! inputs and its own state alone; A never reads B.

use crate::curve::{LossPoint, loss_curve};
use crate::debounce::PendingEdits;
use crate::envelope::{EnvelopeLoss, envelope_loss};
use crate::error::{CalcResult, ScenarioError};
use crate::field::ScenarioField;
use crate::geometry::SurfaceAreas;
use crate::persistence::{SaveStatus, ScenarioPersistence, ScenarioSnapshot};
use crate::scenario::Scenario;
use crate::shared::{SharedField, SharedInputs};
use hl_assembly::AssemblyKind;
use hl_catalog::{InsulationPreset, MaterialLibrary};
use hl_core::SourceId;
use hl_gains::{CustomSourceDraft, GainsSummary, LoadSource, SourceField};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Slot {
    A,
    B,
}

impl Slot {
    pub const ALL: [Slot; 2] = [Slot::A, Slot::B];

    fn index(self) -> usize {
        match self {
            Slot::A => 0,
            Slot::B => 1,
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            Slot::A => "a",
            Slot::B => "b",
        }
    }
}

impl FromStr for Slot {
    type Err = ScenarioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a" => Ok(Slot::A),
            "b" => Ok(Slot::B),
            other => Err(ScenarioError::invalid("slot", format!("expected a or b, got {other:?}"))),
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Slot::A => "A",
            Slot::B => "B",
        })
    }
}

/// Everything the display layer shows for one scenario.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScenarioResult {
    pub areas: SurfaceAreas,
    pub wall_r: f64,
    pub roof_r: f64,
    pub floor_r: f64,
    pub envelope: EnvelopeLoss,
    pub gains: GainsSummary,
}

/// Compute one scenario against the shared inputs.
pub fn compute_scenario(
    shared: &SharedInputs,
    scenario: &Scenario,
    library: &MaterialLibrary,
) -> CalcResult<ScenarioResult> {
    let areas = shared.shape.surface_areas()?;
    let (wall_r, roof_r, floor_r) = scenario.element_r_values(library)?;
    let envelope = envelope_loss(&areas, &shared.conditions, scenario, library)?;
    Ok(ScenarioResult {
        areas,
        wall_r,
        roof_r,
        floor_r,
        envelope,
        gains: scenario.gains.summary(),
    })
}

/// Notified after every committed recompute.
pub trait RecomputeObserver {
    fn on_recompute(&mut self, slot: Slot, result: &ScenarioResult);
}

impl<F: FnMut(Slot, &ScenarioResult)> RecomputeObserver for F {
    fn on_recompute(&mut self, slot: Slot, result: &ScenarioResult) {
        self(slot, result)
    }
}

pub struct Comparison {
    library: MaterialLibrary,
    shared: SharedInputs,
    scenarios: [Scenario; 2],
    results: [Option<ScenarioResult>; 2],
    comparison_enabled: bool,
    dirty: [bool; 2],
    pending: PendingEdits,
    observers: Vec<Box<dyn RecomputeObserver>>,
}

impl fmt::Debug for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Comparison")
            .field("shared", &self.shared)
            .field("comparison_enabled", &self.comparison_enabled)
            .field("results", &self.results)
            .field("dirty", &self.dirty)
            .field("pending", &self.pending.len())
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Comparison {
    /// Two default scenarios, comparison off, A computed.
    pub fn new(library: MaterialLibrary, shared: SharedInputs) -> CalcResult<Self> {
        Self::with_scenarios(library, shared, Scenario::default(), Scenario::default())
    }

    pub fn with_scenarios(
        library: MaterialLibrary,
        shared: SharedInputs,
        a: Scenario,
        b: Scenario,
    ) -> CalcResult<Self> {
        let result_a = compute_scenario(&shared, &a, &library)?;
        // B must be computable too, otherwise enabling comparison would fail later.
        compute_scenario(&shared, &b, &library)?;
        Ok(Self {
            library,
            shared,
            scenarios: [a, b],
            results: [Some(result_a), None],
            comparison_enabled: false,
            dirty: [false; 2],
            pending: PendingEdits::default(),
            observers: Vec::new(),
        })
    }

    pub fn library(&self) -> &MaterialLibrary {
        &self.library
    }

    pub fn shared(&self) -> &SharedInputs {
        &self.shared
    }

    pub fn scenario(&self, slot: Slot) -> &Scenario {
        &self.scenarios[slot.index()]
    }

    /// Latest committed result. `None` for B while comparison is off.
    pub fn result(&self, slot: Slot) -> Option<&ScenarioResult> {
        self.results[slot.index()].as_ref()
    }

    pub fn is_comparison_enabled(&self) -> bool {
        self.comparison_enabled
    }

    pub fn is_active(&self, slot: Slot) -> bool {
        slot == Slot::A || self.comparison_enabled
    }

    pub fn is_dirty(&self, slot: Slot) -> bool {
        self.dirty[slot.index()]
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn subscribe(&mut self, observer: Box<dyn RecomputeObserver>) {
        self.observers.push(observer);
    }

    fn notify(&mut self, slot: Slot) {
        if let Some(result) = self.results[slot.index()] {
            for observer in &mut self.observers {
                observer.on_recompute(slot, &result);
            }
        }
    }

    fn commit(&mut self, slot: Slot, scenario: Scenario, result: ScenarioResult) {
        let i = slot.index();
        self.scenarios[i] = scenario;
        self.dirty[i] = true;
        if self.is_active(slot) {
            self.results[i] = Some(result);
            debug!(%slot, total = result.envelope.total, gains = result.gains.total, "scenario recomputed");
            self.notify(slot);
        }
    }

    /// Apply the slot's queued edits and then `mutate` to a copy of its
    /// scenario, recompute, and commit. Queued edits are older than any
    /// direct edit, so they go first and are consumed on success.
    fn mutate_with<T>(
        &mut self,
        slot: Slot,
        mutate: impl FnOnce(&mut Scenario, &MaterialLibrary) -> CalcResult<T>,
    ) -> CalcResult<T> {
        let mut scratch = self.scenarios[slot.index()].clone();
        let queued: Vec<ScenarioField> = self.pending.for_slot(slot).cloned().collect();
        let outcome = queued
            .into_iter()
            .try_for_each(|field| field.apply(&mut scratch, &self.library))
            .and_then(|()| mutate(&mut scratch, &self.library))
            .and_then(|value| {
                compute_scenario(&self.shared, &scratch, &self.library).map(|r| (value, r))
            });
        match outcome {
            Ok((value, result)) => {
                self.pending.take_slot(slot);
                self.commit(slot, scratch, result);
                Ok(value)
            }
            Err(err) => {
                warn!(%slot, error = %err, "input rejected; keeping previous state");
                Err(err)
            }
        }
    }

    /// Recompute a slot from its committed state.
    pub fn recompute(&mut self, slot: Slot) -> CalcResult<ScenarioResult> {
        let result = compute_scenario(&self.shared, self.scenario(slot), &self.library)?;
        if self.is_active(slot) {
            self.results[slot.index()] = Some(result);
            debug!(%slot, total = result.envelope.total, "scenario recomputed");
            self.notify(slot);
        }
        Ok(result)
    }

    /// Committed state of a slot swept across outdoor temperature. Pure; B
    /// can be swept while comparison is off.
    pub fn loss_curve(&self, slot: Slot) -> CalcResult<Vec<LossPoint>> {
        loss_curve(&self.shared, self.scenario(slot), &self.library)
    }

    pub fn enable_comparison(&mut self) -> CalcResult<()> {
        if self.comparison_enabled {
            return Ok(());
        }
        let result = compute_scenario(&self.shared, self.scenario(Slot::B), &self.library)?;
        self.comparison_enabled = true;
        self.results[Slot::B.index()] = Some(result);
        self.notify(Slot::B);
        Ok(())
    }

    /// B keeps its inputs but stops producing results.
    pub fn disable_comparison(&mut self) {
        self.comparison_enabled = false;
        self.results[Slot::B.index()] = None;
    }

    pub fn on_input_changed(&mut self, slot: Slot, field: ScenarioField) -> CalcResult<()> {
        self.mutate_with(slot, |scenario, library| field.apply(scenario, library))
    }

    /// Parse raw display text for `key`, then apply it.
    pub fn on_input_str(&mut self, slot: Slot, key: &str, raw: &str) -> CalcResult<()> {
        let field = ScenarioField::parse(key, raw).inspect_err(|err| {
            warn!(%slot, key, raw, error = %err, "unparseable input");
        })?;
        self.on_input_changed(slot, field)
    }

    pub fn set_assembly_type(&mut self, slot: Slot, kind: AssemblyKind) -> CalcResult<()> {
        self.on_input_changed(slot, ScenarioField::WallKind(kind))
    }

    pub fn apply_preset(&mut self, slot: Slot, preset: InsulationPreset) -> CalcResult<()> {
        self.mutate_with(slot, |scenario, _| {
            scenario.apply_preset(preset);
            Ok(())
        })
    }

    /// Change shape, dimensions or temperatures and recompute every active
    /// scenario. Rejected if any active scenario cannot be computed.
    pub fn set_shared(&mut self, field: SharedField) -> CalcResult<()> {
        let mut scratch = self.shared;
        field.apply(&mut scratch)?;

        let mut fresh = [None, None];
        for slot in Slot::ALL {
            if self.is_active(slot) {
                let result = compute_scenario(&scratch, self.scenario(slot), &self.library)
                    .inspect_err(|err| warn!(%slot, error = %err, "shared input rejected"))?;
                fresh[slot.index()] = Some(result);
            }
        }

        self.shared = scratch;
        for slot in Slot::ALL {
            if let Some(result) = fresh[slot.index()] {
                self.results[slot.index()] = Some(result);
                self.notify(slot);
            }
        }
        Ok(())
    }

    pub fn set_shared_str(&mut self, key: &str, raw: &str) -> CalcResult<()> {
        let field = SharedField::parse(key, raw, &self.shared)?;
        self.set_shared(field)
    }

    pub fn add_custom_source(&mut self, slot: Slot, draft: CustomSourceDraft) -> CalcResult<SourceId> {
        self.mutate_with(slot, |scenario, _| Ok(scenario.gains.add_custom_source(draft)?))
    }

    pub fn edit_custom_source(
        &mut self,
        slot: Slot,
        id: SourceId,
        field: SourceField,
    ) -> CalcResult<()> {
        self.mutate_with(slot, |scenario, _| Ok(scenario.gains.edit_custom_source(id, field)?))
    }

    pub fn remove_custom_source(&mut self, slot: Slot, id: SourceId) -> CalcResult<LoadSource> {
        self.mutate_with(slot, |scenario, _| Ok(scenario.gains.remove_custom_source(id)?))
    }

    pub fn move_custom_source(&mut self, slot: Slot, id: SourceId, index: usize) -> CalcResult<()> {
        self.mutate_with(slot, |scenario, _| {
            Ok(scenario.gains.move_custom_source(id, index)?)
        })
    }

    /// Queue an edit for the next [`flush`](Self::flush). The value is checked
    /// now, against the committed state plus everything already queued.
    pub fn queue_input(&mut self, slot: Slot, field: ScenarioField) -> CalcResult<()> {
        let key = field.key();
        let mut scratch = self.scenario(slot).clone();
        for pending in self.pending.for_slot(slot) {
            if pending.key() != key {
                pending.clone().apply(&mut scratch, &self.library)?;
            }
        }
        field.clone().apply(&mut scratch, &self.library)?;
        compute_scenario(&self.shared, &scratch, &self.library)
            .inspect_err(|err| warn!(%slot, key = %key, error = %err, "queued input rejected"))?;
        self.pending.push(slot, field);
        Ok(())
    }

    pub fn queue_input_str(&mut self, slot: Slot, key: &str, raw: &str) -> CalcResult<()> {
        let field = ScenarioField::parse(key, raw)?;
        self.queue_input(slot, field)
    }

    /// Apply queued edits, recomputing each touched scenario once.
    pub fn flush(&mut self) -> CalcResult<()> {
        let mut first_error = None;
        for slot in Slot::ALL {
            if self.pending.for_slot(slot).next().is_none() {
                continue;
            }
            if let Err(err) = self.mutate_with(slot, |_, _| Ok(())) {
                self.pending.take_slot(slot);
                first_error.get_or_insert(err);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    /// Write every dirty slot. Slots whose write failed stay dirty.
    pub fn persist_dirty(&mut self, store: &mut dyn ScenarioPersistence) -> Vec<(Slot, SaveStatus)> {
        let mut statuses = Vec::new();
        for slot in Slot::ALL {
            if !self.is_dirty(slot) {
                continue;
            }
            let status = store.save(slot, &ScenarioSnapshot::of(self.scenario(slot)));
            if status.is_saved() {
                self.dirty[slot.index()] = false;
            }
            statuses.push((slot, status));
        }
        statuses
    }

    /// Load both slots at startup. A stored record that no longer computes is
    /// skipped and the slot keeps its current inputs.
    pub fn restore(&mut self, store: &mut dyn ScenarioPersistence) -> Vec<Slot> {
        let mut restored = Vec::new();
        for slot in Slot::ALL {
            let Some(snapshot) = store.load(slot) else {
                continue;
            };
            let mut scratch = self.scenario(slot).clone();
            scratch.wall = snapshot.wall;
            scratch.gains.replace_custom_sources(snapshot.custom_sources);
            match compute_scenario(&self.shared, &scratch, &self.library) {
                Ok(result) => {
                    let i = slot.index();
                    self.scenarios[i] = scratch;
                    if self.is_active(slot) {
                        self.results[i] = Some(result);
                        self.notify(slot);
                    }
                    restored.push(slot);
                }
                Err(err) => warn!(%slot, error = %err, "stored scenario ignored"),
            }
        }
        restored
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::BuildingShape;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn comparison() -> Comparison {
        Comparison::new(MaterialLibrary::standard(), SharedInputs::default()).unwrap()
    }

    #[test]
    fn b_is_inert_until_enabled() {
        let mut c = comparison();
        assert!(c.result(Slot::A).is_some());
        assert!(c.result(Slot::B).is_none());

        c.on_input_changed(Slot::B, ScenarioField::RoofR(60.0)).unwrap();
        assert!(c.result(Slot::B).is_none());

        c.enable_comparison().unwrap();
        assert_eq!(c.result(Slot::B).unwrap().roof_r, 60.0);

        c.disable_comparison();
        assert!(c.result(Slot::B).is_none());
        c.enable_comparison().unwrap();
        assert_eq!(c.result(Slot::B).unwrap().roof_r, 60.0);
    }

    #[test]
    fn rejected_input_keeps_state_and_result() {
        let mut c = comparison();
        let before_state = c.scenario(Slot::A).clone();
        let before_result = *c.result(Slot::A).unwrap();

        let err = c.on_input_str(Slot::A, "window_area", "-3").unwrap_err();
        assert!(matches!(err, ScenarioError::InvalidInput { .. }));
        assert!(c.on_input_str(Slot::A, "cavity_material", "Unobtainium").is_err());

        assert_eq!(c.scenario(Slot::A), &before_state);
        assert_eq!(c.result(Slot::A), Some(&before_result));
        assert!(!c.is_dirty(Slot::A));
    }

    #[test]
    fn switching_wall_type_keeps_inactive_inputs() {
        let mut c = comparison();
        c.on_input_changed(Slot::A, ScenarioField::MassThickness(12.0)).unwrap();
        let stick_r = c.result(Slot::A).unwrap().wall_r;

        c.set_assembly_type(Slot::A, AssemblyKind::Mass).unwrap();
        let mass_r = c.result(Slot::A).unwrap().wall_r;
        assert!((mass_r - 1.1 * 12.0).abs() < 1e-9);

        c.set_assembly_type(Slot::A, AssemblyKind::Stick).unwrap();
        assert!((c.result(Slot::A).unwrap().wall_r - stick_r).abs() < 1e-12);
        assert_eq!(c.scenario(Slot::A).wall.mass.thickness_in, 12.0);
    }

    #[test]
    fn observers_see_every_commit() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut c = comparison();
        c.subscribe(Box::new(move |slot: Slot, r: &ScenarioResult| {
            sink.borrow_mut().push((slot, r.envelope.total));
        }));

        c.on_input_changed(Slot::A, ScenarioField::WindowArea(20.0)).unwrap();
        c.enable_comparison().unwrap();
        let _ = c.on_input_changed(Slot::A, ScenarioField::WindowArea(-1.0));
        c.set_shared(SharedField::OutdoorTemp(0.0)).unwrap();

        let seen = seen.borrow();
        let slots: Vec<_> = seen.iter().map(|(s, _)| *s).collect();
        assert_eq!(slots, [Slot::A, Slot::B, Slot::A, Slot::B]);
    }

    #[test]
    fn shared_change_rejected_when_unusable() {
        let mut c = comparison();
        assert!(c.set_shared(SharedField::Width(f64::NAN)).is_err());
        assert_eq!(c.shared().shape, BuildingShape::default());
    }

    #[test]
    fn flush_matches_sequential_application() {
        let mut queued = comparison();
        let mut direct = comparison();

        queued.queue_input(Slot::A, ScenarioField::WindowArea(10.0)).unwrap();
        queued.queue_input(Slot::A, ScenarioField::DoorArea(21.0)).unwrap();
        queued.queue_input(Slot::A, ScenarioField::WindowArea(35.0)).unwrap();
        assert!(queued.queue_input(Slot::A, ScenarioField::DoorU(-1.0)).is_err());
        assert!(queued.has_pending());
        queued.flush().unwrap();
        assert!(!queued.has_pending());

        direct.on_input_changed(Slot::A, ScenarioField::DoorArea(21.0)).unwrap();
        direct.on_input_changed(Slot::A, ScenarioField::WindowArea(35.0)).unwrap();

        assert_eq!(queued.scenario(Slot::A), direct.scenario(Slot::A));
        assert_eq!(queued.result(Slot::A), direct.result(Slot::A));
    }

    #[test]
    fn direct_edit_supersedes_older_queued_value() {
        let mut mixed = comparison();
        let mut direct = comparison();

        mixed.queue_input(Slot::A, ScenarioField::WindowArea(10.0)).unwrap();
        mixed.queue_input(Slot::A, ScenarioField::DoorArea(21.0)).unwrap();
        mixed.on_input_changed(Slot::A, ScenarioField::WindowArea(20.0)).unwrap();
        assert!(!mixed.has_pending());
        mixed.flush().unwrap();

        direct.on_input_changed(Slot::A, ScenarioField::WindowArea(10.0)).unwrap();
        direct.on_input_changed(Slot::A, ScenarioField::DoorArea(21.0)).unwrap();
        direct.on_input_changed(Slot::A, ScenarioField::WindowArea(20.0)).unwrap();

        assert_eq!(mixed.scenario(Slot::A).windows.area_ft2, 20.0);
        assert_eq!(mixed.scenario(Slot::A), direct.scenario(Slot::A));
        assert_eq!(mixed.result(Slot::A), direct.result(Slot::A));
    }

    #[test]
    fn preset_overrides_older_queued_roof() {
        let mut c = comparison();
        c.queue_input(Slot::A, ScenarioField::RoofR(55.0)).unwrap();
        c.queue_input(Slot::B, ScenarioField::RoofR(55.0)).unwrap();
        c.apply_preset(Slot::A, InsulationPreset::Uninsulated).unwrap();
        c.flush().unwrap();
        c.enable_comparison().unwrap();

        assert_eq!(c.result(Slot::A).unwrap().roof_r, 4.0);
        assert_eq!(c.result(Slot::B).unwrap().roof_r, 55.0);
    }

    #[test]
    fn custom_source_edit_keeps_queued_fields_applied() {
        let mut c = comparison();
        c.queue_input(Slot::A, ScenarioField::DoorArea(21.0)).unwrap();
        c.add_custom_source(Slot::A, CustomSourceDraft::default()).unwrap();
        assert!(!c.has_pending());
        assert_eq!(c.scenario(Slot::A).doors.area_ft2, 21.0);
    }

    #[test]
    fn rejected_direct_edit_keeps_queue() {
        let mut c = comparison();
        c.queue_input(Slot::A, ScenarioField::WindowArea(12.0)).unwrap();
        assert!(c.on_input_changed(Slot::A, ScenarioField::DoorU(-1.0)).is_err());
        assert!(c.has_pending());
        c.flush().unwrap();
        assert_eq!(c.scenario(Slot::A).windows.area_ft2, 12.0);
    }

    #[test]
    fn loss_curve_passes_through_the_design_point() {
        let c = comparison();
        let result = c.result(Slot::A).unwrap();
        let points = c.loss_curve(Slot::A).unwrap();
        assert_eq!(points.first().unwrap().outdoor_f, 0.0);
        assert_eq!(points.last().unwrap().outdoor_f, 80.0);

        let design = points.iter().find(|p| p.outdoor_f == 20.0).unwrap();
        assert!((design.total - result.envelope.total).abs() < 1e-9);

        // At or above indoor only the floor still loses heat.
        let floor_only = result.envelope.floor * (1.0 + c.scenario(Slot::A).air_sealing.penalty());
        for point in points.iter().filter(|p| p.outdoor_f >= 70.0) {
            assert!((point.total - floor_only).abs() < 1e-9, "{point:?}");
        }
    }

    #[test]
    fn flush_recomputes_each_slot_once() {
        let count = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&count);
        let mut c = comparison();
        c.subscribe(Box::new(move |_: Slot, _: &ScenarioResult| *sink.borrow_mut() += 1));
        for area in [5.0, 6.0, 7.0, 8.0] {
            c.queue_input(Slot::A, ScenarioField::WindowArea(area)).unwrap();
        }
        assert_eq!(*count.borrow(), 0);
        c.flush().unwrap();
        assert_eq!(*count.borrow(), 1);
        assert_eq!(c.scenario(Slot::A).windows.area_ft2, 8.0);
    }

    #[test]
    fn preset_then_custom_sources() {
        let mut c = comparison();
        c.apply_preset(Slot::A, InsulationPreset::Uninsulated).unwrap();
        assert_eq!(c.result(Slot::A).unwrap().roof_r, 4.0);

        let id = c.add_custom_source(Slot::A, CustomSourceDraft::default()).unwrap();
        assert!((c.result(Slot::A).unwrap().gains.total - 597.1).abs() < 1e-9);
        c.edit_custom_source(Slot::A, id, SourceField::Watts(200.0)).unwrap();
        assert_eq!(c.result(Slot::A).unwrap().gains.total.round(), 938.0);
        c.remove_custom_source(Slot::A, id).unwrap();
        assert!(c.remove_custom_source(Slot::A, id).is_err());
        assert!((c.result(Slot::A).unwrap().gains.total - 255.9).abs() < 1e-9);
    }

    #[test]
    fn slot_parse() {
        assert_eq!("B".parse::<Slot>().unwrap(), Slot::B);
        assert!("c".parse::<Slot>().is_err());
    }
}
