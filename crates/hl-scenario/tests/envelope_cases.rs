//! Whole-building cases checked by hand.

use hl_assembly::AssemblyKind;
use hl_catalog::{MaterialLibrary, StudMaterial, StudSize};
use hl_scenario::{
    AirSealing, BuildingShape, Comparison, DesignConditions, ScenarioField, SharedInputs, Slot,
};

fn flat_box() -> SharedInputs {
    SharedInputs {
        shape: BuildingShape::Rectangle {
            length_ft: 20.0,
            width_ft: 10.0,
            height_ft: 10.0,
            roof_pitch: 0.0,
        },
        conditions: DesignConditions {
            indoor_f: 70.0,
            outdoor_f: 20.0,
            ground_f: 50.0,
        },
    }
}

/// R-10 everywhere: an 8 in softwood log wall and R-10 roof and floor.
fn r10_everywhere(c: &mut Comparison, slot: Slot) {
    for field in [
        ScenarioField::MassMaterial("Log (Softwood)".into()),
        ScenarioField::MassThickness(8.0),
        ScenarioField::MassContinuousR(0.0),
        ScenarioField::WallKind(AssemblyKind::Mass),
        ScenarioField::RoofR(10.0),
        ScenarioField::FloorR(10.0),
    ] {
        c.on_input_changed(slot, field).unwrap();
    }
}

fn setup() -> Comparison {
    let mut c = Comparison::new(MaterialLibrary::standard(), flat_box()).unwrap();
    r10_everywhere(&mut c, Slot::A);
    r10_everywhere(&mut c, Slot::B);
    c
}

#[test]
fn r10_box_loses_4400() {
    let c = setup();
    let r = c.result(Slot::A).unwrap();
    assert!((r.wall_r - 10.0).abs() < 1e-9);
    assert!((r.envelope.wall - 3000.0).abs() < 1e-6);
    assert!((r.envelope.roof - 1000.0).abs() < 1e-6);
    assert!((r.envelope.floor - 400.0).abs() < 1e-6);
    assert!((r.envelope.total - 4400.0).abs() < 1e-6);
    assert!((r.envelope.ua - 80.0).abs() < 1e-9);
    assert!((r.envelope.ua_floor - 20.0).abs() < 1e-9);
}

#[test]
fn window_comes_out_of_the_wall() {
    let mut c = setup();
    c.on_input_changed(Slot::A, ScenarioField::WindowArea(50.0)).unwrap();
    c.on_input_changed(Slot::A, ScenarioField::WindowU(0.5)).unwrap();
    let r = c.result(Slot::A).unwrap();
    assert!((r.envelope.wall - 2750.0).abs() < 1e-6);
    assert!((r.envelope.windows - 1250.0).abs() < 1e-6);
    assert!((r.envelope.net_wall_area - 550.0).abs() < 1e-9);
}

#[test]
fn scenario_b_with_better_wall() {
    let mut c = setup();
    c.enable_comparison().unwrap();
    c.on_input_changed(Slot::B, ScenarioField::MassContinuousR(10.0)).unwrap();
    assert!((c.result(Slot::B).unwrap().envelope.total - 2900.0).abs() < 1e-6);
    assert!((c.result(Slot::A).unwrap().envelope.total - 4400.0).abs() < 1e-6);
}

#[test]
fn poor_sealing_adds_a_quarter() {
    let mut c = setup();
    c.on_input_str(Slot::A, "air_sealing", "poor").unwrap();
    let r = c.result(Slot::A).unwrap();
    assert!((r.envelope.infiltration - 1100.0).abs() < 1e-6);
    assert!((r.envelope.total - 5500.0).abs() < 1e-6);
    assert!((r.envelope.ua - 100.0).abs() < 1e-9);
    assert_eq!(c.scenario(Slot::A).air_sealing, AirSealing::Poor);
}

#[test]
fn steel_studs_lose_more_than_wood() {
    let mut c = Comparison::new(MaterialLibrary::standard(), flat_box()).unwrap();
    c.enable_comparison().unwrap();
    for slot in Slot::ALL {
        c.on_input_changed(slot, ScenarioField::StudSize(StudSize::TwoBySix))
            .unwrap();
        c.on_input_str(slot, "cavity_material", "Fiberglass Batt")
            .unwrap();
        c.on_input_str(slot, "stick_continuous_r", "0").unwrap();
    }
    c.on_input_changed(Slot::B, ScenarioField::StudMaterial(StudMaterial::Steel))
        .unwrap();

    let wood = c.result(Slot::A).unwrap();
    let steel = c.result(Slot::B).unwrap();
    assert!(steel.wall_r < wood.wall_r);
    assert!(steel.envelope.total > wood.envelope.total);
}

#[test]
fn warm_outdoors_means_no_air_side_loss() {
    let mut c = setup();
    c.set_shared_str("outdoor_temp", "80").unwrap();
    let r = c.result(Slot::A).unwrap();
    assert_eq!(r.envelope.wall, 0.0);
    assert_eq!(r.envelope.roof, 0.0);
    assert!((r.envelope.total - 400.0).abs() < 1e-6);
}
