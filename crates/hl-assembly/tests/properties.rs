//! Property tests for the assembly engine.

use hl_assembly::{LayeredAssembly, StickFrame, compute_effective_r, compute_stick_frame_r};
use hl_catalog::{
    MaterialCategory, MaterialLibrary, StudMaterial, StudSize, StudSpacing, WOOD_STUD_R_PER_INCH,
};
use proptest::prelude::*;

const LAYER_IDS: [&str; 8] = [
    "Fiberglass Batt",
    "Closed-Cell Spray Foam",
    "XPS Rigid Foam (0.5in)",
    "Polyiso Board (1in)",
    "Drywall (0.5in)",
    "Plywood",
    "Reflectix Bubble Foil",
    "Air Gap (0.75in)",
];

fn layer_strategy() -> impl Strategy<Value = (usize, f64)> {
    (0..LAYER_IDS.len(), 0.1f64..12.0)
}

fn build(layers: &[(usize, f64)]) -> LayeredAssembly {
    let lib = MaterialLibrary::standard();
    let mut stack = LayeredAssembly::new();
    for (idx, amount) in layers {
        stack.add_layer(&lib, LAYER_IDS[*idx], *amount).unwrap();
    }
    stack
}

fn cavity_fills() -> Vec<&'static hl_catalog::Material> {
    MaterialLibrary::standard().in_category(MaterialCategory::CavityFill)
}

proptest! {
    #[test]
    fn effective_r_ignores_layer_order(
        layers in prop::collection::vec(layer_strategy(), 1..8),
        moves in prop::collection::vec((0usize..8, 0usize..8), 0..10),
    ) {
        let lib = MaterialLibrary::standard();
        let original = build(&layers);
        let mut shuffled = original.clone();
        let n = shuffled.len();
        for (from, to) in moves {
            shuffled.move_layer(from % n, to % n).unwrap();
        }
        let a = compute_effective_r(&original, &lib).unwrap();
        let b = compute_effective_r(&shuffled, &lib).unwrap();
        prop_assert!((a - b).abs() <= 1e-9 * a.max(1.0));
    }

    #[test]
    fn reversed_stack_has_same_r(layers in prop::collection::vec(layer_strategy(), 1..8)) {
        let lib = MaterialLibrary::standard();
        let mut reversed = layers.clone();
        reversed.reverse();
        let a = compute_effective_r(&build(&layers), &lib).unwrap();
        let b = compute_effective_r(&build(&reversed), &lib).unwrap();
        prop_assert!((a - b).abs() <= 1e-9 * a.max(1.0));
    }

    /// More studs pull the framed layer toward the stud R: down when the
    /// cavity out-insulates the stud, up when it does not (an empty cavity).
    #[test]
    fn wood_spacing_moves_r_toward_stud_path(
        fill in 0usize..16,
        size in 0usize..3,
        continuous_r in 0.0f64..20.0,
    ) {
        let lib = MaterialLibrary::standard();
        let fills = cavity_fills();
        let material = fills[fill % fills.len()];
        let stud_size = StudSize::ALL[size];
        let frame = |spacing| StickFrame {
            stud_material: StudMaterial::Wood,
            stud_size,
            stud_spacing: spacing,
            cavity_material: material.id.to_string(),
            continuous_r,
        };
        let wide = compute_stick_frame_r(&frame(StudSpacing::Oc24), &lib).unwrap();
        let tight = compute_stick_frame_r(&frame(StudSpacing::Oc16), &lib).unwrap();

        let cavity_r = material.r_at_depth(stud_size.depth_in());
        let stud_r = stud_size.depth_in() * WOOD_STUD_R_PER_INCH;
        if cavity_r > stud_r {
            prop_assert!(tight < wide, "{}: {tight} vs {wide}", material.id);
        } else {
            prop_assert!(tight > wide, "{}: {tight} vs {wide}", material.id);
        }
    }

    #[test]
    fn steel_tighter_spacing_always_lowers_r(
        fill in 0usize..16,
        size in 0usize..3,
        continuous_r in 0.0f64..20.0,
    ) {
        let lib = MaterialLibrary::standard();
        let fills = cavity_fills();
        let frame = |spacing| StickFrame {
            stud_material: StudMaterial::Steel,
            stud_size: StudSize::ALL[size],
            stud_spacing: spacing,
            cavity_material: fills[fill % fills.len()].id.to_string(),
            continuous_r,
        };
        let wide = compute_stick_frame_r(&frame(StudSpacing::Oc24), &lib).unwrap();
        let tight = compute_stick_frame_r(&frame(StudSpacing::Oc16), &lib).unwrap();
        prop_assert!(tight < wide);
    }

    #[test]
    fn steel_never_beats_wood(size in 0usize..3, spacing in 0usize..2, fill in 0usize..16) {
        let lib = MaterialLibrary::standard();
        let fills = cavity_fills();
        let frame = |stud_material| StickFrame {
            stud_material,
            stud_size: StudSize::ALL[size],
            stud_spacing: StudSpacing::ALL[spacing],
            cavity_material: fills[fill % fills.len()].id.to_string(),
            continuous_r: 0.0,
        };
        let wood = compute_stick_frame_r(&frame(StudMaterial::Wood), &lib).unwrap();
        let steel = compute_stick_frame_r(&frame(StudMaterial::Steel), &lib).unwrap();
        prop_assert!(steel < wood);
    }
}
