use rand::SeedableRng;
use rand::rngs::StdRng;
use serde_json::{Value, json};

use super::bodyroll::add_visibility;
use super::damage::add_totaled_animations;
use super::tow::{TowOutcome, add_flatbed};
use super::upholstery::convert_materials;

fn rng() -> StdRng {
    StdRng::seed_from_u64(7)
}

#[test]
fn bodyroll_gains_engine_gate() {
    let mut data = json!({
        "variableModifiers": [
            {
                "variable": "flBodyroll",
                "animations": [
                    {"animationType": "translation", "variable": "road_roll"}
                ]
            },
            {
                "variable": "suspension_height",
                "animations": []
            }
        ]
    });

    assert!(add_visibility(&mut data));

    let animations = data["variableModifiers"][0]["animations"].as_array().unwrap();
    assert_eq!(animations.len(), 2);
    assert_eq!(
        animations[1],
        json!({
            "animationType": "visibility",
            "variable": "engine_running_1",
            "clampMin": 1.0,
            "clampMax": 1.0,
        })
    );
    // The non-bodyroll modifier is left alone.
    assert!(data["variableModifiers"][1]["animations"].as_array().unwrap().is_empty());

    // Second run is a no-op.
    assert!(!add_visibility(&mut data));
}

#[test]
fn bodyroll_needs_modifier_list() {
    let mut data = json!({"rendering": {}});
    assert!(!add_visibility(&mut data));
}

#[test]
fn tow_flatbed_derived_from_wheel_and_bumper() {
    let mut data = json!({
        "connectionGroups": [
            {"groupName": "TRAILER", "connections": []},
            {
                "groupName": "HOOKUP",
                "connections": [
                    {"type": "tow_wheel", "pos": [0.5, -0.75, 1.0]},
                    {"type": "tow_wheel", "pos": [0.5, -0.25, 1.0]},
                    {"type": "tow_wheel_heavy", "pos": [0.5, -9.0, 1.0]},
                    {"type": "tow_bumper", "pos": [0.0, 0.0, 2.5]},
                    {"type": "tow_bumper", "pos": [0.0, 0.0, 3.25]},
                    {"type": "tow_bumper_heavy", "pos": [0.0, 0.0, 9.0]}
                ]
            }
        ]
    });

    assert_eq!(add_flatbed(&mut data), TowOutcome::Added);

    let connections = data["connectionGroups"][1]["connections"].as_array().unwrap();
    assert_eq!(
        *connections.last().unwrap(),
        json!({"type": "tow_flatbed", "pos": [0.0, -0.75, 3.25], "distance": 2.0})
    );

    assert_eq!(add_flatbed(&mut data), TowOutcome::AlreadyPresent);
}

#[test]
fn tow_flatbed_skip_reasons() {
    let mut data = json!({"connectionGroups": [{"groupName": "TRAILER"}]});
    assert_eq!(add_flatbed(&mut data), TowOutcome::NoHookupGroup);

    let mut data = json!({
        "connectionGroups": [
            {"groupName": "HOOKUP", "connections": [
                {"type": "tow_bumper", "pos": [0.0, 0.0, 2.0]}
            ]}
        ]
    });
    assert_eq!(add_flatbed(&mut data), TowOutcome::NoTowWheel);

    let mut data = json!({
        "connectionGroups": [
            {"groupName": "HOOKUP", "connections": [
                {"type": "tow_wheel", "pos": [0.0, -1.0, 2.0]}
            ]}
        ]
    });
    assert_eq!(add_flatbed(&mut data), TowOutcome::NoTowBumper);
}

#[test]
fn damage_animations_copy_valid_pivots() {
    let mut data = json!({
        "rendering": {
            "animatedObjects": [
                {
                    "objectName": "door_fl",
                    "animations": [
                        {
                            "animationType": "rotation",
                            "variable": "door_fl",
                            "centerPoint": [1.0, 0.5, -0.25]
                        },
                        {
                            "animationType": "visibility",
                            "variable": "engine_running_1"
                        }
                    ]
                }
            ]
        }
    });

    assert!(add_totaled_animations(&mut data, &mut rng()));

    let animations = data["rendering"]["animatedObjects"][0]["animations"]
        .as_array()
        .unwrap();
    // One addition: only the rotation had a usable pivot.
    assert_eq!(animations.len(), 3);
    let added = &animations[2];
    assert_eq!(added["variable"], "damage_totaled");
    assert_eq!(added["animationType"], "rotation");
    assert_eq!(added["centerPoint"], json!([1.0, 0.5, -0.25]));
    let axis = added["axis"].as_array().unwrap();
    assert_eq!(axis.len(), 3);
    for component in axis {
        let v = component.as_f64().unwrap();
        assert!((-10.0..10.0).contains(&v));
        // Rounded to three decimals.
        assert!(((v * 1000.0).round() - v * 1000.0).abs() < 1e-9);
    }
}

#[test]
fn damage_removes_stale_pivotless_entries() {
    let mut data = json!({
        "rendering": {
            "animatedObjects": [
                {
                    "objectName": "hood",
                    "animations": [
                        {"variable": "damage_totaled", "centerPoint": null},
                        {"variable": "damage_totaled", "centerPoint": [0.0, 1.0, 0.0]}
                    ]
                }
            ]
        }
    });

    assert!(add_totaled_animations(&mut data, &mut rng()));
    let animations = data["rendering"]["animatedObjects"][0]["animations"]
        .as_array()
        .unwrap();
    assert_eq!(animations.len(), 1);
    assert_eq!(animations[0]["centerPoint"], json!([0.0, 1.0, 0.0]));
}

#[test]
fn damage_accepts_object_pivots_and_rejects_short_ones() {
    let mut data = json!({
        "rendering": {
            "animatedObjects": [
                {
                    "objectName": "boot",
                    "animations": [
                        {"variable": "boot", "centerPoint": {"x": 1.0, "y": 2.0, "z": 3.0}},
                        {"variable": "boot_latch", "centerPoint": [1.0, 2.0]}
                    ]
                }
            ]
        }
    });

    assert!(add_totaled_animations(&mut data, &mut rng()));
    let animations = data["rendering"]["animatedObjects"][0]["animations"]
        .as_array()
        .unwrap();
    assert_eq!(animations.len(), 3);
    assert_eq!(animations[2]["centerPoint"], json!({"x": 1.0, "y": 2.0, "z": 3.0}));
}

#[test]
fn upholstery_replaces_known_wool_sets() {
    let mut data = json!({
        "definitions": [
            {
                "extraMaterialLists": [
                    ["minecraft:wool:7:3", "minecraft:wool:8:2", "minecraft:planks:0:4"]
                ]
            }
        ]
    });

    assert!(convert_materials(&mut data));
    assert_eq!(
        data["definitions"][0]["extraMaterialLists"][0],
        json!(["minecraft:planks:0:4", "mts:iv_tpp.upholstery_pile_gray:0:3"])
    );

    // Already converted: nothing left to do.
    assert!(!convert_materials(&mut data));
}

#[test]
fn upholstery_leaves_unknown_combinations_alone() {
    let original = json!({
        "definitions": [
            {"extraMaterialLists": [["minecraft:wool:1:2", "minecraft:wool:2:2"]]}
        ]
    });
    let mut data = original.clone();
    assert!(!convert_materials(&mut data));
    assert_eq!(data, original);
}

#[test]
fn upholstery_sums_repeated_wool_entries() {
    // 4 + 1 red, 2 black: the {15, 14} set, 7 wool total, 4 piles.
    let mut data = json!({
        "definitions": [
            {"extraMaterialLists": [[
                "minecraft:wool:14:4",
                "minecraft:wool:14:1",
                "minecraft:wool:15:2"
            ]]}
        ]
    });
    assert!(convert_materials(&mut data));
    assert_eq!(
        data["definitions"][0]["extraMaterialLists"][0],
        json!(["mts:iv_tpp.upholstery_pile_red:0:4"])
    );
}

#[test]
fn patchers_ignore_foreign_documents() {
    let original = json!({"systemName": "engine_i6", "packID": "iv_tpp"});
    let mut data = original.clone();
    assert!(!add_visibility(&mut data));
    assert_eq!(add_flatbed(&mut data), TowOutcome::NoHookupGroup);
    assert!(!add_totaled_animations(&mut data, &mut rng()));
    assert!(!convert_materials(&mut data));
    assert_eq!(data, original);
}

#[test]
fn tow_positions_must_be_numeric_triples() {
    let mut data = json!({
        "connectionGroups": [
            {"groupName": "HOOKUP", "connections": [
                {"type": "tow_wheel", "pos": [0.0, "x", 2.0]},
                {"type": "tow_bumper", "pos": [0.0, 0.0, 2.0]}
            ]}
        ]
    });
    assert_eq!(add_flatbed(&mut data), TowOutcome::NoTowWheel);
}

#[test]
fn damage_does_not_touch_objects_without_animation_lists() {
    let mut data = json!({
        "rendering": {"animatedObjects": [{"objectName": "chassis"}]}
    });
    assert!(!add_totaled_animations(&mut data, &mut rng()));
}

// Seeded runs stay reproducible across invocations.
#[test]
fn damage_axes_are_deterministic_per_seed() {
    let doc = json!({
        "rendering": {
            "animatedObjects": [
                {"objectName": "a", "animations": [
                    {"variable": "a", "centerPoint": [0.0, 0.0, 0.0]}
                ]}
            ]
        }
    });
    let mut first = doc.clone();
    let mut second = doc.clone();
    add_totaled_animations(&mut first, &mut rng());
    add_totaled_animations(&mut second, &mut rng());
    assert_eq!(first, second);

    let mut other = doc.clone();
    add_totaled_animations(&mut other, &mut StdRng::seed_from_u64(8));
    assert_ne!(first, other);
}

#[test]
fn visibility_gate_keeps_snippet_shape() {
    // Guard the exact snippet shape: downstream packs string-match it.
    let mut data = json!({
        "variableModifiers": [
            {"variable": "rrBodyroll", "animations": []}
        ]
    });
    assert!(add_visibility(&mut data));
    let gate = &data["variableModifiers"][0]["animations"][0];
    let keys: Vec<&String> = gate.as_object().unwrap().keys().collect();
    assert_eq!(keys, ["animationType", "variable", "clampMin", "clampMax"]);
}

#[test]
fn material_lists_with_non_strings_are_skipped() {
    let mut data = json!({
        "definitions": [
            {"extraMaterialLists": [["minecraft:planks:0:4", 7]]}
        ]
    });
    assert!(!convert_materials(&mut data));
    assert_eq!(
        data["definitions"][0]["extraMaterialLists"][0],
        json!(["minecraft:planks:0:4", 7])
    );
}
