// Swaps raw wool crafting materials for the pack's upholstery piles in skin
// definitions. The wool meta combination picks the pile color; two wool make
// one pile, rounded up.

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::warn;

/// Wool combinations and the pile color they map to. Compared as sets; order
/// inside the material list does not matter.
const WOOL_TO_UPHOLSTERY: &[(&[&str], &str)] = &[
    (&["minecraft:wool:7", "minecraft:wool:8"], "gray"),
    (&["minecraft:wool:4", "minecraft:wool:0"], "tan"),
    (&["minecraft:wool:7", "minecraft:wool:14"], "red"),
    (&["minecraft:wool:15", "minecraft:wool:14"], "red"),
    (&["minecraft:wool:8", "minecraft:wool:0"], "white"),
    (&["minecraft:wool:12", "minecraft:wool:7"], "brown"),
];

const UPHOLSTERY_PREFIX: &str = "mts:iv_tpp.upholstery_pile_";

/// Rewrites every `definitions[*].extraMaterialLists[*]` entry that spends
/// wool. Returns true when the document changed.
pub fn convert_materials(data: &mut Value) -> bool {
    let Some(definitions) = data.get_mut("definitions").and_then(Value::as_array_mut) else {
        return false;
    };

    let mut changed = false;
    for definition in definitions {
        let Some(lists) = definition
            .get_mut("extraMaterialLists")
            .and_then(Value::as_array_mut)
        else {
            continue;
        };
        for list in lists {
            let Some(materials) = material_strings(list) else {
                continue;
            };
            if let Some(updated) = update_material_list(&materials) {
                *list = Value::from(updated);
                changed = true;
            }
        }
    }
    changed
}

fn material_strings(list: &Value) -> Option<Vec<String>> {
    list.as_array()?
        .iter()
        .map(|v| v.as_str().map(str::to_string))
        .collect()
}

/// The wool-free list with one pile entry appended, or None when the list
/// spends no wool (or an unknown combination).
fn update_material_list(materials: &[String]) -> Option<Vec<String>> {
    let (color, count) = identify_upholstery(materials)?;
    let mut updated: Vec<String> = materials
        .iter()
        .filter(|m| !m.starts_with("minecraft:wool"))
        .cloned()
        .collect();
    updated.push(format!("{UPHOLSTERY_PREFIX}{color}:0:{count}"));
    Some(updated)
}

fn identify_upholstery(materials: &[String]) -> Option<(&'static str, u64)> {
    // namespace:item:meta:count, counts summed per wool meta.
    let mut wool_counts: BTreeMap<String, u64> = BTreeMap::new();
    for item in materials {
        let fields: Vec<&str> = item.split(':').collect();
        if fields.len() == 4
            && fields[0] == "minecraft"
            && fields[1] == "wool"
            && let Ok(count) = fields[3].parse::<u64>()
        {
            let key = format!("{}:{}:{}", fields[0], fields[1], fields[2]);
            *wool_counts.entry(key).or_default() += count;
        }
    }
    if wool_counts.is_empty() {
        return None;
    }

    let key_set: Vec<&str> = wool_counts.keys().map(String::as_str).collect();
    let Some(color) = WOOL_TO_UPHOLSTERY
        .iter()
        .find(|(keys, _)| set_eq(keys, &key_set))
        .map(|(_, color)| *color)
    else {
        warn!("unknown wool combination: {key_set:?}");
        return None;
    };

    let total: u64 = wool_counts.values().sum();
    Some((color, total.div_ceil(2)))
}

fn set_eq(expected: &[&str], actual: &[&str]) -> bool {
    expected.len() == actual.len() && expected.iter().all(|k| actual.contains(k))
}
