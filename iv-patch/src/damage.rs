// Gives every animated object a "damage_totaled" rotation derived from its
// existing pivots, so totaled vehicles visibly crumple. Axes get a small
// random kick; the RNG comes from the caller so runs can be seeded.

use rand::Rng;
use serde_json::{Value, json};

/// Returns true when any object gained animations or had stale
/// pivot-less `damage_totaled` entries removed.
pub fn add_totaled_animations<R: Rng>(data: &mut Value, rng: &mut R) -> bool {
    let Some(objects) = data
        .get_mut("rendering")
        .and_then(|r| r.get_mut("animatedObjects"))
        .and_then(Value::as_array_mut)
    else {
        return false;
    };

    let mut changed = false;
    for object in objects {
        let Some(animations) = object.get_mut("animations").and_then(Value::as_array_mut) else {
            continue;
        };

        let has_totaled = animations
            .iter()
            .any(|a| a.get("variable").and_then(Value::as_str) == Some("damage_totaled"));
        if has_totaled {
            let before = animations.len();
            animations.retain(|a| {
                !(a.get("variable").and_then(Value::as_str) == Some("damage_totaled")
                    && a.get("centerPoint").is_some_and(Value::is_null))
            });
            changed |= animations.len() != before;
            continue;
        }

        let mut additions = Vec::new();
        for animation in animations.iter() {
            let Some(center) = animation.get("centerPoint") else {
                continue;
            };
            if !valid_center_point(center) {
                continue;
            }
            additions.push(json!({
                "animationType": "rotation",
                "variable": "damage_totaled",
                "centerPoint": center.clone(),
                "axis": [jitter(rng), jitter(rng), jitter(rng)],
            }));
        }
        if !additions.is_empty() {
            animations.extend(additions);
            changed = true;
        }
    }
    changed
}

/// A pivot is usable as either a populated coordinate array or a populated
/// coordinate object; nulls anywhere disqualify it.
fn valid_center_point(center: &Value) -> bool {
    match center {
        Value::Array(coords) => coords.len() >= 3 && coords.iter().all(|c| !c.is_null()),
        Value::Object(map) => !map.is_empty() && map.values().all(|c| !c.is_null()),
        _ => false,
    }
}

fn jitter<R: Rng>(rng: &mut R) -> f64 {
    let v: f64 = rng.gen_range(-10.0..10.0);
    (v * 1000.0).round() / 1000.0
}
