use serde_json::{Value, json};

/// Suspension modifiers that should only act while the engine runs.
const BODYROLL_VARIABLES: &[&str] = &["rlBodyroll", "rrBodyroll", "flBodyroll", "frBodyroll"];

/// Appends an engine_running visibility gate to every bodyroll variable
/// modifier that lacks one. Returns true when the document changed.
pub fn add_visibility(data: &mut Value) -> bool {
    let Some(modifiers) = data.get_mut("variableModifiers").and_then(Value::as_array_mut) else {
        return false;
    };

    let mut changed = false;
    for modifier in modifiers {
        let targeted = modifier
            .get("variable")
            .and_then(Value::as_str)
            .is_some_and(|v| BODYROLL_VARIABLES.contains(&v));
        if !targeted {
            continue;
        }
        let Some(animations) = modifier.get_mut("animations").and_then(Value::as_array_mut) else {
            continue;
        };
        let already_gated = animations
            .iter()
            .any(|a| a.get("animationType").and_then(Value::as_str) == Some("visibility"));
        if already_gated {
            continue;
        }
        animations.push(json!({
            "animationType": "visibility",
            "variable": "engine_running_1",
            "clampMin": 1.0,
            "clampMax": 1.0,
        }));
        changed = true;
    }
    changed
}
