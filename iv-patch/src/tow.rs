// Fills in the tow_flatbed hookup connection older definitions are missing.
// Y comes from the first regular tow_wheel, Z from the rearmost tow_bumper;
// the *_heavy variants are a separate system and never contribute.

use serde_json::{Value, json};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TowOutcome {
    Added,
    NoHookupGroup,
    AlreadyPresent,
    NoTowWheel,
    NoTowBumper,
    NoConnections,
}

impl TowOutcome {
    pub fn reason(self) -> &'static str {
        match self {
            TowOutcome::Added => "added",
            TowOutcome::NoHookupGroup => "no HOOKUP group",
            TowOutcome::AlreadyPresent => "already has tow_flatbed",
            TowOutcome::NoTowWheel => "no non-heavy tow_wheel",
            TowOutcome::NoTowBumper => "no non-heavy tow_bumper",
            TowOutcome::NoConnections => "could not modify connections",
        }
    }
}

/// Derives and inserts a `tow_flatbed` connection into the HOOKUP group.
pub fn add_flatbed(data: &mut Value) -> TowOutcome {
    let Some(hookup) = find_hookup(data) else {
        return TowOutcome::NoHookupGroup;
    };
    if has_connection_type(hookup, "tow_flatbed") {
        return TowOutcome::AlreadyPresent;
    }

    let wheels = positions_of(hookup, "tow_wheel");
    let Some(wheel) = wheels.first() else {
        return TowOutcome::NoTowWheel;
    };
    let bumpers = positions_of(hookup, "tow_bumper");
    if bumpers.is_empty() {
        return TowOutcome::NoTowBumper;
    }

    let y = wheel[1];
    let z = bumpers.iter().map(|p| p[2]).fold(f64::NEG_INFINITY, f64::max);

    let Some(connections) = hookup.get_mut("connections").and_then(Value::as_array_mut) else {
        return TowOutcome::NoConnections;
    };
    connections.push(json!({
        "type": "tow_flatbed",
        "pos": [0.0, y, z],
        "distance": 2.0,
    }));
    TowOutcome::Added
}

fn find_hookup(data: &mut Value) -> Option<&mut Value> {
    data.get_mut("connectionGroups")?
        .as_array_mut()?
        .iter_mut()
        .find(|g| g.get("groupName").and_then(Value::as_str) == Some("HOOKUP"))
}

fn has_connection_type(hookup: &Value, conn_type: &str) -> bool {
    hookup
        .get("connections")
        .and_then(Value::as_array)
        .is_some_and(|conns| {
            conns
                .iter()
                .any(|c| c.get("type").and_then(Value::as_str) == Some(conn_type))
        })
}

/// Positions of every non-heavy connection of `conn_type` with a numeric
/// 3-element pos.
fn positions_of(hookup: &Value, conn_type: &str) -> Vec<[f64; 3]> {
    let Some(connections) = hookup.get("connections").and_then(Value::as_array) else {
        return Vec::new();
    };
    let mut out = Vec::new();
    for conn in connections {
        let Some(t) = conn.get("type").and_then(Value::as_str) else {
            continue;
        };
        if t.ends_with("_heavy") || t != conn_type {
            continue;
        }
        if let Some(pos) = conn.get("pos").and_then(Value::as_array)
            && pos.len() == 3
            && let Some(coords) = pos
                .iter()
                .map(Value::as_f64)
                .collect::<Option<Vec<f64>>>()
        {
            out.push([coords[0], coords[1], coords[2]]);
        }
    }
    out
}
