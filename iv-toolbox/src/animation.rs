// Animation mode: per-row rule matching for rotation/visibility animations
// and applyAfter attachment references.
//
// Precedence is fixed: control-surface substrings, then door prefixes, then
// the window prefix, then a bare applyAfter. The control table is an ordered
// slice on purpose; several keys are substrings of each other and the first
// hit must stay reproducible.

use serde::Serialize;

use crate::error::Result;
use crate::names::{order_key, parse_name};
use crate::rows::{RowKind, parse_rows};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Animation {
    pub animation_type: &'static str,
    pub variable: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub center_point: Option<[f64; 3]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub axis: Option<[f64; 3]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forwards_easing: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reverse_easing: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forwards_start_sound: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reverse_start_sound: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reverse_end_sound: Option<&'static str>,
}

impl Animation {
    fn visibility(variable: &'static str) -> Self {
        Animation {
            animation_type: "visibility",
            variable: variable.to_string(),
            center_point: None,
            axis: None,
            duration: None,
            forwards_easing: None,
            reverse_easing: None,
            forwards_start_sound: None,
            reverse_start_sound: None,
            reverse_end_sound: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationEntry {
    pub object_name: String,
    pub animations: Vec<Animation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apply_after: Option<String>,
}

/// Open/close timing shared by the slower hinged rules.
struct Timing {
    duration: u32,
    forwards_easing: &'static str,
    reverse_easing: &'static str,
    forwards_start_sound: &'static str,
    reverse_start_sound: Option<&'static str>,
    reverse_end_sound: Option<&'static str>,
}

/// Fixed recipe for a control surface matched by name substring.
struct ControlRule {
    key: &'static str,
    variable: &'static str,
    axis: [f64; 3],
    timing: Option<Timing>,
    /// Visibility gate prepended before the rotation (clutch pedals vanish
    /// in automatics).
    gate_variable: Option<&'static str>,
}

const BOOT_TIMING: Timing = Timing {
    duration: 15,
    forwards_easing: "easeoutquint",
    reverse_easing: "easeincubic",
    forwards_start_sound: "iv_tpp:bootopen",
    reverse_start_sound: None,
    reverse_end_sound: Some("iv_tpp:bootclose"),
};

const HOOD_TIMING: Timing = Timing {
    duration: 25,
    forwards_easing: "easeoutquint",
    reverse_easing: "easeincubic",
    forwards_start_sound: "iv_tpp:hoodopen",
    reverse_start_sound: Some("iv_tpp:hoodclose"),
    reverse_end_sound: None,
};

/// Substring-matched control rules, first match wins. The longer pedal_*
/// keys sit before their bare fallbacks.
const CONTROL_RULES: &[ControlRule] = &[
    ControlRule {
        key: "pedal_accel",
        variable: "throttle",
        axis: [-20.0, 0.0, 0.0],
        timing: None,
        gate_variable: None,
    },
    ControlRule {
        key: "gas",
        variable: "throttle",
        axis: [-20.0, 0.0, 0.0],
        timing: None,
        gate_variable: None,
    },
    ControlRule {
        key: "steer",
        variable: "rudder",
        axis: [0.0, 0.0, 1.0],
        timing: None,
        gate_variable: None,
    },
    ControlRule {
        key: "pedal_brake",
        variable: "brake",
        axis: [-20.0, 0.0, 0.0],
        timing: None,
        gate_variable: None,
    },
    ControlRule {
        key: "brake",
        variable: "brake",
        axis: [-20.0, 0.0, 0.0],
        timing: None,
        gate_variable: None,
    },
    ControlRule {
        key: "p_brake",
        variable: "p_brake",
        axis: [-30.0, 0.0, 0.0],
        timing: None,
        gate_variable: None,
    },
    ControlRule {
        key: "shifter",
        variable: "engine_gearshift_1",
        axis: [1.0, 0.0, 0.0],
        timing: None,
        gate_variable: None,
    },
    ControlRule {
        key: "shift",
        variable: "engine_gearshift_1",
        axis: [1.0, 0.0, 0.0],
        timing: None,
        gate_variable: None,
    },
    ControlRule {
        key: "door_boot",
        variable: "door_boot",
        axis: [-90.0, 0.0, 0.0],
        timing: Some(BOOT_TIMING),
        gate_variable: None,
    },
    ControlRule {
        key: "tailgate",
        variable: "door_boot",
        axis: [0.0, 90.0, 0.0],
        timing: Some(BOOT_TIMING),
        gate_variable: None,
    },
    ControlRule {
        key: "door_hood",
        variable: "door_hood",
        axis: [-90.0, 0.0, 0.0],
        timing: Some(HOOD_TIMING),
        gate_variable: None,
    },
    ControlRule {
        key: "pedal_clutch",
        variable: "clutch",
        axis: [-30.0, 0.0, 0.0],
        timing: None,
        gate_variable: Some("engine_isautomatic_1"),
    },
    ControlRule {
        key: "clutch",
        variable: "clutch",
        axis: [-30.0, 0.0, 0.0],
        timing: None,
        gate_variable: Some("engine_isautomatic_1"),
    },
];

const DOOR_PREFIXES: &[&str] = &["doorF", "doorR", "door", "door_f", "door_r", "door_"];
const WINDOW_PREFIX: &str = "window_";

/// Builds animation entries from pasted toolbox rows, ordered by declared
/// order then appearance.
pub fn animation_entries(text: &str) -> Result<Vec<AnimationEntry>> {
    let mut out: Vec<(Option<u32>, usize, AnimationEntry)> = Vec::new();

    for (appearance, row) in parse_rows(text, RowKind::Placed)?.into_iter().enumerate() {
        let (order, name) = parse_name(&row.name);
        out.push((order, appearance, entry_for(&name, row.pos)));
    }

    out.sort_by_key(|(order, appearance, _)| order_key(*order, *appearance));
    Ok(out.into_iter().map(|(_, _, entry)| entry).collect())
}

fn entry_for(name: &str, center: [f64; 3]) -> AnimationEntry {
    for rule in CONTROL_RULES {
        if name.contains(rule.key) {
            return control_entry(name, rule, center);
        }
    }

    if is_door_name(name) {
        if underscore_segments(name) >= 3 {
            // Handles and trim ride on the door itself.
            return attachment(name, door_root(name));
        }
        return AnimationEntry {
            object_name: name.to_string(),
            animations: vec![door_rotation(name, center)],
            apply_after: None,
        };
    }

    if let Some(rest) = name.strip_prefix(WINDOW_PREFIX) {
        let target = if is_door_name(rest) && underscore_segments(rest) >= 3 {
            door_root(rest)
        } else {
            rest.to_string()
        };
        return attachment(name, target);
    }

    attachment(name, name.to_string())
}

fn control_entry(name: &str, rule: &ControlRule, center: [f64; 3]) -> AnimationEntry {
    let mut rotation = Animation {
        animation_type: "rotation",
        variable: rule.variable.to_string(),
        center_point: Some(center),
        axis: Some(rule.axis),
        duration: None,
        forwards_easing: None,
        reverse_easing: None,
        forwards_start_sound: None,
        reverse_start_sound: None,
        reverse_end_sound: None,
    };
    if let Some(timing) = &rule.timing {
        rotation.duration = Some(timing.duration);
        rotation.forwards_easing = Some(timing.forwards_easing);
        rotation.reverse_easing = Some(timing.reverse_easing);
        rotation.forwards_start_sound = Some(timing.forwards_start_sound);
        rotation.reverse_start_sound = timing.reverse_start_sound;
        rotation.reverse_end_sound = timing.reverse_end_sound;
    }

    let mut animations = Vec::with_capacity(2);
    if let Some(gate) = rule.gate_variable {
        animations.push(Animation::visibility(gate));
    }
    animations.push(rotation);

    AnimationEntry {
        object_name: name.to_string(),
        animations,
        apply_after: None,
    }
}

fn door_rotation(name: &str, center: [f64; 3]) -> Animation {
    // Hinge side comes from the trailing position code: "fl"/"rl" open left.
    let left = name.chars().rev().take(2).any(|c| c == 'l');
    Animation {
        animation_type: "rotation",
        variable: name.to_lowercase(),
        center_point: Some(center),
        axis: Some(if left {
            [0.0, -60.0, 0.0]
        } else {
            [0.0, 60.0, 0.0]
        }),
        duration: Some(15),
        forwards_easing: Some("easeoutback"),
        reverse_easing: Some("easeincubic"),
        forwards_start_sound: Some("iv_tpp:dooropen"),
        reverse_start_sound: None,
        reverse_end_sound: Some("iv_tpp:doorclose"),
    }
}

fn attachment(name: &str, target: String) -> AnimationEntry {
    AnimationEntry {
        object_name: name.to_string(),
        animations: Vec::new(),
        apply_after: Some(target),
    }
}

fn is_door_name(name: &str) -> bool {
    DOOR_PREFIXES.iter().any(|p| name.starts_with(p))
}

fn underscore_segments(name: &str) -> usize {
    name.split('_').count()
}

/// First two underscore segments: the door a sub-part or window belongs to.
fn door_root(name: &str) -> String {
    let mut segments = name.split('_');
    match (segments.next(), segments.next()) {
        (Some(a), Some(b)) => format!("{a}_{b}"),
        _ => name.to_string(),
    }
}
