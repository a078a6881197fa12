// Hitbox mode: rows grouped by cleaned name into collision groups.

use serde::Serialize;

use crate::error::Result;
use crate::names::{order_key, parse_name};
use crate::rows::{RowKind, parse_rows};

/// One axis-aligned box inside a collision group. Toggle groups stamp every
/// box with the game variable that switches it on.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Collision {
    pub pos: [f64; 3],
    pub width: f64,
    pub height: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variable_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variable_type: Option<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollisionGroup {
    pub collision_types: &'static [&'static str],
    pub collisions: Vec<Collision>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apply_after: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GroupKind {
    Static,
    Toggle,
}

/// Group behavior by name prefix, first match wins. Anything unmatched is a
/// toggle group with the full type set, which is what door and seat hitboxes
/// want and what the export mostly contains.
const GROUP_RULES: &[(&str, GroupKind, &[&str])] = &[
    (
        "static",
        GroupKind::Static,
        &["block", "entity", "vehicle", "attack", "bullet"],
    ),
    ("window", GroupKind::Toggle, &["bullet", "click"]),
];

const DEFAULT_TYPES: &[&str] = &["block", "entity", "vehicle", "attack", "bullet", "click"];

fn group_rule(name: &str) -> (GroupKind, &'static [&'static str]) {
    for (prefix, kind, types) in GROUP_RULES {
        if name.starts_with(prefix) {
            return (*kind, *types);
        }
    }
    (GroupKind::Toggle, DEFAULT_TYPES)
}

/// Builds collision groups from pasted toolbox rows. Groups are keyed by
/// cleaned name and ordered by declared order, then first appearance; a
/// group's declared order is the first marker any of its rows carries.
pub fn collision_groups(text: &str) -> Result<Vec<CollisionGroup>> {
    struct Pending {
        name: String,
        order: Option<u32>,
        appearance: usize,
        group: CollisionGroup,
    }

    let mut pending: Vec<Pending> = Vec::new();
    for row in parse_rows(text, RowKind::Placed)? {
        let (order, name) = parse_name(&row.name);
        let (kind, types) = group_rule(&name);
        let collision = Collision {
            pos: row.pos,
            width: row.dims[0].min(row.dims[2]),
            height: row.dims[1],
            variable_name: (kind == GroupKind::Toggle).then(|| name.clone()),
            variable_type: (kind == GroupKind::Toggle).then_some("toggle"),
        };

        if let Some(entry) = pending.iter_mut().find(|p| p.name == name) {
            entry.group.collisions.push(collision);
            if entry.order.is_none() {
                entry.order = order;
            }
        } else {
            let appearance = pending.len();
            pending.push(Pending {
                order,
                appearance,
                group: CollisionGroup {
                    collision_types: types,
                    collisions: vec![collision],
                    apply_after: (kind == GroupKind::Toggle).then(|| name.clone()),
                },
                name,
            });
        }
    }

    pending.sort_by_key(|p| order_key(p.order, p.appearance));
    Ok(pending.into_iter().map(|p| p.group).collect())
}
