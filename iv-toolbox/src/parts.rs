// Part mode: one part definition slot per row.

use serde::Serialize;

use crate::error::Result;
use crate::names::{order_key, parse_name};
use crate::rows::{RowKind, parse_rows};

/// Rotations (and rotation-is-zero checks) tolerate this much float noise.
const ROT_EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    pub pos: [f64; 3],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rot: Option<[f64; 3]>,
    pub max_value: f64,
    pub types: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_mirrored: Option<bool>,
}

/// Builds part slots from pasted toolbox rows. The name is a comma-separated
/// list of accepted part types; `rot` is omitted when the object sits
/// unrotated, and wheels rotated a half turn are marked mirrored.
pub fn parts(text: &str) -> Result<Vec<Part>> {
    let mut out: Vec<(Option<u32>, usize, Part)> = Vec::new();

    for (appearance, row) in parse_rows(text, RowKind::Rotated)?.into_iter().enumerate() {
        let (order, name) = parse_name(&row.name);
        let [rot_z, rot_y, rot_x] = row.rot.unwrap_or_default();
        let rot = [-rot_x, rot_y, rot_z];
        let rotated = rot.iter().any(|c| c.abs() > ROT_EPSILON);

        let types: Vec<String> = name.split(',').map(|t| t.trim().to_string()).collect();
        let mirrored =
            types.iter().any(|t| t == "ground_wheel") && rot.iter().copied().any(is_half_turn);

        out.push((
            order,
            appearance,
            Part {
                pos: row.pos,
                rot: rotated.then_some(rot),
                max_value: row.dims[0].max(row.dims[1]).max(row.dims[2]),
                types,
                is_mirrored: mirrored.then_some(true),
            },
        ));
    }

    out.sort_by_key(|(order, appearance, _)| order_key(*order, *appearance));
    Ok(out.into_iter().map(|(_, _, part)| part).collect())
}

/// 180 degrees modulo full turns, within float noise.
fn is_half_turn(deg: f64) -> bool {
    (deg.rem_euclid(360.0) - 180.0).abs() < ROT_EPSILON
}
