// Logical-row splitting and field extraction for pasted toolbox exports.
//
// Field layout per row (pipe-separated): 0..=2 tag/id/parent, 3 name,
// 6..=8 position x/y/z, 9..=11 dimensions, 12..=14 rotation z/y/x.
// Numbers come out of the export with a comma decimal separator.

use tracing::debug;

use crate::error::{ConvertError, Result};

/// Record tag the export puts first on every row. A physical line starting
/// with this opens a new logical row; any other line is a continuation of
/// the previous one (long names wrap when pasted).
pub const ROW_SENTINEL: &str = "Box|";

/// Export units per block: positions and dimensions are divided by this.
const SCALE: f64 = 16.0;

/// How much of a row a conversion mode needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    /// Name, position, and dimensions (hitbox and animation modes).
    Placed,
    /// Everything above plus the rotation triple (part mode).
    Rotated,
}

impl RowKind {
    fn min_fields(self) -> usize {
        match self {
            RowKind::Placed => 12,
            RowKind::Rotated => 15,
        }
    }
}

/// One usable row, already scaled to definition units.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    /// Object name, markers and all.
    pub name: String,
    /// Remapped to definition axes: `[z, -y, x] / 16`.
    pub pos: [f64; 3],
    /// Dimension triple in export order, divided by 16.
    pub dims: [f64; 3],
    /// `[rotZ, rotY, rotX]` in degrees, raw; only for [`RowKind::Rotated`].
    pub rot: Option<[f64; 3]>,
}

/// Splits pasted text into logical rows. Lines before the first sentinel are
/// discarded. Empty input yields an empty list, not an error.
pub fn normalize_rows(text: &str) -> Vec<String> {
    let mut rows: Vec<String> = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with(ROW_SENTINEL) {
            rows.push(line.to_string());
        } else if let Some(open) = rows.last_mut() {
            open.push_str(line);
        }
    }
    rows
}

/// Normalizes and extracts in one pass, dropping rows that are too short for
/// `kind`. The first bad numeric field aborts the whole batch.
pub fn parse_rows(text: &str, kind: RowKind) -> Result<Vec<RawRow>> {
    let mut out = Vec::new();
    for (index, row) in normalize_rows(text).iter().enumerate() {
        if let Some(parsed) = extract_fields(row, index, kind)? {
            out.push(parsed);
        }
    }
    Ok(out)
}

/// Parses one logical row. `Ok(None)` means the row had fewer fields than
/// `kind` needs (header lines, partial selections) and was skipped.
pub fn extract_fields(row: &str, index: usize, kind: RowKind) -> Result<Option<RawRow>> {
    let fields: Vec<&str> = row.split('|').collect();
    if fields.len() < kind.min_fields() {
        debug!(
            "row {}: {} fields, need {}, skipped",
            index + 1,
            fields.len(),
            kind.min_fields()
        );
        return Ok(None);
    }

    let x = parse_field(fields[6], index, "posX")?;
    let y = parse_field(fields[7], index, "posY")?;
    let z = parse_field(fields[8], index, "posZ")?;
    let dims = [
        parse_field(fields[9], index, "dim1")? / SCALE,
        parse_field(fields[10], index, "dim2")? / SCALE,
        parse_field(fields[11], index, "dim3")? / SCALE,
    ];
    let rot = match kind {
        RowKind::Rotated => Some([
            parse_field(fields[12], index, "rotZ")?,
            parse_field(fields[13], index, "rotY")?,
            parse_field(fields[14], index, "rotX")?,
        ]),
        RowKind::Placed => None,
    };

    Ok(Some(RawRow {
        name: fields[3].to_string(),
        pos: [z / SCALE, -y / SCALE, x / SCALE],
        dims,
        rot,
    }))
}

fn parse_field(raw: &str, row_index: usize, field: &'static str) -> Result<f64> {
    let normalized = raw.trim().replace(',', ".");
    normalized.parse::<f64>().map_err(|_| ConvertError::BadNumber {
        row: row_index + 1,
        field,
        value: raw.trim().to_string(),
    })
}
