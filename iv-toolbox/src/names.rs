// The `{N}` order-marker convention: a bracketed integer anywhere in an
// object name pins where its entry lands in the emitted list. Markers are
// modeling-tool metadata and never survive into output names.

/// Extracts the declared order (first marker wins) and the name with every
/// marker removed. Total: a name without markers yields `(None, name)`.
pub fn parse_name(raw: &str) -> (Option<u32>, String) {
    let mut order = None;
    let mut clean = String::with_capacity(raw.len());
    let mut rest = raw;

    while let Some(open) = rest.find('{') {
        let after = &rest[open + 1..];
        if let Some(close) = after.find('}')
            && let Ok(n) = after[..close].parse::<u32>()
        {
            clean.push_str(&rest[..open]);
            if order.is_none() {
                order = Some(n);
            }
            rest = &after[close + 1..];
            continue;
        }
        // Not a marker; keep the brace and carry on after it.
        clean.push_str(&rest[..=open]);
        rest = after;
    }
    clean.push_str(rest);

    (order, clean)
}

/// Declared-order sort key shared by all three modes: explicitly ordered
/// entries first (ascending), everything else by appearance.
pub fn order_key(order: Option<u32>, appearance: usize) -> (u32, usize) {
    (order.unwrap_or(u32::MAX), appearance)
}
