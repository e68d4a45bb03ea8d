//! Text rendering of the state vector.

/// Render cell values as a single-line frame: `[ ]` for dead, `[*]` for
/// alive, concatenated in index order.
pub fn frame(cells: &[u8]) -> String {
    let mut out = String::with_capacity(cells.len() * 3);
    for &value in cells {
        out.push_str(if value == 0 { "[ ]" } else { "[*]" });
    }
    out
}
