//! Line formatting for the harness output. Reusable buffers, no per-line
//! allocation on the hot path.

use itoa::Buffer;

pub fn write_pick(
    compact: bool,
    msg_buf: &mut String,
    itoa_buf: &mut Buffer,
    seq: u64,
    value: i64,
) {
    msg_buf.clear();
    if compact {
        // 3|17
        msg_buf.push_str(itoa_buf.format(seq));
        msg_buf.push('|');
        msg_buf.push_str(itoa_buf.format(value));
    } else {
        // Pick (seq: 3) => 17
        msg_buf.push_str("Pick (seq: ");
        msg_buf.push_str(itoa_buf.format(seq));
        msg_buf.push_str(") => ");
        msg_buf.push_str(itoa_buf.format(value));
    }
    msg_buf.push('\n');
}

/// One row of the region table: `[lo, hi] => count (pp.t%)`.
pub fn write_region_row(
    msg_buf: &mut String,
    itoa_buf: &mut Buffer,
    lo: i64,
    hi: i64,
    count: u64,
    total: u64,
) {
    msg_buf.clear();
    msg_buf.push_str("  [");
    msg_buf.push_str(itoa_buf.format(lo));
    msg_buf.push_str(", ");
    msg_buf.push_str(itoa_buf.format(hi));
    msg_buf.push_str("] => ");
    msg_buf.push_str(itoa_buf.format(count));
    // Tenths of a percent, integer math only.
    let tenths = if total == 0 { 0 } else { count * 1000 / total };
    msg_buf.push_str(" (");
    msg_buf.push_str(itoa_buf.format(tenths / 10));
    msg_buf.push('.');
    msg_buf.push_str(itoa_buf.format(tenths % 10));
    msg_buf.push_str("%)\n");
}

/// Closing summary: pick count, extremes, and the mean in tenths.
pub fn write_summary(
    msg_buf: &mut String,
    itoa_buf: &mut Buffer,
    count: u64,
    min: i64,
    max: i64,
    mean_tenths: i64,
) {
    msg_buf.clear();
    msg_buf.push_str("Picks: ");
    msg_buf.push_str(itoa_buf.format(count));
    msg_buf.push_str(", min ");
    msg_buf.push_str(itoa_buf.format(min));
    msg_buf.push_str(", max ");
    msg_buf.push_str(itoa_buf.format(max));
    msg_buf.push_str(", mean ");
    if mean_tenths < 0 && mean_tenths / 10 == 0 {
        msg_buf.push('-');
    }
    msg_buf.push_str(itoa_buf.format(mean_tenths / 10));
    msg_buf.push('.');
    msg_buf.push_str(itoa_buf.format((mean_tenths % 10).abs()));
    msg_buf.push('\n');
}
