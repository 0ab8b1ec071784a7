//! Log line rendering.
//!
//! Line text and field order are consumed by existing oink report parsers, so
//! everything here is byte-exact.

/// Fixed marker closing every request's report.
pub const COMPLETE_MARKER: &str = "Oink Log Entry Complete";

/// Separator between segments of one line.
pub const SEGMENT_SEPARATOR: &str = " | ";

/// Render `label: count` entries ordered by count, highest first.
///
/// Equal counts keep their input order (`sort_by` is stable), which keeps
/// output deterministic for a given insertion order.
pub fn sorted_counts<L: AsRef<str>>(counts: &[(L, u64)]) -> Vec<String> {
    let mut ordered: Vec<&(L, u64)> = counts.iter().collect();
    ordered.sort_by(|a, b| b.1.cmp(&a.1));
    ordered
        .into_iter()
        .map(|(label, count)| {
            let label: &str = label.as_ref();
            format!("{label}: {count}")
        })
        .collect()
}

pub fn action_line(descriptor: &str) -> String {
    format!("Oink Action: {descriptor}")
}

pub fn memory_line(memory: u64, pid: u32) -> String {
    format!("Memory usage: {memory}{SEGMENT_SEPARATOR}PID: {pid}")
}

/// `Instantiation Breakdown: Total: N | Label: n | ...`
pub fn breakdown_line<L: AsRef<str>>(total: u64, counts: &[(L, u64)]) -> String {
    let mut segments = Vec::with_capacity(counts.len() + 1);
    segments.push(format!("Total: {total}"));
    segments.extend(sorted_counts(counts));
    format!("Instantiation Breakdown: {}", segments.join(SEGMENT_SEPARATOR))
}
