/// Label the legacy report format prepends to facility names.
const REPORT_PREFIX: &str = "total nursing wrkd - ";

/// Canonicalises a free-text facility name for comparison: lower-case, strip
/// everything outside `[a-z0-9]` and whitespace, collapse whitespace runs,
/// trim. Total and idempotent.
pub fn normalize_name(name: &str) -> String {
    let lowered = name.to_lowercase();
    let stripped: String = lowered
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace())
        .collect();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Extracts the normalized "core name" from a report facility cell, dropping
/// the leading worked-hours label when present.
pub fn report_core_name(report_name: &str) -> String {
    let lowered = report_name.to_lowercase();
    if lowered.starts_with(REPORT_PREFIX) {
        normalize_name(&lowered[REPORT_PREFIX.len()..])
    } else {
        normalize_name(&lowered)
    }
}
