//! Shared helpers for unit tests.

use crate::{build_profile, ProfileInfo, TaskCategory, TaskRecord};

/// Builds a profile from `(id, parent_id, category, description, start_ms,
/// duration_ms)` rows. Panics on malformed input; tests own their fixtures.
pub(crate) fn profile_from(rows: &[(u64, u64, TaskCategory, &str, u64, u64)]) -> ProfileInfo {
    let records = records_from(rows);
    build_profile("test.trace".to_string(), records).expect("valid test trace")
}

pub(crate) fn records_from(
    rows: &[(u64, u64, TaskCategory, &str, u64, u64)],
) -> Vec<TaskRecord> {
    rows.iter()
        .map(
            |(id, parent_id, category, description, start_ms, duration_ms)| TaskRecord {
                thread_id: 1,
                id: *id,
                parent_id: *parent_id,
                category: *category,
                description: (*description).to_string(),
                start_time_ns: start_ms * 1_000_000,
                duration_ns: duration_ms * 1_000_000,
            },
        )
        .collect()
}
