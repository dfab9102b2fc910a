// ── Manual-entry deduplication ──
//
// The manual-entries endpoint has been seen returning the same row more
// than once. Duplicates are collapsed here, and the count is logged so
// the upstream problem stays visible.

use std::collections::HashSet;

use tracing::warn;

use crate::model::ManualEntry;

/// Keep the first occurrence of each `entry_type-id-account_id-created_at` key.
pub fn dedupe_manual_entries(entries: Vec<ManualEntry>) -> Vec<ManualEntry> {
    let before = entries.len();
    let mut seen = HashSet::with_capacity(before);
    let kept: Vec<ManualEntry> = entries
        .into_iter()
        .filter(|e| seen.insert(e.dedupe_key()))
        .collect();

    let dropped = before - kept.len();
    if dropped > 0 {
        warn!(dropped, "dropped duplicate manual entries from backend payload");
    }
    kept
}
