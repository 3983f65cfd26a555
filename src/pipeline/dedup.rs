use crate::domain::EmployeeRecord;
use std::collections::HashSet;
use tracing::debug;

/// Keep the first record seen for each employee id. Records without an id
/// cannot be compared, so they all survive.
pub fn dedup_by_id(records: Vec<EmployeeRecord>) -> (Vec<EmployeeRecord>, usize) {
    let before = records.len();
    let mut seen = HashSet::new();
    let kept: Vec<EmployeeRecord> = records
        .into_iter()
        .filter(|record| match record.emp_id {
            Some(id) => seen.insert(id),
            None => true,
        })
        .collect();
    let removed = before - kept.len();
    if removed > 0 {
        debug!(removed, "Removed duplicate employee ids");
    }
    (kept, removed)
}
