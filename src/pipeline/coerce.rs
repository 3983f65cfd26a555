use crate::constants::MISSING_MARKERS;
use crate::domain::{EmployeeRecord, RawEmployeeRow};
use tracing::debug;

/// Counts of cells that looked like data but could not be coerced.
#[derive(Debug, Default, Clone, Copy)]
pub struct CoerceStats {
    pub emp_id_failures: usize,
    pub salary_failures: usize,
}

/// Trim a cell and collapse the common "missing" spellings to `None`.
fn normalize_cell(cell: &Option<String>) -> Option<&str> {
    let value = cell.as_deref()?.trim();
    if value.is_empty() {
        return None;
    }
    let lowered = value.to_ascii_lowercase();
    if MISSING_MARKERS.contains(&lowered.as_str()) {
        return None;
    }
    Some(value)
}

/// Parse an employee id, accepting integer spellings and float spellings
/// with no fractional part ("7.0" is id 7). Anything else is unusable.
fn parse_emp_id(value: &str) -> Option<i64> {
    if let Ok(id) = value.parse::<i64>() {
        return Some(id);
    }
    let as_float = value.parse::<f64>().ok()?;
    if as_float.is_finite() && as_float.fract() == 0.0 && as_float.abs() <= i64::MAX as f64 {
        return Some(as_float as i64);
    }
    None
}

/// Parse a salary. Non-finite results are unusable for the mean math
/// downstream, so they are treated the same as unparseable cells.
fn parse_salary(value: &str) -> Option<f64> {
    let salary = value.parse::<f64>().ok()?;
    salary.is_finite().then_some(salary)
}

/// Coerce raw text rows into typed records. Cells that cannot be coerced
/// become `None` so later stages decide whether the row survives.
pub fn coerce_rows(rows: Vec<RawEmployeeRow>) -> (Vec<EmployeeRecord>, CoerceStats) {
    let mut stats = CoerceStats::default();
    let records = rows
        .into_iter()
        .map(|row| {
            let emp_id = normalize_cell(&row.emp_id).and_then(|value| {
                let parsed = parse_emp_id(value);
                if parsed.is_none() {
                    stats.emp_id_failures += 1;
                }
                parsed
            });
            let salary = normalize_cell(&row.salary).and_then(|value| {
                let parsed = parse_salary(value);
                if parsed.is_none() {
                    stats.salary_failures += 1;
                }
                parsed
            });
            EmployeeRecord {
                emp_id,
                name: normalize_cell(&row.name).map(str::to_string),
                department: normalize_cell(&row.department).map(str::to_string),
                salary,
            }
        })
        .collect();
    debug!(
        emp_id_failures = stats.emp_id_failures,
        salary_failures = stats.salary_failures,
        "Coerced raw rows"
    );
    (records, stats)
}
