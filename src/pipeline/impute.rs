use crate::constants::UNKNOWN_NAME;
use crate::domain::EmployeeRecord;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Counts of values filled in (or left unresolved) by imputation.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImputeStats {
    pub salaries_from_department: usize,
    pub salaries_from_global: usize,
    pub unresolved_salaries: usize,
    pub names_filled: usize,
}

/// Drop rows that cannot be identified: a record with no employee id or no
/// department has no key for dedup and no group for imputation.
pub fn drop_missing_keys(records: Vec<EmployeeRecord>) -> (Vec<EmployeeRecord>, usize) {
    let before = records.len();
    let kept: Vec<EmployeeRecord> = records
        .into_iter()
        .filter(|record| record.emp_id.is_some() && record.department.is_some())
        .collect();
    let dropped = before - kept.len();
    if dropped > 0 {
        debug!(dropped, "Dropped rows with missing emp_id or department");
    }
    (kept, dropped)
}

fn mean_of(sums: &HashMap<&str, (f64, usize)>, department: &str) -> Option<f64> {
    sums.get(department)
        .filter(|(_, count)| *count > 0)
        .map(|(sum, count)| sum / *count as f64)
}

/// Fill missing salaries from the department mean, then from the overall
/// mean of the partially filled column, and fill missing names with a
/// placeholder. Salaries stay `None` only when no salary exists anywhere.
pub fn impute(records: &mut [EmployeeRecord]) -> ImputeStats {
    let mut stats = ImputeStats::default();

    let mut department_sums: HashMap<&str, (f64, usize)> = HashMap::new();
    for record in records.iter() {
        if let (Some(department), Some(salary)) = (record.department.as_deref(), record.salary) {
            let entry = department_sums.entry(department).or_insert((0.0, 0));
            entry.0 += salary;
            entry.1 += 1;
        }
    }
    let department_means: HashMap<String, f64> = department_sums
        .keys()
        .filter_map(|dept| mean_of(&department_sums, dept).map(|mean| (dept.to_string(), mean)))
        .collect();

    for record in records.iter_mut() {
        if record.salary.is_none() {
            if let Some(mean) = record
                .department
                .as_deref()
                .and_then(|dept| department_means.get(dept))
            {
                record.salary = Some(*mean);
                stats.salaries_from_department += 1;
            }
        }
    }

    // Overall mean over the column as it stands after the department pass,
    // the way a column-wise fill after a grouped fill behaves.
    let (sum, count) = records
        .iter()
        .filter_map(|record| record.salary)
        .fold((0.0, 0usize), |(sum, count), salary| {
            (sum + salary, count + 1)
        });
    let global_mean = (count > 0).then(|| sum / count as f64);

    for record in records.iter_mut() {
        if record.salary.is_none() {
            match global_mean {
                Some(mean) => {
                    record.salary = Some(mean);
                    stats.salaries_from_global += 1;
                }
                None => stats.unresolved_salaries += 1,
            }
        }
        if record.name.is_none() {
            record.name = Some(UNKNOWN_NAME.to_string());
            stats.names_filled += 1;
        }
    }

    if stats.unresolved_salaries > 0 {
        warn!(
            unresolved = stats.unresolved_salaries,
            "No salary data anywhere in the input; some salaries stay missing"
        );
    }
    debug!(
        from_department = stats.salaries_from_department,
        from_global = stats.salaries_from_global,
        names_filled = stats.names_filled,
        "Imputed missing values"
    );
    stats
}
