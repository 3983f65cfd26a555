use crate::constants::{DEFAULT_DEPARTMENTS, DEFAULT_MIN_SALARY};
use crate::domain::EmployeeRecord;
use std::collections::HashSet;
use tracing::debug;

/// The cut a record must make to count as a payroll-relevant employee.
#[derive(Debug, Clone)]
pub struct BusinessRules {
    /// Lowest salary that passes, inclusive.
    pub min_salary: f64,
    /// Departments recognized by the organization.
    pub valid_departments: HashSet<String>,
}

impl Default for BusinessRules {
    fn default() -> Self {
        Self {
            min_salary: DEFAULT_MIN_SALARY,
            valid_departments: DEFAULT_DEPARTMENTS
                .iter()
                .map(|d| d.to_string())
                .collect(),
        }
    }
}

impl BusinessRules {
    /// A record passes only when both its salary and department are present
    /// and in range. A salary that stayed missing through imputation fails.
    pub fn accepts(&self, record: &EmployeeRecord) -> bool {
        let salary_ok = record.salary.map_or(false, |s| s >= self.min_salary);
        let department_ok = record
            .department
            .as_deref()
            .map_or(false, |d| self.valid_departments.contains(d));
        salary_ok && department_ok
    }

    pub fn apply(&self, records: Vec<EmployeeRecord>) -> (Vec<EmployeeRecord>, usize) {
        let before = records.len();
        let kept: Vec<EmployeeRecord> = records
            .into_iter()
            .filter(|record| self.accepts(record))
            .collect();
        let removed = before - kept.len();
        if removed > 0 {
            debug!(removed, min_salary = self.min_salary, "Filtered records");
        }
        (kept, removed)
    }
}
