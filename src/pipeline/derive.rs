use crate::constants::HIGH_SALARY_THRESHOLD;
use crate::domain::{CleanEmployee, EmployeeRecord, SalaryCategory};
use crate::error::{Result, ScrubError};

/// Bracket a salary. The threshold itself lands in `High`.
pub fn categorize(salary: f64) -> SalaryCategory {
    if salary >= HIGH_SALARY_THRESHOLD {
        SalaryCategory::High
    } else {
        SalaryCategory::Medium
    }
}

/// Convert filtered records into the final shape. Every field must be
/// present by this point; a gap here means an upstream stage misbehaved.
pub fn finalize(records: Vec<EmployeeRecord>) -> Result<Vec<CleanEmployee>> {
    records
        .into_iter()
        .map(|record| {
            let emp_id = record
                .emp_id
                .ok_or_else(|| ScrubError::MissingField("emp_id".to_string()))?;
            let name = record
                .name
                .ok_or_else(|| ScrubError::MissingField("name".to_string()))?;
            let department = record
                .department
                .ok_or_else(|| ScrubError::MissingField("department".to_string()))?;
            let salary = record
                .salary
                .ok_or_else(|| ScrubError::MissingField("salary".to_string()))?;
            Ok(CleanEmployee {
                emp_id,
                name,
                department,
                salary_category: categorize(salary),
                salary,
            })
        })
        .collect()
}
