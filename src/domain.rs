use serde::{Deserialize, Serialize};

/// One row of the input table exactly as the CSV provides it; every cell may
/// be absent or carry a missing marker.
#[derive(Debug, Clone, Deserialize)]
pub struct RawEmployeeRow {
    pub emp_id: Option<String>,
    pub name: Option<String>,
    pub department: Option<String>,
    pub salary: Option<String>,
}

/// Employee record after type coercion. Fields stay optional until the
/// cleaning stages resolve or discard them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    pub emp_id: Option<i64>,
    pub name: Option<String>,
    pub department: Option<String>,
    pub salary: Option<f64>,
}

/// Salary bracket derived from the cleaned salary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SalaryCategory {
    High,
    Medium,
}

impl std::fmt::Display for SalaryCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SalaryCategory::High => write!(f, "High"),
            SalaryCategory::Medium => write!(f, "Medium"),
        }
    }
}

/// Employee record that survived cleaning and filtering. Identity, grouping,
/// and salary fields are guaranteed present here; the type is the invariant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanEmployee {
    pub emp_id: i64,
    pub name: String,
    pub department: String,
    pub salary: f64,
    pub salary_category: SalaryCategory,
}

/// Aggregated view of one department across the filtered records. A
/// department with no surviving records gets no row at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentSummary {
    pub department: String,
    pub avg_salary: f64,
    pub min_salary: f64,
    pub max_salary: f64,
    /// Count of records in the group, not a salary sum.
    pub employee_count: u64,
}
