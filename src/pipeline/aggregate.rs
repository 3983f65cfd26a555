use crate::domain::{CleanEmployee, DepartmentSummary};
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Debug)]
struct Accumulator {
    sum: f64,
    min: f64,
    max: f64,
    count: u64,
}

impl Accumulator {
    fn new() -> Self {
        Self {
            sum: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
            count: 0,
        }
    }

    fn add(&mut self, salary: f64) {
        self.sum += salary;
        self.min = self.min.min(salary);
        self.max = self.max.max(salary);
        self.count += 1;
    }
}

/// Per-department salary statistics, ordered by department name.
pub fn summarize_departments(employees: &[CleanEmployee]) -> Vec<DepartmentSummary> {
    let mut groups: BTreeMap<&str, Accumulator> = BTreeMap::new();
    for employee in employees {
        groups
            .entry(employee.department.as_str())
            .or_insert_with(Accumulator::new)
            .add(employee.salary);
    }
    let summary: Vec<DepartmentSummary> = groups
        .into_iter()
        .map(|(department, acc)| DepartmentSummary {
            department: department.to_string(),
            avg_salary: acc.sum / acc.count as f64,
            min_salary: acc.min,
            max_salary: acc.max,
            employee_count: acc.count,
        })
        .collect();
    debug!(departments = summary.len(), "Summarized departments");
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SalaryCategory;

    fn employee(emp_id: i64, department: &str, salary: f64) -> CleanEmployee {
        CleanEmployee {
            emp_id,
            name: format!("emp-{emp_id}"),
            department: department.to_string(),
            salary,
            salary_category: SalaryCategory::Medium,
        }
    }

    #[test]
    fn groups_are_sorted_by_department() {
        let employees = vec![
            employee(1, "Sales", 55_000.0),
            employee(2, "Finance", 52_000.0),
            employee(3, "IT", 70_000.0),
        ];
        let summary = summarize_departments(&employees);
        let names: Vec<_> = summary.iter().map(|s| s.department.as_str()).collect();
        assert_eq!(names, vec!["Finance", "IT", "Sales"]);
    }

    #[test]
    fn statistics_cover_min_mean_max_and_count() {
        let employees = vec![
            employee(1, "IT", 60_000.0),
            employee(2, "IT", 80_000.0),
            employee(3, "IT", 70_000.0),
        ];
        let summary = summarize_departments(&employees);
        assert_eq!(summary.len(), 1);
        let it = &summary[0];
        assert_eq!(it.avg_salary, 70_000.0);
        assert_eq!(it.min_salary, 60_000.0);
        assert_eq!(it.max_salary, 80_000.0);
        assert_eq!(it.employee_count, 3);
    }

    #[test]
    fn single_member_group_has_degenerate_range() {
        let employees = vec![employee(1, "HR", 52_000.0)];
        let summary = summarize_departments(&employees);
        assert_eq!(summary[0].min_salary, summary[0].max_salary);
        assert_eq!(summary[0].avg_salary, 52_000.0);
    }

    #[test]
    fn empty_input_yields_empty_summary() {
        assert!(summarize_departments(&[]).is_empty());
    }

    #[test]
    fn departments_with_no_rows_do_not_appear() {
        let employees = vec![employee(1, "IT", 60_000.0)];
        let summary = summarize_departments(&employees);
        assert!(summary.iter().all(|s| s.department != "HR"));
    }
}
