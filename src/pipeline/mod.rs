pub mod aggregate;
pub mod coerce;
pub mod dedup;
pub mod derive;
pub mod enrich;
pub mod filter;
pub mod impute;

pub use filter::BusinessRules;

use crate::domain::{CleanEmployee, DepartmentSummary, RawEmployeeRow};
use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, instrument};
use uuid::Uuid;

/// What happened to the rows on their way through the pipeline.
#[derive(Debug, Clone, Serialize)]
pub struct CleaningReport {
    pub rows_in: usize,
    pub rows_out: usize,
    pub emp_id_coercion_failures: usize,
    pub salary_coercion_failures: usize,
    pub dropped_missing_key: usize,
    pub salaries_from_department: usize,
    pub salaries_from_global: usize,
    pub unresolved_salaries: usize,
    pub names_filled: usize,
    pub duplicates_removed: usize,
    pub filtered_out: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// Everything a single cleaning run produces.
#[derive(Debug)]
pub struct PipelineOutput {
    pub run_id: Uuid,
    pub employees: Vec<CleanEmployee>,
    pub summary: Vec<DepartmentSummary>,
    pub report: CleaningReport,
}

/// Run the full cleaning pass: coerce, drop unidentifiable rows, impute,
/// dedup, filter, categorize, and summarize. Enrichment is separate so
/// offline runs never touch the network.
#[instrument(skip(rows, rules), fields(rows_in = rows.len()))]
pub fn clean_employees(rows: Vec<RawEmployeeRow>, rules: &BusinessRules) -> Result<PipelineOutput> {
    let started_at = Utc::now();
    let rows_in = rows.len();

    let (records, coerce_stats) = coerce::coerce_rows(rows);
    let (records, dropped_missing_key) = impute::drop_missing_keys(records);
    let mut records = records;
    let impute_stats = impute::impute(&mut records);
    let (records, duplicates_removed) = dedup::dedup_by_id(records);
    let (records, filtered_out) = rules.apply(records);
    let employees = derive::finalize(records)?;
    let summary = aggregate::summarize_departments(&employees);

    let report = CleaningReport {
        rows_in,
        rows_out: employees.len(),
        emp_id_coercion_failures: coerce_stats.emp_id_failures,
        salary_coercion_failures: coerce_stats.salary_failures,
        dropped_missing_key,
        salaries_from_department: impute_stats.salaries_from_department,
        salaries_from_global: impute_stats.salaries_from_global,
        unresolved_salaries: impute_stats.unresolved_salaries,
        names_filled: impute_stats.names_filled,
        duplicates_removed,
        filtered_out,
        started_at,
        finished_at: Utc::now(),
    };
    info!(
        rows_out = report.rows_out,
        departments = summary.len(),
        "Cleaning pipeline completed"
    );

    Ok(PipelineOutput {
        run_id: Uuid::new_v4(),
        employees,
        summary,
        report,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SalaryCategory;

    fn raw(emp_id: &str, name: &str, department: &str, salary: &str) -> RawEmployeeRow {
        let cell = |v: &str| (!v.is_empty()).then(|| v.to_string());
        RawEmployeeRow {
            emp_id: cell(emp_id),
            name: cell(name),
            department: cell(department),
            salary: cell(salary),
        }
    }

    fn fixture() -> Vec<RawEmployeeRow> {
        vec![
            raw("1", "Alice", "IT", "70000"),
            raw("2", "Bob", "IT", ""),
            raw("", "Ghost", "HR", "50000"),
            raw("3", "", "Finance", "52000"),
            raw("3", "Dupe", "Finance", "52000"),
            raw("4", "Dana", "Ops", "90000"),
            raw("5", "Eve", "Sales", "30000"),
            raw("oops", "Carl", "IT", "55000"),
        ]
    }

    #[test]
    fn full_run_produces_expected_counts() {
        let output = clean_employees(fixture(), &BusinessRules::default()).unwrap();
        let report = &output.report;
        assert_eq!(report.rows_in, 8);
        assert_eq!(report.emp_id_coercion_failures, 1);
        assert_eq!(report.dropped_missing_key, 2);
        assert_eq!(report.salaries_from_department, 1);
        assert_eq!(report.salaries_from_global, 0);
        assert_eq!(report.names_filled, 1);
        assert_eq!(report.duplicates_removed, 1);
        assert_eq!(report.filtered_out, 2);
        assert_eq!(report.rows_out, 3);
    }

    #[test]
    fn every_row_is_accounted_for() {
        let output = clean_employees(fixture(), &BusinessRules::default()).unwrap();
        let report = &output.report;
        assert_eq!(
            report.rows_in,
            report.dropped_missing_key
                + report.duplicates_removed
                + report.filtered_out
                + report.rows_out
        );
    }

    #[test]
    fn outputs_satisfy_the_business_rules() {
        let rules = BusinessRules::default();
        let output = clean_employees(fixture(), &rules).unwrap();

        let mut seen = std::collections::HashSet::new();
        for employee in &output.employees {
            assert!(seen.insert(employee.emp_id), "duplicate id in output");
            assert!(employee.salary >= rules.min_salary);
            assert!(rules.valid_departments.contains(&employee.department));
            let expected = if employee.salary >= 60_000.0 {
                SalaryCategory::High
            } else {
                SalaryCategory::Medium
            };
            assert_eq!(employee.salary_category, expected);
        }
    }

    #[test]
    fn imputed_salary_matches_the_department_mean() {
        let output = clean_employees(fixture(), &BusinessRules::default()).unwrap();
        let bob = output
            .employees
            .iter()
            .find(|e| e.emp_id == 2)
            .expect("row 2 survives");
        assert_eq!(bob.salary, 70_000.0);
    }

    #[test]
    fn summary_is_grouped_and_sorted() {
        let output = clean_employees(fixture(), &BusinessRules::default()).unwrap();
        let names: Vec<_> = output
            .summary
            .iter()
            .map(|s| s.department.as_str())
            .collect();
        assert_eq!(names, vec!["Finance", "IT"]);
        let it = &output.summary[1];
        assert_eq!(it.employee_count, 2);
        assert_eq!(it.avg_salary, 70_000.0);
        for group in &output.summary {
            assert!(group.min_salary <= group.avg_salary);
            assert!(group.avg_salary <= group.max_salary);
            assert!(group.employee_count >= 1);
            let members = output
                .employees
                .iter()
                .filter(|e| e.department == group.department)
                .count() as u64;
            assert_eq!(group.employee_count, members);
        }
    }

    #[test]
    fn clean_output_passes_through_unchanged() {
        let rules = BusinessRules::default();
        let first = clean_employees(fixture(), &rules).unwrap();
        let again: Vec<RawEmployeeRow> = first
            .employees
            .iter()
            .map(|e| {
                raw(
                    &e.emp_id.to_string(),
                    &e.name,
                    &e.department,
                    &e.salary.to_string(),
                )
            })
            .collect();
        let second = clean_employees(again, &rules).unwrap();
        assert_eq!(second.employees, first.employees);
        assert_eq!(second.report.duplicates_removed, 0);
        assert_eq!(second.report.filtered_out, 0);
    }
}
