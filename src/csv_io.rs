use crate::constants::REQUIRED_COLUMNS;
use crate::domain::{CleanEmployee, DepartmentSummary, RawEmployeeRow};
use crate::error::{Result, ScrubError};
use crate::pipeline::enrich::EnrichedEmployee;
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Read the employee table, verifying the file exists, every required
/// column is present, and at least one data row was found. Extra columns
/// are ignored; cell-level problems are left for the coercion stage.
pub fn read_employees(path: &Path) -> Result<Vec<RawEmployeeRow>> {
    if !path.exists() {
        return Err(ScrubError::Input(format!(
            "input file not found: {}",
            path.display()
        )));
    }

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)?;

    let headers = reader.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(ScrubError::Input(format!(
                "input is missing required column '{}'",
                column
            )));
        }
    }

    let mut rows = Vec::new();
    for row in reader.deserialize() {
        rows.push(row?);
    }
    if rows.is_empty() {
        return Err(ScrubError::Input(format!(
            "input file {} contains no data rows",
            path.display()
        )));
    }

    debug!(rows = rows.len(), path = %path.display(), "Read input table");
    Ok(rows)
}

/// Serialize `rows` to CSV in memory, then write the file in one shot so a
/// failed run cannot leave a partially written table behind.
fn write_table<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer.serialize(row)?;
    }
    let buffer = writer
        .into_inner()
        .map_err(|e| ScrubError::Input(format!("failed to flush CSV buffer: {}", e)))?;
    fs::write(path, buffer)?;
    debug!(rows = rows.len(), path = %path.display(), "Wrote output table");
    Ok(())
}

pub fn write_clean_employees(path: &Path, employees: &[CleanEmployee]) -> Result<()> {
    write_table(path, employees)
}

pub fn write_enriched_employees(path: &Path, employees: &[EnrichedEmployee]) -> Result<()> {
    write_table(path, employees)
}

pub fn write_department_summary(path: &Path, summary: &[DepartmentSummary]) -> Result<()> {
    write_table(path, summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SalaryCategory;
    use tempfile::tempdir;

    #[test]
    fn missing_file_is_an_input_error() {
        let err = read_employees(Path::new("does/not/exist.csv")).unwrap_err();
        assert!(matches!(err, ScrubError::Input(_)));
    }

    #[test]
    fn missing_column_is_an_input_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        fs::write(&path, "emp_id,name,salary\n1,A,50000\n").unwrap();

        let err = read_employees(&path).unwrap_err();
        match err {
            ScrubError::Input(message) => assert!(message.contains("department")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn header_only_file_is_an_input_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        fs::write(&path, "emp_id,name,department,salary\n").unwrap();

        let err = read_employees(&path).unwrap_err();
        assert!(matches!(err, ScrubError::Input(_)));
    }

    #[test]
    fn reads_rows_with_empty_cells_as_none() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ok.csv");
        fs::write(
            &path,
            "emp_id,name,department,salary\n1,Alice,IT,70000\n2,,HR,\n",
        )
        .unwrap();

        let rows = read_employees(&path).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].emp_id.as_deref(), Some("1"));
        assert_eq!(rows[1].name, None);
        assert_eq!(rows[1].salary, None);
    }

    #[test]
    fn extra_columns_are_ignored() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("wide.csv");
        fs::write(
            &path,
            "emp_id,name,department,salary,notes\n1,Alice,IT,70000,likes rust\n",
        )
        .unwrap();

        let rows = read_employees(&path).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].department.as_deref(), Some("IT"));
    }

    #[test]
    fn clean_table_round_trips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("clean.csv");
        let employees = vec![CleanEmployee {
            emp_id: 7,
            name: "Grace".to_string(),
            department: "Finance".to_string(),
            salary: 61_500.0,
            salary_category: SalaryCategory::High,
        }];

        write_clean_employees(&path, &employees).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let read_back: Vec<CleanEmployee> = reader
            .deserialize()
            .collect::<std::result::Result<_, _>>()
            .unwrap();
        assert_eq!(read_back, employees);
    }
}
