//! Business defaults and fixed values shared across the pipeline. The
//! filter defaults live here so the CLI and `BusinessRules::default`
//! cannot drift apart.

/// Minimum salary a record must meet to survive the business filter.
pub const DEFAULT_MIN_SALARY: f64 = 50_000.0;

/// Departments accepted by the business filter by default.
pub const DEFAULT_DEPARTMENTS: [&str; 5] = ["IT", "Finance", "HR", "Sales", "Marketing"];

/// Salary at or above which a record is labeled High. Independent of the
/// filter's minimum salary; the two thresholds are not required to align.
pub const HIGH_SALARY_THRESHOLD: f64 = 60_000.0;

/// Sentinel substituted for a missing employee name.
pub const UNKNOWN_NAME: &str = "Unknown";

/// Cell values treated as missing in every input column (case-insensitive,
/// compared after trimming).
pub const MISSING_MARKERS: [&str; 5] = ["na", "n/a", "null", "none", "nan"];

/// Columns the input table must provide.
pub const REQUIRED_COLUMNS: [&str; 4] = ["emp_id", "name", "department", "salary"];

/// Internal name of the users enrichment source.
pub const DUMMYJSON_API: &str = "dummyjson";

/// Default users endpoint for the optional enrichment join.
pub const DEFAULT_USERS_ENDPOINT: &str = "https://dummyjson.com/users";

/// Environment variable overriding the users endpoint.
pub const USERS_ENDPOINT_ENV: &str = "EMP_SCRUB_USERS_URL";

/// Output file names inside the output directory.
pub const CLEAN_OUTPUT_FILE: &str = "final_clean_data.csv";
pub const SUMMARY_OUTPUT_FILE: &str = "department_summary.csv";
