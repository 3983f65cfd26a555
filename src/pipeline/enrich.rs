use crate::domain::{CleanEmployee, SalaryCategory};
use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, warn};

/// One person from an external directory, keyed by employee id.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichmentRecord {
    pub id: i64,
    pub age: Option<u32>,
    pub city: Option<String>,
}

/// A cleaned employee with whatever the directory knew about them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedEmployee {
    pub emp_id: i64,
    pub name: String,
    pub department: String,
    pub salary: f64,
    pub salary_category: SalaryCategory,
    pub age: Option<u32>,
    pub city: Option<String>,
}

/// Anything that can hand back directory records for the join.
#[async_trait]
pub trait EnrichmentSource: Send + Sync {
    fn source_name(&self) -> &'static str;
    async fn fetch_users(&self) -> Result<Vec<EnrichmentRecord>>;
}

/// Fixed records, for tests and offline runs.
pub struct StaticEnrichmentSource {
    records: Vec<EnrichmentRecord>,
}

impl StaticEnrichmentSource {
    pub fn new(records: Vec<EnrichmentRecord>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl EnrichmentSource for StaticEnrichmentSource {
    fn source_name(&self) -> &'static str {
        "static"
    }

    async fn fetch_users(&self) -> Result<Vec<EnrichmentRecord>> {
        Ok(self.records.clone())
    }
}

/// Left-join the cleaned employees with directory records by id. Every
/// employee survives; unmatched ones carry empty age and city. When the
/// directory repeats an id, the first record wins.
pub fn left_join(
    employees: Vec<CleanEmployee>,
    records: &[EnrichmentRecord],
) -> (Vec<EnrichedEmployee>, usize) {
    let mut by_id: HashMap<i64, &EnrichmentRecord> = HashMap::new();
    for record in records {
        if by_id.contains_key(&record.id) {
            warn!(id = record.id, "Directory repeats an id; keeping the first record");
            continue;
        }
        by_id.insert(record.id, record);
    }

    let mut matched = 0;
    let enriched: Vec<EnrichedEmployee> = employees
        .into_iter()
        .map(|employee| {
            let hit = by_id.get(&employee.emp_id);
            if hit.is_some() {
                matched += 1;
            }
            EnrichedEmployee {
                emp_id: employee.emp_id,
                name: employee.name,
                department: employee.department,
                salary: employee.salary,
                salary_category: employee.salary_category,
                age: hit.and_then(|r| r.age),
                city: hit.and_then(|r| r.city.clone()),
            }
        })
        .collect();
    debug!(matched, total = enriched.len(), "Joined directory records");
    (enriched, matched)
}
