use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use super::workers_errors::{Result, WorkerError};

/// Domain model representing a field worker
#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::workers)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct Worker {
    pub id: i32,
    pub worker_id: String,
    pub full_name: String,
    pub secteur_id: i32,
    pub status: String,
    pub created_at: NaiveDateTime,
}

/// Input model for creating a new worker
#[derive(Debug, Clone, Insertable, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::workers)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct NewWorker {
    pub worker_id: String,
    pub full_name: String,
    pub secteur_id: i32,
    pub status: String,
}

impl NewWorker {
    /// Validates the new worker data
    pub fn validate(&self) -> Result<()> {
        if self.worker_id.trim().is_empty() {
            return Err(WorkerError::InvalidData(
                "Worker code cannot be empty".to_string(),
            ));
        }
        if self.full_name.trim().is_empty() {
            return Err(WorkerError::InvalidData(
                "Worker full name cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Sector grouping workers under a manager
#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::secteurs)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct Secteur {
    pub id: i32,
    pub secteur_name: String,
    pub manager_id: Option<i32>,
    pub description: Option<String>,
}

/// Input model for creating a new sector
#[derive(Debug, Clone, Insertable, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::secteurs)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct NewSecteur {
    pub secteur_name: String,
    pub manager_id: Option<i32>,
    pub description: Option<String>,
}

/// Synthesizes a worker code from a full name, e.g. "Alice Martin" -> "WKALICEM"
pub fn worker_code_from_name(full_name: &str) -> String {
    let squashed: String = full_name
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase();
    let prefix: String = squashed.chars().take(6).collect();
    format!("WK{}", prefix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_worker_code_from_name() {
        assert_eq!(worker_code_from_name("Alice Martin"), "WKALICEM");
        assert_eq!(worker_code_from_name("Bo Li"), "WKBOLI");
    }

    #[test]
    fn test_new_worker_validation() {
        let worker = NewWorker {
            worker_id: "".to_string(),
            full_name: "Alice Martin".to_string(),
            secteur_id: 1,
            status: "Active".to_string(),
        };
        assert!(worker.validate().is_err());
    }
}
