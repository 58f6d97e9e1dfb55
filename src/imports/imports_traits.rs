use diesel::sqlite::SqliteConnection;
use diesel::QueryResult;

use super::imports_errors::Result;
use super::imports_model::{ColumnDescriptor, ColumnMapping, ImportPreview, ImportResult};

/// Trait defining the contract for the dynamic upsert engine. Callers must
/// only pass table and field names that were checked against the live
/// schema; the repository interpolates identifiers into SQL.
pub trait ImportRepositoryTrait: Send + Sync {
    /// True when a row with the given merge-key value already exists.
    fn merge_key_exists(
        &self,
        conn: &mut SqliteConnection,
        table: &str,
        merge_field: &str,
        merge_value: &str,
    ) -> QueryResult<bool>;

    /// Inserts the row, or updates every non-merge field when the merge-key
    /// value already exists. `columns` pairs each field with its value; None
    /// writes NULL.
    fn upsert_row(
        &self,
        conn: &mut SqliteConnection,
        table: &str,
        merge_field: &str,
        columns: &[(String, Option<String>)],
    ) -> QueryResult<()>;
}

/// Trait defining the contract for the import service operations.
pub trait ImportServiceTrait: Send + Sync {
    fn get_import_schema(&self, target_table: &str) -> Result<Vec<ColumnDescriptor>>;
    fn preview_import(&self, raw_text: &str, delimiter: u8, limit: usize)
        -> Result<ImportPreview>;
    fn propose_import_mapping(
        &self,
        target_table: &str,
        headers: &[String],
    ) -> Result<ColumnMapping>;
    fn run_import(
        &self,
        target_table: &str,
        raw_text: &str,
        delimiter: u8,
        mapping: &ColumnMapping,
        actor: Option<i32>,
    ) -> Result<ImportResult>;
}
