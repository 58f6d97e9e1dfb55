use diesel::prelude::*;
use diesel::sql_types::{BigInt, Nullable, Text};
use diesel::sqlite::{Sqlite, SqliteConnection};
use diesel::QueryResult;

use super::imports_traits::ImportRepositoryTrait;

#[derive(QueryableByName)]
struct CountRow {
    #[diesel(sql_type = BigInt)]
    count: i64,
}

/// Executes the generated per-row statements. Table and field names reach
/// this repository only after the service has checked them against
/// `pragma_table_info`, so interpolating them is confined to identifiers the
/// database itself reported.
pub struct ImportRepository;

impl ImportRepository {
    pub fn new() -> Self {
        ImportRepository
    }
}

impl Default for ImportRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl ImportRepositoryTrait for ImportRepository {
    fn merge_key_exists(
        &self,
        conn: &mut SqliteConnection,
        table: &str,
        merge_field: &str,
        merge_value: &str,
    ) -> QueryResult<bool> {
        let sql = format!(
            "SELECT COUNT(*) AS count FROM {} WHERE {} = ?",
            table, merge_field
        );
        let row: CountRow = diesel::sql_query(sql)
            .bind::<Text, _>(merge_value)
            .get_result(conn)?;
        Ok(row.count > 0)
    }

    fn upsert_row(
        &self,
        conn: &mut SqliteConnection,
        table: &str,
        merge_field: &str,
        columns: &[(String, Option<String>)],
    ) -> QueryResult<()> {
        let field_list = columns
            .iter()
            .map(|(field, _)| field.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let placeholders = vec!["?"; columns.len()].join(", ");

        let update_assignments = columns
            .iter()
            .filter(|(field, _)| field != merge_field)
            .map(|(field, _)| format!("{0} = excluded.{0}", field))
            .collect::<Vec<_>>()
            .join(", ");

        // A mapping covering only the merge key has nothing to update
        let conflict_action = if update_assignments.is_empty() {
            "DO NOTHING".to_string()
        } else {
            format!("DO UPDATE SET {}", update_assignments)
        };

        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({}) ON CONFLICT({}) {}",
            table, field_list, placeholders, merge_field, conflict_action
        );

        let mut query = diesel::sql_query(sql).into_boxed::<Sqlite>();
        for (_, value) in columns {
            query = query.bind::<Nullable<Text>, _>(value.clone());
        }
        query.execute(conn)?;
        Ok(())
    }
}
