use diesel::prelude::*;
use diesel::sql_types::{Integer, Nullable, Text};
use diesel::SqliteConnection;

use super::imports_errors::{ImportError, Result};
use super::imports_model::{ColumnDescriptor, ImportTarget};

#[derive(QueryableByName)]
struct TableInfoRow {
    #[diesel(sql_type = Text)]
    name: String,
    #[diesel(sql_type = Text)]
    declared_type: String,
    #[diesel(sql_type = Integer)]
    not_null: i32,
    #[diesel(sql_type = Nullable<Text>)]
    dflt_value: Option<String>,
    #[diesel(sql_type = Integer)]
    pk: i32,
}

/// Reads the live column catalog for an import target straight from SQLite.
/// The UI builds its mapping screen from this, so the descriptors always
/// reflect the migrated schema rather than a hardcoded copy of it.
pub fn get_schema(
    conn: &mut SqliteConnection,
    target: ImportTarget,
) -> Result<Vec<ColumnDescriptor>> {
    let table = target.table_name();

    let rows: Vec<TableInfoRow> = diesel::sql_query(
        "SELECT name, type AS declared_type, \"notnull\" AS not_null, dflt_value, pk \
         FROM pragma_table_info(?)",
    )
    .bind::<Text, _>(table)
    .load(conn)
    .map_err(|e| ImportError::SchemaAccess(table.to_string(), e.to_string()))?;

    if rows.is_empty() {
        return Err(ImportError::SchemaAccess(
            table.to_string(),
            "table not found".to_string(),
        ));
    }

    // A lone INTEGER primary key is a rowid alias that SQLite fills in
    let pk_columns: Vec<&TableInfoRow> = rows.iter().filter(|r| r.pk > 0).collect();
    let rowid_alias = pk_columns.len() == 1
        && pk_columns[0].declared_type.eq_ignore_ascii_case("INTEGER");

    Ok(rows
        .iter()
        .map(|row| ColumnDescriptor {
            name: row.name.clone(),
            declared_type: row.declared_type.clone(),
            nullable: row.not_null == 0,
            is_auto_generated: rowid_alias && row.pk > 0,
            has_default: row.dflt_value.is_some(),
        })
        .collect())
}
