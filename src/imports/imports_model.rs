use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::imports_errors::{ImportError, Result};

/// Whitelisted import target tables. Anything outside this set is rejected
/// before any schema or data access happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportTarget {
    Phones,
    SimCards,
    Workers,
    Users,
    Secteurs,
    PhoneNumbers,
}

impl ImportTarget {
    pub const ALL: [ImportTarget; 6] = [
        ImportTarget::Phones,
        ImportTarget::SimCards,
        ImportTarget::Workers,
        ImportTarget::Users,
        ImportTarget::Secteurs,
        ImportTarget::PhoneNumbers,
    ];

    pub fn parse(name: &str) -> Result<Self> {
        match name {
            "phones" => Ok(ImportTarget::Phones),
            "sim_cards" => Ok(ImportTarget::SimCards),
            "workers" => Ok(ImportTarget::Workers),
            "users" => Ok(ImportTarget::Users),
            "secteurs" => Ok(ImportTarget::Secteurs),
            "phone_numbers" => Ok(ImportTarget::PhoneNumbers),
            other => Err(ImportError::InvalidTarget(other.to_string())),
        }
    }

    pub fn table_name(&self) -> &'static str {
        match self {
            ImportTarget::Phones => "phones",
            ImportTarget::SimCards => "sim_cards",
            ImportTarget::Workers => "workers",
            ImportTarget::Users => "users",
            ImportTarget::Secteurs => "secteurs",
            ImportTarget::PhoneNumbers => "phone_numbers",
        }
    }

    /// The natural business key each table is deduplicated on.
    pub fn default_merge_field(&self) -> &'static str {
        match self {
            ImportTarget::Phones => "asset_tag",
            ImportTarget::SimCards => "iccid",
            ImportTarget::Workers => "worker_id",
            ImportTarget::Users => "username",
            ImportTarget::Secteurs => "secteur_name",
            ImportTarget::PhoneNumbers => "phone_number",
        }
    }
}

/// Describes one column of an import target table
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDescriptor {
    pub name: String,
    pub declared_type: String,
    pub nullable: bool,
    pub is_auto_generated: bool,
    pub has_default: bool,
}

/// One CSV-header-to-database-field association
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnMap {
    pub header: String,
    pub field: String,
}

/// User-confirmed mapping from CSV headers to database fields. One field is
/// designated as the merge key used for conflict detection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnMapping {
    pub columns: Vec<ColumnMap>,
    pub merge_field: String,
}

impl ColumnMapping {
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn contains_field(&self, field: &str) -> bool {
        self.columns.iter().any(|c| c.field == field)
    }

    pub fn header_for_field(&self, field: &str) -> Option<&str> {
        self.columns
            .iter()
            .find(|c| c.field == field)
            .map(|c| c.header.as_str())
    }

    pub fn from_json(raw: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// One parsed CSV line: header name to raw value. Created per line, consumed
/// immediately, never persisted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedRow {
    pub index: usize,
    pub values: HashMap<String, String>,
}

impl ParsedRow {
    pub fn get(&self, header: &str) -> Option<&str> {
        self.values.get(header).map(|v| v.as_str())
    }

    /// Looks up the trimmed value for a mapped database field; empty and
    /// whitespace-only cells read as absent.
    pub fn mapped_value(&self, mapping: &ColumnMapping, field: &str) -> Option<&str> {
        let header = mapping.header_for_field(field)?;
        let value = self.get(header)?.trim();
        if value.is_empty() {
            None
        } else {
            Some(value)
        }
    }

    /// True when every mapped cell of this row is empty or whitespace
    pub fn is_blank(&self, mapping: &ColumnMapping) -> bool {
        self.columns_values(mapping).all(|v| v.is_none())
    }

    fn columns_values<'a>(
        &'a self,
        mapping: &'a ColumnMapping,
    ) -> impl Iterator<Item = Option<&'a str>> + 'a {
        mapping.columns.iter().map(move |c| {
            self.get(&c.header)
                .map(str::trim)
                .filter(|v| !v.is_empty())
        })
    }
}

/// Outcome of processing one row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowOutcome {
    Inserted,
    Updated,
    Skipped,
}

/// One isolated row failure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowError {
    pub row: usize,
    pub message: String,
}

/// Aggregate result of an import run, returned once after the source is
/// exhausted. Row failures are collected here; they never abort the run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResult {
    pub rows_processed: usize,
    pub inserted: usize,
    pub updated: usize,
    pub errors: Vec<RowError>,
    /// Set when the store became unavailable mid-run; the counts accumulated
    /// up to that point are still reported.
    pub aborted: Option<String>,
}

impl ImportResult {
    pub fn new() -> Self {
        Self::default()
    }
}

/// First rows of a CSV file plus the available target tables, for the
/// mapping wizard
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportPreview {
    pub headers: Vec<String>,
    pub rows: Vec<ParsedRow>,
    pub targets: Vec<&'static str>,
}
