use std::sync::Arc;

use diesel::result::Error as DieselError;
use diesel::Connection;
use log::{error, info};

use crate::assignments::{AssignmentError, AssignmentRepositoryTrait, NewAssignment};
use crate::audit::{AuditRepositoryTrait, ASSET_TYPE_PHONE, ASSET_TYPE_WORKER};
use crate::constants::{STATUS_IN_USE, WORKER_STATUS_ACTIVE};
use crate::db::{get_connection, DbConnection, DbPool};
use crate::errors::{is_connection_loss, DatabaseError, Error as CoreError};
use crate::phones::{PhoneError, PhoneRepositoryTrait, PhoneUpsert};
use crate::sim_cards::{SimCardError, SimCardRepositoryTrait, SimCardUpsert};
use crate::workers::{worker_code_from_name, NewWorker, WorkerError, WorkerRepositoryTrait};

use super::csv_parser;
use super::imports_constants::{
    FIELD_ASSET_TAG, FIELD_CARRIER, FIELD_ICCID, FIELD_IMEI, FIELD_MANUFACTURER, FIELD_MODEL,
    FIELD_PIN, FIELD_PUK, FIELD_SERIAL_NUMBER, FIELD_WORKER_NAME,
};
use super::imports_errors::{ImportError, Result};
use super::imports_model::{
    ColumnDescriptor, ColumnMapping, ImportPreview, ImportResult, ImportTarget, ParsedRow,
    RowError, RowOutcome,
};
use super::imports_traits::{ImportRepositoryTrait, ImportServiceTrait};
use super::mapping_resolver;
use super::schema_catalog;

/// A failure inside one row's transaction. `StoreGone` aborts the whole run;
/// `Failed` is recorded against the row and the run continues.
enum RowFailure {
    Failed(String),
    StoreGone(String),
}

impl From<DieselError> for RowFailure {
    fn from(err: DieselError) -> Self {
        if is_connection_loss(&err) {
            RowFailure::StoreGone(err.to_string())
        } else {
            RowFailure::Failed(err.to_string())
        }
    }
}

// The entity repositories classify connection loss at the typed diesel
// level, so conversion here is a plain variant match.
impl From<WorkerError> for RowFailure {
    fn from(err: WorkerError) -> Self {
        match err {
            WorkerError::StoreUnavailable(message) => RowFailure::StoreGone(message),
            other => RowFailure::Failed(other.to_string()),
        }
    }
}

impl From<PhoneError> for RowFailure {
    fn from(err: PhoneError) -> Self {
        match err {
            PhoneError::StoreUnavailable(message) => RowFailure::StoreGone(message),
            other => RowFailure::Failed(other.to_string()),
        }
    }
}

impl From<SimCardError> for RowFailure {
    fn from(err: SimCardError) -> Self {
        match err {
            SimCardError::StoreUnavailable(message) => RowFailure::StoreGone(message),
            other => RowFailure::Failed(other.to_string()),
        }
    }
}

impl From<AssignmentError> for RowFailure {
    fn from(err: AssignmentError) -> Self {
        match err {
            AssignmentError::StoreUnavailable(message) => RowFailure::StoreGone(message),
            other => RowFailure::Failed(other.to_string()),
        }
    }
}

impl From<CoreError> for RowFailure {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Database(DatabaseError::QueryFailed(e)) => e.into(),
            CoreError::Database(DatabaseError::PoolCreationFailed(e)) => {
                RowFailure::StoreGone(e.to_string())
            }
            CoreError::Worker(e) => e.into(),
            CoreError::Phone(e) => e.into(),
            CoreError::SimCard(e) => e.into(),
            CoreError::Assignment(e) => e.into(),
            other => RowFailure::Failed(other.to_string()),
        }
    }
}

/// Orchestrates CSV imports: schema discovery, mapping proposal and the
/// row-by-row upsert run. A mapping that covers a worker name, an ICCID and
/// an IMEI switches the run into the onboarding flow, which touches the
/// worker, SIM, phone and assignment tables together instead of a single
/// target table.
pub struct ImportService {
    pool: Arc<DbPool>,
    repository: Arc<dyn ImportRepositoryTrait>,
    workers: Arc<dyn WorkerRepositoryTrait>,
    phones: Arc<dyn PhoneRepositoryTrait>,
    sim_cards: Arc<dyn SimCardRepositoryTrait>,
    assignments: Arc<dyn AssignmentRepositoryTrait>,
    audit: Arc<dyn AuditRepositoryTrait>,
}

impl ImportService {
    /// Creates a new ImportService instance with injected dependencies
    pub fn new(
        pool: Arc<DbPool>,
        repository: Arc<dyn ImportRepositoryTrait>,
        workers: Arc<dyn WorkerRepositoryTrait>,
        phones: Arc<dyn PhoneRepositoryTrait>,
        sim_cards: Arc<dyn SimCardRepositoryTrait>,
        assignments: Arc<dyn AssignmentRepositoryTrait>,
        audit: Arc<dyn AuditRepositoryTrait>,
    ) -> Self {
        Self {
            pool,
            repository,
            workers,
            phones,
            sim_cards,
            assignments,
            audit,
        }
    }

    fn connection(&self) -> Result<DbConnection> {
        get_connection(&self.pool).map_err(|e| ImportError::StoreUnavailable(e.to_string()))
    }

    fn is_onboarding(mapping: &ColumnMapping) -> bool {
        mapping.contains_field(FIELD_WORKER_NAME)
            && mapping.contains_field(FIELD_ICCID)
            && mapping.contains_field(FIELD_IMEI)
    }

    /// Upserts one row into the target table, reporting whether the merge
    /// key already existed. The existence probe and the write share the
    /// row's transaction.
    fn upsert_plain_row(
        &self,
        conn: &mut DbConnection,
        target: ImportTarget,
        mapping: &ColumnMapping,
        row: &ParsedRow,
    ) -> std::result::Result<RowOutcome, RowFailure> {
        let merge_value = row
            .mapped_value(mapping, &mapping.merge_field)
            .ok_or_else(|| {
                RowFailure::Failed(format!(
                    "Merge key '{}' is empty on this row",
                    mapping.merge_field
                ))
            })?
            .to_string();

        let columns: Vec<(String, Option<String>)> = mapping
            .columns
            .iter()
            .map(|c| {
                let value = row
                    .get(&c.header)
                    .map(str::trim)
                    .filter(|v| !v.is_empty())
                    .map(String::from);
                (c.field.clone(), value)
            })
            .collect();

        conn.transaction::<RowOutcome, RowFailure, _>(|conn| {
            let existed = self.repository.merge_key_exists(
                conn,
                target.table_name(),
                &mapping.merge_field,
                &merge_value,
            )?;
            self.repository
                .upsert_row(conn, target.table_name(), &mapping.merge_field, &columns)?;
            Ok(if existed {
                RowOutcome::Updated
            } else {
                RowOutcome::Inserted
            })
        })
    }

    /// Processes one onboarding row: resolves or creates the worker, upserts
    /// the SIM and the phone, and opens an assignment when the phone has
    /// none. Re-running the same sheet leaves the data unchanged.
    fn upsert_onboarding_row(
        &self,
        conn: &mut DbConnection,
        mapping: &ColumnMapping,
        row: &ParsedRow,
        actor: Option<i32>,
    ) -> std::result::Result<RowOutcome, RowFailure> {
        let full_name = required_field(row, mapping, FIELD_WORKER_NAME)?;
        let iccid = required_field(row, mapping, FIELD_ICCID)?;
        let imei = required_field(row, mapping, FIELD_IMEI)?;

        let optional = |field: &str| row.mapped_value(mapping, field).map(String::from);

        conn.transaction::<RowOutcome, RowFailure, _>(|conn| {
            let worker = match self.workers.find_by_full_name(conn, &full_name)? {
                Some(worker) => worker,
                None => {
                    let secteur = self.workers.ensure_default_secteur(conn)?;
                    let created = self.workers.create(
                        conn,
                        NewWorker {
                            worker_id: worker_code_from_name(&full_name),
                            full_name: full_name.clone(),
                            secteur_id: secteur.id,
                            status: WORKER_STATUS_ACTIVE.to_string(),
                        },
                    )?;
                    self.audit.log_event(
                        conn,
                        actor,
                        ASSET_TYPE_WORKER,
                        created.id,
                        "Created",
                        &format!("Created as {} during import", created.worker_id),
                    )?;
                    created
                }
            };

            let (sim, _) = self.sim_cards.upsert_by_iccid(
                conn,
                SimCardUpsert {
                    iccid: iccid.clone(),
                    carrier: optional(FIELD_CARRIER),
                    pin: optional(FIELD_PIN),
                    puk: optional(FIELD_PUK),
                    status: None,
                },
            )?;

            // The phone drives the inserted/updated counters for this flow
            let (phone, phone_inserted) = self.phones.upsert_by_imei(
                conn,
                PhoneUpsert {
                    imei: imei.clone(),
                    asset_tag: optional(FIELD_ASSET_TAG),
                    serial_number: optional(FIELD_SERIAL_NUMBER),
                    manufacturer: optional(FIELD_MANUFACTURER),
                    model: optional(FIELD_MODEL),
                    status: None,
                },
            )?;

            match self.assignments.find_open_by_phone(conn, phone.id)? {
                Some(_) => {
                    // Already assigned; only repair statuses that drifted
                    if phone.status != STATUS_IN_USE {
                        self.phones.set_status(conn, phone.id, STATUS_IN_USE)?;
                    }
                    if sim.status != STATUS_IN_USE {
                        self.sim_cards.set_status(conn, sim.id, STATUS_IN_USE)?;
                    }
                }
                None => {
                    self.assignments.create(
                        conn,
                        NewAssignment {
                            phone_id: phone.id,
                            sim_card_id: sim.id,
                            worker_id: worker.id,
                        },
                    )?;
                    self.phones.set_status(conn, phone.id, STATUS_IN_USE)?;
                    self.sim_cards.set_status(conn, sim.id, STATUS_IN_USE)?;
                    self.audit.log_event(
                        conn,
                        actor,
                        ASSET_TYPE_PHONE,
                        phone.id,
                        "Assigned",
                        &format!("Assigned to {} during import", worker.full_name),
                    )?;
                }
            }

            Ok(if phone_inserted {
                RowOutcome::Inserted
            } else {
                RowOutcome::Updated
            })
        })
    }
}

fn required_field(
    row: &ParsedRow,
    mapping: &ColumnMapping,
    field: &str,
) -> std::result::Result<String, RowFailure> {
    row.mapped_value(mapping, field)
        .map(String::from)
        .ok_or_else(|| RowFailure::Failed(format!("Required value '{}' is empty on this row", field)))
}

impl ImportServiceTrait for ImportService {
    fn get_import_schema(&self, target_table: &str) -> Result<Vec<ColumnDescriptor>> {
        let target = ImportTarget::parse(target_table)?;
        let mut conn = self.connection()?;
        schema_catalog::get_schema(&mut conn, target)
    }

    fn preview_import(
        &self,
        raw_text: &str,
        delimiter: u8,
        limit: usize,
    ) -> Result<ImportPreview> {
        let (headers, rows) = csv_parser::preview(raw_text, delimiter, limit)?;
        Ok(ImportPreview {
            headers,
            rows,
            targets: ImportTarget::ALL.iter().map(|t| t.table_name()).collect(),
        })
    }

    fn propose_import_mapping(
        &self,
        target_table: &str,
        headers: &[String],
    ) -> Result<ColumnMapping> {
        let target = ImportTarget::parse(target_table)?;
        let mut conn = self.connection()?;
        let descriptors = schema_catalog::get_schema(&mut conn, target)?;
        Ok(mapping_resolver::propose_mapping(
            headers,
            &descriptors,
            target,
        ))
    }

    fn run_import(
        &self,
        target_table: &str,
        raw_text: &str,
        delimiter: u8,
        mapping: &ColumnMapping,
        actor: Option<i32>,
    ) -> Result<ImportResult> {
        let target = ImportTarget::parse(target_table)?;
        mapping_resolver::validate(mapping)?;

        let mut conn = self.connection()?;
        let onboarding = Self::is_onboarding(mapping);
        if !onboarding {
            let descriptors = schema_catalog::get_schema(&mut conn, target)?;
            mapping_resolver::check_columns(mapping, &descriptors, target)?;
        }

        let (_, rows) = csv_parser::parse(raw_text, delimiter)?;
        let mut result = ImportResult::new();

        for row in rows {
            result.rows_processed += 1;
            let row = match row {
                Ok(row) => row,
                Err(e) => {
                    result.errors.push(RowError {
                        row: result.rows_processed,
                        message: e.to_string(),
                    });
                    continue;
                }
            };

            if row.is_blank(mapping) {
                continue;
            }

            let outcome = if onboarding {
                self.upsert_onboarding_row(&mut conn, mapping, &row, actor)
            } else {
                self.upsert_plain_row(&mut conn, target, mapping, &row)
            };

            match outcome {
                Ok(RowOutcome::Inserted) => result.inserted += 1,
                Ok(RowOutcome::Updated) => result.updated += 1,
                Ok(RowOutcome::Skipped) => {}
                Err(RowFailure::Failed(message)) => {
                    result.errors.push(RowError {
                        row: row.index,
                        message,
                    });
                }
                Err(RowFailure::StoreGone(message)) => {
                    error!(
                        "Import into '{}' aborted at row {}: {}",
                        target_table, row.index, message
                    );
                    result.aborted = Some(message);
                    break;
                }
            }
        }

        info!(
            "Import into '{}' finished: {} rows, {} inserted, {} updated, {} errors",
            target_table,
            result.rows_processed,
            result.inserted,
            result.updated,
            result.errors.len()
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imports::imports_model::ColumnMap;
    use diesel::result::DatabaseErrorKind;

    fn mapping(fields: &[&str]) -> ColumnMapping {
        ColumnMapping {
            columns: fields
                .iter()
                .map(|f| ColumnMap {
                    header: f.to_string(),
                    field: f.to_string(),
                })
                .collect(),
            merge_field: fields[0].to_string(),
        }
    }

    fn closed_connection() -> DieselError {
        DieselError::DatabaseError(
            DatabaseErrorKind::ClosedConnection,
            Box::new("connection gone".to_string()),
        )
    }

    #[test]
    fn test_entity_connection_loss_is_fatal_for_the_run() {
        let lost = RowFailure::from(WorkerError::from(closed_connection()));
        assert!(matches!(lost, RowFailure::StoreGone(_)));

        let lost = RowFailure::from(PhoneError::from(closed_connection()));
        assert!(matches!(lost, RowFailure::StoreGone(_)));

        let lost = RowFailure::from(SimCardError::from(closed_connection()));
        assert!(matches!(lost, RowFailure::StoreGone(_)));

        let lost = RowFailure::from(AssignmentError::from(closed_connection()));
        assert!(matches!(lost, RowFailure::StoreGone(_)));

        // Audit failures arrive wrapped in the root error
        let lost = RowFailure::from(CoreError::from(closed_connection()));
        assert!(matches!(lost, RowFailure::StoreGone(_)));
    }

    #[test]
    fn test_ordinary_statement_failures_stay_row_scoped() {
        let constraint = DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new("UNIQUE constraint failed: phones.serial_number".to_string()),
        );
        let failed = RowFailure::from(PhoneError::from(constraint));
        assert!(matches!(failed, RowFailure::Failed(_)));

        let failed = RowFailure::from(WorkerError::InvalidData("bad name".to_string()));
        assert!(matches!(failed, RowFailure::Failed(_)));
    }

    #[test]
    fn test_onboarding_detection_requires_all_three_fields() {
        assert!(ImportService::is_onboarding(&mapping(&[
            "imei",
            "iccid",
            "full_name",
            "carrier"
        ])));
        assert!(!ImportService::is_onboarding(&mapping(&["imei", "iccid"])));
        assert!(!ImportService::is_onboarding(&mapping(&[
            "asset_tag",
            "imei",
            "model"
        ])));
    }
}
