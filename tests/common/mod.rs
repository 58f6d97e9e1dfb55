use std::sync::Arc;

use tempfile::TempDir;

use mobifleet_core::assignments::AssignmentRepository;
use mobifleet_core::audit::AuditRepository;
use mobifleet_core::db::{self, DbPool};
use mobifleet_core::imports::{ImportRepository, ImportService};
use mobifleet_core::phones::PhoneRepository;
use mobifleet_core::sim_cards::SimCardRepository;
use mobifleet_core::workers::WorkerRepository;

/// Creates a migrated database in a temporary directory. The directory is
/// removed when the returned guard drops, so keep it alive for the test.
pub fn setup_db() -> (TempDir, Arc<DbPool>) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db_path =
        db::init(dir.path().to_str().unwrap()).expect("Failed to initialize database");
    let pool = db::create_pool(&db_path).expect("Failed to create database pool");
    db::run_migrations(&pool).expect("Failed to run migrations");
    (dir, pool)
}

pub fn import_service(pool: Arc<DbPool>) -> ImportService {
    ImportService::new(
        pool,
        Arc::new(ImportRepository::new()),
        Arc::new(WorkerRepository::new()),
        Arc::new(PhoneRepository::new()),
        Arc::new(SimCardRepository::new()),
        Arc::new(AssignmentRepository::new()),
        Arc::new(AuditRepository::new()),
    )
}
