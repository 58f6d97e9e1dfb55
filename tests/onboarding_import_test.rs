use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::sqlite::SqliteConnection;
use diesel::RunQueryDsl;

use mobifleet_core::assignments::{AssignmentRepository, AssignmentRepositoryTrait, AssignmentService};
use mobifleet_core::audit::{AuditRepository, AuditRepositoryTrait, ASSET_TYPE_PHONE};
use mobifleet_core::constants::{PHONE_NUMBER_STATUS_ACTIVE, STATUS_IN_STOCK, STATUS_IN_USE};
use mobifleet_core::imports::{
    ColumnMap, ColumnMapping, ImportRepository, ImportService, ImportServiceTrait,
};
use mobifleet_core::phones::{PhoneRepository, PhoneRepositoryTrait};
use mobifleet_core::sim_cards::{SimCardRepository, SimCardRepositoryTrait};
use mobifleet_core::workers::{
    NewWorker, Secteur, Worker, WorkerError, WorkerRepository, WorkerRepositoryTrait,
};

mod common;

/// Wraps the real worker repository with a connection that dies after a
/// fixed number of name lookups
struct DroppingWorkerRepository {
    inner: WorkerRepository,
    lookups_before_drop: usize,
    lookups: AtomicUsize,
}

impl DroppingWorkerRepository {
    fn gone() -> WorkerError {
        WorkerError::from(DieselError::DatabaseError(
            DatabaseErrorKind::ClosedConnection,
            Box::new("connection gone".to_string()),
        ))
    }
}

impl WorkerRepositoryTrait for DroppingWorkerRepository {
    fn get_by_id(
        &self,
        conn: &mut SqliteConnection,
        worker_db_id: i32,
    ) -> Result<Worker, WorkerError> {
        self.inner.get_by_id(conn, worker_db_id)
    }

    fn find_by_full_name(
        &self,
        conn: &mut SqliteConnection,
        name: &str,
    ) -> Result<Option<Worker>, WorkerError> {
        if self.lookups.fetch_add(1, Ordering::SeqCst) >= self.lookups_before_drop {
            return Err(Self::gone());
        }
        self.inner.find_by_full_name(conn, name)
    }

    fn list(&self, conn: &mut SqliteConnection) -> Result<Vec<Worker>, WorkerError> {
        self.inner.list(conn)
    }

    fn list_with_secteurs(
        &self,
        conn: &mut SqliteConnection,
    ) -> Result<Vec<(Worker, Secteur)>, WorkerError> {
        self.inner.list_with_secteurs(conn)
    }

    fn create(
        &self,
        conn: &mut SqliteConnection,
        new_worker: NewWorker,
    ) -> Result<Worker, WorkerError> {
        self.inner.create(conn, new_worker)
    }

    fn set_status(
        &self,
        conn: &mut SqliteConnection,
        worker_db_id: i32,
        status: &str,
    ) -> Result<(), WorkerError> {
        self.inner.set_status(conn, worker_db_id, status)
    }

    fn ensure_default_secteur(
        &self,
        conn: &mut SqliteConnection,
    ) -> Result<Secteur, WorkerError> {
        self.inner.ensure_default_secteur(conn)
    }

    fn list_secteurs(&self, conn: &mut SqliteConnection) -> Result<Vec<Secteur>, WorkerError> {
        self.inner.list_secteurs(conn)
    }
}

fn onboarding_mapping() -> ColumnMapping {
    let pairs = [
        ("Nom", "full_name"),
        ("ICCID", "iccid"),
        ("IMEI", "imei"),
        ("Opérateur", "carrier"),
        ("Matériel", "model"),
    ];
    ColumnMapping {
        columns: pairs
            .iter()
            .map(|(header, field)| ColumnMap {
                header: header.to_string(),
                field: field.to_string(),
            })
            .collect(),
        merge_field: "imei".to_string(),
    }
}

const SHEET: &str = "Nom;ICCID;IMEI;Opérateur;Matériel\n\
                     Alice Martin;8933011111111111111;111111111111111;Orange;Galaxy S22\n\
                     Bo Li;8933012222222222222;222222222222222;SFR;Pixel 8";

#[test]
fn test_onboarding_sheet_creates_workers_sims_phones_and_assignments() {
    let (_dir, pool) = common::setup_db();
    let service = common::import_service(pool.clone());

    {
        // The importing user, referenced by the audit trail
        let mut conn = pool.get().unwrap();
        diesel::sql_query(
            "INSERT INTO users (username, password_hash, full_name, email, role_id) \
             VALUES ('admin', 'hash', 'Admin', 'admin@example.com', 1)",
        )
        .execute(&mut conn)
        .unwrap();
    }

    let result = service
        .run_import("phones", SHEET, b';', &onboarding_mapping(), Some(1))
        .unwrap();
    assert_eq!(result.inserted, 2);
    assert_eq!(result.updated, 0);
    assert!(result.errors.is_empty());

    let mut conn = pool.get().unwrap();

    let workers = WorkerRepository::new();
    let alice = workers
        .find_by_full_name(&mut conn, "Alice Martin")
        .unwrap()
        .unwrap();
    assert_eq!(alice.worker_id, "WKALICEM");

    let phones = PhoneRepository::new();
    let phone = phones
        .find_by_imei(&mut conn, "111111111111111")
        .unwrap()
        .unwrap();
    assert_eq!(phone.status, STATUS_IN_USE);
    assert_eq!(phone.model.as_deref(), Some("Galaxy S22"));
    // Missing identifiers are derived from the IMEI
    assert_eq!(phone.asset_tag, "PHONE_111111");

    let sims = SimCardRepository::new();
    let sim = sims
        .find_by_iccid(&mut conn, "8933011111111111111")
        .unwrap()
        .unwrap();
    assert_eq!(sim.status, STATUS_IN_USE);
    assert_eq!(sim.carrier.as_deref(), Some("Orange"));

    let assignments = AssignmentRepository::new();
    let open = assignments.find_open_by_phone(&mut conn, phone.id).unwrap();
    let open = open.unwrap();
    assert_eq!(open.worker_id, alice.id);
    assert_eq!(open.sim_card_id, sim.id);

    let audit = AuditRepository::new();
    let events = audit
        .get_events_for_asset(&mut conn, ASSET_TYPE_PHONE, phone.id)
        .unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event_type, "Assigned");
    assert_eq!(events[0].user_id, Some(1));
}

#[test]
fn test_rerunning_the_same_sheet_changes_nothing() {
    let (_dir, pool) = common::setup_db();
    let service = common::import_service(pool.clone());
    let map = onboarding_mapping();

    service.run_import("phones", SHEET, b';', &map, None).unwrap();
    let result = service.run_import("phones", SHEET, b';', &map, None).unwrap();
    assert_eq!(result.inserted, 0);
    assert_eq!(result.updated, 2);
    assert!(result.errors.is_empty());

    let mut conn = pool.get().unwrap();
    assert_eq!(WorkerRepository::new().list(&mut conn).unwrap().len(), 2);
    assert_eq!(PhoneRepository::new().list(&mut conn).unwrap().len(), 2);
    assert_eq!(SimCardRepository::new().list(&mut conn).unwrap().len(), 2);
    assert_eq!(
        AssignmentRepository::new().list_open(&mut conn).unwrap().len(),
        2
    );
}

#[test]
fn test_rows_missing_a_required_value_are_reported() {
    let (_dir, pool) = common::setup_db();
    let service = common::import_service(pool.clone());

    let sheet = "Nom;ICCID;IMEI;Opérateur;Matériel\n\
                 Alice Martin;8933011111111111111;111111111111111;Orange;Galaxy S22\n\
                 ;8933012222222222222;222222222222222;SFR;Pixel 8";
    let result = service
        .run_import("phones", sheet, b';', &onboarding_mapping(), None)
        .unwrap();

    assert_eq!(result.inserted, 1);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].row, 2);

    let mut conn = pool.get().unwrap();
    // The failed row left no partial SIM or phone behind
    assert!(SimCardRepository::new()
        .find_by_iccid(&mut conn, "8933012222222222222")
        .unwrap()
        .is_none());
}

#[test]
fn test_phone_number_attachment_and_lookup() {
    let (_dir, pool) = common::setup_db();
    let service = common::import_service(pool.clone());

    service
        .run_import("phones", SHEET, b';', &onboarding_mapping(), None)
        .unwrap();

    let mut conn = pool.get().unwrap();
    let sims = SimCardRepository::new();
    let alice_sim = sims
        .find_by_iccid(&mut conn, "8933011111111111111")
        .unwrap()
        .unwrap();
    let bo_sim = sims
        .find_by_iccid(&mut conn, "8933012222222222222")
        .unwrap()
        .unwrap();

    let attached = sims
        .attach_number(&mut conn, alice_sim.id, "+33612345678")
        .unwrap();
    assert_eq!(attached.phone_number, "+33612345678");
    assert_eq!(attached.sim_card_id, Some(alice_sim.id));
    assert_eq!(attached.status, PHONE_NUMBER_STATUS_ACTIVE);

    let found = sims.number_for_sim(&mut conn, alice_sim.id).unwrap();
    assert_eq!(found.unwrap().phone_number, "+33612345678");
    assert!(sims.number_for_sim(&mut conn, bo_sim.id).unwrap().is_none());
}

#[test]
fn test_store_loss_mid_onboarding_aborts_but_keeps_partial_counts() {
    let (_dir, pool) = common::setup_db();
    let service = ImportService::new(
        pool.clone(),
        Arc::new(ImportRepository::new()),
        Arc::new(DroppingWorkerRepository {
            inner: WorkerRepository::new(),
            lookups_before_drop: 1,
            lookups: AtomicUsize::new(0),
        }),
        Arc::new(PhoneRepository::new()),
        Arc::new(SimCardRepository::new()),
        Arc::new(AssignmentRepository::new()),
        Arc::new(AuditRepository::new()),
    );

    let result = service
        .run_import("phones", SHEET, b';', &onboarding_mapping(), None)
        .unwrap();

    // Row 1 landed fully, row 2 hit the dead connection and stopped the run
    assert_eq!(result.inserted, 1);
    assert_eq!(result.rows_processed, 2);
    assert!(result.aborted.is_some());
    assert!(result.errors.is_empty());

    let mut conn = pool.get().unwrap();
    assert_eq!(WorkerRepository::new().list(&mut conn).unwrap().len(), 1);
    assert!(PhoneRepository::new()
        .find_by_imei(&mut conn, "222222222222222")
        .unwrap()
        .is_none());
}

#[test]
fn test_returned_phone_is_reassigned_on_the_next_run() {
    let (_dir, pool) = common::setup_db();
    let service = common::import_service(pool.clone());
    let map = onboarding_mapping();

    service.run_import("phones", SHEET, b';', &map, None).unwrap();

    let phones: Arc<dyn PhoneRepositoryTrait> = Arc::new(PhoneRepository::new());
    let assignment_service = AssignmentService::new(
        pool.clone(),
        Arc::new(AssignmentRepository::new()),
        phones.clone(),
        Arc::new(SimCardRepository::new()),
        Arc::new(AuditRepository::new()),
    );

    let (phone, open) = {
        let mut conn = pool.get().unwrap();
        let phone = phones
            .find_by_imei(&mut conn, "111111111111111")
            .unwrap()
            .unwrap();
        let open = AssignmentRepository::new()
            .find_open_by_phone(&mut conn, phone.id)
            .unwrap()
            .unwrap();
        (phone, open)
    };

    assignment_service.return_assignment(open.id, None).unwrap();
    {
        let mut conn = pool.get().unwrap();
        let phone = phones.find_by_imei(&mut conn, "111111111111111").unwrap().unwrap();
        assert_eq!(phone.status, STATUS_IN_STOCK);
    }

    // A rerun opens a fresh assignment for the returned phone only
    service.run_import("phones", SHEET, b';', &map, None).unwrap();
    let mut conn = pool.get().unwrap();
    let reopened = AssignmentRepository::new()
        .find_open_by_phone(&mut conn, phone.id)
        .unwrap();
    assert!(reopened.is_some());
    assert_ne!(reopened.unwrap().id, open.id);
    let phone = phones.find_by_imei(&mut conn, "111111111111111").unwrap().unwrap();
    assert_eq!(phone.status, STATUS_IN_USE);
}
