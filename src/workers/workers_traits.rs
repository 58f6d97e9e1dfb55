use diesel::sqlite::SqliteConnection;

use super::workers_errors::Result;
use super::workers_model::{NewWorker, Secteur, Worker};

/// Trait defining the contract for worker repository operations.
pub trait WorkerRepositoryTrait: Send + Sync {
    fn get_by_id(&self, conn: &mut SqliteConnection, worker_db_id: i32) -> Result<Worker>;
    fn find_by_full_name(&self, conn: &mut SqliteConnection, name: &str)
        -> Result<Option<Worker>>;
    fn list(&self, conn: &mut SqliteConnection) -> Result<Vec<Worker>>;
    /// Workers joined with their sector, ordered by name.
    fn list_with_secteurs(&self, conn: &mut SqliteConnection) -> Result<Vec<(Worker, Secteur)>>;
    fn create(&self, conn: &mut SqliteConnection, new_worker: NewWorker) -> Result<Worker>;
    fn set_status(&self, conn: &mut SqliteConnection, worker_db_id: i32, status: &str)
        -> Result<()>;
    /// Returns the first sector, creating the default one when none exists.
    fn ensure_default_secteur(&self, conn: &mut SqliteConnection) -> Result<Secteur>;
    fn list_secteurs(&self, conn: &mut SqliteConnection) -> Result<Vec<Secteur>>;
}
