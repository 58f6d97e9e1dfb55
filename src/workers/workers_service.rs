use std::sync::Arc;

use crate::db::{get_connection, DbPool};
use crate::errors::Result;

use super::workers_model::{NewWorker, Secteur, Worker};
use super::workers_traits::WorkerRepositoryTrait;

/// Service for managing workers and sectors
pub struct WorkerService {
    pool: Arc<DbPool>,
    repository: Arc<dyn WorkerRepositoryTrait>,
}

impl WorkerService {
    /// Creates a new WorkerService instance with injected dependencies
    pub fn new(pool: Arc<DbPool>, repository: Arc<dyn WorkerRepositoryTrait>) -> Self {
        Self { pool, repository }
    }

    pub fn get_worker(&self, worker_db_id: i32) -> Result<Worker> {
        let mut conn = get_connection(&self.pool)?;
        Ok(self.repository.get_by_id(&mut conn, worker_db_id)?)
    }

    pub fn get_workers(&self) -> Result<Vec<Worker>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(self.repository.list(&mut conn)?)
    }

    pub fn get_workers_with_secteurs(&self) -> Result<Vec<(Worker, Secteur)>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(self.repository.list_with_secteurs(&mut conn)?)
    }

    pub fn create_worker(&self, new_worker: NewWorker) -> Result<Worker> {
        let mut conn = get_connection(&self.pool)?;
        Ok(self.repository.create(&mut conn, new_worker)?)
    }

    pub fn set_worker_status(&self, worker_db_id: i32, status: &str) -> Result<()> {
        let mut conn = get_connection(&self.pool)?;
        Ok(self.repository.set_status(&mut conn, worker_db_id, status)?)
    }

    pub fn get_secteurs(&self) -> Result<Vec<Secteur>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(self.repository.list_secteurs(&mut conn)?)
    }
}
