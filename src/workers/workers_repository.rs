use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::schema::{secteurs, workers};

use super::workers_errors::{Result, WorkerError};
use super::workers_model::{NewSecteur, NewWorker, Secteur, Worker};
use super::workers_traits::WorkerRepositoryTrait;

/// Repository for managing worker and sector data in the database
pub struct WorkerRepository;

impl WorkerRepository {
    /// Creates a new WorkerRepository instance
    pub fn new() -> Self {
        Self
    }
}

impl Default for WorkerRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkerRepositoryTrait for WorkerRepository {
    fn get_by_id(&self, conn: &mut SqliteConnection, worker_db_id: i32) -> Result<Worker> {
        workers::table
            .find(worker_db_id)
            .select(Worker::as_select())
            .first::<Worker>(conn)
            .map_err(|e| match e {
                diesel::result::Error::NotFound => {
                    WorkerError::NotFound(format!("Worker with id {} not found", worker_db_id))
                }
                _ => WorkerError::DatabaseError(e.to_string()),
            })
    }

    fn find_by_full_name(
        &self,
        conn: &mut SqliteConnection,
        name: &str,
    ) -> Result<Option<Worker>> {
        workers::table
            .filter(workers::full_name.eq(name))
            .select(Worker::as_select())
            .first::<Worker>(conn)
            .optional()
            .map_err(WorkerError::from)
    }

    fn list(&self, conn: &mut SqliteConnection) -> Result<Vec<Worker>> {
        workers::table
            .order(workers::full_name.asc())
            .select(Worker::as_select())
            .load::<Worker>(conn)
            .map_err(WorkerError::from)
    }

    fn list_with_secteurs(
        &self,
        conn: &mut SqliteConnection,
    ) -> Result<Vec<(Worker, Secteur)>> {
        workers::table
            .inner_join(secteurs::table)
            .order(workers::full_name.asc())
            .select((Worker::as_select(), Secteur::as_select()))
            .load::<(Worker, Secteur)>(conn)
            .map_err(WorkerError::from)
    }

    fn create(&self, conn: &mut SqliteConnection, new_worker: NewWorker) -> Result<Worker> {
        new_worker.validate()?;

        diesel::insert_into(workers::table)
            .values(&new_worker)
            .get_result::<Worker>(conn)
            .map_err(WorkerError::from)
    }

    fn set_status(
        &self,
        conn: &mut SqliteConnection,
        worker_db_id: i32,
        new_status: &str,
    ) -> Result<()> {
        let affected = diesel::update(workers::table.find(worker_db_id))
            .set(workers::status.eq(new_status))
            .execute(conn)?;

        if affected == 0 {
            return Err(WorkerError::NotFound(format!(
                "Worker with id {} not found",
                worker_db_id
            )));
        }
        Ok(())
    }

    fn ensure_default_secteur(&self, conn: &mut SqliteConnection) -> Result<Secteur> {
        let existing = secteurs::table
            .order(secteurs::id.asc())
            .select(Secteur::as_select())
            .first::<Secteur>(conn)
            .optional()?;

        if let Some(secteur) = existing {
            return Ok(secteur);
        }

        let new_secteur = NewSecteur {
            secteur_name: crate::constants::DEFAULT_SECTOR_NAME.to_string(),
            manager_id: None,
            description: Some("Auto-created during CSV import".to_string()),
        };

        diesel::insert_into(secteurs::table)
            .values(&new_secteur)
            .get_result::<Secteur>(conn)
            .map_err(WorkerError::from)
    }

    fn list_secteurs(&self, conn: &mut SqliteConnection) -> Result<Vec<Secteur>> {
        secteurs::table
            .order(secteurs::secteur_name.asc())
            .select(Secteur::as_select())
            .load::<Secteur>(conn)
            .map_err(WorkerError::from)
    }
}
