use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::schema::assignments;

use super::assignments_errors::{AssignmentError, Result};
use super::assignments_model::{Assignment, NewAssignment};
use super::assignments_traits::AssignmentRepositoryTrait;

/// Repository for managing worker/phone/SIM assignments
pub struct AssignmentRepository;

impl AssignmentRepository {
    /// Creates a new AssignmentRepository instance
    pub fn new() -> Self {
        Self
    }
}

impl Default for AssignmentRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl AssignmentRepositoryTrait for AssignmentRepository {
    fn get_by_id(&self, conn: &mut SqliteConnection, assignment_id: i32) -> Result<Assignment> {
        assignments::table
            .find(assignment_id)
            .select(Assignment::as_select())
            .first::<Assignment>(conn)
            .map_err(|e| match e {
                diesel::result::Error::NotFound => AssignmentError::NotFound(format!(
                    "Assignment with id {} not found",
                    assignment_id
                )),
                _ => AssignmentError::DatabaseError(e.to_string()),
            })
    }

    fn find_open_by_phone(
        &self,
        conn: &mut SqliteConnection,
        phone: i32,
    ) -> Result<Option<Assignment>> {
        assignments::table
            .filter(assignments::phone_id.eq(phone))
            .filter(assignments::return_date.is_null())
            .select(Assignment::as_select())
            .first::<Assignment>(conn)
            .optional()
            .map_err(AssignmentError::from)
    }

    fn list_open(&self, conn: &mut SqliteConnection) -> Result<Vec<Assignment>> {
        assignments::table
            .filter(assignments::return_date.is_null())
            .order(assignments::assignment_date.desc())
            .select(Assignment::as_select())
            .load::<Assignment>(conn)
            .map_err(AssignmentError::from)
    }

    fn create(
        &self,
        conn: &mut SqliteConnection,
        new_assignment: NewAssignment,
    ) -> Result<Assignment> {
        diesel::insert_into(assignments::table)
            .values(&new_assignment)
            .get_result::<Assignment>(conn)
            .map_err(AssignmentError::from)
    }

    fn close(&self, conn: &mut SqliteConnection, assignment_id: i32) -> Result<Assignment> {
        let assignment = self.get_by_id(conn, assignment_id)?;
        if !assignment.is_open() {
            return Err(AssignmentError::InvalidData(format!(
                "Assignment {} is already closed",
                assignment_id
            )));
        }

        diesel::update(assignments::table.find(assignment_id))
            .set(assignments::return_date.eq(Some(Utc::now().naive_utc())))
            .get_result::<Assignment>(conn)
            .map_err(AssignmentError::from)
    }
}
