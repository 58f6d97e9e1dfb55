use diesel::sqlite::SqliteConnection;

use super::assignments_errors::Result;
use super::assignments_model::{Assignment, NewAssignment};

/// Trait defining the contract for assignment repository operations.
pub trait AssignmentRepositoryTrait: Send + Sync {
    fn get_by_id(&self, conn: &mut SqliteConnection, assignment_id: i32) -> Result<Assignment>;
    /// Finds the open assignment for a phone, if any. At most one assignment
    /// per phone is open at a time.
    fn find_open_by_phone(
        &self,
        conn: &mut SqliteConnection,
        phone_id: i32,
    ) -> Result<Option<Assignment>>;
    fn list_open(&self, conn: &mut SqliteConnection) -> Result<Vec<Assignment>>;
    fn create(&self, conn: &mut SqliteConnection, new_assignment: NewAssignment)
        -> Result<Assignment>;
    /// Stamps the return date, closing the assignment.
    fn close(&self, conn: &mut SqliteConnection, assignment_id: i32) -> Result<Assignment>;
}
