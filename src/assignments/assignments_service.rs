use std::sync::Arc;

use diesel::Connection;
use log::info;

use crate::audit::{AuditRepositoryTrait, ASSET_TYPE_PHONE, ASSET_TYPE_SIM};
use crate::constants::{STATUS_IN_STOCK, STATUS_IN_USE};
use crate::db::{get_connection, DbPool};
use crate::errors::{Error, Result};
use crate::phones::PhoneRepositoryTrait;
use crate::sim_cards::SimCardRepositoryTrait;

use super::assignments_errors::AssignmentError;
use super::assignments_model::{Assignment, NewAssignment};
use super::assignments_traits::AssignmentRepositoryTrait;

/// Service for assigning and returning devices
pub struct AssignmentService {
    pool: Arc<DbPool>,
    assignments: Arc<dyn AssignmentRepositoryTrait>,
    phones: Arc<dyn PhoneRepositoryTrait>,
    sim_cards: Arc<dyn SimCardRepositoryTrait>,
    audit: Arc<dyn AuditRepositoryTrait>,
}

impl AssignmentService {
    /// Creates a new AssignmentService instance with injected dependencies
    pub fn new(
        pool: Arc<DbPool>,
        assignments: Arc<dyn AssignmentRepositoryTrait>,
        phones: Arc<dyn PhoneRepositoryTrait>,
        sim_cards: Arc<dyn SimCardRepositoryTrait>,
        audit: Arc<dyn AuditRepositoryTrait>,
    ) -> Self {
        Self {
            pool,
            assignments,
            phones,
            sim_cards,
            audit,
        }
    }

    pub fn get_open_assignments(&self) -> Result<Vec<Assignment>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(self.assignments.list_open(&mut conn)?)
    }

    pub fn find_open_for_phone(&self, phone_id: i32) -> Result<Option<Assignment>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(self.assignments.find_open_by_phone(&mut conn, phone_id)?)
    }

    /// Links a worker, phone and SIM. Rejects the link when the phone already
    /// has an open assignment.
    pub fn assign(&self, new_assignment: NewAssignment, actor: Option<i32>) -> Result<Assignment> {
        let mut conn = get_connection(&self.pool)?;

        conn.transaction::<Assignment, Error, _>(|conn| {
            if let Some(open) = self
                .assignments
                .find_open_by_phone(conn, new_assignment.phone_id)?
            {
                return Err(AssignmentError::InvalidData(format!(
                    "Phone {} already has open assignment {}",
                    new_assignment.phone_id, open.id
                ))
                .into());
            }

            let assignment = self.assignments.create(conn, new_assignment)?;
            self.phones
                .set_status(conn, assignment.phone_id, STATUS_IN_USE)?;
            self.sim_cards
                .set_status(conn, assignment.sim_card_id, STATUS_IN_USE)?;
            self.audit.log_event(
                conn,
                actor,
                ASSET_TYPE_PHONE,
                assignment.phone_id,
                "Assigned",
                &format!("Assigned to worker {}", assignment.worker_id),
            )?;

            info!(
                "Assignment {} created: phone {} / sim {} / worker {}",
                assignment.id, assignment.phone_id, assignment.sim_card_id, assignment.worker_id
            );
            Ok(assignment)
        })
    }

    /// Closes an open assignment and returns the phone and SIM to stock.
    pub fn return_assignment(&self, assignment_id: i32, actor: Option<i32>) -> Result<Assignment> {
        let mut conn = get_connection(&self.pool)?;

        conn.transaction::<Assignment, Error, _>(|conn| {
            let assignment = self.assignments.close(conn, assignment_id)?;
            self.phones
                .set_status(conn, assignment.phone_id, STATUS_IN_STOCK)?;
            self.sim_cards
                .set_status(conn, assignment.sim_card_id, STATUS_IN_STOCK)?;
            self.audit.log_event(
                conn,
                actor,
                ASSET_TYPE_PHONE,
                assignment.phone_id,
                "Returned",
                &format!("Returned by worker {}", assignment.worker_id),
            )?;
            self.audit.log_event(
                conn,
                actor,
                ASSET_TYPE_SIM,
                assignment.sim_card_id,
                "Returned",
                &format!("Returned by worker {}", assignment.worker_id),
            )?;

            info!("Assignment {} closed", assignment.id);
            Ok(assignment)
        })
    }
}
