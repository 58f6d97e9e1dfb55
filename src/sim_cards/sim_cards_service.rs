use std::sync::Arc;

use crate::db::{get_connection, DbPool};
use crate::errors::Result;

use super::sim_cards_model::{NewSimCard, PhoneNumber, SimCard};
use super::sim_cards_traits::SimCardRepositoryTrait;

/// Service for managing SIM cards
pub struct SimCardService {
    pool: Arc<DbPool>,
    repository: Arc<dyn SimCardRepositoryTrait>,
}

impl SimCardService {
    /// Creates a new SimCardService instance with injected dependencies
    pub fn new(pool: Arc<DbPool>, repository: Arc<dyn SimCardRepositoryTrait>) -> Self {
        Self { pool, repository }
    }

    pub fn get_sim_card(&self, sim_id: i32) -> Result<SimCard> {
        let mut conn = get_connection(&self.pool)?;
        Ok(self.repository.get_by_id(&mut conn, sim_id)?)
    }

    pub fn get_sim_cards(&self) -> Result<Vec<SimCard>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(self.repository.list(&mut conn)?)
    }

    pub fn create_sim_card(&self, new_sim: NewSimCard) -> Result<SimCard> {
        let mut conn = get_connection(&self.pool)?;
        Ok(self.repository.create(&mut conn, new_sim)?)
    }

    pub fn set_sim_status(&self, sim_id: i32, status: &str) -> Result<()> {
        let mut conn = get_connection(&self.pool)?;
        Ok(self.repository.set_status(&mut conn, sim_id, status)?)
    }

    pub fn attach_number(&self, sim_id: i32, number: &str) -> Result<PhoneNumber> {
        let mut conn = get_connection(&self.pool)?;
        Ok(self.repository.attach_number(&mut conn, sim_id, number)?)
    }

    pub fn number_for_sim(&self, sim_id: i32) -> Result<Option<PhoneNumber>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(self.repository.number_for_sim(&mut conn, sim_id)?)
    }
}
