use std::sync::Arc;

use crate::db::{get_connection, DbPool};
use crate::errors::Result;

use super::phones_model::{NewPhone, Phone};
use super::phones_traits::PhoneRepositoryTrait;

/// Service for managing the phone inventory
pub struct PhoneService {
    pool: Arc<DbPool>,
    repository: Arc<dyn PhoneRepositoryTrait>,
}

impl PhoneService {
    /// Creates a new PhoneService instance with injected dependencies
    pub fn new(pool: Arc<DbPool>, repository: Arc<dyn PhoneRepositoryTrait>) -> Self {
        Self { pool, repository }
    }

    pub fn get_phone(&self, phone_id: i32) -> Result<Phone> {
        let mut conn = get_connection(&self.pool)?;
        Ok(self.repository.get_by_id(&mut conn, phone_id)?)
    }

    pub fn get_phones(&self) -> Result<Vec<Phone>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(self.repository.list(&mut conn)?)
    }

    pub fn find_by_asset_tag(&self, tag: &str) -> Result<Option<Phone>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(self.repository.find_by_asset_tag(&mut conn, tag)?)
    }

    pub fn create_phone(&self, new_phone: NewPhone) -> Result<Phone> {
        let mut conn = get_connection(&self.pool)?;
        Ok(self.repository.create(&mut conn, new_phone)?)
    }

    pub fn set_phone_status(&self, phone_id: i32, status: &str) -> Result<()> {
        let mut conn = get_connection(&self.pool)?;
        Ok(self.repository.set_status(&mut conn, phone_id, status)?)
    }
}
