use diesel::sqlite::SqliteConnection;

use super::phones_errors::Result;
use super::phones_model::{NewPhone, Phone, PhoneUpsert};

/// Trait defining the contract for phone repository operations.
pub trait PhoneRepositoryTrait: Send + Sync {
    fn get_by_id(&self, conn: &mut SqliteConnection, phone_id: i32) -> Result<Phone>;
    fn find_by_imei(&self, conn: &mut SqliteConnection, imei: &str) -> Result<Option<Phone>>;
    fn find_by_asset_tag(&self, conn: &mut SqliteConnection, tag: &str) -> Result<Option<Phone>>;
    fn list(&self, conn: &mut SqliteConnection) -> Result<Vec<Phone>>;
    fn create(&self, conn: &mut SqliteConnection, new_phone: NewPhone) -> Result<Phone>;
    /// Inserts or updates a phone keyed by IMEI. The boolean is true when a
    /// new row was inserted, false when an existing row was updated.
    fn upsert_by_imei(
        &self,
        conn: &mut SqliteConnection,
        upsert: PhoneUpsert,
    ) -> Result<(Phone, bool)>;
    fn set_status(&self, conn: &mut SqliteConnection, phone_id: i32, status: &str) -> Result<()>;
}
