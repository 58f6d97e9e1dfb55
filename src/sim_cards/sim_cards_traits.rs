use diesel::sqlite::SqliteConnection;

use super::sim_cards_errors::Result;
use super::sim_cards_model::{NewSimCard, PhoneNumber, SimCard, SimCardUpsert};

/// Trait defining the contract for SIM card repository operations.
pub trait SimCardRepositoryTrait: Send + Sync {
    fn get_by_id(&self, conn: &mut SqliteConnection, sim_id: i32) -> Result<SimCard>;
    fn find_by_iccid(&self, conn: &mut SqliteConnection, iccid: &str) -> Result<Option<SimCard>>;
    fn list(&self, conn: &mut SqliteConnection) -> Result<Vec<SimCard>>;
    fn create(&self, conn: &mut SqliteConnection, new_sim: NewSimCard) -> Result<SimCard>;
    /// Inserts or updates a SIM card keyed by ICCID. The boolean is true when
    /// a new row was inserted, false when an existing row was updated.
    fn upsert_by_iccid(
        &self,
        conn: &mut SqliteConnection,
        upsert: SimCardUpsert,
    ) -> Result<(SimCard, bool)>;
    fn set_status(&self, conn: &mut SqliteConnection, sim_id: i32, status: &str) -> Result<()>;
    fn attach_number(
        &self,
        conn: &mut SqliteConnection,
        sim_id: i32,
        number: &str,
    ) -> Result<PhoneNumber>;
    fn number_for_sim(
        &self,
        conn: &mut SqliteConnection,
        sim_id: i32,
    ) -> Result<Option<PhoneNumber>>;
}
