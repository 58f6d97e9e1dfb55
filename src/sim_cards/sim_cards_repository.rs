use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::constants::PHONE_NUMBER_STATUS_ACTIVE;
use crate::schema::{phone_numbers, sim_cards};

use super::sim_cards_errors::{Result, SimCardError};
use super::sim_cards_model::{NewPhoneNumber, NewSimCard, PhoneNumber, SimCard, SimCardUpsert};
use super::sim_cards_traits::SimCardRepositoryTrait;

/// Repository for managing SIM cards and their phone numbers
pub struct SimCardRepository;

impl SimCardRepository {
    /// Creates a new SimCardRepository instance
    pub fn new() -> Self {
        Self
    }
}

impl Default for SimCardRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl SimCardRepositoryTrait for SimCardRepository {
    fn get_by_id(&self, conn: &mut SqliteConnection, sim_id: i32) -> Result<SimCard> {
        sim_cards::table
            .find(sim_id)
            .select(SimCard::as_select())
            .first::<SimCard>(conn)
            .map_err(|e| match e {
                diesel::result::Error::NotFound => {
                    SimCardError::NotFound(format!("SIM card with id {} not found", sim_id))
                }
                _ => SimCardError::DatabaseError(e.to_string()),
            })
    }

    fn find_by_iccid(
        &self,
        conn: &mut SqliteConnection,
        iccid_value: &str,
    ) -> Result<Option<SimCard>> {
        sim_cards::table
            .filter(sim_cards::iccid.eq(iccid_value))
            .select(SimCard::as_select())
            .first::<SimCard>(conn)
            .optional()
            .map_err(SimCardError::from)
    }

    fn list(&self, conn: &mut SqliteConnection) -> Result<Vec<SimCard>> {
        sim_cards::table
            .order(sim_cards::iccid.asc())
            .select(SimCard::as_select())
            .load::<SimCard>(conn)
            .map_err(SimCardError::from)
    }

    fn create(&self, conn: &mut SqliteConnection, new_sim: NewSimCard) -> Result<SimCard> {
        new_sim.validate()?;

        diesel::insert_into(sim_cards::table)
            .values(&new_sim)
            .get_result::<SimCard>(conn)
            .map_err(SimCardError::from)
    }

    fn upsert_by_iccid(
        &self,
        conn: &mut SqliteConnection,
        upsert: SimCardUpsert,
    ) -> Result<(SimCard, bool)> {
        let existing = self.find_by_iccid(conn, &upsert.iccid)?;

        match existing {
            Some(current) => {
                let fields = upsert.clone().into_new_sim_card();
                let updated = diesel::update(sim_cards::table.find(current.id))
                    .set((
                        sim_cards::carrier.eq(fields.carrier.or_else(|| current.carrier.clone())),
                        sim_cards::plan_details
                            .eq(fields.plan_details.or_else(|| current.plan_details.clone())),
                        // An absent status keeps whatever the SIM is in now
                        sim_cards::status
                            .eq(upsert.status.unwrap_or_else(|| current.status.clone())),
                    ))
                    .get_result::<SimCard>(conn)?;
                Ok((updated, false))
            }
            None => {
                let inserted = self.create(conn, upsert.into_new_sim_card())?;
                Ok((inserted, true))
            }
        }
    }

    fn set_status(
        &self,
        conn: &mut SqliteConnection,
        sim_id: i32,
        new_status: &str,
    ) -> Result<()> {
        let affected = diesel::update(sim_cards::table.find(sim_id))
            .set(sim_cards::status.eq(new_status))
            .execute(conn)?;

        if affected == 0 {
            return Err(SimCardError::NotFound(format!(
                "SIM card with id {} not found",
                sim_id
            )));
        }
        Ok(())
    }

    fn attach_number(
        &self,
        conn: &mut SqliteConnection,
        sim_id: i32,
        number: &str,
    ) -> Result<PhoneNumber> {
        let new_number = NewPhoneNumber {
            phone_number: number.to_string(),
            sim_card_id: Some(sim_id),
            status: PHONE_NUMBER_STATUS_ACTIVE.to_string(),
        };

        diesel::insert_into(phone_numbers::table)
            .values(&new_number)
            .get_result::<PhoneNumber>(conn)
            .map_err(SimCardError::from)
    }

    fn number_for_sim(
        &self,
        conn: &mut SqliteConnection,
        sim_id: i32,
    ) -> Result<Option<PhoneNumber>> {
        phone_numbers::table
            .filter(phone_numbers::sim_card_id.eq(sim_id))
            .select(PhoneNumber::as_select())
            .first::<PhoneNumber>(conn)
            .optional()
            .map_err(SimCardError::from)
    }
}
