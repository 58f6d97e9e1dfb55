use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::schema::phones;

use super::phones_errors::{PhoneError, Result};
use super::phones_model::{NewPhone, Phone, PhoneUpsert};
use super::phones_traits::PhoneRepositoryTrait;

/// Repository for managing phone inventory in the database
pub struct PhoneRepository;

impl PhoneRepository {
    /// Creates a new PhoneRepository instance
    pub fn new() -> Self {
        Self
    }
}

impl Default for PhoneRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl PhoneRepositoryTrait for PhoneRepository {
    fn get_by_id(&self, conn: &mut SqliteConnection, phone_id: i32) -> Result<Phone> {
        phones::table
            .find(phone_id)
            .select(Phone::as_select())
            .first::<Phone>(conn)
            .map_err(|e| match e {
                diesel::result::Error::NotFound => {
                    PhoneError::NotFound(format!("Phone with id {} not found", phone_id))
                }
                _ => PhoneError::DatabaseError(e.to_string()),
            })
    }

    fn find_by_imei(&self, conn: &mut SqliteConnection, imei_value: &str) -> Result<Option<Phone>> {
        phones::table
            .filter(phones::imei.eq(imei_value))
            .select(Phone::as_select())
            .first::<Phone>(conn)
            .optional()
            .map_err(PhoneError::from)
    }

    fn find_by_asset_tag(&self, conn: &mut SqliteConnection, tag: &str) -> Result<Option<Phone>> {
        phones::table
            .filter(phones::asset_tag.eq(tag))
            .select(Phone::as_select())
            .first::<Phone>(conn)
            .optional()
            .map_err(PhoneError::from)
    }

    fn list(&self, conn: &mut SqliteConnection) -> Result<Vec<Phone>> {
        phones::table
            .order(phones::asset_tag.asc())
            .select(Phone::as_select())
            .load::<Phone>(conn)
            .map_err(PhoneError::from)
    }

    fn create(&self, conn: &mut SqliteConnection, new_phone: NewPhone) -> Result<Phone> {
        new_phone.validate()?;

        diesel::insert_into(phones::table)
            .values(&new_phone)
            .get_result::<Phone>(conn)
            .map_err(PhoneError::from)
    }

    fn upsert_by_imei(
        &self,
        conn: &mut SqliteConnection,
        upsert: PhoneUpsert,
    ) -> Result<(Phone, bool)> {
        let existing = self.find_by_imei(conn, &upsert.imei)?;

        match existing {
            Some(current) => {
                let updated = diesel::update(phones::table.find(current.id))
                    .set((
                        phones::asset_tag
                            .eq(upsert.asset_tag.unwrap_or_else(|| current.asset_tag.clone())),
                        phones::serial_number.eq(upsert
                            .serial_number
                            .unwrap_or_else(|| current.serial_number.clone())),
                        phones::manufacturer
                            .eq(upsert.manufacturer.or_else(|| current.manufacturer.clone())),
                        phones::model.eq(upsert.model.or_else(|| current.model.clone())),
                        phones::status
                            .eq(upsert.status.unwrap_or_else(|| current.status.clone())),
                        phones::updated_at.eq(Utc::now().naive_utc()),
                    ))
                    .get_result::<Phone>(conn)?;
                Ok((updated, false))
            }
            None => {
                let inserted = self.create(conn, upsert.into_new_phone())?;
                Ok((inserted, true))
            }
        }
    }

    fn set_status(
        &self,
        conn: &mut SqliteConnection,
        phone_id: i32,
        new_status: &str,
    ) -> Result<()> {
        let affected = diesel::update(phones::table.find(phone_id))
            .set((
                phones::status.eq(new_status),
                phones::updated_at.eq(Utc::now().naive_utc()),
            ))
            .execute(conn)?;

        if affected == 0 {
            return Err(PhoneError::NotFound(format!(
                "Phone with id {} not found",
                phone_id
            )));
        }
        Ok(())
    }
}
