use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::constants::STATUS_IN_STOCK;

use super::sim_cards_errors::{Result, SimCardError};

/// Domain model representing a SIM card
#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::sim_cards)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct SimCard {
    pub id: i32,
    pub iccid: String,
    pub carrier: Option<String>,
    pub plan_details: Option<String>,
    pub status: String,
}

/// Input model for creating a new SIM card
#[derive(Debug, Clone, Insertable, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::sim_cards)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct NewSimCard {
    pub iccid: String,
    pub carrier: Option<String>,
    pub plan_details: Option<String>,
    pub status: String,
}

impl NewSimCard {
    /// Validates the new SIM card data
    pub fn validate(&self) -> Result<()> {
        if self.iccid.trim().is_empty() {
            return Err(SimCardError::InvalidData(
                "ICCID cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Field set applied by the ICCID-keyed upsert during imports
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimCardUpsert {
    pub iccid: String,
    pub carrier: Option<String>,
    pub pin: Option<String>,
    pub puk: Option<String>,
    pub status: Option<String>,
}

impl SimCardUpsert {
    /// PIN and PUK are folded into the plan details text; onboarding sheets
    /// carry them alongside the ICCID.
    pub fn into_new_sim_card(self) -> NewSimCard {
        let plan_details = match (&self.pin, &self.puk) {
            (None, None) => None,
            (pin, puk) => Some(format!(
                "PIN: {}, PUK: {}",
                pin.as_deref().unwrap_or("-"),
                puk.as_deref().unwrap_or("-")
            )),
        };

        NewSimCard {
            iccid: self.iccid,
            carrier: self.carrier,
            plan_details,
            status: self.status.unwrap_or_else(|| STATUS_IN_STOCK.to_string()),
        }
    }
}

/// Phone number provisioned on a SIM card
#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::phone_numbers)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct PhoneNumber {
    pub id: i32,
    pub phone_number: String,
    pub sim_card_id: Option<i32>,
    pub status: String,
}

/// Input model for attaching a phone number to a SIM card
#[derive(Debug, Clone, Insertable, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::phone_numbers)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct NewPhoneNumber {
    pub phone_number: String,
    pub sim_card_id: Option<i32>,
    pub status: String,
}
