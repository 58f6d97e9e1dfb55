use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::constants::STATUS_IN_STOCK;

use super::phones_errors::{PhoneError, Result};

/// Domain model representing a managed mobile device
#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::phones)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct Phone {
    pub id: i32,
    pub asset_tag: String,
    pub imei: String,
    pub serial_number: String,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub warranty_end_date: Option<NaiveDate>,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for creating a new phone
#[derive(Debug, Clone, Insertable, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::phones)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct NewPhone {
    pub asset_tag: String,
    pub imei: String,
    pub serial_number: String,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub warranty_end_date: Option<NaiveDate>,
    pub status: String,
    pub notes: Option<String>,
}

impl NewPhone {
    /// Validates the new phone data
    pub fn validate(&self) -> Result<()> {
        if self.asset_tag.trim().is_empty() {
            return Err(PhoneError::InvalidData(
                "Asset tag cannot be empty".to_string(),
            ));
        }
        if self.imei.trim().is_empty() {
            return Err(PhoneError::InvalidData("IMEI cannot be empty".to_string()));
        }
        if self.serial_number.trim().is_empty() {
            return Err(PhoneError::InvalidData(
                "Serial number cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Field set applied by the IMEI-keyed upsert during imports
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhoneUpsert {
    pub imei: String,
    pub asset_tag: Option<String>,
    pub serial_number: Option<String>,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub status: Option<String>,
}

impl PhoneUpsert {
    /// Fills the defaulted fields the same way the onboarding import does:
    /// asset tag and serial number are derived from the IMEI suffix when absent.
    pub fn into_new_phone(self) -> NewPhone {
        let imei = self.imei;
        let asset_tag = self
            .asset_tag
            .unwrap_or_else(|| format!("PHONE_{}", tail(&imei, 6)));
        let serial_number = self
            .serial_number
            .unwrap_or_else(|| format!("SN_{}", tail(&imei, 8)));

        NewPhone {
            asset_tag,
            imei,
            serial_number,
            manufacturer: self.manufacturer,
            model: self.model,
            purchase_date: None,
            warranty_end_date: None,
            status: self.status.unwrap_or_else(|| STATUS_IN_STOCK.to_string()),
            notes: None,
        }
    }
}

fn tail(s: &str, n: usize) -> &str {
    let len = s.chars().count();
    if len <= n {
        s
    } else {
        let start = s
            .char_indices()
            .nth(len - n)
            .map(|(i, _)| i)
            .unwrap_or(0);
        &s[start..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upsert_defaults_from_imei() {
        let upsert = PhoneUpsert {
            imei: "123456789012345".to_string(),
            asset_tag: None,
            serial_number: None,
            manufacturer: None,
            model: Some("Galaxy S22".to_string()),
            status: None,
        };
        let new_phone = upsert.into_new_phone();
        assert_eq!(new_phone.asset_tag, "PHONE_012345");
        assert_eq!(new_phone.serial_number, "SN_89012345");
        assert_eq!(new_phone.status, STATUS_IN_STOCK);
    }
}
