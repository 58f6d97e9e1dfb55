use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

pub const ASSET_TYPE_PHONE: &str = "Phone";
pub const ASSET_TYPE_SIM: &str = "SIM";
pub const ASSET_TYPE_WORKER: &str = "Worker";

/// One audit-trail entry for an asset lifecycle event
#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::asset_history_log)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct AssetHistoryEvent {
    pub id: i32,
    pub asset_type: String,
    pub asset_id: i32,
    pub event_type: String,
    pub event_timestamp: NaiveDateTime,
    pub user_id: Option<i32>,
    pub details: Option<String>,
}

/// Insertable audit-trail entry; the actor is always threaded in explicitly
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::schema::asset_history_log)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct NewAssetHistoryEvent {
    pub asset_type: String,
    pub asset_id: i32,
    pub event_type: String,
    pub user_id: Option<i32>,
    pub details: Option<String>,
}
