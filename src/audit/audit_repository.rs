use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::errors::Result;
use crate::schema::asset_history_log;

use super::audit_model::{AssetHistoryEvent, NewAssetHistoryEvent};

/// Trait defining the contract for audit-trail operations.
pub trait AuditRepositoryTrait: Send + Sync {
    fn log_event(
        &self,
        conn: &mut SqliteConnection,
        actor: Option<i32>,
        asset_type: &str,
        asset_id: i32,
        event_type: &str,
        details: &str,
    ) -> Result<()>;

    fn get_events_for_asset(
        &self,
        conn: &mut SqliteConnection,
        asset_type: &str,
        asset_id: i32,
    ) -> Result<Vec<AssetHistoryEvent>>;
}

/// Append-only repository for the asset history log
pub struct AuditRepository;

impl AuditRepository {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AuditRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl AuditRepositoryTrait for AuditRepository {
    fn log_event(
        &self,
        conn: &mut SqliteConnection,
        actor: Option<i32>,
        asset_type: &str,
        asset_id: i32,
        event_type: &str,
        details: &str,
    ) -> Result<()> {
        let event = NewAssetHistoryEvent {
            asset_type: asset_type.to_string(),
            asset_id,
            event_type: event_type.to_string(),
            user_id: actor,
            details: Some(details.to_string()),
        };

        diesel::insert_into(asset_history_log::table)
            .values(&event)
            .execute(conn)?;

        Ok(())
    }

    fn get_events_for_asset(
        &self,
        conn: &mut SqliteConnection,
        asset_type_filter: &str,
        asset_id_filter: i32,
    ) -> Result<Vec<AssetHistoryEvent>> {
        let events = asset_history_log::table
            .filter(asset_history_log::asset_type.eq(asset_type_filter))
            .filter(asset_history_log::asset_id.eq(asset_id_filter))
            .order(asset_history_log::event_timestamp.desc())
            .select(AssetHistoryEvent::as_select())
            .load::<AssetHistoryEvent>(conn)?;

        Ok(events)
    }
}
