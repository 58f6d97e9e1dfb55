use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// Link between a worker, a phone and a SIM card for a period of active use.
/// The assignment is open while `return_date` is unset.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::assignments)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub id: i32,
    pub phone_id: i32,
    pub sim_card_id: i32,
    pub worker_id: i32,
    pub assignment_date: NaiveDateTime,
    pub return_date: Option<NaiveDateTime>,
}

impl Assignment {
    pub fn is_open(&self) -> bool {
        self.return_date.is_none()
    }
}

/// Input model for creating a new assignment
#[derive(Debug, Clone, Insertable, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::assignments)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct NewAssignment {
    pub phone_id: i32,
    pub sim_card_id: i32,
    pub worker_id: i32,
}
