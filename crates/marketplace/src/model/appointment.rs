use crate::domain::enums::AppointmentStatus;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Appointment {
    pub id: i64,
    pub buyer_id: i64,
    pub seller_id: i64,
    pub location_id: i64,
    pub scheduled_at: NaiveDateTime,
    pub status: AppointmentStatus,
    pub purpose: String,
    pub notes: Option<String>,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}
