use crate::{
    domain::{enums::AppointmentStatus, response::timestamp},
    model::appointment::Appointment,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AppointmentResponse {
    pub id: i64,
    pub buyer_id: i64,
    pub seller_id: i64,
    pub location_id: i64,
    pub scheduled_at: String,
    pub status: AppointmentStatus,
    pub purpose: String,
    pub notes: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl From<Appointment> for AppointmentResponse {
    fn from(value: Appointment) -> Self {
        Self {
            id: value.id,
            buyer_id: value.buyer_id,
            seller_id: value.seller_id,
            location_id: value.location_id,
            scheduled_at: value.scheduled_at.format("%Y-%m-%dT%H:%M:%S").to_string(),
            status: value.status,
            purpose: value.purpose,
            notes: value.notes,
            created_at: timestamp(value.created_at),
            updated_at: timestamp(value.updated_at),
        }
    }
}
