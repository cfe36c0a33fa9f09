use crate::{domain::response::timestamp, model::address::Address};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AddressResponse {
    pub id: i64,
    pub user_id: i64,
    pub label: Option<String>,
    pub recipient_name: String,
    pub phone: String,
    pub full_address: String,
    pub province: String,
    pub city: String,
    pub district: String,
    pub postal_code: String,
    pub is_main: bool,
    pub notes: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl From<Address> for AddressResponse {
    fn from(value: Address) -> Self {
        Self {
            id: value.id,
            user_id: value.user_id,
            label: value.label,
            recipient_name: value.recipient_name,
            phone: value.phone,
            full_address: value.full_address,
            province: value.province,
            city: value.city,
            district: value.district,
            postal_code: value.postal_code,
            is_main: value.is_main,
            notes: value.notes,
            created_at: timestamp(value.created_at),
            updated_at: timestamp(value.updated_at),
        }
    }
}
