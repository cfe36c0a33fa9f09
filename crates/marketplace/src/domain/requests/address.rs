use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateAddressRequest {
    #[validate(length(max = 50))]
    #[schema(example = "Rumah")]
    pub label: Option<String>,

    #[validate(length(min = 1, max = 255, message = "Recipient name is required"))]
    pub recipient_name: String,

    #[validate(length(min = 6, max = 20, message = "Phone number is required"))]
    #[schema(example = "081234567890")]
    pub phone: String,

    #[validate(length(min = 5, max = 500, message = "Full address is required"))]
    #[schema(example = "Jl. Pelabuhan No. 12")]
    pub full_address: String,

    #[validate(length(min = 1, max = 100, message = "Province is required"))]
    pub province: String,

    #[validate(length(min = 1, max = 100, message = "City is required"))]
    pub city: String,

    #[validate(length(min = 1, max = 100, message = "District is required"))]
    pub district: String,

    #[validate(length(min = 1, max = 10, message = "Postal code is required"))]
    pub postal_code: String,

    #[serde(default)]
    pub is_main: bool,

    #[validate(length(max = 1000))]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateAddressRequest {
    #[validate(length(max = 50))]
    pub label: Option<String>,

    #[validate(length(min = 1, max = 255, message = "Recipient name cannot be empty"))]
    pub recipient_name: Option<String>,

    #[validate(length(min = 6, max = 20))]
    pub phone: Option<String>,

    #[validate(length(min = 5, max = 500))]
    pub full_address: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub province: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub city: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub district: Option<String>,

    #[validate(length(min = 1, max = 10))]
    pub postal_code: Option<String>,

    pub is_main: Option<bool>,

    #[validate(length(max = 1000))]
    pub notes: Option<String>,
}

/// Full column set written by create and update. With `is_main` set, the
/// store clears the flag on the owner's other addresses in the same step.
#[derive(Debug, Clone)]
pub struct AddressRecord {
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
}
