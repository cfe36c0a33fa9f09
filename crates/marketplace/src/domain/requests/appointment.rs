use crate::domain::{
    enums::AppointmentStatus,
    requests::{default_page, default_page_size},
};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateAppointmentRequest {
    pub seller_id: i64,

    pub location_id: i64,

    /// Local time at the location.
    #[schema(value_type = String, example = "2030-01-07T09:30:00")]
    pub scheduled_at: NaiveDateTime,

    #[validate(length(min = 1, max = 255, message = "Purpose is required"))]
    #[schema(example = "Inspect the morning catch")]
    pub purpose: String,

    #[validate(length(max = 1000))]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateAppointmentRequest {
    #[schema(value_type = Option<String>)]
    pub scheduled_at: Option<NaiveDateTime>,

    #[validate(length(min = 1, max = 255, message = "Purpose cannot be empty"))]
    pub purpose: Option<String>,

    #[validate(length(max = 1000))]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateAppointmentStatusRequest {
    pub status: AppointmentStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentWhen {
    Upcoming,
    Past,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema, IntoParams)]
pub struct FindAppointments {
    #[serde(default = "default_page")]
    #[validate(range(min = 1, message = "page must be at least 1"))]
    pub page: i32,

    #[serde(default = "default_page_size")]
    #[validate(range(min = 1, max = 100, message = "page_size must be between 1 and 100"))]
    pub page_size: i32,

    pub status: Option<AppointmentStatus>,

    pub when: Option<AppointmentWhen>,
}

impl Default for FindAppointments {
    fn default() -> Self {
        Self {
            page: default_page(),
            page_size: default_page_size(),
            status: None,
            when: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema, IntoParams)]
pub struct FindSellerAppointments {
    #[serde(default = "default_page")]
    #[validate(range(min = 1, message = "page must be at least 1"))]
    pub page: i32,

    #[serde(default = "default_page_size")]
    #[validate(range(min = 1, max = 100, message = "page_size must be between 1 and 100"))]
    pub page_size: i32,

    pub status: Option<AppointmentStatus>,

    pub location_id: Option<i64>,

    #[schema(value_type = Option<String>, example = "2030-01-01")]
    pub from: Option<NaiveDate>,

    #[schema(value_type = Option<String>, example = "2030-01-31")]
    pub to: Option<NaiveDate>,
}

impl Default for FindSellerAppointments {
    fn default() -> Self {
        Self {
            page: default_page(),
            page_size: default_page_size(),
            status: None,
            location_id: None,
            from: None,
            to: None,
        }
    }
}

/// Who the listing is for: either party, or the seller side only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppointmentScope {
    Participant(i64),
    Seller(i64),
}

#[derive(Debug, Clone)]
pub struct AppointmentListQuery {
    pub scope: AppointmentScope,
    pub status: Option<AppointmentStatus>,
    pub location_id: Option<i64>,
    /// Inclusive lower bound on `scheduled_at`.
    pub from: Option<NaiveDateTime>,
    /// Exclusive upper bound on `scheduled_at`.
    pub until: Option<NaiveDateTime>,
    pub ascending: bool,
    pub limit: i64,
    pub offset: i64,
}

#[derive(Debug, Clone)]
pub struct CreateAppointmentRecord {
    pub buyer_id: i64,
    pub seller_id: i64,
    pub location_id: i64,
    pub scheduled_at: NaiveDateTime,
    pub purpose: String,
    pub notes: Option<String>,
}

#[derive(Debug, Clone)]
pub struct UpdateAppointmentRecord {
    pub id: i64,
    pub scheduled_at: NaiveDateTime,
    pub purpose: String,
    pub notes: Option<String>,
    pub status: AppointmentStatus,
}
