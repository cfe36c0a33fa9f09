pub mod address;
pub mod api;
pub mod appointment;
pub mod cart;
pub mod category;
pub mod dashboard;
pub mod message;
pub mod notification;
pub mod order;
pub mod pagination;
pub mod product;
pub mod review;
pub mod seller_location;

use chrono::NaiveDateTime;

pub(crate) fn timestamp(value: Option<NaiveDateTime>) -> Option<String> {
    value.map(|dt| dt.to_string())
}
