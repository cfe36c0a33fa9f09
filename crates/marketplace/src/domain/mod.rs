pub mod actor;
pub mod cart;
pub mod checkout;
pub mod dashboard;
pub mod enums;
pub mod lifecycle;
pub mod rating;
pub mod requests;
pub mod response;
pub mod schedule;
pub mod slug;
