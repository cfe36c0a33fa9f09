pub mod address;
pub mod appointment;
pub mod cart;
pub mod category;
pub mod dashboard;
pub mod message;
pub mod notification;
pub mod order;
pub mod product;
pub mod review;
pub mod seller_location;
