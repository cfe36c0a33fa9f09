mod repository;
mod service;

pub use self::repository::{DynSellerLocationStore, SellerLocationStoreTrait};
pub use self::service::{DynSellerLocationService, SellerLocationServiceTrait};
