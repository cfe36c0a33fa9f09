mod repository;
mod service;

pub use self::repository::{DynProductStore, ProductStoreTrait};
pub use self::service::{DynProductService, ProductServiceTrait};
