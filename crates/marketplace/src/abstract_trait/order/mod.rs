mod repository;
mod service;

pub use self::repository::{CheckoutOutcome, DynOrderStore, OrderStoreTrait};
pub use self::service::{DynOrderService, OrderServiceTrait};
