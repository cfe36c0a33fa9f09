mod repository;
mod service;

pub use self::repository::{DynReviewStore, ReviewStoreTrait};
pub use self::service::{DynReviewService, ReviewServiceTrait};
