mod repository;
mod service;

pub use self::repository::{CategoryStoreTrait, DynCategoryStore};
pub use self::service::{CategoryServiceTrait, DynCategoryService};
