mod repository;
mod service;

pub use self::repository::{DynMessageStore, MessageStoreTrait};
pub use self::service::{DynMessageService, MessageServiceTrait};
