mod repository;
mod service;

pub use self::repository::{AddressStoreTrait, DynAddressStore};
pub use self::service::{AddressServiceTrait, DynAddressService};
