mod repository;
mod service;

pub use self::repository::{DashboardStoreTrait, DynDashboardStore};
pub use self::service::{DashboardServiceTrait, DynDashboardService};
