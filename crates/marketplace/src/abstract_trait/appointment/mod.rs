mod repository;
mod service;

pub use self::repository::{AppointmentStoreTrait, DynAppointmentStore};
pub use self::service::{AppointmentServiceTrait, DynAppointmentService};
