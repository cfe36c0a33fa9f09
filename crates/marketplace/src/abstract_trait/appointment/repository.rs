use crate::{
    domain::{
        enums::AppointmentStatus,
        requests::appointment::{
            AppointmentListQuery, CreateAppointmentRecord, UpdateAppointmentRecord,
        },
    },
    model::appointment::Appointment,
};
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynAppointmentStore = Arc<dyn AppointmentStoreTrait + Send + Sync>;

#[async_trait]
pub trait AppointmentStoreTrait {
    async fn find_all(
        &self,
        query: &AppointmentListQuery,
    ) -> Result<(Vec<Appointment>, i64), RepositoryError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Appointment>, RepositoryError>;
    async fn create_appointment(
        &self,
        record: &CreateAppointmentRecord,
    ) -> Result<Appointment, RepositoryError>;
    async fn update_appointment(
        &self,
        record: &UpdateAppointmentRecord,
    ) -> Result<Appointment, RepositoryError>;
    /// Returns `None` when the appointment is no longer in `expected`.
    async fn change_status(
        &self,
        id: i64,
        expected: AppointmentStatus,
        next: AppointmentStatus,
    ) -> Result<Option<Appointment>, RepositoryError>;
    async fn delete_appointment(&self, id: i64) -> Result<(), RepositoryError>;
}
