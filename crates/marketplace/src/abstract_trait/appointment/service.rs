use crate::domain::{
    actor::Actor,
    requests::appointment::{
        CreateAppointmentRequest, FindAppointments, FindSellerAppointments,
        UpdateAppointmentRequest, UpdateAppointmentStatusRequest,
    },
    response::{
        api::{ApiResponse, ApiResponsePagination},
        appointment::AppointmentResponse,
    },
};
use async_trait::async_trait;
use shared::errors::ServiceError;
use std::sync::Arc;

pub type DynAppointmentService = Arc<dyn AppointmentServiceTrait + Send + Sync>;

#[async_trait]
pub trait AppointmentServiceTrait {
    async fn create_appointment(
        &self,
        actor: &Actor,
        req: &CreateAppointmentRequest,
    ) -> Result<ApiResponse<AppointmentResponse>, ServiceError>;
    async fn update_appointment(
        &self,
        actor: &Actor,
        id: i64,
        req: &UpdateAppointmentRequest,
    ) -> Result<ApiResponse<AppointmentResponse>, ServiceError>;
    async fn delete_appointment(
        &self,
        actor: &Actor,
        id: i64,
    ) -> Result<ApiResponse<()>, ServiceError>;
    async fn update_appointment_status(
        &self,
        actor: &Actor,
        id: i64,
        req: &UpdateAppointmentStatusRequest,
    ) -> Result<ApiResponse<AppointmentResponse>, ServiceError>;
    async fn list_appointments(
        &self,
        actor: &Actor,
        req: &FindAppointments,
    ) -> Result<ApiResponsePagination<Vec<AppointmentResponse>>, ServiceError>;
    async fn seller_appointments(
        &self,
        actor: &Actor,
        req: &FindSellerAppointments,
    ) -> Result<ApiResponsePagination<Vec<AppointmentResponse>>, ServiceError>;
    async fn find_appointment(
        &self,
        actor: &Actor,
        id: i64,
    ) -> Result<ApiResponse<AppointmentResponse>, ServiceError>;
}
