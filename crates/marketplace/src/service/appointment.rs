use crate::{
    abstract_trait::{
        appointment::{AppointmentServiceTrait, DynAppointmentStore},
        notification::{DynNotificationSink, notify_all},
        seller_location::DynSellerLocationStore,
    },
    domain::{
        actor::{Actor, Role},
        enums::{AppointmentStatus, NotificationKind},
        lifecycle::{AppointmentParty, check_appointment_transition},
        requests::{
            appointment::{
                AppointmentListQuery, AppointmentScope, AppointmentWhen, CreateAppointmentRecord,
                CreateAppointmentRequest, FindAppointments, FindSellerAppointments,
                UpdateAppointmentRecord, UpdateAppointmentRequest, UpdateAppointmentStatusRequest,
            },
            notification::CreateNotificationRecord,
            page_window,
        },
        response::{
            api::{ApiResponse, ApiResponsePagination},
            appointment::AppointmentResponse,
            pagination::Pagination,
        },
        schedule::check_schedule,
    },
    model::{appointment::Appointment, seller_location::SellerLocation},
    service::{found, require_role, transition_denied, validate_request},
};
use async_trait::async_trait;
use chrono::{Days, Local, NaiveDateTime};
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use serde_json::json;
use shared::{
    errors::ServiceError,
    utils::{Method, ServiceTracer},
};
use tracing::info;

#[derive(Clone)]
pub struct AppointmentService {
    appointments: DynAppointmentStore,
    locations: DynSellerLocationStore,
    notifier: DynNotificationSink,
    tracer: ServiceTracer,
}

/// Appointment times are wall-clock times at the location.
fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

fn appointment_link(id: i64) -> String {
    format!("/appointments/{id}")
}

fn party_of(actor: &Actor, appointment: &Appointment) -> Option<AppointmentParty> {
    if appointment.buyer_id == actor.user_id {
        Some(AppointmentParty::Buyer)
    } else if appointment.seller_id == actor.user_id {
        Some(AppointmentParty::Seller)
    } else {
        None
    }
}

impl AppointmentService {
    pub fn new(
        appointments: DynAppointmentStore,
        locations: DynSellerLocationStore,
        notifier: DynNotificationSink,
        registry: &mut Registry,
    ) -> Self {
        Self {
            appointments,
            locations,
            notifier,
            tracer: ServiceTracer::new("appointment_service", "AppointmentService", registry),
        }
    }

    async fn appointment(&self, id: i64) -> Result<Appointment, ServiceError> {
        found(self.appointments.find_by_id(id).await?, "Appointment")
    }

    /// Rejects past times and times the location is not open.
    fn check_slot(location: &SellerLocation, at: NaiveDateTime) -> Result<(), ServiceError> {
        if at <= now() {
            return Err(ServiceError::validation(
                "scheduled_at: must be in the future",
            ));
        }

        let Err(violation) = check_schedule(&location.operating_hours.0, at) else {
            return Ok(());
        };

        let details = serde_json::to_value(&violation)
            .map_err(|e| ServiceError::Internal(e.to_string()))?;
        Err(ServiceError::Rejected {
            message: violation.to_string(),
            details,
        })
    }

    async fn notify_parties(
        &self,
        appointment: &Appointment,
        skip: Option<i64>,
        title: &str,
        body: String,
    ) {
        let notices = [appointment.buyer_id, appointment.seller_id]
            .into_iter()
            .filter(|user_id| Some(*user_id) != skip)
            .map(|user_id| {
                CreateNotificationRecord::new(
                    user_id,
                    NotificationKind::Appointment,
                    title,
                    body.clone(),
                )
                .with_link(appointment_link(appointment.id))
                .with_data(json!({
                    "status": appointment.status,
                    "scheduled_at": appointment.scheduled_at,
                }))
                .for_appointment(appointment.id)
            })
            .collect();

        notify_all(&self.notifier, notices).await;
    }

    async fn page(
        &self,
        query: AppointmentListQuery,
        page: i32,
    ) -> Result<ApiResponsePagination<Vec<AppointmentResponse>>, ServiceError> {
        let limit = query.limit;
        let (appointments, total) = self.appointments.find_all(&query).await?;

        Ok(ApiResponsePagination::ok(
            "Appointments retrieved successfully",
            appointments.into_iter().map(Into::into).collect(),
            Pagination::new(page, limit as i32, total),
        ))
    }

    async fn create(
        &self,
        actor: &Actor,
        req: &CreateAppointmentRequest,
    ) -> Result<ApiResponse<AppointmentResponse>, ServiceError> {
        validate_request(req)?;

        if req.seller_id == actor.user_id {
            return Err(ServiceError::validation(
                "seller_id: you cannot book an appointment with yourself",
            ));
        }

        let location = found(
            self.locations.find_by_id(req.location_id).await?,
            "Seller location",
        )?;
        if location.seller_id != req.seller_id {
            return Err(ServiceError::validation(
                "location_id: location does not belong to this seller",
            ));
        }
        if !location.active {
            return Err(ServiceError::Conflict("location is not active".into()));
        }

        Self::check_slot(&location, req.scheduled_at)?;

        let appointment = self
            .appointments
            .create_appointment(&CreateAppointmentRecord {
                buyer_id: actor.user_id,
                seller_id: req.seller_id,
                location_id: location.id,
                scheduled_at: req.scheduled_at,
                purpose: req.purpose.trim().to_string(),
                notes: req.notes.clone(),
            })
            .await?;

        info!(
            "📅 Appointment {} booked by user {} at location {} for {}",
            appointment.id, actor.user_id, location.id, appointment.scheduled_at
        );

        self.notify_parties(
            &appointment,
            None,
            "Appointment requested",
            format!(
                "Visit to {} requested for {}",
                location.business_name,
                appointment.scheduled_at.format("%Y-%m-%d %H:%M")
            ),
        )
        .await;

        Ok(ApiResponse::ok(
            "Appointment created successfully",
            appointment.into(),
        ))
    }

    async fn reschedule(
        &self,
        actor: &Actor,
        id: i64,
        req: &UpdateAppointmentRequest,
    ) -> Result<ApiResponse<AppointmentResponse>, ServiceError> {
        validate_request(req)?;

        let current = self.appointment(id).await?;
        if current.buyer_id != actor.user_id {
            return Err(ServiceError::Forbidden(
                "only the buyer can change this appointment".into(),
            ));
        }
        if current.status.is_terminal() {
            return Err(ServiceError::Conflict(format!(
                "appointment is already {}",
                current.status
            )));
        }

        let scheduled_at = req.scheduled_at.unwrap_or(current.scheduled_at);
        if req.scheduled_at.is_some() {
            let location = found(
                self.locations.find_by_id(current.location_id).await?,
                "Seller location",
            )?;
            Self::check_slot(&location, scheduled_at)?;
        }

        let appointment = self
            .appointments
            .update_appointment(&UpdateAppointmentRecord {
                id,
                scheduled_at,
                purpose: req
                    .purpose
                    .as_ref()
                    .map(|p| p.trim().to_string())
                    .unwrap_or(current.purpose),
                notes: req.notes.clone().or(current.notes),
                status: AppointmentStatus::Waiting,
            })
            .await?;

        self.notify_parties(
            &appointment,
            Some(actor.user_id),
            "Appointment updated",
            format!(
                "Appointment {} was changed and awaits your confirmation",
                appointment.id
            ),
        )
        .await;

        Ok(ApiResponse::ok(
            "Appointment updated successfully",
            appointment.into(),
        ))
    }

    async fn delete(&self, actor: &Actor, id: i64) -> Result<ApiResponse<()>, ServiceError> {
        let appointment = self.appointment(id).await?;
        if appointment.buyer_id != actor.user_id {
            return Err(ServiceError::Forbidden(
                "only the buyer can delete this appointment".into(),
            ));
        }
        if appointment.status != AppointmentStatus::Waiting {
            return Err(ServiceError::Conflict(
                "only waiting appointments can be deleted".into(),
            ));
        }

        self.appointments.delete_appointment(id).await?;
        info!("🗑️ Appointment {id} deleted by user {}", actor.user_id);
        Ok(ApiResponse::ok("Appointment deleted successfully", ()))
    }

    async fn change_status(
        &self,
        actor: &Actor,
        id: i64,
        target: AppointmentStatus,
    ) -> Result<ApiResponse<AppointmentResponse>, ServiceError> {
        let current = self.appointment(id).await?;
        let party = party_of(actor, &current).ok_or_else(|| {
            ServiceError::Forbidden("you are not a participant of this appointment".into())
        })?;

        check_appointment_transition(current.status, target, party).map_err(transition_denied)?;

        let appointment = self
            .appointments
            .change_status(id, current.status, target)
            .await?
            .ok_or_else(|| {
                ServiceError::Conflict(format!("appointment is no longer {}", current.status))
            })?;

        info!(
            "🔁 Appointment {id} moved {} -> {target} by user {}",
            current.status, actor.user_id
        );

        self.notify_parties(
            &appointment,
            None,
            &format!("Appointment {target}"),
            format!(
                "Appointment on {} is now {target}",
                appointment.scheduled_at.format("%Y-%m-%d %H:%M")
            ),
        )
        .await;

        Ok(ApiResponse::ok(
            "Appointment status updated successfully",
            appointment.into(),
        ))
    }

    async fn for_participant(
        &self,
        actor: &Actor,
        req: &FindAppointments,
    ) -> Result<ApiResponsePagination<Vec<AppointmentResponse>>, ServiceError> {
        validate_request(req)?;

        let (limit, offset) = page_window(req.page, req.page_size);
        let now = now();
        let (from, until, ascending) = match req.when {
            Some(AppointmentWhen::Upcoming) => (Some(now), None, true),
            Some(AppointmentWhen::Past) => (None, Some(now), false),
            None => (None, None, false),
        };

        self.page(
            AppointmentListQuery {
                scope: AppointmentScope::Participant(actor.user_id),
                status: req.status,
                location_id: None,
                from,
                until,
                ascending,
                limit,
                offset,
            },
            req.page,
        )
        .await
    }

    async fn for_seller(
        &self,
        actor: &Actor,
        req: &FindSellerAppointments,
    ) -> Result<ApiResponsePagination<Vec<AppointmentResponse>>, ServiceError> {
        require_role(actor, Role::Seller, "view seller appointments")?;
        validate_request(req)?;

        if let (Some(from), Some(to)) = (req.from, req.to) {
            if from > to {
                return Err(ServiceError::validation("from: must not be after to"));
            }
        }

        let (limit, offset) = page_window(req.page, req.page_size);
        let from = req.from.and_then(|d| d.and_hms_opt(0, 0, 0));
        // `to` is a whole day, so the bound is the following midnight.
        let until = req
            .to
            .and_then(|d| d.checked_add_days(Days::new(1)))
            .and_then(|d| d.and_hms_opt(0, 0, 0));

        self.page(
            AppointmentListQuery {
                scope: AppointmentScope::Seller(actor.user_id),
                status: req.status,
                location_id: req.location_id,
                from,
                until,
                ascending: true,
                limit,
                offset,
            },
            req.page,
        )
        .await
    }

    async fn detail(
        &self,
        actor: &Actor,
        id: i64,
    ) -> Result<ApiResponse<AppointmentResponse>, ServiceError> {
        let appointment = self.appointment(id).await?;
        if party_of(actor, &appointment).is_none() {
            return Err(ServiceError::Forbidden(
                "you are not a participant of this appointment".into(),
            ));
        }

        Ok(ApiResponse::ok(
            "Appointment retrieved successfully",
            appointment.into(),
        ))
    }
}

#[async_trait]
impl AppointmentServiceTrait for AppointmentService {
    async fn create_appointment(
        &self,
        actor: &Actor,
        req: &CreateAppointmentRequest,
    ) -> Result<ApiResponse<AppointmentResponse>, ServiceError> {
        let method = Method::Post;
        let tracing_ctx = self.tracer.start(
            "create_appointment",
            vec![
                KeyValue::new("component", "appointment"),
                KeyValue::new("buyer_id", actor.user_id),
                KeyValue::new("seller_id", req.seller_id),
                KeyValue::new("location_id", req.location_id),
            ],
        );

        let result = self.create(actor, req).await;
        self.tracer
            .finish(&tracing_ctx, method, result, "Appointment created")
    }

    async fn update_appointment(
        &self,
        actor: &Actor,
        id: i64,
        req: &UpdateAppointmentRequest,
    ) -> Result<ApiResponse<AppointmentResponse>, ServiceError> {
        let method = Method::Put;
        let tracing_ctx = self.tracer.start(
            "update_appointment",
            vec![
                KeyValue::new("component", "appointment"),
                KeyValue::new("appointment_id", id),
            ],
        );

        let result = self.reschedule(actor, id, req).await;
        self.tracer
            .finish(&tracing_ctx, method, result, "Appointment updated")
    }

    async fn delete_appointment(
        &self,
        actor: &Actor,
        id: i64,
    ) -> Result<ApiResponse<()>, ServiceError> {
        let method = Method::Delete;
        let tracing_ctx = self.tracer.start(
            "delete_appointment",
            vec![
                KeyValue::new("component", "appointment"),
                KeyValue::new("appointment_id", id),
            ],
        );

        let result = self.delete(actor, id).await;
        self.tracer
            .finish(&tracing_ctx, method, result, "Appointment deleted")
    }

    async fn update_appointment_status(
        &self,
        actor: &Actor,
        id: i64,
        req: &UpdateAppointmentStatusRequest,
    ) -> Result<ApiResponse<AppointmentResponse>, ServiceError> {
        let method = Method::Put;
        let tracing_ctx = self.tracer.start(
            "update_appointment_status",
            vec![
                KeyValue::new("component", "appointment"),
                KeyValue::new("appointment_id", id),
                KeyValue::new("status", req.status.as_str()),
            ],
        );

        let result = self.change_status(actor, id, req.status).await;
        self.tracer
            .finish(&tracing_ctx, method, result, "Appointment status updated")
    }

    async fn list_appointments(
        &self,
        actor: &Actor,
        req: &FindAppointments,
    ) -> Result<ApiResponsePagination<Vec<AppointmentResponse>>, ServiceError> {
        let method = Method::Get;
        let tracing_ctx = self.tracer.start(
            "list_appointments",
            vec![
                KeyValue::new("component", "appointment"),
                KeyValue::new("user_id", actor.user_id),
            ],
        );

        let result = self.for_participant(actor, req).await;
        self.tracer
            .finish(&tracing_ctx, method, result, "Appointments retrieved")
    }

    async fn seller_appointments(
        &self,
        actor: &Actor,
        req: &FindSellerAppointments,
    ) -> Result<ApiResponsePagination<Vec<AppointmentResponse>>, ServiceError> {
        let method = Method::Get;
        let tracing_ctx = self.tracer.start(
            "seller_appointments",
            vec![
                KeyValue::new("component", "appointment"),
                KeyValue::new("seller_id", actor.user_id),
            ],
        );

        let result = self.for_seller(actor, req).await;
        self.tracer
            .finish(&tracing_ctx, method, result, "Seller appointments retrieved")
    }

    async fn find_appointment(
        &self,
        actor: &Actor,
        id: i64,
    ) -> Result<ApiResponse<AppointmentResponse>, ServiceError> {
        let method = Method::Get;
        let tracing_ctx = self.tracer.start(
            "find_appointment",
            vec![
                KeyValue::new("component", "appointment"),
                KeyValue::new("appointment_id", id),
            ],
        );

        let result = self.detail(actor, id).await;
        self.tracer
            .finish(&tracing_ctx, method, result, "Appointment retrieved")
    }
}
