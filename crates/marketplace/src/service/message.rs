use crate::{
    abstract_trait::{
        appointment::DynAppointmentStore,
        message::{DynMessageStore, MessageServiceTrait},
        notification::{DynNotificationSink, notify_all},
        product::DynProductStore,
    },
    domain::{
        actor::Actor,
        enums::NotificationKind,
        requests::{
            PageRequest,
            message::{CreateMessageRecord, SendMessageRequest},
            notification::CreateNotificationRecord,
            page_window,
        },
        response::{
            api::{ApiResponse, ApiResponsePagination},
            message::{ConversationResponse, MessageResponse, UnreadCountResponse},
            pagination::Pagination,
        },
    },
    model::product::Product,
    service::{found, validate_request},
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use serde_json::json;
use shared::{
    errors::ServiceError,
    utils::{Method, ServiceTracer},
};
use tracing::{debug, info};

const PREVIEW_CHARS: usize = 80;

#[derive(Clone)]
pub struct MessageService {
    messages: DynMessageStore,
    products: DynProductStore,
    appointments: DynAppointmentStore,
    notifier: DynNotificationSink,
    tracer: ServiceTracer,
}

fn preview(body: &str) -> String {
    let mut preview: String = body.chars().take(PREVIEW_CHARS).collect();
    if body.chars().count() > PREVIEW_CHARS {
        preview.push_str("...");
    }
    preview
}

impl MessageService {
    pub fn new(
        messages: DynMessageStore,
        products: DynProductStore,
        appointments: DynAppointmentStore,
        notifier: DynNotificationSink,
        registry: &mut Registry,
    ) -> Self {
        Self {
            messages,
            products,
            appointments,
            notifier,
            tracer: ServiceTracer::new("message_service", "MessageService", registry),
        }
    }

    async fn send(
        &self,
        actor: &Actor,
        req: &SendMessageRequest,
    ) -> Result<ApiResponse<MessageResponse>, ServiceError> {
        validate_request(req)?;

        if req.recipient_id == actor.user_id {
            return Err(ServiceError::validation(
                "recipient_id: you cannot message yourself",
            ));
        }

        if let Some(product_id) = req.product_id {
            let product = self
                .products
                .find_by_id(product_id)
                .await?
                .filter(Product::is_listed);
            found(product, "Product")?;
        }

        if let Some(appointment_id) = req.appointment_id {
            let appointment = found(
                self.appointments.find_by_id(appointment_id).await?,
                "Appointment",
            )?;
            if appointment.buyer_id != actor.user_id && appointment.seller_id != actor.user_id {
                return Err(ServiceError::Forbidden(
                    "you are not a participant of this appointment".into(),
                ));
            }
        }

        let message = self
            .messages
            .create_message(&CreateMessageRecord {
                sender_id: actor.user_id,
                recipient_id: req.recipient_id,
                product_id: req.product_id,
                appointment_id: req.appointment_id,
                body: req.body.clone(),
                kind: req.kind,
                attachments: req.attachments.clone(),
            })
            .await?;

        debug!(
            "✉️ Message {} sent from {} to {}",
            message.id, message.sender_id, message.recipient_id
        );

        notify_all(
            &self.notifier,
            vec![
                CreateNotificationRecord::new(
                    message.recipient_id,
                    NotificationKind::Chat,
                    "New message",
                    preview(&message.body),
                )
                .with_link(format!("/messages/{}", message.sender_id))
                .with_data(json!({
                    "message_id": message.id,
                    "sender_id": message.sender_id,
                })),
            ],
        )
        .await;

        Ok(ApiResponse::ok("Message sent successfully", message.into()))
    }

    async fn thread(
        &self,
        actor: &Actor,
        partner_id: i64,
        req: &PageRequest,
    ) -> Result<ApiResponsePagination<Vec<MessageResponse>>, ServiceError> {
        validate_request(req)?;

        let marked = self
            .messages
            .mark_conversation_read(actor.user_id, partner_id)
            .await?;
        if marked > 0 {
            info!(
                "👀 User {} read {marked} messages from {partner_id}",
                actor.user_id
            );
        }

        let (limit, offset) = page_window(req.page, req.page_size);
        let (messages, total) = self
            .messages
            .find_conversation(actor.user_id, partner_id, limit, offset)
            .await?;

        Ok(ApiResponsePagination::ok(
            "Conversation retrieved successfully",
            messages.into_iter().map(Into::into).collect(),
            Pagination::new(req.page, limit as i32, total),
        ))
    }

    async fn read_one(
        &self,
        actor: &Actor,
        id: i64,
    ) -> Result<ApiResponse<MessageResponse>, ServiceError> {
        let message = found(self.messages.find_by_id(id).await?, "Message")?;
        if message.recipient_id != actor.user_id {
            return Err(ServiceError::Forbidden(
                "only the recipient can mark a message as read".into(),
            ));
        }

        let message = self.messages.mark_read(id).await?;
        Ok(ApiResponse::ok("Message marked as read", message.into()))
    }
}

#[async_trait]
impl MessageServiceTrait for MessageService {
    async fn send_message(
        &self,
        actor: &Actor,
        req: &SendMessageRequest,
    ) -> Result<ApiResponse<MessageResponse>, ServiceError> {
        let method = Method::Post;
        let tracing_ctx = self.tracer.start(
            "send_message",
            vec![
                KeyValue::new("component", "message"),
                KeyValue::new("sender_id", actor.user_id),
                KeyValue::new("recipient_id", req.recipient_id),
            ],
        );

        let result = self.send(actor, req).await;
        self.tracer
            .finish(&tracing_ctx, method, result, "Message sent")
    }

    async fn conversation(
        &self,
        actor: &Actor,
        partner_id: i64,
        req: &PageRequest,
    ) -> Result<ApiResponsePagination<Vec<MessageResponse>>, ServiceError> {
        let method = Method::Get;
        let tracing_ctx = self.tracer.start(
            "conversation",
            vec![
                KeyValue::new("component", "message"),
                KeyValue::new("user_id", actor.user_id),
                KeyValue::new("partner_id", partner_id),
            ],
        );

        let result = self.thread(actor, partner_id, req).await;
        self.tracer
            .finish(&tracing_ctx, method, result, "Conversation retrieved")
    }

    async fn conversations(
        &self,
        actor: &Actor,
    ) -> Result<ApiResponse<Vec<ConversationResponse>>, ServiceError> {
        let method = Method::Get;
        let tracing_ctx = self.tracer.start(
            "conversations",
            vec![
                KeyValue::new("component", "message"),
                KeyValue::new("user_id", actor.user_id),
            ],
        );

        let result = self
            .messages
            .find_conversations(actor.user_id)
            .await
            .map_err(ServiceError::from)
            .map(|summaries| {
                ApiResponse::ok(
                    "Conversations retrieved successfully",
                    summaries.into_iter().map(Into::into).collect(),
                )
            });
        self.tracer
            .finish(&tracing_ctx, method, result, "Conversations retrieved")
    }

    async fn mark_message_read(
        &self,
        actor: &Actor,
        id: i64,
    ) -> Result<ApiResponse<MessageResponse>, ServiceError> {
        let method = Method::Put;
        let tracing_ctx = self.tracer.start(
            "mark_message_read",
            vec![
                KeyValue::new("component", "message"),
                KeyValue::new("message_id", id),
            ],
        );

        let result = self.read_one(actor, id).await;
        self.tracer
            .finish(&tracing_ctx, method, result, "Message marked as read")
    }

    async fn unread_message_count(
        &self,
        actor: &Actor,
    ) -> Result<ApiResponse<UnreadCountResponse>, ServiceError> {
        let method = Method::Get;
        let tracing_ctx = self.tracer.start(
            "unread_message_count",
            vec![
                KeyValue::new("component", "message"),
                KeyValue::new("user_id", actor.user_id),
            ],
        );

        let result = self
            .messages
            .unread_count(actor.user_id)
            .await
            .map_err(ServiceError::from)
            .map(|unread_count| {
                ApiResponse::ok(
                    "Unread message count retrieved",
                    UnreadCountResponse { unread_count },
                )
            });
        self.tracer
            .finish(&tracing_ctx, method, result, "Unread message count retrieved")
    }
}
