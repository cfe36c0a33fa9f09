use crate::{
    abstract_trait::{
        address::DynAddressStore,
        notification::{DynNotificationSink, notify_all},
        order::{CheckoutOutcome, DynOrderStore, OrderServiceTrait},
    },
    cache::CartCache,
    domain::{
        actor::{Actor, Role},
        enums::{NotificationKind, OrderStatus, PaymentStatus},
        lifecycle::{OrderParticipation, check_order_transition},
        requests::{
            notification::CreateNotificationRecord,
            order::{CheckoutRequest, FindAllOrders, OrderListQuery, PlaceOrderRecord, StatusChangeRecord},
            page_window,
        },
        response::{
            api::{ApiResponse, ApiResponsePagination},
            order::{OrderDetailResponse, OrderItemResponse, OrderResponse},
            pagination::Pagination,
        },
    },
    model::{
        address::Address,
        order::{Order, OrderItem},
    },
    service::{require_role, transition_denied, validate_request},
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use rust_decimal::Decimal;
use serde_json::json;
use shared::{
    errors::ServiceError,
    utils::{Method, ServiceTracer},
};
use tracing::{info, warn};

#[derive(Debug, Clone, Default)]
pub struct OrderServiceConfig {
    /// Fraction of the subtotal charged as tax, e.g. `0.11`.
    pub tax_rate: Decimal,
}

#[derive(Clone)]
pub struct OrderService {
    orders: DynOrderStore,
    addresses: DynAddressStore,
    cart_cache: CartCache,
    notifier: DynNotificationSink,
    config: OrderServiceConfig,
    tracer: ServiceTracer,
}

/// An order as seen by one caller.
struct OrderAccess {
    order: Order,
    items: Vec<OrderItem>,
    participation: OrderParticipation,
}

impl OrderAccess {
    fn seller_ids(&self) -> Vec<i64> {
        let mut ids: Vec<i64> = self.items.iter().map(|i| i.seller_id).collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }
}

#[derive(Debug, Clone, Copy)]
enum OrderSide {
    Buyer(i64),
    Seller(i64),
}

fn order_link(order_id: i64) -> String {
    format!("/orders/{order_id}")
}

impl OrderService {
    pub fn new(
        orders: DynOrderStore,
        addresses: DynAddressStore,
        cart_cache: CartCache,
        notifier: DynNotificationSink,
        config: OrderServiceConfig,
        registry: &mut Registry,
    ) -> Self {
        Self {
            orders,
            addresses,
            cart_cache,
            notifier,
            config,
            tracer: ServiceTracer::new("order_service", "OrderService", registry),
        }
    }

    /// Buyers, sellers with a line in the order and admins see it. Everyone
    /// else gets the same answer as for a missing order.
    async fn access(&self, actor: &Actor, id: i64) -> Result<OrderAccess, ServiceError> {
        let not_found = || ServiceError::NotFound("Order not found".into());

        let order = self.orders.find_by_id(id).await?.ok_or_else(not_found)?;
        let items = self.orders.find_items(id).await?;

        let participation = OrderParticipation {
            is_buyer: order.buyer_id == actor.user_id,
            is_seller: items.iter().any(|i| i.seller_id == actor.user_id),
            is_admin: actor.is_admin(),
        };

        if !participation.is_involved() {
            return Err(not_found());
        }

        Ok(OrderAccess {
            order,
            items,
            participation,
        })
    }

    /// Missing and foreign addresses get the same answer.
    async fn shipping_address(&self, actor: &Actor, id: i64) -> Result<Address, ServiceError> {
        self.addresses
            .find_by_id(id)
            .await?
            .filter(|a| a.user_id == actor.user_id)
            .ok_or_else(|| ServiceError::Conflict("invalid shipping address".into()))
    }

    async fn place(
        &self,
        actor: &Actor,
        req: &CheckoutRequest,
    ) -> Result<ApiResponse<OrderDetailResponse>, ServiceError> {
        validate_request(req)?;
        let address = self.shipping_address(actor, req.address_id).await?;

        let record = PlaceOrderRecord {
            buyer_id: actor.user_id,
            address_id: address.id,
            shipping_address: address.shipping_line(),
            shipping_method: req.shipping_method.clone(),
            shipping_cost: req.shipping_cost,
            payment_method: req.payment_method.clone(),
            notes: req.notes.clone(),
            tax_rate: self.config.tax_rate,
        };

        let (order, items) = match self.orders.place_order(&record).await? {
            CheckoutOutcome::Placed { order, items } => (order, items),
            CheckoutOutcome::EmptyCart => {
                return Err(ServiceError::Conflict("cart is empty".into()));
            }
            CheckoutOutcome::Rejected(violations) => {
                warn!(
                    "🚫 Checkout for user {} rejected: {} invalid items",
                    actor.user_id,
                    violations.len()
                );
                let details = serde_json::to_value(&violations)
                    .map_err(|e| ServiceError::Internal(e.to_string()))?;
                return Err(ServiceError::Rejected {
                    message: "some cart items are unavailable".into(),
                    details,
                });
            }
        };

        self.cart_cache.invalidate(actor.user_id).await;
        info!(
            "🧾 Order {} placed by user {} with {} items, total {}",
            order.order_number,
            actor.user_id,
            items.len(),
            order.total
        );

        let mut sellers: Vec<i64> = items.iter().map(|i| i.seller_id).collect();
        sellers.sort_unstable();
        sellers.dedup();

        let mut notices = vec![
            CreateNotificationRecord::new(
                order.buyer_id,
                NotificationKind::Order,
                "Order placed",
                format!("Your order {} has been placed", order.order_number),
            )
            .with_link(order_link(order.id))
            .for_order(order.id),
        ];
        notices.extend(sellers.into_iter().map(|seller_id| {
            CreateNotificationRecord::new(
                seller_id,
                NotificationKind::Order,
                "New order",
                format!("Order {} includes your products", order.order_number),
            )
            .with_link(order_link(order.id))
            .with_data(json!({ "order_number": order.order_number }))
            .for_order(order.id)
        }));
        notify_all(&self.notifier, notices).await;

        Ok(ApiResponse::ok(
            "Order placed successfully",
            OrderDetailResponse::new(order, items),
        ))
    }

    async fn listing(
        &self,
        req: &FindAllOrders,
        side: OrderSide,
    ) -> Result<ApiResponsePagination<Vec<OrderResponse>>, ServiceError> {
        validate_request(req)?;

        let (limit, offset) = page_window(req.page, req.page_size);
        let query = OrderListQuery {
            status: req.status,
            sort_by: req.sort_by,
            sort_direction: req.sort_direction,
            limit,
            offset,
        };

        let (orders, total) = match side {
            OrderSide::Buyer(buyer_id) => self.orders.find_by_buyer(buyer_id, &query).await?,
            OrderSide::Seller(seller_id) => self.orders.find_by_seller(seller_id, &query).await?,
        };

        Ok(ApiResponsePagination::ok(
            "Orders retrieved successfully",
            orders.into_iter().map(Into::into).collect(),
            Pagination::new(req.page, limit as i32, total),
        ))
    }

    /// Applies one edge of the order state machine. The table is checked
    /// before the caller's right to take the edge.
    async fn transition(
        &self,
        actor: &Actor,
        id: i64,
        target: OrderStatus,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError> {
        let access = self.access(actor, id).await?;
        let current = access.order.status;

        check_order_transition(current, target, access.participation)
            .map_err(transition_denied)?;

        let change = StatusChangeRecord {
            order_id: id,
            expected: current,
            next: target,
            payment_status: (target == OrderStatus::Canceled).then_some(PaymentStatus::Failed),
        };

        let order = self.orders.change_status(&change).await?.ok_or_else(|| {
            ServiceError::Conflict(format!(
                "order {} is no longer {current}",
                access.order.order_number
            ))
        })?;

        info!(
            "🔁 Order {} moved {current} -> {target} by user {}",
            order.order_number, actor.user_id
        );

        let mut recipients = access.seller_ids();
        recipients.push(order.buyer_id);
        recipients.sort_unstable();
        recipients.dedup();

        let notices = recipients
            .into_iter()
            .filter(|user_id| *user_id != actor.user_id)
            .map(|user_id| {
                CreateNotificationRecord::new(
                    user_id,
                    NotificationKind::Order,
                    format!("Order {target}"),
                    format!("Order {} is now {target}", order.order_number),
                )
                .with_link(order_link(order.id))
                .with_data(json!({ "from": current, "to": target }))
                .for_order(order.id)
            })
            .collect();
        notify_all(&self.notifier, notices).await;

        let message = match target {
            OrderStatus::Canceled => "Order canceled successfully",
            OrderStatus::Completed => "Order completed successfully",
            _ => "Order status updated successfully",
        };
        Ok(ApiResponse::ok(message, order.into()))
    }

    async fn payment(
        &self,
        actor: &Actor,
        id: i64,
        payment_reference: &str,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError> {
        require_role(actor, Role::Admin, "record payments")?;

        let reference = payment_reference.trim();
        if reference.is_empty() {
            return Err(ServiceError::validation(
                "payment_reference: Payment reference is required",
            ));
        }

        let access = self.access(actor, id).await?;
        let order = self
            .orders
            .record_payment(id, reference)
            .await?
            .ok_or_else(|| {
                ServiceError::Conflict(format!(
                    "payment for order {} is not awaiting confirmation",
                    access.order.order_number
                ))
            })?;

        info!("💰 Payment {reference} recorded for order {}", order.order_number);

        notify_all(
            &self.notifier,
            vec![
                CreateNotificationRecord::new(
                    order.buyer_id,
                    NotificationKind::Payment,
                    "Payment received",
                    format!("Payment for order {} has been confirmed", order.order_number),
                )
                .with_link(order_link(order.id))
                .for_order(order.id),
            ],
        )
        .await;

        Ok(ApiResponse::ok("Payment recorded successfully", order.into()))
    }
}

#[async_trait]
impl OrderServiceTrait for OrderService {
    async fn checkout(
        &self,
        actor: &Actor,
        req: &CheckoutRequest,
    ) -> Result<ApiResponse<OrderDetailResponse>, ServiceError> {
        let method = Method::Post;
        let tracing_ctx = self.tracer.start(
            "checkout",
            vec![
                KeyValue::new("component", "order"),
                KeyValue::new("buyer_id", actor.user_id),
                KeyValue::new("shipping_method", req.shipping_method.clone()),
            ],
        );

        let result = self.place(actor, req).await;
        self.tracer
            .finish(&tracing_ctx, method, result, "Checkout completed")
    }

    async fn list_orders(
        &self,
        actor: &Actor,
        req: &FindAllOrders,
    ) -> Result<ApiResponsePagination<Vec<OrderResponse>>, ServiceError> {
        let method = Method::Get;
        let tracing_ctx = self.tracer.start(
            "list_orders",
            vec![
                KeyValue::new("component", "order"),
                KeyValue::new("buyer_id", actor.user_id),
                KeyValue::new("page", req.page.to_string()),
            ],
        );

        let result = self.listing(req, OrderSide::Buyer(actor.user_id)).await;
        self.tracer
            .finish(&tracing_ctx, method, result, "Orders retrieved")
    }

    async fn seller_orders(
        &self,
        actor: &Actor,
        req: &FindAllOrders,
    ) -> Result<ApiResponsePagination<Vec<OrderResponse>>, ServiceError> {
        let method = Method::Get;
        let tracing_ctx = self.tracer.start(
            "seller_orders",
            vec![
                KeyValue::new("component", "order"),
                KeyValue::new("seller_id", actor.user_id),
            ],
        );

        let result = match require_role(actor, Role::Seller, "view seller orders") {
            Ok(()) => self.listing(req, OrderSide::Seller(actor.user_id)).await,
            Err(e) => Err(e),
        };
        self.tracer
            .finish(&tracing_ctx, method, result, "Seller orders retrieved")
    }

    async fn find_order(
        &self,
        actor: &Actor,
        id: i64,
    ) -> Result<ApiResponse<OrderDetailResponse>, ServiceError> {
        let method = Method::Get;
        let tracing_ctx = self.tracer.start(
            "find_order",
            vec![
                KeyValue::new("component", "order"),
                KeyValue::new("order_id", id),
            ],
        );

        let result = self.access(actor, id).await.map(|access| {
            ApiResponse::ok(
                "Order retrieved successfully",
                OrderDetailResponse::new(access.order, access.items),
            )
        });
        self.tracer
            .finish(&tracing_ctx, method, result, "Order retrieved")
    }

    async fn order_items(
        &self,
        actor: &Actor,
        id: i64,
    ) -> Result<ApiResponse<Vec<OrderItemResponse>>, ServiceError> {
        let method = Method::Get;
        let tracing_ctx = self.tracer.start(
            "order_items",
            vec![
                KeyValue::new("component", "order"),
                KeyValue::new("order_id", id),
            ],
        );

        let result = self.access(actor, id).await.map(|access| {
            ApiResponse::ok(
                "Order items retrieved successfully",
                access.items.into_iter().map(Into::into).collect(),
            )
        });
        self.tracer
            .finish(&tracing_ctx, method, result, "Order items retrieved")
    }

    async fn cancel_order(
        &self,
        actor: &Actor,
        id: i64,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError> {
        let method = Method::Put;
        let tracing_ctx = self.tracer.start(
            "cancel_order",
            vec![
                KeyValue::new("component", "order"),
                KeyValue::new("order_id", id),
                KeyValue::new("actor_id", actor.user_id),
            ],
        );

        let result = self.transition(actor, id, OrderStatus::Canceled).await;
        self.tracer
            .finish(&tracing_ctx, method, result, "Order canceled")
    }

    async fn update_order_status(
        &self,
        actor: &Actor,
        id: i64,
        status: OrderStatus,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError> {
        let method = Method::Put;
        let tracing_ctx = self.tracer.start(
            "update_order_status",
            vec![
                KeyValue::new("component", "order"),
                KeyValue::new("order_id", id),
                KeyValue::new("status", status.as_str()),
            ],
        );

        let result = self.transition(actor, id, status).await;
        self.tracer
            .finish(&tracing_ctx, method, result, "Order status updated")
    }

    async fn complete_order(
        &self,
        actor: &Actor,
        id: i64,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError> {
        let method = Method::Put;
        let tracing_ctx = self.tracer.start(
            "complete_order",
            vec![
                KeyValue::new("component", "order"),
                KeyValue::new("order_id", id),
            ],
        );

        let result = self.transition(actor, id, OrderStatus::Completed).await;
        self.tracer
            .finish(&tracing_ctx, method, result, "Order completed")
    }

    async fn record_payment(
        &self,
        actor: &Actor,
        id: i64,
        payment_reference: &str,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError> {
        let method = Method::Put;
        let tracing_ctx = self.tracer.start(
            "record_payment",
            vec![
                KeyValue::new("component", "order"),
                KeyValue::new("order_id", id),
            ],
        );

        let result = self.payment(actor, id, payment_reference).await;
        self.tracer
            .finish(&tracing_ctx, method, result, "Payment recorded")
    }
}
