use crate::domain::{
    actor::Actor,
    enums::OrderStatus,
    requests::order::{CheckoutRequest, FindAllOrders},
    response::{
        api::{ApiResponse, ApiResponsePagination},
        order::{OrderDetailResponse, OrderItemResponse, OrderResponse},
    },
};
use async_trait::async_trait;
use shared::errors::ServiceError;
use std::sync::Arc;

pub type DynOrderService = Arc<dyn OrderServiceTrait + Send + Sync>;

#[async_trait]
pub trait OrderServiceTrait {
    async fn checkout(
        &self,
        actor: &Actor,
        req: &CheckoutRequest,
    ) -> Result<ApiResponse<OrderDetailResponse>, ServiceError>;
    async fn list_orders(
        &self,
        actor: &Actor,
        req: &FindAllOrders,
    ) -> Result<ApiResponsePagination<Vec<OrderResponse>>, ServiceError>;
    async fn seller_orders(
        &self,
        actor: &Actor,
        req: &FindAllOrders,
    ) -> Result<ApiResponsePagination<Vec<OrderResponse>>, ServiceError>;
    async fn find_order(
        &self,
        actor: &Actor,
        id: i64,
    ) -> Result<ApiResponse<OrderDetailResponse>, ServiceError>;
    async fn order_items(
        &self,
        actor: &Actor,
        id: i64,
    ) -> Result<ApiResponse<Vec<OrderItemResponse>>, ServiceError>;
    async fn cancel_order(
        &self,
        actor: &Actor,
        id: i64,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError>;
    async fn update_order_status(
        &self,
        actor: &Actor,
        id: i64,
        status: OrderStatus,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError>;
    async fn complete_order(
        &self,
        actor: &Actor,
        id: i64,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError>;
    async fn record_payment(
        &self,
        actor: &Actor,
        id: i64,
        payment_reference: &str,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError>;
}
