use crate::{
    domain::{
        checkout::InvalidCartItem,
        requests::order::{OrderListQuery, PlaceOrderRecord, StatusChangeRecord},
    },
    model::order::{Order, OrderItem, OrderItemContext},
};
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynOrderStore = Arc<dyn OrderStoreTrait + Send + Sync>;

#[derive(Debug)]
pub enum CheckoutOutcome {
    Placed { order: Order, items: Vec<OrderItem> },
    EmptyCart,
    /// Nothing was written; every offending line is listed.
    Rejected(Vec<InvalidCartItem>),
}

#[async_trait]
pub trait OrderStoreTrait {
    /// Converts the buyer's cart into an order. Products are locked, checked,
    /// and decremented, and the cart is emptied, all in one atomic unit.
    async fn place_order(&self, record: &PlaceOrderRecord)
    -> Result<CheckoutOutcome, RepositoryError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Order>, RepositoryError>;
    async fn find_items(&self, order_id: i64) -> Result<Vec<OrderItem>, RepositoryError>;
    async fn find_by_buyer(
        &self,
        buyer_id: i64,
        query: &OrderListQuery,
    ) -> Result<(Vec<Order>, i64), RepositoryError>;
    async fn find_by_seller(
        &self,
        seller_id: i64,
        query: &OrderListQuery,
    ) -> Result<(Vec<Order>, i64), RepositoryError>;
    /// Returns `None` when the order is no longer in `expected`.
    async fn change_status(
        &self,
        change: &StatusChangeRecord,
    ) -> Result<Option<Order>, RepositoryError>;
    /// Returns `None` unless payment is still waiting on a live order.
    async fn record_payment(
        &self,
        order_id: i64,
        reference: &str,
    ) -> Result<Option<Order>, RepositoryError>;
    async fn find_item_context(
        &self,
        item_id: i64,
    ) -> Result<Option<OrderItemContext>, RepositoryError>;
}
