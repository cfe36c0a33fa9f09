use super::{MemoryStore, Tables, now, paginate};
use crate::{
    abstract_trait::order::{CheckoutOutcome, OrderStoreTrait},
    domain::{
        checkout::{ORDER_NUMBER_ATTEMPTS, RequestedLine, generate_order_number, plan_checkout},
        enums::{OrderStatus, PaymentStatus, SortDirection},
        requests::order::{OrderListQuery, OrderSort, PlaceOrderRecord, StatusChangeRecord},
    },
    model::{
        order::{Order, OrderItem, OrderItemContext},
        product::Product,
    },
};
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::{cmp::Ordering, collections::HashMap};

fn compare(a: &Order, b: &Order, sort: OrderSort) -> Ordering {
    let primary = match sort {
        OrderSort::OrderNumber => a.order_number.cmp(&b.order_number),
        OrderSort::Total => a.total.cmp(&b.total),
        OrderSort::Status => a.status.as_str().cmp(b.status.as_str()),
        OrderSort::CreatedAt => a.created_at.cmp(&b.created_at),
    };
    primary.then(a.id.cmp(&b.id))
}

fn list(orders: Vec<Order>, query: &OrderListQuery) -> (Vec<Order>, i64) {
    let mut orders: Vec<Order> = orders
        .into_iter()
        .filter(|o| query.status.is_none_or(|s| o.status == s))
        .collect();

    orders.sort_by(|a, b| match query.sort_direction {
        SortDirection::Asc => compare(a, b, query.sort_by),
        SortDirection::Desc => compare(b, a, query.sort_by),
    });

    paginate(orders, query.limit, query.offset)
}

fn unique_order_number(t: &Tables) -> Result<String, RepositoryError> {
    let today = now().date();
    for _ in 0..ORDER_NUMBER_ATTEMPTS {
        let candidate = generate_order_number(today)
            .map_err(|e| RepositoryError::Custom(e.to_string()))?;
        if !t.orders.values().any(|o| o.order_number == candidate) {
            return Ok(candidate);
        }
    }
    Err(RepositoryError::Custom(
        "could not allocate a unique order number".into(),
    ))
}

#[async_trait]
impl OrderStoreTrait for MemoryStore {
    async fn place_order(
        &self,
        record: &PlaceOrderRecord,
    ) -> Result<CheckoutOutcome, RepositoryError> {
        let mut t = self.tables.lock().await;

        let Some(cart_id) = t
            .carts
            .values()
            .find(|c| c.user_id == record.buyer_id)
            .map(|c| c.id)
        else {
            return Ok(CheckoutOutcome::EmptyCart);
        };

        let mut requested: Vec<RequestedLine> = t
            .cart_items
            .values()
            .filter(|i| i.cart_id == cart_id)
            .map(|i| RequestedLine {
                product_id: i.product_id,
                quantity: i.quantity,
            })
            .collect();

        if requested.is_empty() {
            return Ok(CheckoutOutcome::EmptyCart);
        }
        requested.sort_by_key(|l| l.product_id);

        let products: HashMap<i64, Product> = requested
            .iter()
            .filter_map(|l| t.products.get(&l.product_id))
            .map(|p| (p.id, p.clone()))
            .collect();

        let plan = match plan_checkout(
            &requested,
            &products,
            record.shipping_cost,
            record.tax_rate,
        ) {
            Ok(plan) => plan,
            Err(violations) => return Ok(CheckoutOutcome::Rejected(violations)),
        };

        let order_number = unique_order_number(&t)?;
        let order_id = t.next_id();
        let created = now();

        let order = Order {
            id: order_id,
            order_number,
            buyer_id: record.buyer_id,
            status: OrderStatus::Waiting,
            payment_status: PaymentStatus::Waiting,
            payment_method: record.payment_method.clone(),
            payment_reference: None,
            address_id: Some(record.address_id),
            shipping_address: record.shipping_address.clone(),
            shipping_method: record.shipping_method.clone(),
            shipping_cost: plan.shipping_cost,
            subtotal: plan.subtotal,
            tax: plan.tax,
            total: plan.total,
            notes: record.notes.clone(),
            completed_at: None,
            canceled_at: None,
            created_at: Some(created),
            updated_at: Some(created),
        };
        t.orders.insert(order_id, order.clone());

        let mut items = Vec::with_capacity(plan.lines.len());
        for line in plan.lines {
            let item_id = t.next_id();
            let item = OrderItem {
                id: item_id,
                order_id,
                product_id: line.product_id,
                seller_id: line.seller_id,
                product_name: line.product_name,
                price: line.price,
                quantity: line.quantity,
                subtotal: line.subtotal,
                created_at: Some(created),
            };
            t.order_items.insert(item_id, item.clone());

            if let Some(product) = t.products.get_mut(&line.product_id) {
                product.stock -= line.quantity;
                product.updated_at = Some(created);
            }
            items.push(item);
        }

        t.cart_items.retain(|_, i| i.cart_id != cart_id);

        Ok(CheckoutOutcome::Placed { order, items })
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Order>, RepositoryError> {
        let t = self.tables.lock().await;
        Ok(t.orders.get(&id).cloned())
    }

    async fn find_items(&self, order_id: i64) -> Result<Vec<OrderItem>, RepositoryError> {
        let t = self.tables.lock().await;
        Ok(t.order_items
            .values()
            .filter(|i| i.order_id == order_id)
            .cloned()
            .collect())
    }

    async fn find_by_buyer(
        &self,
        buyer_id: i64,
        query: &OrderListQuery,
    ) -> Result<(Vec<Order>, i64), RepositoryError> {
        let t = self.tables.lock().await;
        let orders = t
            .orders
            .values()
            .filter(|o| o.buyer_id == buyer_id)
            .cloned()
            .collect();
        Ok(list(orders, query))
    }

    async fn find_by_seller(
        &self,
        seller_id: i64,
        query: &OrderListQuery,
    ) -> Result<(Vec<Order>, i64), RepositoryError> {
        let t = self.tables.lock().await;
        let orders = t
            .orders
            .values()
            .filter(|o| {
                t.order_items
                    .values()
                    .any(|i| i.order_id == o.id && i.seller_id == seller_id)
            })
            .cloned()
            .collect();
        Ok(list(orders, query))
    }

    async fn change_status(
        &self,
        change: &StatusChangeRecord,
    ) -> Result<Option<Order>, RepositoryError> {
        let mut t = self.tables.lock().await;

        match t.orders.get(&change.order_id) {
            Some(order) if order.status == change.expected => {}
            _ => return Ok(None),
        }

        let at = now();

        if change.restocks() {
            let returned: Vec<(i64, i32)> = t
                .order_items
                .values()
                .filter(|i| i.order_id == change.order_id)
                .map(|i| (i.product_id, i.quantity))
                .collect();

            for (product_id, quantity) in returned {
                if let Some(product) = t.products.get_mut(&product_id) {
                    product.stock += quantity;
                    product.updated_at = Some(at);
                }
            }
        }

        let order = t
            .orders
            .get_mut(&change.order_id)
            .ok_or(RepositoryError::NotFound)?;

        order.status = change.next;
        order.updated_at = Some(at);
        if let Some(payment_status) = change.payment_status {
            order.payment_status = payment_status;
        }
        match change.next {
            OrderStatus::Canceled => order.canceled_at = Some(at),
            OrderStatus::Completed => order.completed_at = Some(at),
            _ => {}
        }

        Ok(Some(order.clone()))
    }

    async fn record_payment(
        &self,
        order_id: i64,
        reference: &str,
    ) -> Result<Option<Order>, RepositoryError> {
        let mut t = self.tables.lock().await;

        let Some(order) = t.orders.get_mut(&order_id) else {
            return Ok(None);
        };
        if order.payment_status != PaymentStatus::Waiting || order.status == OrderStatus::Canceled
        {
            return Ok(None);
        }

        order.payment_status = PaymentStatus::Paid;
        order.payment_reference = Some(reference.to_string());
        order.updated_at = Some(now());
        Ok(Some(order.clone()))
    }

    async fn find_item_context(
        &self,
        item_id: i64,
    ) -> Result<Option<OrderItemContext>, RepositoryError> {
        let t = self.tables.lock().await;

        let Some(item) = t.order_items.get(&item_id) else {
            return Ok(None);
        };
        let Some(order) = t.orders.get(&item.order_id) else {
            return Ok(None);
        };

        Ok(Some(OrderItemContext {
            item_id: item.id,
            order_id: order.id,
            product_id: item.product_id,
            seller_id: item.seller_id,
            buyer_id: order.buyer_id,
            order_status: order.status,
        }))
    }
}
