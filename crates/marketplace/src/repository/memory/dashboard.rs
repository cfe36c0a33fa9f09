use super::{MemoryStore, Tables};
use crate::{
    abstract_trait::dashboard::DashboardStoreTrait,
    domain::enums::{AppointmentStatus, PaymentStatus},
    model::{
        appointment::Appointment,
        dashboard::{DailySales, SellerOrderLine, SellerTotals, StatusCount},
        order::{Order, OrderItem},
        review::{RatingCount, Review},
    },
};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use shared::errors::RepositoryError;
use std::{
    cmp::Reverse,
    collections::{BTreeMap, BTreeSet, HashMap},
};

/// The seller's order lines, each paired with its order.
fn seller_lines(t: &Tables, seller_id: i64) -> Vec<(&OrderItem, &Order)> {
    t.order_items
        .values()
        .filter(|i| i.seller_id == seller_id)
        .filter_map(|i| t.orders.get(&i.order_id).map(|o| (i, o)))
        .collect()
}

fn seller_reviews(t: &Tables, seller_id: i64) -> impl Iterator<Item = &Review> {
    t.reviews.values().filter(move |r| {
        t.products
            .get(&r.product_id)
            .is_some_and(|p| p.seller_id == seller_id)
    })
}

#[async_trait]
impl DashboardStoreTrait for MemoryStore {
    async fn seller_totals(&self, seller_id: i64) -> Result<SellerTotals, RepositoryError> {
        let t = self.tables.lock().await;
        let lines = seller_lines(&t, seller_id);

        let products = t
            .products
            .values()
            .filter(|p| p.seller_id == seller_id && p.deleted_at.is_none());

        Ok(SellerTotals {
            total_revenue: lines
                .iter()
                .filter(|(_, o)| o.payment_status == PaymentStatus::Paid)
                .map(|(i, _)| i.subtotal)
                .sum::<Decimal>(),
            order_count: lines
                .iter()
                .map(|(i, _)| i.order_id)
                .collect::<BTreeSet<_>>()
                .len() as i64,
            product_count: products.clone().count() as i64,
            out_of_stock_count: products.filter(|p| p.stock == 0).count() as i64,
            unreplied_review_count: seller_reviews(&t, seller_id)
                .filter(|r| !t.replies.values().any(|reply| reply.review_id == r.id))
                .count() as i64,
        })
    }

    async fn seller_rating_counts(
        &self,
        seller_id: i64,
    ) -> Result<Vec<RatingCount>, RepositoryError> {
        let t = self.tables.lock().await;

        let mut counts: BTreeMap<i32, i64> = BTreeMap::new();
        for review in seller_reviews(&t, seller_id) {
            *counts.entry(review.rating).or_default() += 1;
        }

        Ok(counts
            .into_iter()
            .map(|(rating, count)| RatingCount { rating, count })
            .collect())
    }

    async fn seller_status_counts(
        &self,
        seller_id: i64,
    ) -> Result<Vec<StatusCount>, RepositoryError> {
        let t = self.tables.lock().await;

        let orders: HashMap<i64, &Order> = seller_lines(&t, seller_id)
            .into_iter()
            .map(|(_, o)| (o.id, o))
            .collect();

        let mut counts: Vec<StatusCount> = Vec::new();
        for order in orders.values() {
            match counts.iter_mut().find(|c| c.status == order.status) {
                Some(c) => c.count += 1,
                None => counts.push(StatusCount {
                    status: order.status,
                    count: 1,
                }),
            }
        }
        Ok(counts)
    }

    async fn seller_daily_sales(
        &self,
        seller_id: i64,
        since: NaiveDate,
    ) -> Result<Vec<DailySales>, RepositoryError> {
        let t = self.tables.lock().await;

        let mut by_day: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
        for (item, order) in seller_lines(&t, seller_id) {
            let Some(day) = order.created_at.map(|at| at.date()) else {
                continue;
            };
            if order.payment_status == PaymentStatus::Paid && day >= since {
                *by_day.entry(day).or_default() += item.subtotal;
            }
        }

        Ok(by_day
            .into_iter()
            .map(|(day, revenue)| DailySales { day, revenue })
            .collect())
    }

    async fn seller_latest_lines(
        &self,
        seller_id: i64,
        limit: i64,
    ) -> Result<Vec<SellerOrderLine>, RepositoryError> {
        let t = self.tables.lock().await;

        let mut lines = seller_lines(&t, seller_id);
        lines.sort_by_key(|(i, _)| Reverse((i.created_at, i.id)));

        Ok(lines
            .into_iter()
            .take(limit.max(0) as usize)
            .map(|(item, order)| SellerOrderLine {
                item_id: item.id,
                order_id: order.id,
                order_number: order.order_number.clone(),
                buyer_id: order.buyer_id,
                status: order.status,
                product_name: item.product_name.clone(),
                quantity: item.quantity,
                price: item.price,
                subtotal: item.subtotal,
                created_at: item.created_at,
            })
            .collect())
    }

    async fn seller_upcoming_appointments(
        &self,
        seller_id: i64,
        from: NaiveDateTime,
        limit: i64,
    ) -> Result<Vec<Appointment>, RepositoryError> {
        let t = self.tables.lock().await;

        let mut upcoming: Vec<Appointment> = t
            .appointments
            .values()
            .filter(|a| a.seller_id == seller_id && a.scheduled_at >= from)
            .filter(|a| {
                matches!(
                    a.status,
                    AppointmentStatus::Waiting | AppointmentStatus::Confirmed
                )
            })
            .cloned()
            .collect();
        upcoming.sort_by_key(|a| (a.scheduled_at, a.id));
        upcoming.truncate(limit.max(0) as usize);
        Ok(upcoming)
    }
}
