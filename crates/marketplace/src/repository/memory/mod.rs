//! In-process backend. Every operation runs under one lock over all tables,
//! which makes checkout and cancellation atomic without row locks.

mod address;
mod appointment;
mod cart;
mod category;
mod dashboard;
mod message;
mod notification;
mod order;
mod product;
mod review;
mod seller_location;

use crate::model::{
    address::Address,
    appointment::Appointment,
    cart::{Cart, CartItem},
    category::Category,
    message::Message,
    notification::Notification,
    order::{Order, OrderItem},
    product::Product,
    review::{Review, ReviewReply},
    seller_location::SellerLocation,
};
use chrono::{NaiveDateTime, Utc};
use std::{collections::BTreeMap, sync::Arc};
use tokio::sync::Mutex;

#[derive(Default)]
pub(crate) struct Tables {
    last_id: i64,
    categories: BTreeMap<i64, Category>,
    products: BTreeMap<i64, Product>,
    carts: BTreeMap<i64, Cart>,
    cart_items: BTreeMap<i64, CartItem>,
    orders: BTreeMap<i64, Order>,
    order_items: BTreeMap<i64, OrderItem>,
    reviews: BTreeMap<i64, Review>,
    replies: BTreeMap<i64, ReviewReply>,
    locations: BTreeMap<i64, SellerLocation>,
    appointments: BTreeMap<i64, Appointment>,
    addresses: BTreeMap<i64, Address>,
    messages: BTreeMap<i64, Message>,
    notifications: BTreeMap<i64, Notification>,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }
}

/// Implements every store trait over shared in-memory tables.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

fn paginate<T>(items: Vec<T>, limit: i64, offset: i64) -> (Vec<T>, i64) {
    let total = items.len() as i64;
    let page = items
        .into_iter()
        .skip(offset.max(0) as usize)
        .take(limit.max(0) as usize)
        .collect();
    (page, total)
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
