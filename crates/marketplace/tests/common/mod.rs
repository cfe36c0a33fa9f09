#![allow(dead_code)]

use chrono::Duration;
use marketplace::{
    di::{DependenciesInject, ServiceSettings, Stores},
    domain::{
        actor::Actor,
        enums::{FishType, SellerType},
        requests::{
            address::CreateAddressRequest,
            cart::AddCartItemRequest,
            category::CreateCategoryRequest,
            order::CheckoutRequest,
            product::CreateProductRequest,
            seller_location::CreateSellerLocationRequest,
        },
        response::{order::OrderDetailResponse, product::ProductResponse},
        schedule::OperatingHours,
    },
    repository::memory::MemoryStore,
    service::OrderServiceConfig,
};
use prometheus_client::registry::Registry;
use rust_decimal::Decimal;
use shared::cache::{CacheStore, MemoryCacheBackend};
use std::sync::Arc;

pub const ADMIN: i64 = 1;
pub const SELLER: i64 = 10;
pub const OTHER_SELLER: i64 = 11;
pub const BUYER: i64 = 20;
pub const OTHER_BUYER: i64 = 21;

/// Every service wired over one in-memory store and cache.
pub struct TestApp {
    pub services: DependenciesInject,
    pub store: MemoryStore,
    pub category_id: i64,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_tax_rate(Decimal::ZERO).await
    }

    pub async fn with_tax_rate(tax_rate: Decimal) -> Self {
        let store = MemoryStore::new();
        let cache = Arc::new(CacheStore::new(Arc::new(MemoryCacheBackend::new())));
        let settings = ServiceSettings {
            cart_cache_ttl: Duration::seconds(60),
            order: OrderServiceConfig { tax_rate },
        };
        let mut registry = Registry::default();

        let services =
            DependenciesInject::new(Stores::memory(store.clone()), cache, settings, &mut registry);

        let category_id = services
            .category_service
            .create_category(
                &Actor::admin(ADMIN),
                &CreateCategoryRequest {
                    name: "Ikan Laut".into(),
                    description: None,
                    parent_id: None,
                },
            )
            .await
            .expect("seed category")
            .data
            .id;

        Self {
            services,
            store,
            category_id,
        }
    }

    pub async fn product(&self, seller_id: i64, name: &str, price: Decimal, stock: i32) -> ProductResponse {
        self.services
            .product_service
            .create_product(
                &Actor::seller(seller_id),
                &CreateProductRequest {
                    name: name.into(),
                    description: Some(format!("{name} segar")),
                    price,
                    stock,
                    category_id: self.category_id,
                    images: vec![],
                    weight_grams: Some(500),
                    fish_type: FishType::Fresh,
                    species: None,
                    active: true,
                    featured: false,
                },
            )
            .await
            .expect("seed product")
            .data
    }

    pub async fn stock_of(&self, product_id: i64) -> i32 {
        self.services
            .product_service
            .find_product(&product_id.to_string())
            .await
            .map(|r| r.data.product.stock)
            .unwrap_or(0)
    }

    pub async fn add_to_cart(&self, buyer_id: i64, product_id: i64, quantity: i32) {
        self.services
            .cart_service
            .add(
                &Actor::buyer(buyer_id),
                &AddCartItemRequest {
                    product_id,
                    quantity,
                },
            )
            .await
            .expect("add to cart");
    }

    /// Saves a new address for `user_id` and returns its id.
    pub async fn new_address(&self, user_id: i64, label: &str) -> i64 {
        self.services
            .address_service
            .create_address(
                &Actor::buyer(user_id),
                &CreateAddressRequest {
                    label: Some(label.into()),
                    recipient_name: "Andi".into(),
                    phone: "081234567890".into(),
                    full_address: "Jl. Pelabuhan No. 12".into(),
                    province: "Sulawesi Selatan".into(),
                    city: "Makassar".into(),
                    district: "Wajo".into(),
                    postal_code: "90173".into(),
                    is_main: false,
                    notes: None,
                },
            )
            .await
            .expect("seed address")
            .data
            .id
    }

    /// The buyer's main address, created on first use.
    pub async fn address(&self, user_id: i64) -> i64 {
        let saved = self
            .services
            .address_service
            .my_addresses(&Actor::buyer(user_id))
            .await
            .expect("list addresses")
            .data;

        match saved.first() {
            Some(address) => address.id,
            None => self.new_address(user_id, "Rumah").await,
        }
    }

    pub async fn checkout(
        &self,
        buyer_id: i64,
    ) -> Result<OrderDetailResponse, shared::errors::ServiceError> {
        let address_id = self.address(buyer_id).await;
        self.services
            .order_service
            .checkout(&Actor::buyer(buyer_id), &checkout_request(address_id))
            .await
            .map(|r| r.data)
    }

    pub async fn location(&self, seller_id: i64, hours: Vec<OperatingHours>) -> i64 {
        self.services
            .seller_location_service
            .create_location(
                &Actor::seller(seller_id),
                &CreateSellerLocationRequest {
                    business_name: "Lapak Pak Budi".into(),
                    description: None,
                    address: "Pasar Ikan Paotere".into(),
                    province: "Sulawesi Selatan".into(),
                    city: "Makassar".into(),
                    district: None,
                    postal_code: None,
                    phone: None,
                    photos: vec![],
                    seller_type: SellerType::Fisherman,
                    operating_hours: hours,
                    active: true,
                },
            )
            .await
            .expect("seed location")
            .data
            .id
    }
}

pub fn checkout_request(address_id: i64) -> CheckoutRequest {
    CheckoutRequest {
        address_id,
        shipping_method: "courier".into(),
        shipping_cost: Decimal::new(10_000, 0),
        payment_method: "transfer".into(),
        notes: None,
    }
}
