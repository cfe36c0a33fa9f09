use crate::{
    abstract_trait::{
        cart::{CartServiceTrait, DynCartStore},
        product::DynProductStore,
    },
    cache::CartCache,
    domain::{
        actor::Actor,
        cart::reconcile,
        requests::cart::{AddCartItemRequest, UpdateCartItemRequest},
        response::{
            api::{ApiResponse, CountResponse},
            cart::CartResponse,
        },
    },
    model::{
        cart::{Cart, CartItem},
        product::Product,
    },
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

#[derive(Clone)]
pub struct CartService {
    carts: DynCartStore,
    products: DynProductStore,
    cache: CartCache,
    tracer: ServiceTracer,
}

impl CartService {
    pub fn new(
        carts: DynCartStore,
        products: DynProductStore,
        cache: CartCache,
        registry: &mut Registry,
    ) -> Self {
        Self {
            carts,
            products,
            cache,
            tracer: ServiceTracer::new("cart_service", "CartService", registry),
        }
    }

    /// Rebuilds the cart view from the store, pruning lines that can no
    /// longer be bought and lowering quantities to current stock.
    async fn rebuild(&self, cart: &Cart) -> Result<CartResponse, ServiceError> {
        let lines = self.carts.find_lines(cart.id).await?;
        let reconciled = reconcile(lines);

        let pruned = reconciled.pruned_ids();
        if !pruned.is_empty() {
            let removed = self.carts.delete_items(&pruned).await?;
            info!("🧺 Pruned {removed} unavailable items from cart {}", cart.id);
        }

        for (item_id, quantity) in &reconciled.lowered {
            self.carts.set_quantity(*item_id, *quantity).await?;
            debug!("🧺 Lowered cart item {item_id} to {quantity}");
        }

        Ok(CartResponse::build(
            cart.id,
            reconciled.valid,
            reconciled.invalid,
        ))
    }

    async fn view(&self, actor: &Actor) -> Result<CartResponse, ServiceError> {
        if let Some(cached) = self.cache.get(actor.user_id).await {
            debug!("✅ Cart cache hit for user {}", actor.user_id);
            return Ok(cached);
        }

        let cart = self.carts.get_or_create_cart(actor.user_id).await?;
        let view = self.rebuild(&cart).await?;
        self.cache.put(actor.user_id, &view).await;
        Ok(view)
    }

    /// Product that can be placed in a cart right now.
    async fn available_product(&self, product_id: i64) -> Result<Product, ServiceError> {
        let product = found(self.products.find_by_id(product_id).await?, "Product")?;
        if !product.is_purchasable() {
            return Err(ServiceError::Conflict("product not available".into()));
        }
        Ok(product)
    }

    fn ensure_stock(product: &Product, requested: i32) -> Result<(), ServiceError> {
        if requested > product.stock {
            return Err(ServiceError::Rejected {
                message: format!(
                    "only {} of {} available",
                    product.stock, product.name
                ),
                details: json!({
                    "product_id": product.id,
                    "available": product.stock,
                    "requested": requested,
                }),
            });
        }
        Ok(())
    }

    /// Item that sits in the caller's cart; anything else is reported missing.
    async fn owned_item(&self, actor: &Actor, item_id: i64) -> Result<(Cart, CartItem), ServiceError> {
        let cart = self.carts.get_or_create_cart(actor.user_id).await?;
        let item = self
            .carts
            .find_item(item_id)
            .await?
            .filter(|item| item.cart_id == cart.id);

        Ok((cart, found(item, "Cart item")?))
    }

    async fn fresh_view(&self, actor: &Actor, cart: &Cart) -> Result<CartResponse, ServiceError> {
        self.cache.invalidate(actor.user_id).await;
        self.rebuild(cart).await
    }

    async fn add_item(
        &self,
        actor: &Actor,
        req: &AddCartItemRequest,
    ) -> Result<ApiResponse<CartResponse>, ServiceError> {
        validate_request(req)?;
        let product = self.available_product(req.product_id).await?;

        let cart = self.carts.get_or_create_cart(actor.user_id).await?;
        let existing = self
            .carts
            .find_item_by_product(cart.id, product.id)
            .await?
            .map(|item| item.quantity)
            .unwrap_or(0);

        let quantity = existing + req.quantity;
        Self::ensure_stock(&product, quantity)?;

        self.carts.upsert_item(cart.id, product.id, quantity).await?;
        info!(
            "🛒 User {} now has {quantity} x product {} in cart",
            actor.user_id, product.id
        );

        let view = self.fresh_view(actor, &cart).await?;
        Ok(ApiResponse::ok("Product added to cart", view))
    }

    async fn update_item(
        &self,
        actor: &Actor,
        item_id: i64,
        req: &UpdateCartItemRequest,
    ) -> Result<ApiResponse<CartResponse>, ServiceError> {
        validate_request(req)?;
        let (cart, item) = self.owned_item(actor, item_id).await?;

        let product = self.available_product(item.product_id).await?;
        Self::ensure_stock(&product, req.quantity)?;

        self.carts.set_quantity(item.id, req.quantity).await?;

        let view = self.fresh_view(actor, &cart).await?;
        Ok(ApiResponse::ok("Cart item updated", view))
    }

    async fn remove_item(
        &self,
        actor: &Actor,
        item_id: i64,
    ) -> Result<ApiResponse<CartResponse>, ServiceError> {
        let (cart, item) = self.owned_item(actor, item_id).await?;
        self.carts.delete_items(&[item.id]).await?;

        let view = self.fresh_view(actor, &cart).await?;
        Ok(ApiResponse::ok("Cart item removed", view))
    }

    async fn clear_all(&self, actor: &Actor) -> Result<ApiResponse<CountResponse>, ServiceError> {
        let cart = self.carts.get_or_create_cart(actor.user_id).await?;
        let affected_count = self.carts.clear_cart(cart.id).await?;
        self.cache.invalidate(actor.user_id).await;

        info!("🧹 Cleared {affected_count} items from cart {}", cart.id);
        Ok(ApiResponse::ok(
            "Cart cleared",
            CountResponse { affected_count },
        ))
    }
}

#[async_trait]
impl CartServiceTrait for CartService {
    async fn list(&self, actor: &Actor) -> Result<ApiResponse<CartResponse>, ServiceError> {
        let method = Method::Get;
        let tracing_ctx = self.tracer.start(
            "list_cart",
            vec![
                KeyValue::new("component", "cart"),
                KeyValue::new("user_id", actor.user_id),
            ],
        );

        let result = self
            .view(actor)
            .await
            .map(|cart| ApiResponse::ok("Cart retrieved successfully", cart));

        self.tracer
            .finish(&tracing_ctx, method, result, "Cart retrieved")
    }

    async fn add(
        &self,
        actor: &Actor,
        req: &AddCartItemRequest,
    ) -> Result<ApiResponse<CartResponse>, ServiceError> {
        let method = Method::Post;
        let tracing_ctx = self.tracer.start(
            "add_cart_item",
            vec![
                KeyValue::new("component", "cart"),
                KeyValue::new("user_id", actor.user_id),
                KeyValue::new("product_id", req.product_id),
                KeyValue::new("quantity", req.quantity as i64),
            ],
        );

        let result = self.add_item(actor, req).await;
        self.tracer
            .finish(&tracing_ctx, method, result, "Cart item added")
    }

    async fn update(
        &self,
        actor: &Actor,
        item_id: i64,
        req: &UpdateCartItemRequest,
    ) -> Result<ApiResponse<CartResponse>, ServiceError> {
        let method = Method::Put;
        let tracing_ctx = self.tracer.start(
            "update_cart_item",
            vec![
                KeyValue::new("component", "cart"),
                KeyValue::new("user_id", actor.user_id),
                KeyValue::new("item_id", item_id),
            ],
        );

        let result = self.update_item(actor, item_id, req).await;
        self.tracer
            .finish(&tracing_ctx, method, result, "Cart item updated")
    }

    async fn remove(
        &self,
        actor: &Actor,
        item_id: i64,
    ) -> Result<ApiResponse<CartResponse>, ServiceError> {
        let method = Method::Delete;
        let tracing_ctx = self.tracer.start(
            "remove_cart_item",
            vec![
                KeyValue::new("component", "cart"),
                KeyValue::new("user_id", actor.user_id),
                KeyValue::new("item_id", item_id),
            ],
        );

        let result = self.remove_item(actor, item_id).await;
        self.tracer
            .finish(&tracing_ctx, method, result, "Cart item removed")
    }

    async fn clear(&self, actor: &Actor) -> Result<ApiResponse<CountResponse>, ServiceError> {
        let method = Method::Delete;
        let tracing_ctx = self.tracer.start(
            "clear_cart",
            vec![
                KeyValue::new("component", "cart"),
                KeyValue::new("user_id", actor.user_id),
            ],
        );

        let result = self.clear_all(actor).await;
        self.tracer
            .finish(&tracing_ctx, method, result, "Cart cleared")
    }
}
