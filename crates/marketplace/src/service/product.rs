use crate::{
    abstract_trait::{
        category::DynCategoryStore,
        product::{DynProductStore, ProductServiceTrait},
    },
    domain::{
        actor::{Actor, Role},
        requests::{
            page_window,
            product::{
                CreateProductRequest, FindAllProducts, ProductListQuery, ProductRecord,
                UpdateProductRequest,
            },
        },
        response::{
            api::{ApiResponse, ApiResponsePagination},
            pagination::Pagination,
            product::{ProductDetailResponse, ProductResponse},
        },
        slug::slugify,
    },
    model::product::Product,
    service::{found, require_role, validate_request},
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use shared::{
    errors::ServiceError,
    utils::{Method, ServiceTracer, generate_random_string},
};
use tracing::info;

const FEATURED_LIMIT: i64 = 10;
const RELATED_LIMIT: i64 = 4;
const SLUG_SUFFIX_LEN: usize = 6;

#[derive(Clone)]
pub struct ProductService {
    products: DynProductStore,
    categories: DynCategoryStore,
    tracer: ServiceTracer,
}

impl ProductService {
    pub fn new(
        products: DynProductStore,
        categories: DynCategoryStore,
        registry: &mut Registry,
    ) -> Self {
        Self {
            products,
            categories,
            tracer: ServiceTracer::new("product_service", "ProductService", registry),
        }
    }

    fn product_slug(name: &str) -> Result<String, ServiceError> {
        let base = slugify(name);
        if base.is_empty() {
            return Err(ServiceError::validation(
                "name: must contain at least one letter or digit",
            ));
        }
        let suffix = generate_random_string(SLUG_SUFFIX_LEN)
            .map_err(|e| ServiceError::Internal(format!("slug suffix: {e}")))?;
        Ok(format!("{base}-{suffix}"))
    }

    async fn ensure_category(&self, category_id: i64) -> Result<(), ServiceError> {
        match self.categories.find_by_id(category_id).await? {
            Some(_) => Ok(()),
            None => Err(ServiceError::validation(
                "category_id: category does not exist",
            )),
        }
    }

    /// The category itself plus its direct children.
    async fn category_scope(&self, category_id: Option<i64>) -> Result<Vec<i64>, ServiceError> {
        let Some(category_id) = category_id else {
            return Ok(Vec::new());
        };

        let mut ids = vec![category_id];
        ids.extend(
            self.categories
                .find_children(category_id)
                .await?
                .into_iter()
                .map(|c| c.id),
        );
        Ok(ids)
    }

    async fn listing(
        &self,
        req: &FindAllProducts,
        seller_id: Option<i64>,
    ) -> Result<ApiResponsePagination<Vec<ProductResponse>>, ServiceError> {
        validate_request(req)?;

        if let (Some(min), Some(max)) = (req.min_price, req.max_price) {
            if min > max {
                return Err(ServiceError::validation(
                    "min_price: must not exceed max_price",
                ));
            }
        }

        let (limit, offset) = page_window(req.page, req.page_size);
        let search = req.search.trim();
        let query = ProductListQuery {
            search: (!search.is_empty()).then(|| search.to_string()),
            category_ids: self.category_scope(req.category_id).await?,
            fish_type: req.fish_type,
            min_price: req.min_price,
            max_price: req.max_price,
            seller_id,
            public_only: seller_id.is_none(),
            sort_by: req.sort_by,
            sort_direction: req.sort_direction,
            limit,
            offset,
        };

        let (products, total) = self.products.find_all(&query).await?;
        info!("📦 Listed {} of {total} products", products.len());

        Ok(ApiResponsePagination::ok(
            "Products retrieved successfully",
            products.into_iter().map(ProductResponse::from).collect(),
            Pagination::new(req.page, limit as i32, total),
        ))
    }

    async fn detail(&self, id_or_slug: &str) -> Result<ApiResponse<ProductDetailResponse>, ServiceError> {
        let product = match id_or_slug.parse::<i64>() {
            Ok(id) => self.products.find_by_id(id).await?,
            Err(_) => self.products.find_by_slug(id_or_slug).await?,
        };

        let product = product
            .filter(Product::is_listed)
            .ok_or_else(|| ServiceError::NotFound("Product not found".into()))?;

        let related = self.products.find_related(&product, RELATED_LIMIT).await?;

        Ok(ApiResponse::ok(
            "Product retrieved successfully",
            ProductDetailResponse {
                product: product.into(),
                related: related.into_iter().map(Into::into).collect(),
            },
        ))
    }

    /// Live product owned by the caller.
    async fn owned_product(&self, actor: &Actor, id: i64) -> Result<Product, ServiceError> {
        let product = self
            .products
            .find_by_id(id)
            .await?
            .filter(|p| p.deleted_at.is_none());
        let product = found(product, "Product")?;

        if product.seller_id != actor.user_id {
            return Err(ServiceError::Forbidden(
                "you can only manage your own products".into(),
            ));
        }
        Ok(product)
    }

    async fn create(
        &self,
        actor: &Actor,
        req: &CreateProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        require_role(actor, Role::Seller, "create products")?;
        validate_request(req)?;
        self.ensure_category(req.category_id).await?;

        let record = ProductRecord {
            seller_id: actor.user_id,
            category_id: req.category_id,
            name: req.name.trim().to_string(),
            slug: Self::product_slug(&req.name)?,
            description: req.description.clone(),
            price: req.price,
            stock: Some(req.stock),
            images: req.images.clone(),
            weight_grams: req.weight_grams,
            fish_type: req.fish_type,
            species: req.species.clone(),
            active: req.active,
            featured: req.featured,
        };

        let product = self.products.create_product(&record).await?;
        info!("🐟 Seller {} listed product {} ({})", actor.user_id, product.id, product.slug);

        Ok(ApiResponse::ok("Product created successfully", product.into()))
    }

    async fn update(
        &self,
        actor: &Actor,
        id: i64,
        req: &UpdateProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        validate_request(req)?;
        let current = self.owned_product(actor, id).await?;

        if let Some(category_id) = req.category_id {
            if category_id != current.category_id {
                self.ensure_category(category_id).await?;
            }
        }

        let slug = match &req.name {
            Some(name) if name.trim() != current.name => Self::product_slug(name)?,
            _ => current.slug.clone(),
        };

        let record = ProductRecord {
            seller_id: current.seller_id,
            category_id: req.category_id.unwrap_or(current.category_id),
            name: req
                .name
                .as_ref()
                .map(|n| n.trim().to_string())
                .unwrap_or(current.name),
            slug,
            description: req.description.clone().or(current.description),
            price: req.price.unwrap_or(current.price),
            stock: req.stock,
            images: req.images.clone().unwrap_or(current.images.0),
            weight_grams: req.weight_grams.or(current.weight_grams),
            fish_type: req.fish_type.unwrap_or(current.fish_type),
            species: req.species.clone().or(current.species),
            active: req.active.unwrap_or(current.active),
            featured: req.featured.unwrap_or(current.featured),
        };

        let product = self.products.update_product(id, &record).await?;
        Ok(ApiResponse::ok("Product updated successfully", product.into()))
    }

    async fn delete(&self, actor: &Actor, id: i64) -> Result<ApiResponse<()>, ServiceError> {
        self.owned_product(actor, id).await?;
        self.products.soft_delete(id).await?;

        info!("🗑️ Product {id} soft-deleted by seller {}", actor.user_id);
        Ok(ApiResponse::ok("Product deleted successfully", ()))
    }
}

#[async_trait]
impl ProductServiceTrait for ProductService {
    async fn list_products(
        &self,
        req: &FindAllProducts,
    ) -> Result<ApiResponsePagination<Vec<ProductResponse>>, ServiceError> {
        let method = Method::Get;
        let tracing_ctx = self.tracer.start(
            "list_products",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("page", req.page.to_string()),
                KeyValue::new("page_size", req.page_size.to_string()),
                KeyValue::new("search", req.search.clone()),
            ],
        );

        let result = self.listing(req, None).await;
        self.tracer
            .finish(&tracing_ctx, method, result, "Products retrieved")
    }

    async fn featured_products(&self) -> Result<ApiResponse<Vec<ProductResponse>>, ServiceError> {
        let method = Method::Get;
        let tracing_ctx = self.tracer.start(
            "featured_products",
            vec![KeyValue::new("component", "product")],
        );

        let result = self
            .products
            .find_featured(FEATURED_LIMIT)
            .await
            .map_err(ServiceError::from)
            .map(|products| {
                ApiResponse::ok(
                    "Featured products retrieved successfully",
                    products.into_iter().map(Into::into).collect(),
                )
            });

        self.tracer
            .finish(&tracing_ctx, method, result, "Featured products retrieved")
    }

    async fn find_product(
        &self,
        id_or_slug: &str,
    ) -> Result<ApiResponse<ProductDetailResponse>, ServiceError> {
        let method = Method::Get;
        let tracing_ctx = self.tracer.start(
            "find_product",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("product", id_or_slug.to_string()),
            ],
        );

        let result = self.detail(id_or_slug).await;
        self.tracer
            .finish(&tracing_ctx, method, result, "Product retrieved")
    }

    async fn seller_products(
        &self,
        actor: &Actor,
        req: &FindAllProducts,
    ) -> Result<ApiResponsePagination<Vec<ProductResponse>>, ServiceError> {
        let method = Method::Get;
        let tracing_ctx = self.tracer.start(
            "seller_products",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("seller_id", actor.user_id),
            ],
        );

        let result = match require_role(actor, Role::Seller, "view seller products") {
            Ok(()) => self.listing(req, Some(actor.user_id)).await,
            Err(e) => Err(e),
        };
        self.tracer
            .finish(&tracing_ctx, method, result, "Seller products retrieved")
    }

    async fn create_product(
        &self,
        actor: &Actor,
        req: &CreateProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        let method = Method::Post;
        let tracing_ctx = self.tracer.start(
            "create_product",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("seller_id", actor.user_id),
                KeyValue::new("name", req.name.clone()),
            ],
        );

        let result = self.create(actor, req).await;
        self.tracer
            .finish(&tracing_ctx, method, result, "Product created")
    }

    async fn update_product(
        &self,
        actor: &Actor,
        id: i64,
        req: &UpdateProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        let method = Method::Put;
        let tracing_ctx = self.tracer.start(
            "update_product",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("product_id", id),
            ],
        );

        let result = self.update(actor, id, req).await;
        self.tracer
            .finish(&tracing_ctx, method, result, "Product updated")
    }

    async fn delete_product(&self, actor: &Actor, id: i64) -> Result<ApiResponse<()>, ServiceError> {
        let method = Method::Delete;
        let tracing_ctx = self.tracer.start(
            "delete_product",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("product_id", id),
            ],
        );

        let result = self.delete(actor, id).await;
        self.tracer
            .finish(&tracing_ctx, method, result, "Product deleted")
    }
}
