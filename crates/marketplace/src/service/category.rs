use crate::{
    abstract_trait::category::{CategoryServiceTrait, DynCategoryStore},
    domain::{
        actor::{Actor, Role},
        requests::category::{CategoryRecord, CreateCategoryRequest},
        response::{
            api::ApiResponse,
            category::{CategoryDetailResponse, CategoryResponse},
        },
        slug::slugify,
    },
    service::{found, require_role, validate_request},
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use shared::{
    errors::ServiceError,
    utils::{Method, ServiceTracer},
};
use tracing::info;

#[derive(Clone)]
pub struct CategoryService {
    store: DynCategoryStore,
    tracer: ServiceTracer,
}

impl CategoryService {
    pub fn new(store: DynCategoryStore, registry: &mut Registry) -> Self {
        Self {
            store,
            tracer: ServiceTracer::new("category_service", "CategoryService", registry),
        }
    }

    async fn detail(&self, id: i64) -> Result<ApiResponse<CategoryDetailResponse>, ServiceError> {
        let category = found(self.store.find_by_id(id).await?, "Category")?;
        let children = self.store.find_children(id).await?;

        Ok(ApiResponse::ok(
            "Category retrieved successfully",
            CategoryDetailResponse {
                category: category.into(),
                children: children.into_iter().map(Into::into).collect(),
            },
        ))
    }

    async fn create(
        &self,
        actor: &Actor,
        req: &CreateCategoryRequest,
    ) -> Result<ApiResponse<CategoryResponse>, ServiceError> {
        require_role(actor, Role::Admin, "manage categories")?;
        validate_request(req)?;

        let slug = slugify(&req.name);
        if slug.is_empty() {
            return Err(ServiceError::validation(
                "name: must contain at least one letter or digit",
            ));
        }

        if let Some(parent_id) = req.parent_id {
            found(self.store.find_by_id(parent_id).await?, "Parent category")?;
        }

        let category = self
            .store
            .create_category(&CategoryRecord {
                parent_id: req.parent_id,
                name: req.name.trim().to_string(),
                slug,
                description: req.description.clone(),
            })
            .await?;

        info!("🗂️ Category {} created as '{}'", category.id, category.slug);
        Ok(ApiResponse::ok("Category created successfully", category.into()))
    }
}

#[async_trait]
impl CategoryServiceTrait for CategoryService {
    async fn list_categories(&self) -> Result<ApiResponse<Vec<CategoryResponse>>, ServiceError> {
        let method = Method::Get;
        let tracing_ctx = self.tracer.start(
            "list_categories",
            vec![KeyValue::new("component", "category")],
        );

        let result = self
            .store
            .find_all()
            .await
            .map_err(ServiceError::from)
            .map(|categories| {
                ApiResponse::ok(
                    "Categories retrieved successfully",
                    categories.into_iter().map(Into::into).collect(),
                )
            });

        self.tracer
            .finish(&tracing_ctx, method, result, "Categories retrieved")
    }

    async fn find_category(
        &self,
        id: i64,
    ) -> Result<ApiResponse<CategoryDetailResponse>, ServiceError> {
        let method = Method::Get;
        let tracing_ctx = self.tracer.start(
            "find_category",
            vec![
                KeyValue::new("component", "category"),
                KeyValue::new("category_id", id),
            ],
        );

        let result = self.detail(id).await;
        self.tracer
            .finish(&tracing_ctx, method, result, "Category retrieved")
    }

    async fn create_category(
        &self,
        actor: &Actor,
        req: &CreateCategoryRequest,
    ) -> Result<ApiResponse<CategoryResponse>, ServiceError> {
        let method = Method::Post;
        let tracing_ctx = self.tracer.start(
            "create_category",
            vec![
                KeyValue::new("component", "category"),
                KeyValue::new("name", req.name.clone()),
            ],
        );

        let result = self.create(actor, req).await;
        self.tracer
            .finish(&tracing_ctx, method, result, "Category created")
    }
}
