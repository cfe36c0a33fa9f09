use crate::{
    abstract_trait::seller_location::{DynSellerLocationStore, SellerLocationServiceTrait},
    domain::{
        actor::{Actor, Role},
        requests::{
            PageRequest, page_window,
            seller_location::{
                CreateSellerLocationRequest, FindSellerLocations, SellerLocationListQuery,
                SellerLocationRecord, UpdateSellerLocationRequest,
            },
        },
        response::{
            api::{ApiResponse, ApiResponsePagination},
            pagination::Pagination,
            seller_location::SellerLocationResponse,
        },
        schedule::{OperatingHours, validate_hours},
    },
    model::seller_location::SellerLocation,
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
pub struct SellerLocationService {
    store: DynSellerLocationStore,
    tracer: ServiceTracer,
}

fn check_hours(hours: &[OperatingHours]) -> Result<(), ServiceError> {
    validate_hours(hours).map_err(ServiceError::Validation)
}

fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

impl SellerLocationService {
    pub fn new(store: DynSellerLocationStore, registry: &mut Registry) -> Self {
        Self {
            store,
            tracer: ServiceTracer::new(
                "seller_location_service",
                "SellerLocationService",
                registry,
            ),
        }
    }

    async fn owned_location(&self, actor: &Actor, id: i64) -> Result<SellerLocation, ServiceError> {
        let location = found(self.store.find_by_id(id).await?, "Seller location")?;
        if location.seller_id != actor.user_id {
            return Err(ServiceError::Forbidden(
                "you can only manage your own locations".into(),
            ));
        }
        Ok(location)
    }

    async fn page(
        &self,
        query: SellerLocationListQuery,
        page: i32,
    ) -> Result<ApiResponsePagination<Vec<SellerLocationResponse>>, ServiceError> {
        let limit = query.limit;
        let (locations, total) = self.store.find_all(&query).await?;

        Ok(ApiResponsePagination::ok(
            "Seller locations retrieved successfully",
            locations.into_iter().map(Into::into).collect(),
            Pagination::new(page, limit as i32, total),
        ))
    }

    async fn create(
        &self,
        actor: &Actor,
        req: &CreateSellerLocationRequest,
    ) -> Result<ApiResponse<SellerLocationResponse>, ServiceError> {
        require_role(actor, Role::Seller, "register locations")?;
        validate_request(req)?;
        check_hours(&req.operating_hours)?;

        let location = self
            .store
            .create_location(&SellerLocationRecord {
                seller_id: actor.user_id,
                business_name: req.business_name.trim().to_string(),
                description: req.description.clone(),
                address: req.address.trim().to_string(),
                province: req.province.trim().to_string(),
                city: req.city.trim().to_string(),
                district: req.district.clone(),
                postal_code: req.postal_code.clone(),
                phone: req.phone.clone(),
                photos: req.photos.clone(),
                seller_type: req.seller_type,
                operating_hours: req.operating_hours.clone(),
                active: req.active,
            })
            .await?;

        info!(
            "📍 Seller {} registered location {} in {}",
            actor.user_id, location.id, location.city
        );
        Ok(ApiResponse::ok(
            "Seller location created successfully",
            location.into(),
        ))
    }

    async fn update(
        &self,
        actor: &Actor,
        id: i64,
        req: &UpdateSellerLocationRequest,
    ) -> Result<ApiResponse<SellerLocationResponse>, ServiceError> {
        validate_request(req)?;
        if let Some(hours) = &req.operating_hours {
            check_hours(hours)?;
        }

        let current = self.owned_location(actor, id).await?;
        let record = SellerLocationRecord {
            seller_id: current.seller_id,
            business_name: req
                .business_name
                .as_ref()
                .map(|v| v.trim().to_string())
                .unwrap_or(current.business_name),
            description: req.description.clone().or(current.description),
            address: req
                .address
                .as_ref()
                .map(|v| v.trim().to_string())
                .unwrap_or(current.address),
            province: req.province.clone().unwrap_or(current.province),
            city: req.city.clone().unwrap_or(current.city),
            district: req.district.clone().or(current.district),
            postal_code: req.postal_code.clone().or(current.postal_code),
            phone: req.phone.clone().or(current.phone),
            photos: req.photos.clone().unwrap_or(current.photos.0),
            seller_type: req.seller_type.unwrap_or(current.seller_type),
            operating_hours: req
                .operating_hours
                .clone()
                .unwrap_or(current.operating_hours.0),
            active: req.active.unwrap_or(current.active),
        };

        let location = self.store.update_location(id, &record).await?;
        Ok(ApiResponse::ok(
            "Seller location updated successfully",
            location.into(),
        ))
    }

    async fn delete(&self, actor: &Actor, id: i64) -> Result<ApiResponse<()>, ServiceError> {
        self.owned_location(actor, id).await?;
        self.store.delete_location(id).await?;

        info!("🗑️ Seller location {id} removed by seller {}", actor.user_id);
        Ok(ApiResponse::ok("Seller location deleted successfully", ()))
    }
}

#[async_trait]
impl SellerLocationServiceTrait for SellerLocationService {
    async fn create_location(
        &self,
        actor: &Actor,
        req: &CreateSellerLocationRequest,
    ) -> Result<ApiResponse<SellerLocationResponse>, ServiceError> {
        let method = Method::Post;
        let tracing_ctx = self.tracer.start(
            "create_location",
            vec![
                KeyValue::new("component", "seller_location"),
                KeyValue::new("seller_id", actor.user_id),
                KeyValue::new("business_name", req.business_name.clone()),
            ],
        );

        let result = self.create(actor, req).await;
        self.tracer
            .finish(&tracing_ctx, method, result, "Seller location created")
    }

    async fn update_location(
        &self,
        actor: &Actor,
        id: i64,
        req: &UpdateSellerLocationRequest,
    ) -> Result<ApiResponse<SellerLocationResponse>, ServiceError> {
        let method = Method::Put;
        let tracing_ctx = self.tracer.start(
            "update_location",
            vec![
                KeyValue::new("component", "seller_location"),
                KeyValue::new("location_id", id),
            ],
        );

        let result = self.update(actor, id, req).await;
        self.tracer
            .finish(&tracing_ctx, method, result, "Seller location updated")
    }

    async fn delete_location(
        &self,
        actor: &Actor,
        id: i64,
    ) -> Result<ApiResponse<()>, ServiceError> {
        let method = Method::Delete;
        let tracing_ctx = self.tracer.start(
            "delete_location",
            vec![
                KeyValue::new("component", "seller_location"),
                KeyValue::new("location_id", id),
            ],
        );

        let result = self.delete(actor, id).await;
        self.tracer
            .finish(&tracing_ctx, method, result, "Seller location deleted")
    }

    async fn my_locations(
        &self,
        actor: &Actor,
        req: &PageRequest,
    ) -> Result<ApiResponsePagination<Vec<SellerLocationResponse>>, ServiceError> {
        let method = Method::Get;
        let tracing_ctx = self.tracer.start(
            "my_locations",
            vec![
                KeyValue::new("component", "seller_location"),
                KeyValue::new("seller_id", actor.user_id),
            ],
        );

        let result = match validate_request(req) {
            Ok(()) => {
                let (limit, offset) = page_window(req.page, req.page_size);
                self.page(
                    SellerLocationListQuery {
                        seller_id: Some(actor.user_id),
                        limit,
                        offset,
                        ..Default::default()
                    },
                    req.page,
                )
                .await
            }
            Err(e) => Err(e),
        };
        self.tracer
            .finish(&tracing_ctx, method, result, "Seller locations retrieved")
    }

    async fn list_locations(
        &self,
        req: &FindSellerLocations,
    ) -> Result<ApiResponsePagination<Vec<SellerLocationResponse>>, ServiceError> {
        let method = Method::Get;
        let tracing_ctx = self.tracer.start(
            "list_locations",
            vec![
                KeyValue::new("component", "seller_location"),
                KeyValue::new("search", req.search.clone()),
            ],
        );

        let result = match validate_request(req) {
            Ok(()) => {
                let (limit, offset) = page_window(req.page, req.page_size);
                self.page(
                    SellerLocationListQuery {
                        seller_id: None,
                        active_only: true,
                        search: non_blank(&req.search),
                        city: req.city.as_deref().and_then(non_blank),
                        seller_type: req.seller_type,
                        limit,
                        offset,
                    },
                    req.page,
                )
                .await
            }
            Err(e) => Err(e),
        };
        self.tracer
            .finish(&tracing_ctx, method, result, "Seller locations retrieved")
    }

    async fn find_location(
        &self,
        id: i64,
    ) -> Result<ApiResponse<SellerLocationResponse>, ServiceError> {
        let method = Method::Get;
        let tracing_ctx = self.tracer.start(
            "find_location",
            vec![
                KeyValue::new("component", "seller_location"),
                KeyValue::new("location_id", id),
            ],
        );

        let result = self
            .store
            .find_by_id(id)
            .await
            .map_err(ServiceError::from)
            .and_then(|location| {
                found(location.filter(|l| l.active), "Seller location")
            })
            .map(|location| {
                ApiResponse::ok("Seller location retrieved successfully", location.into())
            });
        self.tracer
            .finish(&tracing_ctx, method, result, "Seller location retrieved")
    }
}
