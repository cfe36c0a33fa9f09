use crate::{
    abstract_trait::address::{AddressServiceTrait, DynAddressStore},
    domain::{
        actor::Actor,
        requests::address::{AddressRecord, CreateAddressRequest, UpdateAddressRequest},
        response::{address::AddressResponse, api::ApiResponse},
    },
    model::address::Address,
    service::{found, validate_request},
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
pub struct AddressService {
    store: DynAddressStore,
    tracer: ServiceTracer,
}

fn trimmed(value: &str) -> String {
    value.trim().to_string()
}

impl AddressService {
    pub fn new(store: DynAddressStore, registry: &mut Registry) -> Self {
        Self {
            store,
            tracer: ServiceTracer::new("address_service", "AddressService", registry),
        }
    }

    async fn owned_address(&self, actor: &Actor, id: i64) -> Result<Address, ServiceError> {
        let address = found(self.store.find_by_id(id).await?, "Address")?;
        if address.user_id != actor.user_id {
            return Err(ServiceError::Forbidden(
                "you can only manage your own addresses".into(),
            ));
        }
        Ok(address)
    }

    async fn create(
        &self,
        actor: &Actor,
        req: &CreateAddressRequest,
    ) -> Result<ApiResponse<AddressResponse>, ServiceError> {
        validate_request(req)?;

        let address = self
            .store
            .create_address(&AddressRecord {
                user_id: actor.user_id,
                label: req.label.clone(),
                recipient_name: trimmed(&req.recipient_name),
                phone: trimmed(&req.phone),
                full_address: trimmed(&req.full_address),
                province: trimmed(&req.province),
                city: trimmed(&req.city),
                district: trimmed(&req.district),
                postal_code: trimmed(&req.postal_code),
                is_main: req.is_main,
                notes: req.notes.clone(),
            })
            .await?;

        info!(
            "🏠 User {} saved address {} in {}",
            actor.user_id, address.id, address.city
        );
        Ok(ApiResponse::ok("Address created successfully", address.into()))
    }

    async fn update(
        &self,
        actor: &Actor,
        id: i64,
        req: &UpdateAddressRequest,
    ) -> Result<ApiResponse<AddressResponse>, ServiceError> {
        validate_request(req)?;

        let current = self.owned_address(actor, id).await?;
        let record = AddressRecord {
            user_id: current.user_id,
            label: req.label.clone().or(current.label),
            recipient_name: req
                .recipient_name
                .as_deref()
                .map(trimmed)
                .unwrap_or(current.recipient_name),
            phone: req.phone.as_deref().map(trimmed).unwrap_or(current.phone),
            full_address: req
                .full_address
                .as_deref()
                .map(trimmed)
                .unwrap_or(current.full_address),
            province: req.province.as_deref().map(trimmed).unwrap_or(current.province),
            city: req.city.as_deref().map(trimmed).unwrap_or(current.city),
            district: req.district.as_deref().map(trimmed).unwrap_or(current.district),
            postal_code: req
                .postal_code
                .as_deref()
                .map(trimmed)
                .unwrap_or(current.postal_code),
            is_main: req.is_main.unwrap_or(current.is_main),
            notes: req.notes.clone().or(current.notes),
        };

        let address = self.store.update_address(id, &record).await?;
        Ok(ApiResponse::ok("Address updated successfully", address.into()))
    }

    async fn make_main(
        &self,
        actor: &Actor,
        id: i64,
    ) -> Result<ApiResponse<AddressResponse>, ServiceError> {
        self.owned_address(actor, id).await?;
        let address = self.store.set_main(id).await?;

        info!("🏠 Address {id} is now the main address of user {}", actor.user_id);
        Ok(ApiResponse::ok("Main address updated", address.into()))
    }

    async fn delete(&self, actor: &Actor, id: i64) -> Result<ApiResponse<()>, ServiceError> {
        self.owned_address(actor, id).await?;
        self.store.delete_address(id).await?;

        info!("🗑️ Address {id} removed by user {}", actor.user_id);
        Ok(ApiResponse::ok("Address deleted successfully", ()))
    }
}

#[async_trait]
impl AddressServiceTrait for AddressService {
    async fn my_addresses(
        &self,
        actor: &Actor,
    ) -> Result<ApiResponse<Vec<AddressResponse>>, ServiceError> {
        let method = Method::Get;
        let tracing_ctx = self.tracer.start(
            "my_addresses",
            vec![
                KeyValue::new("component", "address"),
                KeyValue::new("user_id", actor.user_id),
            ],
        );

        let result = self
            .store
            .find_by_user(actor.user_id)
            .await
            .map_err(ServiceError::from)
            .map(|addresses| {
                ApiResponse::ok(
                    "Addresses retrieved successfully",
                    addresses.into_iter().map(Into::into).collect(),
                )
            });
        self.tracer
            .finish(&tracing_ctx, method, result, "Addresses retrieved")
    }

    async fn find_address(
        &self,
        actor: &Actor,
        id: i64,
    ) -> Result<ApiResponse<AddressResponse>, ServiceError> {
        let method = Method::Get;
        let tracing_ctx = self.tracer.start(
            "find_address",
            vec![
                KeyValue::new("component", "address"),
                KeyValue::new("address_id", id),
            ],
        );

        let result = self
            .owned_address(actor, id)
            .await
            .map(|address| ApiResponse::ok("Address retrieved successfully", address.into()));
        self.tracer
            .finish(&tracing_ctx, method, result, "Address retrieved")
    }

    async fn create_address(
        &self,
        actor: &Actor,
        req: &CreateAddressRequest,
    ) -> Result<ApiResponse<AddressResponse>, ServiceError> {
        let method = Method::Post;
        let tracing_ctx = self.tracer.start(
            "create_address",
            vec![
                KeyValue::new("component", "address"),
                KeyValue::new("user_id", actor.user_id),
            ],
        );

        let result = self.create(actor, req).await;
        self.tracer
            .finish(&tracing_ctx, method, result, "Address created")
    }

    async fn update_address(
        &self,
        actor: &Actor,
        id: i64,
        req: &UpdateAddressRequest,
    ) -> Result<ApiResponse<AddressResponse>, ServiceError> {
        let method = Method::Put;
        let tracing_ctx = self.tracer.start(
            "update_address",
            vec![
                KeyValue::new("component", "address"),
                KeyValue::new("address_id", id),
            ],
        );

        let result = self.update(actor, id, req).await;
        self.tracer
            .finish(&tracing_ctx, method, result, "Address updated")
    }

    async fn set_main_address(
        &self,
        actor: &Actor,
        id: i64,
    ) -> Result<ApiResponse<AddressResponse>, ServiceError> {
        let method = Method::Put;
        let tracing_ctx = self.tracer.start(
            "set_main_address",
            vec![
                KeyValue::new("component", "address"),
                KeyValue::new("address_id", id),
            ],
        );

        let result = self.make_main(actor, id).await;
        self.tracer
            .finish(&tracing_ctx, method, result, "Main address set")
    }

    async fn delete_address(
        &self,
        actor: &Actor,
        id: i64,
    ) -> Result<ApiResponse<()>, ServiceError> {
        let method = Method::Delete;
        let tracing_ctx = self.tracer.start(
            "delete_address",
            vec![
                KeyValue::new("component", "address"),
                KeyValue::new("address_id", id),
            ],
        );

        let result = self.delete(actor, id).await;
        self.tracer
            .finish(&tracing_ctx, method, result, "Address deleted")
    }
}
