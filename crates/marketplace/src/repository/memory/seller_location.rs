use super::{MemoryStore, contains_ci, now, paginate};
use crate::{
    abstract_trait::seller_location::SellerLocationStoreTrait,
    domain::requests::seller_location::{SellerLocationListQuery, SellerLocationRecord},
    model::seller_location::SellerLocation,
};
use async_trait::async_trait;
use shared::errors::RepositoryError;
use sqlx::types::Json;

fn apply(location: &mut SellerLocation, record: &SellerLocationRecord) {
    location.business_name = record.business_name.clone();
    location.description = record.description.clone();
    location.address = record.address.clone();
    location.province = record.province.clone();
    location.city = record.city.clone();
    location.district = record.district.clone();
    location.postal_code = record.postal_code.clone();
    location.phone = record.phone.clone();
    location.photos = Json(record.photos.clone());
    location.seller_type = record.seller_type;
    location.operating_hours = Json(record.operating_hours.clone());
    location.active = record.active;
    location.updated_at = Some(now());
}

#[async_trait]
impl SellerLocationStoreTrait for MemoryStore {
    async fn find_all(
        &self,
        query: &SellerLocationListQuery,
    ) -> Result<(Vec<SellerLocation>, i64), RepositoryError> {
        let t = self.tables.lock().await;

        let locations: Vec<SellerLocation> = t
            .locations
            .values()
            .rev()
            .filter(|l| query.seller_id.is_none_or(|id| l.seller_id == id))
            .filter(|l| !query.active_only || l.active)
            .filter(|l| {
                query.search.as_deref().is_none_or(|s| {
                    contains_ci(&l.business_name, s)
                        || contains_ci(&l.address, s)
                        || contains_ci(&l.city, s)
                        || l.description.as_deref().is_some_and(|d| contains_ci(d, s))
                })
            })
            .filter(|l| {
                query
                    .city
                    .as_deref()
                    .is_none_or(|c| l.city.eq_ignore_ascii_case(c))
            })
            .filter(|l| query.seller_type.is_none_or(|st| l.seller_type == st))
            .cloned()
            .collect();

        Ok(paginate(locations, query.limit, query.offset))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<SellerLocation>, RepositoryError> {
        let t = self.tables.lock().await;
        Ok(t.locations.get(&id).cloned())
    }

    async fn create_location(
        &self,
        record: &SellerLocationRecord,
    ) -> Result<SellerLocation, RepositoryError> {
        let mut t = self.tables.lock().await;
        let id = t.next_id();

        let mut location = SellerLocation {
            id,
            seller_id: record.seller_id,
            business_name: String::new(),
            description: None,
            address: String::new(),
            province: String::new(),
            city: String::new(),
            district: None,
            postal_code: None,
            phone: None,
            photos: Json(Vec::new()),
            seller_type: record.seller_type,
            operating_hours: Json(Vec::new()),
            active: record.active,
            created_at: Some(now()),
            updated_at: None,
        };
        apply(&mut location, record);

        t.locations.insert(id, location.clone());
        Ok(location)
    }

    async fn update_location(
        &self,
        id: i64,
        record: &SellerLocationRecord,
    ) -> Result<SellerLocation, RepositoryError> {
        let mut t = self.tables.lock().await;
        let location = t.locations.get_mut(&id).ok_or(RepositoryError::NotFound)?;
        apply(location, record);
        Ok(location.clone())
    }

    async fn delete_location(&self, id: i64) -> Result<(), RepositoryError> {
        let mut t = self.tables.lock().await;

        if t.appointments.values().any(|a| a.location_id == id) {
            return Err(RepositoryError::ForeignKey(format!(
                "location {id} has appointments"
            )));
        }

        t.locations
            .remove(&id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }
}
