use super::{Counted, search_term, split_counted};
use crate::{
    abstract_trait::seller_location::SellerLocationStoreTrait,
    domain::requests::seller_location::{SellerLocationListQuery, SellerLocationRecord},
    model::seller_location::SellerLocation,
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use sqlx::types::Json;
use tracing::{error, info};

#[derive(Clone)]
pub struct SellerLocationRepository {
    db: ConnectionPool,
}

impl SellerLocationRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SellerLocationStoreTrait for SellerLocationRepository {
    async fn find_all(
        &self,
        query: &SellerLocationListQuery,
    ) -> Result<(Vec<SellerLocation>, i64), RepositoryError> {
        let rows = sqlx::query_as::<_, Counted<SellerLocation>>(
            r#"
            SELECT l.*, COUNT(*) OVER() AS total_count
            FROM seller_locations l
            WHERE ($1::BIGINT IS NULL OR l.seller_id = $1)
              AND ($2::BOOLEAN = FALSE OR l.active)
              AND ($3::TEXT IS NULL
                   OR l.business_name ILIKE '%' || $3 || '%'
                   OR l.address ILIKE '%' || $3 || '%'
                   OR l.city ILIKE '%' || $3 || '%'
                   OR l.description ILIKE '%' || $3 || '%')
              AND ($4::TEXT IS NULL OR LOWER(l.city) = LOWER($4))
              AND ($5::TEXT IS NULL OR l.seller_type = $5)
            ORDER BY l.created_at DESC, l.id DESC
            LIMIT $6 OFFSET $7
            "#,
        )
        .bind(query.seller_id)
        .bind(query.active_only)
        .bind(search_term(query.search.as_deref()))
        .bind(&query.city)
        .bind(query.seller_type)
        .bind(query.limit)
        .bind(query.offset)
        .fetch_all(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch seller locations: {e:?}");
            RepositoryError::from(e)
        })?;

        Ok(split_counted(rows))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<SellerLocation>, RepositoryError> {
        sqlx::query_as::<_, SellerLocation>("SELECT * FROM seller_locations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch seller location {id}: {e:?}");
                RepositoryError::from(e)
            })
    }

    async fn create_location(
        &self,
        record: &SellerLocationRecord,
    ) -> Result<SellerLocation, RepositoryError> {
        let location = sqlx::query_as::<_, SellerLocation>(
            r#"
            INSERT INTO seller_locations (
                seller_id, business_name, description, address, province, city, district,
                postal_code, phone, photos, seller_type, operating_hours, active,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13,
                    CURRENT_TIMESTAMP, CURRENT_TIMESTAMP)
            RETURNING *
            "#,
        )
        .bind(record.seller_id)
        .bind(&record.business_name)
        .bind(&record.description)
        .bind(&record.address)
        .bind(&record.province)
        .bind(&record.city)
        .bind(&record.district)
        .bind(&record.postal_code)
        .bind(&record.phone)
        .bind(Json(&record.photos))
        .bind(record.seller_type)
        .bind(Json(&record.operating_hours))
        .bind(record.active)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to create location {}: {e:?}", record.business_name);
            RepositoryError::from(e)
        })?;

        info!("📍 Created seller location ID {}", location.id);
        Ok(location)
    }

    async fn update_location(
        &self,
        id: i64,
        record: &SellerLocationRecord,
    ) -> Result<SellerLocation, RepositoryError> {
        sqlx::query_as::<_, SellerLocation>(
            r#"
            UPDATE seller_locations
            SET business_name = $2,
                description = $3,
                address = $4,
                province = $5,
                city = $6,
                district = $7,
                postal_code = $8,
                phone = $9,
                photos = $10,
                seller_type = $11,
                operating_hours = $12,
                active = $13,
                updated_at = CURRENT_TIMESTAMP
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&record.business_name)
        .bind(&record.description)
        .bind(&record.address)
        .bind(&record.province)
        .bind(&record.city)
        .bind(&record.district)
        .bind(&record.postal_code)
        .bind(&record.phone)
        .bind(Json(&record.photos))
        .bind(record.seller_type)
        .bind(Json(&record.operating_hours))
        .bind(record.active)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to update location {id}: {e:?}");
            RepositoryError::from(e)
        })
    }

    async fn delete_location(&self, id: i64) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM seller_locations WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to delete location {id}: {e:?}");
                RepositoryError::from(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        info!("🗑️ Deleted seller location {id}");
        Ok(())
    }
}
