use super::{Counted, search_term, split_counted};
use crate::{
    abstract_trait::product::ProductStoreTrait,
    domain::requests::product::{ProductListQuery, ProductRecord},
    model::product::Product,
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use sqlx::types::Json;
use tracing::{error, info};

#[derive(Clone)]
pub struct ProductRepository {
    db: ConnectionPool,
}

impl ProductRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

const PURCHASABLE: &str = "p.active AND p.deleted_at IS NULL AND p.stock > 0";

#[async_trait]
impl ProductStoreTrait for ProductRepository {
    async fn find_all(
        &self,
        query: &ProductListQuery,
    ) -> Result<(Vec<Product>, i64), RepositoryError> {
        info!("🔍 Fetching products with search: {:?}", query.search);

        let sql = format!(
            r#"
            SELECT p.*, COUNT(*) OVER() AS total_count
            FROM products p
            WHERE p.deleted_at IS NULL
              AND ($1::BOOLEAN = FALSE OR ({PURCHASABLE}))
              AND ($2::TEXT IS NULL
                   OR p.name ILIKE '%' || $2 || '%'
                   OR p.description ILIKE '%' || $2 || '%'
                   OR p.species ILIKE '%' || $2 || '%')
              AND (cardinality($3::BIGINT[]) = 0 OR p.category_id = ANY($3))
              AND ($4::TEXT IS NULL OR p.fish_type = $4)
              AND ($5::NUMERIC IS NULL OR p.price >= $5)
              AND ($6::NUMERIC IS NULL OR p.price <= $6)
              AND ($7::BIGINT IS NULL OR p.seller_id = $7)
            ORDER BY {column} {direction}, p.id {direction}
            LIMIT $8 OFFSET $9
            "#,
            column = query.sort_by.column(),
            direction = query.sort_direction.sql(),
        );

        let rows = sqlx::query_as::<_, Counted<Product>>(&sql)
            .bind(query.public_only)
            .bind(search_term(query.search.as_deref()))
            .bind(&query.category_ids)
            .bind(query.fish_type)
            .bind(query.min_price)
            .bind(query.max_price)
            .bind(query.seller_id)
            .bind(query.limit)
            .bind(query.offset)
            .fetch_all(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch products: {e:?}");
                RepositoryError::from(e)
            })?;

        Ok(split_counted(rows))
    }

    async fn find_featured(&self, limit: i64) -> Result<Vec<Product>, RepositoryError> {
        let sql = format!(
            "SELECT p.* FROM products p WHERE p.featured AND {PURCHASABLE} \
             ORDER BY p.created_at DESC, p.id DESC LIMIT $1"
        );

        sqlx::query_as::<_, Product>(&sql)
            .bind(limit)
            .fetch_all(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch featured products: {e:?}");
                RepositoryError::from(e)
            })
    }

    async fn find_related(
        &self,
        product: &Product,
        limit: i64,
    ) -> Result<Vec<Product>, RepositoryError> {
        let sql = format!(
            "SELECT p.* FROM products p WHERE p.category_id = $1 AND p.id <> $2 AND {PURCHASABLE} \
             ORDER BY p.rating_avg DESC, p.id DESC LIMIT $3"
        );

        sqlx::query_as::<_, Product>(&sql)
            .bind(product.category_id)
            .bind(product.id)
            .bind(limit)
            .fetch_all(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch products related to {}: {e:?}", product.id);
                RepositoryError::from(e)
            })
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Product>, RepositoryError> {
        sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch product {id}: {e:?}");
                RepositoryError::from(e)
            })
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Product>, RepositoryError> {
        sqlx::query_as::<_, Product>("SELECT * FROM products WHERE slug = $1")
            .bind(slug)
            .fetch_optional(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch product by slug {slug}: {e:?}");
                RepositoryError::from(e)
            })
    }

    async fn create_product(&self, record: &ProductRecord) -> Result<Product, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (
                seller_id, category_id, name, slug, description, price, stock, images,
                weight_grams, fish_type, species, active, featured, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13,
                    CURRENT_TIMESTAMP, CURRENT_TIMESTAMP)
            RETURNING *
            "#,
        )
        .bind(record.seller_id)
        .bind(record.category_id)
        .bind(&record.name)
        .bind(&record.slug)
        .bind(&record.description)
        .bind(record.price)
        .bind(record.stock.unwrap_or(0))
        .bind(Json(&record.images))
        .bind(record.weight_grams)
        .bind(record.fish_type)
        .bind(&record.species)
        .bind(record.active)
        .bind(record.featured)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to create product {}: {e:?}", record.name);
            RepositoryError::from(e)
        })?;

        info!("✅ Created product ID {} ({})", product.id, product.name);
        Ok(product)
    }

    async fn update_product(
        &self,
        id: i64,
        record: &ProductRecord,
    ) -> Result<Product, RepositoryError> {
        let mut tx = self.db.begin().await.map_err(|e| {
            error!("❌ Failed to begin product update: {e:?}");
            RepositoryError::from(e)
        })?;

        // Same lock checkout takes, so an explicit stock write is ordered
        // against in-flight decrements instead of racing them.
        let locked: Option<i64> = sqlx::query_scalar(
            "SELECT id FROM products WHERE id = $1 AND deleted_at IS NULL FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;
        if locked.is_none() {
            return Err(RepositoryError::NotFound);
        }

        let product = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET category_id = $2,
                name = $3,
                slug = $4,
                description = $5,
                price = $6,
                stock = COALESCE($7, stock),
                images = $8,
                weight_grams = $9,
                fish_type = $10,
                species = $11,
                active = $12,
                featured = $13,
                updated_at = CURRENT_TIMESTAMP
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(record.category_id)
        .bind(&record.name)
        .bind(&record.slug)
        .bind(&record.description)
        .bind(record.price)
        .bind(record.stock)
        .bind(Json(&record.images))
        .bind(record.weight_grams)
        .bind(record.fish_type)
        .bind(&record.species)
        .bind(record.active)
        .bind(record.featured)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            error!("❌ Failed to update product {id}: {e:?}");
            RepositoryError::from(e)
        })?;

        tx.commit().await?;

        info!("🔄 Updated product ID {}", product.id);
        Ok(product)
    }

    async fn soft_delete(&self, id: i64) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE products
            SET active = FALSE,
                deleted_at = CURRENT_TIMESTAMP,
                updated_at = CURRENT_TIMESTAMP
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .execute(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to delete product {id}: {e:?}");
            RepositoryError::from(e)
        })?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        info!("🗑️ Product ID {id} moved to trash");
        Ok(())
    }
}
