use crate::{
    abstract_trait::category::CategoryStoreTrait, domain::requests::category::CategoryRecord,
    model::category::Category,
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::{error, info};

#[derive(Clone)]
pub struct CategoryRepository {
    db: ConnectionPool,
}

impl CategoryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CategoryStoreTrait for CategoryRepository {
    async fn find_all(&self) -> Result<Vec<Category>, RepositoryError> {
        sqlx::query_as::<_, Category>("SELECT * FROM categories ORDER BY name ASC")
            .fetch_all(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch categories: {e:?}");
                RepositoryError::from(e)
            })
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Category>, RepositoryError> {
        sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch category {id}: {e:?}");
                RepositoryError::from(e)
            })
    }

    async fn find_children(&self, parent_id: i64) -> Result<Vec<Category>, RepositoryError> {
        sqlx::query_as::<_, Category>(
            "SELECT * FROM categories WHERE parent_id = $1 ORDER BY name ASC",
        )
        .bind(parent_id)
        .fetch_all(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch children of category {parent_id}: {e:?}");
            RepositoryError::from(e)
        })
    }

    async fn create_category(&self, record: &CategoryRecord) -> Result<Category, RepositoryError> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (parent_id, name, slug, description, created_at, updated_at)
            VALUES ($1, $2, $3, $4, CURRENT_TIMESTAMP, CURRENT_TIMESTAMP)
            RETURNING *
            "#,
        )
        .bind(record.parent_id)
        .bind(&record.name)
        .bind(&record.slug)
        .bind(&record.description)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to create category {}: {e:?}", record.name);
            RepositoryError::from(e)
        })?;

        info!("✅ Created category ID {} ({})", category.id, category.slug);
        Ok(category)
    }
}
