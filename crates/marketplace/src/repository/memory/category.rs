use super::{MemoryStore, now};
use crate::{
    abstract_trait::category::CategoryStoreTrait, domain::requests::category::CategoryRecord,
    model::category::Category,
};
use async_trait::async_trait;
use shared::errors::RepositoryError;

#[async_trait]
impl CategoryStoreTrait for MemoryStore {
    async fn find_all(&self) -> Result<Vec<Category>, RepositoryError> {
        let t = self.tables.lock().await;
        let mut categories: Vec<Category> = t.categories.values().cloned().collect();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Category>, RepositoryError> {
        let t = self.tables.lock().await;
        Ok(t.categories.get(&id).cloned())
    }

    async fn find_children(&self, parent_id: i64) -> Result<Vec<Category>, RepositoryError> {
        let t = self.tables.lock().await;
        Ok(t.categories
            .values()
            .filter(|c| c.parent_id == Some(parent_id))
            .cloned()
            .collect())
    }

    async fn create_category(&self, record: &CategoryRecord) -> Result<Category, RepositoryError> {
        let mut t = self.tables.lock().await;

        if t.categories.values().any(|c| c.slug == record.slug) {
            return Err(RepositoryError::AlreadyExists(format!(
                "category slug '{}'",
                record.slug
            )));
        }
        if let Some(parent_id) = record.parent_id {
            if !t.categories.contains_key(&parent_id) {
                return Err(RepositoryError::ForeignKey(format!(
                    "parent category {parent_id}"
                )));
            }
        }

        let id = t.next_id();
        let category = Category {
            id,
            parent_id: record.parent_id,
            name: record.name.clone(),
            slug: record.slug.clone(),
            description: record.description.clone(),
            created_at: Some(now()),
            updated_at: Some(now()),
        };
        t.categories.insert(id, category.clone());
        Ok(category)
    }
}
