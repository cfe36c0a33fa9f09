use super::{MemoryStore, contains_ci, now, paginate};
use crate::{
    abstract_trait::product::ProductStoreTrait,
    domain::{
        enums::SortDirection,
        requests::product::{ProductListQuery, ProductRecord, ProductSort},
    },
    model::product::Product,
};
use async_trait::async_trait;
use rust_decimal::Decimal;
use shared::errors::RepositoryError;
use sqlx::types::Json;
use std::cmp::Ordering;

fn compare(a: &Product, b: &Product, sort: ProductSort) -> Ordering {
    let primary = match sort {
        ProductSort::Name => a.name.cmp(&b.name),
        ProductSort::Price => a.price.cmp(&b.price),
        ProductSort::CreatedAt => a.created_at.cmp(&b.created_at),
        ProductSort::RatingAvg => a.rating_avg.cmp(&b.rating_avg),
    };
    primary.then(a.id.cmp(&b.id))
}

fn matches(product: &Product, query: &ProductListQuery) -> bool {
    if query.public_only {
        if !product.is_purchasable() {
            return false;
        }
    } else if product.deleted_at.is_some() {
        return false;
    }

    if let Some(search) = &query.search {
        let hit = contains_ci(&product.name, search)
            || product.description.as_deref().is_some_and(|d| contains_ci(d, search))
            || product.species.as_deref().is_some_and(|s| contains_ci(s, search));
        if !hit {
            return false;
        }
    }

    (query.category_ids.is_empty() || query.category_ids.contains(&product.category_id))
        && query.fish_type.is_none_or(|f| product.fish_type == f)
        && query.min_price.is_none_or(|p| product.price >= p)
        && query.max_price.is_none_or(|p| product.price <= p)
        && query.seller_id.is_none_or(|s| product.seller_id == s)
}

#[async_trait]
impl ProductStoreTrait for MemoryStore {
    async fn find_all(
        &self,
        query: &ProductListQuery,
    ) -> Result<(Vec<Product>, i64), RepositoryError> {
        let t = self.tables.lock().await;

        let mut products: Vec<Product> = t
            .products
            .values()
            .filter(|p| matches(p, query))
            .cloned()
            .collect();

        products.sort_by(|a, b| match query.sort_direction {
            SortDirection::Asc => compare(a, b, query.sort_by),
            SortDirection::Desc => compare(b, a, query.sort_by),
        });

        Ok(paginate(products, query.limit, query.offset))
    }

    async fn find_featured(&self, limit: i64) -> Result<Vec<Product>, RepositoryError> {
        let t = self.tables.lock().await;
        let mut products: Vec<Product> = t
            .products
            .values()
            .filter(|p| p.featured && p.is_purchasable())
            .cloned()
            .collect();
        products.sort_by(|a, b| compare(b, a, ProductSort::CreatedAt));
        products.truncate(limit.max(0) as usize);
        Ok(products)
    }

    async fn find_related(
        &self,
        product: &Product,
        limit: i64,
    ) -> Result<Vec<Product>, RepositoryError> {
        let t = self.tables.lock().await;
        Ok(t.products
            .values()
            .filter(|p| {
                p.id != product.id && p.category_id == product.category_id && p.is_purchasable()
            })
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Product>, RepositoryError> {
        let t = self.tables.lock().await;
        Ok(t.products.get(&id).cloned())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Product>, RepositoryError> {
        let t = self.tables.lock().await;
        Ok(t.products.values().find(|p| p.slug == slug).cloned())
    }

    async fn create_product(&self, record: &ProductRecord) -> Result<Product, RepositoryError> {
        let mut t = self.tables.lock().await;

        if t.products.values().any(|p| p.slug == record.slug) {
            return Err(RepositoryError::AlreadyExists(format!(
                "product slug '{}'",
                record.slug
            )));
        }
        if !t.categories.contains_key(&record.category_id) {
            return Err(RepositoryError::ForeignKey(format!(
                "category {}",
                record.category_id
            )));
        }

        let id = t.next_id();
        let product = Product {
            id,
            seller_id: record.seller_id,
            category_id: record.category_id,
            name: record.name.clone(),
            slug: record.slug.clone(),
            description: record.description.clone(),
            price: record.price,
            stock: record.stock.unwrap_or(0),
            images: Json(record.images.clone()),
            weight_grams: record.weight_grams,
            fish_type: record.fish_type,
            species: record.species.clone(),
            rating_avg: Decimal::ZERO,
            review_count: 0,
            active: record.active,
            featured: record.featured,
            created_at: Some(now()),
            updated_at: Some(now()),
            deleted_at: None,
        };
        t.products.insert(id, product.clone());
        Ok(product)
    }

    async fn update_product(
        &self,
        id: i64,
        record: &ProductRecord,
    ) -> Result<Product, RepositoryError> {
        let mut t = self.tables.lock().await;

        if !t.categories.contains_key(&record.category_id) {
            return Err(RepositoryError::ForeignKey(format!(
                "category {}",
                record.category_id
            )));
        }

        let product = t.products.get_mut(&id).ok_or(RepositoryError::NotFound)?;
        product.category_id = record.category_id;
        product.name = record.name.clone();
        product.slug = record.slug.clone();
        product.description = record.description.clone();
        product.price = record.price;
        if let Some(stock) = record.stock {
            product.stock = stock;
        }
        product.images = Json(record.images.clone());
        product.weight_grams = record.weight_grams;
        product.fish_type = record.fish_type;
        product.species = record.species.clone();
        product.active = record.active;
        product.featured = record.featured;
        product.updated_at = Some(now());

        Ok(product.clone())
    }

    async fn soft_delete(&self, id: i64) -> Result<(), RepositoryError> {
        let mut t = self.tables.lock().await;
        let product = t.products.get_mut(&id).ok_or(RepositoryError::NotFound)?;
        product.active = false;
        product.deleted_at = Some(now());
        product.updated_at = Some(now());
        Ok(())
    }
}
