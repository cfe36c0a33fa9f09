use crate::{
    abstract_trait::address::AddressStoreTrait, domain::requests::address::AddressRecord,
    model::address::Address,
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use sqlx::{Postgres, Transaction};
use tracing::{error, info};

#[derive(Clone)]
pub struct AddressRepository {
    db: ConnectionPool,
}

impl AddressRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

/// Runs before the main flag is written, so the partial unique index on
/// `(user_id) WHERE is_main` never sees two main rows.
async fn clear_main(
    tx: &mut Transaction<'_, Postgres>,
    user_id: i64,
    keep: i64,
) -> Result<(), RepositoryError> {
    sqlx::query(
        r#"
        UPDATE addresses
        SET is_main = FALSE, updated_at = CURRENT_TIMESTAMP
        WHERE user_id = $1 AND id <> $2 AND is_main
        "#,
    )
    .bind(user_id)
    .bind(keep)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

#[async_trait]
impl AddressStoreTrait for AddressRepository {
    async fn find_by_user(&self, user_id: i64) -> Result<Vec<Address>, RepositoryError> {
        sqlx::query_as::<_, Address>(
            "SELECT * FROM addresses WHERE user_id = $1 ORDER BY is_main DESC, id DESC",
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch addresses of user {user_id}: {e:?}");
            RepositoryError::from(e)
        })
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Address>, RepositoryError> {
        sqlx::query_as::<_, Address>("SELECT * FROM addresses WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch address {id}: {e:?}");
                RepositoryError::from(e)
            })
    }

    async fn create_address(&self, record: &AddressRecord) -> Result<Address, RepositoryError> {
        let mut tx = self.db.begin().await?;

        let existing: Vec<i64> =
            sqlx::query_scalar("SELECT id FROM addresses WHERE user_id = $1 FOR UPDATE")
                .bind(record.user_id)
                .fetch_all(&mut *tx)
                .await?;

        let is_main = record.is_main || existing.is_empty();
        if is_main {
            clear_main(&mut tx, record.user_id, 0).await?;
        }

        let address = sqlx::query_as::<_, Address>(
            r#"
            INSERT INTO addresses (
                user_id, label, recipient_name, phone, full_address, province, city,
                district, postal_code, is_main, notes, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11,
                    CURRENT_TIMESTAMP, CURRENT_TIMESTAMP)
            RETURNING *
            "#,
        )
        .bind(record.user_id)
        .bind(&record.label)
        .bind(&record.recipient_name)
        .bind(&record.phone)
        .bind(&record.full_address)
        .bind(&record.province)
        .bind(&record.city)
        .bind(&record.district)
        .bind(&record.postal_code)
        .bind(is_main)
        .bind(&record.notes)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            error!("❌ Failed to create address for user {}: {e:?}", record.user_id);
            RepositoryError::from(e)
        })?;

        tx.commit().await?;

        info!("🏠 Created address ID {} for user {}", address.id, address.user_id);
        Ok(address)
    }

    async fn update_address(
        &self,
        id: i64,
        record: &AddressRecord,
    ) -> Result<Address, RepositoryError> {
        let mut tx = self.db.begin().await?;

        if record.is_main {
            clear_main(&mut tx, record.user_id, id).await?;
        }

        let address = sqlx::query_as::<_, Address>(
            r#"
            UPDATE addresses
            SET label = $2,
                recipient_name = $3,
                phone = $4,
                full_address = $5,
                province = $6,
                city = $7,
                district = $8,
                postal_code = $9,
                is_main = $10,
                notes = $11,
                updated_at = CURRENT_TIMESTAMP
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&record.label)
        .bind(&record.recipient_name)
        .bind(&record.phone)
        .bind(&record.full_address)
        .bind(&record.province)
        .bind(&record.city)
        .bind(&record.district)
        .bind(&record.postal_code)
        .bind(record.is_main)
        .bind(&record.notes)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| {
            error!("❌ Failed to update address {id}: {e:?}");
            RepositoryError::from(e)
        })?
        .ok_or(RepositoryError::NotFound)?;

        tx.commit().await?;
        Ok(address)
    }

    async fn set_main(&self, id: i64) -> Result<Address, RepositoryError> {
        let mut tx = self.db.begin().await?;

        let user_id: i64 =
            sqlx::query_scalar("SELECT user_id FROM addresses WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or(RepositoryError::NotFound)?;

        clear_main(&mut tx, user_id, id).await?;

        let address = sqlx::query_as::<_, Address>(
            r#"
            UPDATE addresses
            SET is_main = TRUE, updated_at = CURRENT_TIMESTAMP
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(address)
    }

    async fn delete_address(&self, id: i64) -> Result<(), RepositoryError> {
        let mut tx = self.db.begin().await?;

        // Order inserts take a key-share lock on the address, so this row
        // lock orders the delete against a checkout that references it.
        let target: Option<(i64, bool)> =
            sqlx::query_as("SELECT user_id, is_main FROM addresses WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        let (user_id, was_main) = target.ok_or(RepositoryError::NotFound)?;

        let in_use: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM orders
                WHERE address_id = $1 AND status NOT IN ('completed', 'canceled')
            )
            "#,
        )
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        if in_use {
            return Err(RepositoryError::Conflict(
                "address is used by an active order".into(),
            ));
        }

        sqlx::query("DELETE FROM addresses WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                error!("❌ Failed to delete address {id}: {e:?}");
                RepositoryError::from(e)
            })?;

        if was_main {
            sqlx::query(
                r#"
                UPDATE addresses
                SET is_main = TRUE, updated_at = CURRENT_TIMESTAMP
                WHERE id = (SELECT id FROM addresses WHERE user_id = $1 ORDER BY id LIMIT 1)
                "#,
            )
            .bind(user_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        info!("🗑️ Deleted address {id} of user {user_id}");
        Ok(())
    }
}
