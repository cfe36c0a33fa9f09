use super::{Counted, split_counted};
use crate::{
    abstract_trait::appointment::AppointmentStoreTrait,
    domain::{
        enums::AppointmentStatus,
        requests::appointment::{
            AppointmentListQuery, AppointmentScope, CreateAppointmentRecord,
            UpdateAppointmentRecord,
        },
    },
    model::appointment::Appointment,
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::{error, info};

#[derive(Clone)]
pub struct AppointmentRepository {
    db: ConnectionPool,
}

impl AppointmentRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AppointmentStoreTrait for AppointmentRepository {
    async fn find_all(
        &self,
        query: &AppointmentListQuery,
    ) -> Result<(Vec<Appointment>, i64), RepositoryError> {
        let (participant, seller) = match query.scope {
            AppointmentScope::Participant(user_id) => (Some(user_id), None),
            AppointmentScope::Seller(seller_id) => (None, Some(seller_id)),
        };
        let direction = if query.ascending { "ASC" } else { "DESC" };

        let sql = format!(
            r#"
            SELECT a.*, COUNT(*) OVER() AS total_count
            FROM appointments a
            WHERE ($1::BIGINT IS NULL OR a.buyer_id = $1 OR a.seller_id = $1)
              AND ($2::BIGINT IS NULL OR a.seller_id = $2)
              AND ($3::TEXT IS NULL OR a.status = $3)
              AND ($4::BIGINT IS NULL OR a.location_id = $4)
              AND ($5::TIMESTAMP IS NULL OR a.scheduled_at >= $5)
              AND ($6::TIMESTAMP IS NULL OR a.scheduled_at < $6)
            ORDER BY a.scheduled_at {direction}, a.id {direction}
            LIMIT $7 OFFSET $8
            "#
        );

        let rows = sqlx::query_as::<_, Counted<Appointment>>(&sql)
            .bind(participant)
            .bind(seller)
            .bind(query.status)
            .bind(query.location_id)
            .bind(query.from)
            .bind(query.until)
            .bind(query.limit)
            .bind(query.offset)
            .fetch_all(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch appointments: {e:?}");
                RepositoryError::from(e)
            })?;

        Ok(split_counted(rows))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Appointment>, RepositoryError> {
        sqlx::query_as::<_, Appointment>("SELECT * FROM appointments WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch appointment {id}: {e:?}");
                RepositoryError::from(e)
            })
    }

    async fn create_appointment(
        &self,
        record: &CreateAppointmentRecord,
    ) -> Result<Appointment, RepositoryError> {
        let appointment = sqlx::query_as::<_, Appointment>(
            r#"
            INSERT INTO appointments (
                buyer_id, seller_id, location_id, scheduled_at, status, purpose, notes,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, 'waiting', $5, $6, CURRENT_TIMESTAMP, CURRENT_TIMESTAMP)
            RETURNING *
            "#,
        )
        .bind(record.buyer_id)
        .bind(record.seller_id)
        .bind(record.location_id)
        .bind(record.scheduled_at)
        .bind(&record.purpose)
        .bind(&record.notes)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to create appointment: {e:?}");
            RepositoryError::from(e)
        })?;

        info!(
            "📅 Appointment {} booked at location {} for {}",
            appointment.id, appointment.location_id, appointment.scheduled_at
        );
        Ok(appointment)
    }

    async fn update_appointment(
        &self,
        record: &UpdateAppointmentRecord,
    ) -> Result<Appointment, RepositoryError> {
        sqlx::query_as::<_, Appointment>(
            r#"
            UPDATE appointments
            SET scheduled_at = $2,
                purpose = $3,
                notes = $4,
                status = $5,
                updated_at = CURRENT_TIMESTAMP
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(record.id)
        .bind(record.scheduled_at)
        .bind(&record.purpose)
        .bind(&record.notes)
        .bind(record.status)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to update appointment {}: {e:?}", record.id);
            RepositoryError::from(e)
        })
    }

    async fn change_status(
        &self,
        id: i64,
        expected: AppointmentStatus,
        next: AppointmentStatus,
    ) -> Result<Option<Appointment>, RepositoryError> {
        sqlx::query_as::<_, Appointment>(
            r#"
            UPDATE appointments
            SET status = $3, updated_at = CURRENT_TIMESTAMP
            WHERE id = $1 AND status = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(expected)
        .bind(next)
        .fetch_optional(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to change status of appointment {id}: {e:?}");
            RepositoryError::from(e)
        })
    }

    async fn delete_appointment(&self, id: i64) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM appointments WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to delete appointment {id}: {e:?}");
                RepositoryError::from(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
