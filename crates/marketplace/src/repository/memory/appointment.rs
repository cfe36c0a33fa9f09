use super::{MemoryStore, now, paginate};
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
use shared::errors::RepositoryError;

fn in_scope(appointment: &Appointment, scope: AppointmentScope) -> bool {
    match scope {
        AppointmentScope::Participant(user_id) => {
            appointment.buyer_id == user_id || appointment.seller_id == user_id
        }
        AppointmentScope::Seller(seller_id) => appointment.seller_id == seller_id,
    }
}

#[async_trait]
impl AppointmentStoreTrait for MemoryStore {
    async fn find_all(
        &self,
        query: &AppointmentListQuery,
    ) -> Result<(Vec<Appointment>, i64), RepositoryError> {
        let t = self.tables.lock().await;

        let mut appointments: Vec<Appointment> = t
            .appointments
            .values()
            .filter(|a| in_scope(a, query.scope))
            .filter(|a| query.status.is_none_or(|s| a.status == s))
            .filter(|a| query.location_id.is_none_or(|id| a.location_id == id))
            .filter(|a| query.from.is_none_or(|from| a.scheduled_at >= from))
            .filter(|a| query.until.is_none_or(|until| a.scheduled_at < until))
            .cloned()
            .collect();

        appointments.sort_by(|a, b| {
            let order = a.scheduled_at.cmp(&b.scheduled_at).then(a.id.cmp(&b.id));
            if query.ascending { order } else { order.reverse() }
        });

        Ok(paginate(appointments, query.limit, query.offset))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Appointment>, RepositoryError> {
        let t = self.tables.lock().await;
        Ok(t.appointments.get(&id).cloned())
    }

    async fn create_appointment(
        &self,
        record: &CreateAppointmentRecord,
    ) -> Result<Appointment, RepositoryError> {
        let mut t = self.tables.lock().await;

        if !t.locations.contains_key(&record.location_id) {
            return Err(RepositoryError::ForeignKey(format!(
                "location {}",
                record.location_id
            )));
        }

        let id = t.next_id();
        let appointment = Appointment {
            id,
            buyer_id: record.buyer_id,
            seller_id: record.seller_id,
            location_id: record.location_id,
            scheduled_at: record.scheduled_at,
            status: AppointmentStatus::Waiting,
            purpose: record.purpose.clone(),
            notes: record.notes.clone(),
            created_at: Some(now()),
            updated_at: Some(now()),
        };
        t.appointments.insert(id, appointment.clone());
        Ok(appointment)
    }

    async fn update_appointment(
        &self,
        record: &UpdateAppointmentRecord,
    ) -> Result<Appointment, RepositoryError> {
        let mut t = self.tables.lock().await;
        let appointment = t
            .appointments
            .get_mut(&record.id)
            .ok_or(RepositoryError::NotFound)?;
        appointment.scheduled_at = record.scheduled_at;
        appointment.purpose = record.purpose.clone();
        appointment.notes = record.notes.clone();
        appointment.status = record.status;
        appointment.updated_at = Some(now());
        Ok(appointment.clone())
    }

    async fn change_status(
        &self,
        id: i64,
        expected: AppointmentStatus,
        next: AppointmentStatus,
    ) -> Result<Option<Appointment>, RepositoryError> {
        let mut t = self.tables.lock().await;

        match t.appointments.get_mut(&id) {
            Some(appointment) if appointment.status == expected => {
                appointment.status = next;
                appointment.updated_at = Some(now());
                Ok(Some(appointment.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn delete_appointment(&self, id: i64) -> Result<(), RepositoryError> {
        let mut t = self.tables.lock().await;
        t.appointments
            .remove(&id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }
}
