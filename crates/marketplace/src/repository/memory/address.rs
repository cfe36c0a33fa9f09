use super::{MemoryStore, Tables, now};
use crate::{
    abstract_trait::address::AddressStoreTrait,
    domain::{enums::OrderStatus, requests::address::AddressRecord},
    model::address::Address,
};
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::cmp::Reverse;

fn apply(address: &mut Address, record: &AddressRecord) {
    address.label = record.label.clone();
    address.recipient_name = record.recipient_name.clone();
    address.phone = record.phone.clone();
    address.full_address = record.full_address.clone();
    address.province = record.province.clone();
    address.city = record.city.clone();
    address.district = record.district.clone();
    address.postal_code = record.postal_code.clone();
    address.is_main = record.is_main;
    address.notes = record.notes.clone();
    address.updated_at = Some(now());
}

fn clear_main(t: &mut Tables, user_id: i64, keep: i64) {
    for address in t.addresses.values_mut() {
        if address.user_id == user_id && address.id != keep && address.is_main {
            address.is_main = false;
            address.updated_at = Some(now());
        }
    }
}

#[async_trait]
impl AddressStoreTrait for MemoryStore {
    async fn find_by_user(&self, user_id: i64) -> Result<Vec<Address>, RepositoryError> {
        let t = self.tables.lock().await;

        let mut addresses: Vec<Address> = t
            .addresses
            .values()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect();
        addresses.sort_by_key(|a| (Reverse(a.is_main), Reverse(a.id)));
        Ok(addresses)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Address>, RepositoryError> {
        let t = self.tables.lock().await;
        Ok(t.addresses.get(&id).cloned())
    }

    async fn create_address(&self, record: &AddressRecord) -> Result<Address, RepositoryError> {
        let mut t = self.tables.lock().await;
        let id = t.next_id();

        let first = !t.addresses.values().any(|a| a.user_id == record.user_id);
        let mut address = Address {
            id,
            user_id: record.user_id,
            label: None,
            recipient_name: String::new(),
            phone: String::new(),
            full_address: String::new(),
            province: String::new(),
            city: String::new(),
            district: String::new(),
            postal_code: String::new(),
            is_main: false,
            notes: None,
            created_at: Some(now()),
            updated_at: None,
        };
        apply(&mut address, record);
        address.is_main |= first;

        if address.is_main {
            clear_main(&mut t, record.user_id, id);
        }
        t.addresses.insert(id, address.clone());
        Ok(address)
    }

    async fn update_address(
        &self,
        id: i64,
        record: &AddressRecord,
    ) -> Result<Address, RepositoryError> {
        let mut t = self.tables.lock().await;

        let address = t.addresses.get_mut(&id).ok_or(RepositoryError::NotFound)?;
        apply(address, record);
        let updated = address.clone();

        if updated.is_main {
            clear_main(&mut t, updated.user_id, id);
        }
        Ok(updated)
    }

    async fn set_main(&self, id: i64) -> Result<Address, RepositoryError> {
        let mut t = self.tables.lock().await;

        let address = t.addresses.get_mut(&id).ok_or(RepositoryError::NotFound)?;
        address.is_main = true;
        address.updated_at = Some(now());
        let updated = address.clone();

        clear_main(&mut t, updated.user_id, id);
        Ok(updated)
    }

    async fn delete_address(&self, id: i64) -> Result<(), RepositoryError> {
        let mut t = self.tables.lock().await;

        if t
            .orders
            .values()
            .any(|o| {
                o.address_id == Some(id)
                    && !matches!(o.status, OrderStatus::Completed | OrderStatus::Canceled)
            })
        {
            return Err(RepositoryError::Conflict(
                "address is used by an active order".into(),
            ));
        }

        let removed = t.addresses.remove(&id).ok_or(RepositoryError::NotFound)?;

        for order in t.orders.values_mut() {
            if order.address_id == Some(id) {
                order.address_id = None;
            }
        }

        if !removed.is_main {
            return Ok(());
        }

        if let Some(next) = t
            .addresses
            .values_mut()
            .find(|a| a.user_id == removed.user_id)
        {
            next.is_main = true;
            next.updated_at = Some(now());
        }
        Ok(())
    }
}
