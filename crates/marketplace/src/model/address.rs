use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Address {
    pub id: i64,
    pub user_id: i64,
    pub label: Option<String>,
    pub recipient_name: String,
    pub phone: String,
    pub full_address: String,
    pub province: String,
    pub city: String,
    pub district: String,
    pub postal_code: String,
    pub is_main: bool,
    pub notes: Option<String>,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

impl Address {
    /// Single-line form stored on orders.
    pub fn shipping_line(&self) -> String {
        format!(
            "{} ({}), {}, {}, {}, {} {}",
            self.recipient_name,
            self.phone,
            self.full_address,
            self.district,
            self.city,
            self.province,
            self.postal_code
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shipping_line_joins_every_part() {
        let address = Address {
            id: 1,
            user_id: 20,
            label: Some("Rumah".into()),
            recipient_name: "Andi".into(),
            phone: "08123456789".into(),
            full_address: "Jl. Pelabuhan No. 12".into(),
            province: "Sulawesi Selatan".into(),
            city: "Makassar".into(),
            district: "Wajo".into(),
            postal_code: "90173".into(),
            is_main: true,
            notes: None,
            created_at: None,
            updated_at: None,
        };

        assert_eq!(
            address.shipping_line(),
            "Andi (08123456789), Jl. Pelabuhan No. 12, Wajo, Makassar, Sulawesi Selatan 90173"
        );
    }
}
