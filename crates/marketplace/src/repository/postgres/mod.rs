mod address;
mod appointment;
mod cart;
mod category;
mod dashboard;
mod message;
mod notification;
mod order;
mod product;
mod review;
mod seller_location;

pub use self::address::AddressRepository;
pub use self::appointment::AppointmentRepository;
pub use self::cart::CartRepository;
pub use self::category::CategoryRepository;
pub use self::dashboard::DashboardRepository;
pub use self::message::MessageRepository;
pub use self::notification::NotificationRepository;
pub use self::order::OrderRepository;
pub use self::product::ProductRepository;
pub use self::review::ReviewRepository;
pub use self::seller_location::SellerLocationRepository;

use sqlx::{FromRow, Row, postgres::PgRow};

/// A listed row plus the `total_count` window column of its page query.
pub(crate) struct Counted<T> {
    row: T,
    total: i64,
}

impl<'r, T> FromRow<'r, PgRow> for Counted<T>
where
    T: FromRow<'r, PgRow>,
{
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            row: T::from_row(row)?,
            total: row.try_get("total_count")?,
        })
    }
}

pub(crate) fn split_counted<T>(rows: Vec<Counted<T>>) -> (Vec<T>, i64) {
    let total = rows.first().map(|r| r.total).unwrap_or(0);
    (rows.into_iter().map(|r| r.row).collect(), total)
}

/// `None` for blank input, so the SQL filter is skipped.
pub(crate) fn search_term(search: Option<&str>) -> Option<String> {
    search
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
