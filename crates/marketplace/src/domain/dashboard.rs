use crate::{
    domain::enums::OrderStatus,
    model::dashboard::{DailySales, StatusCount},
};
use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;

/// Days covered by the sales chart, ending today.
pub const SALES_WINDOW_DAYS: u64 = 7;
pub const LATEST_LINES: i64 = 5;
pub const UPCOMING_APPOINTMENTS: i64 = 5;

pub fn sales_window_start(today: NaiveDate) -> NaiveDate {
    today
        .checked_sub_days(Days::new(SALES_WINDOW_DAYS - 1))
        .unwrap_or(today)
}

/// One entry per order status in lifecycle order, zero where absent.
pub fn fill_status_counts(counts: &[StatusCount]) -> Vec<StatusCount> {
    OrderStatus::ALL
        .iter()
        .map(|status| StatusCount {
            status: *status,
            count: counts
                .iter()
                .filter(|c| c.status == *status)
                .map(|c| c.count)
                .sum(),
        })
        .collect()
}

/// One entry per day of the window ending `today`, oldest first.
pub fn fill_daily_sales(sales: &[DailySales], today: NaiveDate) -> Vec<DailySales> {
    sales_window_start(today)
        .iter_days()
        .take_while(|day| *day <= today)
        .map(|day| DailySales {
            day,
            revenue: sales
                .iter()
                .filter(|s| s.day == day)
                .map(|s| s.revenue)
                .sum::<Decimal>(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2030, 3, d).unwrap()
    }

    #[test]
    fn every_status_is_listed_once() {
        let filled = fill_status_counts(&[
            StatusCount {
                status: OrderStatus::Shipped,
                count: 2,
            },
            StatusCount {
                status: OrderStatus::Waiting,
                count: 5,
            },
        ]);

        assert_eq!(filled.len(), OrderStatus::ALL.len());
        assert_eq!(filled[0].status, OrderStatus::Waiting);
        assert_eq!(filled[0].count, 5);
        let shipped = filled.iter().find(|c| c.status == OrderStatus::Shipped).unwrap();
        assert_eq!(shipped.count, 2);
        let canceled = filled.iter().find(|c| c.status == OrderStatus::Canceled).unwrap();
        assert_eq!(canceled.count, 0);
    }

    #[test]
    fn sales_window_covers_seven_days_ending_today() {
        let filled = fill_daily_sales(
            &[
                DailySales {
                    day: day(10),
                    revenue: dec!(45000),
                },
                DailySales {
                    day: day(1),
                    revenue: dec!(99000),
                },
            ],
            day(10),
        );

        assert_eq!(filled.len(), 7);
        assert_eq!(filled[0].day, day(4));
        assert_eq!(filled[6].day, day(10));
        assert_eq!(filled[6].revenue, dec!(45000));
        assert!(filled[..6].iter().all(|d| d.revenue.is_zero()));
    }
}
