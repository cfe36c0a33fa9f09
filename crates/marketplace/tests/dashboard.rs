mod common;

use chrono::NaiveDate;
use common::{ADMIN, BUYER, OTHER_BUYER, OTHER_SELLER, SELLER, TestApp};
use marketplace::domain::{
    actor::Actor,
    enums::{AppointmentStatus, OrderStatus},
    requests::{
        appointment::{CreateAppointmentRequest, UpdateAppointmentStatusRequest},
        review::CreateReviewRequest,
    },
    response::dashboard::SellerDashboardResponse,
    schedule::{ClockTime, DayOfWeek, OperatingHours},
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use shared::errors::ServiceError;

fn every_day() -> Vec<OperatingHours> {
    [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
        DayOfWeek::Sunday,
    ]
    .into_iter()
    .map(|day| OperatingHours {
        day,
        open: ClockTime::hm(6, 0).unwrap(),
        close: ClockTime::hm(18, 0).unwrap(),
    })
    .collect()
}

async fn dashboard(app: &TestApp) -> SellerDashboardResponse {
    app.services
        .dashboard_service
        .seller_dashboard(&Actor::seller(SELLER))
        .await
        .expect("dashboard")
        .data
}

fn count_for(dashboard: &SellerDashboardResponse, status: OrderStatus) -> i64 {
    dashboard
        .orders_by_status
        .iter()
        .find(|c| c.status == status)
        .map(|c| c.count)
        .unwrap_or(-1)
}

#[tokio::test]
async fn only_sellers_have_a_dashboard() {
    let app = TestApp::new().await;

    let result = app
        .services
        .dashboard_service
        .seller_dashboard(&Actor::buyer(BUYER))
        .await;

    assert!(matches!(result, Err(ServiceError::Forbidden(_))));
}

#[tokio::test]
async fn empty_dashboard_is_zero_filled() {
    let app = TestApp::new().await;
    let view = dashboard(&app).await;

    assert_eq!(view.total_revenue, Decimal::ZERO);
    assert_eq!(view.order_count, 0);
    assert_eq!(view.product_count, 0);
    assert_eq!(view.average_rating, Decimal::ZERO);
    assert_eq!(view.orders_by_status.len(), OrderStatus::ALL.len());
    assert!(view.orders_by_status.iter().all(|c| c.count == 0));
    assert_eq!(view.daily_sales.len(), 7);
    assert!(view.latest_items.is_empty());
    assert!(view.upcoming_appointments.is_empty());
}

#[tokio::test]
async fn dashboard_summarises_only_the_sellers_own_lines() {
    let app = TestApp::new().await;
    let orders = &app.services.order_service;

    let tuna = app.product(SELLER, "Tuna Sirip Kuning", dec!(50000), 5).await;
    let grouper = app.product(SELLER, "Kerapu Macan", dec!(150000), 1).await;
    let crab = app.product(OTHER_SELLER, "Rajungan", dec!(80000), 5).await;

    app.add_to_cart(BUYER, tuna.id, 2).await;
    app.add_to_cart(BUYER, crab.id, 1).await;
    let paid = app.checkout(BUYER).await.expect("first checkout");
    orders
        .record_payment(&Actor::admin(ADMIN), paid.order.id, "TRX-501")
        .await
        .expect("payment");

    app.add_to_cart(OTHER_BUYER, grouper.id, 1).await;
    let unpaid = app.checkout(OTHER_BUYER).await.expect("second checkout");

    for status in [OrderStatus::Processing, OrderStatus::Shipped] {
        orders
            .update_order_status(&Actor::seller(SELLER), paid.order.id, status)
            .await
            .expect("advance");
    }
    orders
        .complete_order(&Actor::buyer(BUYER), paid.order.id)
        .await
        .expect("complete");

    let tuna_line = paid
        .items
        .iter()
        .find(|i| i.product_id == tuna.id)
        .expect("tuna line");
    app.services
        .review_service
        .create_review(
            &Actor::buyer(BUYER),
            &CreateReviewRequest {
                product_id: tuna.id,
                order_item_id: tuna_line.id,
                rating: 4,
                comment: "Dagingnya tebal dan segar".into(),
                images: vec![],
            },
        )
        .await
        .expect("review");

    let view = dashboard(&app).await;

    assert_eq!(view.total_revenue, dec!(100000));
    assert_eq!(view.order_count, 2);
    assert_eq!(view.product_count, 2);
    assert_eq!(view.out_of_stock_count, 1);
    assert_eq!(view.average_rating, dec!(4.0));
    assert_eq!(view.review_count, 1);
    assert_eq!(view.unreplied_review_count, 1);

    assert_eq!(count_for(&view, OrderStatus::Completed), 1);
    assert_eq!(count_for(&view, OrderStatus::Waiting), 1);
    assert_eq!(count_for(&view, OrderStatus::Canceled), 0);

    let charted: Decimal = view.daily_sales.iter().map(|d| d.revenue).sum();
    assert_eq!(charted, dec!(100000));

    assert_eq!(view.latest_items.len(), 2);
    assert_eq!(view.latest_items[0].order_id, unpaid.order.id);
    assert_eq!(view.latest_items[0].buyer_id, OTHER_BUYER);
    assert_eq!(view.latest_items[1].product_name, "Tuna Sirip Kuning");
    assert_eq!(view.latest_items[1].subtotal, dec!(100000));
    assert!(view.latest_items.iter().all(|l| l.product_name != "Rajungan"));
}

#[tokio::test]
async fn upcoming_appointments_skip_canceled_ones() {
    let app = TestApp::new().await;
    let location = app.location(SELLER, every_day()).await;
    let appointments = &app.services.appointment_service;
    let buyer = Actor::buyer(BUYER);

    let mut ids = Vec::new();
    for day in [9, 8, 10] {
        let at = NaiveDate::from_ymd_opt(2030, 1, day)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let created = appointments
            .create_appointment(
                &buyer,
                &CreateAppointmentRequest {
                    seller_id: SELLER,
                    location_id: location,
                    scheduled_at: at,
                    purpose: "Ambil pesanan ikan".into(),
                    notes: None,
                },
            )
            .await
            .expect("book")
            .data;
        ids.push(created.id);
    }

    appointments
        .update_appointment_status(
            &buyer,
            ids[2],
            &UpdateAppointmentStatusRequest {
                status: AppointmentStatus::Canceled,
            },
        )
        .await
        .expect("cancel");

    let view = dashboard(&app).await;
    let upcoming: Vec<i64> = view.upcoming_appointments.iter().map(|a| a.id).collect();
    assert_eq!(upcoming, vec![ids[1], ids[0]]);
}
