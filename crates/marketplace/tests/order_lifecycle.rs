mod common;

use common::{ADMIN, BUYER, OTHER_BUYER, OTHER_SELLER, SELLER, TestApp};
use marketplace::domain::{
    actor::Actor,
    enums::{OrderStatus, PaymentStatus},
    requests::order::FindAllOrders,
};
use rust_decimal_macros::dec;
use shared::errors::ServiceError;

async fn placed_order(app: &TestApp, quantity: i32) -> (i64, i64) {
    let product = app.product(SELLER, "Bandeng Presto", dec!(45000), 5).await;
    app.add_to_cart(BUYER, product.id, quantity).await;
    let order = app.checkout(BUYER).await.expect("checkout");
    (order.order.id, product.id)
}

#[tokio::test]
async fn buyer_cancel_restores_stock_and_fails_payment() {
    let app = TestApp::new().await;
    let (order_id, product_id) = placed_order(&app, 3).await;
    assert_eq!(app.stock_of(product_id).await, 2);

    let canceled = app
        .services
        .order_service
        .cancel_order(&Actor::buyer(BUYER), order_id)
        .await
        .expect("cancel")
        .data;

    assert_eq!(canceled.status, OrderStatus::Canceled);
    assert_eq!(canceled.payment_status, PaymentStatus::Failed);
    assert!(canceled.canceled_at.is_some());
    assert_eq!(app.stock_of(product_id).await, 5);

    let again = app
        .services
        .order_service
        .cancel_order(&Actor::buyer(BUYER), order_id)
        .await;
    assert!(matches!(again, Err(ServiceError::Conflict(_))));
    assert_eq!(app.stock_of(product_id).await, 5);
}

#[tokio::test]
async fn seller_drives_fulfilment_and_buyer_completes() {
    let app = TestApp::new().await;
    let (order_id, _) = placed_order(&app, 1).await;
    let orders = &app.services.order_service;
    let seller = Actor::seller(SELLER);
    let buyer = Actor::buyer(BUYER);

    orders
        .update_order_status(&seller, order_id, OrderStatus::Processing)
        .await
        .expect("processing");
    orders
        .update_order_status(&seller, order_id, OrderStatus::Shipped)
        .await
        .expect("shipped");

    let back = orders
        .update_order_status(&seller, order_id, OrderStatus::Waiting)
        .await;
    assert!(matches!(back, Err(ServiceError::Conflict(_))));

    let cancel_shipped = orders.cancel_order(&buyer, order_id).await;
    assert!(matches!(cancel_shipped, Err(ServiceError::Conflict(_))));

    let seller_completes = orders.complete_order(&seller, order_id).await;
    assert!(matches!(seller_completes, Err(ServiceError::Forbidden(_))));

    let completed = orders
        .complete_order(&buyer, order_id)
        .await
        .expect("complete")
        .data;
    assert_eq!(completed.status, OrderStatus::Completed);
    assert!(completed.completed_at.is_some());

    let twice = orders.complete_order(&buyer, order_id).await;
    assert!(matches!(twice, Err(ServiceError::Conflict(_))));
}

#[tokio::test]
async fn buyer_cannot_advance_fulfilment() {
    let app = TestApp::new().await;
    let (order_id, _) = placed_order(&app, 1).await;

    let result = app
        .services
        .order_service
        .update_order_status(&Actor::buyer(BUYER), order_id, OrderStatus::Processing)
        .await;

    assert!(matches!(result, Err(ServiceError::Forbidden(_))));
}

#[tokio::test]
async fn strangers_see_no_order() {
    let app = TestApp::new().await;
    let (order_id, _) = placed_order(&app, 1).await;

    let result = app
        .services
        .order_service
        .find_order(&Actor::buyer(OTHER_BUYER), order_id)
        .await;
    assert!(matches!(result, Err(ServiceError::NotFound(_))));

    let seller_view = app
        .services
        .order_service
        .find_order(&Actor::seller(SELLER), order_id)
        .await
        .expect("seller sees the order");
    assert_eq!(seller_view.data.items.len(), 1);
}

#[tokio::test]
async fn payment_is_recorded_by_admins_only() {
    let app = TestApp::new().await;
    let (order_id, _) = placed_order(&app, 1).await;
    let orders = &app.services.order_service;

    let by_buyer = orders
        .record_payment(&Actor::buyer(BUYER), order_id, "TRX-1")
        .await;
    assert!(matches!(by_buyer, Err(ServiceError::Forbidden(_))));

    let paid = orders
        .record_payment(&Actor::admin(ADMIN), order_id, "TRX-1")
        .await
        .expect("payment")
        .data;
    assert_eq!(paid.payment_status, PaymentStatus::Paid);
    assert_eq!(paid.payment_reference.as_deref(), Some("TRX-1"));
    assert_eq!(paid.status, OrderStatus::Waiting);
}

#[tokio::test]
async fn order_lists_are_scoped_to_each_side() {
    let app = TestApp::new().await;
    placed_order(&app, 1).await;

    let mine = app
        .services
        .order_service
        .list_orders(&Actor::buyer(BUYER), &FindAllOrders::default())
        .await
        .expect("buyer list");
    assert_eq!(mine.pagination.total_items, 1);

    let others = app
        .services
        .order_service
        .list_orders(&Actor::buyer(OTHER_BUYER), &FindAllOrders::default())
        .await
        .expect("other list");
    assert_eq!(others.pagination.total_items, 0);

    let sold = app
        .services
        .order_service
        .seller_orders(&Actor::seller(SELLER), &FindAllOrders::default())
        .await
        .expect("seller list");
    assert_eq!(sold.data.len(), 1);
}

/// Order with lines from both sellers, already moved to processing by SELLER.
async fn shared_order_in_processing(app: &TestApp) -> (i64, i64, i64) {
    let snapper = app.product(SELLER, "Kakap Merah", dec!(90000), 5).await;
    let shrimp = app.product(OTHER_SELLER, "Udang Windu", dec!(120000), 4).await;

    app.add_to_cart(BUYER, snapper.id, 2).await;
    app.add_to_cart(BUYER, shrimp.id, 3).await;
    let order = app.checkout(BUYER).await.expect("checkout");
    assert_eq!(order.items.len(), 2);

    app.services
        .order_service
        .update_order_status(&Actor::seller(SELLER), order.order.id, OrderStatus::Processing)
        .await
        .expect("processing");

    assert_eq!(app.stock_of(snapper.id).await, 3);
    assert_eq!(app.stock_of(shrimp.id).await, 1);
    (order.order.id, snapper.id, shrimp.id)
}

#[tokio::test]
async fn any_involved_seller_can_cancel_and_every_line_is_restocked() {
    let app = TestApp::new().await;
    let (order_id, snapper, shrimp) = shared_order_in_processing(&app).await;

    let canceled = app
        .services
        .order_service
        .cancel_order(&Actor::seller(OTHER_SELLER), order_id)
        .await
        .expect("other seller cancels")
        .data;

    assert_eq!(canceled.status, OrderStatus::Canceled);
    assert_eq!(canceled.payment_status, PaymentStatus::Failed);
    assert_eq!(app.stock_of(snapper).await, 5);
    assert_eq!(app.stock_of(shrimp).await, 4);
}

#[tokio::test]
async fn admin_can_cancel_an_order_in_processing() {
    let app = TestApp::new().await;
    let (order_id, snapper, shrimp) = shared_order_in_processing(&app).await;

    let canceled = app
        .services
        .order_service
        .cancel_order(&Actor::admin(ADMIN), order_id)
        .await
        .expect("admin cancels")
        .data;

    assert_eq!(canceled.status, OrderStatus::Canceled);
    assert_eq!(canceled.payment_status, PaymentStatus::Failed);
    assert!(canceled.canceled_at.is_some());
    assert_eq!(app.stock_of(snapper).await, 5);
    assert_eq!(app.stock_of(shrimp).await, 4);

    let stranger = app
        .services
        .order_service
        .cancel_order(&Actor::buyer(OTHER_BUYER), order_id)
        .await;
    assert!(matches!(stranger, Err(ServiceError::NotFound(_))));
}
