mod common;

use common::{BUYER, OTHER_BUYER, OTHER_SELLER, SELLER, TestApp, checkout_request};
use marketplace::domain::{
    actor::Actor,
    enums::{OrderStatus, PaymentStatus},
    requests::product::UpdateProductRequest,
};
use rust_decimal_macros::dec;
use shared::errors::ServiceError;

#[tokio::test]
async fn checkout_reserves_stock_and_starts_waiting() {
    let app = TestApp::new().await;
    let product = app.product(SELLER, "Ikan Kakap Merah", dec!(85000), 5).await;

    app.add_to_cart(BUYER, product.id, 3).await;
    let order = app.checkout(BUYER).await.expect("checkout");

    assert_eq!(order.order.status, OrderStatus::Waiting);
    assert_eq!(order.order.payment_status, PaymentStatus::Waiting);
    assert_eq!(order.order.subtotal, dec!(255000));
    assert_eq!(order.order.total, dec!(265000));
    assert!(order.order.order_number.starts_with("ORD"));
    assert_eq!(order.items.len(), 1);
    assert_eq!(order.items[0].seller_id, SELLER);
    assert_eq!(order.items[0].price, dec!(85000));

    assert_eq!(app.stock_of(product.id).await, 2);

    let cart = app
        .services
        .cart_service
        .list(&Actor::buyer(BUYER))
        .await
        .expect("cart")
        .data;
    assert!(cart.items.is_empty());
}

#[tokio::test]
async fn checkout_applies_configured_tax() {
    let app = TestApp::with_tax_rate(dec!(0.11)).await;
    let product = app.product(SELLER, "Udang Vaname", dec!(10000), 10).await;

    app.add_to_cart(BUYER, product.id, 3).await;
    let order = app.checkout(BUYER).await.expect("checkout");

    assert_eq!(order.order.tax, dec!(3300));
    assert_eq!(order.order.total, dec!(43300));
}

#[tokio::test]
async fn checkout_with_empty_cart_is_a_conflict() {
    let app = TestApp::new().await;

    let err = app.checkout(BUYER).await.unwrap_err();
    assert!(matches!(err, ServiceError::Conflict(ref msg) if msg == "cart is empty"));
}

#[tokio::test]
async fn checkout_reports_every_invalid_item_and_changes_nothing() {
    let app = TestApp::new().await;
    let tuna = app.product(SELLER, "Tuna Sirip Kuning", dec!(120000), 5).await;
    let squid = app.product(OTHER_SELLER, "Cumi Segar", dec!(60000), 4).await;

    app.add_to_cart(BUYER, tuna.id, 3).await;
    app.add_to_cart(BUYER, squid.id, 2).await;

    app.services
        .product_service
        .update_product(
            &Actor::seller(SELLER),
            tuna.id,
            &UpdateProductRequest {
                stock: Some(1),
                ..Default::default()
            },
        )
        .await
        .expect("lower stock");
    app.services
        .product_service
        .update_product(
            &Actor::seller(OTHER_SELLER),
            squid.id,
            &UpdateProductRequest {
                active: Some(false),
                ..Default::default()
            },
        )
        .await
        .expect("deactivate");

    let err = app.checkout(BUYER).await.unwrap_err();
    let ServiceError::Rejected { details, .. } = err else {
        panic!("expected a rejected checkout, got {err:?}");
    };

    let violations = details.as_array().expect("violation list");
    assert_eq!(violations.len(), 2);
    assert_eq!(violations[0]["product_id"], tuna.id);
    assert_eq!(violations[0]["reason"], "insufficient_stock");
    assert_eq!(violations[0]["available"], 1);
    assert_eq!(violations[0]["requested"], 3);
    assert_eq!(violations[1]["product_id"], squid.id);
    assert_eq!(violations[1]["reason"], "unavailable");

    assert_eq!(app.stock_of(tuna.id).await, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_checkouts_never_oversell() {
    let app = TestApp::new().await;
    let product = app.product(SELLER, "Kerapu Hidup", dec!(250000), 1).await;

    app.add_to_cart(BUYER, product.id, 1).await;
    app.add_to_cart(OTHER_BUYER, product.id, 1).await;
    let buyer_address = app.address(BUYER).await;
    let other_address = app.address(OTHER_BUYER).await;

    let first = app.services.order_service.clone();
    let second = app.services.order_service.clone();
    let a = tokio::spawn(async move {
        first
            .checkout(&Actor::buyer(BUYER), &checkout_request(buyer_address))
            .await
    });
    let b = tokio::spawn(async move {
        second
            .checkout(&Actor::buyer(OTHER_BUYER), &checkout_request(other_address))
            .await
    });

    let results = [a.await.unwrap(), b.await.unwrap()];
    let placed = results.iter().filter(|r| r.is_ok()).count();

    assert_eq!(placed, 1);
    assert!(
        results
            .iter()
            .any(|r| matches!(r, Err(ServiceError::Rejected { .. })))
    );
    assert_eq!(app.stock_of(product.id).await, 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn product_edits_do_not_undo_concurrent_checkouts() {
    for round in 0..20 {
        let app = TestApp::new().await;
        let product = app.product(SELLER, "Tongkol Segar", dec!(30000), 100).await;

        let buyers: Vec<i64> = (100..110).collect();
        let mut addresses = Vec::with_capacity(buyers.len());
        for buyer in &buyers {
            app.add_to_cart(*buyer, product.id, 1).await;
            addresses.push(app.address(*buyer).await);
        }

        let mut tasks = Vec::new();
        for (buyer, address_id) in buyers.into_iter().zip(addresses) {
            let orders = app.services.order_service.clone();
            tasks.push(tokio::spawn(async move {
                orders
                    .checkout(&Actor::buyer(buyer), &checkout_request(address_id))
                    .await
                    .map(|_| ())
            }));

            let products = app.services.product_service.clone();
            let product_id = product.id;
            tasks.push(tokio::spawn(async move {
                products
                    .update_product(
                        &Actor::seller(SELLER),
                        product_id,
                        &UpdateProductRequest {
                            description: Some(format!("Tangkapan pagi, batch {buyer}")),
                            ..Default::default()
                        },
                    )
                    .await
                    .map(|_| ())
            }));
        }

        for task in tasks {
            task.await.unwrap().expect("checkout and edit both succeed");
        }

        assert_eq!(app.stock_of(product.id).await, 90, "round {round}");
    }
}

#[tokio::test]
async fn explicit_stock_edit_still_applies() {
    let app = TestApp::new().await;
    let product = app.product(SELLER, "Bandeng", dec!(25000), 4).await;

    app.add_to_cart(BUYER, product.id, 1).await;
    app.checkout(BUYER).await.expect("checkout");

    app.services
        .product_service
        .update_product(
            &Actor::seller(SELLER),
            product.id,
            &UpdateProductRequest {
                name: Some("Bandeng Presto".into()),
                ..Default::default()
            },
        )
        .await
        .expect("rename");
    assert_eq!(app.stock_of(product.id).await, 3);

    app.services
        .product_service
        .update_product(
            &Actor::seller(SELLER),
            product.id,
            &UpdateProductRequest {
                stock: Some(12),
                ..Default::default()
            },
        )
        .await
        .expect("restock");
    assert_eq!(app.stock_of(product.id).await, 12);
}

#[tokio::test]
async fn checkout_snapshots_the_chosen_address() {
    let app = TestApp::new().await;
    let product = app.product(SELLER, "Cumi Segar", dec!(40000), 5).await;
    let address_id = app.address(BUYER).await;

    app.add_to_cart(BUYER, product.id, 1).await;
    let order = app
        .services
        .order_service
        .checkout(&Actor::buyer(BUYER), &checkout_request(address_id))
        .await
        .expect("checkout")
        .data;

    assert_eq!(order.order.address_id, Some(address_id));
    assert_eq!(
        order.order.shipping_address,
        "Andi (081234567890), Jl. Pelabuhan No. 12, Wajo, Makassar, Sulawesi Selatan 90173"
    );
}

#[tokio::test]
async fn checkout_rejects_someone_elses_address_before_looking_at_the_cart() {
    let app = TestApp::new().await;
    let product = app.product(SELLER, "Kepiting Bakau", dec!(120000), 5).await;
    let foreign = app.address(OTHER_BUYER).await;

    let empty_cart = app
        .services
        .order_service
        .checkout(&Actor::buyer(BUYER), &checkout_request(foreign))
        .await;
    assert!(matches!(
        empty_cart,
        Err(ServiceError::Conflict(ref msg)) if msg == "invalid shipping address"
    ));

    app.add_to_cart(BUYER, product.id, 1).await;
    for address_id in [foreign, 9_999] {
        let err = app
            .services
            .order_service
            .checkout(&Actor::buyer(BUYER), &checkout_request(address_id))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(ref msg) if msg == "invalid shipping address"));
    }

    assert_eq!(app.stock_of(product.id).await, 5);
}
