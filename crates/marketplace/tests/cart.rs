mod common;

use common::{BUYER, OTHER_BUYER, SELLER, TestApp};
use marketplace::domain::{
    actor::Actor,
    cart::CartIssue,
    requests::{
        cart::{AddCartItemRequest, UpdateCartItemRequest},
        product::UpdateProductRequest,
    },
};
use rust_decimal_macros::dec;
use shared::errors::ServiceError;

#[tokio::test]
async fn adding_more_than_stock_is_rejected_even_when_merged() {
    let app = TestApp::new().await;
    let product = app.product(SELLER, "Ikan Tongkol", dec!(30000), 2).await;
    let carts = &app.services.cart_service;
    let buyer = Actor::buyer(BUYER);

    let too_many = carts
        .add(
            &buyer,
            &AddCartItemRequest {
                product_id: product.id,
                quantity: 3,
            },
        )
        .await;
    assert!(matches!(too_many, Err(ServiceError::Rejected { .. })));

    let view = carts
        .add(
            &buyer,
            &AddCartItemRequest {
                product_id: product.id,
                quantity: 2,
            },
        )
        .await
        .expect("add within stock")
        .data;
    assert_eq!(view.items.len(), 1);
    assert_eq!(view.item_count, 2);
    assert_eq!(view.total_price, dec!(60000));

    let merged = carts
        .add(
            &buyer,
            &AddCartItemRequest {
                product_id: product.id,
                quantity: 1,
            },
        )
        .await;
    let Err(ServiceError::Rejected { details, .. }) = merged else {
        panic!("merged quantity above stock must be rejected");
    };
    assert_eq!(details["available"], 2);
    assert_eq!(details["requested"], 3);
}

#[tokio::test]
async fn out_of_stock_products_cannot_be_added() {
    let app = TestApp::new().await;
    let product = app.product(SELLER, "Ikan Bawal", dec!(40000), 0).await;

    let result = app
        .services
        .cart_service
        .add(
            &Actor::buyer(BUYER),
            &AddCartItemRequest {
                product_id: product.id,
                quantity: 1,
            },
        )
        .await;

    assert!(matches!(result, Err(ServiceError::Conflict(_))));
}

#[tokio::test]
async fn cached_view_is_dropped_on_every_mutation() {
    let app = TestApp::new().await;
    let snapper = app.product(SELLER, "Kakap", dec!(80000), 10).await;
    let crab = app.product(SELLER, "Kepiting", dec!(150000), 10).await;
    let carts = &app.services.cart_service;
    let buyer = Actor::buyer(BUYER);

    app.add_to_cart(BUYER, snapper.id, 1).await;
    let first = carts.list(&buyer).await.expect("list").data;
    assert_eq!(first.items.len(), 1);

    app.add_to_cart(BUYER, crab.id, 2).await;
    let second = carts.list(&buyer).await.expect("list").data;
    assert_eq!(second.items.len(), 2);
    assert_eq!(second.total_price, dec!(380000));

    let crab_line = second
        .items
        .iter()
        .find(|i| i.product_id == crab.id)
        .expect("crab line")
        .id;
    carts
        .update(&buyer, crab_line, &UpdateCartItemRequest { quantity: 1 })
        .await
        .expect("update");
    let third = carts.list(&buyer).await.expect("list").data;
    assert_eq!(third.total_price, dec!(230000));

    let cleared = carts.clear(&buyer).await.expect("clear").data;
    assert_eq!(cleared.affected_count, 2);
    assert!(carts.list(&buyer).await.expect("list").data.items.is_empty());
}

#[tokio::test]
async fn unavailable_lines_are_pruned_and_quantities_lowered_on_read() {
    let app = TestApp::new().await;
    let grouper = app.product(SELLER, "Kerapu", dec!(200000), 5).await;
    let shrimp = app.product(SELLER, "Udang Windu", dec!(90000), 5).await;

    app.add_to_cart(BUYER, grouper.id, 4).await;
    app.add_to_cart(BUYER, shrimp.id, 2).await;

    let seller = Actor::seller(SELLER);
    app.services
        .product_service
        .update_product(
            &seller,
            grouper.id,
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
            &seller,
            shrimp.id,
            &UpdateProductRequest {
                active: Some(false),
                ..Default::default()
            },
        )
        .await
        .expect("deactivate");

    let carts = &app.services.cart_service;
    let view = carts.list(&Actor::buyer(BUYER)).await.expect("list").data;

    assert_eq!(view.items.len(), 1);
    assert_eq!(view.items[0].product_id, grouper.id);
    assert_eq!(view.items[0].quantity, 1);
    assert_eq!(view.invalid_items.len(), 1);
    assert_eq!(view.invalid_items[0].product_id, shrimp.id);
    assert_eq!(view.invalid_items[0].reason, CartIssue::ProductInactive);

    // the pruned line is gone from the store, not just hidden
    let cleared = carts.clear(&Actor::buyer(BUYER)).await.expect("clear").data;
    assert_eq!(cleared.affected_count, 1);
}

#[tokio::test]
async fn items_in_someone_elses_cart_are_not_found() {
    let app = TestApp::new().await;
    let product = app.product(SELLER, "Teri Medan", dec!(25000), 10).await;

    let view = app
        .services
        .cart_service
        .add(
            &Actor::buyer(BUYER),
            &AddCartItemRequest {
                product_id: product.id,
                quantity: 1,
            },
        )
        .await
        .expect("add")
        .data;
    let item_id = view.items[0].id;

    let result = app
        .services
        .cart_service
        .remove(&Actor::buyer(OTHER_BUYER), item_id)
        .await;
    assert!(matches!(result, Err(ServiceError::NotFound(_))));
}
