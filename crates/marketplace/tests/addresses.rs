mod common;

use common::{BUYER, OTHER_BUYER, SELLER, TestApp};
use marketplace::domain::{
    actor::Actor,
    enums::OrderStatus,
    requests::address::UpdateAddressRequest,
};
use rust_decimal_macros::dec;
use shared::errors::{RepositoryError, ServiceError};

async fn main_ids(app: &TestApp, user_id: i64) -> Vec<i64> {
    app.services
        .address_service
        .my_addresses(&Actor::buyer(user_id))
        .await
        .expect("list addresses")
        .data
        .into_iter()
        .filter(|a| a.is_main)
        .map(|a| a.id)
        .collect()
}

#[tokio::test]
async fn first_address_becomes_main() {
    let app = TestApp::new().await;

    let home = app.new_address(BUYER, "Rumah").await;
    let office = app.new_address(BUYER, "Kantor").await;

    assert_eq!(main_ids(&app, BUYER).await, vec![home]);

    let listed = app
        .services
        .address_service
        .my_addresses(&Actor::buyer(BUYER))
        .await
        .expect("list")
        .data;
    let order: Vec<i64> = listed.iter().map(|a| a.id).collect();
    assert_eq!(order, vec![home, office]);
}

#[tokio::test]
async fn only_one_address_stays_main() {
    let app = TestApp::new().await;
    let addresses = &app.services.address_service;
    let buyer = Actor::buyer(BUYER);

    let home = app.new_address(BUYER, "Rumah").await;
    let office = app.new_address(BUYER, "Kantor").await;
    let other_home = app.new_address(OTHER_BUYER, "Rumah").await;

    let promoted = addresses
        .set_main_address(&buyer, office)
        .await
        .expect("set main")
        .data;
    assert!(promoted.is_main);
    assert_eq!(main_ids(&app, BUYER).await, vec![office]);

    addresses
        .update_address(
            &buyer,
            home,
            &UpdateAddressRequest {
                is_main: Some(true),
                city: Some("Parepare".into()),
                ..Default::default()
            },
        )
        .await
        .expect("update");
    assert_eq!(main_ids(&app, BUYER).await, vec![home]);

    assert_eq!(main_ids(&app, OTHER_BUYER).await, vec![other_home]);
}

#[tokio::test]
async fn addresses_are_private_to_their_owner() {
    let app = TestApp::new().await;
    let addresses = &app.services.address_service;
    let home = app.new_address(BUYER, "Rumah").await;
    let stranger = Actor::buyer(OTHER_BUYER);

    let read = addresses.find_address(&stranger, home).await;
    assert!(matches!(read, Err(ServiceError::Forbidden(_))));

    let edit = addresses
        .update_address(
            &stranger,
            home,
            &UpdateAddressRequest {
                recipient_name: Some("Budi".into()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(edit, Err(ServiceError::Forbidden(_))));

    let main = addresses.set_main_address(&stranger, home).await;
    assert!(matches!(main, Err(ServiceError::Forbidden(_))));

    let delete = addresses.delete_address(&stranger, home).await;
    assert!(matches!(delete, Err(ServiceError::Forbidden(_))));

    let missing = addresses.find_address(&stranger, 9_999).await;
    assert!(matches!(missing, Err(ServiceError::NotFound(_))));

    let mine = addresses
        .find_address(&Actor::buyer(BUYER), home)
        .await
        .expect("owner reads")
        .data;
    assert_eq!(mine.recipient_name, "Andi");
}

#[tokio::test]
async fn invalid_address_is_rejected() {
    let app = TestApp::new().await;
    let home = app.new_address(BUYER, "Rumah").await;

    let result = app
        .services
        .address_service
        .update_address(
            &Actor::buyer(BUYER),
            home,
            &UpdateAddressRequest {
                full_address: Some("Jl".into()),
                ..Default::default()
            },
        )
        .await;

    assert!(matches!(result, Err(ServiceError::Validation(_))));
}

#[tokio::test]
async fn address_of_an_active_order_cannot_be_deleted() {
    let app = TestApp::new().await;
    let product = app.product(SELLER, "Ikan Baronang", dec!(60000), 5).await;
    let home = app.address(BUYER).await;

    app.add_to_cart(BUYER, product.id, 1).await;
    let order = app.checkout(BUYER).await.expect("checkout");
    assert_eq!(order.order.address_id, Some(home));

    let blocked = app
        .services
        .address_service
        .delete_address(&Actor::buyer(BUYER), home)
        .await;
    assert!(matches!(
        blocked,
        Err(ServiceError::Repo(RepositoryError::Conflict(_)))
    ));

    let canceled = app
        .services
        .order_service
        .cancel_order(&Actor::buyer(BUYER), order.order.id)
        .await
        .expect("cancel")
        .data;
    assert_eq!(canceled.status, OrderStatus::Canceled);

    app.services
        .address_service
        .delete_address(&Actor::buyer(BUYER), home)
        .await
        .expect("delete once the order is closed");

    let kept = app
        .services
        .order_service
        .find_order(&Actor::buyer(BUYER), order.order.id)
        .await
        .expect("order")
        .data;
    assert_eq!(kept.order.address_id, None);
    assert!(kept.order.shipping_address.contains("Jl. Pelabuhan No. 12"));
}

#[tokio::test]
async fn deleting_the_main_address_promotes_the_oldest_remaining() {
    let app = TestApp::new().await;
    let addresses = &app.services.address_service;
    let buyer = Actor::buyer(BUYER);

    let home = app.new_address(BUYER, "Rumah").await;
    let office = app.new_address(BUYER, "Kantor").await;
    let market = app.new_address(BUYER, "Pasar").await;

    addresses
        .delete_address(&buyer, home)
        .await
        .expect("delete main");
    assert_eq!(main_ids(&app, BUYER).await, vec![office]);

    addresses
        .delete_address(&buyer, market)
        .await
        .expect("delete non-main");
    assert_eq!(main_ids(&app, BUYER).await, vec![office]);

    addresses
        .delete_address(&buyer, office)
        .await
        .expect("delete last");
    assert!(main_ids(&app, BUYER).await.is_empty());
}
