mod common;

use common::{BUYER, OTHER_BUYER, OTHER_SELLER, SELLER, TestApp};
use marketplace::domain::{
    actor::Actor,
    enums::OrderStatus,
    requests::{
        notification::FindNotifications,
        review::{CreateReviewRequest, FindProductReviews, ReplyReviewRequest, UpdateReviewRequest},
    },
    response::order::OrderDetailResponse,
};
use rust_decimal_macros::dec;
use shared::errors::ServiceError;

/// Places an order for one unit and returns it once delivered.
async fn delivered(app: &TestApp, buyer_id: i64, product_id: i64) -> OrderDetailResponse {
    app.add_to_cart(buyer_id, product_id, 1).await;
    let order = app.checkout(buyer_id).await.expect("checkout");
    let orders = &app.services.order_service;
    let seller = Actor::seller(order.items[0].seller_id);

    for status in [OrderStatus::Processing, OrderStatus::Shipped] {
        orders
            .update_order_status(&seller, order.order.id, status)
            .await
            .expect("advance");
    }
    orders
        .complete_order(&Actor::buyer(buyer_id), order.order.id)
        .await
        .expect("complete");
    order
}

fn review(product_id: i64, order_item_id: i64, rating: i32) -> CreateReviewRequest {
    CreateReviewRequest {
        product_id,
        order_item_id,
        rating,
        comment: "Ikannya segar, pengiriman cepat".into(),
        images: vec![],
    }
}

#[tokio::test]
async fn only_completed_purchases_can_be_reviewed() {
    let app = TestApp::new().await;
    let product = app.product(SELLER, "Ikan Salem", dec!(70000), 10).await;
    let other = app.product(SELLER, "Ikan Patin", dec!(35000), 10).await;
    let reviews = &app.services.review_service;

    app.add_to_cart(BUYER, product.id, 1).await;
    let pending = app.checkout(BUYER).await.expect("checkout");
    let item_id = pending.items[0].id;

    let not_completed = reviews
        .create_review(&Actor::buyer(BUYER), &review(product.id, item_id, 5))
        .await;
    assert!(matches!(
        not_completed,
        Err(ServiceError::Validation(ref msgs)) if msgs[0] == "order is not completed yet"
    ));

    let someone_else = reviews
        .create_review(&Actor::buyer(OTHER_BUYER), &review(product.id, item_id, 5))
        .await;
    assert!(matches!(someone_else, Err(ServiceError::Validation(_))));

    let wrong_product = reviews
        .create_review(&Actor::buyer(BUYER), &review(other.id, item_id, 5))
        .await;
    assert!(matches!(wrong_product, Err(ServiceError::Validation(_))));

    let missing = reviews
        .create_review(&Actor::buyer(BUYER), &review(product.id, 9_999, 5))
        .await;
    assert!(matches!(missing, Err(ServiceError::NotFound(_))));
}

#[tokio::test]
async fn a_purchase_is_reviewed_once_and_ratings_are_recomputed() {
    let app = TestApp::new().await;
    let product = app.product(SELLER, "Ikan Baronang", dec!(55000), 10).await;
    let reviews = &app.services.review_service;

    let first = delivered(&app, BUYER, product.id).await;
    let second = delivered(&app, OTHER_BUYER, product.id).await;

    reviews
        .create_review(&Actor::buyer(BUYER), &review(product.id, first.items[0].id, 5))
        .await
        .expect("first review");

    let duplicate = reviews
        .create_review(&Actor::buyer(BUYER), &review(product.id, first.items[0].id, 1))
        .await;
    assert!(matches!(duplicate, Err(ServiceError::Conflict(_))));

    let theirs = reviews
        .create_review(
            &Actor::buyer(OTHER_BUYER),
            &review(product.id, second.items[0].id, 4),
        )
        .await
        .expect("second review")
        .data;

    let listed = app
        .services
        .product_service
        .find_product(&product.id.to_string())
        .await
        .expect("product")
        .data
        .product;
    assert_eq!(listed.review_count, 2);
    assert_eq!(listed.rating_avg, dec!(4.5));

    let page = reviews
        .product_reviews(product.id, &FindProductReviews::default())
        .await
        .expect("product reviews");
    assert_eq!(page.data.stats.count, 2);
    assert_eq!(page.data.stats.distribution.five, 1);
    assert_eq!(page.data.stats.distribution.four, 1);

    reviews
        .update_review(
            &Actor::buyer(OTHER_BUYER),
            theirs.id,
            &UpdateReviewRequest {
                rating: Some(2),
                ..Default::default()
            },
        )
        .await
        .expect("update");
    let rating = app
        .services
        .product_service
        .find_product(&product.id.to_string())
        .await
        .expect("product")
        .data
        .product
        .rating_avg;
    assert_eq!(rating, dec!(3.5));

    let not_author = reviews.delete_review(&Actor::buyer(BUYER), theirs.id).await;
    assert!(matches!(not_author, Err(ServiceError::Forbidden(_))));

    reviews
        .delete_review(&Actor::buyer(OTHER_BUYER), theirs.id)
        .await
        .expect("delete");
    let after_delete = app
        .services
        .product_service
        .find_product(&product.id.to_string())
        .await
        .expect("product")
        .data
        .product;
    assert_eq!(after_delete.review_count, 1);
    assert_eq!(after_delete.rating_avg, dec!(5.0));
}

#[tokio::test]
async fn seller_reply_is_upserted_and_notified_once() {
    let app = TestApp::new().await;
    let product = app.product(SELLER, "Lobster", dec!(400000), 3).await;
    let reviews = &app.services.review_service;

    let order = delivered(&app, BUYER, product.id).await;
    let created = reviews
        .create_review(&Actor::buyer(BUYER), &review(product.id, order.items[0].id, 5))
        .await
        .expect("review")
        .data;

    let stranger = reviews
        .reply_review(
            &Actor::seller(OTHER_SELLER),
            created.id,
            &ReplyReviewRequest {
                comment: "Terima kasih".into(),
            },
        )
        .await;
    assert!(matches!(stranger, Err(ServiceError::Forbidden(_))));

    let first = reviews
        .reply_review(
            &Actor::seller(SELLER),
            created.id,
            &ReplyReviewRequest {
                comment: "Terima kasih".into(),
            },
        )
        .await
        .expect("reply");
    let second = reviews
        .reply_review(
            &Actor::seller(SELLER),
            created.id,
            &ReplyReviewRequest {
                comment: "Terima kasih banyak!".into(),
            },
        )
        .await
        .expect("reply again");

    assert_eq!(first.data.id, second.data.id);
    assert_eq!(second.message, "Reply updated successfully");
    assert_eq!(second.data.comment, "Terima kasih banyak!");

    let detail = reviews
        .find_review(&Actor::buyer(BUYER), created.id)
        .await
        .expect("detail")
        .data;
    assert_eq!(
        detail.reply.map(|r| r.comment).as_deref(),
        Some("Terima kasih banyak!")
    );

    let inbox = app
        .services
        .notification_service
        .list_notifications(&Actor::buyer(BUYER), &FindNotifications::default())
        .await
        .expect("notifications")
        .data;
    let reply_notices = inbox
        .notifications
        .iter()
        .filter(|n| n.title == "Seller replied to your review")
        .count();
    assert_eq!(reply_notices, 1);
}
