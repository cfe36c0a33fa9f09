mod common;

use common::{BUYER, OTHER_BUYER, SELLER, TestApp};
use marketplace::domain::{
    actor::Actor,
    enums::{MessageKind, NotificationKind},
    requests::{PageRequest, message::SendMessageRequest, notification::FindNotifications},
};
use rust_decimal_macros::dec;
use shared::errors::ServiceError;

fn text(recipient_id: i64, body: &str) -> SendMessageRequest {
    SendMessageRequest {
        recipient_id,
        body: body.into(),
        kind: MessageKind::Text,
        attachments: vec![],
        product_id: None,
        appointment_id: None,
    }
}

#[tokio::test]
async fn reading_a_conversation_marks_incoming_messages_read() {
    let app = TestApp::new().await;
    let messages = &app.services.message_service;
    let buyer = Actor::buyer(BUYER);
    let seller = Actor::seller(SELLER);

    messages
        .send_message(&buyer, &text(SELLER, "Masih ada ikan kakap?"))
        .await
        .expect("send");
    messages
        .send_message(&buyer, &text(SELLER, "Saya mau 2 kg"))
        .await
        .expect("send");

    let unread = messages.unread_message_count(&seller).await.expect("count");
    assert_eq!(unread.data.unread_count, 2);

    let partners = messages.conversations(&seller).await.expect("conversations").data;
    assert_eq!(partners.len(), 1);
    assert_eq!(partners[0].partner_id, BUYER);
    assert_eq!(partners[0].unread_count, 2);
    assert_eq!(partners[0].last_body, "Saya mau 2 kg");

    let thread = messages
        .conversation(&seller, BUYER, &PageRequest::default())
        .await
        .expect("thread");
    assert_eq!(thread.data.len(), 2);

    let unread = messages.unread_message_count(&seller).await.expect("count");
    assert_eq!(unread.data.unread_count, 0);

    // outgoing messages never count toward the sender
    let sender_unread = messages.unread_message_count(&buyer).await.expect("count");
    assert_eq!(sender_unread.data.unread_count, 0);
}

#[tokio::test]
async fn message_rules_are_enforced() {
    let app = TestApp::new().await;
    let messages = &app.services.message_service;
    let buyer = Actor::buyer(BUYER);

    let to_self = messages.send_message(&buyer, &text(BUYER, "halo")).await;
    assert!(matches!(to_self, Err(ServiceError::Validation(_))));

    let ghost_product = messages
        .send_message(
            &buyer,
            &SendMessageRequest {
                product_id: Some(9_999),
                ..text(SELLER, "Produk ini masih ada?")
            },
        )
        .await;
    assert!(matches!(ghost_product, Err(ServiceError::NotFound(_))));

    let product = app.product(SELLER, "Ikan Layang", dec!(20000), 3).await;
    let sent = messages
        .send_message(
            &buyer,
            &SendMessageRequest {
                product_id: Some(product.id),
                ..text(SELLER, "Produk ini masih ada?")
            },
        )
        .await
        .expect("send about product")
        .data;
    assert_eq!(sent.product_id, Some(product.id));

    let not_recipient = messages.mark_message_read(&buyer, sent.id).await;
    assert!(matches!(not_recipient, Err(ServiceError::Forbidden(_))));

    let read = messages
        .mark_message_read(&Actor::seller(SELLER), sent.id)
        .await
        .expect("mark read")
        .data;
    assert!(read.read_at.is_some());
}

#[tokio::test]
async fn notifications_belong_to_their_owner() {
    let app = TestApp::new().await;
    app.services
        .message_service
        .send_message(&Actor::buyer(BUYER), &text(SELLER, "Permisi"))
        .await
        .expect("send");

    let notifications = &app.services.notification_service;
    let inbox = notifications
        .list_notifications(&Actor::seller(SELLER), &FindNotifications::default())
        .await
        .expect("inbox")
        .data;
    assert_eq!(inbox.unread_count, 1);
    assert_eq!(inbox.notifications[0].kind, NotificationKind::Chat);
    let id = inbox.notifications[0].id;

    let stolen = notifications
        .mark_notification_read(&Actor::buyer(OTHER_BUYER), id)
        .await;
    assert!(matches!(stolen, Err(ServiceError::Forbidden(_))));

    let all = notifications
        .mark_all_read(&Actor::seller(SELLER))
        .await
        .expect("read all")
        .data;
    assert_eq!(all.affected_count, 1);

    let unread_only = notifications
        .list_notifications(
            &Actor::seller(SELLER),
            &FindNotifications {
                unread: Some(true),
                ..Default::default()
            },
        )
        .await
        .expect("unread");
    assert!(unread_only.data.notifications.is_empty());
    assert_eq!(unread_only.data.unread_count, 0);
}

#[tokio::test]
async fn checkout_notifies_buyer_and_each_seller() {
    let app = TestApp::new().await;
    let product = app.product(SELLER, "Ikan Gurame", dec!(65000), 4).await;
    app.add_to_cart(BUYER, product.id, 1).await;
    app.checkout(BUYER).await.expect("checkout");

    let notifications = &app.services.notification_service;
    let filter = FindNotifications {
        kind: Some(NotificationKind::Order),
        ..Default::default()
    };

    let buyer_inbox = notifications
        .list_notifications(&Actor::buyer(BUYER), &filter)
        .await
        .expect("buyer inbox");
    assert_eq!(buyer_inbox.data.notifications.len(), 1);
    assert_eq!(buyer_inbox.data.notifications[0].title, "Order placed");

    let seller_inbox = notifications
        .list_notifications(&Actor::seller(SELLER), &filter)
        .await
        .expect("seller inbox");
    assert_eq!(seller_inbox.data.notifications.len(), 1);
    assert_eq!(seller_inbox.data.notifications[0].title, "New order");
}
