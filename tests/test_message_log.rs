use parley::api::middleware::error::ApiError;
use parley::domain::ports::MessageRepository;
use std::sync::Arc;

mod helpers;
use helpers::*;
use parley::services::MockPushProvider;

#[tokio::test]
async fn history_is_ordered_by_insertion_assigned_ids() {
    let db = setup_test_db().await;
    create_test_user(&db, "buyer", "Buyer", None).await;
    create_test_user(&db, "seller", "Seller", None).await;
    create_test_listing(&db, 100, "seller", "Chair").await;

    let service = build_chat_service(&db, Arc::new(MockPushProvider::new()));
    let room = service
        .resolve_or_create_room(100, "buyer", "seller")
        .await
        .unwrap();

    let first = db.append_message(room.id, "buyer", "is this available?", 1).await.unwrap();
    let second = db.append_message(room.id, "seller", "it is", 1).await.unwrap();
    let third = db.append_message(room.id, "buyer", "great, tomorrow?", 2).await.unwrap();

    assert!(first < second && second < third);

    let history = db.list_messages(room.id).await.unwrap();
    assert_eq!(history.len(), 3);
    assert_eq!(
        history.iter().map(|m| m.id).collect::<Vec<_>>(),
        vec![first, second, third]
    );
    assert_eq!(history[0].body, "is this available?");
    assert_eq!(history[2].client_count, 2);
    assert!(history.iter().all(|m| !m.is_read));
}

#[tokio::test]
async fn mark_read_skips_the_readers_own_messages() {
    let db = setup_test_db().await;
    create_test_user(&db, "buyer", "Buyer", None).await;
    create_test_user(&db, "seller", "Seller", None).await;
    create_test_listing(&db, 100, "seller", "Chair").await;

    let service = build_chat_service(&db, Arc::new(MockPushProvider::new()));
    let room = service
        .resolve_or_create_room(100, "buyer", "seller")
        .await
        .unwrap();

    db.append_message(room.id, "buyer", "hello", 1).await.unwrap();
    db.append_message(room.id, "seller", "hi", 1).await.unwrap();
    db.append_message(room.id, "buyer", "still there?", 2).await.unwrap();

    let flipped = db.mark_read_except(room.id, "seller").await.unwrap();
    assert_eq!(flipped, 2);

    let history = db.list_messages(room.id).await.unwrap();
    for message in &history {
        if message.sender_id == "buyer" {
            assert!(message.is_read, "counterpart messages must be read");
        } else {
            assert!(!message.is_read, "reader's own messages must not flip");
        }
    }

    // Idempotent: a second pass finds nothing left to flip.
    let again = db.mark_read_except(room.id, "seller").await.unwrap();
    assert_eq!(again, 0);
}

#[tokio::test]
async fn opening_a_room_marks_history_read_exactly_once() {
    let db = setup_test_db().await;
    create_test_user(&db, "buyer", "Buyer", None).await;
    create_test_user(&db, "seller", "Seller", None).await;
    create_test_listing(&db, 100, "seller", "Chair").await;

    let service = build_chat_service(&db, Arc::new(MockPushProvider::new()));
    let room = service
        .resolve_or_create_room(100, "buyer", "seller")
        .await
        .unwrap();

    service
        .send_message(room.id, "buyer", "hi", 1)
        .await
        .unwrap();

    let detail = service.open_room(room.id, "seller").await.unwrap();
    assert_eq!(detail.messages.len(), 1);
    assert!(detail.messages[0].is_read);

    // Reading again changes nothing.
    let detail = service.open_room(room.id, "seller").await.unwrap();
    assert_eq!(detail.messages.len(), 1);
    assert!(detail.messages[0].is_read);
}

#[tokio::test]
async fn empty_message_bodies_are_rejected() {
    let db = setup_test_db().await;
    create_test_user(&db, "buyer", "Buyer", None).await;
    create_test_user(&db, "seller", "Seller", None).await;
    create_test_listing(&db, 100, "seller", "Chair").await;

    let service = build_chat_service(&db, Arc::new(MockPushProvider::new()));
    let room = service
        .resolve_or_create_room(100, "buyer", "seller")
        .await
        .unwrap();

    let result = service.send_message(room.id, "buyer", "   ", 1).await;
    assert!(matches!(result, Err(ApiError::BadRequest(_))));

    let history = db.list_messages(room.id).await.unwrap();
    assert!(history.is_empty());
}
