//! HTTP-level integration tests for the buyer-facing marketplace surface:
//! conversations and messages, favorites, and notifications.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_listing, delete_auth, get_auth, post_auth, post_json_auth, put_json_auth,
    register_user,
};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Conversations and messages
// ---------------------------------------------------------------------------

/// Start a conversation about a listing and return the conversation id.
async fn start_conversation(pool: &PgPool, token: &str, listing_id: i64) -> i64 {
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "listing_id": listing_id });
    let response = post_json_auth(app, "/api/v1/conversations", token, body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    json["data"]["id"].as_i64().unwrap()
}

/// Starting a conversation about a listing pairs the buyer with the seller,
/// and starting it again returns the same conversation.
#[sqlx::test(migrations = "../../migrations")]
async fn test_start_conversation_is_idempotent(pool: PgPool) {
    let (seller_token, seller_id) = register_user(&pool, "chat_seller").await;
    let (buyer_token, buyer_id) = register_user(&pool, "chat_buyer").await;
    let listing_id = create_listing(&pool, &seller_token, "Set Theory", 300.0).await;

    let first = start_conversation(&pool, &buyer_token, listing_id).await;
    let second = start_conversation(&pool, &buyer_token, listing_id).await;
    assert_eq!(first, second);

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/conversations", &buyer_token).await;
    let json = body_json(response).await;
    let items = json["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["buyer_id"], buyer_id);
    assert_eq!(items[0]["seller_id"], seller_id);
    assert_eq!(items[0]["listing_id"], listing_id);
}

/// A seller cannot open a conversation with themselves about their own listing.
#[sqlx::test(migrations = "../../migrations")]
async fn test_cannot_converse_with_self(pool: PgPool) {
    let (token, _) = register_user(&pool, "soliloquist").await;
    let listing_id = create_listing(&pool, &token, "Monologues", 100.0).await;

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "listing_id": listing_id });
    let response = post_json_auth(app, "/api/v1/conversations", &token, body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Sending a message notifies the receiver and bumps their unread count;
/// reading the thread clears it.
#[sqlx::test(migrations = "../../migrations")]
async fn test_send_message_notifies_and_tracks_unread(pool: PgPool) {
    let (seller_token, _) = register_user(&pool, "msg_seller").await;
    let (buyer_token, _) = register_user(&pool, "msg_buyer").await;
    let listing_id = create_listing(&pool, &seller_token, "Probability", 550.0).await;
    let conversation_id = start_conversation(&pool, &buyer_token, listing_id).await;

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "content": "Is this still available?" });
    let response = post_json_auth(
        app,
        &format!("/api/v1/conversations/{conversation_id}/messages"),
        &buyer_token,
        body,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["content"], "Is this still available?");

    // The seller now has one unread message and a notification.
    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/api/v1/messages/unread-count", &seller_token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["count"], 1);

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/api/v1/notifications", &seller_token).await;
    let json = body_json(response).await;
    let items = json["data"].as_array().unwrap();
    assert_eq!(items[0]["kind"], "message_received");
    assert_eq!(items[0]["body"], "msg_buyer sent you a message");

    // Fetching the thread marks the seller's copy read.
    let app = common::build_test_app(pool.clone());
    let response = get_auth(
        app,
        &format!("/api/v1/conversations/{conversation_id}/messages"),
        &seller_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/messages/unread-count", &seller_token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["count"], 0);
}

/// Whitespace-only message content is rejected.
#[sqlx::test(migrations = "../../migrations")]
async fn test_blank_message_rejected(pool: PgPool) {
    let (seller_token, _) = register_user(&pool, "blank_seller").await;
    let (buyer_token, _) = register_user(&pool, "blank_buyer").await;
    let listing_id = create_listing(&pool, &seller_token, "Silence", 50.0).await;
    let conversation_id = start_conversation(&pool, &buyer_token, listing_id).await;

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "content": "   " });
    let response = post_json_auth(
        app,
        &format!("/api/v1/conversations/{conversation_id}/messages"),
        &buyer_token,
        body,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// A third party can neither read nor post in someone else's conversation.
#[sqlx::test(migrations = "../../migrations")]
async fn test_conversation_access_is_participant_only(pool: PgPool) {
    let (seller_token, _) = register_user(&pool, "private_seller").await;
    let (buyer_token, _) = register_user(&pool, "private_buyer").await;
    let (snoop_token, _) = register_user(&pool, "snoop").await;
    let listing_id = create_listing(&pool, &seller_token, "Secrets", 999.0).await;
    let conversation_id = start_conversation(&pool, &buyer_token, listing_id).await;

    let app = common::build_test_app(pool.clone());
    let response = get_auth(
        app,
        &format!("/api/v1/conversations/{conversation_id}/messages"),
        &snoop_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "content": "let me in" });
    let response = post_json_auth(
        app,
        &format!("/api/v1/conversations/{conversation_id}/messages"),
        &snoop_token,
        body,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Favorites
// ---------------------------------------------------------------------------

/// Favoriting is idempotent: 201 on create, 200 on repeat, 204/404 on remove.
#[sqlx::test(migrations = "../../migrations")]
async fn test_favorite_lifecycle(pool: PgPool) {
    let (seller_token, _) = register_user(&pool, "fav_seller").await;
    let (buyer_token, _) = register_user(&pool, "fav_buyer").await;
    let listing_id = create_listing(&pool, &seller_token, "Galois Theory", 850.0).await;

    let app = common::build_test_app(pool.clone());
    let response = post_auth(app, &format!("/api/v1/favorites/{listing_id}"), &buyer_token).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let app = common::build_test_app(pool.clone());
    let response = post_auth(app, &format!("/api/v1/favorites/{listing_id}"), &buyer_token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/api/v1/favorites", &buyer_token).await;
    let json = body_json(response).await;
    let items = json["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["title"], "Galois Theory");

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(app, &format!("/api/v1/favorites/{listing_id}"), &buyer_token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let response = delete_auth(app, &format!("/api/v1/favorites/{listing_id}"), &buyer_token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Sellers cannot favorite their own listings.
#[sqlx::test(migrations = "../../migrations")]
async fn test_cannot_favorite_own_listing(pool: PgPool) {
    let (token, _) = register_user(&pool, "narcissist").await;
    let listing_id = create_listing(&pool, &token, "Mirrors", 120.0).await;

    let app = common::build_test_app(pool);
    let response = post_auth(app, &format!("/api/v1/favorites/{listing_id}"), &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Lowering the price of a favorited listing notifies the favoriter.
#[sqlx::test(migrations = "../../migrations")]
async fn test_price_drop_notifies_favoriters(pool: PgPool) {
    let (seller_token, _) = register_user(&pool, "drop_seller").await;
    let (fan_token, _) = register_user(&pool, "bargain_fan").await;
    let listing_id = create_listing(&pool, &seller_token, "Analysis I", 1200.0).await;

    let app = common::build_test_app(pool.clone());
    let response = post_auth(app, &format!("/api/v1/favorites/{listing_id}"), &fan_token).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "price": 900.0 });
    let response = put_json_auth(
        app,
        &format!("/api/v1/listings/{listing_id}"),
        &seller_token,
        body,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/api/v1/notifications", &fan_token).await;
    let json = body_json(response).await;
    let items = json["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["kind"], "price_drop");
    assert_eq!(
        items[0]["body"],
        "\"Analysis I\" dropped from 1200.00 to 900.00"
    );

    // Raising the price back does not notify.
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "price": 1100.0 });
    let response = put_json_auth(
        app,
        &format!("/api/v1/listings/{listing_id}"),
        &seller_token,
        body,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/notifications", &fan_token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
}

/// Marking a favorited listing sold notifies the favoriter.
#[sqlx::test(migrations = "../../migrations")]
async fn test_mark_sold_notifies_favoriters(pool: PgPool) {
    let (seller_token, _) = register_user(&pool, "sold_seller").await;
    let (fan_token, _) = register_user(&pool, "late_fan").await;
    let listing_id = create_listing(&pool, &seller_token, "Measure Theory", 700.0).await;

    let app = common::build_test_app(pool.clone());
    post_auth(app, &format!("/api/v1/favorites/{listing_id}"), &fan_token).await;

    let app = common::build_test_app(pool.clone());
    let response = post_auth(app, &format!("/api/v1/listings/{listing_id}/mark-sold"), &seller_token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/notifications", &fan_token).await;
    let json = body_json(response).await;
    let items = json["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["kind"], "listing_sold");
}

// ---------------------------------------------------------------------------
// Notifications
// ---------------------------------------------------------------------------

/// Seed one notification for `user_token` by having another user message them.
async fn seed_notification(pool: &PgPool, seller_token: &str, buyer_token: &str) -> i64 {
    let listing_id = create_listing(pool, seller_token, "Seed Book", 100.0).await;
    let conversation_id = start_conversation(pool, buyer_token, listing_id).await;

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "content": "hello" });
    let response = post_json_auth(
        app,
        &format!("/api/v1/conversations/{conversation_id}/messages"),
        buyer_token,
        body,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/api/v1/notifications", seller_token).await;
    let json = body_json(response).await;
    json["data"][0]["id"].as_i64().unwrap()
}

/// unread_only filtering, single mark-read, and the unread counter.
#[sqlx::test(migrations = "../../migrations")]
async fn test_notification_read_tracking(pool: PgPool) {
    let (seller_token, _) = register_user(&pool, "notif_seller").await;
    let (buyer_token, _) = register_user(&pool, "notif_buyer").await;
    let notification_id = seed_notification(&pool, &seller_token, &buyer_token).await;

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/api/v1/notifications/unread-count", &seller_token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["count"], 1);

    let app = common::build_test_app(pool.clone());
    let response = post_auth(
        app,
        &format!("/api/v1/notifications/{notification_id}/read"),
        &seller_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool.clone());
    let response = get_auth(
        app,
        "/api/v1/notifications?unread_only=true",
        &seller_token,
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 0);

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/notifications/unread-count", &seller_token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["count"], 0);
}

/// A user cannot mark someone else's notification as read.
#[sqlx::test(migrations = "../../migrations")]
async fn test_cannot_read_other_users_notification(pool: PgPool) {
    let (seller_token, _) = register_user(&pool, "victim").await;
    let (buyer_token, _) = register_user(&pool, "sender").await;
    let notification_id = seed_notification(&pool, &seller_token, &buyer_token).await;

    let app = common::build_test_app(pool);
    let response = post_auth(
        app,
        &format!("/api/v1/notifications/{notification_id}/read"),
        &buyer_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// read-all marks everything and reports the count.
#[sqlx::test(migrations = "../../migrations")]
async fn test_mark_all_read(pool: PgPool) {
    let (seller_token, _) = register_user(&pool, "bulk_seller").await;
    let (buyer_token, _) = register_user(&pool, "bulk_buyer").await;
    seed_notification(&pool, &seller_token, &buyer_token).await;
    seed_notification(&pool, &seller_token, &buyer_token).await;

    let app = common::build_test_app(pool.clone());
    let response = post_auth(app, "/api/v1/notifications/read-all", &seller_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["marked_read"], 2);

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/notifications/unread-count", &seller_token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["count"], 0);
}
