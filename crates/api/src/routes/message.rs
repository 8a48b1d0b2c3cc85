//! Route definitions for conversations and messages.
//!
//! All endpoints require authentication.

use axum::routing::get;
use axum::Router;

use crate::handlers::message;
use crate::state::AppState;

/// Routes for `/conversations` and `/messages`.
///
/// ```text
/// GET  /conversations                 -> list_conversations
/// POST /conversations                 -> start_conversation
/// GET  /conversations/{id}/messages   -> list_messages (marks as read)
/// POST /conversations/{id}/messages   -> send_message
/// GET  /messages/unread-count         -> unread_count
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/conversations",
            get(message::list_conversations).post(message::start_conversation),
        )
        .route(
            "/conversations/{id}/messages",
            get(message::list_messages).post(message::send_message),
        )
        .route("/messages/unread-count", get(message::unread_count))
}
