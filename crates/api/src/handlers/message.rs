//! Handlers for conversations and messages.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use kitab_core::error::CoreError;
use kitab_core::notification;
use kitab_core::types::DbId;
use kitab_db::models::conversation::Conversation;
use kitab_db::models::message::Message;
use kitab_db::repositories::{ConversationRepo, ListingRepo, MessageRepo, NotificationRepo, UserRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Maximum page size for message listing.
const MAX_LIMIT: i64 = 200;

/// Default page size for message listing.
const DEFAULT_LIMIT: i64 = 50;

/// Length of the conversation preview stored alongside the last message.
const PREVIEW_LENGTH: usize = 120;

// ---------------------------------------------------------------------------
// Request / query types
// ---------------------------------------------------------------------------

/// Request body for `POST /conversations`.
///
/// Either `listing_id` (conversation about a listing, seller derived from it)
/// or `recipient_id` (direct conversation) must be provided.
#[derive(Debug, Deserialize)]
pub struct StartConversationRequest {
    pub listing_id: Option<DbId>,
    pub recipient_id: Option<DbId>,
}

/// Request body for `POST /conversations/{id}/messages`.
#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub content: String,
}

/// Pagination for `GET /conversations/{id}/messages`.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

// ---------------------------------------------------------------------------
// Conversations
// ---------------------------------------------------------------------------

/// POST /api/v1/conversations
///
/// Find or start a conversation. The initiator is the buyer; the seller is
/// the listing's owner, or `recipient_id` for a direct conversation.
pub async fn start_conversation(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<StartConversationRequest>,
) -> AppResult<Json<DataResponse<Conversation>>> {
    let (seller_id, listing_id) = match (input.listing_id, input.recipient_id) {
        (Some(listing_id), _) => {
            let listing = ListingRepo::find_by_id(&state.pool, listing_id)
                .await?
                .ok_or(AppError::Core(CoreError::NotFound {
                    entity: "Listing",
                    id: listing_id,
                }))?;
            (listing.seller_id, Some(listing_id))
        }
        (None, Some(recipient_id)) => {
            UserRepo::find_by_id(&state.pool, recipient_id)
                .await?
                .ok_or(AppError::Core(CoreError::NotFound {
                    entity: "User",
                    id: recipient_id,
                }))?;
            (recipient_id, None)
        }
        (None, None) => {
            return Err(AppError::Core(CoreError::Validation(
                "Either listing_id or recipient_id is required".into(),
            )));
        }
    };

    if seller_id == auth.user_id {
        return Err(AppError::Core(CoreError::Validation(
            "You cannot start a conversation with yourself".into(),
        )));
    }

    let conversation =
        ConversationRepo::find_or_create(&state.pool, auth.user_id, seller_id, listing_id).await?;

    Ok(Json(DataResponse { data: conversation }))
}

/// GET /api/v1/conversations
///
/// The authenticated user's conversations, most recent activity first.
pub async fn list_conversations(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Conversation>>>> {
    let conversations = ConversationRepo::list_for_user(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: conversations }))
}

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

/// GET /api/v1/conversations/{id}/messages
///
/// Messages in a conversation, oldest first. Fetching also marks every
/// message addressed to the caller as read.
pub async fn list_messages(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(conversation_id): Path<DbId>,
    Query(params): Query<MessageQuery>,
) -> AppResult<Json<DataResponse<Vec<Message>>>> {
    find_participant_conversation(&state, conversation_id, auth.user_id).await?;

    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let offset = params.offset.unwrap_or(0).max(0);

    let messages =
        MessageRepo::list_for_conversation(&state.pool, conversation_id, limit, offset).await?;
    MessageRepo::mark_conversation_read(&state.pool, conversation_id, auth.user_id).await?;

    Ok(Json(DataResponse { data: messages }))
}

/// POST /api/v1/conversations/{id}/messages
///
/// Send a message in a conversation the caller participates in. The other
/// participant receives an in-app notification.
pub async fn send_message(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(conversation_id): Path<DbId>,
    Json(input): Json<SendMessageRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Message>>)> {
    let content = input.content.trim();
    if content.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Message content must not be empty".into(),
        )));
    }

    let conversation =
        find_participant_conversation(&state, conversation_id, auth.user_id).await?;

    let receiver_id = if conversation.buyer_id == auth.user_id {
        conversation.seller_id
    } else {
        conversation.buyer_id
    };

    let message =
        MessageRepo::create(&state.pool, conversation_id, auth.user_id, receiver_id, content)
            .await?;

    let preview: String = content.chars().take(PREVIEW_LENGTH).collect();
    ConversationRepo::touch_last_message(&state.pool, conversation_id, &preview).await?;

    let (title, body) = notification::message_received_message(&auth.username);
    NotificationRepo::create(
        &state.pool,
        receiver_id,
        notification::KIND_MESSAGE_RECEIVED,
        &title,
        &body,
        conversation.listing_id,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: message })))
}

/// GET /api/v1/messages/unread-count
///
/// Number of unread messages addressed to the caller across all conversations.
pub async fn unread_count(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<serde_json::Value>> {
    let count = MessageRepo::unread_count_for_user(&state.pool, auth.user_id).await?;
    Ok(Json(serde_json::json!({ "data": { "count": count } })))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Fetch a conversation and verify the caller participates in it.
async fn find_participant_conversation(
    state: &AppState,
    conversation_id: DbId,
    user_id: DbId,
) -> AppResult<Conversation> {
    let conversation = ConversationRepo::find_by_id(&state.pool, conversation_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Conversation",
            id: conversation_id,
        }))?;

    if conversation.buyer_id != user_id && conversation.seller_id != user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "You are not part of this conversation".into(),
        )));
    }

    Ok(conversation)
}
