//! Repository for the `messages` table.

use sqlx::PgPool;

use kitab_core::types::DbId;

use crate::models::message::Message;

/// Column list for `messages` queries.
const COLUMNS: &str =
    "id, conversation_id, sender_id, receiver_id, content, is_read, read_at, created_at";

/// Provides persistence for messages within a conversation.
pub struct MessageRepo;

impl MessageRepo {
    /// Insert a message, returning the full row.
    pub async fn create(
        pool: &PgPool,
        conversation_id: DbId,
        sender_id: DbId,
        receiver_id: DbId,
        content: &str,
    ) -> Result<Message, sqlx::Error> {
        let query = format!(
            "INSERT INTO messages (conversation_id, sender_id, receiver_id, content) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Message>(&query)
            .bind(conversation_id)
            .bind(sender_id)
            .bind(receiver_id)
            .bind(content)
            .fetch_one(pool)
            .await
    }

    /// List messages in a conversation, oldest first.
    pub async fn list_for_conversation(
        pool: &PgPool,
        conversation_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Message>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM messages \
             WHERE conversation_id = $1 \
             ORDER BY created_at ASC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Message>(&query)
            .bind(conversation_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Mark every message addressed to `receiver_id` in the conversation as
    /// read. Returns the number of messages updated.
    pub async fn mark_conversation_read(
        pool: &PgPool,
        conversation_id: DbId,
        receiver_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE messages \
             SET is_read = TRUE, read_at = NOW() \
             WHERE conversation_id = $1 AND receiver_id = $2 AND is_read = FALSE",
        )
        .bind(conversation_id)
        .bind(receiver_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Number of unread messages addressed to the user across all
    /// conversations.
    pub async fn unread_count_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        let count: Option<i64> = sqlx::query_scalar(
            "SELECT COUNT(*) FROM messages WHERE receiver_id = $1 AND is_read = FALSE",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await?;
        Ok(count.unwrap_or(0))
    }
}
