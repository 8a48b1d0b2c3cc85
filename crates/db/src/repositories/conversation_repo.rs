//! Repository for the `conversations` table.

use sqlx::PgPool;

use kitab_core::types::DbId;

use crate::models::conversation::Conversation;

/// Column list for `conversations` queries.
const COLUMNS: &str =
    "id, listing_id, buyer_id, seller_id, last_message, last_message_at, created_at, updated_at";

/// Provides persistence for buyer/seller conversations.
pub struct ConversationRepo;

impl ConversationRepo {
    /// Find the conversation between a buyer and seller about a listing, or
    /// create it if none exists.
    pub async fn find_or_create(
        pool: &PgPool,
        buyer_id: DbId,
        seller_id: DbId,
        listing_id: Option<DbId>,
    ) -> Result<Conversation, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM conversations \
             WHERE buyer_id = $1 AND seller_id = $2 AND listing_id IS NOT DISTINCT FROM $3"
        );
        if let Some(existing) = sqlx::query_as::<_, Conversation>(&query)
            .bind(buyer_id)
            .bind(seller_id)
            .bind(listing_id)
            .fetch_optional(pool)
            .await?
        {
            return Ok(existing);
        }

        let insert = format!(
            "INSERT INTO conversations (buyer_id, seller_id, listing_id) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Conversation>(&insert)
            .bind(buyer_id)
            .bind(seller_id)
            .bind(listing_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Conversation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM conversations WHERE id = $1");
        sqlx::query_as::<_, Conversation>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List conversations the user participates in, most recent activity first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<Conversation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM conversations \
             WHERE buyer_id = $1 OR seller_id = $1 \
             ORDER BY last_message_at DESC"
        );
        sqlx::query_as::<_, Conversation>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Record the latest message preview on the conversation.
    pub async fn touch_last_message(
        pool: &PgPool,
        conversation_id: DbId,
        preview: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE conversations \
             SET last_message = $2, last_message_at = NOW(), updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(conversation_id)
        .bind(preview)
        .execute(pool)
        .await?;
        Ok(())
    }
}
