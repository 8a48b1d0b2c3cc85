//! Conversation entity model.

use serde::Serialize;
use sqlx::FromRow;

use kitab_core::types::{DbId, Timestamp};

/// A row from the `conversations` table.
///
/// `listing_id` is nullable: the conversation outlives its listing
/// (`ON DELETE SET NULL`).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Conversation {
    pub id: DbId,
    pub listing_id: Option<DbId>,
    pub buyer_id: DbId,
    pub seller_id: DbId,
    pub last_message: Option<String>,
    pub last_message_at: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
