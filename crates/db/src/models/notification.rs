//! Notification entity model.

use serde::Serialize;
use sqlx::FromRow;

use kitab_core::types::{DbId, Timestamp};

/// A row from the `notifications` table.
///
/// `kind` holds one of the constants in `kitab_core::notification`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Notification {
    pub id: DbId,
    pub user_id: DbId,
    pub kind: String,
    pub title: String,
    pub body: String,
    pub related_listing_id: Option<DbId>,
    pub is_read: bool,
    pub read_at: Option<Timestamp>,
    pub created_at: Timestamp,
}
