//! Repository for the `favorites` table.

use sqlx::PgPool;

use kitab_core::types::DbId;

use crate::models::listing::Listing;

/// Provides persistence for favorites.
pub struct FavoriteRepo;

impl FavoriteRepo {
    /// Add a listing to a user's favorites.
    ///
    /// Returns `true` if the favorite was created, `false` if it already
    /// existed (idempotent via `ON CONFLICT DO NOTHING`).
    pub async fn add(pool: &PgPool, user_id: DbId, listing_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO favorites (user_id, listing_id) VALUES ($1, $2) \
             ON CONFLICT (user_id, listing_id) DO NOTHING",
        )
        .bind(user_id)
        .bind(listing_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Remove a listing from a user's favorites.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn remove(
        pool: &PgPool,
        user_id: DbId,
        listing_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM favorites WHERE user_id = $1 AND listing_id = $2")
            .bind(user_id)
            .bind(listing_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List the user's favorited listings, most recently favorited first.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Listing>, sqlx::Error> {
        sqlx::query_as::<_, Listing>(
            "SELECT l.id, l.seller_id, l.title, l.author, l.isbn, l.description, l.price, \
             l.declared_condition, l.status, l.created_at, l.updated_at \
             FROM favorites f \
             JOIN listings l ON l.id = f.listing_id \
             WHERE f.user_id = $1 \
             ORDER BY f.created_at DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Users who favorited a listing (price-drop notification fan-out).
    pub async fn user_ids_for_listing(
        pool: &PgPool,
        listing_id: DbId,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar("SELECT user_id FROM favorites WHERE listing_id = $1")
            .bind(listing_id)
            .fetch_all(pool)
            .await
    }
}
