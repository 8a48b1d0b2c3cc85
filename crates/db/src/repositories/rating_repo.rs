//! Repository for the `ratings` table.

use sqlx::PgPool;

use kitab_core::types::DbId;

use crate::models::rating::{NewRating, Rating, SellerStats};

/// Column list for `ratings` queries.
const COLUMNS: &str = "id, buyer_id, seller_id, listing_id, rating, comment, \
     communication_rating, condition_accuracy_rating, delivery_speed_rating, created_at";

/// Provides persistence for seller ratings.
pub struct RatingRepo;

impl RatingRepo {
    /// Insert a new rating, returning the full row.
    ///
    /// A second rating from the same buyer on the same listing violates
    /// `uq_ratings_buyer_listing`, which the API layer maps to 409.
    pub async fn create(pool: &PgPool, new: &NewRating) -> Result<Rating, sqlx::Error> {
        let query = format!(
            "INSERT INTO ratings (buyer_id, seller_id, listing_id, rating, comment, \
             communication_rating, condition_accuracy_rating, delivery_speed_rating) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Rating>(&query)
            .bind(new.buyer_id)
            .bind(new.seller_id)
            .bind(new.listing_id)
            .bind(new.rating)
            .bind(&new.comment)
            .bind(new.communication_rating)
            .bind(new.condition_accuracy_rating)
            .bind(new.delivery_speed_rating)
            .fetch_one(pool)
            .await
    }

    /// List ratings received by a seller, newest first.
    pub async fn list_for_seller(
        pool: &PgPool,
        seller_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Rating>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM ratings \
             WHERE seller_id = $1 \
             ORDER BY created_at DESC, id DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Rating>(&query)
            .bind(seller_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Aggregate rating statistics for a seller, computed entirely in SQL.
    pub async fn stats_for_seller(
        pool: &PgPool,
        seller_id: DbId,
    ) -> Result<SellerStats, sqlx::Error> {
        sqlx::query_as::<_, SellerStats>(
            "SELECT \
             COUNT(*) AS total_ratings, \
             AVG(rating::float8) AS average_rating, \
             AVG(communication_rating::float8) AS avg_communication, \
             AVG(condition_accuracy_rating::float8) AS avg_condition_accuracy, \
             AVG(delivery_speed_rating::float8) AS avg_delivery_speed, \
             COUNT(*) FILTER (WHERE rating = 5) AS rating_5_count, \
             COUNT(*) FILTER (WHERE rating = 4) AS rating_4_count, \
             COUNT(*) FILTER (WHERE rating = 3) AS rating_3_count, \
             COUNT(*) FILTER (WHERE rating = 2) AS rating_2_count, \
             COUNT(*) FILTER (WHERE rating = 1) AS rating_1_count \
             FROM ratings WHERE seller_id = $1",
        )
        .bind(seller_id)
        .fetch_one(pool)
        .await
    }
}
