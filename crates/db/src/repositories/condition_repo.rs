//! Repository for the `condition_scores` table.

use sqlx::PgPool;

use kitab_core::types::DbId;

use crate::models::condition::{ConditionScore, NewConditionScore};

/// Column list for `condition_scores` queries.
const COLUMNS: &str = "id, listing_id, \
     page_no_missing, page_no_torn, page_clean, page_score, \
     binding_no_loose, binding_no_falling, binding_stable, binding_score, \
     cover_no_detachment, cover_clean, cover_no_scratches, cover_score, \
     damage_no_burns, damage_no_smell, damage_no_insects, damage_score, \
     accessories_complete, accessories_content, accessories_extras, accessories_score, \
     overall_score, condition_label, market_price, suggested_price, \
     has_photos, photo_urls, created_at, updated_at";

/// Provides persistence for condition evaluations.
pub struct ConditionRepo;

impl ConditionRepo {
    /// Insert or fully replace the evaluation for a listing.
    ///
    /// A single atomic statement: concurrent submissions for the same listing
    /// resolve as last-write-wins, with no torn row (all scores and the label
    /// come from the same submission).
    pub async fn upsert(
        pool: &PgPool,
        new: &NewConditionScore,
    ) -> Result<ConditionScore, sqlx::Error> {
        let query = format!(
            "INSERT INTO condition_scores (listing_id, \
             page_no_missing, page_no_torn, page_clean, page_score, \
             binding_no_loose, binding_no_falling, binding_stable, binding_score, \
             cover_no_detachment, cover_clean, cover_no_scratches, cover_score, \
             damage_no_burns, damage_no_smell, damage_no_insects, damage_score, \
             accessories_complete, accessories_content, accessories_extras, accessories_score, \
             overall_score, condition_label, market_price, suggested_price, \
             has_photos, photo_urls) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, \
             $17, $18, $19, $20, $21, $22, $23, $24, $25, $26, $27) \
             ON CONFLICT (listing_id) DO UPDATE SET \
             page_no_missing = EXCLUDED.page_no_missing, \
             page_no_torn = EXCLUDED.page_no_torn, \
             page_clean = EXCLUDED.page_clean, \
             page_score = EXCLUDED.page_score, \
             binding_no_loose = EXCLUDED.binding_no_loose, \
             binding_no_falling = EXCLUDED.binding_no_falling, \
             binding_stable = EXCLUDED.binding_stable, \
             binding_score = EXCLUDED.binding_score, \
             cover_no_detachment = EXCLUDED.cover_no_detachment, \
             cover_clean = EXCLUDED.cover_clean, \
             cover_no_scratches = EXCLUDED.cover_no_scratches, \
             cover_score = EXCLUDED.cover_score, \
             damage_no_burns = EXCLUDED.damage_no_burns, \
             damage_no_smell = EXCLUDED.damage_no_smell, \
             damage_no_insects = EXCLUDED.damage_no_insects, \
             damage_score = EXCLUDED.damage_score, \
             accessories_complete = EXCLUDED.accessories_complete, \
             accessories_content = EXCLUDED.accessories_content, \
             accessories_extras = EXCLUDED.accessories_extras, \
             accessories_score = EXCLUDED.accessories_score, \
             overall_score = EXCLUDED.overall_score, \
             condition_label = EXCLUDED.condition_label, \
             market_price = EXCLUDED.market_price, \
             suggested_price = EXCLUDED.suggested_price, \
             has_photos = EXCLUDED.has_photos, \
             photo_urls = EXCLUDED.photo_urls, \
             updated_at = NOW() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ConditionScore>(&query)
            .bind(new.listing_id)
            .bind(new.page_no_missing)
            .bind(new.page_no_torn)
            .bind(new.page_clean)
            .bind(new.page_score)
            .bind(new.binding_no_loose)
            .bind(new.binding_no_falling)
            .bind(new.binding_stable)
            .bind(new.binding_score)
            .bind(new.cover_no_detachment)
            .bind(new.cover_clean)
            .bind(new.cover_no_scratches)
            .bind(new.cover_score)
            .bind(new.damage_no_burns)
            .bind(new.damage_no_smell)
            .bind(new.damage_no_insects)
            .bind(new.damage_score)
            .bind(new.accessories_complete)
            .bind(new.accessories_content)
            .bind(new.accessories_extras)
            .bind(new.accessories_score)
            .bind(new.overall_score)
            .bind(&new.condition_label)
            .bind(new.market_price)
            .bind(new.suggested_price)
            .bind(new.has_photos)
            .bind(&new.photo_urls)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_listing(
        pool: &PgPool,
        listing_id: DbId,
    ) -> Result<Option<ConditionScore>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM condition_scores WHERE listing_id = $1");
        sqlx::query_as::<_, ConditionScore>(&query)
            .bind(listing_id)
            .fetch_optional(pool)
            .await
    }

    /// Persist a recomputed price suggestion without touching the checklist.
    pub async fn update_price_suggestion(
        pool: &PgPool,
        listing_id: DbId,
        market_price: f64,
        suggested_price: f64,
    ) -> Result<Option<ConditionScore>, sqlx::Error> {
        let query = format!(
            "UPDATE condition_scores \
             SET market_price = $2, suggested_price = $3, updated_at = NOW() \
             WHERE listing_id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ConditionScore>(&query)
            .bind(listing_id)
            .bind(market_price)
            .bind(suggested_price)
            .fetch_optional(pool)
            .await
    }
}
