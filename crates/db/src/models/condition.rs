//! Condition score entity model (one row per listing).

use serde::Serialize;
use sqlx::FromRow;

use kitab_core::types::{DbId, Timestamp};

/// A row from the `condition_scores` table.
///
/// The 15 booleans are the raw checklist answers; the five sub-scores, the
/// overall score, and the label are always recomputed together from them by
/// `kitab_core::condition::compute_scores` before the row is written. The row
/// is fully replaced on every submission, never patched field by field.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ConditionScore {
    pub id: DbId,
    pub listing_id: DbId,

    pub page_no_missing: bool,
    pub page_no_torn: bool,
    pub page_clean: bool,
    pub page_score: f64,

    pub binding_no_loose: bool,
    pub binding_no_falling: bool,
    pub binding_stable: bool,
    pub binding_score: f64,

    pub cover_no_detachment: bool,
    pub cover_clean: bool,
    pub cover_no_scratches: bool,
    pub cover_score: f64,

    pub damage_no_burns: bool,
    pub damage_no_smell: bool,
    pub damage_no_insects: bool,
    pub damage_score: f64,

    pub accessories_complete: bool,
    pub accessories_content: bool,
    pub accessories_extras: bool,
    pub accessories_score: f64,

    pub overall_score: f64,
    pub condition_label: String,

    pub market_price: Option<f64>,
    pub suggested_price: Option<f64>,

    pub has_photos: bool,
    pub photo_urls: Option<Vec<String>>,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Full set of columns written on every evaluation submission.
///
/// Built by the condition handler from the submitted checklist and the
/// computed `ScoreBreakdown`, then upserted as a single statement.
#[derive(Debug)]
pub struct NewConditionScore {
    pub listing_id: DbId,

    pub page_no_missing: bool,
    pub page_no_torn: bool,
    pub page_clean: bool,
    pub page_score: f64,

    pub binding_no_loose: bool,
    pub binding_no_falling: bool,
    pub binding_stable: bool,
    pub binding_score: f64,

    pub cover_no_detachment: bool,
    pub cover_clean: bool,
    pub cover_no_scratches: bool,
    pub cover_score: f64,

    pub damage_no_burns: bool,
    pub damage_no_smell: bool,
    pub damage_no_insects: bool,
    pub damage_score: f64,

    pub accessories_complete: bool,
    pub accessories_content: bool,
    pub accessories_extras: bool,
    pub accessories_score: f64,

    pub overall_score: f64,
    pub condition_label: String,

    pub market_price: Option<f64>,
    pub suggested_price: Option<f64>,

    pub has_photos: bool,
    pub photo_urls: Option<Vec<String>>,
}
