//! Handlers for the `/condition` resource: checklist evaluation, stored
//! scores, summaries, and price suggestions.
//!
//! Scoring itself lives in `kitab_core::condition`; these handlers only
//! validate ownership, persist the result, and shape responses.

use axum::extract::{Path, Query, State};
use axum::Json;
use kitab_core::condition::{
    self, ConditionChecklist, ConditionLabel, ScoreBreakdown, CHECKS_PER_CATEGORY,
};
use kitab_core::error::CoreError;
use kitab_core::types::DbId;
use kitab_db::models::condition::NewConditionScore;
use kitab_db::models::listing::Listing;
use kitab_db::repositories::{ConditionRepo, ListingRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / query types
// ---------------------------------------------------------------------------

/// Request body for `POST /condition/evaluate/{listing_id}`.
///
/// The checklist categories are flattened into the body; any omitted check
/// defaults to `false`, so a sparse payload never inflates the score.
#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    #[serde(flatten)]
    pub checklist: ConditionChecklist,
    /// Reference market price for the price suggestion. Optional; omit it to
    /// skip the suggestion entirely.
    pub market_price: Option<f64>,
    /// Photo URLs supplied by the seller.
    #[serde(default)]
    pub photo_urls: Vec<String>,
}

/// Query parameters for `POST /condition/suggest-price/{listing_id}`.
#[derive(Debug, Deserialize)]
pub struct SuggestPriceQuery {
    pub market_price: Option<f64>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/condition/evaluate/{listing_id}
///
/// Score the submitted checklist and persist the evaluation for the listing.
/// Resubmission fully replaces the previous evaluation (last write wins).
/// Only the listing's seller may evaluate it.
pub async fn evaluate(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(listing_id): Path<DbId>,
    Json(input): Json<EvaluateRequest>,
) -> AppResult<Json<serde_json::Value>> {
    let listing = find_owned_listing(&state, listing_id, auth.user_id).await?;

    let breakdown = condition::compute_scores(&input.checklist);
    let market_price = input.market_price.filter(|p| *p > 0.0);
    let suggested_price = condition::suggest_price(breakdown.overall_score, market_price);
    let has_photos = !input.photo_urls.is_empty();

    let score = ConditionRepo::upsert(
        &state.pool,
        &new_score_row(
            listing.id,
            &input.checklist,
            &breakdown,
            market_price,
            suggested_price,
            has_photos,
            input.photo_urls,
        ),
    )
    .await?;

    tracing::info!(
        listing_id = listing.id,
        overall_score = breakdown.overall_score,
        label = %breakdown.label,
        "Condition evaluated"
    );

    Ok(Json(serde_json::json!({
        "data": {
            "score": score,
            "price_multiplier": breakdown.label.price_multiplier(),
        }
    })))
}

/// GET /api/v1/condition/score/{listing_id}
///
/// Return the stored evaluation for a listing, or 404 if it has none.
/// Public: buyers use this to judge a listing.
pub async fn get_score(
    State(state): State<AppState>,
    Path(listing_id): Path<DbId>,
) -> AppResult<Json<serde_json::Value>> {
    let score = ConditionRepo::find_by_listing(&state.pool, listing_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Condition evaluation",
            id: listing_id,
        }))?;

    Ok(Json(serde_json::json!({ "data": score })))
}

/// GET /api/v1/condition/summary/{listing_id}
///
/// Human-oriented summary of the stored evaluation: per-category pass counts,
/// improvement recommendations, and the price impact line.
pub async fn get_summary(
    State(state): State<AppState>,
    Path(listing_id): Path<DbId>,
) -> AppResult<Json<serde_json::Value>> {
    let score = ConditionRepo::find_by_listing(&state.pool, listing_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Condition evaluation",
            id: listing_id,
        }))?;

    let breakdown = ScoreBreakdown {
        page_score: score.page_score,
        binding_score: score.binding_score,
        cover_score: score.cover_score,
        damage_score: score.damage_score,
        accessories_score: score.accessories_score,
        overall_score: score.overall_score,
        label: ConditionLabel::from_score(score.overall_score),
    };
    let recommendations = condition::recommendations(&breakdown, score.has_photos);
    let price_impact = condition::price_impact(score.market_price, score.suggested_price);

    let passed = |a: bool, b: bool, c: bool| u32::from(a) + u32::from(b) + u32::from(c);

    Ok(Json(serde_json::json!({
        "data": {
            "listing_id": score.listing_id,
            "overall_score": score.overall_score,
            "condition_label": score.condition_label,
            "categories": {
                "pages": {
                    "score": score.page_score,
                    "checks_passed": passed(score.page_no_missing, score.page_no_torn, score.page_clean),
                    "checks_total": CHECKS_PER_CATEGORY,
                },
                "binding": {
                    "score": score.binding_score,
                    "checks_passed": passed(score.binding_no_loose, score.binding_no_falling, score.binding_stable),
                    "checks_total": CHECKS_PER_CATEGORY,
                },
                "cover": {
                    "score": score.cover_score,
                    "checks_passed": passed(score.cover_no_detachment, score.cover_clean, score.cover_no_scratches),
                    "checks_total": CHECKS_PER_CATEGORY,
                },
                "damage": {
                    "score": score.damage_score,
                    "checks_passed": passed(score.damage_no_burns, score.damage_no_smell, score.damage_no_insects),
                    "checks_total": CHECKS_PER_CATEGORY,
                },
                "accessories": {
                    "score": score.accessories_score,
                    "checks_passed": passed(score.accessories_complete, score.accessories_content, score.accessories_extras),
                    "checks_total": CHECKS_PER_CATEGORY,
                },
            },
            "recommendations": recommendations,
            "suggested_price": score.suggested_price,
            "price_impact": price_impact,
        }
    })))
}

/// POST /api/v1/condition/suggest-price/{listing_id}?market_price=X
///
/// Recompute and persist the price suggestion from the stored overall score
/// and a new market price. Only the listing's seller may call this.
pub async fn suggest_price(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(listing_id): Path<DbId>,
    Query(params): Query<SuggestPriceQuery>,
) -> AppResult<Json<serde_json::Value>> {
    let listing = find_owned_listing(&state, listing_id, auth.user_id).await?;

    let market_price = params
        .market_price
        .filter(|p| *p > 0.0)
        .ok_or_else(|| AppError::BadRequest("market_price must be a positive number".into()))?;

    let score = ConditionRepo::find_by_listing(&state.pool, listing.id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Condition evaluation",
            id: listing_id,
        }))?;

    let label = ConditionLabel::from_score(score.overall_score);
    let suggested = condition::round_price(market_price * label.price_multiplier());

    ConditionRepo::update_price_suggestion(&state.pool, listing.id, market_price, suggested)
        .await?;

    Ok(Json(serde_json::json!({
        "data": {
            "listing_id": listing.id,
            "overall_score": score.overall_score,
            "condition_label": label.as_str(),
            "market_price": market_price,
            "suggested_price": suggested,
            "price_multiplier": label.price_multiplier(),
        }
    })))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Fetch a listing and verify the caller owns it.
async fn find_owned_listing(
    state: &AppState,
    listing_id: DbId,
    user_id: DbId,
) -> AppResult<Listing> {
    let listing = ListingRepo::find_by_id(&state.pool, listing_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Listing",
            id: listing_id,
        }))?;

    if listing.seller_id != user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the seller can manage this listing's condition".into(),
        )));
    }

    Ok(listing)
}

/// Flatten a checklist + breakdown into the full column set for the upsert.
#[allow(clippy::too_many_arguments)]
fn new_score_row(
    listing_id: DbId,
    checklist: &ConditionChecklist,
    breakdown: &ScoreBreakdown,
    market_price: Option<f64>,
    suggested_price: Option<f64>,
    has_photos: bool,
    photo_urls: Vec<String>,
) -> NewConditionScore {
    NewConditionScore {
        listing_id,
        page_no_missing: checklist.pages.no_missing,
        page_no_torn: checklist.pages.no_torn,
        page_clean: checklist.pages.clean,
        page_score: breakdown.page_score,
        binding_no_loose: checklist.binding.no_loose,
        binding_no_falling: checklist.binding.no_falling,
        binding_stable: checklist.binding.stable,
        binding_score: breakdown.binding_score,
        cover_no_detachment: checklist.cover.no_detachment,
        cover_clean: checklist.cover.clean,
        cover_no_scratches: checklist.cover.no_scratches,
        cover_score: breakdown.cover_score,
        damage_no_burns: checklist.damage.no_burns,
        damage_no_smell: checklist.damage.no_smell,
        damage_no_insects: checklist.damage.no_insects,
        damage_score: breakdown.damage_score,
        accessories_complete: checklist.accessories.complete,
        accessories_content: checklist.accessories.content,
        accessories_extras: checklist.accessories.extras,
        accessories_score: breakdown.accessories_score,
        overall_score: breakdown.overall_score,
        condition_label: breakdown.label.as_str().to_string(),
        market_price,
        suggested_price,
        has_photos,
        photo_urls: if photo_urls.is_empty() {
            None
        } else {
            Some(photo_urls)
        },
    }
}
