//! Handlers for the `/ratings` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use kitab_core::error::CoreError;
use kitab_core::notification;
use kitab_core::types::DbId;
use kitab_db::models::rating::{NewRating, Rating, SellerStats};
use kitab_db::repositories::{ListingRepo, NotificationRepo, RatingRepo};
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Maximum page size for rating listing.
const MAX_LIMIT: i64 = 100;

/// Default page size for rating listing.
const DEFAULT_LIMIT: i64 = 20;

// ---------------------------------------------------------------------------
// Request / query types
// ---------------------------------------------------------------------------

/// Request body for `POST /ratings`.
///
/// The seller is derived from the listing, never supplied by the client.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateRatingRequest {
    pub listing_id: DbId,
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i32,
    pub comment: Option<String>,
    #[validate(range(min = 1, max = 5, message = "Communication rating must be between 1 and 5"))]
    pub communication_rating: Option<i32>,
    #[validate(range(
        min = 1,
        max = 5,
        message = "Condition accuracy rating must be between 1 and 5"
    ))]
    pub condition_accuracy_rating: Option<i32>,
    #[validate(range(min = 1, max = 5, message = "Delivery speed rating must be between 1 and 5"))]
    pub delivery_speed_rating: Option<i32>,
}

/// Pagination for `GET /ratings/seller/{id}`.
#[derive(Debug, Deserialize)]
pub struct RatingQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/ratings
///
/// Rate the seller of a listing. One rating per buyer per listing (a second
/// one surfaces as 409). Sellers cannot rate themselves.
pub async fn create_rating(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateRatingRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Rating>>)> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;

    let listing = ListingRepo::find_by_id(&state.pool, input.listing_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Listing",
            id: input.listing_id,
        }))?;

    if listing.seller_id == auth.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "You cannot rate your own listing".into(),
        )));
    }

    let rating = RatingRepo::create(
        &state.pool,
        &NewRating {
            buyer_id: auth.user_id,
            seller_id: listing.seller_id,
            listing_id: listing.id,
            rating: input.rating,
            comment: input.comment,
            communication_rating: input.communication_rating,
            condition_accuracy_rating: input.condition_accuracy_rating,
            delivery_speed_rating: input.delivery_speed_rating,
        },
    )
    .await?;

    let (title, body) = notification::new_rating_message(&auth.username, rating.rating);
    NotificationRepo::create(
        &state.pool,
        listing.seller_id,
        notification::KIND_NEW_RATING,
        &title,
        &body,
        Some(listing.id),
    )
    .await?;

    tracing::info!(
        rating_id = rating.id,
        seller_id = listing.seller_id,
        stars = rating.rating,
        "Rating created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: rating })))
}

/// GET /api/v1/ratings/seller/{id}
///
/// Ratings received by a seller, newest first. Public.
pub async fn list_seller_ratings(
    State(state): State<AppState>,
    Path(seller_id): Path<DbId>,
    Query(params): Query<RatingQuery>,
) -> AppResult<Json<DataResponse<Vec<Rating>>>> {
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let offset = params.offset.unwrap_or(0).max(0);

    let ratings = RatingRepo::list_for_seller(&state.pool, seller_id, limit, offset).await?;
    Ok(Json(DataResponse { data: ratings }))
}

/// GET /api/v1/ratings/seller/{id}/stats
///
/// Aggregate rating statistics for a seller (averages, per-star counts),
/// computed in SQL. Public.
pub async fn seller_stats(
    State(state): State<AppState>,
    Path(seller_id): Path<DbId>,
) -> AppResult<Json<DataResponse<SellerStats>>> {
    let stats = RatingRepo::stats_for_seller(&state.pool, seller_id).await?;
    Ok(Json(DataResponse { data: stats }))
}
