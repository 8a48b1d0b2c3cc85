//! Handlers for the `/listings` resource: CRUD, search, and status
//! transitions.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use kitab_core::error::CoreError;
use kitab_core::listing::{DeclaredCondition, ListingStatus};
use kitab_core::notification;
use kitab_core::types::DbId;
use kitab_db::models::listing::{Listing, ListingFilter, NewListing, UpdateListing};
use kitab_db::repositories::{FavoriteRepo, ListingRepo, NotificationRepo};
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Maximum page size for listing search.
const MAX_LIMIT: i64 = 100;

/// Default page size for listing search.
const DEFAULT_LIMIT: i64 = 20;

// ---------------------------------------------------------------------------
// Request / query types
// ---------------------------------------------------------------------------

/// Request body for `POST /listings`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateListingRequest {
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,
    pub author: Option<String>,
    pub isbn: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 0.0, message = "Price must not be negative"))]
    pub price: f64,
    /// One of `new`, `like_new`, `good`, `acceptable`, `worn`.
    pub declared_condition: String,
}

/// Query parameters for `GET /listings`.
#[derive(Debug, Deserialize)]
pub struct ListingQuery {
    pub status: Option<String>,
    pub seller_id: Option<DbId>,
    /// Case-insensitive substring match on title or author.
    pub search: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

/// POST /api/v1/listings
///
/// Create a listing owned by the authenticated user. New listings start
/// `active`.
pub async fn create_listing(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateListingRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Listing>>)> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;

    let declared = DeclaredCondition::parse(&input.declared_condition)?;

    let listing = ListingRepo::create(
        &state.pool,
        &NewListing {
            seller_id: auth.user_id,
            title: input.title,
            author: input.author,
            isbn: input.isbn,
            description: input.description,
            price: input.price,
            declared_condition: declared.as_str().to_string(),
        },
    )
    .await?;

    tracing::info!(listing_id = listing.id, seller_id = auth.user_id, "Listing created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: listing })))
}

/// GET /api/v1/listings
///
/// Search listings with optional filters. Public.
pub async fn list_listings(
    State(state): State<AppState>,
    Query(params): Query<ListingQuery>,
) -> AppResult<Json<DataResponse<Vec<Listing>>>> {
    if let Some(status) = &params.status {
        ListingStatus::parse(status)?;
    }

    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let offset = params.offset.unwrap_or(0).max(0);

    let filter = ListingFilter {
        status: params.status,
        seller_id: params.seller_id,
        search: params.search,
        min_price: params.min_price,
        max_price: params.max_price,
    };

    let listings = ListingRepo::list(&state.pool, &filter, limit, offset).await?;
    Ok(Json(DataResponse { data: listings }))
}

/// GET /api/v1/listings/{id}
pub async fn get_listing(
    State(state): State<AppState>,
    Path(listing_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Listing>>> {
    let listing = ListingRepo::find_by_id(&state.pool, listing_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Listing",
            id: listing_id,
        }))?;
    Ok(Json(DataResponse { data: listing }))
}

/// PUT /api/v1/listings/{id}
///
/// Update listing fields. Owner only. A price reduction notifies every user
/// who favorited the listing.
pub async fn update_listing(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(listing_id): Path<DbId>,
    Json(input): Json<UpdateListing>,
) -> AppResult<Json<DataResponse<Listing>>> {
    let existing = find_owned_listing(&state, listing_id, auth.user_id).await?;

    if let Some(price) = input.price {
        if price < 0.0 {
            return Err(AppError::Core(CoreError::Validation(
                "Price must not be negative".into(),
            )));
        }
    }
    if let Some(declared) = &input.declared_condition {
        DeclaredCondition::parse(declared)?;
    }

    let updated = ListingRepo::update(&state.pool, listing_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Listing",
            id: listing_id,
        }))?;

    // Price-drop fan-out to favoriters.
    if updated.price < existing.price {
        notify_favoriters_of_price_drop(&state, &existing, updated.price).await?;
    }

    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/listings/{id}
///
/// Delete a listing. Owner only. Condition score, favorites, and ratings are
/// removed by the database cascade.
pub async fn delete_listing(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(listing_id): Path<DbId>,
) -> AppResult<StatusCode> {
    find_owned_listing(&state, listing_id, auth.user_id).await?;
    ListingRepo::delete(&state.pool, listing_id).await?;
    tracing::info!(listing_id, "Listing deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Status transitions
// ---------------------------------------------------------------------------

/// POST /api/v1/listings/{id}/mark-sold
pub async fn mark_sold(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(listing_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Listing>>> {
    transition_status(&state, listing_id, auth.user_id, ListingStatus::Sold).await
}

/// POST /api/v1/listings/{id}/mark-reserved
pub async fn mark_reserved(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(listing_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Listing>>> {
    transition_status(&state, listing_id, auth.user_id, ListingStatus::Reserved).await
}

/// POST /api/v1/listings/{id}/reactivate
pub async fn reactivate(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(listing_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Listing>>> {
    transition_status(&state, listing_id, auth.user_id, ListingStatus::Active).await
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
            "Only the seller can modify this listing".into(),
        )));
    }

    Ok(listing)
}

/// Apply a status transition after checking the transition table, then notify
/// favoriters when the listing leaves the market.
async fn transition_status(
    state: &AppState,
    listing_id: DbId,
    user_id: DbId,
    next: ListingStatus,
) -> AppResult<Json<DataResponse<Listing>>> {
    let listing = find_owned_listing(state, listing_id, user_id).await?;
    let current = ListingStatus::parse(&listing.status)?;

    if !current.can_transition_to(next) {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Cannot change listing status from {} to {}",
            current.as_str(),
            next.as_str()
        ))));
    }

    let updated = ListingRepo::set_status(&state.pool, listing_id, next.as_str())
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Listing",
            id: listing_id,
        }))?;

    tracing::info!(listing_id, status = next.as_str(), "Listing status changed");

    let kind = match next {
        ListingStatus::Sold => Some(notification::KIND_LISTING_SOLD),
        ListingStatus::Reserved => Some(notification::KIND_LISTING_RESERVED),
        _ => None,
    };
    if let Some(kind) = kind {
        let favoriters = FavoriteRepo::user_ids_for_listing(&state.pool, listing_id).await?;
        let verb = if next == ListingStatus::Sold {
            "was sold"
        } else {
            "is now reserved"
        };
        for user_id in favoriters {
            NotificationRepo::create(
                &state.pool,
                user_id,
                kind,
                "A favorite is no longer available",
                &format!("\"{}\" {verb}", listing.title),
                Some(listing_id),
            )
            .await?;
        }
    }

    Ok(Json(DataResponse { data: updated }))
}

/// Notify every user who favorited `listing` that its price dropped.
async fn notify_favoriters_of_price_drop(
    state: &AppState,
    listing: &Listing,
    new_price: f64,
) -> AppResult<()> {
    let favoriters = FavoriteRepo::user_ids_for_listing(&state.pool, listing.id).await?;
    let (title, body) = notification::price_drop_message(&listing.title, listing.price, new_price);
    for user_id in favoriters {
        NotificationRepo::create(
            &state.pool,
            user_id,
            notification::KIND_PRICE_DROP,
            &title,
            &body,
            Some(listing.id),
        )
        .await?;
    }
    Ok(())
}
