//! Handlers for the `/favorites` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use kitab_core::error::CoreError;
use kitab_core::types::DbId;
use kitab_db::models::listing::Listing;
use kitab_db::repositories::{FavoriteRepo, ListingRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/favorites/{listing_id}
///
/// Add a listing to the caller's favorites. Idempotent: favoriting twice is
/// not an error. Returns 201 when created, 200 when it already existed.
pub async fn add_favorite(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(listing_id): Path<DbId>,
) -> AppResult<StatusCode> {
    let listing = ListingRepo::find_by_id(&state.pool, listing_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Listing",
            id: listing_id,
        }))?;

    if listing.seller_id == auth.user_id {
        return Err(AppError::Core(CoreError::Validation(
            "You cannot favorite your own listing".into(),
        )));
    }

    let created = FavoriteRepo::add(&state.pool, auth.user_id, listing_id).await?;
    Ok(if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    })
}

/// DELETE /api/v1/favorites/{listing_id}
///
/// Remove a listing from the caller's favorites.
pub async fn remove_favorite(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(listing_id): Path<DbId>,
) -> AppResult<StatusCode> {
    let removed = FavoriteRepo::remove(&state.pool, auth.user_id, listing_id).await?;
    if !removed {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Favorite",
            id: listing_id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/favorites
///
/// The caller's favorited listings, most recently favorited first.
pub async fn list_favorites(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Listing>>>> {
    let listings = FavoriteRepo::list_for_user(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: listings }))
}
