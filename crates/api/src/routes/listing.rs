//! Route definitions for the `/listings` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::listing;
use crate::state::AppState;

/// Routes mounted at `/listings`.
///
/// ```text
/// GET    /                     -> list_listings (public)
/// POST   /                     -> create_listing
/// GET    /{id}                 -> get_listing (public)
/// PUT    /{id}                 -> update_listing (owner)
/// DELETE /{id}                 -> delete_listing (owner)
/// POST   /{id}/mark-sold       -> mark_sold (owner)
/// POST   /{id}/mark-reserved   -> mark_reserved (owner)
/// POST   /{id}/reactivate      -> reactivate (owner)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(listing::list_listings).post(listing::create_listing),
        )
        .route(
            "/{id}",
            get(listing::get_listing)
                .put(listing::update_listing)
                .delete(listing::delete_listing),
        )
        .route("/{id}/mark-sold", post(listing::mark_sold))
        .route("/{id}/mark-reserved", post(listing::mark_reserved))
        .route("/{id}/reactivate", post(listing::reactivate))
}
