//! Route definitions for the `/favorites` resource.
//!
//! All endpoints require authentication.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::favorite;
use crate::state::AppState;

/// Routes mounted at `/favorites`.
///
/// ```text
/// GET    /               -> list_favorites
/// POST   /{listing_id}   -> add_favorite
/// DELETE /{listing_id}   -> remove_favorite
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(favorite::list_favorites))
        .route(
            "/{listing_id}",
            post(favorite::add_favorite).delete(favorite::remove_favorite),
        )
}
