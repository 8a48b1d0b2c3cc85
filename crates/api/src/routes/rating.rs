//! Route definitions for the `/ratings` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::rating;
use crate::state::AppState;

/// Routes mounted at `/ratings`.
///
/// ```text
/// POST /                    -> create_rating
/// GET  /seller/{id}         -> list_seller_ratings (public)
/// GET  /seller/{id}/stats   -> seller_stats (public)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(rating::create_rating))
        .route("/seller/{id}", get(rating::list_seller_ratings))
        .route("/seller/{id}/stats", get(rating::seller_stats))
}
