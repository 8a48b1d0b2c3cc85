//! Route definitions for the `/condition` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::condition;
use crate::state::AppState;

/// Routes mounted at `/condition`.
///
/// ```text
/// POST /evaluate/{listing_id}       -> evaluate (owner)
/// GET  /score/{listing_id}          -> get_score (public)
/// GET  /summary/{listing_id}        -> get_summary (public)
/// POST /suggest-price/{listing_id}  -> suggest_price (owner)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/evaluate/{listing_id}", post(condition::evaluate))
        .route("/score/{listing_id}", get(condition::get_score))
        .route("/summary/{listing_id}", get(condition::get_summary))
        .route("/suggest-price/{listing_id}", post(condition::suggest_price))
}
