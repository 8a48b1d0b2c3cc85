//! Route definitions for the `/users` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::user;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET  /me    -> get_me (requires auth)
/// PUT  /me    -> update_me (requires auth)
/// GET  /{id}  -> get_user (public)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/me", get(user::get_me).put(user::update_me))
        .route("/{id}", get(user::get_user))
}
