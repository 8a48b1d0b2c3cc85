pub mod auth;
pub mod condition;
pub mod favorite;
pub mod health;
pub mod listing;
pub mod message;
pub mod notification;
pub mod rating;
pub mod user;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                          register (public)
/// /auth/login                             login (public)
/// /auth/refresh                           refresh (public)
/// /auth/logout                            logout (requires auth)
///
/// /users/me                               get, update own profile
/// /users/{id}                             public profile
///
/// /listings                               search (public), create
/// /listings/{id}                          get (public), update, delete
/// /listings/{id}/mark-sold                status transition (POST)
/// /listings/{id}/mark-reserved            status transition (POST)
/// /listings/{id}/reactivate               status transition (POST)
///
/// /condition/evaluate/{listing_id}        score checklist + persist (POST, owner)
/// /condition/score/{listing_id}           stored evaluation (GET, public)
/// /condition/summary/{listing_id}         summary + recommendations (GET, public)
/// /condition/suggest-price/{listing_id}   recompute price suggestion (POST, owner)
///
/// /ratings                                rate a seller (POST)
/// /ratings/seller/{id}                    ratings received (GET, public)
/// /ratings/seller/{id}/stats              aggregate stats (GET, public)
///
/// /conversations                          list, start
/// /conversations/{id}/messages            list + mark read, send
/// /messages/unread-count                  unread messages (GET)
///
/// /favorites                              list
/// /favorites/{listing_id}                 add (POST), remove (DELETE)
///
/// /notifications                          list
/// /notifications/read-all                 mark all read (POST)
/// /notifications/unread-count             unread count (GET)
/// /notifications/{id}/read                mark read (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/users", user::router())
        .nest("/listings", listing::router())
        .nest("/condition", condition::router())
        .nest("/ratings", rating::router())
        .merge(message::router())
        .nest("/favorites", favorite::router())
        .nest("/notifications", notification::router())
}
