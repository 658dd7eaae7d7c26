pub mod health;
pub mod options;
pub mod page;
pub mod sessions;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /options                      form choices and defaults (GET)
///
/// /sessions                     create (POST)
/// /sessions/{id}                get, delete
/// /sessions/{id}/generate       generate promo video (POST, multipart)
/// /sessions/{id}/video          download promo video (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/options", options::router())
        .nest("/sessions", sessions::router())
}
