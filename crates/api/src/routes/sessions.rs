//! Route definitions for operator sessions.
//!
//! Mounted at `/sessions`.
//!
//! ```text
//! POST   /                  create
//! GET    /{id}              get_by_id
//! DELETE /{id}              delete
//! POST   /{id}/generate     generate
//! GET    /{id}/video        download_video
//! ```

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{generation, sessions};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(sessions::create))
        .route("/{id}", get(sessions::get_by_id).delete(sessions::delete))
        .route("/{id}/generate", post(generation::generate))
        .route("/{id}/video", get(sessions::download_video))
}
