use axum::routing::get;
use axum::Router;

use crate::handlers::options;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(options::get_options))
}
