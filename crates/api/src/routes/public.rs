//! Public route definitions (no authentication).

use axum::routing::get;
use axum::Router;

use crate::handlers::public;
use crate::state::AppState;

/// Routes merged at the `/api/v1` root.
///
/// ```text
/// GET /status    -> status
/// GET /result    -> lookup
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/status", get(public::status))
        .route("/result", get(public::lookup))
}
