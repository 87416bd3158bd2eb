//! Route definitions for the `/admin` resource. Every route requires a
//! valid admin token.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Largest accepted upload body.
const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Routes mounted at `/admin`.
///
/// ```text
/// POST /upload     -> upload (multipart)
/// POST /schedule   -> schedule
/// POST /clean      -> clean
/// GET  /status     -> status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/upload",
            post(admin::upload).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/schedule", post(admin::schedule))
        .route("/clean", post(admin::clean))
        .route("/status", get(admin::status))
}
