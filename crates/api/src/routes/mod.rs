pub mod admin;
pub mod auth;
pub mod health;
pub mod public;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                 login (public)
///
/// /admin/upload               upload result CSV (admin)
/// /admin/schedule             set release time and site title (admin)
/// /admin/clean                delete all results (admin)
/// /admin/status               stored result count (admin)
///
/// /status                     release status (public)
/// /result                     result lookup (public, gated)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/admin", admin::router())
        .merge(public::router())
}
