//! Administrator account model and DTOs.

use serde::Deserialize;
use sqlx::FromRow;
use marksheet_core::types::{DbId, Timestamp};

/// Full row from the `admin_users` table.
///
/// Carries the password hash, so it is deliberately not `Serialize`.
#[derive(Debug, Clone, FromRow)]
pub struct AdminUser {
    pub id: DbId,
    pub username: String,
    pub password_hash: String,
    pub created_at: Timestamp,
}

/// DTO for creating an administrator.
#[derive(Debug, Deserialize)]
pub struct CreateAdminUser {
    pub username: String,
    pub password_hash: String,
}
