//! Startup tasks that run before the server accepts requests.

use marksheet_db::models::admin_user::CreateAdminUser;
use marksheet_db::repositories::AdminUserRepo;
use marksheet_db::DbPool;

use crate::auth::password::hash_password;
use crate::config::AdminSeed;
use crate::error::{AppError, AppResult};

/// Create the configured administrator if no account with that username exists.
///
/// An existing account is left untouched, so changing `ADMIN_PASS` later does
/// not reset a password. Returns `true` if the account was created.
pub async fn seed_admin(pool: &DbPool, seed: &AdminSeed) -> AppResult<bool> {
    if AdminUserRepo::find_by_username(pool, &seed.username)
        .await?
        .is_some()
    {
        tracing::debug!(username = %seed.username, "Admin account already present");
        return Ok(false);
    }

    let password_hash = hash_password(&seed.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let created = AdminUserRepo::create_if_absent(
        pool,
        &CreateAdminUser {
            username: seed.username.clone(),
            password_hash,
        },
    )
    .await?;

    if created {
        tracing::info!(username = %seed.username, "Seeded admin account");
    }
    Ok(created)
}
