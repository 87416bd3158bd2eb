//! Repository for the `admin_users` table.

use sqlx::PgPool;

use crate::models::admin_user::{AdminUser, CreateAdminUser};

const COLUMNS: &str = "id, username, password_hash, created_at";

/// Provides lookup and creation of administrator accounts.
pub struct AdminUserRepo;

impl AdminUserRepo {
    /// Insert a new administrator, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateAdminUser) -> Result<AdminUser, sqlx::Error> {
        let query = format!(
            "INSERT INTO admin_users (username, password_hash)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AdminUser>(&query)
            .bind(&input.username)
            .bind(&input.password_hash)
            .fetch_one(pool)
            .await
    }

    /// Find an administrator by username (case-sensitive).
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<AdminUser>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM admin_users WHERE username = $1");
        sqlx::query_as::<_, AdminUser>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// Insert an administrator unless the username is taken.
    ///
    /// Returns `true` if a row was created.
    pub async fn create_if_absent(
        pool: &PgPool,
        input: &CreateAdminUser,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO admin_users (username, password_hash)
             VALUES ($1, $2)
             ON CONFLICT (username) DO NOTHING",
        )
        .bind(&input.username)
        .bind(&input.password_hash)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
