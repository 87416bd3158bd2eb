//! Repository for the singleton `release_settings` row.

use sqlx::PgPool;

use crate::models::release_settings::{ReleaseSettingsRow, UpsertReleaseSettings};

const COLUMNS: &str = "release_at, site_title, updated_at";

/// Key of the only row the table may hold.
const SINGLETON_ID: i16 = 1;

/// Reads and writes the release settings record.
pub struct ReleaseSettingsRepo;

impl ReleaseSettingsRepo {
    /// Fetch the settings, or `None` if the schedule was never set.
    pub async fn get(pool: &PgPool) -> Result<Option<ReleaseSettingsRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM release_settings WHERE id = $1");
        sqlx::query_as::<_, ReleaseSettingsRow>(&query)
            .bind(SINGLETON_ID)
            .fetch_optional(pool)
            .await
    }

    /// Create or replace the settings row.
    ///
    /// `release_at` is always overwritten (so `None` clears it); `site_title`
    /// is only overwritten when provided.
    pub async fn upsert(
        pool: &PgPool,
        input: &UpsertReleaseSettings,
    ) -> Result<ReleaseSettingsRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO release_settings (id, release_at, site_title)
             VALUES ($1, $2, $3)
             ON CONFLICT (id) DO UPDATE SET
                release_at = EXCLUDED.release_at,
                site_title = COALESCE(EXCLUDED.site_title, release_settings.site_title),
                updated_at = NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ReleaseSettingsRow>(&query)
            .bind(SINGLETON_ID)
            .bind(input.release_at)
            .bind(&input.site_title)
            .fetch_one(pool)
            .await
    }
}
