//! Singleton release settings row.

use serde::Serialize;
use sqlx::FromRow;
use marksheet_core::release::ReleaseSettings;
use marksheet_core::types::Timestamp;

/// The single row of `release_settings`.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseSettingsRow {
    pub release_at: Option<Timestamp>,
    pub site_title: Option<String>,
    pub updated_at: Timestamp,
}

impl From<ReleaseSettingsRow> for ReleaseSettings {
    fn from(row: ReleaseSettingsRow) -> Self {
        Self {
            release_at: row.release_at,
            site_title: row.site_title,
        }
    }
}

/// Values written by the schedule operation.
///
/// `release_at: None` clears the gate. `site_title: None` keeps the stored title.
#[derive(Debug, Clone, Default)]
pub struct UpsertReleaseSettings {
    pub release_at: Option<Timestamp>,
    pub site_title: Option<String>,
}
