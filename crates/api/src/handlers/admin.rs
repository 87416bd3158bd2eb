//! Handlers for the `/admin` resource: result upload, release schedule,
//! bulk delete, and record count.

use std::path::Path;

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use marksheet_core::ingest::{ingest_batch, IngestSummary};
use marksheet_core::sheet::Sheet;
use marksheet_db::models::release_settings::{ReleaseSettingsRow, UpsertReleaseSettings};
use marksheet_db::repositories::{ReleaseSettingsRepo, StudentResultRepo};
use marksheet_db::PgResultStore;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AdminUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Multipart field carrying the CSV file.
pub const CSV_FIELD: &str = "csv";

/// Optional multipart text field with the batch session label.
pub const SESSION_FIELD: &str = "session";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /admin/schedule`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRequest {
    /// RFC 3339 timestamp. Absent, null, or empty clears the release time.
    pub release_at: Option<String>,
    /// Omitted keeps the stored title.
    pub site_title: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CleanResult {
    pub deleted: u64,
}

#[derive(Debug, Serialize)]
pub struct ResultCount {
    pub count: i64,
}

// ---------------------------------------------------------------------------
// Upload
// ---------------------------------------------------------------------------

/// Create an empty staging file in `dir`. The file is removed when the
/// returned guard drops.
async fn stage_upload(dir: &Path) -> AppResult<NamedTempFile> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to create upload dir: {e}")))?;

    tempfile::Builder::new()
        .prefix("marks-")
        .suffix(".csv")
        .tempfile_in(dir)
        .map_err(|e| AppError::InternalError(format!("Failed to create staging file: {e}")))
}

/// POST /api/v1/admin/upload
///
/// Accept a multipart CSV (`csv` field, optional `session` field), derive a
/// result per data row, and store the batch atomically.
pub async fn upload(
    State(state): State<AppState>,
    admin: AdminUser,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<IngestSummary>>)> {
    let mut staged: Option<(NamedTempFile, u64)> = None;
    let mut session: Option<String> = None;

    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some(CSV_FIELD) => {
                if staged.is_some() {
                    return Err(AppError::BadRequest(
                        "Only one CSV file may be uploaded at a time".into(),
                    ));
                }

                let file = stage_upload(&state.config.upload_dir).await?;
                let mut out = tokio::fs::File::create(file.path())
                    .await
                    .map_err(|e| AppError::InternalError(e.to_string()))?;

                let mut size: u64 = 0;
                while let Some(chunk) = field
                    .chunk()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?
                {
                    size += chunk.len() as u64;
                    out.write_all(&chunk)
                        .await
                        .map_err(|e| AppError::InternalError(e.to_string()))?;
                }
                out.flush()
                    .await
                    .map_err(|e| AppError::InternalError(e.to_string()))?;

                staged = Some((file, size));
            }
            Some(SESSION_FIELD) => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                session = Some(text);
            }
            _ => {}
        }
    }

    let Some((file, size)) = staged else {
        return Err(AppError::BadRequest("No file uploaded".into()));
    };
    if size == 0 {
        return Err(AppError::BadRequest("Uploaded file is empty".into()));
    }

    let bytes = tokio::fs::read(file.path())
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to read staged upload: {e}")))?;
    let sheet = Sheet::from_csv_bytes(&bytes)?;

    tracing::debug!(
        rows = sheet.rows.len(),
        columns = sheet.headers.len(),
        staged = %file.path().display(),
        "Decoded uploaded sheet"
    );

    let store = PgResultStore::new(state.pool.clone());
    let summary = ingest_batch(&store, &sheet, &admin.username, session.as_deref()).await?;

    tracing::info!(
        inserted = summary.inserted,
        subjects = summary.subjects.len(),
        uploaded_by = %admin.username,
        session = session.as_deref().unwrap_or(""),
        "Batch ingested"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: summary })))
}

// ---------------------------------------------------------------------------
// Schedule
// ---------------------------------------------------------------------------

/// Parse the optional release time. Blank means "no release time".
fn parse_release_at(raw: Option<&str>) -> AppResult<Option<DateTime<Utc>>> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(s) => DateTime::parse_from_rfc3339(s)
            .map(|dt| Some(dt.with_timezone(&Utc)))
            .map_err(|_| {
                AppError::BadRequest(format!("releaseAt must be an RFC 3339 timestamp, got {s:?}"))
            }),
    }
}

/// POST /api/v1/admin/schedule
///
/// Set or clear the release time and optionally the site title.
pub async fn schedule(
    State(state): State<AppState>,
    admin: AdminUser,
    Json(input): Json<ScheduleRequest>,
) -> AppResult<Json<DataResponse<ReleaseSettingsRow>>> {
    let release_at = parse_release_at(input.release_at.as_deref())?;

    let saved = ReleaseSettingsRepo::upsert(
        &state.pool,
        &UpsertReleaseSettings {
            release_at,
            site_title: input.site_title,
        },
    )
    .await?;

    tracing::info!(
        release_at = ?saved.release_at,
        updated_by = %admin.username,
        "Release schedule updated"
    );

    Ok(Json(DataResponse { data: saved }))
}

// ---------------------------------------------------------------------------
// Clean / status
// ---------------------------------------------------------------------------

/// POST /api/v1/admin/clean
///
/// Delete every stored result.
pub async fn clean(
    State(state): State<AppState>,
    admin: AdminUser,
) -> AppResult<Json<DataResponse<CleanResult>>> {
    let deleted = StudentResultRepo::delete_all(&state.pool).await?;
    tracing::warn!(deleted, cleaned_by = %admin.username, "All results deleted");
    Ok(Json(DataResponse {
        data: CleanResult { deleted },
    }))
}

/// GET /api/v1/admin/status
///
/// Number of stored results.
pub async fn status(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> AppResult<Json<DataResponse<ResultCount>>> {
    let count = StudentResultRepo::count_all(&state.pool).await?;
    Ok(Json(DataResponse {
        data: ResultCount { count },
    }))
}
