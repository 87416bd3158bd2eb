//! Public handlers: release status and result lookup.

use axum::extract::{Query, State};
use axum::Json;
use chrono::Utc;
use marksheet_core::class_label::normalize_class;
use marksheet_core::error::CoreError;
use marksheet_core::normalize::normalize;
use marksheet_core::release::{is_released, ReleaseSettings};
use marksheet_core::types::Timestamp;
use marksheet_db::models::student_result::{ResultLookup, StudentResult};
use marksheet_db::repositories::{ReleaseSettingsRepo, StudentResultRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Response for `GET /status`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicStatus {
    /// Whether the lookup form should be shown (release time reached).
    pub show_input: bool,
    pub release_at: Option<Timestamp>,
    pub site_title: Option<String>,
    pub db_empty: bool,
}

/// Query string for `GET /result`.
#[derive(Debug, Deserialize)]
pub struct ResultQuery {
    pub class: Option<String>,
    pub name: Option<String>,
    pub father: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LookupResults {
    pub results: Vec<StudentResult>,
}

async fn load_settings(state: &AppState) -> AppResult<Option<ReleaseSettings>> {
    let row = ReleaseSettingsRepo::get(&state.pool).await?;
    Ok(row.map(ReleaseSettings::from))
}

/// Non-blank value of a required query parameter.
fn required(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/status
pub async fn status(State(state): State<AppState>) -> AppResult<Json<DataResponse<PublicStatus>>> {
    let settings = load_settings(&state).await?;
    let count = StudentResultRepo::count_all(&state.pool).await?;

    let show_input = is_released(settings.as_ref(), Utc::now());
    let settings = settings.unwrap_or_default();

    Ok(Json(DataResponse {
        data: PublicStatus {
            show_input,
            release_at: settings.release_at,
            site_title: settings.site_title,
            db_empty: count == 0,
        },
    }))
}

/// GET /api/v1/result?class=&name=&father=
///
/// Exact match on canonical class and normalized name and father name.
/// No match is an empty list, not an error.
pub async fn lookup(
    State(state): State<AppState>,
    Query(params): Query<ResultQuery>,
) -> AppResult<Json<DataResponse<LookupResults>>> {
    let (Some(class), Some(name), Some(father)) = (
        required(params.class.as_deref()),
        required(params.name.as_deref()),
        required(params.father.as_deref()),
    ) else {
        return Err(AppError::BadRequest(
            "class, name and father are all required".into(),
        ));
    };

    let settings = load_settings(&state).await?;
    if !is_released(settings.as_ref(), Utc::now()) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Results have not been released yet".into(),
        )));
    }

    let key = ResultLookup {
        class: normalize_class(Some(class)),
        normalized_name: normalize(Some(name)),
        normalized_father: normalize(Some(father)),
    };
    let results = StudentResultRepo::find_by_lookup(&state.pool, &key).await?;

    tracing::debug!(class = %key.class, matches = results.len(), "Result lookup");

    Ok(Json(DataResponse {
        data: LookupResults { results },
    }))
}
