//! Stored student result model.

use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;
use marksheet_core::result::{Grade, ResultStatus, SubjectEntry};
use marksheet_core::types::{DbId, Timestamp};

/// A row from `student_results`, serialized with the public camelCase field
/// names.
///
/// `grade` and `status` are stored as their display labels (`"C+"`,
/// `"Fail Supply"`) and decoded back into the core enums.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentResult {
    pub id: DbId,
    pub class: String,
    pub name: String,
    pub father_name: String,
    pub normalized_name: String,
    pub normalized_father: String,
    pub subjects: Json<Vec<SubjectEntry>>,
    pub grand_total: i64,
    pub obtained_total: i64,
    pub percentage: f64,
    #[sqlx(try_from = "String")]
    pub grade: Grade,
    #[sqlx(try_from = "String")]
    pub status: ResultStatus,
    pub session: Option<String>,
    pub uploaded_by: String,
    pub uploaded_at: Timestamp,
}

/// Exact-match lookup keys. All three are already normalized.
#[derive(Debug, Clone)]
pub struct ResultLookup {
    pub class: String,
    pub normalized_name: String,
    pub normalized_father: String,
}
