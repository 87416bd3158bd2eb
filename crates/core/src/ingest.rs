//! Batch ingestion coordinator.
//!
//! Drives the derivation engine across every row of an uploaded sheet and
//! hands the resulting records to storage in a single call, so a store that
//! wraps the call in a transaction gets all-or-nothing semantics.

use serde::Serialize;

use crate::columns::classify_columns;
use crate::derivation::derive_row;
use crate::result::DerivedResult;
use crate::sheet::Sheet;

// ---------------------------------------------------------------------------
// Store seam
// ---------------------------------------------------------------------------

/// Storage backend for derived results.
///
/// `insert_batch` must be atomic: either every record is persisted or none.
pub trait ResultStore: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Persist all records, returning the number inserted.
    fn insert_batch(
        &self,
        records: &[DerivedResult],
    ) -> impl std::future::Future<Output = Result<u64, Self::Error>> + Send;
}

// ---------------------------------------------------------------------------
// Errors and summary
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// The sheet had a header row but no data rows.
    #[error("Uploaded sheet contains no data rows")]
    EmptyUpload,

    /// The store rejected the batch; nothing was persisted.
    #[error("Failed to store results: {0}")]
    Store(String),
}

/// Outcome of a successful ingest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestSummary {
    pub inserted: u64,
    /// Subject names recognised in the header row.
    pub subjects: Vec<String>,
    /// Headers that did not contribute to any field or subject.
    pub ignored_columns: Vec<String>,
}

// ---------------------------------------------------------------------------
// Coordinator
// ---------------------------------------------------------------------------

/// Derive one record per data row, in row order.
///
/// A blank `session` is treated as no session.
pub fn prepare_batch(
    sheet: &Sheet,
    uploaded_by: &str,
    session: Option<&str>,
) -> Result<(Vec<DerivedResult>, IngestSummary), IngestError> {
    if sheet.is_empty() {
        return Err(IngestError::EmptyUpload);
    }

    let session = session.map(str::trim).filter(|s| !s.is_empty());
    let layout = classify_columns(&sheet.headers);

    let records: Vec<DerivedResult> = sheet
        .rows
        .iter()
        .map(|row| derive_row(row, &layout, uploaded_by, session))
        .collect();

    let summary = IngestSummary {
        inserted: 0,
        subjects: layout.subject_names(),
        ignored_columns: layout.ignored,
    };
    Ok((records, summary))
}

/// Derive every row of `sheet` and store the batch atomically.
pub async fn ingest_batch<S>(
    store: &S,
    sheet: &Sheet,
    uploaded_by: &str,
    session: Option<&str>,
) -> Result<IngestSummary, IngestError>
where
    S: ResultStore + ?Sized,
{
    let (records, mut summary) = prepare_batch(sheet, uploaded_by, session)?;

    summary.inserted = store
        .insert_batch(&records)
        .await
        .map_err(|e| IngestError::Store(e.to_string()))?;

    Ok(summary)
}
