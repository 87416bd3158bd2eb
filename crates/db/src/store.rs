//! Adapter from the core ingestion seam to PostgreSQL.

use marksheet_core::ingest::ResultStore;
use marksheet_core::result::DerivedResult;

use crate::repositories::StudentResultRepo;
use crate::DbPool;

/// [`ResultStore`] backed by the `student_results` table.
#[derive(Clone)]
pub struct PgResultStore {
    pool: DbPool,
}

impl PgResultStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl ResultStore for PgResultStore {
    type Error = sqlx::Error;

    async fn insert_batch(&self, records: &[DerivedResult]) -> Result<u64, sqlx::Error> {
        StudentResultRepo::insert_batch(&self.pool, records).await
    }
}
