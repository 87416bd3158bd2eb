//! Repository for the `student_results` table.

use sqlx::types::Json;
use sqlx::PgPool;
use marksheet_core::result::DerivedResult;

use crate::models::student_result::{ResultLookup, StudentResult};

const COLUMNS: &str = "id, class, name, father_name, normalized_name, normalized_father, \
     subjects, grand_total, obtained_total, percentage, grade, status, session, \
     uploaded_by, uploaded_at";

/// Batch insert, lookup, and bulk delete of student results.
pub struct StudentResultRepo;

impl StudentResultRepo {
    /// Insert every record inside one transaction.
    ///
    /// Any failure rolls back the whole batch. Returns the number of rows
    /// inserted.
    pub async fn insert_batch(pool: &PgPool, records: &[DerivedResult]) -> Result<u64, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let mut inserted = 0;

        for record in records {
            let result = sqlx::query(
                "INSERT INTO student_results \
                    (class, name, father_name, normalized_name, normalized_father, subjects, \
                     grand_total, obtained_total, percentage, grade, status, session, uploaded_by) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)",
            )
            .bind(&record.class)
            .bind(&record.name)
            .bind(&record.father_name)
            .bind(&record.normalized_name)
            .bind(&record.normalized_father)
            .bind(Json(&record.subjects))
            .bind(record.grand_total)
            .bind(record.obtained_total)
            .bind(record.percentage)
            .bind(record.grade.as_str())
            .bind(record.status.as_str())
            .bind(&record.session)
            .bind(&record.uploaded_by)
            .execute(&mut *tx)
            .await?;
            inserted += result.rows_affected();
        }

        tx.commit().await?;
        tracing::debug!(rows = inserted, "Committed result batch");
        Ok(inserted)
    }

    /// Exact match on canonical class and normalized names, oldest first.
    pub async fn find_by_lookup(
        pool: &PgPool,
        lookup: &ResultLookup,
    ) -> Result<Vec<StudentResult>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM student_results \
             WHERE class = $1 AND normalized_name = $2 AND normalized_father = $3 \
             ORDER BY id ASC"
        );
        sqlx::query_as::<_, StudentResult>(&query)
            .bind(&lookup.class)
            .bind(&lookup.normalized_name)
            .bind(&lookup.normalized_father)
            .fetch_all(pool)
            .await
    }

    /// Total number of stored results.
    pub async fn count_all(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM student_results")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    /// Hard-delete every stored result. Returns the number of rows removed.
    pub async fn delete_all(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM student_results")
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
