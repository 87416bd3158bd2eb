//! Integration tests for result storage, lookup, and release settings.

use chrono::{TimeZone, Utc};
use marksheet_core::derivation::derive_results;
use marksheet_core::ingest::ingest_batch;
use marksheet_core::result::{DerivedResult, Grade, ObtainedMarks, ResultStatus};
use marksheet_core::sheet::{RawRow, Sheet};
use marksheet_db::models::admin_user::CreateAdminUser;
use marksheet_db::models::release_settings::UpsertReleaseSettings;
use marksheet_db::models::student_result::ResultLookup;
use marksheet_db::repositories::{AdminUserRepo, ReleaseSettingsRepo, StudentResultRepo};
use marksheet_db::PgResultStore;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn sample_results() -> Vec<DerivedResult> {
    let headers: Vec<String> = ["Class", "Name", "Father", "Math Max", "Math Obt", "Eng Max", "Eng Obt"]
        .iter()
        .map(|h| h.to_string())
        .collect();
    let rows = vec![
        RawRow::new(
            ["9th", "Asha", "Ram", "100", "80", "100", "30"]
                .iter()
                .map(|c| c.to_string())
                .collect(),
        ),
        RawRow::new(
            ["10", "Bilal", "Aslam", "100", "AB", "100", "95"]
                .iter()
                .map(|c| c.to_string())
                .collect(),
        ),
    ];
    derive_results(&headers, &rows, "admin")
}

fn lookup(class: &str, name: &str, father: &str) -> ResultLookup {
    ResultLookup {
        class: class.to_string(),
        normalized_name: name.to_string(),
        normalized_father: father.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Schema
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_health_check(pool: PgPool) {
    marksheet_db::health_check(&pool).await.unwrap();
}

// ---------------------------------------------------------------------------
// Student results
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_insert_batch_and_lookup(pool: PgPool) {
    let inserted = StudentResultRepo::insert_batch(&pool, &sample_results())
        .await
        .unwrap();
    assert_eq!(inserted, 2);
    assert_eq!(StudentResultRepo::count_all(&pool).await.unwrap(), 2);

    let found = StudentResultRepo::find_by_lookup(&pool, &lookup("9", "asha", "ram"))
        .await
        .unwrap();
    assert_eq!(found.len(), 1);

    let asha = &found[0];
    assert_eq!(asha.name, "Asha");
    assert_eq!(asha.grade, Grade::CPlus);
    assert_eq!(asha.status, ResultStatus::FailSupply);
    assert_eq!(asha.percentage, 55.0);
    assert_eq!(asha.subjects.0.len(), 2);
    assert_eq!(asha.subjects.0[0].obtained, ObtainedMarks::Numeric(80));

    let miss = StudentResultRepo::find_by_lookup(&pool, &lookup("10", "asha", "ram"))
        .await
        .unwrap();
    assert!(miss.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_absent_subject_round_trips_through_jsonb(pool: PgPool) {
    StudentResultRepo::insert_batch(&pool, &sample_results())
        .await
        .unwrap();

    let found = StudentResultRepo::find_by_lookup(&pool, &lookup("10", "bilal", "aslam"))
        .await
        .unwrap();
    assert_eq!(found[0].status, ResultStatus::Absent);
    assert_eq!(found[0].subjects.0[0].obtained, ObtainedMarks::Absent);

    let json = serde_json::to_value(&found[0]).unwrap();
    assert_eq!(json["subjects"][0]["obtained"], "Absent");
    assert_eq!(json["fatherName"], "Aslam");
    assert!(json["uploadedAt"].is_string());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_failed_batch_leaves_no_rows(pool: PgPool) {
    let mut records = sample_results();
    // Violates ck_student_results_percentage on the second insert.
    records[1].percentage = 150.0;

    let result = StudentResultRepo::insert_batch(&pool, &records).await;
    assert!(result.is_err());
    assert_eq!(StudentResultRepo::count_all(&pool).await.unwrap(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_all(pool: PgPool) {
    StudentResultRepo::insert_batch(&pool, &sample_results())
        .await
        .unwrap();

    let deleted = StudentResultRepo::delete_all(&pool).await.unwrap();
    assert_eq!(deleted, 2);
    assert_eq!(StudentResultRepo::count_all(&pool).await.unwrap(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_ingest_through_pg_store(pool: PgPool) {
    let sheet = Sheet::from_csv_bytes(
        b"Class,Name,Father,Science Max,Science Obt\nClass 8,Chen,Li,50,45\n",
    )
    .unwrap();
    let store = PgResultStore::new(pool.clone());

    let summary = ingest_batch(&store, &sheet, "admin", Some("2024-25"))
        .await
        .unwrap();
    assert_eq!(summary.inserted, 1);

    let found = StudentResultRepo::find_by_lookup(&pool, &lookup("8", "chen", "li"))
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].session.as_deref(), Some("2024-25"));
    assert_eq!(found[0].grade, Grade::APlus);
}

// ---------------------------------------------------------------------------
// Release settings
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_release_settings_singleton_upsert(pool: PgPool) {
    assert!(ReleaseSettingsRepo::get(&pool).await.unwrap().is_none());

    let release_at = Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap();
    let saved = ReleaseSettingsRepo::upsert(
        &pool,
        &UpsertReleaseSettings {
            release_at: Some(release_at),
            site_title: Some("Annual Results".into()),
        },
    )
    .await
    .unwrap();
    assert_eq!(saved.release_at, Some(release_at));

    // Omitted title is kept; omitted release time clears the gate.
    let saved = ReleaseSettingsRepo::upsert(&pool, &UpsertReleaseSettings::default())
        .await
        .unwrap();
    assert_eq!(saved.release_at, None);
    assert_eq!(saved.site_title.as_deref(), Some("Annual Results"));

    let (rows,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM release_settings")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(rows, 1);
}

// ---------------------------------------------------------------------------
// Admin users
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_admin_create_if_absent(pool: PgPool) {
    let input = CreateAdminUser {
        username: "admin".into(),
        password_hash: "hash-one".into(),
    };
    assert!(AdminUserRepo::create_if_absent(&pool, &input).await.unwrap());

    let again = CreateAdminUser {
        username: "admin".into(),
        password_hash: "hash-two".into(),
    };
    assert!(!AdminUserRepo::create_if_absent(&pool, &again).await.unwrap());

    let admin = AdminUserRepo::find_by_username(&pool, "admin")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(admin.password_hash, "hash-one");
}
