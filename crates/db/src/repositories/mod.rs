//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that accept
//! `&PgPool` as the first argument.

pub mod admin_user_repo;
pub mod release_settings_repo;
pub mod student_result_repo;

pub use admin_user_repo::AdminUserRepo;
pub use release_settings_repo::ReleaseSettingsRepo;
pub use student_result_repo::StudentResultRepo;
