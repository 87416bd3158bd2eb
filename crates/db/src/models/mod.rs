//! Row models and DTOs, one module per table.

pub mod admin_user;
pub mod release_settings;
pub mod student_result;
