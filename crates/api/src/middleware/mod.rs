//! Request extractors for authentication.
//!
//! - [`auth::AdminUser`] -- the administrator behind a JWT Bearer token.

pub mod auth;
