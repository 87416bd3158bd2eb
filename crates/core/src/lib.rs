//! Pure domain logic for exam result publishing.
//!
//! Everything here is free of database and HTTP concerns. The ingestion
//! coordinator reaches storage only through the [`ingest::ResultStore`] trait.

pub mod class_label;
pub mod columns;
pub mod derivation;
pub mod error;
pub mod ingest;
pub mod normalize;
pub mod release;
pub mod result;
pub mod sheet;
pub mod types;
