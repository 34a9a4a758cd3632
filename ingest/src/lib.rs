//! Job feed ingestion
//!
//! Downloads the job feed and normalizes whatever shape it arrives in
//! into validated `common::Job` records.

pub mod client;
pub mod error;
pub mod normalize;
pub mod payload;

pub use client::{JobClient, DEFAULT_ENDPOINT};
pub use error::{IngestError, Result};
pub use normalize::{check_unique_ids, format_grouped, format_salary, normalize, normalize_entry};
pub use payload::Payload;
