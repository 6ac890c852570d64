//! Record normalization pipeline for Noor queue exports.
//!
//! Rows flow through three stages:
//!
//! 1. [`RecordNormalizer`] cleans each row on its own and either yields a
//!    [`NormalizedRecord`] or excludes it with a reason.
//! 2. [`Deduplicator`] groups records by national ID, keeps the most recent,
//!    completes missing names from older records, and separates patients
//!    that share a mobile number.
//! 3. [`normalize`] ties both together into [`OutputBatches`].
//!
//! [`NormalizedRecord`]: noor_model::NormalizedRecord
//! [`OutputBatches`]: noor_model::OutputBatches

pub mod dedupe;
pub mod normalizer;
pub mod pipeline;

pub use dedupe::{Deduplicated, Deduplicator, Supersession};
pub use normalizer::{EXCLUSION_RULES, RecordNormalizer, RowOutcome};
pub use pipeline::normalize;
