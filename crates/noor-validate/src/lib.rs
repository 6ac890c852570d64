//! Field format rules for Noor queue rows.
//!
//! Each rule is a pure function returning a `Result`; callers that need a
//! record of every rule's outcome turn results into [`ValidationVerdict`]s.

pub mod checks;
pub mod verdict;

pub use checks::mobile::validate_mobile;
pub use checks::name::{MIN_NAME_CHARS, validate_name};
pub use checks::national_id::validate_national_id;
pub use verdict::ValidationVerdict;
