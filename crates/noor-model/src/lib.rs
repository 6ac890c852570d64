//! Data model for the Noor queue export normalizer.
//!
//! Raw rows come in, normalized records and exclusion verdicts come out.
//! Everything here is plain data plus the Jalali calendar arithmetic the
//! date projections need and the text cleanup every stage shares.

pub mod date;
pub mod error;
pub mod jalali;
pub mod options;
pub mod outcome;
pub mod record;
pub mod text;

pub use date::{CalendarSource, ResolvedDate};
pub use error::{DateParseError, Field, NormalizeError, Result, ValidationError};
pub use jalali::JalaliDate;
pub use options::{NormalizationOptions, RecencyOrder};
pub use outcome::{ExcludedRecord, ExcludedRow, ExclusionReason, OutputBatches, OutputGroup};
pub use record::{Gender, NormalizedRecord, OutputRow, RawRow};
