//! Per-field derivations for Noor queue rows.
//!
//! Each module is a pure leaf: a date cell becomes a [`ResolvedDate`], a
//! full-name cell becomes [`NameParts`], a first name becomes a [`Gender`],
//! and the status/appointment/clinic cells become tags.
//!
//! [`ResolvedDate`]: noor_model::ResolvedDate
//! [`Gender`]: noor_model::Gender

pub mod calendar;
pub mod gender;
pub mod name;
pub mod tags;

pub use calendar::{detect_calendar, resolve_date};
pub use gender::GenderClassifier;
pub use name::{NameParts, split_full_name};
pub use tags::TagMapper;
