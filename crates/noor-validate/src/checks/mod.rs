//! Field format rules.

pub mod mobile;
pub mod name;
pub mod national_id;
