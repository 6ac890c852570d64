//! Command-line front end for the Noor queue normalizer.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
pub mod types;
