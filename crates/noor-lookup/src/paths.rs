//! Lookup directory resolution.

use std::path::{Path, PathBuf};

/// Environment variable for overriding the lookup directory.
pub const LOOKUP_ENV_VAR: &str = "NOOR_LOOKUP_DIR";

/// Resolve the lookup directory.
///
/// Resolution order:
/// 1. an explicit directory (the CLI's `--lookup-dir`)
/// 2. `NOOR_LOOKUP_DIR` environment variable
///
/// `None` means no directory is configured and built-in tables apply.
pub fn lookup_root(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(dir) = explicit {
        return Some(dir.to_path_buf());
    }
    std::env::var_os(LOOKUP_ENV_VAR)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}
