//! Name-gender database and tag tables.
//!
//! Tables are loaded from an optional lookup directory:
//!
//! ```text
//! lookup/
//! ├── iranian_names_full.csv      # primary names: name_fa,gender
//! ├── persian_names_gender.json   # secondary names: male/female/unisex lists
//! └── tags.toml                   # [status], [appointment_type], [clinic] overrides
//! ```
//!
//! Every file is optional. Without a names file gender detection yields
//! `unknown`; without `tags.toml` the built-in tag tables apply.

pub mod error;
pub mod names;
pub mod paths;
pub mod tags;

use std::path::Path;

use tracing::{debug, info, warn};

pub use error::{LookupError, Result};
pub use names::{NameDatabase, PRIMARY_NAMES_FILE, SECONDARY_NAMES_FILE};
pub use paths::{LOOKUP_ENV_VAR, lookup_root};
pub use tags::{TAGS_FILE, TagTable, TagTables};

/// Everything the per-row normalizer looks up.
#[derive(Debug, Clone, Default)]
pub struct LookupTables {
    pub names: NameDatabase,
    pub tags: TagTables,
}

impl LookupTables {
    pub fn new(names: NameDatabase, tags: TagTables) -> Self {
        Self { names, tags }
    }

    /// Built-in tag tables and an empty name database.
    pub fn builtin() -> Self {
        Self::default()
    }

    /// Load tables from `dir`, or from `NOOR_LOOKUP_DIR` when `dir` is `None`.
    pub fn load(dir: Option<&Path>) -> Result<Self> {
        match lookup_root(dir) {
            Some(root) => Self::load_from(&root),
            None => {
                warn!("no lookup directory configured; gender detection disabled");
                Ok(Self::builtin())
            }
        }
    }

    /// Load tables from a specific directory. Missing files are skipped.
    pub fn load_from(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            return Err(LookupError::DirectoryNotFound {
                path: dir.to_path_buf(),
            });
        }

        let mut names = NameDatabase::new();
        let primary = dir.join(PRIMARY_NAMES_FILE);
        if primary.is_file() {
            let loaded = names.load_primary_csv(&primary)?;
            debug!(path = %primary.display(), loaded, "loaded primary names");
        } else {
            warn!(path = %primary.display(), "primary names file not found");
        }

        let secondary = dir.join(SECONDARY_NAMES_FILE);
        if secondary.is_file() {
            let loaded = names.load_secondary_json(&secondary)?;
            debug!(path = %secondary.display(), loaded, "loaded secondary names");
        } else {
            warn!(path = %secondary.display(), "secondary names file not found");
        }

        if names.is_empty() {
            warn!(dir = %dir.display(), "no name database found; gender detection disabled");
        }

        let mut tags = TagTables::builtin();
        let tag_file = dir.join(TAGS_FILE);
        if tag_file.is_file() {
            let merged = tags.merge_toml(&tag_file)?;
            debug!(path = %tag_file.display(), merged, "merged tag overrides");
        }

        info!(
            primary_names = names.primary_len(),
            secondary_names = names.secondary_len(),
            clinics = tags.clinic.len(),
            "lookup tables loaded"
        );
        Ok(Self::new(names, tags))
    }
}
