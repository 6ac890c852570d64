//! Two-tier name → gender database.
//!
//! The primary tier is a large `name_fa,gender` CSV; the secondary tier is a
//! JSON document of `male`/`female`/`unisex` name lists. Lookups try the
//! primary tier first, so it wins whenever both tiers know a name.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use csv::ReaderBuilder;
use noor_model::Gender;
use noor_model::text::lookup_key;
use serde::Deserialize;

use crate::error::{LookupError, Result};

/// File name of the primary tier inside a lookup directory.
pub const PRIMARY_NAMES_FILE: &str = "iranian_names_full.csv";
/// File name of the secondary tier inside a lookup directory.
pub const SECONDARY_NAMES_FILE: &str = "persian_names_gender.json";

const NAME_COLUMN: &str = "name_fa";
const GENDER_COLUMN: &str = "gender";

#[derive(Debug, Default, Deserialize)]
struct SecondaryNames {
    #[serde(default)]
    male: Vec<String>,
    #[serde(default)]
    female: Vec<String>,
    #[serde(default)]
    unisex: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct NameDatabase {
    primary: HashMap<String, Gender>,
    secondary: HashMap<String, Gender>,
}

impl NameDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a primary entry; only male/female are meaningful here.
    pub fn insert_primary(&mut self, name: &str, gender: Gender) -> bool {
        let key = lookup_key(name);
        if key.is_empty() || gender == Gender::Unknown {
            return false;
        }
        self.primary.insert(key, gender);
        true
    }

    /// Adds a secondary entry unless the name is already present there.
    pub fn insert_secondary(&mut self, name: &str, gender: Gender) -> bool {
        let key = lookup_key(name);
        if key.is_empty() || self.secondary.contains_key(&key) {
            return false;
        }
        self.secondary.insert(key, gender);
        true
    }

    /// Gender recorded for `name`, primary tier first.
    ///
    /// `Some(Gender::Unknown)` means the name is known to be unisex.
    pub fn gender_of(&self, name: &str) -> Option<Gender> {
        let key = lookup_key(name);
        if key.is_empty() {
            return None;
        }
        self.primary
            .get(&key)
            .or_else(|| self.secondary.get(&key))
            .copied()
    }

    pub fn primary_len(&self) -> usize {
        self.primary.len()
    }

    pub fn secondary_len(&self) -> usize {
        self.secondary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primary.is_empty() && self.secondary.is_empty()
    }

    /// Loads `name_fa,gender` rows into the primary tier.
    pub fn load_primary_csv(&mut self, path: &Path) -> Result<usize> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(path)
            .map_err(|e| LookupError::csv(path, e))?;
        let headers = reader
            .headers()
            .map_err(|e| LookupError::csv(path, e))?
            .clone();
        let position = |column: &str| {
            headers
                .iter()
                .position(|h| h.trim().trim_matches('\u{feff}') == column)
                .ok_or_else(|| LookupError::MissingColumn {
                    column: column.to_string(),
                    path: path.to_path_buf(),
                })
        };
        let name_idx = position(NAME_COLUMN)?;
        let gender_idx = position(GENDER_COLUMN)?;

        let mut loaded = 0usize;
        for record in reader.records() {
            let record = record.map_err(|e| LookupError::csv(path, e))?;
            let name = record.get(name_idx).unwrap_or("");
            let Some(gender) = record.get(gender_idx).and_then(Gender::parse) else {
                continue;
            };
            if self.insert_primary(name, gender) {
                loaded += 1;
            }
        }
        Ok(loaded)
    }

    /// Loads the `male`/`female`/`unisex` lists into the secondary tier.
    ///
    /// Unisex names resolve to [`Gender::Unknown`].
    pub fn load_secondary_json(&mut self, path: &Path) -> Result<usize> {
        let text = fs::read_to_string(path).map_err(|e| LookupError::io(path, e))?;
        let lists: SecondaryNames =
            serde_json::from_str(&text).map_err(|source| LookupError::Json {
                path: path.to_path_buf(),
                source,
            })?;
        let mut loaded = 0usize;
        let tiers = [
            (&lists.male, Gender::Male),
            (&lists.female, Gender::Female),
            (&lists.unisex, Gender::Unknown),
        ];
        for (names, gender) in tiers {
            for name in names {
                if self.insert_secondary(name, gender) {
                    loaded += 1;
                }
            }
        }
        Ok(loaded)
    }
}
